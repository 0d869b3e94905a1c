//! Tunable configuration shared by systems and adapters.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::{BackspacePolicy, CasePolicy, Difficulty, DifficultyTable};

/// Axis-aligned region words travel through, in world units.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Playfield {
    /// Left boundary; forward words reach the edge once they cross it.
    pub min_x: f32,
    /// Right boundary; reverse words reach the edge once they cross it.
    pub max_x: f32,
    /// Upper bounce boundary.
    pub min_y: f32,
    /// Lower bounce boundary.
    pub max_y: f32,
}

impl Playfield {
    /// Creates a playfield spanning the provided extents.
    #[must_use]
    pub const fn new(min_x: f32, max_x: f32, min_y: f32, max_y: f32) -> Self {
        Self {
            min_x,
            max_x,
            min_y,
            max_y,
        }
    }

    /// Horizontal extent of the playfield.
    #[must_use]
    pub fn width(&self) -> f32 {
        self.max_x - self.min_x
    }

    /// Vertical extent of the playfield.
    #[must_use]
    pub fn height(&self) -> f32 {
        self.max_y - self.min_y
    }
}

impl Default for Playfield {
    fn default() -> Self {
        Self::new(0.0, 800.0, 0.0, 600.0)
    }
}

/// Vertical range new words are placed in.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SpawnLane {
    /// Topmost spawn coordinate.
    pub min_y: f32,
    /// Bottommost spawn coordinate.
    pub max_y: f32,
}

impl Default for SpawnLane {
    fn default() -> Self {
        Self {
            min_y: 60.0,
            max_y: 540.0,
        }
    }
}

/// Parameters required to construct the spawner.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SpawnerConfig {
    /// Maximum number of words alive at once.
    pub max_concurrent: usize,
    /// Region words travel through.
    pub playfield: Playfield,
    /// Vertical range used when placing spawned words.
    pub lane: SpawnLane,
    /// Largest vertical speed assigned to spawned words, in units per second.
    pub vertical_drift: f32,
    /// Whether words reflect off the top and bottom of the playfield.
    pub bounce: bool,
    /// Pacing profile per difficulty.
    pub difficulties: DifficultyTable,
    /// Difficulty active when the spawner is created.
    pub difficulty: Difficulty,
    /// Character comparison rule applied to spawned words.
    pub case_policy: CasePolicy,
    /// Seed for queue draws and lane placement.
    pub seed: u64,
}

impl Default for SpawnerConfig {
    fn default() -> Self {
        Self {
            max_concurrent: 5,
            playfield: Playfield::default(),
            lane: SpawnLane::default(),
            vertical_drift: 0.0,
            bounce: true,
            difficulties: DifficultyTable::default(),
            difficulty: Difficulty::default(),
            case_policy: CasePolicy::default(),
            seed: 0x7f4a_7c15_9e37_79b9,
        }
    }
}

impl SpawnerConfig {
    /// Checks that the configuration describes a playable spawner.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_concurrent == 0 {
            return Err(ConfigError::NoConcurrentWords);
        }

        let field = &self.playfield;
        let bounds = [
            field.min_x,
            field.max_x,
            field.min_y,
            field.max_y,
            self.lane.min_y,
            self.lane.max_y,
        ];
        if let Some(value) = bounds.into_iter().find(|value| !value.is_finite()) {
            return Err(ConfigError::NonFiniteBound(value));
        }

        if !(field.width() > 0.0 && field.height() > 0.0) {
            return Err(ConfigError::DegeneratePlayfield {
                width: field.width(),
                height: field.height(),
            });
        }

        if !(self.lane.min_y <= self.lane.max_y) {
            return Err(ConfigError::InvertedLane {
                min_y: self.lane.min_y,
                max_y: self.lane.max_y,
            });
        }

        if !(self.vertical_drift >= 0.0 && self.vertical_drift.is_finite()) {
            return Err(ConfigError::InvalidDrift(self.vertical_drift));
        }

        for (difficulty, profile) in self.difficulties.profiles() {
            if profile.spawn_interval_ms == 0 {
                return Err(ConfigError::ZeroSpawnInterval(difficulty));
            }
            if !(profile.speed > 0.0 && profile.speed.is_finite()) {
                return Err(ConfigError::InvalidSpeed {
                    difficulty,
                    speed: profile.speed,
                });
            }
        }

        Ok(())
    }
}

/// Parameters consumed by the input router.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct InputConfig {
    /// What backspace does to the active word.
    pub backspace: BackspacePolicy,
}

/// Parameters governing lives, scoring and campaign length.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    /// Lives granted at the start of a session.
    pub starting_lives: u32,
    /// Last level of the campaign.
    pub final_level: u32,
    /// Points awarded for every accepted character.
    pub points_per_character: u64,
    /// Base points awarded for every completed word.
    pub points_per_word: u64,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            starting_lives: 3,
            final_level: 3,
            points_per_character: 1,
            points_per_word: 10,
        }
    }
}

impl SessionConfig {
    /// Checks that the configuration describes a winnable session.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.starting_lives == 0 {
            return Err(ConfigError::NoLives);
        }
        if self.final_level == 0 {
            return Err(ConfigError::NoLevels);
        }
        Ok(())
    }
}

/// Complete configuration surface loaded by adapters.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ArcadeConfig {
    /// Spawner tuning.
    pub spawner: SpawnerConfig,
    /// Input router tuning.
    pub input: InputConfig,
    /// Session tuning.
    pub session: SessionConfig,
}

impl ArcadeConfig {
    /// Validates every section of the configuration.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.spawner.validate()?;
        self.session.validate()
    }
}

/// Reasons a configuration is rejected.
#[derive(Clone, Debug, PartialEq, Error)]
pub enum ConfigError {
    /// `max_concurrent` must allow at least one live word.
    #[error("max_concurrent must be at least 1")]
    NoConcurrentWords,
    /// A playfield or spawn lane bound is infinite or NaN.
    #[error("playfield and spawn lane bounds must be finite, got {0}")]
    NonFiniteBound(f32),
    /// The playfield has no area.
    #[error("playfield must have positive extents, got {width}x{height}")]
    DegeneratePlayfield {
        /// Computed playfield width.
        width: f32,
        /// Computed playfield height.
        height: f32,
    },
    /// The spawn lane's bounds are swapped.
    #[error("spawn lane min_y {min_y} exceeds max_y {max_y}")]
    InvertedLane {
        /// Configured top of the lane.
        min_y: f32,
        /// Configured bottom of the lane.
        max_y: f32,
    },
    /// Vertical drift is negative or not finite.
    #[error("vertical drift must be a finite non-negative number, got {0}")]
    InvalidDrift(f32),
    /// A difficulty profile never spawns.
    #[error("spawn interval for {0:?} must be greater than zero")]
    ZeroSpawnInterval(Difficulty),
    /// A difficulty profile has an unusable speed.
    #[error("speed for {difficulty:?} must be positive and finite, got {speed}")]
    InvalidSpeed {
        /// Difficulty carrying the bad profile.
        difficulty: Difficulty,
        /// Configured speed.
        speed: f32,
    },
    /// The session starts without lives.
    #[error("starting_lives must be at least 1")]
    NoLives,
    /// The campaign has no levels.
    #[error("final_level must be at least 1")]
    NoLevels,
}
