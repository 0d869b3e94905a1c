#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Core contracts shared across the typing arcade.
//!
//! This crate defines the vocabulary that connects the authoritative word
//! state, the pure systems that drive it, and the adapters hosting the game.
//! Systems mutate state synchronously inside a frame and report every
//! observable transition as an [`Event`] pushed into a caller-owned buffer.
//! Hosts read those events to drive scoring, visuals and audio; nothing in
//! the core depends on a renderer.

mod config;

use std::fmt;

use glam::Vec2;
use serde::{Deserialize, Serialize};

pub use config::{
    ArcadeConfig, ConfigError, InputConfig, Playfield, SessionConfig, SpawnLane, SpawnerConfig,
};

/// Canonical banner emitted when the experience boots.
pub const WELCOME_BANNER: &str = "Type fast. Nothing gets through.";

/// Unique identifier assigned to a word when it is spawned.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct WordId(u32);

impl WordId {
    /// Creates a new word identifier with the provided numeric value.
    #[must_use]
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    /// Retrieves the numeric representation of the identifier.
    #[must_use]
    pub const fn get(&self) -> u32 {
        self.0
    }
}

/// One-based level number within a campaign.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Level(u32);

impl Level {
    /// The level every session starts on.
    pub const FIRST: Level = Level(1);

    /// Creates a new level wrapper. Zero is promoted to the first level.
    #[must_use]
    pub const fn new(value: u32) -> Self {
        if value == 0 {
            Self::FIRST
        } else {
            Self(value)
        }
    }

    /// Retrieves the underlying level number.
    #[must_use]
    pub const fn get(&self) -> u32 {
        self.0
    }

    /// Level that follows this one.
    #[must_use]
    pub const fn next(self) -> Self {
        Self(self.0.saturating_add(1))
    }

    /// Scene variant played on this level.
    #[must_use]
    pub const fn kind(self) -> LevelKind {
        match self.0 {
            0 | 1 => LevelKind::Words,
            2 => LevelKind::Messages,
            _ => LevelKind::Boss,
        }
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Scene variants that escalate as the campaign progresses.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum LevelKind {
    /// Plain words fly across the playfield.
    Words,
    /// Mentor messages attributed to named speakers.
    Messages,
    /// Boss battle where the player also sends messages back.
    Boss,
}

/// Tag naming who originated a piece of text.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Author(String);

impl Author {
    const PLAYER: &'static str = "player";

    /// Creates an author tag from the provided name.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    /// Reserved tag for messages originated by the player.
    #[must_use]
    pub fn player() -> Self {
        Self(Self::PLAYER.to_owned())
    }

    /// Reports whether this tag marks a player-originated message.
    #[must_use]
    pub fn is_player(&self) -> bool {
        self.0 == Self::PLAYER
    }

    /// Name carried by the tag.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Author {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Direction a word travels along the horizontal axis.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum TravelDirection {
    /// Spawned on the right edge, destroyed past the left boundary.
    #[default]
    Forward,
    /// Spawned on the left edge, destroyed past the right boundary.
    Reverse,
}

impl TravelDirection {
    /// Sign applied to the horizontal speed for this direction.
    #[must_use]
    pub const fn sign(self) -> f32 {
        match self {
            Self::Forward => -1.0,
            Self::Reverse => 1.0,
        }
    }
}

/// Rule used when comparing typed characters against target text.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CasePolicy {
    /// Characters match when their lowercase forms are equal.
    #[default]
    Insensitive,
    /// Characters must match exactly.
    Sensitive,
}

impl CasePolicy {
    /// Reports whether `typed` satisfies the `expected` character.
    #[must_use]
    pub fn chars_match(self, expected: char, typed: char) -> bool {
        match self {
            Self::Sensitive => expected == typed,
            Self::Insensitive => {
                expected == typed || expected.to_lowercase().eq(typed.to_lowercase())
            }
        }
    }

    /// Reports whether `text` begins with `prefix` under this policy.
    #[must_use]
    pub fn starts_with(self, text: &str, prefix: &str) -> bool {
        let mut remaining = text.chars();
        prefix.chars().all(|typed| {
            remaining
                .next()
                .is_some_and(|expected| self.chars_match(expected, typed))
        })
    }
}

/// What a backspace does to the word being typed.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BackspacePolicy {
    /// Only shrinks the router's candidate buffer; word progress is kept.
    #[default]
    ClearCandidate,
    /// Shrinks the candidate buffer and rolls back the word's progress.
    RollBack,
}

/// Difficulty presets selectable by the player.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Difficulty {
    /// Slow words, relaxed spawn cadence.
    Easy,
    /// Default pacing.
    #[default]
    Medium,
    /// Fast words, tight spawn cadence.
    Hard,
}

/// Pacing pair derived from a [`Difficulty`].
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct DifficultyProfile {
    /// Horizontal speed of newly spawned words in world units per second.
    pub speed: f32,
    /// Minimum time between two spawns, in milliseconds.
    pub spawn_interval_ms: u64,
}

impl DifficultyProfile {
    /// Creates a new pacing profile.
    #[must_use]
    pub const fn new(speed: f32, spawn_interval_ms: u64) -> Self {
        Self {
            speed,
            spawn_interval_ms,
        }
    }

    /// Spawn interval expressed as a [`std::time::Duration`].
    #[must_use]
    pub const fn spawn_interval(&self) -> std::time::Duration {
        std::time::Duration::from_millis(self.spawn_interval_ms)
    }
}

/// Pacing profiles for every [`Difficulty`].
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DifficultyTable {
    /// Profile used on [`Difficulty::Easy`].
    pub easy: DifficultyProfile,
    /// Profile used on [`Difficulty::Medium`].
    pub medium: DifficultyProfile,
    /// Profile used on [`Difficulty::Hard`].
    pub hard: DifficultyProfile,
}

impl DifficultyTable {
    /// Looks up the profile for the provided difficulty.
    #[must_use]
    pub const fn profile(&self, difficulty: Difficulty) -> DifficultyProfile {
        match difficulty {
            Difficulty::Easy => self.easy,
            Difficulty::Medium => self.medium,
            Difficulty::Hard => self.hard,
        }
    }

    fn profiles(&self) -> [(Difficulty, DifficultyProfile); 3] {
        [
            (Difficulty::Easy, self.easy),
            (Difficulty::Medium, self.medium),
            (Difficulty::Hard, self.hard),
        ]
    }
}

impl Default for DifficultyTable {
    fn default() -> Self {
        Self {
            easy: DifficultyProfile::new(60.0, 2_500),
            medium: DifficultyProfile::new(90.0, 2_000),
            hard: DifficultyProfile::new(130.0, 1_500),
        }
    }
}

/// Single candidate text supplied by a dictionary.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DictionaryEntry {
    /// Text the player must reproduce.
    pub text: String,
    /// Speaker credited with the text, if any.
    #[serde(default)]
    pub author: Option<Author>,
}

impl DictionaryEntry {
    /// Creates an unattributed entry.
    #[must_use]
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            author: None,
        }
    }

    /// Creates an entry credited to the provided author.
    #[must_use]
    pub fn attributed(text: impl Into<String>, author: Author) -> Self {
        Self {
            text: text.into(),
            author: Some(author),
        }
    }
}

/// Pure data source queried once per level.
pub trait Dictionary {
    /// Returns every candidate text for the provided level.
    fn entries_for_level(&self, level: Level) -> Vec<DictionaryEntry>;
}

impl<F> Dictionary for F
where
    F: Fn(Level) -> Vec<DictionaryEntry>,
{
    fn entries_for_level(&self, level: Level) -> Vec<DictionaryEntry> {
        self(level)
    }
}

/// Immutable representation of a word used in events and queries.
#[derive(Clone, Debug, PartialEq)]
pub struct WordSnapshot {
    /// Identifier assigned at spawn time.
    pub id: WordId,
    /// Full target text.
    pub text: String,
    /// Speaker credited with the text, if any.
    pub author: Option<Author>,
    /// Number of characters typed so far.
    pub typed: usize,
    /// Position at the time the snapshot was taken.
    pub position: Vec2,
    /// Direction of travel.
    pub direction: TravelDirection,
}

/// Keystrokes understood by the input router.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum InputKey {
    /// A printable character.
    Character(char),
    /// Removes the last candidate character.
    Backspace,
    /// Abandons the current word.
    Escape,
}

/// Transitions reported by systems while handling input and ticks.
#[derive(Clone, Debug, PartialEq)]
pub enum Event {
    /// A new word entered the playfield.
    WordSpawned {
        /// State of the word immediately after spawning.
        word: WordSnapshot,
    },
    /// A word became the target of typed characters.
    WordActivated {
        /// Identifier of the activated word.
        word: WordId,
    },
    /// A word stopped receiving typed characters.
    WordDeactivated {
        /// Identifier of the deactivated word.
        word: WordId,
    },
    /// A typed character advanced a word.
    CharacterAccepted {
        /// Identifier of the word that advanced.
        word: WordId,
        /// Character that was accepted.
        character: char,
        /// Progress after accepting the character.
        typed: usize,
    },
    /// A typed character did not match the active word.
    CharacterRejected {
        /// Identifier of the word that rejected the character.
        word: WordId,
        /// Character that was typed.
        character: char,
        /// Character the word expected next.
        expected: Option<char>,
    },
    /// A backspace rolled back a word's progress.
    CharacterRetracted {
        /// Identifier of the word that lost progress.
        word: WordId,
        /// Progress after the rollback.
        typed: usize,
    },
    /// A word was typed in full.
    WordCompleted {
        /// Final state of the word.
        word: WordSnapshot,
    },
    /// A word crossed its destroy boundary before being completed.
    WordReachedEdge {
        /// Final state of the word.
        word: WordSnapshot,
    },
    /// A word left the live collection.
    WordDespawned {
        /// Identifier of the removed word.
        word: WordId,
    },
    /// Every queued and live word of the level has been resolved.
    LevelComplete {
        /// Level that was completed.
        level: Level,
    },
    /// The session moved on to a new level.
    LevelAdvanced {
        /// Level that is now being played.
        level: Level,
    },
    /// The final level was completed.
    CampaignComplete {
        /// Score at the end of the campaign.
        score: u64,
    },
    /// The player ran out of lives.
    GameOver {
        /// Score at the end of the session.
        score: u64,
    },
}
