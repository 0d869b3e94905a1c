#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Spawning system that owns the live words of a level.
//!
//! The [`Spawner`] draws texts from the level's pending queue on a timer,
//! advances every live word once per tick, retires words that reached a
//! terminal state and announces level completion exactly once.

use std::{fmt, time::Duration};

use glam::Vec2;
use log::{debug, info};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use typing_arcade_core::{
    Author, Dictionary, DictionaryEntry, Difficulty, DifficultyProfile, Event, Level,
    SpawnerConfig, TravelDirection, WordId,
};
use typing_arcade_world::{Kinematics, Session, Word, WordCollection};

type SpawnPointFn = Box<dyn Fn(Option<&Author>) -> Option<Vec2>>;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum LevelPhase {
    Idle,
    Running,
    Complete,
}

/// Scheduler that creates, advances and retires words.
pub struct Spawner {
    config: SpawnerConfig,
    words: WordCollection,
    pending: Vec<DictionaryEntry>,
    rng: ChaCha8Rng,
    spawn_timer: Duration,
    difficulty: Difficulty,
    spawning: bool,
    next_id: u32,
    level: Level,
    phase: LevelPhase,
    loaded: usize,
    resolved: usize,
    unqueued: Vec<WordId>,
    spawn_point: Option<SpawnPointFn>,
}

impl Spawner {
    /// Creates an idle spawner. Nothing spawns until a level is loaded.
    #[must_use]
    pub fn new(config: SpawnerConfig) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(config.seed),
            difficulty: config.difficulty,
            config,
            words: WordCollection::new(),
            pending: Vec::new(),
            spawn_timer: Duration::ZERO,
            spawning: true,
            next_id: 1,
            level: Level::FIRST,
            phase: LevelPhase::Idle,
            loaded: 0,
            resolved: 0,
            unqueued: Vec::new(),
            spawn_point: None,
        }
    }

    /// Installs a callback that may override where an author's words appear.
    ///
    /// Returning `None` falls back to the playfield edge.
    pub fn set_spawn_point<F>(&mut self, spawn_point: F)
    where
        F: Fn(Option<&Author>) -> Option<Vec2> + 'static,
    {
        self.spawn_point = Some(Box::new(spawn_point));
    }

    /// Removes the spawn point override.
    pub fn clear_spawn_point(&mut self) {
        self.spawn_point = None;
    }

    /// Configuration the spawner was built with.
    #[must_use]
    pub const fn config(&self) -> &SpawnerConfig {
        &self.config
    }

    /// Live words in spawn order.
    #[must_use]
    pub const fn words(&self) -> &WordCollection {
        &self.words
    }

    /// Live words for typing.
    pub fn words_mut(&mut self) -> &mut WordCollection {
        &mut self.words
    }

    /// Number of texts still waiting to be spawned this level.
    #[must_use]
    pub fn pending_len(&self) -> usize {
        self.pending.len()
    }

    /// Level whose texts are being spawned.
    #[must_use]
    pub const fn level(&self) -> Level {
        self.level
    }

    /// Reports whether the current level has been announced complete.
    #[must_use]
    pub fn is_level_complete(&self) -> bool {
        self.phase == LevelPhase::Complete
    }

    /// Share of the level's queued texts that were typed or got through.
    #[must_use]
    pub fn level_progress(&self) -> f32 {
        if self.loaded == 0 {
            return if self.phase == LevelPhase::Idle { 0.0 } else { 1.0 };
        }
        (self.resolved as f32 / self.loaded as f32).min(1.0)
    }

    /// Difficulty used for the next spawn.
    #[must_use]
    pub const fn difficulty(&self) -> Difficulty {
        self.difficulty
    }

    /// Changes the pacing of subsequently spawned words.
    ///
    /// Live words keep the speed they were spawned with.
    pub fn set_difficulty(&mut self, difficulty: Difficulty) {
        self.difficulty = difficulty;
    }

    /// Pacing profile for the current difficulty.
    #[must_use]
    pub const fn profile(&self) -> DifficultyProfile {
        self.config.difficulties.profile(self.difficulty)
    }

    /// Reports whether timed spawning is enabled.
    #[must_use]
    pub const fn is_spawning(&self) -> bool {
        self.spawning
    }

    /// Enables or disables timed spawning. Live words keep moving.
    pub fn set_spawning(&mut self, spawning: bool) {
        self.spawning = spawning;
    }

    /// Loads the session's current level from the dictionary.
    ///
    /// Live words are removed immediately without being resolved.
    pub fn reset_for_level<D>(&mut self, session: &Session, dictionary: &D, out: &mut Vec<Event>)
    where
        D: Dictionary + ?Sized,
    {
        let level = session.level();
        self.load_level(level, dictionary.entries_for_level(level), out);
    }

    /// Loads an explicit list of texts as the pending queue for `level`.
    pub fn load_level(
        &mut self,
        level: Level,
        entries: Vec<DictionaryEntry>,
        out: &mut Vec<Event>,
    ) {
        for word in self.words.clear() {
            out.push(Event::WordDespawned { word: word.id() });
        }

        self.pending = entries
            .into_iter()
            .filter(|entry| !entry.text.trim().is_empty())
            .collect();
        self.level = level;
        self.phase = LevelPhase::Running;
        self.spawn_timer = Duration::ZERO;
        self.loaded = self.pending.len();
        self.resolved = 0;
        self.unqueued.clear();

        info!("level {level} loaded with {} texts", self.loaded);
    }

    /// Advances the spawn timer and every live word by `dt`.
    pub fn update(&mut self, dt: Duration, out: &mut Vec<Event>) {
        self.spawn_timer = self.spawn_timer.saturating_add(dt);

        if self.spawning
            && self.spawn_timer >= self.profile().spawn_interval()
            && self.words.len() < self.config.max_concurrent
        {
            let _ = self.spawn_one(out);
            self.spawn_timer = Duration::ZERO;
        }

        for word in self.words.iter_mut() {
            word.update(dt);
            if word.take_edge_notice() {
                debug!("word {} reached the edge", word.id().get());
                out.push(Event::WordReachedEdge {
                    word: word.snapshot(),
                });
            }
            if word.take_completion_notice() {
                out.push(Event::WordCompleted {
                    word: word.snapshot(),
                });
            }
        }

        for word in self.words.drain_resolved() {
            self.retire(word.id());
            out.push(Event::WordDespawned { word: word.id() });
        }

        if self.phase == LevelPhase::Running && self.pending.is_empty() && self.words.is_empty() {
            self.phase = LevelPhase::Complete;
            info!("level {} complete", self.level);
            out.push(Event::LevelComplete { level: self.level });
        }
    }

    /// Spawns one randomly drawn pending text.
    ///
    /// Returns `None` when the queue is empty.
    pub fn spawn_one(&mut self, out: &mut Vec<Event>) -> Option<WordId> {
        if self.pending.is_empty() {
            return None;
        }

        let index = self.rng.gen_range(0..self.pending.len());
        let entry = self.pending.swap_remove(index);
        let direction = TravelDirection::Forward;
        let kinematics = self.kinematics(entry.author.as_ref(), direction);
        Some(self.insert(entry.text, entry.author, kinematics, out))
    }

    /// Spawns a player-originated message travelling in reverse.
    ///
    /// Bypasses the pending queue and the concurrency cap. Blank texts are
    /// refused and return `None`.
    pub fn spawn_player_message(
        &mut self,
        text: impl Into<String>,
        out: &mut Vec<Event>,
    ) -> Option<WordId> {
        let text = text.into();
        if text.trim().is_empty() {
            debug!("refused blank player message");
            return None;
        }

        let author = Author::player();
        let kinematics = self.kinematics(Some(&author), TravelDirection::Reverse);
        let id = self.insert(text, Some(author), kinematics, out);
        self.unqueued.push(id);
        Some(id)
    }

    fn insert(
        &mut self,
        text: String,
        author: Option<Author>,
        kinematics: Kinematics,
        out: &mut Vec<Event>,
    ) -> WordId {
        let id = WordId::new(self.next_id);
        self.next_id = self.next_id.wrapping_add(1);

        let word = Word::new(id, text, author, self.config.case_policy, kinematics);
        debug!(
            "spawned word {} {:?} at ({:.1}, {:.1})",
            id.get(),
            word.text(),
            kinematics.position.x,
            kinematics.position.y
        );
        out.push(Event::WordSpawned {
            word: word.snapshot(),
        });
        self.words.push(word);
        id
    }

    fn kinematics(&mut self, author: Option<&Author>, direction: TravelDirection) -> Kinematics {
        let position = self.spawn_position(author, direction);
        let drift = self.config.vertical_drift;
        let vertical = if drift > 0.0 {
            self.rng.gen_range(-drift..=drift)
        } else {
            0.0
        };

        Kinematics {
            position,
            velocity: Vec2::new(direction.sign() * self.profile().speed, vertical),
            direction,
            playfield: self.config.playfield,
            bounce: self.config.bounce,
        }
    }

    fn spawn_position(&mut self, author: Option<&Author>, direction: TravelDirection) -> Vec2 {
        if let Some(position) = self
            .spawn_point
            .as_ref()
            .and_then(|spawn_point| spawn_point(author))
        {
            return position;
        }

        let x = match direction {
            TravelDirection::Forward => self.config.playfield.max_x,
            TravelDirection::Reverse => self.config.playfield.min_x,
        };
        let lane = self.config.lane;
        let y = if lane.min_y < lane.max_y {
            self.rng.gen_range(lane.min_y..=lane.max_y)
        } else {
            lane.min_y
        };
        Vec2::new(x, y)
    }

    fn retire(&mut self, id: WordId) {
        if let Some(index) = self.unqueued.iter().position(|unqueued| *unqueued == id) {
            let _ = self.unqueued.swap_remove(index);
        } else {
            self.resolved += 1;
        }
    }
}

impl fmt::Debug for Spawner {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Spawner")
            .field("words", &self.words.len())
            .field("pending", &self.pending.len())
            .field("spawn_timer", &self.spawn_timer)
            .field("difficulty", &self.difficulty)
            .field("spawning", &self.spawning)
            .field("level", &self.level)
            .field("phase", &self.phase)
            .field("has_spawn_point", &self.spawn_point.is_some())
            .finish_non_exhaustive()
    }
}
