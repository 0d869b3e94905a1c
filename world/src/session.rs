use typing_arcade_core::{Level, SessionConfig};

/// Overall state of a play session.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SessionStatus {
    /// Words are still being played.
    Playing,
    /// The player ran out of lives.
    GameOver,
    /// The final level was completed.
    Victory,
}

/// Explicit per-session context shared by systems and the host.
///
/// Holds the current level, score, lives and typing statistics. Systems
/// receive it by reference; there is no global game state.
#[derive(Clone, Debug)]
pub struct Session {
    config: SessionConfig,
    level: Level,
    score: u64,
    lives: u32,
    streak: u32,
    best_streak: u32,
    hits: u64,
    misses: u64,
    words_completed: u64,
    words_missed: u64,
    status: SessionStatus,
}

impl Session {
    /// Starts a new session on the first level.
    #[must_use]
    pub fn new(config: SessionConfig) -> Self {
        Self {
            config,
            level: Level::FIRST,
            score: 0,
            lives: config.starting_lives,
            streak: 0,
            best_streak: 0,
            hits: 0,
            misses: 0,
            words_completed: 0,
            words_missed: 0,
            status: SessionStatus::Playing,
        }
    }

    /// Configuration the session was started with.
    #[must_use]
    pub const fn config(&self) -> &SessionConfig {
        &self.config
    }

    /// Level currently being played.
    #[must_use]
    pub const fn level(&self) -> Level {
        self.level
    }

    /// Reports whether the current level is the campaign's last.
    #[must_use]
    pub const fn is_final_level(&self) -> bool {
        self.level.get() >= self.config.final_level
    }

    /// Accumulated score.
    #[must_use]
    pub const fn score(&self) -> u64 {
        self.score
    }

    /// Lives left.
    #[must_use]
    pub const fn lives(&self) -> u32 {
        self.lives
    }

    /// Consecutive words completed without letting one through.
    #[must_use]
    pub const fn streak(&self) -> u32 {
        self.streak
    }

    /// Longest streak observed this session.
    #[must_use]
    pub const fn best_streak(&self) -> u32 {
        self.best_streak
    }

    /// Characters accepted by words.
    #[must_use]
    pub const fn hits(&self) -> u64 {
        self.hits
    }

    /// Characters rejected by the active word.
    #[must_use]
    pub const fn misses(&self) -> u64 {
        self.misses
    }

    /// Words typed in full.
    #[must_use]
    pub const fn words_completed(&self) -> u64 {
        self.words_completed
    }

    /// Words that crossed their destroy boundary.
    #[must_use]
    pub const fn words_missed(&self) -> u64 {
        self.words_missed
    }

    /// Share of keystrokes aimed at a word that were accepted.
    #[must_use]
    pub fn accuracy(&self) -> f32 {
        let total = self.hits + self.misses;
        if total == 0 {
            return 1.0;
        }
        self.hits as f32 / total as f32
    }

    /// Overall state of the session.
    #[must_use]
    pub const fn status(&self) -> SessionStatus {
        self.status
    }

    /// Reports whether the session still accepts play.
    #[must_use]
    pub fn is_playing(&self) -> bool {
        self.status == SessionStatus::Playing
    }

    /// Records an accepted keystroke.
    pub fn record_hit(&mut self) {
        self.hits = self.hits.saturating_add(1);
    }

    /// Records a rejected keystroke.
    pub fn record_miss(&mut self) {
        self.misses = self.misses.saturating_add(1);
    }

    /// Adds points to the score.
    pub fn add_score(&mut self, points: u64) {
        self.score = self.score.saturating_add(points);
    }

    /// Records a completed word and extends the streak.
    pub fn record_completion(&mut self) {
        self.words_completed = self.words_completed.saturating_add(1);
        self.streak = self.streak.saturating_add(1);
        self.best_streak = self.best_streak.max(self.streak);
    }

    /// Records a word that got through, costing a life and the streak.
    ///
    /// Returns the lives left.
    pub fn record_escape(&mut self) -> u32 {
        self.words_missed = self.words_missed.saturating_add(1);
        self.streak = 0;
        self.lives = self.lives.saturating_sub(1);
        if self.lives == 0 {
            self.status = SessionStatus::GameOver;
        }
        self.lives
    }

    /// Moves on to the next level.
    pub fn advance_level(&mut self) -> Level {
        self.level = self.level.next();
        self.level
    }

    /// Marks the campaign as won.
    pub fn finish(&mut self) {
        if self.status == SessionStatus::Playing {
            self.status = SessionStatus::Victory;
        }
    }
}
