use std::time::Duration;

use glam::Vec2;
use typing_arcade_core::{Author, CasePolicy, Playfield, TravelDirection, WordId, WordSnapshot};

/// Kinematic parameters assigned to a word when it is spawned.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Kinematics {
    /// Initial position in world units.
    pub position: Vec2,
    /// Velocity in world units per second.
    pub velocity: Vec2,
    /// Direction of travel; selects the destroy boundary.
    pub direction: TravelDirection,
    /// Region the word travels through.
    pub playfield: Playfield,
    /// Whether the word reflects off the top and bottom of the playfield.
    pub bounce: bool,
}

/// Single typable unit travelling across the playfield.
///
/// A word moves from `spawned` through `typing` into exactly one of two
/// terminal states: completed or reached-edge. Terminal words never move,
/// never accept characters and are never reactivated.
#[derive(Clone, Debug)]
pub struct Word {
    id: WordId,
    text: String,
    chars: Vec<char>,
    author: Option<Author>,
    case_policy: CasePolicy,
    typed: usize,
    active: bool,
    completed: bool,
    reached_edge: bool,
    error: bool,
    completion_noticed: bool,
    edge_noticed: bool,
    position: Vec2,
    velocity: Vec2,
    direction: TravelDirection,
    playfield: Playfield,
    bounce: bool,
}

impl Word {
    /// Creates a new inactive word with no typed progress.
    #[must_use]
    pub fn new(
        id: WordId,
        text: impl Into<String>,
        author: Option<Author>,
        case_policy: CasePolicy,
        kinematics: Kinematics,
    ) -> Self {
        let text = text.into();
        let chars: Vec<char> = text.chars().collect();
        let completed = chars.is_empty();
        Self {
            id,
            text,
            chars,
            author,
            case_policy,
            typed: 0,
            active: false,
            completed,
            reached_edge: false,
            error: false,
            completion_noticed: false,
            edge_noticed: false,
            position: kinematics.position,
            velocity: kinematics.velocity,
            direction: kinematics.direction,
            playfield: kinematics.playfield,
            bounce: kinematics.bounce,
        }
    }

    /// Identifier assigned at spawn time.
    #[must_use]
    pub const fn id(&self) -> WordId {
        self.id
    }

    /// Full target text.
    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Number of characters in the target text.
    #[must_use]
    pub fn len(&self) -> usize {
        self.chars.len()
    }

    /// Reports whether the target text is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.chars.is_empty()
    }

    /// Speaker credited with the text, if any.
    #[must_use]
    pub fn author(&self) -> Option<&Author> {
        self.author.as_ref()
    }

    /// Number of characters typed so far.
    #[must_use]
    pub const fn typed(&self) -> usize {
        self.typed
    }

    /// Reports whether the word currently receives typed characters.
    #[must_use]
    pub const fn is_active(&self) -> bool {
        self.active
    }

    /// Reports whether the word was typed in full.
    #[must_use]
    pub const fn is_completed(&self) -> bool {
        self.completed
    }

    /// Reports whether the word crossed its destroy boundary.
    #[must_use]
    pub const fn has_reached_edge(&self) -> bool {
        self.reached_edge
    }

    /// Reports whether the word reached either terminal state.
    #[must_use]
    pub const fn is_resolved(&self) -> bool {
        self.completed || self.reached_edge
    }

    /// Reports whether the last typed character was rejected.
    ///
    /// Presentation-only; cleared by the next accepted character.
    #[must_use]
    pub const fn has_error(&self) -> bool {
        self.error
    }

    /// Clears the presentation error flag.
    pub fn clear_error(&mut self) {
        self.error = false;
    }

    /// Current position in world units.
    #[must_use]
    pub const fn position(&self) -> Vec2 {
        self.position
    }

    /// Current velocity in world units per second.
    #[must_use]
    pub const fn velocity(&self) -> Vec2 {
        self.velocity
    }

    /// Direction of travel.
    #[must_use]
    pub const fn direction(&self) -> TravelDirection {
        self.direction
    }

    /// Splits the text into its typed and remaining halves.
    #[must_use]
    pub fn split_typed(&self) -> (&str, &str) {
        let index = self
            .text
            .char_indices()
            .nth(self.typed)
            .map_or(self.text.len(), |(index, _)| index);
        self.text.split_at(index)
    }

    /// Horizontal distance left before the word reaches its destroy boundary.
    #[must_use]
    pub fn distance_to_edge(&self) -> f32 {
        match self.direction {
            TravelDirection::Forward => self.position.x - self.playfield.min_x,
            TravelDirection::Reverse => self.playfield.max_x - self.position.x,
        }
        .max(0.0)
    }

    /// Character expected next, or `None` once completed.
    #[must_use]
    pub fn next_character(&self) -> Option<char> {
        if self.completed {
            return None;
        }
        self.chars.get(self.typed).copied()
    }

    /// Reports whether the target text begins with `candidate`.
    #[must_use]
    pub fn matches_prefix(&self, candidate: &str) -> bool {
        self.case_policy.starts_with(&self.text, candidate)
    }

    /// Flips the active flag.
    ///
    /// Completed words keep their final state. Callers own the invariant that
    /// at most one word in a collection is active.
    pub fn set_active(&mut self, active: bool) {
        if self.completed {
            return;
        }
        self.active = active;
    }

    /// Attempts to advance the word with a typed character.
    ///
    /// Returns `false` without touching progress when the word is inactive,
    /// completed, or the character does not match.
    pub fn type_character(&mut self, character: char) -> bool {
        if self.completed || !self.active {
            return false;
        }

        let Some(expected) = self.next_character() else {
            return false;
        };

        if !self.case_policy.chars_match(expected, character) {
            self.error = true;
            return false;
        }

        self.error = false;
        self.typed += 1;
        debug_assert!(self.typed <= self.chars.len(), "progress exceeds text length");
        if self.typed >= self.chars.len() {
            self.typed = self.chars.len();
            self.completed = true;
            self.active = false;
        }
        true
    }

    /// Rolls progress back by one character.
    ///
    /// Only used under [`typing_arcade_core::BackspacePolicy::RollBack`].
    pub fn retract(&mut self) -> bool {
        if self.completed || self.typed == 0 {
            return false;
        }
        self.typed -= 1;
        self.error = false;
        true
    }

    /// Advances kinematics by `dt`.
    pub fn update(&mut self, dt: Duration) {
        if self.is_resolved() {
            return;
        }

        self.position += self.velocity * dt.as_secs_f32();

        if self.bounce {
            if self.position.y < self.playfield.min_y {
                self.position.y = self.playfield.min_y;
                self.velocity.y = self.velocity.y.abs();
            } else if self.position.y > self.playfield.max_y {
                self.position.y = self.playfield.max_y;
                self.velocity.y = -self.velocity.y.abs();
            }
        }

        self.reached_edge = match self.direction {
            TravelDirection::Forward => self.position.x < self.playfield.min_x,
            TravelDirection::Reverse => self.position.x > self.playfield.max_x,
        };
        if self.reached_edge {
            self.active = false;
        }
    }

    /// Returns `true` exactly once after the word completes.
    pub fn take_completion_notice(&mut self) -> bool {
        if self.completed && !self.completion_noticed {
            self.completion_noticed = true;
            return true;
        }
        false
    }

    /// Returns `true` exactly once after the word reaches its edge.
    pub fn take_edge_notice(&mut self) -> bool {
        if self.reached_edge && !self.edge_noticed {
            self.edge_noticed = true;
            return true;
        }
        false
    }

    /// Captures an immutable snapshot for events.
    #[must_use]
    pub fn snapshot(&self) -> WordSnapshot {
        WordSnapshot {
            id: self.id,
            text: self.text.clone(),
            author: self.author.clone(),
            typed: self.typed,
            position: self.position,
            direction: self.direction,
        }
    }
}
