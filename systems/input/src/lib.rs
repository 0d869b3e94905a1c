#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Input routing system that turns keystrokes into word progress.
//!
//! Characters continue the active word when there is one. Otherwise the
//! router grows a candidate prefix, asks the live collection for the first
//! word starting with it, activates that word and feeds it the same
//! character. Backspace and escape shrink or drop the candidate.

use log::trace;
use typing_arcade_core::{BackspacePolicy, Event, InputConfig, InputKey};
use typing_arcade_world::{Session, Word, WordCollection};

/// Routes keystrokes to the live words of a spawner.
#[derive(Clone, Debug)]
pub struct InputRouter {
    config: InputConfig,
    candidate: String,
    enabled: bool,
}

impl InputRouter {
    /// Creates an enabled router with an empty candidate buffer.
    #[must_use]
    pub fn new(config: InputConfig) -> Self {
        Self {
            config,
            candidate: String::new(),
            enabled: true,
        }
    }

    /// Characters typed toward the active word since it was selected.
    #[must_use]
    pub fn candidate(&self) -> &str {
        &self.candidate
    }

    /// Reports whether keystrokes are being handled.
    #[must_use]
    pub const fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Opens or closes the input gate.
    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }

    /// Drops the candidate buffer without touching any word.
    pub fn reset(&mut self) {
        self.candidate.clear();
    }

    /// Handles every character of `text` in order.
    pub fn handle_text(
        &mut self,
        text: &str,
        words: &mut WordCollection,
        session: &mut Session,
        out: &mut Vec<Event>,
    ) {
        for character in text.chars() {
            self.handle(InputKey::Character(character), words, session, out);
        }
    }

    /// Handles a single keystroke.
    pub fn handle(
        &mut self,
        key: InputKey,
        words: &mut WordCollection,
        session: &mut Session,
        out: &mut Vec<Event>,
    ) {
        if !self.enabled || !session.is_playing() {
            return;
        }

        if !self.candidate.is_empty() && words.active().is_none() {
            self.candidate.clear();
        }

        match key {
            InputKey::Character(character) => self.type_character(character, words, session, out),
            InputKey::Backspace => self.backspace(words, out),
            InputKey::Escape => {
                self.candidate.clear();
                deactivate(words, out);
            }
        }
    }

    fn type_character(
        &mut self,
        character: char,
        words: &mut WordCollection,
        session: &mut Session,
        out: &mut Vec<Event>,
    ) {
        if let Some(word) = words.active_mut() {
            self.feed(word, character, session, out);
            return;
        }

        let mut candidate = self.candidate.clone();
        candidate.push(character);
        let Some(id) = words.find_matching(&candidate).map(Word::id) else {
            trace!("dropped {character:?}: no live word starts with {candidate:?}");
            return;
        };

        if words.set_active(Some(id)).is_none() {
            return;
        }
        out.push(Event::WordActivated { word: id });

        if let Some(word) = words.get_mut(id) {
            self.feed(word, character, session, out);
        }
    }

    fn feed(
        &mut self,
        word: &mut Word,
        character: char,
        session: &mut Session,
        out: &mut Vec<Event>,
    ) {
        if !word.type_character(character) {
            session.record_miss();
            out.push(Event::CharacterRejected {
                word: word.id(),
                character,
                expected: word.next_character(),
            });
            return;
        }

        session.record_hit();
        self.candidate.push(character);
        out.push(Event::CharacterAccepted {
            word: word.id(),
            character,
            typed: word.typed(),
        });

        if word.take_completion_notice() {
            self.candidate.clear();
            out.push(Event::WordCompleted {
                word: word.snapshot(),
            });
        }
    }

    fn backspace(&mut self, words: &mut WordCollection, out: &mut Vec<Event>) {
        let _ = self.candidate.pop();

        if self.config.backspace == BackspacePolicy::RollBack {
            if let Some(word) = words.active_mut() {
                if word.retract() {
                    out.push(Event::CharacterRetracted {
                        word: word.id(),
                        typed: word.typed(),
                    });
                }
            }
        }

        if self.candidate.is_empty() {
            deactivate(words, out);
        }
    }
}

impl Default for InputRouter {
    fn default() -> Self {
        Self::new(InputConfig::default())
    }
}

fn deactivate(words: &mut WordCollection, out: &mut Vec<Event>) {
    if let Some(id) = words.active().map(Word::id) {
        let _ = words.set_active(None);
        out.push(Event::WordDeactivated { word: id });
    }
}
