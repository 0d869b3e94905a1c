#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Progression system that scores play and moves the session between levels.

use log::info;
use typing_arcade_core::{Dictionary, Event, WordSnapshot};
use typing_arcade_system_spawning::Spawner;
use typing_arcade_world::Session;

const STREAK_TIER: u32 = 5;
const MAX_MULTIPLIER: u64 = 4;

/// Pure system that reacts to word and level events.
#[derive(Debug, Default)]
pub struct Progression;

impl Progression {
    /// Creates a new progression system.
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    /// Loads the session's current level into the spawner.
    pub fn start<D>(
        &self,
        session: &Session,
        spawner: &mut Spawner,
        dictionary: &D,
        out: &mut Vec<Event>,
    ) where
        D: Dictionary + ?Sized,
    {
        spawner.set_spawning(session.is_playing());
        spawner.reset_for_level(session, dictionary, out);
    }

    /// Consumes events emitted by the spawner and input router.
    ///
    /// Level transitions reload the spawner immediately; their own events
    /// are appended to `out`.
    pub fn handle<D>(
        &self,
        events: &[Event],
        session: &mut Session,
        spawner: &mut Spawner,
        dictionary: &D,
        out: &mut Vec<Event>,
    ) where
        D: Dictionary + ?Sized,
    {
        for event in events {
            if !session.is_playing() {
                return;
            }

            match event {
                Event::CharacterAccepted { .. } => {
                    session.add_score(session.config().points_per_character);
                }
                Event::WordCompleted { .. } => {
                    session.record_completion();
                    session.add_score(word_points(session));
                }
                Event::WordReachedEdge { word } => self.word_escaped(word, session, spawner, out),
                Event::LevelComplete { level } if *level == session.level() => {
                    self.level_complete(session, spawner, dictionary, out);
                }
                _ => {}
            }
        }
    }

    fn word_escaped(
        &self,
        word: &WordSnapshot,
        session: &mut Session,
        spawner: &mut Spawner,
        out: &mut Vec<Event>,
    ) {
        if word.author.as_ref().is_some_and(|author| author.is_player()) {
            return;
        }

        let lives = session.record_escape();
        info!("word {:?} got through, {lives} lives left", word.text);
        if lives == 0 {
            spawner.set_spawning(false);
            info!("game over with score {}", session.score());
            out.push(Event::GameOver {
                score: session.score(),
            });
        }
    }

    fn level_complete<D>(
        &self,
        session: &mut Session,
        spawner: &mut Spawner,
        dictionary: &D,
        out: &mut Vec<Event>,
    ) where
        D: Dictionary + ?Sized,
    {
        if session.is_final_level() {
            session.finish();
            spawner.set_spawning(false);
            info!("campaign complete with score {}", session.score());
            out.push(Event::CampaignComplete {
                score: session.score(),
            });
            return;
        }

        let level = session.advance_level();
        info!("advancing to level {level}");
        spawner.reset_for_level(session, dictionary, out);
        out.push(Event::LevelAdvanced { level });
    }
}

fn word_points(session: &Session) -> u64 {
    let tier = u64::from(session.streak().saturating_sub(1) / STREAK_TIER);
    let multiplier = (1 + tier).min(MAX_MULTIPLIER);
    session.config().points_per_word * multiplier
}
