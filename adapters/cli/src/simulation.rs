use std::time::Duration;

use log::{debug, info, warn};
use typing_arcade_core::{ArcadeConfig, Event, LevelKind};
use typing_arcade_system_input::InputRouter;
use typing_arcade_system_progression::Progression;
use typing_arcade_system_spawning::Spawner;
use typing_arcade_world::{Session, SessionStatus};

use crate::{dictionary::LevelDictionary, typist::KeySource};

/// Timing parameters of a headless run.
#[derive(Clone, Copy, Debug)]
pub(crate) struct Pacing {
    /// Simulated time advanced per frame.
    pub(crate) frame: Duration,
    /// Number of frames to simulate at most.
    pub(crate) frames: u32,
    /// Time between two keystrokes.
    pub(crate) key_interval: Duration,
}

/// Summary of a finished run.
#[derive(Clone, Debug, PartialEq)]
pub(crate) struct Outcome {
    pub(crate) status: SessionStatus,
    pub(crate) level: u32,
    pub(crate) score: u64,
    pub(crate) accuracy: f32,
    pub(crate) words_completed: u64,
    pub(crate) words_missed: u64,
    pub(crate) best_streak: u32,
    pub(crate) retorts: u64,
    pub(crate) frames: u32,
}

/// Runs the arcade until the session ends or the frame budget is spent.
pub(crate) fn run(
    config: &ArcadeConfig,
    dictionary: &LevelDictionary,
    keys: &mut dyn KeySource,
    pacing: Pacing,
) -> Outcome {
    let mut session = Session::new(config.session);
    let mut spawner = Spawner::new(config.spawner.clone());
    let mut router = InputRouter::new(config.input);
    let progression = Progression::new();
    let mut retorts = dictionary.player_messages().iter().cycle();

    let mut events = Vec::new();
    progression.start(&session, &mut spawner, dictionary, &mut events);
    report(&events);
    events.clear();

    let mut key_timer = Duration::ZERO;
    let mut frames = 0;
    let mut retorts_sent = 0;
    while frames < pacing.frames && session.is_playing() {
        frames += 1;

        key_timer = key_timer.saturating_add(pacing.frame);
        while !pacing.key_interval.is_zero() && key_timer >= pacing.key_interval {
            key_timer -= pacing.key_interval;
            if let Some(key) = keys.next_key(spawner.words()) {
                router.handle(key, spawner.words_mut(), &mut session, &mut events);
            }
        }

        spawner.update(pacing.frame, &mut events);

        let played = session.level();
        let mut follow_up = Vec::new();
        progression.handle(&events, &mut session, &mut spawner, dictionary, &mut follow_up);

        // Retorts answer completions from a boss level that is still live.
        if session.is_playing() && played.kind() == LevelKind::Boss && session.level() == played {
            for event in &events {
                let Event::WordCompleted { word } = event else {
                    continue;
                };
                if word.author.as_ref().is_some_and(|author| author.is_player()) {
                    continue;
                }
                let Some(retort) = retorts.next() else {
                    continue;
                };
                if spawner
                    .spawn_player_message(retort.clone(), &mut follow_up)
                    .is_some()
                {
                    retorts_sent += 1;
                }
            }
        }

        if follow_up
            .iter()
            .any(|event| matches!(event, Event::LevelAdvanced { .. }))
        {
            router.reset();
        }

        report(&events);
        report(&follow_up);
        events.clear();
    }

    if session.is_playing() {
        warn!("frame budget exhausted on level {}", session.level());
    }

    Outcome {
        status: session.status(),
        level: session.level().get(),
        score: session.score(),
        accuracy: session.accuracy(),
        words_completed: session.words_completed(),
        words_missed: session.words_missed(),
        best_streak: session.best_streak(),
        retorts: retorts_sent,
        frames,
    }
}

fn report(events: &[Event]) {
    for event in events {
        match event {
            Event::WordCompleted { word } => info!("typed {:?}", word.text),
            Event::WordReachedEdge { word } => info!("missed {:?}", word.text),
            Event::LevelComplete { level } => info!("level {level} cleared"),
            Event::LevelAdvanced { level } => info!("level {level} started ({:?})", level.kind()),
            Event::CampaignComplete { score } => info!("campaign complete, score {score}"),
            Event::GameOver { score } => info!("game over, score {score}"),
            other => debug!("{other:?}"),
        }
    }
}
