use std::time::Duration;

use typing_arcade_core::{
    DictionaryEntry, DifficultyProfile, DifficultyTable, Event, Level, SessionConfig,
    SpawnerConfig,
};
use typing_arcade_system_input::InputRouter;
use typing_arcade_system_progression::Progression;
use typing_arcade_system_spawning::Spawner;
use typing_arcade_world::{Session, SessionStatus};

const TICK: Duration = Duration::from_millis(1_000);

fn dictionary(level: Level) -> Vec<DictionaryEntry> {
    let texts: &[&str] = match level.get() {
        1 => &["кот"],
        2 => &["дом"],
        3 => &["лес"],
        _ => &[],
    };
    texts.iter().map(|text| DictionaryEntry::new(*text)).collect()
}

fn spawner_with_speed(speed: f32) -> Spawner {
    let profile = DifficultyProfile::new(speed, 1_000);
    Spawner::new(SpawnerConfig {
        difficulties: DifficultyTable {
            easy: profile,
            medium: profile,
            hard: profile,
        },
        ..SpawnerConfig::default()
    })
}

struct Harness {
    session: Session,
    spawner: Spawner,
    router: InputRouter,
    progression: Progression,
    log: Vec<Event>,
}

impl Harness {
    fn new(speed: f32, config: SessionConfig) -> Self {
        let session = Session::new(config);
        let mut spawner = spawner_with_speed(speed);
        let progression = Progression::new();
        let mut log = Vec::new();
        progression.start(&session, &mut spawner, &dictionary, &mut log);
        Self {
            session,
            spawner,
            router: InputRouter::default(),
            progression,
            log,
        }
    }

    fn tick(&mut self) {
        let mut events = Vec::new();
        self.spawner.update(TICK, &mut events);
        self.dispatch(events);
    }

    fn type_text(&mut self, text: &str) {
        let mut events = Vec::new();
        self.router.handle_text(
            text,
            self.spawner.words_mut(),
            &mut self.session,
            &mut events,
        );
        self.dispatch(events);
    }

    fn dispatch(&mut self, events: Vec<Event>) {
        let mut follow_up = Vec::new();
        self.progression.handle(
            &events,
            &mut self.session,
            &mut self.spawner,
            &dictionary,
            &mut follow_up,
        );
        self.log.extend(events);
        self.log.extend(follow_up);
    }

    fn count(&self, predicate: impl Fn(&Event) -> bool) -> usize {
        self.log.iter().filter(|event| predicate(event)).count()
    }
}

#[test]
fn clearing_every_level_wins_the_campaign() {
    let mut harness = Harness::new(60.0, SessionConfig::default());

    for text in ["кот", "дом", "лес"] {
        harness.tick();
        assert_eq!(harness.spawner.words().len(), 1, "expected {text} on screen");
        harness.type_text(text);
        harness.tick();
    }

    assert_eq!(
        harness.count(|event| matches!(event, Event::LevelAdvanced { .. })),
        2
    );
    assert_eq!(
        harness.count(|event| matches!(event, Event::CampaignComplete { .. })),
        1
    );
    assert_eq!(harness.session.status(), SessionStatus::Victory);
    assert_eq!(harness.session.level(), Level::new(3));
    assert_eq!(harness.session.score(), 3 * (3 + 10));
    assert!(!harness.spawner.is_spawning());
}

#[test]
fn level_advance_reloads_spawner() {
    let mut harness = Harness::new(60.0, SessionConfig::default());
    harness.tick();
    harness.type_text("кот");
    harness.tick();

    assert!(harness
        .log
        .contains(&Event::LevelAdvanced { level: Level::new(2) }));
    assert_eq!(harness.spawner.level(), Level::new(2));
    assert_eq!(harness.spawner.pending_len(), 1);
    assert!(!harness.spawner.is_level_complete());
}

#[test]
fn losing_all_lives_ends_the_game_once() {
    let mut harness = Harness::new(
        500.0,
        SessionConfig {
            starting_lives: 3,
            ..SessionConfig::default()
        },
    );
    harness.spawner.load_level(
        Level::FIRST,
        ["а", "б", "в", "г"]
            .iter()
            .map(|text| DictionaryEntry::new(*text))
            .collect(),
        &mut harness.log,
    );

    for _ in 0..8 {
        harness.tick();
    }

    assert_eq!(harness.session.lives(), 0);
    assert_eq!(harness.session.status(), SessionStatus::GameOver);
    assert_eq!(
        harness.count(|event| matches!(event, Event::GameOver { .. })),
        1
    );
    assert_eq!(harness.session.words_missed(), 3);
    assert!(!harness.spawner.is_spawning());
}

#[test]
fn player_messages_cost_no_lives() {
    let mut harness = Harness::new(500.0, SessionConfig::default());
    harness.spawner.set_spawning(false);
    let mut events = Vec::new();
    let _ = harness
        .spawner
        .spawn_player_message("сдавайся", &mut events);
    harness.dispatch(events);

    harness.tick();
    harness.tick();

    assert_eq!(
        harness.count(|event| matches!(event, Event::WordReachedEdge { .. })),
        1
    );
    assert_eq!(harness.session.lives(), 3);
}

#[test]
fn rejected_characters_do_not_score() {
    let mut harness = Harness::new(60.0, SessionConfig::default());
    harness.tick();
    harness.type_text("кх");

    assert_eq!(harness.session.score(), 1);
    assert_eq!(harness.session.misses(), 1);
}

#[test]
fn blank_player_message_never_scores() {
    let mut harness = Harness::new(60.0, SessionConfig::default());
    harness.spawner.set_spawning(false);
    let mut events = Vec::new();
    assert!(harness
        .spawner
        .spawn_player_message("", &mut events)
        .is_none());
    harness.dispatch(events);

    harness.tick();

    assert_eq!(
        harness.count(|event| matches!(event, Event::WordCompleted { .. })),
        0
    );
    assert_eq!(harness.session.score(), 0);
    assert_eq!(harness.session.words_completed(), 0);
}
