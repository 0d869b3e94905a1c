#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Command-line adapter that plays the typing arcade headlessly.
//!
//! A simulated typist (or a fixed keystroke script) is fed into the input
//! router while the spawner and progression systems run on a fixed step.

mod dictionary;
mod simulation;
mod typist;

use std::{fs, path::PathBuf, time::Duration};

use anyhow::{ensure, Context, Result};
use clap::{Parser, ValueEnum};
use log::info;
use typing_arcade_core::{ArcadeConfig, Difficulty, WELCOME_BANNER};

use crate::{
    dictionary::LevelDictionary,
    simulation::{Outcome, Pacing},
    typist::{AutoTypist, KeySource, ScriptedTypist},
};

#[derive(Debug, Parser)]
#[command(name = "typing-arcade", about = "Headless typing arcade simulator")]
struct Cli {
    /// TOML file with spawner, input and session settings.
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,
    /// TOML dictionary replacing the built-in campaign.
    #[arg(long, value_name = "PATH")]
    dictionary: Option<PathBuf>,
    /// Seed shared by the spawner and the simulated typist.
    #[arg(long)]
    seed: Option<u64>,
    /// Pacing preset for spawned words.
    #[arg(long, value_enum)]
    difficulty: Option<DifficultyArg>,
    /// Maximum number of frames to simulate.
    #[arg(long, default_value_t = 7_200)]
    frames: u32,
    /// Simulated milliseconds per frame.
    #[arg(long, default_value_t = 16)]
    frame_ms: u64,
    /// Keystrokes produced per simulated second.
    #[arg(long, default_value_t = 6.0)]
    keys_per_second: f32,
    /// Probability that the simulated typist hits the intended key.
    #[arg(long, default_value_t = 0.95)]
    accuracy: f32,
    /// Keystrokes to replay instead of the simulated typist. `~` is
    /// backspace and `^` is escape.
    #[arg(long, value_name = "KEYS", conflicts_with = "accuracy")]
    script: Option<String>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum DifficultyArg {
    Easy,
    Medium,
    Hard,
}

impl From<DifficultyArg> for Difficulty {
    fn from(value: DifficultyArg) -> Self {
        match value {
            DifficultyArg::Easy => Difficulty::Easy,
            DifficultyArg::Medium => Difficulty::Medium,
            DifficultyArg::Hard => Difficulty::Hard,
        }
    }
}

/// Entry point for the typing arcade command-line interface.
fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    let mut config = load_config(cli.config.as_deref())?;
    if let Some(seed) = cli.seed {
        config.spawner.seed = seed;
    }
    if let Some(difficulty) = cli.difficulty {
        config.spawner.difficulty = difficulty.into();
    }

    let dictionary = match cli.dictionary.as_deref() {
        Some(path) => LevelDictionary::load(path)?,
        None => LevelDictionary::builtin()?,
    };
    if let Some(last) = dictionary.last_level() {
        config.session.final_level = config.session.final_level.min(last.get());
    }
    config.validate().context("invalid arcade configuration")?;

    ensure!(cli.frame_ms > 0, "--frame-ms must be positive");
    ensure!(
        cli.keys_per_second.is_finite() && cli.keys_per_second > 0.0,
        "--keys-per-second must be a positive number"
    );
    let pacing = Pacing {
        frame: Duration::from_millis(cli.frame_ms),
        frames: cli.frames,
        key_interval: Duration::from_secs_f32(1.0 / cli.keys_per_second),
    };

    let mut keys: Box<dyn KeySource> = match cli.script.as_deref() {
        Some(script) => Box::new(ScriptedTypist::new(script)),
        None => Box::new(AutoTypist::new(cli.accuracy, config.spawner.seed)),
    };

    println!("{WELCOME_BANNER}");
    info!(
        "playing {} levels on {:?} difficulty",
        config.session.final_level, config.spawner.difficulty
    );
    let outcome = simulation::run(&config, &dictionary, keys.as_mut(), pacing);
    print_summary(&outcome);
    Ok(())
}

fn load_config(path: Option<&std::path::Path>) -> Result<ArcadeConfig> {
    let Some(path) = path else {
        return Ok(ArcadeConfig::default());
    };
    let contents = fs::read_to_string(path)
        .with_context(|| format!("failed to read config at {}", path.display()))?;
    toml::from_str(&contents)
        .with_context(|| format!("failed to parse config at {}", path.display()))
}

fn print_summary(outcome: &Outcome) {
    println!("result:          {:?}", outcome.status);
    println!("level reached:   {}", outcome.level);
    println!("score:           {}", outcome.score);
    println!("accuracy:        {:.1}%", outcome.accuracy * 100.0);
    println!("words typed:     {}", outcome.words_completed);
    println!("words missed:    {}", outcome.words_missed);
    println!("best streak:     {}", outcome.best_streak);
    println!("retorts sent:    {}", outcome.retorts);
    println!("frames:          {}", outcome.frames);
}

#[cfg(test)]
mod tests {
    use clap::Parser;

    use super::{load_config, Cli, DifficultyArg};

    #[test]
    fn parses_overrides() {
        let cli = Cli::try_parse_from([
            "typing-arcade",
            "--seed",
            "9",
            "--difficulty",
            "hard",
            "--frames",
            "10",
        ])
        .expect("valid arguments");
        assert_eq!(cli.seed, Some(9));
        assert_eq!(cli.difficulty, Some(DifficultyArg::Hard));
        assert_eq!(cli.frames, 10);
        assert!(cli.script.is_none());
    }

    #[test]
    fn missing_config_path_uses_defaults() {
        let config = load_config(None).expect("default config");
        assert!(config.validate().is_ok());
    }
}
