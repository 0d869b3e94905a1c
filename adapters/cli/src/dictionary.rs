use std::{collections::BTreeMap, fs, path::Path};

use anyhow::{bail, Context, Result};
use serde::Deserialize;
use typing_arcade_core::{Dictionary, DictionaryEntry, Level};

const BUILTIN_DICTIONARY: &str = include_str!("../data/dictionary.toml");

/// Level-indexed texts loaded from a TOML dictionary file.
#[derive(Clone, Debug, Default, PartialEq)]
pub(crate) struct LevelDictionary {
    levels: BTreeMap<Level, Vec<DictionaryEntry>>,
    player_messages: Vec<String>,
}

#[derive(Debug, Deserialize)]
struct DictionaryFile {
    #[serde(default)]
    player_messages: Vec<String>,
    #[serde(default)]
    levels: Vec<LevelSection>,
}

#[derive(Debug, Deserialize)]
struct LevelSection {
    level: u32,
    #[serde(default)]
    words: Vec<String>,
    #[serde(default)]
    messages: Vec<DictionaryEntry>,
}

impl LevelDictionary {
    /// Parses the dictionary bundled with the binary.
    pub(crate) fn builtin() -> Result<Self> {
        Self::parse(BUILTIN_DICTIONARY).context("failed to parse built-in dictionary")
    }

    /// Reads and parses a dictionary file.
    pub(crate) fn load(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("failed to read dictionary at {}", path.display()))?;
        Self::parse(&contents)
            .with_context(|| format!("failed to parse dictionary at {}", path.display()))
    }

    /// Parses dictionary TOML contents.
    pub(crate) fn parse(contents: &str) -> Result<Self> {
        let file: DictionaryFile =
            toml::from_str(contents).context("failed to parse dictionary toml contents")?;

        let mut levels = BTreeMap::new();
        for section in file.levels {
            if section.level == 0 {
                bail!("dictionary levels are numbered from 1");
            }

            let mut entries: Vec<DictionaryEntry> = section
                .words
                .into_iter()
                .map(DictionaryEntry::new)
                .collect();
            entries.extend(section.messages);
            if entries.iter().any(|entry| entry.text.trim().is_empty()) {
                bail!("level {} contains an empty text", section.level);
            }
            if entries.is_empty() {
                bail!("level {} has no words or messages", section.level);
            }

            let level = Level::new(section.level);
            if levels.insert(level, entries).is_some() {
                bail!("dictionary contains duplicate entry for level {level}");
            }
        }

        if levels.is_empty() {
            bail!("dictionary defines no levels");
        }
        if file
            .player_messages
            .iter()
            .any(|message| message.trim().is_empty())
        {
            bail!("player_messages contains an empty text");
        }

        Ok(Self {
            levels,
            player_messages: file.player_messages,
        })
    }

    /// Retorts the player sends back during the boss battle.
    pub(crate) fn player_messages(&self) -> &[String] {
        &self.player_messages
    }

    /// Highest level defined by the dictionary.
    pub(crate) fn last_level(&self) -> Option<Level> {
        self.levels.keys().next_back().copied()
    }
}

impl Dictionary for LevelDictionary {
    fn entries_for_level(&self, level: Level) -> Vec<DictionaryEntry> {
        self.levels.get(&level).cloned().unwrap_or_default()
    }
}
