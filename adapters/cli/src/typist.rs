use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use typing_arcade_core::InputKey;
use typing_arcade_world::{Word, WordCollection};

/// Script character standing for a backspace press.
pub(crate) const SCRIPT_BACKSPACE: char = '~';
/// Script character standing for an escape press.
pub(crate) const SCRIPT_ESCAPE: char = '^';

const TYPO: char = 'ъ';
const TYPO_FALLBACK: char = 'ь';

/// Produces the keystrokes fed to the input router.
pub(crate) trait KeySource {
    /// Next keystroke given the live words, or `None` to stay idle.
    fn next_key(&mut self, words: &WordCollection) -> Option<InputKey>;
}

/// Simulated player that chases the most urgent word.
#[derive(Debug)]
pub(crate) struct AutoTypist {
    accuracy: f64,
    rng: ChaCha8Rng,
}

impl AutoTypist {
    /// Creates a typist hitting the right key with probability `accuracy`.
    pub(crate) fn new(accuracy: f32, seed: u64) -> Self {
        Self {
            accuracy: f64::from(accuracy.clamp(0.0, 1.0)),
            rng: ChaCha8Rng::seed_from_u64(seed),
        }
    }

    fn aim(words: &WordCollection) -> Option<char> {
        if let Some(active) = words.active() {
            return active.next_character();
        }

        words
            .iter()
            .filter(|word| !word.is_resolved())
            .min_by(|left, right| left.distance_to_edge().total_cmp(&right.distance_to_edge()))
            .and_then(|word: &Word| word.text().chars().next())
    }
}

impl KeySource for AutoTypist {
    fn next_key(&mut self, words: &WordCollection) -> Option<InputKey> {
        let target = Self::aim(words)?;
        if self.rng.gen_bool(self.accuracy) {
            return Some(InputKey::Character(target));
        }
        let typo = if target == TYPO { TYPO_FALLBACK } else { TYPO };
        Some(InputKey::Character(typo))
    }
}

/// Replays a fixed keystroke script, one key per request.
#[derive(Debug)]
pub(crate) struct ScriptedTypist {
    keys: std::vec::IntoIter<InputKey>,
}

impl ScriptedTypist {
    /// Parses a script where `~` is backspace and `^` is escape.
    pub(crate) fn new(script: &str) -> Self {
        let keys: Vec<InputKey> = script
            .chars()
            .map(|character| match character {
                SCRIPT_BACKSPACE => InputKey::Backspace,
                SCRIPT_ESCAPE => InputKey::Escape,
                other => InputKey::Character(other),
            })
            .collect();
        Self {
            keys: keys.into_iter(),
        }
    }
}

impl KeySource for ScriptedTypist {
    fn next_key(&mut self, _words: &WordCollection) -> Option<InputKey> {
        self.keys.next()
    }
}
