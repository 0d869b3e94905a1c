use typing_arcade_core::WordId;

use crate::Word;

/// Ordered set of live words with matching helpers.
///
/// Insertion order is preserved and decides which word wins when several
/// share a prefix. The collection enforces that at most one word is active.
#[derive(Clone, Debug, Default)]
pub struct WordCollection {
    words: Vec<Word>,
}

impl WordCollection {
    /// Creates an empty collection.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a word, keeping it inactive unless no other word is active.
    pub fn push(&mut self, mut word: Word) {
        if word.is_active() && self.active().is_some() {
            word.set_active(false);
        }
        self.words.push(word);
    }

    /// Number of live words.
    #[must_use]
    pub fn len(&self) -> usize {
        self.words.len()
    }

    /// Reports whether no words are live.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    /// Iterator over live words in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &Word> {
        self.words.iter()
    }

    /// Mutable iterator over live words in insertion order.
    ///
    /// Callers must not activate words through this iterator; use
    /// [`WordCollection::set_active`] instead.
    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut Word> {
        self.words.iter_mut()
    }

    /// Looks up a word by identifier.
    #[must_use]
    pub fn get(&self, id: WordId) -> Option<&Word> {
        self.words.iter().find(|word| word.id() == id)
    }

    /// Looks up a word by identifier for mutation.
    pub fn get_mut(&mut self, id: WordId) -> Option<&mut Word> {
        self.words.iter_mut().find(|word| word.id() == id)
    }

    /// First unresolved word whose text starts with `candidate`.
    #[must_use]
    pub fn find_matching(&self, candidate: &str) -> Option<&Word> {
        self.words
            .iter()
            .filter(|word| !word.is_resolved())
            .find(|word| word.matches_prefix(candidate))
    }

    /// The word currently receiving characters, if any.
    #[must_use]
    pub fn active(&self) -> Option<&Word> {
        self.words.iter().find(|word| word.is_active())
    }

    /// The word currently receiving characters, for mutation.
    pub fn active_mut(&mut self) -> Option<&mut Word> {
        self.words.iter_mut().find(|word| word.is_active())
    }

    /// Deactivates every word, then activates `target` if it is live.
    ///
    /// Returns the identifier of the word left active.
    pub fn set_active(&mut self, target: Option<WordId>) -> Option<WordId> {
        for word in &mut self.words {
            word.set_active(false);
        }

        let word = self.get_mut(target?)?;
        if word.is_resolved() {
            return None;
        }
        word.set_active(true);
        Some(word.id())
    }

    /// Removes every resolved word, returning them in insertion order.
    pub fn drain_resolved(&mut self) -> Vec<Word> {
        let mut resolved = Vec::new();
        let mut index = 0;
        while index < self.words.len() {
            if self.words[index].is_resolved() {
                resolved.push(self.words.remove(index));
            } else {
                index += 1;
            }
        }
        resolved
    }

    /// Removes every word, returning them in insertion order.
    pub fn clear(&mut self) -> Vec<Word> {
        std::mem::take(&mut self.words)
    }
}
