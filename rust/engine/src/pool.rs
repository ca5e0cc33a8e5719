//! Word pool with per-match consumption tracking.
//!
//! A [`WordPool`] maps word indices to words and remembers which indices have been
//! used this match. A pool may carry a scope (the subset of indices its owner may
//! draw from) and any number of named views for other participants.

use std::collections::{BTreeMap, BTreeSet};

use crate::dictionary::{Dictionary, WordEntry};
use crate::errors::GameError;

#[derive(Debug, Clone)]
pub struct WordPool {
    name: Option<String>,
    entries: Vec<WordEntry>,
    consumed: BTreeSet<usize>,
    /// Consumption order; mirrors `consumed` unless an invariant is broken.
    history: Vec<usize>,
    scope: Option<BTreeSet<usize>>,
    views: BTreeMap<String, BTreeSet<usize>>,
}

impl WordPool {
    pub fn new(dictionary: &Dictionary) -> Self {
        Self {
            name: None,
            entries: dictionary.entries().to_vec(),
            consumed: BTreeSet::new(),
            history: Vec::new(),
            scope: None,
            views: BTreeMap::new(),
        }
    }

    pub fn named(dictionary: &Dictionary, name: impl Into<String>) -> Self {
        let mut pool = Self::new(dictionary);
        pool.name = Some(name.into());
        pool
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn entry(&self, index: usize) -> Option<&WordEntry> {
        self.entries.get(index)
    }

    pub fn word(&self, index: usize) -> Option<&str> {
        self.entries.get(index).map(|e| e.word.as_str())
    }

    /// First index holding `word`.
    pub fn index_of(&self, word: &str) -> Option<usize> {
        self.entries.iter().position(|e| e.word == word)
    }

    /// Whether `word` is in the dictionary at all, consumed or not.
    pub fn contains(&self, word: &str) -> bool {
        self.index_of(word).is_some()
    }

    /// Whether `word` is defined and every index holding it has been consumed.
    pub fn is_consumed_word(&self, word: &str) -> bool {
        let mut matches = self
            .entries
            .iter()
            .enumerate()
            .filter(|(_, e)| e.word == word)
            .peekable();
        matches.peek().is_some() && matches.all(|(i, _)| self.consumed.contains(&i))
    }

    pub fn is_consumed(&self, index: usize) -> bool {
        self.consumed.contains(&index)
    }

    pub fn consumed_count(&self) -> usize {
        self.history.len()
    }

    /// Consumed indices in the order they were used.
    pub fn history(&self) -> &[usize] {
        &self.history
    }

    pub fn scope(&self) -> Option<&BTreeSet<usize>> {
        self.scope.as_ref()
    }

    fn full_set(&self) -> impl Iterator<Item = usize> + '_ {
        0..self.entries.len()
    }

    fn unused_within<'a>(
        &'a self,
        scope: Option<&'a BTreeSet<usize>>,
    ) -> impl Iterator<Item = usize> + 'a {
        self.full_set()
            .filter(move |i| !self.consumed.contains(i))
            .filter(move |i| scope.is_none_or(|s| s.contains(i)))
    }

    /// Unconsumed indices inside this pool's scope.
    pub fn unused_indices(&self) -> BTreeSet<usize> {
        self.unused_within(self.scope.as_ref()).collect()
    }

    /// Unconsumed words inside this pool's scope, in pool order.
    pub fn unused_words(&self) -> Vec<&str> {
        self.unused_within(self.scope.as_ref())
            .map(|i| self.entries[i].word.as_str())
            .collect()
    }

    /// Register a named view limited to `indices`.
    pub fn install_view(
        &mut self,
        name: impl Into<String>,
        indices: impl IntoIterator<Item = usize>,
    ) -> Result<(), GameError> {
        let indices = self.checked_indices(indices)?;
        self.views.insert(name.into(), indices);
        Ok(())
    }

    /// Unconsumed words visible to the named view; unknown names see the full set.
    pub fn unused_words_for(&self, name: &str) -> Vec<&str> {
        self.unused_within(self.views.get(name))
            .map(|i| self.entries[i].word.as_str())
            .collect()
    }

    pub fn is_still_available(&self, word: &str) -> bool {
        self.unused_words().contains(&word)
    }

    /// Whether `word` would be available once consumption is reset.
    pub fn is_in_scope(&self, word: &str) -> bool {
        self.entries
            .iter()
            .enumerate()
            .any(|(i, e)| e.word == word && self.scope.as_ref().is_none_or(|s| s.contains(&i)))
    }

    pub fn mark_consumed(&mut self, index: usize) -> Result<(), GameError> {
        if index >= self.entries.len() {
            return Err(GameError::OutOfRange {
                index,
                len: self.entries.len(),
            });
        }
        if !self.consumed.insert(index) {
            return Err(GameError::DuplicateConsumption { index });
        }
        self.history.push(index);
        Ok(())
    }

    /// Consume the first index holding `word`.
    ///
    /// Unknown words are ignored and yield `Ok(None)`: submissions outside the
    /// dictionary are reported by the checker pipeline, not here.
    pub fn consume_by_value(&mut self, word: &str) -> Result<Option<usize>, GameError> {
        match self.index_of(word) {
            Some(index) => {
                self.mark_consumed(index)?;
                Ok(Some(index))
            }
            None => Ok(None),
        }
    }

    /// Mirror a word consumed elsewhere. Consumes the first unconsumed index holding
    /// `word`; a no-op when the word is unknown or already spent.
    pub fn sync_word(&mut self, word: &str) -> Option<usize> {
        let index = self
            .entries
            .iter()
            .enumerate()
            .position(|(i, e)| e.word == word && !self.consumed.contains(&i))?;
        self.consumed.insert(index);
        self.history.push(index);
        Some(index)
    }

    /// Narrow the drawable set to `allowed`. Repeated calls intersect.
    pub fn restrict_to(
        &mut self,
        allowed: impl IntoIterator<Item = usize>,
    ) -> Result<(), GameError> {
        let allowed = self.checked_indices(allowed)?;
        let scope = match self.scope.take() {
            Some(current) => current.intersection(&allowed).copied().collect(),
            None => allowed,
        };
        self.scope = Some(scope);
        Ok(())
    }

    /// Clear consumption back to the scope-only baseline, then spend `seed`.
    pub fn reset(&mut self, seed: &[&str]) -> Result<(), GameError> {
        self.consumed.clear();
        self.history.clear();
        for word in seed {
            self.consume_by_value(word)?;
        }
        Ok(())
    }

    fn checked_indices(
        &self,
        indices: impl IntoIterator<Item = usize>,
    ) -> Result<BTreeSet<usize>, GameError> {
        let len = self.entries.len();
        indices
            .into_iter()
            .map(|index| {
                if index < len {
                    Ok(index)
                } else {
                    Err(GameError::OutOfRange { index, len })
                }
            })
            .collect()
    }

    #[cfg(test)]
    pub(crate) fn force_history(&mut self, index: usize) {
        self.history.push(index);
    }
}
