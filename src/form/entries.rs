//! Ordered list of entry rows (the editor's response manager).

use serde::{Deserialize, Serialize};

use crate::models::Entry;

/// Repeatable entry rows of a form. Order is significant.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(transparent)]
pub struct EntryList(Vec<Entry>);

impl EntryList {
    pub fn new() -> Self {
        Self::default()
    }

    /// `count` blank, non-correct rows.
    pub fn blank(count: usize) -> Self {
        Self(vec![Entry::blank(); count])
    }

    /// Build rows from the wire's parallel lists; a response is correct
    /// when it appears in `corrects`.
    pub fn from_parallel_lists(responses: &[String], corrects: &[String]) -> Self {
        Self(
            responses
                .iter()
                .map(|text| Entry::new(text.clone(), corrects.contains(text)))
                .collect(),
        )
    }

    pub fn from_texts<I, S>(texts: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self(texts.into_iter().map(|t| Entry::new(t, false)).collect())
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Entry> {
        self.0.iter()
    }

    pub fn get(&self, index: usize) -> Option<&Entry> {
        self.0.get(index)
    }

    pub fn push(&mut self, entry: Entry) {
        self.0.push(entry);
    }

    pub fn add(&mut self, text: impl Into<String>, is_correct: bool) -> usize {
        self.0.push(Entry::new(text, is_correct));
        self.0.len() - 1
    }

    pub fn remove(&mut self, index: usize) -> Option<Entry> {
        if index < self.0.len() {
            Some(self.0.remove(index))
        } else {
            None
        }
    }

    pub fn set_text(&mut self, index: usize, text: impl Into<String>) -> bool {
        match self.0.get_mut(index) {
            Some(entry) => {
                entry.text = text.into();
                true
            }
            None => false,
        }
    }

    pub fn set_correct(&mut self, index: usize, is_correct: bool) -> bool {
        match self.0.get_mut(index) {
            Some(entry) => {
                entry.is_correct = is_correct;
                true
            }
            None => false,
        }
    }

    /// Returns the new flag, `None` when the index is out of range.
    pub fn toggle_correct(&mut self, index: usize) -> Option<bool> {
        let entry = self.0.get_mut(index)?;
        entry.is_correct = !entry.is_correct;
        Some(entry.is_correct)
    }

    /// Move the row at `from` so it ends up at `to`.
    pub fn move_entry(&mut self, from: usize, to: usize) -> bool {
        if from >= self.0.len() || to >= self.0.len() {
            return false;
        }
        let entry = self.0.remove(from);
        self.0.insert(to, entry);
        true
    }

    pub fn clear(&mut self) {
        self.0.clear();
    }

    pub fn filled(&self) -> impl Iterator<Item = &Entry> {
        self.0.iter().filter(|e| e.is_filled())
    }

    pub fn filled_count(&self) -> usize {
        self.filled().count()
    }

    pub fn has_filled(&self) -> bool {
        self.0.iter().any(Entry::is_filled)
    }

    pub fn has_correct(&self) -> bool {
        self.0.iter().any(Entry::counts_as_correct)
    }

    /// Serialize to the wire's `(responses, corrects)` lists. Blank rows are
    /// dropped and texts are trimmed.
    pub fn to_parallel_lists(&self) -> (Vec<String>, Vec<String>) {
        let mut responses = Vec::new();
        let mut corrects = Vec::new();
        for entry in self.filled() {
            let text = entry.text.trim().to_string();
            if entry.is_correct {
                corrects.push(text.clone());
            }
            responses.push(text);
        }
        (responses, corrects)
    }

    /// Trimmed texts of the filled rows.
    pub fn texts(&self) -> Vec<String> {
        self.filled().map(|e| e.text.trim().to_string()).collect()
    }
}

impl FromIterator<Entry> for EntryList {
    fn from_iter<T: IntoIterator<Item = Entry>>(iter: T) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl<'a> IntoIterator for &'a EntryList {
    type Item = &'a Entry;
    type IntoIter = std::slice::Iter<'a, Entry>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}
