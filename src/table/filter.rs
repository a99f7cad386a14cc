//! Subject and use filters for the results tables.

use std::collections::BTreeSet;

use serde::Serialize;

use crate::backend::TagOptions;
use crate::models::{Question, Questionnaire};

/// Records carrying subject and use tags.
pub trait Tagged {
    fn subjects(&self) -> &[String];
    fn uses(&self) -> &[String];
}

impl Tagged for Question {
    fn subjects(&self) -> &[String] {
        &self.subject
    }

    fn uses(&self) -> &[String] {
        &self.uses
    }
}

impl<Q> Tagged for Questionnaire<Q> {
    fn subjects(&self) -> &[String] {
        &self.subject
    }

    fn uses(&self) -> &[String] {
        &self.uses
    }
}

/// Active subject and use tags of a results table.
///
/// A record is shown when, for subjects and for uses alike, the active set
/// is empty or contains one of the record's tags.
#[derive(Debug, Clone, Default, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct TagFilter {
    all_subjects: Vec<String>,
    all_uses: Vec<String>,
    active_subjects: BTreeSet<String>,
    active_uses: BTreeSet<String>,
}

impl TagFilter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Known tags, all active.
    pub fn load(options: &TagOptions) -> Self {
        let mut filter = Self {
            all_subjects: options.subjects.clone(),
            all_uses: options.uses.clone(),
            ..Self::default()
        };
        filter.reset();
        filter
    }

    /// Only the given tags active. Used for filters coming from a query string.
    pub fn with_active<S, U>(subjects: S, uses: U) -> Self
    where
        S: IntoIterator<Item = String>,
        U: IntoIterator<Item = String>,
    {
        let active_subjects: BTreeSet<String> = subjects.into_iter().collect();
        let active_uses: BTreeSet<String> = uses.into_iter().collect();
        Self {
            all_subjects: active_subjects.iter().cloned().collect(),
            all_uses: active_uses.iter().cloned().collect(),
            active_subjects,
            active_uses,
        }
    }

    /// Flip a subject, returning whether it is now active.
    pub fn toggle_subject(&mut self, subject: &str) -> bool {
        toggle(&mut self.active_subjects, subject)
    }

    /// Flip a use, returning whether it is now active.
    pub fn toggle_use(&mut self, value: &str) -> bool {
        toggle(&mut self.active_uses, value)
    }

    /// Every known tag active again.
    pub fn reset(&mut self) {
        self.active_subjects = self.all_subjects.iter().cloned().collect();
        self.active_uses = self.all_uses.iter().cloned().collect();
    }

    pub fn active_subjects(&self) -> &BTreeSet<String> {
        &self.active_subjects
    }

    pub fn active_uses(&self) -> &BTreeSet<String> {
        &self.active_uses
    }

    pub fn matches<T: Tagged + ?Sized>(&self, record: &T) -> bool {
        any_active(&self.active_subjects, record.subjects())
            && any_active(&self.active_uses, record.uses())
    }

    pub fn apply<'a, T: Tagged>(&self, records: &'a [T]) -> Vec<&'a T> {
        records.iter().filter(|r| self.matches(*r)).collect()
    }
}

fn toggle(set: &mut BTreeSet<String>, value: &str) -> bool {
    if set.remove(value) {
        false
    } else {
        set.insert(value.to_string());
        true
    }
}

fn any_active(active: &BTreeSet<String>, tags: &[String]) -> bool {
    active.is_empty() || tags.iter().any(|t| active.contains(t))
}
