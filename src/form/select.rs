//! Multi-select option lists for the subject and use tag fields.

use serde::{Deserialize, Serialize};

/// One option of a multi-select.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SelectOption {
    pub value: String,
    pub selected: bool,
}

/// Options of a tag select, in display order.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct TagSelect {
    options: Vec<SelectOption>,
}

impl TagSelect {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append the known tag values as unselected options. Values are trimmed,
    /// blanks and duplicates skipped.
    pub fn fill_options<I, S>(&mut self, values: I)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        for value in values {
            let value = value.as_ref().trim();
            if value.is_empty() || self.contains(value) {
                continue;
            }
            self.options.push(SelectOption {
                value: value.to_string(),
                selected: false,
            });
        }
    }

    /// Add any missing values, then select exactly `values`.
    pub fn fill(&mut self, values: &[String]) {
        self.fill_options(values);
        for option in &mut self.options {
            option.selected = values.iter().any(|v| v.trim() == option.value);
        }
    }

    /// View-only rendering: the options become exactly the record's values,
    /// all selected.
    pub fn fill_view_only(&mut self, values: &[String]) {
        self.options.clear();
        self.fill(values);
    }

    /// Add `value` if it is new and make it the only selected option.
    /// Returns `false` for a blank value.
    pub fn add_if_missing(&mut self, value: &str) -> bool {
        let value = value.trim();
        if value.is_empty() {
            return false;
        }
        self.fill_options([value]);
        for option in &mut self.options {
            option.selected = option.value == value;
        }
        true
    }

    /// Toggle the selection of an existing option.
    pub fn toggle(&mut self, value: &str) -> bool {
        match self.options.iter_mut().find(|o| o.value == value) {
            Some(option) => {
                option.selected = !option.selected;
                true
            }
            None => false,
        }
    }

    pub fn clear_selection(&mut self) {
        for option in &mut self.options {
            option.selected = false;
        }
    }

    pub fn collect_selected(&self) -> Vec<String> {
        self.options
            .iter()
            .filter(|o| o.selected)
            .map(|o| o.value.clone())
            .collect()
    }

    pub fn contains(&self, value: &str) -> bool {
        self.options.iter().any(|o| o.value == value)
    }

    pub fn options(&self) -> &[SelectOption] {
        &self.options
    }
}
