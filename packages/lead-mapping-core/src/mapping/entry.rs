//! Mapping entries and ordered mapping sets.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

/// One source-field to target-field correspondence.
///
/// # Invariants
///
/// - An entry with a non-empty `target_field` is complete only when it has a
///   non-empty `source_field` or a non-empty `default_value`.
/// - Values consisting only of whitespace count as empty.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MappingEntry {
    /// Field key on the ad-platform lead form
    #[serde(default, alias = "meta_field", alias = "ad_form_field_key")]
    pub source_field: String,
    /// Field name on the target doctype
    #[serde(default, alias = "lead_doctype_field")]
    pub target_field: String,
    /// Value used when the lead carries no value for `source_field`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_value: Option<String>,
    /// Formatting function name, optionally followed by comma-separated arguments
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub formatting_function: Option<String>,
    /// Extra formatting arguments (JSON array or comma-separated list)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub function_parameters: Option<String>,
}

impl MappingEntry {
    /// Creates an entry mapping `source_field` onto `target_field`.
    pub fn new(source_field: impl Into<String>, target_field: impl Into<String>) -> Self {
        Self {
            source_field: source_field.into(),
            target_field: target_field.into(),
            ..Default::default()
        }
    }

    /// Sets the default value.
    pub fn with_default(mut self, default_value: impl Into<String>) -> Self {
        self.default_value = Some(default_value.into());
        self
    }

    /// Sets the formatting function and its parameters.
    pub fn with_formatting(
        mut self,
        function: impl Into<String>,
        parameters: Option<String>,
    ) -> Self {
        self.formatting_function = Some(function.into());
        self.function_parameters = parameters;
        self
    }

    /// Target field name without surrounding whitespace.
    pub fn target(&self) -> &str {
        self.target_field.trim()
    }

    pub fn has_target(&self) -> bool {
        !self.target().is_empty()
    }

    pub fn has_source(&self) -> bool {
        !self.source_field.trim().is_empty()
    }

    pub fn has_default(&self) -> bool {
        non_empty(self.default_value.as_deref()).is_some()
    }

    /// Formatting function name, if one is set.
    pub fn formatting_function(&self) -> Option<&str> {
        non_empty(self.formatting_function.as_deref())
    }

    /// Returns true if the entry targets a field but has nothing to fill it with.
    pub fn is_incomplete(&self) -> bool {
        self.has_target() && !self.has_source() && !self.has_default()
    }
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.trim().is_empty())
}

/// Ordered sequence of mapping entries owned by a form configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MappingSet {
    entries: Vec<MappingEntry>,
}

impl MappingSet {
    /// Creates an empty mapping set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a mapping set from entries, preserving order.
    pub fn from_entries(entries: Vec<MappingEntry>) -> Self {
        Self { entries }
    }

    pub fn push(&mut self, entry: MappingEntry) {
        self.entries.push(entry);
    }

    pub fn entries(&self) -> &[MappingEntry] {
        &self.entries
    }

    pub fn iter(&self) -> std::slice::Iter<'_, MappingEntry> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Returns the distinct non-empty target fields.
    pub fn target_fields(&self) -> BTreeSet<&str> {
        self.entries
            .iter()
            .filter(|e| e.has_target())
            .map(MappingEntry::target)
            .collect()
    }
}

impl FromIterator<MappingEntry> for MappingSet {
    fn from_iter<I: IntoIterator<Item = MappingEntry>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().collect(),
        }
    }
}

impl IntoIterator for MappingSet {
    type Item = MappingEntry;
    type IntoIter = std::vec::IntoIter<MappingEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

impl<'a> IntoIterator for &'a MappingSet {
    type Item = &'a MappingEntry;
    type IntoIter = std::slice::Iter<'a, MappingEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}
