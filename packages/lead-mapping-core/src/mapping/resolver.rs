//! Field Mapping Resolver.
//!
//! Computes which target fields can be mapped and which are mandatory,
//! validates a proposed mapping set and commits it onto its owner.

use std::collections::BTreeSet;

use serde::Serialize;

use super::entry::{MappingEntry, MappingSet};
use crate::error::MappingError;
use crate::schema::{FieldDescriptor, SchemaProvider};

/// Outcome of validating a mapping set against a target doctype.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ValidationResult {
    /// Mandatory target fields no entry maps onto (warning only)
    pub missing_mandatory: BTreeSet<String>,
    /// Entries with a target but neither source nor default (blocks commit)
    pub incomplete_entries: Vec<MappingEntry>,
}

impl ValidationResult {
    /// Returns true if nothing blocks a commit.
    pub fn is_committable(&self) -> bool {
        self.incomplete_entries.is_empty()
    }

    /// Returns true if the result carries non-blocking warnings.
    pub fn has_warnings(&self) -> bool {
        !self.missing_mandatory.is_empty()
    }
}

/// Returns the names of fields whose type is mappable, in schema order.
pub fn compute_mappable_fields(schema: &[FieldDescriptor]) -> Vec<String> {
    schema
        .iter()
        .filter(|f| f.field_type.is_mappable())
        .map(|f| f.name.clone())
        .collect()
}

/// Returns the names of fields the schema marks as required.
pub fn compute_mandatory_fields(schema: &[FieldDescriptor]) -> BTreeSet<String> {
    schema
        .iter()
        .filter(|f| f.required)
        .map(|f| f.name.clone())
        .collect()
}

/// Validates a mapping set against the mandatory fields of its target.
///
/// # Arguments
/// * `mapping` - Proposed mapping set
/// * `mandatory` - Mandatory target field names
///
/// # Returns
/// Missing mandatory fields and incomplete entries, in mapping order.
pub fn validate(mapping: &MappingSet, mandatory: &BTreeSet<String>) -> ValidationResult {
    let targets = mapping.target_fields();
    let missing_mandatory = mandatory
        .iter()
        .filter(|field| !targets.contains(field.as_str()))
        .cloned()
        .collect();
    let incomplete_entries = mapping
        .iter()
        .filter(|e| e.is_incomplete())
        .cloned()
        .collect();

    ValidationResult {
        missing_mandatory,
        incomplete_entries,
    }
}

/// Replaces `stored` with `mapping` if no entry is incomplete.
///
/// The replacement is all-or-nothing: on error `stored` is left untouched.
///
/// # Errors
/// `MappingError::IncompleteMappingEntry` listing every offending entry.
pub fn commit(stored: &mut MappingSet, mapping: MappingSet) -> Result<(), MappingError> {
    let incomplete: Vec<MappingEntry> = mapping
        .iter()
        .filter(|e| e.is_incomplete())
        .cloned()
        .collect();
    if !incomplete.is_empty() {
        return Err(MappingError::IncompleteMappingEntry {
            entries: incomplete,
        });
    }

    *stored = mapping;
    Ok(())
}

/// Resolver bound to one target doctype.
#[derive(Debug, Clone)]
pub struct FieldMappingResolver {
    doctype: String,
    mappable: Vec<String>,
    mandatory: BTreeSet<String>,
}

impl FieldMappingResolver {
    /// Builds a resolver from an already fetched schema.
    pub fn from_schema(doctype: impl Into<String>, schema: &[FieldDescriptor]) -> Self {
        Self {
            doctype: doctype.into(),
            mappable: compute_mappable_fields(schema),
            mandatory: compute_mandatory_fields(schema),
        }
    }

    /// Fetches the schema of `doctype` and builds a resolver for it.
    ///
    /// # Errors
    /// Propagates `MappingError::SchemaNotFound` from the provider.
    pub fn load(provider: &dyn SchemaProvider, doctype: &str) -> Result<Self, MappingError> {
        let schema = provider.get_schema(doctype)?;
        Ok(Self::from_schema(doctype, &schema))
    }

    pub fn doctype(&self) -> &str {
        &self.doctype
    }

    pub fn mappable_fields(&self) -> &[String] {
        &self.mappable
    }

    pub fn mandatory_fields(&self) -> &BTreeSet<String> {
        &self.mandatory
    }

    pub fn is_mappable(&self, field: &str) -> bool {
        let field = field.trim();
        self.mappable.iter().any(|f| f == field)
    }

    /// Rejects entries whose target is not a mappable field of the doctype.
    ///
    /// # Errors
    /// `MappingError::UnmappableTargetField` listing the offending targets.
    pub fn check_targets(&self, mapping: &MappingSet) -> Result<(), MappingError> {
        let fields: Vec<String> = mapping
            .target_fields()
            .into_iter()
            .filter(|f| !self.is_mappable(f))
            .map(str::to_string)
            .collect();
        if fields.is_empty() {
            Ok(())
        } else {
            Err(MappingError::UnmappableTargetField {
                doctype: self.doctype.clone(),
                fields,
            })
        }
    }

    pub fn validate(&self, mapping: &MappingSet) -> ValidationResult {
        validate(mapping, &self.mandatory)
    }

    /// Validates `mapping` and commits it onto `stored`.
    ///
    /// Missing mandatory fields are logged and reported, they never block.
    ///
    /// # Returns
    /// The validation result of the committed mapping.
    pub fn commit(
        &self,
        stored: &mut MappingSet,
        mapping: MappingSet,
    ) -> Result<ValidationResult, MappingError> {
        let result = self.validate(&mapping);
        if !result.is_committable() {
            return Err(MappingError::IncompleteMappingEntry {
                entries: result.incomplete_entries,
            });
        }
        if result.has_warnings() {
            tracing::warn!(
                "Mandatory fields of '{}' missing from mapping: {}",
                self.doctype,
                result
                    .missing_mandatory
                    .iter()
                    .map(String::as_str)
                    .collect::<Vec<_>>()
                    .join(", ")
            );
        }

        commit(stored, mapping)?;
        Ok(result)
    }
}
