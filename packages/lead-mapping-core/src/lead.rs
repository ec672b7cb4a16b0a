//! Building lead documents from ad-platform lead data.

use std::collections::{BTreeMap, HashMap};

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::MappingError;
use crate::form::FormConfig;
use crate::formatting::FormattingRegistry;

/// One answered field of a lead, as delivered by the ad platform.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeadFieldData {
    pub name: String,
    #[serde(default)]
    pub values: Vec<String>,
}

/// Lead record ready to be inserted as `doctype`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LeadDocument {
    pub doctype: String,
    pub fields: BTreeMap<String, Value>,
}

/// Applies the mapping of `form` to raw lead field data.
///
/// For each entry with a target, the first value of its source field is
/// used, else its default. A configured formatting function is applied to
/// that value; if it fails the failure is logged and the raw value kept.
/// Targets left without a value are set to null.
///
/// # Errors
/// `LeadDoctypeMissing` if the form has no lead doctype reference.
pub fn build_lead(
    form: &FormConfig,
    field_data: &[LeadFieldData],
    formatting: &FormattingRegistry,
) -> Result<LeadDocument, MappingError> {
    let doctype = form
        .lead_doctype_reference
        .clone()
        .filter(|d| !d.is_empty())
        .ok_or_else(|| MappingError::LeadDoctypeMissing {
            form: form.name.clone(),
        })?;

    let answers: HashMap<&str, &str> = field_data
        .iter()
        .filter_map(|f| f.values.first().map(|v| (f.name.as_str(), v.as_str())))
        .collect();

    let mut fields = BTreeMap::new();
    for entry in form.mapping.iter().filter(|e| e.has_target()) {
        let raw = answers
            .get(entry.source_field.trim())
            .copied()
            .or(entry.default_value.as_deref());

        let value = match raw {
            Some(raw) => match formatting.apply_entry(entry, raw) {
                Ok(formatted) => formatted,
                Err(err) => {
                    tracing::error!(
                        "Error in formatting function '{}' for {}: {}",
                        entry.formatting_function.as_deref().unwrap_or_default(),
                        entry.target(),
                        err
                    );
                    Some(raw.to_string())
                }
            },
            None => None,
        };

        fields.insert(
            entry.target().to_string(),
            value.map(Value::String).unwrap_or(Value::Null),
        );
    }

    tracing::debug!(
        "Built {} lead with {} fields from form {}",
        doctype,
        fields.len(),
        form.name
    );
    Ok(LeadDocument { doctype, fields })
}
