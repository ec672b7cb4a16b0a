//! Form configuration, campaign and ads documents.

use serde::{Deserialize, Serialize};

use crate::error::MappingError;
use crate::mapping::{FieldMappingResolver, MappingSet, ValidationResult};

/// Whether a form's mapping has been saved through quick map.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum MappingStatus {
    #[default]
    #[serde(rename = "Not Mapped")]
    NotMapped,
    Mapped,
}

/// Configuration of one ad-platform lead form.
///
/// Owns the mapping set applied to every lead received through the form.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormConfig {
    /// Document name (store key)
    pub name: String,
    /// Lead form id on the ad platform
    pub form_id: String,
    /// Lead form display name
    #[serde(default)]
    pub form_name: String,
    /// Page the form belongs to
    #[serde(default)]
    pub page: Option<String>,
    /// Form status on the ad platform (e.g. `ACTIVE`)
    #[serde(default)]
    pub status: String,
    /// Doctype leads are created as
    #[serde(default)]
    pub lead_doctype_reference: Option<String>,
    /// Doctype of the lead assignee (e.g. `User`)
    #[serde(default)]
    pub assignee_doctype: Option<String>,
    /// Lead assignee
    #[serde(default)]
    pub assign_to: Option<String>,
    /// Linked campaign document name
    #[serde(default)]
    pub campaign: Option<String>,
    /// Linked ads document name
    #[serde(default)]
    pub ads: Option<String>,
    #[serde(default)]
    pub mapping_status: MappingStatus,
    #[serde(default)]
    pub mapping: MappingSet,
}

impl FormConfig {
    /// Creates a form configuration named after its form id.
    pub fn new(form_id: impl Into<String>, form_name: impl Into<String>) -> Self {
        let form_id = form_id.into();
        Self {
            name: form_id.clone(),
            form_id,
            form_name: form_name.into(),
            status: "ACTIVE".to_string(),
            ..Default::default()
        }
    }

    /// Validates `mapping` against `resolver` and replaces the stored mapping.
    ///
    /// Also records the resolver's doctype as the lead doctype reference.
    pub fn commit_mapping(
        &mut self,
        resolver: &FieldMappingResolver,
        mapping: MappingSet,
    ) -> Result<ValidationResult, MappingError> {
        let result = resolver.commit(&mut self.mapping, mapping)?;
        self.lead_doctype_reference = Some(resolver.doctype().to_string());
        Ok(result)
    }
}

/// Ad campaign that forms are attached to.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Campaign {
    pub name: String,
    pub campaign_id: String,
    pub campaign_name: String,
    pub campaign_objective: String,
    pub status: String,
    #[serde(default)]
    pub has_lead_form: bool,
    /// Created locally rather than fetched from the ad platform
    #[serde(default)]
    pub self_created: bool,
    #[serde(default)]
    pub assignee_doctype: Option<String>,
    #[serde(default)]
    pub assign_to: Option<String>,
}

/// Ads document linked to a campaign.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ads {
    pub name: String,
    pub ads_id: String,
    pub ads_name: String,
    pub status: String,
    pub campaign: String,
    #[serde(default)]
    pub has_lead_form: bool,
}

pub(crate) fn is_set(value: &Option<String>) -> bool {
    value.as_deref().is_some_and(|v| !v.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mapping::MappingEntry;
    use crate::schema::{FieldDescriptor, FieldType};

    #[test]
    fn test_commit_mapping_sets_doctype() {
        let resolver = FieldMappingResolver::from_schema(
            "Lead",
            &[FieldDescriptor::new("lead_name", FieldType::Data, true)],
        );
        let mut form = FormConfig::new("1234", "Spring Offer");
        let result = form
            .commit_mapping(
                &resolver,
                MappingSet::from_entries(vec![MappingEntry::new("full_name", "lead_name")]),
            )
            .unwrap();

        assert!(!result.has_warnings());
        assert_eq!(form.lead_doctype_reference.as_deref(), Some("Lead"));
        assert_eq!(form.mapping.len(), 1);
    }

    #[test]
    fn test_rejected_commit_leaves_form_unchanged() {
        let resolver = FieldMappingResolver::from_schema("Lead", &[]);
        let mut form = FormConfig::new("1234", "Spring Offer");
        let before = form.clone();

        let result = form.commit_mapping(
            &resolver,
            MappingSet::from_entries(vec![MappingEntry::new("", "lead_name")]),
        );
        assert!(result.is_err());
        assert_eq!(form, before);
    }

    #[test]
    fn test_mapping_status_serde() {
        let json = serde_json::to_string(&MappingStatus::NotMapped).unwrap();
        assert_eq!(json, "\"Not Mapped\"");
        let parsed: MappingStatus = serde_json::from_str("\"Mapped\"").unwrap();
        assert_eq!(parsed, MappingStatus::Mapped);
    }
}
