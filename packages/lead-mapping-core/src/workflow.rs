//! Quick-map workflow: open a form's mapping for editing, then validate and save it.

use crate::error::MappingError;
use crate::form::{is_set, FormConfig, MappingStatus};
use crate::formatting::{parse_function_call, FormattingRegistry};
use crate::mapping::{FieldMappingResolver, MappingSet, ValidationResult};
use crate::provisioning::sync_campaign_assignee;
use crate::schema::SchemaProvider;
use crate::store::DocumentStore;

const DEFAULT_ASSIGNEE_DOCTYPE: &str = "User";

/// Everything needed to edit the mapping of one form.
#[derive(Debug, Clone)]
pub struct QuickMapDialog {
    pub form: FormConfig,
    pub resolver: FieldMappingResolver,
    /// Formatting functions that may be selected, sorted
    pub formatting_functions: Vec<String>,
}

impl QuickMapDialog {
    /// Mapping currently stored on the form.
    pub fn mapping(&self) -> &MappingSet {
        &self.form.mapping
    }

    /// Assignee doctype to preselect.
    pub fn assignee_doctype(&self) -> &str {
        self.form
            .assignee_doctype
            .as_deref()
            .filter(|d| !d.is_empty())
            .unwrap_or(DEFAULT_ASSIGNEE_DOCTYPE)
    }
}

/// Edited mapping submitted for a form.
#[derive(Debug, Clone, Default)]
pub struct QuickMapRequest {
    /// Form document name
    pub form: String,
    /// Target doctype; falls back to the form's lead doctype reference
    pub lead_doctype: Option<String>,
    pub mapping: MappingSet,
    pub assignee_doctype: Option<String>,
    pub assign_to: Option<String>,
}

/// Result of a saved quick map.
#[derive(Debug, Clone)]
pub struct QuickMapOutcome {
    /// Form as stored
    pub form: FormConfig,
    /// Validation of the committed mapping; may carry missing-mandatory warnings
    pub validation: ValidationResult,
    /// Whether the linked campaign's assignee was updated
    pub campaign_updated: bool,
}

/// Loads a form and resolves its target doctype for editing.
///
/// `lead_doctype` overrides the form's own lead doctype reference.
///
/// # Errors
/// `FormNotFound`, `LeadDoctypeMissing`, or `SchemaNotFound` from the provider.
pub fn open_quick_map(
    store: &dyn DocumentStore,
    schemas: &dyn SchemaProvider,
    formatting: &FormattingRegistry,
    form_name: &str,
    lead_doctype: Option<&str>,
) -> Result<QuickMapDialog, MappingError> {
    let form = store.get_form(form_name)?;
    let doctype = target_doctype(&form, lead_doctype)?;
    let resolver = FieldMappingResolver::load(schemas, &doctype)?;
    Ok(QuickMapDialog {
        form,
        resolver,
        formatting_functions: formatting.function_names(),
    })
}

/// Validates and saves an edited mapping.
///
/// Missing mandatory fields are a warning. Targets outside the doctype's
/// mappable fields, incomplete entries, unknown formatting functions and a
/// missing assignee reject the request before anything is written. Store errors are returned as-is.
pub fn save_quick_map(
    store: &dyn DocumentStore,
    schemas: &dyn SchemaProvider,
    formatting: &FormattingRegistry,
    request: QuickMapRequest,
) -> Result<QuickMapOutcome, MappingError> {
    let mut form = store.get_form(&request.form)?;
    let doctype = target_doctype(&form, request.lead_doctype.as_deref())?;
    let resolver = FieldMappingResolver::load(schemas, &doctype)?;

    resolver.check_targets(&request.mapping)?;
    check_formatting_functions(formatting, &request.mapping)?;

    let validation = form.commit_mapping(&resolver, request.mapping)?;

    if !is_set(&request.assign_to) {
        return Err(MappingError::AssigneeRequired { form: form.name });
    }
    form.assign_to = request.assign_to;
    form.assignee_doctype = request
        .assignee_doctype
        .filter(|d| !d.trim().is_empty())
        .or_else(|| Some(DEFAULT_ASSIGNEE_DOCTYPE.to_string()));
    form.mapping_status = MappingStatus::Mapped;

    let form = store.save_form(form)?;
    tracing::info!(
        "Fields of form {} mapped onto {} ({} entries)",
        form.name,
        doctype,
        form.mapping.len()
    );

    let campaign_updated = sync_campaign_assignee(store, &form)?;
    Ok(QuickMapOutcome {
        form,
        validation,
        campaign_updated,
    })
}

fn target_doctype(form: &FormConfig, requested: Option<&str>) -> Result<String, MappingError> {
    requested
        .filter(|d| !d.trim().is_empty())
        .map(str::to_string)
        .or_else(|| form.lead_doctype_reference.clone().filter(|d| !d.is_empty()))
        .ok_or_else(|| MappingError::LeadDoctypeMissing {
            form: form.name.clone(),
        })
}

fn check_formatting_functions(
    formatting: &FormattingRegistry,
    mapping: &MappingSet,
) -> Result<(), MappingError> {
    for entry in mapping {
        if let Some(function) = entry.formatting_function() {
            let (name, _) = parse_function_call(function, entry.function_parameters.as_deref())?;
            if !formatting.contains(&name) {
                return Err(MappingError::UnknownFormattingFunction { name });
            }
        }
    }
    Ok(())
}
