//! Mapping engine error types.

use thiserror::Error;

use crate::mapping::MappingEntry;

/// Mapping, store and provisioning errors.
#[derive(Error, Debug, Clone)]
pub enum MappingError {
    /// Target doctype not known to the schema provider
    #[error("Schema for doctype '{doctype}' not found")]
    SchemaNotFound { doctype: String },

    /// Schema file or registration rejected
    #[error("Invalid schema for doctype '{doctype}': {message}")]
    InvalidSchema { doctype: String, message: String },

    /// Mapping entries with a target but neither source nor default
    #[error(
        "Each target field in the mapping must have either a source field or a default value: {}",
        format_targets(.entries)
    )]
    IncompleteMappingEntry { entries: Vec<MappingEntry> },

    /// Form configuration not found
    #[error("Form configuration '{form}' not found")]
    FormNotFound { form: String },

    /// Campaign not found
    #[error("Campaign '{campaign}' not found")]
    CampaignNotFound { campaign: String },

    /// Form has no page, required before creating a campaign
    #[error("Form '{form}' has no page; select a page before creating or linking a campaign")]
    PageRequired { form: String },

    /// Form has no campaign, required before creating ads
    #[error("Form '{form}' has no campaign; link a campaign before creating ads")]
    CampaignRequired { form: String },

    /// Lead assignment missing from a quick-map request
    #[error("Lead assignee is required for form '{form}'")]
    AssigneeRequired { form: String },

    /// No lead doctype configured for the form
    #[error("Form '{form}' has no lead doctype reference")]
    LeadDoctypeMissing { form: String },

    /// Mapping targets fields the doctype does not offer for mapping
    #[error("Fields {fields:?} of doctype '{doctype}' cannot be mapped")]
    UnmappableTargetField { doctype: String, fields: Vec<String> },

    /// Formatting function not registered
    #[error("Formatting function '{name}' not found")]
    UnknownFormattingFunction { name: String },

    /// Formatting function registered twice
    #[error("Formatting function '{name}' already registered")]
    FunctionAlreadyRegistered { name: String },

    /// Formatting function rejected its input
    #[error("Formatting function '{function}' failed: {message}")]
    FormattingFailed { function: String, message: String },

    /// Serialization error
    #[error("Serialization error: {0}")]
    SerializationError(String),

    /// Data corruption detected
    #[error("Data corruption detected: {0}")]
    DataCorruption(String),

    /// Lock poisoned (RwLock poisoned)
    #[error("Lock poisoned")]
    LockPoisoned,

    /// Disk full error during persistence
    #[error("Disk full: {0}")]
    DiskFull(String),

    /// I/O error during persistence
    #[error("I/O error: {0}")]
    IoError(String),

    /// Transient I/O error that may succeed on retry
    #[error("Transient I/O error: {0}")]
    TransientIoError(String),
}

impl MappingError {
    /// Returns true for errors raised by the document store while saving.
    pub fn is_save_failure(&self) -> bool {
        matches!(
            self,
            MappingError::SerializationError(_)
                | MappingError::DiskFull(_)
                | MappingError::IoError(_)
                | MappingError::TransientIoError(_)
                | MappingError::LockPoisoned
        )
    }
}

fn format_targets(entries: &[MappingEntry]) -> String {
    entries
        .iter()
        .map(MappingEntry::target)
        .collect::<Vec<_>>()
        .join(", ")
}
