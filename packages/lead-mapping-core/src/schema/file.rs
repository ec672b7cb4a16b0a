//! Schema file loading.

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use super::field::FieldDescriptor;
use super::registry::{validate_fields, SchemaRegistry};
use crate::error::MappingError;

/// Current schema file version.
pub const SCHEMA_FILE_VERSION: u32 = 1;

/// Schema file format: doctype name to field list.
#[derive(Debug, Serialize, Deserialize)]
pub struct SchemaFile {
    /// Schema version
    pub version: u32,
    /// Doctype definitions
    pub doctypes: BTreeMap<String, Vec<FieldDescriptor>>,
}

/// Validates a parsed schema file.
///
/// # Returns
/// `Err(MappingError::InvalidSchema)` on unsupported version or bad field lists.
pub fn validate_schema_file(schema: &SchemaFile) -> Result<(), MappingError> {
    if schema.version != SCHEMA_FILE_VERSION {
        return Err(MappingError::InvalidSchema {
            doctype: "*".to_string(),
            message: format!("unsupported schema version: {}", schema.version),
        });
    }
    for (doctype, fields) in &schema.doctypes {
        validate_fields(doctype, fields)?;
    }
    Ok(())
}

/// Loads a schema file into a new registry.
///
/// # Arguments
/// * `path` - Path to the JSON schema file
///
/// # Returns
/// `Result<SchemaRegistry, MappingError>` with every doctype registered.
pub fn load_schema_file(path: &Path) -> Result<SchemaRegistry, MappingError> {
    let contents = fs::read_to_string(path).map_err(|e| {
        MappingError::IoError(format!("Failed to read schema file {}: {}", path.display(), e))
    })?;
    let schema: SchemaFile = serde_json::from_str(&contents)
        .map_err(|e| MappingError::SerializationError(format!("Failed to parse schema: {}", e)))?;
    validate_schema_file(&schema)?;

    let registry = SchemaRegistry::new();
    for (doctype, fields) in schema.doctypes {
        registry.register(doctype, fields)?;
    }
    tracing::debug!(
        "Loaded {} doctypes from {}",
        registry.doctypes().len(),
        path.display()
    );
    Ok(registry)
}
