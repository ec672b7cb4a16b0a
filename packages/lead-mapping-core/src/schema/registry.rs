use std::collections::HashMap;
use std::sync::RwLock;

use super::field::FieldDescriptor;
use super::SchemaProvider;
use crate::error::MappingError;

/// Registry of doctype schemas.
///
/// Stores field lists keyed by doctype name.
/// Provides thread-safe registration and retrieval.
#[derive(Debug, Default)]
pub struct SchemaRegistry {
    doctypes: RwLock<HashMap<String, Vec<FieldDescriptor>>>,
}

impl SchemaRegistry {
    /// Creates a new empty schema registry.
    pub fn new() -> Self {
        Self {
            doctypes: RwLock::new(HashMap::new()),
        }
    }

    /// Registers the field list of a doctype, replacing any previous one.
    ///
    /// # Arguments
    /// * `doctype` - Doctype name
    /// * `fields` - Fields in declaration order
    ///
    /// # Returns
    /// `Err(MappingError::InvalidSchema)` if a field name is empty or repeated.
    pub fn register(
        &self,
        doctype: impl Into<String>,
        fields: Vec<FieldDescriptor>,
    ) -> Result<(), MappingError> {
        let doctype = doctype.into();
        validate_fields(&doctype, &fields)?;

        let mut doctypes = self
            .doctypes
            .write()
            .map_err(|_| MappingError::LockPoisoned)?;
        doctypes.insert(doctype, fields);
        Ok(())
    }

    /// Checks if a doctype is registered.
    pub fn contains(&self, doctype: &str) -> bool {
        let doctypes = match self.doctypes.read() {
            Ok(guard) => guard,
            Err(_) => return false,
        };
        doctypes.contains_key(doctype)
    }

    /// Returns all registered doctype names, sorted.
    pub fn doctypes(&self) -> Vec<String> {
        let doctypes = match self.doctypes.read() {
            Ok(guard) => guard,
            Err(_) => return Vec::new(),
        };
        let mut names: Vec<String> = doctypes.keys().cloned().collect();
        names.sort();
        names
    }

    /// Removes a doctype. Returns `true` if it was registered.
    pub fn remove(&self, doctype: &str) -> bool {
        let mut doctypes = match self.doctypes.write() {
            Ok(guard) => guard,
            Err(_) => return false,
        };
        doctypes.remove(doctype).is_some()
    }
}

impl SchemaProvider for SchemaRegistry {
    fn get_schema(&self, doctype: &str) -> Result<Vec<FieldDescriptor>, MappingError> {
        let doctypes = self
            .doctypes
            .read()
            .map_err(|_| MappingError::LockPoisoned)?;
        doctypes
            .get(doctype)
            .cloned()
            .ok_or_else(|| MappingError::SchemaNotFound {
                doctype: doctype.to_string(),
            })
    }
}

/// Rejects empty and duplicate field names.
pub(crate) fn validate_fields(
    doctype: &str,
    fields: &[FieldDescriptor],
) -> Result<(), MappingError> {
    let mut seen_names = std::collections::HashSet::new();
    for field in fields {
        if field.name.trim().is_empty() {
            return Err(MappingError::InvalidSchema {
                doctype: doctype.to_string(),
                message: "field with empty name".to_string(),
            });
        }
        if !seen_names.insert(field.name.as_str()) {
            return Err(MappingError::InvalidSchema {
                doctype: doctype.to_string(),
                message: format!("duplicate field name '{}'", field.name),
            });
        }
    }
    Ok(())
}
