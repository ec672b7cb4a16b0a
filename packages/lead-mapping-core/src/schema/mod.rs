//! Target doctype schemas: field descriptors, provider seam and registry.

mod field;
mod file;
mod registry;

pub use field::{FieldDescriptor, FieldType};
pub use file::{load_schema_file, validate_schema_file, SchemaFile};
pub use registry::SchemaRegistry;

use crate::error::MappingError;

/// Source of doctype field lists.
pub trait SchemaProvider {
    /// Returns the fields of `doctype` in declaration order.
    ///
    /// # Errors
    /// `MappingError::SchemaNotFound` if the doctype is unknown.
    fn get_schema(&self, doctype: &str) -> Result<Vec<FieldDescriptor>, MappingError>;
}
