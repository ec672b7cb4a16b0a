//! Lead field mapping: entries, mapping sets and the resolver.

mod entry;
mod resolver;

pub use entry::{MappingEntry, MappingSet};
pub use resolver::{
    commit, compute_mandatory_fields, compute_mappable_fields, validate, FieldMappingResolver,
    ValidationResult,
};

#[cfg(test)]
mod tests {
    include!("tests.rs");
}
