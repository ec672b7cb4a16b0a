//! Field mapping engine for ad-platform lead forms.
//!
//! Provides target schema resolution, mapping validation and commit,
//! document persistence, formatting functions, campaign/ads provisioning
//! and lead construction.

pub mod config;
pub mod error;
pub mod form;
pub mod formatting;
pub mod lead;
pub mod mapping;
pub mod provisioning;
pub mod schema;
pub mod store;
pub mod workflow;

pub use error::MappingError;
pub use mapping::{FieldMappingResolver, MappingEntry, MappingSet, ValidationResult};
