//! Shared fixtures for integration tests.

use std::fs;
use std::path::Path;

use lead_mapping_core::config::MappingConfig;
use lead_mapping_core::formatting::{register_builtin_functions, FormattingRegistry};
use lead_mapping_core::schema::{load_schema_file, SchemaRegistry};

pub const SCHEMA_JSON: &str = r#"{
    "version": 1,
    "doctypes": {
        "Lead": [
            {"fieldname": "lead_name", "fieldtype": "Data", "reqd": 1},
            {"fieldname": "mobile_no", "fieldtype": "Phone", "reqd": 1},
            {"fieldname": "email_id", "fieldtype": "Data", "reqd": 0},
            {"fieldname": "notes", "fieldtype": "Text Editor", "reqd": 0},
            {"fieldname": "budget", "fieldtype": "Float", "reqd": 0},
            {"fieldname": "source", "fieldtype": "Link", "reqd": 0}
        ]
    }
}"#;

pub fn config(data_dir: &Path) -> MappingConfig {
    MappingConfig {
        data_dir: data_dir.to_path_buf(),
        persistence_retry_delay_ms: 0,
        ..Default::default()
    }
}

pub fn schemas(dir: &Path) -> SchemaRegistry {
    let path = dir.join("schema.json");
    fs::write(&path, SCHEMA_JSON).unwrap();
    load_schema_file(&path).unwrap()
}

pub fn formatting(config: &MappingConfig) -> FormattingRegistry {
    let registry = FormattingRegistry::new();
    register_builtin_functions(&registry, config).unwrap();
    registry
}
