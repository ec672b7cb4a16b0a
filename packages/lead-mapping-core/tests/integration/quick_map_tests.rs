//! Mapping resolution and quick-map commits persisted through the file store.

use ntest::timeout;
use tempfile::tempdir;

use lead_mapping_core::form::{FormConfig, MappingStatus};
use lead_mapping_core::mapping::{compute_mandatory_fields, compute_mappable_fields, validate};
use lead_mapping_core::schema::SchemaProvider;
use lead_mapping_core::store::{DocumentStore, FileStore};
use lead_mapping_core::workflow::{save_quick_map, QuickMapRequest};
use lead_mapping_core::{MappingEntry, MappingError, MappingSet};

use super::helpers;

fn request(mapping: Vec<MappingEntry>) -> QuickMapRequest {
    QuickMapRequest {
        form: "88001".to_string(),
        lead_doctype: Some("Lead".to_string()),
        mapping: MappingSet::from_entries(mapping),
        assignee_doctype: Some("User".to_string()),
        assign_to: Some("owner@example.com".to_string()),
    }
}

#[timeout(1000)]
#[test]
fn test_schema_file_resolution() {
    let temp_dir = tempdir().unwrap();
    let schemas = helpers::schemas(temp_dir.path());
    let fields = schemas.get_schema("Lead").unwrap();

    assert_eq!(
        compute_mappable_fields(&fields),
        vec!["lead_name", "mobile_no", "email_id", "budget", "source"]
    );
    let mandatory = compute_mandatory_fields(&fields);
    assert_eq!(mandatory.len(), 2);

    let mapping = MappingSet::from_entries(vec![MappingEntry::new("q_phone", "mobile_no")]);
    let result = validate(&mapping, &mandatory);
    assert_eq!(result.missing_mandatory.into_iter().collect::<Vec<_>>(), vec!["lead_name"]);
    assert!(result.incomplete_entries.is_empty());
}

#[timeout(2000)]
#[test]
fn test_quick_map_persists_and_reloads() {
    let temp_dir = tempdir().unwrap();
    let config = helpers::config(&temp_dir.path().join("data"));
    let schemas = helpers::schemas(temp_dir.path());
    let formatting = helpers::formatting(&config);

    let store = FileStore::open(&config).unwrap();
    store.save_form(FormConfig::new("88001", "Home Loans")).unwrap();

    let outcome = save_quick_map(
        &store,
        &schemas,
        &formatting,
        request(vec![
            MappingEntry::new("full_name", "lead_name"),
            MappingEntry::new("phone_number", "mobile_no")
                .with_formatting("format_phone_number", Some("[\"IN\"]".to_string())),
        ]),
    )
    .unwrap();
    assert!(outcome.validation.missing_mandatory.is_empty());

    let reopened = FileStore::open(&config).unwrap();
    let form = reopened.get_form("88001").unwrap();
    assert_eq!(form.mapping_status, MappingStatus::Mapped);
    assert_eq!(form.mapping.len(), 2);
    assert_eq!(form.assign_to.as_deref(), Some("owner@example.com"));
}

#[timeout(2000)]
#[test]
fn test_rejected_commit_does_not_touch_disk() {
    let temp_dir = tempdir().unwrap();
    let config = helpers::config(&temp_dir.path().join("data"));
    let schemas = helpers::schemas(temp_dir.path());
    let formatting = helpers::formatting(&config);

    let store = FileStore::open(&config).unwrap();
    store.save_form(FormConfig::new("88001", "Home Loans")).unwrap();
    let before = std::fs::read_to_string(store.path()).unwrap();

    let err = save_quick_map(
        &store,
        &schemas,
        &formatting,
        request(vec![
            MappingEntry::new("full_name", "lead_name"),
            MappingEntry::new("", "mobile_no").with_default(""),
        ]),
    )
    .unwrap_err();

    match err {
        MappingError::IncompleteMappingEntry { entries } => {
            assert_eq!(entries.len(), 1);
            assert_eq!(entries[0].target_field, "mobile_no");
        }
        other => panic!("unexpected error: {}", other),
    }
    assert_eq!(std::fs::read_to_string(store.path()).unwrap(), before);
}

#[timeout(2000)]
#[test]
fn test_commit_twice_same_state() {
    let temp_dir = tempdir().unwrap();
    let config = helpers::config(&temp_dir.path().join("data"));
    let schemas = helpers::schemas(temp_dir.path());
    let formatting = helpers::formatting(&config);

    let store = FileStore::open(&config).unwrap();
    store.save_form(FormConfig::new("88001", "Home Loans")).unwrap();

    let mapping = vec![MappingEntry::new("q_phone", "mobile_no")];
    save_quick_map(&store, &schemas, &formatting, request(mapping.clone())).unwrap();
    let first = std::fs::read_to_string(store.path()).unwrap();
    save_quick_map(&store, &schemas, &formatting, request(mapping)).unwrap();
    let second = std::fs::read_to_string(store.path()).unwrap();

    assert_eq!(first, second);
}
