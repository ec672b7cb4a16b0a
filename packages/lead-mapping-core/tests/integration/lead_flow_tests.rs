//! Provisioning a form's campaign and ads, then building leads from it.

use ntest::timeout;
use tempfile::tempdir;

use lead_mapping_core::form::FormConfig;
use lead_mapping_core::lead::{build_lead, LeadFieldData};
use lead_mapping_core::provisioning::{create_ads, create_campaign, ProvisionOutcome};
use lead_mapping_core::store::{DocumentStore, FileStore};
use lead_mapping_core::workflow::{save_quick_map, QuickMapRequest};
use lead_mapping_core::{MappingEntry, MappingSet};

use super::helpers;

#[timeout(2000)]
#[test]
fn test_provision_map_and_build_lead() {
    let temp_dir = tempdir().unwrap();
    let config = helpers::config(&temp_dir.path().join("data"));
    let schemas = helpers::schemas(temp_dir.path());
    let formatting = helpers::formatting(&config);

    let store = FileStore::open(&config).unwrap();
    let mut form = FormConfig::new("44001", "Festive Offer");
    form.page = Some("1029384756".to_string());
    form.assignee_doctype = Some("User".to_string());
    form.assign_to = Some("first@example.com".to_string());
    store.save_form(form).unwrap();

    let campaign = create_campaign(&store, &config, "44001").unwrap();
    assert_eq!(campaign, ProvisionOutcome::Created("Festive_Offer_44001".to_string()));
    let ads = create_ads(&store, "44001").unwrap();
    assert_eq!(ads, ProvisionOutcome::Created("Festive Offer_44001".to_string()));

    let outcome = save_quick_map(
        &store,
        &schemas,
        &formatting,
        QuickMapRequest {
            form: "44001".to_string(),
            lead_doctype: Some("Lead".to_string()),
            mapping: MappingSet::from_entries(vec![
                MappingEntry::new("full_name", "lead_name")
                    .with_formatting("capitalize_name", None),
                MappingEntry::new("phone_number", "mobile_no")
                    .with_formatting("format_phone_number", None),
                MappingEntry::new("", "source").with_default("Facebook"),
            ]),
            assignee_doctype: Some("User".to_string()),
            assign_to: Some("second@example.com".to_string()),
        },
    )
    .unwrap();
    assert!(outcome.campaign_updated);

    let reopened = FileStore::open(&config).unwrap();
    let campaign = reopened.get_campaign("Festive_Offer_44001").unwrap();
    assert_eq!(campaign.assign_to.as_deref(), Some("second@example.com"));

    let form = reopened.get_form("44001").unwrap();
    let lead = build_lead(
        &form,
        &[
            LeadFieldData {
                name: "full_name".to_string(),
                values: vec!["meera nair".to_string()],
            },
            LeadFieldData {
                name: "phone_number".to_string(),
                values: vec!["09876543210".to_string()],
            },
        ],
        &formatting,
    )
    .unwrap();

    assert_eq!(lead.doctype, "Lead");
    assert_eq!(lead.fields["lead_name"], "Meera Nair");
    assert_eq!(lead.fields["mobile_no"], "+91-9876543210");
    assert_eq!(lead.fields["source"], "Facebook");
}
