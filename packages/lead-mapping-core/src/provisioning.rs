//! Campaign and ads auto-provisioning for lead forms.

use std::sync::OnceLock;

use regex::Regex;

use crate::config::MappingConfig;
use crate::error::MappingError;
use crate::form::{is_set, Ads, Campaign, FormConfig};
use crate::store::DocumentStore;

/// Result of a provisioning request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProvisionOutcome {
    /// A new document was created and linked to the form
    Created(String),
    /// A document with the derived id already existed and was linked
    LinkedExisting(String),
    /// The form was already linked; nothing changed
    AlreadyLinked(String),
}

impl ProvisionOutcome {
    /// Name of the linked document.
    pub fn name(&self) -> &str {
        match self {
            ProvisionOutcome::Created(name)
            | ProvisionOutcome::LinkedExisting(name)
            | ProvisionOutcome::AlreadyLinked(name) => name,
        }
    }
}

fn whitespace() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\s+").expect("valid regex"))
}

/// Campaign id derived from a form: `<form name with whitespace as _>_<form id>`.
pub fn campaign_id_for(form: &FormConfig) -> String {
    format!(
        "{}_{}",
        whitespace().replace_all(&form.form_name, "_"),
        form.form_id
    )
}

/// Ads id derived from a form: `<form name or "Ad">_<form id>`.
pub fn ads_id_for(form: &FormConfig) -> String {
    let name = if form.form_name.is_empty() {
        "Ad"
    } else {
        form.form_name.as_str()
    };
    format!("{}_{}", name, form.form_id)
}

/// Creates or links the campaign of form `form_name`.
///
/// # Errors
/// `PageRequired` if the form has no page; store errors are propagated.
pub fn create_campaign(
    store: &dyn DocumentStore,
    config: &MappingConfig,
    form_name: &str,
) -> Result<ProvisionOutcome, MappingError> {
    let mut form = store.get_form(form_name)?;
    if let Some(campaign) = form.campaign.clone().filter(|c| !c.is_empty()) {
        return Ok(ProvisionOutcome::AlreadyLinked(campaign));
    }
    if !is_set(&form.page) {
        return Err(MappingError::PageRequired {
            form: form.name.clone(),
        });
    }

    let campaign_id = campaign_id_for(&form);
    let outcome = match store.find_campaign(&campaign_id)? {
        Some(existing) => {
            tracing::info!(
                "Campaign already exists: {}; linking to form {}",
                existing.campaign_name,
                form.name
            );
            ProvisionOutcome::LinkedExisting(existing.name)
        }
        None => {
            let campaign_name = if form.form_name.is_empty() {
                format!("Campaign for {}", form.form_id)
            } else {
                form.form_name.clone()
            };
            let campaign = store.save_campaign(Campaign {
                name: campaign_id.clone(),
                campaign_id,
                campaign_name,
                campaign_objective: config.campaign_objective.clone(),
                status: "ACTIVE".to_string(),
                has_lead_form: true,
                self_created: true,
                assignee_doctype: form.assignee_doctype.clone(),
                assign_to: form.assign_to.clone(),
            })?;
            tracing::info!("Campaign created: {}", campaign.campaign_name);
            ProvisionOutcome::Created(campaign.name)
        }
    };

    form.campaign = Some(outcome.name().to_string());
    store.save_form(form)?;
    Ok(outcome)
}

/// Creates or links the ads of form `form_name`.
///
/// # Errors
/// `CampaignRequired` if the form has no campaign; store errors are propagated.
pub fn create_ads(
    store: &dyn DocumentStore,
    form_name: &str,
) -> Result<ProvisionOutcome, MappingError> {
    let mut form = store.get_form(form_name)?;
    if let Some(ads) = form.ads.clone().filter(|a| !a.is_empty()) {
        return Ok(ProvisionOutcome::AlreadyLinked(ads));
    }
    let campaign = match form.campaign.clone().filter(|c| !c.is_empty()) {
        Some(campaign) => campaign,
        None => {
            return Err(MappingError::CampaignRequired {
                form: form.name.clone(),
            })
        }
    };

    let ads_id = ads_id_for(&form);
    let outcome = match store.find_ads(&ads_id)? {
        Some(existing) => {
            tracing::info!("Ads already exists: {}", existing.ads_name);
            ProvisionOutcome::LinkedExisting(existing.name)
        }
        None => {
            let ads_name = if form.form_name.is_empty() {
                format!("Ads for {}", form.form_id)
            } else {
                form.form_name.clone()
            };
            let ads = store.save_ads(Ads {
                name: ads_id.clone(),
                ads_id,
                ads_name,
                status: form.status.clone(),
                campaign,
                has_lead_form: true,
            })?;
            tracing::info!("New ads created: {}", ads.ads_name);
            ProvisionOutcome::Created(ads.name)
        }
    };

    form.ads = Some(outcome.name().to_string());
    store.save_form(form)?;
    Ok(outcome)
}

/// Copies the form's assignee onto its linked campaign when they differ.
///
/// # Returns
/// `true` if the campaign was updated.
pub fn sync_campaign_assignee(
    store: &dyn DocumentStore,
    form: &FormConfig,
) -> Result<bool, MappingError> {
    let Some(name) = form.campaign.as_deref().filter(|c| !c.is_empty()) else {
        return Ok(false);
    };
    let mut campaign = store.get_campaign(name)?;
    if campaign.assign_to == form.assign_to && campaign.assignee_doctype == form.assignee_doctype
    {
        return Ok(false);
    }

    campaign.assign_to = form.assign_to.clone();
    campaign.assignee_doctype = form.assignee_doctype.clone();
    let campaign = store.save_campaign(campaign)?;
    tracing::info!(
        "Linked campaign {} updated with new assignee details",
        campaign.name
    );
    Ok(true)
}
