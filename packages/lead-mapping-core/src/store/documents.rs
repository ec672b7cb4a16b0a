use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::MappingError;
use crate::form::{Ads, Campaign, FormConfig};

/// All stored documents, keyed by document name.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Documents {
    #[serde(default)]
    pub forms: BTreeMap<String, FormConfig>,
    #[serde(default)]
    pub campaigns: BTreeMap<String, Campaign>,
    #[serde(default)]
    pub ads: BTreeMap<String, Ads>,
}

impl Documents {
    pub fn form(&self, name: &str) -> Result<FormConfig, MappingError> {
        self.forms
            .get(name)
            .cloned()
            .ok_or_else(|| MappingError::FormNotFound {
                form: name.to_string(),
            })
    }

    pub fn campaign(&self, name: &str) -> Result<Campaign, MappingError> {
        self.campaigns
            .get(name)
            .cloned()
            .ok_or_else(|| MappingError::CampaignNotFound {
                campaign: name.to_string(),
            })
    }

    pub fn find_campaign(&self, campaign_id: &str) -> Option<Campaign> {
        self.campaigns
            .values()
            .find(|c| c.campaign_id == campaign_id)
            .cloned()
    }

    pub fn find_ads(&self, ads_id: &str) -> Option<Ads> {
        self.ads.values().find(|a| a.ads_id == ads_id).cloned()
    }

    pub(crate) fn insert_form(&mut self, form: FormConfig) {
        self.forms.insert(form.name.clone(), form);
    }

    pub(crate) fn insert_campaign(&mut self, campaign: Campaign) {
        self.campaigns.insert(campaign.name.clone(), campaign);
    }

    pub(crate) fn insert_ads(&mut self, ads: Ads) {
        self.ads.insert(ads.name.clone(), ads);
    }
}
