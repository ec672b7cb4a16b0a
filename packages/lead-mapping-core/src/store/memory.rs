use std::sync::RwLock;

use super::documents::Documents;
use super::DocumentStore;
use crate::error::MappingError;
use crate::form::{Ads, Campaign, FormConfig};

/// In-memory document store.
#[derive(Debug, Default)]
pub struct MemoryStore {
    documents: RwLock<Documents>,
}

impl MemoryStore {
    /// Creates a new empty store.
    pub fn new() -> Self {
        Self::default()
    }

    fn read(&self) -> Result<std::sync::RwLockReadGuard<'_, Documents>, MappingError> {
        self.documents.read().map_err(|_| MappingError::LockPoisoned)
    }

    fn write(&self) -> Result<std::sync::RwLockWriteGuard<'_, Documents>, MappingError> {
        self.documents.write().map_err(|_| MappingError::LockPoisoned)
    }
}

impl DocumentStore for MemoryStore {
    fn get_form(&self, name: &str) -> Result<FormConfig, MappingError> {
        self.read()?.form(name)
    }

    fn save_form(&self, form: FormConfig) -> Result<FormConfig, MappingError> {
        self.write()?.insert_form(form.clone());
        Ok(form)
    }

    fn form_names(&self) -> Result<Vec<String>, MappingError> {
        Ok(self.read()?.forms.keys().cloned().collect())
    }

    fn get_campaign(&self, name: &str) -> Result<Campaign, MappingError> {
        self.read()?.campaign(name)
    }

    fn find_campaign(&self, campaign_id: &str) -> Result<Option<Campaign>, MappingError> {
        Ok(self.read()?.find_campaign(campaign_id))
    }

    fn save_campaign(&self, campaign: Campaign) -> Result<Campaign, MappingError> {
        self.write()?.insert_campaign(campaign.clone());
        Ok(campaign)
    }

    fn find_ads(&self, ads_id: &str) -> Result<Option<Ads>, MappingError> {
        Ok(self.read()?.find_ads(ads_id))
    }

    fn save_ads(&self, ads: Ads) -> Result<Ads, MappingError> {
        self.write()?.insert_ads(ads.clone());
        Ok(ads)
    }
}
