//! Document store: persistence seam for forms, campaigns and ads.

mod documents;
mod file;
mod io_utils;
mod memory;


pub use documents::Documents;
pub use file::{FileStore, StoreFile, STORE_FILE_NAME};
pub use io_utils::{classify_io_error, SaveRetry};
pub use memory::MemoryStore;

use crate::error::MappingError;
use crate::form::{Ads, Campaign, FormConfig};

/// Persistence for form configurations and provisioned documents.
///
/// `save_*` replaces the whole document and returns it as stored.
pub trait DocumentStore {
    fn get_form(&self, name: &str) -> Result<FormConfig, MappingError>;
    fn save_form(&self, form: FormConfig) -> Result<FormConfig, MappingError>;
    fn form_names(&self) -> Result<Vec<String>, MappingError>;

    fn get_campaign(&self, name: &str) -> Result<Campaign, MappingError>;
    /// Looks a campaign up by its ad-platform campaign id.
    fn find_campaign(&self, campaign_id: &str) -> Result<Option<Campaign>, MappingError>;
    fn save_campaign(&self, campaign: Campaign) -> Result<Campaign, MappingError>;

    /// Looks ads up by their ad-platform ads id.
    fn find_ads(&self, ads_id: &str) -> Result<Option<Ads>, MappingError>;
    fn save_ads(&self, ads: Ads) -> Result<Ads, MappingError>;
}
