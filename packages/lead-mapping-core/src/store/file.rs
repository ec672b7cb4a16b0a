//! JSON file-backed document store.

use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::RwLock;

use crc32fast::Hasher;
use serde::{Deserialize, Serialize};

use super::documents::Documents;
use super::io_utils::{classify_io_error, SaveRetry};
use super::DocumentStore;
use crate::config::MappingConfig;
use crate::error::MappingError;
use crate::form::{Ads, Campaign, FormConfig};

/// File name of the store inside the data directory.
pub const STORE_FILE_NAME: &str = "store.json";

const STORE_FILE_VERSION: u32 = 1;

/// Store file format.
#[derive(Debug, Serialize, Deserialize)]
pub struct StoreFile {
    /// Store format version
    pub version: u32,
    /// CRC32 of the serialized documents
    pub checksum: u32,
    pub documents: Documents,
}

/// Document store persisted as a single JSON file.
///
/// Every save rewrites the file through a temp file and an atomic rename.
/// The in-memory copy only changes after the file write succeeded.
#[derive(Debug)]
pub struct FileStore {
    data_dir: PathBuf,
    documents: RwLock<Documents>,
    retry: SaveRetry,
}

impl FileStore {
    /// Opens the store in `config.data_dir`, loading existing documents.
    ///
    /// A missing store file yields an empty store.
    pub fn open(config: &MappingConfig) -> Result<Self, MappingError> {
        let documents = load_documents(&config.data_dir.join(STORE_FILE_NAME))?;
        tracing::debug!(
            "Opened store in {} ({} forms, {} campaigns, {} ads)",
            config.data_dir.display(),
            documents.forms.len(),
            documents.campaigns.len(),
            documents.ads.len()
        );
        Ok(Self {
            data_dir: config.data_dir.clone(),
            documents: RwLock::new(documents),
            retry: SaveRetry::from_config(config),
        })
    }

    /// Path of the store file.
    pub fn path(&self) -> PathBuf {
        self.data_dir.join(STORE_FILE_NAME)
    }

    fn read(&self) -> Result<std::sync::RwLockReadGuard<'_, Documents>, MappingError> {
        self.documents.read().map_err(|_| MappingError::LockPoisoned)
    }

    /// Applies `change` to a copy of the documents, persists it, then publishes it.
    fn update<F>(&self, context: &str, change: F) -> Result<(), MappingError>
    where
        F: FnOnce(&mut Documents),
    {
        let mut documents = self
            .documents
            .write()
            .map_err(|_| MappingError::LockPoisoned)?;
        let mut next = documents.clone();
        change(&mut next);

        self.retry.run(context, || self.write_documents(&next))?;

        *documents = next;
        Ok(())
    }

    fn write_documents(&self, documents: &Documents) -> Result<(), MappingError> {
        let store = StoreFile {
            version: STORE_FILE_VERSION,
            checksum: checksum(documents)?,
            documents: documents.clone(),
        };
        let json = serde_json::to_string_pretty(&store)
            .map_err(|e| MappingError::SerializationError(e.to_string()))?;

        let temp_path = self.data_dir.join(format!("{}.tmp", STORE_FILE_NAME));
        let final_path = self.path();

        fs::create_dir_all(&self.data_dir)
            .map_err(|e| classify_io_error(e, "Failed to create data directory"))?;

        let mut file = File::create(&temp_path)
            .map_err(|e| classify_io_error(e, "Failed to create temp file"))?;
        file.write_all(json.as_bytes())
            .map_err(|e| classify_io_error(e, "Failed to write store"))?;
        file.sync_all()
            .map_err(|e| classify_io_error(e, "Failed to sync store"))?;

        fs::rename(&temp_path, &final_path)
            .map_err(|e| classify_io_error(e, "Failed to rename store file"))?;

        Ok(())
    }
}

impl DocumentStore for FileStore {
    fn get_form(&self, name: &str) -> Result<FormConfig, MappingError> {
        self.read()?.form(name)
    }

    fn save_form(&self, form: FormConfig) -> Result<FormConfig, MappingError> {
        let stored = form.clone();
        self.update("save_form", |docs| docs.insert_form(form))?;
        Ok(stored)
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
        let stored = campaign.clone();
        self.update("save_campaign", |docs| docs.insert_campaign(campaign))?;
        Ok(stored)
    }

    fn find_ads(&self, ads_id: &str) -> Result<Option<Ads>, MappingError> {
        Ok(self.read()?.find_ads(ads_id))
    }

    fn save_ads(&self, ads: Ads) -> Result<Ads, MappingError> {
        let stored = ads.clone();
        self.update("save_ads", |docs| docs.insert_ads(ads))?;
        Ok(stored)
    }
}

fn checksum(documents: &Documents) -> Result<u32, MappingError> {
    let bytes =
        serde_json::to_vec(documents).map_err(|e| MappingError::SerializationError(e.to_string()))?;
    let mut hasher = Hasher::new();
    hasher.update(&bytes);
    Ok(hasher.finalize())
}

fn load_documents(path: &Path) -> Result<Documents, MappingError> {
    if !path.exists() {
        return Ok(Documents::default());
    }

    let contents = fs::read_to_string(path)
        .map_err(|e| classify_io_error(e, "Failed to read store file"))?;
    let store: StoreFile = serde_json::from_str(&contents)
        .map_err(|e| MappingError::SerializationError(format!("Failed to parse store: {}", e)))?;

    if store.version != STORE_FILE_VERSION {
        return Err(MappingError::SerializationError(format!(
            "Unsupported store version: {}",
            store.version
        )));
    }

    let actual = checksum(&store.documents)?;
    if actual != store.checksum {
        return Err(MappingError::DataCorruption(format!(
            "Store checksum mismatch in {}: stored {:08x}, calculated {:08x}",
            path.display(),
            store.checksum,
            actual
        )));
    }

    Ok(store.documents)
}
