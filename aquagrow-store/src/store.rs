//! RecordStore - the document-backed repository.
//!
//! Every call is a full load of the document from the storage port,
//! an in-memory edit, and (for mutations) one full save. Calls on a store
//! are serialized by an async mutex so overlapping load/save sequences
//! cannot drop each other's writes.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::marker::PhantomData;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{debug, error, info, warn};

use crate::error::{Result, StoreError};
use crate::id::IdGenerator;
use crate::model::{CompanyInfo, Document, Farmer, Investor, StoreSummary, TeamMember};
use crate::record::Record;
use crate::seed;
use crate::storage::StoragePort;

/// What to do when the persisted document cannot be decoded.
///
/// Both policies copy the raw payload to a backup slot first.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CorruptionPolicy {
    /// Replace the document with the seed and carry on
    #[default]
    Reseed,
    /// Fail the load with [`StoreError::DataCorrupted`]
    Fail,
}

/// Store configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreConfig {
    /// Storage slot holding the document
    #[serde(default = "default_storage_key")]
    pub storage_key: String,

    #[serde(default)]
    pub corruption_policy: CorruptionPolicy,

    /// Optional JSON seed file tried before the embedded seed
    #[serde(default)]
    pub seed_path: Option<PathBuf>,
}

fn default_storage_key() -> String {
    "aquaGrowDb".to_string()
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            storage_key: default_storage_key(),
            corruption_policy: CorruptionPolicy::default(),
            seed_path: None,
        }
    }
}

/// Repository over the persisted document.
pub struct RecordStore {
    storage: Arc<dyn StoragePort>,
    config: StoreConfig,
    ids: IdGenerator,
    lock: Mutex<()>,
}

impl RecordStore {
    /// Create a store over `storage` with default configuration.
    pub fn new(storage: Arc<dyn StoragePort>) -> Self {
        Self {
            storage,
            config: StoreConfig::default(),
            ids: IdGenerator::new(),
            lock: Mutex::new(()),
        }
    }

    /// Create with configuration.
    pub fn with_config(mut self, config: StoreConfig) -> Self {
        self.config = config;
        self
    }

    pub fn config(&self) -> &StoreConfig {
        &self.config
    }

    /// Prefix shared by all corruption backup keys of this store.
    pub fn backup_prefix(&self) -> String {
        format!("{}_corrupted_backup_", self.config.storage_key)
    }

    /// Load the document, seeding or recovering it as needed.
    pub async fn load_document(&self) -> Result<Document> {
        let _guard = self.lock.lock().await;
        self.load().await
    }

    /// Overwrite the persisted document.
    pub async fn save_document(&self, doc: &mut Document) -> Result<()> {
        let _guard = self.lock.lock().await;
        self.save(doc).await
    }

    /// Keys of every corruption backup written so far.
    pub async fn backups(&self) -> Result<Vec<String>> {
        Ok(self.storage.keys_with_prefix(&self.backup_prefix()).await?)
    }

    pub fn farmers(&self) -> Collection<'_, Farmer> {
        Collection::new(self)
    }

    pub fn investors(&self) -> Collection<'_, Investor> {
        Collection::new(self)
    }

    pub fn team_members(&self) -> Collection<'_, TeamMember> {
        Collection::new(self)
    }

    /// Current company info.
    pub async fn company_info(&self) -> Result<CompanyInfo> {
        Ok(self.load_document().await?.company_info)
    }

    /// Replace the company info wholesale.
    pub async fn replace_company_info(&self, info: CompanyInfo) -> Result<CompanyInfo> {
        let _guard = self.lock.lock().await;
        let mut doc = self.load().await?;
        doc.company_info = info.clone();
        self.save(&mut doc).await?;
        info!("Company info replaced");
        Ok(info)
    }

    /// Totals for the admin overview.
    pub async fn summary(&self) -> Result<StoreSummary> {
        Ok(StoreSummary::of(&self.load_document().await?))
    }

    async fn load(&self) -> Result<Document> {
        let key = &self.config.storage_key;

        let Some(raw) = self.storage.get(key).await? else {
            info!(key = %key, "No stored document found, seeding");
            let mut doc = seed::resolve_seed(self.config.seed_path.as_deref()).await;
            if let Err(e) = self.save(&mut doc).await {
                error!(key = %key, error = %e, "Could not persist seed document");
            }
            return Ok(doc);
        };

        match decode_document(&raw) {
            Ok(doc) => Ok(doc),
            Err(reason) => {
                warn!(key = %key, reason = %reason, "Stored document is corrupted");
                let backup_key = self.quarantine(&raw).await?;

                match self.config.corruption_policy {
                    CorruptionPolicy::Fail => Err(StoreError::DataCorrupted { backup_key }),
                    CorruptionPolicy::Reseed => {
                        let mut doc = seed::resolve_seed(self.config.seed_path.as_deref()).await;
                        self.save(&mut doc).await?;
                        info!(key = %key, backup_key = %backup_key, "Reseeded after corruption");
                        Ok(doc)
                    }
                }
            }
        }
    }

    async fn save(&self, doc: &mut Document) -> Result<()> {
        doc.version += 1;
        let json = serde_json::to_string(doc)?;
        self.storage.set(&self.config.storage_key, &json).await?;
        debug!(version = doc.version, bytes = json.len(), "Document saved");
        Ok(())
    }

    /// Copy a corrupted payload to a timestamped backup slot.
    ///
    /// A payload already held by an existing backup is not copied again.
    async fn quarantine(&self, raw: &str) -> Result<String> {
        let prefix = self.backup_prefix();
        for existing in self.storage.keys_with_prefix(&prefix).await? {
            if self.storage.get(&existing).await?.as_deref() == Some(raw) {
                debug!(backup_key = %existing, "Corrupted document already backed up");
                return Ok(existing);
            }
        }

        let mut stamp = chrono::Utc::now().timestamp_millis();
        while self.storage.get(&format!("{}{}", prefix, stamp)).await?.is_some() {
            stamp += 1;
        }

        let backup_key = format!("{}{}", prefix, stamp);
        self.storage.set(&backup_key, raw).await?;
        warn!(backup_key = %backup_key, bytes = raw.len(), "Corrupted document backed up");
        Ok(backup_key)
    }

    fn today() -> String {
        chrono::Utc::now().format("%Y-%m-%d").to_string()
    }
}

/// Decode a stored payload, describing why it is unusable on failure.
fn decode_document(raw: &str) -> std::result::Result<Document, String> {
    let value: Value = serde_json::from_str(raw).map_err(|e| format!("not valid JSON: {}", e))?;

    for member in ["farmers", "investors", "teamMembers"] {
        if !value.get(member).is_some_and(Value::is_array) {
            return Err(format!("member '{}' is missing or not an array", member));
        }
    }
    if !value.get("companyInfo").is_some_and(Value::is_object) {
        return Err("member 'companyInfo' is missing or not an object".to_string());
    }

    serde_json::from_value(value).map_err(|e| format!("records do not decode: {}", e))
}

/// CRUD handle for one collection of a [`RecordStore`].
pub struct Collection<'a, R: Record> {
    store: &'a RecordStore,
    _record: PhantomData<R>,
}

impl<'a, R: Record> Collection<'a, R> {
    fn new(store: &'a RecordStore) -> Self {
        Self {
            store,
            _record: PhantomData,
        }
    }

    /// All records, newest first.
    pub async fn list(&self) -> Result<Vec<R>> {
        let doc = self.store.load_document().await?;
        let records = R::collection(&doc).clone();
        debug!(kind = R::KIND, count = records.len(), "Listed records");
        Ok(records)
    }

    /// One record by id.
    pub async fn get(&self, id: &str) -> Result<R> {
        let doc = self.store.load_document().await?;
        R::collection(&doc)
            .iter()
            .find(|r| r.id() == id)
            .cloned()
            .ok_or_else(|| StoreError::NotFound {
                kind: R::KIND,
                id: id.to_string(),
            })
    }

    /// Create a record from a draft and put it at the front.
    pub async fn create(&self, draft: R::Draft) -> Result<R> {
        let _guard = self.store.lock.lock().await;
        let mut doc = self.store.load().await?;

        let id = loop {
            let candidate = self.store.ids.next_id(R::ID_PREFIX);
            if !R::collection(&doc).iter().any(|r| r.id() == candidate) {
                break candidate;
            }
        };

        let record = R::from_draft(draft, id, &RecordStore::today());
        record.validate()?;

        R::collection_mut(&mut doc).insert(0, record.clone());
        self.store.save(&mut doc).await?;

        info!(kind = R::KIND, id = %record.id(), "Record created");
        Ok(record)
    }

    /// Replace the record with the same id, keeping its position.
    pub async fn update(&self, mut record: R) -> Result<R> {
        record.validate()?;

        let _guard = self.store.lock.lock().await;
        let mut doc = self.store.load().await?;

        let slot = R::collection_mut(&mut doc)
            .iter_mut()
            .find(|r| r.id() == record.id())
            .ok_or_else(|| StoreError::NotFound {
                kind: R::KIND,
                id: record.id().to_string(),
            })?;
        record.retain_immutable(slot);
        *slot = record.clone();

        self.store.save(&mut doc).await?;

        info!(kind = R::KIND, id = %record.id(), "Record updated");
        Ok(record)
    }

    /// Remove the record with `id`.
    pub async fn delete(&self, id: &str) -> Result<()> {
        let _guard = self.store.lock.lock().await;
        let mut doc = self.store.load().await?;

        let records = R::collection_mut(&mut doc);
        let before = records.len();
        records.retain(|r| r.id() != id);

        if records.len() == before {
            return Err(StoreError::NotFoundForDeletion {
                kind: R::KIND,
                id: id.to_string(),
            });
        }

        self.store.save(&mut doc).await?;
        info!(kind = R::KIND, id = %id, "Record deleted");
        Ok(())
    }
}
