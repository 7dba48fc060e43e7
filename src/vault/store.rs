//! The vault: an ordered, id-unique collection of saved simulations
//!
//! Every read parses the whole blob and every mutation rewrites it in full.
//! There is no update operation; records are append or delete only.

use std::collections::HashSet;

use chrono::NaiveDate;
use log::{info, warn};
use serde_json::Value;

use super::ids::IdGenerator;
use super::record::{default_title, RecordId, VaultRecord};
use super::storage::StoragePort;
use crate::error::{VaultError, VaultResult};
use crate::projection::DualProjection;

/// What happened to a delete request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeleteOutcome {
    Deleted,
    /// The confirmation step said no; nothing changed
    Declined,
    NotFound,
}

pub struct VaultStore<S: StoragePort> {
    storage: S,
    ids: IdGenerator,
}

impl<S: StoragePort> VaultStore<S> {
    pub fn new(storage: S) -> Self {
        Self {
            storage,
            ids: IdGenerator::new(),
        }
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    pub fn into_inner(self) -> S {
        self.storage
    }

    /// Every readable record in insertion order.
    ///
    /// A missing, unreadable or unparseable blob reads as an empty vault.
    /// Records that fail the schema, and repeats of an id already seen, are
    /// skipped with a warning.
    pub fn load_all(&self) -> Vec<VaultRecord> {
        let blob = match self.storage.read() {
            Ok(Some(blob)) => blob,
            Ok(None) => return Vec::new(),
            Err(e) => {
                warn!("Vault storage unreadable, treating as empty: {}", e);
                return Vec::new();
            }
        };

        let entries: Vec<Value> = match serde_json::from_str(&blob) {
            Ok(entries) => entries,
            Err(e) => {
                warn!("Vault blob is corrupt, treating as empty: {}", e);
                return Vec::new();
            }
        };

        let mut seen = HashSet::new();
        let mut records = Vec::with_capacity(entries.len());

        for (index, entry) in entries.into_iter().enumerate() {
            let record: VaultRecord = match serde_json::from_value(entry) {
                Ok(record) => record,
                Err(e) => {
                    warn!("Skipping vault entry {}: {}", index, e);
                    continue;
                }
            };
            if let Err(e) = record.validate() {
                warn!("Skipping vault entry {}: {}", index, e);
                continue;
            }
            if !seen.insert(record.id) {
                warn!("Skipping vault entry {}: duplicate id {}", index, record.id);
                continue;
            }
            records.push(record);
        }

        records
    }

    pub fn get(&self, id: RecordId) -> Option<VaultRecord> {
        self.load_all().into_iter().find(|r| r.id == id)
    }

    /// Append a record and rewrite the blob
    pub fn save(&mut self, record: VaultRecord) -> VaultResult<()> {
        record.validate()?;

        let mut records = self.load_all();
        if records.iter().any(|r| r.id == record.id) {
            return Err(VaultError::DuplicateId(record.id));
        }

        let id = record.id;
        self.ids.observe(id);
        records.push(record);
        self.persist(&records)?;

        info!("Saved vault record {} ({} records)", id, records.len());
        Ok(())
    }

    /// Snapshot a simulation under a fresh id.
    ///
    /// Without a title the record is named after its horizon.
    pub fn save_projection(
        &mut self,
        title: Option<String>,
        projection: &DualProjection,
        created_date: NaiveDate,
    ) -> VaultResult<VaultRecord> {
        for existing in self.load_all() {
            self.ids.observe(existing.id);
        }

        let title = title
            .filter(|t| !t.trim().is_empty())
            .unwrap_or_else(|| default_title(projection.years));
        let record = VaultRecord::from_projection(self.ids.next(), title, created_date, projection);

        self.save(record.clone())?;
        Ok(record)
    }

    /// Remove a record. Returns `false`, without writing, if the id is absent.
    pub fn delete(&mut self, id: RecordId) -> VaultResult<bool> {
        let mut records = self.load_all();
        let before = records.len();
        records.retain(|r| r.id != id);

        if records.len() == before {
            return Ok(false);
        }

        self.persist(&records)?;
        info!("Deleted vault record {} ({} remaining)", id, records.len());
        Ok(true)
    }

    /// Remove a record only if `confirm` approves it
    pub fn delete_confirmed<F>(&mut self, id: RecordId, confirm: F) -> VaultResult<DeleteOutcome>
    where
        F: FnOnce(&VaultRecord) -> bool,
    {
        let record = match self.get(id) {
            Some(record) => record,
            None => return Ok(DeleteOutcome::NotFound),
        };

        if !confirm(&record) {
            return Ok(DeleteOutcome::Declined);
        }

        if self.delete(id)? {
            Ok(DeleteOutcome::Deleted)
        } else {
            Ok(DeleteOutcome::NotFound)
        }
    }

    fn persist(&mut self, records: &[VaultRecord]) -> VaultResult<()> {
        let blob = serde_json::to_string(records)?;
        self.storage.write(&blob)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::StorageError;
    use crate::projection::simulate_dual;
    use crate::vault::storage::{FileStorage, MemoryStorage};

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 5, 1).unwrap()
    }

    fn record(id: i64, years: u32) -> VaultRecord {
        let dual = simulate_dual(60_000.0, 500.0, years);
        VaultRecord::from_projection(RecordId(id), default_title(years), date(), &dual)
    }

    fn ids(records: &[VaultRecord]) -> Vec<i64> {
        records.iter().map(|r| r.id.0).collect()
    }

    /// Storage whose every operation fails
    struct BrokenStorage;

    impl StoragePort for BrokenStorage {
        fn read(&self) -> Result<Option<String>, StorageError> {
            Err(StorageError::Unavailable("disabled".to_string()))
        }

        fn write(&mut self, _blob: &str) -> Result<(), StorageError> {
            Err(StorageError::Unavailable("disabled".to_string()))
        }
    }

    #[test]
    fn test_empty_vault() {
        let store = VaultStore::new(MemoryStorage::new());
        assert!(store.load_all().is_empty());
    }

    #[test]
    fn test_save_then_load() {
        let mut store = VaultStore::new(MemoryStorage::new());
        let saved = record(1, 5);

        store.save(saved.clone()).unwrap();

        assert_eq!(store.load_all(), vec![saved.clone()]);
        assert_eq!(store.get(RecordId(1)), Some(saved));
    }

    #[test]
    fn test_delete_removes_record() {
        let mut store = VaultStore::new(MemoryStorage::new());
        store.save(record(1, 5)).unwrap();

        assert!(store.delete(RecordId(1)).unwrap());
        assert!(store.load_all().is_empty());
        assert_eq!(store.get(RecordId(1)), None);
    }

    #[test]
    fn test_delete_missing_id_is_noop() {
        let mut store = VaultStore::new(MemoryStorage::new());
        store.save(record(1, 2)).unwrap();
        let before = store.storage().blob().map(str::to_string);

        assert!(!store.delete(RecordId(99)).unwrap());
        assert_eq!(store.storage().blob().map(str::to_string), before);
        assert_eq!(ids(&store.load_all()), vec![1]);
    }

    #[test]
    fn test_insertion_order_survives_cycles() {
        let mut store = VaultStore::new(MemoryStorage::new());
        for id in [30, 10, 20, 40] {
            store.save(record(id, 1)).unwrap();
        }
        store.delete(RecordId(10)).unwrap();
        store.save(record(5, 1)).unwrap();
        store.delete(RecordId(40)).unwrap();
        store.save(record(50, 1)).unwrap();

        assert_eq!(ids(&store.load_all()), vec![30, 20, 5, 50]);
    }

    #[test]
    fn test_load_all_is_idempotent() {
        let mut store = VaultStore::new(MemoryStorage::new());
        store.save(record(1, 3)).unwrap();
        store.save(record(2, 4)).unwrap();

        assert_eq!(store.load_all(), store.load_all());
    }

    #[test]
    fn test_duplicate_id_is_rejected() {
        let mut store = VaultStore::new(MemoryStorage::new());
        store.save(record(1, 3)).unwrap();

        let err = store.save(record(1, 4)).unwrap_err();
        assert!(matches!(err, VaultError::DuplicateId(RecordId(1))));
        assert_eq!(store.load_all().len(), 1);
    }

    #[test]
    fn test_invalid_record_is_rejected() {
        let mut store = VaultStore::new(MemoryStorage::new());
        let mut bad = record(1, 3);
        bad.year_labels.clear();

        assert!(matches!(store.save(bad), Err(VaultError::InvalidRecord(_))));
        assert_eq!(store.storage().blob(), None);
    }

    #[test]
    fn test_corrupt_blob_reads_as_empty() {
        for blob in ["not json", "{\"id\": 1}", "", "[1, 2"] {
            let store = VaultStore::new(MemoryStorage::with_blob(blob));
            assert!(store.load_all().is_empty(), "blob {:?}", blob);
        }
    }

    #[test]
    fn test_malformed_entries_are_skipped() {
        let good = serde_json::to_value(record(2, 1)).unwrap();
        let mut short = serde_json::to_value(record(3, 2)).unwrap();
        short["tfsaSeries"] = serde_json::json!([1.0]);
        let repeat = serde_json::to_value(record(2, 3)).unwrap();

        let blob = serde_json::json!([{"id": 1, "title": "partial"}, good, short, repeat]).to_string();
        let store = VaultStore::new(MemoryStorage::with_blob(blob));

        let loaded = store.load_all();
        assert_eq!(ids(&loaded), vec![2]);
        assert_eq!(loaded[0].years, 1);
    }

    #[test]
    fn test_unreadable_storage_reads_as_empty() {
        let store = VaultStore::new(BrokenStorage);
        assert!(store.load_all().is_empty());
        assert_eq!(store.get(RecordId(1)), None);
    }

    #[test]
    fn test_write_failure_is_reported() {
        let mut store = VaultStore::new(BrokenStorage);
        let err = store.save(record(1, 1)).unwrap_err();
        assert!(matches!(err, VaultError::Storage(StorageError::Unavailable(_))));
    }

    #[test]
    fn test_quota_failure_leaves_vault_unchanged() {
        let mut store = VaultStore::new(MemoryStorage::new().with_quota(600));
        store.save(record(1, 1)).unwrap();

        let err = store.save(record(2, 30)).unwrap_err();
        assert!(matches!(err, VaultError::Storage(StorageError::QuotaExceeded { .. })));
        assert_eq!(ids(&store.load_all()), vec![1]);
    }

    #[test]
    fn test_save_projection_assigns_unique_ids() {
        let mut store = VaultStore::new(MemoryStorage::new());
        let dual = simulate_dual(90_000.0, 300.0, 4);

        let a = store.save_projection(None, &dual, date()).unwrap();
        let b = store.save_projection(Some("Retire early".to_string()), &dual, date()).unwrap();
        let c = store.save_projection(Some("   ".to_string()), &dual, date()).unwrap();

        assert!(a.id < b.id && b.id < c.id);
        assert_eq!(a.title, "TFSA vs RRSP - 4 Years");
        assert_eq!(b.title, "Retire early");
        assert_eq!(c.title, a.title);
        assert_eq!(store.load_all(), vec![a, b, c]);
    }

    #[test]
    fn test_save_projection_ids_follow_existing_records() {
        let far_future = i64::MAX / 2;
        let blob = serde_json::to_string(&[record(far_future, 1)]).unwrap();
        let mut store = VaultStore::new(MemoryStorage::with_blob(blob));

        let saved = store
            .save_projection(None, &simulate_dual(40_000.0, 100.0, 1), date())
            .unwrap();
        assert_eq!(saved.id, RecordId(far_future + 1));
    }

    #[test]
    fn test_fractional_years_record_survives_next_save() {
        let blob = serde_json::json!([{
            "id": 1714521600000_i64,
            "title": "TFSA vs RRSP – 2.5 Years",
            "income": 60000,
            "monthly": 500,
            "years": 2.5,
            "created": "2024-05-01",
            "tfsaData": [6167.93, 12651.22],
            "rrspData": [7709.91, 15814.03],
            "labels": ["Year 1", "Year 2"]
        }])
        .to_string();
        let mut store = VaultStore::new(MemoryStorage::with_blob(blob));

        let loaded = store.load_all();
        assert_eq!(ids(&loaded), vec![1714521600000]);
        assert_eq!(loaded[0].years, 2);

        let saved = store
            .save_projection(None, &simulate_dual(60_000.0, 500.0, 3), date())
            .unwrap();

        let after = store.load_all();
        assert_eq!(ids(&after), vec![1714521600000, saved.id.0]);
        assert_eq!(after[0].years, 2);
        assert_eq!(after[0].tfsa_series, vec![6167.93, 12651.22]);
    }

    #[test]
    fn test_negative_contribution_is_not_saved() {
        let mut store = VaultStore::new(MemoryStorage::new());
        let mut bad = record(1, 2);
        bad.monthly_contribution = -100.0;

        assert!(matches!(store.save(bad), Err(VaultError::InvalidRecord(_))));
        assert_eq!(store.storage().blob(), None);
    }

    #[test]
    fn test_delete_confirmed() {
        let mut store = VaultStore::new(MemoryStorage::new());
        store.save(record(1, 2)).unwrap();

        let declined = store.delete_confirmed(RecordId(1), |_| false).unwrap();
        assert_eq!(declined, DeleteOutcome::Declined);
        assert_eq!(store.load_all().len(), 1);

        let missing = store.delete_confirmed(RecordId(2), |_| true).unwrap();
        assert_eq!(missing, DeleteOutcome::NotFound);

        let deleted = store
            .delete_confirmed(RecordId(1), |r| r.title.contains("2 Years"))
            .unwrap();
        assert_eq!(deleted, DeleteOutcome::Deleted);
        assert!(store.load_all().is_empty());
    }

    #[test]
    fn test_file_backed_vault_persists_across_stores() {
        let dir = tempfile::tempdir().unwrap();

        let mut store = VaultStore::new(FileStorage::in_dir(dir.path()));
        store.save(record(1, 2)).unwrap();
        store.save(record(2, 3)).unwrap();
        drop(store);

        let mut reopened = VaultStore::new(FileStorage::in_dir(dir.path()));
        assert_eq!(ids(&reopened.load_all()), vec![1, 2]);

        reopened.delete(RecordId(1)).unwrap();
        let again = VaultStore::new(FileStorage::in_dir(dir.path()));
        assert_eq!(ids(&again.load_all()), vec![2]);
    }
}
