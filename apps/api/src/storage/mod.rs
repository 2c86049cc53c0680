//! Resume storage: an insertion-ordered in-memory table with a file mirror.
//!
//! Memory is the only read path. Whether a failed mirror write fails the save
//! depends on `PersistenceMode`.

pub mod disk;
pub mod handlers;

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use chrono::Utc;
use thiserror::Error;
use tracing::{info, warn};

use crate::config::PersistenceMode;
use crate::models::resume::{Resume, StoredResume};
use disk::DiskMirror;

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Resume {0} not found")]
    NotFound(String),

    #[error("failed to write {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to serialize resume: {0}")]
    Serialize(#[from] serde_json::Error),
}

#[derive(Default)]
struct Table {
    by_id: HashMap<String, StoredResume>,
    /// Numeric ids, kept sorted so listing follows issue order even when
    /// strict saves finish out of order.
    order: Vec<u64>,
    last_id: u64,
}

impl Table {
    /// Issues the next id: the current epoch millis, bumped past the last
    /// issued id when saves land in the same millisecond.
    fn next_id(&mut self, now_ms: i64) -> u64 {
        let id = next_id_after(self.last_id, now_ms);
        self.last_id = id;
        id
    }

    fn insert(&mut self, id: u64, stored: StoredResume) {
        if self.by_id.insert(stored.id.clone(), stored).is_none() {
            if let Err(pos) = self.order.binary_search(&id) {
                self.order.insert(pos, id);
            }
        }
    }
}

fn next_id_after(last_id: u64, now_ms: i64) -> u64 {
    let now = u64::try_from(now_ms).unwrap_or(0);
    now.max(last_id + 1)
}

/// Process-lifetime resume store, shared by all handlers via `AppState`.
pub struct ResumeStore {
    table: RwLock<Table>,
    mirror: DiskMirror,
    mode: PersistenceMode,
}

impl ResumeStore {
    pub fn new(mirror: DiskMirror, mode: PersistenceMode) -> Self {
        ResumeStore {
            table: RwLock::new(Table::default()),
            mirror,
            mode,
        }
    }

    pub fn mirror(&self) -> &DiskMirror {
        &self.mirror
    }

    pub fn mode(&self) -> PersistenceMode {
        self.mode
    }

    fn read(&self) -> RwLockReadGuard<'_, Table> {
        self.table.read().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn write(&self) -> RwLockWriteGuard<'_, Table> {
        self.table.write().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Assigns an id, stores the resume in memory and mirrors it to disk.
    ///
    /// Best-effort: the in-memory insert always lands; a mirror failure is logged.
    /// Strict: the mirror is written first; on failure memory is left untouched.
    pub async fn save(&self, resume: Resume) -> Result<StoredResume, StorageError> {
        let saved_at = Utc::now();

        let stored = match self.mode {
            PersistenceMode::BestEffort => {
                let stored = {
                    let mut table = self.write();
                    let id = table.next_id(saved_at.timestamp_millis());
                    let stored = StoredResume::new(id.to_string(), resume, saved_at);
                    table.insert(id, stored.clone());
                    stored
                };
                if let Err(e) = self.mirror.write(&stored).await {
                    warn!("Resume {} kept in memory only: {e}", stored.id);
                }
                stored
            }
            PersistenceMode::Strict => {
                // Reserve the id, write the file outside the lock, then insert
                // at the id's sorted position.
                let id = self.write().next_id(saved_at.timestamp_millis());
                let stored = StoredResume::new(id.to_string(), resume, saved_at);
                self.mirror.write(&stored).await?;
                self.write().insert(id, stored.clone());
                stored
            }
        };

        info!("Resume saved with ID: {}", stored.id);
        Ok(stored)
    }

    /// Looks up a resume by id. Never consults the disk mirror.
    pub fn get(&self, id: &str) -> Result<StoredResume, StorageError> {
        self.read()
            .by_id
            .get(id)
            .cloned()
            .ok_or_else(|| StorageError::NotFound(id.to_string()))
    }

    /// All known ids in the order they were issued.
    pub fn list(&self) -> Vec<String> {
        self.read().order.iter().map(u64::to_string).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;
    use std::sync::Arc;

    use crate::models::resume::fixtures::sample_resume;
    use tempfile::TempDir;

    fn store_in(dir: &std::path::Path, mode: PersistenceMode) -> ResumeStore {
        ResumeStore::new(DiskMirror::new(dir.join("saved_resumes")), mode)
    }

    /// Directory path that can never be created: its parent is a regular file.
    fn unwritable_dir(tmp: &TempDir) -> PathBuf {
        let blocker = tmp.path().join("blocker");
        std::fs::write(&blocker, b"file").unwrap();
        blocker.join("saved_resumes")
    }

    #[test]
    fn test_next_id_uses_clock_when_ahead() {
        assert_eq!(next_id_after(100, 250), 250);
    }

    #[test]
    fn test_next_id_bumps_on_same_millisecond() {
        assert_eq!(next_id_after(250, 250), 251);
        assert_eq!(next_id_after(251, 250), 252);
    }

    #[test]
    fn test_next_id_survives_clock_before_epoch() {
        assert_eq!(next_id_after(0, -5), 1);
    }

    #[tokio::test]
    async fn test_save_then_get_returns_same_resume() {
        let tmp = TempDir::new().unwrap();
        let store = store_in(tmp.path(), PersistenceMode::BestEffort);
        let resume = sample_resume();

        let saved = store.save(resume.clone()).await.unwrap();
        let fetched = store.get(&saved.id).unwrap();

        assert_eq!(fetched.data, resume);
        assert_eq!(fetched.version, "1.0");
        assert_eq!(fetched.data.experience[0].company, "Acme");
        assert_eq!(fetched.data.experience[0].position, "Engineer");
    }

    #[tokio::test]
    async fn test_id_is_epoch_millis() {
        let tmp = TempDir::new().unwrap();
        let store = store_in(tmp.path(), PersistenceMode::BestEffort);
        let before = Utc::now().timestamp_millis();

        let saved = store.save(sample_resume()).await.unwrap();

        let id: i64 = saved.id.parse().unwrap();
        assert!(id >= before, "id {id} earlier than {before}");
        assert!(saved.saved_at.timestamp_millis() <= id);
    }

    #[tokio::test]
    async fn test_get_unknown_id_is_not_found() {
        let tmp = TempDir::new().unwrap();
        let store = store_in(tmp.path(), PersistenceMode::BestEffort);
        store.save(sample_resume()).await.unwrap();

        for id in ["does-not-exist", "0", "9999999999999", ""] {
            assert!(matches!(store.get(id), Err(StorageError::NotFound(_))));
        }
    }

    #[tokio::test]
    async fn test_list_returns_ids_in_save_order() {
        let tmp = TempDir::new().unwrap();
        let store = store_in(tmp.path(), PersistenceMode::BestEffort);
        assert!(store.list().is_empty());

        let mut saved_ids = Vec::new();
        for _ in 0..5 {
            saved_ids.push(store.save(sample_resume()).await.unwrap().id);
        }

        assert_eq!(store.list(), saved_ids);
        assert_eq!(store.list().len(), 5);
    }

    #[tokio::test]
    async fn test_rapid_saves_get_unique_increasing_ids() {
        let tmp = TempDir::new().unwrap();
        let store = store_in(tmp.path(), PersistenceMode::BestEffort);

        let mut ids = Vec::new();
        for _ in 0..50 {
            ids.push(store.save(sample_resume()).await.unwrap().id.parse::<u64>().unwrap());
        }

        assert!(ids.windows(2).all(|w| w[0] < w[1]), "ids not increasing: {ids:?}");
    }

    #[tokio::test]
    async fn test_save_mirrors_file() {
        let tmp = TempDir::new().unwrap();
        let store = store_in(tmp.path(), PersistenceMode::BestEffort);

        let saved = store.save(sample_resume()).await.unwrap();

        let path = store.mirror().path_for(&saved.id);
        let on_disk: StoredResume =
            serde_json::from_str(&std::fs::read_to_string(path).unwrap()).unwrap();
        assert_eq!(on_disk, saved);
    }

    #[tokio::test]
    async fn test_best_effort_keeps_memory_when_mirror_fails() {
        let tmp = TempDir::new().unwrap();
        let store = ResumeStore::new(
            DiskMirror::new(unwritable_dir(&tmp)),
            PersistenceMode::BestEffort,
        );

        let saved = store.save(sample_resume()).await.unwrap();

        assert!(store.get(&saved.id).is_ok());
        assert_eq!(store.list(), vec![saved.id]);
    }

    #[tokio::test]
    async fn test_strict_fails_and_leaves_memory_untouched() {
        let tmp = TempDir::new().unwrap();
        let store = ResumeStore::new(
            DiskMirror::new(unwritable_dir(&tmp)),
            PersistenceMode::Strict,
        );

        let err = store.save(sample_resume()).await.unwrap_err();

        assert!(matches!(err, StorageError::Io { .. }), "got: {err:?}");
        assert!(store.list().is_empty());
    }

    #[tokio::test]
    async fn test_strict_succeeds_with_writable_dir() {
        let tmp = TempDir::new().unwrap();
        let store = store_in(tmp.path(), PersistenceMode::Strict);

        let saved = store.save(sample_resume()).await.unwrap();

        assert!(store.mirror().path_for(&saved.id).exists());
        assert_eq!(store.get(&saved.id).unwrap(), saved);
    }

    #[test]
    fn test_insert_out_of_order_keeps_issue_order() {
        let mut table = Table::default();
        for id in [30_u64, 10, 20] {
            let stored = StoredResume::new(id.to_string(), sample_resume(), Utc::now());
            table.insert(id, stored);
        }
        assert_eq!(table.order, vec![10, 20, 30]);
    }

    async fn save_concurrently(store: Arc<ResumeStore>, saves: usize) -> Vec<String> {
        let handles: Vec<_> = (0..saves)
            .map(|_| {
                let store = Arc::clone(&store);
                tokio::spawn(async move { store.save(sample_resume()).await })
            })
            .collect();

        let mut ids = Vec::with_capacity(saves);
        for handle in handles {
            ids.push(handle.await.unwrap().unwrap().id);
        }
        ids
    }

    async fn assert_concurrent_saves_consistent(mode: PersistenceMode) {
        const SAVES: usize = 200;
        let tmp = TempDir::new().unwrap();
        let store = Arc::new(store_in(tmp.path(), mode));

        let ids = save_concurrently(Arc::clone(&store), SAVES).await;

        let unique: HashSet<&String> = ids.iter().collect();
        assert_eq!(unique.len(), SAVES, "{mode:?}: duplicate ids issued");

        let listed = store.list();
        assert_eq!(listed.len(), SAVES, "{mode:?}: list length");

        let mut issued: Vec<u64> = ids.iter().map(|id| id.parse().unwrap()).collect();
        issued.sort_unstable();
        let listed_numeric: Vec<u64> = listed.iter().map(|id| id.parse().unwrap()).collect();
        assert_eq!(listed_numeric, issued, "{mode:?}: list not in issue order");

        for id in &ids {
            assert!(store.get(id).is_ok(), "{mode:?}: {id} missing");
        }
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_best_effort_saves_unique_and_ordered() {
        assert_concurrent_saves_consistent(PersistenceMode::BestEffort).await;
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_strict_saves_unique_and_ordered() {
        assert_concurrent_saves_consistent(PersistenceMode::Strict).await;
    }
}
