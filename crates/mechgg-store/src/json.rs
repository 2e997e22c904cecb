//! JSON-file store for the local CLI.
//!
//! The whole store is one pretty-printed JSON document shared by every
//! `mechgg` process that points at it. Reads parse the file as it is now.
//! Mutations hold an exclusive lock file, re-read the document, apply the
//! change and write it back through a temporary file and a rename, so
//! concurrent handles never overwrite each other's records.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use async_trait::async_trait;
use tokio::sync::Mutex;
use uuid::Uuid;

use mechgg_core::error::StoreError;
use mechgg_core::model::{AnalysisRecord, PlanProgress, PlanRecord};
use mechgg_core::traits::{Allowance, AnalysisStore, HistoryQuery, PlanInsert, QuotaGate};

use crate::quota::{current_month, Tier};
use crate::state::StoreState;

const LOCK_RETRY: Duration = Duration::from_millis(10);
const DEFAULT_LOCK_TIMEOUT: Duration = Duration::from_secs(5);

/// A store persisted to a single JSON file.
#[derive(Debug)]
pub struct JsonFileStore {
    path: PathBuf,
    tier: Tier,
    lock_timeout: Duration,
    /// Serializes writers within this process before they contend for the lock file.
    writer: Mutex<()>,
}

impl JsonFileStore {
    /// Open the store at `path`. A missing file is an empty store.
    pub async fn open(path: impl Into<PathBuf>, tier: Tier) -> Result<Self, StoreError> {
        let path = path.into();
        load(&path).await?;
        Ok(Self {
            path,
            tier,
            lock_timeout: DEFAULT_LOCK_TIMEOUT,
            writer: Mutex::new(()),
        })
    }

    /// How long a mutation waits for another process to release the lock.
    pub fn with_lock_timeout(mut self, timeout: Duration) -> Self {
        self.lock_timeout = timeout;
        self
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn read(&self) -> Result<StoreState, StoreError> {
        load(&self.path).await
    }

    /// Apply `f` to the stored document under the lock and persist the result.
    ///
    /// Nothing is written if `f` fails or leaves the document unchanged.
    async fn mutate<T>(
        &self,
        f: impl FnOnce(&mut StoreState) -> Result<T, StoreError> + Send,
    ) -> Result<T, StoreError> {
        let _writer = self.writer.lock().await;
        let _lock = LockFile::acquire(&self.path, self.lock_timeout).await?;

        let current = load(&self.path).await?;
        let mut next = current.clone();
        let out = f(&mut next)?;
        if next != current {
            persist(&self.path, &next).await?;
        }
        Ok(out)
    }
}

async fn load(path: &Path) -> Result<StoreState, StoreError> {
    match tokio::fs::read(path).await {
        Ok(bytes) => Ok(serde_json::from_slice(&bytes)?),
        Err(e) if e.kind() == ErrorKind::NotFound => {
            tracing::debug!(path = %path.display(), "store file missing, starting empty");
            Ok(StoreState::default())
        }
        Err(e) => Err(e.into()),
    }
}

async fn persist(path: &Path, state: &StoreState) -> Result<(), StoreError> {
    let json = serde_json::to_vec_pretty(state)?;
    let tmp = path.with_extension("json.tmp");
    tokio::fs::write(&tmp, json).await?;
    tokio::fs::rename(&tmp, path).await?;
    tracing::debug!(path = %path.display(), "persisted store");
    Ok(())
}

/// Exclusive advisory lock: a sibling `.lock` file created with `create_new`.
///
/// Removed on drop. A lock left behind by a crashed process makes writers
/// time out until it is deleted.
#[derive(Debug)]
struct LockFile {
    path: PathBuf,
}

impl LockFile {
    async fn acquire(store: &Path, timeout: Duration) -> Result<Self, StoreError> {
        if let Some(parent) = store.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent).await?;
        }
        let path = store.with_extension("json.lock");
        let started = Instant::now();
        loop {
            let attempt = tokio::fs::OpenOptions::new()
                .write(true)
                .create_new(true)
                .open(&path)
                .await;
            match attempt {
                Ok(_) => return Ok(Self { path }),
                Err(e) if e.kind() == ErrorKind::AlreadyExists => {
                    if started.elapsed() >= timeout {
                        tracing::warn!(lock = %path.display(), "timed out waiting for store lock");
                        return Err(StoreError::Io(std::io::Error::new(
                            ErrorKind::TimedOut,
                            format!(
                                "store is locked by another process; remove {} if none is running",
                                path.display()
                            ),
                        )));
                    }
                    tokio::time::sleep(LOCK_RETRY).await;
                }
                Err(e) => return Err(e.into()),
            }
        }
    }
}

impl Drop for LockFile {
    fn drop(&mut self) {
        if let Err(e) = std::fs::remove_file(&self.path) {
            tracing::warn!(lock = %self.path.display(), error = %e, "failed to release store lock");
        }
    }
}

#[async_trait]
impl AnalysisStore for JsonFileStore {
    async fn insert_analysis(&self, record: &AnalysisRecord) -> Result<(), StoreError> {
        self.mutate(|s| s.insert_analysis(record)).await
    }

    async fn get_analysis(
        &self,
        id: Uuid,
        user_id: &str,
    ) -> Result<Option<AnalysisRecord>, StoreError> {
        Ok(self.read().await?.get_analysis(id, user_id))
    }

    async fn list_analyses(
        &self,
        user_id: &str,
        query: &HistoryQuery,
    ) -> Result<Vec<AnalysisRecord>, StoreError> {
        Ok(self.read().await?.list_analyses(user_id, query))
    }

    async fn delete_analysis(&self, id: Uuid, user_id: &str) -> Result<bool, StoreError> {
        self.mutate(|s| Ok(s.delete_analysis(id, user_id))).await
    }

    async fn plan_for_analysis(&self, analysis_id: Uuid) -> Result<Option<PlanRecord>, StoreError> {
        Ok(self.read().await?.plan_for_analysis(analysis_id))
    }

    async fn get_plan(
        &self,
        plan_id: Uuid,
        user_id: &str,
    ) -> Result<Option<PlanRecord>, StoreError> {
        Ok(self.read().await?.get_plan(plan_id, user_id))
    }

    async fn insert_plan_once(&self, plan: &PlanRecord) -> Result<PlanInsert, StoreError> {
        self.mutate(|s| Ok(s.insert_plan_once(plan))).await
    }

    async fn get_progress(
        &self,
        plan_id: Uuid,
        user_id: &str,
    ) -> Result<Option<PlanProgress>, StoreError> {
        Ok(self.read().await?.get_progress(plan_id, user_id))
    }

    async fn save_progress(&self, progress: &PlanProgress) -> Result<(), StoreError> {
        self.mutate(|s| s.save_progress(progress)).await
    }
}

#[async_trait]
impl QuotaGate for JsonFileStore {
    async fn allowance(&self, user_id: &str) -> Result<Allowance, StoreError> {
        Ok(self
            .read()
            .await?
            .allowance(user_id, &current_month(), self.tier))
    }

    async fn record_use(&self, user_id: &str) -> Result<(), StoreError> {
        let month = current_month();
        self.mutate(|s| {
            s.record_use(user_id, &month);
            Ok(())
        })
        .await
    }
}
