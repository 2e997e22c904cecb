//! Collaborator traits for persistence and entitlement.
//!
//! The scoring pipeline itself is synchronous and pure. These async traits
//! are the seams to the stateful world and are implemented by the
//! `mechgg-store` crate.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::StoreError;
use crate::model::{AnalysisRecord, PlanProgress, PlanRecord};

// ---------------------------------------------------------------------------
// Storage
// ---------------------------------------------------------------------------

/// Outcome of an insert-once plan write.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlanInsert {
    /// The plan was stored.
    Inserted,
    /// A plan already exists for the analysis; nothing was written.
    Conflict,
}

/// Filter and paging for analysis history.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryQuery {
    /// Only analyses of this game.
    #[serde(default)]
    pub game_id: Option<String>,
    pub limit: usize,
    #[serde(default)]
    pub offset: usize,
}

impl Default for HistoryQuery {
    fn default() -> Self {
        Self {
            game_id: None,
            limit: 20,
            offset: 0,
        }
    }
}

/// Persistence for analyses, plans and plan progress.
///
/// Reads that take a `user_id` only return records owned by that user.
#[async_trait]
pub trait AnalysisStore: Send + Sync {
    /// Store a new analysis.
    async fn insert_analysis(&self, record: &AnalysisRecord) -> Result<(), StoreError>;

    /// Fetch an analysis owned by `user_id`.
    async fn get_analysis(
        &self,
        id: Uuid,
        user_id: &str,
    ) -> Result<Option<AnalysisRecord>, StoreError>;

    /// A user's analyses, newest first.
    async fn list_analyses(
        &self,
        user_id: &str,
        query: &HistoryQuery,
    ) -> Result<Vec<AnalysisRecord>, StoreError>;

    /// Delete an analysis together with its plan and plan progress.
    ///
    /// Returns `false` if nothing owned by `user_id` matched.
    async fn delete_analysis(&self, id: Uuid, user_id: &str) -> Result<bool, StoreError>;

    /// The plan built for an analysis, if any.
    async fn plan_for_analysis(&self, analysis_id: Uuid) -> Result<Option<PlanRecord>, StoreError>;

    /// Fetch a plan owned by `user_id`.
    async fn get_plan(&self, plan_id: Uuid, user_id: &str)
        -> Result<Option<PlanRecord>, StoreError>;

    /// Store a plan unless one already exists for its analysis.
    ///
    /// Must be atomic with respect to concurrent callers.
    async fn insert_plan_once(&self, plan: &PlanRecord) -> Result<PlanInsert, StoreError>;

    /// Progress for a plan, if any has been saved.
    async fn get_progress(
        &self,
        plan_id: Uuid,
        user_id: &str,
    ) -> Result<Option<PlanProgress>, StoreError>;

    /// Replace the progress for `(plan_id, user_id)`.
    async fn save_progress(&self, progress: &PlanProgress) -> Result<(), StoreError>;
}

// ---------------------------------------------------------------------------
// Entitlement
// ---------------------------------------------------------------------------

/// A user's analysis allowance for the current period.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Allowance {
    pub used: u32,
    pub limit: u32,
}

impl Allowance {
    pub fn is_exhausted(&self) -> bool {
        self.used >= self.limit
    }

    pub fn remaining(&self) -> u32 {
        self.limit.saturating_sub(self.used)
    }
}

/// Entitlement check consulted before each analysis.
#[async_trait]
pub trait QuotaGate: Send + Sync {
    /// Current allowance for `user_id`.
    async fn allowance(&self, user_id: &str) -> Result<Allowance, StoreError>;

    /// Count one analysis against `user_id`.
    async fn record_use(&self, user_id: &str) -> Result<(), StoreError>;
}

/// A gate that never refuses.
pub struct Unmetered;

#[async_trait]
impl QuotaGate for Unmetered {
    async fn allowance(&self, _: &str) -> Result<Allowance, StoreError> {
        Ok(Allowance {
            used: 0,
            limit: u32::MAX,
        })
    }

    async fn record_use(&self, _: &str) -> Result<(), StoreError> {
        Ok(())
    }
}
