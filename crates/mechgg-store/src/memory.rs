//! In-memory store for tests and throwaway sessions.

use async_trait::async_trait;
use tokio::sync::RwLock;
use uuid::Uuid;

use mechgg_core::error::StoreError;
use mechgg_core::model::{AnalysisRecord, PlanProgress, PlanRecord};
use mechgg_core::traits::{Allowance, AnalysisStore, HistoryQuery, PlanInsert, QuotaGate};

use crate::quota::{current_month, Tier};
use crate::state::StoreState;

/// A store that keeps everything in process memory.
#[derive(Debug, Default)]
pub struct MemoryStore {
    state: RwLock<StoreState>,
    tier: Tier,
}

impl MemoryStore {
    pub fn new(tier: Tier) -> Self {
        Self {
            state: RwLock::new(StoreState::default()),
            tier,
        }
    }

    /// A copy of the current contents.
    pub async fn snapshot(&self) -> StoreState {
        self.state.read().await.clone()
    }
}

#[async_trait]
impl AnalysisStore for MemoryStore {
    async fn insert_analysis(&self, record: &AnalysisRecord) -> Result<(), StoreError> {
        self.state.write().await.insert_analysis(record)
    }

    async fn get_analysis(
        &self,
        id: Uuid,
        user_id: &str,
    ) -> Result<Option<AnalysisRecord>, StoreError> {
        Ok(self.state.read().await.get_analysis(id, user_id))
    }

    async fn list_analyses(
        &self,
        user_id: &str,
        query: &HistoryQuery,
    ) -> Result<Vec<AnalysisRecord>, StoreError> {
        Ok(self.state.read().await.list_analyses(user_id, query))
    }

    async fn delete_analysis(&self, id: Uuid, user_id: &str) -> Result<bool, StoreError> {
        Ok(self.state.write().await.delete_analysis(id, user_id))
    }

    async fn plan_for_analysis(&self, analysis_id: Uuid) -> Result<Option<PlanRecord>, StoreError> {
        Ok(self.state.read().await.plan_for_analysis(analysis_id))
    }

    async fn get_plan(
        &self,
        plan_id: Uuid,
        user_id: &str,
    ) -> Result<Option<PlanRecord>, StoreError> {
        Ok(self.state.read().await.get_plan(plan_id, user_id))
    }

    async fn insert_plan_once(&self, plan: &PlanRecord) -> Result<PlanInsert, StoreError> {
        Ok(self.state.write().await.insert_plan_once(plan))
    }

    async fn get_progress(
        &self,
        plan_id: Uuid,
        user_id: &str,
    ) -> Result<Option<PlanProgress>, StoreError> {
        Ok(self.state.read().await.get_progress(plan_id, user_id))
    }

    async fn save_progress(&self, progress: &PlanProgress) -> Result<(), StoreError> {
        self.state.write().await.save_progress(progress)
    }
}

#[async_trait]
impl QuotaGate for MemoryStore {
    async fn allowance(&self, user_id: &str) -> Result<Allowance, StoreError> {
        Ok(self
            .state
            .read()
            .await
            .allowance(user_id, &current_month(), self.tier))
    }

    async fn record_use(&self, user_id: &str) -> Result<(), StoreError> {
        self.state
            .write()
            .await
            .record_use(user_id, &current_month());
        Ok(())
    }
}
