//! Coaching service orchestrator.
//!
//! Wires the pure analysis pipeline and the drill planner to the storage and
//! entitlement collaborators. Every method is one request: there is no
//! background work, retry or lock held across store calls.

use std::sync::Arc;

use serde::Serialize;
use uuid::Uuid;

use crate::analysis;
use crate::drills::build_plan;
use crate::error::{CoachError, StoreError};
use crate::model::{AnalysisRecord, PlanProgress, PlanRecord};
use crate::progress;
use crate::report::AnalysisReport;
use crate::statistics::{compute_dashboard, DashboardStats};
use crate::traits::{AnalysisStore, HistoryQuery, PlanInsert, QuotaGate};

/// A plan together with the caller's completion state.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlanView {
    pub plan: PlanRecord,
    pub completed: Vec<String>,
}

/// The coaching service.
pub struct CoachService {
    store: Arc<dyn AnalysisStore>,
    quota: Arc<dyn QuotaGate>,
}

impl CoachService {
    pub fn new(store: Arc<dyn AnalysisStore>, quota: Arc<dyn QuotaGate>) -> Self {
        Self { store, quota }
    }

    /// Analyze a clip for `user_id` and store the result.
    ///
    /// Usage is only counted once the record is stored.
    pub async fn analyze(
        &self,
        user_id: &str,
        game_id: &str,
        seed: u32,
    ) -> Result<AnalysisRecord, CoachError> {
        let allowance = self.quota.allowance(user_id).await?;
        if allowance.is_exhausted() {
            tracing::warn!(user_id, limit = allowance.limit, "analysis quota exhausted");
            return Err(CoachError::QuotaExceeded {
                limit: allowance.limit,
            });
        }

        let result = analysis::analyze(seed, game_id);
        let record = AnalysisRecord::new(user_id, game_id, result);
        self.store.insert_analysis(&record).await?;
        self.quota.record_use(user_id).await?;

        tracing::info!(
            analysis_id = %record.id,
            user_id,
            game_id,
            composite_index = record.composite_index,
            "stored analysis"
        );
        Ok(record)
    }

    /// Fetch an analysis owned by `user_id`.
    pub async fn analysis(
        &self,
        user_id: &str,
        analysis_id: Uuid,
    ) -> Result<AnalysisRecord, CoachError> {
        self.store
            .get_analysis(analysis_id, user_id)
            .await?
            .ok_or(CoachError::AnalysisNotFound)
    }

    /// The drill plan for an analysis, built on first request.
    pub async fn plan(&self, user_id: &str, analysis_id: Uuid) -> Result<PlanView, CoachError> {
        let analysis = self.analysis(user_id, analysis_id).await?;
        let plan = match self.store.plan_for_analysis(analysis.id).await? {
            Some(plan) => plan,
            None => self.create_plan(&analysis).await?,
        };
        let completed = self
            .store
            .get_progress(plan.id, user_id)
            .await?
            .map(|p| p.completed)
            .unwrap_or_default();
        Ok(PlanView { plan, completed })
    }

    async fn create_plan(&self, analysis: &AnalysisRecord) -> Result<PlanRecord, CoachError> {
        let record = PlanRecord::new(analysis, build_plan(&analysis.habits, analysis.category));
        match self.store.insert_plan_once(&record).await? {
            PlanInsert::Inserted => {
                tracing::info!(plan_id = %record.id, analysis_id = %analysis.id, "created drill plan");
                Ok(record)
            }
            PlanInsert::Conflict => {
                tracing::warn!(
                    analysis_id = %analysis.id,
                    "drill plan created concurrently, using stored plan"
                );
                let stored = self.store.plan_for_analysis(analysis.id).await?;
                stored.ok_or_else(|| {
                    StoreError::Corrupt(format!(
                        "plan insert for analysis {} conflicted but no plan is stored",
                        analysis.id
                    ))
                    .into()
                })
            }
        }
    }

    /// Flip a drill's completion state and return the completed ids.
    pub async fn toggle_drill(
        &self,
        user_id: &str,
        plan_id: Uuid,
        drill_id: &str,
    ) -> Result<Vec<String>, CoachError> {
        let plan = self
            .store
            .get_plan(plan_id, user_id)
            .await?
            .ok_or(CoachError::PlanNotFound)?;
        let mut progress = self
            .store
            .get_progress(plan.id, user_id)
            .await?
            .unwrap_or_else(|| PlanProgress::empty(&plan));

        let completed = progress::toggle(&plan, &mut progress, drill_id, user_id)?;
        self.store.save_progress(&progress).await?;

        tracing::debug!(%plan_id, drill_id, completed = completed.len(), "toggled drill");
        Ok(completed)
    }

    /// Delete an analysis and everything built from it.
    pub async fn delete(&self, user_id: &str, analysis_id: Uuid) -> Result<(), CoachError> {
        if self.store.delete_analysis(analysis_id, user_id).await? {
            tracing::info!(%analysis_id, user_id, "deleted analysis");
            Ok(())
        } else {
            Err(CoachError::AnalysisNotFound)
        }
    }

    /// A page of the user's analyses, newest first.
    pub async fn history(
        &self,
        user_id: &str,
        query: &HistoryQuery,
    ) -> Result<Vec<AnalysisRecord>, CoachError> {
        Ok(self.store.list_analyses(user_id, query).await?)
    }

    /// Aggregate statistics over all of the user's analyses.
    pub async fn dashboard(&self, user_id: &str) -> Result<DashboardStats, CoachError> {
        let everything = HistoryQuery {
            game_id: None,
            limit: usize::MAX,
            offset: 0,
        };
        let records = self.store.list_analyses(user_id, &everything).await?;
        Ok(compute_dashboard(&records))
    }

    /// Export bundle for one analysis. Does not create a plan.
    pub async fn report(
        &self,
        user_id: &str,
        analysis_id: Uuid,
    ) -> Result<AnalysisReport, CoachError> {
        let analysis = self.analysis(user_id, analysis_id).await?;
        let plan = self.store.plan_for_analysis(analysis.id).await?;
        let completed = match &plan {
            Some(plan) => self
                .store
                .get_progress(plan.id, user_id)
                .await?
                .map(|p| p.completed)
                .unwrap_or_default(),
            None => Vec::new(),
        };
        Ok(AnalysisReport::new(analysis, plan, completed))
    }
}
