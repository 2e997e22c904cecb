//! Store contents shared by the in-memory and JSON-file backends.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use mechgg_core::error::StoreError;
use mechgg_core::model::{AnalysisRecord, PlanProgress, PlanRecord};
use mechgg_core::traits::{Allowance, HistoryQuery, PlanInsert};

use crate::quota::{Tier, UsageCounter};

/// Everything a store holds. Serialized as-is by the JSON backend.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoreState {
    #[serde(default)]
    pub analyses: BTreeMap<Uuid, AnalysisRecord>,
    /// Keyed by analysis id, which makes one plan per analysis structural.
    #[serde(default)]
    pub plans: BTreeMap<Uuid, PlanRecord>,
    /// Keyed by plan id.
    #[serde(default)]
    pub progress: BTreeMap<Uuid, PlanProgress>,
    /// Keyed by user id.
    #[serde(default)]
    pub usage: BTreeMap<String, UsageCounter>,
}

impl StoreState {
    pub fn insert_analysis(&mut self, record: &AnalysisRecord) -> Result<(), StoreError> {
        if self.analyses.contains_key(&record.id) {
            return Err(StoreError::Corrupt(format!(
                "analysis {} already exists",
                record.id
            )));
        }
        self.analyses.insert(record.id, record.clone());
        Ok(())
    }

    pub fn get_analysis(&self, id: Uuid, user_id: &str) -> Option<AnalysisRecord> {
        self.analyses
            .get(&id)
            .filter(|r| r.user_id == user_id)
            .cloned()
    }

    pub fn list_analyses(&self, user_id: &str, query: &HistoryQuery) -> Vec<AnalysisRecord> {
        let mut matching: Vec<&AnalysisRecord> = self
            .analyses
            .values()
            .filter(|r| r.user_id == user_id)
            .filter(|r| query.game_id.as_deref().is_none_or(|g| r.game_id == g))
            .collect();
        matching.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(a.id.cmp(&b.id)));
        matching
            .into_iter()
            .skip(query.offset)
            .take(query.limit)
            .cloned()
            .collect()
    }

    /// Remove an analysis, its plan and the plan's progress.
    pub fn delete_analysis(&mut self, id: Uuid, user_id: &str) -> bool {
        if self.get_analysis(id, user_id).is_none() {
            return false;
        }
        self.analyses.remove(&id);
        if let Some(plan) = self.plans.remove(&id) {
            self.progress.remove(&plan.id);
        }
        true
    }

    pub fn plan_for_analysis(&self, analysis_id: Uuid) -> Option<PlanRecord> {
        self.plans.get(&analysis_id).cloned()
    }

    pub fn get_plan(&self, plan_id: Uuid, user_id: &str) -> Option<PlanRecord> {
        self.plans
            .values()
            .find(|p| p.id == plan_id && p.user_id == user_id)
            .cloned()
    }

    pub fn insert_plan_once(&mut self, plan: &PlanRecord) -> PlanInsert {
        if self.plans.contains_key(&plan.analysis_id) {
            return PlanInsert::Conflict;
        }
        self.plans.insert(plan.analysis_id, plan.clone());
        PlanInsert::Inserted
    }

    pub fn get_progress(&self, plan_id: Uuid, user_id: &str) -> Option<PlanProgress> {
        self.progress
            .get(&plan_id)
            .filter(|p| p.user_id == user_id)
            .cloned()
    }

    pub fn save_progress(&mut self, progress: &PlanProgress) -> Result<(), StoreError> {
        if !self.plans.values().any(|p| p.id == progress.plan_id) {
            return Err(StoreError::Corrupt(format!(
                "progress for unknown plan {}",
                progress.plan_id
            )));
        }
        self.progress.insert(progress.plan_id, progress.clone());
        Ok(())
    }

    pub fn allowance(&self, user_id: &str, month: &str, tier: Tier) -> Allowance {
        let used = self.usage.get(user_id).map_or(0, |u| u.used(month));
        Allowance {
            used,
            limit: tier.monthly_limit(),
        }
    }

    pub fn record_use(&mut self, user_id: &str, month: &str) {
        self.usage
            .entry(user_id.to_string())
            .or_default()
            .record(month);
    }
}

#[cfg(test)]
mod tests {
    use chrono::{Duration, Utc};
    use mechgg_core::analysis::analyze;
    use mechgg_core::drills::build_plan;

    use super::*;

    fn analysis(user: &str, game: &str, minutes_ago: i64) -> AnalysisRecord {
        let mut r = AnalysisRecord::new(user, game, analyze(321, game));
        r.created_at = Utc::now() - Duration::minutes(minutes_ago);
        r
    }

    fn plan_for(a: &AnalysisRecord) -> PlanRecord {
        PlanRecord::new(a, build_plan(&a.habits, a.category))
    }

    #[test]
    fn history_filters_sorts_and_pages() {
        let mut state = StoreState::default();
        for (i, game) in ["valorant", "gt7", "valorant", "valorant"].iter().enumerate() {
            state.insert_analysis(&analysis("u1", game, i as i64)).unwrap();
        }
        state.insert_analysis(&analysis("u2", "valorant", 0)).unwrap();

        let all = state.list_analyses("u1", &HistoryQuery::default());
        assert_eq!(all.len(), 4);
        assert!(all.windows(2).all(|w| w[0].created_at >= w[1].created_at));

        let query = HistoryQuery {
            game_id: Some("valorant".into()),
            limit: 2,
            offset: 1,
        };
        let page = state.list_analyses("u1", &query);
        assert_eq!(page.len(), 2);
        assert!(page.iter().all(|r| r.game_id == "valorant" && r.user_id == "u1"));
        assert_eq!(page[0].created_at, all[2].created_at);
    }

    #[test]
    fn delete_cascades() {
        let mut state = StoreState::default();
        let a = analysis("u1", "sf6", 0);
        state.insert_analysis(&a).unwrap();
        let plan = plan_for(&a);
        assert_eq!(state.insert_plan_once(&plan), PlanInsert::Inserted);
        let mut progress = PlanProgress::empty(&plan);
        progress.completed.push("eval1".into());
        state.save_progress(&progress).unwrap();

        assert!(!state.delete_analysis(a.id, "u2"));
        assert!(state.delete_analysis(a.id, "u1"));
        assert!(state.analyses.is_empty());
        assert!(state.plans.is_empty());
        assert!(state.progress.is_empty());
        assert!(!state.delete_analysis(a.id, "u1"));
    }

    #[test]
    fn second_plan_conflicts() {
        let mut state = StoreState::default();
        let a = analysis("u1", "gt7", 0);
        state.insert_analysis(&a).unwrap();
        let first = plan_for(&a);
        let second = plan_for(&a);
        assert_eq!(state.insert_plan_once(&first), PlanInsert::Inserted);
        assert_eq!(state.insert_plan_once(&second), PlanInsert::Conflict);
        assert_eq!(state.plan_for_analysis(a.id).unwrap().id, first.id);
    }

    #[test]
    fn foreign_reads_are_empty() {
        let mut state = StoreState::default();
        let a = analysis("u1", "dota2", 0);
        state.insert_analysis(&a).unwrap();
        let plan = plan_for(&a);
        state.insert_plan_once(&plan);
        state.save_progress(&PlanProgress::empty(&plan)).unwrap();

        assert!(state.get_analysis(a.id, "u2").is_none());
        assert!(state.get_plan(plan.id, "u2").is_none());
        assert!(state.get_progress(plan.id, "u2").is_none());
        assert!(state.get_plan(plan.id, "u1").is_some());
    }

    #[test]
    fn progress_requires_known_plan() {
        let mut state = StoreState::default();
        let a = analysis("u1", "nba2k", 0);
        let orphan = PlanProgress::empty(&plan_for(&a));
        assert!(matches!(
            state.save_progress(&orphan),
            Err(StoreError::Corrupt(_))
        ));
    }

    #[test]
    fn usage_is_per_user_and_month() {
        let mut state = StoreState::default();
        state.record_use("u1", "2026-10");
        state.record_use("u1", "2026-10");
        state.record_use("u2", "2026-10");

        assert_eq!(state.allowance("u1", "2026-10", Tier::Free).used, 2);
        assert_eq!(state.allowance("u2", "2026-10", Tier::Free).used, 1);
        assert_eq!(state.allowance("u1", "2026-11", Tier::Free).used, 0);
        assert_eq!(state.allowance("u3", "2026-10", Tier::Pro).limit, 50);
    }

    #[test]
    fn state_survives_json() {
        let mut state = StoreState::default();
        let a = analysis("u1", "valorant", 0);
        state.insert_analysis(&a).unwrap();
        state.insert_plan_once(&plan_for(&a));
        state.record_use("u1", "2026-10");

        let json = serde_json::to_string(&state).unwrap();
        let back: StoreState = serde_json::from_str(&json).unwrap();
        assert_eq!(back, state);
    }
}
