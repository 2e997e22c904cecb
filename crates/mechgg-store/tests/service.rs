//! CoachService behaviour over the in-tree stores.

use std::sync::Arc;

use async_trait::async_trait;
use uuid::Uuid;

use mechgg_core::engine::CoachService;
use mechgg_core::error::{CoachError, StoreError};
use mechgg_core::model::{AnalysisRecord, PlanProgress, PlanRecord};
use mechgg_core::traits::{AnalysisStore, HistoryQuery, PlanInsert, Unmetered};
use mechgg_store::{JsonFileStore, MemoryStore, Tier};

fn service(tier: Tier) -> (Arc<MemoryStore>, CoachService) {
    let store = Arc::new(MemoryStore::new(tier));
    let service = CoachService::new(store.clone(), store.clone());
    (store, service)
}

/// Stores a competing plan right before every insert, as if another request
/// won the race.
struct RacingStore {
    inner: Arc<MemoryStore>,
    rival: std::sync::Mutex<Option<Uuid>>,
}

#[async_trait]
impl AnalysisStore for RacingStore {
    async fn insert_analysis(&self, record: &AnalysisRecord) -> Result<(), StoreError> {
        self.inner.insert_analysis(record).await
    }

    async fn get_analysis(
        &self,
        id: Uuid,
        user_id: &str,
    ) -> Result<Option<AnalysisRecord>, StoreError> {
        self.inner.get_analysis(id, user_id).await
    }

    async fn list_analyses(
        &self,
        user_id: &str,
        query: &HistoryQuery,
    ) -> Result<Vec<AnalysisRecord>, StoreError> {
        self.inner.list_analyses(user_id, query).await
    }

    async fn delete_analysis(&self, id: Uuid, user_id: &str) -> Result<bool, StoreError> {
        self.inner.delete_analysis(id, user_id).await
    }

    async fn plan_for_analysis(&self, analysis_id: Uuid) -> Result<Option<PlanRecord>, StoreError> {
        self.inner.plan_for_analysis(analysis_id).await
    }

    async fn get_plan(
        &self,
        plan_id: Uuid,
        user_id: &str,
    ) -> Result<Option<PlanRecord>, StoreError> {
        self.inner.get_plan(plan_id, user_id).await
    }

    async fn insert_plan_once(&self, plan: &PlanRecord) -> Result<PlanInsert, StoreError> {
        let rival = PlanRecord {
            id: Uuid::new_v4(),
            ..plan.clone()
        };
        *self.rival.lock().unwrap() = Some(rival.id);
        assert_eq!(
            self.inner.insert_plan_once(&rival).await?,
            PlanInsert::Inserted
        );
        self.inner.insert_plan_once(plan).await
    }

    async fn get_progress(
        &self,
        plan_id: Uuid,
        user_id: &str,
    ) -> Result<Option<PlanProgress>, StoreError> {
        self.inner.get_progress(plan_id, user_id).await
    }

    async fn save_progress(&self, progress: &PlanProgress) -> Result<(), StoreError> {
        self.inner.save_progress(progress).await
    }
}

#[tokio::test]
async fn analyze_then_plan_then_toggle() {
    let (_store, service) = service(Tier::Pro);
    let record = service.analyze("alice", "valorant", 1234).await.unwrap();
    assert_eq!(record.user_id, "alice");

    let view = service.plan("alice", record.id).await.unwrap();
    assert_eq!(view.plan.analysis_id, record.id);
    assert_eq!(view.plan.plan.weeks.len(), 4);
    assert!(view.completed.is_empty());

    let drill = view.plan.plan.weeks[3].drills[0].id.clone();
    let done = service
        .toggle_drill("alice", view.plan.id, &drill)
        .await
        .unwrap();
    assert_eq!(done, vec![drill.clone()]);

    let again = service.plan("alice", record.id).await.unwrap();
    assert_eq!(again.plan.id, view.plan.id);
    assert_eq!(again.completed, vec![drill.clone()]);

    let undone = service
        .toggle_drill("alice", view.plan.id, &drill)
        .await
        .unwrap();
    assert!(undone.is_empty());
}

#[tokio::test]
async fn plan_is_built_once() {
    let (store, service) = service(Tier::Pro);
    let record = service.analyze("alice", "gt7", 99).await.unwrap();

    let first = service.plan("alice", record.id).await.unwrap();
    let second = service.plan("alice", record.id).await.unwrap();
    assert_eq!(first.plan, second.plan);
    assert_eq!(store.snapshot().await.plans.len(), 1);
}

#[tokio::test]
async fn plan_conflict_refetches_stored_plan() {
    let inner = Arc::new(MemoryStore::new(Tier::Pro));
    let racing = Arc::new(RacingStore {
        inner: inner.clone(),
        rival: std::sync::Mutex::new(None),
    });
    let service = CoachService::new(racing.clone(), Arc::new(Unmetered));

    let record = service.analyze("alice", "sf6", 500).await.unwrap();
    let view = service.plan("alice", record.id).await.unwrap();

    let rival = racing.rival.lock().unwrap().unwrap();
    assert_eq!(view.plan.id, rival);
    assert_eq!(inner.snapshot().await.plans.len(), 1);
}

#[tokio::test]
async fn other_users_see_not_found() {
    let (_store, service) = service(Tier::Pro);
    let record = service.analyze("alice", "dota2", 7).await.unwrap();
    let view = service.plan("alice", record.id).await.unwrap();
    let drill = view.plan.plan.weeks[0].drills[0].id.clone();

    let err = service.plan("mallory", record.id).await.unwrap_err();
    assert!(matches!(err, CoachError::AnalysisNotFound));

    let err = service
        .toggle_drill("mallory", view.plan.id, &drill)
        .await
        .unwrap_err();
    assert!(matches!(err, CoachError::PlanNotFound));

    let err = service.delete("mallory", record.id).await.unwrap_err();
    assert!(err.is_not_found());
    assert!(service.analysis("alice", record.id).await.is_ok());
}

#[tokio::test]
async fn invalid_drill_leaves_progress_unchanged() {
    let (_store, service) = service(Tier::Pro);
    let record = service.analyze("alice", "valorant", 31).await.unwrap();
    let view = service.plan("alice", record.id).await.unwrap();
    service
        .toggle_drill("alice", view.plan.id, "eval1")
        .await
        .unwrap();

    let err = service
        .toggle_drill("alice", view.plan.id, "br1")
        .await
        .unwrap_err();
    assert!(matches!(err, CoachError::InvalidDrill(ref d) if d == "br1"));

    let view = service.plan("alice", record.id).await.unwrap();
    assert_eq!(view.completed, vec!["eval1"]);
}

#[tokio::test]
async fn delete_cascades_to_plan_and_progress() {
    let (store, service) = service(Tier::Pro);
    let record = service.analyze("alice", "nba2k", 64).await.unwrap();
    let view = service.plan("alice", record.id).await.unwrap();
    service
        .toggle_drill("alice", view.plan.id, "eval2")
        .await
        .unwrap();

    service.delete("alice", record.id).await.unwrap();

    let snapshot = store.snapshot().await;
    assert!(snapshot.analyses.is_empty());
    assert!(snapshot.plans.is_empty());
    assert!(snapshot.progress.is_empty());

    let err = service
        .toggle_drill("alice", view.plan.id, "eval2")
        .await
        .unwrap_err();
    assert!(matches!(err, CoachError::PlanNotFound));
    assert!(matches!(
        service.delete("alice", record.id).await,
        Err(CoachError::AnalysisNotFound)
    ));
}

#[tokio::test]
async fn quota_blocks_the_extra_analysis() {
    let (store, service) = service(Tier::Free);
    for seed in 0..Tier::Free.monthly_limit() {
        service.analyze("alice", "apex", seed).await.unwrap();
    }

    let err = service.analyze("alice", "apex", 99).await.unwrap_err();
    assert!(matches!(err, CoachError::QuotaExceeded { limit: 3 }));
    assert_eq!(store.snapshot().await.analyses.len(), 3);

    // Other users have their own allowance.
    service.analyze("bob", "apex", 1).await.unwrap();
}

#[tokio::test]
async fn history_and_dashboard() {
    let (_store, service) = service(Tier::Pro);
    for (seed, game) in [(1, "valorant"), (2, "gt7"), (3, "valorant")] {
        service.analyze("alice", game, seed).await.unwrap();
    }
    service.analyze("bob", "valorant", 4).await.unwrap();

    let all = service
        .history("alice", &HistoryQuery::default())
        .await
        .unwrap();
    assert_eq!(all.len(), 3);

    let filtered = service
        .history(
            "alice",
            &HistoryQuery {
                game_id: Some("valorant".into()),
                ..HistoryQuery::default()
            },
        )
        .await
        .unwrap();
    assert_eq!(filtered.len(), 2);

    let stats = service.dashboard("alice").await.unwrap();
    assert_eq!(stats.total_analyses, 3);
    assert_eq!(stats.by_game[0].game_id, "valorant");
    assert_eq!(stats.by_game[0].clip_count, 2);
    let best = all
        .iter()
        .map(|r| r.composite_index)
        .fold(f64::MIN, f64::max);
    assert_eq!(stats.best_index, Some(best));
}

#[tokio::test]
async fn report_does_not_create_plan() {
    let (store, service) = service(Tier::Pro);
    let record = service.analyze("alice", "starcraft2", 12).await.unwrap();

    let report = service.report("alice", record.id).await.unwrap();
    assert!(report.plan.is_none());
    assert!(store.snapshot().await.plans.is_empty());

    service.plan("alice", record.id).await.unwrap();
    let report = service.report("alice", record.id).await.unwrap();
    assert!(report.plan.is_some());
    assert_eq!(report.game.name, "StarCraft II");
}

#[tokio::test]
async fn json_store_survives_restart() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("store.json");

    let (analysis_id, plan_id) = {
        let store = Arc::new(JsonFileStore::open(&path, Tier::Pro).await.unwrap());
        let service = CoachService::new(store.clone(), store);
        let record = service.analyze("alice", "tekken8", 2024).await.unwrap();
        let view = service.plan("alice", record.id).await.unwrap();
        service
            .toggle_drill("alice", view.plan.id, "eval1")
            .await
            .unwrap();
        (record.id, view.plan.id)
    };

    let store = Arc::new(JsonFileStore::open(&path, Tier::Pro).await.unwrap());
    let service = CoachService::new(store.clone(), store);
    let view = service.plan("alice", analysis_id).await.unwrap();
    assert_eq!(view.plan.id, plan_id);
    assert_eq!(view.completed, vec!["eval1"]);
}

#[tokio::test]
async fn two_processes_on_one_json_file_share_the_plan() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("store.json");

    let first_store = Arc::new(JsonFileStore::open(&path, Tier::Pro).await.unwrap());
    let first = CoachService::new(first_store.clone(), first_store);
    let second_store = Arc::new(JsonFileStore::open(&path, Tier::Pro).await.unwrap());
    let second = CoachService::new(second_store.clone(), second_store);

    let record = first.analyze("alice", "valorant", 321).await.unwrap();
    second.analyze("alice", "gt7", 654).await.unwrap();

    let from_first = first.plan("alice", record.id).await.unwrap();
    let from_second = second.plan("alice", record.id).await.unwrap();
    assert_eq!(from_first.plan.id, from_second.plan.id);

    let history = first
        .history("alice", &HistoryQuery::default())
        .await
        .unwrap();
    assert_eq!(history.len(), 2);
}
