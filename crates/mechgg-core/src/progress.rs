//! Per-user drill completion tracking.

use crate::error::CoachError;
use crate::model::{PlanProgress, PlanRecord};

/// Flip a drill's completion state and return the updated completed ids.
///
/// The caller must own the plan and the drill must appear in one of the
/// plan's weeks. On error `progress` is left untouched.
pub fn toggle(
    plan: &PlanRecord,
    progress: &mut PlanProgress,
    drill_id: &str,
    caller_id: &str,
) -> Result<Vec<String>, CoachError> {
    if plan.user_id != caller_id || progress.plan_id != plan.id {
        return Err(CoachError::PlanNotFound);
    }
    if !plan.plan.contains_drill(drill_id) {
        return Err(CoachError::InvalidDrill(drill_id.to_string()));
    }

    match progress.completed.iter().position(|d| d == drill_id) {
        Some(idx) => {
            progress.completed.remove(idx);
        }
        None => progress.completed.push(drill_id.to_string()),
    }
    Ok(progress.completed.clone())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::drills::build_plan;
    use crate::habits::rules;
    use crate::model::{AnalysisRecord, AnalysisResult, Category, DimensionScores, Habit, Style};

    fn plan_for(user: &str) -> PlanRecord {
        let habits: Vec<Habit> = rules(Category::Racing).iter().map(|r| r.to_habit()).collect();
        let analysis = AnalysisRecord::new(
            user,
            "gt7",
            AnalysisResult {
                category: Category::Racing,
                style: Style::Sim,
                dimension_scores: DimensionScores::new(),
                composite_index: 0.0,
                habits: habits.clone(),
                summary: String::new(),
            },
        );
        PlanRecord::new(&analysis, build_plan(&habits, Category::Racing))
    }

    #[test]
    fn toggle_twice_restores_state() {
        let plan = plan_for("alice");
        let mut progress = PlanProgress::empty(&plan);
        let before = progress.completed.clone();

        let after_first = toggle(&plan, &mut progress, "br1", "alice").unwrap();
        assert_eq!(after_first, vec!["br1"]);
        let after_second = toggle(&plan, &mut progress, "br1", "alice").unwrap();
        assert_eq!(after_second, before);
    }

    #[test]
    fn completion_keeps_first_completed_order() {
        let plan = plan_for("alice");
        let mut progress = PlanProgress::empty(&plan);
        toggle(&plan, &mut progress, "eval2", "alice").unwrap();
        toggle(&plan, &mut progress, "br1", "alice").unwrap();
        let done = toggle(&plan, &mut progress, "ap1", "alice").unwrap();
        assert_eq!(done, vec!["eval2", "br1", "ap1"]);
    }

    #[test]
    fn rejects_drill_outside_plan() {
        let plan = plan_for("alice");
        let mut progress = PlanProgress::empty(&plan);
        toggle(&plan, &mut progress, "br1", "alice").unwrap();

        // acq1 exists in the library but not in a racing plan.
        let err = toggle(&plan, &mut progress, "acq1", "alice").unwrap_err();
        assert!(matches!(err, CoachError::InvalidDrill(ref id) if id == "acq1"));
        assert_eq!(progress.completed, vec!["br1"]);
    }

    #[test]
    fn rejects_other_users() {
        let plan = plan_for("alice");
        let mut progress = PlanProgress::empty(&plan);
        let err = toggle(&plan, &mut progress, "br1", "mallory").unwrap_err();
        assert!(err.is_not_found());
        assert!(progress.completed.is_empty());
    }
}
