//! Analysis export bundle with JSON persistence and Markdown rendering.

use std::path::Path;

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::games;
use crate::model::{AnalysisRecord, Category, PlanRecord};

/// Everything known about one analysis, ready to hand to a coach.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisReport {
    /// When the report was generated.
    pub generated_at: DateTime<Utc>,
    pub game: GameSummary,
    pub analysis: AnalysisRecord,
    /// The drill plan, if one has been built.
    #[serde(default)]
    pub plan: Option<PlanRecord>,
    /// Completed drill ids for the plan.
    #[serde(default)]
    pub completed: Vec<String>,
}

/// Display fields of the analyzed game.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GameSummary {
    pub id: String,
    pub name: String,
    pub category: Category,
    pub cover_emoji: String,
}

impl GameSummary {
    /// Registry display data for `game_id`, keeping the stored id for unknown games.
    pub fn for_game(game_id: &str, category: Category) -> Self {
        match games::lookup(game_id) {
            Some(g) => Self {
                id: g.id.to_string(),
                name: g.name.to_string(),
                category: g.category,
                cover_emoji: g.cover_emoji.to_string(),
            },
            None => Self {
                id: game_id.to_string(),
                name: game_id.to_string(),
                category,
                cover_emoji: games::fallback().cover_emoji.to_string(),
            },
        }
    }
}

impl AnalysisReport {
    pub fn new(analysis: AnalysisRecord, plan: Option<PlanRecord>, completed: Vec<String>) -> Self {
        Self {
            generated_at: Utc::now(),
            game: GameSummary::for_game(&analysis.game_id, analysis.category),
            analysis,
            plan,
            completed,
        }
    }

    /// Save the report as JSON to a file.
    pub fn save_json(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self).context("failed to serialize report")?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, json)
            .with_context(|| format!("failed to write report to {}", path.display()))?;
        Ok(())
    }

    /// Load a report from a JSON file.
    pub fn load_json(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read report from {}", path.display()))?;
        let report: AnalysisReport =
            serde_json::from_str(&content).context("failed to parse report JSON")?;
        Ok(report)
    }

    /// Fraction of plan drills completed, if there is a plan.
    pub fn completion(&self) -> Option<f64> {
        let plan = self.plan.as_ref()?;
        let total = plan.plan.drill_count();
        if total == 0 {
            return Some(0.0);
        }
        let done = plan
            .plan
            .weeks
            .iter()
            .flat_map(|w| w.drills.iter())
            .filter(|d| self.completed.contains(&d.id))
            .count();
        Some(done as f64 / total as f64)
    }

    /// Render the report as Markdown.
    pub fn to_markdown(&self) -> String {
        let a = &self.analysis;
        let mut md = String::new();

        md.push_str(&format!(
            "# {} {} analysis\n\n",
            self.game.cover_emoji, self.game.name
        ));
        md.push_str(&format!("- **Analysis:** `{}`\n", a.id));
        md.push_str(&format!("- **Category:** {}\n", a.category));
        md.push_str(&format!(
            "- **Recorded:** {}\n",
            a.created_at.format("%Y-%m-%d %H:%M UTC")
        ));
        md.push_str(&format!("- **Composite index:** {:.1}\n\n", a.composite_index));
        md.push_str(&format!("{}\n\n", a.summary));

        md.push_str("## Dimensions\n\n");
        md.push_str("| Dimension | Score |\n|---|---:|\n");
        for (dim, score) in a.dimension_scores.ordered(a.category) {
            md.push_str(&format!("| {dim} | {score:.1} |\n"));
        }
        md.push('\n');

        md.push_str("## Habits\n\n");
        if a.habits.is_empty() {
            md.push_str("No habits detected.\n\n");
        } else {
            for h in &a.habits {
                let marker = if h.is_positive { "+" } else { "-" };
                md.push_str(&format!(
                    "- **{} {}** ({}): {}\n",
                    marker, h.name, h.severity, h.coaching_note
                ));
            }
            md.push('\n');
        }

        if let Some(plan) = &self.plan {
            md.push_str(&format!(
                "## Drill plan ({} weeks, {} daily)\n\n",
                plan.plan.total_weeks, plan.plan.estimated_daily_time
            ));
            for week in &plan.plan.weeks {
                md.push_str(&format!(
                    "### Week {}: {}\n\n{} ({})\n\n",
                    week.week, week.focus, week.theme, week.daily_time
                ));
                for d in &week.drills {
                    let check = if self.completed.contains(&d.id) { "x" } else { " " };
                    md.push_str(&format!(
                        "- [{}] {} `{}` ({}, {})\n",
                        check, d.name, d.id, d.duration, d.difficulty
                    ));
                }
                md.push_str(&format!("\nGoal: {}\n\n", week.goal));
            }
            if let Some(ratio) = self.completion() {
                md.push_str(&format!("Completion: {:.0}%\n", ratio * 100.0));
            }
        }

        md
    }
}
