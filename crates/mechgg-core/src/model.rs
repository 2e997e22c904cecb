//! Core data model types for mechgg.
//!
//! These are the types that flow between the scoring stages, the drill
//! planner and the storage collaborators.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Game category. Every stage of the pipeline dispatches on this.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Fps,
    Racing,
    Sports,
    Strategy,
    Fighting,
}

impl Category {
    /// All categories, in registry order.
    pub const ALL: [Category; 5] = [
        Category::Fps,
        Category::Racing,
        Category::Sports,
        Category::Strategy,
        Category::Fighting,
    ];

    /// The six dimensions scored for this category, in declared order.
    pub fn dimensions(self) -> [Dimension; 6] {
        use Dimension::*;
        match self {
            Category::Fps => [
                TargetAcquisition,
                SpreadControl,
                OnTargetTracking,
                OvershootControl,
                Consistency,
                SessionMomentum,
            ],
            Category::Racing => [
                BrakingConsistency,
                ApexPrecision,
                ThrottleControl,
                OversteerRecovery,
                LapConsistency,
                HazardReaction,
            ],
            Category::Sports => [
                DecisionSpeed,
                InputTiming,
                ExecutionConsistency,
                PressurePerformance,
                GameReading,
                Adaptability,
            ],
            Category::Strategy => [
                ActionsPerMinute,
                DecisionRhythm,
                ResourceEfficiency,
                AttentionSwitching,
                BuildOrderConsistency,
                CrisisManagement,
            ],
            Category::Fighting => [
                InputPrecision,
                ComboExecution,
                ReactionTiming,
                PunishAccuracy,
                NeutralGame,
                Adaptability,
            ],
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Category::Fps => write!(f, "fps"),
            Category::Racing => write!(f, "racing"),
            Category::Sports => write!(f, "sports"),
            Category::Strategy => write!(f, "strategy"),
            Category::Fighting => write!(f, "fighting"),
        }
    }
}

impl FromStr for Category {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "fps" => Ok(Category::Fps),
            "racing" => Ok(Category::Racing),
            "sports" => Ok(Category::Sports),
            "strategy" => Ok(Category::Strategy),
            "fighting" => Ok(Category::Fighting),
            other => Err(format!("unknown category: {other}")),
        }
    }
}

/// Play style within a category. Selects style-specific weights and ranges.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Style {
    Tactical,
    Extraction,
    BattleRoyale,
    Hero,
    Sim,
    Arcade,
    Rally,
    Football,
    Basketball,
    Hockey,
    Baseball,
    Rts,
    Moba,
    Traditional,
    Platform,
}

impl fmt::Display for Style {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Style::Tactical => "tactical",
            Style::Extraction => "extraction",
            Style::BattleRoyale => "battleroyale",
            Style::Hero => "hero",
            Style::Sim => "sim",
            Style::Arcade => "arcade",
            Style::Rally => "rally",
            Style::Football => "football",
            Style::Basketball => "basketball",
            Style::Hockey => "hockey",
            Style::Baseball => "baseball",
            Style::Rts => "rts",
            Style::Moba => "moba",
            Style::Traditional => "traditional",
            Style::Platform => "platform",
        };
        f.write_str(s)
    }
}

/// A named sub-skill scored 0–100.
///
/// Serialized keys are the fixed camelCase vocabulary stored with every
/// analysis, so renaming a variant breaks previously stored records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Dimension {
    // fps
    TargetAcquisition,
    SpreadControl,
    OnTargetTracking,
    OvershootControl,
    Consistency,
    SessionMomentum,
    // racing
    BrakingConsistency,
    ApexPrecision,
    ThrottleControl,
    OversteerRecovery,
    LapConsistency,
    HazardReaction,
    // sports
    DecisionSpeed,
    InputTiming,
    ExecutionConsistency,
    PressurePerformance,
    GameReading,
    // sports and fighting
    Adaptability,
    // strategy
    ActionsPerMinute,
    DecisionRhythm,
    ResourceEfficiency,
    AttentionSwitching,
    BuildOrderConsistency,
    CrisisManagement,
    // fighting
    InputPrecision,
    ComboExecution,
    ReactionTiming,
    PunishAccuracy,
    NeutralGame,
}

impl Dimension {
    /// The stored key for this dimension.
    pub fn key(self) -> &'static str {
        use Dimension::*;
        match self {
            TargetAcquisition => "targetAcquisition",
            SpreadControl => "spreadControl",
            OnTargetTracking => "onTargetTracking",
            OvershootControl => "overshootControl",
            Consistency => "consistency",
            SessionMomentum => "sessionMomentum",
            BrakingConsistency => "brakingConsistency",
            ApexPrecision => "apexPrecision",
            ThrottleControl => "throttleControl",
            OversteerRecovery => "oversteerRecovery",
            LapConsistency => "lapConsistency",
            HazardReaction => "hazardReaction",
            DecisionSpeed => "decisionSpeed",
            InputTiming => "inputTiming",
            ExecutionConsistency => "executionConsistency",
            PressurePerformance => "pressurePerformance",
            GameReading => "gameReading",
            Adaptability => "adaptability",
            ActionsPerMinute => "actionsPerMinute",
            DecisionRhythm => "decisionRhythm",
            ResourceEfficiency => "resourceEfficiency",
            AttentionSwitching => "attentionSwitching",
            BuildOrderConsistency => "buildOrderConsistency",
            CrisisManagement => "crisisManagement",
            InputPrecision => "inputPrecision",
            ComboExecution => "comboExecution",
            ReactionTiming => "reactionTiming",
            PunishAccuracy => "punishAccuracy",
            NeutralGame => "neutralGame",
        }
    }
}

impl fmt::Display for Dimension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// Per-dimension scores for one analysis.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DimensionScores(BTreeMap<Dimension, f64>);

impl DimensionScores {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, dimension: Dimension, score: f64) {
        self.0.insert(dimension, score);
    }

    pub fn get(&self, dimension: Dimension) -> Option<f64> {
        self.0.get(&dimension).copied()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Scores present for `category`, in the category's declared order.
    ///
    /// Float sums over scores must go through this so that results do not
    /// depend on map ordering.
    pub fn ordered(&self, category: Category) -> Vec<(Dimension, f64)> {
        category
            .dimensions()
            .into_iter()
            .filter_map(|d| self.get(d).map(|s| (d, s)))
            .collect()
    }
}

impl FromIterator<(Dimension, f64)> for DimensionScores {
    fn from_iter<I: IntoIterator<Item = (Dimension, f64)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// How often a habit shows up.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Frequent,
    Occasional,
    /// Used by strength habits.
    Consistent,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Frequent => write!(f, "frequent"),
            Severity::Occasional => write!(f, "occasional"),
            Severity::Consistent => write!(f, "consistent"),
        }
    }
}

/// A detected pattern, positive or negative.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Habit {
    /// Stable key, also the drill library key.
    pub key: String,
    /// Human-readable name.
    pub name: String,
    pub severity: Severity,
    /// How many times the habit was observed, when known.
    #[serde(default)]
    pub occurrence_count: Option<u32>,
    pub description: String,
    pub coaching_note: String,
    pub is_positive: bool,
}

/// Drill difficulty.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Difficulty {
    Beginner,
    Intermediate,
    Advanced,
    #[serde(rename = "All levels")]
    AllLevels,
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Difficulty::Beginner => write!(f, "Beginner"),
            Difficulty::Intermediate => write!(f, "Intermediate"),
            Difficulty::Advanced => write!(f, "Advanced"),
            Difficulty::AllLevels => write!(f, "All levels"),
        }
    }
}

/// A static drill library entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DrillDefinition {
    pub id: &'static str,
    pub name: &'static str,
    pub duration: &'static str,
    pub frequency: &'static str,
    pub description: &'static str,
    pub difficulty: Difficulty,
}

/// A drill as stored inside a plan.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Drill {
    pub id: String,
    pub name: String,
    pub duration: String,
    pub frequency: String,
    pub description: String,
    pub difficulty: Difficulty,
}

impl From<&DrillDefinition> for Drill {
    fn from(def: &DrillDefinition) -> Self {
        Self {
            id: def.id.to_string(),
            name: def.name.to_string(),
            duration: def.duration.to_string(),
            frequency: def.frequency.to_string(),
            description: def.description.to_string(),
            difficulty: def.difficulty,
        }
    }
}

/// One week of a drill plan.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WeekPlan {
    /// 1 through 4.
    pub week: u8,
    pub focus: String,
    pub theme: String,
    pub drills: Vec<Drill>,
    pub daily_time: String,
    pub goal: String,
}

/// The structural content of a four-week plan.
///
/// Contains no ids or timestamps: building twice from the same habits
/// yields equal values.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DrillPlan {
    pub category: Category,
    pub total_weeks: u8,
    pub estimated_daily_time: String,
    /// Names of every negative habit the plan targets.
    pub target_habits: Vec<String>,
    pub weeks: Vec<WeekPlan>,
}

impl DrillPlan {
    /// Whether any week contains a drill with this id.
    pub fn contains_drill(&self, drill_id: &str) -> bool {
        self.weeks
            .iter()
            .flat_map(|w| w.drills.iter())
            .any(|d| d.id == drill_id)
    }

    /// Number of drill slots across all weeks.
    pub fn drill_count(&self) -> usize {
        self.weeks.iter().map(|w| w.drills.len()).sum()
    }
}

/// Output of the pure analysis pipeline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisResult {
    pub category: Category,
    pub style: Style,
    pub dimension_scores: DimensionScores,
    pub composite_index: f64,
    pub habits: Vec<Habit>,
    pub summary: String,
}

/// A persisted analysis. Immutable once created.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisRecord {
    pub id: Uuid,
    pub user_id: String,
    pub game_id: String,
    pub category: Category,
    pub composite_index: f64,
    pub dimension_scores: DimensionScores,
    pub habits: Vec<Habit>,
    pub summary: String,
    pub created_at: DateTime<Utc>,
}

impl AnalysisRecord {
    /// Wrap a fresh analysis result for storage.
    pub fn new(user_id: &str, game_id: &str, result: AnalysisResult) -> Self {
        Self {
            id: Uuid::new_v4(),
            user_id: user_id.to_string(),
            game_id: game_id.to_string(),
            category: result.category,
            composite_index: result.composite_index,
            dimension_scores: result.dimension_scores,
            habits: result.habits,
            summary: result.summary,
            created_at: Utc::now(),
        }
    }
}

/// A persisted drill plan. At most one exists per analysis.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlanRecord {
    pub id: Uuid,
    pub analysis_id: Uuid,
    pub user_id: String,
    pub plan: DrillPlan,
    pub created_at: DateTime<Utc>,
}

impl PlanRecord {
    pub fn new(analysis: &AnalysisRecord, plan: DrillPlan) -> Self {
        Self {
            id: Uuid::new_v4(),
            analysis_id: analysis.id,
            user_id: analysis.user_id.clone(),
            plan,
            created_at: Utc::now(),
        }
    }
}

/// Completed drills for one plan, owned by one user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlanProgress {
    pub plan_id: Uuid,
    pub user_id: String,
    /// Drill ids in the order they were first completed.
    #[serde(default)]
    pub completed: Vec<String>,
}

impl PlanProgress {
    pub fn empty(plan: &PlanRecord) -> Self {
        Self {
            plan_id: plan.id,
            user_id: plan.user_id.clone(),
            completed: Vec::new(),
        }
    }

    pub fn is_completed(&self, drill_id: &str) -> bool {
        self.completed.iter().any(|d| d == drill_id)
    }
}
