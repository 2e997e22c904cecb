//! Threshold rules that turn dimension scores into habits.
//!
//! Each category owns an ordered rule list. Rules are evaluated in declared
//! order and each firing rule appends exactly one habit, so identical scores
//! always produce identical habit lists.

use crate::model::{Category, Dimension, DimensionScores, Habit, Severity};

/// When a rule fires. Comparisons are strict.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Trigger {
    /// Deficiency: the dimension is below the threshold.
    Below(Dimension, f64),
    /// Strength: the dimension is above the threshold.
    Above(Dimension, f64),
    /// Strength: both dimensions are above their thresholds.
    BothAbove((Dimension, f64), (Dimension, f64)),
}

impl Trigger {
    /// Evaluate against `scores`. A missing dimension never fires.
    pub fn fires(&self, scores: &DimensionScores) -> bool {
        let above = |(d, t): (Dimension, f64)| scores.get(d).is_some_and(|s| s > t);
        match *self {
            Trigger::Below(d, t) => scores.get(d).is_some_and(|s| s < t),
            Trigger::Above(d, t) => above((d, t)),
            Trigger::BothAbove(a, b) => above(a) && above(b),
        }
    }
}

/// A static habit detection rule.
#[derive(Debug, Clone, Copy)]
pub struct HabitRule {
    pub trigger: Trigger,
    pub key: &'static str,
    pub name: &'static str,
    pub severity: Severity,
    pub description: &'static str,
    pub coaching_note: &'static str,
}

impl HabitRule {
    pub fn is_positive(&self) -> bool {
        !matches!(self.trigger, Trigger::Below(..))
    }

    pub fn to_habit(&self) -> Habit {
        Habit {
            key: self.key.to_string(),
            name: self.name.to_string(),
            severity: self.severity,
            occurrence_count: None,
            description: self.description.to_string(),
            coaching_note: self.coaching_note.to_string(),
            is_positive: self.is_positive(),
        }
    }
}

use Dimension::*;
use Severity::*;

static FPS_RULES: &[HabitRule] = &[
    HabitRule {
        trigger: Trigger::Below(TargetAcquisition, 50.0),
        key: "slow_acquisition",
        name: "Slow Target Acquisition",
        severity: Frequent,
        description: "Taking too long to get crosshair onto target after identifying them.",
        coaching_note: "Practice flick shots in Aimlabs or Kovaaks. Focus on speed first, accuracy follows.",
    },
    HabitRule {
        trigger: Trigger::Below(SpreadControl, 45.0),
        key: "poor_spray",
        name: "Poor Spray Control",
        severity: Frequent,
        description: "Recoil pattern is not being compensated, shots walking off target.",
        coaching_note: "Learn the recoil pattern for your main weapon. Practice in deathmatch at close range.",
    },
    HabitRule {
        trigger: Trigger::Below(OvershootControl, 45.0),
        key: "overshoot",
        name: "Overshoot Pattern",
        severity: Occasional,
        description: "Crosshair consistently passes through the target without stopping on it.",
        coaching_note: "Slow down intentionally in practice. The stop is a separate skill from the flick.",
    },
    HabitRule {
        trigger: Trigger::Below(Consistency, 45.0),
        key: "inconsistent",
        name: "Mechanical Inconsistency",
        severity: Occasional,
        description: "Large variance between your best and worst engagements.",
        coaching_note: "Warm up before ranked. 10 minutes of aim training sets your mechanical floor.",
    },
    HabitRule {
        trigger: Trigger::BothAbove((TargetAcquisition, 75.0), (SpreadControl, 70.0)),
        key: "strong_aim",
        name: "Strong Aim Foundation",
        severity: Consistent,
        description: "Target acquisition and spread control are both above average — a reliable mechanical base.",
        coaching_note: "Maintain your warmup routine. Your foundation is solid.",
    },
    HabitRule {
        trigger: Trigger::Below(SessionMomentum, 40.0),
        key: "session_fade",
        name: "Session Fade",
        severity: Occasional,
        description: "Performance drops in the second half of the session.",
        coaching_note: "Shorten sessions or take a break after 45 minutes.",
    },
];

static RACING_RULES: &[HabitRule] = &[
    HabitRule {
        trigger: Trigger::Below(BrakingConsistency, 50.0),
        key: "brake_inconsistent",
        name: "Inconsistent Brake Points",
        severity: Frequent,
        description: "Braking too late or too early corner to corner.",
        coaching_note: "Pick one fixed marker per corner and brake at the same point every lap.",
    },
    HabitRule {
        trigger: Trigger::Below(ApexPrecision, 50.0),
        key: "missed_apex",
        name: "Missing the Apex",
        severity: Occasional,
        description: "Turning in too early, clipping wide of the geometric apex.",
        coaching_note: "Turn in slightly later. Most drivers turn in too early.",
    },
    HabitRule {
        trigger: Trigger::Above(LapConsistency, 72.0),
        key: "consistent_laps",
        name: "Consistent Lap Times",
        severity: Consistent,
        description: "Low variance across laps — strong mechanical repeatability.",
        coaching_note: "Now focus on bringing the average down rather than reducing variance.",
    },
];

static SPORTS_RULES: &[HabitRule] = &[
    HabitRule {
        trigger: Trigger::Below(PressurePerformance, 45.0),
        key: "pressure_drop",
        name: "Pressure Performance Drop",
        severity: Frequent,
        description: "Measurably worse in high-pressure moments.",
        coaching_note: "Practice in ranked or tournament modes. Pressure tolerance is trainable.",
    },
    HabitRule {
        trigger: Trigger::Below(InputTiming, 45.0),
        key: "input_timing",
        name: "Input Timing Off",
        severity: Occasional,
        description: "Inputs consistently early or late relative to the optimal window.",
        coaching_note: "Use practice/training mode at reduced speed to master timing.",
    },
    HabitRule {
        trigger: Trigger::Above(ExecutionConsistency, 72.0),
        key: "clean_execution",
        name: "Clean Execution",
        severity: Consistent,
        description: "Plays executed reliably and consistently.",
        coaching_note: "Strong execution base — expand your play variety.",
    },
];

static STRATEGY_RULES: &[HabitRule] = &[
    HabitRule {
        trigger: Trigger::Below(AttentionSwitching, 45.0),
        key: "camera_lock",
        name: "Camera Lock",
        severity: Frequent,
        description: "Camera staying in one area too long, missing map-wide information.",
        coaching_note: "Force camera movement every 10 seconds. Set a timer if needed.",
    },
    HabitRule {
        trigger: Trigger::Below(ResourceEfficiency, 45.0),
        key: "resource_float",
        name: "Resource Floating",
        severity: Occasional,
        description: "Resources accumulating without being spent.",
        coaching_note: "Always be building or spending. Floating resources is lost advantage.",
    },
    HabitRule {
        trigger: Trigger::Above(DecisionRhythm, 70.0),
        key: "good_rhythm",
        name: "Strong Decision Rhythm",
        severity: Consistent,
        description: "Decisions are made at a consistent, efficient pace.",
        coaching_note: "Your timing is a competitive advantage. Keep refining build order.",
    },
];

static FIGHTING_RULES: &[HabitRule] = &[
    HabitRule {
        trigger: Trigger::Below(ComboExecution, 50.0),
        key: "dropped_combos",
        name: "Dropped Combos",
        severity: Frequent,
        description: "Combos dropped mid-sequence, leaving significant damage on the table.",
        coaching_note: "Slow down in training mode. Speed comes from muscle memory, not rushing.",
    },
    HabitRule {
        trigger: Trigger::Below(PunishAccuracy, 45.0),
        key: "missed_punish",
        name: "Missed Punish Windows",
        severity: Occasional,
        description: "Not consistently converting on opponent mistakes.",
        coaching_note: "Drill your punish scenarios specifically in training mode.",
    },
    HabitRule {
        trigger: Trigger::Above(InputPrecision, 75.0),
        key: "clean_inputs",
        name: "Clean Input Execution",
        severity: Consistent,
        description: "Inputs are precise with low mis-input rate.",
        coaching_note: "Strong input foundation — build more complex sequences on top.",
    },
];

/// The ordered rule list for a category.
pub fn rules(category: Category) -> &'static [HabitRule] {
    match category {
        Category::Fps => FPS_RULES,
        Category::Racing => RACING_RULES,
        Category::Sports => SPORTS_RULES,
        Category::Strategy => STRATEGY_RULES,
        Category::Fighting => FIGHTING_RULES,
    }
}

/// Detect habits for `category`, in rule order.
pub fn detect(scores: &DimensionScores, category: Category) -> Vec<Habit> {
    rules(category)
        .iter()
        .filter(|rule| rule.trigger.fires(scores))
        .map(HabitRule::to_habit)
        .collect()
}
