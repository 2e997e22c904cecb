//! Drill library and four-week plan assembly.
//!
//! The library is a static table keyed by habit. Plans are a pure function of
//! the habit list, so building twice from the same analysis gives the same
//! weeks, drills and order.

use crate::model::{Category, Difficulty, Drill, DrillDefinition, DrillPlan, Habit, Severity, WeekPlan};

/// Drills taken from each habit's library entry.
pub const DRILLS_PER_HABIT: usize = 2;
/// Drill caps for weeks 1 to 3.
pub const WEEK1_CAP: usize = 4;
pub const WEEK2_CAP: usize = 4;
pub const WEEK3_CAP: usize = 3;

const fn drill(
    id: &'static str,
    name: &'static str,
    duration: &'static str,
    frequency: &'static str,
    description: &'static str,
    difficulty: Difficulty,
) -> DrillDefinition {
    DrillDefinition {
        id,
        name,
        duration,
        frequency,
        description,
        difficulty,
    }
}

use Difficulty::*;

static SLOW_ACQUISITION: &[DrillDefinition] = &[
    drill("acq1", "Flick Shot Warmup", "10 min", "Daily", "In Aimlabs or Kovaaks, run the Gridshot task. Focus on clicking the moment the target appears — not after. Speed first, accuracy follows.", Beginner),
    drill("acq2", "Target Switch Drill", "8 min", "Daily", "Use a tracking scenario and manually switch targets every 0.5s. Train your eyes to lead your crosshair to new targets.", Intermediate),
    drill("acq3", "Deathmatch First Contact", "15 min", "3x/week", "In deathmatch, focus only on getting the first shot on target within 0.3s of spotting an enemy. Ignore the kill.", Intermediate),
];

static POOR_SPRAY: &[DrillDefinition] = &[
    drill("spr1", "Spray Pattern Trace", "10 min", "Daily", "Pull out your main weapon in the practice range. Fire a full magazine at a wall, study the pattern. Then practice pulling down and left/right to counter it.", Beginner),
    drill("spr2", "7-bullet Burst Control", "8 min", "Daily", "Fire in 7-round bursts with deliberate pauses. This builds the habit of stopping spray before it becomes uncontrollable.", Beginner),
    drill("spr3", "Moving Spray Control", "12 min", "3x/week", "Practice counter-strafing: move, stop fully, then fire 5 rounds. The stop must be complete before shooting.", Intermediate),
];

static OVERSHOOT: &[DrillDefinition] = &[
    drill("ov1", "Slow Flick Training", "10 min", "Daily", "Set aim trainer to 50% speed. Focus on stopping exactly on target — not past it. The pause is a separate skill from the movement.", Beginner),
    drill("ov2", "Micro-adjustment Drill", "8 min", "Daily", "Start your crosshair 5 degrees off target and make small corrections to land on it. Builds fine motor control for the last 10% of a flick.", Intermediate),
];

static INCONSISTENT: &[DrillDefinition] = &[
    drill("inc1", "Pre-session Warmup Routine", "15 min", "Before every session", "Do the same 3 aim tasks in order before every ranked game. Consistency in warmup builds consistency in play.", Beginner),
    drill("inc2", "Session Length Cap", "90 min max", "Daily", "Cut sessions to 90 minutes maximum. Most variance comes from mental fatigue in hour 2+.", Beginner),
];

static SESSION_FADE: &[DrillDefinition] = &[
    drill("sf1", "45-minute Break Rule", "5 min break", "Every 45 min", "Set a timer. After 45 minutes of play, take a 5-minute break — stand up, look away from the screen. Return refreshed.", Beginner),
];

static BRAKE_INCONSISTENT: &[DrillDefinition] = &[
    drill("br1", "Marker Braking", "20 min", "Daily", "Pick one track and one corner. Identify a fixed visual marker (sign, patch of grass). Brake at exactly that marker every lap for 20 minutes.", Beginner),
    drill("br2", "Trail Braking Practice", "15 min", "3x/week", "Practice releasing the brake gradually as you turn in — not all at once. This is the most consistent braking technique at high level.", Intermediate),
];

static MISSED_APEX: &[DrillDefinition] = &[
    drill("ap1", "Late Apex Drill", "20 min", "Daily", "Turn in later than feels natural. Most drivers apex too early. Aim to be still turning at the apex cone, not opening throttle.", Beginner),
    drill("ap2", "One Corner Focus", "30 min", "Daily", "Pick one difficult corner and run it 50 times in a row. Focus only on that one corner until it is perfect.", Intermediate),
];

static PRESSURE_DROP: &[DrillDefinition] = &[
    drill("pr1", "High-Stakes Practice Mode", "15 min", "Daily", "Only play ranked or tournament modes. Pressure tolerance is trained by repeated exposure, not casual play.", Intermediate),
    drill("pr2", "Pre-performance Routine", "3 min", "Before important matches", "Develop a 3-minute pre-match routine: breathing exercise, review your 3 key focus points, then start. Routine reduces anxiety variance.", Beginner),
];

static INPUT_TIMING: &[DrillDefinition] = &[
    drill("it1", "Slow Practice Mode", "20 min", "Daily", "Use training/practice mode at 75% speed. Master the timing at reduced speed before returning to full speed.", Beginner),
    drill("it2", "Input Window Analysis", "10 min", "Weekly", "Record your practice sessions and review frame-by-frame where your inputs land relative to the optimal window.", Advanced),
];

static CAMERA_LOCK: &[DrillDefinition] = &[
    drill("cl1", "10-second Camera Sweep", "15 min", "Daily", "Set a phone timer to buzz every 10 seconds. Every buzz = move your camera to check the minimap and one other area of the map.", Beginner),
    drill("cl2", "Minimap-first Rule", "During play", "Every game", "Every time you finish an action (kill unit, cast spell, place building), look at minimap before anything else.", Intermediate),
];

static RESOURCE_FLOAT: &[DrillDefinition] = &[
    drill("rf1", "Zero Float Challenge", "30 min", "Daily", "Play a practice game with one rule: resources can never exceed 200. This forces constant spending and builds the habit permanently.", Intermediate),
];

static DROPPED_COMBOS: &[DrillDefinition] = &[
    drill("dc1", "Combo Slow Motion", "20 min", "Daily", "In training mode, set controller input speed to minimum. Execute your BnB combo perfectly at slow speed 50 times before increasing.", Beginner),
    drill("dc2", "Single Link Focus", "15 min", "Daily", "Pick the one link you drop most often. Drill just that link 100 times per session until it is automatic.", Intermediate),
];

static MISSED_PUNISH: &[DrillDefinition] = &[
    drill("mp1", "Punish Scenario Drilling", "20 min", "Daily", "Set the CPU to loop a specific unsafe move. Practice punishing it 100 times until the response is completely automatic.", Beginner),
    drill("mp2", "Frame Data Study", "10 min", "Weekly", "Review the frame data for your 5 most common matchups. Know the exact punish for each unsafe move by heart.", Intermediate),
];

/// Used for weeks whose source habit list is empty.
static FUNDAMENTALS: &[DrillDefinition] = &[
    drill("gen1", "Structured Warmup", "10 min", "Before every session", "Run the same short warmup before every session: a few minutes of your game's practice mode, then one easy match. A fixed routine sets your mechanical floor.", Beginner),
    drill("gen2", "Replay Spot Check", "10 min", "3x/week", "Watch back one round, lap or game from your last session at half speed. Note one moment you would play differently and try it next session.", Beginner),
];

/// Week 4 meta-drills, present in every plan.
static EVALUATION: &[DrillDefinition] = &[
    drill("eval1", "Re-analyze a Clip", "Analysis", "This week", "Upload a new clip of the same game. Compare your new Mechanical Index to this session. Focus on whether the targeted habits appear less frequently.", AllLevels),
    drill("eval2", "Session Review", "10 min", "After each session", "After each session this week, write down 3 moments where you caught yourself making the old habit and corrected it.", AllLevels),
];

/// Library entries for a habit key. Unknown keys have no drills.
pub fn library(habit_key: &str) -> &'static [DrillDefinition] {
    match habit_key {
        "slow_acquisition" => SLOW_ACQUISITION,
        "poor_spray" => POOR_SPRAY,
        "overshoot" => OVERSHOOT,
        "inconsistent" => INCONSISTENT,
        "session_fade" => SESSION_FADE,
        "brake_inconsistent" => BRAKE_INCONSISTENT,
        "missed_apex" => MISSED_APEX,
        "pressure_drop" => PRESSURE_DROP,
        "input_timing" => INPUT_TIMING,
        "camera_lock" => CAMERA_LOCK,
        "resource_float" => RESOURCE_FLOAT,
        "dropped_combos" => DROPPED_COMBOS,
        "missed_punish" => MISSED_PUNISH,
        _ => &[],
    }
}

/// Drills for an ordered habit list: the first few of each library entry,
/// in habit priority order, truncated to `cap`.
fn gather(habits: &[&Habit], cap: usize) -> Vec<Drill> {
    if habits.is_empty() {
        return FUNDAMENTALS.iter().take(cap).map(Drill::from).collect();
    }
    habits
        .iter()
        .flat_map(|h| library(&h.key).iter().take(DRILLS_PER_HABIT))
        .take(cap)
        .map(Drill::from)
        .collect()
}

fn theme(habits: &[&Habit], fallback: &str) -> String {
    if habits.is_empty() {
        fallback.to_string()
    } else {
        habits
            .iter()
            .map(|h| h.name.as_str())
            .collect::<Vec<_>>()
            .join(" + ")
    }
}

/// Build the four-week plan for an analysis's habits.
pub fn build_plan(habits: &[Habit], category: Category) -> DrillPlan {
    let negative: Vec<&Habit> = habits.iter().filter(|h| !h.is_positive).collect();

    let week1_habits: Vec<&Habit> = negative
        .iter()
        .copied()
        .filter(|h| h.severity == Severity::Frequent)
        .take(2)
        .collect();
    let week2_habits: Vec<&Habit> = negative
        .iter()
        .copied()
        .filter(|h| h.severity == Severity::Occasional)
        .take(2)
        .collect();
    let depth_habits: Vec<&Habit> = week1_habits
        .iter()
        .chain(week2_habits.iter())
        .copied()
        .collect();
    let top_habits: Vec<&Habit> = negative.iter().copied().take(3).collect();

    let weeks = vec![
        WeekPlan {
            week: 1,
            focus: "Foundation — Address Critical Habits".into(),
            theme: theme(&week1_habits, "General Mechanics"),
            drills: gather(&week1_habits, WEEK1_CAP),
            daily_time: "20-30 min".into(),
            goal: "Build awareness of your most frequent mechanical errors".into(),
        },
        WeekPlan {
            week: 2,
            focus: "Depth — Secondary Habit Work".into(),
            theme: theme(&week2_habits, "Consistency Building"),
            drills: gather(&depth_habits, WEEK2_CAP),
            daily_time: "25-35 min".into(),
            goal: "Reinforce Week 1 improvements while addressing secondary issues".into(),
        },
        WeekPlan {
            week: 3,
            focus: "Integration — Combine all corrections in live play".into(),
            theme: "Applied Practice".into(),
            drills: gather(&top_habits, WEEK3_CAP),
            daily_time: "30-40 min".into(),
            goal: "Apply trained corrections in real matches. Review after each session.".into(),
        },
        WeekPlan {
            week: 4,
            focus: "Measurement — Re-analyze and compare progress".into(),
            theme: "Progress Evaluation".into(),
            drills: EVALUATION.iter().map(Drill::from).collect(),
            daily_time: "15-20 min".into(),
            goal: "Measure improvement and identify any habits that need another cycle".into(),
        },
    ];

    tracing::debug!(
        %category,
        negative = negative.len(),
        drills = weeks.iter().map(|w| w.drills.len()).sum::<usize>(),
        "built drill plan"
    );

    DrillPlan {
        category,
        total_weeks: 4,
        estimated_daily_time: "20-40 min".into(),
        target_habits: negative.iter().map(|h| h.name.clone()).collect(),
        weeks,
    }
}
