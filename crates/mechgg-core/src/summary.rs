//! Narrative coaching summary.

use crate::model::{Category, DimensionScores, Habit};

/// Opening sentences per category: (strong, solid, developing).
fn intros(category: Category) -> (&'static str, &'static str, &'static str) {
    match category {
        Category::Fps => (
            "Strong mechanical execution.",
            "Solid FPS foundation with room to grow.",
            "Several mechanical patterns detected that once corrected should improve your rank.",
        ),
        Category::Racing => (
            "Consistent and precise driving.",
            "Good racing fundamentals developing.",
            "Key areas identified that are directly impacting lap times.",
        ),
        Category::Sports => (
            "Strong execution under pressure.",
            "Solid sports game mechanics.",
            "Input timing and decision speed are the priority areas.",
        ),
        Category::Strategy => (
            "Strong strategic rhythm.",
            "Good strategic foundation.",
            "APM and attention management are the key areas to develop.",
        ),
        Category::Fighting => (
            "Clean inputs and reliable combo execution.",
            "Solid fighting game mechanics.",
            "Combo execution and punish accuracy are the primary focus.",
        ),
    }
}

/// Unweighted mean of the category's scores, rounded half up to an integer.
fn mean_tier_score(scores: &DimensionScores, category: Category) -> f64 {
    let values = scores.ordered(category);
    if values.is_empty() {
        return 0.0;
    }
    let mean = values.iter().map(|(_, s)| s).sum::<f64>() / values.len() as f64;
    (mean + 0.5).floor()
}

/// Compose the summary text from scores and the detected habits.
pub fn compose(scores: &DimensionScores, habits: &[Habit], category: Category) -> String {
    let (strong, solid, developing) = intros(category);
    let mean = mean_tier_score(scores, category);
    let intro = if mean >= 75.0 {
        strong
    } else if mean >= 55.0 {
        solid
    } else {
        developing
    };

    let mut parts = vec![intro.to_string()];
    if let Some(focus) = habits.iter().find(|h| !h.is_positive) {
        parts.push(format!(
            "Primary focus: {}. {}",
            focus.name, focus.description
        ));
    }
    if let Some(strength) = habits.iter().find(|h| h.is_positive) {
        parts.push(format!("Strength: {}", strength.description));
    }
    parts.join(" ").trim().to_string()
}
