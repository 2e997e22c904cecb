//! Weighted blend of dimension scores into the composite Mechanical Index.

use crate::model::{Category, DimensionScores, Style};
use crate::synth::round1;

/// Weights in the category's declared dimension order. Each row sums to 1.0.
const FPS_TACTICAL: [f64; 6] = [0.30, 0.25, 0.15, 0.15, 0.10, 0.05];
const FPS_BATTLE_ROYALE: [f64; 6] = [0.22, 0.20, 0.25, 0.13, 0.12, 0.08];
const FPS_HERO: [f64; 6] = [0.20, 0.18, 0.30, 0.12, 0.12, 0.08];
const RACING: [f64; 6] = [0.25, 0.25, 0.20, 0.15, 0.10, 0.05];
const SPORTS: [f64; 6] = [0.20, 0.25, 0.20, 0.15, 0.15, 0.05];
const STRATEGY: [f64; 6] = [0.20, 0.20, 0.20, 0.20, 0.10, 0.10];
const FIGHTING: [f64; 6] = [0.25, 0.25, 0.20, 0.15, 0.10, 0.05];

/// Style-specific weight row, if one exists.
fn style_weights(category: Category, style: Style) -> Option<&'static [f64; 6]> {
    match (category, style) {
        (Category::Fps, Style::Tactical) => Some(&FPS_TACTICAL),
        (Category::Fps, Style::BattleRoyale) => Some(&FPS_BATTLE_ROYALE),
        (Category::Fps, Style::Hero) => Some(&FPS_HERO),
        _ => None,
    }
}

/// The category default weight row.
fn default_weights(category: Category) -> &'static [f64; 6] {
    match category {
        Category::Fps => &FPS_TACTICAL,
        Category::Racing => &RACING,
        Category::Sports => &SPORTS,
        Category::Strategy => &STRATEGY,
        Category::Fighting => &FIGHTING,
    }
}

/// Resolved weights for `(category, style)`, falling back to the category default.
pub fn weights(category: Category, style: Style) -> &'static [f64; 6] {
    style_weights(category, style).unwrap_or_else(|| default_weights(category))
}

/// Compute the composite index, rounded to one decimal.
///
/// Dimensions missing from `scores` contribute nothing.
pub fn aggregate(scores: &DimensionScores, category: Category, style: Style) -> f64 {
    let weights = weights(category, style);
    let total: f64 = category
        .dimensions()
        .iter()
        .zip(weights.iter())
        .filter_map(|(dimension, weight)| scores.get(*dimension).map(|s| s * weight))
        .sum();
    round1(total)
}
