//! The pure analysis pipeline: resolve → synthesize → aggregate → detect → compose.

use crate::aggregate::aggregate;
use crate::games::resolve;
use crate::habits::detect;
use crate::model::{AnalysisResult, Category, DimensionScores, Style};
use crate::summary::compose;
use crate::synth::synthesize;

/// Analyze a clip identified only by its seed and game.
pub fn analyze(seed: u32, game_id: &str) -> AnalysisResult {
    let (category, style) = resolve(game_id);
    let scores = synthesize(seed, category, style);
    score(scores, category, style)
}

/// Run the post-synthesis stages over an existing score set.
pub fn score(scores: DimensionScores, category: Category, style: Style) -> AnalysisResult {
    let composite_index = aggregate(&scores, category, style);
    let habits = detect(&scores, category);
    let summary = compose(&scores, &habits, category);

    tracing::debug!(
        %category,
        %style,
        composite_index,
        habits = habits.len(),
        "scored analysis"
    );

    AnalysisResult {
        category,
        style,
        dimension_scores: scores,
        composite_index,
        habits,
        summary,
    }
}
