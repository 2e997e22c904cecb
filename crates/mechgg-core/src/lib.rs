//! mechgg-core — Skill scoring, habit detection and drill planning.
//!
//! The analysis pipeline (game resolution, score synthesis, aggregation,
//! habit detection and summary) is pure and deterministic: the same seed and
//! game always produce the same result. [`engine::CoachService`] layers
//! persistence, ownership checks and quotas on top through the traits in
//! [`traits`].

pub mod aggregate;
pub mod analysis;
pub mod drills;
pub mod engine;
pub mod error;
pub mod games;
pub mod habits;
pub mod model;
pub mod progress;
pub mod report;
pub mod statistics;
pub mod summary;
pub mod synth;
pub mod traits;
