//! Error types for the coaching service and its storage collaborators.
//!
//! The pure scoring stages never fail: unknown games, missing weight rows and
//! unknown drill keys all resolve to fixed fallbacks. Errors only arise at the
//! service boundary, where records are looked up, authorized and persisted.

use thiserror::Error;

/// Errors surfaced by [`crate::engine::CoachService`].
#[derive(Debug, Error)]
pub enum CoachError {
    /// The analysis does not exist or belongs to another user.
    #[error("analysis not found")]
    AnalysisNotFound,

    /// The plan does not exist or belongs to another user.
    #[error("plan not found")]
    PlanNotFound,

    /// The drill id does not appear in any week of the plan.
    #[error("drill '{0}' is not part of this plan")]
    InvalidDrill(String),

    /// The user's tier has no analyses left this month.
    #[error("monthly limit of {limit} analyses reached")]
    QuotaExceeded { limit: u32 },

    /// The storage backend failed.
    #[error("storage failure: {0}")]
    Storage(#[from] StoreError),
}

impl CoachError {
    /// Returns `true` for absent or foreign records.
    pub fn is_not_found(&self) -> bool {
        matches!(self, CoachError::AnalysisNotFound | CoachError::PlanNotFound)
    }

    /// Message safe to show to end users.
    ///
    /// Storage details stay in logs.
    pub fn public_message(&self) -> String {
        match self {
            CoachError::Storage(_) => "something went wrong, please try again".to_string(),
            other => other.to_string(),
        }
    }
}

/// Errors from a storage backend.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Stored data violates an invariant (e.g. two plans for one analysis).
    #[error("corrupt store: {0}")]
    Corrupt(String),
}
