//! Error types for the `cropcalc-engine` crate.
//!
//! All fallible operations in this crate return [`EngineError`]. Death and
//! stalling are not errors at the report level: [`crate::report`] turns them
//! into a [`GrowthOutlook`](crate::report::GrowthOutlook) classification.

use cropcalc_types::CropName;

/// Errors that can occur while computing growth statistics.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum EngineError {
    /// A crop profile violates a structural invariant.
    #[error("invalid profile for crop {crop}: {reason}")]
    InvalidProfile {
        /// The offending crop.
        crop: CropName,
        /// What is wrong with it.
        reason: String,
    },

    /// Two catalog entries share a name.
    #[error("duplicate crop name: {0}")]
    DuplicateCrop(CropName),

    /// No catalog entry has the requested name.
    #[error("crop not found: {0}")]
    CropNotFound(CropName),

    /// A stage is longer than the configured solver limit.
    #[error("stage duration {duration} exceeds the limit of {max}")]
    StageTooLong {
        /// Requested stage duration in growth points.
        duration: u32,
        /// Configured maximum.
        max: u32,
    },

    /// The crop never gains growth points, so the stage never completes.
    #[error("stage of {stage_duration} growth points never completes (self-loop probability {self_loop_probability})")]
    NeverCompletes {
        /// Duration of the stage that cannot be left.
        stage_duration: u32,
        /// Probability of gaining nothing on a tick.
        self_loop_probability: f64,
    },

    /// A growth outcome is negative, which the backward solver cannot order.
    #[error("negative growth outcome: {0}")]
    NegativeGrowth(i64),

    /// The solver was handed an empty outcome list.
    #[error("growth distribution has no outcomes")]
    EmptyDistribution,

    /// The post-harvest stage index does not name a growing stage.
    #[error("stage after harvest {stage} is outside 1..={max}")]
    StageAfterHarvestOutOfRange {
        /// The configured 1-based stage.
        stage: u32,
        /// Largest valid stage index.
        max: usize,
    },

    /// The profile has only its terminal stage.
    #[error("profile has no growing stages")]
    NoGrowingStages,

    /// The drop-count tail did not fall below tolerance within the cap.
    #[error("drop count distribution for base chance {base_chance} did not converge within {cap} counts")]
    DropCountDidNotConverge {
        /// The base chance being expanded.
        base_chance: f64,
        /// Configured maximum drop count.
        cap: u32,
    },
}
