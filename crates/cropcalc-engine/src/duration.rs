//! Expected number of ticks to cross one growth stage.
//!
//! Backward dynamic programming over growth-point positions. `E[i]` is the
//! expected number of ticks to go from `i` growth points to the stage
//! boundary `L`. Each nonzero gain `g` charges one tick plus the remaining
//! expectation:
//!
//! ```text
//! E[L] = 0
//! sum  = sum over g != 0 of p(g) * (1 + E[i + g])      (E[j] = 0 for j >= L)
//! E[i] = sum                                           without a zero gain
//! E[i] = (1 + sum) / (1 - p(0))                        with a zero gain
//! ```
//!
//! The zero-gain rescale is the geometric waiting-time closed form, so no
//! explicit geometric series is summed.

use crate::config::EngineConfig;
use crate::distribution::WeightedOutcome;
use crate::error::EngineError;

/// Expected ticks to go from 0 growth points to `stage_duration`, given the
/// per-tick gain distribution `gains`.
///
/// A stage of duration 0 takes 0 ticks whatever the distribution.
///
/// # Errors
///
/// - [`EngineError::StageTooLong`] if `stage_duration` exceeds
///   `config.max_stage_duration`.
/// - [`EngineError::EmptyDistribution`] if `gains` has no outcomes.
/// - [`EngineError::NegativeGrowth`] if any gain is negative.
/// - [`EngineError::NeverCompletes`] if the crop gains nothing with
///   probability 1, so the stage is never left.
pub fn expected_ticks_in_stage(
    stage_duration: u32,
    gains: &WeightedOutcome<i64>,
    config: &EngineConfig,
) -> Result<f64, EngineError> {
    if stage_duration > config.max_stage_duration {
        return Err(EngineError::StageTooLong {
            duration: stage_duration,
            max: config.max_stage_duration,
        });
    }
    if gains.is_empty() {
        return Err(EngineError::EmptyDistribution);
    }
    if let Some(negative) = gains.iter().find(|w| w.value < 0) {
        return Err(EngineError::NegativeGrowth(negative.value));
    }
    if stage_duration == 0 {
        return Ok(0.0);
    }

    let has_self_loop = gains.iter().any(|w| w.value == 0);
    let self_loop: f64 = gains
        .iter()
        .filter(|w| w.value == 0)
        .map(|w| w.probability)
        .sum();
    let leave_probability = 1.0 - self_loop;
    if leave_probability <= config.probability_tolerance {
        tracing::debug!(
            stage_duration,
            self_loop_probability = self_loop,
            "crop never gains growth points, stage is unbounded"
        );
        return Err(EngineError::NeverCompletes {
            stage_duration,
            self_loop_probability: self_loop,
        });
    }

    let steps: Vec<(usize, f64)> = gains
        .iter()
        .filter(|w| w.value > 0)
        .map(|w| (usize::try_from(w.value).unwrap_or(usize::MAX), w.probability))
        .collect();

    let boundary = usize::try_from(stage_duration).unwrap_or(usize::MAX);
    let mut expected = vec![0.0_f64; boundary.saturating_add(1)];

    for position in (0..boundary).rev() {
        let mut sum = 0.0;
        for &(gain, probability) in &steps {
            let target = position.saturating_add(gain);
            // Positions past the boundary cost only the step itself.
            let remaining = expected.get(target).copied().unwrap_or(0.0);
            sum += probability * (1.0 + remaining);
        }
        if has_self_loop {
            sum = (1.0 + sum) / leave_probability;
        }
        if let Some(slot) = expected.get_mut(position) {
            *slot = sum;
        }
    }

    Ok(expected.first().copied().unwrap_or(0.0))
}
