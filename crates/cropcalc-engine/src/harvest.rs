//! Expected ticks between consecutive harvests.
//!
//! A harvest resets the crop to some earlier stage; it then has to grow
//! through every stage from there up to the terminal one before it can be
//! harvested again. With per-stage expectations `ET[i]`, the ticks needed
//! from stage `i` are the suffix sum `ExpSum[i] = ET[i] + ... + ET[n - 2]`.

use serde::{Deserialize, Serialize};

use cropcalc_types::{CropProfile, StageAfterHarvest};

use crate::config::EngineConfig;
use crate::distribution::WeightedOutcome;
use crate::duration::expected_ticks_in_stage;
use crate::error::EngineError;

/// Expected timing of one harvest cycle.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HarvestCycle {
    /// Expected ticks spent in each growing stage, indexed from zero.
    pub stage_ticks: Vec<f64>,
    /// Expected ticks from entering each stage to reaching the terminal
    /// stage. Has one more entry than `stage_ticks`; the last is 0.
    pub ticks_from_stage: Vec<f64>,
    /// Expected ticks between two consecutive harvests.
    pub ticks_between_harvests: f64,
}

/// Expected ticks between harvests for `profile` growing with the per-tick
/// gain distribution `gains`.
///
/// Callers must branch on [`Distribution::Death`](crate::distribution::Distribution::Death)
/// first; a dying crop has no harvest cycle.
///
/// # Errors
///
/// - [`EngineError::NoGrowingStages`] if the profile has only its terminal
///   stage.
/// - [`EngineError::StageAfterHarvestOutOfRange`] if a fixed reversion stage
///   is not in `1..=stage_count - 1`.
/// - Any error from [`expected_ticks_in_stage`], notably
///   [`EngineError::NeverCompletes`] for a stalled crop.
#[allow(clippy::cast_precision_loss)]
pub fn expected_ticks_between_harvests(
    profile: &CropProfile,
    gains: &WeightedOutcome<i64>,
    config: &EngineConfig,
) -> Result<HarvestCycle, EngineError> {
    let growing = profile.growing_stage_count();
    if growing == 0 {
        return Err(EngineError::NoGrowingStages);
    }

    let stage_ticks = profile
        .growth_stages
        .iter()
        .take(growing)
        .map(|&duration| expected_ticks_in_stage(duration, gains, config))
        .collect::<Result<Vec<f64>, EngineError>>()?;

    let mut ticks_from_stage = vec![0.0_f64; growing.saturating_add(1)];
    let mut running = 0.0;
    for (index, ticks) in stage_ticks.iter().enumerate().rev() {
        running += ticks;
        if let Some(slot) = ticks_from_stage.get_mut(index) {
            *slot = running;
        }
    }

    let ticks_between_harvests = match profile.growth_stage_after_harvest {
        StageAfterHarvest::Fixed(stage) => {
            let index = usize::try_from(stage)
                .ok()
                .and_then(|stage| stage.checked_sub(1))
                .filter(|&index| index < growing)
                .ok_or(EngineError::StageAfterHarvestOutOfRange {
                    stage,
                    max: growing,
                })?;
            ticks_from_stage.get(index).copied().unwrap_or(0.0)
        }
        StageAfterHarvest::Random => {
            let total: f64 = ticks_from_stage.iter().take(growing).sum();
            total / growing as f64
        }
    };

    tracing::debug!(
        crop = %profile.name,
        after_harvest = %profile.growth_stage_after_harvest,
        ticks_between_harvests,
        "harvest cycle computed"
    );

    Ok(HarvestCycle {
        stage_ticks,
        ticks_from_stage,
        ticks_between_harvests,
    })
}
