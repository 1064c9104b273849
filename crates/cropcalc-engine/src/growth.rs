//! Per-tick growth-point gain distributions.
//!
//! Every tick a crop draws a base value uniformly from
//! `[3 + growth, 9 + growth]` and gains
//! `floor(base * (100 + value - need) / 100)` growth points. When the need
//! exceeds the environmental value by more than [`STARVATION_MARGIN`] the
//! crop starves instead: it dies eventually unless its resistance is the
//! immortal sentinel, in which case it simply stops growing.
//!
//! A fertilized crop sees its nutrient storage wander over `[100, 200)`, so
//! [`average_growth_points_with_nutrition`] mixes the per-level
//! distributions uniformly.

use cropcalc_types::{CropProfile, EnvironmentalContext};

use crate::distribution::{Distribution, WeightedOutcome, merge};
use crate::environment::{environmental_need, environmental_value};

/// Largest need-over-value deficit a crop survives.
pub const STARVATION_MARGIN: i64 = 25;

/// Smallest base draw before the growth stat is added.
const BASE_DRAW_MIN: i64 = 3;

/// Number of equally likely base draws.
const BASE_DRAW_COUNT: i64 = 7;

/// Nutrient storage used when the crop is not fertilized.
pub const UNFERTILIZED_NUTRIENT_STORAGE: f64 = 0.0;

/// Lowest nutrient storage level of a fertilized crop (inclusive).
pub const FERTILIZED_STORAGE_MIN: u32 = 100;

/// Highest nutrient storage level of a fertilized crop (exclusive).
pub const FERTILIZED_STORAGE_MAX: u32 = 200;

/// Growth-point gain distribution for a single tick at a fixed nutrient
/// storage level.
///
/// The seven outcomes are returned in draw order and are not coalesced, so
/// equal gains may appear more than once.
pub fn gained_growth_points(
    profile: &CropProfile,
    ctx: &EnvironmentalContext,
    nutrient_storage: f64,
) -> Distribution<i64> {
    let need = environmental_need(profile.tier, &ctx.stats);
    let value = environmental_value(profile, ctx, nutrient_storage);

    if need.saturating_sub(value) > STARVATION_MARGIN {
        if ctx.stats.is_immortal() {
            tracing::debug!(
                crop = %profile.name,
                need,
                value,
                "starving crop has immortal resistance, growth stalls"
            );
            return Distribution::Outcomes(WeightedOutcome::certain(0));
        }
        tracing::debug!(crop = %profile.name, need, value, "starving crop will die");
        return Distribution::Death;
    }

    let multiplier = 100_i64.saturating_add(value).saturating_sub(need);
    let base_min = BASE_DRAW_MIN.saturating_add(i64::from(ctx.stats.growth));
    let base_max = base_min.saturating_add(BASE_DRAW_COUNT).saturating_sub(1);
    let probability = 1.0 / 7.0;

    let mut outcomes = WeightedOutcome::with_capacity(7);
    for base in base_min..=base_max {
        // Exact integer floor: the multiplier is at least 75 here.
        let growth = base.saturating_mul(multiplier).div_euclid(100);
        outcomes.push(growth, probability);
    }
    Distribution::from_outcomes(outcomes)
}

/// Growth-point gain distribution averaged over every nutrient storage
/// level a fertilized crop passes through.
///
/// If the crop dies at any one level it dies overall. The merged list is
/// sorted ascending by gain.
pub fn average_growth_points_with_nutrition(
    profile: &CropProfile,
    ctx: &EnvironmentalContext,
) -> Distribution<i64> {
    let mut per_level = Vec::with_capacity(100);
    for storage in FERTILIZED_STORAGE_MIN..FERTILIZED_STORAGE_MAX {
        match gained_growth_points(profile, ctx, f64::from(storage)) {
            Distribution::Death => {
                tracing::debug!(
                    crop = %profile.name,
                    nutrient_storage = storage,
                    "crop dies at this nutrient level, fertilized growth is unsustainable"
                );
                return Distribution::Death;
            }
            Distribution::Outcomes(outcomes) => per_level.push(outcomes),
        }
    }

    let mut merged = merge(&per_level);
    merged.sort_by_value();
    Distribution::from_outcomes(merged)
}

/// The growth distribution that governs `ctx`: averaged over nutrient
/// levels when fertilized, at zero storage otherwise.
pub fn growth_distribution(
    profile: &CropProfile,
    ctx: &EnvironmentalContext,
) -> Distribution<i64> {
    if ctx.fertilized {
        average_growth_points_with_nutrition(profile, ctx)
    } else {
        gained_growth_points(profile, ctx, UNFERTILIZED_NUTRIENT_STORAGE)
    }
}
