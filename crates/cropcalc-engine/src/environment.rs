//! Environmental readings: humidity, nutrients, air quality, and the
//! weighted environmental value a crop compares against its need.
//!
//! | Reading     | Formula |
//! |-------------|---------|
//! | need        | `4 * (tier - 1) + growth + gain + resistance` |
//! | humidity    | `biome + 2 (hydrated farmland) + 10 (hydrated)` |
//! | nutrients   | `biome + dirt blocks + ceil(storage / 20)` |
//! | air quality | `clamp(floor((height - 64) / 15), 0, 4) + floor(air / 2) + 2 (sky)` |
//! | value       | `5 * floor(wH * humidity + wN * nutrients + wA * air quality)` |
//!
//! All functions are total. Integer readings are widened to `i64` and use
//! saturating arithmetic.

use serde::{Deserialize, Serialize};

use cropcalc_types::{CropProfile, CropStats, EnvironmentalContext};

/// Humidity bonus for sitting on hydrated farmland.
const HYDRATED_FARMLAND_BONUS: i64 = 2;

/// Humidity bonus for a permanently full water storage.
const HYDRATION_BONUS: i64 = 10;

/// Nutrient storage units per nutrient point (rounded up).
const STORAGE_PER_NUTRIENT: f64 = 20.0;

/// Height at which the altitude bonus starts.
const SEA_LEVEL: i64 = 64;

/// Blocks of altitude per air quality point.
const BLOCKS_PER_HEIGHT_BONUS: i64 = 15;

/// Largest altitude bonus.
const MAX_HEIGHT_BONUS: i64 = 4;

/// Air quality bonus for sky access.
const SKY_ACCESS_BONUS: i64 = 2;

/// Multiplier applied to the floored weighted sum.
const VALUE_SCALE: i64 = 5;

/// Environmental need of a crop of the given tier with the given stats.
pub fn environmental_need(tier: u32, stats: &CropStats) -> i64 {
    i64::from(tier)
        .saturating_sub(1)
        .saturating_mul(4)
        .saturating_add(i64::from(stats.growth))
        .saturating_add(i64::from(stats.gain))
        .saturating_add(i64::from(stats.resistance))
}

/// Humidity reading of the context.
pub fn humidity(ctx: &EnvironmentalContext) -> i64 {
    let farmland = if ctx.atop_hydrated_farmland {
        HYDRATED_FARMLAND_BONUS
    } else {
        0
    };
    let hydration = if ctx.hydrated { HYDRATION_BONUS } else { 0 };
    i64::from(ctx.biome.humidity)
        .saturating_add(farmland)
        .saturating_add(hydration)
}

/// Nutrient reading at the given nutrient storage level.
///
/// The storage fluctuates over the crop's lifetime, so it is an argument
/// rather than part of the context.
#[allow(clippy::cast_possible_truncation)]
pub fn nutrients(ctx: &EnvironmentalContext, nutrient_storage: f64) -> i64 {
    let storage_bonus = (nutrient_storage / STORAGE_PER_NUTRIENT).ceil() as i64;
    i64::from(ctx.biome.nutrient)
        .saturating_add(i64::from(ctx.dirt_blocks_underneath))
        .saturating_add(storage_bonus)
}

/// Air quality reading of the context.
pub fn air_quality(ctx: &EnvironmentalContext) -> i64 {
    // Euclidean division floors for a positive divisor, also below sea level.
    let height_bonus = i64::from(ctx.height)
        .saturating_sub(SEA_LEVEL)
        .div_euclid(BLOCKS_PER_HEIGHT_BONUS)
        .clamp(0, MAX_HEIGHT_BONUS);
    let air_bonus = i64::from(ctx.surrounding_air_blocks / 2);
    let sky_bonus = if ctx.sky_access { SKY_ACCESS_BONUS } else { 0 };
    height_bonus.saturating_add(air_bonus).saturating_add(sky_bonus)
}

/// Weighted environmental value at the given nutrient storage level.
#[allow(clippy::cast_possible_truncation, clippy::cast_precision_loss)]
pub fn environmental_value(
    profile: &CropProfile,
    ctx: &EnvironmentalContext,
    nutrient_storage: f64,
) -> i64 {
    let weighted = profile.humidity_weight * humidity(ctx) as f64
        + profile.nutrient_weight * nutrients(ctx, nutrient_storage) as f64
        + profile.air_quality_weight * air_quality(ctx) as f64;
    (weighted.floor() as i64).saturating_mul(VALUE_SCALE)
}

/// All environmental readings for one crop at one nutrient storage level.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EnvironmentReadings {
    /// Nutrient storage the readings were taken at.
    pub nutrient_storage: f64,
    /// Environmental need of the crop.
    pub need: i64,
    /// Humidity reading.
    pub humidity: i64,
    /// Nutrient reading.
    pub nutrients: i64,
    /// Air quality reading.
    pub air_quality: i64,
    /// Weighted environmental value.
    pub value: i64,
}

impl EnvironmentReadings {
    /// Evaluate every reading for `profile` planted in `ctx`.
    pub fn evaluate(
        profile: &CropProfile,
        ctx: &EnvironmentalContext,
        nutrient_storage: f64,
    ) -> Self {
        Self {
            nutrient_storage,
            need: environmental_need(profile.tier, &ctx.stats),
            humidity: humidity(ctx),
            nutrients: nutrients(ctx, nutrient_storage),
            air_quality: air_quality(ctx),
            value: environmental_value(profile, ctx, nutrient_storage),
        }
    }

    /// How far the need exceeds the value. Positive means a deficit.
    pub const fn deficit(&self) -> i64 {
        self.need.saturating_sub(self.value)
    }
}
