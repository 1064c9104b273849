//! Builders for the crop families that derive their growth data from a few
//! parameters instead of listing it.
//!
//! Each builder returns a complete [`CropProfile`]; individual crops
//! override fields with struct update syntax:
//!
//! ```
//! use cropcalc_types::{CropProfile, DropEntry};
//!
//! let ardite = CropProfile {
//!     growth_stages: vec![500, 3000, 3000, 0],
//!     drops: vec![DropEntry::new("Ardite Nugget", 1, 1.0)],
//!     ..CropProfile::cpp_tinker_berry("Ardite Berry", 7, 4)
//! };
//! assert_eq!(ardite.humidity_weight, 0.5);
//! ```

use crate::enums::StageAfterHarvest;
use crate::ids::{CropName, ItemId};
use crate::structs::{CropProfile, DropEntry, uniform_stages};

/// Growth points per non-terminal stage, per tier, for `GregTech` crops.
pub const GREGTECH_STAGE_POINTS_PER_TIER: u32 = 300;

/// Stage duration of a `GT++` crop when it does not set its own.
pub const GT_PLUS_PLUS_STAGE_DURATION: u32 = 225;

/// Stage duration of a `Crops++` decoration crop.
pub const CPP_DECORATION_STAGE_DURATION: u32 = 225;

/// Humidity, nutrient, and air quality weights shared by `GT++` crops and
/// `Crops++` berries.
const BERRY_WEIGHTS: (f64, f64, f64) = (1.2, 0.9, 0.9);

impl CropProfile {
    /// A `GregTech` crop.
    ///
    /// Stages last `tier * 300` points. Without special drops the crop
    /// always drops `default_drop`; with `n` special drops the default drop
    /// weighs `(2 + n) / (2n + 2)` and each special drop `1 / (2n + 2)`.
    pub fn gregtech<I>(
        name: impl Into<CropName>,
        tier: u32,
        max_size: u32,
        default_drop: impl Into<ItemId>,
        special_drops: I,
    ) -> Self
    where
        I: IntoIterator,
        I::Item: Into<ItemId>,
    {
        let special: Vec<ItemId> = special_drops.into_iter().map(Into::into).collect();
        let drops = if special.is_empty() {
            vec![DropEntry::new(default_drop, 1, 1.0)]
        } else {
            let n = f64::from(u32::try_from(special.len()).unwrap_or(u32::MAX));
            let total_weight = 2.0 * n + 2.0;
            let mut drops = Vec::with_capacity(special.len().saturating_add(1));
            drops.push(DropEntry::new(default_drop, 1, (2.0 + n) / total_weight));
            drops.extend(
                special
                    .into_iter()
                    .map(|item| DropEntry::new(item, 1, 1.0 / total_weight)),
            );
            drops
        };

        let stage_points = tier.saturating_mul(GREGTECH_STAGE_POINTS_PER_TIER);
        Self {
            growth_stages: uniform_stages(stage_points, max_size),
            drops,
            ..Self::with_tier_defaults(name, tier, max_size)
        }
    }

    /// A `GT++` harvestable crop: three stages of `stage_duration` points
    /// (the terminal one 0) and the berry weights.
    pub fn gt_plus_plus(name: impl Into<CropName>, tier: u32, stage_duration: u32) -> Self {
        let (humidity_weight, nutrient_weight, air_quality_weight) = BERRY_WEIGHTS;
        Self {
            humidity_weight,
            nutrient_weight,
            air_quality_weight,
            growth_stages: uniform_stages(stage_duration, 3),
            ..Self::with_tier_defaults(name, tier, 3)
        }
    }

    /// An IC2 flower: tier 2, stages `[400, 400, 600, 0]`, back to stage 3
    /// after harvest, one `drop` per drop.
    pub fn ic2_flower(name: impl Into<CropName>, drop: impl Into<ItemId>) -> Self {
        Self {
            growth_stages: vec![400, 400, 600, 0],
            growth_stage_after_harvest: StageAfterHarvest::Fixed(3),
            drops: vec![DropEntry::new(drop, 1, 1.0)],
            ..Self::with_tier_defaults(name, 2, 4)
        }
    }

    /// A `Crops++` berry: stages `[700, 200, 0]`, back to stage 2 after
    /// harvest.
    pub fn cpp_berry(name: impl Into<CropName>, tier: u32) -> Self {
        let (humidity_weight, nutrient_weight, air_quality_weight) = BERRY_WEIGHTS;
        Self {
            humidity_weight,
            nutrient_weight,
            air_quality_weight,
            growth_stages: vec![700, 200, 0],
            growth_stage_after_harvest: StageAfterHarvest::Fixed(2),
            ..Self::with_tier_defaults(name, tier, 3)
        }
    }

    /// A `Crops++` decoration or food crop: berry weights, `max_size`
    /// stages of 225 points, back to stage 1 after harvest.
    pub fn cpp_decoration(name: impl Into<CropName>, tier: u32, max_size: u32) -> Self {
        Self {
            growth_stages: uniform_stages(CPP_DECORATION_STAGE_DURATION, max_size),
            growth_stage_after_harvest: StageAfterHarvest::Fixed(1),
            ..Self::cpp_berry(name, tier)
        }
    }

    /// A Tinkers' Construct ore berry from `Crops++`: tier-default stages,
    /// nutrient-heavy weights, back to stage 2 after harvest.
    pub fn cpp_tinker_berry(name: impl Into<CropName>, tier: u32, max_size: u32) -> Self {
        Self {
            humidity_weight: 0.5,
            nutrient_weight: 1.5,
            air_quality_weight: 1.0,
            growth_stage_after_harvest: StageAfterHarvest::Fixed(2),
            ..Self::with_tier_defaults(name, tier, max_size)
        }
    }
}
