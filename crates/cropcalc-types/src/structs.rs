//! Core input structs: crop profiles, crop stats, and the environment a
//! crop is planted in.
//!
//! Everything here is plain data. The growth-statistics engine reads these
//! records but never mutates them.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::enums::StageAfterHarvest;
use crate::ids::{CropName, ItemId};

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

/// Resistance value that makes a starving crop stall instead of dying.
pub const IMMORTAL_RESISTANCE: i32 = 31;

/// Duration (in growth points) given to newly created growth stages.
pub const DEFAULT_STAGE_DURATION: u32 = 1000;

/// Growth points per non-terminal stage, per tier, for default crops.
pub const DEFAULT_STAGE_POINTS_PER_TIER: u32 = 200;

/// Per-tier decay of the default gain factor.
pub const DEFAULT_GAIN_DECAY: f64 = 0.95;

/// Gain factor a crop gets when its author does not override it: `0.95^tier`.
pub fn default_gain_factor(tier: u32) -> f64 {
    DEFAULT_GAIN_DECAY.powi(i32::try_from(tier).unwrap_or(i32::MAX))
}

// ---------------------------------------------------------------------------
// Crop stats
// ---------------------------------------------------------------------------

/// The three heritable stats of a planted crop.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[serde(default)]
#[ts(export, export_to = "bindings/")]
pub struct CropStats {
    /// Increases drop count and bonus items.
    pub gain: i32,
    /// Increases growth points gained per tick.
    pub growth: i32,
    /// Raises environmental need; 31 keeps a starving crop alive.
    pub resistance: i32,
}

impl CropStats {
    /// Build a stat block from `(gain, growth, resistance)`.
    pub const fn new(gain: i32, growth: i32, resistance: i32) -> Self {
        Self {
            gain,
            growth,
            resistance,
        }
    }

    /// Whether the resistance stat is the stall-instead-of-die sentinel.
    pub const fn is_immortal(&self) -> bool {
        self.resistance == IMMORTAL_RESISTANCE
    }
}

// ---------------------------------------------------------------------------
// Environment
// ---------------------------------------------------------------------------

/// Biome-dependent environmental bonuses, conventionally in `[-10, 10]`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[serde(default)]
#[ts(export, export_to = "bindings/")]
pub struct BiomeBonus {
    /// Added to the humidity reading.
    pub humidity: i32,
    /// Added to the nutrient reading.
    pub nutrient: i32,
}

/// Where and how a crop is planted.
///
/// The nutrient storage level is not part of the context: it fluctuates over
/// the crop's lifetime and is passed to each evaluation explicitly.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[serde(default)]
#[ts(export, export_to = "bindings/")]
pub struct EnvironmentalContext {
    /// Stats of the planted crop.
    pub stats: CropStats,
    /// Biome bonuses at the crop's position.
    pub biome: BiomeBonus,
    /// The crop sits on hydrated farmland (other soils grant no bonus).
    pub atop_hydrated_farmland: bool,
    /// Water storage is kept full at all times.
    pub hydrated: bool,
    /// Dirt blocks below the soil block, 0 to 3.
    pub dirt_blocks_underneath: u32,
    /// Nutrient storage is kept topped up, fluctuating over `[100, 200)`.
    pub fertilized: bool,
    /// Vertical position of the crop block.
    pub height: i32,
    /// Air blocks among the 8 horizontal neighbours, 0 to 8.
    pub surrounding_air_blocks: u32,
    /// The block above the crop can see the sky.
    pub sky_access: bool,
}

// ---------------------------------------------------------------------------
// Drops
// ---------------------------------------------------------------------------

/// One row of a crop's drop table.
///
/// Each drop picks exactly one row, with the given probability, and yields
/// `count` of `item` (plus a small chance of one bonus item).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct DropEntry {
    /// The dropped item.
    pub item: ItemId,
    /// Base stack size.
    pub count: u32,
    /// Chance this row is chosen for a single drop.
    pub probability: f64,
}

impl DropEntry {
    /// Build a drop table row.
    pub fn new(item: impl Into<ItemId>, count: u32, probability: f64) -> Self {
        Self {
            item: item.into(),
            count,
            probability,
        }
    }
}

// ---------------------------------------------------------------------------
// Crop profile
// ---------------------------------------------------------------------------

/// Static growth behaviour of one crop species.
///
/// `growth_stages` is indexed from zero here even though stage numbers in
/// crop documentation (and [`StageAfterHarvest::Fixed`]) start at one. The
/// last entry is the terminal, non-growing stage and is always 0; for
/// example the essence berry is `[500, 3000, 3000, 0]`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(default)]
#[ts(export, export_to = "bindings/")]
pub struct CropProfile {
    /// Catalog name.
    pub name: CropName,
    /// Crop tier; raises environmental need by 4 per tier.
    pub tier: u32,
    /// Weight of the humidity reading. May be fractional or negative.
    pub humidity_weight: f64,
    /// Weight of the nutrient reading. May be fractional or negative.
    pub nutrient_weight: f64,
    /// Weight of the air quality reading. May be fractional or negative.
    pub air_quality_weight: f64,
    /// Growth points needed to leave each stage; last entry is 0.
    pub growth_stages: Vec<u32>,
    /// Multiplier on the expected number of drops. May exceed 1.
    pub gain_factor: f64,
    /// Stage the crop reverts to after a harvest.
    #[ts(type = "number | \"random\"")]
    pub growth_stage_after_harvest: StageAfterHarvest,
    /// Drop table; probabilities sum to 1.
    pub drops: Vec<DropEntry>,
}

impl Default for CropProfile {
    fn default() -> Self {
        Self {
            name: CropName::from("Unnamed Crop"),
            tier: 0,
            humidity_weight: 1.0,
            nutrient_weight: 1.0,
            air_quality_weight: 1.0,
            growth_stages: vec![
                DEFAULT_STAGE_DURATION,
                DEFAULT_STAGE_DURATION,
                DEFAULT_STAGE_DURATION,
                0,
            ],
            gain_factor: 1.0,
            growth_stage_after_harvest: StageAfterHarvest::Fixed(1),
            drops: vec![DropEntry::new("drop", 1, 1.0)],
        }
    }
}

impl CropProfile {
    /// Build a crop with the stock defaults for its tier.
    ///
    /// Every non-terminal stage lasts `tier * 200` growth points, the gain
    /// factor is `0.95^tier`, and `max_size` is the number of stages
    /// including the terminal one. A `max_size` of 0 is treated as 1.
    pub fn with_tier_defaults(name: impl Into<CropName>, tier: u32, max_size: u32) -> Self {
        let stage_points = tier.saturating_mul(DEFAULT_STAGE_POINTS_PER_TIER);
        Self {
            name: name.into(),
            tier,
            growth_stages: uniform_stages(stage_points, max_size),
            gain_factor: default_gain_factor(tier),
            ..Self::default()
        }
    }

    /// Total number of growth stages, terminal stage included.
    pub fn stage_count(&self) -> usize {
        self.growth_stages.len()
    }

    /// Number of stages in which the crop still grows.
    pub fn growing_stage_count(&self) -> usize {
        self.growth_stages.len().saturating_sub(1)
    }

    /// Grow or shrink `growth_stages` to exactly `stage_count` entries.
    ///
    /// New non-terminal stages get [`DEFAULT_STAGE_DURATION`]; the last
    /// stage is always reset to 0. When growing, the old terminal stage
    /// becomes an ordinary stage of [`DEFAULT_STAGE_DURATION`] too, so no
    /// growing stage is left at 0 points. A `stage_count` of 0 is treated
    /// as 1.
    pub fn set_number_of_growth_stages(&mut self, stage_count: usize) {
        let stage_count = stage_count.max(1);
        if let Some(last) = self.growth_stages.last_mut() {
            // The old terminal stage becomes an ordinary stage if we grow.
            if *last == 0 {
                *last = DEFAULT_STAGE_DURATION;
            }
        }
        self.growth_stages.resize(stage_count, DEFAULT_STAGE_DURATION);
        if let Some(last) = self.growth_stages.last_mut() {
            *last = 0;
        }
    }
}

/// `max_size` stages of `stage_points` each, the last one forced to 0. A
/// `max_size` of 0 is treated as 1.
pub(crate) fn uniform_stages(stage_points: u32, max_size: u32) -> Vec<u32> {
    let stage_count = usize::try_from(max_size.max(1)).unwrap_or(1);
    let mut growth_stages = vec![stage_points; stage_count];
    if let Some(last) = growth_stages.last_mut() {
        *last = 0;
    }
    growth_stages
}
