//! Shared type definitions for crop growth statistics.
//!
//! This crate holds the plain data the growth-statistics engine consumes:
//! crop profiles from the catalog and the environmental context a crop is
//! planted in. Types flow to `TypeScript` via `ts-rs` so the editing surface
//! can author the same records the engine reads.
//!
//! # Modules
//!
//! - [`ids`] -- Name wrappers for crops and items
//! - [`enums`] -- [`StageAfterHarvest`] and its catalog wire format
//! - [`structs`] -- Crop profiles, stats, drop tables, environmental context
//! - [`families`] -- Parameterized builders for whole crop families

pub mod enums;
pub mod families;
pub mod ids;
pub mod structs;

// Re-export all public types at crate root for convenience.
pub use enums::StageAfterHarvest;
pub use families::{
    CPP_DECORATION_STAGE_DURATION, GREGTECH_STAGE_POINTS_PER_TIER, GT_PLUS_PLUS_STAGE_DURATION,
};
pub use ids::{CropName, ItemId};
pub use structs::{
    BiomeBonus, CropProfile, CropStats, DEFAULT_GAIN_DECAY, DEFAULT_STAGE_DURATION,
    DEFAULT_STAGE_POINTS_PER_TIER, DropEntry, EnvironmentalContext, IMMORTAL_RESISTANCE,
    default_gain_factor,
};
