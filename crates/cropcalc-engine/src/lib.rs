//! Growth-statistics engine for tiered crops.
//!
//! Given a crop profile and the environment it is planted in, the engine
//! computes exact expectations instead of simulating ticks: how many growth
//! points the crop gains per tick, how long each stage lasts on average, how
//! long a full harvest cycle takes, and how many items each harvest yields.
//!
//! Every function is pure and synchronous. The only I/O is
//! [`EngineConfig::from_file`].
//!
//! # Modules
//!
//! - [`environment`] -- Need, humidity, nutrients, air quality, weighted value
//! - [`distribution`] -- [`WeightedOutcome`] lists and the [`Distribution`]
//!   death signal
//! - [`growth`] -- Per-tick gain distributions, plain and fertilized
//! - [`duration`] -- Expected ticks to cross one stage
//! - [`harvest`] -- Expected ticks between harvests
//! - [`drops`] -- Drop-count distribution and item yields
//! - [`catalog`] -- Validated `name -> profile` lookup
//! - [`report`] -- One-call analysis producing a [`CropReport`]
//! - [`config`] -- [`EngineConfig`] tunables and their YAML loader
//! - [`error`] -- [`EngineError`]

pub mod catalog;
pub mod config;
pub mod distribution;
pub mod drops;
pub mod duration;
pub mod environment;
pub mod error;
pub mod growth;
pub mod harvest;
pub mod report;

pub use catalog::{CropCatalog, validate_profile};
pub use config::{ConfigError, EngineConfig};
pub use distribution::{Distribution, Weighted, WeightedOutcome, merge};
pub use drops::{
    ItemYield, average_items_per_drop, average_items_per_harvest, average_items_per_time_unit,
    base_chance, drop_count_distribution, expected_drop_count,
};
pub use duration::expected_ticks_in_stage;
pub use environment::{
    EnvironmentReadings, air_quality, environmental_need, environmental_value, humidity, nutrients,
};
pub use error::EngineError;
pub use growth::{average_growth_points_with_nutrition, gained_growth_points, growth_distribution};
pub use harvest::{HarvestCycle, expected_ticks_between_harvests};
pub use report::{CropReport, DropStats, DropYield, GrowthOutlook, analyze, analyze_catalog};
