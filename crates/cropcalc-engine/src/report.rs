//! One-call analysis of a crop in an environment.
//!
//! [`analyze`] runs every stage of the pipeline (readings, growth
//! distribution, harvest cycle, drop counts, item yields) and classifies the
//! crop's future. Death, stalling and a drop count that never converges
//! are outcomes here, not errors, so one extreme crop never hides the
//! reports of the rest of a catalog.

use serde::{Deserialize, Serialize};

use cropcalc_types::{CropName, CropProfile, EnvironmentalContext};

use crate::catalog::{CropCatalog, validate_profile};
use crate::config::EngineConfig;
use crate::distribution::{Distribution, WeightedOutcome};
use crate::drops::{
    ItemYield, average_items_per_drop, average_items_per_harvest, average_items_per_time_unit,
    base_chance, drop_count_distribution, expected_drop_count,
};
use crate::environment::EnvironmentReadings;
use crate::error::EngineError;
use crate::growth::{FERTILIZED_STORAGE_MIN, UNFERTILIZED_NUTRIENT_STORAGE, growth_distribution};
use crate::harvest::{HarvestCycle, expected_ticks_between_harvests};

/// What happens to a crop left growing in its environment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "outlook", rename_all = "snake_case")]
pub enum GrowthOutlook {
    /// The crop starves and eventually dies.
    Dies,
    /// The crop survives but never gains growth points.
    NeverMatures,
    /// The crop grows and can be harvested repeatedly.
    Harvests {
        /// Expected timing of one harvest cycle.
        cycle: HarvestCycle,
        /// Expected items per configured time unit. Empty when the drop
        /// statistics diverged.
        items_per_time_unit: Vec<ItemYield>,
    },
}

impl GrowthOutlook {
    /// Expected ticks between harvests, if the crop can be harvested.
    pub const fn ticks_between_harvests(&self) -> Option<f64> {
        match self {
            Self::Harvests { cycle, .. } => Some(cycle.ticks_between_harvests),
            Self::Dies | Self::NeverMatures => None,
        }
    }
}

/// Expected drops of a crop whose drop-count distribution converged.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DropYield {
    /// Distribution of drops per harvest.
    pub drop_counts: WeightedOutcome<u32>,
    /// Mean of `drop_counts`.
    pub expected_drops: f64,
    /// Expected items per single drop.
    pub items_per_drop: Vec<ItemYield>,
    /// Expected items per harvest.
    pub items_per_harvest: Vec<ItemYield>,
}

/// Drop statistics of one crop.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum DropStats {
    /// The drop-count distribution converged.
    Converged(DropYield),
    /// The base chance is so large that the drop-count tail did not fall
    /// below tolerance within the configured cap.
    Diverged {
        /// Expected drop multiplier that was expanded.
        base_chance: f64,
        /// Configured maximum drop count.
        cap: u32,
    },
}

impl DropStats {
    /// The drop yield, unless the distribution diverged.
    pub const fn converged(&self) -> Option<&DropYield> {
        match self {
            Self::Converged(yields) => Some(yields),
            Self::Diverged { .. } => None,
        }
    }
}

/// Every statistic computed for one crop.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CropReport {
    /// The analyzed crop.
    pub crop: CropName,
    /// Environmental readings. Fertilized crops are read at the lowest
    /// fertilized nutrient storage.
    pub readings: EnvironmentReadings,
    /// Per-tick growth-point gain distribution.
    pub growth: Distribution<i64>,
    /// Death, stall, or harvest timing.
    pub outlook: GrowthOutlook,
    /// Drop counts and item yields per harvest.
    pub drops: DropStats,
}

/// Analyze `profile` planted in `ctx`.
///
/// The profile is validated first. A crop that dies or stalls still gets its
/// drop statistics, since they do not depend on growth, and a crop whose
/// drop count diverges still gets its growth outlook.
pub fn analyze(
    profile: &CropProfile,
    ctx: &EnvironmentalContext,
    config: &EngineConfig,
) -> Result<CropReport, EngineError> {
    validate_profile(profile, config)?;

    let storage = if ctx.fertilized {
        f64::from(FERTILIZED_STORAGE_MIN)
    } else {
        UNFERTILIZED_NUTRIENT_STORAGE
    };
    let readings = EnvironmentReadings::evaluate(profile, ctx, storage);

    let drops = drop_stats(profile, ctx, config)?;

    let growth = growth_distribution(profile, ctx);
    let outlook = match &growth {
        Distribution::Death => GrowthOutlook::Dies,
        Distribution::Outcomes(gains) => {
            match expected_ticks_between_harvests(profile, gains, config) {
                Ok(cycle) => {
                    let items_per_time_unit = drops
                        .converged()
                        .map(|yields| {
                            average_items_per_time_unit(
                                &yields.items_per_harvest,
                                cycle.ticks_between_harvests,
                                config,
                            )
                        })
                        .unwrap_or_default();
                    GrowthOutlook::Harvests {
                        cycle,
                        items_per_time_unit,
                    }
                }
                Err(EngineError::NeverCompletes { .. }) => GrowthOutlook::NeverMatures,
                Err(error) => return Err(error),
            }
        }
    };

    tracing::debug!(
        crop = %profile.name,
        deficit = readings.deficit(),
        expected_drops = ?drops.converged().map(|yields| yields.expected_drops),
        ticks_between_harvests = ?outlook.ticks_between_harvests(),
        "crop analyzed"
    );

    Ok(CropReport {
        crop: profile.name.clone(),
        readings,
        growth,
        outlook,
        drops,
    })
}

fn drop_stats(
    profile: &CropProfile,
    ctx: &EnvironmentalContext,
    config: &EngineConfig,
) -> Result<DropStats, EngineError> {
    let base = base_chance(profile.gain_factor, ctx.stats.gain);
    let drop_counts = match drop_count_distribution(base, config) {
        Ok(drop_counts) => drop_counts,
        Err(EngineError::DropCountDidNotConverge { base_chance, cap }) => {
            return Ok(DropStats::Diverged { base_chance, cap });
        }
        Err(error) => return Err(error),
    };
    let expected_drops = expected_drop_count(&drop_counts);
    let items_per_drop = average_items_per_drop(&profile.drops, ctx.stats.gain);
    let items_per_harvest = average_items_per_harvest(&items_per_drop, expected_drops);
    Ok(DropStats::Converged(DropYield {
        drop_counts,
        expected_drops,
        items_per_drop,
        items_per_harvest,
    }))
}

/// Analyze every crop in `catalog`, in name order.
///
/// Death, stalling and diverging drop statistics stay inside each crop's
/// report; only a profile the engine cannot evaluate at all fails the call.
pub fn analyze_catalog(
    catalog: &CropCatalog,
    ctx: &EnvironmentalContext,
    config: &EngineConfig,
) -> Result<Vec<CropReport>, EngineError> {
    catalog
        .iter()
        .map(|profile| analyze(profile, ctx, config))
        .collect()
}

#[cfg(test)]
mod tests {
    #![allow(
        clippy::unwrap_used,
        clippy::panic,
        clippy::float_cmp,
        clippy::indexing_slicing
    )]

    use cropcalc_types::{CropStats, ItemId};

    use super::*;

    fn plain_crop(tier: u32) -> CropProfile {
        CropProfile {
            name: CropName::new("Plain"),
            tier,
            ..CropProfile::default()
        }
    }

    fn field(stats: CropStats) -> EnvironmentalContext {
        EnvironmentalContext {
            stats,
            height: 64,
            ..EnvironmentalContext::default()
        }
    }

    #[test]
    fn healthy_crop_harvests() {
        let report = analyze(
            &plain_crop(1),
            &field(CropStats::default()),
            &EngineConfig::default(),
        )
        .unwrap();
        assert_eq!(report.crop, CropName::new("Plain"));
        assert_eq!(report.readings.need, 0);
        assert_eq!(report.growth.outcomes().map(WeightedOutcome::len), Some(7));

        let GrowthOutlook::Harvests {
            cycle,
            items_per_time_unit,
        } = &report.outlook
        else {
            panic!("expected a harvest outlook, got {:?}", report.outlook);
        };
        assert_eq!(cycle.stage_ticks.len(), 3);
        // Fixed(1) regrows through every stage.
        assert_eq!(cycle.ticks_between_harvests, cycle.ticks_from_stage[0]);
        // Three 1000-point stages at a mean gain of 6.
        assert!((cycle.ticks_between_harvests - 500.0).abs() < 5.0);

        let yields = report.drops.converged().unwrap();
        assert!((yields.expected_drops - 1.0141).abs() < 1e-3);
        assert_eq!(yields.items_per_drop[0].item, ItemId::new("drop"));
        assert!((yields.items_per_drop[0].amount - 1.01).abs() < 1e-12);
        let per_harvest = yields.items_per_harvest[0].amount;
        assert!((per_harvest - 1.01 * yields.expected_drops).abs() < 1e-12);
        let expected_rate = per_harvest / cycle.ticks_between_harvests * 281.25;
        assert!((items_per_time_unit[0].amount - expected_rate).abs() < 1e-12);
    }

    #[test]
    fn starving_crop_dies_but_keeps_drop_stats() {
        let report = analyze(
            &plain_crop(8),
            &field(CropStats::default()),
            &EngineConfig::default(),
        )
        .unwrap();
        assert!(report.growth.is_death());
        assert_eq!(report.outlook, GrowthOutlook::Dies);
        assert_eq!(report.outlook.ticks_between_harvests(), None);
        assert!(!report.drops.converged().unwrap().drop_counts.is_empty());
    }

    #[test]
    fn starving_immortal_crop_never_matures() {
        let report = analyze(
            &plain_crop(8),
            &field(CropStats::new(0, 0, 31)),
            &EngineConfig::default(),
        )
        .unwrap();
        assert_eq!(report.outlook, GrowthOutlook::NeverMatures);
    }

    #[test]
    fn fertilized_readings_use_lowest_storage() {
        let ctx = EnvironmentalContext {
            fertilized: true,
            ..field(CropStats::default())
        };
        let report = analyze(&plain_crop(1), &ctx, &EngineConfig::default()).unwrap();
        assert_eq!(report.readings.nutrient_storage, 100.0);
        assert_eq!(report.readings.nutrients, 5);
    }

    #[test]
    fn invalid_profile_is_an_error() {
        let mut profile = plain_crop(1);
        profile.growth_stages = vec![500, 500];
        assert!(matches!(
            analyze(&profile, &field(CropStats::default()), &EngineConfig::default()),
            Err(EngineError::InvalidProfile { .. })
        ));
    }

    #[test]
    fn outlook_serializes_with_tag() {
        let json = serde_json::to_string(&GrowthOutlook::NeverMatures).unwrap();
        assert_eq!(json, r#"{"outlook":"never_matures"}"#);
    }

    #[test]
    fn catalog_reports_follow_name_order() {
        let config = EngineConfig::default();
        let catalog = CropCatalog::from_profiles(
            vec![
                CropProfile::with_tier_defaults("Wheat", 1, 8),
                CropProfile::with_tier_defaults("Carrots", 2, 4),
            ],
            &config,
        )
        .unwrap();
        let reports = analyze_catalog(&catalog, &field(CropStats::default()), &config).unwrap();
        let names: Vec<&str> = reports.iter().map(|r| r.crop.as_str()).collect();
        assert_eq!(names, vec!["Carrots", "Wheat"]);
    }

    #[test]
    fn diverging_drops_keep_the_growth_outlook() {
        let config = EngineConfig {
            max_drop_count: 50,
            ..EngineConfig::default()
        };
        let profile = CropProfile {
            gain_factor: 400.0,
            ..plain_crop(1)
        };
        let report = analyze(&profile, &field(CropStats::default()), &config).unwrap();
        assert_eq!(
            report.drops,
            DropStats::Diverged {
                base_chance: 400.0,
                cap: 50
            }
        );
        let GrowthOutlook::Harvests {
            cycle,
            items_per_time_unit,
        } = &report.outlook
        else {
            panic!("expected a harvest outlook, got {:?}", report.outlook);
        };
        assert!(cycle.ticks_between_harvests > 0.0);
        assert!(items_per_time_unit.is_empty());
    }

    #[test]
    fn one_diverging_crop_does_not_sink_the_catalog() {
        let config = EngineConfig {
            max_drop_count: 50,
            ..EngineConfig::default()
        };
        let salty = CropProfile {
            gain_factor: 400.0,
            ..CropProfile::with_tier_defaults("Salty Root", 1, 4)
        };
        let catalog = CropCatalog::from_profiles(
            vec![
                salty,
                CropProfile::with_tier_defaults("Wheat", 1, 8),
                CropProfile::with_tier_defaults("Aurelia", 8, 5),
            ],
            &config,
        )
        .unwrap();
        let reports = analyze_catalog(&catalog, &field(CropStats::default()), &config).unwrap();
        assert_eq!(reports.len(), 3);

        let by_name = |name: &str| reports.iter().find(|r| r.crop.as_str() == name).unwrap();
        assert!(matches!(
            by_name("Salty Root").drops,
            DropStats::Diverged { cap: 50, .. }
        ));
        assert!(by_name("Wheat").drops.converged().is_some());
        let aurelia = by_name("Aurelia");
        assert_eq!(aurelia.outlook, GrowthOutlook::Dies);
        assert!(aurelia.drops.converged().is_some());
    }

    #[test]
    fn drop_stats_serialize_with_status() {
        let diverged = DropStats::Diverged {
            base_chance: 4.0,
            cap: 10,
        };
        let json = serde_json::to_value(&diverged).unwrap();
        assert_eq!(json["status"], "diverged");
        assert_eq!(json["cap"], 10);
    }
}
