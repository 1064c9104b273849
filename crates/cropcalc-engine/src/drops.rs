//! Drop counts and expected item yields.
//!
//! The number of drops per harvest is `round(base * (1 + 0.6827 * g))` for a
//! standard normal `g`. Its distribution is read off the Gaussian CDF:
//!
//! ```text
//! P(count <= n) = 0.5 + 0.5 * erf(((n + 0.5) / base - 1) / 0.6827 / sqrt(2))
//! ```
//!
//! Each drop then rolls the crop's drop table; the gain stat adds a small
//! chance of one bonus item per drop.

use serde::{Deserialize, Serialize};

use cropcalc_types::{DropEntry, ItemId};

use crate::config::EngineConfig;
use crate::distribution::WeightedOutcome;
use crate::error::EngineError;

/// Relative spread of the drop count around its base chance.
const DROP_SPREAD: f64 = 0.6827;

/// Per-point growth of the base chance with the gain stat.
const GAIN_BONUS_BASE: f64 = 1.03;

/// Expected drop count multiplier for the crop and gain stat.
pub fn base_chance(gain_factor: f64, gain: i32) -> f64 {
    gain_factor * GAIN_BONUS_BASE.powi(gain)
}

fn rounded_gaussian_cdf(count: u32, base: f64) -> f64 {
    let z = ((f64::from(count) + 0.5) / base - 1.0) / DROP_SPREAD / std::f64::consts::SQRT_2;
    0.5 + 0.5 * libm::erf(z)
}

/// Distribution of the number of drops per harvest.
///
/// A nonpositive base chance never drops. Otherwise counts `0, 1, 2, ...`
/// are emitted until the cumulative probability reaches
/// `1 - config.probability_tolerance`, so the list sums to just under 1.
///
/// # Errors
///
/// [`EngineError::DropCountDidNotConverge`] if more than
/// `config.max_drop_count` counts would be needed, which happens for absurdly
/// large or infinite base chances.
pub fn drop_count_distribution(
    base_chance: f64,
    config: &EngineConfig,
) -> Result<WeightedOutcome<u32>, EngineError> {
    if base_chance.is_nan() || base_chance <= 0.0 {
        return Ok(WeightedOutcome::certain(0));
    }

    let target = 1.0 - config.probability_tolerance;
    let mut distribution = WeightedOutcome::new();
    let mut cumulative = 0.0;
    let mut count = 0_u32;

    while cumulative < target {
        if count > config.max_drop_count {
            tracing::warn!(
                base_chance,
                cap = config.max_drop_count,
                cumulative,
                "drop count distribution did not converge"
            );
            return Err(EngineError::DropCountDidNotConverge {
                base_chance,
                cap: config.max_drop_count,
            });
        }
        let below = rounded_gaussian_cdf(count, base_chance);
        distribution.push(count, below - cumulative);
        cumulative = below;
        count = count.saturating_add(1);
    }

    Ok(distribution)
}

/// Mean of a drop count distribution.
pub fn expected_drop_count(distribution: &WeightedOutcome<u32>) -> f64 {
    distribution.expected_value(|&count| f64::from(count))
}

/// Expected amount of one item.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ItemYield {
    /// The item.
    pub item: ItemId,
    /// Expected number of that item.
    pub amount: f64,
}

impl ItemYield {
    /// Pair an item with its expected amount.
    pub const fn new(item: ItemId, amount: f64) -> Self {
        Self { item, amount }
    }
}

/// Expected items produced by a single drop.
///
/// Each table row contributes `probability * (count + (gain + 1) / 100)`.
/// Rows naming the same item are summed; items appear in the order they
/// first occur in the table.
pub fn average_items_per_drop(drops: &[DropEntry], gain: i32) -> Vec<ItemYield> {
    let bonus = (f64::from(gain) + 1.0) / 100.0;
    let mut yields: Vec<ItemYield> = Vec::with_capacity(drops.len());

    for entry in drops {
        let amount = entry.probability * (f64::from(entry.count) + bonus);
        match yields.iter_mut().find(|y| y.item == entry.item) {
            Some(existing) => existing.amount += amount,
            None => yields.push(ItemYield::new(entry.item.clone(), amount)),
        }
    }
    yields
}

/// Expected items per harvest: items per drop scaled by the expected drop
/// count.
pub fn average_items_per_harvest(per_drop: &[ItemYield], expected_drops: f64) -> Vec<ItemYield> {
    per_drop
        .iter()
        .map(|y| ItemYield::new(y.item.clone(), y.amount * expected_drops))
        .collect()
}

/// Expected items per configured time unit, given the expected ticks
/// between harvests.
pub fn average_items_per_time_unit(
    per_harvest: &[ItemYield],
    ticks_between_harvests: f64,
    config: &EngineConfig,
) -> Vec<ItemYield> {
    let harvests_per_unit = config.ticks_per_time_unit / ticks_between_harvests;
    per_harvest
        .iter()
        .map(|y| ItemYield::new(y.item.clone(), y.amount * harvests_per_unit))
        .collect()
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, clippy::float_cmp, clippy::indexing_slicing)]

    use cropcalc_types::{DropEntry, ItemId};

    use super::*;

    fn config() -> EngineConfig {
        EngineConfig::default()
    }

    fn melon_table() -> Vec<DropEntry> {
        let mut table = vec![DropEntry::new("Melon Block", 1, 1.0 / 3.0)];
        for count in 2..=5 {
            table.push(DropEntry::new("Melon Slice", count, 1.0 / 6.0));
        }
        table
    }

    #[test]
    fn base_chance_grows_with_gain() {
        assert_eq!(base_chance(1.0, 0), 1.0);
        assert!((base_chance(0.9, 2) - 0.9 * 1.0609).abs() < 1e-12);
        assert!(base_chance(1.0, -5) < 1.0);
    }

    #[test]
    fn nonpositive_base_never_drops() {
        for base in [0.0, -0.5, f64::NAN] {
            let d = drop_count_distribution(base, &config()).unwrap();
            assert_eq!(d, WeightedOutcome::certain(0));
        }
    }

    #[test]
    fn unit_base_is_centred_on_one() {
        let d = drop_count_distribution(1.0, &config()).unwrap();
        assert!((d.probability_of(&0) - 0.2320).abs() < 1e-3);
        assert!((d.probability_of(&1) - 0.5361).abs() < 1e-3);
        assert!((d.probability_of(&2) - 0.2180).abs() < 1e-3);
        let mode = d
            .iter()
            .max_by(|a, b| a.probability.total_cmp(&b.probability))
            .unwrap();
        assert_eq!(mode.value, 1);
        assert_eq!(d.as_slice().last().unwrap().value, 5);
        assert!((expected_drop_count(&d) - 1.0141).abs() < 1e-3);
    }

    #[test]
    fn drop_counts_sum_just_under_one() {
        for base in [0.25, 1.0, 2.7, 12.0] {
            let d = drop_count_distribution(base, &config()).unwrap();
            let total = d.total_probability();
            assert!(total >= 1.0 - 1e-9 - 1e-12, "base {base}: total {total}");
            assert!(total < 1.0, "base {base}: total {total}");
            assert!(d.iter().all(|w| w.probability >= 0.0));
        }
    }

    #[test]
    fn drop_counts_follow_a_non_decreasing_cdf() {
        for base in [0.25, 1.0, 2.7, 12.0] {
            let d = drop_count_distribution(base, &config()).unwrap();
            let mut running = 0.0;
            for (expected_count, w) in (0_u32..).zip(d.iter()) {
                assert_eq!(w.value, expected_count);
                let next = running + w.probability;
                assert!(next >= running, "base {base}: prefix fell at {}", w.value);
                assert!(
                    (next - rounded_gaussian_cdf(w.value, base)).abs() < 1e-12,
                    "base {base}: prefix {next} off the CDF at {}",
                    w.value
                );
                running = next;
            }
        }
    }

    #[test]
    fn tiny_base_drops_nothing() {
        let d = drop_count_distribution(0.001, &config()).unwrap();
        assert_eq!(d.len(), 1);
        assert_eq!(d.probability_of(&0), 1.0);
    }

    #[test]
    fn huge_base_hits_the_cap() {
        let cfg = EngineConfig {
            max_drop_count: 50,
            ..EngineConfig::default()
        };
        assert_eq!(
            drop_count_distribution(1000.0, &cfg),
            Err(EngineError::DropCountDidNotConverge {
                base_chance: 1000.0,
                cap: 50
            })
        );
        assert!(drop_count_distribution(f64::INFINITY, &config()).is_err());
    }

    #[test]
    fn items_per_drop_coalesce_by_item() {
        let yields = average_items_per_drop(&melon_table(), 0);
        assert_eq!(yields.len(), 2);
        assert_eq!(yields[0].item, ItemId::new("Melon Block"));
        assert!((yields[0].amount - 1.01 / 3.0).abs() < 1e-12);
        assert_eq!(yields[1].item, ItemId::new("Melon Slice"));
        assert!((yields[1].amount - 2.34).abs() < 1e-12);
    }

    #[test]
    fn gain_adds_bonus_items() {
        let table = vec![DropEntry::new("Wheat", 1, 1.0)];
        let yields = average_items_per_drop(&table, 9);
        assert!((yields[0].amount - 1.1).abs() < 1e-12);
        assert!(average_items_per_drop(&[], 9).is_empty());
    }

    #[test]
    fn harvest_and_time_unit_scaling() {
        let per_drop = vec![ItemYield::new(ItemId::new("Wheat"), 1.5)];
        let per_harvest = average_items_per_harvest(&per_drop, 2.0);
        assert_eq!(per_harvest[0].amount, 3.0);

        let cfg = EngineConfig {
            ticks_per_time_unit: 100.0,
            ..EngineConfig::default()
        };
        let per_unit = average_items_per_time_unit(&per_harvest, 50.0, &cfg);
        assert_eq!(per_unit[0].item, ItemId::new("Wheat"));
        assert_eq!(per_unit[0].amount, 6.0);
    }
}
