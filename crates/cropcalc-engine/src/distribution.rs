//! Discrete weighted-outcome distributions.
//!
//! A [`WeightedOutcome`] is an ordered list of `(value, probability)` pairs.
//! Probabilities are nonnegative and a nonempty list sums to 1 within
//! tolerance. Values need not be distinct; duplicates are only coalesced by
//! [`merge`].
//!
//! [`Distribution`] wraps a list with the explicit [`Distribution::Death`]
//! signal so that "the crop will eventually die" can never be confused with
//! an accidentally empty list.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Weighted
// ---------------------------------------------------------------------------

/// A single value with its probability.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Weighted<T> {
    /// The outcome.
    pub value: T,
    /// Probability of this outcome.
    pub probability: f64,
}

impl<T> Weighted<T> {
    /// Pair a value with its probability.
    pub const fn new(value: T, probability: f64) -> Self {
        Self { value, probability }
    }
}

// ---------------------------------------------------------------------------
// WeightedOutcome
// ---------------------------------------------------------------------------

/// An ordered list of weighted outcomes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WeightedOutcome<T> {
    outcomes: Vec<Weighted<T>>,
}

impl<T> Default for WeightedOutcome<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> WeightedOutcome<T> {
    /// Create an empty list.
    pub const fn new() -> Self {
        Self {
            outcomes: Vec::new(),
        }
    }

    /// Create an empty list with room for `capacity` outcomes.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            outcomes: Vec::with_capacity(capacity),
        }
    }

    /// The single-outcome list `{value -> 1}`.
    pub fn certain(value: T) -> Self {
        Self {
            outcomes: vec![Weighted::new(value, 1.0)],
        }
    }

    /// Build a list from `(value, probability)` pairs, keeping their order.
    pub fn from_pairs(pairs: impl IntoIterator<Item = (T, f64)>) -> Self {
        Self {
            outcomes: pairs
                .into_iter()
                .map(|(value, probability)| Weighted::new(value, probability))
                .collect(),
        }
    }

    /// Append an outcome.
    pub fn push(&mut self, value: T, probability: f64) {
        self.outcomes.push(Weighted::new(value, probability));
    }

    /// Iterate over outcomes in order.
    pub fn iter(&self) -> core::slice::Iter<'_, Weighted<T>> {
        self.outcomes.iter()
    }

    /// Borrow the outcomes as a slice.
    pub fn as_slice(&self) -> &[Weighted<T>] {
        &self.outcomes
    }

    /// Number of outcomes (duplicates counted separately).
    pub fn len(&self) -> usize {
        self.outcomes.len()
    }

    /// Whether the list has no outcomes.
    pub fn is_empty(&self) -> bool {
        self.outcomes.is_empty()
    }

    /// Sum of all probabilities.
    pub fn total_probability(&self) -> f64 {
        self.outcomes.iter().map(|o| o.probability).sum()
    }

    /// Whether every probability is nonnegative and they sum to 1 within
    /// `tolerance`.
    pub fn is_normalized(&self, tolerance: f64) -> bool {
        self.outcomes.iter().all(|o| o.probability >= 0.0)
            && (self.total_probability() - 1.0).abs() <= tolerance
    }

    /// Expected value, mapping each outcome to a real number with `to_f64`.
    pub fn expected_value(&self, to_f64: impl Fn(&T) -> f64) -> f64 {
        self.outcomes
            .iter()
            .map(|o| to_f64(&o.value) * o.probability)
            .sum()
    }
}

impl<T: PartialEq> WeightedOutcome<T> {
    /// Total probability of `value`, summed over duplicate entries.
    pub fn probability_of(&self, value: &T) -> f64 {
        self.outcomes
            .iter()
            .filter(|o| o.value == *value)
            .map(|o| o.probability)
            .sum()
    }
}

impl<T: Ord> WeightedOutcome<T> {
    /// Sort ascending by value. The sort is stable.
    pub fn sort_by_value(&mut self) {
        self.outcomes.sort_by(|a, b| a.value.cmp(&b.value));
    }
}

impl<T> IntoIterator for WeightedOutcome<T> {
    type Item = Weighted<T>;
    type IntoIter = std::vec::IntoIter<Weighted<T>>;

    fn into_iter(self) -> Self::IntoIter {
        self.outcomes.into_iter()
    }
}

impl<'a, T> IntoIterator for &'a WeightedOutcome<T> {
    type Item = &'a Weighted<T>;
    type IntoIter = core::slice::Iter<'a, Weighted<T>>;

    fn into_iter(self) -> Self::IntoIter {
        self.outcomes.iter()
    }
}

/// Merge several lists into their uniform mixture.
///
/// Each list contributes its probabilities divided by the number of lists.
/// Equal values are coalesced by summing; the result keeps the order in
/// which values first appear. Merging no lists yields an empty list.
#[allow(clippy::cast_precision_loss)]
pub fn merge<T: Ord + Clone>(lists: &[WeightedOutcome<T>]) -> WeightedOutcome<T> {
    if lists.is_empty() {
        return WeightedOutcome::new();
    }
    let list_count = lists.len() as f64;
    let mut position: BTreeMap<T, usize> = BTreeMap::new();
    let mut merged: Vec<Weighted<T>> = Vec::new();

    for outcome in lists.iter().flat_map(WeightedOutcome::iter) {
        let share = outcome.probability / list_count;
        if let Some(entry) = position
            .get(&outcome.value)
            .and_then(|&index| merged.get_mut(index))
        {
            entry.probability += share;
        } else {
            position.insert(outcome.value.clone(), merged.len());
            merged.push(Weighted::new(outcome.value.clone(), share));
        }
    }

    WeightedOutcome { outcomes: merged }
}

// ---------------------------------------------------------------------------
// Distribution
// ---------------------------------------------------------------------------

/// A weighted outcome list, or the signal that the crop will die.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "outcomes", rename_all = "snake_case")]
pub enum Distribution<T> {
    /// The crop has a nonzero chance of dying each tick, so it dies
    /// eventually. No finite expectation exists.
    Death,
    /// A nonempty list of outcomes.
    Outcomes(WeightedOutcome<T>),
}

impl<T> Distribution<T> {
    /// Wrap a list, mapping an empty list to [`Distribution::Death`].
    pub fn from_outcomes(outcomes: WeightedOutcome<T>) -> Self {
        if outcomes.is_empty() {
            Self::Death
        } else {
            Self::Outcomes(outcomes)
        }
    }

    /// Whether this is the death signal.
    pub const fn is_death(&self) -> bool {
        matches!(self, Self::Death)
    }

    /// Borrow the outcome list, if the crop survives.
    pub const fn outcomes(&self) -> Option<&WeightedOutcome<T>> {
        match self {
            Self::Death => None,
            Self::Outcomes(outcomes) => Some(outcomes),
        }
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, clippy::float_cmp)]

    use super::*;

    #[test]
    fn certain_is_normalized() {
        let d = WeightedOutcome::certain(5_i64);
        assert!(d.is_normalized(1e-9));
        assert_eq!(d.probability_of(&5), 1.0);
    }

    #[test]
    fn merge_identical_certain_lists() {
        let lists = vec![WeightedOutcome::certain(5_i64); 100];
        let merged = merge(&lists);
        assert_eq!(merged.len(), 1);
        let only = merged.as_slice().first().copied().unwrap();
        assert_eq!(only.value, 5);
        assert!((only.probability - 1.0).abs() < 1e-9);
    }

    #[test]
    fn merge_coalesces_and_keeps_first_appearance_order() {
        let a = WeightedOutcome::from_pairs([(4_i64, 0.5), (2, 0.5)]);
        let b = WeightedOutcome::from_pairs([(2_i64, 0.25), (7, 0.75)]);
        let merged = merge(&[a, b]);
        let values: Vec<i64> = merged.iter().map(|o| o.value).collect();
        assert_eq!(values, vec![4, 2, 7]);
        assert!((merged.probability_of(&4) - 0.25).abs() < 1e-12);
        assert!((merged.probability_of(&2) - 0.375).abs() < 1e-12);
        assert!((merged.probability_of(&7) - 0.375).abs() < 1e-12);
        assert!(merged.is_normalized(1e-12));
    }

    #[test]
    fn merge_of_nothing_is_empty() {
        let merged: WeightedOutcome<i64> = merge(&[]);
        assert!(merged.is_empty());
    }

    #[test]
    fn sort_is_stable_and_ascending() {
        let mut d = WeightedOutcome::from_pairs([(3_i64, 0.1), (1, 0.2), (3, 0.3), (2, 0.4)]);
        d.sort_by_value();
        let pairs: Vec<(i64, f64)> = d.iter().map(|o| (o.value, o.probability)).collect();
        assert_eq!(pairs, vec![(1, 0.2), (2, 0.4), (3, 0.1), (3, 0.3)]);
    }

    #[test]
    fn duplicates_sum_in_probability_of() {
        let d = WeightedOutcome::from_pairs([(12_i64, 0.5), (12, 0.25), (13, 0.25)]);
        assert_eq!(d.probability_of(&12), 0.75);
        assert_eq!(d.len(), 3);
    }

    #[test]
    fn expected_value_of_counts() {
        let d = WeightedOutcome::from_pairs([(0_u32, 0.25), (1, 0.5), (2, 0.25)]);
        assert_eq!(d.expected_value(|&n| f64::from(n)), 1.0);
    }

    #[test]
    fn empty_list_becomes_death() {
        let d: Distribution<i64> = Distribution::from_outcomes(WeightedOutcome::new());
        assert!(d.is_death());
        assert!(d.outcomes().is_none());

        let alive = Distribution::from_outcomes(WeightedOutcome::certain(0_i64));
        assert!(!alive.is_death());
        assert_eq!(alive.outcomes().map(WeightedOutcome::len), Some(1));
    }

    #[test]
    fn distribution_serializes_with_kind_tag() {
        let json = serde_json::to_string(&Distribution::<i64>::Death).unwrap();
        assert_eq!(json, r#"{"kind":"death"}"#);
        let alive = Distribution::Outcomes(WeightedOutcome::certain(3_i64));
        let json = serde_json::to_string(&alive).unwrap();
        assert_eq!(json, r#"{"kind":"outcomes","outcomes":[{"value":3,"probability":1.0}]}"#);
    }
}
