//! Read-only crop lookup table.
//!
//! The catalog is built once from a list of profiles, validated, and then
//! shared by reference for the lifetime of the program. Names are unique.

use std::collections::BTreeMap;

use cropcalc_types::{CropName, CropProfile, StageAfterHarvest};

use crate::config::EngineConfig;
use crate::error::EngineError;

// ---------------------------------------------------------------------------
// Validation
// ---------------------------------------------------------------------------

fn invalid(profile: &CropProfile, reason: impl Into<String>) -> EngineError {
    EngineError::InvalidProfile {
        crop: profile.name.clone(),
        reason: reason.into(),
    }
}

/// Check the structural invariants of a profile.
///
/// - at least one growing stage, every growing stage positive, and a
///   terminal stage of 0
/// - a fixed stage after harvest in `1..=stage_count - 1`
/// - finite weights and gain factor
/// - drop probabilities nonnegative and summing to 1 within
///   `config.drop_weight_tolerance`
pub fn validate_profile(profile: &CropProfile, config: &EngineConfig) -> Result<(), EngineError> {
    let Some((&terminal, growing)) = profile.growth_stages.split_last() else {
        return Err(invalid(profile, "no growth stages"));
    };
    if terminal != 0 {
        return Err(invalid(
            profile,
            format!("terminal stage must be 0, found {terminal}"),
        ));
    }
    if growing.is_empty() {
        return Err(invalid(profile, "needs at least one growing stage"));
    }
    if let Some(position) = growing.iter().position(|&points| points == 0) {
        return Err(invalid(
            profile,
            format!("growing stage {} has no duration", position.saturating_add(1)),
        ));
    }

    if let StageAfterHarvest::Fixed(stage) = profile.growth_stage_after_harvest {
        let in_range = usize::try_from(stage).is_ok_and(|s| s >= 1 && s <= growing.len());
        if !in_range {
            return Err(invalid(
                profile,
                format!(
                    "stage after harvest {stage} is outside 1..={}",
                    growing.len()
                ),
            ));
        }
    }

    let weights = [
        profile.humidity_weight,
        profile.nutrient_weight,
        profile.air_quality_weight,
        profile.gain_factor,
    ];
    if !weights.iter().all(|w| w.is_finite()) {
        return Err(invalid(profile, "weights and gain factor must be finite"));
    }

    if let Some(entry) = profile
        .drops
        .iter()
        .find(|entry| !entry.probability.is_finite() || entry.probability < 0.0)
    {
        return Err(invalid(
            profile,
            format!(
                "drop {} has invalid probability {}",
                entry.item, entry.probability
            ),
        ));
    }
    let total: f64 = profile.drops.iter().map(|entry| entry.probability).sum();
    if (total - 1.0).abs() > config.drop_weight_tolerance {
        return Err(invalid(
            profile,
            format!("drop probabilities sum to {total}, expected 1"),
        ));
    }

    Ok(())
}

// ---------------------------------------------------------------------------
// CropCatalog
// ---------------------------------------------------------------------------

/// Immutable `name -> profile` lookup.
#[derive(Debug, Clone, Default)]
pub struct CropCatalog {
    crops: BTreeMap<CropName, CropProfile>,
}

impl CropCatalog {
    /// Build a catalog, validating every profile.
    ///
    /// Fails on the first invalid profile or repeated name.
    pub fn from_profiles(
        profiles: Vec<CropProfile>,
        config: &EngineConfig,
    ) -> Result<Self, EngineError> {
        let mut crops = BTreeMap::new();
        for profile in profiles {
            if let Err(error) = validate_profile(&profile, config) {
                tracing::warn!(crop = %profile.name, %error, "rejecting crop profile");
                return Err(error);
            }
            if crops.contains_key(&profile.name) {
                tracing::warn!(crop = %profile.name, "rejecting duplicate crop name");
                return Err(EngineError::DuplicateCrop(profile.name));
            }
            crops.insert(profile.name.clone(), profile);
        }
        tracing::debug!(crops = crops.len(), "crop catalog built");
        Ok(Self { crops })
    }

    /// Look up a crop by name.
    pub fn get(&self, name: &str) -> Option<&CropProfile> {
        self.crops.get(name)
    }

    /// Look up a crop by name, failing if it is absent.
    pub fn require(&self, name: &str) -> Result<&CropProfile, EngineError> {
        self.get(name)
            .ok_or_else(|| EngineError::CropNotFound(CropName::new(name)))
    }

    /// All crop names in ascending order.
    pub fn names(&self) -> impl Iterator<Item = &CropName> {
        self.crops.keys()
    }

    /// All profiles in ascending name order.
    pub fn iter(&self) -> impl Iterator<Item = &CropProfile> {
        self.crops.values()
    }

    /// Number of crops.
    pub fn len(&self) -> usize {
        self.crops.len()
    }

    /// Whether the catalog has no crops.
    pub fn is_empty(&self) -> bool {
        self.crops.is_empty()
    }
}
