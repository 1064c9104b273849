//! Enumeration types shared between the catalog and the engine.

use serde::{Deserialize, Deserializer, Serialize, Serializer};

// ---------------------------------------------------------------------------
// Stage after harvest
// ---------------------------------------------------------------------------

/// The growth stage a crop reverts to after being harvested.
///
/// Catalog data writes this either as a 1-based stage index or as the
/// string `"random"`, so the serde representation is a bare integer or that
/// keyword rather than an externally tagged enum.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StageAfterHarvest {
    /// Revert to this 1-based stage index, in `[1, stage_count - 1]`.
    Fixed(u32),
    /// Revert to a uniformly chosen non-terminal stage (e.g. Stickreed).
    Random,
}

impl Default for StageAfterHarvest {
    fn default() -> Self {
        Self::Fixed(1)
    }
}

impl core::fmt::Display for StageAfterHarvest {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Fixed(stage) => write!(f, "{stage}"),
            Self::Random => f.write_str("random"),
        }
    }
}

/// Keyword used for [`StageAfterHarvest::Random`] in serialized data.
const RANDOM_KEYWORD: &str = "random";

/// Wire shape accepted when deserializing [`StageAfterHarvest`].
#[derive(Deserialize)]
#[serde(untagged)]
enum RawStage {
    Index(u32),
    Keyword(String),
}

impl Serialize for StageAfterHarvest {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Fixed(stage) => serializer.serialize_u32(*stage),
            Self::Random => serializer.serialize_str(RANDOM_KEYWORD),
        }
    }
}

impl<'de> Deserialize<'de> for StageAfterHarvest {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        match RawStage::deserialize(deserializer)? {
            RawStage::Index(stage) => Ok(Self::Fixed(stage)),
            RawStage::Keyword(word) if word.eq_ignore_ascii_case(RANDOM_KEYWORD) => {
                Ok(Self::Random)
            }
            RawStage::Keyword(word) => Err(serde::de::Error::custom(format!(
                "expected a stage index or \"random\", got {word:?}"
            ))),
        }
    }
}
