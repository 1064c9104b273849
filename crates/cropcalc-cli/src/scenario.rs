//! Scenario files and command-line invocation.
//!
//! A scenario is one YAML document holding the engine tunables, the plot a
//! crop is planted in, and the crops to analyze:
//!
//! ```yaml
//! engine:
//!   ticks_per_time_unit: 281.25
//! context:
//!   stats: { gain: 5, growth: 10, resistance: 0 }
//!   hydrated: true
//!   height: 70
//! crops:
//!   - name: Stickreed
//!     tier: 4
//!     growth_stages: [100, 100, 100, 0]
//!     growth_stage_after_harvest: random
//! crop: Stickreed
//! ```

use std::path::{Path, PathBuf};

use clap::Parser;
use serde::{Deserialize, Serialize};

use cropcalc_engine::{ConfigError, EngineConfig};
use cropcalc_types::{CropName, CropProfile, EnvironmentalContext};

/// Environment variable naming the scenario file.
pub const SCENARIO_ENV: &str = "CROPCALC_SCENARIO";

/// Scenario file used when neither an argument nor [`SCENARIO_ENV`] is set.
pub const DEFAULT_SCENARIO: &str = "cropcalc.yaml";

/// Contents of a scenario file.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Scenario {
    /// Engine tunables.
    #[serde(default)]
    pub engine: EngineConfig,
    /// The plot every crop is analyzed in.
    #[serde(default)]
    pub context: EnvironmentalContext,
    /// Crop catalog.
    #[serde(default)]
    pub crops: Vec<CropProfile>,
    /// Analyze only this crop, if set.
    #[serde(default)]
    pub crop: Option<CropName>,
}

impl Scenario {
    /// Load a scenario from a YAML file.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::parse(&contents)
    }

    /// Parse a scenario from a YAML string. An empty document is the
    /// default scenario with no crops.
    pub fn parse(yaml: &str) -> Result<Self, ConfigError> {
        if yaml.trim().is_empty() {
            return Ok(Self::default());
        }
        let scenario: Self = serde_yml::from_str(yaml)?;
        Ok(scenario)
    }
}

/// What the user asked for on the command line.
///
/// The scenario path comes from the first argument, else [`SCENARIO_ENV`],
/// else [`DEFAULT_SCENARIO`].
#[derive(Parser, Debug, Clone, PartialEq, Eq)]
#[command(name = "cropcalc", about = "Expected growth and yield statistics for crops")]
pub struct Invocation {
    /// Scenario file to read.
    #[arg(value_name = "SCENARIO", env = SCENARIO_ENV, default_value = DEFAULT_SCENARIO)]
    pub path: PathBuf,

    /// Print JSON instead of text.
    #[arg(long)]
    pub json: bool,
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, clippy::float_cmp)]

    use cropcalc_types::StageAfterHarvest;

    use super::*;

    #[test]
    fn parses_full_scenario() {
        let yaml = r"
engine:
  ticks_per_time_unit: 4.6875
context:
  stats: { gain: 5, growth: 10, resistance: 0 }
  hydrated: true
  height: 70
crops:
  - name: Stickreed
    tier: 4
    growth_stages: [100, 100, 100, 0]
    growth_stage_after_harvest: random
    drops:
      - { item: Sugar Cane, count: 1, probability: 1.0 }
crop: Stickreed
";
        let scenario = Scenario::parse(yaml).unwrap();
        assert_eq!(scenario.engine.ticks_per_time_unit, 4.6875);
        assert_eq!(scenario.engine.max_drop_count, 100_000);
        assert_eq!(scenario.context.stats.growth, 10);
        assert!(scenario.context.hydrated);
        assert_eq!(scenario.crops.len(), 1);
        let crop = &scenario.crops[0];
        assert_eq!(crop.growth_stage_after_harvest, StageAfterHarvest::Random);
        // Unspecified fields take profile defaults.
        assert_eq!(crop.humidity_weight, 1.0);
        assert_eq!(scenario.crop, Some(CropName::new("Stickreed")));
    }

    #[test]
    fn empty_scenario_is_default() {
        assert_eq!(Scenario::parse("  \n").unwrap(), Scenario::default());
    }

    #[test]
    fn malformed_scenario_is_yaml_error() {
        assert!(matches!(
            Scenario::parse("crops: 7"),
            Err(ConfigError::Yaml { .. })
        ));
    }

    #[test]
    fn command_definition_is_consistent() {
        use clap::CommandFactory;
        Invocation::command().debug_assert();
    }

    #[test]
    fn positional_path_and_json_flag() {
        let invocation = Invocation::try_parse_from(["cropcalc", "farm.yaml", "--json"]).unwrap();
        assert_eq!(invocation.path, PathBuf::from("farm.yaml"));
        assert!(invocation.json);

        let text = Invocation::try_parse_from(["cropcalc", "farm.yaml"]).unwrap();
        assert!(!text.json);
    }

    #[test]
    fn unknown_flag_is_rejected() {
        assert!(Invocation::try_parse_from(["cropcalc", "--verbose"]).is_err());
    }

    #[test]
    fn extra_positional_is_rejected() {
        assert!(Invocation::try_parse_from(["cropcalc", "farm.yaml", "orchard.yaml"]).is_err());
    }
}
