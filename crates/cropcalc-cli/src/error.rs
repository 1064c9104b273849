//! Error types for the `cropcalc` binary.
//!
//! [`CliError`] wraps every failure mode between reading the scenario file
//! and printing the reports, so `main` can propagate with `?`.

use std::path::PathBuf;

/// Top-level error for the `cropcalc` binary.
#[derive(Debug, thiserror::Error)]
pub enum CliError {
    /// The scenario file does not exist.
    #[error("scenario file not found: {}", path.display())]
    ScenarioNotFound {
        /// Path that was looked up.
        path: PathBuf,
    },

    /// The scenario file could not be read or parsed.
    #[error("scenario error: {source}")]
    Scenario {
        /// The underlying config error.
        #[from]
        source: cropcalc_engine::ConfigError,
    },

    /// Catalog construction or analysis failed.
    #[error("engine error: {source}")]
    Engine {
        /// The underlying engine error.
        #[from]
        source: cropcalc_engine::EngineError,
    },

    /// Rendering the reports as JSON failed.
    #[error("JSON error: {source}")]
    Json {
        /// The underlying serialization error.
        #[from]
        source: serde_json::Error,
    },
}
