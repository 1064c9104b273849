//! `cropcalc`: analyze the crops of a scenario file.
//!
//! # Usage
//!
//! ```text
//! cropcalc [SCENARIO] [--json]
//! ```
//!
//! The scenario path is the first argument, else `$CROPCALC_SCENARIO`, else
//! `cropcalc.yaml` in the working directory. Reports go to stdout; logs go
//! to stderr and honour `RUST_LOG`.

mod error;
mod render;
mod scenario;

use clap::Parser;
use cropcalc_engine::{CropCatalog, CropReport, DropStats, GrowthOutlook, analyze, analyze_catalog};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use crate::error::CliError;
use crate::scenario::{Invocation, Scenario};

/// Application entry point.
///
/// # Errors
///
/// Returns an error if the scenario cannot be loaded or a crop cannot be
/// analyzed.
fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(true)
        .with_writer(std::io::stderr)
        .init();

    let invocation = Invocation::parse();
    info!(path = %invocation.path.display(), json = invocation.json, "cropcalc starting");

    let output = run(&invocation)?;
    println!("{output}");
    Ok(())
}

/// Load the scenario, analyze the requested crops, and render the result.
fn run(invocation: &Invocation) -> Result<String, CliError> {
    if !invocation.path.exists() {
        return Err(CliError::ScenarioNotFound {
            path: invocation.path.clone(),
        });
    }
    let scenario = Scenario::from_file(&invocation.path)?;
    info!(
        path = %invocation.path.display(),
        crops = scenario.crops.len(),
        selected = ?scenario.crop,
        "Scenario loaded"
    );

    let reports = analyze_scenario(scenario)?;
    for report in &reports {
        log_summary(report);
    }

    if invocation.json {
        Ok(render::render_json(&reports)?)
    } else {
        Ok(render::render_text(&reports))
    }
}

/// Analyze the selected crop, or every crop when none is selected.
fn analyze_scenario(scenario: Scenario) -> Result<Vec<CropReport>, CliError> {
    let Scenario {
        engine,
        context,
        crops,
        crop,
    } = scenario;
    let catalog = CropCatalog::from_profiles(crops, &engine)?;
    let reports = match crop {
        Some(name) => vec![analyze(catalog.require(name.as_str())?, &context, &engine)?],
        None => analyze_catalog(&catalog, &context, &engine)?,
    };
    Ok(reports)
}

fn log_summary(report: &CropReport) {
    if let DropStats::Diverged { base_chance, cap } = report.drops {
        warn!(crop = %report.crop, base_chance, cap, "Drop count diverges");
    }
    match &report.outlook {
        GrowthOutlook::Harvests { cycle, .. } => info!(
            crop = %report.crop,
            ticks_between_harvests = cycle.ticks_between_harvests,
            expected_drops = ?report.drops.converged().map(|yields| yields.expected_drops),
            "Crop harvests"
        ),
        GrowthOutlook::NeverMatures => info!(crop = %report.crop, "Crop never matures"),
        GrowthOutlook::Dies => info!(crop = %report.crop, "Crop dies"),
    }
}
