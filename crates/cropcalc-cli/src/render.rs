//! Text and JSON rendering of crop reports.

use cropcalc_engine::{CropReport, Distribution, DropStats, GrowthOutlook, ItemYield};

/// Render reports as JSON (pretty-printed array).
pub fn render_json(reports: &[CropReport]) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(reports)
}

/// Render reports as human-readable text, one block per crop.
pub fn render_text(reports: &[CropReport]) -> String {
    reports
        .iter()
        .map(render_report)
        .collect::<Vec<_>>()
        .join("\n")
}

fn render_report(report: &CropReport) -> String {
    let r = &report.readings;
    let mut lines = vec![
        report.crop.to_string(),
        format!(
            "  need {}, value {} (humidity {}, nutrients {}, air quality {})",
            r.need, r.value, r.humidity, r.nutrients, r.air_quality
        ),
    ];

    match &report.growth {
        Distribution::Death => lines.push("  growth per tick: none, the crop starves".to_owned()),
        Distribution::Outcomes(gains) => {
            let shown: Vec<String> = gains
                .iter()
                .map(|w| format!("{} ({:.1}%)", w.value, w.probability * 100.0))
                .collect();
            lines.push(format!("  growth per tick: {}", shown.join(", ")));
        }
    }

    match &report.outlook {
        GrowthOutlook::Dies => lines.push("  outlook: dies before maturing".to_owned()),
        GrowthOutlook::NeverMatures => {
            lines.push("  outlook: survives but never grows".to_owned());
        }
        GrowthOutlook::Harvests {
            cycle,
            items_per_time_unit,
        } => {
            lines.push(format!(
                "  outlook: harvest every {:.1} ticks",
                cycle.ticks_between_harvests
            ));
            let stages: Vec<String> = cycle
                .stage_ticks
                .iter()
                .map(|ticks| format!("{ticks:.1}"))
                .collect();
            lines.push(format!("    ticks per stage: {}", stages.join(", ")));
            if report.drops.converged().is_some() {
                lines.push(format!("    per time unit: {}", render_yields(items_per_time_unit)));
            }
        }
    }

    match &report.drops {
        DropStats::Converged(yields) => {
            lines.push(format!("  drops per harvest: {:.3}", yields.expected_drops));
            lines.push(format!("    per drop: {}", render_yields(&yields.items_per_drop)));
            lines.push(format!(
                "    per harvest: {}",
                render_yields(&yields.items_per_harvest)
            ));
        }
        DropStats::Diverged { base_chance, cap } => lines.push(format!(
            "  drops per harvest: unbounded (base chance {base_chance} needs more than {cap} counts)"
        )),
    }
    lines.join("\n")
}

fn render_yields(yields: &[ItemYield]) -> String {
    if yields.is_empty() {
        return "nothing".to_owned();
    }
    yields
        .iter()
        .map(|y| format!("{} x{:.3}", y.item, y.amount))
        .collect::<Vec<_>>()
        .join(", ")
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, clippy::indexing_slicing)]

    use cropcalc_engine::{EngineConfig, analyze};
    use cropcalc_types::{CropProfile, CropStats, EnvironmentalContext};

    use super::*;

    fn report(tier: u32, stats: CropStats) -> CropReport {
        let profile = CropProfile::with_tier_defaults("Wheat", tier, 8);
        let ctx = EnvironmentalContext {
            stats,
            height: 64,
            ..EnvironmentalContext::default()
        };
        analyze(&profile, &ctx, &EngineConfig::default()).unwrap()
    }

    #[test]
    fn harvesting_crop_shows_cycle_and_yields() {
        let text = render_text(&[report(1, CropStats::default())]);
        assert!(text.starts_with("Wheat\n"));
        assert!(text.contains("need 0, value 0"));
        assert!(text.contains("growth per tick: 3 (14.3%), 4 (14.3%)"));
        assert!(text.contains("outlook: harvest every"));
        assert!(text.contains("per drop: drop x1.010"));
    }

    #[test]
    fn dying_crop_says_so() {
        let text = render_text(&[report(8, CropStats::default())]);
        assert!(text.contains("the crop starves"));
        assert!(text.contains("outlook: dies before maturing"));
    }

    #[test]
    fn stalled_crop_says_so() {
        let text = render_text(&[report(8, CropStats::new(0, 0, 31))]);
        assert!(text.contains("growth per tick: 0 (100.0%)"));
        assert!(text.contains("survives but never grows"));
    }

    #[test]
    fn json_is_an_array_of_reports() {
        let json = render_json(&[report(1, CropStats::default())]).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value[0]["crop"], "Wheat");
        assert_eq!(render_json(&[]).unwrap(), "[]");
    }

    #[test]
    fn diverging_drops_are_called_out() {
        let profile = CropProfile {
            gain_factor: 400.0,
            ..CropProfile::with_tier_defaults("Salty Root", 1, 4)
        };
        let ctx = EnvironmentalContext {
            height: 64,
            ..EnvironmentalContext::default()
        };
        let config = EngineConfig {
            max_drop_count: 50,
            ..EngineConfig::default()
        };
        let text = render_text(&[analyze(&profile, &ctx, &config).unwrap()]);
        assert!(text.contains("outlook: harvest every"));
        assert!(!text.contains("per time unit"));
        assert!(text.contains("drops per harvest: unbounded (base chance 400 needs more than 50 counts)"));
    }

    #[test]
    fn empty_yields_render_as_nothing() {
        assert_eq!(render_yields(&[]), "nothing");
    }
}
