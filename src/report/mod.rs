//! Leadership report assembly. Pure function of the KPI outputs and the
//! data-quality counters; rendering and sorting belong to the presentation
//! layer.

use std::collections::HashMap;

use serde::Serialize;

use crate::{
    core::{
        utils::{
            format_currency,
            format_percent,
        },
        DataQualityReport,
    },
    kpi::KpiEngine,
};

/// Delayed share of active load above which a delay risk flag is raised.
const DELAY_RISK_SHARE: f64 = 0.2;
/// Win rate below which the win-rate flag is raised (given any closed-won
/// deal exists).
const LOW_WIN_RATE: f64 = 0.2;
/// Fraction of a board's records a quality counter may reach before a
/// warning is emitted.
const QUALITY_WARNING_SHARE: f64 = 0.1;

#[derive(Debug, Clone, Serialize)]
pub struct LeadershipReport {
    pub title: String,
    pub revenue_summary: String,
    pub pipeline_health: String,
    pub sector_breakdown: HashMap<String, f64>,
    pub operational_status: String,
    pub risk_flags: Vec<String>,
    pub data_quality_warnings: Vec<String>,
}

/// Build the composite leadership report for the given slice. Empty KPI
/// results degrade to zeroed lines rather than failing.
pub fn generate_leadership_update(
    engine: &KpiEngine,
    quality: &DataQualityReport,
    timeframe: Option<&str>,
    sector: Option<&str>,
) -> LeadershipReport {
    let deals = engine.deals_kpis(timeframe, sector).unwrap_or_default();
    let work_orders = engine.work_orders_kpis(timeframe, sector).unwrap_or_default();

    let active = work_orders.active_projects;
    let delayed = work_orders.delayed_projects;

    let mut risk_flags = Vec::new();
    if delayed > 0 && delayed as f64 / active.max(1) as f64 > DELAY_RISK_SHARE {
        risk_flags.push(format!("High risk of operational delay ({} delayed projects).", delayed));
    }
    let closed_won_rows: usize = deals
        .stage_distribution
        .iter()
        .filter(|(stage, _)| stage.eq_ignore_ascii_case("closed won"))
        .map(|(_, count)| *count)
        .sum();
    if deals.win_rate < LOW_WIN_RATE && closed_won_rows > 0 {
        risk_flags
            .push(format!("Win rate is critically low at {}.", format_percent(deals.win_rate)));
    }
    if risk_flags.is_empty() {
        risk_flags.push("No critical risk flags detected.".to_string());
    }

    let mut warnings = Vec::new();
    let deal_threshold = quality.deals.total_records as f64 * QUALITY_WARNING_SHARE;
    let order_threshold = quality.work_orders.total_records as f64 * QUALITY_WARNING_SHARE;
    if quality.deals.missing_close_dates as f64 > deal_threshold {
        warnings.push(format!(
            "{} deals missing close dates.",
            quality.deals.missing_close_dates
        ));
    }
    if quality.deals.missing_values as f64 > deal_threshold {
        warnings.push(format!(
            "{} deals missing revenue numbers. Pipeline may be conservative.",
            quality.deals.missing_values
        ));
    }
    if quality.work_orders.incomplete as f64 > order_threshold {
        warnings.push(format!(
            "{} incomplete work order records detected.",
            quality.work_orders.incomplete
        ));
    }
    if warnings.is_empty() {
        warnings.push("Data quality is within acceptable bounds.".to_string());
    }

    LeadershipReport {
        title: "Leadership Update".to_string(),
        revenue_summary: format!(
            "Closed Revenue: {} | Win Rate: {}",
            format_currency(deals.closed_revenue),
            format_percent(deals.win_rate)
        ),
        pipeline_health: format!("Open Pipeline: {}", format_currency(deals.open_pipeline_value)),
        sector_breakdown: deals.revenue_by_sector,
        operational_status: format!(
            "Active Projects: {} | Delayed Projects: {}",
            active, delayed
        ),
        risk_flags,
        data_quality_warnings: warnings,
    }
}
