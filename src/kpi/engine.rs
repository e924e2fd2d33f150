use chrono::{
    Duration,
    Months,
    NaiveDateTime,
    Utc,
};

use crate::{
    core::{
        utils::format_percent,
        CrossBoardInsight,
        DealKpis,
        DealRecord,
        WorkOrderKpis,
        WorkOrderRecord,
    },
    kpi::stage::{
        classify_stage,
        is_active_status,
    },
};

/// Share of delayed projects (relative to active load) above which
/// operations count as overloaded.
const OVERLOAD_DELAY_SHARE: f64 = 0.3;
/// Sector share of pipeline/active work above which concentration risk is
/// flagged.
const CONCENTRATION_SHARE: f64 = 0.4;
/// Active-work share below which a high-pipeline sector is an upcoming wave
/// rather than a concentration risk.
const WAVE_ACTIVE_SHARE: f64 = 0.2;

/// Pure KPI computation over one immutable snapshot of the two normalized
/// tables. Every call filters and aggregates fresh; nothing is cached or
/// mutated.
pub struct KpiEngine<'a> {
    deals: &'a [DealRecord],
    work_orders: &'a [WorkOrderRecord],
    now: NaiveDateTime,
}

fn sector_filter(sector: Option<&str>) -> Option<String> {
    sector
        .filter(|s| !s.eq_ignore_ascii_case("all"))
        .map(|s| s.to_lowercase())
}

fn timeframe_months(timeframe: Option<&str>) -> Option<u32> {
    let timeframe = timeframe?.to_lowercase();
    if timeframe == "all" {
        return None;
    }
    if timeframe.contains("month") {
        Some(1)
    } else if timeframe.contains("quarter") {
        Some(3)
    } else if timeframe.contains("year") {
        Some(12)
    } else {
        None
    }
}

impl<'a> KpiEngine<'a> {
    pub fn new(deals: &'a [DealRecord], work_orders: &'a [WorkOrderRecord]) -> Self {
        Self::with_evaluation_time(deals, work_orders, Utc::now().naive_utc())
    }

    /// Pin the evaluation time used for timeframe windows and the
    /// closing-soon horizon. Tests use this for determinism.
    pub fn with_evaluation_time(
        deals: &'a [DealRecord],
        work_orders: &'a [WorkOrderRecord],
        now: NaiveDateTime,
    ) -> Self {
        KpiEngine { deals, work_orders, now }
    }

    fn filtered_deals(&self, timeframe: Option<&str>, sector: Option<&str>) -> Vec<&'a DealRecord> {
        let sector = sector_filter(sector);
        let cutoff = timeframe_months(timeframe)
            .map(|months| self.now.checked_sub_months(Months::new(months)).unwrap_or(self.now));

        self.deals
            .iter()
            .filter(|deal| {
                sector.as_deref().map_or(true, |s| deal.sector.to_lowercase() == s)
            })
            .filter(|deal| match cutoff {
                // An active timeframe filter excludes rows without a close date.
                Some(cutoff) => deal.close_date.is_some_and(|date| date >= cutoff),
                None => true,
            })
            .collect()
    }

    /// Deal KPIs over the requested slice. `None` means the deals table is
    /// empty altogether; a slice that filters down to nothing still yields
    /// zeroed KPIs.
    pub fn deals_kpis(&self, timeframe: Option<&str>, sector: Option<&str>) -> Option<DealKpis> {
        if self.deals.is_empty() {
            return None;
        }

        let rows = self.filtered_deals(timeframe, sector);
        let mut kpis = DealKpis::default();
        let mut closed_won = 0usize;
        let mut closed_lost = 0usize;

        let closing_horizon = self.now + Duration::days(30);

        for deal in &rows {
            let flags = classify_stage(&deal.stage);

            if flags.closed {
                kpis.closed_revenue += deal.deal_value;
                closed_won += 1;
            }
            if flags.open {
                kpis.open_pipeline_value += deal.deal_value;
                kpis.weighted_pipeline += deal.weighted_value();

                let closing_soon = deal
                    .close_date
                    .is_some_and(|date| date >= self.now && date <= closing_horizon);
                if closing_soon {
                    kpis.closing_next_30_days_value += deal.deal_value;
                }
            }
            if flags.lost {
                closed_lost += 1;
            }

            *kpis.revenue_by_sector.entry(deal.sector.clone()).or_insert(0.0) += deal.deal_value;
            let stage_key = deal.stage.trim().to_lowercase();
            *kpis.stage_distribution.entry(stage_key).or_insert(0) += 1;
        }

        let total_closed = closed_won + closed_lost;
        kpis.win_rate =
            if total_closed > 0 { closed_won as f64 / total_closed as f64 } else { 0.0 };
        kpis.average_deal_size =
            if closed_won > 0 { kpis.closed_revenue / closed_won as f64 } else { 0.0 };

        Some(kpis)
    }

    /// Work-order KPIs over the requested slice. The timeframe parameter is
    /// accepted for interface symmetry but intentionally not applied: work
    /// orders are tracked by delivery recency, not a rolling window.
    pub fn work_orders_kpis(
        &self,
        _timeframe: Option<&str>,
        sector: Option<&str>,
    ) -> Option<WorkOrderKpis> {
        if self.work_orders.is_empty() {
            return None;
        }

        let sector = sector_filter(sector);
        let rows: Vec<&WorkOrderRecord> = self
            .work_orders
            .iter()
            .filter(|order| {
                sector.as_deref().map_or(true, |s| order.sector.to_lowercase() == s)
            })
            .collect();

        let mut kpis = WorkOrderKpis::default();
        for order in &rows {
            if is_active_status(&order.execution_status) {
                kpis.active_projects += 1;
                *kpis.execution_load_by_sector.entry(order.sector.clone()).or_insert(0) += 1;
            }
            if order.is_delayed {
                kpis.delayed_projects += 1;
            }
        }

        Some(kpis)
    }

    /// Capacity-vs-demand signal across both boards, with sector
    /// concentration ratios when a specific sector is requested.
    pub fn cross_board_intelligence(
        &self,
        timeframe: Option<&str>,
        sector: Option<&str>,
    ) -> CrossBoardInsight {
        let (Some(deals), Some(work_orders)) = (
            self.deals_kpis(timeframe, sector),
            self.work_orders_kpis(timeframe, sector),
        ) else {
            return CrossBoardInsight::InsufficientData;
        };

        let active = work_orders.active_projects;
        let delayed = work_orders.delayed_projects;

        let mut insight = "Operational capacity seems healthy.".to_string();
        let mut is_overloaded = false;
        if delayed > 0 && delayed as f64 / active.max(1) as f64 > OVERLOAD_DELAY_SHARE {
            insight = format!("Warning: {} projects delayed. Operations are overloaded.", delayed);
            is_overloaded = true;
        }

        let mut pipeline_ratio = 1.0;
        let mut active_ratio = 1.0;

        if sector_filter(sector).is_some() {
            // Sector share of the unfiltered totals; denominators floored at
            // 1 so empty totals cannot divide by zero.
            let all_deals = self.deals_kpis(None, None).unwrap_or_default();
            let all_work_orders = self.work_orders_kpis(None, None).unwrap_or_default();

            pipeline_ratio =
                deals.open_pipeline_value / all_deals.open_pipeline_value.max(1.0);
            active_ratio = active as f64 / all_work_orders.active_projects.max(1) as f64;

            let sector_name = sector.unwrap_or_default();
            if pipeline_ratio > CONCENTRATION_SHARE && active_ratio > CONCENTRATION_SHARE {
                insight.push_str(&format!(
                    " The {} sector represents {} of pipeline and {} of active work. High concentration risk.",
                    sector_name,
                    format_percent(pipeline_ratio),
                    format_percent(active_ratio)
                ));
            } else if pipeline_ratio > CONCENTRATION_SHARE && active_ratio < WAVE_ACTIVE_SHARE {
                insight.push_str(&format!(
                    " The {} sector is an upcoming wave ({} of pipeline) but current execution load is low.",
                    sector_name,
                    format_percent(pipeline_ratio)
                ));
            }
        }

        CrossBoardInsight::Insight {
            pipeline_ratio,
            active_ratio,
            is_overloaded,
            strategic_insight: insight,
        }
    }
}
