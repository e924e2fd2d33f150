//! Request-scoped snapshot of the two boards plus the routing that turns a
//! parsed intent into a KPI view or a leadership report. The snapshot is
//! replaced wholesale on refresh; in-flight reads keep the old one.

use chrono::{
    NaiveDateTime,
    Utc,
};
use serde::Serialize;

use crate::{
    cleaning::{
        clean_deals,
        clean_work_orders,
    },
    core::{
        utils::{
            format_currency,
            format_percent,
        },
        BoardKind,
        CrossBoardInsight,
        DataQualityReport,
        DealKpis,
        DealRecord,
        RawRecord,
        WorkOrderKpis,
        WorkOrderRecord,
    },
    intent::{
        parse_intent,
        MetricType,
        QueryIntent,
    },
    kpi::KpiEngine,
    monday::MondayClient,
    report::{
        generate_leadership_update,
        LeadershipReport,
    },
};

/// One immutable in-memory view of both normalized boards.
#[derive(Debug, Clone)]
pub struct Snapshot {
    pub deals: Vec<DealRecord>,
    pub work_orders: Vec<WorkOrderRecord>,
    pub quality: DataQualityReport,
    pub last_fetch: NaiveDateTime,
}

impl Snapshot {
    /// Normalize both raw record sets into a fresh snapshot.
    pub fn from_raw(raw_deals: &[RawRecord], raw_work_orders: &[RawRecord]) -> Snapshot {
        let now = Utc::now().naive_utc();
        let (deals, deal_stats) = clean_deals(raw_deals);
        let (work_orders, work_order_stats) = clean_work_orders(raw_work_orders, now);

        Snapshot {
            deals,
            work_orders,
            quality: DataQualityReport { deals: deal_stats, work_orders: work_order_stats },
            last_fetch: now,
        }
    }

    pub fn engine(&self) -> KpiEngine<'_> {
        KpiEngine::new(&self.deals, &self.work_orders)
    }
}

/// Fetch both boards and build a new snapshot. A board that cannot be
/// fetched degrades to an empty record set; the quality stats and KPI
/// sentinels carry the signal from there.
pub async fn refresh(client: &mut MondayClient) -> Snapshot {
    let raw_deals = fetch_or_empty(client, BoardKind::Deals).await;
    let raw_work_orders = fetch_or_empty(client, BoardKind::WorkOrders).await;

    println!(
        "Fetched {} deal records and {} work order records",
        raw_deals.len(),
        raw_work_orders.len()
    );
    Snapshot::from_raw(&raw_deals, &raw_work_orders)
}

async fn fetch_or_empty(client: &mut MondayClient, kind: BoardKind) -> Vec<RawRecord> {
    match client.fetch_board_records(kind.board_name()).await {
        Ok(records) => records,
        Err(error) => {
            eprintln!("Fetching the {} board failed: {}", kind.board_name(), error);
            Vec::new()
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ResponseKind {
    Text,
    Report,
    Clarification,
}

/// Structured answer to one question. The text line is a convenience for
/// plain consumers; the raw KPI payloads carry the full data shape.
#[derive(Debug, Clone, Serialize)]
pub struct ChatResponse {
    pub kind: ResponseKind,
    pub text: String,
    pub intent: QueryIntent,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub report: Option<LeadershipReport>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub deals_kpis: Option<DealKpis>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub work_orders_kpis: Option<WorkOrderKpis>,
}

/// Answer a free-text question against the given snapshot.
pub fn answer(snapshot: &Snapshot, query: &str) -> ChatResponse {
    let intent = parse_intent(query);
    answer_intent(snapshot, intent)
}

/// Route an already-parsed intent to the matching KPI view or report.
pub fn answer_intent(snapshot: &Snapshot, intent: QueryIntent) -> ChatResponse {
    let engine = snapshot.engine();
    let timeframe = Some(intent.timeframe.as_str());
    let sector = Some(intent.sector.as_str());

    if intent.metric_type == MetricType::Ambiguous {
        return ChatResponse {
            kind: ResponseKind::Clarification,
            text: "Could you please clarify? I can answer about revenue, pipeline health, \
                   operations, or prepare a leadership update."
                .to_string(),
            intent,
            report: None,
            deals_kpis: None,
            work_orders_kpis: None,
        };
    }

    if intent.metric_type == MetricType::LeadershipUpdate {
        let report = generate_leadership_update(&engine, &snapshot.quality, timeframe, sector);
        return ChatResponse {
            kind: ResponseKind::Report,
            text: report.title.clone(),
            intent,
            report: Some(report),
            deals_kpis: None,
            work_orders_kpis: None,
        };
    }

    let deals_kpis = engine.deals_kpis(timeframe, sector);
    let work_orders_kpis = engine.work_orders_kpis(timeframe, sector);
    let deals = deals_kpis.clone().unwrap_or_default();
    let work_orders = work_orders_kpis.clone().unwrap_or_default();

    let mut text = match intent.metric_type {
        MetricType::Revenue => {
            format!("The closed revenue is {}.", format_currency(deals.closed_revenue))
        }
        MetricType::Pipeline => format!(
            "The open pipeline value is {}, with a weighted value of {}.",
            format_currency(deals.open_pipeline_value),
            format_currency(deals.weighted_pipeline)
        ),
        MetricType::WinRate => {
            format!("The win rate is {}.", format_percent(deals.win_rate))
        }
        MetricType::ActiveProjects => format!(
            "There are {} active projects, with {} currently delayed.",
            work_orders.active_projects, work_orders.delayed_projects
        ),
        MetricType::CrossBoardInsights => {
            let insight = engine.cross_board_intelligence(timeframe, sector);
            let line = match insight {
                CrossBoardInsight::InsufficientData => {
                    "Insufficient data for cross-board intelligence.".to_string()
                }
                CrossBoardInsight::Insight { strategic_insight, .. } => strategic_insight,
            };
            format!("Cross-board analysis: {}", line)
        }
        MetricType::GeneralHealth => format!(
            "Overall health: Revenue is {} and we are handling {} active projects.",
            format_currency(deals.closed_revenue),
            work_orders.active_projects
        ),
        // Ambiguous and LeadershipUpdate returned above.
        _ => format!(
            "I pulled the metrics. Revenue: {}. Active projects: {}.",
            format_currency(deals.closed_revenue),
            work_orders.active_projects
        ),
    };

    // Degraded close dates make timeframe slices unreliable; say so.
    let deal_stats = snapshot.quality.deals;
    if deal_stats.missing_close_dates > 0 {
        let missing_share =
            deal_stats.missing_close_dates as f64 / deal_stats.total_records.max(1) as f64;
        if missing_share > 0.1 {
            text.push_str(&format!(
                "\n\nWarning: {} of deals are missing close dates. Timeframe filters might be inaccurate.",
                format_percent(missing_share)
            ));
        }
    }

    ChatResponse {
        kind: ResponseKind::Text,
        text,
        intent,
        report: None,
        deals_kpis,
        work_orders_kpis,
    }
}
