use std::collections::HashMap;

use chrono::NaiveDateTime;
use serde::{
    Deserialize,
    Serialize,
};

/// Which external board a record set came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BoardKind {
    Deals,
    WorkOrders,
}

impl BoardKind {
    pub fn board_name(&self) -> &'static str {
        match self {
            BoardKind::Deals => "Deals",
            BoardKind::WorkOrders => "Work Orders",
        }
    }
}

/// One column as delivered by the board API. Titles are free-form and not
/// stable across fetches; text may be absent entirely.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawColumn {
    pub title: Option<String>,
    pub text: Option<String>,
}

/// One item as delivered by the board API, before any normalization.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawRecord {
    pub id: String,
    pub name: String,
    pub columns: Vec<RawColumn>,
}

/// A normalized row of the deals table.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DealRecord {
    pub id: String,
    pub name: String,
    pub sector: String,
    pub probability_score: f64,
    pub deal_value: f64,
    pub close_date: Option<NaiveDateTime>,
    pub stage: String,
}

impl DealRecord {
    /// Deal value scaled by estimated closure probability.
    pub fn weighted_value(&self) -> f64 {
        self.deal_value * self.probability_score
    }
}

/// A normalized row of the work-orders table.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WorkOrderRecord {
    pub id: String,
    pub name: String,
    pub sector: String,
    pub execution_status: String,
    pub delivery_date: Option<NaiveDateTime>,
    pub billing_status: String,
    pub is_delayed: bool,
}

/// Data-quality counters accumulated during one deals normalization pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct DealQualityStats {
    pub total_records: usize,
    pub missing_close_dates: usize,
    pub missing_values: usize,
}

/// Data-quality counters accumulated during one work-orders normalization pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct WorkOrderQualityStats {
    pub total_records: usize,
    pub missing_dates: usize,
    pub delayed: usize,
    pub incomplete: usize,
}

/// Quality counters for both boards, produced by one snapshot refresh.
#[derive(Debug, Clone, Copy, Default, Serialize)]
pub struct DataQualityReport {
    pub deals: DealQualityStats,
    pub work_orders: WorkOrderQualityStats,
}

/// Deal KPIs computed over one filtered view of the deals table.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct DealKpis {
    pub closed_revenue: f64,
    pub open_pipeline_value: f64,
    pub weighted_pipeline: f64,
    pub win_rate: f64,
    pub average_deal_size: f64,
    pub closing_next_30_days_value: f64,
    pub revenue_by_sector: HashMap<String, f64>,
    pub stage_distribution: HashMap<String, usize>,
}

/// Work-order KPIs computed over one filtered view of the work-orders table.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct WorkOrderKpis {
    pub active_projects: usize,
    pub delayed_projects: usize,
    pub execution_load_by_sector: HashMap<String, usize>,
}

/// Capacity-vs-demand signal across both boards.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum CrossBoardInsight {
    /// One of the boards produced no KPIs at all.
    InsufficientData,
    Insight {
        pipeline_ratio: f64,
        active_ratio: f64,
        is_overloaded: bool,
        strategic_insight: String,
    },
}
