//! BI answering over two work-tracking boards (sales deals and operational
//! work orders): raw records are flattened and normalized into typed tables
//! with data-quality counters, a KPI engine computes revenue, pipeline, and
//! operational metrics over filterable slices, and a report assembler folds
//! everything into a structured leadership update.

/// Snapshot state and free-text question routing.
pub mod agent;
/// Record flattening, column discovery, and per-board normalization.
pub mod cleaning;
/// Shared models, errors, and formatting helpers.
pub mod core;
/// Free-text question to structured intent.
pub mod intent;
/// KPI aggregation over the normalized tables.
pub mod kpi;
/// Board-tracking API client.
pub mod monday;
/// Leadership report assembly.
pub mod report;

pub use agent::{
    answer,
    refresh,
    ChatResponse,
    Snapshot,
};
pub use cleaning::{
    clean_deals,
    clean_work_orders,
};
pub use crate::core::{
    BoardKind,
    BoardPulseError,
    CrossBoardInsight,
    DataQualityReport,
    DealKpis,
    DealRecord,
    RawColumn,
    RawRecord,
    WorkOrderKpis,
    WorkOrderRecord,
};
pub use intent::{
    parse_intent,
    MetricType,
    QueryIntent,
};
pub use kpi::KpiEngine;
pub use monday::MondayClient;
pub use report::{
    generate_leadership_update,
    LeadershipReport,
};
