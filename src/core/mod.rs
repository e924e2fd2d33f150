pub mod errors;
pub mod models;
pub mod utils;

pub use errors::BoardPulseError;
pub use models::{
    BoardKind, CrossBoardInsight, DataQualityReport, DealKpis, DealQualityStats, DealRecord,
    RawColumn, RawRecord, WorkOrderKpis, WorkOrderQualityStats, WorkOrderRecord,
};
