//! Free-text question to structured intent. This is the keyword fallback
//! parser; callers treat `Ambiguous` as a request for clarification, never
//! as a computable metric.

use serde::{
    Deserialize,
    Serialize,
};

/// Sectors the boards are known to use, with the capitalization the
/// normalizers produce.
pub const KNOWN_SECTORS: &[&str] = &[
    "Aviation",
    "Construction",
    "Dsp",
    "Manufacturing",
    "Mining",
    "Powerline",
    "Railways",
    "Renewables",
    "Security And Surveillance",
    "Tender",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MetricType {
    Revenue,
    Pipeline,
    WinRate,
    ActiveProjects,
    CrossBoardInsights,
    GeneralHealth,
    LeadershipUpdate,
    Ambiguous,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QueryIntent {
    pub metric_type: MetricType,
    pub sector: String,
    pub timeframe: String,
}

impl Default for QueryIntent {
    fn default() -> Self {
        QueryIntent {
            metric_type: MetricType::Ambiguous,
            sector: "all".to_string(),
            timeframe: "all".to_string(),
        }
    }
}

/// Keyword-match a question into an intent. Keyword order matters: report
/// requests win over metric words, and the first matching sector is taken.
pub fn parse_intent(query: &str) -> QueryIntent {
    let q = query.to_lowercase();
    let mut intent = QueryIntent::default();

    intent.metric_type = if q.contains("update") || q.contains("leadership") || q.contains("report")
    {
        MetricType::LeadershipUpdate
    } else if q.contains("revenue") || q.contains("sales") {
        MetricType::Revenue
    } else if q.contains("pipeline") {
        MetricType::Pipeline
    } else if q.contains("win rate") || q.contains("win") {
        MetricType::WinRate
    } else if q.contains("active") || q.contains("project") || q.contains("operation") {
        MetricType::ActiveProjects
    } else if q.contains("overload") || q.contains("cross") || q.contains("capacity") {
        MetricType::CrossBoardInsights
    } else if q.contains("health") || q.contains("how are") {
        MetricType::GeneralHealth
    } else {
        MetricType::Ambiguous
    };

    for sector in KNOWN_SECTORS {
        if q.contains(&sector.to_lowercase()) {
            intent.sector = sector.to_string();
            break;
        }
    }

    if q.contains("month") {
        intent.timeframe = "this_month".to_string();
    } else if q.contains("quarter") {
        intent.timeframe = "this_quarter".to_string();
    } else if q.contains("year") {
        intent.timeframe = "this_year".to_string();
    }

    intent
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_metric_keywords() {
        assert_eq!(parse_intent("prepare a leadership update").metric_type, MetricType::LeadershipUpdate);
        assert_eq!(parse_intent("what is our revenue?").metric_type, MetricType::Revenue);
        assert_eq!(parse_intent("pipeline health please").metric_type, MetricType::Pipeline);
        assert_eq!(parse_intent("what's the win rate").metric_type, MetricType::WinRate);
        assert_eq!(parse_intent("how many active projects").metric_type, MetricType::ActiveProjects);
        assert_eq!(parse_intent("are we overloaded?").metric_type, MetricType::CrossBoardInsights);
        assert_eq!(parse_intent("how are things").metric_type, MetricType::GeneralHealth);
        assert_eq!(parse_intent("tell me a joke").metric_type, MetricType::Ambiguous);
    }

    #[test]
    fn test_report_wins_over_metric_words() {
        let intent = parse_intent("revenue report for the quarter");
        assert_eq!(intent.metric_type, MetricType::LeadershipUpdate);
        assert_eq!(intent.timeframe, "this_quarter");
    }

    #[test]
    fn test_sector_and_timeframe_extraction() {
        let intent = parse_intent("aviation revenue this year");
        assert_eq!(intent.metric_type, MetricType::Revenue);
        assert_eq!(intent.sector, "Aviation");
        assert_eq!(intent.timeframe, "this_year");

        let intent = parse_intent("revenue");
        assert_eq!(intent.sector, "all");
        assert_eq!(intent.timeframe, "all");
    }
}
