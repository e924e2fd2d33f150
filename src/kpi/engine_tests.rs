use chrono::{
    Duration,
    NaiveDate,
    NaiveDateTime,
    Utc,
};

use crate::{
    core::{
        CrossBoardInsight,
        DealRecord,
        WorkOrderRecord,
    },
    kpi::KpiEngine,
};

fn now() -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2025, 6, 15)
        .and_then(|d| d.and_hms_opt(12, 0, 0))
        .unwrap_or_else(|| Utc::now().naive_utc())
}

fn deal(sector: &str, stage: &str, value: f64, probability: f64, close: Option<NaiveDateTime>) -> DealRecord {
    DealRecord {
        id: "1".to_string(),
        name: "deal".to_string(),
        sector: sector.to_string(),
        probability_score: probability,
        deal_value: value,
        close_date: close,
        stage: stage.to_string(),
    }
}

fn work_order(sector: &str, status: &str, is_delayed: bool) -> WorkOrderRecord {
    WorkOrderRecord {
        id: "1".to_string(),
        name: "wo".to_string(),
        sector: sector.to_string(),
        execution_status: status.to_string(),
        delivery_date: None,
        billing_status: "Billed".to_string(),
        is_delayed,
    }
}

#[test]
fn test_single_closed_won_deal() {
    let deals = vec![deal("Mining", "Closed Won", 10000.0, 0.8, None)];
    let engine = KpiEngine::with_evaluation_time(&deals, &[], now());

    let kpis = engine.deals_kpis(None, None).expect("non-empty table");
    assert_eq!(kpis.closed_revenue, 10000.0);
    assert_eq!(kpis.win_rate, 1.0);
    assert_eq!(kpis.average_deal_size, 10000.0);
    assert_eq!(kpis.open_pipeline_value, 0.0);
    assert_eq!(kpis.stage_distribution.get("closed won"), Some(&1));
}

#[test]
fn test_open_deal_pipeline_and_closing_soon() {
    let close = now() + Duration::days(20);
    let deals = vec![deal("Mining", "Open", 5000.0, 0.2, Some(close))];
    let engine = KpiEngine::with_evaluation_time(&deals, &[], now());

    let kpis = engine.deals_kpis(None, None).expect("non-empty table");
    assert_eq!(kpis.open_pipeline_value, 5000.0);
    assert_eq!(kpis.weighted_pipeline, 1000.0);
    assert_eq!(kpis.closing_next_30_days_value, 5000.0);
    assert_eq!(kpis.closed_revenue, 0.0);
    assert_eq!(kpis.win_rate, 0.0);
}

#[test]
fn test_deal_outside_closing_window_not_counted() {
    let close = now() + Duration::days(45);
    let deals = vec![deal("Mining", "Open", 5000.0, 0.5, Some(close))];
    let engine = KpiEngine::with_evaluation_time(&deals, &[], now());

    let kpis = engine.deals_kpis(None, None).expect("non-empty table");
    assert_eq!(kpis.closing_next_30_days_value, 0.0);
}

#[test]
fn test_empty_table_is_the_no_data_sentinel() {
    let engine = KpiEngine::with_evaluation_time(&[], &[], now());
    assert!(engine.deals_kpis(None, None).is_none());
    assert!(engine.work_orders_kpis(None, None).is_none());
    assert_eq!(engine.cross_board_intelligence(None, None), CrossBoardInsight::InsufficientData);
}

#[test]
fn test_filtered_to_nothing_still_yields_zeroed_kpis() {
    let deals = vec![deal("Mining", "Open", 5000.0, 0.5, None)];
    let engine = KpiEngine::with_evaluation_time(&deals, &[], now());

    let kpis = engine.deals_kpis(None, Some("Aviation")).expect("table is not empty");
    assert_eq!(kpis.open_pipeline_value, 0.0);
    assert!(kpis.revenue_by_sector.is_empty());
}

#[test]
fn test_sector_filter_is_case_insensitive() {
    let deals = vec![
        deal("Aviation", "Open", 1000.0, 0.5, None),
        deal("Mining", "Open", 2000.0, 0.5, None),
    ];
    let engine = KpiEngine::with_evaluation_time(&deals, &[], now());

    let kpis = engine.deals_kpis(None, Some("aviation")).expect("non-empty table");
    assert_eq!(kpis.open_pipeline_value, 1000.0);
    // The breakdown reflects the filtered slice, degenerating to one entry.
    assert_eq!(kpis.revenue_by_sector.len(), 1);

    let all = engine.deals_kpis(None, Some("All")).expect("non-empty table");
    assert_eq!(all.open_pipeline_value, 3000.0);
}

#[test]
fn test_timeframe_filter_excludes_undated_rows() {
    let recent = now() - Duration::days(10);
    let old = now() - Duration::days(200);
    let deals = vec![
        deal("Mining", "Closed Won", 1000.0, 0.8, Some(recent)),
        deal("Mining", "Closed Won", 2000.0, 0.8, Some(old)),
        deal("Mining", "Closed Won", 4000.0, 0.8, None),
    ];
    let engine = KpiEngine::with_evaluation_time(&deals, &[], now());

    let month = engine.deals_kpis(Some("this_month"), None).expect("non-empty table");
    assert_eq!(month.closed_revenue, 1000.0);

    let year = engine.deals_kpis(Some("this_year"), None).expect("non-empty table");
    assert_eq!(year.closed_revenue, 3000.0);

    // No timeframe: undated rows are back in.
    let all = engine.deals_kpis(Some("all"), None).expect("non-empty table");
    assert_eq!(all.closed_revenue, 7000.0);
}

#[test]
fn test_win_rate_counts_lost_and_stays_in_unit_interval() {
    let deals = vec![
        deal("Mining", "Closed Won", 1000.0, 0.8, None),
        deal("Mining", "Closed Won", 3000.0, 0.8, None),
        deal("Mining", "Lost", 500.0, 0.1, None),
    ];
    let engine = KpiEngine::with_evaluation_time(&deals, &[], now());

    let kpis = engine.deals_kpis(None, None).expect("non-empty table");
    assert!((kpis.win_rate - 2.0 / 3.0).abs() < 1e-9);
    assert!((0.0..=1.0).contains(&kpis.win_rate));
    assert_eq!(kpis.average_deal_size, 2000.0);
}

#[test]
fn test_revenue_by_sector_sums_to_total_deal_value() {
    let deals = vec![
        deal("Aviation", "Open", 1000.0, 0.5, None),
        deal("Mining", "Closed Won", 2000.0, 0.8, None),
        deal("Mining", "Negotiation", 700.0, 0.5, None),
        deal("Railways", "Lost", 300.0, 0.1, None),
    ];
    let engine = KpiEngine::with_evaluation_time(&deals, &[], now());

    let kpis = engine.deals_kpis(None, None).expect("non-empty table");
    let breakdown_total: f64 = kpis.revenue_by_sector.values().sum();
    let table_total: f64 = deals.iter().map(|d| d.deal_value).sum();
    assert!((breakdown_total - table_total).abs() < 1e-9);
}

#[test]
fn test_work_order_kpis_active_and_delayed() {
    let orders = vec![
        work_order("Mining", "In Progress", true),
        work_order("Mining", "In Progress", false),
        work_order("Aviation", "Completed", false),
        work_order("Aviation", "Cancelled", false),
    ];
    let engine = KpiEngine::with_evaluation_time(&[], &orders, now());

    let kpis = engine.work_orders_kpis(None, None).expect("non-empty table");
    assert_eq!(kpis.active_projects, 2);
    assert_eq!(kpis.delayed_projects, 1);
    assert_eq!(kpis.execution_load_by_sector.get("Mining"), Some(&2));
    assert_eq!(kpis.execution_load_by_sector.get("Aviation"), None);
}

#[test]
fn test_cross_board_overload_flag() {
    // 2 delayed out of 4 active is a 0.5 share, over the 0.3 threshold.
    let deals = vec![deal("Mining", "Open", 5000.0, 0.5, None)];
    let orders = vec![
        work_order("Mining", "In Progress", true),
        work_order("Mining", "In Progress", true),
        work_order("Mining", "In Progress", false),
        work_order("Mining", "In Progress", false),
    ];
    let engine = KpiEngine::with_evaluation_time(&deals, &orders, now());

    match engine.cross_board_intelligence(None, None) {
        CrossBoardInsight::Insight { pipeline_ratio, active_ratio, is_overloaded, strategic_insight } => {
            assert!(is_overloaded);
            assert!(strategic_insight.contains("overloaded"));
            // No sector filter: ratios stay at their 1.0 defaults.
            assert_eq!(pipeline_ratio, 1.0);
            assert_eq!(active_ratio, 1.0);
        }
        other => panic!("expected an insight, got {:?}", other),
    }
}

#[test]
fn test_cross_board_concentration_risk() {
    // Aviation holds 50% of open pipeline and 50% of active work.
    let deals = vec![
        deal("Aviation", "Open", 5000.0, 0.5, None),
        deal("Mining", "Open", 5000.0, 0.5, None),
    ];
    let orders = vec![
        work_order("Aviation", "In Progress", false),
        work_order("Mining", "In Progress", false),
    ];
    let engine = KpiEngine::with_evaluation_time(&deals, &orders, now());

    match engine.cross_board_intelligence(None, Some("Aviation")) {
        CrossBoardInsight::Insight { pipeline_ratio, active_ratio, strategic_insight, .. } => {
            assert!((pipeline_ratio - 0.5).abs() < 1e-9);
            assert!((active_ratio - 0.5).abs() < 1e-9);
            assert!(strategic_insight.contains("High concentration risk"));
        }
        other => panic!("expected an insight, got {:?}", other),
    }
}

#[test]
fn test_cross_board_upcoming_wave() {
    // Renewables is half the pipeline but barely any of the active load.
    let deals = vec![
        deal("Renewables", "Open", 5000.0, 0.5, None),
        deal("Mining", "Open", 5000.0, 0.5, None),
    ];
    let mut orders = vec![work_order("Renewables", "In Progress", false)];
    for _ in 0..9 {
        orders.push(work_order("Mining", "In Progress", false));
    }
    let engine = KpiEngine::with_evaluation_time(&deals, &orders, now());

    match engine.cross_board_intelligence(None, Some("Renewables")) {
        CrossBoardInsight::Insight { pipeline_ratio, active_ratio, strategic_insight, .. } => {
            assert!(pipeline_ratio > 0.4);
            assert!(active_ratio < 0.2);
            assert!(strategic_insight.contains("upcoming wave"));
        }
        other => panic!("expected an insight, got {:?}", other),
    }
}
