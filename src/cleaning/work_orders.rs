use chrono::NaiveDateTime;

use crate::{
    cleaning::{
        aliases::{
            aliases_for,
            normalize_field_name,
            resolve_field,
            WORK_ORDER_FIELD_ALIASES,
        },
        deals::{
            field,
            raw_value,
        },
        flatten::flatten_records,
        values::{
            is_blankish,
            parse_date,
            string_cast,
            title_case,
        },
    },
    core::{
        RawRecord,
        WorkOrderQualityStats,
        WorkOrderRecord,
    },
    kpi::stage::indicates_completion,
};

fn looks_unresolved(text: &str) -> bool {
    let lower = text.to_lowercase();
    ["nan", "unknown", "none"].iter().any(|marker| lower.contains(marker))
}

/// Normalize a raw work-orders record set into a typed table plus quality
/// counters. `now` is the evaluation time used for delay detection.
pub fn clean_work_orders(
    records: &[RawRecord],
    now: NaiveDateTime,
) -> (Vec<WorkOrderRecord>, WorkOrderQualityStats) {
    let mut stats = WorkOrderQualityStats { total_records: records.len(), ..Default::default() };
    if records.is_empty() {
        return (Vec::new(), stats);
    }

    let table = flatten_records(records).rename_fields(normalize_field_name);

    let resolve = |canonical: &str| {
        resolve_field(
            canonical,
            aliases_for(WORK_ORDER_FIELD_ALIASES, canonical),
            &table.field_order,
        )
    };
    let status_field = resolve("execution_status");
    let delivery_field = resolve("delivery_date");
    let billing_field = resolve("billing_status");
    let sector_field = resolve("sector");

    let mut work_orders = Vec::with_capacity(table.rows.len());
    for row in &table.rows {
        let id = string_cast(raw_value(row, "id"));
        let name = string_cast(raw_value(row, "name"));

        let execution_status = title_case(string_cast(field(row, &status_field)).trim());
        let sector = title_case(string_cast(field(row, &sector_field)).trim());
        let billing_status = title_case(string_cast(field(row, &billing_field)).trim());

        let raw_delivery = field(row, &delivery_field);
        if is_blankish(raw_delivery) {
            stats.missing_dates += 1;
        }
        let delivery_date =
            raw_delivery.filter(|raw| !is_blankish(Some(*raw))).and_then(parse_date);

        // A work order is delayed when its delivery date has passed and the
        // status does not indicate completion. No date means never delayed.
        let is_delayed =
            delivery_date.is_some_and(|date| date < now) && !indicates_completion(&execution_status);
        if is_delayed {
            stats.delayed += 1;
        }

        if looks_unresolved(&execution_status) || looks_unresolved(&sector) {
            stats.incomplete += 1;
        }

        work_orders.push(WorkOrderRecord {
            id,
            name,
            sector,
            execution_status,
            delivery_date,
            billing_status,
            is_delayed,
        });
    }

    (work_orders, stats)
}
