use crate::{
    cleaning::{
        aliases::{
            aliases_for,
            normalize_field_name,
            resolve_field,
            DEAL_FIELD_ALIASES,
        },
        flatten::{
            flatten_records,
            FlatRecord,
        },
        values::{
            is_blankish,
            parse_date,
            parse_money,
            parse_probability,
            string_cast,
            title_case,
        },
    },
    core::{
        DealQualityStats,
        DealRecord,
        RawRecord,
    },
};

pub(super) fn raw_value<'a>(row: &'a FlatRecord, key: &str) -> Option<&'a str> {
    row.get(key).and_then(|value| value.as_deref())
}

pub(super) fn field<'a>(row: &'a FlatRecord, resolved: &Option<String>) -> Option<&'a str> {
    resolved.as_deref().and_then(|key| raw_value(row, key))
}

/// Normalize a raw deals record set into a typed table plus quality
/// counters. Never fails: every missing or malformed field falls back to a
/// documented default and, where relevant, bumps a counter.
pub fn clean_deals(records: &[RawRecord]) -> (Vec<DealRecord>, DealQualityStats) {
    let mut stats = DealQualityStats { total_records: records.len(), ..Default::default() };
    if records.is_empty() {
        return (Vec::new(), stats);
    }

    let table = flatten_records(records).rename_fields(normalize_field_name);

    let resolve = |canonical: &str| {
        resolve_field(canonical, aliases_for(DEAL_FIELD_ALIASES, canonical), &table.field_order)
    };
    let sector_field = resolve("sector");
    let probability_field = resolve("probability");
    let value_field = resolve("deal_value");
    let actual_close_field = resolve("actual_close_date");
    let tentative_close_field = resolve("tentative_close_date");
    let stage_field = resolve("stage");

    let mut deals = Vec::with_capacity(table.rows.len());
    for row in &table.rows {
        let id = string_cast(raw_value(row, "id"));
        let name = string_cast(raw_value(row, "name"));

        let sector = title_case(string_cast(field(row, &sector_field)).trim());
        let sector = if sector == "Nan" { "Unknown".to_string() } else { sector };

        let probability_score = parse_probability(field(row, &probability_field));

        let raw_deal_value = field(row, &value_field);
        if is_blankish(raw_deal_value) {
            stats.missing_values += 1;
        }
        let deal_value = parse_money(raw_deal_value).unwrap_or(0.0);

        // Prefer the actual close date; fall back to the tentative one only
        // when the actual field is wholly absent.
        let raw_close = field(row, &actual_close_field)
            .or_else(|| field(row, &tentative_close_field));
        if is_blankish(raw_close) {
            stats.missing_close_dates += 1;
        }
        let close_date = raw_close.filter(|raw| !is_blankish(Some(*raw))).and_then(parse_date);

        let stage = string_cast(field(row, &stage_field)).trim().to_string();
        let stage = if stage.is_empty() || stage == "nan" || stage == "None" {
            "Unknown".to_string()
        } else {
            stage
        };

        deals.push(DealRecord {
            id,
            name,
            sector,
            probability_score,
            deal_value,
            close_date,
            stage,
        });
    }

    (deals, stats)
}
