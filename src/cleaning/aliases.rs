//! Column discovery for messy board schemas. Canonical fields are resolved
//! against an explicit alias table first, then against a normalized-substring
//! fuzzy match, so a board renamed "Masked Deal Value" still feeds the
//! deal_value column.

/// Lower-case, trim, and underscore a raw column title so it can be compared
/// against canonical field names.
pub fn normalize_field_name(name: &str) -> String {
    name.trim().to_lowercase().replace(' ', "_")
}

/// Known alternate titles per canonical deals field, in resolution order.
pub const DEAL_FIELD_ALIASES: &[(&str, &[&str])] = &[
    ("sector", &["sector/service"]),
    ("probability", &["closure_probability"]),
    ("deal_value", &["masked_deal_value"]),
    ("actual_close_date", &["close_date_(a)"]),
    ("tentative_close_date", &[]),
    ("stage", &["deal_stage"]),
];

/// Known alternate titles per canonical work-orders field. Delivery-date
/// aliases are checked in preference order.
pub const WORK_ORDER_FIELD_ALIASES: &[(&str, &[&str])] = &[
    ("execution_status", &[]),
    ("delivery_date", &["data_delivery_date", "probable_end_date"]),
    ("billing_status", &[]),
    ("sector", &[]),
];

/// Resolve a canonical field name against the normalized field names actually
/// present, returning the field to read from or `None` when the canonical
/// column is entirely absent.
///
/// Resolution order: the canonical name itself, then each known alias, then
/// the first field (in encountered order) whose underscore-stripped name
/// contains the underscore-stripped canonical name.
pub fn resolve_field(canonical: &str, aliases: &[&str], fields: &[String]) -> Option<String> {
    if fields.iter().any(|f| f == canonical) {
        return Some(canonical.to_string());
    }

    for alias in aliases {
        if let Some(found) = fields.iter().find(|f| f == alias) {
            return Some(found.clone());
        }
    }

    let needle = canonical.replace('_', "");
    fields.iter().find(|f| f.replace('_', "").contains(&needle)).cloned()
}

/// Look up the alias list for a canonical name within one board's table.
pub fn aliases_for<'a>(table: &[(&'a str, &'a [&'a str])], canonical: &str) -> &'a [&'a str] {
    table
        .iter()
        .find(|(name, _)| *name == canonical)
        .map(|(_, aliases)| *aliases)
        .unwrap_or(&[])
}
