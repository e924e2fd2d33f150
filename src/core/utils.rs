/// Format a dollar amount with thousands separators and two decimals,
/// e.g. 1234567.5 -> "$1,234,567.50".
pub fn format_currency(value: f64) -> String {
    let negative = value < 0.0;
    let cents = (value.abs() * 100.0).round() as u128;
    let whole = cents / 100;
    let fraction = cents % 100;

    let raw = whole.to_string();
    let mut grouped_reversed = String::with_capacity(raw.len() + (raw.len() / 3));
    for (idx, ch) in raw.chars().rev().enumerate() {
        if idx > 0 && idx % 3 == 0 {
            grouped_reversed.push(',');
        }
        grouped_reversed.push(ch);
    }
    let grouped: String = grouped_reversed.chars().rev().collect();

    let sign = if negative { "-" } else { "" };
    format!("{}${}.{:02}", sign, grouped, fraction)
}

/// Format a ratio as a percentage with one decimal, e.g. 0.417 -> "41.7%".
pub fn format_percent(ratio: f64) -> String {
    format!("{:.1}%", ratio * 100.0)
}
