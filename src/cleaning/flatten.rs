use std::collections::HashMap;

use crate::core::RawRecord;

/// Flat field-name -> text mapping for a single raw record. A value of
/// `None` means the source column carried no text at all.
pub type FlatRecord = HashMap<String, Option<String>>;

/// All records of one board flattened together, with the union of field
/// names in first-seen order. The order matters downstream: fuzzy alias
/// matching takes the first plausible field in encountered order.
#[derive(Debug, Clone, Default)]
pub struct FlatTable {
    pub field_order: Vec<String>,
    pub rows: Vec<FlatRecord>,
}

/// Convert one raw item into a flat mapping. Columns with an empty or
/// missing title are dropped; there is no failure mode.
pub fn flatten_record(record: &RawRecord) -> FlatRecord {
    let mut row = FlatRecord::new();
    row.insert("id".to_string(), Some(record.id.clone()));
    row.insert("name".to_string(), Some(record.name.clone()));

    for column in &record.columns {
        if let Some(title) = column.title.as_deref() {
            if !title.is_empty() {
                row.insert(title.to_string(), column.text.clone());
            }
        }
    }

    row
}

/// Flatten a whole record set, tracking the first-seen order of field names.
pub fn flatten_records(records: &[RawRecord]) -> FlatTable {
    let mut table = FlatTable::default();

    for record in records {
        let row = flatten_record(record);
        for key in ["id", "name"] {
            if !table.field_order.iter().any(|f| f == key) {
                table.field_order.push(key.to_string());
            }
        }
        for column in &record.columns {
            if let Some(title) = column.title.as_deref() {
                if !title.is_empty() && !table.field_order.iter().any(|f| f == title) {
                    table.field_order.push(title.to_string());
                }
            }
        }
        table.rows.push(row);
    }

    table
}

impl FlatTable {
    /// Apply a field-name normalization to every key and to the order list.
    /// When two raw titles normalize to the same name, the value of the
    /// later-seen title wins and the earlier position in the order is kept.
    pub fn rename_fields(self, normalize: impl Fn(&str) -> String) -> FlatTable {
        let FlatTable { field_order: raw_order, rows } = self;

        let mut field_order: Vec<String> = Vec::with_capacity(raw_order.len());
        for field in &raw_order {
            let renamed = normalize(field);
            if !field_order.iter().any(|f| *f == renamed) {
                field_order.push(renamed);
            }
        }

        // Walk the order list rather than the map so collisions resolve the
        // same way on every call.
        let rows = rows
            .into_iter()
            .map(|mut row| {
                let mut renamed = FlatRecord::with_capacity(row.len());
                for field in &raw_order {
                    if let Some(value) = row.remove(field) {
                        renamed.insert(normalize(field), value);
                    }
                }
                renamed
            })
            .collect();

        FlatTable { field_order, rows }
    }
}
