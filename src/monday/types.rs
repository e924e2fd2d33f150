use serde::Deserialize;

use crate::core::{
    RawColumn,
    RawRecord,
};

/// GraphQL response envelope: data plus an optional error list.
#[derive(Debug, Deserialize)]
pub struct GraphQlResponse<T> {
    pub data: Option<T>,
    pub errors: Option<Vec<serde_json::Value>>,
}

#[derive(Debug, Deserialize)]
pub struct BoardsData {
    pub boards: Vec<BoardSummary>,
}

#[derive(Debug, Deserialize)]
pub struct BoardSummary {
    pub id: String,
    pub name: String,
}

#[derive(Debug, Deserialize)]
pub struct BoardItemsData {
    pub boards: Vec<BoardItems>,
}

#[derive(Debug, Deserialize)]
pub struct BoardItems {
    pub name: String,
    pub items_page: ItemsPage,
}

#[derive(Debug, Deserialize)]
pub struct ItemsPage {
    pub items: Vec<BoardItem>,
}

#[derive(Debug, Deserialize)]
pub struct BoardItem {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub column_values: Vec<ColumnValue>,
}

#[derive(Debug, Deserialize)]
pub struct ColumnValue {
    pub text: Option<String>,
    pub column: Option<ColumnMeta>,
}

#[derive(Debug, Deserialize)]
pub struct ColumnMeta {
    pub title: Option<String>,
}

impl From<BoardItem> for RawRecord {
    fn from(item: BoardItem) -> Self {
        let columns = item
            .column_values
            .into_iter()
            .map(|value| RawColumn {
                title: value.column.and_then(|meta| meta.title),
                text: value.text,
            })
            .collect();

        RawRecord { id: item.id, name: item.name, columns }
    }
}
