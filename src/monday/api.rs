use std::collections::HashMap;

use reqwest::{
    Client,
    StatusCode,
};
use serde::de::DeserializeOwned;
use tokio::time::{
    sleep,
    Duration,
};

use super::types::{
    BoardItemsData,
    BoardsData,
    GraphQlResponse,
};
use crate::core::{
    BoardPulseError,
    RawRecord,
};

const API_URL: &str = "https://api.monday.com/v2";
const API_VERSION: &str = "2023-10";
const ITEM_PAGE_LIMIT: u32 = 500;
const MAX_RETRIES: u32 = 3;
const BACKOFF_FACTOR: f64 = 1.5;

const BOARD_LIST_QUERY: &str = "
query {
    boards (limit: 50) {
        id
        name
    }
}";

const BOARD_ITEMS_QUERY: &str = "
query ($boardId: [ID!], $limit: Int) {
    boards (ids: $boardId) {
        name
        items_page (limit: $limit) {
            items {
                id
                name
                column_values {
                    text
                    column {
                        title
                    }
                }
            }
        }
    }
}";

/// Client for the board-tracking API. Failures after all retries surface as
/// errors the caller downgrades to a no-data condition; they never poison
/// the normalization pipeline.
pub struct MondayClient {
    api_key: String,
    http: Client,
    // Cache of board name -> board id from the last listing call.
    boards: HashMap<String, String>,
}

impl MondayClient {
    pub fn new(api_key: String) -> Self {
        MondayClient { api_key, http: Client::new(), boards: HashMap::new() }
    }

    pub fn from_env() -> Result<Self, BoardPulseError> {
        let api_key =
            std::env::var("MONDAY_API_KEY").map_err(|_| BoardPulseError::MissingApiKey)?;
        Ok(Self::new(api_key))
    }

    async fn execute_query<T: DeserializeOwned>(
        &self,
        query: &str,
        variables: Option<serde_json::Value>,
    ) -> Result<T, BoardPulseError> {
        let mut payload = serde_json::Map::new();
        payload.insert("query".to_string(), serde_json::Value::String(query.to_string()));
        if let Some(variables) = variables {
            payload.insert("variables".to_string(), variables);
        }

        let mut last_error: Option<BoardPulseError> = None;
        for attempt in 0..MAX_RETRIES {
            let response = self
                .http
                .post(API_URL)
                .header("Authorization", self.api_key.as_str())
                .header("API-Version", API_VERSION)
                .timeout(Duration::from_secs(15))
                .json(&payload)
                .send()
                .await;

            match response {
                Ok(response) if response.status() == StatusCode::TOO_MANY_REQUESTS => {
                    eprintln!("Board API rate limit hit. Retrying...");
                    sleep(Duration::from_secs_f64(BACKOFF_FACTOR.powi(attempt as i32))).await;
                    continue;
                }
                Ok(response) => {
                    let body: GraphQlResponse<T> =
                        response.error_for_status()?.json().await?;
                    if let Some(errors) = body.errors {
                        return Err(BoardPulseError::GraphQl(
                            serde_json::to_string(&errors).unwrap_or_default(),
                        ));
                    }
                    return body.data.ok_or_else(|| {
                        BoardPulseError::Custom("GraphQL response carried no data".to_string())
                    });
                }
                Err(error) => {
                    eprintln!("Board API request failed: {}", error);
                    last_error = Some(error.into());
                    if attempt + 1 < MAX_RETRIES {
                        let wait = BACKOFF_FACTOR.powi(attempt as i32);
                        eprintln!("Retrying in {:.1} seconds...", wait);
                        sleep(Duration::from_secs_f64(wait)).await;
                    }
                }
            }
        }

        Err(last_error.unwrap_or_else(|| {
            BoardPulseError::Custom("Max retries reached. Board API call failed.".to_string())
        }))
    }

    /// List boards and refresh the name -> id cache.
    pub async fn get_boards(&mut self) -> Result<&HashMap<String, String>, BoardPulseError> {
        let data: BoardsData = self.execute_query(BOARD_LIST_QUERY, None).await?;
        self.boards = data.boards.into_iter().map(|board| (board.name, board.id)).collect();
        Ok(&self.boards)
    }

    fn resolve_board_id(&self, board_name: &str) -> Option<String> {
        // Case-insensitive search: exact lowered name, de-pluralized name,
        // then first word. "Deals" still finds a board called "Deal Flow".
        let lowered = board_name.to_lowercase();
        let search_terms = [
            lowered.clone(),
            lowered.trim_end_matches('s').to_string(),
            lowered.split_whitespace().next().unwrap_or(&lowered).to_string(),
        ];

        self.boards
            .iter()
            .find(|(name, _)| {
                let name = name.to_lowercase();
                search_terms.iter().any(|term| name.contains(term))
            })
            .map(|(_, id)| id.clone())
    }

    /// Fetch all items of one board as raw records.
    pub async fn fetch_board_records(
        &mut self,
        board_name: &str,
    ) -> Result<Vec<RawRecord>, BoardPulseError> {
        if self.boards.is_empty() {
            self.get_boards().await?;
        }

        let board_id = self
            .resolve_board_id(board_name)
            .ok_or_else(|| BoardPulseError::BoardNotFound(board_name.to_string()))?;

        let variables = serde_json::json!({ "boardId": board_id, "limit": ITEM_PAGE_LIMIT });
        let data: BoardItemsData =
            self.execute_query(BOARD_ITEMS_QUERY, Some(variables)).await?;

        Ok(data
            .boards
            .into_iter()
            .next()
            .map(|board| board.items_page.items.into_iter().map(RawRecord::from).collect())
            .unwrap_or_default())
    }

    /// Check the API is reachable with the configured key.
    pub async fn validate_connection(&mut self) -> Result<(), BoardPulseError> {
        self.get_boards().await.map(|_| ())
    }
}
