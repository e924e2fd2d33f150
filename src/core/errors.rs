use thiserror::Error;

#[derive(Error, Debug)]
pub enum BoardPulseError {
    #[error("I/O error: {0}")]
    Io(Box<std::io::Error>),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Reqwest error: {0}")]
    Reqwest(Box<reqwest::Error>),

    #[error("MONDAY_API_KEY environment variable not set")]
    MissingApiKey,

    #[error("Board '{0}' not found")]
    BoardNotFound(String),

    #[error("GraphQL errors: {0}")]
    GraphQl(String),

    #[error("BoardPulseError: {0}")]
    Custom(String),
}

impl From<std::io::Error> for BoardPulseError {
    fn from(error: std::io::Error) -> Self {
        BoardPulseError::Io(Box::new(error))
    }
}

impl From<reqwest::Error> for BoardPulseError {
    fn from(error: reqwest::Error) -> Self {
        BoardPulseError::Reqwest(Box::new(error))
    }
}
