use thiserror::Error;

#[derive(Error, Debug, Clone)]
pub enum BoostError {
    #[error("Missing configuration: {0} is not set")]
    ConfigMissing(&'static str),

    #[error("Transport error: {0}")]
    Transport(String),

    #[error("Reblog rejected: HTTP {0}")]
    ReblogRejected(u16),

    #[error("JSON error: {0}")]
    Json(String),
}

pub type Result<T> = std::result::Result<T, BoostError>;

impl From<serde_json::Error> for BoostError {
    fn from(e: serde_json::Error) -> Self {
        BoostError::Json(e.to_string())
    }
}
