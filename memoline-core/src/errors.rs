use thiserror::Error;

#[derive(Debug, Error)]
pub enum CoreError {
    #[error("invalid rating ordinal: {0}")]
    InvalidRating(u8),
    #[error("invalid card state ordinal: {0}")]
    InvalidState(u8),
    #[error("invalid parameters: {0}")]
    InvalidParameters(&'static str),
    #[error("config error: {0}")]
    Config(#[from] serde_json::Error),
}
