use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum TrendingError {
    #[error("configuration error: {0}")]
    Configuration(String),
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
    #[error("candidate source error: {0}")]
    Source(String),
}

impl TrendingError {
    pub fn is_client_error(&self) -> bool {
        matches!(self, TrendingError::InvalidArgument(_))
    }
}

pub type Result<T> = std::result::Result<T, TrendingError>;
