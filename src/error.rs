// src/error.rs
use thiserror::Error;

pub type Result<T> = std::result::Result<T, GestureError>;

#[derive(Debug, Error)]
pub enum GestureError {
    #[error("expected {expected} hand landmarks, found {found}")]
    LandmarkCount { expected: usize, found: usize },

    #[error("landmark {index} has a non-finite coordinate")]
    NonFiniteCoordinate { index: usize },

    #[error("invalid classifier config: {0}")]
    InvalidConfig(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Csv(#[from] csv::Error),
}
