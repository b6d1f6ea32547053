use std::collections::TryReserveError;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("score buffer allocation failed: {0}")]
    OutOfMemory(#[from] TryReserveError),

    #[error("failed to spawn scoring worker: {0}")]
    WorkerSpawn(#[source] std::io::Error),

    #[error("scoring worker panicked")]
    WorkerPanic,

    #[error("configuration error: {0}")]
    Config(String),

    #[error("JSON encoding error: {0}")]
    Json(#[from] serde_json::Error),
}
