use serde::{Deserialize, Serialize};

use crate::engine::{DraftError, NavigationError};
use crate::infra::StorageError;

/// Ошибки внешнего API (то, что отдаём слою представления).
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub enum ApiError {
    /// Команда не может быть выполнена в текущем состоянии сессии.
    InvalidCommand(String),

    /// Ошибка движка драфта (переходы, пики, реплей).
    Engine(String),

    /// Ошибка навигации по истории.
    Navigation(String),

    /// Ошибка хранилища или битая запись.
    Storage(String),
}

impl From<DraftError> for ApiError {
    fn from(err: DraftError) -> Self {
        ApiError::Engine(err.to_string())
    }
}

impl From<NavigationError> for ApiError {
    fn from(err: NavigationError) -> Self {
        ApiError::Navigation(err.to_string())
    }
}

impl From<StorageError> for ApiError {
    fn from(err: StorageError) -> Self {
        ApiError::Storage(err.to_string())
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ApiError::InvalidCommand(msg) => write!(f, "invalid command: {msg}"),
            ApiError::Engine(msg) => write!(f, "engine: {msg}"),
            ApiError::Navigation(msg) => write!(f, "navigation: {msg}"),
            ApiError::Storage(msg) => write!(f, "storage: {msg}"),
        }
    }
}

impl std::error::Error for ApiError {}
