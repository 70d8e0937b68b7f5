use serde::Serialize;
use thiserror::Error;

use crate::domain::TableId;
use crate::engine::{EngineError, ManagerError};

/// Ошибки внешнего API (то, что отдаём клиенту).
///
/// Отказы игровых операций сюда не попадают: они уходят клиенту как
/// `{"result": false}`.
#[derive(Clone, Debug, Error, Serialize, PartialEq, Eq)]
pub enum ApiError {
    /// Битый JSON или не хватает полей.
    #[error("Некорректный запрос: {0}")]
    BadRequest(String),

    /// Неизвестное значение `action`.
    #[error("Invalid action: {0}")]
    InvalidAction(String),

    /// Стол не найден.
    #[error("Стол {0} не найден")]
    TableNotFound(TableId),

    /// Ошибка движка при создании стола.
    #[error("{0}")]
    Engine(String),

    /// Внутренняя ошибка сервера.
    #[error("Внутренняя ошибка: {0}")]
    Internal(String),
}

impl From<EngineError> for ApiError {
    fn from(err: EngineError) -> Self {
        ApiError::Engine(err.to_string())
    }
}

impl From<ManagerError> for ApiError {
    fn from(err: ManagerError) -> Self {
        match err {
            ManagerError::TableNotFound(id) => ApiError::TableNotFound(id),
            ManagerError::Poisoned(_) => ApiError::Internal(err.to_string()),
            ManagerError::Engine(e) => e.into(),
        }
    }
}
