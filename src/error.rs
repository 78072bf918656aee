//! error.rs
//!
//! Единая модель ошибок сервиса.
//!
//! `DomainError` - нарушения правил предметной области (имя места, тип билета, цена,
//! повторная продажа места). `AppError` - всё, что может прервать покупку или чтение
//! каталога, включая ошибки партнёров и инфраструктуры. `AppError` сам превращается
//! в HTTP-ответ, поэтому контроллеры просто возвращают `Result<_, AppError>`.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

/// Нарушения инвариантов Event/Spot/Ticket.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DomainError {
    #[error("spot name is required")]
    InvalidSpotName,
    #[error("spot name must be at least 2 characters long")]
    SpotNameTooShort,
    #[error("spot name must start with an uppercase letter")]
    SpotNameMustStartWithLetter,
    #[error("spot name must have a digit as second character")]
    SpotNameMustEndWithDigit,
    #[error("spot already reserved")]
    SpotAlreadyReserved,
    #[error("invalid ticket type: {0:?}")]
    InvalidTicketType(String),
    #[error("ticket price cannot be negative")]
    NegativeTicketPrice,
}

/// Класс ошибки: определяет HTTP-статус и уровень логирования.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Validation,
    NotFound,
    Conflict,
    External,
    Configuration,
    Internal,
}

#[derive(Debug, Error)]
pub enum AppError {
    #[error(transparent)]
    Domain(#[from] DomainError),

    #[error("invalid request: {0}")]
    InvalidRequest(#[from] validator::ValidationErrors),

    #[error("event {0} not found")]
    EventNotFound(String),

    #[error("spot {0} not found")]
    SpotNotFound(String),

    #[error("partner {0} has no configured endpoint")]
    UnknownPartner(i32),

    #[error("partner {0} is configured but has no reservation adapter")]
    UnsupportedPartner(i32),

    #[error("partner {partner_id} rejected reservation with status {status}")]
    ExternalReservationFailed { partner_id: i32, status: u16 },

    #[error("partner {partner_id} returned a malformed response: {reason}")]
    ExternalResponseMalformed { partner_id: i32, reason: String },

    #[error("partner {partner_id} is unavailable: {reason}")]
    ExternalUnavailable { partner_id: i32, reason: String },

    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("cache error: {0}")]
    Cache(#[from] redis::RedisError),
}

impl AppError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            AppError::Domain(DomainError::SpotAlreadyReserved) => ErrorKind::Conflict,
            AppError::Domain(_) | AppError::InvalidRequest(_) => ErrorKind::Validation,
            AppError::EventNotFound(_) | AppError::SpotNotFound(_) => ErrorKind::NotFound,
            AppError::UnknownPartner(_) | AppError::UnsupportedPartner(_) => ErrorKind::Configuration,
            AppError::ExternalReservationFailed { .. }
            | AppError::ExternalResponseMalformed { .. }
            | AppError::ExternalUnavailable { .. } => ErrorKind::External,
            AppError::Database(_) | AppError::Cache(_) => ErrorKind::Internal,
        }
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::ExternalUnavailable { .. } => StatusCode::SERVICE_UNAVAILABLE,
            _ => match self.kind() {
                ErrorKind::Validation => StatusCode::BAD_REQUEST,
                ErrorKind::NotFound => StatusCode::NOT_FOUND,
                ErrorKind::Conflict => StatusCode::CONFLICT,
                ErrorKind::External => StatusCode::BAD_GATEWAY,
                ErrorKind::Configuration | ErrorKind::Internal => StatusCode::INTERNAL_SERVER_ERROR,
            },
        }
    }
}

#[derive(Serialize)]
pub struct ApiError {
    success: bool,
    message: String,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            tracing::error!("request failed with {}: {}", status, self);
        } else {
            tracing::warn!("request rejected with {}: {}", status, self);
        }

        // Детали инфраструктурных ошибок наружу не отдаём
        let message = match self.kind() {
            ErrorKind::Internal => "internal server error".to_string(),
            _ => self.to_string(),
        };

        (status, Json(ApiError { success: false, message })).into_response()
    }
}
