//! reservation.rs
//!
//! Единый контракт резервирования мест у партнёров.
//!
//! Каждый партнёр говорит на своём языке: свои имена полей, свой регистр ключей и свой
//! путь под базовым адресом. Адаптер переводит `ReservationRequest` в формат партнёра,
//! отправляет его и переводит ответ обратно в список `ReservationResponse`, по одному
//! элементу на место. Бизнес-проверок адаптер не делает и запросы не повторяет.
//!
//! Политика ошибок одинакова для всех партнёров:
//! - статус ответа, отличный от 200 -> `ExternalReservationFailed`;
//! - тело, которое не разбирается в ожидаемую схему -> `ExternalResponseMalformed`;
//! - сетевые ошибки и таймаут клиента -> `ExternalUnavailable`.

use reqwest::StatusCode;
use serde::{de::DeserializeOwned, Serialize};
use std::fmt;
use tracing::{debug, warn};

use crate::error::AppError;
use crate::models::TicketType;
use crate::services::partner_one::PartnerOneAdapter;
use crate::services::partner_two::PartnerTwoAdapter;

/// Запрос на резервирование, не зависящий от партнёра.
#[derive(Clone)]
pub struct ReservationRequest {
    pub event_id: String,
    pub spots: Vec<String>,
    pub ticket_type: TicketType,
    pub email: String,
    /// Платёжный токен передаётся как есть и никогда не проверяется
    pub card_hash: String,
}

impl fmt::Debug for ReservationRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ReservationRequest")
            .field("event_id", &self.event_id)
            .field("spots", &self.spots)
            .field("ticket_type", &self.ticket_type)
            .field("email", &self.email)
            .field("card_hash", &"<redacted>")
            .finish()
    }
}

/// Итог по одному месту в словаре сервиса.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReservationResponse {
    /// Идентификатор резерва, выданный партнёром
    pub id: String,
    pub spot: String,
    /// Тип билета в том виде, в каком его вернул партнёр
    pub ticket_type: String,
    pub status: String,
}

/// Адаптер конкретного партнёра. Новый партнёр = новый вариант + строка в `PartnerSelector`.
#[derive(Debug, Clone)]
pub enum ReservationAdapter {
    PartnerOne(PartnerOneAdapter),
    PartnerTwo(PartnerTwoAdapter),
}

impl ReservationAdapter {
    pub fn partner_id(&self) -> i32 {
        match self {
            ReservationAdapter::PartnerOne(adapter) => adapter.partner_id(),
            ReservationAdapter::PartnerTwo(adapter) => adapter.partner_id(),
        }
    }

    pub fn base_url(&self) -> &str {
        match self {
            ReservationAdapter::PartnerOne(adapter) => adapter.base_url(),
            ReservationAdapter::PartnerTwo(adapter) => adapter.base_url(),
        }
    }

    pub async fn make_reservation(
        &self,
        request: &ReservationRequest,
    ) -> Result<Vec<ReservationResponse>, AppError> {
        match self {
            ReservationAdapter::PartnerOne(adapter) => adapter.make_reservation(request).await,
            ReservationAdapter::PartnerTwo(adapter) => adapter.make_reservation(request).await,
        }
    }
}

/// Общий HTTP-обмен: POST JSON, ждём ровно 200 и массив записей партнёра.
pub(crate) async fn post_reservation<B, R>(
    http_client: &reqwest::Client,
    partner_id: i32,
    url: &str,
    body: &B,
) -> Result<Vec<R>, AppError>
where
    B: Serialize + ?Sized,
    R: DeserializeOwned,
{
    debug!("POST {} (partner {})", url, partner_id);

    let response = http_client
        .post(url)
        .json(body)
        .send()
        .await
        .map_err(|e| unavailable(partner_id, e))?;

    let status = response.status();
    if status != StatusCode::OK {
        warn!("partner {} answered {} for {}", partner_id, status, url);
        return Err(AppError::ExternalReservationFailed {
            partner_id,
            status: status.as_u16(),
        });
    }

    let bytes = response.bytes().await.map_err(|e| unavailable(partner_id, e))?;

    serde_json::from_slice::<Vec<R>>(&bytes).map_err(|e| {
        warn!("partner {} sent an unreadable reservation body: {}", partner_id, e);
        AppError::ExternalResponseMalformed {
            partner_id,
            reason: e.to_string(),
        }
    })
}

fn unavailable(partner_id: i32, e: reqwest::Error) -> AppError {
    let reason = if e.is_timeout() {
        "request timed out".to_string()
    } else {
        e.to_string()
    };
    warn!("partner {} unreachable: {}", partner_id, reason);
    AppError::ExternalUnavailable { partner_id, reason }
}
