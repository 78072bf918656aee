use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use crate::config::PartnersConfig;
use crate::error::AppError;
use crate::services::partner_one::PartnerOneAdapter;
use crate::services::partner_two::PartnerTwoAdapter;
use crate::services::reservation::ReservationAdapter;

/// Реализованные форматы партнёров.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PartnerKind {
    PartnerOne,
    PartnerTwo,
}

impl PartnerKind {
    // Таблица id -> реализация. Адрес берётся из конфигурации отдельно.
    pub fn from_partner_id(partner_id: i32) -> Option<Self> {
        match partner_id {
            1 => Some(PartnerKind::PartnerOne),
            2 => Some(PartnerKind::PartnerTwo),
            _ => None,
        }
    }
}

/// Выбирает адаптер по `partner_id` события.
///
/// Хранит только статическую карту адресов и общий HTTP-клиент, поэтому один
/// экземпляр безопасно делить между всеми параллельными покупками.
#[derive(Debug, Clone)]
pub struct PartnerSelector {
    endpoints: Arc<HashMap<i32, String>>,
    http_client: reqwest::Client,
}

impl PartnerSelector {
    pub fn new(endpoints: HashMap<i32, String>, timeout: Duration) -> Result<Self, reqwest::Error> {
        let http_client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self::with_client(endpoints, http_client))
    }

    pub fn with_client(endpoints: HashMap<i32, String>, http_client: reqwest::Client) -> Self {
        let endpoints = endpoints
            .into_iter()
            .map(|(id, url)| (id, url.trim_end_matches('/').to_string()))
            .collect();

        Self {
            endpoints: Arc::new(endpoints),
            http_client,
        }
    }

    pub fn from_config(config: &PartnersConfig) -> Result<Self, reqwest::Error> {
        Self::new(
            config.endpoints.clone(),
            Duration::from_secs(config.timeout_seconds),
        )
    }

    pub fn create_partner(&self, partner_id: i32) -> Result<ReservationAdapter, AppError> {
        let base_url = self
            .endpoints
            .get(&partner_id)
            .ok_or(AppError::UnknownPartner(partner_id))?
            .clone();

        let client = self.http_client.clone();
        match PartnerKind::from_partner_id(partner_id) {
            Some(PartnerKind::PartnerOne) => Ok(ReservationAdapter::PartnerOne(
                PartnerOneAdapter::new(partner_id, base_url, client),
            )),
            Some(PartnerKind::PartnerTwo) => Ok(ReservationAdapter::PartnerTwo(
                PartnerTwoAdapter::new(partner_id, base_url, client),
            )),
            None => Err(AppError::UnsupportedPartner(partner_id)),
        }
    }
}
