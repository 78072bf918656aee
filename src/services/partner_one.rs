use serde::{Deserialize, Serialize};

use crate::error::AppError;
use crate::services::reservation::{post_reservation, ReservationRequest, ReservationResponse};

// Формат партнёра 1: английские поля, POST {base}/events/{id}/reserve
#[derive(Debug, Serialize)]
struct PartnerOneReservationRequest<'a> {
    spots: &'a [String],
    ticket_kind: &'a str,
    email: &'a str,
}

#[derive(Debug, Deserialize)]
struct PartnerOneReservation {
    id: String,
    spot: String,
    ticket_kind: String,
    status: String,
}

impl From<PartnerOneReservation> for ReservationResponse {
    fn from(r: PartnerOneReservation) -> Self {
        ReservationResponse {
            id: r.id,
            spot: r.spot,
            ticket_type: r.ticket_kind,
            status: r.status,
        }
    }
}

#[derive(Debug, Clone)]
pub struct PartnerOneAdapter {
    partner_id: i32,
    base_url: String,
    http_client: reqwest::Client,
}

impl PartnerOneAdapter {
    pub fn new(partner_id: i32, base_url: impl Into<String>, http_client: reqwest::Client) -> Self {
        Self {
            partner_id,
            base_url: base_url.into(),
            http_client,
        }
    }

    pub fn partner_id(&self) -> i32 {
        self.partner_id
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn reservation_url(&self, event_id: &str) -> String {
        format!("{}/events/{}/reserve", self.base_url, event_id)
    }

    pub async fn make_reservation(
        &self,
        request: &ReservationRequest,
    ) -> Result<Vec<ReservationResponse>, AppError> {
        let body = PartnerOneReservationRequest {
            spots: &request.spots,
            ticket_kind: request.ticket_type.as_str(),
            email: &request.email,
        };

        let reservations: Vec<PartnerOneReservation> = post_reservation(
            &self.http_client,
            self.partner_id,
            &self.reservation_url(&request.event_id),
            &body,
        )
        .await?;

        Ok(reservations.into_iter().map(ReservationResponse::from).collect())
    }
}
