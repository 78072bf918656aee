use serde::{Deserialize, Serialize};

use crate::error::AppError;
use crate::services::reservation::{post_reservation, ReservationRequest, ReservationResponse};

// Формат партнёра 2: португальские поля, POST {base}/eventos/{id}/reservar.
// Статус в ответе приходит под ключом "Estado" с заглавной буквы.
#[derive(Debug, Serialize)]
struct PartnerTwoReservationRequest<'a> {
    lugares: &'a [String],
    tipo_ingresso: &'a str,
    email: &'a str,
}

#[derive(Debug, Deserialize)]
struct PartnerTwoReservation {
    id: String,
    lugar: String,
    tipo_ingresso: String,
    #[serde(rename = "Estado")]
    estado: String,
}

impl From<PartnerTwoReservation> for ReservationResponse {
    fn from(r: PartnerTwoReservation) -> Self {
        ReservationResponse {
            id: r.id,
            spot: r.lugar,
            ticket_type: r.tipo_ingresso,
            status: r.estado,
        }
    }
}

#[derive(Debug, Clone)]
pub struct PartnerTwoAdapter {
    partner_id: i32,
    base_url: String,
    http_client: reqwest::Client,
}

impl PartnerTwoAdapter {
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
        format!("{}/eventos/{}/reservar", self.base_url, event_id)
    }

    pub async fn make_reservation(
        &self,
        request: &ReservationRequest,
    ) -> Result<Vec<ReservationResponse>, AppError> {
        let body = PartnerTwoReservationRequest {
            lugares: &request.spots,
            tipo_ingresso: request.ticket_type.as_str(),
            email: &request.email,
        };

        let reservations: Vec<PartnerTwoReservation> = post_reservation(
            &self.http_client,
            self.partner_id,
            &self.reservation_url(&request.event_id),
            &body,
        )
        .await?;

        Ok(reservations.into_iter().map(ReservationResponse::from).collect())
    }
}
