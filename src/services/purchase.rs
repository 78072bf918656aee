//! purchase.rs
//!
//! Сценарий покупки билетов.
//!
//! Шаги, каждый прерывает покупку при первой ошибке:
//! 1. Разбираем запрошенный тип билета (до любых внешних вызовов).
//! 2. Загружаем событие.
//! 3. Выбираем адаптер партнёра по `event.partner_id`.
//! 4. Отправляем резерв партнёру. До этого шага ничего не изменено.
//! 5. Для каждого подтверждённого места, в порядке ответа партнёра: находим место,
//!    создаём билет, помечаем место проданным в памяти, затем одной транзакцией
//!    пишем билет и условно переводим место в `sold`. Проигравший гонку за место
//!    билета не оставляет.
//!
//! Записи уже обработанных мест при ошибке на следующем месте не откатываются,
//! и отменить резерв у партнёра тоже нельзя: такого вызова у партнёров нет.
//! Оба случая логируются с уровнем error, чтобы их можно было разобрать вручную.

use serde::{Deserialize, Serialize};
use tracing::{error, info, warn};
use validator::Validate;

use crate::error::{AppError, DomainError};
use crate::models::{Event, Ticket, TicketType};
use crate::repository::EventRepository;
use crate::services::partner_selector::PartnerSelector;
use crate::services::reservation::{ReservationRequest, ReservationResponse};

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct BuyTicketsInput {
    #[validate(length(min = 1, message = "event_id is required"))]
    pub event_id: String,
    #[serde(alias = "spot")]
    pub spots: Vec<String>,
    pub ticket_type: String,
    #[serde(default)]
    pub card_hash: String,
    #[validate(email(message = "email is invalid"))]
    pub email: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TicketDto {
    pub id: String,
    pub spot_id: String,
    pub ticket_type: TicketType,
    pub price: f64,
}

impl From<&Ticket> for TicketDto {
    fn from(ticket: &Ticket) -> Self {
        TicketDto {
            id: ticket.id.clone(),
            spot_id: ticket.spot.id.clone(),
            ticket_type: ticket.ticket_type,
            price: ticket.price,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BuyTicketsOutput {
    pub tickets: Vec<TicketDto>,
}

#[derive(Clone)]
pub struct BuyTicketsUseCase<R> {
    repo: R,
    partners: PartnerSelector,
}

impl<R: EventRepository> BuyTicketsUseCase<R> {
    pub fn new(repo: R, partners: PartnerSelector) -> Self {
        Self { repo, partners }
    }

    pub async fn execute(&self, input: BuyTicketsInput) -> Result<BuyTicketsOutput, AppError> {
        let ticket_type: TicketType = input.ticket_type.parse()?;

        let event = self.repo.find_event_by_id(&input.event_id).await?;
        let adapter = self.partners.create_partner(event.partner_id)?;

        info!(
            "Purchase started: event={}, partner={}, spots={}",
            event.id,
            adapter.partner_id(),
            input.spots.len()
        );

        let request = ReservationRequest {
            event_id: event.id.clone(),
            spots: input.spots,
            ticket_type,
            email: input.email,
            card_hash: input.card_hash,
        };

        let reservations = adapter.make_reservation(&request).await?;

        let mut tickets = Vec::with_capacity(reservations.len());
        for reservation in &reservations {
            match self.commit_seat(&event, reservation).await {
                Ok(ticket) => {
                    info!(
                        "Spot {} sold: ticket={}, partner_reservation={}",
                        reservation.spot, ticket.id, reservation.id
                    );
                    tickets.push(ticket);
                }
                Err(e) => {
                    if matches!(e, AppError::Domain(DomainError::SpotAlreadyReserved)) {
                        error!(
                            "Partner {} confirmed spot {} (reservation {}) but it is already sold locally",
                            adapter.partner_id(),
                            reservation.spot,
                            reservation.id
                        );
                    }
                    if !tickets.is_empty() {
                        error!(
                            "Purchase for event {} aborted after {} committed seat(s); they are not rolled back",
                            event.id,
                            tickets.len()
                        );
                    }
                    warn!("Purchase aborted on spot {}: {}", reservation.spot, e);
                    return Err(e);
                }
            }
        }

        info!("Purchase completed: event={}, tickets={}", event.id, tickets.len());

        Ok(BuyTicketsOutput {
            tickets: tickets.iter().map(TicketDto::from).collect(),
        })
    }

    async fn commit_seat(
        &self,
        event: &Event,
        reservation: &ReservationResponse,
    ) -> Result<Ticket, AppError> {
        let mut spot = self.repo.find_spot_by_name(&event.id, &reservation.spot).await?;
        let ticket_type: TicketType = reservation.ticket_type.parse()?;

        let mut ticket = Ticket::new(event, &spot, ticket_type)?;
        // Проверка в памяти до записи: уже проданное место не оставит лишний билет
        spot.reserve(&ticket.id)?;

        self.repo.sell_spot(&ticket).await?;

        ticket.spot = spot;
        Ok(ticket)
    }
}
