//! Порт хранилища событий, мест и билетов.
//!
//! Сценарий покупки зависит только от этого трейта, поэтому в тестах вместо
//! Postgres подставляется хранилище в памяти.

pub mod postgres;

use std::future::Future;

use crate::error::AppError;
use crate::models::{Event, Spot, Ticket};

pub use postgres::PgEventRepository;

pub trait EventRepository: Clone + Send + Sync + 'static {
    fn list_events(&self) -> impl Future<Output = Result<Vec<Event>, AppError>> + Send;

    /// `AppError::EventNotFound`, если события нет.
    fn find_event_by_id(&self, event_id: &str) -> impl Future<Output = Result<Event, AppError>> + Send;

    fn find_spots_by_event_id(&self, event_id: &str) -> impl Future<Output = Result<Vec<Spot>, AppError>> + Send;

    /// `AppError::SpotNotFound`, если у события нет места с таким именем.
    fn find_spot_by_name(
        &self,
        event_id: &str,
        name: &str,
    ) -> impl Future<Output = Result<Spot, AppError>> + Send;

    fn create_ticket(&self, ticket: &Ticket) -> impl Future<Output = Result<(), AppError>> + Send;

    /// Условная запись: проходит только для места в статусе `available`.
    /// Проданное место даёт `DomainError::SpotAlreadyReserved`, неизвестное - `SpotNotFound`.
    fn reserve_spot(&self, spot_id: &str, ticket_id: &str) -> impl Future<Output = Result<(), AppError>> + Send;

    /// `create_ticket` и `reserve_spot` для `ticket.spot` как одна запись: если место
    /// уже продано или не найдено, билет не остаётся в хранилище.
    fn sell_spot(&self, ticket: &Ticket) -> impl Future<Output = Result<(), AppError>> + Send;
}
