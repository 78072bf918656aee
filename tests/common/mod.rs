#![allow(dead_code)]

use chrono::NaiveDate;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::sync::Barrier;

use event_checkout::error::{AppError, DomainError};
use event_checkout::models::{Event, Spot, SpotStatus, Ticket};
use event_checkout::repository::EventRepository;
use event_checkout::services::PartnerSelector;

#[derive(Default)]
struct Store {
    events: HashMap<String, Event>,
    spots: HashMap<String, Spot>,
    tickets: Vec<Ticket>,
}

/// Хранилище в памяти с той же условной записью `reserve_spot` и атомарной
/// `sell_spot`, что и в Postgres.
#[derive(Clone, Default)]
pub struct InMemoryEventRepository {
    store: Arc<Mutex<Store>>,
    // Заставляет параллельные покупки встретиться после чтения места
    lookup_barrier: Option<Arc<Barrier>>,
}

impl InMemoryEventRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_lookup_barrier(mut self, parties: usize) -> Self {
        self.lookup_barrier = Some(Arc::new(Barrier::new(parties)));
        self
    }

    pub fn add_event(&self, event: Event) {
        self.store.lock().unwrap().events.insert(event.id.clone(), event);
    }

    pub fn add_spots(&self, event: &Event, names: &[&str]) {
        let mut store = self.store.lock().unwrap();
        for name in names {
            let spot = Spot::new(event, name).unwrap();
            store.spots.insert(spot.id.clone(), spot);
        }
    }

    pub fn spot(&self, event_id: &str, name: &str) -> Spot {
        self.store
            .lock()
            .unwrap()
            .spots
            .values()
            .find(|s| s.event_id == event_id && s.name == name)
            .cloned()
            .expect("spot seeded")
    }

    pub fn tickets(&self) -> Vec<Ticket> {
        self.store.lock().unwrap().tickets.clone()
    }

    pub fn sold_spots(&self) -> usize {
        self.store
            .lock()
            .unwrap()
            .spots
            .values()
            .filter(|s| s.status == SpotStatus::Sold)
            .count()
    }
}

impl EventRepository for InMemoryEventRepository {
    async fn list_events(&self) -> Result<Vec<Event>, AppError> {
        Ok(self.store.lock().unwrap().events.values().cloned().collect())
    }

    async fn find_event_by_id(&self, event_id: &str) -> Result<Event, AppError> {
        self.store
            .lock()
            .unwrap()
            .events
            .get(event_id)
            .cloned()
            .ok_or_else(|| AppError::EventNotFound(event_id.to_string()))
    }

    async fn find_spots_by_event_id(&self, event_id: &str) -> Result<Vec<Spot>, AppError> {
        let store = self.store.lock().unwrap();
        Ok(store
            .spots
            .values()
            .filter(|s| s.event_id == event_id)
            .cloned()
            .collect())
    }

    async fn find_spot_by_name(&self, event_id: &str, name: &str) -> Result<Spot, AppError> {
        let spot = {
            let store = self.store.lock().unwrap();
            store
                .spots
                .values()
                .find(|s| s.event_id == event_id && s.name == name)
                .cloned()
                .ok_or_else(|| AppError::SpotNotFound(name.to_string()))?
        };

        if let Some(barrier) = &self.lookup_barrier {
            barrier.wait().await;
        }
        Ok(spot)
    }

    async fn create_ticket(&self, ticket: &Ticket) -> Result<(), AppError> {
        self.store.lock().unwrap().tickets.push(ticket.clone());
        Ok(())
    }

    async fn reserve_spot(&self, spot_id: &str, ticket_id: &str) -> Result<(), AppError> {
        mark_spot_sold(&mut self.store.lock().unwrap(), spot_id, ticket_id)
    }

    async fn sell_spot(&self, ticket: &Ticket) -> Result<(), AppError> {
        // Одна блокировка на обе записи, как одна транзакция в Postgres
        let mut store = self.store.lock().unwrap();
        mark_spot_sold(&mut store, &ticket.spot.id, &ticket.id)?;
        store.tickets.push(ticket.clone());
        Ok(())
    }
}

fn mark_spot_sold(store: &mut Store, spot_id: &str, ticket_id: &str) -> Result<(), AppError> {
    let spot = store
        .spots
        .get_mut(spot_id)
        .ok_or_else(|| AppError::SpotNotFound(spot_id.to_string()))?;

    if !spot.is_available() {
        return Err(DomainError::SpotAlreadyReserved.into());
    }
    spot.status = SpotStatus::Sold;
    spot.ticket_id = Some(ticket_id.to_string());
    Ok(())
}

pub fn event(id: &str, partner_id: i32, price: f64) -> Event {
    Event {
        id: id.to_string(),
        name: "Summer Festival".to_string(),
        location: "Central Park".to_string(),
        organization: "Festival Org".to_string(),
        rating: "L".to_string(),
        date: NaiveDate::from_ymd_opt(2026, 12, 20)
            .and_then(|d| d.and_hms_opt(19, 30, 0))
            .unwrap(),
        image_url: "https://example.com/festival.png".to_string(),
        capacity: 500,
        price,
        partner_id,
    }
}

pub fn selector(endpoints: &[(i32, String)]) -> PartnerSelector {
    selector_with_timeout(endpoints, Duration::from_secs(5))
}

pub fn selector_with_timeout(endpoints: &[(i32, String)], timeout: Duration) -> PartnerSelector {
    PartnerSelector::new(endpoints.iter().cloned().collect(), timeout).unwrap()
}
