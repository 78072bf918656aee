use axum::{
    extract::{Path, State},
    http::{header, HeaderName},
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde::Serialize;
use std::future::Future;
use std::sync::Arc;

use crate::cache::{event_key, events_key, spots_key, CacheService};
use crate::error::AppError;
use crate::models::{Event, Spot, SpotStatus};
use crate::repository::EventRepository;
use crate::AppState;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/events", get(list_events))
        .route("/events/{event_id}", get(get_event))
        .route("/events/{event_id}/spots", get(list_spots))
}

#[derive(Debug, Serialize)]
pub struct EventDto {
    pub id: String,
    pub name: String,
    pub location: String,
    pub organization: String,
    pub rating: String,
    pub date: String,
    pub image_url: String,
    pub capacity: i32,
    pub price: f64,
    pub partner_id: i32,
}

impl From<Event> for EventDto {
    fn from(e: Event) -> Self {
        EventDto {
            id: e.id,
            name: e.name,
            location: e.location,
            organization: e.organization,
            rating: e.rating,
            date: e.date.format("%Y-%m-%d %H:%M:%S").to_string(),
            image_url: e.image_url,
            capacity: e.capacity,
            price: e.price,
            partner_id: e.partner_id,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct SpotDto {
    pub id: String,
    pub event_id: String,
    pub name: String,
    pub status: SpotStatus,
    pub ticket_id: Option<String>,
}

impl From<Spot> for SpotDto {
    fn from(s: Spot) -> Self {
        SpotDto {
            id: s.id,
            event_id: s.event_id,
            name: s.name,
            status: s.status,
            ticket_id: s.ticket_id,
        }
    }
}

#[derive(Debug, Serialize)]
struct ListEventsResponse {
    events: Vec<EventDto>,
}

#[derive(Debug, Serialize)]
struct ListSpotsResponse {
    spots: Vec<SpotDto>,
}

// GET /events
async fn list_events(State(state): State<Arc<AppState>>) -> Result<Response, AppError> {
    cached_json(&state.cache, &events_key(), async {
        let events = state.events.list_events().await?;
        Ok(ListEventsResponse {
            events: events.into_iter().map(EventDto::from).collect(),
        })
    })
    .await
}

// GET /events/{event_id}
async fn get_event(
    State(state): State<Arc<AppState>>,
    Path(event_id): Path<String>,
) -> Result<Response, AppError> {
    cached_json(&state.cache, &event_key(&event_id), async {
        let event = state.events.find_event_by_id(&event_id).await?;
        Ok(EventDto::from(event))
    })
    .await
}

// GET /events/{event_id}/spots
async fn list_spots(
    State(state): State<Arc<AppState>>,
    Path(event_id): Path<String>,
) -> Result<Response, AppError> {
    cached_json(&state.cache, &spots_key(&event_id), async {
        // 404 для несуществующего события, а не пустой список
        state.events.find_event_by_id(&event_id).await?;
        let spots = state.events.find_spots_by_event_id(&event_id).await?;
        Ok(ListSpotsResponse {
            spots: spots.into_iter().map(SpotDto::from).collect(),
        })
    })
    .await
}

/// Отдаёт ответ из кеша, а при промахе загружает его и кладёт в кеш.
/// Недоступный Redis только логируется: каталог читается из БД.
async fn cached_json<T, F>(cache: &CacheService, key: &str, load: F) -> Result<Response, AppError>
where
    T: Serialize,
    F: Future<Output = Result<T, AppError>>,
{
    match cache.get_json(key).await {
        Ok(Some(json)) => return Ok(json_response(json, "HIT")),
        Ok(None) => {}
        Err(e) => tracing::warn!("Cache read failed for {}: {}", key, e),
    }

    let payload = load.await?;

    match serde_json::to_string(&payload) {
        Ok(json) => {
            if let Err(e) = cache.put_json(key, &json).await {
                tracing::warn!("Failed to cache {}: {}", key, e);
            }
            Ok(json_response(json, "MISS"))
        }
        // Fallback в случае ошибки сериализации
        Err(_) => Ok(Json(payload).into_response()),
    }
}

fn json_response(json: String, cache_status: &'static str) -> Response {
    (
        [
            (header::CONTENT_TYPE, "application/json"),
            (HeaderName::from_static("x-cache"), cache_status),
        ],
        json,
    )
        .into_response()
}
