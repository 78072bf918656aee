use axum::{extract::State, routing::post, Json, Router};
use std::sync::Arc;
use validator::Validate;

use crate::error::AppError;
use crate::services::{BuyTicketsInput, BuyTicketsOutput};
use crate::AppState;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new().route("/checkout", post(buy_tickets))
}

// POST /checkout
async fn buy_tickets(
    State(state): State<Arc<AppState>>,
    Json(input): Json<BuyTicketsInput>,
) -> Result<Json<BuyTicketsOutput>, AppError> {
    input.validate()?;

    let event_id = input.event_id.clone();
    let result = state.buy_tickets.execute(input).await;

    // Места могли измениться даже при ошибке (без отката), сбрасываем кеш в любом случае
    state.cache.invalidate_spots(&event_id).await;

    result.map(Json)
}
