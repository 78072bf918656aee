use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use chrono::NaiveDateTime;

/// Событие. В рамках покупки только читается, создаётся хранилищем.
#[derive(Debug, Clone, PartialEq, FromRow, Serialize, Deserialize)]
pub struct Event {
    pub id: String,
    pub name: String,
    pub location: String,
    pub organization: String,
    pub rating: String,
    pub date: NaiveDateTime,
    pub image_url: String,
    pub capacity: i32,
    /// Базовая цена билета, валюта не фиксируется
    pub price: f64,
    /// Какой партнёр владеет рассадкой этого события
    pub partner_id: i32,
}
