use redis::AsyncCommands;
use tracing::{debug, warn};

use crate::error::AppError;
use crate::redis_client::RedisClient;

/// Кеш каталога: готовые JSON-ответы по событиям и местам.
///
/// События в рамках сервиса неизменяемы, поэтому живут до истечения TTL.
/// Список мест события сбрасывается после каждой покупки по этому событию.
#[derive(Clone)]
pub struct CacheService {
    redis: RedisClient,
    ttl_seconds: u64,
}

pub fn events_key() -> String {
    "events".to_string()
}

pub fn event_key(event_id: &str) -> String {
    format!("event:{}", event_id)
}

pub fn spots_key(event_id: &str) -> String {
    format!("spots:{}", event_id)
}

impl CacheService {
    pub fn new(redis: RedisClient, ttl_seconds: u64) -> Self {
        Self { redis, ttl_seconds }
    }

    pub async fn get_json(&self, key: &str) -> Result<Option<String>, AppError> {
        let mut conn = self.redis.conn.clone();
        let cached: Option<String> = conn.get(key).await?;
        Ok(cached)
    }

    pub async fn put_json(&self, key: &str, json: &str) -> Result<(), AppError> {
        let mut conn = self.redis.conn.clone();
        let _: () = conn.set_ex(key, json, self.ttl_seconds).await?;
        Ok(())
    }

    // Ошибка инвалидации не должна ломать уже завершённую покупку
    pub async fn invalidate_spots(&self, event_id: &str) {
        let key = spots_key(event_id);
        let mut conn = self.redis.conn.clone();
        let deleted: redis::RedisResult<()> = conn.del(&key).await;
        match deleted {
            Ok(()) => debug!("Invalidated spots cache for event {}", event_id),
            Err(e) => warn!("Failed to invalidate {}: {}", key, e),
        }
    }
}
