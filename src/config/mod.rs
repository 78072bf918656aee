use anyhow::{anyhow, bail, Context};
use serde::Deserialize;
use std::collections::HashMap;
use std::env;
use std::str::FromStr;

// Главная структура конфигурации - контейнер для всех настроек
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub app: AppConfig,
    pub database: DatabaseConfig,
    pub redis: RedisConfig,
    pub partners: PartnersConfig,
}

// Настройки приложения
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub environment: String,
    pub rust_log: String,
}

// Настройки базы данных
#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    pub url: String,
    pub pool_size: u32,
}

// Настройки Redis (кеш каталога)
#[derive(Debug, Clone, Deserialize)]
pub struct RedisConfig {
    pub url: String,
    pub cache_ttl_seconds: u64,
}

// Партнёры: статическая карта id -> базовый адрес и таймаут вызова
#[derive(Debug, Clone, Deserialize)]
pub struct PartnersConfig {
    pub endpoints: HashMap<i32, String>,
    pub timeout_seconds: u64,
}

const DEFAULT_PARTNER_ENDPOINTS: &str = "1=http://localhost:3333,2=http://localhost:3334";

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        Ok(Config {
            app: AppConfig {
                host: var_or("HOST", "0.0.0.0"),
                port: parse_var_or("PORT", 8080)?,
                environment: var_or("ENVIRONMENT", "development"),
                rust_log: var_or("RUST_LOG", "event_checkout=debug,tower_http=debug"),
            },
            database: DatabaseConfig {
                url: env::var("DATABASE_URL").context("DATABASE_URL must be set")?,
                pool_size: parse_var_or("DB_POOL_SIZE", 20)?,
            },
            redis: RedisConfig {
                url: env::var("REDIS_URL").context("REDIS_URL must be set")?,
                cache_ttl_seconds: parse_var_or("CACHE_TTL_SECONDS", 300)?,
            },
            partners: PartnersConfig {
                endpoints: parse_partner_endpoints(&var_or(
                    "PARTNER_ENDPOINTS",
                    DEFAULT_PARTNER_ENDPOINTS,
                ))
                .context("PARTNER_ENDPOINTS is invalid")?,
                timeout_seconds: parse_var_or("PARTNER_TIMEOUT_SECONDS", 10)?,
            },
        })
    }

    pub fn is_production(&self) -> bool {
        self.app.environment == "production"
    }
}

fn var_or(key: &str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| default.to_string())
}

fn parse_var_or<T>(key: &str, default: T) -> anyhow::Result<T>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match env::var(key) {
        Ok(raw) => raw
            .trim()
            .parse()
            .map_err(|e| anyhow!("{} must be a valid number: {}", key, e)),
        Err(_) => Ok(default),
    }
}

/// Разбирает `"1=http://host:3333,2=http://host:3334"` в карту id -> адрес.
pub fn parse_partner_endpoints(raw: &str) -> anyhow::Result<HashMap<i32, String>> {
    let mut endpoints = HashMap::new();

    for entry in raw.split(',').map(str::trim).filter(|e| !e.is_empty()) {
        let (id, url) = entry
            .split_once('=')
            .ok_or_else(|| anyhow!("entry {:?} must look like <id>=<url>", entry))?;

        let id: i32 = id
            .trim()
            .parse()
            .with_context(|| format!("partner id {:?} is not an integer", id.trim()))?;

        let url = url.trim().trim_end_matches('/');
        if url.is_empty() {
            bail!("partner {} has an empty url", id);
        }

        if endpoints.insert(id, url.to_string()).is_some() {
            bail!("partner {} is configured twice", id);
        }
    }

    Ok(endpoints)
}
