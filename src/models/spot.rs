use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

use crate::error::DomainError;
use crate::models::Event;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SpotStatus {
    Available,
    Sold,
}

impl SpotStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            SpotStatus::Available => "available",
            SpotStatus::Sold => "sold",
        }
    }
}

impl fmt::Display for SpotStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SpotStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "available" => Ok(SpotStatus::Available),
            "sold" => Ok(SpotStatus::Sold),
            other => Err(format!("unknown spot status {:?}", other)),
        }
    }
}

/// Место на событии. Переходит Available -> Sold ровно один раз.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Spot {
    pub id: String,
    pub event_id: String,
    pub name: String,
    pub status: SpotStatus,
    pub ticket_id: Option<String>,
}

impl Spot {
    pub fn new(event: &Event, name: &str) -> Result<Self, DomainError> {
        let spot = Spot {
            id: Uuid::new_v4().to_string(),
            event_id: event.id.clone(),
            name: name.to_string(),
            status: SpotStatus::Available,
            ticket_id: None,
        };
        spot.validate()?;
        Ok(spot)
    }

    // Соглашение об именах: заглавная буква + цифра, дальше что угодно ("A1", "B12")
    pub fn validate(&self) -> Result<(), DomainError> {
        let mut chars = self.name.chars();
        let (first, second) = match (chars.next(), chars.next()) {
            (None, _) => return Err(DomainError::InvalidSpotName),
            (Some(_), None) => return Err(DomainError::SpotNameTooShort),
            (Some(first), Some(second)) => (first, second),
        };

        if !first.is_ascii_uppercase() {
            return Err(DomainError::SpotNameMustStartWithLetter);
        }
        if !second.is_ascii_digit() {
            return Err(DomainError::SpotNameMustEndWithDigit);
        }
        Ok(())
    }

    /// Меняет состояние только в памяти; запись в хранилище делает вызывающий.
    pub fn reserve(&mut self, ticket_id: &str) -> Result<(), DomainError> {
        if self.status == SpotStatus::Sold {
            return Err(DomainError::SpotAlreadyReserved);
        }
        self.status = SpotStatus::Sold;
        self.ticket_id = Some(ticket_id.to_string());
        Ok(())
    }

    pub fn is_available(&self) -> bool {
        self.status == SpotStatus::Available
    }
}
