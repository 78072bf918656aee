use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

use crate::error::DomainError;
use crate::models::{Event, Spot};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TicketType {
    Half,
    Full,
}

impl TicketType {
    pub fn as_str(&self) -> &'static str {
        match self {
            TicketType::Half => "half",
            TicketType::Full => "full",
        }
    }
}

impl fmt::Display for TicketType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TicketType {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "half" => Ok(TicketType::Half),
            "full" => Ok(TicketType::Full),
            other => Err(DomainError::InvalidTicketType(other.to_string())),
        }
    }
}

/// Билет создаётся один раз на каждое подтверждённое партнёром место.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ticket {
    pub id: String,
    pub event_id: String,
    pub spot: Spot,
    pub ticket_type: TicketType,
    pub price: f64,
}

impl Ticket {
    pub fn new(event: &Event, spot: &Spot, ticket_type: TicketType) -> Result<Self, DomainError> {
        let ticket = Ticket {
            id: Uuid::new_v4().to_string(),
            event_id: event.id.clone(),
            spot: spot.clone(),
            ticket_type,
            price: Self::calculate_price(event.price, ticket_type),
        };
        ticket.validate()?;
        Ok(ticket)
    }

    pub fn calculate_price(base_price: f64, ticket_type: TicketType) -> f64 {
        match ticket_type {
            TicketType::Half => base_price / 2.0,
            TicketType::Full => base_price,
        }
    }

    pub fn validate(&self) -> Result<(), DomainError> {
        if self.price.is_nan() || self.price < 0.0 {
            return Err(DomainError::NegativeTicketPrice);
        }
        Ok(())
    }
}
