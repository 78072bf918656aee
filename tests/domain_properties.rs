//! Свойства правил предметной области на случайных входных данных.

use chrono::NaiveDateTime;
use proptest::prelude::*;

use event_checkout::error::DomainError;
use event_checkout::models::{Event, Spot, SpotStatus, Ticket, TicketType};

fn event_with_price(price: f64) -> Event {
    Event {
        id: "evt-prop".to_string(),
        name: "Property Show".to_string(),
        location: "Arena".to_string(),
        organization: "Org".to_string(),
        rating: "L".to_string(),
        date: NaiveDateTime::default(),
        image_url: String::new(),
        capacity: 1000,
        price,
        partner_id: 1,
    }
}

proptest! {
    #[test]
    fn letter_digit_names_are_valid(name in "[A-Z][0-9][A-Za-z0-9-]{0,6}") {
        let spot = Spot::new(&event_with_price(10.0), &name);
        prop_assert!(spot.is_ok(), "{:?} rejected: {:?}", name, spot);
    }

    #[test]
    fn names_not_starting_with_uppercase_are_rejected(name in "[a-z0-9#][0-9][A-Z0-9]{0,4}") {
        prop_assert_eq!(
            Spot::new(&event_with_price(10.0), &name).unwrap_err(),
            DomainError::SpotNameMustStartWithLetter
        );
    }

    #[test]
    fn names_without_second_digit_are_rejected(name in "[A-Z][A-Za-z#-][0-9]{0,4}") {
        prop_assert_eq!(
            Spot::new(&event_with_price(10.0), &name).unwrap_err(),
            DomainError::SpotNameMustEndWithDigit
        );
    }

    #[test]
    fn single_character_names_are_too_short(name in "[A-Za-z0-9]") {
        prop_assert_eq!(
            Spot::new(&event_with_price(10.0), &name).unwrap_err(),
            DomainError::SpotNameTooShort
        );
    }

    #[test]
    fn half_is_exactly_half_and_full_is_base(price in 0.0f64..100_000.0) {
        let event = event_with_price(price);
        let spot = Spot::new(&event, "A1").unwrap();

        let half = Ticket::new(&event, &spot, TicketType::Half).unwrap();
        let full = Ticket::new(&event, &spot, TicketType::Full).unwrap();

        prop_assert_eq!(half.price, price / 2.0);
        prop_assert_eq!(full.price, price);
        prop_assert_eq!(half.price * 2.0, full.price);
    }

    #[test]
    fn negative_base_price_never_makes_a_ticket(price in -100_000.0f64..-0.01) {
        let event = event_with_price(price);
        let spot = Spot::new(&event, "A1").unwrap();
        for kind in [TicketType::Half, TicketType::Full] {
            prop_assert_eq!(
                Ticket::new(&event, &spot, kind).unwrap_err(),
                DomainError::NegativeTicketPrice
            );
        }
    }

    #[test]
    fn second_reserve_never_overwrites(first in "[a-f0-9]{8}", second in "[a-f0-9]{8}") {
        let mut spot = Spot::new(&event_with_price(10.0), "A1").unwrap();
        spot.reserve(&first).unwrap();

        prop_assert_eq!(spot.reserve(&second).unwrap_err(), DomainError::SpotAlreadyReserved);
        prop_assert_eq!(spot.status, SpotStatus::Sold);
        prop_assert_eq!(spot.ticket_id.as_deref(), Some(first.as_str()));
    }

    #[test]
    fn only_two_ticket_labels_parse(label in "[a-z]{1,8}") {
        let parsed = label.parse::<TicketType>();
        match label.as_str() {
            "half" => prop_assert_eq!(parsed.unwrap(), TicketType::Half),
            "full" => prop_assert_eq!(parsed.unwrap(), TicketType::Full),
            _ => prop_assert_eq!(parsed.unwrap_err(), DomainError::InvalidTicketType(label.clone())),
        }
    }
}
