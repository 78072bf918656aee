pub mod partner_one;
pub mod partner_selector;
pub mod partner_two;
pub mod purchase;
pub mod reservation;

pub use partner_selector::PartnerSelector;
pub use purchase::{BuyTicketsInput, BuyTicketsOutput, BuyTicketsUseCase, TicketDto};
pub use reservation::{ReservationAdapter, ReservationRequest, ReservationResponse};
