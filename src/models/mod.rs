pub mod event;
pub mod spot;
pub mod ticket;

pub use event::Event;
pub use spot::{Spot, SpotStatus};
pub use ticket::{Ticket, TicketType};
