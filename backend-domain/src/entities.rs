// Domain entities
pub mod config;
pub mod event;
pub mod outcome;
pub mod rsvp;
pub mod ticket;

pub use config::*;
pub use event::*;
pub use outcome::*;
pub use rsvp::*;
pub use ticket::*;
