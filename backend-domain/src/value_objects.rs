// Domain value objects
pub mod check_in_state;
pub mod rsvp_status;

pub use check_in_state::*;
pub use rsvp_status::*;
