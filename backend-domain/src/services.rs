// Pure domain services: no I/O, no clocks
pub mod check_in;
pub mod guest_stats;
pub mod ticket_decoder;

pub use check_in::*;
pub use guest_stats::*;
pub use ticket_decoder::*;
