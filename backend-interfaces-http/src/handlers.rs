pub mod check_in_handlers;
pub mod guest_handlers;
pub mod ops_handlers;
pub mod scan_session_handlers;

pub use check_in_handlers::*;
pub use guest_handlers::*;
pub use ops_handlers::*;
pub use scan_session_handlers::*;
