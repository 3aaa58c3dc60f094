// Repository Port Traits (Interfaces)
// Define what the domain needs from the hosted datastore

pub mod repositories;

pub use repositories::*;
