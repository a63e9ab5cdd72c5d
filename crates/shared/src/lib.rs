pub mod coerce;
pub mod error;
pub mod protocol;
pub mod status;
