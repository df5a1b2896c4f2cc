pub mod event_bus;
pub mod revision;

pub use event_bus::*;
pub use revision::*;
