pub mod code;
pub mod geo;
pub mod zoom;

// Foundation crate: small, well-tested primitives only.
pub use code::*;
pub use geo::*;
pub use zoom::*;
