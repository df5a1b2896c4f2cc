pub mod context;
pub mod navigation;
pub mod selection;
pub mod visibility;

pub use context::*;
pub use selection::*;
