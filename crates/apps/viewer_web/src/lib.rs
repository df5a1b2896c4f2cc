//! Application assembly and pages of the world map country selector.
//!
//! [`App`] owns the tables and the single shared selection store; the pages
//! are plain state objects a browser host drives through the wasm bindings.

pub mod app;
pub mod config;
pub mod pages;
pub mod query;
pub mod session;
pub mod snippet;

#[cfg(target_arch = "wasm32")]
mod bindings;

pub use app::App;
pub use config::AppConfig;
pub use snippet::WidgetSnippet;
