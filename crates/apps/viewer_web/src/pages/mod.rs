pub mod configurator;
pub mod gallery;
pub mod main_map;

pub use configurator::{Configurator, ConfiguratorConfig};
pub use gallery::{Gallery, GalleryCard, GalleryExample};
pub use main_map::MainMap;
