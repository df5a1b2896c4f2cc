use std::sync::Arc;

use catalog::{CatalogError, CodeNormalizer, CountryTable};
use scene::{MapContext, SharedSelection};
use tracing::info;

use crate::config::AppConfig;
use crate::pages::{Configurator, Gallery, MainMap};

/// Application assembly: owns the tables and the single shared store, and
/// hands out pages wired to them.
#[derive(Debug, Clone)]
pub struct App {
    normalizer: CodeNormalizer,
    shared: SharedSelection,
}

impl App {
    pub fn new(config: &AppConfig) -> Result<Self, CatalogError> {
        let table = config.load_countries()?;
        let ids = config.load_feature_ids()?;
        let mut shared = SharedSelection::new(Arc::clone(&table));
        shared.set_show_unselected(config.default_show_unselected);

        info!(
            countries = table.len(),
            feature_ids = ids.len(),
            show_unselected = config.default_show_unselected,
            "world map assembled"
        );
        Ok(Self {
            normalizer: CodeNormalizer::new(ids, table),
            shared,
        })
    }

    /// Bundled tables, default settings.
    pub fn builtin() -> Result<Self, CatalogError> {
        Self::new(&AppConfig::default())
    }

    pub fn normalizer(&self) -> &CodeNormalizer {
        &self.normalizer
    }

    pub fn table(&self) -> &Arc<CountryTable> {
        self.normalizer.table()
    }

    /// Handle to the application-wide store.
    pub fn shared(&self) -> &SharedSelection {
        &self.shared
    }

    /// Main map opened with the page's query string, e.g. `?country=JP`.
    pub fn main_map(&self, query: &str) -> MainMap {
        MainMap::open(&self.shared, self.normalizer.clone(), query)
    }

    pub fn configurator(&self) -> Configurator {
        Configurator::new(&self.shared, self.normalizer.clone())
    }

    pub fn gallery(&self) -> Gallery {
        Gallery::new(self.normalizer.clone())
    }
}
