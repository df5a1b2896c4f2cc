use std::path::PathBuf;
use std::sync::Arc;

use catalog::{CatalogError, CountryTable, FeatureIdMap, builtin_countries, builtin_feature_ids};
use serde::Deserialize;
use tracing::info;

/// Where the application gets its tables and how the shared map starts out.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Country table JSON; the bundled table when unset.
    pub countries_path: Option<PathBuf>,
    /// Feature id mapping JSON; the bundled mapping when unset.
    pub feature_ids_path: Option<PathBuf>,
    /// Initial `show_unselected` of the shared store.
    pub default_show_unselected: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            countries_path: None,
            feature_ids_path: None,
            default_show_unselected: true,
        }
    }
}

impl AppConfig {
    pub fn load_countries(&self) -> Result<Arc<CountryTable>, CatalogError> {
        match &self.countries_path {
            Some(path) => {
                let table = CountryTable::from_path(path)?;
                info!(path = %path.display(), countries = table.len(), "loaded country table");
                Ok(Arc::new(table))
            }
            None => builtin_countries(),
        }
    }

    pub fn load_feature_ids(&self) -> Result<Arc<FeatureIdMap>, CatalogError> {
        match &self.feature_ids_path {
            Some(path) => {
                let ids = FeatureIdMap::from_path(path)?;
                info!(path = %path.display(), ids = ids.len(), "loaded feature id mapping");
                Ok(Arc::new(ids))
            }
            None => builtin_feature_ids(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::AppConfig;
    use catalog::CatalogError;
    use std::path::PathBuf;

    #[test]
    fn defaults_use_bundled_tables() {
        let config = AppConfig::default();
        assert!(config.default_show_unselected);
        assert!(config.load_countries().unwrap().len() > 50);
        assert!(config.load_feature_ids().unwrap().len() > 200);
    }

    #[test]
    fn partial_json_keeps_defaults() {
        let config: AppConfig =
            serde_json::from_str(r#"{ "default_show_unselected": false }"#).unwrap();
        assert_eq!(config.countries_path, None);
        assert!(!config.default_show_unselected);
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let config = AppConfig {
            countries_path: Some(PathBuf::from("/nonexistent/countries.json")),
            ..AppConfig::default()
        };
        assert!(matches!(
            config.load_countries(),
            Err(CatalogError::Io { .. })
        ));
    }
}
