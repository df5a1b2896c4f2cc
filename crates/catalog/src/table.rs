use std::collections::HashMap;
use std::path::Path;

use foundation::{CountryCode, LonLat, zoom_in_range};
use serde::{Deserialize, Serialize};

use crate::error::CatalogError;

/// One selectable country and its camera preset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Country {
    pub code: CountryCode,
    pub label: String,
    /// Camera center used when the country is selected.
    pub coordinates: LonLat,
    /// Preset zoom used when the country is selected.
    pub zoom: f64,
}

impl Country {
    pub fn new(code: CountryCode, label: impl Into<String>, coordinates: LonLat, zoom: f64) -> Self {
        Self {
            code,
            label: label.into(),
            coordinates,
            zoom,
        }
    }
}

/// Ordered, immutable country table with O(1) lookup by code.
///
/// Ordering contract:
/// - `iter` and `at` follow the source order; navigation depends on it.
#[derive(Debug, Clone, PartialEq)]
pub struct CountryTable {
    countries: Vec<Country>,
    index: HashMap<CountryCode, usize>,
}

impl CountryTable {
    /// Builds a table, validating every entry.
    pub fn new(countries: Vec<Country>) -> Result<Self, CatalogError> {
        if countries.is_empty() {
            return Err(CatalogError::EmptyTable);
        }

        let mut index = HashMap::with_capacity(countries.len());
        for (i, country) in countries.iter().enumerate() {
            validate(country)?;
            if index.insert(country.code, i).is_some() {
                return Err(CatalogError::DuplicateCode(country.code));
            }
        }

        Ok(Self { countries, index })
    }

    pub fn from_json_str(json: &str) -> Result<Self, CatalogError> {
        let countries: Vec<Country> = serde_json::from_str(json)?;
        Self::new(countries)
    }

    pub fn from_path(path: &Path) -> Result<Self, CatalogError> {
        let raw = std::fs::read_to_string(path).map_err(|source| CatalogError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&raw)
    }

    pub fn get(&self, code: &CountryCode) -> Option<&Country> {
        self.index.get(code).map(|&i| &self.countries[i])
    }

    pub fn contains(&self, code: &CountryCode) -> bool {
        self.index.contains_key(code)
    }

    pub fn index_of(&self, code: &CountryCode) -> Option<usize> {
        self.index.get(code).copied()
    }

    pub fn at(&self, index: usize) -> Option<&Country> {
        self.countries.get(index)
    }

    pub fn len(&self) -> usize {
        self.countries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.countries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Country> + '_ {
        self.countries.iter()
    }

    pub fn label(&self, code: &CountryCode) -> Option<&str> {
        self.get(code).map(|c| c.label.as_str())
    }
}

fn validate(country: &Country) -> Result<(), CatalogError> {
    if country.label.trim().is_empty() {
        return Err(CatalogError::EmptyLabel(country.code));
    }
    if !country.coordinates.is_valid() {
        return Err(CatalogError::InvalidCoordinates {
            code: country.code,
            coordinates: country.coordinates,
        });
    }
    if !zoom_in_range(country.zoom) {
        return Err(CatalogError::InvalidZoom {
            code: country.code,
            zoom: country.zoom,
        });
    }
    Ok(())
}
