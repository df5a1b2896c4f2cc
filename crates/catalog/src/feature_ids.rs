//! Raw geometry feature identifiers to canonical country codes.
//!
//! The world geometry attaches ISO 3166-1 numeric ids to its features
//! (`"004"`, `"840"`, ...). Hosts do not agree on padding, so every id, both
//! in the mapping table and at lookup time, goes through
//! [`normalize_feature_id`] first.

use std::collections::{BTreeMap, HashMap};
use std::path::Path;

use foundation::CountryCode;

use crate::error::CatalogError;

/// Width of a canonical feature id key.
pub const FEATURE_ID_WIDTH: usize = 3;

/// Canonical key for a raw feature id: decimal digits, zero-padded to
/// [`FEATURE_ID_WIDTH`].
///
/// Returns `None` for empty input, non-numeric text, or values too wide to be
/// a numeric country id.
pub fn normalize_feature_id(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() || !trimmed.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    let significant = trimmed.trim_start_matches('0');
    if significant.len() > FEATURE_ID_WIDTH {
        return None;
    }
    Some(format!("{significant:0>width$}", width = FEATURE_ID_WIDTH))
}

#[derive(Debug, Clone, PartialEq)]
pub struct FeatureIdMap {
    codes: HashMap<String, CountryCode>,
}

impl FeatureIdMap {
    /// Builds a map from `(raw id, code)` pairs.
    ///
    /// Fails if a raw id does not normalize or if two raw ids collapse onto the
    /// same key.
    pub fn from_pairs<S: AsRef<str>>(
        pairs: impl IntoIterator<Item = (S, CountryCode)>,
    ) -> Result<Self, CatalogError> {
        let mut codes = HashMap::new();
        let mut originals: HashMap<String, String> = HashMap::new();
        for (raw, code) in pairs {
            let raw = raw.as_ref();
            let key = normalize_feature_id(raw)
                .ok_or_else(|| CatalogError::InvalidFeatureId(raw.to_string()))?;
            if let Some(first) = originals.insert(key.clone(), raw.to_string()) {
                return Err(CatalogError::DuplicateFeatureId {
                    key,
                    first,
                    second: raw.to_string(),
                });
            }
            codes.insert(key, code);
        }
        Ok(Self { codes })
    }

    /// Parses a JSON object of `{"<raw id>": "<code>"}`.
    pub fn from_json_str(json: &str) -> Result<Self, CatalogError> {
        // BTreeMap keeps duplicate-key errors deterministic.
        let raw: BTreeMap<String, String> = serde_json::from_str(json)?;
        let mut pairs = Vec::with_capacity(raw.len());
        for (id, code) in raw {
            pairs.push((id, CountryCode::parse(&code)?));
        }
        Self::from_pairs(pairs)
    }

    pub fn from_path(path: &Path) -> Result<Self, CatalogError> {
        let raw = std::fs::read_to_string(path).map_err(|source| CatalogError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&raw)
    }

    /// Pure mapping lookup. Unknown or malformed ids yield `None`.
    pub fn normalize(&self, raw: &str) -> Option<CountryCode> {
        let key = normalize_feature_id(raw)?;
        self.codes.get(&key).copied()
    }

    pub fn len(&self) -> usize {
        self.codes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.codes.is_empty()
    }

    /// Iterates `(canonical key, code)` pairs in unspecified order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, CountryCode)> + '_ {
        self.codes.iter().map(|(k, c)| (k.as_str(), *c))
    }
}
