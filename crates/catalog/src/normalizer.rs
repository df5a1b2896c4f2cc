use std::sync::Arc;

use foundation::CountryCode;
use tracing::trace;

use crate::feature_ids::FeatureIdMap;
use crate::table::CountryTable;

/// Resolves raw identifiers to codes that exist in the country table.
///
/// Stateless apart from the two immutable tables it borrows, so `normalize`
/// is a pure function of its input.
#[derive(Debug, Clone)]
pub struct CodeNormalizer {
    ids: Arc<FeatureIdMap>,
    table: Arc<CountryTable>,
}

impl CodeNormalizer {
    pub fn new(ids: Arc<FeatureIdMap>, table: Arc<CountryTable>) -> Self {
        Self { ids, table }
    }

    /// Geometry feature id to a selectable code.
    ///
    /// Ids without a mapping, and mapped codes missing from the table, both
    /// resolve to `None`; such features are rendered inert.
    pub fn normalize(&self, raw_id: &str) -> Option<CountryCode> {
        let code = self.ids.normalize(raw_id)?;
        if !self.table.contains(&code) {
            trace!(raw_id, %code, "mapped code has no table entry");
            return None;
        }
        Some(code)
    }

    /// Resolves user-supplied text that may be either a canonical code (any
    /// case) or a raw feature id.
    pub fn resolve(&self, raw: &str) -> Option<CountryCode> {
        if let Ok(code) = CountryCode::parse(raw)
            && self.table.contains(&code)
        {
            return Some(code);
        }
        self.normalize(raw)
    }

    pub fn table(&self) -> &Arc<CountryTable> {
        &self.table
    }

    pub fn feature_ids(&self) -> &Arc<FeatureIdMap> {
        &self.ids
    }
}

#[cfg(test)]
mod tests {
    use super::CodeNormalizer;
    use crate::feature_ids::FeatureIdMap;
    use crate::table::{Country, CountryTable};
    use foundation::{CountryCode, LonLat};
    use std::sync::Arc;

    fn code(s: &str) -> CountryCode {
        CountryCode::parse(s).unwrap()
    }

    fn normalizer() -> CodeNormalizer {
        let table = CountryTable::new(vec![
            Country::new(code("US"), "United States", LonLat::new(-98.6, 39.8), 4.0),
            Country::new(code("JP"), "Japan", LonLat::new(138.3, 36.2), 5.0),
        ])
        .unwrap();
        let ids = FeatureIdMap::from_pairs([
            ("840", code("US")),
            ("392", code("JP")),
            ("250", code("FR")),
        ])
        .unwrap();
        CodeNormalizer::new(Arc::new(ids), Arc::new(table))
    }

    #[test]
    fn normalize_requires_table_entry() {
        let n = normalizer();
        assert_eq!(n.normalize("840"), Some(code("US")));
        assert_eq!(n.normalize("0392"), Some(code("JP")));
        // Mapped, but France is not selectable in this table.
        assert_eq!(n.normalize("250"), None);
        assert_eq!(n.normalize("-99"), None);
        assert_eq!(n.normalize(""), None);
    }

    #[test]
    fn resolve_accepts_codes_and_raw_ids() {
        let n = normalizer();
        assert_eq!(n.resolve("jp"), Some(code("JP")));
        assert_eq!(n.resolve("840"), Some(code("US")));
        assert_eq!(n.resolve("FR"), None);
        assert_eq!(n.resolve("nonsense"), None);
    }
}
