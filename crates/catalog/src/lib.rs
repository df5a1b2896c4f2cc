//! Static data the selector consumes: the ordered country table, the raw
//! feature id mapping, and the normalizer that joins the two.

pub mod error;
pub mod feature_ids;
pub mod normalizer;
pub mod table;

use std::sync::Arc;

use once_cell::sync::OnceCell;

pub use error::CatalogError;
pub use feature_ids::{FeatureIdMap, normalize_feature_id};
pub use normalizer::CodeNormalizer;
pub use table::{Country, CountryTable};

const BUILTIN_COUNTRIES_JSON: &str = include_str!("../data/countries.json");
const BUILTIN_FEATURE_IDS_JSON: &str = include_str!("../data/feature_ids.json");

static BUILTIN_COUNTRIES: OnceCell<Arc<CountryTable>> = OnceCell::new();
static BUILTIN_FEATURE_IDS: OnceCell<Arc<FeatureIdMap>> = OnceCell::new();

/// Country table shipped with the crate, parsed on first use.
pub fn builtin_countries() -> Result<Arc<CountryTable>, CatalogError> {
    BUILTIN_COUNTRIES
        .get_or_try_init(|| CountryTable::from_json_str(BUILTIN_COUNTRIES_JSON).map(Arc::new))
        .cloned()
}

/// ISO 3166-1 numeric to alpha-2 mapping for the bundled world geometry.
pub fn builtin_feature_ids() -> Result<Arc<FeatureIdMap>, CatalogError> {
    BUILTIN_FEATURE_IDS
        .get_or_try_init(|| FeatureIdMap::from_json_str(BUILTIN_FEATURE_IDS_JSON).map(Arc::new))
        .cloned()
}

#[cfg(test)]
mod tests {
    use super::{CodeNormalizer, builtin_countries, builtin_feature_ids};
    use foundation::CountryCode;

    #[test]
    fn builtin_tables_parse() {
        let table = builtin_countries().unwrap();
        let ids = builtin_feature_ids().unwrap();
        assert!(table.len() > 50);
        assert!(ids.len() > 200);
    }

    #[test]
    fn every_builtin_country_has_a_feature_id() {
        let table = builtin_countries().unwrap();
        let ids = builtin_feature_ids().unwrap();
        for country in table.iter() {
            assert!(
                ids.iter().any(|(_, c)| c == country.code),
                "{} has no geometry",
                country.code
            );
        }
    }

    #[test]
    fn every_builtin_pair_round_trips() {
        let table = builtin_countries().unwrap();
        let ids = builtin_feature_ids().unwrap();
        let normalizer = CodeNormalizer::new(ids.clone(), table.clone());
        for (key, code) in ids.iter() {
            assert_eq!(ids.normalize(key), Some(code), "{key}");
            let unpadded = key.trim_start_matches('0');
            if !unpadded.is_empty() {
                assert_eq!(ids.normalize(unpadded), Some(code), "{unpadded}");
            }
            let expected = table.contains(&code).then_some(code);
            assert_eq!(normalizer.normalize(key), expected, "{key}");
        }
    }

    #[test]
    fn builtin_lookup_examples() {
        let ids = builtin_feature_ids().unwrap();
        assert_eq!(ids.normalize("840"), CountryCode::parse("US").ok());
        assert_eq!(ids.normalize("4"), CountryCode::parse("AF").ok());
        assert_eq!(ids.normalize("144"), CountryCode::parse("LK").ok());
    }
}
