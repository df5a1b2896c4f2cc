use std::path::PathBuf;

use foundation::{CountryCode, InvalidCountryCode, LonLat};

#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("failed to read {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("malformed catalog json: {0}")]
    Json(#[from] serde_json::Error),
    #[error(transparent)]
    InvalidCode(#[from] InvalidCountryCode),
    #[error("duplicate country code {0}")]
    DuplicateCode(CountryCode),
    #[error("country {0}: empty label")]
    EmptyLabel(CountryCode),
    #[error("country {code}: coordinates [{}, {}] out of range", .coordinates.lon, .coordinates.lat)]
    InvalidCoordinates {
        code: CountryCode,
        coordinates: LonLat,
    },
    #[error("country {code}: zoom {zoom} outside the interactive range")]
    InvalidZoom { code: CountryCode, zoom: f64 },
    #[error("country table is empty")]
    EmptyTable,
    #[error("invalid feature id {0:?}: expected up to three decimal digits")]
    InvalidFeatureId(String),
    #[error("feature ids {first:?} and {second:?} both normalize to {key:?}")]
    DuplicateFeatureId {
        key: String,
        first: String,
        second: String,
    },
}
