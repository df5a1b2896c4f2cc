use serde::{Deserialize, Serialize};

/// Longitude/latitude pair in degrees.
///
/// Serialized as a `[lon, lat]` array, matching the GeoJSON coordinate order
/// used by the rendering host.
#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "[f64; 2]", into = "[f64; 2]")]
pub struct LonLat {
    pub lon: f64,
    pub lat: f64,
}

/// Camera center of the unselected world view.
pub const WORLD_ORIGIN: LonLat = LonLat::new(0.0, 0.0);

impl LonLat {
    pub const fn new(lon: f64, lat: f64) -> Self {
        Self { lon, lat }
    }

    pub fn is_finite(&self) -> bool {
        self.lon.is_finite() && self.lat.is_finite()
    }

    /// True if both components are finite and within the WGS84 degree ranges.
    pub fn is_valid(&self) -> bool {
        self.is_finite() && (-180.0..=180.0).contains(&self.lon) && (-90.0..=90.0).contains(&self.lat)
    }
}

impl Default for LonLat {
    fn default() -> Self {
        WORLD_ORIGIN
    }
}

impl From<[f64; 2]> for LonLat {
    fn from([lon, lat]: [f64; 2]) -> Self {
        Self::new(lon, lat)
    }
}

impl From<LonLat> for [f64; 2] {
    fn from(p: LonLat) -> Self {
        [p.lon, p.lat]
    }
}

#[cfg(test)]
mod tests {
    use super::{LonLat, WORLD_ORIGIN};

    #[test]
    fn validity_checks_ranges() {
        assert!(LonLat::new(139.69, 35.68).is_valid());
        assert!(LonLat::new(-180.0, -90.0).is_valid());
        assert!(!LonLat::new(181.0, 0.0).is_valid());
        assert!(!LonLat::new(0.0, 91.0).is_valid());
        assert!(!LonLat::new(f64::NAN, 0.0).is_valid());
        assert!(LonLat::new(500.0, 0.0).is_finite());
    }

    #[test]
    fn serializes_as_lon_lat_array() {
        let p = LonLat::new(-98.5, 39.8);
        assert_eq!(serde_json::to_string(&p).unwrap(), "[-98.5,39.8]");
        let back: LonLat = serde_json::from_str("[12.5,41.9]").unwrap();
        assert_eq!(back, LonLat::new(12.5, 41.9));
        assert_eq!(LonLat::default(), WORLD_ORIGIN);
    }
}
