/// Zoom of the whole-world view; also the lower bound of interactive zoom.
pub const MIN_ZOOM: f64 = 1.0;
pub const MAX_ZOOM: f64 = 8.0;

/// Clamp `zoom` into `[MIN_ZOOM, MAX_ZOOM]`.
///
/// Returns `None` for NaN or infinite input so callers can drop it instead of
/// poisoning camera state.
pub fn clamp_zoom(zoom: f64) -> Option<f64> {
    if !zoom.is_finite() {
        return None;
    }
    Some(zoom.clamp(MIN_ZOOM, MAX_ZOOM))
}

pub fn zoom_in_range(zoom: f64) -> bool {
    zoom.is_finite() && (MIN_ZOOM..=MAX_ZOOM).contains(&zoom)
}
