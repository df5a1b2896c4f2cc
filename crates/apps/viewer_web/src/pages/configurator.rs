use catalog::CodeNormalizer;
use foundation::{CountryCode, MAX_ZOOM, MIN_ZOOM};
use layers::{GeoFeature, MapView, MapViewOptions, SearchOption, search_options};
use scene::navigation::{Direction, neighbor};
use scene::{MapContext, SharedSelection};
use tracing::debug;

use crate::snippet::WidgetSnippet;

/// Granularity of the zoom slider.
pub const ZOOM_SLIDER_STEP: f64 = 0.1;

/// Settings edited on the configurator page.
#[derive(Debug, Clone, PartialEq)]
pub struct ConfiguratorConfig {
    pub selected: Option<CountryCode>,
    pub show_unselected: bool,
    pub zoom: f64,
    pub standalone: bool,
}

impl Default for ConfiguratorConfig {
    fn default() -> Self {
        Self {
            selected: None,
            show_unselected: true,
            zoom: MIN_ZOOM,
            standalone: true,
        }
    }
}

/// Widget configurator: edits a [`ConfiguratorConfig`], shows the matching
/// snippet and keeps a live preview.
///
/// A preview's mode cannot change, so any edit to the selection, visibility
/// or mode replaces the preview with a fresh one built from the config.
#[derive(Debug)]
pub struct Configurator {
    config: ConfiguratorConfig,
    options: Vec<SearchOption>,
    normalizer: CodeNormalizer,
    shared: SharedSelection,
    features: Vec<GeoFeature>,
    preview: MapView,
}

impl Configurator {
    pub fn new(shared: &SharedSelection, normalizer: CodeNormalizer) -> Self {
        let config = ConfiguratorConfig::default();
        let preview = build_preview(&config, shared, &normalizer, &[]);
        Self {
            options: search_options(normalizer.table()),
            config,
            normalizer,
            shared: shared.clone(),
            features: Vec::new(),
            preview,
        }
    }

    pub fn config(&self) -> &ConfiguratorConfig {
        &self.config
    }

    pub fn options(&self) -> &[SearchOption] {
        &self.options
    }

    pub fn selected_option(&self) -> Option<&SearchOption> {
        let selected = self.config.selected?;
        self.options.iter().find(|o| o.value == selected)
    }

    pub fn preview(&self) -> &MapView {
        &self.preview
    }

    pub fn preview_mut(&mut self) -> &mut MapView {
        &mut self.preview
    }

    pub fn shared(&self) -> &SharedSelection {
        &self.shared
    }

    /// Geometry for the preview; kept across rebuilds.
    pub fn set_features(&mut self, features: Vec<GeoFeature>) {
        self.preview.set_features(features.iter().cloned());
        self.features = features;
    }

    /// Picks a country from the search box; `None` clears it. Codes missing
    /// from the table are ignored.
    pub fn select(&mut self, code: Option<&CountryCode>) {
        if let Some(code) = code
            && !self.normalizer.table().contains(code)
        {
            debug!(%code, "configurator ignored unknown country");
            return;
        }
        self.config.selected = code.copied();
        self.rebuild_preview();
    }

    /// Previous/next button. With nothing selected both land on the first
    /// entry.
    pub fn navigate(&mut self, direction: Direction) -> Option<CountryCode> {
        let code = neighbor(
            self.normalizer.table(),
            self.config.selected.as_ref(),
            direction,
        )?;
        self.config.selected = Some(code);
        self.rebuild_preview();
        Some(code)
    }

    /// Slider input, snapped to the slider step and clamped to the zoom range.
    /// Non-finite input is ignored.
    pub fn set_zoom(&mut self, zoom: f64) {
        if !zoom.is_finite() {
            return;
        }
        let snapped = (zoom / ZOOM_SLIDER_STEP).round() * ZOOM_SLIDER_STEP;
        self.config.zoom = snapped.clamp(MIN_ZOOM, MAX_ZOOM);
        if self.config.selected.is_none() {
            self.preview.context_mut().set_zoom(self.config.zoom);
        }
    }

    pub fn zoom_label(&self) -> String {
        format!("{:.1}x", self.config.zoom)
    }

    pub fn toggle_show_unselected(&mut self) {
        self.config.show_unselected = !self.config.show_unselected;
        self.rebuild_preview();
    }

    pub fn toggle_standalone(&mut self) {
        self.config.standalone = !self.config.standalone;
        self.rebuild_preview();
    }

    pub fn snippet(&self) -> WidgetSnippet {
        WidgetSnippet {
            init_country: self.config.selected,
            default_show_unselected: self.config.show_unselected,
            standalone: self.config.standalone,
        }
    }

    fn rebuild_preview(&mut self) {
        self.preview = build_preview(&self.config, &self.shared, &self.normalizer, &self.features);
    }
}

fn build_preview(
    config: &ConfiguratorConfig,
    shared: &SharedSelection,
    normalizer: &CodeNormalizer,
    features: &[GeoFeature],
) -> MapView {
    let options = MapViewOptions {
        init_country: config.selected,
        default_show_unselected: config.show_unselected,
    };
    let mut view = if config.standalone {
        MapView::standalone(normalizer.clone(), options)
    } else {
        MapView::bound(shared, normalizer.clone(), options)
    };
    if config.selected.is_none() {
        view.context_mut().set_zoom(config.zoom);
    }
    view.set_features(features.iter().cloned());
    view
}
