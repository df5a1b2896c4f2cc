use std::collections::HashMap;

use catalog::CodeNormalizer;
use foundation::{CountryCode, LonLat};
use scene::visibility::FeatureVisibility;
use scene::{
    ContextMode, MapContext, SelectOutcome, SelectionContext, SelectionState, SharedSelection,
};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::labels::{ScreenPoint, Tooltip};
use crate::symbology::FeatureStyle;

/// A renderable feature as handed over by the geometry source.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeoFeature {
    /// Host-side key, unique per rendered feature.
    pub key: String,
    /// Identifier attached by the geometry source; some features have none.
    #[serde(default)]
    pub raw_id: Option<String>,
}

impl GeoFeature {
    pub fn new(key: impl Into<String>, raw_id: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            raw_id: Some(raw_id.into()),
        }
    }
}

/// Per-feature output of [`MapView::paint`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FeaturePaint {
    pub key: String,
    /// `None` for inert features.
    pub code: Option<CountryCode>,
    pub label: Option<String>,
    /// `None` for inert features: they are neither visible nor invisible.
    pub visibility: Option<FeatureVisibility>,
    pub style: FeatureStyle,
}

impl FeaturePaint {
    pub fn is_inert(&self) -> bool {
        self.code.is_none()
    }

    pub fn interactive(&self) -> bool {
        self.visibility.is_some_and(|v| v.interactive())
    }
}

/// Construction-time options of a map view.
#[derive(Debug, Clone, PartialEq)]
pub struct MapViewOptions {
    /// Country selected when the view is created.
    pub init_country: Option<CountryCode>,
    /// Initial visibility of unselected countries. Only applied to standalone
    /// views; bound views follow the shared store.
    pub default_show_unselected: bool,
}

impl Default for MapViewOptions {
    fn default() -> Self {
        Self {
            init_country: None,
            default_show_unselected: true,
        }
    }
}

#[derive(Debug, Clone)]
struct ResolvedFeature {
    feature: GeoFeature,
    code: Option<CountryCode>,
}

/// Interaction and paint policy for the country map.
///
/// The view never draws: it resolves features once through the normalizer,
/// then answers paint queries and pointer events against its selection
/// context.
#[derive(Debug)]
pub struct MapView {
    ctx: SelectionContext,
    normalizer: CodeNormalizer,
    features: Vec<ResolvedFeature>,
    by_key: HashMap<String, usize>,
    tooltip: Option<Tooltip>,
}

impl MapView {
    pub fn new(ctx: SelectionContext, normalizer: CodeNormalizer, options: MapViewOptions) -> Self {
        let mut view = Self {
            ctx,
            normalizer,
            features: Vec::new(),
            by_key: HashMap::new(),
            tooltip: None,
        };
        if view.ctx.mode() == ContextMode::Standalone {
            view.ctx.set_show_unselected(options.default_show_unselected);
        }
        if let Some(code) = options.init_country {
            view.ctx.select_country(Some(&code));
        }
        view
    }

    /// A view on the shared store.
    pub fn bound(shared: &SharedSelection, normalizer: CodeNormalizer, options: MapViewOptions) -> Self {
        Self::new(SelectionContext::bound(shared), normalizer, options)
    }

    /// A view with private state, isolated from the shared store.
    pub fn standalone(normalizer: CodeNormalizer, options: MapViewOptions) -> Self {
        let table = std::sync::Arc::clone(normalizer.table());
        Self::new(SelectionContext::standalone(table), normalizer, options)
    }

    pub fn mode(&self) -> ContextMode {
        self.ctx.mode()
    }

    pub fn state(&self) -> SelectionState {
        self.ctx.state()
    }

    pub fn context(&self) -> &SelectionContext {
        &self.ctx
    }

    pub fn context_mut(&mut self) -> &mut SelectionContext {
        &mut self.ctx
    }

    /// Replaces the feature set, e.g. once the geometry source has loaded.
    pub fn set_features(&mut self, features: impl IntoIterator<Item = GeoFeature>) {
        self.features.clear();
        self.by_key.clear();
        self.tooltip = None;

        let mut inert = 0usize;
        for feature in features {
            let code = feature
                .raw_id
                .as_deref()
                .and_then(|id| self.normalizer.normalize(id));
            if code.is_none() {
                inert += 1;
            }
            self.by_key.insert(feature.key.clone(), self.features.len());
            self.features.push(ResolvedFeature { feature, code });
        }
        debug!(features = self.features.len(), inert, "map features resolved");
    }

    pub fn feature_count(&self) -> usize {
        self.features.len()
    }

    pub fn paint(&self) -> Vec<FeaturePaint> {
        let state = self.ctx.state();
        self.features
            .iter()
            .map(|f| self.paint_feature(f, &state))
            .collect()
    }

    pub fn paint_one(&self, key: &str) -> Option<FeaturePaint> {
        let f = self.features.get(*self.by_key.get(key)?)?;
        Some(self.paint_feature(f, &self.ctx.state()))
    }

    fn paint_feature(&self, f: &ResolvedFeature, state: &SelectionState) -> FeaturePaint {
        let Some(code) = f.code else {
            return FeaturePaint {
                key: f.feature.key.clone(),
                code: None,
                label: None,
                visibility: None,
                style: FeatureStyle::inert(),
            };
        };
        let visibility = FeatureVisibility::of(&code, state);
        FeaturePaint {
            key: f.feature.key.clone(),
            code: Some(code),
            label: self.normalizer.table().label(&code).map(str::to_string),
            visibility: Some(visibility),
            style: FeatureStyle::for_visibility(visibility),
        }
    }

    /// Resolved code and visibility of an interactive feature.
    fn interactive_target(&self, key: &str) -> Option<(CountryCode, FeatureVisibility)> {
        let f = self.features.get(*self.by_key.get(key)?)?;
        let code = f.code?;
        let visibility = FeatureVisibility::of(&code, &self.ctx.state());
        visibility.interactive().then_some((code, visibility))
    }

    /// Pointer entered a feature. Shows the tooltip for visible, unselected
    /// countries; anything else leaves the current tooltip untouched.
    pub fn pointer_enter(&mut self, key: &str, pointer: ScreenPoint) -> Option<&Tooltip> {
        let (code, visibility) = self.interactive_target(key)?;
        if !visibility.shows_tooltip() {
            return None;
        }
        let label = self.normalizer.table().label(&code)?.to_string();
        self.tooltip = Some(Tooltip::at_pointer(label, pointer));
        self.tooltip.as_ref()
    }

    pub fn pointer_leave(&mut self) {
        self.tooltip = None;
    }

    pub fn tooltip(&self) -> Option<&Tooltip> {
        self.tooltip.as_ref()
    }

    /// Click on a feature. Returns `None` when the feature is inert or hidden
    /// and the click was dropped.
    pub fn click(&mut self, key: &str) -> Option<SelectOutcome> {
        let (code, _) = self.interactive_target(key)?;
        let outcome = self.ctx.select_country(Some(&code));
        if outcome == SelectOutcome::Selected {
            // The hovered country is now the selection, which has no tooltip.
            self.tooltip = None;
        }
        Some(outcome)
    }

    /// End of a pan/zoom gesture reported by the renderer.
    pub fn move_end(&mut self, center: LonLat, zoom: f64) {
        self.ctx.set_view(center, zoom);
    }
}
