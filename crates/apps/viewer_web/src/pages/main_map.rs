use catalog::CodeNormalizer;
use layers::{MapControls, MapView, MapViewOptions, SearchControl};
use scene::{MapContext, SelectOutcome, SharedSelection};
use tracing::{debug, warn};

use crate::query::country_param;

/// The main page: one map, search box and controls, all bound to the shared
/// store.
#[derive(Debug)]
pub struct MainMap {
    pub view: MapView,
    pub search: SearchControl<SharedSelection>,
    pub controls: MapControls<SharedSelection>,
    shared: SharedSelection,
    normalizer: CodeNormalizer,
}

impl MainMap {
    pub fn open(shared: &SharedSelection, normalizer: CodeNormalizer, query: &str) -> Self {
        let mut page = Self {
            view: MapView::bound(shared, normalizer.clone(), MapViewOptions::default()),
            search: SearchControl::new(shared.clone()),
            controls: MapControls::new(shared.clone()),
            shared: shared.clone(),
            normalizer,
        };
        page.apply_query(query);
        page
    }

    /// Selects the country named by the `country` query parameter.
    ///
    /// The value may be a code in any case or a raw feature id. Returns
    /// `None` when the query carries no such parameter.
    pub fn apply_query(&mut self, query: &str) -> Option<SelectOutcome> {
        let raw = country_param(query)?;
        let Some(code) = self.normalizer.resolve(&raw) else {
            warn!(country = %raw, "query names no known country");
            return Some(SelectOutcome::Ignored);
        };
        let outcome = self.shared.select_country(Some(&code));
        debug!(%code, ?outcome, "applied country query");
        Some(outcome)
    }

    pub fn shared(&self) -> &SharedSelection {
        &self.shared
    }
}

#[cfg(test)]
mod tests {
    use crate::app::App;
    use foundation::CountryCode;
    use layers::GeoFeature;
    use pretty_assertions::assert_eq;
    use scene::{MapContext, SelectOutcome};

    fn code(s: &str) -> CountryCode {
        CountryCode::parse(s).unwrap()
    }

    #[test]
    fn query_selects_by_code_or_feature_id() {
        let app = App::builtin().unwrap();
        let page = app.main_map("?country=jp");
        let state = page.shared().state();
        assert_eq!(state.selected_country, Some(code("JP")));
        assert_eq!(state.zoom, 5.0);

        let app = App::builtin().unwrap();
        let _page = app.main_map("?country=076");
        assert_eq!(app.shared().state().selected_country, Some(code("BR")));
    }

    #[test]
    fn unknown_query_is_a_no_op() {
        let app = App::builtin().unwrap();
        let mut page = app.main_map("?country=Atlantis");
        assert_eq!(app.shared().state().selected_country, None);
        assert_eq!(page.apply_query("?country=XX"), Some(SelectOutcome::Ignored));
        assert_eq!(page.apply_query("?other=1"), None);
    }

    #[test]
    fn widgets_stay_in_step() {
        let app = App::builtin().unwrap();
        let mut page = app.main_map("");
        page.view.set_features([
            GeoFeature::new("us", "840"),
            GeoFeature::new("jp", "392"),
        ]);

        page.view.click("us");
        assert_eq!(page.search.value().map(|o| o.value), Some(code("US")));

        page.controls.zoom_in();
        assert_eq!(page.view.state().zoom, 6.0);

        page.controls.reset();
        assert!(page.search.value().is_none());
        assert_eq!(page.view.state().zoom, 1.0);
    }
}
