use catalog::CountryTable;
use foundation::CountryCode;
use scene::{MapContext, SelectOutcome};
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SearchOption {
    pub value: CountryCode,
    pub label: String,
}

/// One option per table entry, in table order.
pub fn search_options(table: &CountryTable) -> Vec<SearchOption> {
    table
        .iter()
        .map(|c| SearchOption {
            value: c.code,
            label: c.label.clone(),
        })
        .collect()
}

/// Options whose label or code contains `query`, ignoring case.
///
/// A blank query keeps every option. Order is preserved.
pub fn filter_options<'a>(options: &'a [SearchOption], query: &str) -> Vec<&'a SearchOption> {
    let needle = query.trim().to_lowercase();
    if needle.is_empty() {
        return options.iter().collect();
    }
    options
        .iter()
        .filter(|o| {
            o.label.to_lowercase().contains(&needle)
                || o.value.as_str().to_lowercase().contains(&needle)
        })
        .collect()
}

/// Country search box wired to a selection context.
#[derive(Debug)]
pub struct SearchControl<C> {
    ctx: C,
    options: Vec<SearchOption>,
}

impl<C: MapContext> SearchControl<C> {
    pub fn new(ctx: C) -> Self {
        let options = search_options(&ctx.table());
        Self { ctx, options }
    }

    pub fn options(&self) -> &[SearchOption] {
        &self.options
    }

    /// The option shown in the box: the current selection, if any.
    pub fn value(&self) -> Option<&SearchOption> {
        let selected = self.ctx.state().selected_country?;
        self.options.iter().find(|o| o.value == selected)
    }

    pub fn filter(&self, query: &str) -> Vec<&SearchOption> {
        filter_options(&self.options, query)
    }

    /// Picking an option selects it; clearing the box passes `None`.
    pub fn choose(&mut self, value: Option<&CountryCode>) -> SelectOutcome {
        self.ctx.select_country(value)
    }

    pub fn clear(&mut self) -> SelectOutcome {
        self.choose(None)
    }
}

#[cfg(test)]
mod tests {
    use super::{SearchControl, filter_options, search_options};
    use catalog::{Country, CountryTable};
    use foundation::{CountryCode, LonLat};
    use scene::{MapContext, SelectOutcome, SharedSelection};
    use std::sync::Arc;

    fn code(s: &str) -> CountryCode {
        CountryCode::parse(s).unwrap()
    }

    fn table() -> Arc<CountryTable> {
        Arc::new(
            CountryTable::new(vec![
                Country::new(code("US"), "United States", LonLat::new(-98.6, 39.8), 4.0),
                Country::new(code("GB"), "United Kingdom", LonLat::new(-3.4, 55.4), 5.0),
                Country::new(code("JP"), "Japan", LonLat::new(138.3, 36.2), 5.0),
            ])
            .unwrap(),
        )
    }

    #[test]
    fn filter_matches_label_and_code() {
        let options = search_options(&table());
        let labels = |q: &str| -> Vec<String> {
            filter_options(&options, q)
                .into_iter()
                .map(|o| o.label.clone())
                .collect()
        };
        assert_eq!(labels("united"), vec!["United States", "United Kingdom"]);
        assert_eq!(labels(" jp "), vec!["Japan"]);
        assert_eq!(labels("").len(), 3);
        assert!(labels("atlantis").is_empty());
    }

    #[test]
    fn choosing_drives_the_shared_store() {
        let shared = SharedSelection::new(table());
        let mut search = SearchControl::new(shared.clone());
        assert!(search.value().is_none());

        assert_eq!(search.choose(Some(&code("GB"))), SelectOutcome::Selected);
        assert_eq!(shared.state().selected_country, Some(code("GB")));
        assert_eq!(search.value().map(|o| o.label.as_str()), Some("United Kingdom"));

        assert_eq!(search.clear(), SelectOutcome::Cleared);
        assert!(search.value().is_none());
        assert_eq!(shared.state().zoom, 1.0);
    }

    #[test]
    fn value_follows_selection_made_elsewhere() {
        let mut shared = SharedSelection::new(table());
        let search = SearchControl::new(shared.clone());
        shared.select_country(Some(&code("JP")));
        assert_eq!(search.value().map(|o| o.value), Some(code("JP")));
    }
}
