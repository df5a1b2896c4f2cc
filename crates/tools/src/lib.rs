//! Command implementations behind the `worldmap` binary. Each returns the
//! text to print so the binary stays a thin argument parser.

use std::fmt::Write as _;

use anyhow::{Context, Result};
use catalog::{CodeNormalizer, CountryTable, FeatureIdMap};
use clap::ValueEnum;
use foundation::CountryCode;
use scene::navigation::{Direction, navigate};
use scene::{MapContext, SelectOutcome, SelectionState};
use serde::Serialize;
use tracing::{info, warn};
use viewer_web::{App, WidgetSnippet};

#[derive(Debug, Copy, Clone, PartialEq, Eq, ValueEnum)]
pub enum Step {
    Next,
    Prev,
}

impl From<Step> for Direction {
    fn from(step: Step) -> Self {
        match step {
            Step::Next => Direction::Next,
            Step::Prev => Direction::Prev,
        }
    }
}

/// The country table as aligned text, or as the JSON it was loaded from.
pub fn list_countries(table: &CountryTable, json: bool) -> Result<String> {
    if json {
        let countries: Vec<_> = table.iter().collect();
        return serde_json::to_string_pretty(&countries).context("serialize country table");
    }
    let mut out = String::new();
    for c in table.iter() {
        writeln!(
            out,
            "{}  {:<32} {:>8.2} {:>7.2}  z{}",
            c.code, c.label, c.coordinates.lon, c.coordinates.lat, c.zoom
        )?;
    }
    Ok(out)
}

/// One line per raw id: the code it resolves to, or `-` for inert features.
pub fn normalize_ids<I, S>(normalizer: &CodeNormalizer, ids: I) -> Result<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut out = String::new();
    for raw in ids {
        let raw = raw.as_ref();
        match normalizer.normalize(raw) {
            Some(code) => writeln!(out, "{raw}\t{code}")?,
            None => writeln!(out, "{raw}\t-")?,
        }
    }
    Ok(out)
}

/// Drives the shared store: optional initial selection, then each step.
/// Returns the state after every operation.
pub fn run_selection(app: &App, initial: Option<&str>, steps: &[Step]) -> Result<Vec<SelectionState>> {
    let mut shared = app.shared().clone();
    let mut states = Vec::with_capacity(steps.len() + 1);

    if let Some(raw) = initial {
        let code = app
            .normalizer()
            .resolve(raw)
            .with_context(|| format!("unknown country: {raw}"))?;
        if shared.select_country(Some(&code)) != SelectOutcome::Selected {
            anyhow::bail!("country {code} could not be selected");
        }
        states.push(shared.state());
    }
    for &step in steps {
        navigate(&mut shared, step.into());
        states.push(shared.state());
    }
    Ok(states)
}

pub fn snippet(
    app: &App,
    country: Option<&str>,
    show_unselected: bool,
    standalone: bool,
) -> Result<WidgetSnippet> {
    let init_country = country
        .map(|raw| {
            app.normalizer()
                .resolve(raw)
                .with_context(|| format!("unknown country: {raw}"))
        })
        .transpose()?;
    Ok(WidgetSnippet {
        init_country,
        default_show_unselected: show_unselected,
        standalone,
    })
}

/// Cross-check between the country table and the feature id mapping.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidationReport {
    pub countries: usize,
    pub feature_ids: usize,
    /// Table entries no geometry resolves to; they can be selected by search
    /// but never clicked.
    pub without_geometry: Vec<CountryCode>,
    /// Mapping entries whose code is not in the table; rendered inert.
    pub inert_ids: usize,
}

impl ValidationReport {
    pub fn is_clean(&self) -> bool {
        self.without_geometry.is_empty()
    }
}

pub fn validate(table: &CountryTable, ids: &FeatureIdMap) -> ValidationReport {
    let without_geometry: Vec<CountryCode> = table
        .iter()
        .map(|c| c.code)
        .filter(|code| !ids.iter().any(|(_, mapped)| mapped == *code))
        .collect();
    let inert_ids = ids.iter().filter(|(_, code)| !table.contains(code)).count();

    for code in &without_geometry {
        warn!(%code, "country has no feature id");
    }
    info!(
        countries = table.len(),
        feature_ids = ids.len(),
        inert_ids,
        "validated tables"
    );
    ValidationReport {
        countries: table.len(),
        feature_ids: ids.len(),
        without_geometry,
        inert_ids,
    }
}

#[cfg(test)]
mod tests {
    use super::{Step, list_countries, normalize_ids, run_selection, snippet, validate};
    use catalog::{Country, CountryTable, FeatureIdMap};
    use foundation::{CountryCode, LonLat, WORLD_ORIGIN};
    use pretty_assertions::assert_eq;
    use viewer_web::App;

    fn code(s: &str) -> CountryCode {
        CountryCode::parse(s).unwrap()
    }

    #[test]
    fn selection_walk_matches_table_order() {
        let app = App::builtin().unwrap();
        let states = run_selection(&app, Some("us"), &[Step::Prev, Step::Next]).unwrap();
        let codes: Vec<_> = states.iter().map(|s| s.selected_country).collect();
        assert_eq!(codes, vec![Some(code("US")), Some(code("GB")), Some(code("US"))]);
        assert_eq!(states[0].zoom, 3.0);

        assert!(run_selection(&app, Some("Atlantis"), &[]).is_err());
    }

    #[test]
    fn stepping_without_selection_starts_at_first_entry() {
        let app = App::builtin().unwrap();
        let states = run_selection(&app, None, &[Step::Next]).unwrap();
        assert_eq!(states[0].selected_country, Some(code("AF")));
        assert_ne!(states[0].center, WORLD_ORIGIN);
    }

    #[test]
    fn normalize_marks_inert_ids() {
        let app = App::builtin().unwrap();
        let out = normalize_ids(app.normalizer(), ["840", "4", "999"]).unwrap();
        assert_eq!(out, "840\tUS\n4\tAF\n999\t-\n");
    }

    #[test]
    fn snippet_resolves_feature_ids() {
        let app = App::builtin().unwrap();
        let s = snippet(&app, Some("392"), false, true).unwrap();
        assert_eq!(s.init_country, Some(code("JP")));
        assert!(snippet(&app, Some("nowhere"), true, true).is_err());
    }

    #[test]
    fn validation_reports_gaps() {
        let table = CountryTable::new(vec![
            Country::new(code("US"), "United States", LonLat::new(-98.6, 39.8), 3.0),
            Country::new(code("JP"), "Japan", LonLat::new(138.3, 36.2), 5.0),
        ])
        .unwrap();
        let ids = FeatureIdMap::from_pairs([("840", code("US")), ("250", code("FR"))]).unwrap();
        let report = validate(&table, &ids);
        assert_eq!(report.without_geometry, vec![code("JP")]);
        assert_eq!(report.inert_ids, 1);
        assert!(!report.is_clean());
    }

    #[test]
    fn plain_listing_has_one_line_per_country() {
        let app = App::builtin().unwrap();
        let out = list_countries(app.table(), false).unwrap();
        assert_eq!(out.lines().count(), app.table().len());
        assert!(out.lines().any(|l| l.starts_with("LK  Sri Lanka")));
    }
}
