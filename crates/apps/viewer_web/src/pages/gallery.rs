use catalog::CodeNormalizer;
use foundation::CountryCode;
use layers::{GeoFeature, MapView, MapViewOptions};
use tracing::warn;

use crate::query::country_link;
use crate::snippet::WidgetSnippet;

const EXAMPLES: [(&str, &str, bool); 6] = [
    ("US", "Default style example", true),
    ("RU", "Largest country", false),
    ("JP", "Island nation", true),
    ("BR", "South America", false),
    ("ZA", "Southern hemisphere", true),
    ("LK", "Pearl of the Indian Ocean", false),
];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GalleryExample {
    pub code: CountryCode,
    pub description: &'static str,
    pub show_unselected: bool,
}

impl GalleryExample {
    pub fn snippet(&self) -> WidgetSnippet {
        WidgetSnippet {
            init_country: Some(self.code),
            default_show_unselected: self.show_unselected,
            standalone: true,
        }
    }

    /// Main map link opened by clicking the card.
    pub fn link(&self) -> String {
        country_link(self.code.as_str())
    }
}

/// One gallery tile with its own standalone map.
#[derive(Debug)]
pub struct GalleryCard {
    pub example: GalleryExample,
    pub title: String,
    pub view: MapView,
}

/// Grid of preset examples. At most one card shows its snippet at a time.
#[derive(Debug)]
pub struct Gallery {
    cards: Vec<GalleryCard>,
    expanded: Option<CountryCode>,
}

impl Gallery {
    /// Examples whose country is missing from the table are left out.
    pub fn new(normalizer: CodeNormalizer) -> Self {
        let table = normalizer.table();
        let mut cards = Vec::with_capacity(EXAMPLES.len());
        for (raw, description, show_unselected) in EXAMPLES {
            let Some(country) = CountryCode::parse(raw).ok().and_then(|c| table.get(&c)) else {
                warn!(code = raw, "gallery example has no table entry");
                continue;
            };
            let example = GalleryExample {
                code: country.code,
                description,
                show_unselected,
            };
            let view = MapView::standalone(
                normalizer.clone(),
                MapViewOptions {
                    init_country: Some(example.code),
                    default_show_unselected: show_unselected,
                },
            );
            cards.push(GalleryCard {
                title: country.label.clone(),
                example,
                view,
            });
        }
        Self {
            cards,
            expanded: None,
        }
    }

    pub fn cards(&self) -> &[GalleryCard] {
        &self.cards
    }

    pub fn set_features(&mut self, features: &[GeoFeature]) {
        for card in &mut self.cards {
            card.view.set_features(features.iter().cloned());
        }
    }

    /// "View code" button: expands this card's snippet, or collapses it when
    /// already expanded.
    pub fn toggle_code(&mut self, code: &CountryCode) {
        self.expanded = if self.expanded.as_ref() == Some(code) {
            None
        } else {
            self.cards
                .iter()
                .any(|c| c.example.code == *code)
                .then_some(*code)
        };
    }

    pub fn expanded(&self) -> Option<&CountryCode> {
        self.expanded.as_ref()
    }

    /// Snippet of the expanded card, if any.
    pub fn expanded_snippet(&self) -> Option<WidgetSnippet> {
        let code = self.expanded?;
        self.cards
            .iter()
            .find(|c| c.example.code == code)
            .map(|c| c.example.snippet())
    }
}

#[cfg(test)]
mod tests {
    use crate::app::App;
    use foundation::CountryCode;
    use pretty_assertions::assert_eq;
    use scene::MapContext;

    fn code(s: &str) -> CountryCode {
        CountryCode::parse(s).unwrap()
    }

    #[test]
    fn six_isolated_cards() {
        let app = App::builtin().unwrap();
        let gallery = app.gallery();
        let codes: Vec<_> = gallery.cards().iter().map(|c| c.example.code.to_string()).collect();
        assert_eq!(codes, vec!["US", "RU", "JP", "BR", "ZA", "LK"]);

        let ru = &gallery.cards()[1];
        assert_eq!(ru.title, "Russia");
        assert_eq!(ru.view.state().selected_country, Some(code("RU")));
        assert!(!ru.view.state().show_unselected);
        assert_eq!(app.shared().state().selected_country, None);
    }

    #[test]
    fn one_card_expanded_at_a_time() {
        let app = App::builtin().unwrap();
        let mut gallery = app.gallery();
        gallery.toggle_code(&code("JP"));
        gallery.toggle_code(&code("BR"));
        assert_eq!(gallery.expanded(), Some(&code("BR")));
        assert_eq!(
            gallery.expanded_snippet().unwrap().to_string(),
            "<WorldMap\n  initCountryCode=\"BR\"\n  defaultShowUnselected={false}\n  standalone={true}\n/>"
        );
        gallery.toggle_code(&code("BR"));
        assert_eq!(gallery.expanded(), None);
        gallery.toggle_code(&code("FR"));
        assert_eq!(gallery.expanded(), None);
    }

    #[test]
    fn card_links_open_main_map() {
        let app = App::builtin().unwrap();
        let gallery = app.gallery();
        let link = gallery.cards()[5].example.link();
        assert_eq!(link, "/?country=LK");

        let query = link.trim_start_matches('/');
        let _page = app.main_map(query);
        assert_eq!(app.shared().state().selected_country, Some(code("LK")));
        assert_eq!(app.shared().state().zoom, 7.0);
    }
}
