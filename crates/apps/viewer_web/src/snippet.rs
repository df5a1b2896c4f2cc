use std::fmt;

use foundation::CountryCode;
use serde::Serialize;

/// Props of an embeddable map widget, rendered as the markup users paste.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WidgetSnippet {
    pub init_country: Option<CountryCode>,
    pub default_show_unselected: bool,
    pub standalone: bool,
}

impl fmt::Display for WidgetSnippet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "<WorldMap")?;
        if let Some(code) = &self.init_country {
            writeln!(f, "  initCountryCode=\"{code}\"")?;
        }
        writeln!(f, "  defaultShowUnselected={{{}}}", self.default_show_unselected)?;
        writeln!(f, "  standalone={{{}}}", self.standalone)?;
        write!(f, "/>")
    }
}
