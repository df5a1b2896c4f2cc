use foundation::CountryCode;
use serde::Serialize;

use crate::selection::SelectionState;

/// Visibility of one resolved country feature under a selection state.
///
/// Invariants:
/// - The selected feature is always visible.
/// - Any other feature is visible iff `show_unselected`.
/// - A feature that is not visible is not interactive either: hover and click
///   are both disabled, not just its fill.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize)]
pub struct FeatureVisibility {
    pub selected: bool,
    pub visible: bool,
}

impl FeatureVisibility {
    pub fn of(code: &CountryCode, state: &SelectionState) -> Self {
        let selected = state.is_selected(code);
        Self {
            selected,
            visible: state.show_unselected || selected,
        }
    }

    pub fn interactive(&self) -> bool {
        self.visible
    }

    /// Hover tooltips are only shown for visible features other than the
    /// current selection.
    pub fn shows_tooltip(&self) -> bool {
        self.visible && !self.selected
    }
}
