use std::sync::Arc;

use catalog::CountryTable;
use foundation::{CountryCode, LonLat, MIN_ZOOM, WORLD_ORIGIN, clamp_zoom};
use runtime::{EventBus, Revision};
use serde::Serialize;
use tracing::{debug, trace};

/// Snapshot of one map context's selection and camera.
#[derive(Debug, Copy, Clone, PartialEq, Serialize)]
pub struct SelectionState {
    pub selected_country: Option<CountryCode>,
    pub center: LonLat,
    pub zoom: f64,
    pub show_unselected: bool,
}

impl Default for SelectionState {
    fn default() -> Self {
        Self {
            selected_country: None,
            center: WORLD_ORIGIN,
            zoom: MIN_ZOOM,
            show_unselected: true,
        }
    }
}

impl SelectionState {
    pub fn is_selected(&self, code: &CountryCode) -> bool {
        self.selected_country.as_ref() == Some(code)
    }
}

/// Which operation produced a [`StateChange`].
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Mutation {
    Select,
    Clear,
    Zoom,
    Center,
    View,
    ShowUnselected,
}

/// Notification published after every applied mutation.
#[derive(Debug, Copy, Clone, PartialEq, Serialize)]
pub struct StateChange {
    pub revision: Revision,
    pub cause: Mutation,
    pub state: SelectionState,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SelectOutcome {
    /// The code was found; selection and camera now match its preset.
    Selected,
    /// Selection reset to the world view.
    Cleared,
    /// The code is not in the country table; state is unchanged.
    Ignored,
}

/// The selection state machine.
///
/// Transitions return the [`StateChange`] to publish, or `None` when the
/// state did not change. Publishing is left to the owner so that shared and
/// private stores can release their borrows first.
///
/// Invariants:
/// - `selected_country`, when set, is an entry of `table`.
/// - Immediately after a selection change, `center`/`zoom` equal the entry's
///   preset; both are written in the same transition.
#[derive(Debug, Clone)]
pub struct SelectionStore {
    table: Arc<CountryTable>,
    state: SelectionState,
    revision: Revision,
}

impl SelectionStore {
    pub fn new(table: Arc<CountryTable>) -> Self {
        Self {
            table,
            state: SelectionState::default(),
            revision: Revision::INITIAL,
        }
    }

    pub fn state(&self) -> SelectionState {
        self.state
    }

    pub fn revision(&self) -> Revision {
        self.revision
    }

    pub fn table(&self) -> &Arc<CountryTable> {
        &self.table
    }

    pub fn select_country(
        &mut self,
        code: Option<&CountryCode>,
    ) -> (SelectOutcome, Option<StateChange>) {
        let Some(code) = code else {
            let next = SelectionState {
                selected_country: None,
                center: WORLD_ORIGIN,
                zoom: MIN_ZOOM,
                ..self.state
            };
            return (SelectOutcome::Cleared, self.commit(next, Mutation::Clear));
        };

        let Some(country) = self.table.get(code) else {
            debug!(%code, "ignoring selection of unknown country");
            return (SelectOutcome::Ignored, None);
        };

        let next = SelectionState {
            selected_country: Some(country.code),
            center: country.coordinates,
            zoom: country.zoom,
            ..self.state
        };
        (SelectOutcome::Selected, self.commit(next, Mutation::Select))
    }

    /// Clamps into the interactive zoom range; non-finite input is dropped.
    pub fn set_zoom(&mut self, zoom: f64) -> Option<StateChange> {
        let zoom = clamp_zoom(zoom)?;
        let next = SelectionState { zoom, ..self.state };
        self.commit(next, Mutation::Zoom)
    }

    pub fn set_center(&mut self, center: LonLat) -> Option<StateChange> {
        if !center.is_finite() {
            return None;
        }
        let next = SelectionState {
            center,
            ..self.state
        };
        self.commit(next, Mutation::Center)
    }

    /// Center and zoom in one transition, as reported at the end of a pan or
    /// zoom gesture.
    pub fn set_view(&mut self, center: LonLat, zoom: f64) -> Option<StateChange> {
        if !center.is_finite() {
            return None;
        }
        let zoom = clamp_zoom(zoom)?;
        let next = SelectionState {
            center,
            zoom,
            ..self.state
        };
        self.commit(next, Mutation::View)
    }

    pub fn toggle_show_unselected(&mut self) -> Option<StateChange> {
        let next = SelectionState {
            show_unselected: !self.state.show_unselected,
            ..self.state
        };
        self.commit(next, Mutation::ShowUnselected)
    }

    pub fn set_show_unselected(&mut self, show: bool) -> Option<StateChange> {
        let next = SelectionState {
            show_unselected: show,
            ..self.state
        };
        self.commit(next, Mutation::ShowUnselected)
    }

    fn commit(&mut self, next: SelectionState, cause: Mutation) -> Option<StateChange> {
        if next == self.state {
            return None;
        }
        self.state = next;
        self.revision = self.revision.next();
        trace!(revision = %self.revision, ?cause, "selection state changed");
        Some(StateChange {
            revision: self.revision,
            cause,
            state: self.state,
        })
    }
}

/// A store plus its own subscribers: the private state of a standalone map.
#[derive(Debug)]
pub struct LocalSelection {
    pub(crate) store: SelectionStore,
    pub(crate) bus: EventBus<StateChange>,
}

impl LocalSelection {
    pub fn new(table: Arc<CountryTable>) -> Self {
        Self {
            store: SelectionStore::new(table),
            bus: EventBus::new(),
        }
    }

    pub fn store(&self) -> &SelectionStore {
        &self.store
    }

    pub(crate) fn apply<R>(
        &mut self,
        f: impl FnOnce(&mut SelectionStore) -> (R, Option<StateChange>),
    ) -> R {
        let (out, change) = f(&mut self.store);
        if let Some(change) = change {
            self.bus.publish(&change);
        }
        out
    }
}
