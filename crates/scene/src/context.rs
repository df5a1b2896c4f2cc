use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;
use std::sync::Arc;

use catalog::CountryTable;
use foundation::{CountryCode, LonLat};
use runtime::{EventBus, SubscriptionId};

use crate::selection::{LocalSelection, SelectOutcome, SelectionState, SelectionStore, StateChange};

/// Operations every map consumer may invoke, whichever store backs it.
///
/// All operations are always present; bound and standalone contexts differ
/// only in which state they touch.
pub trait MapContext {
    fn state(&self) -> SelectionState;
    fn table(&self) -> Arc<CountryTable>;

    fn select_country(&mut self, code: Option<&CountryCode>) -> SelectOutcome;
    fn set_zoom(&mut self, zoom: f64);
    fn set_center(&mut self, center: LonLat);
    fn set_view(&mut self, center: LonLat, zoom: f64);
    fn toggle_show_unselected(&mut self);
    fn set_show_unselected(&mut self, show: bool);

    fn subscribe(&mut self, callback: impl FnMut(&StateChange) + 'static) -> SubscriptionId;
    fn unsubscribe(&mut self, id: SubscriptionId) -> bool;
}

/// Handle to the application-wide selection store.
///
/// Cloning yields another handle to the same store and subscriber list. The
/// application assembly creates exactly one and hands clones to every bound
/// consumer.
///
/// Subscribers run with no borrow held: from inside a callback they may read
/// `state()`, subscribe, unsubscribe (themselves included) or mutate the
/// store through any handle. A mutation made inside a callback is delivered
/// once the current change has reached every subscriber.
#[derive(Debug, Clone)]
pub struct SharedSelection {
    store: Rc<RefCell<SelectionStore>>,
    bus: Rc<RefCell<EventBus<StateChange>>>,
    pending: Rc<RefCell<VecDeque<StateChange>>>,
}

impl SharedSelection {
    pub fn new(table: Arc<CountryTable>) -> Self {
        Self {
            store: Rc::new(RefCell::new(SelectionStore::new(table))),
            bus: Rc::new(RefCell::new(EventBus::new())),
            pending: Rc::new(RefCell::new(VecDeque::new())),
        }
    }

    /// True if both handles refer to the same store.
    pub fn same_store(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.store, &other.store)
    }

    pub fn subscriber_count(&self) -> usize {
        self.bus.borrow().subscriber_count()
    }

    fn apply<R>(&self, f: impl FnOnce(&mut SelectionStore) -> (R, Option<StateChange>)) -> R {
        let (out, change) = f(&mut self.store.borrow_mut());
        if let Some(change) = change {
            self.pending.borrow_mut().push_back(change);
            self.flush();
        }
        out
    }

    /// Delivers queued changes in order. Inside a delivery this is a no-op;
    /// the outer call picks up whatever was queued.
    fn flush(&self) {
        if self.bus.borrow().is_detached() {
            return;
        }
        loop {
            let next = self.pending.borrow_mut().pop_front();
            let Some(change) = next else {
                break;
            };
            let mut detached = self.bus.borrow_mut().detach();
            detached.deliver(&change);
            self.bus.borrow_mut().reattach(detached);
        }
    }
}

impl MapContext for SharedSelection {
    fn state(&self) -> SelectionState {
        self.store.borrow().state()
    }

    fn table(&self) -> Arc<CountryTable> {
        Arc::clone(self.store.borrow().table())
    }

    fn select_country(&mut self, code: Option<&CountryCode>) -> SelectOutcome {
        self.apply(|s| s.select_country(code))
    }

    fn set_zoom(&mut self, zoom: f64) {
        self.apply(|s| ((), s.set_zoom(zoom)))
    }

    fn set_center(&mut self, center: LonLat) {
        self.apply(|s| ((), s.set_center(center)))
    }

    fn set_view(&mut self, center: LonLat, zoom: f64) {
        self.apply(|s| ((), s.set_view(center, zoom)))
    }

    fn toggle_show_unselected(&mut self) {
        self.apply(|s| ((), s.toggle_show_unselected()))
    }

    fn set_show_unselected(&mut self, show: bool) {
        self.apply(|s| ((), s.set_show_unselected(show)))
    }

    fn subscribe(&mut self, callback: impl FnMut(&StateChange) + 'static) -> SubscriptionId {
        self.bus.borrow_mut().subscribe(callback)
    }

    fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.bus.borrow_mut().unsubscribe(id)
    }
}

impl MapContext for LocalSelection {
    fn state(&self) -> SelectionState {
        self.store().state()
    }

    fn table(&self) -> Arc<CountryTable> {
        Arc::clone(self.store().table())
    }

    fn select_country(&mut self, code: Option<&CountryCode>) -> SelectOutcome {
        self.apply(|s| s.select_country(code))
    }

    fn set_zoom(&mut self, zoom: f64) {
        self.apply(|s| ((), s.set_zoom(zoom)))
    }

    fn set_center(&mut self, center: LonLat) {
        self.apply(|s| ((), s.set_center(center)))
    }

    fn set_view(&mut self, center: LonLat, zoom: f64) {
        self.apply(|s| ((), s.set_view(center, zoom)))
    }

    fn toggle_show_unselected(&mut self) {
        self.apply(|s| ((), s.toggle_show_unselected()))
    }

    fn set_show_unselected(&mut self, show: bool) {
        self.apply(|s| ((), s.set_show_unselected(show)))
    }

    fn subscribe(&mut self, callback: impl FnMut(&StateChange) + 'static) -> SubscriptionId {
        self.bus.subscribe(callback)
    }

    fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.bus.unsubscribe(id)
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum ContextMode {
    Bound,
    Standalone,
}

/// The store a map view is wired to, fixed at construction.
#[derive(Debug)]
pub enum SelectionContext {
    Bound(SharedSelection),
    Standalone(LocalSelection),
}

impl SelectionContext {
    pub fn bound(shared: &SharedSelection) -> Self {
        Self::Bound(shared.clone())
    }

    pub fn standalone(table: Arc<CountryTable>) -> Self {
        Self::Standalone(LocalSelection::new(table))
    }

    pub fn mode(&self) -> ContextMode {
        match self {
            Self::Bound(_) => ContextMode::Bound,
            Self::Standalone(_) => ContextMode::Standalone,
        }
    }
}

macro_rules! delegate {
    ($self:ident, $ctx:ident => $body:expr) => {
        match $self {
            SelectionContext::Bound($ctx) => $body,
            SelectionContext::Standalone($ctx) => $body,
        }
    };
}

impl MapContext for SelectionContext {
    fn state(&self) -> SelectionState {
        delegate!(self, c => c.state())
    }

    fn table(&self) -> Arc<CountryTable> {
        delegate!(self, c => c.table())
    }

    fn select_country(&mut self, code: Option<&CountryCode>) -> SelectOutcome {
        delegate!(self, c => c.select_country(code))
    }

    fn set_zoom(&mut self, zoom: f64) {
        delegate!(self, c => c.set_zoom(zoom))
    }

    fn set_center(&mut self, center: LonLat) {
        delegate!(self, c => c.set_center(center))
    }

    fn set_view(&mut self, center: LonLat, zoom: f64) {
        delegate!(self, c => c.set_view(center, zoom))
    }

    fn toggle_show_unselected(&mut self) {
        delegate!(self, c => c.toggle_show_unselected())
    }

    fn set_show_unselected(&mut self, show: bool) {
        delegate!(self, c => c.set_show_unselected(show))
    }

    fn subscribe(&mut self, callback: impl FnMut(&StateChange) + 'static) -> SubscriptionId {
        delegate!(self, c => MapContext::subscribe(c, callback))
    }

    fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        delegate!(self, c => MapContext::unsubscribe(c, id))
    }
}

#[cfg(test)]
mod tests {
    use super::{ContextMode, MapContext, SelectionContext, SharedSelection};
    use crate::selection::{Mutation, SelectOutcome};
    use catalog::{Country, CountryTable};
    use foundation::{CountryCode, LonLat};
    use std::cell::RefCell;
    use std::rc::Rc;
    use std::sync::Arc;

    fn code(s: &str) -> CountryCode {
        CountryCode::parse(s).unwrap()
    }

    fn table() -> Arc<CountryTable> {
        Arc::new(
            CountryTable::new(vec![
                Country::new(code("US"), "United States", LonLat::new(-98.6, 39.8), 4.0),
                Country::new(code("JP"), "Japan", LonLat::new(138.3, 36.2), 5.0),
            ])
            .unwrap(),
        )
    }

    #[test]
    fn shared_handles_observe_the_same_state() {
        let mut a = SharedSelection::new(table());
        let b = a.clone();
        assert!(a.same_store(&b));

        a.select_country(Some(&code("JP")));
        assert_eq!(b.state().selected_country, Some(code("JP")));
        assert_eq!(b.state().zoom, 5.0);
    }

    #[test]
    fn subscribers_get_one_notification_per_applied_mutation() {
        let mut shared = SharedSelection::new(table());
        let reader = shared.clone();
        let seen = Rc::new(RefCell::new(Vec::new()));

        let sink = Rc::clone(&seen);
        shared.subscribe(move |change| {
            // Pulling a fresh snapshot mid-notification matches the payload.
            assert_eq!(reader.state(), change.state);
            sink.borrow_mut().push(change.cause);
        });

        shared.select_country(Some(&code("US")));
        assert_eq!(shared.select_country(Some(&code("XX"))), SelectOutcome::Ignored);
        shared.select_country(Some(&code("US")));
        shared.set_zoom(6.0);
        shared.toggle_show_unselected();
        shared.select_country(None);

        assert_eq!(
            *seen.borrow(),
            vec![
                Mutation::Select,
                Mutation::Zoom,
                Mutation::ShowUnselected,
                Mutation::Clear
            ]
        );
    }

    #[test]
    fn one_shot_subscriber_removes_itself() {
        let mut shared = SharedSelection::new(table());
        let count = Rc::new(RefCell::new(0));
        let id = Rc::new(RefCell::new(None));

        let (mut handle, own_id, c) = (shared.clone(), Rc::clone(&id), Rc::clone(&count));
        *id.borrow_mut() = Some(shared.subscribe(move |_| {
            *c.borrow_mut() += 1;
            if let Some(own) = *own_id.borrow() {
                assert!(handle.unsubscribe(own));
            }
        }));
        assert_eq!(shared.subscriber_count(), 1);

        shared.toggle_show_unselected();
        shared.toggle_show_unselected();
        assert_eq!(*count.borrow(), 1);
        assert_eq!(shared.subscriber_count(), 0);
    }

    #[test]
    fn subscribers_may_query_and_mutate_the_store() {
        let mut shared = SharedSelection::new(table());
        let seen = Rc::new(RefCell::new(Vec::new()));

        let (mut handle, sink) = (shared.clone(), Rc::clone(&seen));
        shared.subscribe(move |change| {
            assert_eq!(handle.subscriber_count(), 2);
            sink.borrow_mut().push((change.cause, change.state.zoom));
            // Follow every selection with a zoom-in of its own.
            if change.cause == Mutation::Select {
                handle.set_zoom(change.state.zoom + 1.0);
            }
        });
        let order = Rc::new(RefCell::new(Vec::new()));
        let o = Rc::clone(&order);
        shared.subscribe(move |change| o.borrow_mut().push(change.revision));

        shared.select_country(Some(&code("JP")));

        assert_eq!(
            *seen.borrow(),
            vec![(Mutation::Select, 5.0), (Mutation::Zoom, 6.0)]
        );
        // Every subscriber saw the selection before the zoom it triggered.
        let revisions = order.borrow();
        assert_eq!(revisions.len(), 2);
        assert!(revisions[0] < revisions[1]);
        assert_eq!(shared.state().zoom, 6.0);
    }

    #[test]
    fn standalone_context_is_isolated() {
        let shared = SharedSelection::new(table());
        let mut bound = SelectionContext::bound(&shared);
        let mut standalone = SelectionContext::standalone(table());
        assert_eq!(bound.mode(), ContextMode::Bound);
        assert_eq!(standalone.mode(), ContextMode::Standalone);

        standalone.select_country(Some(&code("JP")));
        assert_eq!(shared.state().selected_country, None);

        bound.select_country(Some(&code("US")));
        assert_eq!(standalone.state().selected_country, Some(code("JP")));
        assert_eq!(shared.state().selected_country, Some(code("US")));
    }

    #[test]
    fn unsubscribe_through_context() {
        let mut ctx = SelectionContext::standalone(table());
        let count = Rc::new(RefCell::new(0));
        let c = Rc::clone(&count);
        let id = ctx.subscribe(move |_| *c.borrow_mut() += 1);
        ctx.set_center(LonLat::new(3.0, 4.0));
        assert!(ctx.unsubscribe(id));
        ctx.set_center(LonLat::new(5.0, 6.0));
        assert_eq!(*count.borrow(), 1);
    }
}
