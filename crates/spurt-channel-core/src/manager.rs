//! Selection manager: the guarded owner of the category selection.
//!
//! The manager is created by whatever controller owns the page and is shared
//! with event handlers through `Rc`. All mutation goes through
//! [`SelectionManager::guarded_dispatch`], which:
//!
//! 1. rejects the call outright if another dispatch is still running,
//! 2. runs the handler against a working copy of the selection,
//! 3. commits the copy and notifies subscribers,
//! 4. lowers the guard, whatever happened in between.
//!
//! Subscribers run while the guard is still raised. A subscriber that
//! synchronously fires another trigger therefore gets suppressed exactly
//! like any other re-entrant trigger.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use crate::guard::{GuardState, ProcessingGuard};
use crate::selection::SelectionSet;
use crate::trigger::TriggerKind;
use crate::types::{CategoryId, SelectionChange};

/// Outcome of a guarded dispatch.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[must_use]
pub enum Dispatch<R> {
    /// The handler ran to completion and returned `R`.
    Completed(R),
    /// Another dispatch was in flight; the handler never ran.
    Suppressed,
}

impl<R> Dispatch<R> {
    pub fn is_suppressed(&self) -> bool {
        matches!(self, Dispatch::Suppressed)
    }

    pub fn is_completed(&self) -> bool {
        matches!(self, Dispatch::Completed(_))
    }

    pub fn completed(self) -> Option<R> {
        match self {
            Dispatch::Completed(r) => Some(r),
            Dispatch::Suppressed => None,
        }
    }
}

/// Handle given to a guarded handler for mutating the selection.
///
/// Edits land on a working copy and are committed when the handler returns.
pub struct SelectionTxn<'a> {
    working: &'a mut SelectionSet,
    before: Vec<CategoryId>,
    added: Vec<CategoryId>,
    removed: Vec<CategoryId>,
    touched: bool,
}

impl<'a> SelectionTxn<'a> {
    fn new(working: &'a mut SelectionSet) -> Self {
        Self {
            before: working.to_vec(),
            working,
            added: Vec::new(),
            removed: Vec::new(),
            touched: false,
        }
    }

    /// Select `id` if it is not already selected. Returns true if it was added.
    pub fn add(&mut self, id: CategoryId) -> bool {
        self.touched = true;
        if !self.working.add(id.clone()) {
            return false;
        }
        // Re-adding something removed earlier in the same dispatch cancels
        // out, unless it came back at a different position.
        let back_in_place =
            self.before.iter().position(|b| *b == id) == Some(self.working.len() - 1);
        match self.removed.iter().position(|r| *r == id) {
            Some(pos) if back_in_place => {
                self.removed.remove(pos);
            }
            _ => self.added.push(id),
        }
        true
    }

    /// Unselect `id`. Returns true if it was selected.
    pub fn remove(&mut self, id: &str) -> bool {
        self.touched = true;
        if !self.working.remove(id) {
            return false;
        }
        if let Some(pos) = self.added.iter().position(|a| a.as_str() == id) {
            self.added.remove(pos);
        } else if let Ok(id) = CategoryId::new(id) {
            self.removed.push(id);
        }
        true
    }

    pub fn contains(&self, id: &str) -> bool {
        self.working.contains(id)
    }

    /// The selection as this dispatch currently sees it.
    pub fn selection(&self) -> &SelectionSet {
        &*self.working
    }
}

/// Handle returned by [`SelectionManager::subscribe`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

impl SubscriptionId {
    pub fn as_u64(self) -> u64 {
        self.0
    }

    pub fn from_u64(raw: u64) -> Self {
        Self(raw)
    }
}

type Observer = Rc<dyn Fn(&SelectionChange)>;

/// Guarded owner of the category selection.
#[derive(Default)]
pub struct SelectionManager {
    selection: RefCell<SelectionSet>,
    guard: ProcessingGuard,
    observers: RefCell<Vec<(SubscriptionId, Observer)>>,
    next_subscription: Cell<u64>,
}

impl std::fmt::Debug for SelectionManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SelectionManager")
            .field("selection", &self.selection.borrow())
            .field("guard", &self.guard.state())
            .field("observers", &self.observers.borrow().len())
            .finish()
    }
}

impl SelectionManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a manager shared between bindings.
    pub fn shared() -> Rc<Self> {
        Rc::new(Self::new())
    }

    // === Reads ===

    /// Snapshot of the committed selection.
    pub fn selected(&self) -> Vec<CategoryId> {
        self.selection.borrow().to_vec()
    }

    pub fn contains(&self, id: &str) -> bool {
        self.selection.borrow().contains(id)
    }

    pub fn len(&self) -> usize {
        self.selection.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.selection.borrow().is_empty()
    }

    pub fn guard_state(&self) -> GuardState {
        self.guard.state()
    }

    // === Guarded mutation ===

    /// Run `handler` under the processing guard.
    ///
    /// Returns [`Dispatch::Suppressed`] without calling `handler` if another
    /// dispatch is in flight. A handler that panics commits nothing; the
    /// guard is lowered during unwinding.
    pub fn guarded_dispatch<R>(
        &self,
        handler: impl FnOnce(&mut SelectionTxn<'_>) -> R,
    ) -> Dispatch<R> {
        self.dispatch_from(None, |txn| (true, handler(txn)))
    }

    /// Like [`guarded_dispatch`](Self::guarded_dispatch), but only commits
    /// when the handler returns `Ok`.
    pub fn try_guarded_dispatch<T, E>(
        &self,
        handler: impl FnOnce(&mut SelectionTxn<'_>) -> Result<T, E>,
    ) -> Dispatch<Result<T, E>> {
        self.dispatch_from(None, |txn| {
            let result = handler(txn);
            (result.is_ok(), result)
        })
    }

    /// Guarded add. Completes with true if `id` was newly selected.
    pub fn select(&self, id: CategoryId) -> Dispatch<bool> {
        self.guarded_dispatch(|txn| txn.add(id))
    }

    /// Guarded remove. Completes with true if `id` was selected before.
    pub fn unselect(&self, id: &str) -> Dispatch<bool> {
        self.guarded_dispatch(|txn| txn.remove(id))
    }

    pub(crate) fn dispatch_from<R>(
        &self,
        source: Option<TriggerKind>,
        handler: impl FnOnce(&mut SelectionTxn<'_>) -> (bool, R),
    ) -> Dispatch<R> {
        let Some(_token) = self.guard.try_enter() else {
            tracing::debug!(?source, "selection busy, trigger suppressed");
            return Dispatch::Suppressed;
        };

        let mut working = self.selection.borrow().clone();
        let mut txn = SelectionTxn::new(&mut working);
        let (commit, result) = handler(&mut txn);
        let SelectionTxn {
            added,
            removed,
            touched,
            ..
        } = txn;

        if commit && touched {
            let change = SelectionChange {
                added,
                removed,
                selected: working.to_vec(),
                source,
            };
            *self.selection.borrow_mut() = working;

            let names: Vec<&str> = change.selected.iter().map(CategoryId::as_str).collect();
            tracing::debug!(?source, selected = ?names, "selected categories");

            self.notify(&change);
        }

        Dispatch::Completed(result)
    }

    // === Subscriptions ===

    /// Register `observer` to be called after every committed dispatch.
    ///
    /// Observers run in registration order.
    pub fn subscribe(&self, observer: impl Fn(&SelectionChange) + 'static) -> SubscriptionId {
        let id = SubscriptionId(self.next_subscription.get());
        self.next_subscription.set(id.0 + 1);
        self.observers.borrow_mut().push((id, Rc::new(observer)));
        id
    }

    /// Remove a subscription. Returns false if it was already gone.
    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        let mut observers = self.observers.borrow_mut();
        let before = observers.len();
        observers.retain(|(existing, _)| *existing != id);
        observers.len() != before
    }

    fn notify(&self, change: &SelectionChange) {
        // Observers may (un)subscribe while being notified.
        let observers: Vec<Observer> = self
            .observers
            .borrow()
            .iter()
            .map(|(_, observer)| observer.clone())
            .collect();

        for observer in observers {
            observer(change);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn id(s: &str) -> CategoryId {
        CategoryId::new(s).unwrap()
    }

    fn names(manager: &SelectionManager) -> Vec<String> {
        manager.selected().iter().map(|c| c.to_string()).collect()
    }

    #[test]
    fn test_select_and_unselect() {
        let manager = SelectionManager::new();

        assert_eq!(manager.select(id("cat-1")), Dispatch::Completed(true));
        assert_eq!(manager.select(id("cat-2")), Dispatch::Completed(true));
        assert_eq!(manager.select(id("cat-1")), Dispatch::Completed(false));
        assert_eq!(names(&manager), vec!["cat-1", "cat-2"]);

        assert_eq!(manager.unselect("cat-1"), Dispatch::Completed(true));
        assert_eq!(manager.unselect("cat-99"), Dispatch::Completed(false));
        assert_eq!(names(&manager), vec!["cat-2"]);
        assert_eq!(manager.guard_state(), GuardState::Idle);
    }

    #[test]
    fn test_reentrant_dispatch_is_suppressed() {
        let manager = SelectionManager::new();
        manager.select(id("keep")).completed().unwrap();

        let outcome = manager.guarded_dispatch(|txn| {
            txn.add(id("outer"));
            let inner_add = manager.select(id("inner"));
            let inner_remove = manager.unselect("keep");
            (inner_add, inner_remove)
        });

        let (inner_add, inner_remove) = outcome.completed().unwrap();
        assert!(inner_add.is_suppressed());
        assert!(inner_remove.is_suppressed());
        assert_eq!(names(&manager), vec!["keep", "outer"]);
    }

    #[test]
    fn test_suppressed_handler_never_runs() {
        let manager = SelectionManager::new();
        let ran = Cell::new(false);

        manager
            .guarded_dispatch(|_| {
                let inner = manager.guarded_dispatch(|_| ran.set(true));
                assert_eq!(inner, Dispatch::Suppressed);
                assert_eq!(manager.guard_state(), GuardState::Processing);
            })
            .completed()
            .unwrap();

        assert!(!ran.get());
    }

    #[test]
    fn test_guard_released_after_error() {
        let manager = SelectionManager::new();

        let outcome = manager.try_guarded_dispatch(|txn| {
            txn.add(id("half-done"));
            Err::<(), _>("handler failed")
        });

        assert_eq!(outcome, Dispatch::Completed(Err("handler failed")));
        assert_eq!(manager.guard_state(), GuardState::Idle);
        // Failed handlers do not commit.
        assert!(manager.is_empty());

        assert!(manager.select(id("next")).is_completed());
        assert_eq!(names(&manager), vec!["next"]);
    }

    #[test]
    fn test_guard_released_after_panic() {
        let manager = SelectionManager::new();
        manager.select(id("before")).completed().unwrap();

        let result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
            let _ = manager.guarded_dispatch(|txn| {
                txn.add(id("lost"));
                panic!("handler panicked");
            });
        }));

        assert!(result.is_err());
        assert_eq!(manager.guard_state(), GuardState::Idle);
        assert_eq!(names(&manager), vec!["before"]);
        assert!(manager.select(id("after")).is_completed());
    }

    #[test]
    fn test_reads_inside_handler_see_committed_state() {
        let manager = SelectionManager::new();
        manager.select(id("a")).completed().unwrap();

        manager
            .guarded_dispatch(|txn| {
                txn.add(id("b"));
                assert!(txn.contains("b"));
                assert!(!manager.contains("b"));
                assert_eq!(manager.len(), 1);
            })
            .completed()
            .unwrap();

        assert!(manager.contains("b"));
    }

    #[test]
    fn test_observers_notified_in_order() {
        let manager = SelectionManager::new();
        let calls = Rc::new(RefCell::new(Vec::new()));

        let first = calls.clone();
        manager.subscribe(move |change| first.borrow_mut().push(("first", change.clone())));
        let second = calls.clone();
        manager.subscribe(move |change| second.borrow_mut().push(("second", change.clone())));

        manager.select(id("cat-1")).completed().unwrap();

        let calls = calls.borrow();
        assert_eq!(calls.len(), 2);
        assert_eq!(calls[0].0, "first");
        assert_eq!(calls[1].0, "second");
        assert_eq!(calls[0].1.added, vec![id("cat-1")]);
        assert_eq!(calls[0].1.selected, vec![id("cat-1")]);
        assert_eq!(calls[0].1.source, None);
    }

    #[test]
    fn test_noop_dispatch_still_notifies() {
        let manager = SelectionManager::new();
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = seen.clone();
        manager.subscribe(move |change| sink.borrow_mut().push(change.is_noop()));

        manager.select(id("x")).completed().unwrap();
        manager.select(id("x")).completed().unwrap();
        manager.unselect("missing").completed().unwrap();
        // Handlers that never call add/remove are silent.
        manager.guarded_dispatch(|_| ()).completed().unwrap();

        assert_eq!(*seen.borrow(), vec![false, true, true]);
    }

    #[test]
    fn test_observer_triggered_dispatch_is_suppressed() {
        let manager = SelectionManager::shared();
        let echoes = Rc::new(Cell::new(0));

        let weak = Rc::downgrade(&manager);
        let counter = echoes.clone();
        manager.subscribe(move |_| {
            if let Some(manager) = weak.upgrade() {
                if manager.select(id("echo")).is_suppressed() {
                    counter.set(counter.get() + 1);
                }
            }
        });

        manager.select(id("cat-1")).completed().unwrap();

        assert_eq!(echoes.get(), 1);
        assert_eq!(names(&manager), vec!["cat-1"]);
    }

    #[test]
    fn test_unsubscribe() {
        let manager = SelectionManager::new();
        let count = Rc::new(Cell::new(0));
        let c = count.clone();
        let sub = manager.subscribe(move |_| c.set(c.get() + 1));

        manager.select(id("a")).completed().unwrap();
        assert!(manager.unsubscribe(sub));
        assert!(!manager.unsubscribe(sub));
        manager.select(id("b")).completed().unwrap();

        assert_eq!(count.get(), 1);
    }

    #[test]
    fn test_add_then_remove_in_one_dispatch_cancels() {
        let manager = SelectionManager::new();
        let last = Rc::new(RefCell::new(None));
        let sink = last.clone();
        manager.subscribe(move |change| *sink.borrow_mut() = Some(change.clone()));

        manager
            .guarded_dispatch(|txn| {
                txn.add(id("temp"));
                txn.remove("temp");
            })
            .completed()
            .unwrap();

        let change = last.borrow().clone().unwrap();
        assert!(change.is_noop());
        assert!(change.selected.is_empty());
    }

    #[test]
    fn test_remove_then_readd_reports_reorder() {
        let manager = SelectionManager::new();
        manager.select(id("a")).completed().unwrap();
        manager.select(id("b")).completed().unwrap();
        let last = Rc::new(RefCell::new(None));
        let sink = last.clone();
        manager.subscribe(move |change| *sink.borrow_mut() = Some(change.clone()));

        manager
            .guarded_dispatch(|txn| {
                txn.remove("a");
                txn.add(id("a"));
            })
            .completed()
            .unwrap();

        let change = last.borrow().clone().unwrap();
        assert_eq!(names(&manager), vec!["b", "a"]);
        assert!(!change.is_noop());
        assert_eq!(change.added, vec![id("a")]);
        assert_eq!(change.removed, vec![id("a")]);
    }

    #[test]
    fn test_remove_then_readd_in_place_cancels() {
        let manager = SelectionManager::new();
        manager.select(id("a")).completed().unwrap();
        manager.select(id("b")).completed().unwrap();
        let last = Rc::new(RefCell::new(None));
        let sink = last.clone();
        manager.subscribe(move |change| *sink.borrow_mut() = Some(change.clone()));

        manager
            .guarded_dispatch(|txn| {
                txn.remove("b");
                txn.add(id("b"));
            })
            .completed()
            .unwrap();

        let change = last.borrow().clone().unwrap();
        assert_eq!(names(&manager), vec!["a", "b"]);
        assert!(change.is_noop());
    }

    #[test]
    fn test_notification_stream_snapshot() {
        let manager = SelectionManager::new();
        let log = Rc::new(RefCell::new(Vec::<String>::new()));
        let sink = log.clone();
        manager.subscribe(move |change| {
            let join = |ids: &[CategoryId]| {
                if ids.is_empty() {
                    "none".to_string()
                } else {
                    ids.iter().map(|c| c.as_str()).collect::<Vec<_>>().join(" ")
                }
            };
            sink.borrow_mut().push(format!(
                "added {} removed {} selected {}",
                join(&change.added),
                join(&change.removed),
                join(&change.selected),
            ));
        });

        manager.select(id("cat-1")).completed().unwrap();
        manager.select(id("cat-2")).completed().unwrap();
        manager.select(id("cat-1")).completed().unwrap();
        manager.unselect("cat-1").completed().unwrap();
        manager.unselect("cat-99").completed().unwrap();

        let log = log.borrow().clone();
        insta::assert_yaml_snapshot!("notification_stream", log);
    }
}
