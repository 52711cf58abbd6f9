//! Test utilities for unistore applications
//!
//! - [`TestHarness`]: a store plus an action channel, recording every dispatch
//! - [`CallLog`]: ordered record of subscriber invocations
//! - [`replay`]: fold a reducer over a sequence of actions
//! - Assertion macros for verifying dispatched actions
//!
//! # Example
//!
//! ```ignore
//! use unistore::testing::TestHarness;
//!
//! let mut harness = TestHarness::new(counter);
//!
//! // Queue actions the way a view or action creator would
//! harness.emit(CounterAction::Increment);
//! harness.emit(CounterAction::Increment);
//! harness.flush().unwrap();
//!
//! assert_eq!(*harness.state(), 2);
//! assert_eq!(harness.notification_count(), 2);
//! assert_dispatched!(harness.dispatched(), CounterAction::Increment);
//! ```

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use tokio::sync::mpsc;

use crate::action::{Action, Dispatched};
use crate::error::StoreError;
use crate::store::{Reducer, Store, Subscription};

/// Fold `reducer` over `actions`, starting from the init action.
///
/// The result is what a store built from the same reducer and seed holds after
/// dispatching the same actions in order.
pub fn replay<'a, S, A, R>(reducer: &R, seed: Option<S>, actions: impl IntoIterator<Item = &'a A>) -> S
where
    R: Reducer<S, A> + ?Sized,
    A: 'a,
{
    let init = reducer.reduce(seed.as_ref(), Dispatched::Init);
    actions.into_iter().fold(init, |state, action| {
        reducer.reduce(Some(&state), Dispatched::Action(action))
    })
}

/// Records which subscribers ran, in order.
///
/// Clones share the same log.
#[derive(Debug, Clone, Default)]
pub struct CallLog {
    calls: Rc<RefCell<Vec<&'static str>>>,
}

impl CallLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// A subscriber callback that records `label` each time it runs
    pub fn listener(&self, label: &'static str) -> impl Fn() + 'static {
        let log = self.clone();
        move || log.record(label)
    }

    pub fn record(&self, label: &'static str) {
        self.calls.borrow_mut().push(label);
    }

    pub fn calls(&self) -> Vec<&'static str> {
        self.calls.borrow().clone()
    }

    pub fn count(&self, label: &str) -> usize {
        self.calls.borrow().iter().filter(|c| **c == label).count()
    }

    pub fn clear(&self) {
        self.calls.borrow_mut().clear();
    }
}

/// Store-backed test harness.
///
/// Provides:
/// - A real [`Store`] built from the reducer under test
/// - An action channel for actions emitted by handlers and action creators
/// - A log of everything dispatched through the harness
/// - A count of subscriber notifications
///
/// # Type Parameters
///
/// - `S`: The state type
/// - `A`: The action type (must implement [`Action`])
pub struct TestHarness<S, A: Action> {
    store: Store<S, A>,
    tx: mpsc::UnboundedSender<A>,
    rx: mpsc::UnboundedReceiver<A>,
    dispatched: Vec<A>,
    notifications: Rc<Cell<usize>>,
    subscription: Subscription,
}

impl<S: 'static, A: Action> TestHarness<S, A> {
    /// Create a harness whose store takes its initial state from the reducer
    pub fn new<R>(reducer: R) -> Self
    where
        R: Reducer<S, A> + 'static,
    {
        Self::from_store(Store::new(reducer))
    }

    /// Create a harness whose store is seeded with `state`
    pub fn with_state<R>(reducer: R, state: S) -> Self
    where
        R: Reducer<S, A> + 'static,
    {
        Self::from_store(Store::with_state(reducer, state))
    }

    /// Wrap an existing store
    pub fn from_store(store: Store<S, A>) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        let notifications = Rc::new(Cell::new(0));
        let subscription = store.subscribe({
            let notifications = Rc::clone(&notifications);
            move || notifications.set(notifications.get() + 1)
        });

        Self {
            store,
            tx,
            rx,
            dispatched: Vec::new(),
            notifications,
            subscription,
        }
    }

    pub fn store(&self) -> &Store<S, A> {
        &self.store
    }

    pub fn state(&self) -> Rc<S> {
        self.store.state()
    }

    /// Get a clone of the action sender for passing to handlers.
    pub fn sender(&self) -> mpsc::UnboundedSender<A> {
        self.tx.clone()
    }

    /// Queue an action without dispatching it.
    pub fn emit(&self, action: A) {
        let _ = self.tx.send(action);
    }

    /// Drain queued actions without dispatching them.
    pub fn drain_emitted(&mut self) -> Vec<A> {
        let mut actions = Vec::new();
        while let Ok(action) = self.rx.try_recv() {
            actions.push(action);
        }
        actions
    }

    /// Dispatch directly to the store, recording the action.
    pub fn dispatch(&mut self, action: A) -> Result<(), StoreError> {
        let action = self.store.dispatch(action)?;
        self.dispatched.push(action);
        Ok(())
    }

    /// Dispatch every queued action in order. Returns how many were dispatched.
    pub fn flush(&mut self) -> Result<usize, StoreError> {
        let queued = self.drain_emitted();
        let count = queued.len();
        for action in queued {
            self.dispatch(action)?;
        }
        Ok(count)
    }

    /// Every action dispatched through the harness, oldest first.
    pub fn dispatched(&self) -> &[A] {
        &self.dispatched
    }

    /// How many times the store notified subscribers.
    pub fn notification_count(&self) -> usize {
        self.notifications.get()
    }
}

impl<S, A: Action> Drop for TestHarness<S, A> {
    fn drop(&mut self) {
        self.subscription.unsubscribe();
    }
}

/// Assert that a matching action was dispatched.
///
/// # Example
///
/// ```ignore
/// assert_dispatched!(harness.dispatched(), TodoAction::AddTodo { .. });
/// assert_dispatched!(harness.dispatched(), TodoAction::ToggleTodo { id } if *id == 1);
/// ```
#[macro_export]
macro_rules! assert_dispatched {
    ($actions:expr, $pattern:pat $(if $guard:expr)?) => {
        assert!(
            $actions.iter().any(|a| matches!(a, $pattern $(if $guard)?)),
            "Expected action matching `{}` to be dispatched, but got: {:?}",
            stringify!($pattern),
            $actions
        );
    };
}

/// Assert that no matching action was dispatched.
#[macro_export]
macro_rules! assert_not_dispatched {
    ($actions:expr, $pattern:pat $(if $guard:expr)?) => {
        assert!(
            !$actions.iter().any(|a| matches!(a, $pattern $(if $guard)?)),
            "Expected action matching `{}` NOT to be dispatched, but it was: {:?}",
            stringify!($pattern),
            $actions
        );
    };
}

/// Count how many dispatched actions match a pattern.
#[macro_export]
macro_rules! count_dispatched {
    ($actions:expr, $pattern:pat $(if $guard:expr)?) => {
        $actions.iter().filter(|a| matches!(a, $pattern $(if $guard)?)).count()
    };
}
