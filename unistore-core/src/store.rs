//! Centralized state store with reducer pattern

use std::cell::{Cell, RefCell};
use std::fmt;
use std::rc::{Rc, Weak};

use crate::action::{Action, Dispatched, INIT_ACTION};
use crate::error::StoreError;

/// A pure state transition: `(previous state, action) -> next state`
///
/// `state` is `None` only on the first call, when the reducer must supply its
/// own default. Actions a reducer does not recognize (including
/// [`Dispatched::Init`]) must yield the incoming state unchanged.
///
/// Implemented for every `Fn(Option<&S>, Dispatched<'_, A>) -> S`, so plain
/// functions are reducers:
///
/// ```
/// use unistore_core::{Action, Dispatched};
///
/// #[derive(Clone, Debug)]
/// enum CounterAction {
///     Increment,
///     Decrement,
/// }
/// # impl Action for CounterAction {
/// #     fn name(&self) -> &'static str { "" }
/// # }
///
/// fn counter(state: Option<&i32>, action: Dispatched<'_, CounterAction>) -> i32 {
///     let state = state.copied().unwrap_or(0);
///     match action.action() {
///         Some(CounterAction::Increment) => state + 1,
///         Some(CounterAction::Decrement) => state - 1,
///         None => state,
///     }
/// }
/// ```
pub trait Reducer<S, A> {
    fn reduce(&self, state: Option<&S>, action: Dispatched<'_, A>) -> S;
}

impl<S, A, F> Reducer<S, A> for F
where
    F: Fn(Option<&S>, Dispatched<'_, A>) -> S,
{
    #[inline]
    fn reduce(&self, state: Option<&S>, action: Dispatched<'_, A>) -> S {
        self(state, action)
    }
}

/// Pin a closure to the reducer signature.
///
/// Closures passed straight to a generic `R: Reducer<S, A>` parameter cannot
/// infer their higher-ranked argument types; routing them through this
/// function fixes the signature.
#[inline]
pub fn reducer_fn<S, A, F>(f: F) -> F
where
    F: Fn(Option<&S>, Dispatched<'_, A>) -> S,
{
    f
}

type Listener = Rc<dyn Fn()>;

#[derive(Default)]
struct Listeners {
    next_id: u64,
    entries: Vec<(u64, Listener)>,
}

impl Listeners {
    fn snapshot(&self) -> Vec<Listener> {
        self.entries.iter().map(|(_, l)| Rc::clone(l)).collect()
    }
}

struct StoreInner<S, A> {
    state: RefCell<Rc<S>>,
    reducer: Box<dyn Reducer<S, A>>,
    listeners: Rc<RefCell<Listeners>>,
    reducing: Cell<bool>,
}

/// Clears the `reducing` flag when dropped, including during a reducer panic.
struct ReducingGuard<'a>(&'a Cell<bool>);

impl<'a> ReducingGuard<'a> {
    fn enter(flag: &'a Cell<bool>) -> Self {
        flag.set(true);
        Self(flag)
    }
}

impl Drop for ReducingGuard<'_> {
    fn drop(&mut self) {
        self.0.set(false);
    }
}

/// Centralized state store with Redux-like reducer pattern
///
/// The store holds the application state and provides a single point
/// for state transitions through the `dispatch` method. Every successful
/// dispatch notifies subscribers in registration order.
///
/// `Store` is a handle: cloning it is cheap and every clone addresses the same
/// state. Pass it explicitly to whatever needs read or dispatch access.
///
/// # Type Parameters
/// * `S` - The application state type
/// * `A` - The action type (must implement `Action`)
///
/// # Example
/// ```
/// use std::cell::Cell;
/// use std::rc::Rc;
/// use unistore_core::{Action, Dispatched, Store};
///
/// #[derive(Clone, Debug)]
/// enum CounterAction {
///     Increment,
/// }
///
/// impl Action for CounterAction {
///     fn name(&self) -> &'static str {
///         "INCREMENT"
///     }
/// }
///
/// fn counter(state: Option<&i32>, action: Dispatched<'_, CounterAction>) -> i32 {
///     let state = state.copied().unwrap_or(0);
///     match action.action() {
///         Some(CounterAction::Increment) => state + 1,
///         None => state,
///     }
/// }
///
/// let store = Store::new(counter);
/// let renders = Rc::new(Cell::new(0));
/// let _subscription = store.subscribe({
///     let renders = Rc::clone(&renders);
///     move || renders.set(renders.get() + 1)
/// });
///
/// store.dispatch(CounterAction::Increment).unwrap();
/// assert_eq!(*store.state(), 1);
/// assert_eq!(renders.get(), 1);
/// ```
pub struct Store<S, A> {
    inner: Rc<StoreInner<S, A>>,
}

impl<S: 'static, A: Action> Store<S, A> {
    /// Create a store, letting the reducer supply the initial state
    pub fn new<R>(reducer: R) -> Self
    where
        R: Reducer<S, A> + 'static,
    {
        Self::create(Box::new(reducer), None)
    }

    /// Create a store seeded with `state`
    ///
    /// The seed still goes through the reducer once with the init action, so
    /// reducers can fill in or normalize anything the seed leaves out.
    pub fn with_state<R>(reducer: R, state: S) -> Self
    where
        R: Reducer<S, A> + 'static,
    {
        Self::create(Box::new(reducer), Some(state))
    }

    fn create(reducer: Box<dyn Reducer<S, A>>, seed: Option<S>) -> Self {
        let state = reducer.reduce(seed.as_ref(), Dispatched::Init);
        tracing::debug!(action = INIT_ACTION, seeded = seed.is_some(), "Store initialized");

        Self {
            inner: Rc::new(StoreInner {
                state: RefCell::new(Rc::new(state)),
                reducer,
                listeners: Rc::default(),
                reducing: Cell::new(false),
            }),
        }
    }

    /// Get the current state
    ///
    /// Returns the value as held, without recomputation. Inside a reducer this
    /// is still the pre-dispatch state.
    pub fn state(&self) -> Rc<S> {
        Rc::clone(&self.inner.state.borrow())
    }

    /// Dispatch an action to the store
    ///
    /// Runs the root reducer, replaces the state with its result, then calls
    /// every subscriber registered when notification starts, in registration
    /// order. Subscribers may dispatch again; subscribing or unsubscribing
    /// during a notification pass only affects later passes.
    ///
    /// Returns the action unchanged.
    ///
    /// # Errors
    ///
    /// [`StoreError::DispatchInReducer`] if called from inside the reducer.
    ///
    /// # Panics
    ///
    /// A panicking reducer propagates here, leaving the state untouched and
    /// notifying nobody. A panicking subscriber propagates here after the new
    /// state is stored, and the subscribers after it are not called.
    pub fn dispatch(&self, action: A) -> Result<A, StoreError> {
        let inner = &*self.inner;
        if inner.reducing.get() {
            return Err(StoreError::DispatchInReducer {
                action: action.name(),
            });
        }

        let current = self.state();
        let next = {
            let _guard = ReducingGuard::enter(&inner.reducing);
            inner
                .reducer
                .reduce(Some(current.as_ref()), Dispatched::Action(&action))
        };
        *inner.state.borrow_mut() = Rc::new(next);

        let listeners = inner.listeners.borrow().snapshot();
        tracing::debug!(
            action = %action.name(),
            listeners = listeners.len(),
            "Action processed"
        );
        for listener in listeners {
            listener();
        }

        Ok(action)
    }

    /// Register a callback run after every dispatch
    ///
    /// Registering the same callback twice yields two independent entries.
    pub fn subscribe<F>(&self, listener: F) -> Subscription
    where
        F: Fn() + 'static,
    {
        let mut listeners = self.inner.listeners.borrow_mut();
        let id = listeners.next_id;
        listeners.next_id += 1;
        listeners.entries.push((id, Rc::new(listener)));
        tracing::trace!(id, total = listeners.entries.len(), "Listener subscribed");

        Subscription {
            id,
            listeners: Rc::downgrade(&self.inner.listeners),
        }
    }

    /// Number of registered subscribers
    pub fn listener_count(&self) -> usize {
        self.inner.listeners.borrow().entries.len()
    }

    /// Non-owning handle, for subscribers that need to reach back into the
    /// store without keeping it alive
    pub fn downgrade(&self) -> WeakStore<S, A> {
        WeakStore {
            inner: Rc::downgrade(&self.inner),
        }
    }
}

impl<S, A> Clone for Store<S, A> {
    fn clone(&self) -> Self {
        Self {
            inner: Rc::clone(&self.inner),
        }
    }
}

impl<S: fmt::Debug, A> fmt::Debug for Store<S, A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Store")
            .field("state", &self.inner.state.borrow())
            .field("listeners", &self.inner.listeners.borrow().entries.len())
            .finish()
    }
}

/// A [`Store`] handle that does not keep the store alive
pub struct WeakStore<S, A> {
    inner: Weak<StoreInner<S, A>>,
}

impl<S, A> WeakStore<S, A> {
    /// Recover a strong handle, if the store still exists
    pub fn upgrade(&self) -> Option<Store<S, A>> {
        self.inner.upgrade().map(|inner| Store { inner })
    }
}

impl<S, A> Clone for WeakStore<S, A> {
    fn clone(&self) -> Self {
        Self {
            inner: Weak::clone(&self.inner),
        }
    }
}

impl<S, A> fmt::Debug for WeakStore<S, A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WeakStore")
            .field("alive", &(self.inner.strong_count() > 0))
            .finish()
    }
}

/// Handle returned by [`Store::subscribe`]
///
/// Dropping it does not unsubscribe; call [`unsubscribe`](Self::unsubscribe).
#[derive(Clone)]
pub struct Subscription {
    id: u64,
    listeners: Weak<RefCell<Listeners>>,
}

impl Subscription {
    /// Remove the callback from the store
    ///
    /// Calling this again, or after the store is gone, does nothing.
    pub fn unsubscribe(&self) {
        let Some(listeners) = self.listeners.upgrade() else {
            return;
        };
        let mut listeners = listeners.borrow_mut();
        let before = listeners.entries.len();
        listeners.entries.retain(|(id, _)| *id != self.id);
        if listeners.entries.len() != before {
            tracing::trace!(id = self.id, "Listener unsubscribed");
        }
    }

    /// Whether the callback is still registered
    pub fn is_active(&self) -> bool {
        self.listeners
            .upgrade()
            .is_some_and(|l| l.borrow().entries.iter().any(|(id, _)| *id == self.id))
    }
}

impl fmt::Debug for Subscription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Subscription")
            .field("id", &self.id)
            .field("active", &self.is_active())
            .finish()
    }
}
