//! Core traits and types for unistore
//!
//! This crate provides the foundational abstractions for unidirectional data
//! flow: one immutable application state, pure reducers, and subscribers that
//! re-read the state after every change.
//!
//! # Core Concepts
//!
//! - **Action**: Values that describe an intended state change
//! - **Reducer**: Pure `(state, action) -> state` transition
//! - **Store**: Holds the current state, dispatches actions, notifies subscribers
//! - **Composer**: Builds one root reducer from per-slice reducers
//!
//! # Basic Example
//!
//! ```ignore
//! use unistore::prelude::*;
//!
//! #[derive(Action, Clone, Debug)]
//! #[action(rename_all = "SCREAMING_SNAKE_CASE")]
//! enum CounterAction {
//!     Increment,
//!     Decrement,
//! }
//!
//! fn counter(state: Option<&i32>, action: Dispatched<'_, CounterAction>) -> i32 {
//!     let state = state.copied().unwrap_or(0);
//!     match action.action() {
//!         Some(CounterAction::Increment) => state + 1,
//!         Some(CounterAction::Decrement) => state - 1,
//!         None => state,
//!     }
//! }
//!
//! let store = Store::new(counter);
//! let subscription = store.subscribe(|| println!("changed"));
//! store.dispatch(CounterAction::Increment)?;
//! assert_eq!(*store.state(), 1);
//! subscription.unsubscribe();
//! ```
//!
//! # Threading
//!
//! A store lives on one thread and is driven by one control flow: it is built
//! on `Rc` and is neither `Send` nor `Sync`. Work on other threads or tasks
//! sends actions back over a channel, and the owning loop dispatches them.
//!
//! # Features
//!
//! - `terminal`: [`spawn_event_poller`](terminal::spawn_event_poller) reads
//!   crossterm input on a tokio task and forwards it over a channel.

pub mod action;
pub mod combine;
pub mod error;
pub mod store;
pub mod testing;

#[cfg(feature = "terminal")]
pub mod terminal;

pub use action::{Action, Dispatched, INIT_ACTION};
pub use combine::{combine, slice, Combined, SliceReducer, Slices};
pub use error::StoreError;
pub use store::{reducer_fn, Reducer, Store, Subscription, WeakStore};

pub use testing::{replay, CallLog, TestHarness};

#[cfg(feature = "terminal")]
pub use terminal::{spawn_event_poller, TermEvent};

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::action::{Action, Dispatched, INIT_ACTION};
    pub use crate::combine::{combine, slice, Combined, Slices};
    pub use crate::combine_reducers;
    pub use crate::error::StoreError;
    pub use crate::store::{reducer_fn, Reducer, Store, Subscription, WeakStore};
}
