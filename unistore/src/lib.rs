//! unistore: unidirectional state management
//!
//! Like Redux, for Rust. One store holds the whole application state, every
//! change is an action run through a pure reducer, and views re-read the
//! state when the store notifies them.
//!
//! # Example
//! ```ignore
//! use unistore::prelude::*;
//!
//! #[derive(Action, Clone, Debug)]
//! #[action(rename_all = "SCREAMING_SNAKE_CASE")]
//! enum TodoAction {
//!     AddTodo { id: u64, text: String },
//!     ToggleTodo { id: u64 },
//! }
//!
//! let store = Store::new(combine_reducers!(TodoState {
//!     todos: todos,
//!     visibility_filter: visibility_filter,
//! }));
//! store.dispatch(TodoAction::AddTodo { id: 0, text: "Learn Redux".into() })?;
//! ```

// Re-export everything from core
pub use unistore_core::*;

// Re-export derive macros
pub use unistore_macros::Action;

/// Prelude for convenient imports
pub mod prelude {
    // Traits
    pub use unistore_core::{Action, Reducer};

    // Store
    pub use unistore_core::{
        reducer_fn, Dispatched, Store, StoreError, Subscription, WeakStore, INIT_ACTION,
    };

    // Composition
    pub use unistore_core::{combine, combine_reducers, slice, Combined, Slices};

    // Derive macros
    pub use unistore_macros::Action;
}
