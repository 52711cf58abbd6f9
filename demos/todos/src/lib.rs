//! To-do list on a unistore Store
//!
//! - [`state`]: `TodoState` with a todo list slice and a visibility filter slice
//! - [`action`]: `ADD_TODO`, `TOGGLE_TODO`, `SET_VISIBILITY_FILTER` and their creators
//! - [`reducer`]: one reducer per slice, combined into [`reducer::todo_app`]
//! - [`components`] render from props; [`containers`] bind them to the store
//!   with [`connect`](connect::connect)
//! - [`headless`]: replay a script and print every state as JSON

pub mod action;
pub mod app;
pub mod components;
pub mod connect;
pub mod containers;
pub mod headless;
pub mod logging;
pub mod reducer;
pub mod selectors;
pub mod state;

pub use action::{TodoAction, TodoIds};
pub use app::{Flow, Focus, TodoApp};
pub use connect::{connect, StoreContext};
pub use containers::{TodoContext, TodoStore};
pub use reducer::todo_app;
pub use state::{Todo, TodoState, VisibilityFilter};
