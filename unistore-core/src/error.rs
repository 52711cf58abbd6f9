//! Errors surfaced by the store and the reducer composer

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    /// `dispatch` was called while the root reducer was running.
    ///
    /// The nested action is not applied; the outer dispatch is unaffected.
    #[error("reducers may not dispatch actions (attempted to dispatch `{action}`)")]
    DispatchInReducer { action: &'static str },

    /// The same key appears more than once in a slice mapping.
    #[error("slice `{0}` is registered more than once")]
    DuplicateSlice(String),
}
