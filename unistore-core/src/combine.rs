//! Reducer composition: one root reducer built from per-slice reducers
//!
//! Two forms are provided:
//!
//! - [`combine_reducers!`](crate::combine_reducers) for a struct state, where
//!   every field is a slice. The compiler enforces unique keys, and each field
//!   reducer only ever sees its own field.
//! - [`combine`] for a runtime mapping of string keys to reducers over a
//!   common slice type, producing [`Slices`].
//!
//! Either way every slice reducer runs on every action, including the init
//! action and actions it does not handle. Routing actions only to the slices
//! that "care" would skip default-state initialization.
//!
//! # Example
//!
//! ```
//! use unistore_core::{combine_reducers, Action, Dispatched, Store};
//!
//! #[derive(Clone, Debug)]
//! enum AppAction {
//!     Increment,
//!     Rename(String),
//! }
//! # impl Action for AppAction {
//! #     fn name(&self) -> &'static str { "" }
//! # }
//!
//! #[derive(Debug, PartialEq)]
//! struct AppState {
//!     count: i64,
//!     title: String,
//! }
//!
//! fn count(state: Option<&i64>, action: Dispatched<'_, AppAction>) -> i64 {
//!     let state = state.copied().unwrap_or(0);
//!     match action.action() {
//!         Some(AppAction::Increment) => state + 1,
//!         _ => state,
//!     }
//! }
//!
//! fn title(state: Option<&String>, action: Dispatched<'_, AppAction>) -> String {
//!     match action.action() {
//!         Some(AppAction::Rename(title)) => title.clone(),
//!         _ => state.cloned().unwrap_or_default(),
//!     }
//! }
//!
//! let store = Store::new(combine_reducers!(AppState {
//!     count: count,
//!     title: title,
//! }));
//! store.dispatch(AppAction::Increment).unwrap();
//! assert_eq!(store.state().count, 1);
//! assert_eq!(store.state().title, "");
//! ```

use std::collections::HashSet;
use std::fmt;
use std::ops::Index;

use serde::ser::{Serialize, SerializeMap, Serializer};

use crate::action::Dispatched;
use crate::error::StoreError;
use crate::store::Reducer;

/// Build a root reducer for a struct state from one reducer per field.
///
/// ```ignore
/// let root = combine_reducers!(TodoState {
///     todos: todos,
///     visibility_filter: visibility_filter,
/// });
/// ```
///
/// Each field reducer is called as `reducer(state.map(|s| &s.field), action)`,
/// in the order the fields are written.
#[macro_export]
macro_rules! combine_reducers {
    ($state:ident { $($field:ident : $reducer:expr),+ $(,)? }) => {
        $crate::reducer_fn::<$state, _, _>(move |state, action| $state {
            $( $field: ($reducer)(state.map(|s| &s.$field), action), )+
        })
    };
}

/// A boxed reducer for one slice of a [`Slices`] state
pub type SliceReducer<V, A> = Box<dyn Fn(Option<&V>, Dispatched<'_, A>) -> V>;

/// Pair a key with its slice reducer, for [`combine`]
pub fn slice<V, A, F>(key: impl Into<String>, reducer: F) -> (String, SliceReducer<V, A>)
where
    F: Fn(Option<&V>, Dispatched<'_, A>) -> V + 'static,
{
    (key.into(), Box::new(reducer))
}

/// Combine keyed slice reducers into one root reducer
///
/// The resulting state keeps the keys in the order given here.
///
/// # Errors
///
/// [`StoreError::DuplicateSlice`] if a key appears twice.
///
/// # Example
///
/// ```
/// use unistore_core::{combine, slice, Action, Dispatched, Store};
///
/// #[derive(Clone, Debug)]
/// struct Tick;
/// # impl Action for Tick {
/// #     fn name(&self) -> &'static str { "TICK" }
/// # }
///
/// fn ticks(state: Option<&u32>, action: Dispatched<'_, Tick>) -> u32 {
///     let state = state.copied().unwrap_or(0);
///     if action.action().is_some() { state + 1 } else { state }
/// }
///
/// fn constant(_: Option<&u32>, _: Dispatched<'_, Tick>) -> u32 {
///     100
/// }
///
/// let root = combine([slice("ticks", ticks), slice("constant", constant)]).unwrap();
/// let store = Store::new(root);
/// store.dispatch(Tick).unwrap();
///
/// assert_eq!(store.state()["ticks"], 1);
/// assert_eq!(store.state()["constant"], 100);
/// ```
pub fn combine<V, A, I>(slices: I) -> Result<Combined<V, A>, StoreError>
where
    I: IntoIterator<Item = (String, SliceReducer<V, A>)>,
{
    let mut seen = HashSet::new();
    let mut reducers = Vec::new();
    for (key, reducer) in slices {
        if !seen.insert(key.clone()) {
            return Err(StoreError::DuplicateSlice(key));
        }
        reducers.push((key, reducer));
    }
    Ok(Combined { reducers })
}

/// Root reducer produced by [`combine`]
pub struct Combined<V, A> {
    reducers: Vec<(String, SliceReducer<V, A>)>,
}

impl<V, A> Combined<V, A> {
    /// Slice keys, in composition order
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.reducers.iter().map(|(key, _)| key.as_str())
    }

    pub fn len(&self) -> usize {
        self.reducers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.reducers.is_empty()
    }
}

impl<V, A> fmt::Debug for Combined<V, A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Combined")
            .field("keys", &self.keys().collect::<Vec<_>>())
            .finish()
    }
}

impl<V, A> Reducer<Slices<V>, A> for Combined<V, A> {
    fn reduce(&self, state: Option<&Slices<V>>, action: Dispatched<'_, A>) -> Slices<V> {
        // states built by this reducer hold each key at its slice index
        let mut aligned = state.map_or(true, |s| s.len() == self.reducers.len());
        let entries = self
            .reducers
            .iter()
            .enumerate()
            .map(|(index, (key, reducer))| {
                let previous = state.and_then(|s| match s.entries.get(index) {
                    Some((k, v)) if k == key => Some(v),
                    _ => {
                        aligned = false;
                        s.get(key)
                    }
                });
                (key.clone(), reducer(previous, action))
            })
            .collect();

        if let Some(state) = state.filter(|_| !aligned) {
            let unexpected: Vec<&str> = state
                .keys()
                .filter(|key| !self.reducers.iter().any(|(k, _)| k == key))
                .collect();
            if !unexpected.is_empty() {
                tracing::warn!(keys = ?unexpected, "Dropping state keys with no slice reducer");
            }
        }

        Slices { entries }
    }
}

/// Ordered key to value state produced by [`combine`]
///
/// Serializes as a map, in key order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Slices<V> {
    entries: Vec<(String, V)>,
}

impl<V> Slices<V> {
    pub fn get(&self, key: &str) -> Option<&V> {
        self.entries.iter().find(|(k, _)| k == key).map(|(_, v)| v)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(k, _)| k.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &V)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<V> Default for Slices<V> {
    fn default() -> Self {
        Self {
            entries: Vec::new(),
        }
    }
}

impl<K: Into<String>, V> FromIterator<(K, V)> for Slices<V> {
    /// Later duplicates replace earlier ones, keeping the first position
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut slices = Slices::default();
        for (key, value) in iter {
            let key = key.into();
            match slices.entries.iter_mut().find(|(k, _)| *k == key) {
                Some((_, slot)) => *slot = value,
                None => slices.entries.push((key, value)),
            }
        }
        slices
    }
}

impl<V> Index<&str> for Slices<V> {
    type Output = V;

    fn index(&self, key: &str) -> &V {
        match self.get(key) {
            Some(value) => value,
            None => panic!("no slice named {key:?}"),
        }
    }
}

impl<V: Serialize> Serialize for Slices<V> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (key, value) in &self.entries {
            map.serialize_entry(key, value)?;
        }
        map.end()
    }
}
