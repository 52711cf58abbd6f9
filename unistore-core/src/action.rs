//! Action trait and the envelope reducers receive

use std::fmt::Debug;

/// Kind tag of the action the store delivers once, at construction.
///
/// Application actions can never carry it: `#[derive(Action)]` rejects it, and
/// the store never wraps it in [`Dispatched::Action`].
pub const INIT_ACTION: &str = "@@INIT";

/// Marker trait for actions that can be dispatched to the store
///
/// Actions represent intents to change state. They should be:
/// - Clone: Actions may be logged, replayed, or recorded by test harnesses
/// - Debug: For debugging and logging
/// - Send + 'static: Actions may be produced on other tasks and sent over channels
///
/// Use `#[derive(Action)]` from `unistore-macros` to auto-implement this trait.
pub trait Action: Clone + Debug + Send + 'static {
    /// Get the action kind tag for logging and filtering
    fn name(&self) -> &'static str;
}

/// What a reducer is invoked with.
///
/// `Init` is the reserved store-internal action; every well-behaved reducer
/// treats it like any other action it does not recognize and returns its
/// (possibly defaulted) state unchanged.
#[derive(Debug)]
pub enum Dispatched<'a, A> {
    /// Delivered once when the store is created
    Init,
    /// An application action passed to [`Store::dispatch`](crate::Store::dispatch)
    Action(&'a A),
}

impl<A> Clone for Dispatched<'_, A> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<A> Copy for Dispatched<'_, A> {}

impl<'a, A> Dispatched<'a, A> {
    /// The application action, or `None` for `Init`
    #[inline]
    pub fn action(self) -> Option<&'a A> {
        match self {
            Dispatched::Init => None,
            Dispatched::Action(action) => Some(action),
        }
    }

    #[inline]
    pub fn is_init(self) -> bool {
        matches!(self, Dispatched::Init)
    }
}

impl<A: Action> Dispatched<'_, A> {
    /// Kind tag, `"@@INIT"` for the init action
    pub fn name(self) -> &'static str {
        match self {
            Dispatched::Init => INIT_ACTION,
            Dispatched::Action(action) => action.name(),
        }
    }
}

impl<'a, A> From<&'a A> for Dispatched<'a, A> {
    fn from(action: &'a A) -> Self {
        Dispatched::Action(action)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Clone, Debug, PartialEq)]
    enum TestAction {
        Ping,
    }

    impl Action for TestAction {
        fn name(&self) -> &'static str {
            "PING"
        }
    }

    #[test]
    fn test_init_has_reserved_name() {
        let init: Dispatched<'_, TestAction> = Dispatched::Init;
        assert!(init.is_init());
        assert_eq!(init.name(), INIT_ACTION);
        assert_eq!(init.action(), None);
    }

    #[test]
    fn test_wrapped_action() {
        let ping = TestAction::Ping;
        let dispatched = Dispatched::from(&ping);
        assert!(!dispatched.is_init());
        assert_eq!(dispatched.name(), "PING");
        assert_eq!(dispatched.action(), Some(&TestAction::Ping));
    }
}
