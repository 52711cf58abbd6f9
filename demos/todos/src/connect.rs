//! Binding presentational components to a store
//!
//! [`StoreContext`] is built once where the view tree is assembled and cloned
//! into every container under it, so intermediate views never carry the
//! store. [`connect`] turns a presentational component plus a state-to-props
//! and a dispatch-to-props function into a container reading and dispatching
//! through that context.

use std::rc::Rc;

use crossterm::event::KeyEvent;
use ratatui::{layout::Rect, Frame};
use unistore::{Action, Store, StoreError};

use crate::components::Component;

/// Store access handed down from the root view
pub struct StoreContext<S, A> {
    store: Store<S, A>,
}

impl<S, A> Clone for StoreContext<S, A> {
    fn clone(&self) -> Self {
        Self {
            store: self.store.clone(),
        }
    }
}

impl<S: 'static, A: Action> StoreContext<S, A> {
    pub fn new(store: &Store<S, A>) -> Self {
        Self {
            store: store.clone(),
        }
    }

    pub fn store(&self) -> &Store<S, A> {
        &self.store
    }

    pub fn state(&self) -> Rc<S> {
        self.store.state()
    }

    /// Dispatch each action in order, stopping at the first error
    pub fn dispatch_all(&self, actions: impl IntoIterator<Item = A>) -> Result<(), StoreError> {
        for action in actions {
            self.store.dispatch(action)?;
        }
        Ok(())
    }
}

/// A component whose props split into a part read from state and a part
/// made of action creators
pub trait Connectable<A>: Component<A> {
    /// Owned data mapped from the store state
    type StateProps;
    /// Action creators the component calls on input
    type DispatchProps;

    fn merge_props<'a>(
        state: &'a Self::StateProps,
        dispatch: &'a Self::DispatchProps,
        is_focused: bool,
    ) -> Self::Props<'a>;
}

type MapStateToProps<S, P> = Box<dyn Fn(&S) -> P>;
type MapDispatchToProps<P> = Box<dyn Fn() -> P>;

/// Container produced by [`connect`]
///
/// Every render and key maps the current state again, so the component always
/// sees what the store holds now.
pub struct Connected<C: Connectable<A>, S, A> {
    component: C,
    context: StoreContext<S, A>,
    map_state_to_props: MapStateToProps<S, C::StateProps>,
    map_dispatch_to_props: MapDispatchToProps<C::DispatchProps>,
}

/// Bind `component` to the store behind `context`
///
/// # Example
/// ```ignore
/// fn map_state_to_props(state: &TodoState) -> Vec<Arc<Todo>> {
///     visible_todos(&state.todos, state.visibility_filter)
/// }
///
/// fn map_dispatch_to_props() -> fn(u64) -> TodoAction {
///     TodoAction::toggle
/// }
///
/// let mut list = connect(&context, map_state_to_props, map_dispatch_to_props, TodoList::new());
/// list.handle_key(&enter, true)?;
/// ```
pub fn connect<C, S, A, M, D>(
    context: &StoreContext<S, A>,
    map_state_to_props: M,
    map_dispatch_to_props: D,
    component: C,
) -> Connected<C, S, A>
where
    C: Connectable<A>,
    S: 'static,
    A: Action,
    M: Fn(&S) -> C::StateProps + 'static,
    D: Fn() -> C::DispatchProps + 'static,
{
    Connected {
        component,
        context: context.clone(),
        map_state_to_props: Box::new(map_state_to_props),
        map_dispatch_to_props: Box::new(map_dispatch_to_props),
    }
}

impl<C, S, A> Connected<C, S, A>
where
    C: Connectable<A>,
    S: 'static,
    A: Action,
{
    pub fn component(&self) -> &C {
        &self.component
    }

    pub fn render(&mut self, frame: &mut Frame, area: Rect, is_focused: bool) {
        let state = self.context.state();
        let state_props = (self.map_state_to_props)(&*state);
        let dispatch_props = (self.map_dispatch_to_props)();
        let props = C::merge_props(&state_props, &dispatch_props, is_focused);
        self.component.render(frame, area, props);
    }

    /// Pass `key` to the component and dispatch every action it emits
    pub fn handle_key(&mut self, key: &KeyEvent, is_focused: bool) -> Result<(), StoreError> {
        let state = self.context.state();
        let state_props = (self.map_state_to_props)(&*state);
        let dispatch_props = (self.map_dispatch_to_props)();
        let props = C::merge_props(&state_props, &dispatch_props, is_focused);
        let actions: Vec<A> = self.component.handle_key(key, props).into_iter().collect();
        self.context.dispatch_all(actions)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::test_util::{key, render_to_string};
    use crossterm::event::KeyCode;
    use ratatui::widgets::Paragraph;
    use unistore::{Dispatched, Store};

    #[derive(Action, Clone, Debug, PartialEq)]
    #[action(rename_all = "SCREAMING_SNAKE_CASE")]
    enum TallyAction {
        Add(u32),
    }

    fn tally(state: Option<&u32>, action: Dispatched<'_, TallyAction>) -> u32 {
        let state = state.copied().unwrap_or(0);
        match action.action() {
            Some(TallyAction::Add(n)) => state.saturating_add(*n),
            None => state,
        }
    }

    struct TallyProps<A> {
        total: u32,
        is_focused: bool,
        on_add: fn(u32) -> A,
    }

    /// Shows a number; '+' emits `on_add(1)` when focused
    #[derive(Default)]
    struct TallyView {
        renders: usize,
    }

    impl<A> Component<A> for TallyView {
        type Props<'a> = TallyProps<A>;

        fn handle_key(&mut self, key: &KeyEvent, props: Self::Props<'_>) -> impl IntoIterator<Item = A> {
            (props.is_focused && key.code == KeyCode::Char('+')).then(|| (props.on_add)(1))
        }

        fn render(&mut self, frame: &mut Frame, area: Rect, props: Self::Props<'_>) {
            self.renders += 1;
            frame.render_widget(Paragraph::new(format!("total={}", props.total)), area);
        }
    }

    impl<A> Connectable<A> for TallyView {
        type StateProps = u32;
        type DispatchProps = fn(u32) -> A;

        fn merge_props<'a>(
            state: &'a Self::StateProps,
            dispatch: &'a Self::DispatchProps,
            is_focused: bool,
        ) -> Self::Props<'a> {
            TallyProps {
                total: *state,
                is_focused,
                on_add: *dispatch,
            }
        }
    }

    fn map_state_to_props(state: &u32) -> u32 {
        *state
    }

    fn map_dispatch_to_props() -> fn(u32) -> TallyAction {
        TallyAction::Add
    }

    #[test]
    fn test_connected_dispatches_through_context() {
        let store = Store::new(tally);
        let context = StoreContext::new(&store);
        let mut view = connect(&context, map_state_to_props, map_dispatch_to_props, TallyView::default());

        view.handle_key(&key(KeyCode::Char('+')), true).unwrap();
        view.handle_key(&key(KeyCode::Char('+')), true).unwrap();
        view.handle_key(&key(KeyCode::Char('x')), true).unwrap();
        view.handle_key(&key(KeyCode::Char('+')), false).unwrap();

        assert_eq!(*store.state(), 2);
    }

    #[test]
    fn test_connected_renders_current_state() {
        let store = Store::with_state(tally, 40);
        let mut view = connect(
            &StoreContext::new(&store),
            map_state_to_props,
            map_dispatch_to_props,
            TallyView::default(),
        );

        // the store changes behind the container's back
        store.dispatch(TallyAction::Add(2)).unwrap();

        let output = render_to_string(20, 1, |frame| view.render(frame, frame.area(), true));
        assert!(output.contains("total=42"));
        assert_eq!(view.component().renders, 1);
    }

    #[test]
    fn test_containers_share_one_context() {
        let store = Store::new(tally);
        let context = StoreContext::new(&store);
        let mut first = connect(&context, map_state_to_props, map_dispatch_to_props, TallyView::default());
        let mut second = connect(
            &context.clone(),
            |state: &u32| state * 10,
            map_dispatch_to_props,
            TallyView::default(),
        );

        first.handle_key(&key(KeyCode::Char('+')), true).unwrap();

        let output = render_to_string(20, 1, |frame| second.render(frame, frame.area(), false));
        assert!(output.contains("total=10"));
        assert_eq!(*context.state(), 1);
    }

    #[test]
    fn test_dispatch_all_in_order() {
        let store = Store::new(tally);
        let context = StoreContext::new(&store);
        context
            .dispatch_all([TallyAction::Add(1), TallyAction::Add(2)])
            .unwrap();
        assert_eq!(*context.store().state(), 3);
    }
}
