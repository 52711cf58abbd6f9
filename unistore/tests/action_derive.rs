//! Tests for #[derive(Action)] macro

#![allow(dead_code)]

use unistore::Action;

#[test]
fn test_default_names_are_variant_names() {
    #[derive(Action, Clone, Debug)]
    enum Plain {
        Increment,
        Decrement,
    }

    assert_eq!(Plain::Increment.name(), "Increment");
    assert_eq!(Plain::Decrement.name(), "Decrement");
    assert_eq!(Plain::KINDS, &["Increment", "Decrement"]);
}

#[test]
fn test_screaming_snake_case() {
    #[derive(Action, Clone, Debug)]
    #[action(rename_all = "SCREAMING_SNAKE_CASE")]
    enum TodoAction {
        AddTodo { id: u64, text: String },
        ToggleTodo { id: u64 },
        SetVisibilityFilter(String),
    }

    let add = TodoAction::AddTodo {
        id: 0,
        text: "Learn Redux".into(),
    };
    assert_eq!(add.name(), "ADD_TODO");
    assert_eq!(TodoAction::ToggleTodo { id: 1 }.name(), "TOGGLE_TODO");
    assert_eq!(
        TodoAction::SetVisibilityFilter("SHOW_ALL".into()).name(),
        "SET_VISIBILITY_FILTER"
    );
}

#[test]
fn test_snake_case() {
    #[derive(Action, Clone, Debug)]
    #[action(rename_all = "snake_case")]
    enum Nav {
        PageNext,
        PagePrev,
    }

    assert_eq!(Nav::PageNext.name(), "page_next");
    assert_eq!(Nav::KINDS, &["page_next", "page_prev"]);
}

#[test]
fn test_explicit_name_overrides_rule() {
    #[derive(Action, Clone, Debug)]
    #[action(rename_all = "SCREAMING_SNAKE_CASE")]
    enum Counter {
        Increment,
        #[action(name = "counter/decrement")]
        Decrement,
    }

    assert_eq!(Counter::Increment.name(), "INCREMENT");
    assert_eq!(Counter::Decrement.name(), "counter/decrement");
}

#[test]
fn test_works_through_dispatched() {
    use unistore::{Dispatched, INIT_ACTION};

    #[derive(Action, Clone, Debug)]
    #[action(rename_all = "SCREAMING_SNAKE_CASE")]
    enum Counter {
        Increment,
    }

    let increment = Counter::Increment;
    assert_eq!(Dispatched::Action(&increment).name(), "INCREMENT");
    assert_eq!(Dispatched::<Counter>::Init.name(), INIT_ACTION);
}
