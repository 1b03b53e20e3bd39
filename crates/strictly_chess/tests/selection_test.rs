//! Tests for the selection tracker.

use strictly_chess::{Coordinate, Selection};

fn at(token: &str) -> Coordinate {
    token.parse().expect("valid token")
}

fn assert_consistent(selection: &Selection) {
    if !selection.destinations().is_empty() {
        assert!(selection.is_active(), "destinations without a selection");
    }
}

#[test]
fn test_select_replaces_previous_selection() {
    let mut selection = Selection::new();
    selection.select(at("11"));
    selection.set_destinations([at("12"), at("13")]);

    selection.select(at("61"));
    assert_eq!(selection.active(), Some(at("61")));
    assert!(selection.destinations().is_empty());
    assert_consistent(&selection);
}

#[test]
fn test_clear_empties_both_halves() {
    let mut selection = Selection::new();
    selection.select(at("11"));
    selection.set_destinations([at("12")]);
    assert!(selection.is_destination(at("12")));

    selection.clear();
    assert_eq!(selection.active(), None);
    assert!(selection.destinations().is_empty());
}

#[test]
fn test_clear_is_idempotent() {
    let mut selection = Selection::new();
    selection.select(at("10"));
    selection.set_destinations([at("22"), at("02")]);

    selection.clear();
    let once = selection.clone();
    selection.clear();
    assert_eq!(selection, once);

    let mut fresh = Selection::new();
    fresh.clear();
    assert_eq!(fresh, Selection::new());
}

#[test]
fn test_destinations_need_active_selection() {
    let mut selection = Selection::new();
    assert!(!selection.set_destinations([at("12")]));
    assert!(selection.destinations().is_empty());
    assert_consistent(&selection);
}

#[test]
fn test_active_selection_may_have_no_destinations() {
    let mut selection = Selection::new();
    selection.select(at("40"));
    assert!(selection.set_destinations(std::iter::empty()));
    assert!(selection.is_active());
    assert!(selection.destinations().is_empty());
}

#[test]
fn test_invariant_holds_across_mixed_sequence() {
    let mut selection = Selection::new();
    let steps: [&dyn Fn(&mut Selection); 6] = [
        &|s: &mut Selection| s.select(at("11")),
        &|s: &mut Selection| {
            s.set_destinations([at("12"), at("13")]);
        },
        &|s: &mut Selection| s.clear(),
        &|s: &mut Selection| {
            s.set_destinations([at("55")]);
        },
        &|s: &mut Selection| s.select(at("60")),
        &|s: &mut Selection| {
            s.set_destinations([at("52"), at("72")]);
        },
    ];
    for step in steps {
        step(&mut selection);
        assert_consistent(&selection);
    }
    assert_eq!(selection.destinations().len(), 2);
}
