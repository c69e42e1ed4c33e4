//! Statistical properties of ε-greedy selection and tie-breaking

use std::collections::HashMap;

use qlearn::{ActionId, ActionValueTable, Hyperparameters, StateId, identifiers::action_set};
use rand::{SeedableRng, rngs::StdRng};

const TRIALS: usize = 10_000;

/// Table with alpha = 1 and gamma = 0, so `learn` writes rewards verbatim.
fn assignable_table(actions: &[&str], epsilon: f64) -> ActionValueTable {
    ActionValueTable::new(
        action_set(actions.iter().copied()),
        Hyperparameters::new(epsilon, 1.0, 0.0),
    )
    .expect("valid table")
}

fn assign(table: &mut ActionValueTable, state: &str, action: &str, value: f64) {
    table
        .learn(&state.into(), &action.into(), value, &"terminal".into())
        .expect("known action");
}

fn frequencies(
    table: &mut ActionValueTable,
    state: &StateId,
    explore: bool,
    seed: u64,
) -> HashMap<ActionId, usize> {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut counts = HashMap::new();
    for _ in 0..TRIALS {
        *counts
            .entry(table.choose_action(state, explore, &mut rng))
            .or_insert(0) += 1;
    }
    counts
}

fn share(counts: &HashMap<ActionId, usize>, action: &str) -> f64 {
    counts.get(action).copied().unwrap_or(0) as f64 / TRIALS as f64
}

#[test]
fn test_equal_values_split_evenly() {
    let mut table = assignable_table(&["L", "R"], 0.0);
    assign(&mut table, "s", "L", 3.0);
    assign(&mut table, "s", "R", 3.0);

    let counts = frequencies(&mut table, &"s".into(), false, 11);

    assert_eq!(counts.len(), 2);
    for action in ["L", "R"] {
        let p = share(&counts, action);
        assert!((p - 0.5).abs() < 0.05, "{action} chosen with share {p}");
    }
}

#[test]
fn test_fresh_state_does_not_favour_first_action() {
    let mut table = assignable_table(&["left", "forward", "right"], 0.0);
    let counts = frequencies(&mut table, &"unseen".into(), false, 12);

    for action in ["left", "forward", "right"] {
        let p = share(&counts, action);
        assert!((p - 1.0 / 3.0).abs() < 0.05, "{action} chosen with share {p}");
    }
}

#[test]
fn test_tied_maximum_restricts_choice() {
    let mut table = assignable_table(&["left", "forward", "right"], 0.0);
    assign(&mut table, "s", "left", 2.0);
    assign(&mut table, "s", "forward", 2.0);
    assign(&mut table, "s", "right", 1.0);

    let counts = frequencies(&mut table, &"s".into(), false, 13);

    assert_eq!(share(&counts, "right"), 0.0);
    for action in ["left", "forward"] {
        let p = share(&counts, action);
        assert!((p - 0.5).abs() < 0.05, "{action} chosen with share {p}");
    }
}

#[test]
fn test_unique_maximum_always_wins_without_exploration() {
    let mut table = assignable_table(&["left", "forward", "right"], 0.9);
    assign(&mut table, "s", "right", -0.5);
    assign(&mut table, "s", "forward", 0.25);

    let counts = frequencies(&mut table, &"s".into(), false, 14);
    assert_eq!(counts.get("forward").copied(), Some(TRIALS));
}

#[test]
fn test_exploration_rate_matches_epsilon() {
    // forward is the unique best; with epsilon = 0.3 each other action is
    // picked with probability 0.3 / 3 = 0.1
    let mut table = assignable_table(&["left", "forward", "right"], 0.3);
    assign(&mut table, "s", "forward", 1.0);

    let counts = frequencies(&mut table, &"s".into(), true, 15);

    assert!((share(&counts, "left") - 0.1).abs() < 0.05);
    assert!((share(&counts, "right") - 0.1).abs() < 0.05);
    assert!((share(&counts, "forward") - 0.8).abs() < 0.05);
}

#[test]
fn test_selection_materialises_every_action() {
    let mut table = assignable_table(&["left", "forward", "right"], 0.5);
    let mut rng = StdRng::seed_from_u64(16);
    let state = StateId::from("fresh");

    assert!(!table.has_full_row(&state));
    table.choose_action(&state, true, &mut rng);
    assert!(table.has_full_row(&state));
    assert_eq!(table.row(&state), vec![0.0, 0.0, 0.0]);
}
