//! Tests for calculate_total_rewards function.

use super::*;
use crate::client::util::dungeon::{calculate_total_rewards, TotalRewards};

/// Tests totals over an empty history.
///
/// Expected: every field is zero
#[test]
fn returns_zero_totals_for_empty_history() {
    let totals = calculate_total_rewards(&[]);

    assert_eq!(totals, TotalRewards::default());
}

/// Tests summing rewards and outcomes over a mixed history.
///
/// Verifies that rewards of every entry are summed regardless of outcome and
/// that each entry counts towards exactly one of victories or defeats.
///
/// Expected: 3 victories, 2 defeats, rewards multiplied by 5 entries
#[test]
fn sums_rewards_and_counts_outcomes() {
    let history = vec![
        history_entry("1", "cave", true),
        history_entry("2", "cave", false),
        history_entry("3", "tower", true),
        history_entry("4", "tower", false),
        history_entry("5", "crypt", true),
    ];

    let totals = calculate_total_rewards(&history);

    assert_eq!(totals.exp, 500);
    assert_eq!(totals.zcoin, 50);
    assert_eq!(totals.ztoken, 5);
    assert_eq!(totals.victories, 3);
    assert_eq!(totals.defeats, 2);
}

/// Tests that victories and defeats always add up to the history length.
///
/// Expected: victories + defeats == len for every prefix of the history
#[test]
fn outcomes_add_up_to_history_length() {
    let history: Vec<_> = (0..20)
        .map(|i| history_entry(&i.to_string(), "cave", i % 3 == 0))
        .collect();

    for len in 0..=history.len() {
        let totals = calculate_total_rewards(&history[..len]);
        assert_eq!(totals.victories + totals.defeats, len);
    }
}
