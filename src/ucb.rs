//! The UCB1 selection policy.

/// Calculates the UCB1 (Upper Confidence Bound 1) value of a child relative to its parent.
///
/// `exploration_constant` biases the search: higher values favor children that have not been
/// explored much, lower values favor children for the outcomes they have already collected.
///
/// Only meaningful for `child_visits >= 1` and `parent_visits >= 1`. Selection only ever walks
/// into children that were expanded and backpropagated, so the engine never calls this outside
/// that range.
pub fn upper_confidence_bound(
    child_aggregate_outcome: f64,
    exploration_constant: f64,
    parent_visits: u64,
    child_visits: u64,
) -> f64 {
    let child_visits = child_visits as f64;
    child_aggregate_outcome / child_visits
        + exploration_constant * f64::sqrt(2.0 * f64::ln(parent_visits as f64) / child_visits)
}

#[cfg(test)]
mod tests {
    use super::upper_confidence_bound;

    #[test]
    fn matches_reference_value() {
        let expected = 3.0 / 4.0 + 1.0 * f64::sqrt(2.0 * f64::ln(10.0) / 4.0);
        let actual = upper_confidence_bound(3.0, 1.0, 10, 4);
        assert!((actual - expected).abs() < 1e-12);
    }

    #[test]
    fn single_parent_visit_has_no_exploration_bonus() {
        // ln(1) == 0
        let actual = upper_confidence_bound(1.0, 2.5, 1, 1);
        assert!((actual - 1.0).abs() < 1e-12);
    }

    #[test]
    fn zero_constant_is_pure_exploitation() {
        let actual = upper_confidence_bound(7.0, 0.0, 100, 10);
        assert!((actual - 0.7).abs() < 1e-12);
    }

    #[test]
    fn bonus_shrinks_with_child_visits() {
        let rarely_visited = upper_confidence_bound(1.0, 1.0, 50, 2);
        let often_visited = upper_confidence_bound(10.0, 1.0, 50, 20);
        // same mean, fewer visits explores more
        assert!(rarely_visited > often_visited);
    }
}
