//! A/B selection among the weighted rules of one tier.

use crate::domain::entities::RoutingRule;

/// Picks one weighted rule using cumulative weight segments.
///
/// Rules keep their given order and occupy half-open segments
/// `[sum(w[..i]), sum(w[..=i]))`. The request's `percent` is scaled onto the total
/// weight, which is not normalized to 100, so weights act as relative shares of the
/// tier's traffic.
///
/// Returns `None` when the total weight is zero, when `percent` is not a number, or
/// when the scaled sample falls past the last segment.
pub fn select_weighted<'a>(candidates: &[&'a RoutingRule], percent: f64) -> Option<&'a RoutingRule> {
    let total: f64 = candidates
        .iter()
        .filter_map(|rule| rule.effective_weight())
        .map(f64::from)
        .sum();

    if total <= 0.0 {
        return None;
    }

    let scaled = percent / 100.0 * total;
    let mut start = 0.0;

    for &rule in candidates {
        let Some(weight) = rule.effective_weight() else {
            continue;
        };
        let end = start + f64::from(weight);
        if scaled >= start && scaled < end {
            return Some(rule);
        }
        start = end;
    }

    None
}
