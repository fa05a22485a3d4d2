//! RFC 6724 §6 destination comparator (rules 2, 5, 6, 8, 10 only).

use std::cmp::Ordering;

use log::trace;

use crate::classify::{self, MappedAddress};
use crate::summary::SourceSummary;

/// Compare two v6-mapped destinations under the source summary `summary`.
///
/// `Ordering::Less` means `a` should sort before `b` (i.e. `a` is preferred).
/// This is a total preorder: reflexive, transitive, and total over the
/// v6-mapped destination domain, so it composes directly with
/// `[T]::sort_by`. Rules 1, 3, 4, 7 and 9 are not implemented and are
/// skipped silently.
pub fn compare(a: &MappedAddress, b: &MappedAddress, summary: &SourceSummary) -> Ordering {
    if let Some(ord) = rule2_matching_scope(a, b, summary) {
        trace!("rule 2 (matching scope) decided");
        return ord;
    }
    if let Some(ord) = rule5_matching_label(a, b, summary) {
        trace!("rule 5 (matching label) decided");
        return ord;
    }
    if let Some(ord) = rule6_higher_precedence(a, b) {
        trace!("rule 6 (higher precedence) decided");
        return ord;
    }
    if let Some(ord) = rule8_smaller_scope(a, b) {
        trace!("rule 8 (smaller scope) decided");
        return ord;
    }
    // Rule 10: preserve input order.
    Ordering::Equal
}

fn scope_matches(addr: &MappedAddress, summary: &SourceSummary) -> bool {
    let scope = classify::scope(addr);
    if addr.is_from_v4() {
        summary.v4_scope_present(scope)
    } else {
        summary.v6_scope_present(scope)
    }
}

fn rule2_matching_scope(a: &MappedAddress, b: &MappedAddress, summary: &SourceSummary) -> Option<Ordering> {
    let a_matches = scope_matches(a, summary);
    let b_matches = scope_matches(b, summary);
    match (a_matches, b_matches) {
        (true, false) => Some(Ordering::Less),
        (false, true) => Some(Ordering::Greater),
        _ => None,
    }
}

fn rule5_matching_label(a: &MappedAddress, b: &MappedAddress, summary: &SourceSummary) -> Option<Ordering> {
    let a_matches = summary.label_present(classify::label(a));
    let b_matches = summary.label_present(classify::label(b));
    match (a_matches, b_matches) {
        (true, false) => Some(Ordering::Less),
        (false, true) => Some(Ordering::Greater),
        _ => None,
    }
}

fn rule6_higher_precedence(a: &MappedAddress, b: &MappedAddress) -> Option<Ordering> {
    let a_prec = classify::label(a).precedence();
    let b_prec = classify::label(b).precedence();
    match a_prec.cmp(&b_prec) {
        Ordering::Equal => None,
        // Higher precedence wins, i.e. sorts first.
        other => Some(other.reverse()),
    }
}

fn rule8_smaller_scope(a: &MappedAddress, b: &MappedAddress) -> Option<Ordering> {
    let a_scope = classify::scope(a);
    let b_scope = classify::scope(b);
    match a_scope.cmp(&b_scope) {
        Ordering::Equal => None,
        // Smaller scope wins, i.e. sorts first.
        other => Some(other),
    }
}
