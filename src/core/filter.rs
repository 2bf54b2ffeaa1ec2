// LeadGrid - core/filter.rs
//
// Filter engine: canonical dataset + filter spec -> filtered view.
// All dimensions are AND-combined. Core layer: pure logic, no I/O.

use crate::core::model::{FilterSpec, Lead};

/// Apply a filter spec to the canonical dataset, returning indices of
/// matching leads.
///
/// The result is the filtered view: a non-owning projection into the
/// dataset, in canonical row order. Deterministic and pure: calling it
/// twice with the same inputs yields the same view.
///
/// An empty result is an explicitly empty view (possibly because
/// `regions` or `categories` is empty, which matches nothing); callers
/// decide how to surface emptiness.
pub fn apply_filter(dataset: &[Lead], spec: &FilterSpec) -> Vec<usize> {
    dataset
        .iter()
        .enumerate()
        .filter(|(_, lead)| spec.matches(lead))
        .map(|(idx, _)| idx)
        .collect()
}
