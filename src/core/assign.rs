// LeadGrid - core/assign.rs
//
// Bulk assignment manager: applies one sales-team member to all leads
// of a chosen region within the current filtered view.
//
// Assignment reconciles into canonical state synchronously; there is
// no separate commit step that could be skipped before the next filter
// change discards the view.

use crate::core::model::Lead;
use crate::core::reconcile::{self, EditDelta, LeadPatch};
use crate::core::roster::Roster;
use crate::util::error::AssignError;

/// Assign every lead in the view whose `region` matches to `member`.
///
/// View-scoped: leads matching the region but excluded by the view's
/// other filter dimensions are not touched. `view` holds indices into
/// `dataset` as produced by `core::filter::apply_filter`.
///
/// Preconditions, both rejected with zero leads assigned:
/// - `member` must be in the roster (an unregistered name is never
///   written into `assigned_to`);
/// - `region` must appear among the view's rows.
///
/// Returns the number of leads assigned, which equals the number of
/// records mutated in canonical state.
pub fn bulk_assign(
    dataset: &mut [Lead],
    view: &[usize],
    region: &str,
    member: &str,
    roster: &Roster,
) -> Result<usize, AssignError> {
    if !roster.contains(member) {
        return Err(AssignError::UnknownMember {
            member: member.to_string(),
        });
    }

    let mut delta = EditDelta::new();
    for lead in view.iter().filter_map(|&i| dataset.get(i)) {
        if lead.region == region {
            delta.insert(lead.domain.clone(), LeadPatch::assign(member));
        }
    }
    if delta.is_empty() {
        return Err(AssignError::RegionNotInView {
            region: region.to_string(),
        });
    }

    // Merge through the reconciler so the canonical dataset stays the
    // single mutation path. All domains came from the dataset and the
    // member is registered, so nothing can be dropped or rejected here.
    let outcome = reconcile::apply(dataset, &delta, roster);
    debug_assert!(outcome.unknown_domains.is_empty());
    debug_assert!(outcome.rejected_assignees.is_empty());

    tracing::info!(
        region = region,
        member = member,
        assigned = outcome.applied,
        "Bulk assignment applied"
    );
    Ok(outcome.applied)
}
