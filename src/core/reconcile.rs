// LeadGrid - core/reconcile.rs
//
// Grid reconciler: merges an edited subset of records back into the
// canonical dataset by domain key.
//
// Field semantics are last-write-wins per field across repeated calls;
// there is no version vector or optimistic-concurrency check. The
// canonical dataset is the single source of truth and is mutated ONLY
// through this module.

use crate::core::model::Lead;
use crate::core::roster::Roster;
use std::collections::{BTreeMap, HashMap};

/// A partial record of changed fields for one lead.
///
/// `None` means "unchanged". For the two nullable lead fields the outer
/// `Option` is change-tracking and the inner one is the value itself, so
/// `Some(None)` clears the field.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LeadPatch {
    pub region: Option<String>,
    pub category: Option<String>,
    pub status: Option<String>,
    pub estimated_yearly_sales: Option<Option<f64>>,
    pub assigned_to: Option<Option<String>>,
    pub linkedin_url: Option<String>,
    pub instagram_url: Option<String>,
    pub description: Option<String>,
    pub platform: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub store_locator_url: Option<String>,
    pub phones: Option<String>,
    pub shipping_carriers: Option<String>,
}

impl LeadPatch {
    /// True when no field is changed.
    pub fn is_empty(&self) -> bool {
        *self == LeadPatch::default()
    }

    /// A patch that only reassigns the lead.
    pub fn assign(member: &str) -> LeadPatch {
        LeadPatch {
            assigned_to: Some(Some(member.to_string())),
            ..LeadPatch::default()
        }
    }
}

/// Edits keyed by `domain`. Ordered so application and logging are
/// deterministic regardless of how the delta was built.
pub type EditDelta = BTreeMap<String, LeadPatch>;

/// Result of one reconciliation pass.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ReconcileOutcome {
    /// Records that received at least one field change.
    pub applied: usize,

    /// Domains in the delta with no canonical match. Dropped, never
    /// inserted: records can be edited but not created through this path.
    pub unknown_domains: Vec<String>,

    /// `(domain, member)` pairs whose `assigned_to` edit named a member
    /// not in the roster. The field write is rejected; the rest of the
    /// patch still applies.
    pub rejected_assignees: Vec<(String, String)>,
}

/// Diff an edited row set against canonical state by key.
///
/// Produces a delta containing only the fields that actually differ, so
/// a round-trip through an editor that changed nothing reconciles as a
/// no-op. Edited rows whose domain is unknown still appear in the delta
/// (with a full-row patch) and are dropped by `apply`.
pub fn diff_rows(dataset: &[Lead], edited: &[Lead]) -> EditDelta {
    let by_domain: HashMap<&str, &Lead> =
        dataset.iter().map(|l| (l.domain.as_str(), l)).collect();

    let mut delta = EditDelta::new();
    for row in edited {
        let patch = match by_domain.get(row.domain.as_str()) {
            Some(current) => diff_lead(current, row),
            // Unknown domain: carry the whole row; apply() drops it.
            None => full_patch(row),
        };
        if !patch.is_empty() {
            // Last row wins if the same domain appears twice in the input.
            delta.insert(row.domain.clone(), patch);
        }
    }
    delta
}

fn diff_field<T: Clone + PartialEq>(current: &T, edited: &T) -> Option<T> {
    (current != edited).then(|| edited.clone())
}

fn diff_lead(current: &Lead, edited: &Lead) -> LeadPatch {
    LeadPatch {
        region: diff_field(&current.region, &edited.region),
        category: diff_field(&current.category, &edited.category),
        status: diff_field(&current.status, &edited.status),
        estimated_yearly_sales: diff_field(
            &current.estimated_yearly_sales,
            &edited.estimated_yearly_sales,
        ),
        assigned_to: diff_field(&current.assigned_to, &edited.assigned_to),
        linkedin_url: diff_field(&current.linkedin_url, &edited.linkedin_url),
        instagram_url: diff_field(&current.instagram_url, &edited.instagram_url),
        description: diff_field(&current.description, &edited.description),
        platform: diff_field(&current.platform, &edited.platform),
        city: diff_field(&current.city, &edited.city),
        state: diff_field(&current.state, &edited.state),
        store_locator_url: diff_field(&current.store_locator_url, &edited.store_locator_url),
        phones: diff_field(&current.phones, &edited.phones),
        shipping_carriers: diff_field(&current.shipping_carriers, &edited.shipping_carriers),
    }
}

fn full_patch(row: &Lead) -> LeadPatch {
    LeadPatch {
        region: Some(row.region.clone()),
        category: Some(row.category.clone()),
        status: Some(row.status.clone()),
        estimated_yearly_sales: Some(row.estimated_yearly_sales),
        assigned_to: Some(row.assigned_to.clone()),
        linkedin_url: Some(row.linkedin_url.clone()),
        instagram_url: Some(row.instagram_url.clone()),
        description: Some(row.description.clone()),
        platform: Some(row.platform.clone()),
        city: Some(row.city.clone()),
        state: Some(row.state.clone()),
        store_locator_url: Some(row.store_locator_url.clone()),
        phones: Some(row.phones.clone()),
        shipping_carriers: Some(row.shipping_carriers.clone()),
    }
}

/// Apply an edit delta to the canonical dataset.
///
/// For each patch, the canonical record is located by `domain` and only
/// the fields present in the patch are overwritten. Domains with no
/// canonical match are dropped (logged, no insertion). An `assigned_to`
/// value naming a member outside the roster is never written; that
/// field edit is rejected and reported in the outcome.
///
/// Never changes the dataset's row count, and is idempotent: applying
/// the same delta twice yields the same dataset as applying it once.
pub fn apply(dataset: &mut [Lead], delta: &EditDelta, roster: &Roster) -> ReconcileOutcome {
    let index_by_domain: HashMap<String, usize> = dataset
        .iter()
        .enumerate()
        .map(|(idx, l)| (l.domain.clone(), idx))
        .collect();

    let mut outcome = ReconcileOutcome::default();

    for (domain, patch) in delta {
        let Some(&idx) = index_by_domain.get(domain) else {
            tracing::debug!(domain = %domain, "Reconcile: no canonical match, dropping");
            outcome.unknown_domains.push(domain.clone());
            continue;
        };

        let mut patch = patch.clone();
        if let Some(Some(member)) = &patch.assigned_to {
            if !roster.contains(member) {
                tracing::warn!(
                    domain = %domain,
                    member = %member,
                    "Reconcile: assignee not in roster, field rejected"
                );
                outcome
                    .rejected_assignees
                    .push((domain.clone(), member.clone()));
                patch.assigned_to = None;
            }
        }
        if patch.is_empty() {
            continue;
        }

        apply_patch(&mut dataset[idx], &patch);
        outcome.applied += 1;
    }

    tracing::debug!(
        applied = outcome.applied,
        dropped = outcome.unknown_domains.len(),
        rejected = outcome.rejected_assignees.len(),
        "Reconciliation complete"
    );
    outcome
}

fn apply_patch(lead: &mut Lead, patch: &LeadPatch) {
    if let Some(v) = &patch.region {
        lead.region = v.clone();
    }
    if let Some(v) = &patch.category {
        lead.category = v.clone();
    }
    if let Some(v) = &patch.status {
        lead.status = v.clone();
    }
    if let Some(v) = patch.estimated_yearly_sales {
        lead.estimated_yearly_sales = v;
    }
    if let Some(v) = &patch.assigned_to {
        lead.assigned_to = v.clone();
    }
    if let Some(v) = &patch.linkedin_url {
        lead.linkedin_url = v.clone();
    }
    if let Some(v) = &patch.instagram_url {
        lead.instagram_url = v.clone();
    }
    if let Some(v) = &patch.description {
        lead.description = v.clone();
    }
    if let Some(v) = &patch.platform {
        lead.platform = v.clone();
    }
    if let Some(v) = &patch.city {
        lead.city = v.clone();
    }
    if let Some(v) = &patch.state {
        lead.state = v.clone();
    }
    if let Some(v) = &patch.store_locator_url {
        lead.store_locator_url = v.clone();
    }
    if let Some(v) = &patch.phones {
        lead.phones = v.clone();
    }
    if let Some(v) = &patch.shipping_carriers {
        lead.shipping_carriers = v.clone();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_lead(domain: &str, region: &str) -> Lead {
        Lead {
            domain: domain.to_string(),
            region: region.to_string(),
            category: "Retail".to_string(),
            status: "active".to_string(),
            estimated_yearly_sales: Some(1000.0),
            assigned_to: None,
            linkedin_url: String::new(),
            instagram_url: String::new(),
            description: String::new(),
            platform: String::new(),
            city: String::new(),
            state: String::new(),
            store_locator_url: String::new(),
            phones: String::new(),
            shipping_carriers: String::new(),
        }
    }

    fn sample_dataset() -> Vec<Lead> {
        vec![
            make_lead("a.com", "US"),
            make_lead("b.com", "EU"),
            make_lead("c.com", "US"),
        ]
    }

    #[test]
    fn test_apply_overwrites_only_patched_fields() {
        let mut dataset = sample_dataset();
        let mut delta = EditDelta::new();
        delta.insert(
            "b.com".to_string(),
            LeadPatch {
                status: Some("closed".to_string()),
                estimated_yearly_sales: Some(None),
                ..LeadPatch::default()
            },
        );

        let outcome = apply(&mut dataset, &delta, &Roster::default());
        assert_eq!(outcome.applied, 1);
        assert_eq!(dataset[1].status, "closed");
        assert_eq!(dataset[1].estimated_yearly_sales, None);
        // Untouched fields and untouched records keep their values.
        assert_eq!(dataset[1].region, "EU");
        assert_eq!(dataset[0], make_lead("a.com", "US"));
        assert_eq!(dataset[2], make_lead("c.com", "US"));
    }

    #[test]
    fn test_apply_is_idempotent() {
        let mut once = sample_dataset();
        let mut twice = sample_dataset();
        let mut delta = EditDelta::new();
        delta.insert(
            "a.com".to_string(),
            LeadPatch {
                city: Some("Austin".to_string()),
                assigned_to: Some(Some("Yadvendra".to_string())),
                ..LeadPatch::default()
            },
        );

        let roster = Roster::default();
        apply(&mut once, &delta, &roster);
        apply(&mut twice, &delta, &roster);
        apply(&mut twice, &delta, &roster);
        assert_eq!(once, twice);
    }

    #[test]
    fn test_apply_never_changes_row_count() {
        let mut dataset = sample_dataset();
        let mut delta = EditDelta::new();
        delta.insert("a.com".to_string(), LeadPatch::assign("Yadvendra"));
        delta.insert("ghost.com".to_string(), LeadPatch::assign("Yadvendra"));

        apply(&mut dataset, &delta, &Roster::default());
        assert_eq!(dataset.len(), 3);
    }

    /// A domain with no canonical match is dropped, never inserted.
    #[test]
    fn test_unknown_domain_is_dropped() {
        let mut dataset = sample_dataset();
        let mut delta = EditDelta::new();
        delta.insert(
            "ghost.com".to_string(),
            LeadPatch {
                region: Some("MARS".to_string()),
                ..LeadPatch::default()
            },
        );

        let outcome = apply(&mut dataset, &delta, &Roster::default());
        assert_eq!(outcome.applied, 0);
        assert_eq!(outcome.unknown_domains, vec!["ghost.com".to_string()]);
        assert!(dataset.iter().all(|l| l.domain != "ghost.com"));
    }

    /// An unregistered assignee is never written; the rest of the patch
    /// still applies.
    #[test]
    fn test_unregistered_assignee_is_rejected_fieldwise() {
        let mut dataset = sample_dataset();
        let mut delta = EditDelta::new();
        delta.insert(
            "a.com".to_string(),
            LeadPatch {
                city: Some("Boston".to_string()),
                assigned_to: Some(Some("Nobody".to_string())),
                ..LeadPatch::default()
            },
        );

        let outcome = apply(&mut dataset, &delta, &Roster::default());
        assert_eq!(outcome.applied, 1);
        assert_eq!(
            outcome.rejected_assignees,
            vec![("a.com".to_string(), "Nobody".to_string())]
        );
        assert_eq!(dataset[0].assigned_to, None);
        assert_eq!(dataset[0].city, "Boston");
    }

    /// Clearing an assignment (Some(None)) needs no roster membership.
    #[test]
    fn test_clearing_assignment_is_allowed() {
        let mut dataset = sample_dataset();
        dataset[0].assigned_to = Some("Yadvendra".to_string());
        let mut delta = EditDelta::new();
        delta.insert(
            "a.com".to_string(),
            LeadPatch {
                assigned_to: Some(None),
                ..LeadPatch::default()
            },
        );

        let outcome = apply(&mut dataset, &delta, &Roster::new(&[]));
        assert_eq!(outcome.applied, 1);
        assert!(outcome.rejected_assignees.is_empty());
        assert_eq!(dataset[0].assigned_to, None);
    }

    #[test]
    fn test_diff_rows_captures_only_changed_fields() {
        let dataset = sample_dataset();
        let mut edited = vec![dataset[0].clone(), dataset[1].clone()];
        edited[0].status = "paused".to_string();
        // edited[1] unchanged.

        let delta = diff_rows(&dataset, &edited);
        assert_eq!(delta.len(), 1);
        let patch = &delta["a.com"];
        assert_eq!(patch.status.as_deref(), Some("paused"));
        assert_eq!(patch.region, None);
    }

    #[test]
    fn test_diff_then_apply_round_trip() {
        let mut dataset = sample_dataset();
        let mut edited = vec![dataset[2].clone()];
        edited[0].phones = "+1-555-0100".to_string();
        edited[0].estimated_yearly_sales = None;

        let delta = diff_rows(&dataset, &edited);
        let outcome = apply(&mut dataset, &delta, &Roster::default());
        assert_eq!(outcome.applied, 1);
        assert_eq!(dataset[2], edited[0]);
    }

    /// Last-write-wins: conflicting values across repeated calls settle
    /// on the most recent.
    #[test]
    fn test_last_write_wins_across_calls() {
        let mut dataset = sample_dataset();
        let roster = Roster::default();

        let mut first = EditDelta::new();
        first.insert(
            "a.com".to_string(),
            LeadPatch {
                city: Some("Austin".to_string()),
                ..LeadPatch::default()
            },
        );
        let mut second = EditDelta::new();
        second.insert(
            "a.com".to_string(),
            LeadPatch {
                city: Some("Denver".to_string()),
                ..LeadPatch::default()
            },
        );

        apply(&mut dataset, &first, &roster);
        apply(&mut dataset, &second, &roster);
        assert_eq!(dataset[0].city, "Denver");
    }
}
