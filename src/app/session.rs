// LeadGrid - app/session.rs
//
// Session-scoped context: owns the canonical dataset, team roster,
// filter spec, and the current filtered view. One explicit event
// handler per operator interaction, each processed to completion
// before the next, so ordering is deterministic and there are no
// hidden globals.
//
// The canonical dataset is the single source of truth; the view is
// derived and recomputed on every filter change. All domain-level
// problems surface as notifications, never as aborting failures.

use crate::core::assign;
use crate::core::export::{self, ExportFormat};
use crate::core::filter::apply_filter;
use crate::core::model::{Column, FilterSpec, Lead, ViewSummary};
use crate::core::reconcile::{self, EditDelta, ReconcileOutcome};
use crate::core::roster::{Roster, RosterAdd};
use crate::util::error::ExportError;
use std::collections::HashSet;

/// How a notification should be presented.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    Info,
    Success,
    Warning,
}

/// A user-facing message produced by an event handler.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub kind: NoticeKind,
    pub message: String,
}

impl Notification {
    fn info(message: String) -> Notification {
        Notification {
            kind: NoticeKind::Info,
            message,
        }
    }

    fn success(message: String) -> Notification {
        Notification {
            kind: NoticeKind::Success,
            message,
        }
    }

    fn warning(message: String) -> Notification {
        Notification {
            kind: NoticeKind::Warning,
            message,
        }
    }
}

/// One operator session over a loaded dataset.
#[derive(Debug)]
pub struct Session {
    dataset: Vec<Lead>,
    roster: Roster,
    filter: FilterSpec,
    view: Vec<usize>,
}

impl Session {
    /// Create a session over a freshly loaded canonical dataset.
    ///
    /// The initial filter spec is empty, which matches nothing: the
    /// first `set_filter` call establishes the working view.
    pub fn new(dataset: Vec<Lead>, roster: Roster) -> Session {
        Session {
            dataset,
            roster,
            filter: FilterSpec::default(),
            view: Vec::new(),
        }
    }

    /// The canonical dataset (read-only; mutation goes through the
    /// reconciler via `edit_records` / `bulk_assign`).
    pub fn dataset(&self) -> &[Lead] {
        &self.dataset
    }

    /// The current filtered view as indices into the dataset.
    pub fn view(&self) -> &[usize] {
        &self.view
    }

    /// Leads in the current view, in view order.
    pub fn view_leads(&self) -> impl Iterator<Item = &Lead> {
        self.view.iter().filter_map(|&i| self.dataset.get(i))
    }

    /// The team roster.
    pub fn roster(&self) -> &Roster {
        &self.roster
    }

    /// The active filter spec.
    pub fn filter(&self) -> &FilterSpec {
        &self.filter
    }

    /// Replace the filter spec and recompute the view.
    ///
    /// An empty view yields an informational notification naming the
    /// active filter values; data operations over an empty view are
    /// naturally no-ops until the filters change.
    pub fn set_filter(
        &mut self,
        regions: HashSet<String>,
        categories: HashSet<String>,
        status: String,
    ) -> Notification {
        self.filter = FilterSpec {
            regions,
            categories,
            status,
        };
        self.view = apply_filter(&self.dataset, &self.filter);
        tracing::debug!(rows = self.view.len(), "Filter applied");

        if self.view.is_empty() {
            Notification::info(format!(
                "No data available for the filters: {}",
                self.filter.describe()
            ))
        } else {
            Notification::info(format!(
                "Displaying {} leads for {}",
                self.view.len(),
                self.filter.describe()
            ))
        }
    }

    /// Reconcile an edit delta into canonical state, then recompute the
    /// view (an edit may move a lead in or out of the filter).
    pub fn edit_records(&mut self, delta: &EditDelta) -> (ReconcileOutcome, Notification) {
        let outcome = reconcile::apply(&mut self.dataset, delta, &self.roster);
        self.view = apply_filter(&self.dataset, &self.filter);

        let notification = if !outcome.rejected_assignees.is_empty() {
            let names: Vec<String> = outcome
                .rejected_assignees
                .iter()
                .map(|(domain, member)| format!("{domain} -> {member}"))
                .collect();
            Notification::warning(format!(
                "Updated {} records; rejected unregistered assignees: {}",
                outcome.applied,
                names.join(", ")
            ))
        } else {
            Notification::success(format!("Updated {} records", outcome.applied))
        };
        (outcome, notification)
    }

    /// Add a sales-team member to the roster.
    pub fn add_roster_member(&mut self, name: &str) -> Notification {
        match self.roster.add(name) {
            RosterAdd::Added => {
                Notification::success(format!("Added new sales team member: {}", name.trim()))
            }
            RosterAdd::Duplicate => {
                Notification::warning("This member already exists.".to_string())
            }
            RosterAdd::EmptyName => {
                Notification::warning("Member name cannot be empty.".to_string())
            }
            RosterAdd::Full => Notification::warning("The roster is full.".to_string()),
        }
    }

    /// Assign every lead of `region` within the current view to
    /// `member`, merging into canonical state in the same step.
    ///
    /// Precondition violations reject the request with zero leads
    /// assigned and a warning notification.
    pub fn bulk_assign(&mut self, region: &str, member: &str) -> (usize, Notification) {
        match assign::bulk_assign(&mut self.dataset, &self.view, region, member, &self.roster) {
            Ok(count) => (
                count,
                Notification::success(format!(
                    "Assigned {count} leads in {region} to {member}."
                )),
            ),
            Err(e) => {
                tracing::warn!(error = %e, "Bulk assignment rejected");
                (0, Notification::warning(format!("{e}: 0 leads assigned")))
            }
        }
    }

    /// Serialise the current view in the requested format.
    pub fn export(
        &self,
        format: ExportFormat,
        projection: &[Column],
    ) -> Result<Vec<u8>, ExportError> {
        match format {
            ExportFormat::Csv => {
                let mut payload = Vec::new();
                export::export_csv(&self.dataset, &self.view, projection, &mut payload)?;
                Ok(payload)
            }
            ExportFormat::Xlsx => export::export_xlsx(&self.dataset, &self.view, projection),
        }
    }

    /// Summary statistics over the current view.
    pub fn summary(&self) -> ViewSummary {
        ViewSummary::compute(&self.dataset, &self.view)
    }
}
