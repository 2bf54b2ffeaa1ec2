// LeadGrid - core/roster.rs
//
// Session-scoped sales-team roster: an ordered set of member names.
// Grows monotonically within a session; there is no removal operation.

use crate::util::constants::{DEFAULT_SEED_MEMBER, MAX_ROSTER_MEMBERS};

/// Outcome of a roster add. None of these are errors: duplicates and
/// blank input leave the roster unchanged and are surfaced as warnings
/// by the session layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RosterAdd {
    /// The name was appended.
    Added,

    /// The name is already present (case-sensitive exact match); no mutation.
    Duplicate,

    /// The name was empty after trimming; no mutation.
    EmptyName,

    /// The roster is at `MAX_ROSTER_MEMBERS`; no mutation.
    Full,
}

/// Ordered, de-duplicated set of assignable sales-team member names.
#[derive(Debug, Clone)]
pub struct Roster {
    members: Vec<String>,
}

impl Roster {
    /// Create a roster from seed members, de-duplicating while preserving
    /// order. Blank seed entries are dropped.
    pub fn new(seed: &[String]) -> Roster {
        let mut roster = Roster {
            members: Vec::new(),
        };
        for name in seed {
            roster.add(name);
        }
        roster
    }

    /// Append a member name.
    ///
    /// Idempotent on set membership: re-adding an existing name is a
    /// `Duplicate` outcome with no mutation.
    pub fn add(&mut self, name: &str) -> RosterAdd {
        let name = name.trim();
        if name.is_empty() {
            return RosterAdd::EmptyName;
        }
        if self.members.iter().any(|m| m == name) {
            tracing::debug!(member = name, "Roster add skipped: already present");
            return RosterAdd::Duplicate;
        }
        if self.members.len() >= MAX_ROSTER_MEMBERS {
            tracing::warn!(
                member = name,
                max = MAX_ROSTER_MEMBERS,
                "Roster add skipped: roster is full"
            );
            return RosterAdd::Full;
        }
        self.members.push(name.to_string());
        RosterAdd::Added
    }

    /// The current members, in insertion order.
    pub fn members(&self) -> &[String] {
        &self.members
    }

    /// Exact-match membership test.
    pub fn contains(&self, name: &str) -> bool {
        self.members.iter().any(|m| m == name)
    }
}

impl Default for Roster {
    /// A fresh roster seeded with the default member.
    fn default() -> Roster {
        Roster::new(&[DEFAULT_SEED_MEMBER.to_string()])
    }
}
