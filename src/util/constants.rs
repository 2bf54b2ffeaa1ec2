// LeadGrid - util/constants.rs
//
// Single source of truth for all named constants, limits, and defaults.

// =============================================================================
// Application metadata
// =============================================================================

/// Application display name.
pub const APP_NAME: &str = "LeadGrid";

/// Current application version.
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

// =============================================================================
// Roster defaults and limits
// =============================================================================

/// Sales-team member seeded into a fresh roster when no configuration
/// overrides it.
pub const DEFAULT_SEED_MEMBER: &str = "Yadvendra";

/// Maximum number of roster members in a session. The roster grows
/// monotonically (no removal), so a cap bounds growth from scripted input.
pub const MAX_ROSTER_MEMBERS: usize = 100;

// =============================================================================
// Export limits and defaults
// =============================================================================

/// Name of the single sheet in spreadsheet exports.
pub const SHEET_NAME: &str = "Filtered Data";

/// Maximum number of rows in a single export. Larger views are rejected
/// with a typed error; narrow the filters to reduce the view.
pub const MAX_EXPORT_ROWS: usize = 1_000_000;

/// Base name for export files when no output path is given on the CLI.
pub const DEFAULT_EXPORT_BASENAME: &str = "filtered_leads";

// =============================================================================
// Logging
// =============================================================================

/// Default log level when neither RUST_LOG, --debug, nor config specify one.
pub const DEFAULT_LOG_LEVEL: &str = "info";
