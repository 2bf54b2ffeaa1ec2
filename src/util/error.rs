// LeadGrid - util/error.rs
//
// Typed error hierarchy with context-preserving error chains.
// No string-based error propagation; all errors preserve the causal
// chain for diagnostic logging.
//
// Domain-level recoverable conditions (duplicate roster member, empty
// filtered view, unmatched reconcile key) are NOT errors; they are
// outcomes or notifications. Only structural failures live here.

use std::fmt;
use std::io;
use std::path::PathBuf;

/// Top-level error type for all LeadGrid operations.
/// Errors are categorised by the subsystem that produced them.
#[derive(Debug)]
pub enum LeadGridError {
    /// Dataset loading failed.
    Load(LoadError),

    /// A bulk-assignment precondition was violated.
    Assign(AssignError),

    /// Export operation failed.
    Export(ExportError),

    /// Configuration loading or validation failed.
    Config(ConfigError),

    /// I/O error with path context.
    Io {
        path: PathBuf,
        operation: &'static str,
        source: io::Error,
    },
}

impl fmt::Display for LeadGridError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Load(e) => write!(f, "Load error: {e}"),
            Self::Assign(e) => write!(f, "Assignment error: {e}"),
            Self::Export(e) => write!(f, "Export error: {e}"),
            Self::Config(e) => write!(f, "Configuration error: {e}"),
            Self::Io {
                path,
                operation,
                source,
            } => write!(
                f,
                "I/O error during {operation} on '{}': {source}",
                path.display()
            ),
        }
    }
}

impl std::error::Error for LeadGridError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Load(e) => Some(e),
            Self::Assign(e) => Some(e),
            Self::Export(e) => Some(e),
            Self::Config(e) => Some(e),
            Self::Io { source, .. } => Some(source),
        }
    }
}

// ---------------------------------------------------------------------------
// Load errors
// ---------------------------------------------------------------------------

/// Errors related to loading the canonical dataset from CSV.
///
/// Per-record problems (duplicate domain, missing key) are non-fatal and
/// reported as `loader::LoadWarning`s, not errors.
#[derive(Debug)]
pub enum LoadError {
    /// A required column is absent from the source header.
    MissingColumn { column: &'static str },

    /// The source has no header row at all.
    EmptyInput,

    /// CSV deserialisation error (malformed quoting, bad UTF-8, etc.).
    Csv { source: csv::Error },
}

impl fmt::Display for LoadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingColumn { column } => {
                write!(f, "required column '{column}' is missing from the input")
            }
            Self::EmptyInput => write!(f, "input contains no header row"),
            Self::Csv { source } => write!(f, "CSV read error: {source}"),
        }
    }
}

impl std::error::Error for LoadError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Csv { source } => Some(source),
            _ => None,
        }
    }
}

impl From<LoadError> for LeadGridError {
    fn from(e: LoadError) -> Self {
        Self::Load(e)
    }
}

// ---------------------------------------------------------------------------
// Assignment errors
// ---------------------------------------------------------------------------

/// Bulk-assignment precondition violations.
///
/// Both variants reject the request with zero leads assigned; `assigned_to`
/// is never written with an unregistered name.
#[derive(Debug)]
pub enum AssignError {
    /// The target member is not in the team roster.
    UnknownMember { member: String },

    /// The selected region does not appear in the current filtered view.
    RegionNotInView { region: String },
}

impl fmt::Display for AssignError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnknownMember { member } => {
                write!(f, "'{member}' is not a registered sales-team member")
            }
            Self::RegionNotInView { region } => {
                write!(f, "region '{region}' has no leads in the current view")
            }
        }
    }
}

impl std::error::Error for AssignError {}

impl From<AssignError> for LeadGridError {
    fn from(e: AssignError) -> Self {
        Self::Assign(e)
    }
}

// ---------------------------------------------------------------------------
// Export errors
// ---------------------------------------------------------------------------

/// Errors related to export operations.
#[derive(Debug)]
pub enum ExportError {
    /// A projection names a column that is not part of the lead schema.
    UnknownColumn { column: String },

    /// The projection is empty; an export needs at least one column.
    EmptyProjection,

    /// Export would exceed the maximum row count.
    TooManyRows { count: usize, max: usize },

    /// CSV serialisation error.
    Csv { source: csv::Error },

    /// Spreadsheet serialisation error.
    Xlsx { source: rust_xlsxwriter::XlsxError },

    /// I/O error flushing the export payload.
    Io { source: io::Error },
}

impl fmt::Display for ExportError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnknownColumn { column } => {
                write!(f, "unknown column '{column}' in export projection")
            }
            Self::EmptyProjection => write!(f, "export projection is empty"),
            Self::TooManyRows { count, max } => write!(
                f,
                "export of {count} rows exceeds maximum of {max}; \
                 apply filters to reduce the view"
            ),
            Self::Csv { source } => write!(f, "CSV export error: {source}"),
            Self::Xlsx { source } => write!(f, "spreadsheet export error: {source}"),
            Self::Io { source } => write!(f, "export I/O error: {source}"),
        }
    }
}

impl std::error::Error for ExportError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Csv { source } => Some(source),
            Self::Xlsx { source } => Some(source),
            Self::Io { source } => Some(source),
            _ => None,
        }
    }
}

impl From<ExportError> for LeadGridError {
    fn from(e: ExportError) -> Self {
        Self::Export(e)
    }
}

// ---------------------------------------------------------------------------
// Config errors
// ---------------------------------------------------------------------------

/// Errors related to configuration loading.
#[derive(Debug)]
pub enum ConfigError {
    /// TOML parsing failed.
    TomlParse {
        path: PathBuf,
        source: toml::de::Error,
    },

    /// I/O error reading the config file.
    Io { path: PathBuf, source: io::Error },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::TomlParse { path, source } => {
                write!(f, "config parse error '{}': {source}", path.display())
            }
            Self::Io { path, source } => {
                write!(f, "config I/O error '{}': {source}", path.display())
            }
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::TomlParse { source, .. } => Some(source),
            Self::Io { source, .. } => Some(source),
        }
    }
}

impl From<ConfigError> for LeadGridError {
    fn from(e: ConfigError) -> Self {
        Self::Config(e)
    }
}

/// Convenience type alias for LeadGrid results.
pub type Result<T> = std::result::Result<T, LeadGridError>;
