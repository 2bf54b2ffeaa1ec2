// LeadGrid - core/loader.rs
//
// Dataset loader: normalises raw CSV records into the canonical schema.
// Core layer: accepts Read trait objects, never touches the filesystem
// directly.
//
// Per-record problems are flagged and skipped (non-fatal warnings), not
// silently trusted; only structural problems (a missing required header
// column, a malformed stream) are errors.

use crate::core::model::{Column, Lead};
use crate::util::error::LoadError;
use std::collections::HashSet;
use std::fmt;
use std::io::Read;

/// A non-fatal problem with a single source record. The record is
/// skipped; loading continues.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadWarning {
    /// The row's `domain` cell was empty; the key is mandatory.
    MissingDomain { record: u64 },

    /// The row repeats a `domain` already loaded; `domain` must be
    /// globally unique, so the first occurrence wins.
    DuplicateDomain { record: u64, domain: String },
}

impl fmt::Display for LoadWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingDomain { record } => {
                write!(f, "record {record}: missing domain, row skipped")
            }
            Self::DuplicateDomain { record, domain } => {
                write!(f, "record {record}: duplicate domain '{domain}', row skipped")
            }
        }
    }
}

/// Result of loading one source into the canonical dataset.
#[derive(Debug)]
pub struct LoadResult {
    /// The canonical dataset, in source row order.
    pub leads: Vec<Lead>,

    /// Rows that were flagged and skipped.
    pub warnings: Vec<LoadWarning>,
}

/// Resolved positions of schema columns within the source header.
struct HeaderMap {
    domain: usize,
    region: usize,
    category: usize,
    status: usize,
    sales: usize,
    /// Absent on legacy exports; every lead then loads unassigned.
    /// Re-running the load over a source that has the column is the
    /// same one-time migration, so the behaviour is idempotent.
    assigned_to: Option<usize>,
    // Passthrough columns are all optional; absent ones load empty.
    linkedin_url: Option<usize>,
    instagram_url: Option<usize>,
    description: Option<usize>,
    platform: Option<usize>,
    city: Option<usize>,
    state: Option<usize>,
    store_locator_url: Option<usize>,
    phones: Option<usize>,
    shipping_carriers: Option<usize>,
}

impl HeaderMap {
    fn resolve(headers: &csv::StringRecord) -> Result<HeaderMap, LoadError> {
        let position = |column: Column| headers.iter().position(|h| h == column.name());
        let required = |column: Column| {
            position(column).ok_or(LoadError::MissingColumn {
                column: column.name(),
            })
        };

        Ok(HeaderMap {
            domain: required(Column::Domain)?,
            region: required(Column::Region)?,
            category: required(Column::Category)?,
            status: required(Column::Status)?,
            sales: required(Column::EstimatedYearlySales)?,
            assigned_to: position(Column::AssignedTo),
            linkedin_url: position(Column::LinkedinUrl),
            instagram_url: position(Column::InstagramUrl),
            description: position(Column::Description),
            platform: position(Column::Platform),
            city: position(Column::City),
            state: position(Column::State),
            store_locator_url: position(Column::StoreLocatorUrl),
            phones: position(Column::Phones),
            shipping_carriers: position(Column::ShippingCarriers),
        })
    }
}

/// Load the canonical dataset from a CSV source.
///
/// The header must contain the required columns (`domain`, `region`,
/// `Head_category`, `status`, `estimated_yearly_sales`). `assigned_to`
/// and the passthrough descriptive columns are optional. A non-numeric
/// sales value coerces to `None`, never an error.
pub fn load_csv<R: Read>(reader: R) -> Result<LoadResult, LoadError> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .flexible(true)
        .from_reader(reader);

    let headers = csv_reader
        .headers()
        .map_err(|e| LoadError::Csv { source: e })?
        .clone();
    if headers.is_empty() {
        return Err(LoadError::EmptyInput);
    }
    let map = HeaderMap::resolve(&headers)?;

    if map.assigned_to.is_none() {
        tracing::debug!("Source has no assigned_to column; initialising to null");
    }

    let mut leads = Vec::new();
    let mut warnings = Vec::new();
    let mut seen_domains: HashSet<String> = HashSet::new();

    for (row_idx, record) in csv_reader.records().enumerate() {
        let record = record.map_err(|e| LoadError::Csv { source: e })?;
        // 1-based, counting the header as row 1, matching what an
        // operator sees in a spreadsheet program.
        let record_number = row_idx as u64 + 2;

        let cell = |idx: usize| record.get(idx).unwrap_or("").to_string();
        let optional_cell = |idx: Option<usize>| idx.map(cell).unwrap_or_default();

        let domain = cell(map.domain).trim().to_string();
        if domain.is_empty() {
            tracing::debug!(record = record_number, "Row skipped: missing domain");
            warnings.push(LoadWarning::MissingDomain {
                record: record_number,
            });
            continue;
        }
        if !seen_domains.insert(domain.clone()) {
            tracing::debug!(record = record_number, domain = %domain, "Row skipped: duplicate domain");
            warnings.push(LoadWarning::DuplicateDomain {
                record: record_number,
                domain,
            });
            continue;
        }

        leads.push(Lead {
            domain,
            region: cell(map.region),
            category: cell(map.category),
            status: cell(map.status),
            estimated_yearly_sales: coerce_sales(&cell(map.sales)),
            assigned_to: map.assigned_to.and_then(|idx| {
                let value = cell(idx);
                let value = value.trim();
                (!value.is_empty()).then(|| value.to_string())
            }),
            linkedin_url: optional_cell(map.linkedin_url),
            instagram_url: optional_cell(map.instagram_url),
            description: optional_cell(map.description),
            platform: optional_cell(map.platform),
            city: optional_cell(map.city),
            state: optional_cell(map.state),
            store_locator_url: optional_cell(map.store_locator_url),
            phones: optional_cell(map.phones),
            shipping_carriers: optional_cell(map.shipping_carriers),
        });
    }

    tracing::info!(
        leads = leads.len(),
        skipped = warnings.len(),
        "Dataset loaded"
    );
    Ok(LoadResult { leads, warnings })
}

/// Coerce a raw sales cell to a number. Non-numeric values (including
/// the empty string) become `None`, never an error.
fn coerce_sales(raw: &str) -> Option<f64> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }
    match raw.parse::<f64>() {
        Ok(value) => Some(value),
        Err(_) => {
            tracing::debug!(value = raw, "Non-numeric sales value coerced to null");
            None
        }
    }
}
