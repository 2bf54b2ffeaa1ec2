// LeadGrid - tests/e2e_pipeline.rs
//
// End-to-end tests for the load -> filter -> assign -> export pipeline.
//
// These tests exercise the real CSV codec, the real reconciler, and the
// real export writers over an on-disk fixture. No mocks, no stubs.

use leadgrid::app::session::{NoticeKind, Session};
use leadgrid::core::export::ExportFormat;
use leadgrid::core::loader;
use leadgrid::core::model::Column;
use leadgrid::core::roster::Roster;
use std::collections::HashSet;
use std::fs::File;
use std::path::PathBuf;

// =============================================================================
// Helpers
// =============================================================================

/// Absolute path to the on-disk fixture file.
fn fixture(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name)
}

fn load_sample() -> loader::LoadResult {
    let file = File::open(fixture("leads_sample.csv")).expect("fixture must exist");
    loader::load_csv(file).expect("fixture must load")
}

fn set(values: &[&str]) -> HashSet<String> {
    values.iter().map(|s| s.to_string()).collect()
}

fn sample_session() -> Session {
    Session::new(load_sample().leads, Roster::default())
}

// =============================================================================
// Load
// =============================================================================

/// The fixture has 10 clean rows and no assigned_to column: everything
/// loads unassigned, non-numeric and empty sales cells coerce to null.
#[test]
fn e2e_load_normalises_fixture() {
    let result = load_sample();
    assert!(result.warnings.is_empty(), "unexpected: {:?}", result.warnings);
    assert_eq!(result.leads.len(), 10);
    assert!(result.leads.iter().all(|l| l.assigned_to.is_none()));

    let cedarline = result
        .leads
        .iter()
        .find(|l| l.domain == "cedarline.com")
        .unwrap();
    assert_eq!(cedarline.estimated_yearly_sales, None); // "unknown"
    let elmcraft = result
        .leads
        .iter()
        .find(|l| l.domain == "elmcraft.com")
        .unwrap();
    assert_eq!(elmcraft.estimated_yearly_sales, None); // empty cell
    let acme = result
        .leads
        .iter()
        .find(|l| l.domain == "acme-stores.com")
        .unwrap();
    assert_eq!(acme.estimated_yearly_sales, Some(1_200_000.0));
    assert_eq!(acme.shipping_carriers, "UPS;FedEx");
}

// =============================================================================
// Filter -> assign -> export
// =============================================================================

/// Scenario: 5 of the 10 fixture leads are US/Retail/active.
#[test]
fn e2e_filter_yields_the_five_us_retail_active_leads() {
    let mut session = sample_session();
    let notice = session.set_filter(set(&["US"]), set(&["Retail"]), "active".to_string());
    assert_eq!(notice.kind, NoticeKind::Info);

    let domains: Vec<&str> = session.view_leads().map(|l| l.domain.as_str()).collect();
    assert_eq!(
        domains,
        vec![
            "acme-stores.com",
            "brightware.com",
            "cedarline.com",
            "duskwear.com",
            "elmcraft.com"
        ]
    );
}

/// Full pipeline: bulk-assign the US view to Alice, then verify both
/// the canonical dataset and the exported artefact reflect it.
#[test]
fn e2e_bulk_assign_then_export() {
    let mut session = sample_session();
    session.set_filter(set(&["US"]), set(&["Retail"]), "active".to_string());
    assert_eq!(session.add_roster_member("Alice").kind, NoticeKind::Success);

    let (count, notice) = session.bulk_assign("US", "Alice");
    assert_eq!(count, 5);
    assert_eq!(notice.message, "Assigned 5 leads in US to Alice.");

    // The other 5 leads are untouched.
    let unassigned = session
        .dataset()
        .iter()
        .filter(|l| l.assigned_to.is_none())
        .count();
    assert_eq!(unassigned, 5);

    let payload = session
        .export(ExportFormat::Csv, &[Column::Domain, Column::AssignedTo])
        .unwrap();
    let output = String::from_utf8(payload).unwrap();
    let mut lines = output.lines();
    assert_eq!(lines.next(), Some("domain,assigned_to"));
    assert!(lines.all(|line| line.ends_with(",Alice")));
}

/// Export round-trip: reading back the exported CSV and re-projecting
/// the same columns reproduces the view's values exactly.
#[test]
fn e2e_csv_export_round_trip() {
    let mut session = sample_session();
    session.set_filter(
        set(&["US", "EU"]),
        set(&["Retail", "Fashion"]),
        "active".to_string(),
    );
    let projection = Column::all();

    let dir = tempfile::TempDir::new().unwrap();
    let path = dir.path().join("export.csv");
    std::fs::write(&path, session.export(ExportFormat::Csv, projection).unwrap()).unwrap();

    let mut reader = csv::Reader::from_path(&path).unwrap();
    let headers = reader.headers().unwrap().clone();
    let expected_headers: Vec<&str> = projection.iter().map(|c| c.name()).collect();
    assert_eq!(headers.iter().collect::<Vec<_>>(), expected_headers);

    let records: Vec<csv::StringRecord> = reader.records().map(|r| r.unwrap()).collect();
    let view_leads: Vec<_> = session.view_leads().collect();
    assert_eq!(records.len(), view_leads.len());
    for (record, lead) in records.iter().zip(view_leads.iter().copied()) {
        for (idx, column) in projection.iter().enumerate() {
            assert_eq!(
                record.get(idx).unwrap(),
                column.value(lead),
                "mismatch in column {column} for {}",
                lead.domain
            );
        }
    }
}

/// Spreadsheet export yields a well-formed xlsx container for the same view.
#[test]
fn e2e_xlsx_export_writes_a_workbook() {
    let mut session = sample_session();
    session.set_filter(set(&["US"]), set(&["Retail"]), "active".to_string());

    let payload = session.export(ExportFormat::Xlsx, Column::all()).unwrap();
    assert_eq!(&payload[0..2], b"PK", "xlsx must be a zip container");

    let dir = tempfile::TempDir::new().unwrap();
    let path = dir.path().join("export.xlsx");
    std::fs::write(&path, &payload).unwrap();
    assert_eq!(std::fs::metadata(&path).unwrap().len(), payload.len() as u64);
}

// =============================================================================
// Empty-view handling
// =============================================================================

/// Deselecting every category narrows the view to nothing even though
/// the dataset is non-empty; the notification names the active filters.
#[test]
fn e2e_empty_category_selection_reports_no_data() {
    let mut session = sample_session();
    let notice = session.set_filter(set(&["US"]), HashSet::new(), "active".to_string());

    assert!(session.view().is_empty());
    assert!(notice.message.starts_with("No data available for the filters:"));
    assert!(notice.message.contains("regions [US]"));

    // An export over the empty view is a header-only artefact, not an error.
    let payload = session.export(ExportFormat::Csv, Column::all()).unwrap();
    let output = String::from_utf8(payload).unwrap();
    assert_eq!(output.lines().count(), 1);
}
