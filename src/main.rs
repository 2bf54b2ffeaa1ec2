// LeadGrid - main.rs
//
// CLI entry point. Handles:
// 1. CLI argument parsing
// 2. Configuration loading
// 3. Logging initialisation (debug mode support)
// 4. A scripted session: load -> filter -> roster/assign -> export

use clap::Parser;
use leadgrid::app::config::AppConfig;
use leadgrid::app::session::{NoticeKind, Notification, Session};
use leadgrid::core::export::{resolve_projection, ExportFormat};
use leadgrid::core::loader;
use leadgrid::core::model::Column;
use leadgrid::core::roster::Roster;
use leadgrid::util::constants::{APP_VERSION, DEFAULT_EXPORT_BASENAME};
use leadgrid::util::error::{LeadGridError, Result};
use leadgrid::util::logging;
use std::collections::HashSet;
use std::path::PathBuf;

/// Export format argument.
#[derive(clap::ValueEnum, Debug, Clone, Copy)]
enum FormatArg {
    Csv,
    Xlsx,
}

impl From<FormatArg> for ExportFormat {
    fn from(arg: FormatArg) -> ExportFormat {
        match arg {
            FormatArg::Csv => ExportFormat::Csv,
            FormatArg::Xlsx => ExportFormat::Xlsx,
        }
    }
}

/// Parse a `REGION=MEMBER` bulk-assignment argument.
fn parse_assign(raw: &str) -> std::result::Result<(String, String), String> {
    match raw.split_once('=') {
        Some((region, member)) if !region.is_empty() && !member.is_empty() => {
            Ok((region.to_string(), member.to_string()))
        }
        _ => Err(format!("expected REGION=MEMBER, got '{raw}'")),
    }
}

/// LeadGrid - lead-management engine.
///
/// Load a CSV of sales leads, filter by region/category/status,
/// optionally bulk-assign leads to a team member, and export the
/// filtered view as CSV or a spreadsheet.
#[derive(Parser, Debug)]
#[command(name = "leadgrid", version, about)]
struct Cli {
    /// Path to the leads CSV file.
    csv: PathBuf,

    /// Regions to include (comma-separated).
    #[arg(long, value_delimiter = ',', required = true)]
    regions: Vec<String>,

    /// Categories to include (comma-separated).
    #[arg(long, value_delimiter = ',', required = true)]
    categories: Vec<String>,

    /// Exact status to match.
    #[arg(long)]
    status: String,

    /// Sales-team members to add to the roster before assigning.
    #[arg(long = "add-member", value_name = "NAME")]
    add_members: Vec<String>,

    /// Bulk-assign all view leads of a region to a member.
    #[arg(long, value_parser = parse_assign, value_name = "REGION=MEMBER")]
    assign: Option<(String, String)>,

    /// Export format.
    #[arg(long, value_enum, default_value = "csv")]
    format: FormatArg,

    /// Output path (defaults to filtered_leads.<ext> in the working directory).
    #[arg(short, long)]
    out: Option<PathBuf>,

    /// Columns for the export projection (comma-separated; default: all).
    #[arg(long, value_delimiter = ',')]
    columns: Vec<String>,

    /// Print summary statistics for the filtered view.
    #[arg(long)]
    summary: bool,

    /// Path to a TOML configuration file.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Enable debug logging (equivalent to RUST_LOG=debug).
    #[arg(short, long)]
    debug: bool,
}

fn print_notification(notice: &Notification) {
    let prefix = match notice.kind {
        NoticeKind::Info => "info",
        NoticeKind::Success => "ok",
        NoticeKind::Warning => "warning",
    };
    println!("{prefix}: {}", notice.message);
}

fn run(cli: Cli, config: AppConfig) -> Result<()> {
    // Load the canonical dataset.
    let file = std::fs::File::open(&cli.csv).map_err(|e| LeadGridError::Io {
        path: cli.csv.clone(),
        operation: "open",
        source: e,
    })?;
    let loaded = loader::load_csv(file)?;
    for warning in &loaded.warnings {
        tracing::warn!(warning = %warning, "Load warning");
    }

    let mut session = Session::new(loaded.leads, Roster::new(&config.roster.seed_members));

    for name in &cli.add_members {
        print_notification(&session.add_roster_member(name));
    }

    let regions: HashSet<String> = cli.regions.iter().cloned().collect();
    let categories: HashSet<String> = cli.categories.iter().cloned().collect();
    print_notification(&session.set_filter(regions, categories, cli.status.clone()));

    if let Some((region, member)) = &cli.assign {
        let (_, notice) = session.bulk_assign(region, member);
        print_notification(&notice);
    }

    if cli.summary {
        let summary = session.summary();
        println!("rows: {}", summary.rows);
        if let (Some(min), Some(max), Some(mean)) =
            (summary.sales_min, summary.sales_max, summary.sales_mean)
        {
            println!(
                "estimated_yearly_sales: n={} min={min} max={max} mean={mean:.2}",
                summary.sales_count
            );
        }
        for (region, count) in &summary.by_region {
            println!("region {region}: {count}");
        }
    }

    // Export the filtered view.
    let format = ExportFormat::from(cli.format);
    let projection: Vec<Column> = if !cli.columns.is_empty() {
        resolve_projection(&cli.columns).map_err(LeadGridError::Export)?
    } else if let Some(names) = &config.export.projection {
        resolve_projection(names).map_err(LeadGridError::Export)?
    } else {
        Column::all().to_vec()
    };

    let payload = session.export(format, &projection)?;
    let out_path = cli.out.unwrap_or_else(|| {
        PathBuf::from(format!("{DEFAULT_EXPORT_BASENAME}.{}", format.extension()))
    });
    std::fs::write(&out_path, payload).map_err(|e| LeadGridError::Io {
        path: out_path.clone(),
        operation: "write",
        source: e,
    })?;
    println!(
        "ok: exported {} rows to {}",
        session.view().len(),
        out_path.display()
    );

    Ok(())
}

fn main() {
    let cli = Cli::parse();

    // Config is loaded before logging so its level can participate in
    // the filter priority; config failures therefore go to stderr raw.
    let config = match &cli.config {
        Some(path) => match AppConfig::load(path) {
            Ok(config) => config,
            Err(e) => {
                eprintln!("Error: {e}");
                std::process::exit(1);
            }
        },
        None => AppConfig::default(),
    };

    logging::init(cli.debug, config.logging.level.as_deref());
    tracing::info!(version = APP_VERSION, debug = cli.debug, "LeadGrid starting");

    if let Err(e) = run(cli, config) {
        tracing::error!(error = %e, "Fatal error");
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
