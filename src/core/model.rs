// LeadGrid - core/model.rs
//
// Core data model types. Pure data definitions with no I/O, no UI,
// no platform dependencies.
//
// These types are the shared vocabulary across all layers.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;

// =============================================================================
// Lead (normalised output of loading)
// =============================================================================

/// A single business lead, normalised to the fixed schema.
///
/// This is the core data unit that flows through filtering, editing,
/// assignment, and export. `domain` is the only stable identifier and is
/// globally unique within a canonical dataset.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Lead {
    /// Unique key for the lead (e.g. "acme-stores.com").
    pub domain: String,

    /// Sales region (categorical, e.g. "US", "EU").
    pub region: String,

    /// Head category of the business (categorical, e.g. "Retail").
    pub category: String,

    /// Lead status (categorical, e.g. "active").
    pub status: String,

    /// Estimated yearly sales. `None` when the source value was absent
    /// or non-numeric (coerced at load time, never an error).
    pub estimated_yearly_sales: Option<f64>,

    /// Sales-team member this lead is assigned to. Must be `None` or a
    /// name present in the roster at the time it is written.
    pub assigned_to: Option<String>,

    // Opaque descriptive fields, passed through unmodified.
    pub linkedin_url: String,
    pub instagram_url: String,
    pub description: String,
    pub platform: String,
    pub city: String,
    pub state: String,
    pub store_locator_url: String,
    pub phones: String,
    pub shipping_carriers: String,
}

// =============================================================================
// Column (fixed output schema)
// =============================================================================

/// The closed set of lead columns, in default display/export order.
///
/// Replaces the original's implicit dynamic column set: projections can
/// only name columns from this enum, so a typo is a typed error rather
/// than a silently empty output column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Column {
    Domain,
    Region,
    EstimatedYearlySales,
    LinkedinUrl,
    InstagramUrl,
    Category,
    Status,
    Description,
    Platform,
    City,
    State,
    StoreLocatorUrl,
    Phones,
    ShippingCarriers,
    AssignedTo,
}

impl Column {
    /// All columns in the default display order (domain first, matching
    /// the original dashboard's table layout).
    pub fn all() -> &'static [Column] {
        &[
            Column::Domain,
            Column::Region,
            Column::EstimatedYearlySales,
            Column::LinkedinUrl,
            Column::InstagramUrl,
            Column::Category,
            Column::Status,
            Column::Description,
            Column::Platform,
            Column::City,
            Column::State,
            Column::StoreLocatorUrl,
            Column::Phones,
            Column::ShippingCarriers,
            Column::AssignedTo,
        ]
    }

    /// Canonical header name, matching the input schema spelling
    /// (`Head_category` keeps its source capitalisation).
    pub fn name(&self) -> &'static str {
        match self {
            Column::Domain => "domain",
            Column::Region => "region",
            Column::EstimatedYearlySales => "estimated_yearly_sales",
            Column::LinkedinUrl => "linkedin_url",
            Column::InstagramUrl => "instagram_url",
            Column::Category => "Head_category",
            Column::Status => "status",
            Column::Description => "description",
            Column::Platform => "platform",
            Column::City => "city",
            Column::State => "state",
            Column::StoreLocatorUrl => "store_locator_url",
            Column::Phones => "phones",
            Column::ShippingCarriers => "shipping_carriers",
            Column::AssignedTo => "assigned_to",
        }
    }

    /// Look up a column by header name (exact match).
    pub fn from_name(name: &str) -> Option<Column> {
        Column::all().iter().copied().find(|c| c.name() == name)
    }

    /// Extract this column's value from a lead as display/export text.
    ///
    /// Nullable fields render as the empty string when `None`; sales
    /// values use plain decimal formatting with no grouping.
    pub fn value(&self, lead: &Lead) -> String {
        match self {
            Column::Domain => lead.domain.clone(),
            Column::Region => lead.region.clone(),
            Column::EstimatedYearlySales => lead
                .estimated_yearly_sales
                .map(|v| v.to_string())
                .unwrap_or_default(),
            Column::LinkedinUrl => lead.linkedin_url.clone(),
            Column::InstagramUrl => lead.instagram_url.clone(),
            Column::Category => lead.category.clone(),
            Column::Status => lead.status.clone(),
            Column::Description => lead.description.clone(),
            Column::Platform => lead.platform.clone(),
            Column::City => lead.city.clone(),
            Column::State => lead.state.clone(),
            Column::StoreLocatorUrl => lead.store_locator_url.clone(),
            Column::Phones => lead.phones.clone(),
            Column::ShippingCarriers => lead.shipping_carriers.clone(),
            Column::AssignedTo => lead.assigned_to.clone().unwrap_or_default(),
        }
    }
}

impl std::fmt::Display for Column {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

// =============================================================================
// Filter spec
// =============================================================================

/// Complete filter state. All dimensions are AND-combined when applied.
///
/// Empty `regions` or `categories` matches NOTHING, not everything: an
/// operator who deselects every region has deliberately narrowed the view
/// to zero rows.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FilterSpec {
    /// Regions to include.
    pub regions: HashSet<String>,

    /// Categories to include.
    pub categories: HashSet<String>,

    /// Exact status to match.
    pub status: String,
}

impl FilterSpec {
    /// Check whether a single lead satisfies every dimension.
    pub fn matches(&self, lead: &Lead) -> bool {
        self.regions.contains(&lead.region)
            && self.categories.contains(&lead.category)
            && self.status == lead.status
    }

    /// Human-readable summary of the active filter values, used in the
    /// empty-view notification.
    pub fn describe(&self) -> String {
        let mut regions: Vec<&str> = self.regions.iter().map(String::as_str).collect();
        regions.sort_unstable();
        let mut categories: Vec<&str> = self.categories.iter().map(String::as_str).collect();
        categories.sort_unstable();
        format!(
            "regions [{}], categories [{}], status '{}'",
            regions.join(", "),
            categories.join(", "),
            self.status
        )
    }
}

// =============================================================================
// View summary statistics
// =============================================================================

/// Summary statistics for the current filtered view.
///
/// Display-only: derived from the view, never written back.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ViewSummary {
    /// Number of rows in the view.
    pub rows: usize,

    /// Rows with a non-null estimated_yearly_sales value.
    pub sales_count: usize,

    /// Minimum non-null sales value.
    pub sales_min: Option<f64>,

    /// Maximum non-null sales value.
    pub sales_max: Option<f64>,

    /// Mean of the non-null sales values.
    pub sales_mean: Option<f64>,

    /// Row count per region, in order of first appearance in the view.
    pub by_region: Vec<(String, usize)>,
}

impl ViewSummary {
    /// Compute summary statistics over the view's rows.
    ///
    /// `view` holds indices into `dataset` (see `core::filter`); indices
    /// out of range are ignored.
    pub fn compute(dataset: &[Lead], view: &[usize]) -> ViewSummary {
        let mut summary = ViewSummary::default();
        let mut sales_total = 0.0;

        for lead in view.iter().filter_map(|&i| dataset.get(i)) {
            summary.rows += 1;

            if let Some(sales) = lead.estimated_yearly_sales {
                summary.sales_count += 1;
                sales_total += sales;
                summary.sales_min = Some(match summary.sales_min {
                    Some(min) => min.min(sales),
                    None => sales,
                });
                summary.sales_max = Some(match summary.sales_max {
                    Some(max) => max.max(sales),
                    None => sales,
                });
            }

            match summary
                .by_region
                .iter_mut()
                .find(|(region, _)| region == &lead.region)
            {
                Some((_, count)) => *count += 1,
                None => summary.by_region.push((lead.region.clone(), 1)),
            }
        }

        if summary.sales_count > 0 {
            summary.sales_mean = Some(sales_total / summary.sales_count as f64);
        }

        summary
    }
}
