//! Core data model for the launch-records dashboard.
//!
//! Everything downstream of the loader works with these types: immutable
//! launch records, the selection state driven by the UI controls, and the
//! chart specifications handed to the renderer.

use serde::Serialize;
use std::fmt;
use thiserror::Error;

/// Lower bound of the payload slider, in kilograms.
pub const PAYLOAD_SLIDER_MIN: f64 = 0.0;
/// Upper bound of the payload slider, in kilograms.
pub const PAYLOAD_SLIDER_MAX: f64 = 10_000.0;
/// Distance between payload slider marks, in kilograms.
pub const PAYLOAD_SLIDER_STEP: f64 = 1_000.0;

/// Outcome of a single launch.
///
/// The dataset encodes this as the binary `class` column: 1 for a
/// successful landing, 0 for a failed one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Outcome {
    /// `class` = 0.
    Failure,
    /// `class` = 1.
    Success,
}

impl Outcome {
    /// Maps a raw `class` column value to an outcome.
    pub fn from_class(class: i64) -> Option<Self> {
        match class {
            0 => Some(Outcome::Failure),
            1 => Some(Outcome::Success),
            _ => None,
        }
    }

    /// The binary class value behind this outcome.
    pub fn class(&self) -> u8 {
        match self {
            Outcome::Failure => 0,
            Outcome::Success => 1,
        }
    }

    /// Fixed chart color for this outcome.
    pub fn color(&self) -> &'static str {
        match self {
            Outcome::Failure => "red",
            Outcome::Success => "green",
        }
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Outcome::Failure => write!(f, "Failure"),
            Outcome::Success => write!(f, "Success"),
        }
    }
}

/// One row of the launch dataset. Immutable for the process lifetime.
#[derive(Debug, Clone, PartialEq)]
pub struct LaunchRecord {
    /// Name of the launch site.
    pub site: String,
    /// Payload mass in kilograms.
    pub payload_mass_kg: f64,
    /// Whether the launch succeeded.
    pub outcome: Outcome,
    /// Booster version category, e.g. "FT" or "v1.1".
    pub booster_category: String,
}

/// The loaded launch records plus the lookups derived from them.
///
/// Built once at startup and shared read-only afterwards; every chart is
/// recomputed from it on demand.
#[derive(Debug, Clone)]
pub struct LaunchDataset {
    records: Vec<LaunchRecord>,
    sites: Vec<String>,
    payload_min: f64,
    payload_max: f64,
}

impl LaunchDataset {
    /// Builds a dataset from loaded records, indexing distinct sites in
    /// first-appearance order along with the observed payload bounds.
    ///
    /// Returns `None` for an empty record list, since the payload bounds
    /// would be undefined.
    pub fn from_records(records: Vec<LaunchRecord>) -> Option<Self> {
        let first = records.first()?;
        let mut sites: Vec<String> = Vec::new();
        let mut payload_min = first.payload_mass_kg;
        let mut payload_max = first.payload_mass_kg;

        for record in &records {
            if !sites.iter().any(|s| s == &record.site) {
                sites.push(record.site.clone());
            }
            payload_min = payload_min.min(record.payload_mass_kg);
            payload_max = payload_max.max(record.payload_mass_kg);
        }

        Some(Self {
            records,
            sites,
            payload_min,
            payload_max,
        })
    }

    /// All records, in dataset order.
    pub fn records(&self) -> &[LaunchRecord] {
        &self.records
    }

    /// Distinct site names in order of first appearance.
    pub fn sites(&self) -> &[String] {
        &self.sites
    }

    /// Smallest and largest observed payload mass, in kilograms.
    pub fn payload_bounds(&self) -> (f64, f64) {
        (self.payload_min, self.payload_max)
    }

    /// Number of records with the given outcome.
    pub fn count_outcome(&self, outcome: Outcome) -> usize {
        self.records.iter().filter(|r| r.outcome == outcome).count()
    }

    /// Aggregate figures shown at startup and by the summary endpoint.
    pub fn summary(&self) -> DatasetSummary {
        DatasetSummary {
            records: self.records.len(),
            sites: self.sites.len(),
            successes: self.count_outcome(Outcome::Success),
            failures: self.count_outcome(Outcome::Failure),
            payload_min_kg: self.payload_min,
            payload_max_kg: self.payload_max,
        }
    }
}

/// Headline statistics for a loaded dataset.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DatasetSummary {
    /// Total number of launch records.
    pub records: usize,
    /// Number of distinct launch sites.
    pub sites: usize,
    /// Records with a successful outcome.
    pub successes: usize,
    /// Records with a failed outcome.
    pub failures: usize,
    /// Smallest observed payload mass, in kilograms.
    pub payload_min_kg: f64,
    /// Largest observed payload mass, in kilograms.
    pub payload_max_kg: f64,
}

/// Site selection coming from the dropdown control.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SiteFilter {
    /// The "ALL" dropdown value: no site restriction.
    All,
    /// Restrict to records launched from exactly this site.
    Site(String),
}

impl SiteFilter {
    /// Dropdown value representing the all-sites selection.
    pub const ALL_VALUE: &'static str = "ALL";

    /// Parses a dropdown value into a filter.
    pub fn parse(value: &str) -> Self {
        if value == Self::ALL_VALUE {
            SiteFilter::All
        } else {
            SiteFilter::Site(value.to_string())
        }
    }

    /// Whether the record passes this filter.
    pub fn matches(&self, record: &LaunchRecord) -> bool {
        match self {
            SiteFilter::All => true,
            SiteFilter::Site(site) => record.site == *site,
        }
    }
}

impl fmt::Display for SiteFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SiteFilter::All => write!(f, "{}", Self::ALL_VALUE),
            SiteFilter::Site(site) => write!(f, "{}", site),
        }
    }
}

/// Why a payload range could not be constructed.
#[derive(Debug, Error, PartialEq)]
pub enum RangeError {
    #[error("payload bounds must be finite numbers")]
    NotFinite,
    #[error("payload range is inverted: low {low} exceeds high {high}")]
    Inverted { low: f64, high: f64 },
}

/// Inclusive payload-mass range selected by the slider.
///
/// Construction enforces `low <= high`, so a value of this type is always
/// a well-formed interval.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PayloadRange {
    low: f64,
    high: f64,
}

impl PayloadRange {
    /// Builds a range, rejecting non-finite or inverted bounds.
    pub fn new(low: f64, high: f64) -> Result<Self, RangeError> {
        if !low.is_finite() || !high.is_finite() {
            return Err(RangeError::NotFinite);
        }
        if low > high {
            return Err(RangeError::Inverted { low, high });
        }
        Ok(Self { low, high })
    }

    /// The range covering every payload in the dataset.
    pub fn spanning(dataset: &LaunchDataset) -> Self {
        // Dataset bounds are min/max over finite record values, so they
        // already satisfy the constructor's checks.
        let (low, high) = dataset.payload_bounds();
        Self { low, high }
    }

    /// Lower bound in kilograms.
    pub fn low(&self) -> f64 {
        self.low
    }

    /// Upper bound in kilograms.
    pub fn high(&self) -> f64 {
        self.high
    }

    /// Inclusive membership test on both bounds.
    pub fn contains(&self, payload_kg: f64) -> bool {
        payload_kg >= self.low && payload_kg <= self.high
    }
}

/// The pair of control values driving both charts.
#[derive(Debug, Clone, PartialEq)]
pub struct SelectionState {
    /// Current dropdown selection.
    pub site: SiteFilter,
    /// Current slider selection.
    pub payload: PayloadRange,
}

impl SelectionState {
    /// The dashboard's initial selection: all sites, full observed
    /// payload span.
    pub fn initial(dataset: &LaunchDataset) -> Self {
        Self {
            site: SiteFilter::All,
            payload: PayloadRange::spanning(dataset),
        }
    }
}

/// One slice of a pie chart specification.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PieSlice {
    /// Human-readable outcome label.
    pub label: String,
    /// Binary class value behind the label.
    pub class: u8,
    /// Number of matching records.
    pub count: usize,
    /// Fixed color for the outcome.
    pub color: &'static str,
}

/// Renderable pie chart: a title plus outcome slices.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PieChart {
    pub title: String,
    pub slices: Vec<PieSlice>,
}

impl PieChart {
    /// Sum of all slice counts.
    pub fn total_count(&self) -> usize {
        self.slices.iter().map(|s| s.count).sum()
    }
}

/// One point of a scatter chart specification.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScatterPoint {
    /// X coordinate: payload mass in kilograms.
    pub payload_kg: f64,
    /// Y coordinate: binary outcome class.
    pub class: u8,
    /// Hover label: the record's launch site.
    pub site: String,
}

/// All points sharing one booster version category, drawn in one color.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScatterSeries {
    pub booster_category: String,
    pub color: &'static str,
    pub points: Vec<ScatterPoint>,
}

/// Renderable scatter chart: payload on x, outcome class on y, one
/// series per booster version category.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScatterChart {
    pub title: String,
    pub x_title: &'static str,
    pub y_title: &'static str,
    pub series: Vec<ScatterSeries>,
}

impl ScatterChart {
    /// Total number of points across all series.
    pub fn point_count(&self) -> usize {
        self.series.iter().map(|s| s.points.len()).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(site: &str, payload: f64, class: i64, booster: &str) -> LaunchRecord {
        LaunchRecord {
            site: site.to_string(),
            payload_mass_kg: payload,
            outcome: Outcome::from_class(class).unwrap(),
            booster_category: booster.to_string(),
        }
    }

    #[test]
    fn test_outcome_from_class() {
        assert_eq!(Outcome::from_class(1), Some(Outcome::Success));
        assert_eq!(Outcome::from_class(0), Some(Outcome::Failure));
        assert_eq!(Outcome::from_class(2), None);
        assert_eq!(Outcome::from_class(-1), None);
    }

    #[test]
    fn test_outcome_labels_and_colors() {
        assert_eq!(Outcome::Success.to_string(), "Success");
        assert_eq!(Outcome::Failure.to_string(), "Failure");
        assert_eq!(Outcome::Success.color(), "green");
        assert_eq!(Outcome::Failure.color(), "red");
        assert_eq!(Outcome::Success.class(), 1);
        assert_eq!(Outcome::Failure.class(), 0);
    }

    #[test]
    fn test_dataset_rejects_empty() {
        assert!(LaunchDataset::from_records(Vec::new()).is_none());
    }

    #[test]
    fn test_dataset_sites_in_first_appearance_order() {
        let dataset = LaunchDataset::from_records(vec![
            record("CCAFS LC-40", 500.0, 1, "FT"),
            record("VAFB SLC-4E", 2000.0, 0, "v1.1"),
            record("CCAFS LC-40", 1500.0, 1, "FT"),
            record("KSC LC-39A", 3000.0, 1, "B4"),
        ])
        .unwrap();

        assert_eq!(
            dataset.sites(),
            &["CCAFS LC-40", "VAFB SLC-4E", "KSC LC-39A"]
        );
    }

    #[test]
    fn test_dataset_payload_bounds() {
        let dataset = LaunchDataset::from_records(vec![
            record("A", 525.5, 1, "FT"),
            record("B", 9600.0, 0, "B5"),
            record("A", 350.0, 1, "v1.0"),
        ])
        .unwrap();

        assert_eq!(dataset.payload_bounds(), (350.0, 9600.0));
    }

    #[test]
    fn test_dataset_summary() {
        let dataset = LaunchDataset::from_records(vec![
            record("A", 500.0, 1, "FT"),
            record("A", 2000.0, 0, "FT"),
            record("B", 1500.0, 1, "v1.1"),
        ])
        .unwrap();

        let summary = dataset.summary();
        assert_eq!(summary.records, 3);
        assert_eq!(summary.sites, 2);
        assert_eq!(summary.successes, 2);
        assert_eq!(summary.failures, 1);
        assert_eq!(summary.payload_min_kg, 500.0);
        assert_eq!(summary.payload_max_kg, 2000.0);
    }

    #[test]
    fn test_site_filter_parse() {
        assert_eq!(SiteFilter::parse("ALL"), SiteFilter::All);
        assert_eq!(
            SiteFilter::parse("KSC LC-39A"),
            SiteFilter::Site("KSC LC-39A".to_string())
        );
    }

    #[test]
    fn test_site_filter_matches() {
        let rec = record("KSC LC-39A", 4000.0, 1, "B4");
        assert!(SiteFilter::All.matches(&rec));
        assert!(SiteFilter::parse("KSC LC-39A").matches(&rec));
        assert!(!SiteFilter::parse("CCAFS LC-40").matches(&rec));
    }

    #[test]
    fn test_payload_range_rejects_inverted() {
        assert_eq!(
            PayloadRange::new(5000.0, 1000.0),
            Err(RangeError::Inverted {
                low: 5000.0,
                high: 1000.0
            })
        );
    }

    #[test]
    fn test_payload_range_rejects_non_finite() {
        assert_eq!(
            PayloadRange::new(f64::NAN, 1000.0),
            Err(RangeError::NotFinite)
        );
        assert_eq!(
            PayloadRange::new(0.0, f64::INFINITY),
            Err(RangeError::NotFinite)
        );
    }

    #[test]
    fn test_payload_range_inclusive_on_both_bounds() {
        let range = PayloadRange::new(1000.0, 5000.0).unwrap();
        assert!(range.contains(1000.0));
        assert!(range.contains(5000.0));
        assert!(range.contains(2500.0));
        assert!(!range.contains(999.9));
        assert!(!range.contains(5000.1));
    }

    #[test]
    fn test_single_point_range() {
        let range = PayloadRange::new(1500.0, 1500.0).unwrap();
        assert!(range.contains(1500.0));
        assert!(!range.contains(1499.9));
        assert!(!range.contains(1500.1));
    }

    #[test]
    fn test_initial_selection_spans_dataset() {
        let dataset = LaunchDataset::from_records(vec![
            record("A", 525.5, 1, "FT"),
            record("B", 9600.0, 0, "B5"),
        ])
        .unwrap();

        let selection = SelectionState::initial(&dataset);
        assert_eq!(selection.site, SiteFilter::All);
        assert_eq!(selection.payload.low(), 525.5);
        assert_eq!(selection.payload.high(), 9600.0);
    }
}
