//! Success/failure pie aggregation.

use crate::models::{LaunchDataset, Outcome, PieChart, PieSlice, SiteFilter};

/// Title used when the dropdown is on the all-sites value.
pub const ALL_SITES_TITLE: &str = "Total Success vs. Failure Launches for All Sites";

/// Title used when a single site is selected.
pub fn site_title(site: &str) -> String {
    format!("Launch Outcomes for Site: {}", site)
}

/// Builds the success/failure pie for the current dropdown selection.
///
/// With the all-sites value the chart always carries both slices, even
/// when one count is zero. With a single site only the outcomes present
/// in the filtered records appear, success first; a site matching no
/// records gives an empty chart rather than an error.
pub fn success_pie(dataset: &LaunchDataset, site: &SiteFilter) -> PieChart {
    match site {
        SiteFilter::All => PieChart {
            title: ALL_SITES_TITLE.to_string(),
            slices: vec![
                slice(Outcome::Success, dataset.count_outcome(Outcome::Success)),
                slice(Outcome::Failure, dataset.count_outcome(Outcome::Failure)),
            ],
        },
        SiteFilter::Site(name) => {
            let mut successes = 0;
            let mut failures = 0;
            for record in dataset.records() {
                if record.site != *name {
                    continue;
                }
                match record.outcome {
                    Outcome::Success => successes += 1,
                    Outcome::Failure => failures += 1,
                }
            }

            let mut slices = Vec::new();
            if successes > 0 {
                slices.push(slice(Outcome::Success, successes));
            }
            if failures > 0 {
                slices.push(slice(Outcome::Failure, failures));
            }

            PieChart {
                title: site_title(name),
                slices,
            }
        }
    }
}

fn slice(outcome: Outcome, count: usize) -> PieSlice {
    PieSlice {
        label: outcome.to_string(),
        class: outcome.class(),
        count,
        color: outcome.color(),
    }
}
