//! Payload vs. outcome scatter aggregation.

use crate::models::{
    LaunchDataset, PayloadRange, ScatterChart, ScatterPoint, ScatterSeries, SiteFilter,
};

/// Title used when the dropdown is on the all-sites value.
pub const ALL_SITES_TITLE: &str = "Payload vs. Launch Outcome for All Sites";

/// X axis label.
pub const X_TITLE: &str = "Payload Mass (kg)";

/// Y axis label.
pub const Y_TITLE: &str = "class";

/// Plotly's default qualitative palette, cycled per booster category.
const SERIES_PALETTE: [&str; 10] = [
    "#636EFA", "#EF553B", "#00CC96", "#AB63FA", "#FFA15A", "#19D3F3", "#FF6692", "#B6E880",
    "#FF97FF", "#FECB52",
];

/// Title used when a single site is selected.
pub fn site_title(site: &str) -> String {
    format!("Payload vs. Launch Outcome for Site: {}", site)
}

/// Builds the payload scatter for the current dropdown and slider
/// selection.
///
/// Keeps exactly the records whose payload mass lies in the range
/// (inclusive on both bounds) and, for a single-site selection, whose
/// site matches. Points carry x = payload mass, y = outcome class and
/// the site name for hover; one series per booster version category, in
/// order of first appearance. An empty filtered set gives a chart with
/// zero points.
pub fn payload_scatter(
    dataset: &LaunchDataset,
    site: &SiteFilter,
    payload: &PayloadRange,
) -> ScatterChart {
    let mut series: Vec<ScatterSeries> = Vec::new();

    for record in dataset.records() {
        if !payload.contains(record.payload_mass_kg) || !site.matches(record) {
            continue;
        }

        let point = ScatterPoint {
            payload_kg: record.payload_mass_kg,
            class: record.outcome.class(),
            site: record.site.clone(),
        };

        match series
            .iter_mut()
            .find(|s| s.booster_category == record.booster_category)
        {
            Some(existing) => existing.points.push(point),
            None => {
                let color = SERIES_PALETTE[series.len() % SERIES_PALETTE.len()];
                series.push(ScatterSeries {
                    booster_category: record.booster_category.clone(),
                    color,
                    points: vec![point],
                });
            }
        }
    }

    let title = match site {
        SiteFilter::All => ALL_SITES_TITLE.to_string(),
        SiteFilter::Site(name) => site_title(name),
    };

    ScatterChart {
        title,
        x_title: X_TITLE,
        y_title: Y_TITLE,
        series,
    }
}
