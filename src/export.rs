//! JSON snapshot export.
//!
//! Renders the dashboard figures for one fixed selection and writes them
//! to disk, so chart data can be inspected or diffed without a browser.

use crate::charts;
use crate::models::{DatasetSummary, LaunchDataset, PieChart, ScatterChart, SelectionState};
use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::path::Path;

/// Everything the dashboard would show for one selection, in one document.
#[derive(Debug, Serialize)]
pub struct Snapshot {
    pub generated_at: DateTime<Utc>,
    pub dataset: DatasetSummary,
    pub selection: SnapshotSelection,
    pub pie: PieChart,
    pub scatter: ScatterChart,
}

/// The selection the snapshot was computed for, in dropdown/slider terms.
#[derive(Debug, Serialize)]
pub struct SnapshotSelection {
    pub site: String,
    pub payload_min_kg: f64,
    pub payload_max_kg: f64,
}

/// Compute both charts for the given selection.
pub fn build_snapshot(dataset: &LaunchDataset, selection: &SelectionState) -> Snapshot {
    Snapshot {
        generated_at: Utc::now(),
        dataset: dataset.summary(),
        selection: SnapshotSelection {
            site: selection.site.to_string(),
            payload_min_kg: selection.payload.low(),
            payload_max_kg: selection.payload.high(),
        },
        pie: charts::success_pie(dataset, &selection.site),
        scatter: charts::payload_scatter(dataset, &selection.site, &selection.payload),
    }
}

/// Render a snapshot as pretty-printed JSON.
pub fn generate_json(snapshot: &Snapshot) -> Result<String> {
    serde_json::to_string_pretty(snapshot).map_err(Into::into)
}

/// Write a snapshot to a file.
pub fn write_snapshot(snapshot: &Snapshot, path: &Path) -> Result<()> {
    let content = generate_json(snapshot)?;

    std::fs::write(path, content)
        .with_context(|| format!("Failed to write snapshot to {}", path.display()))?;

    Ok(())
}
