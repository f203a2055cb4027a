//! Dashboard HTTP server.
//!
//! Serves the single-page dashboard and the JSON endpoints it feeds on:
//! control metadata, dataset summary and the two chart specifications.
//! The dataset is shared read-only across requests; per-session selection
//! state lives in the browser and arrives as query parameters.

use crate::charts;
use crate::config::ServerConfig;
use crate::models::{
    DatasetSummary, LaunchDataset, PayloadRange, PieChart, ScatterChart, SiteFilter,
    PAYLOAD_SLIDER_MAX, PAYLOAD_SLIDER_MIN, PAYLOAD_SLIDER_STEP,
};
use anyhow::{Context, Result};
use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{Html, IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{debug, info};

/// Shared read-only state handed to every request handler.
#[derive(Clone)]
pub struct DashboardState {
    dataset: Arc<LaunchDataset>,
    title: String,
}

impl DashboardState {
    pub fn new(dataset: Arc<LaunchDataset>, title: String) -> Self {
        Self { dataset, title }
    }
}

/// Starts the dashboard server. Returns when the server stops.
pub async fn serve(dataset: LaunchDataset, config: &ServerConfig) -> Result<()> {
    let state = DashboardState::new(Arc::new(dataset), config.title.clone());
    let router = router(state);

    let listener = tokio::net::TcpListener::bind(&config.addr)
        .await
        .with_context(|| format!("Failed to bind dashboard address {}", config.addr))?;
    info!("Dashboard listening on http://{}", config.addr);
    axum::serve(listener, router)
        .await
        .context("Dashboard server failed")?;
    Ok(())
}

/// Builds the dashboard router over the shared state.
pub fn router(state: DashboardState) -> Router {
    Router::new()
        .route("/", get(index))
        .route("/api/health", get(health))
        .route("/api/controls", get(controls))
        .route("/api/summary", get(summary))
        .route("/api/charts/pie", get(pie_chart))
        .route("/api/charts/scatter", get(scatter_chart))
        .with_state(state)
}

/// Rejected chart selection, reported as HTTP 400 with a JSON body.
#[derive(Debug)]
struct BadSelection(String);

impl IntoResponse for BadSelection {
    fn into_response(self) -> Response {
        (
            StatusCode::BAD_REQUEST,
            Json(serde_json::json!({ "error": self.0 })),
        )
            .into_response()
    }
}

#[derive(Debug, Deserialize)]
struct PieQuery {
    site: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ScatterQuery {
    site: Option<String>,
    payload_min: Option<f64>,
    payload_max: Option<f64>,
}

/// One dropdown entry.
#[derive(Debug, Serialize)]
struct DropdownOption {
    label: String,
    value: String,
}

#[derive(Debug, Serialize)]
struct DropdownSpec {
    options: Vec<DropdownOption>,
    #[serde(rename = "default")]
    initial: String,
}

#[derive(Debug, Serialize)]
struct SliderSpec {
    min: f64,
    max: f64,
    step: f64,
    marks: Vec<f64>,
    #[serde(rename = "default")]
    initial: [f64; 2],
}

/// Control metadata the page bootstraps itself from.
#[derive(Debug, Serialize)]
struct ControlsSpec {
    title: String,
    dropdown: DropdownSpec,
    slider: SliderSpec,
}

async fn index() -> Html<&'static str> {
    Html(INDEX_HTML)
}

async fn health() -> Json<serde_json::Value> {
    Json(serde_json::json!({ "status": "ok" }))
}

async fn controls(State(state): State<DashboardState>) -> Json<ControlsSpec> {
    let mut options = vec![DropdownOption {
        label: "All Sites".to_string(),
        value: SiteFilter::ALL_VALUE.to_string(),
    }];
    for site in state.dataset.sites() {
        options.push(DropdownOption {
            label: site.clone(),
            value: site.clone(),
        });
    }

    // Slider defaults follow the observed payload bounds, not the fixed
    // slider extent.
    let (low, high) = state.dataset.payload_bounds();

    Json(ControlsSpec {
        title: state.title.clone(),
        dropdown: DropdownSpec {
            options,
            initial: SiteFilter::ALL_VALUE.to_string(),
        },
        slider: SliderSpec {
            min: PAYLOAD_SLIDER_MIN,
            max: PAYLOAD_SLIDER_MAX,
            step: PAYLOAD_SLIDER_STEP,
            marks: slider_marks(),
            initial: [low, high],
        },
    })
}

async fn summary(State(state): State<DashboardState>) -> Json<DatasetSummary> {
    Json(state.dataset.summary())
}

async fn pie_chart(
    State(state): State<DashboardState>,
    Query(query): Query<PieQuery>,
) -> Json<PieChart> {
    let site = parse_site(query.site.as_deref());

    let chart = charts::success_pie(&state.dataset, &site);
    debug!("Pie for site {}: {} slices", site, chart.slices.len());
    Json(chart)
}

async fn scatter_chart(
    State(state): State<DashboardState>,
    Query(query): Query<ScatterQuery>,
) -> Result<Json<ScatterChart>, BadSelection> {
    let site = parse_site(query.site.as_deref());

    let (observed_low, observed_high) = state.dataset.payload_bounds();
    let low = query.payload_min.unwrap_or(observed_low);
    let high = query.payload_max.unwrap_or(observed_high);
    let payload = PayloadRange::new(low, high).map_err(|e| BadSelection(e.to_string()))?;

    let chart = charts::payload_scatter(&state.dataset, &site, &payload);
    debug!(
        "Scatter for site {}, payload {} to {} kg: {} points",
        site,
        payload.low(),
        payload.high(),
        chart.point_count()
    );
    Ok(Json(chart))
}

/// A missing site parameter means the all-sites selection.
fn parse_site(site: Option<&str>) -> SiteFilter {
    match site {
        Some(value) => SiteFilter::parse(value),
        None => SiteFilter::All,
    }
}

fn slider_marks() -> Vec<f64> {
    let mut marks = Vec::new();
    let mut mark = PAYLOAD_SLIDER_MIN;
    while mark <= PAYLOAD_SLIDER_MAX {
        marks.push(mark);
        mark += PAYLOAD_SLIDER_STEP;
    }
    marks
}

const INDEX_HTML: &str = r#"<!doctype html>
<html>
  <head>
    <meta charset="utf-8" />
    <title>Launch Records Dashboard</title>
    <script src="https://cdn.plot.ly/plotly-2.32.0.min.js"></script>
    <style>
      :root {
        --bg: #0f172a;
        --panel: #1e293b;
        --text: #e2e8f0;
        --muted: #94a3b8;
        --border: #334155;
      }
      body { font-family: "Inter", system-ui, sans-serif; margin: 0; background: var(--bg); color: var(--text); }
      header { padding: 0 24px; height: 60px; border-bottom: 1px solid var(--border); display: flex; align-items: center; }
      h1 { margin: 0; font-size: 18px; font-weight: 600; color: #fff; }
      main { max-width: 1100px; margin: 0 auto; padding: 20px; display: flex; flex-direction: column; gap: 20px; }
      .card { background: var(--panel); border: 1px solid var(--border); border-radius: 8px; padding: 16px; }
      .card-title { font-size: 13px; font-weight: 600; color: var(--muted); text-transform: uppercase; letter-spacing: 0.05em; margin-bottom: 12px; }
      label { font-size: 13px; color: var(--muted); display: block; margin-bottom: 6px; }
      select { width: 100%; background: var(--bg); color: var(--text); border: 1px solid var(--border); border-radius: 6px; padding: 8px; font-size: 14px; }
      .range-row { display: flex; align-items: center; gap: 12px; margin-top: 16px; }
      .range-row label { margin: 0; white-space: nowrap; }
      input[type=range] { flex: 1; accent-color: #38bdf8; }
      #payload-label { font-size: 13px; min-width: 150px; text-align: right; }
      .chart { height: 420px; }
    </style>
  </head>
  <body>
    <header><h1 id="title">Launch Records Dashboard</h1></header>
    <main>
      <div class="card">
        <div class="card-title">Controls</div>
        <label for="site">Launch Site</label>
        <select id="site"></select>
        <div class="range-row">
          <label for="payload-low">Payload range (Kg)</label>
          <input type="range" id="payload-low" list="payload-marks" />
          <input type="range" id="payload-high" list="payload-marks" />
          <span id="payload-label"></span>
        </div>
        <datalist id="payload-marks"></datalist>
      </div>
      <div class="card"><div id="pie" class="chart"></div></div>
      <div class="card"><div id="scatter" class="chart"></div></div>
    </main>
    <script>
      const state = { site: 'ALL', low: 0, high: 10000 };

      const chartLayout = {
        paper_bgcolor: '#1e293b',
        plot_bgcolor: '#1e293b',
        font: { color: '#e2e8f0' },
        margin: { t: 60, r: 30, b: 50, l: 60 },
      };

      async function fetchJson(url) {
        const res = await fetch(url);
        if (!res.ok) throw new Error(url + ' failed: ' + res.status);
        return res.json();
      }

      function pieQuery() {
        return new URLSearchParams({ site: state.site }).toString();
      }

      function scatterQuery() {
        return new URLSearchParams({
          site: state.site,
          payload_min: state.low,
          payload_max: state.high,
        }).toString();
      }

      async function refreshPie() {
        const chart = await fetchJson('/api/charts/pie?' + pieQuery());
        const trace = {
          type: 'pie',
          labels: chart.slices.map(s => s.label),
          values: chart.slices.map(s => s.count),
          marker: { colors: chart.slices.map(s => s.color) },
        };
        Plotly.react('pie', [trace], Object.assign({ title: chart.title }, chartLayout));
      }

      async function refreshScatter() {
        const chart = await fetchJson('/api/charts/scatter?' + scatterQuery());
        const traces = chart.series.map(s => ({
          type: 'scatter',
          mode: 'markers',
          name: s.booster_category,
          x: s.points.map(p => p.payload_kg),
          y: s.points.map(p => p.class),
          text: s.points.map(p => p.site),
          hovertemplate: '%{text}<br>%{x} kg, class %{y}<extra></extra>',
          marker: { color: s.color, size: 9 },
        }));
        const layout = Object.assign({
          title: chart.title,
          xaxis: { title: chart.x_title },
          yaxis: { title: chart.y_title, tickvals: [0, 1] },
        }, chartLayout);
        Plotly.react('scatter', traces, layout);
      }

      function updatePayloadLabel() {
        document.getElementById('payload-label').textContent =
          state.low + ' kg to ' + state.high + ' kg';
      }

      function wireControls(controls) {
        const select = document.getElementById('site');
        for (const opt of controls.dropdown.options) {
          const el = document.createElement('option');
          el.value = opt.value;
          el.textContent = opt.label;
          select.appendChild(el);
        }
        select.value = controls.dropdown.default;
        state.site = controls.dropdown.default;

        const low = document.getElementById('payload-low');
        const high = document.getElementById('payload-high');
        for (const input of [low, high]) {
          input.min = controls.slider.min;
          input.max = controls.slider.max;
          input.step = controls.slider.step;
        }

        const marks = document.getElementById('payload-marks');
        for (const mark of controls.slider.marks) {
          const el = document.createElement('option');
          el.value = mark;
          marks.appendChild(el);
        }

        state.low = controls.slider.default[0];
        state.high = controls.slider.default[1];
        low.value = state.low;
        high.value = state.high;
        updatePayloadLabel();

        select.addEventListener('change', () => {
          state.site = select.value;
          refreshPie();
          refreshScatter();
        });

        low.addEventListener('change', () => {
          if (Number(low.value) > Number(high.value)) {
            low.value = high.value;
          }
          state.low = Number(low.value);
          updatePayloadLabel();
          refreshScatter();
        });

        high.addEventListener('change', () => {
          if (Number(high.value) < Number(low.value)) {
            high.value = low.value;
          }
          state.high = Number(high.value);
          updatePayloadLabel();
          refreshScatter();
        });
      }

      async function init() {
        const controls = await fetchJson('/api/controls');
        document.title = controls.title;
        document.getElementById('title').textContent = controls.title;
        wireControls(controls);
        await Promise.all([refreshPie(), refreshScatter()]);
      }

      init().catch(err => console.error(err));
    </script>
  </body>
</html>
"#;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{LaunchRecord, Outcome};
    use tokio_test::block_on;

    fn record(site: &str, payload: f64, class: i64, booster: &str) -> LaunchRecord {
        LaunchRecord {
            site: site.to_string(),
            payload_mass_kg: payload,
            outcome: Outcome::from_class(class).unwrap(),
            booster_category: booster.to_string(),
        }
    }

    fn test_state() -> DashboardState {
        let dataset = LaunchDataset::from_records(vec![
            record("CCAFS LC-40", 500.0, 1, "FT"),
            record("CCAFS LC-40", 2000.0, 0, "v1.1"),
            record("KSC LC-39A", 1500.0, 1, "FT"),
        ])
        .unwrap();
        DashboardState::new(Arc::new(dataset), "Launch Records Dashboard".to_string())
    }

    #[test]
    fn test_controls_lists_all_sites_option_first() {
        let Json(spec) = block_on(controls(State(test_state())));

        assert_eq!(spec.title, "Launch Records Dashboard");
        assert_eq!(spec.dropdown.options[0].label, "All Sites");
        assert_eq!(spec.dropdown.options[0].value, "ALL");
        assert_eq!(spec.dropdown.options[1].value, "CCAFS LC-40");
        assert_eq!(spec.dropdown.options[2].value, "KSC LC-39A");
        assert_eq!(spec.dropdown.initial, "ALL");
    }

    #[test]
    fn test_controls_slider_spans_observed_payloads() {
        let Json(spec) = block_on(controls(State(test_state())));

        assert_eq!(spec.slider.min, 0.0);
        assert_eq!(spec.slider.max, 10_000.0);
        assert_eq!(spec.slider.step, 1_000.0);
        assert_eq!(spec.slider.initial, [500.0, 2000.0]);
        assert_eq!(spec.slider.marks.len(), 11);
        assert_eq!(spec.slider.marks[0], 0.0);
        assert_eq!(spec.slider.marks[10], 10_000.0);
    }

    #[test]
    fn test_summary_reports_dataset_figures() {
        let Json(summary) = block_on(summary(State(test_state())));

        assert_eq!(summary.records, 3);
        assert_eq!(summary.sites, 2);
        assert_eq!(summary.successes, 2);
        assert_eq!(summary.failures, 1);
    }

    #[test]
    fn test_pie_endpoint_defaults_to_all_sites() {
        let Json(chart) = block_on(pie_chart(
            State(test_state()),
            Query(PieQuery { site: None }),
        ));

        assert_eq!(chart.title, charts::pie::ALL_SITES_TITLE);
        assert_eq!(chart.slices[0].count, 2);
        assert_eq!(chart.slices[1].count, 1);
    }

    #[test]
    fn test_pie_endpoint_filters_by_site() {
        let Json(chart) = block_on(pie_chart(
            State(test_state()),
            Query(PieQuery {
                site: Some("KSC LC-39A".to_string()),
            }),
        ));

        assert_eq!(chart.title, "Launch Outcomes for Site: KSC LC-39A");
        assert_eq!(chart.slices.len(), 1);
        assert_eq!(chart.slices[0].label, "Success");
        assert_eq!(chart.slices[0].count, 1);
    }

    #[test]
    fn test_scatter_endpoint_defaults_to_observed_bounds() {
        let result = block_on(scatter_chart(
            State(test_state()),
            Query(ScatterQuery {
                site: None,
                payload_min: None,
                payload_max: None,
            }),
        ));

        let Json(chart) = result.unwrap();
        assert_eq!(chart.title, charts::scatter::ALL_SITES_TITLE);
        assert_eq!(chart.point_count(), 3);
    }

    #[test]
    fn test_scatter_endpoint_applies_bounds() {
        let result = block_on(scatter_chart(
            State(test_state()),
            Query(ScatterQuery {
                site: None,
                payload_min: Some(1000.0),
                payload_max: Some(1800.0),
            }),
        ));

        let Json(chart) = result.unwrap();
        assert_eq!(chart.point_count(), 1);
        assert_eq!(chart.series[0].points[0].payload_kg, 1500.0);
    }

    #[test]
    fn test_scatter_endpoint_rejects_inverted_range() {
        let result = block_on(scatter_chart(
            State(test_state()),
            Query(ScatterQuery {
                site: None,
                payload_min: Some(5000.0),
                payload_max: Some(1000.0),
            }),
        ));

        let err = result.err().unwrap();
        assert!(err.0.contains("exceeds"));
    }

    #[test]
    fn test_index_serves_dashboard_page() {
        let Html(page) = block_on(index());

        assert!(page.contains("plotly"));
        assert!(page.contains("id=\"site\""));
        assert!(page.contains("id=\"pie\""));
        assert!(page.contains("id=\"scatter\""));
    }

    #[test]
    fn test_health_endpoint() {
        let Json(body) = block_on(health());
        assert_eq!(body, serde_json::json!({ "status": "ok" }));
    }
}
