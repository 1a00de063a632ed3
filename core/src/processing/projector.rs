use serde::Serialize;

use crate::api::PredictionPoint;
use crate::math::stats::StatsHelper;
use crate::prelude::{PredictError, PredictResult};
use crate::telemetry::log::LogManager;

pub const CSV_HEADER: [&str; 2] = ["Datetime", "Predicted Energy (kWh)"];
pub const EXPORT_FILENAME: &str = "predictions.csv";
pub const EXPORT_MIME: &str = "text/csv";

/// One categorical chart sample.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct ChartPoint {
    pub label: String,
    pub value: f64,
}

/// Everything the UI renders for the latest prediction series.
#[derive(Debug, Clone, Default, Serialize, PartialEq)]
pub struct ViewState {
    pub total_energy: f64,
    pub chart_series: Vec<ChartPoint>,
    /// `None` when there is nothing to export.
    pub csv_text: Option<String>,
}

impl ViewState {
    pub fn is_empty(&self) -> bool {
        self.chart_series.is_empty()
    }

    pub fn values(&self) -> Vec<f64> {
        self.chart_series.iter().map(|point| point.value).collect()
    }
}

/// Projects a prediction series into totals, chart data and CSV text.
pub struct ResponseProjector {
    logger: LogManager,
}

impl ResponseProjector {
    pub fn new() -> Self {
        Self {
            logger: LogManager::new("projector"),
        }
    }

    pub fn project(&self, series: &[PredictionPoint]) -> ViewState {
        let values: Vec<f64> = series.iter().map(|point| point.predicted_energy).collect();
        let total_energy = StatsHelper::total(&values);

        let chart_series = series
            .iter()
            .map(|point| ChartPoint {
                label: point.datetime.clone(),
                value: point.predicted_energy,
            })
            .collect();

        let csv_text = if series.is_empty() {
            None
        } else {
            match render_csv(series) {
                Ok(text) => Some(text),
                Err(err) => {
                    self.logger.reject(&format!("csv rendering failed: {err}"));
                    None
                }
            }
        };

        self.logger.record(&format!(
            "projected {} points, total {:.3} kWh",
            series.len(),
            total_energy
        ));

        ViewState {
            total_energy,
            chart_series,
            csv_text,
        }
    }
}

impl Default for ResponseProjector {
    fn default() -> Self {
        Self::new()
    }
}

/// Renders the export CSV: a header line, then one line per point, `\n`
/// separated with no trailing newline.
pub fn render_csv(series: &[PredictionPoint]) -> PredictResult<String> {
    let mut writer = csv::WriterBuilder::new()
        .terminator(csv::Terminator::Any(b'\n'))
        .from_writer(Vec::new());

    writer
        .write_record(CSV_HEADER)
        .map_err(|e| PredictError::Export(format!("csv header: {e}")))?;
    for point in series {
        let value = point.predicted_energy.to_string();
        writer
            .write_record([point.datetime.as_str(), value.as_str()])
            .map_err(|e| PredictError::Export(format!("csv record: {e}")))?;
    }

    let bytes = writer
        .into_inner()
        .map_err(|e| PredictError::Export(format!("csv flush: {e}")))?;
    let mut text =
        String::from_utf8(bytes).map_err(|e| PredictError::Export(format!("csv utf-8: {e}")))?;
    if text.ends_with('\n') {
        text.pop();
    }
    Ok(text)
}
