use crate::api::request::PredictionMode;
use crate::prelude::PredictResult;
use serde::{Deserialize, Serialize};

/// One time step of a prediction series.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PredictionPoint {
    pub datetime: String,
    pub predicted_energy: f64,
}

impl PredictionPoint {
    pub fn new(datetime: impl Into<String>, predicted_energy: f64) -> Self {
        Self {
            datetime: datetime.into(),
            predicted_energy,
        }
    }
}

#[derive(Deserialize)]
struct BasicEnvelope {
    predictions: Vec<f64>,
}

/// Decoded `/predict` body. The shape is fixed by the request mode.
#[derive(Debug, Clone, PartialEq)]
pub enum PredictionResponse {
    /// `{ "predictions": [number] }`, one value per day.
    Basic(Vec<f64>),
    /// `[{ "datetime", "predicted_energy" }]` from the location-dependent models.
    Series(Vec<PredictionPoint>),
}

impl PredictionResponse {
    pub fn decode(mode: PredictionMode, body: &str) -> PredictResult<Self> {
        match mode {
            PredictionMode::Basic => {
                let envelope: BasicEnvelope = serde_json::from_str(body)?;
                Ok(PredictionResponse::Basic(envelope.predictions))
            }
            PredictionMode::Solar | PredictionMode::Wind => {
                let points: Vec<PredictionPoint> = serde_json::from_str(body)?;
                Ok(PredictionResponse::Series(points))
            }
        }
    }

    pub fn len(&self) -> usize {
        match self {
            PredictionResponse::Basic(values) => values.len(),
            PredictionResponse::Series(points) => points.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Flattens either shape into an ordered point list. Basic values are
    /// labelled by day number.
    pub fn into_points(self) -> Vec<PredictionPoint> {
        match self {
            PredictionResponse::Basic(values) => values
                .into_iter()
                .enumerate()
                .map(|(idx, value)| PredictionPoint::new(format!("Day {}", idx + 1), value))
                .collect(),
            PredictionResponse::Series(points) => points,
        }
    }
}
