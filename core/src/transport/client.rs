use std::sync::Arc;
use std::time::Duration;

use log::{debug, warn};
use reqwest::Client;

use crate::api::{PredictionRequest, PredictionResponse};
use crate::prelude::{ClientConfig, PredictError, PredictResult};
use crate::telemetry::metrics::MetricsRecorder;

const PREDICT_PATH: &str = "/predict";

/// HTTP collaborator for the remote prediction service.
#[derive(Clone)]
pub struct PredictionClient {
    client: Client,
    endpoint: String,
    metrics: Arc<MetricsRecorder>,
}

impl PredictionClient {
    /// Returns a new client for the configured service
    ///
    /// # Arguments
    ///
    /// * 'config' - base URL and request timeout
    pub fn new(config: &ClientConfig) -> PredictResult<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs.max(1)))
            .build()?;

        Ok(Self {
            client,
            endpoint: format!("{}{}", config.base_url.trim_end_matches('/'), PREDICT_PATH),
            metrics: Arc::new(MetricsRecorder::new()),
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    pub fn metrics(&self) -> Arc<MetricsRecorder> {
        self.metrics.clone()
    }

    /// Posts the request and decodes the body with the parser for its mode.
    pub async fn predict(&self, request: &PredictionRequest) -> PredictResult<PredictionResponse> {
        self.metrics.record_request();
        let result = self.send(request).await;
        if let Err(err) = &result {
            self.metrics.record_failure();
            warn!("prediction request to {} failed: {err}", self.endpoint);
        }
        result
    }

    async fn send(&self, request: &PredictionRequest) -> PredictResult<PredictionResponse> {
        let res = self.client.post(&self.endpoint).json(request).send().await?;

        let status = res.status();
        if !status.is_success() {
            let body = res.text().await.unwrap_or_default();
            return Err(PredictError::UnexpectedStatus {
                status: status.as_u16(),
                body,
            });
        }

        let json = res.text().await?;
        debug!("received {} bytes from {}", json.len(), self.endpoint);
        PredictionResponse::decode(request.mode, &json)
    }
}
