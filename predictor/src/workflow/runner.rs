use anyhow::{anyhow, bail, Context};
use energycore::api::{PredictionRequest, PredictionResponse};
use energycore::prelude::{ClientConfig, PredictError, PredictResult};
use energycore::processing::RequestEnv;
use energycore::state::{AppState, CsvExport, Effect, Event, FormState};
use energycore::telemetry::MetricsSnapshot;
use energycore::transport::PredictionClient;
use std::fs;
use std::path::PathBuf;

/// Where prediction bodies come from.
pub enum ResponseSource {
    Service(PredictionClient),
    /// Saved `/predict` body decoded instead of calling the service.
    Replay(PathBuf),
}

pub struct WorkflowResult {
    pub request: PredictionRequest,
    pub state: AppState,
}

pub struct Runner {
    config: ClientConfig,
    source: ResponseSource,
}

impl Runner {
    pub fn new(config: ClientConfig) -> anyhow::Result<Self> {
        let client = PredictionClient::new(&config).context("building prediction client")?;
        Ok(Self {
            config,
            source: ResponseSource::Service(client),
        })
    }

    pub fn replay(config: ClientConfig, path: PathBuf) -> Self {
        Self {
            config,
            source: ResponseSource::Replay(path),
        }
    }

    /// Runs one submit cycle through the state reducer.
    pub async fn execute(&self, form: &FormState) -> anyhow::Result<WorkflowResult> {
        let env = RequestEnv::capture(&self.config);
        let state = AppState::new(form.clone());

        let (state, effect) = state.apply(Event::Submit, &env);
        let (token, request) = match effect {
            Effect::Fetch { token, request } => (token, request),
            Effect::Alert(alert) => bail!(alert.message),
            other => bail!("unexpected effect on submit: {other:?}"),
        };

        let outcome = self.fetch(&request).await;
        if let Err(err) = &outcome {
            log::error!("prediction failed: {err}");
        }

        let (state, effect) = state.apply(Event::ResponseReceived { token, outcome }, &env);
        if let Effect::Alert(alert) = effect {
            bail!(alert.message);
        }

        Ok(WorkflowResult { request, state })
    }

    /// Asks the reducer for the CSV export of the loaded predictions.
    pub fn export(&self, state: &AppState) -> anyhow::Result<CsvExport> {
        let env = RequestEnv::capture(&self.config);
        match state.apply(Event::ExportRequested, &env).1 {
            Effect::Export(export) => Ok(export),
            Effect::Alert(alert) => Err(anyhow!(alert.message)),
            other => bail!("unexpected effect on export: {other:?}"),
        }
    }

    pub fn metrics(&self) -> Option<MetricsSnapshot> {
        match &self.source {
            ResponseSource::Service(client) => Some(client.metrics().snapshot()),
            ResponseSource::Replay(_) => None,
        }
    }

    async fn fetch(&self, request: &PredictionRequest) -> PredictResult<PredictionResponse> {
        match &self.source {
            ResponseSource::Service(client) => client.predict(request).await,
            ResponseSource::Replay(path) => {
                let body = fs::read_to_string(path).map_err(|e| {
                    PredictError::Network(format!("reading replay {}: {e}", path.display()))
                })?;
                PredictionResponse::decode(request.mode, &body)
            }
        }
    }
}
