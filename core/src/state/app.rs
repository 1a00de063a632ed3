use chrono::NaiveDateTime;
use log::debug;

use crate::api::{PredictionMode, PredictionRequest, PredictionResponse};
use crate::prelude::{ErrorKind, PredictError, PredictResult};
use crate::processing::projector::{EXPORT_FILENAME, EXPORT_MIME};
use crate::processing::{RequestBuilder, RequestEnv, ResponseProjector, ViewState};
use crate::state::form::FormState;
use crate::state::token::{RequestToken, SubmissionTracker};

/// User actions and asynchronous completions fed into the reducer.
#[derive(Debug, Clone)]
pub enum Event {
    StartDateChanged(Option<NaiveDateTime>),
    EndDateChanged(Option<NaiveDateTime>),
    LatitudeChanged(String),
    LongitudeChanged(String),
    ModeChanged(PredictionMode),
    Submit,
    ResponseReceived {
        token: RequestToken,
        outcome: PredictResult<PredictionResponse>,
    },
    ExportRequested,
}

/// One alert per rejected action.
#[derive(Debug, Clone, PartialEq)]
pub struct Alert {
    pub kind: ErrorKind,
    pub message: String,
}

impl From<&PredictError> for Alert {
    fn from(err: &PredictError) -> Self {
        Self {
            kind: err.kind(),
            message: err.user_message(),
        }
    }
}

/// CSV payload handed to the host's file delivery.
#[derive(Debug, Clone, PartialEq)]
pub struct CsvExport {
    pub filename: &'static str,
    pub mime: &'static str,
    pub contents: String,
}

/// Side effect the caller must carry out after a transition.
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    None,
    Fetch {
        token: RequestToken,
        request: PredictionRequest,
    },
    Alert(Alert),
    Export(CsvExport),
}

/// Complete application state. Transitions never mutate in place.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AppState {
    pub form: FormState,
    pub view: ViewState,
    pub pending: Option<RequestToken>,
    tracker: SubmissionTracker,
}

impl AppState {
    pub fn new(form: FormState) -> Self {
        Self {
            form,
            ..Default::default()
        }
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Whether a response carrying `token` would still be applied.
    pub fn accepts(&self, token: RequestToken) -> bool {
        self.tracker.is_current(token)
    }

    pub fn apply(&self, event: Event, env: &RequestEnv) -> (AppState, Effect) {
        let mut next = self.clone();
        let effect = match event {
            Event::StartDateChanged(value) => {
                next.form.start = value;
                Effect::None
            }
            Event::EndDateChanged(value) => {
                next.form.end = value;
                Effect::None
            }
            Event::LatitudeChanged(value) => {
                next.form.latitude = value;
                Effect::None
            }
            Event::LongitudeChanged(value) => {
                next.form.longitude = value;
                Effect::None
            }
            Event::ModeChanged(mode) => {
                next.form.mode = mode;
                Effect::None
            }
            Event::Submit => match RequestBuilder::new().build(&self.form, env) {
                Ok(request) => {
                    let (tracker, token) = self.tracker.issue();
                    next.tracker = tracker;
                    next.pending = Some(token);
                    Effect::Fetch { token, request }
                }
                Err(err) => Effect::Alert(Alert::from(&PredictError::from(err))),
            },
            Event::ResponseReceived { token, outcome } => {
                if !self.tracker.is_current(token) {
                    debug!("discarding stale response for request #{}", token.value());
                    return (next, Effect::None);
                }
                next.pending = None;
                match outcome {
                    Ok(response) => {
                        next.view = ResponseProjector::new().project(&response.into_points());
                        Effect::None
                    }
                    Err(err) => Effect::Alert(Alert::from(&err)),
                }
            }
            Event::ExportRequested => match &self.view.csv_text {
                Some(contents) => Effect::Export(CsvExport {
                    filename: EXPORT_FILENAME,
                    mime: EXPORT_MIME,
                    contents: contents.clone(),
                }),
                None => Effect::Alert(Alert::from(&PredictError::EmptyExport)),
            },
        };
        (next, effect)
    }

    /// Feeds a sequence of events, keeping only the final effect.
    pub fn apply_all<I>(&self, events: I, env: &RequestEnv) -> (AppState, Effect)
    where
        I: IntoIterator<Item = Event>,
    {
        events
            .into_iter()
            .fold((self.clone(), Effect::None), |(state, _), event| {
                state.apply(event, env)
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::PredictionPoint;
    use chrono::NaiveDate;

    fn env() -> RequestEnv {
        RequestEnv::fixed(NaiveDate::from_ymd_opt(2024, 6, 1).unwrap(), "UTC", Some(15))
    }

    fn day(d: u32) -> Option<NaiveDateTime> {
        NaiveDate::from_ymd_opt(2024, 6, d).and_then(|date| date.and_hms_opt(0, 0, 0))
    }

    fn filled_solar() -> AppState {
        let (state, _) = AppState::default().apply_all(
            [
                Event::ModeChanged(PredictionMode::Solar),
                Event::StartDateChanged(day(2)),
                Event::EndDateChanged(day(3)),
                Event::LatitudeChanged("52.2".into()),
                Event::LongitudeChanged("21.0".into()),
            ],
            &env(),
        );
        state
    }

    fn submit(state: &AppState) -> (AppState, RequestToken) {
        match state.apply(Event::Submit, &env()) {
            (next, Effect::Fetch { token, .. }) => (next, token),
            (_, other) => panic!("expected fetch, got {other:?}"),
        }
    }

    fn series(values: &[f64]) -> PredictionResponse {
        PredictionResponse::Series(
            values
                .iter()
                .enumerate()
                .map(|(i, v)| PredictionPoint::new(format!("2024-06-0{} 00:00:00", i + 2), *v))
                .collect(),
        )
    }

    #[test]
    fn field_edits_leave_previous_state_intact() {
        let previous = AppState::default();
        let (next, effect) = previous.apply(Event::LatitudeChanged("10".into()), &env());
        assert_eq!(effect, Effect::None);
        assert_eq!(next.form.latitude, "10");
        assert!(previous.form.latitude.is_empty());
    }

    #[test]
    fn invalid_submit_alerts_without_fetching() {
        let (state, effect) = AppState::default().apply(Event::Submit, &env());
        assert_eq!(
            effect,
            Effect::Alert(Alert {
                kind: ErrorKind::MissingDates,
                message: "Please select both start and end dates.".into(),
            })
        );
        assert!(!state.is_pending());
    }

    #[test]
    fn valid_submit_issues_fetch() {
        let (state, effect) = filled_solar().apply(Event::Submit, &env());
        match effect {
            Effect::Fetch { token, request } => {
                assert_eq!(state.pending, Some(token));
                assert_eq!(request.mode, PredictionMode::Solar);
                assert_eq!(request.dates.start_iso(), "2024-06-02T00:00:00");
            }
            other => panic!("expected fetch, got {other:?}"),
        }
    }

    #[test]
    fn successful_response_replaces_view() {
        let (state, token) = submit(&filled_solar());
        let (state, effect) = state.apply(
            Event::ResponseReceived {
                token,
                outcome: Ok(series(&[5.0, 3.0])),
            },
            &env(),
        );
        assert_eq!(effect, Effect::None);
        assert_eq!(state.view.total_energy, 8.0);
        assert!(!state.is_pending());
    }

    #[test]
    fn stale_response_is_discarded() {
        let (state, first) = submit(&filled_solar());
        let (state, second) = submit(&state);

        let (state, effect) = state.apply(
            Event::ResponseReceived {
                token: first,
                outcome: Ok(series(&[100.0])),
            },
            &env(),
        );
        assert_eq!(effect, Effect::None);
        assert!(state.view.is_empty());
        assert_eq!(state.pending, Some(second));
        assert!(!state.accepts(first));
        assert!(state.accepts(second));

        let (state, _) = state.apply(
            Event::ResponseReceived {
                token: second,
                outcome: Ok(series(&[1.0, 2.0])),
            },
            &env(),
        );
        assert_eq!(state.view.total_energy, 3.0);
    }

    #[test]
    fn failed_response_keeps_previous_predictions() {
        let (state, token) = submit(&filled_solar());
        let (loaded, _) = state.apply(
            Event::ResponseReceived {
                token,
                outcome: Ok(series(&[4.0])),
            },
            &env(),
        );

        let (state, token) = submit(&loaded);
        let (state, effect) = state.apply(
            Event::ResponseReceived {
                token,
                outcome: Err(PredictError::UnexpectedStatus {
                    status: 502,
                    body: "bad gateway".into(),
                }),
            },
            &env(),
        );
        assert_eq!(
            effect,
            Effect::Alert(Alert {
                kind: ErrorKind::NetworkFailure,
                message: "Failed to fetch predictions.".into(),
            })
        );
        assert_eq!(state.view, loaded.view);
        assert!(!state.is_pending());
    }

    #[test]
    fn export_requires_loaded_predictions() {
        let (_, effect) = AppState::default().apply(Event::ExportRequested, &env());
        assert_eq!(
            effect,
            Effect::Alert(Alert {
                kind: ErrorKind::EmptyExport,
                message: "No predictions to export.".into(),
            })
        );

        let (state, token) = submit(&filled_solar());
        let (state, _) = state.apply(
            Event::ResponseReceived {
                token,
                outcome: Ok(series(&[5.0])),
            },
            &env(),
        );
        match state.apply(Event::ExportRequested, &env()).1 {
            Effect::Export(export) => {
                assert_eq!(export.filename, "predictions.csv");
                assert_eq!(export.mime, "text/csv");
                assert_eq!(
                    export.contents,
                    "Datetime,Predicted Energy (kWh)\n2024-06-02 00:00:00,5"
                );
            }
            other => panic!("expected export, got {other:?}"),
        }
    }

    #[test]
    fn basic_response_is_labelled_by_day() {
        let (state, _) = AppState::default().apply_all(
            [
                Event::StartDateChanged(day(2)),
                Event::EndDateChanged(day(4)),
            ],
            &env(),
        );
        let (state, token) = submit(&state);
        let (state, _) = state.apply(
            Event::ResponseReceived {
                token,
                outcome: Ok(PredictionResponse::Basic(vec![1.0, 2.0, 3.0])),
            },
            &env(),
        );
        assert_eq!(state.view.chart_series[2].label, "Day 3");
        assert_eq!(state.view.total_energy, 6.0);
    }
}
