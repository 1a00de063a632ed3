use chart::SeriesChart;
use config::VisualizerConfig;
use energycore::api::{PredictionMode, PredictionResponse};
use energycore::prelude::{PredictError, PredictResult};
use energycore::processing::RequestEnv;
use energycore::state::{parse_date_input, Alert, AppState, CsvExport, Effect, Event, RequestToken};
use energycore::transport::PredictionClient;
use iced::{
    widget::{button, column, row, scrollable, text, text_input, Canvas, Column, Container, Row},
    Alignment, Element, Length, Task, Theme,
};
use log::{error, info};
use std::path::PathBuf;

mod chart;
mod config;

fn main() -> iced::Result {
    env_logger::init();
    iced::application(Visualizer::boot, Visualizer::update, Visualizer::view)
        .title(application_title)
        .theme(application_theme)
        .run()
}

fn application_title(_: &Visualizer) -> String {
    "Energy Prediction".into()
}

fn application_theme(_: &Visualizer) -> Theme {
    Theme::Dark
}

struct Visualizer {
    config: VisualizerConfig,
    client: Option<PredictionClient>,
    app: AppState,
    start_input: String,
    end_input: String,
    status: String,
    history: Vec<String>,
}

#[derive(Debug, Clone)]
enum Message {
    FieldChanged(FormField, String),
    ModeSelected(PredictionMode),
    Submit,
    PredictionFetched(RequestToken, PredictResult<PredictionResponse>),
    ExportCsv,
    Exported(Result<PathBuf, String>),
}

#[derive(Debug, Clone, Copy)]
enum FormField {
    Start,
    End,
    Latitude,
    Longitude,
}

impl Visualizer {
    fn boot() -> (Self, Task<Message>) {
        let config = VisualizerConfig::from_env();
        let (client, status) = match PredictionClient::new(&config.client) {
            Ok(client) => {
                let status = format!("Ready: {}", client.endpoint());
                (Some(client), status)
            }
            Err(err) => {
                error!("prediction client unavailable: {err}");
                (None, format!("Client error: {err}"))
            }
        };

        (
            Visualizer {
                config,
                client,
                app: AppState::default(),
                start_input: String::new(),
                end_input: String::new(),
                status,
                history: Vec::new(),
            },
            Task::none(),
        )
    }

    fn update(state: &mut Self, message: Message) -> Task<Message> {
        match message {
            Message::FieldChanged(field, value) => {
                let event = match field {
                    FormField::Start => {
                        let parsed = parse_date_input(&value);
                        state.start_input = value;
                        Event::StartDateChanged(parsed)
                    }
                    FormField::End => {
                        let parsed = parse_date_input(&value);
                        state.end_input = value;
                        Event::EndDateChanged(parsed)
                    }
                    FormField::Latitude => Event::LatitudeChanged(value),
                    FormField::Longitude => Event::LongitudeChanged(value),
                };
                state.dispatch(event)
            }
            Message::ModeSelected(mode) => state.dispatch(Event::ModeChanged(mode)),
            Message::Submit => state.dispatch(Event::Submit),
            Message::PredictionFetched(token, outcome) => {
                let current = state.app.accepts(token);
                if !current {
                    if let Some(client) = &state.client {
                        client.metrics().record_stale();
                    }
                }
                let succeeded = outcome.is_ok();
                let task = state.dispatch(Event::ResponseReceived { token, outcome });
                if current && succeeded {
                    let view = &state.app.view;
                    state.status = format!(
                        "Loaded {} points, total {:.2} kWh",
                        view.chart_series.len(),
                        view.total_energy
                    );
                    let entry = format!("Prediction #{}: {}", token.value(), state.status);
                    state.push_history(entry);
                }
                task
            }
            Message::ExportCsv => state.dispatch(Event::ExportRequested),
            Message::Exported(Ok(path)) => {
                state.status = format!("Exported {}", path.display());
                state.push_history(state.status.clone());
                Task::none()
            }
            Message::Exported(Err(err)) => {
                error!("writing export failed: {err}");
                state.status = Alert::from(&PredictError::Export(err)).message;
                Task::none()
            }
        }
    }

    /// Runs the event through the reducer and turns the effect into a task.
    fn dispatch(&mut self, event: Event) -> Task<Message> {
        let env = RequestEnv::capture(&self.config.client);
        let (next, effect) = self.app.apply(event, &env);
        self.app = next;

        match effect {
            Effect::None => Task::none(),
            Effect::Fetch { token, request } => {
                let Some(client) = self.client.clone() else {
                    let outcome = Err(PredictError::Network(
                        "prediction client unavailable".into(),
                    ));
                    return self.dispatch(Event::ResponseReceived { token, outcome });
                };
                self.status = format!(
                    "Requesting {} prediction {} -> {}",
                    request.mode,
                    request.dates.start_iso(),
                    request.dates.end_iso()
                );
                Task::perform(
                    async move { client.predict(&request).await },
                    move |outcome| Message::PredictionFetched(token, outcome),
                )
            }
            Effect::Alert(alert) => {
                info!("alert {:?}: {}", alert.kind, alert.message);
                self.status = alert.message;
                Task::none()
            }
            Effect::Export(export) => Task::perform(
                write_export(self.config.export_dir.clone(), export),
                Message::Exported,
            ),
        }
    }

    fn view(state: &Self) -> Element<'_, Message> {
        let form = &state.app.form;

        let mode_row = PredictionMode::ALL
            .iter()
            .fold(Row::new().spacing(8), |row, mode| {
                let label = if *mode == form.mode {
                    format!("[{mode}]")
                } else {
                    mode.to_string()
                };
                row.push(
                    button(text(label))
                        .on_press(Message::ModeSelected(*mode))
                        .padding(6),
                )
            });

        let predict_label = if state.app.is_pending() {
            "Predicting..."
        } else {
            "Predict"
        };

        let form_column = column![
            text("Energy Prediction").size(26),
            text_input("Start date (YYYY-MM-DD)", &state.start_input)
                .on_input(|value| Message::FieldChanged(FormField::Start, value))
                .padding(6),
            text_input("End date (YYYY-MM-DD)", &state.end_input)
                .on_input(|value| Message::FieldChanged(FormField::End, value))
                .padding(6),
            text("Model").size(16),
            mode_row,
            text_input("Latitude", &form.latitude)
                .on_input(|value| Message::FieldChanged(FormField::Latitude, value))
                .padding(6),
            text_input("Longitude", &form.longitude)
                .on_input(|value| Message::FieldChanged(FormField::Longitude, value))
                .padding(6),
            row![
                button(predict_label)
                    .on_press_maybe((!state.app.is_pending()).then_some(Message::Submit))
                    .padding(10),
                button("Export CSV").on_press(Message::ExportCsv).padding(10),
            ]
            .spacing(10),
            text(&state.status).size(14),
            column![
                text("Solar and wind models need coordinates.").size(12),
                text("Basic mode sends coordinates only when both are filled in.").size(12),
            ]
            .spacing(4)
            .padding(6),
        ]
        .spacing(10)
        .padding(16)
        .width(Length::Fixed(360.0));

        let view = &state.app.view;
        let total = if view.is_empty() {
            text("Total: n/a").size(18)
        } else {
            text(format!("Total: {:.2} kWh", view.total_energy)).size(18)
        };

        let chart = Canvas::new(SeriesChart::new(&view.values()))
            .width(Length::Fill)
            .height(Length::Fixed(260.0));

        let table = if view.is_empty() {
            Column::new().push(text("No predictions yet").size(12))
        } else {
            view.chart_series
                .iter()
                .fold(Column::new().spacing(4), |col, point| {
                    col.push(text(format!("{}: {} kWh", point.label, point.value)).size(12))
                })
        };

        let history_list = if state.history.is_empty() {
            Column::new().push(text("No activity yet").size(12))
        } else {
            state
                .history
                .iter()
                .rev()
                .fold(Column::new().spacing(4), |col, entry| {
                    col.push(text(entry.clone()).size(12))
                })
        };

        let results_column = column![
            text("Predictions").size(26),
            total,
            text("Predicted Energy (kWh)").size(16),
            chart,
            Container::new(scrollable(table).height(Length::Fixed(160.0))).padding(6),
            text("Activity log").size(16),
            Container::new(scrollable(history_list).height(Length::Fixed(90.0))).padding(6),
        ]
        .spacing(10)
        .padding(16)
        .width(Length::Fill);

        let layout = row![form_column, results_column]
            .spacing(20)
            .align_y(Alignment::Start)
            .padding(20);

        Container::new(layout)
            .width(Length::Fill)
            .height(Length::Fill)
            .center_y(Length::Fill)
            .into()
    }

    fn push_history(&mut self, entry: String) {
        self.history.push(entry);
        if self.history.len() > 20 {
            self.history.remove(0);
        }
    }
}

async fn write_export(dir: PathBuf, export: CsvExport) -> Result<PathBuf, String> {
    tokio::fs::create_dir_all(&dir)
        .await
        .map_err(|e| e.to_string())?;
    let path = dir.join(export.filename);
    tokio::fs::write(&path, export.contents)
        .await
        .map_err(|e| e.to_string())?;
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use energycore::state::FormState;

    fn offline(app: AppState) -> Visualizer {
        Visualizer {
            config: VisualizerConfig::default(),
            client: None,
            app,
            start_input: String::new(),
            end_input: String::new(),
            status: String::new(),
            history: Vec::new(),
        }
    }

    #[test]
    fn submit_without_client_clears_pending() {
        let form = FormState::new(PredictionMode::Basic)
            .with_dates(parse_date_input("2024-06-02"), parse_date_input("2024-06-03"));
        let mut state = offline(AppState::new(form));

        let _ = Visualizer::update(&mut state, Message::Submit);
        assert!(!state.app.is_pending());
        assert_eq!(state.status, "Failed to fetch predictions.");

        let cleared = Message::FieldChanged(FormField::End, String::new());
        let _ = Visualizer::update(&mut state, cleared);
        let _ = Visualizer::update(&mut state, Message::Submit);
        assert_eq!(state.status, "Please select both start and end dates.");
    }

    #[test]
    fn export_write_failure_uses_export_alert() {
        let mut state = offline(AppState::default());
        let _ = Visualizer::update(&mut state, Message::Exported(Err("read-only".into())));
        assert_eq!(state.status, "Failed to export predictions.");
    }
}
