pub mod app;
pub mod form;
pub mod token;

pub use app::{Alert, AppState, CsvExport, Effect, Event};
pub use form::{parse_date_input, parse_date_strict, FormState};
pub use token::{RequestToken, SubmissionTracker};
