//! Core of the energy prediction client.
//!
//! Validates form input into prediction requests, talks to the remote
//! `/predict` service and projects the returned series into totals, chart data
//! and CSV text. All state transitions are pure; front ends only carry out the
//! returned effects.

pub mod api;
pub mod math;
pub mod prelude;
pub mod processing;
pub mod state;
pub mod telemetry;
pub mod transport;

pub use prelude::{
    ClientConfig, ConfigError, ErrorKind, PredictError, PredictResult, ValidationError,
};
