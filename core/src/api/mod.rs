pub mod local_timestamp;
pub mod request;
pub mod response;

pub use request::{Coordinate, DateRange, PredictionMode, PredictionRequest};
pub use response::{PredictionPoint, PredictionResponse};
