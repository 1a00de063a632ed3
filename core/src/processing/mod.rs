pub mod env;
pub mod projector;
pub mod request_builder;

pub use env::{resolve_timezone, RequestEnv};
pub use projector::{ChartPoint, ResponseProjector, ViewState};
pub use request_builder::RequestBuilder;
