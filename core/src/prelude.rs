use serde::{Deserialize, Serialize};

pub const DEFAULT_BASE_URL: &str = "http://127.0.0.1:5000";
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;
pub const DEFAULT_HORIZON_DAYS: i64 = 15;

/// Shared client configuration consumed by the transport and request builder.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ClientConfig {
    pub base_url: String,
    pub timeout_secs: u64,
    /// IANA name sent with every request; resolved from the host when unset.
    pub timezone: Option<String>,
    /// Forecast horizon for location-dependent requests; `None` disables the check.
    pub horizon_days: Option<i64>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            timezone: None,
            horizon_days: Some(DEFAULT_HORIZON_DAYS),
        }
    }
}

impl ClientConfig {
    /// Rejects settings that would refuse every located request.
    pub fn validate(&self) -> Result<(), ConfigError> {
        match self.horizon_days {
            Some(days) if days < 0 => Err(ConfigError::NegativeHorizon(days)),
            _ => Ok(()),
        }
    }
}

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("horizon_days must not be negative, got {0}")]
    NegativeHorizon(i64),
}

/// Classification of every user-recoverable failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    MissingDates,
    MissingLocation,
    NonNumericLocation,
    LatitudeOutOfRange,
    LongitudeOutOfRange,
    InvalidDateOrder,
    DateOutOfHorizon,
    NetworkFailure,
    EmptyExport,
    ExportFailure,
}

/// Reason a submission was rejected before any network call.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Please select both start and end dates.")]
    MissingDates,
    #[error("Please enter both latitude and longitude.")]
    MissingLocation,
    #[error("Latitude and longitude must be valid numbers.")]
    NonNumericLocation,
    #[error("Latitude must be between -90 and 90.")]
    LatitudeOutOfRange,
    #[error("Longitude must be between -180 and 180.")]
    LongitudeOutOfRange,
    #[error("End date cannot be earlier than Start Date")]
    InvalidDateOrder,
    #[error("Dates must fall within the next {horizon_days} days.")]
    DateOutOfHorizon { horizon_days: i64 },
}

impl ValidationError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            ValidationError::MissingDates => ErrorKind::MissingDates,
            ValidationError::MissingLocation => ErrorKind::MissingLocation,
            ValidationError::NonNumericLocation => ErrorKind::NonNumericLocation,
            ValidationError::LatitudeOutOfRange => ErrorKind::LatitudeOutOfRange,
            ValidationError::LongitudeOutOfRange => ErrorKind::LongitudeOutOfRange,
            ValidationError::InvalidDateOrder => ErrorKind::InvalidDateOrder,
            ValidationError::DateOutOfHorizon { .. } => ErrorKind::DateOutOfHorizon,
        }
    }
}

/// Common error type for the prediction workflow.
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum PredictError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error("transport failure: {0}")]
    Network(String),
    #[error("prediction service returned {status}: {body}")]
    UnexpectedStatus { status: u16, body: String },
    #[error("malformed prediction response: {0}")]
    Decode(String),
    #[error("No predictions to export.")]
    EmptyExport,
    #[error("export failed: {0}")]
    Export(String),
}

impl PredictError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            PredictError::Validation(err) => err.kind(),
            PredictError::Network(_)
            | PredictError::UnexpectedStatus { .. }
            | PredictError::Decode(_) => ErrorKind::NetworkFailure,
            PredictError::EmptyExport => ErrorKind::EmptyExport,
            PredictError::Export(_) => ErrorKind::ExportFailure,
        }
    }

    /// Message shown to the user. Transport details stay in the logs.
    pub fn user_message(&self) -> String {
        match self.kind() {
            ErrorKind::NetworkFailure => "Failed to fetch predictions.".to_string(),
            ErrorKind::ExportFailure => "Failed to export predictions.".to_string(),
            _ => self.to_string(),
        }
    }
}

impl From<reqwest::Error> for PredictError {
    fn from(e: reqwest::Error) -> Self {
        PredictError::Network(e.to_string())
    }
}

impl From<serde_json::Error> for PredictError {
    fn from(e: serde_json::Error) -> Self {
        PredictError::Decode(e.to_string())
    }
}

pub type PredictResult<T> = Result<T, PredictError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn transport_errors_collapse_to_network_failure() {
        let status = PredictError::UnexpectedStatus {
            status: 500,
            body: "boom".into(),
        };
        assert_eq!(status.kind(), ErrorKind::NetworkFailure);
        assert_eq!(status.user_message(), "Failed to fetch predictions.");
        assert_eq!(
            PredictError::Decode("eof".into()).kind(),
            ErrorKind::NetworkFailure
        );
    }

    #[test]
    fn validation_messages_are_user_facing() {
        let err = PredictError::from(ValidationError::InvalidDateOrder);
        assert_eq!(err.kind(), ErrorKind::InvalidDateOrder);
        assert_eq!(
            err.user_message(),
            "End date cannot be earlier than Start Date"
        );
        assert_eq!(
            ValidationError::DateOutOfHorizon { horizon_days: 15 }.to_string(),
            "Dates must fall within the next 15 days."
        );
    }

    #[test]
    fn config_defaults_point_at_local_service() {
        let cfg = ClientConfig::default();
        assert_eq!(cfg.base_url, DEFAULT_BASE_URL);
        assert_eq!(cfg.horizon_days, Some(DEFAULT_HORIZON_DAYS));
        assert!(cfg.timezone.is_none());
        assert_eq!(cfg.validate(), Ok(()));
    }

    #[test]
    fn negative_horizon_is_refused() {
        let cfg = ClientConfig {
            horizon_days: Some(-1),
            ..ClientConfig::default()
        };
        assert_eq!(cfg.validate(), Err(ConfigError::NegativeHorizon(-1)));

        let unbounded = ClientConfig {
            horizon_days: None,
            ..ClientConfig::default()
        };
        assert_eq!(unbounded.validate(), Ok(()));
    }

    #[test]
    fn export_failures_have_their_own_message() {
        let err = PredictError::Export("disk full".into());
        assert_eq!(err.kind(), ErrorKind::ExportFailure);
        assert_eq!(err.user_message(), "Failed to export predictions.");
    }
}
