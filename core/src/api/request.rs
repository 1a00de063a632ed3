use crate::api::local_timestamp;
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Prediction model requested from the service.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum PredictionMode {
    #[default]
    Basic,
    Solar,
    Wind,
}

impl PredictionMode {
    pub const ALL: [PredictionMode; 3] = [
        PredictionMode::Basic,
        PredictionMode::Solar,
        PredictionMode::Wind,
    ];

    /// Location-dependent models cannot be requested without coordinates.
    pub fn requires_location(self) -> bool {
        matches!(self, PredictionMode::Solar | PredictionMode::Wind)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            PredictionMode::Basic => "basic",
            PredictionMode::Solar => "solar",
            PredictionMode::Wind => "wind",
        }
    }
}

impl fmt::Display for PredictionMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PredictionMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "basic" => Ok(PredictionMode::Basic),
            "solar" => Ok(PredictionMode::Solar),
            "wind" => Ok(PredictionMode::Wind),
            other => Err(format!("unknown prediction mode '{other}'")),
        }
    }
}

/// Inclusive date range, serialized as local ISO timestamps.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct DateRange {
    #[serde(with = "local_timestamp")]
    pub start: NaiveDateTime,
    #[serde(with = "local_timestamp")]
    pub end: NaiveDateTime,
}

impl DateRange {
    pub fn start_iso(&self) -> String {
        local_timestamp::format(&self.start)
    }

    pub fn end_iso(&self) -> String {
        local_timestamp::format(&self.end)
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct Coordinate {
    pub latitude: f64,
    pub longitude: f64,
}

/// Body of `POST /predict`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PredictionRequest {
    pub dates: DateRange,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<Coordinate>,
    pub mode: PredictionMode,
    pub timezone: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use serde_json::json;

    fn midnight(y: i32, m: u32, d: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap()
    }

    #[test]
    fn solar_request_serializes_wire_shape() {
        let request = PredictionRequest {
            dates: DateRange {
                start: midnight(2024, 1, 1),
                end: midnight(2024, 1, 2),
            },
            location: Some(Coordinate {
                latitude: 52.23,
                longitude: 21.01,
            }),
            mode: PredictionMode::Solar,
            timezone: "Europe/Warsaw".into(),
        };

        let value = serde_json::to_value(&request).unwrap();
        assert_eq!(
            value,
            json!({
                "dates": {"start": "2024-01-01T00:00:00", "end": "2024-01-02T00:00:00"},
                "location": {"latitude": 52.23, "longitude": 21.01},
                "mode": "solar",
                "timezone": "Europe/Warsaw"
            })
        );
    }

    #[test]
    fn basic_request_omits_location() {
        let request = PredictionRequest {
            dates: DateRange {
                start: midnight(2024, 3, 1),
                end: midnight(2024, 3, 1),
            },
            location: None,
            mode: PredictionMode::Basic,
            timezone: "UTC".into(),
        };

        let value = serde_json::to_value(&request).unwrap();
        assert!(value.get("location").is_none());
        assert_eq!(value["mode"], "basic");
    }

    #[test]
    fn mode_parses_case_insensitively() {
        assert_eq!("Solar".parse::<PredictionMode>(), Ok(PredictionMode::Solar));
        assert_eq!(" wind ".parse::<PredictionMode>(), Ok(PredictionMode::Wind));
        assert!("tidal".parse::<PredictionMode>().is_err());
        assert!(!PredictionMode::Basic.requires_location());
    }
}
