use chrono::{NaiveDate, NaiveDateTime};

use crate::api::local_timestamp::LOCAL_ISO_FORMAT;
use crate::api::PredictionMode;

/// Raw form values exactly as the user entered them.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FormState {
    pub start: Option<NaiveDateTime>,
    pub end: Option<NaiveDateTime>,
    pub latitude: String,
    pub longitude: String,
    pub mode: PredictionMode,
}

impl FormState {
    pub fn new(mode: PredictionMode) -> Self {
        Self {
            mode,
            ..Default::default()
        }
    }

    pub fn with_dates(mut self, start: Option<NaiveDateTime>, end: Option<NaiveDateTime>) -> Self {
        self.start = start;
        self.end = end;
        self
    }

    pub fn with_location(mut self, latitude: &str, longitude: &str) -> Self {
        self.latitude = latitude.to_string();
        self.longitude = longitude.to_string();
        self
    }

    /// True when either coordinate field holds something other than whitespace.
    pub fn has_location_input(&self) -> bool {
        !self.latitude.trim().is_empty() || !self.longitude.trim().is_empty()
    }
}

/// Parses a date field as typed by the user.
///
/// Accepts `YYYY-MM-DD` (local midnight) or `YYYY-MM-DDTHH:MM:SS`. Anything else
/// is treated as no selection.
pub fn parse_date_input(raw: &str) -> Option<NaiveDateTime> {
    parse_date_strict(raw).ok()
}

/// Same formats as [`parse_date_input`], but reports what was wrong.
pub fn parse_date_strict(raw: &str) -> Result<NaiveDateTime, String> {
    let trimmed = raw.trim();
    if let Ok(date_time) = NaiveDateTime::parse_from_str(trimmed, LOCAL_ISO_FORMAT) {
        return Ok(date_time);
    }

    NaiveDate::parse_from_str(trimmed, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .ok_or_else(|| {
            format!("invalid date `{trimmed}`, expected YYYY-MM-DD or YYYY-MM-DDTHH:MM:SS")
        })
}
