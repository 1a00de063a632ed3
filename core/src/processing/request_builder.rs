use chrono::{NaiveDateTime, TimeDelta};

use crate::api::{Coordinate, DateRange, PredictionMode, PredictionRequest};
use crate::prelude::ValidationError;
use crate::processing::env::RequestEnv;
use crate::state::form::FormState;
use crate::telemetry::log::LogManager;

/// Turns raw form input into a normalized prediction request.
///
/// Rules are checked in a fixed order and only the first violation is
/// reported, since the user sees one alert per submit.
pub struct RequestBuilder {
    logger: LogManager,
}

impl RequestBuilder {
    pub fn new() -> Self {
        Self {
            logger: LogManager::new("request_builder"),
        }
    }

    pub fn build(
        &self,
        form: &FormState,
        env: &RequestEnv,
    ) -> Result<PredictionRequest, ValidationError> {
        match assemble(form, env) {
            Ok(request) => {
                self.logger.record(&format!(
                    "{} request {} -> {} ({})",
                    request.mode,
                    request.dates.start_iso(),
                    request.dates.end_iso(),
                    request.timezone
                ));
                Ok(request)
            }
            Err(err) => {
                self.logger.reject(&format!("submission rejected: {err}"));
                Err(err)
            }
        }
    }
}

impl Default for RequestBuilder {
    fn default() -> Self {
        Self::new()
    }
}

fn assemble(form: &FormState, env: &RequestEnv) -> Result<PredictionRequest, ValidationError> {
    let (start, end) = match (form.start, form.end) {
        (Some(start), Some(end)) => (start, end),
        _ => return Err(ValidationError::MissingDates),
    };

    let location = if form.mode.requires_location() || form.has_location_input() {
        Some(parse_location(&form.latitude, &form.longitude)?)
    } else {
        None
    };

    if start > end {
        return Err(ValidationError::InvalidDateOrder);
    }

    if location.is_some() {
        if let Some(horizon_days) = env.horizon_days {
            check_horizon(start, end, env, horizon_days)?;
        }
    }

    let mode = match (form.mode, location) {
        (PredictionMode::Wind, _) => PredictionMode::Wind,
        (_, Some(_)) => PredictionMode::Solar,
        (_, None) => PredictionMode::Basic,
    };

    Ok(PredictionRequest {
        dates: DateRange { start, end },
        location,
        mode,
        timezone: env.timezone.clone(),
    })
}

fn parse_location(latitude: &str, longitude: &str) -> Result<Coordinate, ValidationError> {
    let latitude = latitude.trim();
    let longitude = longitude.trim();
    if latitude.is_empty() || longitude.is_empty() {
        return Err(ValidationError::MissingLocation);
    }

    let latitude = parse_finite(latitude)?;
    let longitude = parse_finite(longitude)?;

    if !(-90.0..=90.0).contains(&latitude) {
        return Err(ValidationError::LatitudeOutOfRange);
    }
    if !(-180.0..=180.0).contains(&longitude) {
        return Err(ValidationError::LongitudeOutOfRange);
    }

    Ok(Coordinate {
        latitude,
        longitude,
    })
}

fn parse_finite(raw: &str) -> Result<f64, ValidationError> {
    raw.parse::<f64>()
        .ok()
        .filter(|value| value.is_finite())
        .ok_or(ValidationError::NonNumericLocation)
}

fn check_horizon(
    start: NaiveDateTime,
    end: NaiveDateTime,
    env: &RequestEnv,
    horizon_days: i64,
) -> Result<(), ValidationError> {
    if start.date() < env.today {
        return Err(ValidationError::DateOutOfHorizon { horizon_days });
    }

    // A horizon past the calendar's end leaves the range unbounded.
    let last_day = TimeDelta::try_days(horizon_days)
        .and_then(|span| env.today.checked_add_signed(span));
    match last_day {
        Some(last_day) if end.date() > last_day => {
            Err(ValidationError::DateOutOfHorizon { horizon_days })
        }
        _ => Ok(()),
    }
}
