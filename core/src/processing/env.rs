use chrono::{Local, NaiveDate};
use log::warn;

use crate::prelude::ClientConfig;

const FALLBACK_TIMEZONE: &str = "UTC";

/// Clock and locale values captured when a submission is made.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestEnv {
    pub today: NaiveDate,
    pub timezone: String,
    pub horizon_days: Option<i64>,
}

impl RequestEnv {
    /// Reads the host clock and timezone, honouring the configured override.
    pub fn capture(config: &ClientConfig) -> Self {
        Self {
            today: Local::now().date_naive(),
            timezone: resolve_timezone(config.timezone.as_deref()),
            horizon_days: config.horizon_days,
        }
    }

    pub fn fixed(today: NaiveDate, timezone: &str, horizon_days: Option<i64>) -> Self {
        Self {
            today,
            timezone: timezone.to_string(),
            horizon_days,
        }
    }
}

/// Returns the IANA name to send with requests.
///
/// # Arguments
///
/// * 'configured' - explicit override; blank values are ignored
pub fn resolve_timezone(configured: Option<&str>) -> String {
    if let Some(name) = configured.map(str::trim).filter(|name| !name.is_empty()) {
        return name.to_string();
    }

    match iana_time_zone::get_timezone() {
        Ok(name) => name,
        Err(e) => {
            warn!("unable to resolve host timezone, using {FALLBACK_TIMEZONE}: {e}");
            FALLBACK_TIMEZONE.to_string()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn configured_timezone_wins() {
        assert_eq!(resolve_timezone(Some("Europe/Warsaw")), "Europe/Warsaw");
    }

    #[test]
    fn blank_override_falls_through_to_host() {
        assert!(!resolve_timezone(Some("  ")).is_empty());
        assert!(!resolve_timezone(None).is_empty());
    }

    #[test]
    fn capture_copies_horizon_from_config() {
        let config = ClientConfig {
            timezone: Some("America/Chicago".into()),
            horizon_days: None,
            ..Default::default()
        };
        let env = RequestEnv::capture(&config);
        assert_eq!(env.timezone, "America/Chicago");
        assert_eq!(env.horizon_days, None);
    }
}
