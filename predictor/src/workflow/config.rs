use anyhow::Context;
use energycore::prelude::{
    ClientConfig, DEFAULT_BASE_URL, DEFAULT_HORIZON_DAYS, DEFAULT_TIMEOUT_SECS,
};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct WorkflowConfig {
    pub base_url: String,
    pub timeout_secs: u64,
    pub timezone: Option<String>,
    pub horizon_days: Option<i64>,
    pub export_dir: Option<PathBuf>,
}

impl Default for WorkflowConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            timezone: None,
            horizon_days: Some(DEFAULT_HORIZON_DAYS),
            export_dir: None,
        }
    }
}

impl WorkflowConfig {
    pub fn load<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        let path_ref = path.as_ref();
        let contents = fs::read_to_string(path_ref)
            .with_context(|| format!("reading workflow config {}", path_ref.display()))?;
        let config: WorkflowConfig = serde_yaml::from_str(&contents)
            .with_context(|| format!("parsing workflow config {}", path_ref.display()))?;
        config
            .to_client_config()
            .validate()
            .with_context(|| format!("validating workflow config {}", path_ref.display()))?;
        Ok(config)
    }

    /// Layers command-line flags over a loaded (or default) config.
    pub fn with_overrides(
        mut self,
        base_url: Option<String>,
        timezone: Option<String>,
        horizon_days: Option<i64>,
        no_horizon: bool,
        export_dir: Option<PathBuf>,
    ) -> Self {
        if let Some(base_url) = base_url {
            self.base_url = base_url;
        }
        if timezone.is_some() {
            self.timezone = timezone;
        }
        if horizon_days.is_some() {
            self.horizon_days = horizon_days;
        }
        if no_horizon {
            self.horizon_days = None;
        }
        if export_dir.is_some() {
            self.export_dir = export_dir;
        }
        self
    }

    pub fn to_client_config(&self) -> ClientConfig {
        ClientConfig {
            base_url: self.base_url.clone(),
            timeout_secs: self.timeout_secs,
            timezone: self.timezone.clone(),
            horizon_days: self.horizon_days,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn overrides_replace_loaded_values() {
        let cfg = WorkflowConfig::default().with_overrides(
            Some("http://forecast.local:8080".into()),
            Some("Europe/Warsaw".into()),
            Some(7),
            false,
            None,
        );
        let client = cfg.to_client_config();
        assert_eq!(client.base_url, "http://forecast.local:8080");
        assert_eq!(client.timezone.as_deref(), Some("Europe/Warsaw"));
        assert_eq!(client.horizon_days, Some(7));
    }

    #[test]
    fn no_horizon_flag_disables_check() {
        let cfg = WorkflowConfig::default().with_overrides(None, None, Some(3), true, None);
        assert_eq!(cfg.horizon_days, None);
        assert_eq!(cfg.base_url, DEFAULT_BASE_URL);
    }

    #[test]
    fn config_load_reads_yaml() {
        let mut temp = NamedTempFile::new().unwrap();
        temp.write_all(b"base_url: http://10.0.0.5:5000\ntimezone: UTC\nexport_dir: out\n")
            .unwrap();
        let path = temp.into_temp_path();
        let cfg = WorkflowConfig::load(&path).unwrap();
        assert_eq!(cfg.base_url, "http://10.0.0.5:5000");
        assert_eq!(cfg.timeout_secs, DEFAULT_TIMEOUT_SECS);
        assert_eq!(cfg.horizon_days, Some(DEFAULT_HORIZON_DAYS));
        assert_eq!(cfg.export_dir, Some(PathBuf::from("out")));
    }

    #[test]
    fn config_load_rejects_negative_horizon() {
        let mut temp = NamedTempFile::new().unwrap();
        temp.write_all(b"horizon_days: -3\n").unwrap();
        let path = temp.into_temp_path();
        let err = WorkflowConfig::load(&path).unwrap_err();
        assert!(format!("{err:#}").contains("horizon_days must not be negative"));
    }

    #[test]
    fn config_load_reports_missing_file() {
        let err = WorkflowConfig::load("/nonexistent/predictor.yaml").unwrap_err();
        assert!(err.to_string().contains("reading workflow config"));
    }
}
