use std::path::PathBuf;
use std::time::Duration;

use discovery_engine::GatewaySettings;
use discovery_logging::discovery_warn;

use super::logging::LogDestination;

const STATE_FILE_VAR: &str = "DISCOVERY_STATE_FILE";
const LOG_VAR: &str = "DISCOVERY_LOG";
const TIMEOUT_VAR: &str = "DISCOVERY_REQUEST_TIMEOUT_SECS";
const DEFAULT_STATE_FILE: &str = "./discovery_state.json";

#[derive(Debug, Clone)]
pub struct AppConfig {
    /// JSON file backing preferences and starred projects.
    pub state_file: PathBuf,
    pub log_destination: LogDestination,
    pub gateway: GatewaySettings,
}

impl AppConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Unparseable values fall back to defaults; they are reported once logging is up.
    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let state_file = lookup(STATE_FILE_VAR)
            .filter(|value| !value.trim().is_empty())
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_STATE_FILE));

        let log_destination = lookup(LOG_VAR)
            .and_then(|value| value.parse().ok())
            .unwrap_or_default();

        let mut gateway = GatewaySettings::default();
        if let Some(secs) = lookup(TIMEOUT_VAR).and_then(|value| value.trim().parse::<u64>().ok()) {
            gateway.request_timeout = Duration::from_secs(secs.max(1));
        }

        Self {
            state_file,
            log_destination,
            gateway,
        }
    }

    /// Emit warnings for set-but-ignored variables. Call after logging is initialized.
    pub fn report_ignored(&self) {
        if let Ok(raw) = std::env::var(LOG_VAR) {
            if raw.parse::<LogDestination>().is_err() {
                discovery_warn!("Ignoring {}={:?}", LOG_VAR, raw);
            }
        }
        if let Ok(raw) = std::env::var(TIMEOUT_VAR) {
            if raw.trim().parse::<u64>().is_err() {
                discovery_warn!("Ignoring {}={:?}", TIMEOUT_VAR, raw);
            }
        }
    }
}
