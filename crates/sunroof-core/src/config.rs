//! Pipeline configuration loaded from environment variables

use std::env;
use std::time::Duration;

/// Start of the fixed irradiance climatology window (YYYYMMDD).
/// A static constant by design: the window is never derived from the query.
pub const CLIMATOLOGY_START: &str = "20190101";

/// End of the fixed irradiance climatology window (YYYYMMDD).
pub const CLIMATOLOGY_END: &str = "20201231";

/// Nominal photovoltaic panel efficiency applied to annual irradiation.
pub const PANEL_EFFICIENCY: f64 = 0.21;

/// System derate factor covering inverter, wiring, and soiling losses.
pub const SYSTEM_DERATE: f64 = 0.85;

/// Configuration for one query pipeline
#[derive(Debug, Clone)]
pub struct PipelineConfig {
    /// Radius around the query point the feature provider searches, in meters
    pub search_radius_m: f64,

    /// Base URL of the building footprint provider (Overpass interpreter)
    pub overpass_url: String,

    /// Base URL of the irradiance climatology provider (NASA POWER daily point)
    pub power_url: String,

    /// Bound applied to each outbound provider call
    pub request_timeout: Duration,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            search_radius_m: 100.0,
            overpass_url: "https://overpass-api.de/api/interpreter".to_string(),
            power_url: "https://power.larc.nasa.gov/api/temporal/daily/point".to_string(),
            request_timeout: Duration::from_secs(25),
        }
    }
}

impl PipelineConfig {
    /// Load configuration from environment variables, falling back to defaults
    pub fn from_env() -> Self {
        let defaults = Self::default();

        let search_radius_m = env::var("SUNROOF_RADIUS_M")
            .ok()
            .and_then(|r| r.parse().ok())
            .unwrap_or(defaults.search_radius_m);

        let overpass_url =
            env::var("SUNROOF_OVERPASS_URL").unwrap_or(defaults.overpass_url);

        let power_url = env::var("SUNROOF_POWER_URL").unwrap_or(defaults.power_url);

        let request_timeout = env::var("SUNROOF_TIMEOUT_SECS")
            .ok()
            .and_then(|t| t.parse().ok())
            .map(Duration::from_secs)
            .unwrap_or(defaults.request_timeout);

        Self {
            search_radius_m,
            overpass_url,
            power_url,
            request_timeout,
        }
    }
}
