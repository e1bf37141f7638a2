//! NASA POWER adapter for the irradiance climatology port

use std::collections::BTreeMap;
use std::time::Duration;

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::Value as JsonValue;

use crate::config::{CLIMATOLOGY_END, CLIMATOLOGY_START};
use crate::error::{Result, SunroofError};
use crate::models::{GeoPoint, IrradianceSeries};
use crate::ports::ClimateProvider;

const PROVIDER: &str = "NASA POWER";

/// All-sky shortwave irradiance incident on the surface, kWh/m^2/day
const PARAMETER: &str = "ALLSKY_SFC_SW_DWN";

/// Daily irradiance provider backed by the NASA POWER temporal point API
pub struct PowerProvider {
    /// Daily point endpoint (e.g. "https://power.larc.nasa.gov/api/temporal/daily/point")
    base_url: String,

    /// Bound applied to each request
    timeout: Duration,

    /// HTTP client
    client: reqwest::Client,
}

impl PowerProvider {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Self {
        Self {
            base_url: base_url.into(),
            timeout,
            client: reqwest::Client::new(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

#[async_trait]
impl ClimateProvider for PowerProvider {
    async fn daily_irradiance(&self, point: GeoPoint) -> Result<IrradianceSeries> {
        let url = format!(
            "{}?parameters={}&community=RE&longitude={}&latitude={}&start={}&end={}&format=JSON",
            self.base_url, PARAMETER, point.lon, point.lat, CLIMATOLOGY_START, CLIMATOLOGY_END
        );

        tracing::debug!(lat = point.lat, lon = point.lon, "querying NASA POWER climatology");

        let response = self
            .client
            .get(&url)
            .timeout(self.timeout)
            .send()
            .await
            .map_err(|e| SunroofError::ProviderUnavailable {
                provider: PROVIDER,
                reason: e.to_string(),
            })?;

        if !response.status().is_success() {
            return Err(SunroofError::ProviderUnavailable {
                provider: PROVIDER,
                reason: format!("status {}", response.status()),
            });
        }

        let body: PowerResponse =
            response.json().await.map_err(|e| SunroofError::MalformedResponse {
                provider: PROVIDER,
                reason: e.to_string(),
            })?;

        series_from_response(body)
    }
}

/// Pull the irradiance series out of the POWER response envelope.
/// Non-numeric entries become `None`; the estimator drops them later.
fn series_from_response(body: PowerResponse) -> Result<IrradianceSeries> {
    let raw = body.properties.parameter.allsky_sfc_sw_dwn;
    if raw.is_empty() {
        return Err(SunroofError::MalformedResponse {
            provider: PROVIDER,
            reason: format!("response carried no {} series", PARAMETER),
        });
    }
    Ok(raw.into_iter().map(|(day, value)| (day, value.as_f64())).collect())
}

/// POWER response envelope: properties -> parameter -> ALLSKY_SFC_SW_DWN
#[derive(Debug, Deserialize)]
struct PowerResponse {
    properties: PowerProperties,
}

#[derive(Debug, Deserialize)]
struct PowerProperties {
    parameter: PowerParameter,
}

#[derive(Debug, Deserialize)]
struct PowerParameter {
    #[serde(rename = "ALLSKY_SFC_SW_DWN", default)]
    allsky_sfc_sw_dwn: BTreeMap<String, JsonValue>,
}
