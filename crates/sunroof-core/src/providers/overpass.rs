//! Overpass API adapter for the building footprint port

use std::collections::BTreeMap;
use std::time::Duration;

use async_trait::async_trait;
use serde::Deserialize;

use crate::error::{Result, SunroofError};
use crate::models::{FootprintElement, GeoPoint, Ring};
use crate::ports::FeatureProvider;

const PROVIDER: &str = "Overpass API";

/// Building footprint provider backed by an Overpass interpreter
pub struct OverpassProvider {
    /// Interpreter endpoint (e.g. "https://overpass-api.de/api/interpreter")
    base_url: String,

    /// Bound applied to each request
    timeout: Duration,

    /// HTTP client
    client: reqwest::Client,
}

impl OverpassProvider {
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
impl FeatureProvider for OverpassProvider {
    async fn footprints_near(
        &self,
        point: GeoPoint,
        radius_m: f64,
    ) -> Result<Vec<FootprintElement>> {
        // Only 'way' elements tagged as buildings; 'geom' inlines the vertices
        let query = format!(
            "[out:json][timeout:25];\n(\n  way(around:{},{},{})[\"building\"];\n);\nout body geom;",
            radius_m, point.lat, point.lon
        );

        tracing::debug!(radius_m, lat = point.lat, lon = point.lon, "querying Overpass for footprints");

        let response = self
            .client
            .post(&self.base_url)
            .body(query)
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

        let body: OverpassResponse =
            response.json().await.map_err(|e| SunroofError::MalformedResponse {
                provider: PROVIDER,
                reason: e.to_string(),
            })?;

        Ok(footprints_from_elements(body.elements))
    }
}

/// Keep only building ways that carry a geometry
fn footprints_from_elements(elements: Vec<OverpassElement>) -> Vec<FootprintElement> {
    elements
        .into_iter()
        .filter_map(|element| {
            if element.element_type != "way" {
                return None;
            }
            if !element.tags.contains_key("building") {
                return None;
            }
            let vertices = element.geometry?;
            let ring =
                Ring::new(vertices.into_iter().map(|v| GeoPoint::new(v.lat, v.lon)).collect());
            Some(FootprintElement {
                id: element.id,
                tags: element.tags,
                ring,
            })
        })
        .collect()
}

/// Overpass response envelope
#[derive(Debug, Deserialize)]
struct OverpassResponse {
    #[serde(default)]
    elements: Vec<OverpassElement>,
}

#[derive(Debug, Deserialize)]
struct OverpassElement {
    #[serde(rename = "type")]
    element_type: String,
    id: i64,
    #[serde(default)]
    tags: BTreeMap<String, String>,
    geometry: Option<Vec<OverpassVertex>>,
}

#[derive(Debug, Deserialize)]
struct OverpassVertex {
    lat: f64,
    lon: f64,
}
