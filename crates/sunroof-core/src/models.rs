//! Canonical domain types for the Sunroof pipeline.
//!
//! All entities here live for the duration of a single query; nothing is
//! shared or persisted across queries.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::{Result, SunroofError};

/// A WGS84 geographic point in degrees
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    pub lat: f64,
    pub lon: f64,
}

impl GeoPoint {
    pub fn new(lat: f64, lon: f64) -> Self {
        Self { lat, lon }
    }

    /// Reject coordinates outside the WGS84 domain
    pub fn validate(&self) -> Result<()> {
        let lat_ok = self.lat.is_finite() && (-90.0..=90.0).contains(&self.lat);
        let lon_ok = self.lon.is_finite() && (-180.0..=180.0).contains(&self.lon);
        if lat_ok && lon_ok {
            Ok(())
        } else {
            Err(SunroofError::InvalidCoordinate {
                lat: self.lat,
                lon: self.lon,
            })
        }
    }
}

/// An ordered ring of vertices as returned by the feature provider.
/// Not guaranteed to be closed; below 3 vertices it is degenerate.
#[derive(Debug, Clone, PartialEq)]
pub struct Ring {
    vertices: Vec<GeoPoint>,
}

impl Ring {
    pub fn new(vertices: Vec<GeoPoint>) -> Self {
        Self { vertices }
    }

    pub fn vertices(&self) -> &[GeoPoint] {
        &self.vertices
    }

    pub fn len(&self) -> usize {
        self.vertices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    /// A ring with fewer than 3 vertices cannot be a polygon
    pub fn is_degenerate(&self) -> bool {
        self.vertices.len() < 3
    }

    /// Render as a GeoJSON Polygon with an explicitly closed exterior ring
    pub fn to_geojson_polygon(&self) -> geojson::Geometry {
        let mut coords: Vec<Vec<f64>> =
            self.vertices.iter().map(|p| vec![p.lon, p.lat]).collect();
        if let (Some(first), Some(last)) = (coords.first(), coords.last()) {
            if first != last {
                coords.push(first.clone());
            }
        }
        geojson::Geometry::new(geojson::Value::Polygon(vec![coords]))
    }
}

/// A raw footprint element as handed over by the feature provider
#[derive(Debug, Clone, PartialEq)]
pub struct FootprintElement {
    pub id: i64,
    pub tags: BTreeMap<String, String>,
    pub ring: Ring,
}

/// A footprint under consideration during the selection pass.
/// Created transiently per query and discarded once the winner is extracted.
#[derive(Debug, Clone)]
pub struct BuildingCandidate {
    pub id: i64,
    pub tags: BTreeMap<String, String>,
    pub ring: Ring,
    pub centroid: GeoPoint,
    pub distance_meters: f64,
}

/// Daily irradiance climatology keyed by calendar day (YYYYMMDD).
/// `None` marks a missing observation; missing days are dropped, never zeroed.
pub type IrradianceSeries = BTreeMap<String, Option<f64>>;

/// The externally visible result for the winning footprint
#[derive(Debug, Clone, Serialize)]
pub struct BuildingMatch {
    pub id: i64,
    #[serde(rename = "type")]
    pub element_type: String,
    pub tags: BTreeMap<String, String>,
    pub shape: geojson::Geometry,
    pub distance_meters: f64,
    pub centroid_lat: f64,
    pub centroid_lon: f64,
    pub area: f64,
    #[serde(rename = "solarPotential")]
    pub solar_potential: Option<f64>,
}

impl BuildingMatch {
    /// Assemble the final result from the winning candidate and its enrichment
    pub fn from_candidate(
        candidate: BuildingCandidate,
        area: f64,
        solar_potential: Option<f64>,
    ) -> Self {
        let shape = candidate.ring.to_geojson_polygon();
        Self {
            id: candidate.id,
            element_type: "way".to_string(),
            tags: candidate.tags,
            shape,
            distance_meters: candidate.distance_meters,
            centroid_lat: candidate.centroid.lat,
            centroid_lon: candidate.centroid.lon,
            area,
            solar_potential,
        }
    }
}
