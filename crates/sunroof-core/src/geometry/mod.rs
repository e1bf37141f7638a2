//! Geometry primitives shared by the selector and the area calculator

pub mod area;
pub mod selector;

use geo::{Distance, Geodesic, Point};

use crate::models::{GeoPoint, Ring};

/// Arithmetic mean of the ring's vertices treated as planar (lon, lat) pairs.
///
/// This is an approximation, not the true area-weighted or geodesic centroid.
/// It is acceptable because building footprints are tiny relative to Earth's
/// radius, and it is kept behind this one function so an exact centroid could
/// be substituted without touching callers.
pub fn vertex_mean_centroid(ring: &Ring) -> Option<GeoPoint> {
    if ring.is_empty() {
        return None;
    }
    let n = ring.len() as f64;
    let (lat_sum, lon_sum) = ring
        .vertices()
        .iter()
        .fold((0.0, 0.0), |(lat, lon), p| (lat + p.lat, lon + p.lon));
    Some(GeoPoint::new(lat_sum / n, lon_sum / n))
}

/// Ellipsoidal geodesic distance between two points in meters (WGS84)
pub fn geodesic_distance_m(a: GeoPoint, b: GeoPoint) -> f64 {
    Geodesic.distance(Point::new(a.lon, a.lat), Point::new(b.lon, b.lat))
}
