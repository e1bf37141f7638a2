//! Ground area of a footprint via a local UTM projection
//!
//! UTM is conformal rather than strictly equal-area, but at single-building
//! scale the distortion is negligible and accepted.

use geo::{Area, Coord, LineString, Polygon};
use proj::Proj;

use crate::error::{Result, SunroofError};
use crate::models::{GeoPoint, Ring};

use super::vertex_mean_centroid;

/// UTM zone number (1-60) for a longitude in degrees
pub fn utm_zone(lon: f64) -> u32 {
    (((lon + 180.0) / 6.0).floor() as i64).rem_euclid(60) as u32 + 1
}

/// EPSG code of the UTM zone containing `centroid`.
/// Northern hemisphere maps to 326xx, southern to 327xx.
pub fn utm_epsg(centroid: GeoPoint) -> u32 {
    let zone = utm_zone(centroid.lon);
    if centroid.lat >= 0.0 {
        32600 + zone
    } else {
        32700 + zone
    }
}

/// Planar area of `ring` in square meters.
///
/// The ring is transformed from WGS84 into the UTM zone of its vertex-mean
/// centroid, then measured with the shoelace formula. Empty rings measure 0;
/// rings that cannot form a polygon fail with
/// [`SunroofError::DegenerateGeometry`] and rings that cannot be projected
/// with [`SunroofError::Projection`] - never a silent 0.
pub fn projected_area_sqm(ring: &Ring) -> Result<f64> {
    if ring.is_empty() {
        return Ok(0.0);
    }
    if ring.is_degenerate() {
        return Err(SunroofError::DegenerateGeometry { vertices: ring.len() });
    }

    // Non-empty ring, so the centroid exists
    let centroid = match vertex_mean_centroid(ring) {
        Some(c) => c,
        None => {
            return Err(SunroofError::Projection {
                reason: "centroid of a non-empty ring could not be derived".to_string(),
            })
        }
    };
    let epsg = utm_epsg(centroid);

    let transform =
        Proj::new_known_crs("EPSG:4326", &format!("EPSG:{}", epsg), None).map_err(|e| {
            SunroofError::Projection {
                reason: format!("failed to construct WGS84 -> EPSG:{} transform: {}", epsg, e),
            }
        })?;

    let projected: Result<Vec<Coord>> = ring
        .vertices()
        .iter()
        .map(|p| {
            transform.convert((p.lon, p.lat)).map(|(x, y)| Coord { x, y }).map_err(|e| {
                SunroofError::Projection {
                    reason: format!("vertex ({}, {}) failed to project: {}", p.lon, p.lat, e),
                }
            })
        })
        .collect();

    // Polygon::new closes the exterior ring if the provider left it open
    let polygon = Polygon::new(LineString::from(projected?), vec![]);
    Ok(polygon.unsigned_area())
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Approximate square of `side_m` meters centered at (lat, lon)
    fn square_ring(lat: f64, lon: f64, side_m: f64) -> Ring {
        let dlat = side_m / 2.0 / 110_574.0;
        let dlon = side_m / 2.0 / (111_320.0 * lat.to_radians().cos());
        Ring::new(vec![
            GeoPoint::new(lat - dlat, lon - dlon),
            GeoPoint::new(lat - dlat, lon + dlon),
            GeoPoint::new(lat + dlat, lon + dlon),
            GeoPoint::new(lat + dlat, lon - dlon),
        ])
    }

    #[test]
    fn test_utm_zone_boundaries() {
        assert_eq!(utm_zone(-180.0), 1);
        assert_eq!(utm_zone(-174.1), 1);
        assert_eq!(utm_zone(0.0), 31);
        assert_eq!(utm_zone(101.666), 47);
        assert_eq!(utm_zone(179.9), 60);
    }

    #[test]
    fn test_utm_epsg_hemispheres() {
        // Kuala Lumpur, zone 47N
        assert_eq!(utm_epsg(GeoPoint::new(3.139, 101.666)), 32647);
        // Jakarta, southern hemisphere
        assert_eq!(utm_epsg(GeoPoint::new(-6.2, 106.8)), 32748);
        // Equator counts as northern
        assert_eq!(utm_epsg(GeoPoint::new(0.0, 101.666)), 32647);
    }

    #[test]
    fn test_empty_ring_measures_zero() {
        assert_eq!(projected_area_sqm(&Ring::new(vec![])).unwrap(), 0.0);
    }

    #[test]
    fn test_degenerate_ring_is_an_error_not_zero() {
        let two = Ring::new(vec![GeoPoint::new(3.139, 101.666), GeoPoint::new(3.140, 101.666)]);
        match projected_area_sqm(&two) {
            Err(SunroofError::DegenerateGeometry { vertices: 2 }) => {}
            other => panic!("expected DegenerateGeometry error, got {:?}", other),
        }
    }

    #[test]
    fn test_square_area_near_kuala_lumpur() {
        let ring = square_ring(3.139, 101.666, 10.0);
        let area = projected_area_sqm(&ring).unwrap();
        // 10m x 10m square; UTM scale distortion at this scale stays within 1%
        assert!((area - 100.0).abs() < 1.0, "area {} should be ~100 m^2", area);
    }

    #[test]
    fn test_open_and_closed_rings_measure_the_same() {
        let open = square_ring(3.139, 101.666, 10.0);
        let mut closed_vertices = open.vertices().to_vec();
        closed_vertices.push(closed_vertices[0]);
        let closed = Ring::new(closed_vertices);

        let a = projected_area_sqm(&open).unwrap();
        let b = projected_area_sqm(&closed).unwrap();
        assert!((a - b).abs() < 1e-9);
    }

    #[test]
    fn test_zone_choice_does_not_alter_area() {
        // The same footprint shifted by a whole zone width (6 degrees) sits at
        // the same offset from its zone's central meridian, so both zones must
        // report the same area
        let zone47 = square_ring(3.139, 101.666, 10.0);
        let zone48 = square_ring(3.139, 101.666 + 6.0, 10.0);

        let a = projected_area_sqm(&zone47).unwrap();
        let b = projected_area_sqm(&zone48).unwrap();
        assert!(
            ((a - b) / a).abs() < 1e-6,
            "zone 47 area {} and zone 48 area {} should match",
            a,
            b
        );
    }

    #[test]
    fn test_southern_hemisphere_square() {
        let ring = square_ring(-6.2, 106.8, 10.0);
        let area = projected_area_sqm(&ring).unwrap();
        assert!((area - 100.0).abs() < 1.0, "area {} should be ~100 m^2", area);
    }
}
