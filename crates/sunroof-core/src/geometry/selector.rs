//! Nearest-footprint selection
//!
//! Selection is a pure, synchronous pass over the provider-supplied elements.
//! No I/O happens here; enrichment of the winner is the pipeline's concern.

use crate::models::{BuildingCandidate, FootprintElement, GeoPoint};

use super::{geodesic_distance_m, vertex_mean_centroid};

/// Pick the footprint whose centroid is geodesically closest to `query`.
///
/// Elements with fewer than 3 vertices are discarded. Iteration follows the
/// provider-supplied order and a candidate replaces the running best only on
/// strict improvement, so ties keep the earliest-seen candidate. Returns
/// `None` when nothing valid remains.
pub fn select_nearest(
    query: GeoPoint,
    elements: Vec<FootprintElement>,
) -> Option<BuildingCandidate> {
    let mut best: Option<BuildingCandidate> = None;

    for element in elements {
        if element.ring.is_degenerate() {
            tracing::debug!(id = element.id, vertices = element.ring.len(), "skipping degenerate footprint");
            continue;
        }
        let centroid = match vertex_mean_centroid(&element.ring) {
            Some(c) => c,
            None => continue,
        };
        let distance = geodesic_distance_m(query, centroid);

        let improved = best
            .as_ref()
            .map_or(true, |current| distance < current.distance_meters);
        if improved {
            best = Some(BuildingCandidate {
                id: element.id,
                tags: element.tags,
                ring: element.ring,
                centroid,
                distance_meters: distance,
            });
        }
    }

    best
}
