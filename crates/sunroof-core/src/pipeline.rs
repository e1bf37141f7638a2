//! Query pipeline: match first, enrich once
//!
//! Selection ranks every candidate using only cheap local geometry. The two
//! expensive, provider-bound computations (projected area, climate lookup)
//! run exactly once, on the final winner.

use std::sync::Arc;

use crate::config::PipelineConfig;
use crate::error::{Result, SunroofError};
use crate::geometry::area::projected_area_sqm;
use crate::geometry::selector::select_nearest;
use crate::models::{BuildingMatch, GeoPoint};
use crate::ports::{ClimateProvider, FeatureProvider};
use crate::solar::estimate_annual_yield;

pub struct Pipeline {
    features: Arc<dyn FeatureProvider>,
    climate: Arc<dyn ClimateProvider>,
    config: PipelineConfig,
}

impl Pipeline {
    pub fn new(
        features: Arc<dyn FeatureProvider>,
        climate: Arc<dyn ClimateProvider>,
        config: PipelineConfig,
    ) -> Self {
        Self {
            features,
            climate,
            config,
        }
    }

    /// Locate the building footprint nearest to `point` and enrich it with
    /// its projected ground area and estimated annual solar yield.
    ///
    /// Returns `Ok(None)` when no valid footprint exists within the search
    /// radius or the feature provider is unreachable. A failed climate lookup
    /// leaves `solar_potential` unset rather than failing the query.
    pub async fn locate(&self, point: GeoPoint) -> Result<Option<BuildingMatch>> {
        point.validate()?;

        let elements = match self
            .features
            .footprints_near(point, self.config.search_radius_m)
            .await
        {
            Ok(elements) => elements,
            Err(e) if e.is_provider_failure() => {
                tracing::warn!(error = %e, "feature provider failed, reporting no match");
                return Ok(None);
            }
            Err(e) => return Err(e),
        };

        tracing::debug!(
            candidates = elements.len(),
            radius_m = self.config.search_radius_m,
            "ranking footprint candidates"
        );

        let winner = match select_nearest(point, elements) {
            Some(candidate) => candidate,
            None => return Ok(None),
        };

        tracing::info!(
            id = winner.id,
            distance_m = winner.distance_meters,
            "selected nearest footprint"
        );

        // Enrichment of the final winner only. A projection failure must
        // surface, never degrade to a zero area.
        let area = projected_area_sqm(&winner.ring)?;

        let solar_potential = match self.climate.daily_irradiance(winner.centroid).await {
            Ok(series) => match estimate_annual_yield(&series, area) {
                Ok(value) => Some(value),
                Err(SunroofError::NoData) => {
                    tracing::warn!(id = winner.id, "climatology had no usable observations");
                    None
                }
                Err(e) => return Err(e),
            },
            Err(e) if e.is_provider_failure() => {
                tracing::warn!(error = %e, "climate provider failed, yield unavailable");
                None
            }
            Err(e) => return Err(e),
        };

        Ok(Some(BuildingMatch::from_candidate(winner, area, solar_potential)))
    }
}
