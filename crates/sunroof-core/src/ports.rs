//! Port trait definitions
//!
//! These traits define the interfaces the two external data providers must
//! implement. The pipeline only ever talks to providers through these ports,
//! so tests can substitute deterministic fixtures.

use async_trait::async_trait;

use crate::error::Result;
use crate::models::{FootprintElement, GeoPoint, IrradianceSeries};

/// Port for querying building footprints around a point
#[async_trait]
pub trait FeatureProvider: Send + Sync {
    /// Return footprint elements within `radius_m` meters of `point`
    async fn footprints_near(
        &self,
        point: GeoPoint,
        radius_m: f64,
    ) -> Result<Vec<FootprintElement>>;
}

/// Port for querying a daily irradiance climatology at a point
#[async_trait]
pub trait ClimateProvider: Send + Sync {
    /// Return the daily irradiance series for the fixed climatology window
    async fn daily_irradiance(&self, point: GeoPoint) -> Result<IrradianceSeries>;
}
