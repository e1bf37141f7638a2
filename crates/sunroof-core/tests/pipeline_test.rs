//! End-to-end pipeline tests with fixture providers

use std::collections::BTreeMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use async_trait::async_trait;

use sunroof_core::config::PipelineConfig;
use sunroof_core::error::{Result, SunroofError};
use sunroof_core::models::{FootprintElement, GeoPoint, IrradianceSeries, Ring};
use sunroof_core::ports::{ClimateProvider, FeatureProvider};
use sunroof_core::Pipeline;

struct FixedFeatures(Vec<FootprintElement>);

#[async_trait]
impl FeatureProvider for FixedFeatures {
    async fn footprints_near(&self, _: GeoPoint, _: f64) -> Result<Vec<FootprintElement>> {
        Ok(self.0.clone())
    }
}

struct FailingFeatures;

#[async_trait]
impl FeatureProvider for FailingFeatures {
    async fn footprints_near(&self, _: GeoPoint, _: f64) -> Result<Vec<FootprintElement>> {
        Err(SunroofError::ProviderUnavailable {
            provider: "Overpass API",
            reason: "connection refused".to_string(),
        })
    }
}

struct FixedClimate(IrradianceSeries);

#[async_trait]
impl ClimateProvider for FixedClimate {
    async fn daily_irradiance(&self, _: GeoPoint) -> Result<IrradianceSeries> {
        Ok(self.0.clone())
    }
}

struct FailingClimate;

#[async_trait]
impl ClimateProvider for FailingClimate {
    async fn daily_irradiance(&self, _: GeoPoint) -> Result<IrradianceSeries> {
        Err(SunroofError::ProviderUnavailable {
            provider: "NASA POWER",
            reason: "timeout".to_string(),
        })
    }
}

/// Climate fixture that counts how often the pipeline calls it
struct CountingClimate {
    series: IrradianceSeries,
    calls: Arc<AtomicUsize>,
}

#[async_trait]
impl ClimateProvider for CountingClimate {
    async fn daily_irradiance(&self, _: GeoPoint) -> Result<IrradianceSeries> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(self.series.clone())
    }
}

fn series(entries: &[(&str, Option<f64>)]) -> IrradianceSeries {
    entries.iter().map(|(k, v)| (k.to_string(), *v)).collect()
}

/// Series whose valid entries average exactly 5.0 kWh/m^2/day
fn series_averaging_five() -> IrradianceSeries {
    series(&[
        ("20190101", Some(4.0)),
        ("20190102", Some(6.0)),
        ("20190103", None),
        ("20190104", Some(5.0)),
    ])
}

/// Approximate square footprint of `side_m` meters centered at (lat, lon)
fn square_footprint(id: i64, lat: f64, lon: f64, side_m: f64) -> FootprintElement {
    let dlat = side_m / 2.0 / 110_577.6;
    let dlon = side_m / 2.0 / (111_320.0 * lat.to_radians().cos());
    FootprintElement {
        id,
        tags: BTreeMap::from([("building".to_string(), "yes".to_string())]),
        ring: Ring::new(vec![
            GeoPoint::new(lat - dlat, lon - dlon),
            GeoPoint::new(lat - dlat, lon + dlon),
            GeoPoint::new(lat + dlat, lon + dlon),
            GeoPoint::new(lat + dlat, lon - dlon),
        ]),
    }
}

fn pipeline(
    features: impl FeatureProvider + 'static,
    climate: impl ClimateProvider + 'static,
) -> Pipeline {
    Pipeline::new(Arc::new(features), Arc::new(climate), PipelineConfig::default())
}

#[tokio::test]
async fn test_kuala_lumpur_reference_scenario() {
    let query = GeoPoint::new(3.139, 101.666);
    // 100 m^2 square whose centroid sits 12m due north of the query point
    let centroid_lat = 3.139 + 12.0 / 110_577.6;
    let footprint = square_footprint(400_123, centroid_lat, 101.666, 10.0);

    let pipeline = pipeline(
        FixedFeatures(vec![footprint]),
        FixedClimate(series_averaging_five()),
    );

    let result = pipeline.locate(query).await.unwrap().expect("a match");

    assert_eq!(result.id, 400_123);
    assert_eq!(result.element_type, "way");
    assert!(
        (result.distance_meters - 12.0).abs() < 0.05,
        "distance was {}",
        result.distance_meters
    );
    assert!((result.area - 100.0).abs() < 1.0, "area was {}", result.area);

    // 5.0 * 365 * area * 0.21 * 0.85 / 1000, which is ~32.57625 at 100 m^2
    let solar = result.solar_potential.expect("yield available");
    let expected = 5.0 * 365.0 * result.area * 0.21 * 0.85 / 1000.0;
    assert!((solar - expected).abs() < 1e-9, "yield was {}", solar);
    assert!((solar - 32.57625).abs() < 0.5, "yield was {}", solar);
}

#[tokio::test]
async fn test_empty_candidate_list_is_not_found() {
    let pipeline = pipeline(FixedFeatures(vec![]), FixedClimate(series_averaging_five()));
    let result = pipeline.locate(GeoPoint::new(3.139, 101.666)).await.unwrap();
    assert!(result.is_none());
}

#[tokio::test]
async fn test_unreachable_feature_provider_is_not_found() {
    let pipeline = pipeline(FailingFeatures, FixedClimate(series_averaging_five()));
    let result = pipeline.locate(GeoPoint::new(3.139, 101.666)).await.unwrap();
    assert!(result.is_none());
}

#[tokio::test]
async fn test_unreachable_climate_provider_leaves_yield_unset() {
    let footprint = square_footprint(7, 3.1391, 101.666, 10.0);
    let pipeline = pipeline(FixedFeatures(vec![footprint]), FailingClimate);

    let result = pipeline
        .locate(GeoPoint::new(3.139, 101.666))
        .await
        .unwrap()
        .expect("a match");

    assert!(result.solar_potential.is_none());
    assert!(result.area > 0.0);
}

#[tokio::test]
async fn test_all_null_series_leaves_yield_unset() {
    let footprint = square_footprint(7, 3.1391, 101.666, 10.0);
    let all_null = series(&[("20190101", None), ("20190102", None)]);
    let pipeline = pipeline(FixedFeatures(vec![footprint]), FixedClimate(all_null));

    let result = pipeline
        .locate(GeoPoint::new(3.139, 101.666))
        .await
        .unwrap()
        .expect("a match");

    assert!(result.solar_potential.is_none());
}

#[tokio::test]
async fn test_out_of_range_coordinates_rejected() {
    let pipeline = pipeline(FixedFeatures(vec![]), FixedClimate(series_averaging_five()));
    let result = pipeline.locate(GeoPoint::new(91.0, 0.0)).await;
    assert!(matches!(result, Err(SunroofError::InvalidCoordinate { .. })));
}

#[tokio::test]
async fn test_enrichment_runs_once_for_the_final_winner() {
    let calls = Arc::new(AtomicUsize::new(0));
    // Several improving candidates; enrichment must still happen exactly once
    let footprints = vec![
        square_footprint(1, 3.145, 101.666, 10.0),
        square_footprint(2, 3.142, 101.666, 10.0),
        square_footprint(3, 3.1391, 101.666, 10.0),
    ];
    let climate = CountingClimate {
        series: series_averaging_five(),
        calls: calls.clone(),
    };
    let pipeline = pipeline(FixedFeatures(footprints), climate);

    let result = pipeline
        .locate(GeoPoint::new(3.139, 101.666))
        .await
        .unwrap()
        .expect("a match");

    assert_eq!(result.id, 3);
    assert_eq!(calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn test_degenerate_footprints_are_skipped() {
    let degenerate = FootprintElement {
        id: 1,
        tags: BTreeMap::new(),
        ring: Ring::new(vec![GeoPoint::new(3.139, 101.666)]),
    };
    let valid = square_footprint(2, 3.141, 101.666, 10.0);
    let pipeline = pipeline(
        FixedFeatures(vec![degenerate, valid]),
        FixedClimate(series_averaging_five()),
    );

    let result = pipeline
        .locate(GeoPoint::new(3.139, 101.666))
        .await
        .unwrap()
        .expect("a match");
    assert_eq!(result.id, 2);
}
