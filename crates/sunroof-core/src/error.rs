//! Error types for Sunroof

use thiserror::Error;

#[derive(Debug, Error)]
pub enum SunroofError {
    // Input errors
    #[error("Coordinate out of range: latitude {lat}, longitude {lon}")]
    InvalidCoordinate { lat: f64, lon: f64 },

    // Geometry errors
    #[error("Degenerate geometry: {vertices} vertices, a polygon needs at least 3")]
    DegenerateGeometry { vertices: usize },

    #[error("Projection failed: {reason}")]
    Projection { reason: String },

    // Provider boundary errors
    #[error("{provider} unavailable: {reason}")]
    ProviderUnavailable {
        provider: &'static str,
        reason: String,
    },

    #[error("Malformed response from {provider}: {reason}")]
    MalformedResponse {
        provider: &'static str,
        reason: String,
    },

    // Climatology errors
    #[error("No usable irradiance observations in the climatology window")]
    NoData,
}

impl SunroofError {
    /// Failures at a provider boundary are absorbed into an explicit
    /// "missing" value instead of failing the whole query.
    pub fn is_provider_failure(&self) -> bool {
        matches!(
            self,
            SunroofError::ProviderUnavailable { .. } | SunroofError::MalformedResponse { .. }
        )
    }
}

pub type Result<T> = std::result::Result<T, SunroofError>;
