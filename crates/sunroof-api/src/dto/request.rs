use serde::Deserialize;

/// Locate request body
#[derive(Debug, Deserialize)]
pub struct LocateRequest {
    pub latitude: f64,
    pub longitude: f64,
}
