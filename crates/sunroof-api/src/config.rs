use std::env;

use sunroof_core::config::PipelineConfig;

/// API server configuration loaded from environment variables
#[derive(Debug, Clone)]
pub struct ApiConfig {
    pub port: u16,
    pub cors_origin: String,
    pub pipeline: PipelineConfig,
}

impl ApiConfig {
    /// Load configuration from environment variables
    pub fn from_env() -> Self {
        let port = env::var("SUNROOF_PORT").ok().and_then(|p| p.parse().ok()).unwrap_or(5000);

        let cors_origin =
            env::var("SUNROOF_CORS_ORIGIN").unwrap_or_else(|_| "http://localhost:3000".to_string());

        Self {
            port,
            cors_origin,
            pipeline: PipelineConfig::from_env(),
        }
    }

    /// Get the server bind address
    pub fn bind_address(&self) -> String {
        format!("0.0.0.0:{}", self.port)
    }
}
