use std::sync::Arc;

use axum::http::{header, HeaderValue, Method};
use sunroof_core::providers::{OverpassProvider, PowerProvider};
use sunroof_core::Pipeline;
use tower_http::cors::CorsLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use sunroof_api::config::ApiConfig;
use sunroof_api::router::create_router;
use sunroof_api::state::AppState;

#[tokio::main]
async fn main() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "sunroof_api=info,sunroof_core=info,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = ApiConfig::from_env();

    tracing::info!(
        port = config.port,
        overpass_url = %config.pipeline.overpass_url,
        power_url = %config.pipeline.power_url,
        radius_m = config.pipeline.search_radius_m,
        "Starting Sunroof API server"
    );

    let features = Arc::new(OverpassProvider::new(
        config.pipeline.overpass_url.clone(),
        config.pipeline.request_timeout,
    ));
    let climate = Arc::new(PowerProvider::new(
        config.pipeline.power_url.clone(),
        config.pipeline.request_timeout,
    ));

    let pipeline = Arc::new(Pipeline::new(features, climate, config.pipeline.clone()));
    let state = Arc::new(AppState::new(pipeline));

    let cors = CorsLayer::new()
        .allow_origin(config.cors_origin.parse::<HeaderValue>().unwrap())
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE]);

    let app = create_router(state).layer(cors);

    let addr = config.bind_address();
    let listener = tokio::net::TcpListener::bind(&addr).await.unwrap();

    tracing::info!("Listening on {}", addr);
    tracing::info!("CORS enabled for {}", config.cors_origin);

    axum::serve(listener, app).await.unwrap();
}
