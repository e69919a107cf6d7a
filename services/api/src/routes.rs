use crate::infra::AppState;
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::Extension;
use axum::Json;
use serde::Serialize;
use serde_json::json;
use std::sync::Arc;

use homestead::workflows::kyc::{kyc_router, KycRepository, KycService};
use homestead::workflows::listings::{listing_router, ListingRepository, ListingService};
use homestead::workflows::notify::NotificationPublisher;

/// Compose the marketplace routers with the operational endpoints.
pub(crate) fn with_marketplace_routes<LR, KR, N>(
    listings: Arc<ListingService<LR, N>>,
    kyc: Arc<KycService<KR, N>>,
) -> axum::Router
where
    LR: ListingRepository + 'static,
    KR: KycRepository + 'static,
    N: NotificationPublisher + 'static,
{
    listing_router(listings)
        .merge(kyc_router(kyc))
        .route("/health", axum::routing::get(healthcheck))
        .route("/ready", axum::routing::get(readiness_endpoint))
        .route("/info", axum::routing::get(info_endpoint))
        .route("/metrics", axum::routing::get(metrics_endpoint))
}

#[derive(Debug, Serialize)]
pub(crate) struct ServiceInfo {
    pub(crate) name: &'static str,
    pub(crate) version: &'static str,
}

pub(crate) async fn healthcheck() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

pub(crate) async fn info_endpoint() -> Json<ServiceInfo> {
    Json(ServiceInfo {
        name: env!("CARGO_PKG_NAME"),
        version: env!("CARGO_PKG_VERSION"),
    })
}

pub(crate) async fn readiness_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    let ready = state.readiness.load(std::sync::atomic::Ordering::Relaxed);
    let status = if ready {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    let payload = if ready {
        json!({ "status": "ready" })
    } else {
        json!({ "status": "initializing" })
    };

    (status, Json(payload))
}

pub(crate) async fn metrics_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        state.metrics.render(),
    )
}
