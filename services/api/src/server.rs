use crate::cli::ServeArgs;
use crate::infra::{
    AppState, InMemoryKycRepository, InMemoryListingRepository, InMemoryNotificationPublisher,
};
use crate::routes::with_marketplace_routes;
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use std::sync::atomic::Ordering;
use std::sync::Arc;

use homestead::config::AppConfig;
use homestead::error::AppError;
use homestead::telemetry;
use homestead::workflows::kyc::KycService;
use homestead::workflows::listings::ListingService;
use tracing::info;

pub(crate) async fn run(mut args: ServeArgs) -> Result<(), AppError> {
    let mut config = AppConfig::load()?;

    if let Some(host) = args.host.take() {
        config.server.host = host;
    }
    if let Some(port) = args.port.take() {
        config.server.port = port;
    }

    telemetry::init(&config.telemetry)?;

    let (prometheus_layer, prometheus_handle) = PrometheusMetricLayer::pair();
    let readiness_flag = Arc::new(std::sync::atomic::AtomicBool::new(false));
    let app_state = AppState {
        readiness: readiness_flag.clone(),
        metrics: Arc::new(prometheus_handle),
    };

    let notifier = Arc::new(InMemoryNotificationPublisher::default());
    let listing_service = Arc::new(ListingService::new(
        Arc::new(InMemoryListingRepository::default()),
        notifier.clone(),
        config.moderation.clone(),
    ));
    let kyc_service = Arc::new(KycService::new(
        Arc::new(InMemoryKycRepository::default()),
        notifier,
        config.moderation.clone(),
    ));

    let app = with_marketplace_routes(listing_service, kyc_service)
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(?config.environment, %addr, "marketplace service ready");

    axum::serve(listener, app).await?;
    Ok(())
}
