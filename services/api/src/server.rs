use crate::cli::ServeArgs;
use crate::infra::{AppState, ConfiguredStore};
use crate::routes::with_call_routes;
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use call_review::calls::CallReviewService;
use call_review::config::AppConfig;
use call_review::error::AppError;
use call_review::evaluation::RubricEvaluator;
use call_review::telemetry;
use std::sync::atomic::Ordering;
use std::sync::Arc;
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

    let store = ConfiguredStore::open(&config.storage)?;
    let storage = store.describe();
    let review_service = Arc::new(CallReviewService::new(
        Arc::new(store),
        RubricEvaluator::default(),
    ));

    let app = with_call_routes(review_service)
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(?config.environment, %addr, %storage, "call review service ready");

    axum::serve(listener, app).await?;
    Ok(())
}
