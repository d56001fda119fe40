use crate::cli::ServeArgs;
use crate::infra::{
    load_jobs, load_results, AppState, InMemoryAuthenticator, InMemoryCandidateStore,
    InMemoryJobStore, InMemoryResumeIngestion,
};
use crate::routes::with_screening_routes;
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use recruit_ai::config::AppConfig;
use recruit_ai::error::AppError;
use recruit_ai::session::{SessionContext, ThemeContext};
use recruit_ai::telemetry;
use recruit_ai::workflows::screening::ScreeningService;
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
    if let Some(threshold) = args.threshold.take() {
        config.shortlist.default_threshold = threshold;
    }

    telemetry::init(&config.telemetry, config.environment)?;

    let (prometheus_layer, prometheus_handle) = PrometheusMetricLayer::pair();
    let readiness_flag = Arc::new(std::sync::atomic::AtomicBool::new(false));
    let app_state = AppState {
        readiness: readiness_flag.clone(),
        metrics: Arc::new(prometheus_handle),
    };

    let candidates = match args.seed_results.take() {
        Some(path) => InMemoryCandidateStore::seeded(load_results(&path)?),
        None => InMemoryCandidateStore::default(),
    };
    let jobs = match args.seed_jobs.take() {
        Some(path) => InMemoryJobStore::seeded(load_jobs(&path)?),
        None => InMemoryJobStore::default(),
    };
    let ingestion = InMemoryResumeIngestion::new(candidates.clone());
    let screening_service = Arc::new(ScreeningService::new(
        Arc::new(candidates),
        Arc::new(jobs),
        Arc::new(ingestion),
        config.shortlist.default_threshold,
    ));
    let session = Arc::new(SessionContext::new(Arc::new(
        InMemoryAuthenticator::default(),
    )));
    let theme = Arc::new(ThemeContext::default());

    let app = with_screening_routes(screening_service, session, theme)
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(
        ?config.environment,
        %addr,
        threshold = config.shortlist.default_threshold.value(),
        "recruit screening service ready"
    );

    axum::serve(listener, app).await?;
    Ok(())
}
