use crate::infra::AppState;
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::Extension;
use axum::Json;
use recruit_ai::session::{session_router, Authenticator, SessionContext, ThemeContext};
use recruit_ai::workflows::screening::{
    screening_router, CandidateStore, JobStore, ResumeIngestion, ScreeningService,
};
use serde_json::json;
use std::sync::Arc;

pub(crate) fn with_screening_routes<C, J, I, A>(
    service: Arc<ScreeningService<C, J, I>>,
    session: Arc<SessionContext<A>>,
    theme: Arc<ThemeContext>,
) -> axum::Router
where
    C: CandidateStore + 'static,
    J: JobStore + 'static,
    I: ResumeIngestion + 'static,
    A: Authenticator + 'static,
{
    screening_router(service, session.clone())
        .merge(session_router(session, theme))
        .route("/health", axum::routing::get(healthcheck))
        .route("/ready", axum::routing::get(readiness_endpoint))
        .route("/metrics", axum::routing::get(metrics_endpoint))
}

pub(crate) async fn healthcheck() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
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

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infra::{
        InMemoryAuthenticator, InMemoryCandidateStore, InMemoryJobStore, InMemoryResumeIngestion,
    };
    use axum::body::Body;
    use axum::http::Request;
    use metrics_exporter_prometheus::PrometheusBuilder;
    use recruit_ai::workflows::screening::ShortlistThreshold;
    use serde_json::Value;
    use std::sync::atomic::AtomicBool;
    use tower::ServiceExt;

    fn app(ready: bool) -> axum::Router {
        let candidates = InMemoryCandidateStore::default();
        let service = Arc::new(ScreeningService::new(
            Arc::new(candidates.clone()),
            Arc::new(InMemoryJobStore::default()),
            Arc::new(InMemoryResumeIngestion::new(candidates)),
            ShortlistThreshold::default(),
        ));
        let session = Arc::new(SessionContext::new(Arc::new(
            InMemoryAuthenticator::default(),
        )));
        let state = AppState {
            readiness: Arc::new(AtomicBool::new(ready)),
            metrics: Arc::new(PrometheusBuilder::new().build_recorder().handle()),
        };
        with_screening_routes(service, session, Arc::new(ThemeContext::default()))
            .layer(Extension(state))
    }

    async fn json_body(response: axum::response::Response) -> Value {
        let bytes = axum::body::to_bytes(response.into_body(), 64 * 1024)
            .await
            .expect("read body");
        serde_json::from_slice(&bytes).expect("json payload")
    }

    fn post(uri: &str, payload: Value) -> Request<Body> {
        Request::post(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(payload.to_string()))
            .unwrap()
    }

    #[tokio::test]
    async fn readiness_reflects_startup_flag() {
        let response = app(false)
            .oneshot(Request::get("/ready").body(Body::empty()).unwrap())
            .await
            .expect("route executes");
        assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);

        let response = app(true)
            .oneshot(Request::get("/health").body(Body::empty()).unwrap())
            .await
            .expect("route executes");
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn screening_routes_open_after_sign_up() {
        let router = app(true);

        let locked = router
            .clone()
            .oneshot(Request::get("/api/v1/analytics").body(Body::empty()).unwrap())
            .await
            .expect("route executes");
        assert_eq!(locked.status(), StatusCode::UNAUTHORIZED);

        let registered = router
            .clone()
            .oneshot(post(
                "/api/v1/session/sign-up",
                json!({
                    "name": "Morgan",
                    "email": "morgan@acme.test",
                    "password": "screening",
                    "company": "Acme"
                }),
            ))
            .await
            .expect("route executes");
        assert_eq!(registered.status(), StatusCode::CREATED);

        let job = router
            .clone()
            .oneshot(post(
                "/api/v1/jobs",
                json!({ "title": "SRE", "company": "Acme", "description": "Keep it running" }),
            ))
            .await
            .expect("route executes");
        assert_eq!(job.status(), StatusCode::CREATED);
        let job_id = json_body(job).await["_id"]
            .as_str()
            .map(str::to_string)
            .expect("job id");

        let upload = router
            .clone()
            .oneshot(post(
                &format!("/api/v1/jobs/{job_id}/resumes"),
                json!({ "documents": [
                    { "file_name": "ada.pdf", "content_type": "application/pdf" },
                    { "file_name": "grace.txt", "content_type": "text/plain" }
                ] }),
            ))
            .await
            .expect("route executes");
        assert_eq!(upload.status(), StatusCode::CREATED);

        let analytics = router
            .oneshot(Request::get("/api/v1/analytics").body(Body::empty()).unwrap())
            .await
            .expect("route executes");
        assert_eq!(analytics.status(), StatusCode::OK);
        let payload = json_body(analytics).await;
        assert_eq!(payload["summary"]["total"], json!(2));
        assert_eq!(payload["jobs"][0]["label"], json!("SRE - Acme"));
    }
}
