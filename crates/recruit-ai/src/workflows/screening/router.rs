use std::sync::Arc;

use axum::{
    extract::{Path, Query, Request, State},
    http::StatusCode,
    middleware::{self, Next},
    response::{IntoResponse, Response},
    routing::{delete, get, post},
    Router,
};
use serde::Deserialize;
use serde_json::json;
use tracing::warn;

use super::domain::{JobFilter, JobId, NewJob, ResumeDocument};
use super::repository::{CandidateStore, JobStore, ResumeIngestion, StoreError};
use super::scoring::ShortlistThreshold;
use super::service::{ScreeningService, ScreeningServiceError};
use crate::session::{Authenticator, SessionContext};

/// Router exposing the recruiter screening views.
///
/// Every route answers 401 until the session context has a signed-in user.
pub fn screening_router<C, J, I, A>(
    service: Arc<ScreeningService<C, J, I>>,
    session: Arc<SessionContext<A>>,
) -> Router
where
    C: CandidateStore + 'static,
    J: JobStore + 'static,
    I: ResumeIngestion + 'static,
    A: Authenticator + 'static,
{
    Router::new()
        .route(
            "/api/v1/results",
            get(results_handler::<C, J, I>).delete(clear_results_handler::<C, J, I>),
        )
        .route("/api/v1/shortlist", get(shortlist_handler::<C, J, I>))
        .route("/api/v1/invites", get(invites_handler::<C, J, I>))
        .route(
            "/api/v1/notifications",
            post(notifications_handler::<C, J, I>),
        )
        .route("/api/v1/analytics", get(analytics_handler::<C, J, I>))
        .route(
            "/api/v1/jobs",
            get(list_jobs_handler::<C, J, I>)
                .post(create_job_handler::<C, J, I>)
                .delete(delete_all_jobs_handler::<C, J, I>),
        )
        .route("/api/v1/jobs/import", post(import_jobs_handler::<C, J, I>))
        .route(
            "/api/v1/jobs/:job_id",
            delete(delete_job_handler::<C, J, I>),
        )
        .route(
            "/api/v1/jobs/:job_id/resumes",
            post(upload_resumes_handler::<C, J, I>),
        )
        .route_layer(middleware::from_fn_with_state(
            session,
            require_session::<A>,
        ))
        .with_state(service)
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct ThresholdQuery {
    threshold: Option<String>,
}

impl ThresholdQuery {
    fn threshold(&self) -> Option<ShortlistThreshold> {
        self.threshold.as_deref().map(ShortlistThreshold::parse)
    }
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct AnalyticsQuery {
    job_id: Option<String>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct JobUpload {
    pub(crate) file_name: String,
    pub(crate) content: String,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ResumeUpload {
    #[serde(default)]
    pub(crate) documents: Vec<ResumeDocument>,
}

pub(crate) async fn require_session<A>(
    State(session): State<Arc<SessionContext<A>>>,
    request: Request,
    next: Next,
) -> Response
where
    A: Authenticator + 'static,
{
    if session.is_signed_in() {
        next.run(request).await
    } else {
        let payload = json!({
            "error": "sign in to access screening results",
        });
        (StatusCode::UNAUTHORIZED, axum::Json(payload)).into_response()
    }
}

pub(crate) async fn results_handler<C, J, I>(
    State(service): State<Arc<ScreeningService<C, J, I>>>,
    Query(query): Query<ThresholdQuery>,
) -> Response
where
    C: CandidateStore + 'static,
    J: JobStore + 'static,
    I: ResumeIngestion + 'static,
{
    match service.results(query.threshold()) {
        Ok(view) => (StatusCode::OK, axum::Json(view)).into_response(),
        Err(error) => failure(error),
    }
}

pub(crate) async fn clear_results_handler<C, J, I>(
    State(service): State<Arc<ScreeningService<C, J, I>>>,
) -> Response
where
    C: CandidateStore + 'static,
    J: JobStore + 'static,
    I: ResumeIngestion + 'static,
{
    match service.clear_results() {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(error) => failure(error),
    }
}

pub(crate) async fn shortlist_handler<C, J, I>(
    State(service): State<Arc<ScreeningService<C, J, I>>>,
    Query(query): Query<ThresholdQuery>,
) -> Response
where
    C: CandidateStore + 'static,
    J: JobStore + 'static,
    I: ResumeIngestion + 'static,
{
    match service.shortlist(query.threshold()) {
        Ok(view) => (StatusCode::OK, axum::Json(view)).into_response(),
        Err(error) => failure(error),
    }
}

pub(crate) async fn invites_handler<C, J, I>(
    State(service): State<Arc<ScreeningService<C, J, I>>>,
) -> Response
where
    C: CandidateStore + 'static,
    J: JobStore + 'static,
    I: ResumeIngestion + 'static,
{
    match service.invites() {
        Ok(cards) => {
            let payload = json!({ "invites": cards });
            (StatusCode::OK, axum::Json(payload)).into_response()
        }
        Err(error) => failure(error),
    }
}

pub(crate) async fn notifications_handler<C, J, I>(
    State(service): State<Arc<ScreeningService<C, J, I>>>,
) -> Response
where
    C: CandidateStore + 'static,
    J: JobStore + 'static,
    I: ResumeIngestion + 'static,
{
    match service.send_notifications() {
        Ok(message) => {
            let payload = json!({ "message": message });
            (StatusCode::OK, axum::Json(payload)).into_response()
        }
        Err(error) => failure(error),
    }
}

pub(crate) async fn analytics_handler<C, J, I>(
    State(service): State<Arc<ScreeningService<C, J, I>>>,
    Query(query): Query<AnalyticsQuery>,
) -> Response
where
    C: CandidateStore + 'static,
    J: JobStore + 'static,
    I: ResumeIngestion + 'static,
{
    let filter = JobFilter::parse(query.job_id.as_deref());
    match service.analytics(&filter) {
        Ok(report) => (StatusCode::OK, axum::Json(report)).into_response(),
        Err(error) => failure(error),
    }
}

pub(crate) async fn list_jobs_handler<C, J, I>(
    State(service): State<Arc<ScreeningService<C, J, I>>>,
) -> Response
where
    C: CandidateStore + 'static,
    J: JobStore + 'static,
    I: ResumeIngestion + 'static,
{
    match service.jobs() {
        Ok(jobs) => {
            let payload = json!({ "jobs": jobs });
            (StatusCode::OK, axum::Json(payload)).into_response()
        }
        Err(error) => failure(error),
    }
}

pub(crate) async fn create_job_handler<C, J, I>(
    State(service): State<Arc<ScreeningService<C, J, I>>>,
    axum::Json(job): axum::Json<NewJob>,
) -> Response
where
    C: CandidateStore + 'static,
    J: JobStore + 'static,
    I: ResumeIngestion + 'static,
{
    match service.create_job(job) {
        Ok(created) => (StatusCode::CREATED, axum::Json(created)).into_response(),
        Err(error) => failure(error),
    }
}

pub(crate) async fn import_jobs_handler<C, J, I>(
    State(service): State<Arc<ScreeningService<C, J, I>>>,
    axum::Json(upload): axum::Json<JobUpload>,
) -> Response
where
    C: CandidateStore + 'static,
    J: JobStore + 'static,
    I: ResumeIngestion + 'static,
{
    match service.import_jobs(&upload.file_name, upload.content.as_bytes()) {
        Ok(jobs) => {
            let payload = json!({ "jobs": jobs });
            (StatusCode::CREATED, axum::Json(payload)).into_response()
        }
        Err(error) => failure(error),
    }
}

pub(crate) async fn delete_all_jobs_handler<C, J, I>(
    State(service): State<Arc<ScreeningService<C, J, I>>>,
) -> Response
where
    C: CandidateStore + 'static,
    J: JobStore + 'static,
    I: ResumeIngestion + 'static,
{
    match service.delete_all_jobs() {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(error) => failure(error),
    }
}

pub(crate) async fn delete_job_handler<C, J, I>(
    State(service): State<Arc<ScreeningService<C, J, I>>>,
    Path(job_id): Path<String>,
) -> Response
where
    C: CandidateStore + 'static,
    J: JobStore + 'static,
    I: ResumeIngestion + 'static,
{
    match service.delete_job(&JobId(job_id)) {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(error) => failure(error),
    }
}

pub(crate) async fn upload_resumes_handler<C, J, I>(
    State(service): State<Arc<ScreeningService<C, J, I>>>,
    Path(job_id): Path<String>,
    axum::Json(upload): axum::Json<ResumeUpload>,
) -> Response
where
    C: CandidateStore + 'static,
    J: JobStore + 'static,
    I: ResumeIngestion + 'static,
{
    match service.upload_resumes(&JobId(job_id), upload.documents) {
        Ok(candidates) => {
            let payload = json!({
                "processed": candidates.len(),
                "results": candidates,
            });
            (StatusCode::CREATED, axum::Json(payload)).into_response()
        }
        Err(error) => failure(error),
    }
}

fn failure(error: ScreeningServiceError) -> Response {
    let status = match (&error, error.store_error()) {
        (ScreeningServiceError::UnknownJob(_), _) | (_, Some(StoreError::NotFound)) => {
            StatusCode::NOT_FOUND
        }
        (_, Some(StoreError::Unavailable(_))) => StatusCode::SERVICE_UNAVAILABLE,
        (other, _) if other.is_validation() => StatusCode::UNPROCESSABLE_ENTITY,
        _ => StatusCode::INTERNAL_SERVER_ERROR,
    };
    if status.is_server_error() {
        warn!(error = %error, "screening request failed");
    }

    let payload = json!({
        "error": error.to_string(),
    });
    (status, axum::Json(payload)).into_response()
}
