use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Router,
};
use serde::Deserialize;
use serde_json::json;

use super::auth::{Authenticator, Credentials, Registration, SessionError};
use super::context::{SessionContext, ThemeContext, ThemeMode};
use super::screens::Screen;

/// Routes for sign-in state and the display theme.
pub fn session_router<A>(session: Arc<SessionContext<A>>, theme: Arc<ThemeContext>) -> Router
where
    A: Authenticator + 'static,
{
    let auth = Router::new()
        .route("/api/v1/session", get(current_session_handler::<A>))
        .route("/api/v1/session/sign-in", post(sign_in_handler::<A>))
        .route("/api/v1/session/sign-up", post(sign_up_handler::<A>))
        .route("/api/v1/session/sign-out", post(sign_out_handler::<A>))
        .with_state(session);

    let display = Router::new()
        .route("/api/v1/theme", get(theme_handler).post(update_theme_handler))
        .with_state(theme);

    auth.merge(display)
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct ThemeUpdate {
    #[serde(default)]
    mode: Option<ThemeMode>,
}

pub(crate) async fn current_session_handler<A>(
    State(session): State<Arc<SessionContext<A>>>,
) -> Response
where
    A: Authenticator + 'static,
{
    let user = session.current_user();
    let screens: Vec<&'static str> = Screen::reachable(user.as_ref())
        .into_iter()
        .map(Screen::path)
        .collect();
    let payload = json!({
        "user": user,
        "screens": screens,
    });
    (StatusCode::OK, axum::Json(payload)).into_response()
}

pub(crate) async fn sign_in_handler<A>(
    State(session): State<Arc<SessionContext<A>>>,
    axum::Json(credentials): axum::Json<Credentials>,
) -> Response
where
    A: Authenticator + 'static,
{
    match session.sign_in(&credentials) {
        Ok(user) => (StatusCode::OK, axum::Json(user)).into_response(),
        Err(error) => session_failure(error),
    }
}

pub(crate) async fn sign_up_handler<A>(
    State(session): State<Arc<SessionContext<A>>>,
    axum::Json(registration): axum::Json<Registration>,
) -> Response
where
    A: Authenticator + 'static,
{
    match session.sign_up(&registration) {
        Ok(user) => (StatusCode::CREATED, axum::Json(user)).into_response(),
        Err(error) => session_failure(error),
    }
}

pub(crate) async fn sign_out_handler<A>(State(session): State<Arc<SessionContext<A>>>) -> Response
where
    A: Authenticator + 'static,
{
    match session.sign_out() {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(error) => session_failure(error),
    }
}

pub(crate) async fn theme_handler(State(theme): State<Arc<ThemeContext>>) -> Response {
    let payload = json!({ "mode": theme.mode() });
    (StatusCode::OK, axum::Json(payload)).into_response()
}

/// Sets the requested mode, or toggles when none is given.
pub(crate) async fn update_theme_handler(
    State(theme): State<Arc<ThemeContext>>,
    axum::Json(update): axum::Json<ThemeUpdate>,
) -> Response {
    let mode = match update.mode {
        Some(mode) => {
            theme.set(mode);
            mode
        }
        None => theme.toggle(),
    };
    let payload = json!({ "mode": mode });
    (StatusCode::OK, axum::Json(payload)).into_response()
}

fn session_failure(error: SessionError) -> Response {
    let status = match error {
        SessionError::MissingFields | SessionError::WeakPassword | SessionError::InvalidEmail => {
            StatusCode::UNPROCESSABLE_ENTITY
        }
        SessionError::UnknownAccount
        | SessionError::WrongPassword
        | SessionError::NotSignedIn => StatusCode::UNAUTHORIZED,
        SessionError::EmailInUse => StatusCode::CONFLICT,
        SessionError::TooManyAttempts => StatusCode::TOO_MANY_REQUESTS,
        SessionError::Unavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
    };
    let payload = json!({
        "error": error.to_string(),
    });
    (status, axum::Json(payload)).into_response()
}
