use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Signed-in recruiter as reported by the identity provider.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionUser {
    pub uid: String,
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
    pub signed_in_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Registration {
    pub name: String,
    pub email: String,
    pub password: String,
    pub company: String,
}

impl Registration {
    pub(crate) fn validate(&self) -> Result<(), SessionError> {
        let required = [&self.name, &self.email, &self.password, &self.company];
        if required.iter().any(|field| field.trim().is_empty()) {
            return Err(SessionError::MissingFields);
        }
        Ok(())
    }
}

/// Identity provider boundary; implementations own password handling.
pub trait Authenticator: Send + Sync {
    fn sign_in(&self, credentials: &Credentials) -> Result<SessionUser, SessionError>;
    fn sign_up(&self, registration: &Registration) -> Result<SessionUser, SessionError>;
    fn sign_out(&self, user: &SessionUser) -> Result<(), SessionError>;
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SessionError {
    #[error("please fill in all required fields")]
    MissingFields,
    #[error("no account found with this email")]
    UnknownAccount,
    #[error("incorrect password")]
    WrongPassword,
    #[error("this email is already registered")]
    EmailInUse,
    #[error("password is too weak, use at least 6 characters")]
    WeakPassword,
    #[error("invalid email address")]
    InvalidEmail,
    #[error("too many failed attempts, try again later")]
    TooManyAttempts,
    #[error("no signed-in session")]
    NotSignedIn,
    #[error("identity provider unavailable: {0}")]
    Unavailable(String),
}
