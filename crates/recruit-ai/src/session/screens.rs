use serde::Serialize;

use super::auth::SessionUser;

/// Recruiter-facing screens and whether a session is needed to reach them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Screen {
    Dashboard,
    SignUp,
    Login,
    Home,
    JobDescription,
    ResumeUpload,
    Results,
    Shortlisted,
    Analytics,
}

impl Screen {
    pub const fn ordered() -> [Self; 9] {
        [
            Self::Dashboard,
            Self::SignUp,
            Self::Login,
            Self::Home,
            Self::JobDescription,
            Self::ResumeUpload,
            Self::Results,
            Self::Shortlisted,
            Self::Analytics,
        ]
    }

    pub const fn path(self) -> &'static str {
        match self {
            Self::Dashboard => "/dashboard",
            Self::SignUp => "/signup",
            Self::Login => "/login",
            Self::Home => "/home",
            Self::JobDescription => "/jd",
            Self::ResumeUpload => "/upload",
            Self::Results => "/results",
            Self::Shortlisted => "/shortlisted",
            Self::Analytics => "/analytics",
        }
    }

    pub const fn requires_session(self) -> bool {
        !matches!(self, Self::Dashboard | Self::SignUp | Self::Login)
    }

    pub fn is_reachable(self, session: Option<&SessionUser>) -> bool {
        !self.requires_session() || session.is_some()
    }

    /// Screens reachable for the given session, in navigation order.
    pub fn reachable(session: Option<&SessionUser>) -> Vec<Self> {
        Self::ordered()
            .into_iter()
            .filter(|screen| screen.is_reachable(session))
            .collect()
    }
}
