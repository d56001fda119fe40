//! Session and display state shared by recruiter-facing surfaces.
//!
//! Both live in injected context objects with explicit subscribe/unsubscribe so the screening
//! core never reaches for global state.

mod auth;
mod context;
mod router;
mod screens;

pub use auth::{Authenticator, Credentials, Registration, SessionError, SessionUser};
pub use context::{Observable, SessionContext, SubscriptionId, ThemeContext, ThemeMode};
pub use router::session_router;
pub use screens::Screen;
