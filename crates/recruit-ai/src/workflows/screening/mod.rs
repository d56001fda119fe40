//! Candidate screening: score normalization, threshold shortlisting and hiring analytics.
//!
//! Scores, shortlist flags and invitations come from an external scoring backend reached through
//! the traits in [`repository`]. Everything under [`scoring`], [`analytics`] and [`projections`]
//! is pure and total over whatever the backend returns.

pub mod analytics;
pub mod domain;
pub mod projections;
pub mod repository;
pub mod router;
pub mod scoring;
pub mod service;

#[cfg(test)]
mod tests;

pub use analytics::{aggregate, AnalyticsReport, AnalyticsSummary, JobBreakdownEntry, ScoreBucket};
pub use domain::{
    CandidateRecord, JobFilter, JobId, JobRecord, JobsPayload, NewJob, RawScore, ResultsPayload,
    ResumeDocument, UNKNOWN_JOB_LABEL,
};
pub use projections::{InviteCard, ResultsView, ShortlistView};
pub use repository::{CandidateStore, JobStore, ResumeIngestion, StoreError};
pub use router::screening_router;
pub use scoring::{is_shortlisted, normalize, ShortlistThreshold, DEFAULT_SHORTLIST_THRESHOLD};
pub use service::{ScreeningService, ScreeningServiceError};
