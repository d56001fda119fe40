use super::domain::{CandidateRecord, JobId, JobRecord, NewJob, ResumeDocument};

/// Scored candidate results held by the screening backend.
pub trait CandidateStore: Send + Sync {
    fn fetch_all(&self) -> Result<Vec<CandidateRecord>, StoreError>;
    fn clear_all(&self) -> Result<(), StoreError>;
    /// Dispatch invitations to backend-shortlisted candidates; returns the backend's status line.
    fn send_notifications(&self) -> Result<String, StoreError>;
}

/// Job postings created from manual input or imported files.
pub trait JobStore: Send + Sync {
    fn fetch_all(&self) -> Result<Vec<JobRecord>, StoreError>;
    fn create(&self, job: NewJob) -> Result<JobRecord, StoreError>;
    fn delete(&self, id: &JobId) -> Result<(), StoreError>;
    fn delete_all(&self) -> Result<(), StoreError>;
}

/// Parses and scores uploaded resumes against a job, persisting the results server-side.
pub trait ResumeIngestion: Send + Sync {
    fn ingest(
        &self,
        job_id: &JobId,
        documents: Vec<ResumeDocument>,
    ) -> Result<Vec<CandidateRecord>, StoreError>;
}

/// Error enumeration for collaborator failures.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("record not found")]
    NotFound,
    #[error("request rejected: {0}")]
    Rejected(String),
    #[error("backend unavailable: {0}")]
    Unavailable(String),
}
