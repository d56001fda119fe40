use std::sync::Arc;

use tracing::{info, warn};

use super::analytics::{report, AnalyticsReport};
use super::domain::{CandidateRecord, JobFilter, JobId, JobRecord, NewJob, ResumeDocument};
use super::projections::{
    invite_cards, results_view, shortlist_view, InviteCard, ResultsView, ShortlistView,
};
use super::repository::{CandidateStore, JobStore, ResumeIngestion, StoreError};
use super::scoring::ShortlistThreshold;
use crate::workflows::jobs::{JobDescriptionImporter, JobImportError};

/// Service composing the external stores with the scoring core.
///
/// Every call fetches fresh data; nothing is cached between views.
pub struct ScreeningService<C, J, I> {
    candidates: Arc<C>,
    jobs: Arc<J>,
    ingestion: Arc<I>,
    default_threshold: ShortlistThreshold,
}

impl<C, J, I> ScreeningService<C, J, I>
where
    C: CandidateStore + 'static,
    J: JobStore + 'static,
    I: ResumeIngestion + 'static,
{
    pub fn new(
        candidates: Arc<C>,
        jobs: Arc<J>,
        ingestion: Arc<I>,
        default_threshold: ShortlistThreshold,
    ) -> Self {
        Self {
            candidates,
            jobs,
            ingestion,
            default_threshold,
        }
    }

    pub fn default_threshold(&self) -> ShortlistThreshold {
        self.default_threshold
    }

    pub fn candidates(&self) -> Result<Vec<CandidateRecord>, ScreeningServiceError> {
        Ok(self.candidates.fetch_all()?)
    }

    pub fn results(
        &self,
        threshold: Option<ShortlistThreshold>,
    ) -> Result<ResultsView, ScreeningServiceError> {
        let candidates = self.candidates()?;
        Ok(results_view(
            &candidates,
            threshold.unwrap_or(self.default_threshold),
        ))
    }

    pub fn shortlist(
        &self,
        threshold: Option<ShortlistThreshold>,
    ) -> Result<ShortlistView, ScreeningServiceError> {
        let candidates = self.candidates()?;
        Ok(shortlist_view(
            &candidates,
            threshold.unwrap_or(self.default_threshold),
        ))
    }

    pub fn invites(&self) -> Result<Vec<InviteCard>, ScreeningServiceError> {
        let candidates = self.candidates()?;
        Ok(invite_cards(&candidates))
    }

    pub fn analytics(&self, filter: &JobFilter) -> Result<AnalyticsReport, ScreeningServiceError> {
        let candidates = self.candidates()?;
        // Labels cover every stored job, including ones an upload would refuse.
        let jobs = self.jobs.fetch_all()?;
        Ok(report(&candidates, &jobs, filter))
    }

    /// Ask the backend to email every candidate it shortlisted.
    pub fn send_notifications(&self) -> Result<String, ScreeningServiceError> {
        let message = self.candidates.send_notifications()?;
        info!(%message, "shortlist notifications dispatched");
        Ok(message)
    }

    pub fn clear_results(&self) -> Result<(), ScreeningServiceError> {
        self.candidates.clear_all()?;
        info!("screening results cleared");
        Ok(())
    }

    /// Jobs with a well-formed store id; anything else is logged and skipped.
    pub fn jobs(&self) -> Result<Vec<JobRecord>, ScreeningServiceError> {
        let jobs = self.jobs.fetch_all()?;
        Ok(jobs
            .into_iter()
            .filter(|job| {
                let valid = job.id.is_object_id();
                if !valid {
                    warn!(job_id = %job.id, title = %job.title, "skipping job with invalid id");
                }
                valid
            })
            .collect())
    }

    pub fn create_job(&self, job: NewJob) -> Result<JobRecord, ScreeningServiceError> {
        if job.description.trim().is_empty() {
            return Err(ScreeningServiceError::MissingDescription);
        }
        let created = self.jobs.create(job)?;
        info!(job_id = %created.id, title = %created.title, "job description created");
        Ok(created)
    }

    /// Create one job per row of an uploaded CSV file.
    ///
    /// Every row is parsed before anything is stored. A store failure part way through reports
    /// how many rows were already created.
    pub fn import_jobs(
        &self,
        file_name: &str,
        content: &[u8],
    ) -> Result<Vec<JobRecord>, ScreeningServiceError> {
        let parsed = JobDescriptionImporter::from_upload(file_name, content)?;
        let total = parsed.len();
        let mut created = Vec::with_capacity(total);
        for job in parsed {
            match self.jobs.create(job) {
                Ok(record) => created.push(record),
                Err(source) if created.is_empty() => return Err(source.into()),
                Err(source) => {
                    warn!(file_name, created = created.len(), total, "job import interrupted");
                    return Err(ScreeningServiceError::PartialImport {
                        created: created.len(),
                        total,
                        source,
                    });
                }
            }
        }
        info!(file_name, count = created.len(), "job descriptions imported");
        Ok(created)
    }

    pub fn delete_job(&self, id: &JobId) -> Result<(), ScreeningServiceError> {
        if !id.is_object_id() {
            return Err(ScreeningServiceError::InvalidJobId(id.clone()));
        }
        self.jobs.delete(id)?;
        info!(job_id = %id, "job deleted");
        Ok(())
    }

    pub fn delete_all_jobs(&self) -> Result<(), ScreeningServiceError> {
        self.jobs.delete_all()?;
        info!("all jobs deleted");
        Ok(())
    }

    /// Hand resumes for a known job to the ingestion backend.
    pub fn upload_resumes(
        &self,
        job_id: &JobId,
        documents: Vec<ResumeDocument>,
    ) -> Result<Vec<CandidateRecord>, ScreeningServiceError> {
        if !job_id.is_object_id() {
            return Err(ScreeningServiceError::InvalidJobId(job_id.clone()));
        }
        if documents.is_empty() {
            return Err(ScreeningServiceError::NoDocuments);
        }
        if let Some(document) = documents.iter().find(|document| !document.is_supported()) {
            return Err(ScreeningServiceError::UnsupportedDocument {
                file_name: document.file_name.clone(),
            });
        }
        if !self.jobs()?.iter().any(|job| &job.id == job_id) {
            return Err(ScreeningServiceError::UnknownJob(job_id.clone()));
        }

        let count = documents.len();
        let candidates = self.ingestion.ingest(job_id, documents)?;
        info!(
            job_id = %job_id,
            documents = count,
            candidates = candidates.len(),
            "resumes processed"
        );
        Ok(candidates)
    }
}

/// Error raised by the screening service.
#[derive(Debug, thiserror::Error)]
pub enum ScreeningServiceError {
    #[error(transparent)]
    Store(#[from] StoreError),
    #[error(transparent)]
    Import(#[from] JobImportError),
    #[error("job description is required")]
    MissingDescription,
    #[error("invalid job id '{0}'")]
    InvalidJobId(JobId),
    #[error("job '{0}' not found")]
    UnknownJob(JobId),
    #[error("select at least one resume to upload")]
    NoDocuments,
    #[error("unsupported resume format for '{file_name}', use PDF, Word or plain text")]
    UnsupportedDocument { file_name: String },
    #[error("imported {created} of {total} jobs before the store failed: {source}")]
    PartialImport {
        created: usize,
        total: usize,
        source: StoreError,
    },
}

impl ScreeningServiceError {
    /// Caller mistakes, as opposed to collaborator failures.
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            ScreeningServiceError::Import(_)
                | ScreeningServiceError::MissingDescription
                | ScreeningServiceError::InvalidJobId(_)
                | ScreeningServiceError::NoDocuments
                | ScreeningServiceError::UnsupportedDocument { .. }
                | ScreeningServiceError::Store(StoreError::Rejected(_))
                | ScreeningServiceError::PartialImport {
                    source: StoreError::Rejected(_),
                    ..
                }
        )
    }

    /// Collaborator failure behind this error, if any.
    pub fn store_error(&self) -> Option<&StoreError> {
        match self {
            ScreeningServiceError::Store(source)
            | ScreeningServiceError::PartialImport { source, .. } => Some(source),
            _ => None,
        }
    }
}
