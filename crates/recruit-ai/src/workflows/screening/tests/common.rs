use std::sync::{Arc, Mutex};

use axum::response::Response;
use chrono::Utc;
use serde_json::Value;

use crate::session::{
    Authenticator, Credentials, Registration, SessionContext, SessionError, SessionUser,
};
use crate::workflows::screening::domain::{
    CandidateRecord, JobId, JobRecord, NewJob, RawScore, ResumeDocument,
};
use crate::workflows::screening::repository::{
    CandidateStore, JobStore, ResumeIngestion, StoreError,
};
use crate::workflows::screening::{screening_router, ScreeningService, ShortlistThreshold};

pub(super) const JOB_A: &str = "64f1c2a9b3e4d5f60718293a";
pub(super) const JOB_B: &str = "64f1c2a9b3e4d5f60718293b";

pub(super) fn candidate(
    name: &str,
    score: RawScore,
    job: &str,
    shortlisted: bool,
    email_sent: bool,
) -> CandidateRecord {
    CandidateRecord {
        name: Some(name.to_string()),
        email: Some(format!("{}@example.com", name.to_ascii_lowercase())),
        score,
        job_id: Some(JobId::new(job)),
        shortlisted,
        email_sent,
        email_invite: shortlisted.then(|| format!("Dear {name}, we would like to meet you.")),
    }
}

pub(super) fn candidates() -> Vec<CandidateRecord> {
    vec![
        candidate("Avery", RawScore::Number(85.0), JOB_A, true, true),
        candidate("Blake", RawScore::from("55"), JOB_A, false, false),
        candidate("Casey", RawScore::Number(30.0), JOB_B, false, false),
        candidate("Devon", RawScore::from("N/A"), JOB_B, true, false),
    ]
}

pub(super) fn job(id: &str, title: &str, company: &str) -> JobRecord {
    JobRecord {
        id: JobId::new(id),
        title: title.to_string(),
        company: company.to_string(),
        description: Some(format!("{title} at {company}")),
        skills: Vec::new(),
    }
}

pub(super) fn jobs() -> Vec<JobRecord> {
    vec![
        job(JOB_A, "Data Engineer", "Acme"),
        job(JOB_B, "Analyst", "Globex"),
        job("legacy-7", "Archived", "Initech"),
    ]
}

pub(super) fn new_job(description: &str) -> NewJob {
    NewJob {
        title: "Platform Engineer".to_string(),
        company: "Acme".to_string(),
        description: description.to_string(),
        skills: vec!["Rust".to_string()],
    }
}

pub(super) fn document(file_name: &str, content_type: &str) -> ResumeDocument {
    ResumeDocument {
        file_name: file_name.to_string(),
        content_type: Some(content_type.to_string()),
        storage_key: None,
    }
}

#[derive(Default, Clone)]
pub(super) struct MemoryCandidates {
    pub(super) records: Arc<Mutex<Vec<CandidateRecord>>>,
}

impl MemoryCandidates {
    pub(super) fn seeded(records: Vec<CandidateRecord>) -> Self {
        Self {
            records: Arc::new(Mutex::new(records)),
        }
    }

    pub(super) fn len(&self) -> usize {
        self.records.lock().expect("candidate mutex poisoned").len()
    }
}

impl CandidateStore for MemoryCandidates {
    fn fetch_all(&self) -> Result<Vec<CandidateRecord>, StoreError> {
        Ok(self.records.lock().expect("candidate mutex poisoned").clone())
    }

    fn clear_all(&self) -> Result<(), StoreError> {
        self.records.lock().expect("candidate mutex poisoned").clear();
        Ok(())
    }

    fn send_notifications(&self) -> Result<String, StoreError> {
        let mut guard = self.records.lock().expect("candidate mutex poisoned");
        let mut sent = 0;
        for record in guard.iter_mut().filter(|r| r.shortlisted && !r.email_sent) {
            record.email_sent = true;
            sent += 1;
        }
        Ok(format!("Sent {sent} emails"))
    }
}

#[derive(Default, Clone)]
pub(super) struct MemoryJobs {
    pub(super) records: Arc<Mutex<Vec<JobRecord>>>,
    /// Rejects creation once the store holds this many jobs.
    pub(super) capacity: Option<usize>,
}

impl MemoryJobs {
    pub(super) fn seeded(records: Vec<JobRecord>) -> Self {
        Self {
            records: Arc::new(Mutex::new(records)),
            capacity: None,
        }
    }

    pub(super) fn len(&self) -> usize {
        self.records.lock().expect("job mutex poisoned").len()
    }
}

impl JobStore for MemoryJobs {
    fn fetch_all(&self) -> Result<Vec<JobRecord>, StoreError> {
        Ok(self.records.lock().expect("job mutex poisoned").clone())
    }

    fn create(&self, job: NewJob) -> Result<JobRecord, StoreError> {
        let mut guard = self.records.lock().expect("job mutex poisoned");
        if self.capacity.is_some_and(|capacity| guard.len() >= capacity) {
            return Err(StoreError::Rejected("job limit reached".to_string()));
        }
        let record = JobRecord {
            id: JobId(format!("{:024x}", guard.len() + 1)),
            title: job.title,
            company: job.company,
            description: Some(job.description),
            skills: job.skills,
        };
        guard.push(record.clone());
        Ok(record)
    }

    fn delete(&self, id: &JobId) -> Result<(), StoreError> {
        let mut guard = self.records.lock().expect("job mutex poisoned");
        let before = guard.len();
        guard.retain(|job| &job.id != id);
        if guard.len() == before {
            return Err(StoreError::NotFound);
        }
        Ok(())
    }

    fn delete_all(&self) -> Result<(), StoreError> {
        self.records.lock().expect("job mutex poisoned").clear();
        Ok(())
    }
}

/// Scores every resume at 70 and appends the rows to the candidate store.
#[derive(Clone)]
pub(super) struct MemoryIngestion {
    pub(super) candidates: MemoryCandidates,
}

impl ResumeIngestion for MemoryIngestion {
    fn ingest(
        &self,
        job_id: &JobId,
        documents: Vec<ResumeDocument>,
    ) -> Result<Vec<CandidateRecord>, StoreError> {
        let scored: Vec<CandidateRecord> = documents
            .into_iter()
            .map(|document| CandidateRecord {
                name: document.file_name.split('.').next().map(str::to_string),
                score: RawScore::Number(70.0),
                job_id: Some(job_id.clone()),
                ..CandidateRecord::default()
            })
            .collect();
        self.candidates
            .records
            .lock()
            .expect("candidate mutex poisoned")
            .extend(scored.iter().cloned());
        Ok(scored)
    }
}

pub(super) struct UnavailableStore;

impl CandidateStore for UnavailableStore {
    fn fetch_all(&self) -> Result<Vec<CandidateRecord>, StoreError> {
        Err(StoreError::Unavailable("scoring backend offline".to_string()))
    }

    fn clear_all(&self) -> Result<(), StoreError> {
        Err(StoreError::Unavailable("scoring backend offline".to_string()))
    }

    fn send_notifications(&self) -> Result<String, StoreError> {
        Err(StoreError::Unavailable("scoring backend offline".to_string()))
    }
}

impl JobStore for UnavailableStore {
    fn fetch_all(&self) -> Result<Vec<JobRecord>, StoreError> {
        Err(StoreError::Unavailable("scoring backend offline".to_string()))
    }

    fn create(&self, _job: NewJob) -> Result<JobRecord, StoreError> {
        Err(StoreError::Unavailable("scoring backend offline".to_string()))
    }

    fn delete(&self, _id: &JobId) -> Result<(), StoreError> {
        Err(StoreError::Unavailable("scoring backend offline".to_string()))
    }

    fn delete_all(&self) -> Result<(), StoreError> {
        Err(StoreError::Unavailable("scoring backend offline".to_string()))
    }
}

impl ResumeIngestion for UnavailableStore {
    fn ingest(
        &self,
        _job_id: &JobId,
        _documents: Vec<ResumeDocument>,
    ) -> Result<Vec<CandidateRecord>, StoreError> {
        Err(StoreError::Unavailable("scoring backend offline".to_string()))
    }
}

pub(super) struct StaticAuth;

impl Authenticator for StaticAuth {
    fn sign_in(&self, credentials: &Credentials) -> Result<SessionUser, SessionError> {
        Ok(SessionUser {
            uid: "recruiter-1".to_string(),
            email: credentials.email.clone(),
            display_name: None,
            signed_in_at: Utc::now(),
        })
    }

    fn sign_up(&self, registration: &Registration) -> Result<SessionUser, SessionError> {
        Ok(SessionUser {
            uid: "recruiter-2".to_string(),
            email: registration.email.clone(),
            display_name: Some(registration.name.clone()),
            signed_in_at: Utc::now(),
        })
    }

    fn sign_out(&self, _user: &SessionUser) -> Result<(), SessionError> {
        Ok(())
    }
}

pub(super) type MemoryService = ScreeningService<MemoryCandidates, MemoryJobs, MemoryIngestion>;

pub(super) fn build_service() -> (MemoryService, MemoryCandidates, MemoryJobs) {
    build_service_with_jobs(MemoryJobs::seeded(jobs()))
}

pub(super) fn build_service_with_jobs(
    jobs: MemoryJobs,
) -> (MemoryService, MemoryCandidates, MemoryJobs) {
    let candidates = MemoryCandidates::seeded(candidates());
    let ingestion = MemoryIngestion {
        candidates: candidates.clone(),
    };
    let service = ScreeningService::new(
        Arc::new(candidates.clone()),
        Arc::new(jobs.clone()),
        Arc::new(ingestion),
        ShortlistThreshold::new(60.0),
    );
    (service, candidates, jobs)
}

pub(super) fn unavailable_service(
) -> ScreeningService<UnavailableStore, UnavailableStore, UnavailableStore> {
    ScreeningService::new(
        Arc::new(UnavailableStore),
        Arc::new(UnavailableStore),
        Arc::new(UnavailableStore),
        ShortlistThreshold::default(),
    )
}

pub(super) fn session(signed_in: bool) -> Arc<SessionContext<StaticAuth>> {
    let session = Arc::new(SessionContext::new(Arc::new(StaticAuth)));
    if signed_in {
        session
            .sign_in(&Credentials {
                email: "recruiter@example.com".to_string(),
                password: "hunter22".to_string(),
            })
            .expect("static auth signs in");
    }
    session
}

pub(super) fn router_with_service(service: MemoryService, signed_in: bool) -> axum::Router {
    screening_router(Arc::new(service), session(signed_in))
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 64 * 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}
