use chrono::Utc;
use metrics_exporter_prometheus::PrometheusHandle;
use recruit_ai::session::{Authenticator, Credentials, Registration, SessionError, SessionUser};
use recruit_ai::workflows::screening::{
    CandidateRecord, CandidateStore, JobId, JobRecord, JobStore, JobsPayload, NewJob, RawScore,
    ResultsPayload, ResumeDocument, ResumeIngestion, ShortlistThreshold, StoreError,
};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::collections::HashMap;
use std::path::Path;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{Arc, Mutex};

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

/// Scores at or above this mark get the backend shortlist flag and an invitation draft.
const BACKEND_SHORTLIST_MARK: f64 = 70.0;

#[derive(Default, Clone)]
pub(crate) struct InMemoryCandidateStore {
    records: Arc<Mutex<Vec<CandidateRecord>>>,
}

impl InMemoryCandidateStore {
    pub(crate) fn seeded(records: Vec<CandidateRecord>) -> Self {
        Self {
            records: Arc::new(Mutex::new(records)),
        }
    }

    fn append(&self, records: &[CandidateRecord]) {
        self.records
            .lock()
            .expect("candidate mutex poisoned")
            .extend(records.iter().cloned());
    }
}

impl CandidateStore for InMemoryCandidateStore {
    fn fetch_all(&self) -> Result<Vec<CandidateRecord>, StoreError> {
        let guard = self.records.lock().expect("candidate mutex poisoned");
        Ok(guard.clone())
    }

    fn clear_all(&self) -> Result<(), StoreError> {
        let mut guard = self.records.lock().expect("candidate mutex poisoned");
        guard.clear();
        Ok(())
    }

    fn send_notifications(&self) -> Result<String, StoreError> {
        let mut guard = self.records.lock().expect("candidate mutex poisoned");
        let mut sent = 0usize;
        for record in guard
            .iter_mut()
            .filter(|record| record.shortlisted && !record.email_sent && record.email.is_some())
        {
            record.email_sent = true;
            sent += 1;
        }
        Ok(format!("Emails sent to {sent} shortlisted candidates"))
    }
}

#[derive(Clone)]
pub(crate) struct InMemoryJobStore {
    records: Arc<Mutex<Vec<JobRecord>>>,
    sequence: Arc<AtomicU64>,
}

impl Default for InMemoryJobStore {
    fn default() -> Self {
        Self {
            records: Arc::new(Mutex::new(Vec::new())),
            sequence: Arc::new(AtomicU64::new(1)),
        }
    }
}

impl InMemoryJobStore {
    pub(crate) fn seeded(records: Vec<JobRecord>) -> Self {
        let store = Self::default();
        *store.records.lock().expect("job mutex poisoned") = records;
        store
    }

    /// Store-style identifier: 8 hex digits of epoch seconds followed by a 16 digit counter.
    fn next_id(&self) -> JobId {
        let seconds = Utc::now().timestamp().max(0) as u32;
        let counter = self.sequence.fetch_add(1, Ordering::Relaxed);
        JobId(format!("{seconds:08x}{counter:016x}"))
    }
}

impl JobStore for InMemoryJobStore {
    fn fetch_all(&self) -> Result<Vec<JobRecord>, StoreError> {
        let guard = self.records.lock().expect("job mutex poisoned");
        Ok(guard.clone())
    }

    fn create(&self, job: NewJob) -> Result<JobRecord, StoreError> {
        let record = JobRecord {
            id: self.next_id(),
            title: job.title,
            company: job.company,
            description: Some(job.description),
            skills: job.skills,
        };
        let mut guard = self.records.lock().expect("job mutex poisoned");
        guard.push(record.clone());
        Ok(record)
    }

    fn delete(&self, id: &JobId) -> Result<(), StoreError> {
        let mut guard = self.records.lock().expect("job mutex poisoned");
        let before = guard.len();
        guard.retain(|job| &job.id != id);
        if guard.len() == before {
            Err(StoreError::NotFound)
        } else {
            Ok(())
        }
    }

    fn delete_all(&self) -> Result<(), StoreError> {
        let mut guard = self.records.lock().expect("job mutex poisoned");
        guard.clear();
        Ok(())
    }
}

/// Local stand-in for the resume parsing backend.
///
/// Scores are derived from the file name so repeated runs are reproducible; results land in the
/// shared candidate store like the real backend persists them.
#[derive(Clone)]
pub(crate) struct InMemoryResumeIngestion {
    candidates: InMemoryCandidateStore,
}

impl InMemoryResumeIngestion {
    pub(crate) fn new(candidates: InMemoryCandidateStore) -> Self {
        Self { candidates }
    }
}

impl ResumeIngestion for InMemoryResumeIngestion {
    fn ingest(
        &self,
        job_id: &JobId,
        documents: Vec<ResumeDocument>,
    ) -> Result<Vec<CandidateRecord>, StoreError> {
        let scored: Vec<CandidateRecord> = documents
            .into_iter()
            .map(|document| score_document(job_id, &document))
            .collect();
        self.candidates.append(&scored);
        Ok(scored)
    }
}

fn score_document(job_id: &JobId, document: &ResumeDocument) -> CandidateRecord {
    let stem = Path::new(&document.file_name)
        .file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_else(|| document.file_name.clone());
    let checksum = stem
        .bytes()
        .chain(job_id.as_str().bytes())
        .fold(0u32, |acc, byte| acc.wrapping_mul(31).wrapping_add(byte as u32));
    let score = f64::from(35 + checksum % 61);
    let shortlisted = score >= BACKEND_SHORTLIST_MARK;
    let name = display_name(&stem);

    CandidateRecord {
        email: Some(format!("{}@example.com", stem.to_ascii_lowercase())),
        score: RawScore::Number(score),
        job_id: Some(job_id.clone()),
        shortlisted,
        email_sent: false,
        email_invite: shortlisted.then(|| {
            format!("Dear {name},\n\nThank you for applying. We would like to invite you to an interview.")
        }),
        name: Some(name),
    }
}

fn display_name(stem: &str) -> String {
    stem.split(['_', '-', ' '])
        .filter(|part| !part.is_empty())
        .map(|part| {
            let mut chars = part.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// Fill in the content type from the file extension when the caller did not send one.
pub(crate) fn resume_document(file_name: &str) -> ResumeDocument {
    let content_type = mime_guess::from_path(file_name)
        .first()
        .map(|media| media.essence_str().to_string());
    ResumeDocument {
        file_name: file_name.to_string(),
        content_type,
        storage_key: Some(format!("uploads/{file_name}")),
    }
}

/// Command-line thresholds must be numeric; out-of-range values are clamped.
pub(crate) fn parse_threshold(raw: &str) -> Result<ShortlistThreshold, String> {
    let value: f64 = raw
        .trim()
        .parse()
        .map_err(|err| format!("failed to parse '{raw}' as a percentage ({err})"))?;
    if !value.is_finite() {
        return Err(format!("threshold '{raw}' must be a finite number"));
    }
    Ok(ShortlistThreshold::new(value))
}

struct Account {
    uid: String,
    password: String,
    display_name: Option<String>,
}

/// Identity provider backed by a process-local account table.
#[derive(Default, Clone)]
pub(crate) struct InMemoryAuthenticator {
    accounts: Arc<Mutex<HashMap<String, Account>>>,
}

const MINIMUM_PASSWORD_LENGTH: usize = 6;

impl Authenticator for InMemoryAuthenticator {
    fn sign_in(&self, credentials: &Credentials) -> Result<SessionUser, SessionError> {
        let email = credentials.email.trim().to_ascii_lowercase();
        let guard = self.accounts.lock().expect("account mutex poisoned");
        let account = guard.get(&email).ok_or(SessionError::UnknownAccount)?;
        if account.password != credentials.password {
            return Err(SessionError::WrongPassword);
        }
        Ok(SessionUser {
            uid: account.uid.clone(),
            email,
            display_name: account.display_name.clone(),
            signed_in_at: Utc::now(),
        })
    }

    fn sign_up(&self, registration: &Registration) -> Result<SessionUser, SessionError> {
        let email = registration.email.trim().to_ascii_lowercase();
        if !email.contains('@') {
            return Err(SessionError::InvalidEmail);
        }
        if registration.password.chars().count() < MINIMUM_PASSWORD_LENGTH {
            return Err(SessionError::WeakPassword);
        }

        let mut guard = self.accounts.lock().expect("account mutex poisoned");
        if guard.contains_key(&email) {
            return Err(SessionError::EmailInUse);
        }
        let uid = format!("uid-{:04}", guard.len() + 1);
        let display_name = Some(registration.name.trim().to_string());
        guard.insert(
            email.clone(),
            Account {
                uid: uid.clone(),
                password: registration.password.clone(),
                display_name: display_name.clone(),
            },
        );

        Ok(SessionUser {
            uid,
            email,
            display_name,
            signed_in_at: Utc::now(),
        })
    }

    fn sign_out(&self, _user: &SessionUser) -> Result<(), SessionError> {
        Ok(())
    }
}

/// Backend exports are either the response envelope or a bare array.
#[derive(Deserialize)]
#[serde(untagged)]
enum Export<E, T> {
    Envelope(E),
    Bare(Vec<T>),
}

fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T, recruit_ai::error::AppError> {
    let raw = std::fs::read_to_string(path)?;
    Ok(serde_json::from_str(&raw)?)
}

pub(crate) fn load_results(path: &Path) -> Result<Vec<CandidateRecord>, recruit_ai::error::AppError> {
    Ok(
        match read_json::<Export<ResultsPayload, CandidateRecord>>(path)? {
            Export::Envelope(payload) => payload.results,
            Export::Bare(records) => records,
        },
    )
}

pub(crate) fn load_jobs(path: &Path) -> Result<Vec<JobRecord>, recruit_ai::error::AppError> {
    Ok(match read_json::<Export<JobsPayload, JobRecord>>(path)? {
        Export::Envelope(payload) => payload.jobs,
        Export::Bare(records) => records,
    })
}
