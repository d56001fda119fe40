use std::fmt;

use serde::de::{self, Deserializer, IgnoredAny, MapAccess, SeqAccess, Visitor};
use serde::{Deserialize, Serialize, Serializer};

/// Label used for candidates that arrive without a job reference.
pub const UNKNOWN_JOB_LABEL: &str = "Unknown";

/// Score field as delivered by the scoring backend.
///
/// The backend is not strict about the representation: scores show up as JSON numbers, as
/// numeric-looking strings, as free text such as `"N/A"`, or not at all. Decoding never fails;
/// anything that is neither a number nor a string becomes [`RawScore::Missing`].
#[derive(Debug, Clone, PartialEq, Default)]
pub enum RawScore {
    Number(f64),
    Text(String),
    #[default]
    Missing,
}

impl RawScore {
    pub fn is_missing(&self) -> bool {
        matches!(self, RawScore::Missing)
    }
}

impl From<f64> for RawScore {
    fn from(value: f64) -> Self {
        RawScore::Number(value)
    }
}

impl From<&str> for RawScore {
    fn from(value: &str) -> Self {
        RawScore::Text(value.to_string())
    }
}

impl Serialize for RawScore {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            RawScore::Number(value) => serializer.serialize_f64(*value),
            RawScore::Text(text) => serializer.serialize_str(text),
            RawScore::Missing => serializer.serialize_none(),
        }
    }
}

impl<'de> Deserialize<'de> for RawScore {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(RawScoreVisitor)
    }
}

struct RawScoreVisitor;

impl<'de> Visitor<'de> for RawScoreVisitor {
    type Value = RawScore;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a score as number, string or null")
    }

    fn visit_bool<E: de::Error>(self, value: bool) -> Result<RawScore, E> {
        Ok(RawScore::Number(if value { 1.0 } else { 0.0 }))
    }

    fn visit_i64<E: de::Error>(self, value: i64) -> Result<RawScore, E> {
        Ok(RawScore::Number(value as f64))
    }

    fn visit_u64<E: de::Error>(self, value: u64) -> Result<RawScore, E> {
        Ok(RawScore::Number(value as f64))
    }

    fn visit_f64<E: de::Error>(self, value: f64) -> Result<RawScore, E> {
        Ok(RawScore::Number(value))
    }

    fn visit_str<E: de::Error>(self, value: &str) -> Result<RawScore, E> {
        Ok(RawScore::Text(value.to_string()))
    }

    fn visit_string<E: de::Error>(self, value: String) -> Result<RawScore, E> {
        Ok(RawScore::Text(value))
    }

    fn visit_none<E: de::Error>(self) -> Result<RawScore, E> {
        Ok(RawScore::Missing)
    }

    fn visit_unit<E: de::Error>(self) -> Result<RawScore, E> {
        Ok(RawScore::Missing)
    }

    fn visit_some<D: Deserializer<'de>>(self, deserializer: D) -> Result<RawScore, D::Error> {
        deserializer.deserialize_any(RawScoreVisitor)
    }

    fn visit_seq<A: SeqAccess<'de>>(self, mut seq: A) -> Result<RawScore, A::Error> {
        while seq.next_element::<IgnoredAny>()?.is_some() {}
        Ok(RawScore::Missing)
    }

    fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<RawScore, A::Error> {
        while map.next_entry::<IgnoredAny, IgnoredAny>()?.is_some() {}
        Ok(RawScore::Missing)
    }
}

/// Identifier of a job posting in the job store.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct JobId(pub String);

impl JobId {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The job store keys documents by 24 hex character object ids.
    pub fn is_object_id(&self) -> bool {
        self.0.len() == 24 && self.0.bytes().all(|byte| byte.is_ascii_hexdigit())
    }
}

impl fmt::Display for JobId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Candidate row produced by resume ingestion and scoring.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct CandidateRecord {
    #[serde(default, deserialize_with = "empty_string_as_none")]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    pub email: Option<String>,
    #[serde(default)]
    pub score: RawScore,
    #[serde(default, deserialize_with = "optional_job_id")]
    pub job_id: Option<JobId>,
    /// Decided by the backend; unrelated to any locally configured threshold.
    #[serde(default, deserialize_with = "lenient_flag")]
    pub shortlisted: bool,
    #[serde(default, deserialize_with = "lenient_flag")]
    pub email_sent: bool,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    pub email_invite: Option<String>,
}

impl CandidateRecord {
    pub fn display_name(&self) -> &str {
        self.name.as_deref().unwrap_or("N/A")
    }

    pub fn display_email(&self) -> &str {
        self.email.as_deref().unwrap_or("N/A")
    }

    /// Job key used for grouping; candidates without a job collapse into `"Unknown"`.
    pub fn job_key(&self) -> &str {
        self.job_id
            .as_ref()
            .map(JobId::as_str)
            .unwrap_or(UNKNOWN_JOB_LABEL)
    }
}

/// Job posting as listed by the job store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JobRecord {
    #[serde(rename = "_id")]
    pub id: JobId,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub company: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub skills: Vec<String>,
}

impl JobRecord {
    pub fn label(&self) -> String {
        format!("{} - {}", self.title, self.company)
    }
}

/// Job description submitted by a recruiter, either typed in or imported from CSV.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewJob {
    #[serde(default, alias = "job_title")]
    pub title: String,
    #[serde(default, alias = "company_name")]
    pub company: String,
    #[serde(alias = "jd_text")]
    pub description: String,
    #[serde(default)]
    pub skills: Vec<String>,
}

const SUPPORTED_RESUME_TYPES: [&str; 4] = [
    "application/pdf",
    "application/msword",
    "application/vnd.openxmlformats-officedocument.wordprocessingml.document",
    "text/plain",
];

/// Resume file handed to the ingestion backend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResumeDocument {
    pub file_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub storage_key: Option<String>,
}

impl ResumeDocument {
    pub fn media_type(&self) -> Option<mime::Mime> {
        self.content_type
            .as_deref()
            .and_then(|raw| raw.parse::<mime::Mime>().ok())
    }

    pub fn is_supported(&self) -> bool {
        self.media_type()
            .map(|media| SUPPORTED_RESUME_TYPES.contains(&media.essence_str()))
            .unwrap_or(false)
    }
}

/// Restriction applied before aggregation.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum JobFilter {
    #[default]
    All,
    Job(JobId),
}

impl JobFilter {
    /// `"all"`, blank, or no value select every job.
    pub fn parse(raw: Option<&str>) -> Self {
        match raw.map(str::trim) {
            None | Some("") => Self::All,
            Some(value) if value.eq_ignore_ascii_case("all") => Self::All,
            Some(value) => Self::Job(JobId::new(value)),
        }
    }

    pub fn matches(&self, candidate: &CandidateRecord) -> bool {
        match self {
            JobFilter::All => true,
            JobFilter::Job(id) => candidate.job_id.as_ref() == Some(id),
        }
    }

    pub fn is_all(&self) -> bool {
        matches!(self, JobFilter::All)
    }
}

/// Envelope returned by the results endpoint of the scoring backend.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ResultsPayload {
    #[serde(default, deserialize_with = "null_as_empty")]
    pub results: Vec<CandidateRecord>,
}

/// Envelope returned by the jobs endpoint of the scoring backend.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct JobsPayload {
    #[serde(default, deserialize_with = "null_as_empty")]
    pub jobs: Vec<JobRecord>,
}

/// Text fields accept strings and numbers; blank text and any other shape decode as `None`.
fn empty_string_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let text = deserializer.deserialize_any(LenientTextVisitor)?;
    Ok(text.filter(|value| !value.trim().is_empty()))
}

fn optional_job_id<'de, D>(deserializer: D) -> Result<Option<JobId>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(empty_string_as_none(deserializer)?.map(JobId))
}

/// Flags follow truthiness: non-zero numbers, non-empty strings and containers are set.
fn lenient_flag<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    deserializer.deserialize_any(LenientFlagVisitor)
}

struct LenientTextVisitor;

impl<'de> Visitor<'de> for LenientTextVisitor {
    type Value = Option<String>;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a string, number or null")
    }

    fn visit_bool<E: de::Error>(self, _value: bool) -> Result<Self::Value, E> {
        Ok(None)
    }

    fn visit_i64<E: de::Error>(self, value: i64) -> Result<Self::Value, E> {
        Ok(Some(value.to_string()))
    }

    fn visit_u64<E: de::Error>(self, value: u64) -> Result<Self::Value, E> {
        Ok(Some(value.to_string()))
    }

    fn visit_f64<E: de::Error>(self, value: f64) -> Result<Self::Value, E> {
        Ok(value.is_finite().then(|| value.to_string()))
    }

    fn visit_str<E: de::Error>(self, value: &str) -> Result<Self::Value, E> {
        Ok(Some(value.to_string()))
    }

    fn visit_string<E: de::Error>(self, value: String) -> Result<Self::Value, E> {
        Ok(Some(value))
    }

    fn visit_none<E: de::Error>(self) -> Result<Self::Value, E> {
        Ok(None)
    }

    fn visit_unit<E: de::Error>(self) -> Result<Self::Value, E> {
        Ok(None)
    }

    fn visit_some<D: Deserializer<'de>>(self, deserializer: D) -> Result<Self::Value, D::Error> {
        deserializer.deserialize_any(LenientTextVisitor)
    }

    fn visit_seq<A: SeqAccess<'de>>(self, mut seq: A) -> Result<Self::Value, A::Error> {
        while seq.next_element::<IgnoredAny>()?.is_some() {}
        Ok(None)
    }

    fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<Self::Value, A::Error> {
        while map.next_entry::<IgnoredAny, IgnoredAny>()?.is_some() {}
        Ok(None)
    }
}

struct LenientFlagVisitor;

impl<'de> Visitor<'de> for LenientFlagVisitor {
    type Value = bool;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a flag of any shape")
    }

    fn visit_bool<E: de::Error>(self, value: bool) -> Result<bool, E> {
        Ok(value)
    }

    fn visit_i64<E: de::Error>(self, value: i64) -> Result<bool, E> {
        Ok(value != 0)
    }

    fn visit_u64<E: de::Error>(self, value: u64) -> Result<bool, E> {
        Ok(value != 0)
    }

    fn visit_f64<E: de::Error>(self, value: f64) -> Result<bool, E> {
        Ok(value != 0.0 && !value.is_nan())
    }

    fn visit_str<E: de::Error>(self, value: &str) -> Result<bool, E> {
        Ok(!value.is_empty())
    }

    fn visit_none<E: de::Error>(self) -> Result<bool, E> {
        Ok(false)
    }

    fn visit_unit<E: de::Error>(self) -> Result<bool, E> {
        Ok(false)
    }

    fn visit_some<D: Deserializer<'de>>(self, deserializer: D) -> Result<bool, D::Error> {
        deserializer.deserialize_any(LenientFlagVisitor)
    }

    fn visit_seq<A: SeqAccess<'de>>(self, mut seq: A) -> Result<bool, A::Error> {
        while seq.next_element::<IgnoredAny>()?.is_some() {}
        Ok(true)
    }

    fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<bool, A::Error> {
        while map.next_entry::<IgnoredAny, IgnoredAny>()?.is_some() {}
        Ok(true)
    }
}

fn null_as_empty<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Ok(Option::<Vec<T>>::deserialize(deserializer)?.unwrap_or_default())
}
