use serde::Serialize;

/// Fixed score ranges used by the distribution histogram.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ScoreBucket {
    Excellent,
    Good,
    Average,
    Poor,
}

impl ScoreBucket {
    pub const fn ordered() -> [Self; 4] {
        [Self::Excellent, Self::Good, Self::Average, Self::Poor]
    }

    /// Top bucket is unbounded above so malformed scores over 100 still land somewhere.
    pub fn classify(score: f64) -> Self {
        if score >= 80.0 {
            Self::Excellent
        } else if score >= 60.0 {
            Self::Good
        } else if score >= 40.0 {
            Self::Average
        } else {
            Self::Poor
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Excellent => "Excellent (80-100%)",
            Self::Good => "Good (60-79%)",
            Self::Average => "Average (40-59%)",
            Self::Poor => "Poor (0-39%)",
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ScoreDistribution {
    pub excellent: usize,
    pub good: usize,
    pub average: usize,
    pub poor: usize,
}

impl ScoreDistribution {
    pub fn record(&mut self, score: f64) {
        match ScoreBucket::classify(score) {
            ScoreBucket::Excellent => self.excellent += 1,
            ScoreBucket::Good => self.good += 1,
            ScoreBucket::Average => self.average += 1,
            ScoreBucket::Poor => self.poor += 1,
        }
    }

    pub fn count(&self, bucket: ScoreBucket) -> usize {
        match bucket {
            ScoreBucket::Excellent => self.excellent,
            ScoreBucket::Good => self.good,
            ScoreBucket::Average => self.average,
            ScoreBucket::Poor => self.poor,
        }
    }

    pub fn total(&self) -> usize {
        self.excellent + self.good + self.average + self.poor
    }
}

/// Per-job rollup in order of first appearance.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct JobBreakdownEntry {
    pub job_id: String,
    pub count: usize,
    pub average_score: f64,
    pub shortlisted: usize,
}

impl JobBreakdownEntry {
    pub fn shortlist_rate(&self) -> f64 {
        percentage(self.shortlisted, self.count)
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct AnalyticsSummary {
    pub total: usize,
    pub average_score: f64,
    pub shortlisted_count: usize,
    pub shortlist_rate: f64,
    pub emails_sent: usize,
    pub email_rate: f64,
    pub score_distribution: ScoreDistribution,
    pub job_breakdown: Vec<JobBreakdownEntry>,
}

impl AnalyticsSummary {
    pub fn is_empty(&self) -> bool {
        self.total == 0
    }

    /// Share of candidates in `bucket`, in percent of the filtered total.
    pub fn bucket_share(&self, bucket: ScoreBucket) -> f64 {
        percentage(self.score_distribution.count(bucket), self.total)
    }
}

/// Breakdown row paired with the job's display label.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LabelledBreakdown {
    pub label: String,
    #[serde(flatten)]
    pub entry: JobBreakdownEntry,
    pub shortlist_rate: f64,
}

/// Analytics screen payload: the summary plus what the screen needs to render it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnalyticsReport {
    pub job_id: Option<String>,
    pub summary: AnalyticsSummary,
    pub show_job_breakdown: bool,
    pub job_breakdown: Vec<LabelledBreakdown>,
    pub jobs: Vec<JobOption>,
}

/// Entry of the job filter drop-down.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct JobOption {
    pub id: String,
    pub label: String,
}

pub(crate) fn percentage(part: usize, whole: usize) -> f64 {
    if whole == 0 {
        0.0
    } else {
        part as f64 / whole as f64 * 100.0
    }
}
