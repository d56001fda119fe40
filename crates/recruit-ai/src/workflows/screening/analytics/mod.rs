mod summary;
pub mod views;

pub use summary::{aggregate, job_label, report, show_job_breakdown};
pub use views::{
    AnalyticsReport, AnalyticsSummary, JobBreakdownEntry, JobOption, LabelledBreakdown, ScoreBucket,
    ScoreDistribution,
};
