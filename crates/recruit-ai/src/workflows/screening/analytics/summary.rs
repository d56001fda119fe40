use std::collections::HashMap;

use super::super::domain::{CandidateRecord, JobFilter, JobId, JobRecord};
use super::super::scoring::normalize;
use super::views::{
    percentage, AnalyticsReport, AnalyticsSummary, JobBreakdownEntry, JobOption,
    LabelledBreakdown, ScoreDistribution,
};

#[derive(Default)]
struct JobTally {
    count: usize,
    mean_score: f64,
    shortlisted: usize,
}

/// Incremental mean; scaling both terms by the count keeps it finite for any finite input.
fn fold_mean(mean: f64, score: f64, count: usize) -> f64 {
    let count = count as f64;
    mean + (score / count - mean / count)
}

/// Summarize the candidates matching `filter`.
///
/// Shortlist figures use the backend flag, not a local threshold. Total over any input; an empty
/// selection yields [`AnalyticsSummary::default`].
pub fn aggregate(candidates: &[CandidateRecord], filter: &JobFilter) -> AnalyticsSummary {
    let mut total = 0usize;
    let mut mean_score = 0.0;
    let mut shortlisted_count = 0usize;
    let mut emails_sent = 0usize;
    let mut score_distribution = ScoreDistribution::default();

    let mut job_order: Vec<&str> = Vec::new();
    let mut tallies: HashMap<&str, JobTally> = HashMap::new();

    for candidate in candidates.iter().filter(|c| filter.matches(c)) {
        let score = normalize(&candidate.score);

        total += 1;
        mean_score = fold_mean(mean_score, score, total);
        score_distribution.record(score);
        if candidate.shortlisted {
            shortlisted_count += 1;
        }
        if candidate.email_sent {
            emails_sent += 1;
        }

        let key = candidate.job_key();
        let tally = tallies.entry(key).or_insert_with(|| {
            job_order.push(key);
            JobTally::default()
        });
        tally.count += 1;
        tally.mean_score = fold_mean(tally.mean_score, score, tally.count);
        if candidate.shortlisted {
            tally.shortlisted += 1;
        }
    }

    if total == 0 {
        return AnalyticsSummary::default();
    }

    let job_breakdown = job_order
        .into_iter()
        .filter_map(|key| {
            tallies.get(key).map(|tally| JobBreakdownEntry {
                job_id: key.to_string(),
                count: tally.count,
                average_score: tally.mean_score,
                shortlisted: tally.shortlisted,
            })
        })
        .collect();

    AnalyticsSummary {
        total,
        average_score: mean_score,
        shortlisted_count,
        shortlist_rate: percentage(shortlisted_count, total),
        emails_sent,
        email_rate: percentage(emails_sent, shortlisted_count),
        score_distribution,
        job_breakdown,
    }
}

/// The per-job table is only worth showing across jobs, and only with more than one job.
pub fn show_job_breakdown(summary: &AnalyticsSummary, filter: &JobFilter) -> bool {
    filter.is_all() && summary.job_breakdown.len() > 1
}

/// Human label for a breakdown row, falling back to the raw id for unknown jobs.
pub fn job_label(jobs: &[JobRecord], job_id: &str) -> String {
    jobs.iter()
        .find(|job| job.id == JobId::new(job_id))
        .map(JobRecord::label)
        .unwrap_or_else(|| job_id.to_string())
}

/// Aggregate and label everything the analytics screen renders for `filter`.
pub fn report(
    candidates: &[CandidateRecord],
    jobs: &[JobRecord],
    filter: &JobFilter,
) -> AnalyticsReport {
    let summary = aggregate(candidates, filter);
    let show = show_job_breakdown(&summary, filter);
    let job_breakdown = if show {
        summary
            .job_breakdown
            .iter()
            .map(|entry| LabelledBreakdown {
                label: job_label(jobs, &entry.job_id),
                shortlist_rate: entry.shortlist_rate(),
                entry: entry.clone(),
            })
            .collect()
    } else {
        Vec::new()
    };

    AnalyticsReport {
        job_id: match filter {
            JobFilter::All => None,
            JobFilter::Job(id) => Some(id.to_string()),
        },
        show_job_breakdown: show,
        job_breakdown,
        jobs: jobs
            .iter()
            .map(|job| JobOption {
                id: job.id.to_string(),
                label: job.label(),
            })
            .collect(),
        summary,
    }
}
