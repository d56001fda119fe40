//! Per-view shortlist projections.
//!
//! "Shortlisted" means different things on different screens, so each view has exactly one
//! definition here:
//!
//! * Results lists every candidate and adds the locally computed threshold verdict.
//! * Shortlisted keeps candidates whose normalized score meets the threshold, ranked by score.
//! * Invites keeps candidates the backend flagged and for whom an invitation was generated.
//! * Analytics (see [`super::analytics`]) counts the backend flag.

use std::cmp::Ordering;

use serde::Serialize;

use super::domain::{CandidateRecord, JobId};
use super::scoring::{is_shortlisted, normalize, ShortlistThreshold};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResultRow {
    pub name: String,
    pub email: String,
    pub score: f64,
    pub job_id: Option<JobId>,
    pub meets_threshold: bool,
    pub email_sent: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResultsView {
    pub threshold: ShortlistThreshold,
    pub rows: Vec<ResultRow>,
}

/// Results view: the full candidate table in backend order.
pub fn results_view(candidates: &[CandidateRecord], threshold: ShortlistThreshold) -> ResultsView {
    let rows = candidates
        .iter()
        .map(|candidate| ResultRow {
            name: candidate.display_name().to_string(),
            email: candidate.display_email().to_string(),
            score: normalize(&candidate.score),
            job_id: candidate.job_id.clone(),
            meets_threshold: is_shortlisted(candidate, threshold),
            email_sent: candidate.email_sent,
        })
        .collect();

    ResultsView { threshold, rows }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ShortlistEntry {
    pub rank: usize,
    pub name: String,
    pub email: String,
    pub score: f64,
    pub job_id: Option<JobId>,
    pub email_sent: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct ShortlistStats {
    pub total_shortlisted: usize,
    pub emails_sent: usize,
    pub pending_emails: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ShortlistView {
    pub threshold: ShortlistThreshold,
    pub stats: ShortlistStats,
    pub entries: Vec<ShortlistEntry>,
}

impl ShortlistView {
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Shortlisted view: threshold filter, highest score first, ties keep backend order.
pub fn shortlist_view(
    candidates: &[CandidateRecord],
    threshold: ShortlistThreshold,
) -> ShortlistView {
    let mut selected: Vec<(f64, &CandidateRecord)> = candidates
        .iter()
        .filter(|candidate| is_shortlisted(candidate, threshold))
        .map(|candidate| (normalize(&candidate.score), candidate))
        .collect();
    selected.sort_by(|a, b| b.0.partial_cmp(&a.0).unwrap_or(Ordering::Equal));

    let entries: Vec<ShortlistEntry> = selected
        .into_iter()
        .enumerate()
        .map(|(index, (score, candidate))| ShortlistEntry {
            rank: index + 1,
            name: candidate.display_name().to_string(),
            email: candidate.display_email().to_string(),
            score,
            job_id: candidate.job_id.clone(),
            email_sent: candidate.email_sent,
        })
        .collect();

    let emails_sent = entries.iter().filter(|entry| entry.email_sent).count();
    let stats = ShortlistStats {
        total_shortlisted: entries.len(),
        emails_sent,
        pending_emails: entries.len() - emails_sent,
    };

    ShortlistView {
        threshold,
        stats,
        entries,
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InviteCard {
    pub name: String,
    pub email: String,
    pub invitation: String,
}

/// Invite view: backend-shortlisted candidates that have a generated invitation.
pub fn invite_cards(candidates: &[CandidateRecord]) -> Vec<InviteCard> {
    candidates
        .iter()
        .filter(|candidate| candidate.shortlisted)
        .filter_map(|candidate| {
            candidate.email_invite.as_ref().map(|invitation| InviteCard {
                name: candidate.display_name().to_string(),
                email: candidate.display_email().to_string(),
                invitation: invitation.clone(),
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::workflows::screening::domain::RawScore;

    fn candidate(name: &str, score: RawScore, shortlisted: bool, sent: bool) -> CandidateRecord {
        CandidateRecord {
            name: Some(name.to_string()),
            email: Some(format!("{}@example.com", name.to_ascii_lowercase())),
            score,
            job_id: Some(JobId::new("A")),
            shortlisted,
            email_sent: sent,
            email_invite: None,
        }
    }

    fn pool() -> Vec<CandidateRecord> {
        vec![
            candidate("Avery", RawScore::Number(62.0), false, false),
            candidate("Blake", RawScore::from("91"), true, true),
            candidate("Casey", RawScore::from("N/A"), true, false),
            candidate("Devon", RawScore::Number(62.0), false, true),
            candidate("Emery", RawScore::Number(48.0), false, false),
        ]
    }

    #[test]
    fn results_view_keeps_every_row() {
        let view = results_view(&pool(), ShortlistThreshold::new(60.0));
        assert_eq!(view.rows.len(), 5);

        let verdicts: Vec<_> = view.rows.iter().map(|row| row.meets_threshold).collect();
        assert_eq!(verdicts, vec![true, true, false, true, false]);
        assert_eq!(view.rows[2].score, 0.0);
    }

    #[test]
    fn shortlist_view_ranks_by_score_with_stable_ties() {
        let view = shortlist_view(&pool(), ShortlistThreshold::new(60.0));

        let names: Vec<_> = view.entries.iter().map(|entry| entry.name.as_str()).collect();
        assert_eq!(names, vec!["Blake", "Avery", "Devon"]);
        let ranks: Vec<_> = view.entries.iter().map(|entry| entry.rank).collect();
        assert_eq!(ranks, vec![1, 2, 3]);
        assert_eq!(
            view.stats,
            ShortlistStats {
                total_shortlisted: 3,
                emails_sent: 2,
                pending_emails: 1,
            }
        );
    }

    #[test]
    fn shortlist_view_ignores_backend_flag() {
        let view = shortlist_view(&pool(), ShortlistThreshold::new(95.0));
        assert!(view.is_empty());
        assert_eq!(view.stats, ShortlistStats::default());
    }

    #[test]
    fn invites_require_flag_and_invitation() {
        let mut candidates = pool();
        candidates[1].email_invite = Some("Dear Blake, ...".to_string());
        candidates[3].email_invite = Some("Dear Devon, ...".to_string());

        let cards = invite_cards(&candidates);
        assert_eq!(cards.len(), 1);
        assert_eq!(cards[0].name, "Blake");
        assert_eq!(cards[0].email, "blake@example.com");
    }
}
