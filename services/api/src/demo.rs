use crate::infra::{
    load_jobs, load_results, parse_threshold, resume_document, InMemoryAuthenticator,
    InMemoryCandidateStore, InMemoryJobStore, InMemoryResumeIngestion,
};
use clap::Args;
use recruit_ai::config::AppConfig;
use recruit_ai::error::AppError;
use recruit_ai::session::{Registration, Screen, SessionContext, ThemeContext, ThemeMode};
use recruit_ai::workflows::screening::analytics::{report, AnalyticsReport, ScoreBucket};
use recruit_ai::workflows::screening::projections::{shortlist_view, ShortlistView};
use recruit_ai::workflows::screening::{JobFilter, NewJob, ScreeningService, ShortlistThreshold};
use std::path::PathBuf;
use std::sync::Arc;

#[derive(Args, Debug)]
pub(crate) struct AnalyticsArgs {
    /// Results export from the scoring backend (JSON envelope or array)
    #[arg(long)]
    pub(crate) results: PathBuf,
    /// Optional jobs export used to label the per-job breakdown
    #[arg(long)]
    pub(crate) jobs: Option<PathBuf>,
    /// Restrict the summary to one job id ("all" for every job)
    #[arg(long)]
    pub(crate) job_id: Option<String>,
}

#[derive(Args, Debug)]
pub(crate) struct ShortlistArgs {
    /// Results export from the scoring backend (JSON envelope or array)
    #[arg(long)]
    pub(crate) results: PathBuf,
    /// Minimum score in percent (defaults to APP_SHORTLIST_THRESHOLD)
    #[arg(long, value_parser = parse_threshold)]
    pub(crate) threshold: Option<ShortlistThreshold>,
}

#[derive(Args, Debug, Default)]
pub(crate) struct DemoArgs {
    /// Minimum score in percent for the shortlist portion of the demo
    #[arg(long, value_parser = parse_threshold)]
    pub(crate) threshold: Option<ShortlistThreshold>,
}

pub(crate) fn run_analytics(args: AnalyticsArgs) -> Result<(), AppError> {
    let AnalyticsArgs {
        results,
        jobs,
        job_id,
    } = args;

    let candidates = load_results(&results)?;
    let jobs = match jobs {
        Some(path) => load_jobs(&path)?,
        None => Vec::new(),
    };
    let filter = JobFilter::parse(job_id.as_deref());

    render_analytics(&report(&candidates, &jobs, &filter));
    Ok(())
}

pub(crate) fn run_shortlist(args: ShortlistArgs) -> Result<(), AppError> {
    let threshold = match args.threshold {
        Some(threshold) => threshold,
        None => AppConfig::load()?.shortlist.default_threshold,
    };
    let candidates = load_results(&args.results)?;

    render_shortlist(&shortlist_view(&candidates, threshold));
    Ok(())
}

pub(crate) fn run_demo(args: DemoArgs) -> Result<(), AppError> {
    let threshold = args.threshold.unwrap_or_default();

    println!("Recruiter screening demo");

    let session = SessionContext::new(Arc::new(InMemoryAuthenticator::default()));
    let subscription = session.subscribe(|user| match user {
        Some(user) => println!("  [session] signed in as {}", user.email),
        None => println!("  [session] signed out"),
    });
    let theme = ThemeContext::new(ThemeMode::Light);

    session.sign_up(&Registration {
        name: "Morgan Reyes".to_string(),
        email: "morgan@acme.test".to_string(),
        password: "screening-demo".to_string(),
        company: "Acme Analytics".to_string(),
    })?;
    let reachable: Vec<&str> = Screen::ordered()
        .into_iter()
        .filter(|screen| session.can_access(*screen))
        .map(Screen::path)
        .collect();
    println!("- Screens available: {}", reachable.join(", "));

    let candidates = InMemoryCandidateStore::default();
    let jobs = InMemoryJobStore::default();
    let service = ScreeningService::new(
        Arc::new(candidates.clone()),
        Arc::new(jobs),
        Arc::new(InMemoryResumeIngestion::new(candidates)),
        threshold,
    );

    let engineer = service.create_job(NewJob {
        title: "Data Engineer".to_string(),
        company: "Acme Analytics".to_string(),
        description: "Design and run batch and streaming pipelines in Rust and SQL.".to_string(),
        skills: vec!["Rust".to_string(), "SQL".to_string()],
    })?;
    let imported = service.import_jobs(
        "openings.csv",
        b"job_title,company_name,jd_text,skills\n\
          Product Analyst,Acme Analytics,Own the hiring funnel dashboards,SQL;Statistics\n",
    )?;
    println!(
        "- Jobs on file: {}",
        service
            .jobs()?
            .iter()
            .map(|job| job.label())
            .collect::<Vec<_>>()
            .join(" | ")
    );

    let engineer_resumes = ["ada_lovelace.pdf", "grace_hopper.docx", "linus_t.txt"]
        .into_iter()
        .map(resume_document)
        .collect();
    service.upload_resumes(&engineer.id, engineer_resumes)?;
    if let Some(analyst) = imported.first() {
        let analyst_resumes = ["katherine_johnson.pdf", "alan_turing.pdf"]
            .into_iter()
            .map(resume_document)
            .collect();
        service.upload_resumes(&analyst.id, analyst_resumes)?;
    }
    if let Err(err) = service.upload_resumes(&engineer.id, vec![resume_document("headshot.png")]) {
        println!("- Upload rejected: {err}");
    }

    let results = service.results(None)?;
    println!(
        "\nResults ({} candidates, threshold {:.0}%)",
        results.rows.len(),
        results.threshold.value()
    );
    for row in &results.rows {
        println!(
            "  - {:<20} {:>5.1}%  {}",
            row.name,
            row.score,
            if row.meets_threshold { "meets threshold" } else { "below threshold" }
        );
    }

    println!();
    render_shortlist(&service.shortlist(None)?);

    let invites = service.invites()?;
    println!("\nInvitations drafted by the backend: {}", invites.len());
    for card in &invites {
        println!("  - {} <{}>", card.name, card.email);
    }
    println!("- {}", service.send_notifications()?);

    println!();
    render_analytics(&service.analytics(&JobFilter::All)?);

    println!("\n- Theme switched to {:?}", theme.toggle());
    session.sign_out()?;
    session.unsubscribe(subscription);
    Ok(())
}

pub(crate) fn render_shortlist(view: &ShortlistView) {
    println!(
        "Shortlist at {:.0}%: {} candidates | {} emailed | {} pending",
        view.threshold.value(),
        view.stats.total_shortlisted,
        view.stats.emails_sent,
        view.stats.pending_emails
    );
    if view.is_empty() {
        println!("  No candidates meet the threshold.");
        return;
    }
    for entry in &view.entries {
        println!(
            "  {:>2}. {:<20} {:<28} {:>5.1}%  {}",
            entry.rank,
            entry.name,
            entry.email,
            entry.score,
            if entry.email_sent { "sent" } else { "pending" }
        );
    }
}

pub(crate) fn render_analytics(report: &AnalyticsReport) {
    let summary = &report.summary;
    match &report.job_id {
        Some(job_id) => println!("Analytics for job {job_id}"),
        None => println!("Analytics across all jobs"),
    }
    if summary.is_empty() {
        println!("  No candidates to analyze.");
        return;
    }

    println!(
        "- {} candidates | average score {:.1}%",
        summary.total, summary.average_score
    );
    println!(
        "- {} shortlisted ({:.1}%) | {} emails sent ({:.1}% of shortlisted)",
        summary.shortlisted_count, summary.shortlist_rate, summary.emails_sent, summary.email_rate
    );
    println!("Score distribution:");
    for bucket in ScoreBucket::ordered() {
        println!(
            "  - {:<20} {:>3} ({:.1}%)",
            bucket.label(),
            summary.score_distribution.count(bucket),
            summary.bucket_share(bucket)
        );
    }
    if report.show_job_breakdown {
        println!("Per job:");
        for row in &report.job_breakdown {
            println!(
                "  - {}: {} candidates | avg {:.1}% | {} shortlisted ({:.1}%)",
                row.label,
                row.entry.count,
                row.entry.average_score,
                row.entry.shortlisted,
                row.shortlist_rate
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn write_export(name: &str, contents: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("recruit-ai-demo-{}", std::process::id()));
        fs::create_dir_all(&dir).expect("create export dir");
        let path = dir.join(name);
        fs::write(&path, contents).expect("write export");
        path
    }

    #[test]
    fn demo_walkthrough_completes() {
        run_demo(DemoArgs {
            threshold: Some(ShortlistThreshold::new(60.0)),
        })
        .expect("demo runs end to end");
    }

    #[test]
    fn shortlist_and_analytics_read_exports() {
        let results = write_export(
            "results.json",
            r#"{"results":[
                {"name":"Avery","email":"avery@example.com","score":85,"job_id":"A","shortlisted":true},
                {"name":"Blake","score":"55","job_id":"B"}
            ]}"#,
        );
        let jobs = write_export(
            "jobs.json",
            r#"[{"_id":"A","title":"Data Engineer","company":"Acme"}]"#,
        );

        run_shortlist(ShortlistArgs {
            results: results.clone(),
            threshold: Some(ShortlistThreshold::new(50.0)),
        })
        .expect("shortlist renders");
        run_analytics(AnalyticsArgs {
            results,
            jobs: Some(jobs),
            job_id: Some("A".to_string()),
        })
        .expect("analytics renders");
    }

    #[test]
    fn missing_export_is_an_error() {
        let err = run_analytics(AnalyticsArgs {
            results: std::env::temp_dir().join("recruit-ai-missing-results.json"),
            jobs: None,
            job_id: None,
        })
        .expect_err("missing export");
        assert!(matches!(err, AppError::Io(_)));
    }
}
