use crate::demo::{run_analytics, run_demo, run_shortlist, AnalyticsArgs, DemoArgs, ShortlistArgs};
use crate::infra::parse_threshold;
use crate::server;
use clap::{Args, Parser, Subcommand};
use recruit_ai::error::AppError;
use recruit_ai::workflows::screening::ShortlistThreshold;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "Recruit AI",
    about = "Screen scored candidates, shortlist them and review hiring analytics",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Start the HTTP service (default command)
    Serve(ServeArgs),
    /// Summarize a results export: totals, rates, score distribution and per-job breakdown
    Analytics(AnalyticsArgs),
    /// Rank the candidates of a results export that meet a score threshold
    Shortlist(ShortlistArgs),
    /// Run an end-to-end screening walkthrough against in-memory stores
    Demo(DemoArgs),
}

#[derive(Args, Debug, Default)]
pub(crate) struct ServeArgs {
    /// Override the configured host for the HTTP server
    #[arg(long)]
    pub(crate) host: Option<String>,
    /// Override the configured port for the HTTP server
    #[arg(long)]
    pub(crate) port: Option<u16>,
    /// Override the default shortlist threshold (percent)
    #[arg(long, value_parser = parse_threshold)]
    pub(crate) threshold: Option<ShortlistThreshold>,
    /// Seed the in-memory candidate store from a results export
    #[arg(long)]
    pub(crate) seed_results: Option<PathBuf>,
    /// Seed the in-memory job store from a jobs export
    #[arg(long)]
    pub(crate) seed_jobs: Option<PathBuf>,
}

pub(crate) async fn run() -> Result<(), AppError> {
    let cli = Cli::parse();
    let command = cli
        .command
        .unwrap_or_else(|| Command::Serve(ServeArgs::default()));

    match command {
        Command::Serve(args) => server::run(args).await,
        Command::Analytics(args) => run_analytics(args),
        Command::Shortlist(args) => run_shortlist(args),
        Command::Demo(args) => run_demo(args),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serve_is_the_default_command() {
        let cli = Cli::try_parse_from(["recruit-ai-api"]).expect("parses");
        assert!(cli.command.is_none());
    }

    #[test]
    fn shortlist_accepts_threshold_override() {
        let cli = Cli::try_parse_from([
            "recruit-ai-api",
            "shortlist",
            "--results",
            "results.json",
            "--threshold",
            "72.5",
        ])
        .expect("parses");
        match cli.command {
            Some(Command::Shortlist(args)) => {
                assert_eq!(args.threshold, Some(ShortlistThreshold::new(72.5)));
                assert_eq!(args.results, PathBuf::from("results.json"));
            }
            other => panic!("expected shortlist command, got {other:?}"),
        }
    }

    #[test]
    fn non_numeric_threshold_is_rejected() {
        let parsed = Cli::try_parse_from([
            "recruit-ai-api",
            "serve",
            "--threshold",
            "strict",
        ]);
        assert!(parsed.is_err());
    }
}
