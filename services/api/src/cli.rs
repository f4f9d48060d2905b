use crate::report::{run_batch, run_recommend, run_rules, BatchArgs, RecommendArgs, RulesArgs};
use crate::server;
use clap::{Args, Parser, Subcommand};
use esg_advisor::error::AppError;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "ESG Compliance Advisor",
    about = "Serve and run rule-based ESG compliance recommendations for SMEs",
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
    /// Recommend compliance actions and schemes for a single company profile
    Recommend(RecommendArgs),
    /// Print the active rule table as JSON
    Rules(RulesArgs),
    /// Screen every company profile in a CSV export
    Batch(BatchArgs),
}

#[derive(Args, Debug, Default)]
pub(crate) struct ServeArgs {
    /// Override the configured host for the HTTP server
    #[arg(long)]
    pub(crate) host: Option<String>,
    /// Override the configured port for the HTTP server
    #[arg(long)]
    pub(crate) port: Option<u16>,
    /// JSON rule table to load instead of ESG_RULES_PATH
    #[arg(long)]
    pub(crate) rules: Option<PathBuf>,
}

pub(crate) async fn run() -> Result<(), AppError> {
    let cli = Cli::parse();
    let command = cli
        .command
        .unwrap_or_else(|| Command::Serve(ServeArgs::default()));

    match command {
        Command::Serve(args) => server::run(args).await,
        Command::Recommend(args) => run_recommend(args),
        Command::Rules(args) => run_rules(args),
        Command::Batch(args) => run_batch(args),
    }
}
