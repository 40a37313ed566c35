use crate::report::{
    run_aggregate, run_compare, run_score, AggregateArgs, CompareArgs, ScoreArgs,
};
use crate::server;
use clap::{Args, Parser, Subcommand};
use geoequity::error::AppError;

#[derive(Parser, Debug)]
#[command(
    name = "geoequity",
    about = "Score merchants for economic justice value from the command line or over HTTP",
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
    /// Score one merchant under v1, v2 and, with participation, v4.2
    Score(ScoreArgs),
    /// Average v1 scores across merchants in one location
    Aggregate(AggregateArgs),
    /// Compare one category's v1 score across several locations
    Compare(CompareArgs),
}

#[derive(Args, Debug, Default)]
pub(crate) struct ServeArgs {
    /// Override the configured host for the HTTP server
    #[arg(long)]
    pub(crate) host: Option<String>,
    /// Override the configured port for the HTTP server
    #[arg(long)]
    pub(crate) port: Option<u16>,
    /// Skip Census lookups and score against the fallback context
    #[arg(long)]
    pub(crate) offline: bool,
}

pub(crate) async fn run() -> Result<(), AppError> {
    let cli = Cli::parse();
    let command = cli
        .command
        .unwrap_or_else(|| Command::Serve(ServeArgs::default()));

    match command {
        Command::Serve(args) => server::run(args).await,
        Command::Score(args) => run_score(args).await,
        Command::Aggregate(args) => run_aggregate(args).await,
        Command::Compare(args) => run_compare(args).await,
    }
}
