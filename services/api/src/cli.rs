use crate::demo::{run_demo, run_roster, run_score, DemoArgs, RosterArgs, ScoreArgs};
use crate::server;
use clap::{Args, Parser, Subcommand};
use crew_rating::error::AppError;

#[derive(Parser, Debug)]
#[command(
    name = "Crew Rating Engine",
    about = "Score yacht crew profiles and serve the rating API",
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
    /// Score a single crew profile from a JSON file
    Score(ScoreArgs),
    /// Rank every crew member in a roster CSV
    Roster(RosterArgs),
    /// Score the built-in sample crew under each variant
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
}

pub(crate) async fn run() -> Result<(), AppError> {
    let cli = Cli::parse();
    let command = cli
        .command
        .unwrap_or_else(|| Command::Serve(ServeArgs::default()));

    match command {
        Command::Serve(args) => server::run(args).await,
        Command::Score(args) => run_score(args),
        Command::Roster(args) => run_roster(args),
        Command::Demo(args) => run_demo(args),
    }
}
