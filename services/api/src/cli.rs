use crate::demo::{run_demo, run_import_check, DemoArgs, ImportCheckArgs};
use crate::server;
use clap::{Args, Parser, Subcommand};
use homestead::error::AppError;

#[derive(Parser, Debug)]
#[command(
    name = "Homestead Marketplace",
    about = "Run the Homestead marketplace service and its moderation demo from the command line",
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
    /// Run an end-to-end CLI demo covering listing moderation, KYC, and trust scoring
    Demo(DemoArgs),
    /// Validate a listings CSV export without importing it
    ImportCheck(ImportCheckArgs),
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
        Command::Demo(args) => run_demo(args),
        Command::ImportCheck(args) => run_import_check(args),
    }
}
