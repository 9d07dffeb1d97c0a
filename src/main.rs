use anyhow::Result;
use clap::{CommandFactory, Parser, Subcommand};
use forex::cli::convert::ConvertArgs;
use forex::core::log::init_logging;

#[derive(Parser)]
#[command(version, about)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Path to optional configuration file
    #[arg(short, long, global = true)]
    config_path: Option<String>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Create default configuration
    Setup,
    /// List the available exchange rates
    Rates,
    /// Convert an amount between two currencies
    Convert {
        /// Amount to convert
        amount: String,
        /// Source currency code
        #[arg(short, long)]
        from: String,
        /// Target currency code
        #[arg(short, long)]
        to: String,
        /// Swap source and target before converting
        #[arg(short, long)]
        swap: bool,
    },
}

impl From<Commands> for forex::AppCommand {
    fn from(cmd: Commands) -> forex::AppCommand {
        match cmd {
            Commands::Rates => forex::AppCommand::Rates,
            Commands::Convert {
                amount,
                from,
                to,
                swap,
            } => forex::AppCommand::Convert(ConvertArgs {
                amount,
                from,
                to,
                swap,
            }),
            Commands::Setup => unreachable!("Setup command should be handled separately"),
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    init_logging(cli.verbose);

    let result = match cli.command {
        Some(Commands::Setup) => forex::cli::setup::setup(),
        Some(cmd) => forex::run_command(cmd.into(), cli.config_path.as_deref()).await,
        None => {
            Cli::command().print_help()?;
            Ok(())
        }
    };

    if let Err(e) = &result {
        tracing::error!(error = %e, "Application failed");
    }
    result
}
