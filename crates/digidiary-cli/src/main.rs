use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod commands;

#[derive(Parser)]
#[command(name = "digidiary", version, about = "DigiDiary CLI")]
pub struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Journal entry management
    Journal {
        #[command(subcommand)]
        action: commands::journal::JournalAction,
    },
    /// Streak and emotion statistics
    Stats {
        /// Print as JSON
        #[arg(long)]
        json: bool,
    },
    /// Current streak, recent mood and latest entry
    Home {
        /// Print as JSON
        #[arg(long)]
        json: bool,
    },
    /// Motivational quotes
    Tip {
        #[command(subcommand)]
        action: commands::tip::TipAction,
    },
    /// Configuration management
    Config {
        #[command(subcommand)]
        action: commands::config::ConfigAction,
    },
    /// Print shell completions
    Completions {
        shell: clap_complete::Shell,
    },
}

fn init_tracing() {
    let filter = EnvFilter::try_from_env("DIGIDIARY_LOG").unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

#[tokio::main(flavor = "current_thread")]
async fn main() {
    init_tracing();

    let cli = Cli::parse();
    let result = match cli.command {
        Commands::Journal { action } => commands::journal::run(action).await,
        Commands::Stats { json } => commands::stats::run_stats(json).await,
        Commands::Home { json } => commands::stats::run_home(json).await,
        Commands::Tip { action } => commands::tip::run(action).await,
        Commands::Config { action } => commands::config::run(action),
        Commands::Completions { shell } => commands::completions::run(shell),
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}
