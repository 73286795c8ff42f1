use clap::{CommandFactory, Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod commands;
mod input;
mod terminal;

#[derive(Parser)]
#[command(name = "quizroom-cli", version, about = "Quizroom CLI")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run an interactive quiz session
    Run(commands::run::RunArgs),
    /// Print the saved progress as JSON
    Status,
    /// Score the saved progress against the question set
    Summary {
        /// Question file or URL (defaults to quiz.questions)
        #[arg(long)]
        questions: Option<String>,
    },
    /// Delete the saved progress
    Reset,
    /// Question set tools
    Questions {
        #[command(subcommand)]
        action: commands::questions::QuestionsAction,
    },
    /// Completed session history
    Stats {
        #[command(subcommand)]
        action: commands::stats::StatsAction,
    },
    /// Configuration management
    Config {
        #[command(subcommand)]
        action: commands::config::ConfigAction,
    },
    /// Generate shell completions
    Completions {
        /// Target shell
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

fn init_logging() {
    let filter = EnvFilter::try_from_env("QUIZROOM_LOG").unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() {
    init_logging();

    let cli = Cli::parse();
    let result = match cli.command {
        Commands::Run(args) => commands::run::run(args),
        Commands::Status => commands::progress::status(),
        Commands::Summary { questions } => commands::progress::summary(questions),
        Commands::Reset => commands::progress::reset(),
        Commands::Questions { action } => commands::questions::run(action),
        Commands::Stats { action } => commands::stats::run(action),
        Commands::Config { action } => commands::config::run(action),
        Commands::Completions { shell } => {
            let mut cmd = Cli::command();
            clap_complete::generate(shell, &mut cmd, "quizroom-cli", &mut std::io::stdout());
            Ok(())
        }
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}
