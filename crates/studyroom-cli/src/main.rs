use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod commands;

#[derive(Parser)]
#[command(name = "studyroom-cli", version, about = "Studyroom CLI")]
struct Cli {
    /// Log planner and timer decisions to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate a timetable from a subject sheet
    Plan(commands::plan::PlanArgs),
    /// Validate and list a subject sheet
    Subjects(commands::subjects::SubjectsArgs),
    /// Run a work/break countdown
    Pomodoro(commands::pomodoro::PomodoroArgs),
    /// Run a free-running study stopwatch
    Stopwatch(commands::stopwatch::StopwatchArgs),
    /// Configuration management
    Config {
        #[command(subcommand)]
        action: commands::config::ConfigAction,
    },
}

fn init_tracing(verbose: bool) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(if verbose { "debug" } else { "warn" }));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let result = match cli.command {
        Commands::Plan(args) => commands::plan::run(args),
        Commands::Subjects(args) => commands::subjects::run(args),
        Commands::Pomodoro(args) => commands::pomodoro::run(args).await,
        Commands::Stopwatch(args) => commands::stopwatch::run(args).await,
        Commands::Config { action } => commands::config::run(action),
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}
