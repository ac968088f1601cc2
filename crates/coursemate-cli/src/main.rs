//! coursemate CLI, the user-facing command-line interface.

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};

mod commands;
mod config;

#[derive(Parser)]
#[command(
    name = "coursemate",
    version,
    about = "Course recommendations and quiz grading for learners"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Rank a course catalog for a learner
    Recommend {
        /// Path to a .toml catalog or a directory of catalogs
        #[arg(long)]
        catalog: PathBuf,

        /// Path to the learner profile .toml
        #[arg(long)]
        profile: PathBuf,

        /// Number of recommendations (default from config)
        #[arg(long)]
        top_k: Option<usize>,

        /// Extra course ids to exclude (comma-separated)
        #[arg(long)]
        exclude: Option<String>,

        /// Output format: text, table, json
        #[arg(long, default_value = "text")]
        format: String,

        /// Save the recommendations as a JSON report
        #[arg(long)]
        output: Option<PathBuf>,

        /// Config file path
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Grade one quiz attempt
    Grade {
        /// Path to the quiz .toml
        #[arg(long)]
        quiz: PathBuf,

        /// Selected option per question, comma-separated; "-" leaves a question unanswered
        #[arg(long, default_value = "", allow_hyphen_values = true)]
        answers: String,

        /// Output format: text, json
        #[arg(long, default_value = "text")]
        format: String,

        /// Save the graded attempt as a JSON report
        #[arg(long)]
        output: Option<PathBuf>,

        /// Config file path
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Validate catalog, profile, and quiz files
    Validate {
        /// Catalog file or directory
        #[arg(long)]
        catalog: Option<PathBuf>,

        /// Learner profile file
        #[arg(long)]
        profile: Option<PathBuf>,

        /// Quiz file
        #[arg(long)]
        quiz: Option<PathBuf>,
    },

    /// Summarize saved quiz reports
    Stats {
        /// Quiz report JSON file or directory of reports
        #[arg(long)]
        reports: PathBuf,

        /// Output format: text, json
        #[arg(long, default_value = "text")]
        format: String,
    },

    /// Create starter config and sample data
    Init,
}

fn main() {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("coursemate=info".parse().unwrap()),
        )
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Recommend {
            catalog,
            profile,
            top_k,
            exclude,
            format,
            output,
            config,
        } => commands::recommend::execute(catalog, profile, top_k, exclude, format, output, config),
        Commands::Grade {
            quiz,
            answers,
            format,
            output,
            config,
        } => commands::grade::execute(quiz, answers, format, output, config),
        Commands::Validate {
            catalog,
            profile,
            quiz,
        } => commands::validate::execute(catalog, profile, quiz),
        Commands::Stats { reports, format } => commands::stats::execute(reports, format),
        Commands::Init => commands::init::execute(),
    };

    if let Err(e) = result {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}
