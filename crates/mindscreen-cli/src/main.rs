//! mindscreen CLI — the user-facing command-line interface.

use std::path::PathBuf;
use std::process;

use clap::{Args, Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(
    name = "mindscreen",
    version,
    about = "Adaptive screening questionnaires"
)]
struct Cli {
    #[command(flatten)]
    global: GlobalArgs,

    #[command(subcommand)]
    command: Commands,
}

/// Options shared by every command.
#[derive(Args, Debug, Clone, Default)]
pub struct GlobalArgs {
    /// Config file path
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Question bank directory (overrides config)
    #[arg(long, global = true)]
    pub bank_dir: Option<PathBuf>,

    /// Results file (overrides config)
    #[arg(long, global = true)]
    pub results: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate question bank files
    Validate {
        /// Bank file or directory (default: configured bank directory)
        #[arg(long)]
        banks: Option<PathBuf>,
    },

    /// Print the first question of a test
    Start {
        /// Test type (default: configured default test type)
        #[arg(long)]
        test_type: Option<String>,
    },

    /// Print the question that follows an answer
    Answer {
        /// Test type (default: configured default test type)
        #[arg(long)]
        test_type: Option<String>,

        /// Id of the question being answered
        #[arg(long)]
        question: String,

        /// Answer label
        #[arg(long)]
        answer: String,
    },

    /// Interpret a raw score
    Interpret {
        /// Sum of answer severities
        #[arg(long, allow_hyphen_values = true)]
        score: i64,

        /// Number of questions answered
        #[arg(long)]
        questions: usize,
    },

    /// Take a test interactively on stdin
    Take {
        /// Test type (default: configured default test type)
        #[arg(long)]
        test_type: Option<String>,

        /// User the result is recorded for
        #[arg(long)]
        user: String,

        /// Show the interpretation without saving it
        #[arg(long)]
        dry_run: bool,
    },

    /// Record a finished assessment
    Submit {
        /// Test type
        #[arg(long)]
        test_type: String,

        /// Total score
        #[arg(long, allow_hyphen_values = true)]
        score: i64,

        /// Answers as comma-separated question=answer pairs
        #[arg(long, default_value = "")]
        answers: String,

        /// User the result is recorded for
        #[arg(long)]
        user: String,
    },

    /// List past results for a user
    History {
        /// User to list results for
        #[arg(long)]
        user: String,

        /// Output format: table, json
        #[arg(long, default_value = "table")]
        format: String,
    },

    /// Create starter config and example question bank
    Init,
}

fn main() {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("mindscreen_core=info".parse().unwrap())
                .add_directive("mindscreen_store=info".parse().unwrap()),
        )
        .init();

    let cli = Cli::parse();
    let global = cli.global;

    let result = match cli.command {
        Commands::Validate { banks } => commands::validate::execute(&global, banks),
        Commands::Start { test_type } => commands::start::execute(&global, test_type),
        Commands::Answer {
            test_type,
            question,
            answer,
        } => commands::answer::execute(&global, test_type, question, answer),
        Commands::Interpret { score, questions } => commands::interpret::execute(score, questions),
        Commands::Take {
            test_type,
            user,
            dry_run,
        } => commands::take::execute(&global, test_type, user, dry_run),
        Commands::Submit {
            test_type,
            score,
            answers,
            user,
        } => commands::submit::execute(&global, test_type, score, answers, user),
        Commands::History { user, format } => commands::history::execute(&global, user, format),
        Commands::Init => commands::init::execute(),
    };

    if let Err(e) = result {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}
