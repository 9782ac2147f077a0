//! fillgrade CLI: the user-facing command-line interface.

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(
    name = "fillgrade",
    version,
    about = "Grade fill-in-the-blank exercise submissions"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Evaluate one submission against one exercise
    Evaluate {
        /// Path to the .toml/.json exercise set file or directory
        #[arg(long)]
        exercise_set: PathBuf,

        /// Exercise ID
        #[arg(long)]
        exercise: String,

        /// Form field as NAME=VALUE (e.g. "answer_0=chat"); repeatable.
        /// Use this for values containing commas, such as "answer_0=0,08"
        #[arg(long = "field", value_name = "NAME=VALUE")]
        fields: Vec<String>,

        /// Answers in blank order, comma-separated. Values cannot contain
        /// commas (decimal commas included); pass those with --field
        #[arg(long)]
        answers: Option<String>,

        /// Output format: text, json
        #[arg(long, default_value = "text")]
        format: String,

        /// Directory to save the attempt record in
        #[arg(long)]
        save: Option<PathBuf>,

        /// Config file path
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Grade a batch of attempts against an exercise set
    Grade {
        /// Path to the .toml/.json exercise set file or directory
        #[arg(long)]
        exercise_set: PathBuf,

        /// JSON file with attempts: [{"exercise_id": ..., "fields": {"answer_0": ...}}]
        #[arg(long)]
        attempts: PathBuf,

        /// Where to save the grading report JSON
        #[arg(long)]
        output: Option<PathBuf>,

        /// Output format: text, json, markdown
        #[arg(long, default_value = "text")]
        format: String,

        /// Config file path
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Validate exercise set files
    Validate {
        /// Path to exercise set file or directory
        #[arg(long)]
        exercise_set: PathBuf,

        /// Config file path
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Show how an exercise description is classified
    Classify {
        /// Exercise instructions
        #[arg(long)]
        description: String,

        /// Config file path
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Create starter config and example exercise set
    Init,
}

fn main() {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("fillgrade=info".parse().expect("static directive")),
        )
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Evaluate {
            exercise_set,
            exercise,
            fields,
            answers,
            format,
            save,
            config,
        } => commands::evaluate::execute(
            exercise_set,
            exercise,
            fields,
            answers,
            format,
            save,
            config,
        ),
        Commands::Grade {
            exercise_set,
            attempts,
            output,
            format,
            config,
        } => commands::grade::execute(exercise_set, attempts, output, format, config),
        Commands::Validate {
            exercise_set,
            config,
        } => commands::validate::execute(exercise_set, config),
        Commands::Classify {
            description,
            config,
        } => commands::classify::execute(description, config),
        Commands::Init => commands::init::execute(),
    };

    if let Err(e) = result {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}
