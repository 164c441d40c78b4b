//! tutorbot CLI — assessments, virtual labs and tutoring for CBC learners.

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "tutorbot", version, about = "CBC assessments, virtual labs and tutoring")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create starter config and example question bank
    Init,

    /// Validate question bank TOML files
    Validate {
        /// Path to question bank file or directory
        #[arg(long)]
        bank: PathBuf,
    },

    /// Take an adaptive assessment (scores 1-5 read from stdin, "b" goes back)
    Assess {
        /// Path to question bank file
        #[arg(long)]
        bank: PathBuf,

        /// Student id recorded on the report
        #[arg(long)]
        student: Option<String>,

        /// Read responses from this file instead of stdin
        #[arg(long)]
        answers: Option<PathBuf>,

        /// Directory for the JSON report (default: reports_dir from config)
        #[arg(long)]
        output: Option<PathBuf>,

        /// Also export results: txt, html, all
        #[arg(long)]
        export: Option<String>,

        /// Config file path
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Compare two assessment reports
    Compare {
        /// Earlier report JSON
        #[arg(long)]
        baseline: PathBuf,

        /// Later report JSON
        #[arg(long)]
        current: PathBuf,

        /// Minimum change in a category mean to count
        #[arg(long, default_value = "0.25")]
        threshold: f64,

        /// Exit code 1 if any category declined
        #[arg(long)]
        fail_on_decline: bool,

        /// Output format: text, json, markdown
        #[arg(long, default_value = "text")]
        format: String,
    },

    /// Run a virtual lab
    Lab {
        #[command(subcommand)]
        lab: commands::lab::LabCommand,
    },

    /// Ask the tutor a question
    Chat {
        /// Single message; omit to chat line by line on stdin
        #[arg(long)]
        message: Option<String>,

        /// Override the simulated thinking delay
        #[arg(long)]
        delay_ms: Option<u64>,

        /// Config file path
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Fetch recommended learning paths
    LearningPath {
        /// Student ids (comma-separated)
        #[arg(long)]
        students: Option<String>,

        /// Personality / Holland code, e.g. "IAS"
        #[arg(long)]
        personality: Option<String>,

        /// Take student and Holland code from a saved report
        #[arg(long)]
        report: Option<PathBuf>,

        /// Max concurrent requests
        #[arg(long)]
        parallelism: Option<usize>,

        /// Print the raw JSON response
        #[arg(long)]
        json: bool,

        /// Config file path
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Show CBC grade levels, learning areas and pathways
    Curriculum {
        /// Show learning areas for one grade (e.g. "Grade 7", "PP1")
        #[arg(long)]
        grade: Option<String>,

        /// Show senior school pathways
        #[arg(long)]
        pathways: bool,
    },

    /// Render a role dashboard from saved reports
    Dashboard {
        /// admin, teacher or student
        #[arg(long, default_value = "student")]
        role: String,

        /// Display name, or the student id for the student role
        #[arg(long)]
        user: Option<String>,

        /// Report directory (default: reports_dir from config)
        #[arg(long)]
        reports: Option<PathBuf>,

        /// Config file path
        #[arg(long)]
        config: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("tutorbot=info".parse().unwrap()),
        )
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Init => commands::init::execute(),
        Commands::Validate { bank } => commands::validate::execute(bank),
        Commands::Assess {
            bank,
            student,
            answers,
            output,
            export,
            config,
        } => commands::assess::execute(bank, student, answers, output, export, config),
        Commands::Compare {
            baseline,
            current,
            threshold,
            fail_on_decline,
            format,
        } => commands::compare::execute(baseline, current, threshold, fail_on_decline, format),
        Commands::Lab { lab } => commands::lab::execute(lab),
        Commands::Chat {
            message,
            delay_ms,
            config,
        } => commands::chat::execute(message, delay_ms, config).await,
        Commands::LearningPath {
            students,
            personality,
            report,
            parallelism,
            json,
            config,
        } => {
            commands::learning_path::execute(students, personality, report, parallelism, json, config)
                .await
        }
        Commands::Curriculum { grade, pathways } => commands::curriculum::execute(grade, pathways),
        Commands::Dashboard {
            role,
            user,
            reports,
            config,
        } => commands::dashboard::execute(role, user, reports, config),
    };

    if let Err(e) = result {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}
