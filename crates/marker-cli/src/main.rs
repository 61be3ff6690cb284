use clap::Parser;
use std::path::PathBuf;
use std::process::ExitCode;

use marker_cli::{logging, run, RunOptions};

#[derive(Parser)]
#[command(name = "math-marker", version, about = "Grade generated answers to math problems")]
struct Cli {
    /// Configuration file (JSON, or YAML by extension)
    #[arg(short, long, default_value = "config.json")]
    config: PathBuf,

    /// CSV table with problem_index, Question, Answer, generated_answer
    #[arg(short, long, default_value = "math_problems_with_solutions.csv")]
    input: PathBuf,

    /// Log file, appended to
    #[arg(long, default_value = "app.log")]
    log_file: PathBuf,

    /// Log filter used when RUST_LOG is unset
    #[arg(long, default_value = "info")]
    log_level: String,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    if let Err(e) = logging::init(&cli.log_file, &cli.log_level) {
        eprintln!("math-marker: {}", e);
        return ExitCode::FAILURE;
    }

    let options = RunOptions {
        config_path: cli.config,
        input_path: cli.input,
    };

    match run(&options).await {
        Ok(_) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("{:#}", e);
            ExitCode::FAILURE
        }
    }
}
