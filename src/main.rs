use std::path::PathBuf;
use std::time::Duration;

use anyhow::Context;
use clap::Parser;
use dotenv::dotenv;
use gophercises::quiz::{EndOfInput, ProblemSet, QuizSession};
use tokio::io::BufReader;

const DEFAULT_PROBLEMS_FILE: &str = "problems.csv";
const DEFAULT_TIME_LIMIT: u64 = 10;

#[derive(Parser)]
#[command(name = "quiz", version, about = "Timed quiz over a CSV of questions and answers")]
struct Cli {
    /// CSV file with `question,answer` records
    #[arg(short = 'f', long = "file", env = "QUIZ_FILE", default_value = DEFAULT_PROBLEMS_FILE)]
    file: PathBuf,

    /// Time limit for the whole quiz, in seconds
    #[arg(short = 't', long = "limit", env = "QUIZ_TIME_LIMIT", default_value_t = DEFAULT_TIME_LIMIT)]
    limit: u64,

    /// Ask the questions in random order
    #[arg(long)]
    shuffle: bool,

    /// Count remaining questions as wrong once stdin closes instead of waiting out the timer
    #[arg(long)]
    stop_on_eof: bool,
}

fn main() -> anyhow::Result<()> {
    dotenv().ok();
    pretty_env_logger::init();

    let cli = Cli::parse();

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .context("could not start the async runtime")?;
    let result = runtime.block_on(run(cli));
    // A stdin read abandoned on timeout is parked on a blocking thread; don't wait for it.
    runtime.shutdown_background();
    result
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    let mut problems = ProblemSet::from_path(&cli.file)
        .with_context(|| format!("could not load problems from {}", cli.file.display()))?;
    if cli.shuffle {
        problems.shuffle();
    }

    log::info!(
        "Starting quiz: {} problems, {}s limit",
        problems.len(),
        cli.limit
    );

    let policy = if cli.stop_on_eof {
        EndOfInput::CountAsIncorrect
    } else {
        EndOfInput::WaitForTimer
    };
    let mut session = QuizSession::new(
        problems,
        Duration::from_secs(cli.limit),
        BufReader::new(tokio::io::stdin()),
        tokio::io::stdout(),
    )
    .end_of_input(policy);

    let summary = session.run().await?;
    println!("\n{}", summary);

    Ok(())
}
