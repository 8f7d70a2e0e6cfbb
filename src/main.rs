//! curbsort — recycling guidance chat.
//!
//! Startup sequence:
//!   1. Load .env (if present)
//!   2. Load config
//!   3. Init logger at configured level
//!   4. Build provider + memory store + pipeline
//!   5. Synchronous chat loop, each turn bridged onto a fresh runtime

use std::io::{self, BufRead, Write};

use tracing::info;

use curbsort::blocking;
use curbsort::config;
use curbsort::error::AppError;
use curbsort::llm::providers;
use curbsort::logger;
use curbsort::memory::MemoryStore;
use curbsort::pipeline::Pipeline;
use curbsort::session::{self, SessionContext};

fn main() {
    if let Err(e) = run() {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}

fn run() -> Result<(), AppError> {
    // Load .env if present — ignore errors (file is optional).
    let _ = dotenvy::dotenv();

    let config = config::load()?;
    logger::init(&config.log_level)?;

    info!(
        name = %config.assistant_name,
        work_dir = %config.work_dir.display(),
        provider = %config.llm.provider,
        "config loaded"
    );

    let provider = providers::build(&config.llm, config.llm_api_key.clone())
        .map_err(|e| AppError::Config(e.to_string()))?;
    let store = MemoryStore::new(config.memory_path());
    let pipeline = Pipeline::new(provider, store).with_scan_limit(config.recent_scan_limit);

    let mut session = SessionContext::new("local-user");
    info!(session_id = %session.session_id(), "session started");

    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();

    println!("{} — what's recyclable where you live?", config.assistant_name);
    println!("Enter your 5-digit ZIP code (or just start asking):");

    loop {
        print!("> ");
        io::stdout().flush()?;

        let Some(line) = lines.next() else { break };
        let line = line?;
        let input = line.trim();

        if input.is_empty() {
            continue;
        }
        if input == "quit" || input == "exit" {
            break;
        }
        // A bare ZIP updates the session location without a pipeline run.
        if session::is_valid_zip(input) {
            session.set_zip(input);
            println!("Got it — using ZIP {input}.");
            continue;
        }

        match blocking::run_to_completion(pipeline.process(&session, input)) {
            Ok(Ok(answer)) => println!("\n{answer}\n"),
            Ok(Err(e)) => println!("\n{}\n", e.user_message()),
            Err(e) => return Err(e),
        }
    }

    Ok(())
}
