mod run;
mod schedule;

use std::process;
use std::sync::Arc;

use clap::Parser;

use checkin_core::{ConsoleSink, DiagnosticSink};

/// Daily check-in reward claimer.
#[derive(Parser)]
#[command(
    name = "checkin",
    version,
    about = "Claims the daily check-in reward for every configured account"
)]
struct Cli {
    /// Run a single batch immediately and exit
    #[arg(short, long)]
    once: bool,

    /// Forward each result to the configured chat (BOT_TOKEN, CHAT_ID)
    #[arg(long)]
    notify: bool,

    /// Suppress the report table and diagnostics
    #[arg(long)]
    quiet: bool,
}

fn main() {
    let cli = Cli::parse();
    let sink: Arc<dyn DiagnosticSink> = Arc::new(ConsoleSink::new(cli.quiet));

    let rt = tokio::runtime::Runtime::new().expect("failed to create tokio runtime");

    if cli.once {
        rt.block_on(run::run_once(cli.notify, cli.quiet, &sink));
        return;
    }

    // Scheduled mode: validate the configured run time before the first
    // sleep so a bad TIME fails at startup, not at midnight.
    let raw_time = std::env::var("TIME").unwrap_or_else(|_| String::from("00:00"));
    let run_at = match schedule::parse_run_time(&raw_time) {
        Ok(t) => t,
        Err(_) => {
            sink.log(&format!(
                "'{}' is not a valid run time, use HH:MM or HH:MM:SS",
                raw_time
            ));
            process::exit(1);
        }
    };

    sink.log(&format!("scheduler started, daily batch at {}", raw_time));
    loop {
        let wait = schedule::until_next(run_at, schedule::now());
        std::thread::sleep(wait);
        rt.block_on(run::run_once(cli.notify, cli.quiet, &sink));
    }
}
