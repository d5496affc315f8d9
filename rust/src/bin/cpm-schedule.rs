//! Read a JSON task list, print the CPM schedule as JSON.
//!
//! Input is an array of `{"id", "name", "duration", "dependencies"}` objects
//! on stdin (or `--input`). Failures print `{"error": "..."}` and exit 1.

use std::io::Read;
use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use chrono::NaiveDate;
use clap::Parser;
use serde_json::{json, Value};

use cpm_rust::{anchor_schedule, compute_schedule_with_config, ScheduleConfig, Task};

#[derive(Parser)]
#[command(about = "Critical Path Method schedule calculator")]
struct Args {
    /// Read tasks from this file instead of stdin.
    #[arg(long)]
    input: Option<PathBuf>,
    /// Project start date (YYYY-MM-DD); adds calendar dates to the output.
    #[arg(long)]
    start_date: Option<NaiveDate>,
    /// Planned project end date (YYYY-MM-DD), used with --start-date.
    #[arg(long, requires = "start_date")]
    planned_end: Option<NaiveDate>,
    /// Diagnostics on stderr: 0=silent, 1=changes, 2=checks, 3=debug.
    #[arg(long, default_value_t = 0)]
    verbosity: u8,
}

fn read_input(args: &Args) -> Result<String> {
    match &args.input {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("Cannot read {}", path.display())),
        None => {
            let mut buf = String::new();
            std::io::stdin()
                .read_to_string(&mut buf)
                .context("Cannot read stdin")?;
            Ok(buf)
        }
    }
}

/// Schedule the JSON task list in `raw` and build the output document.
fn run(args: &Args, raw: &str) -> Result<Value> {
    if raw.trim().is_empty() {
        bail!("No input provided");
    }
    let tasks: Vec<Task> = serde_json::from_str(raw).context("Invalid JSON input")?;

    let config = ScheduleConfig {
        verbosity: args.verbosity,
        ..Default::default()
    };
    let outcome = compute_schedule_with_config(&tasks, &config)?;

    let mut output = serde_json::to_value(&outcome)?;
    if let Some(start) = args.start_date {
        let dates = anchor_schedule(&outcome.result, start, args.planned_end)?;
        output["dates"] = serde_json::to_value(&dates)?;
    }
    Ok(output)
}

fn error_output(err: &anyhow::Error) -> Value {
    json!({ "error": format!("{:#}", err) })
}

fn main() {
    let args = Args::parse();
    match read_input(&args).and_then(|raw| run(&args, &raw)) {
        Ok(output) => println!("{}", output),
        Err(err) => {
            println!("{}", error_output(&err));
            std::process::exit(1);
        }
    }
}
