//! CLI entry point for the grade calculator.
//!
//! Provides a one-shot subcommand that computes the required final exam
//! score from command-line values, and an interactive session that
//! recalculates as inputs change.

mod render;

use crate::render::{FormView, ReplAction, TerminalSink};
use anyhow::Result;
use clap::{Parser, Subcommand};
use grade_calc::{
    controller::{DEFAULT_DEBOUNCE, run_session},
    events::ComponentField,
    output::{Report, print_json, print_text},
    session::Session,
};
use std::ffi::OsStr;
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::{Mutex, mpsc};
use tracing::{debug, info, warn};
use tracing_subscriber::{
    EnvFilter, Layer,
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    util::SubscriberInitExt,
};

#[derive(Parser)]
#[command(name = "grade_calc")]
#[command(about = "A tool to calculate required final exam scores", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run one calculation from command-line values
    Calculate {
        /// Course component as NAME:WEIGHT or NAME:WEIGHT:SCORE (repeatable)
        #[arg(short = 'c', long = "component", value_name = "NAME:WEIGHT[:SCORE]")]
        components: Vec<String>,

        /// Weight of the final exam as a percentage of the course grade
        #[arg(short = 'f', long)]
        final_weight: Option<f64>,

        /// Target overall grade as a percentage
        #[arg(short = 't', long)]
        target: Option<f64>,

        /// What-if score assumed for components without a score yet
        #[arg(short = 's', long, default_value_t = 0)]
        scenario: i64,

        /// Print the result as JSON instead of text
        #[arg(long, default_value_t = false)]
        json: bool,
    },
    /// Start an interactive session that recalculates as inputs change
    Interactive {
        /// Pause in milliseconds before an automatic recalculation
        #[arg(long)]
        debounce_ms: Option<u64>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok(); // Load .env file

    // Logging setup: colored stderr + JSON rolling log file
    let log_file_path =
        std::env::var("LOG_FILE_PATH").unwrap_or_else(|_| "logs/grade_calc.log".to_string());
    let log_dir = Path::new(&log_file_path)
        .parent()
        .unwrap_or(Path::new("logs"));
    let log_file_name = Path::new(&log_file_path)
        .file_name()
        .unwrap_or(OsStr::new("grade_calc.log"));

    let file_appender = tracing_appender::rolling::daily(log_dir, log_file_name);
    let (non_blocking_file, _file_guard) = tracing_appender::non_blocking(file_appender);

    let stderr_layer = fmt::layer()
        .with_target(true)
        .with_span_events(FmtSpan::CLOSE)
        .with_ansi(true)
        .with_writer(std::io::stderr)
        .with_filter(EnvFilter::from_env("RUST_LOG").add_directive("info".parse().unwrap()));

    let json_layer = fmt::layer()
        .json()
        .with_current_span(true)
        .with_span_list(true)
        .with_writer(non_blocking_file)
        .with_filter(EnvFilter::from_env("RUST_LOG_JSON").add_directive("debug".parse().unwrap()));

    tracing_subscriber::registry()
        .with(stderr_layer)
        .with(json_layer)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Calculate {
            components,
            final_weight,
            target,
            scenario,
            json,
        } => {
            one_shot(&components, final_weight, target, scenario, json)?;
        }
        Commands::Interactive { debounce_ms } => {
            interactive(debounce_ms).await?;
        }
    }

    Ok(())
}

/// Builds a session from command-line values and runs one calculation.
#[tracing::instrument(skip(components, json), fields(component_count = components.len()))]
fn one_shot(
    components: &[String],
    final_weight: Option<f64>,
    target: Option<f64>,
    scenario: i64,
    json: bool,
) -> Result<()> {
    let mut session = Session::new();

    for raw in components {
        let (name, weight, score) = parse_component_arg(raw)?;
        let id = session.add_component();
        session.edit_component(id, ComponentField::Name, name);
        session.edit_component(id, ComponentField::Weight, weight);
        if let Some(score) = score {
            session.edit_component(id, ComponentField::Score, score);
        }
    }

    if let Some(weight) = final_weight {
        session.set_final_weight(weight);
    }
    session.set_target_grade(target);
    session.set_scenario(scenario);

    let result = session.calculate();
    debug!(success = result.is_success(), "one-shot calculation done");

    let report = Report::new(session.total_weight(), result);
    if json {
        print_json(&report)?;
    } else {
        print_text(&report);
    }

    Ok(())
}

/// Splits a NAME:WEIGHT or NAME:WEIGHT:SCORE argument into its parts.
fn parse_component_arg(raw: &str) -> Result<(&str, &str, Option<&str>)> {
    let parts: Vec<&str> = raw.split(':').collect();
    match parts.as_slice() {
        &[name, weight] => Ok((name, weight, None)),
        &[name, weight, score] => Ok((name, weight, Some(score))),
        _ => anyhow::bail!(
            "component must be NAME:WEIGHT or NAME:WEIGHT:SCORE, got '{}'",
            raw
        ),
    }
}

/// Debounce resolution order: CLI flag, then GRADE_CALC_DEBOUNCE_MS, then
/// the built-in default.
fn resolve_debounce(flag_ms: Option<u64>) -> Duration {
    if let Some(ms) = flag_ms {
        return Duration::from_millis(ms);
    }
    match std::env::var("GRADE_CALC_DEBOUNCE_MS") {
        Ok(raw) => match raw.parse::<u64>() {
            Ok(ms) => Duration::from_millis(ms),
            Err(_) => {
                warn!(raw = %raw, "GRADE_CALC_DEBOUNCE_MS is not a number, using default");
                DEFAULT_DEBOUNCE
            }
        },
        Err(_) => DEFAULT_DEBOUNCE,
    }
}

/// Runs the interactive session: reads commands from stdin, forwards them
/// to the controller task and prints updates as they arrive.
#[tracing::instrument(skip_all)]
async fn interactive(debounce_ms: Option<u64>) -> Result<()> {
    let debounce = resolve_debounce(debounce_ms);
    info!(
        debounce_ms = debounce.as_millis() as u64,
        "starting interactive session"
    );

    let (tx, rx) = mpsc::channel(64);
    let view = Arc::new(Mutex::new(FormView::default()));
    let sink = TerminalSink::new(view.clone());

    let controller = tokio::spawn(run_session(Session::seeded(), rx, sink, debounce));

    render::print_help();

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        match render::parse_line(&line) {
            ReplAction::Engine(event) => {
                render::apply_local(&view, &event).await;
                if tx.send(event).await.is_err() {
                    break;
                }
            }
            ReplAction::Show => render::render_form(&view).await,
            ReplAction::Help => render::print_help(),
            ReplAction::Quit => break,
            ReplAction::Empty => {}
            ReplAction::Unknown(line) => {
                println!("unknown command: {} (try 'help')", line);
            }
        }
    }

    drop(tx);
    controller.await?;
    info!("interactive session closed");
    Ok(())
}
