#![forbid(unsafe_code)]

use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use todomvc_app::{ConfigError, TodoConfig, TodoStore};
use todomvc_demo::{Command, Outcome, Screen, Session, render};
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

/// Keep a to-do list from the terminal.
#[derive(Debug, Parser)]
#[command(name = "todomvc", version, about)]
struct Args {
    /// JSON config file (overrides TODOMVC_CONFIG).
    #[arg(long)]
    config: Option<PathBuf>,
    /// Route to start on, e.g. /active.
    #[arg(long)]
    route: Option<String>,
    /// Log filter directive, e.g. debug or todomvc_runtime=trace.
    #[arg(long)]
    log: Option<String>,
}

fn load_config(args: &Args) -> Result<TodoConfig, ConfigError> {
    let mut config = match &args.config {
        Some(path) => TodoConfig::from_file(path)?.with_env_from(|key| std::env::var(key).ok())?,
        None => TodoConfig::load()?,
    };
    if let Some(route) = &args.route {
        config.initial_route.clone_from(route);
    }
    if let Some(log) = &args.log {
        config.log_filter.clone_from(log);
    }
    config.validate()?;
    Ok(config)
}

fn init_tracing(filter: &str) {
    let filter = EnvFilter::try_new(filter).unwrap_or_else(|err| {
        eprintln!("ignoring log filter '{filter}': {err}");
        EnvFilter::new("warn")
    });
    tracing_subscriber::fmt()
        .compact()
        .with_target(false)
        .with_writer(io::stderr)
        .with_env_filter(filter)
        .init();
}

fn run(session: &Session, screen: &Screen) -> io::Result<()> {
    let stdin = io::stdin();
    let mut stdout = io::stdout().lock();

    if screen.take_dirty() {
        write!(stdout, "{}", render(session.store()))?;
    }
    for line in stdin.lock().lines() {
        let line = line?;
        let command = match Command::parse(&line) {
            Ok(Some(command)) => command,
            Ok(None) => continue,
            Err(err) => {
                writeln!(stdout, "error: {err}")?;
                continue;
            }
        };
        match session.execute(command) {
            Ok(Outcome::Quit) => break,
            Ok(Outcome::Continue(Some(message))) => writeln!(stdout, "{message}")?,
            Ok(Outcome::Continue(None)) => {}
            Err(err) => {
                warn!(%err, "command rejected");
                writeln!(stdout, "error: {err}")?;
            }
        }
        if screen.take_dirty() {
            write!(stdout, "{}", render(session.store()))?;
        }
        stdout.flush()?;
    }
    Ok(())
}

fn main() -> ExitCode {
    let args = Args::parse();
    let config = match load_config(&args) {
        Ok(config) => config,
        Err(err) => {
            eprintln!("todomvc: {err}");
            return ExitCode::from(2);
        }
    };
    init_tracing(&config.log_filter);
    info!(route = %config.initial_route, "starting");

    let store = TodoStore::from_config(&config);
    let screen = Screen::attach(&store);
    let session = Session::new(store);

    match run(&session, &screen) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!(%err, "i/o failure");
            ExitCode::FAILURE
        }
    }
}
