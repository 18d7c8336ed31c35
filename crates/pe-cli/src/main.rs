#![allow(clippy::nursery)]
#![allow(clippy::pedantic)]

use anyhow::Context;
use clap::Parser;

mod bootstrap;
mod cli;
mod commands;
mod context;
mod output;
mod progress;
mod ui;
mod view;
mod write_lock;

fn main() {
    if let Err(error) = run() {
        eprintln!("pereview error: {error:#}");
        std::process::exit(1);
    }
}

fn run() -> anyhow::Result<()> {
    let cli = cli::Cli::parse();
    init_tracing(cli.quiet, cli.verbose)?;

    let flags = cli.global_flags();
    ui::init(&flags, matches!(cli.command, cli::Commands::Review(_)));

    let config = bootstrap::load_config()?;

    if matches!(cli.command, cli::Commands::Config) {
        return commands::config::handle(&config, &flags);
    }

    context::warn_unconfigured(&config);
    let dataset_path = bootstrap::resolve_dataset_path(&flags, &config)?;

    let command = cli.command;
    let write_lock = if command.writes_dataset() {
        Some(write_lock::acquire_for_dataset(
            &dataset_path,
            config.review.lock_timeout(),
        )?)
    } else {
        None
    };

    let mut ctx = context::AppContext::init(dataset_path, config)
        .context("failed to initialize pereview")?;

    let result = commands::dispatch::dispatch(&command, &mut ctx, &flags);
    drop(write_lock);
    result
}

fn init_tracing(quiet: bool, verbose: bool) -> anyhow::Result<()> {
    let level = if quiet {
        "error"
    } else if verbose {
        "debug"
    } else {
        "warn"
    };

    let filter = tracing_subscriber::EnvFilter::try_from_env("PEREVIEW_LOG")
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|error| anyhow::anyhow!("failed to initialize tracing subscriber: {error}"))?;

    Ok(())
}
