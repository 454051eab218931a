mod operator;
mod render;

use anyhow::{Context, Result};
use std::{
    fs::{self, OpenOptions},
    io::{self, Write},
    sync::Mutex,
};

use ponzi_core::{
    config::{self, GameConfig},
    RngDecisions, RoundEngine,
};
use tracing::info;
use tracing_subscriber::{prelude::*, EnvFilter};

use operator::ConsoleOperator;

fn main() -> Result<()> {
    init_logging()?;

    let config_path = config::ensure_default_config()?;
    let config = GameConfig::load_from(&config_path)?;
    info!(path = %config_path.display(), seed = ?config.seed, "Configuration loaded");

    let stdin = io::stdin();
    let stdout = io::stdout();
    let mut console = ConsoleOperator::new(stdin.lock(), stdout.lock());

    let organizer = console.ask_organizer_name()?;
    let decisions = RngDecisions::from_seed(config.seed);
    let mut engine = RoundEngine::new(config, organizer.as_str(), decisions);

    render::intro(console.output(), &organizer)?;
    engine.start();

    while !engine.is_game_over() {
        let summary = engine.play_round(&mut console);
        console.check().context("failed to write round output")?;
        render::status(console.output(), &summary.report)?;
        render::history(console.output(), engine.state().history().recent())?;
        console.pause()?;
    }

    let summary = engine.summary();
    info!(
        rounds = engine.state().round() - 1,
        participants = summary.participants,
        peak = %summary.peak_treasury,
        "Game over"
    );
    render::summary(console.output(), &summary)?;
    writeln!(console.output())?;
    writeln!(console.output(), "Thanks for playing!")?;
    Ok(())
}

fn init_logging() -> Result<()> {
    let log_dir = std::env::current_dir()?.join("logs");
    fs::create_dir_all(&log_dir)?;
    let log_path = log_dir.join("ponzi.log");
    let log_file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&log_path)
        .with_context(|| format!("failed to open log file {}", log_path.display()))?;

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let file_layer = tracing_subscriber::fmt::layer()
        .with_target(true)
        .with_ansi(false)
        .compact()
        .with_writer(Mutex::new(log_file));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(file_layer)
        .init();

    Ok(())
}
