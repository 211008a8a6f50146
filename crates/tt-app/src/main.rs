use anyhow::Result;
use clap::Parser;
use tt_score::RallyScorer;

pub mod cli;
pub mod replay;
pub mod trace;

fn main() -> Result<()> {
    // 1. Parse CLI
    let cli = cli::Cli::parse();

    // 2. Initialize logging
    env_logger::Builder::new()
        .filter_level(cli.log_level.parse().unwrap_or(log::LevelFilter::Warn))
        .init();

    // 3. Validate inputs
    cli.validate()?;

    // 4. Load the scoring configuration
    let config = match cli.config.as_deref() {
        Some(path) => tt_core::config::load_score_config(path)?,
        None => tt_core::config::ScoreConfig::default(),
    };

    // 5. Load the trace
    let samples = trace::load_trace(&cli.trace)?;
    log::info!(
        "loaded {} samples from {}",
        samples.len(),
        cli.trace.display()
    );

    // 6. Replay it through the scorer
    let mut scorer = RallyScorer::new(config);
    let score = if cli.realtime {
        replay::run_realtime(&mut scorer, samples)?
    } else {
        replay::run_batch(&mut scorer, &samples)?
    };

    println!("final score  {score}");
    Ok(())
}
