use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use whiteboard_marker::cli::Cli;
use whiteboard_marker::core::Clock;
use whiteboard_marker::demo::Session;
use whiteboard_marker::SessionConfig;

// === Constants ===

const PROGRESS_EVERY_SECS: f32 = 1.0;

fn main() -> Result<()> {
    let cli = Cli::parse();

    let default_level = if cli.quiet { "warn" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level)).init();

    let mut config = match &cli.config {
        Some(path) => SessionConfig::load(path)?,
        None => SessionConfig::default(),
    };
    if let Some(ticks) = cli.ticks {
        config.ticks = ticks;
    }
    if let Some(dt) = cli.dt {
        config.dt = dt;
    }
    config.validate()?;

    let mut session = Session::new(&config).context("Failed to build whiteboard session")?;
    log::info!(
        "session: {} board(s), {} color pad(s), {} ticks of {:.4}s",
        config.boards.len(),
        config.color_pads.len(),
        config.ticks,
        config.dt
    );

    let mut clock = Clock::default();
    let period = Duration::from_secs_f32(config.dt);
    let progress_every = ((PROGRESS_EVERY_SECS / config.dt).round() as u32).max(1);

    for tick in 1..=config.ticks {
        // Realtime mode feeds measured deltas, otherwise the fixed step
        let dt = if cli.realtime { clock.tick_paced(period) } else { config.dt };
        session.step(dt);

        if tick % progress_every == 0 {
            let summary = session.summary();
            log::info!(
                "tick {}: {} strokes, {} stamps, {} commits, window {}",
                tick,
                summary.strokes,
                summary.stamps,
                summary.commits,
                session.window().remaining_label()
            );
        }
    }

    let summary = session.summary();
    println!(
        "ticks={} strokes={} stamps={} commits={} ink={} digest={:016x} pen={:?} window_expired={}",
        summary.ticks,
        summary.strokes,
        summary.stamps,
        summary.commits,
        summary.ink_coverage,
        summary.display_digest,
        summary.pen_color,
        summary.window_expired
    );

    Ok(())
}
