//! # fountain
//!
//! A particle fountain driven by a fixed-timestep tick loop. Particles are
//! emitted at the origin, pulled down by gravity, faded out over their
//! lifetime, and killed once they expire. A logging renderer reports the
//! group's state each frame.
//!
//! ```text
//! RUST_LOG=fountain=debug cargo run -p fountain -- --max-ticks 120
//! ```

mod controllers;
mod render;
mod tick;

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use controllers::{Emitter, Fade, Gravity, Lifetime};
use plume_group::{
    ControllerRegistry, GroupConfig, ParticleContext, shared_controller, shared_renderer,
    shared_system,
};
use render::LogRenderer;
use tick::{TickConfig, TickLoop};

#[derive(Parser)]
#[command(name = "fountain", about = "Particle fountain on a fixed tick")]
struct Args {
    /// Target ticks per second
    #[arg(long, default_value_t = 60.0, value_parser = parse_tick_rate)]
    tick_rate: f64,

    /// Number of ticks to run (0 = unlimited)
    #[arg(long, default_value_t = 300)]
    max_ticks: u64,

    /// Particles emitted per second
    #[arg(long, default_value_t = 40.0)]
    emit_rate: f32,

    /// Seconds a particle lives
    #[arg(long, default_value_t = 2.0)]
    lifetime: f32,

    /// JSON file with a group configuration
    #[arg(short, long)]
    config: Option<PathBuf>,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("fountain=info".parse()?))
        .init();

    let args = Args::parse();
    let group_config = match &args.config {
        Some(path) => load_config(path)?,
        None => GroupConfig::default(),
    };

    // Gravity applies to every group of the system.
    let mut registry = ControllerRegistry::new();
    registry.add_controller(shared_controller(Gravity::default()));
    let context = ParticleContext::new(shared_system(registry)).with_config(group_config);

    let group = context
        .group()
        .controller(shared_controller(Emitter::new(args.emit_rate)))
        .controller(shared_controller(Lifetime::new(args.lifetime)))
        .controller(shared_controller(Fade::new(args.lifetime)))
        .renderer(shared_renderer(LogRenderer::default()))
        .build()?;

    info!(group = %group.id(), "fountain starting");

    let mut tick_loop = TickLoop::new(
        TickConfig {
            tick_rate: args.tick_rate,
            max_ticks: args.max_ticks,
        },
        group,
    );
    tick_loop.run()?;

    info!(
        ticks = tick_loop.tick_id(),
        particles = tick_loop.group().len(),
        "fountain shut down"
    );
    Ok(())
}

fn parse_tick_rate(s: &str) -> Result<f64, String> {
    let rate: f64 = s.parse().map_err(|e| format!("{e}"))?;
    if rate.is_finite() && rate > 0.0 {
        Ok(rate)
    } else {
        Err(format!("expected a positive tick rate, got {s}"))
    }
}

fn load_config(path: &Path) -> Result<GroupConfig> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("reading config {}", path.display()))?;
    let config = serde_json::from_str(&text)
        .with_context(|| format!("parsing config {}", path.display()))?;
    info!(path = %path.display(), "loaded group config");
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tick_rate_must_be_positive() {
        assert_eq!(parse_tick_rate("30").unwrap(), 30.0);
        assert!(parse_tick_rate("0").is_err());
        assert!(parse_tick_rate("-1").is_err());
        assert!(parse_tick_rate("inf").is_err());
        assert!(parse_tick_rate("fast").is_err());
    }

    #[test]
    fn test_cli_rejects_zero_tick_rate() {
        assert!(Args::try_parse_from(["fountain", "--tick-rate", "0"]).is_err());
        let args = Args::try_parse_from(["fountain", "--tick-rate", "120"]).unwrap();
        assert_eq!(args.tick_rate, 120.0);
    }
}
