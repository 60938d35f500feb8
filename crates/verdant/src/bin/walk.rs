//! # Verdant Walk
//!
//! Headless walk through a streaming world.
//!
//! ```bash
//! # Stock world, default walk
//! walk
//!
//! # Custom world, 50k px out and back in 10 px steps
//! RUST_LOG=verdant_world=debug walk config/world.toml 50000 10
//! ```
//!
//! Exits non-zero if the config is bad or the sink and the generators
//! disagree at the end.

use std::process::ExitCode;

use tracing::{error, info};
use tracing_subscriber::EnvFilter;
use verdant::{run_walk, WalkScript};
use verdant_world::{LayerCollection, World, WorldConfig};

fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).with_target(true).init();
}

fn parse_number(arg: Option<String>, default: f32, what: &str) -> Result<f32, String> {
    match arg {
        None => Ok(default),
        Some(text) => text
            .parse::<f32>()
            .ok()
            .filter(|v| v.is_finite() && *v > 0.0)
            .ok_or_else(|| format!("{what} must be a positive number, got `{text}`")),
    }
}

fn main() -> ExitCode {
    init_logging();

    let mut args = std::env::args().skip(1);
    let config_path = args.next();
    let config = match config_path.as_deref() {
        Some(path) => WorldConfig::from_file(path),
        None => Ok(WorldConfig::default()),
    };
    let config = match config {
        Ok(config) => config,
        Err(err) => {
            error!(%err, "cannot load config");
            return ExitCode::FAILURE;
        }
    };

    let script = match (
        parse_number(args.next(), 20_000.0, "distance"),
        parse_number(args.next(), 5.0, "step"),
    ) {
        (Ok(distance), Ok(step)) => WalkScript::out_and_back(distance, step),
        (Err(reason), _) | (_, Err(reason)) => {
            error!(%reason, "bad arguments");
            return ExitCode::FAILURE;
        }
    };

    let mut world = match World::new(config) {
        Ok(world) => world,
        Err(err) => {
            error!(%err, "cannot build world");
            return ExitCode::FAILURE;
        }
    };

    info!(
        config = config_path.as_deref().unwrap_or("<defaults>"),
        seed = world.seed().value(),
        ticks = script.total_ticks(),
        "walking"
    );

    let mut sink = LayerCollection::new();
    let summary = run_walk(&mut world, &mut sink, &script);

    info!(
        ticks = summary.ticks,
        slides = summary.stats.slides,
        columns_created = summary.stats.columns_created,
        columns_removed = summary.stats.columns_removed,
        elements_created = summary.stats.elements_created,
        elements_removed = summary.stats.elements_removed,
        peak_live = summary.peak_live,
        "summary"
    );

    let torn_down = world.reset(&mut sink);
    info!(elements = torn_down.elements, remaining = sink.len(), "band torn down");

    if summary.is_clean() && sink.is_empty() {
        ExitCode::SUCCESS
    } else {
        error!(remaining = sink.len(), strays = sink.stray_removals().len(), "element leak");
        ExitCode::FAILURE
    }
}
