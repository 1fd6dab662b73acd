//! Lay out a scene file and print the resolved frames as JSON.
//!
//! Usage:
//!   trellis scene.json [--estimate] [--pretty] [--validate]
//!
//! Set `RUST_LOG=trellis=debug` (or `trace`) for pass-by-pass output.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use trellis::SceneError;
use trellis::scene::Scene;

#[derive(Parser, Debug)]
#[command(name = "trellis", version, about = "Run a flow layout scene and print the result")]
struct Args {
    /// Scene file (JSON)
    scene: PathBuf,

    /// Only measure nested containers instead of laying them out
    #[arg(long)]
    estimate: bool,

    /// Pretty-print the report
    #[arg(long)]
    pretty: bool,

    /// Reject configurations the engine would otherwise correct
    #[arg(long)]
    validate: bool,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    let mut scene = Scene::load(&args.scene)
        .with_context(|| format!("failed to load scene {}", args.scene.display()))?;
    if args.validate {
        scene.validate().map_err(SceneError::from)?;
    }
    scene.estimate |= args.estimate;

    tracing::info!(
        boxes = scene.root.items.len(),
        width = scene.available.width,
        height = scene.available.height,
        "running scene"
    );
    let report = scene.report();
    if !report.warnings.is_empty() {
        tracing::info!(count = report.warnings.len(), "layout corrected some inputs");
    }

    let json = if args.pretty {
        serde_json::to_string_pretty(&report)?
    } else {
        serde_json::to_string(&report)?
    };
    println!("{json}");
    Ok(())
}
