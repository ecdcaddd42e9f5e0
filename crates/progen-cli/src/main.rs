//! Headless terrain generator.
//!
//! Configuration is loaded from `config.ron` and can be overridden via CLI flags.
//! Run with `cargo run -p progen-cli -- --seed 7 --falloff true --preview out`
//! to generate an island and write PNG previews into `out/`.

mod preview;
mod summary;

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use progen_config::{CliArgs, Config, ConfigError, default_config_dir};
use progen_mesh::{MeshError, TerrainGenerator};
use progen_terrain::TerrainError;
use tracing::{error, info, warn};

use crate::preview::write_previews;
use crate::summary::TerrainSummary;

#[derive(Debug, thiserror::Error)]
enum RunError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Mesh(#[from] MeshError),
    #[error(transparent)]
    Terrain(#[from] TerrainError),
    #[error("failed to write preview {path}: {source}")]
    Preview {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },
    #[error("failed to create preview directory: {0}")]
    PreviewDir(#[source] std::io::Error),
}

fn main() -> ExitCode {
    let args = CliArgs::parse();

    let Some(config_dir) = args.config.clone().or_else(default_config_dir) else {
        eprintln!("No config directory available; pass --config <dir>");
        return ExitCode::FAILURE;
    };

    let mut config = Config::load_or_create(&config_dir).unwrap_or_else(|e| {
        eprintln!("Failed to load config: {e}, using defaults");
        Config::default()
    });
    config.apply_cli_overrides(&args);

    let log_dir = config_dir.join("logs");
    if let Err(e) =
        progen_log::init_logging(Some(&log_dir), cfg!(debug_assertions), Some(&config))
    {
        eprintln!("Failed to initialize logging: {e}");
    }

    match run(&config) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!(error = %e, "terrain generation failed");
            ExitCode::FAILURE
        }
    }
}

fn run(config: &Config) -> Result<(), RunError> {
    let biomes = config.biomes.to_table()?;
    if !config.terrain.curve.is_monotonic() {
        warn!(
            curve = ?config.terrain.curve.control_points(),
            "height curve control points leave the unit square; output will be clamped"
        );
    }

    let generator = TerrainGenerator::new(biomes);
    let terrain = generator.generate(&config.noise, &config.terrain)?;

    let summary = TerrainSummary::collect(&terrain, generator.biomes());
    info!(
        vertices = summary.vertices,
        triangles = summary.triangles,
        min_height = summary.min_height,
        max_height = summary.max_height,
        "terrain ready"
    );
    for (name, count) in &summary.biome_counts {
        info!(biome = %name, vertices = count, "biome coverage");
    }
    if summary.fallback_count > 0 {
        info!(vertices = summary.fallback_count, "vertices between biome bands");
    }

    if let Some(dir) = &config.debug.preview_dir {
        for path in write_previews(dir, &terrain, generator.biomes())? {
            info!(path = %path.display(), "wrote preview");
        }
    }
    Ok(())
}
