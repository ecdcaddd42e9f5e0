//! Command-line argument parsing.

use std::path::PathBuf;

use clap::Parser;
use progen_terrain::CurvePreset;

use crate::Config;

/// Procedural terrain generator command-line arguments.
///
/// CLI values override settings loaded from `config.ron`.
#[derive(Parser, Debug, Default)]
#[command(name = "progen", about = "Procedural terrain generator")]
pub struct CliArgs {
    /// Seed for octave offsets.
    #[arg(long)]
    pub seed: Option<u64>,

    /// Noise scale (cells per noise unit).
    #[arg(long)]
    pub scale: Option<f64>,

    /// Number of noise octaves.
    #[arg(long)]
    pub octaves: Option<u32>,

    /// Amplitude multiplier between octaves.
    #[arg(long)]
    pub persistence: Option<f64>,

    /// Frequency multiplier between octaves.
    #[arg(long)]
    pub lacunarity: Option<f64>,

    /// Noise offset along x.
    #[arg(long, allow_negative_numbers = true)]
    pub offset_x: Option<f64>,

    /// Noise offset along y.
    #[arg(long, allow_negative_numbers = true)]
    pub offset_y: Option<f64>,

    /// Vertex grid columns.
    #[arg(long)]
    pub grid_width: Option<usize>,

    /// Vertex grid rows.
    #[arg(long)]
    pub grid_length: Option<usize>,

    /// Subtract the island falloff mask.
    #[arg(long)]
    pub falloff: Option<bool>,

    /// Multiplier applied to curved heights.
    #[arg(long)]
    pub height_multiplier: Option<f64>,

    /// Height curve preset (linear, ease_in_sine, ease_out_cubic, ...).
    #[arg(long)]
    pub curve: Option<CurvePreset>,

    /// Log level (error, warn, info, debug, trace).
    #[arg(long)]
    pub log_level: Option<String>,

    /// Path to config directory (overrides default location).
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Write heightmap and biome PNG previews into this directory.
    #[arg(long)]
    pub preview: Option<PathBuf>,
}

impl Config {
    /// Apply CLI overrides to a loaded config.
    pub fn apply_cli_overrides(&mut self, args: &CliArgs) {
        if let Some(seed) = args.seed {
            self.noise.seed = seed;
        }
        if let Some(scale) = args.scale {
            self.noise.scale = scale;
        }
        if let Some(octaves) = args.octaves {
            self.noise.octaves = octaves;
        }
        if let Some(p) = args.persistence {
            self.noise.persistence = p;
        }
        if let Some(l) = args.lacunarity {
            self.noise.lacunarity = l;
        }
        if let Some(x) = args.offset_x {
            self.noise.offset.x = x;
        }
        if let Some(y) = args.offset_y {
            self.noise.offset.y = y;
        }
        if let Some(w) = args.grid_width {
            self.noise.width = w;
        }
        if let Some(h) = args.grid_length {
            self.noise.height = h;
        }
        if let Some(falloff) = args.falloff {
            self.terrain.use_falloff = falloff;
        }
        if let Some(m) = args.height_multiplier {
            self.terrain.height_multiplier = m;
        }
        if let Some(preset) = args.curve {
            self.terrain.curve = preset.curve();
        }
        if let Some(ref level) = args.log_level {
            self.debug.log_level = level.clone();
        }
        if let Some(ref dir) = args.preview {
            self.debug.preview_dir = Some(dir.clone());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_override() {
        let mut config = Config::default();
        let args = CliArgs {
            seed: Some(7),
            grid_width: Some(64),
            falloff: Some(true),
            curve: Some(CurvePreset::EaseInCubic),
            ..Default::default()
        };
        config.apply_cli_overrides(&args);
        assert_eq!(config.noise.seed, 7);
        assert_eq!(config.noise.width, 64);
        assert!(config.terrain.use_falloff);
        assert_eq!(config.terrain.curve, CurvePreset::EaseInCubic.curve());
        // Non-overridden fields retain defaults
        assert_eq!(config.noise.height, 256);
        assert_eq!(config.noise.octaves, 4);
    }

    #[test]
    fn test_cli_no_override() {
        let original = Config::default();
        let mut config = Config::default();
        config.apply_cli_overrides(&CliArgs::default());
        assert_eq!(config, original);
    }

    #[test]
    fn test_parse_flags() {
        let args = CliArgs::try_parse_from([
            "progen",
            "--seed",
            "5",
            "--offset-x",
            "-2.5",
            "--curve",
            "ease-out-sine",
            "--falloff",
            "true",
            "--preview",
            "out",
        ])
        .unwrap();
        assert_eq!(args.seed, Some(5));
        assert_eq!(args.offset_x, Some(-2.5));
        assert_eq!(args.curve, Some(CurvePreset::EaseOutSine));
        assert_eq!(args.falloff, Some(true));
        assert_eq!(args.preview, Some(PathBuf::from("out")));
    }

    #[test]
    fn test_unknown_curve_rejected() {
        assert!(CliArgs::try_parse_from(["progen", "--curve", "wobbly"]).is_err());
    }
}
