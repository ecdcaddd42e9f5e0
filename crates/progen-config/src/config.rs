//! Configuration structs with defaults and RON persistence.

use std::path::{Path, PathBuf};

use glam::Vec3;
use progen_terrain::{Biome, BiomeTable, DEFAULT_FALLBACK_COLOR, NoiseConfig, TerrainSettings};
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// File name used inside the config directory.
pub const CONFIG_FILE_NAME: &str = "config.ron";

/// Top-level configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    /// Noise field parameters. `width` and `height` are also the vertex grid size.
    pub noise: NoiseConfig,
    /// World span, height shaping, and island falloff.
    pub terrain: TerrainSettings,
    /// Biome bands used for vertex colors.
    pub biomes: BiomeSettings,
    /// Diagnostics.
    pub debug: DebugConfig,
}

/// Biome bands in priority order, plus the color for heights no band covers.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct BiomeSettings {
    /// Bands, checked first to last.
    pub bands: Vec<Biome>,
    /// Color for classification misses.
    pub fallback_color: Vec3,
}

impl Default for BiomeSettings {
    fn default() -> Self {
        Self {
            bands: BiomeTable::default_biomes(),
            fallback_color: DEFAULT_FALLBACK_COLOR,
        }
    }
}

impl BiomeSettings {
    /// Build a validated classification table.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::BiomeError`] for an inverted range or a repeated name.
    pub fn to_table(&self) -> Result<BiomeTable, ConfigError> {
        BiomeTable::with_biomes(self.bands.iter().cloned(), self.fallback_color)
            .map_err(ConfigError::BiomeError)
    }
}

/// Debug/development configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct DebugConfig {
    /// Log level override (e.g., "debug", "info", "warn").
    pub log_level: String,
    /// Directory to write heightmap and biome PNG previews into.
    pub preview_dir: Option<PathBuf>,
}

impl Default for DebugConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            preview_dir: None,
        }
    }
}

/// `<platform config dir>/progen`, if the platform has one.
pub fn default_config_dir() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("progen"))
}

// --- Load / Save / Reload ---

impl Config {
    /// Load config from the given directory, or create a default config file.
    pub fn load_or_create(config_dir: &Path) -> Result<Self, ConfigError> {
        let config_path = config_dir.join(CONFIG_FILE_NAME);

        if config_path.exists() {
            let config = Self::read(&config_path)?;
            log::info!("Loaded config from {}", config_path.display());
            Ok(config)
        } else {
            let config = Config::default();
            config.save(config_dir)?;
            log::info!("Created default config at {}", config_path.display());
            Ok(config)
        }
    }

    /// Save config to the given directory as `config.ron`.
    pub fn save(&self, config_dir: &Path) -> Result<(), ConfigError> {
        std::fs::create_dir_all(config_dir).map_err(ConfigError::WriteError)?;

        let config_path = config_dir.join(CONFIG_FILE_NAME);
        let pretty = ron::ser::PrettyConfig::new()
            .depth_limit(4)
            .separate_tuple_members(false)
            .enumerate_arrays(false);

        let serialized =
            ron::ser::to_string_pretty(self, pretty).map_err(ConfigError::SerializeError)?;

        std::fs::write(&config_path, serialized).map_err(ConfigError::WriteError)?;
        log::debug!("Saved config to {}", config_path.display());
        Ok(())
    }

    /// Hot-reload: returns `Some(new_config)` if the file changed, `None` otherwise.
    pub fn reload(&self, config_dir: &Path) -> Result<Option<Self>, ConfigError> {
        let new_config = Self::read(&config_dir.join(CONFIG_FILE_NAME))?;

        if &new_config != self {
            log::info!("Config reloaded with changes");
            Ok(Some(new_config))
        } else {
            Ok(None)
        }
    }

    fn read(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path).map_err(ConfigError::ReadError)?;
        ron::from_str(&contents).map_err(ConfigError::ParseError)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use progen_terrain::HeightCurve;

    #[test]
    fn test_defaults_match_reference_terrain() {
        let config = Config::default();
        assert_eq!((config.noise.width, config.noise.height), (256, 256));
        assert_eq!(config.noise.seed, 21);
        assert_eq!(config.noise.octaves, 4);
        assert_eq!(config.terrain.span_width, 10.0);
        assert!(!config.terrain.use_falloff);
        assert_eq!(config.terrain.curve, HeightCurve::LINEAR);
        assert_eq!(config.biomes.bands.len(), 4);
        assert_eq!(config.debug.log_level, "info");
    }

    #[test]
    fn test_default_config_serializes() {
        let config = Config::default();
        let ron_str =
            ron::ser::to_string_pretty(&config, ron::ser::PrettyConfig::new().depth_limit(4))
                .unwrap();
        assert!(ron_str.contains("seed: 21"));
        assert!(ron_str.contains("\"water\""));
    }

    #[test]
    fn test_config_roundtrip() {
        let config = Config::default();
        let ron_str = ron::to_string(&config).unwrap();
        let deserialized: Config = ron::from_str(&ron_str).unwrap();
        assert_eq!(config, deserialized);
    }

    #[test]
    fn test_missing_section_uses_default() {
        let config: Config = ron::from_str("(noise: (seed: 99), debug: ())").unwrap();
        assert_eq!(config.noise.seed, 99);
        assert_eq!(config.noise.octaves, 4);
        assert_eq!(config.biomes, BiomeSettings::default());
    }

    #[test]
    fn test_extra_field_ignored() {
        let result: Result<Config, _> = ron::from_str("(future_setting: true)");
        assert!(result.is_ok());
    }

    #[test]
    fn test_custom_bands_build_table() {
        let ron_str = r#"(biomes: (
            bands: [
                (name: "sea", lower: 0.0, upper: 0.5, color: (0.0, 0.0, 1.0)),
                (name: "hill", lower: 0.5, upper: 1.0, color: (0.0, 1.0, 0.0)),
            ],
            fallback_color: (1.0, 0.0, 1.0),
        ))"#;
        let config: Config = ron::from_str(ron_str).unwrap();
        let table = config.biomes.to_table().unwrap();
        assert_eq!(table.len(), 2);
        assert_eq!(table.classify(0.75), Vec3::Y);
        assert_eq!(table.fallback(), Vec3::new(1.0, 0.0, 1.0));
    }

    #[test]
    fn test_invalid_bands_rejected() {
        let mut settings = BiomeSettings::default();
        settings.bands.push(settings.bands[0].clone());
        assert!(matches!(
            settings.to_table(),
            Err(ConfigError::BiomeError(_))
        ));
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = Config::default();
        config.noise.seed = 1234;
        config.terrain.use_falloff = true;
        config.debug.preview_dir = Some(PathBuf::from("previews"));

        config.save(dir.path()).unwrap();
        let loaded = Config::load_or_create(dir.path()).unwrap();
        assert_eq!(config, loaded);
    }

    #[test]
    fn test_load_or_create_writes_default() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::load_or_create(dir.path()).unwrap();
        assert_eq!(config, Config::default());
        assert!(dir.path().join(CONFIG_FILE_NAME).exists());
    }

    #[test]
    fn test_reload_detects_changes() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::default();
        config.save(dir.path()).unwrap();

        let mut modified = config.clone();
        modified.noise.octaves = 6;
        modified.save(dir.path()).unwrap();

        let result = config.reload(dir.path()).unwrap();
        assert_eq!(result.map(|c| c.noise.octaves), Some(6));
    }

    #[test]
    fn test_reload_no_changes() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::default();
        config.save(dir.path()).unwrap();
        assert!(config.reload(dir.path()).unwrap().is_none());
    }

    #[test]
    fn test_invalid_ron_produces_error() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join(CONFIG_FILE_NAME), "{{not valid}}").unwrap();
        assert!(matches!(
            Config::load_or_create(dir.path()),
            Err(ConfigError::ParseError(_))
        ));
    }
}
