//! End-to-end terrain generation.

use progen_terrain::{
    BiomeTable, CurvedField, FalloffMask, FractalSampler, HeightField, NoiseConfig,
    NormalizedField, ShapedField, TerrainSettings,
};
use tracing::{info, instrument};

use crate::builder::{GridSpec, MeshBuilder};
use crate::error::MeshError;
use crate::mesh::Mesh;

/// Every stage of one generation run.
#[derive(Clone, Debug)]
pub struct GeneratedTerrain {
    /// Fractal noise normalized to `[0, 1]`.
    pub normalized: NormalizedField,
    /// Island mask, present when falloff was enabled.
    pub falloff: Option<HeightField>,
    /// Normalized heights minus the mask. Biome colors are classified from this.
    pub shaped: ShapedField,
    /// World-space heights after the curve and multiplier.
    pub heights: CurvedField,
    /// The finished mesh.
    pub mesh: Mesh,
}

/// Runs noise sampling, island shaping, height curving, and meshing.
///
/// Each call builds everything from scratch; nothing is cached between runs.
#[derive(Clone, Debug, Default)]
pub struct TerrainGenerator {
    sampler: FractalSampler,
    falloff: FalloffMask,
    biomes: BiomeTable,
}

impl TerrainGenerator {
    /// Create a generator with the given biome table.
    pub fn new(biomes: BiomeTable) -> Self {
        Self {
            sampler: FractalSampler::new(),
            falloff: FalloffMask::default(),
            biomes,
        }
    }

    /// Replace the island mask shape.
    pub fn with_falloff(mut self, falloff: FalloffMask) -> Self {
        self.falloff = falloff;
        self
    }

    /// The biome table used for vertex colors.
    pub fn biomes(&self) -> &BiomeTable {
        &self.biomes
    }

    /// Swap in a new biome table.
    pub fn set_biomes(&mut self, biomes: BiomeTable) {
        self.biomes = biomes;
    }

    /// Generate terrain for a `noise.width x noise.height` vertex grid.
    ///
    /// # Errors
    ///
    /// Configuration errors (grid smaller than 2x2, zero octaves, too many
    /// vertices) are reported before any field is allocated.
    #[instrument(skip_all, fields(seed = noise.seed, width = noise.width, height = noise.height))]
    pub fn generate(
        &self,
        noise: &NoiseConfig,
        settings: &TerrainSettings,
    ) -> Result<GeneratedTerrain, MeshError> {
        let grid = GridSpec::new(
            noise.width,
            noise.height,
            settings.span_width,
            settings.span_length,
        )?;
        noise.validate()?;

        let normalized = self.sampler.generate(noise)?;
        let falloff = if settings.use_falloff {
            Some(self.falloff.generate(noise.width, noise.height)?)
        } else {
            None
        };
        let shaped = normalized.shape(falloff.as_ref())?;
        let heights = shaped.curve(&settings.curve, settings.height_multiplier);
        let mesh = MeshBuilder::new(grid).build(&shaped, &heights, &self.biomes)?;

        info!(
            vertices = mesh.vertex_count(),
            triangles = mesh.triangle_count(),
            falloff = settings.use_falloff,
            "generated terrain"
        );
        Ok(GeneratedTerrain {
            normalized,
            falloff,
            shaped,
            heights,
            mesh,
        })
    }
}
