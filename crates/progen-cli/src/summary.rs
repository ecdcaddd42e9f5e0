//! Per-run statistics for the log.

use progen_mesh::GeneratedTerrain;
use progen_terrain::BiomeTable;

/// Counts and ranges describing one generated terrain.
#[derive(Debug, Clone, PartialEq)]
pub struct TerrainSummary {
    /// Mesh vertex count.
    pub vertices: usize,
    /// Mesh triangle count.
    pub triangles: usize,
    /// Lowest world-space vertex height.
    pub min_height: f64,
    /// Highest world-space vertex height.
    pub max_height: f64,
    /// Vertices per biome band, in table order.
    pub biome_counts: Vec<(String, usize)>,
    /// Vertices that matched no band.
    pub fallback_count: usize,
}

impl TerrainSummary {
    pub fn collect(terrain: &GeneratedTerrain, biomes: &BiomeTable) -> Self {
        let mut counts = vec![0usize; biomes.len()];
        let mut fallback_count = 0;
        let (w, h) = terrain.shaped.field().dimensions();
        for y in 0..h {
            for x in 0..w {
                match biomes.classify_index(terrain.shaped.unit_value(x, y)) {
                    Some(i) => counts[i] += 1,
                    None => fallback_count += 1,
                }
            }
        }

        let (min_height, max_height) = terrain.heights.field().min_max();
        Self {
            vertices: terrain.mesh.vertex_count(),
            triangles: terrain.mesh.triangle_count(),
            min_height,
            max_height,
            biome_counts: biomes
                .iter()
                .map(|b| b.name().to_string())
                .zip(counts)
                .collect(),
            fallback_count,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use progen_mesh::TerrainGenerator;
    use progen_terrain::{NoiseConfig, TerrainSettings};

    #[test]
    fn test_counts_cover_every_vertex() {
        let noise = NoiseConfig {
            width: 32,
            height: 20,
            scale: 8.0,
            ..Default::default()
        };
        let generator = TerrainGenerator::default();
        let terrain = generator
            .generate(&noise, &TerrainSettings::default())
            .unwrap();
        let summary = TerrainSummary::collect(&terrain, generator.biomes());

        assert_eq!(summary.vertices, 640);
        assert_eq!(summary.triangles, 2 * 31 * 19);
        let classified: usize = summary.biome_counts.iter().map(|(_, n)| n).sum();
        assert_eq!(classified + summary.fallback_count, 640);
        assert_eq!(summary.biome_counts[0].0, "water");
        assert!(summary.min_height >= 0.0 && summary.max_height <= 1.0);
        assert!(summary.max_height > summary.min_height);
    }
}
