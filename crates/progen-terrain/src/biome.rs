//! Elevation biome bands and point classification.
//!
//! A [`BiomeTable`] is an ordered list of closed height ranges, each with a
//! display color. Classification scans in registration order and the first
//! band whose range contains the height wins; heights that fall between
//! bands get the table's fallback color.

use glam::Vec3;
use hashbrown::HashMap;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::TerrainError;

/// Color used for heights that match no band in the default table (sandy shore).
pub const DEFAULT_FALLBACK_COLOR: Vec3 = Vec3::new(0.76, 0.7, 0.5);

/// A named elevation band `[lower, upper]` with a solid color.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Biome {
    name: String,
    lower: f64,
    upper: f64,
    color: Vec3,
}

impl Biome {
    /// Create a band.
    ///
    /// # Errors
    ///
    /// Returns [`TerrainError::InvalidBiomeRange`] if a bound is not finite or
    /// `lower > upper`.
    pub fn new(
        name: impl Into<String>,
        lower: f64,
        upper: f64,
        color: Vec3,
    ) -> Result<Self, TerrainError> {
        let biome = Self {
            name: name.into(),
            lower,
            upper,
            color,
        };
        biome.validate()?;
        Ok(biome)
    }

    fn validate(&self) -> Result<(), TerrainError> {
        if !self.lower.is_finite() || !self.upper.is_finite() || self.lower > self.upper {
            return Err(TerrainError::InvalidBiomeRange {
                name: self.name.clone(),
                lower: self.lower,
                upper: self.upper,
            });
        }
        Ok(())
    }

    /// Band name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Inclusive lower bound.
    pub fn lower(&self) -> f64 {
        self.lower
    }

    /// Inclusive upper bound.
    pub fn upper(&self) -> f64 {
        self.upper
    }

    /// Display color, RGB in `[0, 1]`.
    pub fn color(&self) -> Vec3 {
        self.color
    }

    /// `lower <= height <= upper`.
    pub fn contains(&self, height: f64) -> bool {
        self.lower <= height && height <= self.upper
    }
}

/// Ordered set of biome bands with a fallback color for misses.
#[derive(Clone, Debug)]
pub struct BiomeTable {
    biomes: Vec<Biome>,
    name_to_index: HashMap<String, usize>,
    fallback: Vec3,
}

impl BiomeTable {
    /// Create an empty table that classifies everything as `fallback`.
    pub fn new(fallback: Vec3) -> Self {
        Self {
            biomes: Vec::new(),
            name_to_index: HashMap::new(),
            fallback,
        }
    }

    /// Build a table from bands in priority order.
    ///
    /// # Errors
    ///
    /// Fails on the first invalid range or duplicate name.
    pub fn with_biomes(
        biomes: impl IntoIterator<Item = Biome>,
        fallback: Vec3,
    ) -> Result<Self, TerrainError> {
        let mut table = Self::new(fallback);
        for biome in biomes {
            table.push(biome)?;
        }
        Ok(table)
    }

    /// The water / grass / land / snow bands of the default terrain.
    pub fn default_biomes() -> Vec<Biome> {
        vec![
            Biome {
                name: "water".into(),
                lower: 0.0,
                upper: 0.3,
                color: Vec3::new(0.12, 0.35, 0.75),
            },
            Biome {
                name: "grass".into(),
                lower: 0.31,
                upper: 0.6,
                color: Vec3::new(0.24, 0.6, 0.2),
            },
            Biome {
                name: "land".into(),
                lower: 0.61,
                upper: 0.89,
                color: Vec3::new(0.45, 0.35, 0.22),
            },
            Biome {
                name: "snow".into(),
                lower: 0.9,
                upper: 1.0,
                color: Vec3::new(0.95, 0.95, 0.97),
            },
        ]
    }

    /// Append a band at the lowest priority, returning its index.
    ///
    /// # Errors
    ///
    /// Returns [`TerrainError::InvalidBiomeRange`] for a malformed range and
    /// [`TerrainError::DuplicateBiome`] if the name is taken.
    pub fn push(&mut self, biome: Biome) -> Result<usize, TerrainError> {
        biome.validate()?;
        if self.name_to_index.contains_key(biome.name()) {
            return Err(TerrainError::DuplicateBiome(biome.name.clone()));
        }
        if let Some(last) = self.biomes.last()
            && biome.lower < last.lower
        {
            debug!(
                biome = biome.name(),
                previous = last.name(),
                "biome registered below its predecessor; earlier bands take priority"
            );
        }
        let index = self.biomes.len();
        self.name_to_index.insert(biome.name.clone(), index);
        self.biomes.push(biome);
        Ok(index)
    }

    /// Index of the first band containing `height`, or `None` on a miss.
    pub fn classify_index(&self, height: f64) -> Option<usize> {
        self.biomes.iter().position(|b| b.contains(height))
    }

    /// Color of the first band containing `height`, or the fallback color.
    pub fn classify(&self, height: f64) -> Vec3 {
        self.classify_index(height)
            .map_or(self.fallback, |i| self.biomes[i].color)
    }

    /// Band at `index`, if any.
    pub fn get(&self, index: usize) -> Option<&Biome> {
        self.biomes.get(index)
    }

    /// Look up a band index by name.
    pub fn lookup_by_name(&self, name: &str) -> Option<usize> {
        self.name_to_index.get(name).copied()
    }

    /// Bands in priority order.
    pub fn iter(&self) -> impl Iterator<Item = &Biome> {
        self.biomes.iter()
    }

    /// Color returned for heights outside every band.
    pub fn fallback(&self) -> Vec3 {
        self.fallback
    }

    /// Replace the fallback color.
    pub fn set_fallback(&mut self, color: Vec3) {
        self.fallback = color;
    }

    /// Number of bands.
    pub fn len(&self) -> usize {
        self.biomes.len()
    }

    /// Returns `true` if the table has no bands.
    pub fn is_empty(&self) -> bool {
        self.biomes.is_empty()
    }
}

impl Default for BiomeTable {
    fn default() -> Self {
        let mut table = Self::new(DEFAULT_FALLBACK_COLOR);
        for biome in Self::default_biomes() {
            let index = table.biomes.len();
            table.name_to_index.insert(biome.name.clone(), index);
            table.biomes.push(biome);
        }
        table
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn color_of(table: &BiomeTable, name: &str) -> Vec3 {
        table
            .get(table.lookup_by_name(name).unwrap())
            .unwrap()
            .color()
    }

    #[test]
    fn test_default_table_order() {
        let table = BiomeTable::default();
        let names: Vec<&str> = table.iter().map(Biome::name).collect();
        assert_eq!(names, ["water", "grass", "land", "snow"]);
        assert_eq!(table.len(), 4);
    }

    #[test]
    fn test_classify_band_interiors() {
        let table = BiomeTable::default();
        assert_eq!(table.classify(0.1), color_of(&table, "water"));
        assert_eq!(table.classify(0.45), color_of(&table, "grass"));
        assert_eq!(table.classify(0.75), color_of(&table, "land"));
        assert_eq!(table.classify(0.95), color_of(&table, "snow"));
    }

    #[test]
    fn test_bounds_are_inclusive() {
        let table = BiomeTable::default();
        assert_eq!(table.classify_index(0.0), Some(0));
        assert_eq!(table.classify_index(0.3), Some(0));
        assert_eq!(table.classify_index(0.31), Some(1));
        assert_eq!(table.classify_index(1.0), Some(3));
    }

    #[test]
    fn test_gaps_fall_back() {
        let table = BiomeTable::default();
        for h in [0.305, 0.605, 0.895] {
            assert_eq!(table.classify_index(h), None, "{h} should miss");
            assert_eq!(table.classify(h), DEFAULT_FALLBACK_COLOR);
        }
    }

    #[test]
    fn test_fine_sampling_matches_at_most_once() {
        let table = BiomeTable::default();
        let mut misses = 0;
        for i in 0..=10_000 {
            let h = i as f64 / 10_000.0;
            let matches = table.iter().filter(|b| b.contains(h)).count();
            assert!(matches <= 1, "height {h} matched {matches} bands");
            if matches == 0 {
                misses += 1;
                let in_gap = (h > 0.3 && h < 0.31)
                    || (h > 0.6 && h < 0.61)
                    || (h > 0.89 && h < 0.9);
                assert!(in_gap, "height {h} missed outside a documented gap");
            }
        }
        assert!(misses > 0);
    }

    #[test]
    fn test_lower_bound_is_enforced() {
        // An upper-bound-only test would place 0.1 in "high" because
        // 0.1 - 0.5 <= 0.5 - 0.5. The closed interval test rejects it.
        let table = BiomeTable::with_biomes(
            [Biome::new("high", 0.5, 1.0, Vec3::ONE).unwrap()],
            Vec3::ZERO,
        )
        .unwrap();
        assert_eq!(table.classify_index(0.1), None);
        assert_eq!(table.classify(0.1), Vec3::ZERO);
        assert_eq!(table.classify_index(0.7), Some(0));
    }

    #[test]
    fn test_below_zero_misses_default_table() {
        let table = BiomeTable::default();
        assert_eq!(table.classify_index(-0.2), None);
    }

    #[test]
    fn test_first_match_wins_on_overlap() {
        let table = BiomeTable::with_biomes(
            [
                Biome::new("a", 0.0, 0.6, Vec3::X).unwrap(),
                Biome::new("b", 0.4, 1.0, Vec3::Y).unwrap(),
            ],
            Vec3::ZERO,
        )
        .unwrap();
        assert_eq!(table.classify(0.5), Vec3::X);
        assert_eq!(table.classify(0.7), Vec3::Y);
    }

    #[test]
    fn test_inverted_range_rejected() {
        let err = Biome::new("bad", 0.8, 0.2, Vec3::ONE).unwrap_err();
        assert!(matches!(err, TerrainError::InvalidBiomeRange { .. }));
        assert!(Biome::new("nan", f64::NAN, 0.2, Vec3::ONE).is_err());
    }

    #[test]
    fn test_duplicate_name_rejected() {
        let mut table = BiomeTable::default();
        let result = table.push(Biome::new("water", 0.0, 0.1, Vec3::ONE).unwrap());
        assert_eq!(result, Err(TerrainError::DuplicateBiome("water".into())));
        assert_eq!(table.len(), 4);
    }

    #[test]
    fn test_deserialized_band_validated_on_push() {
        let biome: Biome =
            ron::from_str("(name: \"odd\", lower: 0.9, upper: 0.1, color: (1.0, 0.0, 0.0))")
                .unwrap();
        let mut table = BiomeTable::new(Vec3::ZERO);
        assert!(table.push(biome).is_err());
    }

    #[test]
    fn test_empty_table_uses_fallback() {
        let mut table = BiomeTable::new(Vec3::X);
        assert!(table.is_empty());
        assert_eq!(table.classify(0.5), Vec3::X);
        table.set_fallback(Vec3::Y);
        assert_eq!(table.fallback(), Vec3::Y);
    }
}
