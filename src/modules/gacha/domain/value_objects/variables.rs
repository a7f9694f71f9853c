//! Draw tables
//!
//! Weights are percentages. One draw rolls once over the total weight and
//! walks the entries in declaration order.

use serde::Serialize;

use crate::modules::catalog::domain::value_objects::CharacterRole;
use crate::shared::utils::RandomSource;

/// Popularity every draw treats as the floor
pub const LOWEST_POPULARITY: u32 = 1000;

/// Popularity bounds: inclusive lower, optional inclusive upper
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PopularityRange {
    pub lower: u32,
    pub upper: Option<u32>,
}

impl PopularityRange {
    pub const fn new(lower: u32, upper: Option<u32>) -> Self {
        Self { lower, upper }
    }

    pub fn contains(&self, popularity: u32) -> bool {
        popularity >= self.lower && self.upper.map_or(true, |upper| popularity <= upper)
    }

    /// Whether the range starts above the lowest tier, making a role draw due
    pub fn excludes_lowest(&self) -> bool {
        self.lower > LOWEST_POPULARITY
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct WeightedTable<T> {
    entries: Vec<(u32, T)>,
}

impl<T: Clone> WeightedTable<T> {
    pub fn new(entries: Vec<(u32, T)>) -> Self {
        Self { entries }
    }

    pub fn total(&self) -> u32 {
        self.entries.iter().map(|(weight, _)| weight).sum()
    }

    /// Entry a roll in `0..total()` lands on
    pub fn pick(&self, roll: u32) -> Option<T> {
        let mut ceiling = 0;
        for (weight, value) in &self.entries {
            ceiling += weight;
            if roll < ceiling {
                return Some(value.clone());
            }
        }
        None
    }

    pub fn draw(&self, random: &dyn RandomSource) -> Option<T> {
        let total = self.total();
        if total == 0 {
            return None;
        }

        self.pick(random.below(total as usize) as u32)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct GachaVariables {
    pub roles: WeightedTable<CharacterRole>,
    pub ranges: WeightedTable<PopularityRange>,
}

impl Default for GachaVariables {
    fn default() -> Self {
        Self {
            roles: WeightedTable::new(vec![
                (10, CharacterRole::Main),
                (70, CharacterRole::Supporting),
                (20, CharacterRole::Background),
            ]),
            // whether a pull lands on the near or far end of a range is random
            ranges: WeightedTable::new(vec![
                (65, PopularityRange::new(LOWEST_POPULARITY, Some(50_000))),
                (22, PopularityRange::new(50_000, Some(100_000))),
                (9, PopularityRange::new(100_000, Some(200_000))),
                (3, PopularityRange::new(200_000, Some(400_000))),
                (1, PopularityRange::new(400_000, None)),
            ]),
        }
    }
}
