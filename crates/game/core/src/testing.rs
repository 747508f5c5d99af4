//! In-memory oracles for unit tests.

use std::collections::HashMap;

use crate::env::{CharacterOracle, RngOracle, SkillOracle};

#[derive(Debug, Default)]
pub struct StubSkills {
    levels: HashMap<String, (u32, u32)>,
}

impl StubSkills {
    pub fn with(mut self, skill: &str, level: u32, max_level: u32) -> Self {
        self.levels.insert(skill.to_string(), (level, max_level));
        self
    }
}

impl SkillOracle for StubSkills {
    fn level_of(&self, skill: &str) -> u32 {
        self.levels.get(skill).map_or(0, |(level, _)| *level)
    }

    fn max_level_of(&self, skill: &str) -> u32 {
        self.levels.get(skill).map_or(0, |(_, max)| *max)
    }
}

#[derive(Debug, Default)]
pub struct StubCharacter {
    pub money: u64,
    pub items: HashMap<String, u32>,
    pub stats: HashMap<String, f64>,
    pub tools: HashMap<String, f64>,
}

impl StubCharacter {
    pub fn with_money(mut self, money: u64) -> Self {
        self.money = money;
        self
    }

    pub fn with_item(mut self, item: &str, count: u32) -> Self {
        self.items.insert(item.to_string(), count);
        self
    }

    pub fn with_stat(mut self, stat: &str, value: f64) -> Self {
        self.stats.insert(stat.to_string(), value);
        self
    }

    pub fn with_tool(mut self, tool_type: &str, bonus: f64) -> Self {
        self.tools.insert(tool_type.to_string(), bonus);
        self
    }
}

impl CharacterOracle for StubCharacter {
    fn money(&self) -> u64 {
        self.money
    }

    fn item_count(&self, item: &str) -> u32 {
        self.items.get(item).copied().unwrap_or(0)
    }

    fn stat(&self, stat: &str) -> f64 {
        self.stats.get(stat).copied().unwrap_or(0.0)
    }

    fn equipped_tool_bonus(&self, tool_type: &str) -> f64 {
        self.tools.get(tool_type).copied().unwrap_or(0.0)
    }
}

/// Test oracle replaying scripted values, ignoring the seed.
///
/// Values are consumed in order and the script wraps around when exhausted.
#[derive(Debug, Default)]
pub struct FixedRng {
    values: Vec<u32>,
    cursor: std::sync::atomic::AtomicUsize,
}

impl FixedRng {
    pub fn new(values: Vec<u32>) -> Self {
        Self {
            values,
            cursor: std::sync::atomic::AtomicUsize::new(0),
        }
    }

    /// Script of unit rolls; each value in `[0, 1)` maps to the u32 that
    /// produces it through [`RngOracle::unit`].
    pub fn units(units: &[f64]) -> Self {
        let values = units
            .iter()
            .map(|u| (u.clamp(0.0, 0.999_999_999) * 4_294_967_296.0) as u32)
            .collect();
        Self::new(values)
    }
}

impl RngOracle for FixedRng {
    fn next_u32(&self, _seed: u64) -> u32 {
        if self.values.is_empty() {
            return 0;
        }
        let i = self
            .cursor
            .fetch_add(1, std::sync::atomic::Ordering::Relaxed);
        self.values[i % self.values.len()]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::env::RollStream;

    #[test]
    fn fixed_rng_replays_script() {
        let rng = FixedRng::units(&[0.25, 0.75]);
        let mut stream = RollStream::new(&rng, 0, 0, 0);
        assert!((stream.unit() - 0.25).abs() < 1e-9);
        assert!((stream.unit() - 0.75).abs() < 1e-9);
        assert!((stream.unit() - 0.25).abs() < 1e-9);
    }
}
