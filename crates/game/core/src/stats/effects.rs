//! Stat effects applied by environmental hazards.
//!
//! Effects come in two kinds, following the same split as the bonus stack:
//! multipliers (`×0.5 hit chance`) and flats (`-2 health per tick`).
//! Several effect sets fold into one by multiplying multipliers and summing
//! flats per stat.

use std::collections::BTreeMap;

/// Combat-facing stats that environment effects can touch.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[derive(strum::EnumIter, strum::Display, strum::EnumString, strum::AsRefStr)]
#[strum(serialize_all = "snake_case")]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum CombatStat {
    AttackPower,
    AttackSpeed,
    HitChance,
    Evasion,
    BlockChance,
    Defense,
    Agility,
    Dexterity,
    Intuition,
    Magic,
    HealthRegenerationFlat,
    StaminaRegenerationFlat,
}

/// Multiplicative and additive effects keyed by stat.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct StatEffects {
    pub multipliers: BTreeMap<CombatStat, f64>,
    pub flats: BTreeMap<CombatStat, f64>,
}

impl StatEffects {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_multiplier(mut self, stat: CombatStat, multiplier: f64) -> Self {
        self.multipliers.insert(stat, multiplier);
        self
    }

    pub fn with_flat(mut self, stat: CombatStat, flat: f64) -> Self {
        self.flats.insert(stat, flat);
        self
    }

    pub fn is_empty(&self) -> bool {
        self.multipliers.is_empty() && self.flats.is_empty()
    }

    /// Multiplier for a stat; 1 when unaffected.
    pub fn multiplier(&self, stat: CombatStat) -> f64 {
        self.multipliers.get(&stat).copied().unwrap_or(1.0)
    }

    /// Flat offset for a stat; 0 when unaffected.
    pub fn flat(&self, stat: CombatStat) -> f64 {
        self.flats.get(&stat).copied().unwrap_or(0.0)
    }

    /// Folds `other` into `self`: multipliers compound, flats add.
    pub fn combine(&mut self, other: &StatEffects) {
        for (stat, multiplier) in &other.multipliers {
            *self.multipliers.entry(*stat).or_insert(1.0) *= multiplier;
        }
        for (stat, flat) in &other.flats {
            *self.flats.entry(*stat).or_insert(0.0) += flat;
        }
    }

    /// Applies the effects to a raw stat value: `value * multiplier + flat`.
    pub fn apply(&self, stat: CombatStat, value: f64) -> f64 {
        value * self.multiplier(stat) + self.flat(stat)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn combine_compounds_multipliers_and_sums_flats() {
        let mut total = StatEffects::new()
            .with_multiplier(CombatStat::HitChance, 0.5)
            .with_flat(CombatStat::HealthRegenerationFlat, -2.0);
        let other = StatEffects::new()
            .with_multiplier(CombatStat::HitChance, 0.8)
            .with_multiplier(CombatStat::Evasion, 0.9)
            .with_flat(CombatStat::HealthRegenerationFlat, -1.0);

        total.combine(&other);

        assert!((total.multiplier(CombatStat::HitChance) - 0.4).abs() < 1e-12);
        assert!((total.multiplier(CombatStat::Evasion) - 0.9).abs() < 1e-12);
        assert!((total.flat(CombatStat::HealthRegenerationFlat) + 3.0).abs() < 1e-12);
    }

    #[test]
    fn unaffected_stats_are_neutral() {
        let effects = StatEffects::new();
        assert_eq!(effects.multiplier(CombatStat::AttackPower), 1.0);
        assert_eq!(effects.flat(CombatStat::AttackPower), 0.0);
        assert_eq!(effects.apply(CombatStat::AttackPower, 12.0), 12.0);
    }
}
