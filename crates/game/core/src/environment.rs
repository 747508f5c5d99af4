//! Environment effect aggregation.
//!
//! A zone's declared types fold into two penalty sets: the base penalty (the
//! hazard at full strength) and the hero penalty, discounted by the hero's
//! level in each stage's related skill.
//!
//! - multipliers: `m^(1 - level/max)`, so full at level 0 and neutral at max
//! - flats: `flat * (1 - level/max)^exponent`, tapering slower than multipliers

use std::collections::BTreeMap;

use crate::config::GameConfig;
use crate::encounter::ZoneType;
use crate::env::{Env, OracleError, TypeStage};
use crate::stats::StatEffects;

/// Penalties of a zone, before and after the hero's mitigation.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EnvironmentPenalties {
    pub base: StatEffects,
    pub hero: StatEffects,
}

/// Discounts a stage's effects by the hero's mastery of its related skill.
pub fn mitigate(effects: &StatEffects, mastery: f64, flat_exponent: f64) -> StatEffects {
    let remaining = 1.0 - mastery.clamp(0.0, 1.0);
    StatEffects {
        multipliers: effects
            .multipliers
            .iter()
            .map(|(stat, m)| (*stat, m.powf(remaining)))
            .collect(),
        flats: effects
            .flats
            .iter()
            .map(|(stat, flat)| (*stat, flat * remaining.powf(flat_exponent)))
            .collect(),
    }
}

/// Folds zone types into penalty sets using the oracles in `env`.
pub struct EnvironmentAggregator<'a> {
    env: Env<'a>,
    config: &'a GameConfig,
}

impl<'a> EnvironmentAggregator<'a> {
    pub fn new(env: Env<'a>, config: &'a GameConfig) -> Self {
        Self { env, config }
    }

    fn stage(&self, zone_type: &ZoneType) -> Result<&'a TypeStage, OracleError> {
        let location_type = self
            .env
            .location_types()?
            .location_type(&zone_type.kind)
            .ok_or_else(|| OracleError::LocationTypeNotFound(zone_type.kind.clone()))?;
        location_type
            .stage(zone_type.stage)
            .ok_or_else(|| OracleError::TypeStageNotFound {
                kind: zone_type.kind.clone(),
                stage: zone_type.stage,
            })
    }

    /// Base and hero penalties for a set of zone types.
    ///
    /// Types compound: multipliers multiply and flats add per stat.
    ///
    /// # Errors
    ///
    /// Returns [`OracleError`] when a type or stage is unknown or an oracle
    /// is missing.
    pub fn penalties(&self, types: &[ZoneType]) -> Result<EnvironmentPenalties, OracleError> {
        let skills = self.env.skills()?;
        let mut penalties = EnvironmentPenalties::default();

        for zone_type in types {
            let stage = self.stage(zone_type)?;
            let mastery = skills.mastery(&stage.related_skill);
            penalties.base.combine(&stage.effects);
            penalties.hero.combine(&mitigate(
                &stage.effects,
                mastery,
                self.config.flat_penalty_exponent,
            ));
        }

        Ok(penalties)
    }

    /// Skill xp earned per combat action, keyed by each stage's related skill.
    pub fn skill_xp(&self, types: &[ZoneType]) -> Result<BTreeMap<String, f64>, OracleError> {
        let mut xp = BTreeMap::new();
        for zone_type in types.iter().filter(|t| t.xp_gain > 0.0) {
            let stage = self.stage(zone_type)?;
            *xp.entry(stage.related_skill.clone()).or_insert(0.0) += zone_type.xp_gain;
        }
        Ok(xp)
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;
    use crate::env::LocationType;
    use crate::stats::CombatStat;
    use crate::testing::StubSkills;

    fn catalog() -> HashMap<String, LocationType> {
        let dark = LocationType {
            name: "dark".into(),
            stages: vec![
                TypeStage {
                    related_skill: "Night vision".into(),
                    description: String::new(),
                    effects: StatEffects::new()
                        .with_multiplier(CombatStat::HitChance, 0.5)
                        .with_multiplier(CombatStat::Evasion, 0.5),
                },
                TypeStage {
                    related_skill: "Night vision".into(),
                    description: String::new(),
                    effects: StatEffects::new().with_multiplier(CombatStat::HitChance, 0.25),
                },
            ],
        };
        let miasma = LocationType {
            name: "miasma".into(),
            stages: vec![TypeStage {
                related_skill: "Poison resistance".into(),
                description: String::new(),
                effects: StatEffects::new()
                    .with_multiplier(CombatStat::HitChance, 0.8)
                    .with_flat(CombatStat::HealthRegenerationFlat, -8.0),
            }],
        };
        [dark, miasma]
            .into_iter()
            .map(|t| (t.name.clone(), t))
            .collect()
    }

    fn zone_type(kind: &str, stage: u8) -> ZoneType {
        ZoneType {
            kind: kind.into(),
            stage,
            xp_gain: 2.0,
        }
    }

    fn penalties(skills: &StubSkills, types: &[ZoneType]) -> EnvironmentPenalties {
        let catalog = catalog();
        let config = GameConfig::default();
        let env = Env::empty()
            .with_skills(skills)
            .with_location_types(&catalog);
        EnvironmentAggregator::new(env, &config)
            .penalties(types)
            .unwrap()
    }

    #[test]
    fn mastered_skill_removes_multiplier() {
        let skills = StubSkills::default().with("Night vision", 10, 10);
        let result = penalties(&skills, &[zone_type("dark", 1)]);
        assert_eq!(result.hero.multiplier(CombatStat::HitChance), 1.0);
        assert_eq!(result.base.multiplier(CombatStat::HitChance), 0.5);
    }

    #[test]
    fn untrained_skill_keeps_full_multiplier() {
        let skills = StubSkills::default().with("Night vision", 0, 10);
        let result = penalties(&skills, &[zone_type("dark", 1)]);
        assert_eq!(result.hero.multiplier(CombatStat::HitChance), 0.5);
    }

    #[test]
    fn flats_taper_slower_than_multipliers() {
        let skills = StubSkills::default().with("Poison resistance", 5, 10);
        let result = penalties(&skills, &[zone_type("miasma", 1)]);
        let expected_flat = -8.0 * 0.5f64.powf(2.0 / 3.0);
        let flat = result.hero.flat(CombatStat::HealthRegenerationFlat);
        assert!((flat - expected_flat).abs() < 1e-9);
        // more than half the flat remains at half mastery
        assert!(flat.abs() > 4.0);
        assert!((result.hero.multiplier(CombatStat::HitChance) - 0.8f64.sqrt()).abs() < 1e-9);
    }

    #[test]
    fn types_compound() {
        let skills = StubSkills::default();
        let result = penalties(&skills, &[zone_type("dark", 2), zone_type("miasma", 1)]);
        assert!((result.base.multiplier(CombatStat::HitChance) - 0.2).abs() < 1e-12);
        assert_eq!(result.base.flat(CombatStat::HealthRegenerationFlat), -8.0);
    }

    #[test]
    fn unknown_stage_is_reported() {
        let catalog = catalog();
        let skills = StubSkills::default();
        let config = GameConfig::default();
        let env = Env::empty()
            .with_skills(&skills)
            .with_location_types(&catalog);
        let err = EnvironmentAggregator::new(env, &config)
            .penalties(&[zone_type("miasma", 3)])
            .unwrap_err();
        assert_eq!(
            err,
            OracleError::TypeStageNotFound {
                kind: "miasma".into(),
                stage: 3
            }
        );
    }

    #[test]
    fn skill_xp_sums_per_related_skill() {
        let catalog = catalog();
        let skills = StubSkills::default();
        let config = GameConfig::default();
        let env = Env::empty()
            .with_skills(&skills)
            .with_location_types(&catalog);
        let xp = EnvironmentAggregator::new(env, &config)
            .skill_xp(&[zone_type("dark", 1), zone_type("dark", 2), zone_type("miasma", 1)])
            .unwrap();
        assert_eq!(xp.get("Night vision"), Some(&4.0));
        assert_eq!(xp.get("Poison resistance"), Some(&2.0));
    }
}
