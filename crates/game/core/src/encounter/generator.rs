//! Next-group selection and enemy materialization.

use crate::env::{EnemyTemplate, Env, OracleError, RollStream};
use crate::state::ZoneProgress;
use crate::stats::EnemyStats;

use super::{
    CombatZone, EncounterError, EnemyInstance, GenerationContext, GenerationHookRegistry,
    GenerationOverride,
};

/// Which rule picked the group.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum EncounterSource {
    /// Entry of the fixed sequence (clamped to the last one).
    Sequence { index: usize },
    /// Entry of the random pool.
    Pool { index: usize },
    Boss,
    Rare,
    /// Random group of `size` drawn from the enemy list.
    Default { size: u32 },
}

/// Enemy names chosen for the next fight, before materialization.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GroupSelection {
    pub source: EncounterSource,
    pub enemies: Vec<String>,
}

/// A spawned enemy group.
#[derive(Clone, Debug, PartialEq)]
pub struct Encounter {
    pub source: EncounterSource,
    pub enemies: Vec<EnemyInstance>,
}

/// Produces enemy groups for combat zones.
pub struct EncounterGenerator<'a> {
    env: Env<'a>,
    hooks: &'a GenerationHookRegistry,
}

impl<'a> EncounterGenerator<'a> {
    pub fn new(env: Env<'a>, hooks: &'a GenerationHookRegistry) -> Self {
        Self { env, hooks }
    }

    /// Spawns the next group for a zone.
    ///
    /// # Errors
    ///
    /// - [`EncounterError::ZoneLocked`] / [`EncounterError::ZoneFinished`]
    ///   when the zone cannot be fought in
    /// - [`EncounterError::Oracle`] when an enemy template is missing
    pub fn next_enemies(
        &self,
        zone: &CombatZone,
        progress: &ZoneProgress,
        rolls: &mut RollStream<'_>,
    ) -> Result<Encounter, EncounterError> {
        if !progress.is_unlocked {
            return Err(EncounterError::ZoneLocked {
                zone: zone.name().to_string(),
            });
        }
        if progress.is_finished {
            return Err(EncounterError::ZoneFinished {
                zone: zone.name().to_string(),
            });
        }

        let kills = progress.enemy_groups_killed;
        let selection = select_group(zone, kills, rolls);
        tracing::debug!(
            zone = zone.name(),
            kills,
            source = ?selection.source,
            enemies = ?selection.enemies,
            "selected enemy group"
        );

        let ctx = GenerationContext {
            zone: zone.name(),
            kills,
            clears: progress.clears(zone),
        };
        let enemies = selection
            .enemies
            .iter()
            .map(|name| self.instantiate(zone, name, &ctx, rolls))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Encounter {
            source: selection.source,
            enemies,
        })
    }

    /// Materializes one enemy: behavior override, stat variation, then
    /// post-generation.
    pub fn instantiate(
        &self,
        zone: &CombatZone,
        name: &str,
        ctx: &GenerationContext<'_>,
        rolls: &mut RollStream<'_>,
    ) -> Result<EnemyInstance, EncounterError> {
        let template = self
            .env
            .enemies()?
            .template(name)
            .ok_or_else(|| OracleError::EnemyTemplateNotFound(name.to_string()))?;

        let generation = self.resolve_behavior(template, ctx);
        let base = generation
            .stats
            .unwrap_or_else(|| template.stats.clone());

        let variation = zone.stat_variation();
        let stats = if variation > 0.0 && !generation.disable_variation {
            vary_stats(&base, variation, rolls)
        } else {
            base
        };

        let mut enemy = EnemyInstance::new(template, stats);
        if let Some(post) = &generation.post {
            post.apply(&mut enemy);
        }
        enemy.is_alive = true;
        Ok(enemy)
    }

    fn resolve_behavior(
        &self,
        template: &EnemyTemplate,
        ctx: &GenerationContext<'_>,
    ) -> GenerationOverride {
        template
            .behavior
            .as_ref()
            .map(|behavior| behavior.resolve(template, ctx, self.hooks))
            .unwrap_or_default()
    }
}

/// Picks the next group's enemy names in strict priority order:
/// sequence, pool, boss, rare, default.
pub fn select_group(zone: &CombatZone, kills: u32, rolls: &mut RollStream<'_>) -> GroupSelection {
    let sources = zone.sources();

    if let Some(last) = sources.sequence.len().checked_sub(1) {
        let index = (kills as usize).min(last);
        return GroupSelection {
            source: EncounterSource::Sequence { index },
            enemies: sources.sequence[index].clone(),
        };
    }

    if !sources.pool.is_empty() {
        let index = rolls.index(sources.pool.len());
        return GroupSelection {
            source: EncounterSource::Pool { index },
            enemies: sources.pool[index].clone(),
        };
    }

    if zone.is_boss_kill(kills) {
        return GroupSelection {
            source: EncounterSource::Boss,
            enemies: zone.boss().to_vec(),
        };
    }

    if let Some(rare) = zone.rare().filter(|r| !r.enemies.is_empty()) {
        if rolls.chance(rare.chance) {
            return GroupSelection {
                source: EncounterSource::Rare,
                enemies: rare.enemies.clone(),
            };
        }
    }

    let size = rolls.range(sources.group_size.min, sources.group_size.max);
    let enemies = (0..size)
        .map(|_| sources.list[rolls.index(sources.list.len())].clone())
        .collect();
    GroupSelection {
        source: EncounterSource::Default { size },
        enemies,
    }
}

/// Independent per-stat randomization.
///
/// For each stat: `v ~ U(0, variation)`, then the stat is multiplied by
/// `(1 + v) - U(0, 2v)`, a factor in `[1 - v, 1 + v]`.
pub fn vary_stats(base: &EnemyStats, variation: f64, rolls: &mut RollStream<'_>) -> EnemyStats {
    base.map(|_, value| {
        let v = rolls.up_to(variation);
        value * ((1.0 + v) - rolls.up_to(2.0 * v))
    })
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;
    use crate::config::GameConfig;
    use crate::encounter::{RareSpawn, ZoneConfig};
    use crate::env::{EnemyOracle, PcgRng};
    use crate::state::{LocationId, ZoneId};
    use crate::testing::FixedRng;

    fn templates() -> HashMap<String, EnemyTemplate> {
        ["Wolf", "Bear", "Alpha", "Golden Wolf", "Bandit"]
            .into_iter()
            .map(|name| {
                let stats = EnemyStats {
                    health: 100,
                    attack: 20,
                    attack_speed: 1.5,
                    ..EnemyStats::default()
                };
                (name.to_string(), EnemyTemplate::new(name, stats))
            })
            .collect()
    }

    fn zone(config: ZoneConfig) -> CombatZone {
        CombatZone::new(ZoneId(0), LocationId(0), config, &GameConfig::default()).unwrap()
    }

    fn groups(names: &[&[&str]]) -> Vec<Vec<String>> {
        names
            .iter()
            .map(|g| g.iter().map(|s| s.to_string()).collect())
            .collect()
    }

    fn at_kills(kills: u32) -> ZoneProgress {
        ZoneProgress {
            enemy_groups_killed: kills,
            ..ZoneProgress::unlocked()
        }
    }

    #[test]
    fn sequence_clamps_to_last_entry() {
        let mut config = ZoneConfig::new("Road");
        config.enemies.sequence = groups(&[&["Wolf"], &["Bear"], &["Alpha"]]);
        let zone = zone(config);
        let rng = PcgRng;
        let mut rolls = RollStream::new(&rng, 1, 0, 0);

        let selection = select_group(&zone, 10, &mut rolls);
        assert_eq!(selection.source, EncounterSource::Sequence { index: 2 });
        assert_eq!(selection.enemies, vec!["Alpha".to_string()]);
        assert_eq!(rolls.draws(), 0);
    }

    #[test]
    fn sequence_wins_over_pool() {
        let mut config = ZoneConfig::new("Road");
        config.enemies.sequence = groups(&[&["Wolf"]]);
        config.enemies.pool = groups(&[&["Bear"], &["Bandit"]]);
        let zone = zone(config);
        let rng = PcgRng;
        for seed in 0..50 {
            let mut rolls = RollStream::new(&rng, seed, 0, 0);
            let selection = select_group(&zone, 0, &mut rolls);
            assert_eq!(selection.enemies, vec!["Wolf".to_string()]);
        }
    }

    #[test]
    fn pool_picks_one_group() {
        let mut config = ZoneConfig::new("Ruins");
        config.enemies.pool = groups(&[&["Bear"], &["Bandit", "Bandit"]]);
        let zone = zone(config);
        let rng = FixedRng::units(&[0.9]);
        let mut rolls = RollStream::new(&rng, 0, 0, 0);
        let selection = select_group(&zone, 0, &mut rolls);
        assert_eq!(selection.source, EncounterSource::Pool { index: 1 });
        assert_eq!(selection.enemies.len(), 2);
    }

    #[test]
    fn boss_wins_over_rare_on_trigger_kill() {
        let mut config = ZoneConfig::new("Den");
        config.enemy_count = 10;
        config.enemies.list = vec!["Wolf".into()];
        config.boss = vec!["Alpha".into()];
        config.rare = Some(RareSpawn {
            enemies: vec!["Golden Wolf".into()],
            chance: 1.0,
        });
        let zone = zone(config);
        let rng = PcgRng;

        for seed in 0..20 {
            let mut rolls = RollStream::new(&rng, seed, 0, 0);
            let selection = select_group(&zone, 9, &mut rolls);
            assert_eq!(selection.source, EncounterSource::Boss);
            assert_eq!(selection.enemies, vec!["Alpha".to_string()]);
        }

        let mut rolls = RollStream::new(&rng, 0, 0, 0);
        assert_eq!(select_group(&zone, 3, &mut rolls).source, EncounterSource::Rare);
    }

    #[test]
    fn failed_rare_roll_falls_through_to_default() {
        let mut config = ZoneConfig::new("Den");
        config.enemies.list = vec!["Wolf".into(), "Bear".into()];
        config.enemies.group_size.max = 3;
        config.rare = Some(RareSpawn {
            enemies: vec!["Golden Wolf".into()],
            chance: 0.1,
        });
        let zone = zone(config);
        // rare roll, size roll, then one index roll per enemy
        let rng = FixedRng::units(&[0.5, 0.99, 0.1, 0.6, 0.1]);
        let mut rolls = RollStream::new(&rng, 0, 0, 0);
        let selection = select_group(&zone, 0, &mut rolls);
        assert!(matches!(selection.source, EncounterSource::Default { .. }));
        assert!(selection.enemies.iter().all(|e| e == "Wolf" || e == "Bear"));
    }

    #[test]
    fn default_group_size_stays_in_bounds() {
        let mut config = ZoneConfig::new("Plains");
        config.enemies.list = vec!["Wolf".into()];
        config.enemies.group_size = crate::encounter::GroupSize { min: 2, max: 4 };
        let zone = zone(config);
        let rng = PcgRng;
        for seed in 0..200 {
            let mut rolls = RollStream::new(&rng, seed, 1, 1);
            let selection = select_group(&zone, 0, &mut rolls);
            assert!((2..=4).contains(&selection.enemies.len()));
        }
    }

    #[test]
    fn variation_bounds_hold() {
        let mut config = ZoneConfig::new("Forest");
        config.enemies.list = vec!["Wolf".into()];
        config.enemy_stat_variation = Some(0.1);
        let zone = zone(config);
        let templates = templates();
        let hooks = GenerationHookRegistry::default();
        let generator = EncounterGenerator::new(Env::empty().with_enemies(&templates), &hooks);
        let rng = PcgRng;

        for nonce in 0..500 {
            let mut rolls = RollStream::new(&rng, 42, nonce, 0);
            let encounter = generator
                .next_enemies(&zone, &at_kills(0), &mut rolls)
                .unwrap();
            for enemy in encounter.enemies {
                assert!((90..=110).contains(&enemy.stats.health), "{}", enemy.stats.health);
                assert!((80..=120).contains(&enemy.stats.health));
                assert_eq!(enemy.max_health, enemy.stats.health);
                assert!(enemy.is_alive);
            }
        }
    }

    #[test]
    fn zero_variation_keeps_template_stats() {
        let mut config = ZoneConfig::new("Forest");
        config.enemies.list = vec!["Wolf".into()];
        let zone = zone(config);
        let templates = templates();
        let hooks = GenerationHookRegistry::default();
        let generator = EncounterGenerator::new(Env::empty().with_enemies(&templates), &hooks);
        let rng = PcgRng;
        let mut rolls = RollStream::new(&rng, 42, 0, 0);

        let encounter = generator.next_enemies(&zone, &at_kills(0), &mut rolls).unwrap();
        assert_eq!(encounter.enemies[0].stats.health, 100);
        assert_eq!(encounter.enemies[0].max_health, 100);
    }

    #[test]
    fn fixed_stats_disable_variation() {
        let mut config = ZoneConfig::new("Forest");
        config.enemies.list = vec!["Wolf".into()];
        config.enemy_stat_variation = Some(0.5);
        let zone = zone(config);
        let mut templates = templates();
        let fixed = EnemyStats {
            health: 7,
            ..EnemyStats::default()
        };
        if let Some(wolf) = templates.get_mut("Wolf") {
            wolf.behavior = Some(crate::encounter::GenerationBehavior::FixedStats {
                stats: fixed.clone(),
            });
        }
        let hooks = GenerationHookRegistry::default();
        let generator = EncounterGenerator::new(Env::empty().with_enemies(&templates), &hooks);
        let rng = PcgRng;
        let mut rolls = RollStream::new(&rng, 3, 0, 0);

        let encounter = generator.next_enemies(&zone, &at_kills(0), &mut rolls).unwrap();
        assert_eq!(encounter.enemies[0].stats, fixed);
    }

    #[test]
    fn generation_replays_with_same_seed() {
        let mut config = ZoneConfig::new("Forest");
        config.enemies.list = vec!["Wolf".into(), "Bear".into(), "Bandit".into()];
        config.enemies.group_size = crate::encounter::GroupSize { min: 1, max: 5 };
        config.enemy_stat_variation = Some(0.3);
        let zone = zone(config);
        let templates = templates();
        let hooks = GenerationHookRegistry::default();
        let generator = EncounterGenerator::new(Env::empty().with_enemies(&templates), &hooks);
        let rng = PcgRng;

        let a = generator
            .next_enemies(&zone, &at_kills(4), &mut RollStream::new(&rng, 9, 2, 0))
            .unwrap();
        let b = generator
            .next_enemies(&zone, &at_kills(4), &mut RollStream::new(&rng, 9, 2, 0))
            .unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn missing_template_is_an_oracle_error() {
        let mut config = ZoneConfig::new("Forest");
        config.enemies.list = vec!["Ghost".into()];
        let zone = zone(config);
        let templates = templates();
        assert!(templates.template("Ghost").is_none());
        let hooks = GenerationHookRegistry::default();
        let generator = EncounterGenerator::new(Env::empty().with_enemies(&templates), &hooks);
        let rng = PcgRng;
        let err = generator
            .next_enemies(&zone, &at_kills(0), &mut RollStream::new(&rng, 0, 0, 0))
            .unwrap_err();
        assert_eq!(
            err,
            EncounterError::Oracle(OracleError::EnemyTemplateNotFound("Ghost".into()))
        );
    }

    #[test]
    fn locked_and_finished_zones_refuse_encounters() {
        let mut config = ZoneConfig::new("Arena");
        config.enemies.list = vec!["Wolf".into()];
        let zone = zone(config);
        let templates = templates();
        let hooks = GenerationHookRegistry::default();
        let generator = EncounterGenerator::new(Env::empty().with_enemies(&templates), &hooks);
        let rng = PcgRng;

        let locked = ZoneProgress::default();
        assert!(matches!(
            generator.next_enemies(&zone, &locked, &mut RollStream::new(&rng, 0, 0, 0)),
            Err(EncounterError::ZoneLocked { .. })
        ));

        let finished = ZoneProgress {
            is_finished: true,
            ..ZoneProgress::unlocked()
        };
        assert!(matches!(
            generator.next_enemies(&zone, &finished, &mut RollStream::new(&rng, 0, 0, 0)),
            Err(EncounterError::ZoneFinished { .. })
        ));
    }
}
