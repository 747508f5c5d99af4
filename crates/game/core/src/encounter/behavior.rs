//! Special generation behaviors and combat triggers.
//!
//! Templates opt into custom spawning through a [`GenerationBehavior`]
//! variant instead of attached callbacks. Data-only variants are resolved
//! here; `Custom` dispatches by name to a [`GenerationHook`] registered in a
//! [`GenerationHookRegistry`].

use std::collections::HashMap;
use std::sync::Arc;

use crate::env::EnemyTemplate;
use crate::stats::EnemyStats;

use super::EnemyInstance;

/// Combat-time callback carried by a template for the external combat
/// resolver.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CombatTrigger {
    /// Show a line of combat text.
    Say { text: String },
    /// Restore health to the enemy.
    Heal { amount: u32 },
    /// Bring another enemy into the fight.
    Summon { enemy: String },
    /// Apply a named status effect to the hero.
    Inflict { effect: String, chance: f64 },
    /// Drop an item outside the regular loot roll.
    Drop { item: String, count: u32 },
}

/// Triggers grouped by the combat event that fires them.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct CombatTriggers {
    pub on_entry: Vec<CombatTrigger>,
    pub on_strike: Vec<CombatTrigger>,
    pub on_connected_strike: Vec<CombatTrigger>,
    pub on_death: Vec<CombatTrigger>,
}

impl CombatTriggers {
    pub fn is_empty(&self) -> bool {
        self.on_entry.is_empty()
            && self.on_strike.is_empty()
            && self.on_connected_strike.is_empty()
            && self.on_death.is_empty()
    }

    /// Appends every trigger of `other`.
    pub fn extend(&mut self, other: &CombatTriggers) {
        self.on_entry.extend(other.on_entry.iter().cloned());
        self.on_strike.extend(other.on_strike.iter().cloned());
        self.on_connected_strike
            .extend(other.on_connected_strike.iter().cloned());
        self.on_death.extend(other.on_death.iter().cloned());
    }
}

/// How a template's stats are produced for a spawn.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum GenerationBehavior {
    /// Stats grow by `per_clear` for every completed clear of the zone,
    /// up to `cap` times the template stats.
    ScaleWithClears { per_clear: f64, cap: f64 },
    /// Always spawn with exactly these stats. Disables variation.
    FixedStats { stats: EnemyStats },
    /// Stronger named variant of the template.
    Elite { multiplier: f64, title: String },
    /// Dispatch to a registered hook.
    Custom { hook: String },
}

/// Change applied to an instance once its stats are final.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PostGenerate {
    AttachTriggers(CombatTriggers),
    Rename(String),
    /// Spawn with only a fraction of max health.
    StartWounded { fraction: f64 },
}

impl PostGenerate {
    pub fn apply(&self, enemy: &mut EnemyInstance) {
        match self {
            Self::AttachTriggers(triggers) => enemy.triggers.extend(triggers),
            Self::Rename(name) => enemy.name = name.clone(),
            Self::StartWounded { fraction } => {
                let fraction = fraction.clamp(0.0, 1.0);
                let health = (f64::from(enemy.max_health) * fraction).ceil() as u32;
                enemy.health = health.clamp(1, enemy.max_health.max(1));
            }
        }
    }
}

/// What a behavior asks the generator to do differently.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct GenerationOverride {
    /// Replaces the template's base stats.
    pub stats: Option<EnemyStats>,
    /// Skips the zone's stat variation for this spawn.
    pub disable_variation: bool,
    pub post: Option<PostGenerate>,
}

/// Zone context handed to generation behaviors.
#[derive(Clone, Copy, Debug)]
pub struct GenerationContext<'a> {
    pub zone: &'a str,
    /// Groups killed in the zone before this spawn.
    pub kills: u32,
    /// Completed clears of the zone.
    pub clears: u32,
}

/// Code-defined generation behavior, referenced by name from content.
pub trait GenerationHook: Send + Sync {
    /// Unique name used by `GenerationBehavior::Custom`.
    fn name(&self) -> &'static str;

    fn generate(&self, template: &EnemyTemplate, ctx: &GenerationContext<'_>)
    -> GenerationOverride;
}

/// Name-indexed table of [`GenerationHook`]s.
#[derive(Clone, Default)]
pub struct GenerationHookRegistry {
    lookup_table: HashMap<&'static str, Arc<dyn GenerationHook>>,
}

impl GenerationHookRegistry {
    pub fn new(hooks: Vec<Arc<dyn GenerationHook>>) -> Self {
        let lookup_table = hooks.iter().map(|h| (h.name(), Arc::clone(h))).collect();
        Self { lookup_table }
    }

    pub fn register(&mut self, hook: Arc<dyn GenerationHook>) {
        self.lookup_table.insert(hook.name(), hook);
    }

    pub fn find(&self, name: &str) -> Option<&Arc<dyn GenerationHook>> {
        self.lookup_table.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.lookup_table.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.lookup_table.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lookup_table.is_empty()
    }
}

impl std::fmt::Debug for GenerationHookRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_set().entries(self.lookup_table.keys()).finish()
    }
}

impl GenerationBehavior {
    /// Resolves the behavior into an override for one spawn.
    ///
    /// An unregistered custom hook logs a warning and falls back to the
    /// template defaults.
    pub fn resolve(
        &self,
        template: &EnemyTemplate,
        ctx: &GenerationContext<'_>,
        hooks: &GenerationHookRegistry,
    ) -> GenerationOverride {
        match self {
            Self::ScaleWithClears { per_clear, cap } => {
                let factor = (1.0 + per_clear * f64::from(ctx.clears)).min(cap.max(1.0));
                GenerationOverride {
                    stats: Some(template.stats.scaled(factor)),
                    ..GenerationOverride::default()
                }
            }
            Self::FixedStats { stats } => GenerationOverride {
                stats: Some(stats.clone()),
                disable_variation: true,
                post: None,
            },
            Self::Elite { multiplier, title } => GenerationOverride {
                stats: Some(template.stats.scaled(*multiplier)),
                disable_variation: false,
                post: Some(PostGenerate::Rename(format!("{title} {}", template.name))),
            },
            Self::Custom { hook } => match hooks.find(hook) {
                Some(hook) => hook.generate(template, ctx),
                None => {
                    tracing::warn!(
                        enemy = %template.name,
                        hook = %hook,
                        "generation hook not registered; using template defaults"
                    );
                    GenerationOverride::default()
                }
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Frenzy;

    impl GenerationHook for Frenzy {
        fn name(&self) -> &'static str {
            "frenzy"
        }

        fn generate(
            &self,
            template: &EnemyTemplate,
            ctx: &GenerationContext<'_>,
        ) -> GenerationOverride {
            let mut stats = template.stats.clone();
            stats.attack += ctx.kills;
            GenerationOverride {
                stats: Some(stats),
                disable_variation: true,
                post: Some(PostGenerate::StartWounded { fraction: 0.5 }),
            }
        }
    }

    fn wolf() -> EnemyTemplate {
        EnemyTemplate::new(
            "Wolf",
            EnemyStats {
                health: 100,
                attack: 10,
                ..EnemyStats::default()
            },
        )
    }

    fn ctx(kills: u32, clears: u32) -> GenerationContext<'static> {
        GenerationContext {
            zone: "Forest",
            kills,
            clears,
        }
    }

    #[test]
    fn scale_with_clears_respects_cap() {
        let behavior = GenerationBehavior::ScaleWithClears {
            per_clear: 0.5,
            cap: 2.0,
        };
        let hooks = GenerationHookRegistry::default();

        let once = behavior.resolve(&wolf(), &ctx(30, 1), &hooks);
        assert_eq!(once.stats.map(|s| s.health), Some(150));

        let many = behavior.resolve(&wolf(), &ctx(300, 10), &hooks);
        assert_eq!(many.stats.map(|s| s.health), Some(200));
    }

    #[test]
    fn elite_renames_after_generation() {
        let behavior = GenerationBehavior::Elite {
            multiplier: 1.5,
            title: "Alpha".into(),
        };
        let result = behavior.resolve(&wolf(), &ctx(0, 0), &GenerationHookRegistry::default());
        assert_eq!(result.post, Some(PostGenerate::Rename("Alpha Wolf".into())));
        assert_eq!(result.stats.map(|s| s.attack), Some(15));
    }

    #[test]
    fn custom_dispatches_to_registered_hook() {
        let hooks = GenerationHookRegistry::new(vec![Arc::new(Frenzy)]);
        let behavior = GenerationBehavior::Custom {
            hook: "frenzy".into(),
        };
        let result = behavior.resolve(&wolf(), &ctx(4, 0), &hooks);
        assert!(result.disable_variation);
        assert_eq!(result.stats.map(|s| s.attack), Some(14));
    }

    #[test]
    fn unknown_custom_hook_falls_back_to_defaults() {
        let behavior = GenerationBehavior::Custom {
            hook: "missing".into(),
        };
        let result = behavior.resolve(&wolf(), &ctx(0, 0), &GenerationHookRegistry::default());
        assert_eq!(result, GenerationOverride::default());
    }
}
