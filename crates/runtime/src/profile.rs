//! A minimal hero the session can resolve against.
//!
//! The surrounding game owns the real skill system, inventory and equipment.
//! `HeroProfile` stands in for all of them: it answers the core oracle
//! queries from plain maps and absorbs reward payloads, which is enough for
//! tools, tests and headless simulation.

use std::collections::BTreeMap;

use realm_content::ContentRepository;
use realm_core::{CharacterOracle, ItemStack, RewardPayload, RewardSink, SkillOracle};
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HeroProfile {
    pub skills: BTreeMap<String, u32>,
    /// Maximum level per skill, usually copied from the skill catalog.
    pub max_levels: BTreeMap<String, u32>,
    pub money: u64,
    pub items: BTreeMap<String, u32>,
    pub stats: BTreeMap<String, f64>,
    /// Equipped tool bonus per tool type.
    pub tools: BTreeMap<String, f64>,
    /// Skill xp handed out by rewards, waiting for the skill system.
    pub pending_xp: BTreeMap<String, f64>,
    /// Every payload received, in order.
    #[serde(skip)]
    pub received: Vec<RewardPayload>,
}

impl HeroProfile {
    /// A hero at level 0 in every catalog skill.
    pub fn from_catalog(content: &ContentRepository) -> Self {
        Self {
            max_levels: content
                .skills()
                .map(|skill| (skill.name.clone(), skill.max_level))
                .collect(),
            ..Self::default()
        }
    }

    pub fn with_skill(mut self, skill: impl Into<String>, level: u32) -> Self {
        self.skills.insert(skill.into(), level);
        self
    }

    pub fn with_money(mut self, money: u64) -> Self {
        self.money = money;
        self
    }

    pub fn with_item(mut self, item: impl Into<String>, count: u32) -> Self {
        self.items.insert(item.into(), count);
        self
    }

    pub fn with_stat(mut self, stat: impl Into<String>, value: f64) -> Self {
        self.stats.insert(stat.into(), value);
        self
    }

    pub fn with_tool(mut self, tool_type: impl Into<String>, bonus: f64) -> Self {
        self.tools.insert(tool_type.into(), bonus);
        self
    }
}

impl SkillOracle for HeroProfile {
    fn level_of(&self, skill: &str) -> u32 {
        self.skills.get(skill).copied().unwrap_or(0)
    }

    fn max_level_of(&self, skill: &str) -> u32 {
        self.max_levels.get(skill).copied().unwrap_or(0)
    }
}

impl CharacterOracle for HeroProfile {
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

impl RewardSink for HeroProfile {
    fn apply(&mut self, reward: &RewardPayload) {
        self.money = self.money.saturating_add(reward.money);
        for stack in &reward.items {
            let count = self.items.entry(stack.item.clone()).or_insert(0);
            *count = count.saturating_add(stack.count);
        }
        for (skill, xp) in &reward.skill_xp {
            *self.pending_xp.entry(skill.clone()).or_insert(0.0) += xp;
        }
        self.received.push(reward.clone());
    }

    fn consume(&mut self, items: &[ItemStack]) {
        for stack in items {
            if let Some(count) = self.items.get_mut(&stack.item) {
                *count = count.saturating_sub(stack.count);
                if *count == 0 {
                    self.items.remove(&stack.item);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_entries_read_as_zero() {
        let hero = HeroProfile::default();
        assert_eq!(hero.level_of("Climbing"), 0);
        assert_eq!(hero.mastery("Climbing"), 0.0);
        assert_eq!(hero.item_count("Rope"), 0);
        assert_eq!(hero.equipped_tool_bonus("Axe"), 0.0);
    }

    #[test]
    fn mastery_uses_max_levels() {
        let mut hero = HeroProfile::default().with_skill("Climbing", 5);
        hero.max_levels.insert("Climbing".into(), 10);
        assert_eq!(hero.mastery("Climbing"), 0.5);
    }

    #[test]
    fn rewards_accumulate_and_items_are_consumed() {
        let mut hero = HeroProfile::default().with_item("Rope", 1);
        hero.apply(
            &RewardPayload::default()
                .with_money(10)
                .with_item("Rope", 2)
                .with_skill_xp("Climbing", 5.0),
        );
        hero.apply(&RewardPayload::default().with_skill_xp("Climbing", 2.5));

        assert_eq!(hero.money, 10);
        assert_eq!(hero.item_count("Rope"), 3);
        assert_eq!(hero.pending_xp["Climbing"], 7.5);
        assert_eq!(hero.received.len(), 2);

        hero.consume(&[ItemStack::new("Rope", 3)]);
        assert_eq!(hero.item_count("Rope"), 0);
        assert!(!hero.items.contains_key("Rope"));
    }
}
