//! Fuzzy evaluation of condition tiers.
//!
//! Categories are evaluated in a fixed order (money, skills, stats, items)
//! and multiply together. Evaluation stops at the first unmet category.
//! Items are binary and only checked against the minimum tier.

use std::collections::BTreeSet;

use crate::env::{CharacterOracle, SkillOracle};
use crate::reward::ItemStack;
use crate::scaling::{ConditionStatus, fuzzy_score};

use super::{ActionConditions, ConditionTier};

/// Fuzzy score of the hero against a minimum and optional ideal tier.
pub fn evaluate(
    conditions: &ActionConditions,
    character: &dyn CharacterOracle,
    skills: &dyn SkillOracle,
) -> ConditionStatus {
    let minimum = &conditions.minimum;
    let ideal = conditions.ideal.as_ref();

    money_status(minimum, ideal, character)
        .and_then(|| skill_status(minimum, ideal, skills))
        .and_then(|| stat_status(minimum, ideal, character))
        .and_then(|| item_status(minimum, character))
}

/// Binary check of a single tier, as used by the `required` gate.
pub fn meets(
    tier: &ConditionTier,
    character: &dyn CharacterOracle,
    skills: &dyn SkillOracle,
) -> bool {
    evaluate(&ActionConditions::single(tier.clone()), character, skills).is_met()
}

/// Items a met tier takes from the inventory.
pub fn consumed_items(tier: &ConditionTier) -> Vec<ItemStack> {
    tier.items
        .iter()
        .filter(|c| c.remove && c.count > 0)
        .map(|c| ItemStack::new(c.item.clone(), c.count))
        .collect()
}

fn money_status(
    minimum: &ConditionTier,
    ideal: Option<&ConditionTier>,
    character: &dyn CharacterOracle,
) -> ConditionStatus {
    let ideal = ideal.and_then(|t| t.money);
    if minimum.money.is_none() && ideal.is_none() {
        return ConditionStatus::FULL;
    }
    let required = minimum.money.unwrap_or(0);
    fuzzy_score(
        character.money() as f64,
        required as f64,
        ideal.map(|m| m as f64),
    )
}

fn skill_status(
    minimum: &ConditionTier,
    ideal: Option<&ConditionTier>,
    skills: &dyn SkillOracle,
) -> ConditionStatus {
    let names: BTreeSet<&String> = minimum
        .skills
        .keys()
        .chain(ideal.into_iter().flat_map(|t| t.skills.keys()))
        .collect();

    names.into_iter().fold(ConditionStatus::FULL, |status, skill| {
        status.and_then(|| {
            let required = minimum.skills.get(skill).copied().unwrap_or(0);
            let target = ideal.and_then(|t| t.skills.get(skill)).copied();
            fuzzy_score(
                f64::from(skills.level_of(skill)),
                f64::from(required),
                target.map(f64::from),
            )
        })
    })
}

fn stat_status(
    minimum: &ConditionTier,
    ideal: Option<&ConditionTier>,
    character: &dyn CharacterOracle,
) -> ConditionStatus {
    let names: BTreeSet<&String> = minimum
        .stats
        .keys()
        .chain(ideal.into_iter().flat_map(|t| t.stats.keys()))
        .collect();

    names.into_iter().fold(ConditionStatus::FULL, |status, stat| {
        status.and_then(|| {
            let required = minimum.stats.get(stat).copied().unwrap_or(0.0);
            let target = ideal.and_then(|t| t.stats.get(stat)).copied();
            fuzzy_score(character.stat(stat), required, target)
        })
    })
}

fn item_status(minimum: &ConditionTier, character: &dyn CharacterOracle) -> ConditionStatus {
    let all_held = minimum
        .items
        .iter()
        .all(|c| character.item_count(&c.item) >= c.count);
    if all_held {
        ConditionStatus::FULL
    } else {
        ConditionStatus::Unmet
    }
}
