use std::collections::BTreeMap;

use crate::reward::RewardPayload;
use crate::scaling::Tier;

/// Item a condition tier asks for.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ItemCondition {
    pub item: String,
    #[cfg_attr(feature = "serde", serde(default = "one"))]
    pub count: u32,
    /// Taken from the inventory once the conditions are met.
    #[cfg_attr(feature = "serde", serde(default))]
    pub remove: bool,
}

#[cfg(feature = "serde")]
fn one() -> u32 {
    1
}

impl ItemCondition {
    pub fn new(item: impl Into<String>, count: u32) -> Self {
        Self {
            item: item.into(),
            count,
            remove: false,
        }
    }

    pub fn removed(mut self) -> Self {
        self.remove = true;
        self
    }
}

/// One tier of requirements across the four condition categories.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ConditionTier {
    pub money: Option<u64>,
    pub skills: BTreeMap<String, u32>,
    pub stats: BTreeMap<String, f64>,
    pub items: Vec<ItemCondition>,
}

impl ConditionTier {
    pub fn is_empty(&self) -> bool {
        self.money.is_none()
            && self.skills.is_empty()
            && self.stats.is_empty()
            && self.items.is_empty()
    }

    pub fn with_money(mut self, money: u64) -> Self {
        self.money = Some(money);
        self
    }

    pub fn with_skill(mut self, skill: impl Into<String>, level: u32) -> Self {
        self.skills.insert(skill.into(), level);
        self
    }

    pub fn with_stat(mut self, stat: impl Into<String>, value: f64) -> Self {
        self.stats.insert(stat.into(), value);
        self
    }

    pub fn with_item(mut self, item: ItemCondition) -> Self {
        self.items.push(item);
        self
    }
}

/// Minimum tier (must be met) and optional ideal tier (full credit).
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ActionConditions {
    pub minimum: ConditionTier,
    pub ideal: Option<ConditionTier>,
}

impl ActionConditions {
    pub fn single(minimum: ConditionTier) -> Self {
        Self {
            minimum,
            ideal: None,
        }
    }

    pub fn two(minimum: ConditionTier, ideal: ConditionTier) -> Self {
        Self {
            minimum,
            ideal: Some(ideal),
        }
    }
}

/// Failure texts, one per loss kind.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct FailureTexts {
    pub conditional_loss: String,
    pub random_loss: String,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ActionTexts {
    pub description: String,
    /// Shown on the button that starts the action.
    pub starting_text: String,
    /// Shown while an attempt is in progress.
    pub action_text: String,
    pub success_text: String,
    pub failure_texts: FailureTexts,
}

/// A gated, player-initiated action owned by a location.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct LocationAction {
    pub name: String,
    pub texts: ActionTexts,
    /// Hard gate to even attempt the action. Binary, no partial credit.
    pub required: ConditionTier,
    pub conditions: ActionConditions,
    /// Success chance at the minimum and ideal condition tiers.
    pub success_chances: Tier<f64>,
    pub rewards: RewardPayload,
    /// Paid when the conditions were met but the roll failed.
    pub loss_rewards: Option<RewardPayload>,
    /// Ticks an attempt occupies before resolving; 0 resolves at once.
    pub attempt_duration: u32,
    pub repeatable: bool,
    /// Evaluate conditions when the attempt completes rather than when it starts.
    pub check_conditions_on_finish: bool,
    pub is_unlocked: bool,
}

impl Default for LocationAction {
    fn default() -> Self {
        Self {
            name: String::new(),
            texts: ActionTexts::default(),
            required: ConditionTier::default(),
            conditions: ActionConditions::default(),
            success_chances: Tier::single(1.0),
            rewards: RewardPayload::default(),
            loss_rewards: None,
            attempt_duration: 0,
            repeatable: false,
            check_conditions_on_finish: true,
            is_unlocked: true,
        }
    }
}

impl LocationAction {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }
}
