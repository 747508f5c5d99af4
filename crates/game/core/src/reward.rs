//! Reward payloads and the sink that applies them.
//!
//! The resolvers never mutate player state. They produce a [`RewardPayload`]
//! (and a list of consumed items) and hand it to a [`RewardSink`] owned by
//! the surrounding game.

use std::collections::BTreeMap;

/// Inclusive count range, used by loot tables and gathering drops.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CountRange {
    pub min: u32,
    pub max: u32,
}

impl CountRange {
    pub const fn new(min: u32, max: u32) -> Self {
        Self { min, max }
    }

    pub const fn one() -> Self {
        Self { min: 1, max: 1 }
    }

    pub const fn zero() -> Self {
        Self { min: 0, max: 0 }
    }

    pub const fn is_zero(&self) -> bool {
        self.max == 0
    }
}

/// A quantity of one item.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ItemStack {
    pub item: String,
    #[cfg_attr(feature = "serde", serde(default = "one"))]
    pub count: u32,
}

#[cfg(feature = "serde")]
fn one() -> u32 {
    1
}

impl ItemStack {
    pub fn new(item: impl Into<String>, count: u32) -> Self {
        Self {
            item: item.into(),
            count,
        }
    }
}

/// Reference to an activity owned by a location.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ActivityRef {
    pub location: String,
    pub activity: String,
}

/// Reference to a gated action owned by a location.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ActionRef {
    pub location: String,
    pub action: String,
}

/// Dialogue lines unlocked in one dialogue.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TextlineRef {
    pub dialogue: String,
    pub lines: Vec<String>,
}

/// Everything a reward can unlock, by stable name.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct Unlocks {
    pub locations: Vec<String>,
    pub zones: Vec<String>,
    pub actions: Vec<ActionRef>,
    pub activities: Vec<ActivityRef>,
    pub dialogues: Vec<String>,
    pub textlines: Vec<TextlineRef>,
    pub stances: Vec<String>,
    pub magic: Vec<String>,
    pub flags: Vec<String>,
    pub allies: Vec<String>,
    pub expels: Vec<String>,
}

impl Unlocks {
    pub fn is_empty(&self) -> bool {
        self.locations.is_empty()
            && self.zones.is_empty()
            && self.actions.is_empty()
            && self.activities.is_empty()
            && self.dialogues.is_empty()
            && self.textlines.is_empty()
            && self.stances.is_empty()
            && self.magic.is_empty()
            && self.flags.is_empty()
            && self.allies.is_empty()
            && self.expels.is_empty()
    }
}

/// Reward produced by a resolution, applied by a [`RewardSink`].
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct RewardPayload {
    pub items: Vec<ItemStack>,
    pub money: u64,
    pub skill_xp: BTreeMap<String, f64>,
    pub unlocks: Unlocks,
    /// Location the hero is moved to after the reward is applied.
    pub move_to: Option<String>,
}

impl RewardPayload {
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
            && self.money == 0
            && self.skill_xp.is_empty()
            && self.unlocks.is_empty()
            && self.move_to.is_none()
    }

    pub fn with_item(mut self, item: impl Into<String>, count: u32) -> Self {
        self.items.push(ItemStack::new(item, count));
        self
    }

    pub fn with_money(mut self, money: u64) -> Self {
        self.money = money;
        self
    }

    pub fn with_skill_xp(mut self, skill: impl Into<String>, xp: f64) -> Self {
        self.skill_xp.insert(skill.into(), xp);
        self
    }
}

/// Applies rewards to persistent player state.
pub trait RewardSink {
    /// Apply a reward payload.
    fn apply(&mut self, reward: &RewardPayload);

    /// Remove items consumed by a resolution.
    fn consume(&mut self, items: &[ItemStack]);
}
