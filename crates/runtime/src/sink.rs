//! Reward sink that only records what it receives.

use realm_core::{ItemStack, RewardPayload, RewardSink};

/// Collects payloads and consumed items for later inspection.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct RecordingSink {
    pub rewards: Vec<RewardPayload>,
    pub consumed: Vec<ItemStack>,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Total money across every recorded payload.
    pub fn money(&self) -> u64 {
        self.rewards.iter().map(|r| r.money).sum()
    }
}

impl RewardSink for RecordingSink {
    fn apply(&mut self, reward: &RewardPayload) {
        self.rewards.push(reward.clone());
    }

    fn consume(&mut self, items: &[ItemStack]) {
        self.consumed.extend_from_slice(items);
    }
}
