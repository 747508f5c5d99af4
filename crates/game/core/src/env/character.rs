//! Character facade interface.
//!
//! Stat aggregation, inventory and equipment are owned by the surrounding
//! game. Condition evaluation and the gathering tool discount read them
//! through this trait.

/// Read-only view of the hero's money, inventory, stats and tools.
pub trait CharacterOracle {
    /// Money currently held.
    fn money(&self) -> u64;

    /// How many of an item the inventory holds.
    fn item_count(&self, item: &str) -> u32;

    /// Current value of an aggregated character stat. Unknown stats are 0.
    fn stat(&self, stat: &str) -> f64;

    /// Efficiency bonus of the equipped tool of this type, as a fraction
    /// (`0.25` = 25% faster). No tool equipped reports 0.
    fn equipped_tool_bonus(&self, tool_type: &str) -> f64;
}

impl<T: CharacterOracle + ?Sized> CharacterOracle for &T {
    fn money(&self) -> u64 {
        (**self).money()
    }

    fn item_count(&self, item: &str) -> u32 {
        (**self).item_count(item)
    }

    fn stat(&self, stat: &str) -> f64 {
        (**self).stat(stat)
    }

    fn equipped_tool_bonus(&self, tool_type: &str) -> f64 {
        (**self).equipped_tool_bonus(tool_type)
    }
}
