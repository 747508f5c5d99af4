//! Enemy stat block.

use strum::IntoEnumIterator;

/// One numeric field of [`EnemyStats`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[derive(strum::EnumIter, strum::Display, strum::EnumString, strum::AsRefStr)]
#[strum(serialize_all = "snake_case")]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum EnemyStat {
    Health,
    Attack,
    Agility,
    Dexterity,
    Magic,
    Intuition,
    AttackSpeed,
    Defense,
}

impl EnemyStat {
    /// Whole-number stats round to integers; attack speed keeps two decimals.
    pub const fn is_integral(self) -> bool {
        !matches!(self, Self::AttackSpeed)
    }

    /// Rounds a raw value the way this stat is stored.
    pub fn round(self, value: f64) -> f64 {
        let value = value.max(0.0);
        if self.is_integral() {
            value.round()
        } else {
            (value * 100.0).round() / 100.0
        }
    }
}

/// Base stat block of an enemy.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct EnemyStats {
    pub health: u32,
    pub attack: u32,
    pub agility: u32,
    pub dexterity: u32,
    pub magic: u32,
    pub intuition: u32,
    pub attack_speed: f64,
    pub defense: u32,
}

impl Default for EnemyStats {
    fn default() -> Self {
        Self {
            health: 1,
            attack: 1,
            agility: 1,
            dexterity: 1,
            magic: 0,
            intuition: 1,
            attack_speed: 1.0,
            defense: 0,
        }
    }
}

impl EnemyStats {
    pub fn get(&self, stat: EnemyStat) -> f64 {
        match stat {
            EnemyStat::Health => f64::from(self.health),
            EnemyStat::Attack => f64::from(self.attack),
            EnemyStat::Agility => f64::from(self.agility),
            EnemyStat::Dexterity => f64::from(self.dexterity),
            EnemyStat::Magic => f64::from(self.magic),
            EnemyStat::Intuition => f64::from(self.intuition),
            EnemyStat::AttackSpeed => self.attack_speed,
            EnemyStat::Defense => f64::from(self.defense),
        }
    }

    /// Stores a value, applying the stat's rounding rule.
    pub fn set(&mut self, stat: EnemyStat, value: f64) {
        let value = stat.round(value);
        let whole = value.min(f64::from(u32::MAX)) as u32;
        match stat {
            EnemyStat::Health => self.health = whole,
            EnemyStat::Attack => self.attack = whole,
            EnemyStat::Agility => self.agility = whole,
            EnemyStat::Dexterity => self.dexterity = whole,
            EnemyStat::Magic => self.magic = whole,
            EnemyStat::Intuition => self.intuition = whole,
            EnemyStat::AttackSpeed => self.attack_speed = value,
            EnemyStat::Defense => self.defense = whole,
        }
    }

    /// Applies `f` to every stat in declaration order.
    pub fn map(&self, mut f: impl FnMut(EnemyStat, f64) -> f64) -> Self {
        let mut out = self.clone();
        for stat in EnemyStat::iter() {
            out.set(stat, f(stat, self.get(stat)));
        }
        out
    }

    /// Every stat multiplied by `factor`.
    pub fn scaled(&self, factor: f64) -> Self {
        self.map(|_, value| value * factor)
    }
}
