/// Game configuration constants and tunable parameters.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct GameConfig {
    /// Skill that compresses gathering time independently of the activity's own skills.
    pub time_compression_skill: String,

    /// Fraction of gathering time removed when the time compression skill is maxed.
    pub max_time_compression: f64,

    /// Exponent of the taper applied to additive environment penalties.
    ///
    /// `flat * (1 - level/max_level)^exponent`
    pub flat_penalty_exponent: f64,

    /// Stat variation applied to zones that do not declare their own.
    pub default_stat_variation: f64,
}

impl GameConfig {
    // ===== compile-time constants =====
    /// Largest enemy group the default enemy source may spawn.
    pub const MAX_GROUP_SIZE: u32 = 8;
    /// Smallest enemy group the default enemy source may spawn.
    pub const MIN_GROUP_SIZE: u32 = 1;
    /// Location types declare at most this many severity stages (1-based).
    pub const MAX_TYPE_STAGE: u8 = 3;
    /// A gather cycle never completes faster than this many ticks.
    pub const MIN_GATHER_TIME: u32 = 1;

    // ===== runtime-tunable defaults =====
    pub const DEFAULT_TIME_COMPRESSION_SKILL: &'static str = "Patience";
    pub const DEFAULT_MAX_TIME_COMPRESSION: f64 = 0.5;
    pub const DEFAULT_FLAT_PENALTY_EXPONENT: f64 = 2.0 / 3.0;

    pub fn new() -> Self {
        Self {
            time_compression_skill: Self::DEFAULT_TIME_COMPRESSION_SKILL.to_string(),
            max_time_compression: Self::DEFAULT_MAX_TIME_COMPRESSION,
            flat_penalty_exponent: Self::DEFAULT_FLAT_PENALTY_EXPONENT,
            default_stat_variation: 0.0,
        }
    }

    pub fn with_time_compression_skill(mut self, skill: impl Into<String>) -> Self {
        self.time_compression_skill = skill.into();
        self
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        Self::new()
    }
}
