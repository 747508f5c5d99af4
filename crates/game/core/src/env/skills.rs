//! Skill registry interface.
//!
//! The skill system itself (xp curves, leveling) is external. Resolution
//! code only needs the current and maximum level of a skill.

/// Read-only view of the hero's skills.
pub trait SkillOracle {
    /// Current level of a skill. Unknown skills report level 0.
    fn level_of(&self, skill: &str) -> u32;

    /// Maximum attainable level of a skill. Unknown skills report 0.
    fn max_level_of(&self, skill: &str) -> u32;

    /// Level as a fraction of the maximum, in `[0, 1]`.
    ///
    /// Skills with no maximum report 0.
    fn mastery(&self, skill: &str) -> f64 {
        let max = self.max_level_of(skill);
        if max == 0 {
            return 0.0;
        }
        (f64::from(self.level_of(skill)) / f64::from(max)).clamp(0.0, 1.0)
    }
}

impl<T: SkillOracle + ?Sized> SkillOracle for &T {
    fn level_of(&self, skill: &str) -> u32 {
        (**self).level_of(skill)
    }

    fn max_level_of(&self, skill: &str) -> u32 {
        (**self).max_level_of(skill)
    }
}
