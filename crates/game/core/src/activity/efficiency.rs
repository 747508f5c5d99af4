//! Gathering efficiency.
//!
//! Gather time:
//! `time[0] * (time[1] / time[0])^skill_modifier * meta_discount * tool_discount`,
//! floored and never below [`GameConfig::MIN_GATHER_TIME`].
//!
//! Drop chance and both ends of the amount range scale geometrically with
//! the same `skill_modifier`. A resource whose required level no base skill
//! reaches drops nothing but still reports the requirement.

use crate::config::GameConfig;
use crate::env::{Env, OracleError, SkillOracle};
use crate::reward::CountRange;
use crate::scaling::{SkillScaled, geometric};

use super::{ActivityWork, LocationActivity, ResourceDrop};

/// A drop table entry at the hero's current skill.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ScaledDrop {
    pub item: String,
    pub chance: f64,
    pub count: CountRange,
    /// Level the hero is missing, if the resource is gated.
    pub unmet_requirement: Option<u32>,
}

/// Time-to-yield and drop table of a gathering activity.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ActivityEfficiency {
    pub skill_modifier: f64,
    pub meta_discount: f64,
    pub tool_discount: f64,
    /// Ticks per gather cycle.
    pub gather_time: u32,
    pub drops: Vec<ScaledDrop>,
}

/// Pay of a job at the hero's current skill.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct JobPayment {
    pub working_period: u32,
    pub payment: u64,
}

/// Errors raised by efficiency queries.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ActivityError {
    #[error("activity '{activity}' is not a gathering activity")]
    NotGathering { activity: String },

    #[error("activity '{activity}' is not a paid job")]
    NotAJob { activity: String },

    #[error(transparent)]
    Oracle(#[from] OracleError),
}

impl crate::error::GameError for ActivityError {
    fn severity(&self) -> crate::error::ErrorSeverity {
        match self {
            Self::NotGathering { .. } | Self::NotAJob { .. } => {
                crate::error::ErrorSeverity::Validation
            }
            Self::Oracle(e) => e.severity(),
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::NotGathering { .. } => "ACTIVITY_NOT_GATHERING",
            Self::NotAJob { .. } => "ACTIVITY_NOT_A_JOB",
            Self::Oracle(e) => e.error_code(),
        }
    }
}

/// Average progress of the base skills through their level windows.
///
/// An activity that does not scale with skill reports 0, which selects the
/// untrained values everywhere. Without a configured window a skill counts
/// through `[0, max_level]`; a skill with no maximum contributes 0.
pub fn skill_modifier(activity: &LocationActivity, skills: &dyn SkillOracle) -> f64 {
    if !activity.scales_with_skill || activity.base_skills.is_empty() {
        return 0.0;
    }
    let total: f64 = activity
        .base_skills
        .iter()
        .map(|skill| match activity.skill_required {
            Some(window) => window.progress(skills.level_of(skill)),
            None => skills.mastery(skill),
        })
        .sum();
    total / activity.base_skills.len() as f64
}

/// Computes gathering efficiency and job pay.
pub struct EfficiencyModel<'a> {
    env: Env<'a>,
    config: &'a GameConfig,
}

impl<'a> EfficiencyModel<'a> {
    pub fn new(env: Env<'a>, config: &'a GameConfig) -> Self {
        Self { env, config }
    }

    /// Time discount from the time compression skill, in `[1 - max, 1]`.
    pub fn meta_discount(&self) -> Result<f64, OracleError> {
        let mastery = self
            .env
            .skills()?
            .mastery(&self.config.time_compression_skill);
        let compression = self.config.max_time_compression.clamp(0.0, 1.0);
        Ok(1.0 - compression * mastery)
    }

    /// `1 / (1 + bonus)` for the equipped tool; 1 when no tool applies.
    pub fn tool_discount(&self, activity: &LocationActivity) -> Result<f64, OracleError> {
        let Some(tool_type) = activity.tool_type.as_deref().filter(|_| activity.require_tool)
        else {
            return Ok(1.0);
        };
        let bonus = self.env.character()?.equipped_tool_bonus(tool_type).max(0.0);
        Ok(1.0 / (1.0 + bonus))
    }

    /// Gather time and scaled drop table.
    ///
    /// # Errors
    ///
    /// [`ActivityError::NotGathering`] for jobs; [`ActivityError::Oracle`]
    /// when the skill or character oracle is missing.
    pub fn gathering(&self, activity: &LocationActivity) -> Result<ActivityEfficiency, ActivityError> {
        let resources = activity
            .gathering()
            .ok_or_else(|| ActivityError::NotGathering {
                activity: activity.name.clone(),
            })?;
        let skills = self.env.skills()?;

        let modifier = skill_modifier(activity, skills);
        let meta_discount = self.meta_discount()?;
        let tool_discount = self.tool_discount(activity)?;

        let period = &resources.time_period;
        let raw_time = geometric(f64::from(period.base), f64::from(period.mastered), modifier)
            * meta_discount
            * tool_discount;
        let gather_time = (raw_time.floor().max(0.0) as u32).max(GameConfig::MIN_GATHER_TIME);

        let drops = resources
            .resources
            .iter()
            .map(|resource| scale_drop(activity, resource, skills, modifier))
            .collect();

        tracing::debug!(
            activity = %activity.name,
            modifier,
            meta_discount,
            tool_discount,
            gather_time,
            "computed gathering efficiency"
        );

        Ok(ActivityEfficiency {
            skill_modifier: modifier,
            meta_discount,
            tool_discount,
            gather_time,
            drops,
        })
    }

    /// Pay per working period of a job.
    pub fn job_payment(&self, activity: &LocationActivity) -> Result<JobPayment, ActivityError> {
        let ActivityWork::Job {
            working_period,
            payment,
        } = &activity.work
        else {
            return Err(ActivityError::NotAJob {
                activity: activity.name.clone(),
            });
        };
        let skills = self.env.skills()?;
        let payment = if unmet_level(activity, activity.required_level(), skills).is_some() {
            0
        } else {
            payment.at(skill_modifier(activity, skills))
        };
        Ok(JobPayment {
            working_period: *working_period,
            payment,
        })
    }
}

/// Required level no base skill reaches, if any.
fn unmet_level(
    activity: &LocationActivity,
    required: Option<u32>,
    skills: &dyn SkillOracle,
) -> Option<u32> {
    let required = required?;
    let met = activity
        .base_skills
        .iter()
        .any(|skill| skills.level_of(skill) >= required);
    (!met).then_some(required)
}

fn scale_drop(
    activity: &LocationActivity,
    resource: &ResourceDrop,
    skills: &dyn SkillOracle,
    modifier: f64,
) -> ScaledDrop {
    let required = resource.skill_required.or(activity.required_level());
    if let Some(level) = unmet_level(activity, required, skills) {
        return ScaledDrop {
            item: resource.item.clone(),
            chance: 0.0,
            count: CountRange::zero(),
            unmet_requirement: Some(level),
        };
    }

    ScaledDrop {
        item: resource.item.clone(),
        chance: resource.chance.at(modifier).clamp(0.0, 1.0),
        count: scale_count(&resource.amount, modifier),
        unmet_requirement: None,
    }
}

fn scale_count(amount: &SkillScaled<CountRange>, modifier: f64) -> CountRange {
    let end = |base: u32, mastered: u32| {
        geometric(f64::from(base), f64::from(mastered), modifier)
            .round()
            .max(0.0) as u32
    };
    let min = end(amount.base.min, amount.mastered.min);
    let max = end(amount.base.max, amount.mastered.max).max(min);
    CountRange::new(min, max)
}
