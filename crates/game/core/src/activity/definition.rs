use crate::error::ContentError;
use crate::reward::CountRange;
use crate::scaling::{SkillScaled, SkillWindow};

/// Daily opening hours. `end_hour` may be smaller than `start_hour` for a
/// window that wraps past midnight.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct HourWindow {
    pub start_hour: u8,
    pub end_hour: u8,
}

impl HourWindow {
    pub const fn new(start_hour: u8, end_hour: u8) -> Self {
        Self {
            start_hour,
            end_hour,
        }
    }

    /// Whether `hour` falls in `[start, end)`.
    pub const fn contains(&self, hour: u8) -> bool {
        let hour = hour % 24;
        if self.start_hour <= self.end_hour {
            hour >= self.start_hour && hour < self.end_hour
        } else {
            hour >= self.start_hour || hour < self.end_hour
        }
    }
}

/// When an activity can be performed.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Availability {
    Infinite,
    Window(HourWindow),
}

impl Availability {
    pub const fn is_available_at(&self, hour: u8) -> bool {
        match self {
            Self::Infinite => true,
            Self::Window(window) => window.contains(hour),
        }
    }
}

/// One entry of a gathering drop table.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ResourceDrop {
    pub item: String,
    pub chance: SkillScaled<f64>,
    pub amount: SkillScaled<CountRange>,
    /// Minimum base skill level needed before this resource drops at all.
    #[cfg_attr(feature = "serde", serde(default))]
    pub skill_required: Option<u32>,
}

/// Drop table and cycle time of a gathering activity.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GainedResources {
    pub resources: Vec<ResourceDrop>,
    /// Ticks per gather cycle, untrained and mastered.
    pub time_period: SkillScaled<u32>,
}

/// What the hero gets out of an activity.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ActivityWork {
    Gathering(GainedResources),
    /// Paid job: `payment` per `working_period` ticks.
    Job {
        working_period: u32,
        payment: SkillScaled<u64>,
    },
}

/// A recurring activity owned by a location.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LocationActivity {
    pub name: String,
    #[cfg_attr(feature = "serde", serde(default))]
    pub description: String,
    #[cfg_attr(feature = "serde", serde(default))]
    pub starting_text: String,
    /// Skills whose levels drive the efficiency.
    pub base_skills: Vec<String>,
    pub work: ActivityWork,
    /// Level window mapped to progress `[0, 1]`. Defaults to
    /// `[0, max_level]` of each base skill.
    #[cfg_attr(feature = "serde", serde(default))]
    pub skill_required: Option<SkillWindow>,
    #[cfg_attr(feature = "serde", serde(default = "enabled"))]
    pub scales_with_skill: bool,
    #[cfg_attr(feature = "serde", serde(default))]
    pub infinite: bool,
    #[cfg_attr(feature = "serde", serde(default))]
    pub availability_time: Option<HourWindow>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub require_tool: bool,
    /// Tool type whose equipped bonus speeds the activity up.
    #[cfg_attr(feature = "serde", serde(default))]
    pub tool_type: Option<String>,
    #[cfg_attr(feature = "serde", serde(default = "enabled"))]
    pub is_unlocked: bool,
}

#[cfg(feature = "serde")]
fn enabled() -> bool {
    true
}

impl LocationActivity {
    pub fn new(name: impl Into<String>, base_skills: Vec<String>, work: ActivityWork) -> Self {
        Self {
            name: name.into(),
            description: String::new(),
            starting_text: String::new(),
            base_skills,
            work,
            skill_required: None,
            scales_with_skill: true,
            infinite: true,
            availability_time: None,
            require_tool: false,
            tool_type: None,
            is_unlocked: true,
        }
    }

    /// Checks the definition and returns its availability.
    ///
    /// # Errors
    ///
    /// - [`ContentError::MissingAvailability`] for a non-infinite activity
    ///   without a window
    /// - [`ContentError::NoBaseSkill`] when it scales with skill but names none
    pub fn validate(&self, location: &str) -> Result<Availability, ContentError> {
        if self.scales_with_skill && self.base_skills.is_empty() {
            return Err(ContentError::NoBaseSkill {
                location: location.to_string(),
                activity: self.name.clone(),
            });
        }
        self.availability().ok_or_else(|| ContentError::MissingAvailability {
            location: location.to_string(),
            activity: self.name.clone(),
        })
    }

    /// `None` when the activity is neither infinite nor windowed.
    pub fn availability(&self) -> Option<Availability> {
        if self.infinite {
            return Some(Availability::Infinite);
        }
        self.availability_time.map(Availability::Window)
    }

    /// Minimum base skill level the whole activity asks for.
    pub fn required_level(&self) -> Option<u32> {
        self.skill_required.map(|w| w.min).filter(|min| *min > 0)
    }

    pub fn gathering(&self) -> Option<&GainedResources> {
        match &self.work {
            ActivityWork::Gathering(resources) => Some(resources),
            ActivityWork::Job { .. } => None,
        }
    }
}
