//! Recurring location activities: gathering and paid jobs.
mod definition;
mod efficiency;

pub use definition::{
    ActivityWork, Availability, GainedResources, HourWindow, LocationActivity, ResourceDrop,
};
pub use efficiency::{
    ActivityEfficiency, ActivityError, EfficiencyModel, JobPayment, ScaledDrop, skill_modifier,
};
