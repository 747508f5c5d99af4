//! Print activity efficiency tables
//!
//! Sets every base skill of the activity to each level in turn and prints
//! the gather time and drop table, or the pay of a job.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use console::style;
use realm_core::{ActivityRef, ActivityWork, EfficiencyModel, Env, SkillOracle};

use crate::utils;

/// Print an activity's efficiency across skill levels
#[derive(Parser, Debug)]
pub struct Activity {
    /// Location owning the activity
    #[arg(value_name = "LOCATION")]
    location: String,

    /// Activity name
    #[arg(value_name = "ACTIVITY")]
    activity: String,

    /// Hero profile as JSON; its base skill levels are overridden per row
    #[arg(long, value_name = "FILE")]
    hero: Option<PathBuf>,

    /// Content directory (defaults to CONTENT_DATA_DIR or the sample data)
    #[arg(short, long, value_name = "DIR")]
    data_dir: Option<PathBuf>,
}

impl Activity {
    pub fn execute(self) -> Result<()> {
        let content = utils::load_repository(&utils::data_dir(self.data_dir))?;
        let mut hero = utils::load_hero(self.hero.as_deref(), &content)?;

        let id = ActivityRef {
            location: self.location,
            activity: self.activity,
        };
        let entry = content.activity(&id).with_context(|| {
            format!("Unknown activity '{}' in '{}'", id.activity, id.location)
        })?;
        let activity = &entry.activity;

        let max_level = activity
            .base_skills
            .iter()
            .map(|skill| hero.max_level_of(skill))
            .max()
            .unwrap_or(0);

        println!(
            "{} in {} ({:?}), base skills: {}",
            style(&activity.name).bold(),
            id.location,
            entry.availability,
            activity.base_skills.join(", ")
        );

        for level in 0..=max_level {
            for skill in &activity.base_skills {
                hero.skills.insert(skill.clone(), level);
            }
            let env = Env::empty().with_skills(&hero).with_character(&hero);
            let model = EfficiencyModel::new(env, content.config());

            match &activity.work {
                ActivityWork::Gathering(_) => {
                    let efficiency = model.gathering(activity)?;
                    let drops: Vec<String> = efficiency
                        .drops
                        .iter()
                        .map(|drop| match drop.unmet_requirement {
                            Some(required) => format!("{} (needs {})", drop.item, required),
                            None => format!(
                                "{} {:.0}% x{}-{}",
                                drop.item,
                                drop.chance * 100.0,
                                drop.count.min,
                                drop.count.max
                            ),
                        })
                        .collect();
                    println!(
                        "  lvl {:>3}  {:>5} ticks  {}",
                        level,
                        efficiency.gather_time,
                        drops.join(", ")
                    );
                }
                ActivityWork::Job { .. } => {
                    let pay = model.job_payment(activity)?;
                    println!(
                        "  lvl {:>3}  {:>5} coins per {} ticks",
                        level, pay.payment, pay.working_period
                    );
                }
            }
        }
        Ok(())
    }
}
