//! Resolve a gated action repeatedly
//!
//! Runs independent attempts for one hero and prints how often each outcome
//! came up next to the success chance the resolver computed.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use console::style;
use realm_core::{
    ActionRef, ActionResolver, ActionStatus, Env, OutcomeKind, PcgRng, RollStream, StartOutcome,
};

use crate::utils;

/// Resolve an action many times
#[derive(Parser, Debug)]
pub struct Action {
    /// Location owning the action
    #[arg(value_name = "LOCATION")]
    location: String,

    /// Action name
    #[arg(value_name = "ACTION")]
    action: String,

    /// Hero profile as JSON (skills, items, stats, tools)
    #[arg(long, value_name = "FILE")]
    hero: Option<PathBuf>,

    /// Number of independent attempts
    #[arg(short = 'n', long, default_value_t = 1000)]
    trials: u32,

    /// Session seed (defaults to GAME_SEED or random)
    #[arg(short, long)]
    seed: Option<u64>,

    /// Content directory (defaults to CONTENT_DATA_DIR or the sample data)
    #[arg(short, long, value_name = "DIR")]
    data_dir: Option<PathBuf>,
}

impl Action {
    pub fn execute(self) -> Result<()> {
        let content = utils::load_repository(&utils::data_dir(self.data_dir))?;
        let hero = utils::load_hero(self.hero.as_deref(), &content)?;

        let id = ActionRef {
            location: self.location,
            action: self.action,
        };
        let action = content
            .action(&id)
            .with_context(|| format!("Unknown action '{}' in '{}'", id.action, id.location))?;

        let env = Env::empty().with_skills(&hero).with_character(&hero);
        let resolver = ActionResolver::new(env);
        resolver.can_be_started(&id, action, ActionStatus::Unlocked)?;

        let seed = utils::seed(self.seed);
        let rng = PcgRng;
        let (mut successes, mut random_losses, mut conditional_losses) = (0u32, 0u32, 0u32);
        let mut chance = 0.0;
        let mut score = 0.0;

        for trial in 0..self.trials {
            let mut rolls = RollStream::new(&rng, seed, u64::from(trial), 0);
            let outcome =
                match resolver.start(id.clone(), action, ActionStatus::Unlocked, &mut rolls)? {
                    StartOutcome::Resolved(outcome) => outcome,
                    StartOutcome::InProgress(attempt) => {
                        resolver.finish(&attempt, action, &mut rolls)?
                    }
                };
            chance = outcome.success_chance;
            score = outcome.score;
            match outcome.kind {
                OutcomeKind::Success => successes += 1,
                OutcomeKind::RandomLoss => random_losses += 1,
                OutcomeKind::ConditionalLoss => conditional_losses += 1,
            }
        }

        println!(
            "{} in {}: score {:.3}, success chance {:.3}",
            style(&id.action).bold(),
            id.location,
            score,
            chance
        );
        let trials = f64::from(self.trials.max(1));
        for (label, count) in [
            ("success", successes),
            ("random loss", random_losses),
            ("conditional loss", conditional_losses),
        ] {
            println!(
                "  {:<18} {:>6} ({:.1}%)",
                label,
                count,
                100.0 * f64::from(count) / trials
            );
        }
        Ok(())
    }
}
