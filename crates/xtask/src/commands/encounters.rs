//! Roll encounters in a combat zone
//!
//! Spawns groups back to back, counting each one as defeated, so boss kills
//! and clear rewards show up at the right points.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use console::style;
use realm_runtime::{RecordingSink, Session};

use crate::utils;

/// Roll a sequence of encounters
#[derive(Parser, Debug)]
pub struct Encounters {
    /// Combat zone name
    #[arg(value_name = "ZONE")]
    zone: String,

    /// Number of groups to spawn
    #[arg(short = 'n', long, default_value_t = 10)]
    count: u32,

    /// Session seed (defaults to GAME_SEED or random)
    #[arg(short, long)]
    seed: Option<u64>,

    /// Content directory (defaults to CONTENT_DATA_DIR or the sample data)
    #[arg(short, long, value_name = "DIR")]
    data_dir: Option<PathBuf>,
}

impl Encounters {
    pub fn execute(self) -> Result<()> {
        let content = utils::load_repository(&utils::data_dir(self.data_dir))?;
        let zone = content
            .zone_id(&self.zone)
            .with_context(|| format!("Unknown combat zone: {}", self.zone))?;

        let mut session = Session::new(content, utils::seed(self.seed));
        // Inspection should not depend on how the zone is reached.
        session.world_mut().unlock_zone(zone);

        let mut sink = RecordingSink::new();
        for kill in 0..self.count {
            let encounter = session.next_encounter(zone)?;
            let names: Vec<String> = encounter
                .enemies
                .iter()
                .map(|e| format!("{} ({} hp)", e.name, e.max_health))
                .collect();
            println!(
                "{:>4} {:<24} {}",
                kill,
                style(format!("{:?}", encounter.source)).yellow(),
                names.join(", ")
            );

            if let Some(event) = session.record_group_killed(zone, &mut sink)? {
                println!(
                    "     {} clear #{}{}",
                    style("★").green().bold(),
                    event.clears,
                    if event.finished { " (zone finished)" } else { "" }
                );
                if event.finished {
                    break;
                }
            }
        }

        println!("Rewards received: {}, money {}", sink.rewards.len(), sink.money());
        Ok(())
    }
}
