//! Session orchestration.
//!
//! A [`Session`] owns the validated content and the mutable world progress.
//! Every public call is one synchronous step: it draws a fresh nonce for its
//! rolls, runs the matching core resolver, applies world-level unlocks and
//! hands everything hero-facing to a [`RewardSink`].

use std::collections::BTreeMap;

use realm_content::{ActivityEntry, ContentFactory, ContentRepository};
use realm_core::{
    ActionAttempt, ActionOutcome, ActionRef, ActionResolver, ActivityEfficiency, ActivityRef,
    CharacterOracle, ClearEvent, CombatZone, EfficiencyModel, Encounter, EncounterError,
    EncounterGenerator, Env, EnvironmentAggregator, EnvironmentPenalties, GenerationHookRegistry,
    JobPayment, LocationAction, PcgRng, RewardPayload, RewardSink, RollStream, SkillOracle,
    StartOutcome, WorldState, ZoneId,
};

use crate::config::RuntimeConfig;
use crate::error::{Result, RuntimeError};

/// Roll subjects, so two resolvers sharing a nonce never share rolls.
const ENCOUNTER_ROLLS: u32 = 1;
const ACTION_ROLLS: u32 = 2;

pub struct Session {
    content: ContentRepository,
    world: WorldState,
    hooks: GenerationHookRegistry,
}

impl Session {
    /// Starts a new game over already built content.
    pub fn new(content: ContentRepository, game_seed: u64) -> Self {
        let world = content.initial_world_state(game_seed);
        Self::with_state(content, world)
    }

    /// Resumes a game from saved world progress.
    pub fn with_state(content: ContentRepository, world: WorldState) -> Self {
        Self {
            content,
            world,
            hooks: GenerationHookRegistry::default(),
        }
    }

    /// Loads content from `config.data_dir` and starts a new game.
    pub fn from_config(config: &RuntimeConfig) -> Result<Self> {
        let content = ContentFactory::new(&config.data_dir)
            .build_repository()
            .map_err(RuntimeError::Load)?;
        let game_seed = config.resolve_seed();
        tracing::info!(
            data_dir = %config.data_dir.display(),
            game_seed,
            "session started"
        );
        Ok(Self::new(content, game_seed))
    }

    pub fn with_hooks(mut self, hooks: GenerationHookRegistry) -> Self {
        self.hooks = hooks;
        self
    }

    pub fn content(&self) -> &ContentRepository {
        &self.content
    }

    pub fn world(&self) -> &WorldState {
        &self.world
    }

    /// Direct access to world progress, for tools and save editing.
    pub fn world_mut(&mut self) -> &mut WorldState {
        &mut self.world
    }

    pub fn hooks_mut(&mut self) -> &mut GenerationHookRegistry {
        &mut self.hooks
    }

    pub fn into_world(self) -> WorldState {
        self.world
    }

    fn zone(&self, id: ZoneId) -> Result<&CombatZone> {
        self.content.zone(id).ok_or(RuntimeError::UnknownZone(id))
    }

    fn action(&self, id: &ActionRef) -> Result<&LocationAction> {
        self.content
            .action(id)
            .ok_or_else(|| RuntimeError::UnknownAction(id.clone()))
    }

    fn activity(&self, id: &ActivityRef) -> Result<&ActivityEntry> {
        let entry = self
            .content
            .activity(id)
            .ok_or_else(|| RuntimeError::UnknownActivity(id.clone()))?;
        if !self.world.is_activity_unlocked(id) {
            return Err(RuntimeError::ActivityLocked(id.clone()));
        }
        Ok(entry)
    }

    /// Spawns the next enemy group for a zone.
    pub fn next_encounter(&mut self, zone: ZoneId) -> Result<Encounter> {
        let nonce = self.world.next_nonce();
        let combat_zone = self.zone(zone)?;
        let progress = self.world.zone(zone);

        let rng = PcgRng;
        let mut rolls = RollStream::new(&rng, self.world.game_seed, nonce, ENCOUNTER_ROLLS);
        let env = Env::empty().with_enemies(&self.content);
        let encounter = EncounterGenerator::new(env, &self.hooks).next_enemies(
            combat_zone,
            &progress,
            &mut rolls,
        )?;

        tracing::trace!(zone = %zone, nonce, draws = rolls.draws(), "encounter rolled");
        Ok(encounter)
    }

    /// Records a defeated group and pays out any clear reward.
    pub fn record_group_killed(
        &mut self,
        zone: ZoneId,
        sink: &mut dyn RewardSink,
    ) -> Result<Option<ClearEvent>> {
        let progress = self.world.zone(zone);
        let combat_zone = self
            .content
            .zone(zone)
            .ok_or(RuntimeError::UnknownZone(zone))?;
        if !progress.is_unlocked {
            return Err(EncounterError::ZoneLocked {
                zone: combat_zone.name().to_string(),
            }
            .into());
        }
        if progress.is_finished {
            return Err(EncounterError::ZoneFinished {
                zone: combat_zone.name().to_string(),
            }
            .into());
        }

        let event = self.world.zone_mut(zone).record_group_killed(combat_zone);
        if let Some(reward) = event.as_ref().and_then(|e| e.reward.clone()) {
            self.apply_reward(&reward, sink);
        }
        Ok(event)
    }

    /// Hazard penalties of a zone, raw and as mitigated by the hero's skills.
    pub fn environment_penalties(
        &self,
        zone: ZoneId,
        skills: &dyn SkillOracle,
    ) -> Result<EnvironmentPenalties> {
        let combat_zone = self.zone(zone)?;
        let env = Env::empty()
            .with_skills(skills)
            .with_location_types(&self.content);
        let penalties =
            EnvironmentAggregator::new(env, self.content.config()).penalties(combat_zone.types())?;
        Ok(penalties)
    }

    /// Skill xp earned per combat action in a zone.
    pub fn zone_skill_xp(&self, zone: ZoneId) -> Result<BTreeMap<String, f64>> {
        let combat_zone = self.zone(zone)?;
        let env = Env::empty().with_location_types(&self.content);
        let xp = EnvironmentAggregator::new(env, self.content.config()).skill_xp(combat_zone.types())?;
        Ok(xp)
    }

    pub fn can_start_action<H>(&self, id: &ActionRef, hero: &H) -> Result<()>
    where
        H: SkillOracle + CharacterOracle,
    {
        let action = self.action(id)?;
        let env = Env::empty().with_skills(hero).with_character(hero);
        ActionResolver::new(env).can_be_started(id, action, self.world.action_status(id))?;
        Ok(())
    }

    /// Starts an attempt. Attempts that resolve immediately are applied
    /// before returning.
    pub fn start_action<H>(&mut self, id: ActionRef, hero: &mut H) -> Result<StartOutcome>
    where
        H: SkillOracle + CharacterOracle + RewardSink,
    {
        let nonce = self.world.next_nonce();
        let status = self.world.action_status(&id);
        let action = self.action(&id)?;

        let rng = PcgRng;
        let mut rolls = RollStream::new(&rng, self.world.game_seed, nonce, ACTION_ROLLS);
        let env = Env::empty().with_skills(&*hero).with_character(&*hero);
        let outcome = ActionResolver::new(env).start(id, action, status, &mut rolls)?;

        if let StartOutcome::Resolved(resolved) = &outcome {
            self.apply_outcome(resolved, hero);
        }
        Ok(outcome)
    }

    /// Completes an attempt started earlier and applies its outcome.
    pub fn finish_action<H>(&mut self, attempt: &ActionAttempt, hero: &mut H) -> Result<ActionOutcome>
    where
        H: SkillOracle + CharacterOracle + RewardSink,
    {
        let nonce = self.world.next_nonce();
        let action = self.action(&attempt.action)?;

        let rng = PcgRng;
        let mut rolls = RollStream::new(&rng, self.world.game_seed, nonce, ACTION_ROLLS);
        let env = Env::empty().with_skills(&*hero).with_character(&*hero);
        let outcome = ActionResolver::new(env).finish(attempt, action, &mut rolls)?;

        self.apply_outcome(&outcome, hero);
        Ok(outcome)
    }

    /// Per-cycle gathering figures at the hero's current skill.
    pub fn activity_efficiency<H>(&self, id: &ActivityRef, hero: &H) -> Result<ActivityEfficiency>
    where
        H: SkillOracle + CharacterOracle,
    {
        let entry = self.activity(id)?;
        let env = Env::empty().with_skills(hero).with_character(hero);
        let efficiency = EfficiencyModel::new(env, self.content.config()).gathering(&entry.activity)?;
        Ok(efficiency)
    }

    /// Pay of a job at the hero's current skill.
    pub fn job_payment<H>(&self, id: &ActivityRef, hero: &H) -> Result<JobPayment>
    where
        H: SkillOracle + CharacterOracle,
    {
        let entry = self.activity(id)?;
        let env = Env::empty().with_skills(hero).with_character(hero);
        let payment = EfficiencyModel::new(env, self.content.config()).job_payment(&entry.activity)?;
        Ok(payment)
    }

    /// Whether an unlocked activity can be worked at this hour of the day.
    pub fn is_activity_available(&self, id: &ActivityRef, hour: u8) -> Result<bool> {
        Ok(self.activity(id)?.availability.is_available_at(hour))
    }

    fn apply_outcome<S>(&mut self, outcome: &ActionOutcome, sink: &mut S)
    where
        S: RewardSink,
    {
        self.world
            .set_action_status(outcome.action.clone(), outcome.next_status);
        if !outcome.consumed_items.is_empty() {
            sink.consume(&outcome.consumed_items);
        }
        if let Some(reward) = &outcome.rewards {
            self.apply_reward(reward, sink);
        }
    }

    /// Applies the world-level unlocks of a payload and forwards it to the
    /// sink.
    fn apply_reward(&mut self, reward: &RewardPayload, sink: &mut dyn RewardSink) {
        let unlocks = &reward.unlocks;

        for location in &unlocks.locations {
            if self.world.unlock_location(location.clone()) {
                tracing::info!(location = %location, "location unlocked");
            }
        }
        for zone in &unlocks.zones {
            match self.content.zone_id(zone) {
                Some(id) => {
                    if self.world.unlock_zone(id) {
                        tracing::info!(zone = %zone, "zone unlocked");
                    }
                }
                None => tracing::warn!(zone = %zone, "reward unlocks unknown zone"),
            }
        }
        for action in &unlocks.actions {
            self.world.unlock_action(action.clone());
        }
        for activity in &unlocks.activities {
            self.world.unlock_activity(activity.clone());
        }
        if let Some(destination) = &reward.move_to {
            self.world.unlock_location(destination.clone());
            self.world.current_location = Some(destination.clone());
        }

        sink.apply(reward);
    }
}
