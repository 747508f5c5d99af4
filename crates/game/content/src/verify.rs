//! Startup referential-integrity verifier.
//!
//! Walks every catalog and collects every reference to a skill, item,
//! enemy, location type, location, zone, action or activity that does not
//! exist. Unlike [`crate::ContentRepository::build`], it does not stop at
//! the first problem.

use std::collections::{HashMap, HashSet};

use realm_core::{
    ActionRef, ActivityRef, ActivityWork, CombatTrigger, ConditionTier, ErrorSeverity, GameError,
    LocationType, RewardPayload,
};

use crate::catalog::ContentBundle;

/// One dangling reference.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum VerifyError {
    #[error("{context}: unknown enemy '{enemy}'")]
    UnknownEnemy { context: String, enemy: String },

    #[error("{context}: unknown location type '{kind}'")]
    UnknownLocationType { context: String, kind: String },

    #[error("{context}: location type '{kind}' has no stage {stage}")]
    UnknownTypeStage {
        context: String,
        kind: String,
        stage: u8,
    },

    #[error("{context}: unknown skill '{skill}'")]
    UnknownSkill { context: String, skill: String },

    #[error("{context}: unknown item '{item}'")]
    UnknownItem { context: String, item: String },

    #[error("{context}: unknown location '{location}'")]
    UnknownLocation { context: String, location: String },

    #[error("{context}: unknown zone '{zone}'")]
    UnknownZone { context: String, zone: String },

    #[error("{context}: unknown action '{}' in '{}'", action.action, action.location)]
    UnknownAction { context: String, action: ActionRef },

    #[error("{context}: unknown activity '{}' in '{}'", activity.activity, activity.location)]
    UnknownActivity {
        context: String,
        activity: ActivityRef,
    },

    #[error("{context}: connection to unknown destination '{target}'")]
    UnknownDestination { context: String, target: String },
}

impl GameError for VerifyError {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Fatal
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::UnknownEnemy { .. } => "VERIFY_UNKNOWN_ENEMY",
            Self::UnknownLocationType { .. } => "VERIFY_UNKNOWN_LOCATION_TYPE",
            Self::UnknownTypeStage { .. } => "VERIFY_UNKNOWN_TYPE_STAGE",
            Self::UnknownSkill { .. } => "VERIFY_UNKNOWN_SKILL",
            Self::UnknownItem { .. } => "VERIFY_UNKNOWN_ITEM",
            Self::UnknownLocation { .. } => "VERIFY_UNKNOWN_LOCATION",
            Self::UnknownZone { .. } => "VERIFY_UNKNOWN_ZONE",
            Self::UnknownAction { .. } => "VERIFY_UNKNOWN_ACTION",
            Self::UnknownActivity { .. } => "VERIFY_UNKNOWN_ACTIVITY",
            Self::UnknownDestination { .. } => "VERIFY_UNKNOWN_DESTINATION",
        }
    }
}

/// Every dangling reference found in a bundle.
#[derive(Clone, Debug, Default, PartialEq, Eq, thiserror::Error)]
#[error("{} dangling content reference(s)", .findings.len())]
pub struct VerificationReport {
    pub findings: Vec<VerifyError>,
}

impl VerificationReport {
    pub fn is_clean(&self) -> bool {
        self.findings.is_empty()
    }

    pub fn len(&self) -> usize {
        self.findings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.findings.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &VerifyError> + '_ {
        self.findings.iter()
    }

    /// `Ok` when clean, the report itself otherwise.
    pub fn into_result(self) -> Result<(), VerificationReport> {
        if self.is_clean() { Ok(()) } else { Err(self) }
    }
}

struct Names<'a> {
    skills: HashSet<&'a str>,
    items: HashSet<&'a str>,
    enemies: HashSet<&'a str>,
    location_types: HashMap<&'a str, &'a LocationType>,
    locations: HashSet<&'a str>,
    zones: HashSet<&'a str>,
    actions: HashSet<(&'a str, &'a str)>,
    activities: HashSet<(&'a str, &'a str)>,
}

impl<'a> Names<'a> {
    fn collect(bundle: &'a ContentBundle) -> Self {
        Self {
            skills: bundle.skills.iter().map(|s| s.name.as_str()).collect(),
            items: bundle.items.iter().map(|i| i.name.as_str()).collect(),
            enemies: bundle.enemies.iter().map(|e| e.name.as_str()).collect(),
            location_types: bundle
                .location_types
                .iter()
                .map(|t| (t.name.as_str(), t))
                .collect(),
            locations: bundle.locations.iter().map(|l| l.name.as_str()).collect(),
            zones: bundle.zones.iter().map(|z| z.zone.name.as_str()).collect(),
            actions: bundle
                .locations
                .iter()
                .flat_map(|l| l.actions.iter().map(|a| (l.name.as_str(), a.name.as_str())))
                .collect(),
            activities: bundle
                .locations
                .iter()
                .flat_map(|l| {
                    l.activities
                        .iter()
                        .map(|a| (l.name.as_str(), a.name.as_str()))
                })
                .collect(),
        }
    }
}

struct Walker<'a> {
    names: Names<'a>,
    findings: Vec<VerifyError>,
}

impl Walker<'_> {
    fn skill(&mut self, context: &str, skill: &str) {
        if !self.names.skills.contains(skill) {
            self.findings.push(VerifyError::UnknownSkill {
                context: context.to_string(),
                skill: skill.to_string(),
            });
        }
    }

    fn item(&mut self, context: &str, item: &str) {
        if !self.names.items.contains(item) {
            self.findings.push(VerifyError::UnknownItem {
                context: context.to_string(),
                item: item.to_string(),
            });
        }
    }

    fn enemy(&mut self, context: &str, enemy: &str) {
        if !self.names.enemies.contains(enemy) {
            self.findings.push(VerifyError::UnknownEnemy {
                context: context.to_string(),
                enemy: enemy.to_string(),
            });
        }
    }

    fn location(&mut self, context: &str, location: &str) {
        if !self.names.locations.contains(location) {
            self.findings.push(VerifyError::UnknownLocation {
                context: context.to_string(),
                location: location.to_string(),
            });
        }
    }

    fn triggers(&mut self, context: &str, triggers: &[CombatTrigger]) {
        for trigger in triggers {
            match trigger {
                CombatTrigger::Summon { enemy } => self.enemy(context, enemy),
                CombatTrigger::Drop { item, .. } => self.item(context, item),
                CombatTrigger::Say { .. }
                | CombatTrigger::Heal { .. }
                | CombatTrigger::Inflict { .. } => {}
            }
        }
    }

    fn tier(&mut self, context: &str, tier: &ConditionTier) {
        for skill in tier.skills.keys() {
            self.skill(context, skill);
        }
        for condition in &tier.items {
            self.item(context, &condition.item);
        }
    }

    fn reward(&mut self, context: &str, reward: &RewardPayload) {
        for stack in &reward.items {
            self.item(context, &stack.item);
        }
        for skill in reward.skill_xp.keys() {
            self.skill(context, skill);
        }
        for location in &reward.unlocks.locations {
            self.location(context, location);
        }
        for zone in &reward.unlocks.zones {
            if !self.names.zones.contains(zone.as_str()) {
                self.findings.push(VerifyError::UnknownZone {
                    context: context.to_string(),
                    zone: zone.clone(),
                });
            }
        }
        for action in &reward.unlocks.actions {
            let key = (action.location.as_str(), action.action.as_str());
            if !self.names.actions.contains(&key) {
                self.findings.push(VerifyError::UnknownAction {
                    context: context.to_string(),
                    action: action.clone(),
                });
            }
        }
        for activity in &reward.unlocks.activities {
            let key = (activity.location.as_str(), activity.activity.as_str());
            if !self.names.activities.contains(&key) {
                self.findings.push(VerifyError::UnknownActivity {
                    context: context.to_string(),
                    activity: activity.clone(),
                });
            }
        }
        if let Some(destination) = &reward.move_to {
            self.location(context, destination);
        }
    }
}

/// Collects every dangling reference in a bundle.
pub fn verify(bundle: &ContentBundle) -> VerificationReport {
    let mut walker = Walker {
        names: Names::collect(bundle),
        findings: Vec::new(),
    };

    for enemy in &bundle.enemies {
        let context = format!("enemy '{}'", enemy.name);
        for loot in &enemy.loot {
            walker.item(&context, &loot.item);
        }
        let triggers = &enemy.triggers;
        for list in [
            &triggers.on_entry,
            &triggers.on_strike,
            &triggers.on_connected_strike,
            &triggers.on_death,
        ] {
            walker.triggers(&context, list);
        }
    }

    for location_type in &bundle.location_types {
        let context = format!("location type '{}'", location_type.name);
        for stage in &location_type.stages {
            walker.skill(&context, &stage.related_skill);
        }
    }

    for definition in &bundle.zones {
        let zone = &definition.zone;
        let context = format!("zone '{}'", zone.name);
        walker.location(&context, &definition.parent);

        let rare = zone.rare.iter().flat_map(|r| r.enemies.iter());
        for enemy in zone.enemies.enemy_names().chain(rare.map(String::as_str)) {
            walker.enemy(&context, enemy);
        }
        for enemy in &zone.boss {
            walker.enemy(&context, enemy);
        }

        for zone_type in &zone.types {
            match walker.names.location_types.get(zone_type.kind.as_str()) {
                None => walker.findings.push(VerifyError::UnknownLocationType {
                    context: context.clone(),
                    kind: zone_type.kind.clone(),
                }),
                Some(location_type) if location_type.stage(zone_type.stage).is_none() => {
                    walker.findings.push(VerifyError::UnknownTypeStage {
                        context: context.clone(),
                        kind: zone_type.kind.clone(),
                        stage: zone_type.stage,
                    })
                }
                Some(_) => {}
            }
        }

        for reward in zone.first_reward.iter().chain(zone.repeatable_reward.iter()) {
            walker.reward(&context, reward);
        }
    }

    for location in &bundle.locations {
        for target in &location.connections {
            let known = walker.names.locations.contains(target.as_str())
                || walker.names.zones.contains(target.as_str());
            if !known {
                walker.findings.push(VerifyError::UnknownDestination {
                    context: format!("location '{}'", location.name),
                    target: target.clone(),
                });
            }
        }

        for action in &location.actions {
            let context = format!("action '{}' in '{}'", action.name, location.name);
            walker.tier(&context, &action.required);
            walker.tier(&context, &action.conditions.minimum);
            if let Some(ideal) = &action.conditions.ideal {
                walker.tier(&context, ideal);
            }
            walker.reward(&context, &action.rewards);
            if let Some(loss) = &action.loss_rewards {
                walker.reward(&context, loss);
            }
        }

        for activity in &location.activities {
            let context = format!("activity '{}' in '{}'", activity.name, location.name);
            for skill in &activity.base_skills {
                walker.skill(&context, skill);
            }
            if let ActivityWork::Gathering(resources) = &activity.work {
                for resource in &resources.resources {
                    walker.item(&context, &resource.item);
                }
            }
        }
    }

    if !bundle.skills.iter().any(|s| s.name == bundle.config.time_compression_skill) {
        walker.skill("config", &bundle.config.time_compression_skill);
    }

    for finding in &walker.findings {
        tracing::warn!(code = finding.error_code(), "{finding}");
    }

    VerificationReport {
        findings: walker.findings,
    }
}
