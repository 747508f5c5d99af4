//! Arena-style content repository.
//!
//! Locations and zones live in flat tables indexed by [`LocationId`] and
//! [`ZoneId`]; cross-references are ids. The repository is built once at
//! startup, validating every zone and activity, and is then passed by
//! reference to the resolvers.

use std::collections::HashMap;

use realm_core::{
    ActionRef, ActionStatus, ActivityRef, Availability, CombatZone, ContentError, EnemyOracle,
    EnemyTemplate, GameConfig, LocationAction, LocationActivity, LocationId, LocationType,
    LocationTypeOracle, WorldState, ZoneId, ZoneProgress,
};

use crate::catalog::{ContentBundle, ItemDefinition, SkillDefinition};

/// Where a connection leads.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Destination {
    Location(LocationId),
    Zone(ZoneId),
}

/// An activity with its validated availability.
#[derive(Clone, Debug, PartialEq)]
pub struct ActivityEntry {
    pub activity: LocationActivity,
    pub availability: Availability,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Location {
    id: LocationId,
    name: String,
    description: String,
    connections: Vec<Destination>,
    actions: Vec<LocationAction>,
    activities: Vec<ActivityEntry>,
    starts_unlocked: bool,
}

impl Location {
    pub fn id(&self) -> LocationId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn connections(&self) -> &[Destination] {
        &self.connections
    }

    pub fn actions(&self) -> &[LocationAction] {
        &self.actions
    }

    pub fn action(&self, name: &str) -> Option<&LocationAction> {
        self.actions.iter().find(|a| a.name == name)
    }

    pub fn activities(&self) -> &[ActivityEntry] {
        &self.activities
    }

    pub fn activity(&self, name: &str) -> Option<&ActivityEntry> {
        self.activities.iter().find(|a| a.activity.name == name)
    }

    pub fn starts_unlocked(&self) -> bool {
        self.starts_unlocked
    }
}

/// Immutable content tables for one session.
#[derive(Clone, Debug)]
pub struct ContentRepository {
    config: GameConfig,
    locations: Vec<Location>,
    zones: Vec<CombatZone>,
    location_ids: HashMap<String, LocationId>,
    zone_ids: HashMap<String, ZoneId>,
    enemies: HashMap<String, EnemyTemplate>,
    location_types: HashMap<String, LocationType>,
    skills: HashMap<String, SkillDefinition>,
    items: HashMap<String, ItemDefinition>,
    start_location: Option<LocationId>,
}

fn index_by_name<T>(
    kind: &'static str,
    entries: Vec<T>,
    name: impl Fn(&T) -> &str,
) -> Result<HashMap<String, T>, ContentError> {
    let mut table = HashMap::with_capacity(entries.len());
    for entry in entries {
        let key = name(&entry).to_string();
        if table.contains_key(&key) {
            return Err(ContentError::Duplicate { kind, name: key });
        }
        table.insert(key, entry);
    }
    Ok(table)
}

fn ensure_unique<'a>(
    kind: &'static str,
    names: impl Iterator<Item = &'a str>,
) -> Result<(), ContentError> {
    let mut seen = std::collections::HashSet::new();
    for name in names {
        if !seen.insert(name) {
            return Err(ContentError::Duplicate {
                kind,
                name: name.to_string(),
            });
        }
    }
    Ok(())
}

impl ContentRepository {
    /// Builds the repository, failing on the first fatal configuration error.
    ///
    /// # Errors
    ///
    /// Any [`ContentError`]: duplicate names, a zone with no enemy source
    /// or a bad type stage, a zone under an unknown location, a non-infinite
    /// activity without a window, or an unknown start location.
    pub fn build(bundle: ContentBundle) -> Result<Self, ContentError> {
        let ContentBundle {
            config,
            skills,
            items,
            enemies,
            location_types,
            locations: location_configs,
            zones: zone_definitions,
            start_location,
        } = bundle;

        let skills = index_by_name("skill", skills, |s| s.name.as_str())?;
        let items = index_by_name("item", items, |i| i.name.as_str())?;
        let enemies = index_by_name("enemy", enemies, |e| e.name.as_str())?;
        let location_types = index_by_name("location type", location_types, |t| t.name.as_str())?;

        ensure_unique(
            "location or zone",
            location_configs
                .iter()
                .map(|l| l.name.as_str())
                .chain(zone_definitions.iter().map(|z| z.zone.name.as_str())),
        )?;

        let location_ids: HashMap<String, LocationId> = location_configs
            .iter()
            .enumerate()
            .map(|(i, l)| (l.name.clone(), LocationId(i as u32)))
            .collect();

        let mut zones = Vec::with_capacity(zone_definitions.len());
        let mut zone_ids = HashMap::with_capacity(zone_definitions.len());
        for (i, definition) in zone_definitions.into_iter().enumerate() {
            let parent = *location_ids.get(&definition.parent).ok_or_else(|| {
                ContentError::UnknownParent {
                    zone: definition.zone.name.clone(),
                    parent: definition.parent.clone(),
                }
            })?;
            let id = ZoneId(i as u32);
            zone_ids.insert(definition.zone.name.clone(), id);
            zones.push(CombatZone::new(id, parent, definition.zone, &config)?);
        }

        let mut locations = Vec::with_capacity(location_configs.len());
        for (i, location) in location_configs.into_iter().enumerate() {
            ensure_unique("action", location.actions.iter().map(|a| a.name.as_str()))?;
            ensure_unique(
                "activity",
                location.activities.iter().map(|a| a.name.as_str()),
            )?;

            let activities = location
                .activities
                .into_iter()
                .map(|activity| {
                    let availability = activity.validate(&location.name)?;
                    Ok(ActivityEntry {
                        activity,
                        availability,
                    })
                })
                .collect::<Result<Vec<_>, ContentError>>()?;

            let connections = location
                .connections
                .iter()
                .filter_map(|name| {
                    let destination = location_ids
                        .get(name)
                        .map(|id| Destination::Location(*id))
                        .or_else(|| zone_ids.get(name).map(|id| Destination::Zone(*id)));
                    if destination.is_none() {
                        tracing::warn!(
                            location = %location.name,
                            connection = %name,
                            "dropping connection to unknown destination"
                        );
                    }
                    destination
                })
                .collect();

            locations.push(Location {
                id: LocationId(i as u32),
                name: location.name,
                description: location.description,
                connections,
                actions: location.actions,
                activities,
                starts_unlocked: location.is_unlocked,
            });
        }

        let start_location = start_location
            .map(|name| {
                location_ids
                    .get(&name)
                    .copied()
                    .ok_or(ContentError::UnknownStartLocation { location: name })
            })
            .transpose()?;

        tracing::info!(
            locations = locations.len(),
            zones = zones.len(),
            enemies = enemies.len(),
            location_types = location_types.len(),
            "content repository built"
        );

        Ok(Self {
            config,
            locations,
            zones,
            location_ids,
            zone_ids,
            enemies,
            location_types,
            skills,
            items,
            start_location,
        })
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn locations(&self) -> &[Location] {
        &self.locations
    }

    pub fn location(&self, id: LocationId) -> Option<&Location> {
        self.locations.get(id.index())
    }

    pub fn location_id(&self, name: &str) -> Option<LocationId> {
        self.location_ids.get(name).copied()
    }

    pub fn location_by_name(&self, name: &str) -> Option<&Location> {
        self.location_id(name).and_then(|id| self.location(id))
    }

    pub fn zones(&self) -> &[CombatZone] {
        &self.zones
    }

    pub fn zone(&self, id: ZoneId) -> Option<&CombatZone> {
        self.zones.get(id.index())
    }

    pub fn zone_id(&self, name: &str) -> Option<ZoneId> {
        self.zone_ids.get(name).copied()
    }

    pub fn zone_by_name(&self, name: &str) -> Option<&CombatZone> {
        self.zone_id(name).and_then(|id| self.zone(id))
    }

    /// Zones whose parent is `location`.
    pub fn zones_of(&self, location: LocationId) -> impl Iterator<Item = &CombatZone> + '_ {
        self.zones.iter().filter(move |z| z.parent() == location)
    }

    pub fn action(&self, action: &ActionRef) -> Option<&LocationAction> {
        self.location_by_name(&action.location)?
            .action(&action.action)
    }

    pub fn activity(&self, activity: &ActivityRef) -> Option<&ActivityEntry> {
        self.location_by_name(&activity.location)?
            .activity(&activity.activity)
    }

    pub fn skill(&self, name: &str) -> Option<&SkillDefinition> {
        self.skills.get(name)
    }

    pub fn skills(&self) -> impl Iterator<Item = &SkillDefinition> + '_ {
        self.skills.values()
    }

    pub fn item(&self, name: &str) -> Option<&ItemDefinition> {
        self.items.get(name)
    }

    /// Maximum level of a skill; unknown skills report 0.
    pub fn max_level(&self, skill: &str) -> u32 {
        self.skills.get(skill).map_or(0, |s| s.max_level)
    }

    pub fn start_location(&self) -> Option<&Location> {
        self.start_location.and_then(|id| self.location(id))
    }

    /// World progress at the start of a new game.
    pub fn initial_world_state(&self, game_seed: u64) -> WorldState {
        let mut state = WorldState::with_seed(game_seed);

        for zone in &self.zones {
            if zone.starts_unlocked() {
                *state.zone_mut(zone.id()) = ZoneProgress::unlocked();
            }
        }

        for location in &self.locations {
            if location.starts_unlocked {
                state.unlock_location(location.name.clone());
            }
            for action in &location.actions {
                let status = if action.is_unlocked {
                    ActionStatus::Unlocked
                } else {
                    ActionStatus::Locked
                };
                state.set_action_status(
                    ActionRef {
                        location: location.name.clone(),
                        action: action.name.clone(),
                    },
                    status,
                );
            }
            for entry in &location.activities {
                if entry.activity.is_unlocked {
                    state.unlock_activity(ActivityRef {
                        location: location.name.clone(),
                        activity: entry.activity.name.clone(),
                    });
                }
            }
        }

        if let Some(start) = self.start_location() {
            state.unlock_location(start.name.clone());
            state.current_location = Some(start.name.clone());
        }

        state
    }
}

impl EnemyOracle for ContentRepository {
    fn template(&self, name: &str) -> Option<&EnemyTemplate> {
        self.enemies.get(name)
    }
}

impl LocationTypeOracle for ContentRepository {
    fn location_type(&self, name: &str) -> Option<&LocationType> {
        self.location_types.get(name)
    }
}
