use std::path::PathBuf;
use std::sync::Arc;

use realm_core::{
    ActionOutcome, ActionRef, ActionStatus, ActivityRef, CharacterOracle, CombatStat,
    EncounterError, EncounterSource, EnemyTemplate, GenerationContext, GenerationHook,
    GenerationOverride, OutcomeKind, StartOutcome,
};
use realm_runtime::{HeroProfile, RecordingSink, RuntimeConfig, RuntimeError, Session};

fn data_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../game/content/data")
}

fn session(seed: u64) -> Session {
    let config = RuntimeConfig::default()
        .with_data_dir(data_dir())
        .with_seed(seed);
    Session::from_config(&config).expect("session should start")
}

fn hero(session: &Session) -> HeroProfile {
    HeroProfile::from_catalog(session.content())
}

fn action(location: &str, action: &str) -> ActionRef {
    ActionRef {
        location: location.into(),
        action: action.into(),
    }
}

fn activity(location: &str, activity: &str) -> ActivityRef {
    ActivityRef {
        location: location.into(),
        activity: activity.into(),
    }
}

/// Runs a timed action from start to finish.
fn attempt(session: &mut Session, id: &ActionRef, hero: &mut HeroProfile) -> ActionOutcome {
    match session
        .start_action(id.clone(), hero)
        .expect("action should start")
    {
        StartOutcome::InProgress(attempt) => session
            .finish_action(&attempt, hero)
            .expect("action should finish"),
        StartOutcome::Resolved(outcome) => outcome,
    }
}

#[test]
fn helping_the_miller_unlocks_the_cliffs() {
    let mut session = session(7);
    let mut hero = hero(&session).with_skill("Labor", 4);
    let miller = action("Village", "Help the miller");

    assert!(!session.world().is_location_unlocked("Cliffs"));
    session
        .can_start_action(&miller, &hero)
        .expect("miller is open from the start");

    let started = session
        .start_action(miller.clone(), &mut hero)
        .expect("action should start");
    let StartOutcome::InProgress(attempt) = started else {
        panic!("a 30 tick action should not resolve at start");
    };
    assert_eq!(attempt.duration, 30);
    assert_eq!(attempt.snapshot, None);

    let outcome = session
        .finish_action(&attempt, &mut hero)
        .expect("action should finish");
    assert_eq!(outcome.kind, OutcomeKind::Success);
    assert_eq!(outcome.success_chance, 1.0);
    assert_eq!(outcome.next_status, ActionStatus::Finished);

    assert_eq!(hero.money, 10);
    assert_eq!(hero.pending_xp["Labor"], 25.0);
    assert!(session.world().is_location_unlocked("Cliffs"));
    assert_eq!(session.world().action_status(&miller), ActionStatus::Finished);

    let err = session
        .can_start_action(&miller, &hero)
        .expect_err("finished action cannot restart");
    assert!(matches!(err, RuntimeError::Action(_)));
}

#[test]
fn climbing_without_rope_is_a_conditional_loss_at_start() {
    let mut session = session(7);
    let mut hero = hero(&session)
        .with_skill("Climbing", 8)
        .with_stat("Agility", 12.0);
    let climb = action("Cliffs", "Climb the cliff");

    let started = session
        .start_action(climb.clone(), &mut hero)
        .expect("required gate is met");
    let StartOutcome::Resolved(outcome) = started else {
        panic!("unmet snapshot should resolve immediately");
    };
    assert_eq!(outcome.kind, OutcomeKind::ConditionalLoss);
    assert_eq!(outcome.text, "You are not ready for this climb.");
    assert!(outcome.consumed_items.is_empty());
    assert!(hero.received.is_empty());
    assert_eq!(session.world().action_status(&climb), ActionStatus::Unlocked);
}

#[test]
fn climbing_consumes_rope_and_opens_the_nest() {
    let mut session = session(11);
    let mut hero = hero(&session)
        .with_skill("Climbing", 8)
        .with_stat("Agility", 12.0)
        .with_item("Rope", 20);
    let climb = action("Cliffs", "Climb the cliff");
    let nest = session.content().zone_id("Eagle Nest").expect("nest exists");

    let err = session.next_encounter(nest).expect_err("nest starts locked");
    assert!(matches!(
        err,
        RuntimeError::Encounter(EncounterError::ZoneLocked { .. })
    ));

    let mut attempts: u32 = 0;
    loop {
        attempts += 1;
        let outcome = attempt(&mut session, &climb, &mut hero);
        assert_eq!(outcome.consumed_items.len(), 1);
        assert!((outcome.success_chance - 0.95).abs() < 1e-9);
        if outcome.is_success() {
            break;
        }
        assert_eq!(outcome.kind, OutcomeKind::RandomLoss);
        assert!(attempts < 20, "0.95 chance failed 20 times in a row");
    }

    assert_eq!(hero.item_count("Rope"), 20 - attempts);
    assert!(session.world().zone(nest).is_unlocked);
    assert_eq!(session.world().action_status(&climb), ActionStatus::Finished);
    assert!(session.next_encounter(nest).is_ok());
}

#[test]
fn wolf_den_spawns_its_boss_and_pays_the_first_clear() {
    let mut session = session(3);
    let den = session.content().zone_id("Wolf Den").expect("den exists");
    let mut sink = RecordingSink::new();

    for kill in 0..10 {
        let encounter = session.next_encounter(den).expect("den is open");
        assert!(!encounter.enemies.is_empty());
        if kill == 9 {
            assert_eq!(encounter.source, EncounterSource::Boss);
            assert_eq!(encounter.enemies[0].template, "Alpha wolf");
        } else {
            assert_ne!(encounter.source, EncounterSource::Boss);
        }

        let event = session
            .record_group_killed(den, &mut sink)
            .expect("kill is recorded");
        assert_eq!(event.is_some(), kill == 9);
    }

    assert_eq!(sink.rewards.len(), 1);
    assert_eq!(sink.money(), 50);

    for _ in 0..10 {
        session.next_encounter(den).expect("den stays open");
        session
            .record_group_killed(den, &mut sink)
            .expect("kill is recorded");
    }
    assert_eq!(sink.rewards.len(), 2);
    assert_eq!(sink.money(), 55);
}

#[test]
fn challenge_zone_finishes_after_its_sequence() {
    let mut session = session(5);
    let nest = session.content().zone_id("Eagle Nest").expect("nest exists");
    assert!(session.world_mut().unlock_zone(nest));
    let mut sink = RecordingSink::new();

    let expected = [vec!["Eagle"], vec!["Eagle", "Eagle"], vec!["Giant eagle"]];
    for (index, group) in expected.iter().enumerate() {
        let encounter = session.next_encounter(nest).expect("nest is open");
        assert_eq!(encounter.source, EncounterSource::Sequence { index });
        let templates: Vec<_> = encounter.enemies.iter().map(|e| e.template.as_str()).collect();
        assert_eq!(&templates, group);
        session
            .record_group_killed(nest, &mut sink)
            .expect("kill is recorded");
    }

    assert_eq!(sink.rewards.len(), 1);
    assert!(session.world().zone(nest).is_finished);
    let err = session.next_encounter(nest).expect_err("finished zone");
    assert!(matches!(
        err,
        RuntimeError::Encounter(EncounterError::ZoneFinished { .. })
    ));
}

#[test]
fn same_seed_replays_the_same_encounters() {
    let mut first = session(99);
    let mut second = session(99);
    let den = first.content().zone_id("Wolf Den").expect("den exists");

    for _ in 0..5 {
        let a = first.next_encounter(den).expect("den is open");
        let b = second.next_encounter(den).expect("den is open");
        assert_eq!(a, b);
    }
}

#[test]
fn environment_penalties_shrink_with_mastery() {
    let session = session(1);
    let nest = session.content().zone_id("Eagle Nest").expect("nest exists");

    let novice = hero(&session);
    let veteran = hero(&session)
        .with_skill("Survival", 10)
        .with_skill("Cold resistance", 10);

    let raw = session
        .environment_penalties(nest, &novice)
        .expect("types resolve");
    assert_eq!(raw.base, raw.hero);
    assert!(!raw.base.is_empty());

    let mitigated = session
        .environment_penalties(nest, &veteran)
        .expect("types resolve");
    assert_eq!(mitigated.base, raw.base);
    assert!((raw.hero.multiplier(CombatStat::HitChance) - 0.9).abs() < 1e-9);
    assert_eq!(mitigated.hero.multiplier(CombatStat::HitChance), 1.0);
    assert_eq!(raw.hero.flat(CombatStat::HealthRegenerationFlat), -1.0);
    assert_eq!(mitigated.hero.flat(CombatStat::HealthRegenerationFlat), 0.0);

    let xp = session.zone_skill_xp(nest).expect("types resolve");
    assert_eq!(xp["Survival"], 1.0);
    assert_eq!(xp["Cold resistance"], 1.5);
}

#[test]
fn chopping_wood_uses_tool_and_patience() {
    let session = session(1);
    let chop = activity("Forest", "Chop wood");

    let hero = hero(&session)
        .with_skill("Woodcutting", 10)
        .with_tool("Axe", 0.5);
    let efficiency = session
        .activity_efficiency(&chop, &hero)
        .expect("chop wood is a gathering activity");
    assert_eq!(efficiency.skill_modifier, 1.0);
    assert_eq!(efficiency.gather_time, 26);

    let patient = hero.clone().with_skill("Patience", 20);
    let efficiency = session
        .activity_efficiency(&chop, &patient)
        .expect("chop wood is a gathering activity");
    assert_eq!(efficiency.meta_discount, 0.5);
    assert_eq!(efficiency.gather_time, 13);
}

#[test]
fn forage_is_windowed_and_gates_rope() {
    let session = session(1);
    let forage = activity("Forest", "Forage");

    assert!(session.is_activity_available(&forage, 12).expect("known"));
    assert!(!session.is_activity_available(&forage, 22).expect("known"));

    let hero = hero(&session).with_skill("Foraging", 2).with_skill("Survival", 1);
    let efficiency = session
        .activity_efficiency(&forage, &hero)
        .expect("forage is a gathering activity");
    let rope = efficiency
        .drops
        .iter()
        .find(|d| d.item == "Rope")
        .expect("rope drop listed");
    assert_eq!(rope.unmet_requirement, Some(3));
    assert_eq!(rope.chance, 0.0);
}

#[test]
fn mill_work_pays_by_skill() {
    let session = session(1);
    let mill = activity("Village", "Mill work");

    let novice = hero(&session);
    let master = hero(&session).with_skill("Labor", 10);
    assert_eq!(session.job_payment(&mill, &novice).expect("job").payment, 2);
    assert_eq!(session.job_payment(&mill, &master).expect("job").payment, 10);

    let err = session
        .activity_efficiency(&mill, &master)
        .expect_err("a job is not gathering");
    assert!(matches!(err, RuntimeError::Activity(_)));
}

struct Calm;

impl GenerationHook for Calm {
    fn name(&self) -> &'static str {
        "calm"
    }

    fn generate(
        &self,
        _template: &EnemyTemplate,
        _ctx: &GenerationContext<'_>,
    ) -> GenerationOverride {
        GenerationOverride {
            disable_variation: true,
            ..GenerationOverride::default()
        }
    }
}

#[test]
fn new_session_starts_with_an_empty_hook_registry() {
    let mut session = session(2);
    assert!(session.hooks_mut().is_empty());

    session.hooks_mut().register(Arc::new(Calm));
    assert!(session.hooks_mut().contains("calm"));
    assert_eq!(session.hooks_mut().len(), 1);
}

#[test]
fn unknown_references_are_rejected() {
    let mut session = session(1);
    let mut hero = hero(&session);

    let err = session
        .start_action(action("Village", "Dance"), &mut hero)
        .expect_err("no such action");
    assert!(matches!(err, RuntimeError::UnknownAction(_)));

    let err = session
        .job_payment(&activity("Village", "Juggling"), &hero)
        .expect_err("no such activity");
    assert!(matches!(err, RuntimeError::UnknownActivity(_)));
}

#[test]
fn saved_world_resumes_where_it_left_off() {
    let mut session = session(21);
    let den = session.content().zone_id("Wolf Den").expect("den exists");
    let mut sink = RecordingSink::new();
    for _ in 0..4 {
        session.next_encounter(den).expect("den is open");
        session
            .record_group_killed(den, &mut sink)
            .expect("kill is recorded");
    }
    let world = session.into_world();
    assert_eq!(world.zone(den).enemy_groups_killed, 4);

    let content = realm_content::ContentFactory::new(data_dir())
        .build_repository()
        .expect("content builds");
    let mut resumed = Session::with_state(content, world.clone());
    assert_eq!(resumed.world(), &world);
    resumed.next_encounter(den).expect("den is open");
    assert_eq!(resumed.world().nonce(), world.nonce() + 1);
}

#[test]
fn missing_content_is_a_fatal_load_error() {
    use realm_core::{ErrorSeverity, GameError};

    let dir = tempfile::tempdir().expect("tempdir");
    let config = RuntimeConfig::default().with_data_dir(dir.path()).with_seed(1);
    let err = match Session::from_config(&config) {
        Ok(_) => panic!("empty directory should not load"),
        Err(err) => err,
    };
    assert!(matches!(err, RuntimeError::Load(_)));
    assert_eq!(err.error_code(), "RUNTIME_LOAD_FAILED");
    assert_eq!(err.severity(), ErrorSeverity::Fatal);
}
