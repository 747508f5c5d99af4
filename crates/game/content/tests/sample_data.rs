use std::path::PathBuf;

use realm_content::{ContentFactory, Destination, verify};
use realm_core::{ActionRef, ActivityRef, Availability, EnemyOracle, LocationTypeOracle};

fn data_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("data")
}

/// Loads the bundled data set and checks the cross-references survive the
/// trip into the repository.
#[test]
fn bundled_content_loads_and_verifies() {
    let factory = ContentFactory::new(data_dir());

    let bundle = factory.load_bundle().expect("bundle should load");
    let report = verify(&bundle);
    assert!(report.is_clean(), "unexpected findings: {:?}", report.findings);

    let repo = factory
        .build_repository()
        .expect("repository should build");

    let start = repo.start_location().expect("start location is set");
    assert_eq!(start.name(), "Village");

    let den = repo.zone_by_name("Wolf Den").expect("Wolf Den exists");
    assert_eq!(den.enemy_count(), 10);
    assert_eq!(den.parent(), start.id());
    assert!(den.starts_unlocked());
    assert!(den.rare().is_some());

    let nest = repo.zone_by_name("Eagle Nest").expect("Eagle Nest exists");
    assert!(nest.is_challenge());
    assert!(!nest.starts_unlocked());
    assert_eq!(nest.stat_variation(), 0.05);

    let cliffs = repo.location_by_name("Cliffs").expect("Cliffs exists");
    assert!(cliffs.connections().contains(&Destination::Zone(nest.id())));

    let climb = repo
        .action(&ActionRef {
            location: "Cliffs".into(),
            action: "Climb the cliff".into(),
        })
        .expect("climb action exists");
    assert!(!climb.check_conditions_on_finish);
    assert!(climb.conditions.minimum.items[0].remove);

    let forage = repo
        .activity(&ActivityRef {
            location: "Forest".into(),
            activity: "Forage".into(),
        })
        .expect("forage activity exists");
    assert!(matches!(forage.availability, Availability::Window(_)));

    assert!(repo.template("Alpha wolf").is_some());
    assert!(repo.location_type("cold").is_some());
    assert_eq!(repo.max_level("Patience"), 20);
}

#[test]
fn initial_world_state_follows_unlock_flags() {
    let repo = ContentFactory::new(data_dir())
        .build_repository()
        .expect("repository should build");
    let world = repo.initial_world_state(7);

    assert_eq!(world.game_seed, 7);
    assert_eq!(world.current_location.as_deref(), Some("Village"));
    assert!(world.is_location_unlocked("Village"));
    assert!(!world.is_location_unlocked("Cliffs"));

    let den = repo.zone_id("Wolf Den").expect("Wolf Den exists");
    let nest = repo.zone_id("Eagle Nest").expect("Eagle Nest exists");
    assert!(world.zone(den).is_unlocked);
    assert!(!world.zone(nest).is_unlocked);
}

#[test]
fn dangling_reference_fails_the_build() {
    let dir = tempfile::tempdir().expect("tempdir");
    for entry in std::fs::read_dir(data_dir()).expect("data dir") {
        let entry = entry.expect("dir entry");
        std::fs::copy(entry.path(), dir.path().join(entry.file_name())).expect("copy");
    }

    let world_path = dir.path().join("world.ron");
    let world = std::fs::read_to_string(&world_path).expect("read world");
    let broken = world.replace(r#"list: ["Wolf", "Wolf cub"]"#, r#"list: ["Wolf", "Werewolf"]"#);
    assert_ne!(world, broken);
    std::fs::write(&world_path, broken).expect("write world");

    let err = ContentFactory::new(dir.path())
        .build_repository()
        .expect_err("build should fail");
    let message = err.to_string();
    assert!(message.contains("Werewolf"), "{message}");
}
