//! Queueing players, forming groups and running instances.

use arcane::{
    ArcaneError, ArcaneResult, DungeonFinder, DuplicatePolicy, Enqueued, GroupKind, InstanceKind,
    InstanceRegistry, Matchmaker, MatchmakingConfig,
};
use std::sync::Arc;
use std::thread;

#[test]
fn test_queue_to_instance_lifecycle() -> ArcaneResult<()> {
    let mut finder = DungeonFinder::new();
    for index in 1..=9 {
        finder.join(format!("p{}", index), "Sunken Crypt");
    }
    finder.join("r1", "Molten Keep");

    let matched = finder.match_groups("Sunken Crypt", InstanceKind::Dungeon, 4)?;
    let ids: Vec<u64> = matched.iter().map(|(id, _)| *id).collect();
    assert_eq!(ids, vec![1, 2]);
    assert_eq!(matched[0].1.members(), ["p1", "p2", "p3", "p4"]);
    assert_eq!(matched[1].1.members(), ["p5", "p6", "p7", "p8"]);
    assert_eq!(finder.matchmaker().queued_for("Sunken Crypt"), vec!["p9"]);
    assert_eq!(finder.matchmaker().queued_for("Molten Keep"), vec!["r1"]);

    let closed = finder.complete(1).expect("instance 1 is open");
    assert_eq!(closed.group.members()[0], "p1");
    assert!(finder.complete(1).is_none());

    for index in 10..=12 {
        finder.join(format!("p{}", index), "Sunken Crypt");
    }
    let later = finder.match_groups("Sunken Crypt", InstanceKind::Dungeon, 4)?;
    assert_eq!(later.len(), 1);
    assert_eq!(later[0].0, 3);
    assert_eq!(later[0].1.members(), ["p9", "p10", "p11", "p12"]);

    let open: Vec<u64> = finder.registry().list_instances().iter().map(|i| i.id).collect();
    assert_eq!(open, vec![2, 3]);
    Ok(())
}

#[test]
fn test_raid_sized_groups() -> ArcaneResult<()> {
    let mut matchmaker = Matchmaker::new();
    for index in 0..30 {
        matchmaker.enqueue(format!("p{}", index), "Throne");
    }

    let groups = matchmaker.form_groups("Throne", GroupKind::Raid.capacity())?;
    assert_eq!(groups.len(), 2);
    assert!(groups.iter().all(|group| group.len() == 12));
    assert_eq!(matchmaker.len(), 6);
    Ok(())
}

#[test]
fn test_duplicate_requests_follow_policy() {
    let mut strict = DungeonFinder::new();
    assert_eq!(strict.join("ana", "crypt"), Enqueued::Queued { position: 0 });
    assert_eq!(strict.join("ana", "crypt"), Enqueued::AlreadyQueued);
    assert_eq!(strict.matchmaker().len(), 1);

    let mut lenient = DungeonFinder::from_config(&MatchmakingConfig {
        duplicate_policy: DuplicatePolicy::Allow,
        ..MatchmakingConfig::default()
    });
    lenient.join("ana", "crypt");
    lenient.join("ana", "crypt");
    assert_eq!(lenient.matchmaker().len(), 2);
    assert!(lenient.leave("ana", "crypt"));
    assert!(lenient.matchmaker().is_empty());
}

#[test]
fn test_zero_capacity_leaves_queue_alone() {
    let mut finder = DungeonFinder::new();
    finder.join("ana", "crypt");

    let result = finder.match_groups("crypt", InstanceKind::Dungeon, 0);
    assert!(matches!(result, Err(ArcaneError::Configuration(_))));
    assert_eq!(finder.matchmaker().len(), 1);
    assert!(finder.registry().is_empty());
}

#[test]
fn test_shared_registry_hands_out_unique_ids() {
    let registry = InstanceRegistry::shared();

    let workers: Vec<_> = (0..4)
        .map(|worker| {
            let registry = Arc::clone(&registry);
            thread::spawn(move || -> ArcaneResult<Vec<u64>> {
                let mut matchmaker = Matchmaker::new();
                for index in 0..8 {
                    matchmaker.enqueue(format!("w{}-{}", worker, index), "Event");
                }
                let mut ids = Vec::new();
                for group in matchmaker.form_groups("Event", 2)? {
                    let mut registry = registry.lock().expect("registry lock");
                    ids.push(registry.create_instance(InstanceKind::Event, "Harvest Fair", group));
                }
                Ok(ids)
            })
        })
        .collect();

    let mut ids = Vec::new();
    for worker in workers {
        ids.extend(worker.join().expect("worker thread").expect("worker result"));
    }
    ids.sort_unstable();
    assert_eq!(ids, (1..=16).collect::<Vec<u64>>());
}
