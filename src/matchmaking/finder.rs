//! # Dungeon Finder
//!
//! Queue, match and instantiate in one place: every group formed for an
//! activity is immediately given its own instance.

use crate::matchmaking::{
    DuplicatePolicy, Enqueued, Group, Instance, InstanceId, InstanceKind, InstanceRegistry,
    Matchmaker, MatchmakingConfig, PlayerId,
};
use crate::ArcaneResult;
use log::info;

/// A matchmaker and an instance registry working together.
#[derive(Debug, Clone)]
pub struct DungeonFinder {
    matchmaker: Matchmaker,
    registry: InstanceRegistry,
    group_capacity: usize,
}

impl DungeonFinder {
    /// Creates a finder with the default settings.
    pub fn new() -> Self {
        Self::from_config(&MatchmakingConfig::default())
    }

    /// Creates a finder using the configured group size and duplicate policy.
    pub fn from_config(config: &MatchmakingConfig) -> Self {
        Self {
            matchmaker: Matchmaker::with_policy(config.duplicate_policy),
            registry: InstanceRegistry::new(),
            group_capacity: config.group_capacity,
        }
    }

    pub fn matchmaker(&self) -> &Matchmaker {
        &self.matchmaker
    }

    pub fn registry(&self) -> &InstanceRegistry {
        &self.registry
    }

    pub fn policy(&self) -> DuplicatePolicy {
        self.matchmaker.policy()
    }

    /// Group size used by [`DungeonFinder::match_default`].
    pub fn group_capacity(&self) -> usize {
        self.group_capacity
    }

    /// Puts a player in the queue for an activity.
    pub fn join(&mut self, player: impl Into<PlayerId>, activity: impl Into<String>) -> Enqueued {
        self.matchmaker.enqueue(player, activity)
    }

    /// Takes a player out of the queue for an activity.
    pub fn leave(&mut self, player: &str, activity: &str) -> bool {
        self.matchmaker.leave(player, activity)
    }

    /// Forms every full group for `activity` and opens an instance for each.
    ///
    /// Returns the new instance ids paired with their groups, in the order the
    /// groups were formed.
    pub fn match_groups(
        &mut self,
        activity: &str,
        kind: InstanceKind,
        capacity: usize,
    ) -> ArcaneResult<Vec<(InstanceId, Group)>> {
        let groups = self.matchmaker.form_groups(activity, capacity)?;
        let matched: Vec<(InstanceId, Group)> = groups
            .into_iter()
            .map(|group| {
                let id = self.registry.create_instance(kind, activity, group.clone());
                (id, group)
            })
            .collect();

        if !matched.is_empty() {
            info!("Matched {} group(s) for {}", matched.len(), activity);
        }
        Ok(matched)
    }

    /// [`DungeonFinder::match_groups`] with the configured group size.
    pub fn match_default(
        &mut self,
        activity: &str,
        kind: InstanceKind,
    ) -> ArcaneResult<Vec<(InstanceId, Group)>> {
        self.match_groups(activity, kind, self.group_capacity)
    }

    /// Closes a finished instance.
    pub fn complete(&mut self, id: InstanceId) -> Option<Instance> {
        self.registry.close_instance(id)
    }
}

impl Default for DungeonFinder {
    fn default() -> Self {
        Self::new()
    }
}
