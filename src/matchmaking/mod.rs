//! # Matchmaking Module
//!
//! Local, in-process matchmaking: a FIFO queue of players waiting for an
//! activity, split into fixed-size groups on demand, and the registry of
//! instances those groups are placed into.
//!
//! The queue is strictly first come, first served. Forming groups for one
//! activity never disturbs the requests of another, and a short remainder is
//! left waiting for the next call.

pub mod finder;
pub mod instances;

pub use finder::*;
pub use instances::*;

use crate::config::DEFAULT_GROUP_CAPACITY;
use crate::{ArcaneError, ArcaneResult};
use log::{debug, warn};
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

/// Identifier of a queued player.
pub type PlayerId = String;

/// One player waiting for one activity.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MatchRequest {
    pub player: PlayerId,
    pub activity: String,
}

impl MatchRequest {
    pub fn new(player: impl Into<PlayerId>, activity: impl Into<String>) -> Self {
        Self {
            player: player.into(),
            activity: activity.into(),
        }
    }
}

/// Players matched together for an activity, in arrival order.
///
/// A group always has at least one member.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Group {
    activity: String,
    members: Vec<PlayerId>,
}

impl Group {
    /// Builds a group. Fails if `members` is empty.
    pub fn new(activity: impl Into<String>, members: Vec<PlayerId>) -> ArcaneResult<Self> {
        let activity = activity.into();
        if members.is_empty() {
            warn!("Rejected empty group for {}", activity);
            return Err(ArcaneError::Configuration(
                "a group needs at least one member".to_string(),
            ));
        }
        Ok(Self { activity, members })
    }

    pub fn activity(&self) -> &str {
        &self.activity
    }

    pub fn members(&self) -> &[PlayerId] {
        &self.members
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    /// Never true for a group built through [`Group::new`].
    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    pub fn contains(&self, player: &str) -> bool {
        self.members.iter().any(|member| member == player)
    }
}

/// Standard group sizes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GroupKind {
    /// Four-player dungeon party
    Party,
    /// Six-player trial group
    Trial,
    /// Twelve-player raid group
    Raid,
}

impl GroupKind {
    pub fn capacity(self) -> usize {
        match self {
            GroupKind::Party => 4,
            GroupKind::Trial => 6,
            GroupKind::Raid => 12,
        }
    }
}

/// What to do when a player queues twice for the same activity.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DuplicatePolicy {
    /// Keep the first request and ignore the second
    #[default]
    Reject,
    /// Queue every request, even repeats
    Allow,
}

/// Result of [`Matchmaker::enqueue`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Enqueued {
    /// The request was added; `position` counts the requests for the same
    /// activity ahead of it.
    Queued { position: usize },
    /// The player was already waiting for this activity and the policy is
    /// [`DuplicatePolicy::Reject`].
    AlreadyQueued,
}

/// Matchmaking settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MatchmakingConfig {
    /// Group size used when the caller does not pick one
    pub group_capacity: usize,
    /// Handling of repeated requests
    pub duplicate_policy: DuplicatePolicy,
}

impl MatchmakingConfig {
    pub fn validate(&self) -> ArcaneResult<()> {
        validate_capacity(self.group_capacity)
    }
}

impl Default for MatchmakingConfig {
    fn default() -> Self {
        Self {
            group_capacity: DEFAULT_GROUP_CAPACITY,
            duplicate_policy: DuplicatePolicy::default(),
        }
    }
}

fn validate_capacity(capacity: usize) -> ArcaneResult<()> {
    if capacity == 0 {
        warn!("Rejected group capacity of zero");
        return Err(ArcaneError::Configuration(
            "group capacity must be at least 1".to_string(),
        ));
    }
    Ok(())
}

/// FIFO queue of match requests across all activities.
///
/// # Examples
///
/// ```
/// use arcane::Matchmaker;
///
/// let mut matchmaker = Matchmaker::new();
/// for player in ["ana", "bo", "cy"] {
///     matchmaker.enqueue(player, "crypt");
/// }
///
/// let groups = matchmaker.form_groups("crypt", 2).unwrap();
/// assert_eq!(groups.len(), 1);
/// assert_eq!(groups[0].members(), ["ana", "bo"]);
/// assert_eq!(matchmaker.queued_for("crypt"), vec!["cy"]);
/// ```
#[derive(Debug, Clone, Default)]
pub struct Matchmaker {
    queue: VecDeque<MatchRequest>,
    policy: DuplicatePolicy,
}

impl Matchmaker {
    /// Creates an empty queue that rejects duplicate requests.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_policy(policy: DuplicatePolicy) -> Self {
        Self {
            queue: VecDeque::new(),
            policy,
        }
    }

    pub fn policy(&self) -> DuplicatePolicy {
        self.policy
    }

    /// Appends a request to the tail of the queue.
    pub fn enqueue(&mut self, player: impl Into<PlayerId>, activity: impl Into<String>) -> Enqueued {
        let request = MatchRequest::new(player, activity);

        if self.policy == DuplicatePolicy::Reject && self.queue.contains(&request) {
            warn!(
                "{} is already queued for {}",
                request.player, request.activity
            );
            return Enqueued::AlreadyQueued;
        }

        let position = self
            .queue
            .iter()
            .filter(|queued| queued.activity == request.activity)
            .count();
        debug!(
            "Queued {} for {} at position {}",
            request.player, request.activity, position
        );
        self.queue.push_back(request);
        Enqueued::Queued { position }
    }

    /// Splits the requests for `activity` into full groups of `capacity`.
    ///
    /// Requests are taken in arrival order. A trailing remainder smaller than
    /// `capacity` stays queued, as does everything queued for other
    /// activities. A capacity of zero is a configuration error.
    pub fn form_groups(&mut self, activity: &str, capacity: usize) -> ArcaneResult<Vec<Group>> {
        validate_capacity(capacity)?;

        let waiting = self
            .queue
            .iter()
            .filter(|request| request.activity == activity)
            .count();
        let to_take = waiting - waiting % capacity;
        if to_take == 0 {
            return Ok(Vec::new());
        }

        let mut taken = Vec::with_capacity(to_take);
        let mut remaining = VecDeque::with_capacity(self.queue.len() - to_take);
        for request in std::mem::take(&mut self.queue) {
            if taken.len() < to_take && request.activity == activity {
                taken.push(request.player);
            } else {
                remaining.push_back(request);
            }
        }
        self.queue = remaining;

        let groups = taken
            .chunks(capacity)
            .map(|members| Group {
                activity: activity.to_string(),
                members: members.to_vec(),
            })
            .collect::<Vec<_>>();
        debug!(
            "Formed {} group(s) of {} for {}; {} still waiting",
            groups.len(),
            capacity,
            activity,
            waiting - to_take
        );
        Ok(groups)
    }

    /// Total number of queued requests across all activities.
    pub fn len(&self) -> usize {
        self.queue.len()
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    /// Players waiting for `activity`, in arrival order.
    pub fn queued_for(&self, activity: &str) -> Vec<PlayerId> {
        self.queue
            .iter()
            .filter(|request| request.activity == activity)
            .map(|request| request.player.clone())
            .collect()
    }

    /// Number of requests for `activity` ahead of the player's first request.
    pub fn position_of(&self, player: &str, activity: &str) -> Option<usize> {
        self.queue
            .iter()
            .filter(|request| request.activity == activity)
            .position(|request| request.player == player)
    }

    /// Removes every request the player has for `activity`. Returns whether
    /// anything was removed.
    pub fn leave(&mut self, player: &str, activity: &str) -> bool {
        let before = self.queue.len();
        self.queue
            .retain(|request| !(request.player == player && request.activity == activity));
        let removed = before != self.queue.len();
        if removed {
            debug!("{} left the queue for {}", player, activity);
        }
        removed
    }
}
