//! # Instance Registry
//!
//! Tracks the dungeon, raid and event instances that matched groups are
//! placed into.

use crate::matchmaking::Group;
use log::info;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::sync::{Arc, Mutex};

/// Identifier of an instance, unique within its registry.
pub type InstanceId = u64;

/// Registry shared between threads behind a single lock.
pub type SharedRegistry = Arc<Mutex<InstanceRegistry>>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InstanceKind {
    Dungeon,
    Raid,
    Event,
}

impl fmt::Display for InstanceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            InstanceKind::Dungeon => "dungeon",
            InstanceKind::Raid => "raid",
            InstanceKind::Event => "event",
        };
        f.write_str(label)
    }
}

/// A running session bound to one group.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Instance {
    pub id: InstanceId,
    pub kind: InstanceKind,
    /// Name of the dungeon, raid or event being played
    pub activity: String,
    pub group: Group,
}

/// Allocates instance ids and keeps every open instance.
///
/// Ids start at 1 and are never handed out twice, even after the instance
/// holding one is closed.
///
/// # Examples
///
/// ```
/// use arcane::{Group, InstanceKind, InstanceRegistry};
///
/// let mut registry = InstanceRegistry::new();
/// let group = Group::new("crypt", vec!["ana".to_string()]).unwrap();
/// let id = registry.create_instance(InstanceKind::Dungeon, "Sunken Crypt", group);
///
/// assert_eq!(id, 1);
/// assert!(registry.close_instance(id).is_some());
/// assert!(registry.close_instance(id).is_none());
/// ```
#[derive(Debug, Clone)]
pub struct InstanceRegistry {
    instances: BTreeMap<InstanceId, Instance>,
    next_id: InstanceId,
}

impl InstanceRegistry {
    pub fn new() -> Self {
        Self {
            instances: BTreeMap::new(),
            next_id: 1,
        }
    }

    /// Creates an empty registry wrapped for cross-thread use.
    pub fn shared() -> SharedRegistry {
        Arc::new(Mutex::new(Self::new()))
    }

    /// Opens a new instance for `group` and returns its id.
    pub fn create_instance(
        &mut self,
        kind: InstanceKind,
        activity: impl Into<String>,
        group: Group,
    ) -> InstanceId {
        let id = self.next_id;
        self.next_id += 1;

        let instance = Instance {
            id,
            kind,
            activity: activity.into(),
            group,
        };
        info!(
            "Opened {} instance {} for {} ({} players)",
            instance.kind,
            id,
            instance.activity,
            instance.group.len()
        );
        self.instances.insert(id, instance);
        id
    }

    pub fn get_instance(&self, id: InstanceId) -> Option<&Instance> {
        self.instances.get(&id)
    }

    /// Closes an instance and hands it back. Unknown or already closed ids
    /// return `None` and change nothing.
    pub fn close_instance(&mut self, id: InstanceId) -> Option<Instance> {
        let closed = self.instances.remove(&id);
        if let Some(instance) = &closed {
            info!("Closed {} instance {}", instance.kind, id);
        }
        closed
    }

    /// Snapshot of the open instances, ordered by id.
    pub fn list_instances(&self) -> Vec<Instance> {
        self.instances.values().cloned().collect()
    }

    /// Number of open instances.
    pub fn len(&self) -> usize {
        self.instances.len()
    }

    pub fn is_empty(&self) -> bool {
        self.instances.is_empty()
    }
}

impl Default for InstanceRegistry {
    fn default() -> Self {
        Self::new()
    }
}
