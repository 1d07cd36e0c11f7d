//! Configuration for a repository instance.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// What `save` does when a supplied identity is already held by a
/// different entity.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum DuplicatePolicy {
    /// The incoming entity replaces the one stored under that identity.
    #[default]
    Overwrite,
    /// The save fails with `DuplicateIdentity`.
    Reject,
}

/// Configuration for a [`Repository`](crate::Repository).
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct RepositoryConfig {
    /// Label used in log events. Defaults to the entity schema name.
    pub name: Option<String>,

    /// Handling of supplied identities that collide with a stored entity.
    pub duplicate_policy: DuplicatePolicy,

    /// Sequencer start; the first minted identity is this plus one.
    pub initial_sequence: i64,
}

impl Default for RepositoryConfig {
    fn default() -> Self {
        Self {
            name: None,
            duplicate_policy: DuplicatePolicy::Overwrite,
            initial_sequence: 0,
        }
    }
}

impl RepositoryConfig {
    /// Creates a configuration that rejects colliding identities.
    #[must_use]
    pub fn strict() -> Self {
        Self {
            duplicate_policy: DuplicatePolicy::Reject,
            ..Self::default()
        }
    }

    /// Builder method to set the log label.
    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Builder method to set the duplicate policy.
    #[must_use]
    pub fn with_duplicate_policy(mut self, policy: DuplicatePolicy) -> Self {
        self.duplicate_policy = policy;
        self
    }

    /// Builder method to set the sequencer start.
    #[must_use]
    pub fn with_initial_sequence(mut self, initial: i64) -> Self {
        self.initial_sequence = initial;
        self
    }
}
