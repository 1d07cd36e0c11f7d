//! Keyed in-memory repository.
//!
//! Entities live behind [`Shared`] handles in a sharded concurrent map keyed
//! by canonical identity. Container operations (`find_*`, `update_field`,
//! `delete`) only take per-shard locks. `save` additionally runs its identity
//! decision (read identity, mint or reserve, write back, index) inside a
//! per-repository admission lock, so a supplied identity is always reserved
//! before any concurrent mint can hand out the same value.

use std::fmt;
use std::sync::Arc;

use dashmap::DashMap;
use parking_lot::{Mutex, RwLock};
use tracing::{debug, trace, warn};

use repokit_foundation::{Error, ErrorContext, Result, Value, is_assigned};

use crate::config::{DuplicatePolicy, RepositoryConfig};
use crate::entity::Entity;
use crate::field;
use crate::identity;
use crate::schema::EntitySchema;
use crate::sequence::Sequencer;

/// Handle to a stored entity.
///
/// The repository and its callers share the same handle, so in-place edits
/// through it are visible to later lookups.
pub type Shared<E> = Arc<RwLock<E>>;

/// Generic in-memory repository for one entity type.
pub struct Repository<E: Entity> {
    schema: EntitySchema<E>,
    config: RepositoryConfig,
    entries: DashMap<i64, Shared<E>>,
    // Handle address to the key it is stored under.
    keys: DashMap<usize, i64>,
    sequencer: Sequencer,
    admission: Mutex<()>,
}

impl<E: Entity> Default for Repository<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E: Entity> Repository<E> {
    /// Creates an empty repository with the default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(RepositoryConfig::default())
    }

    /// Creates an empty repository.
    #[must_use]
    pub fn with_config(config: RepositoryConfig) -> Self {
        Self {
            schema: E::schema(),
            sequencer: Sequencer::starting_at(config.initial_sequence),
            config,
            entries: DashMap::new(),
            keys: DashMap::new(),
            admission: Mutex::new(()),
        }
    }

    /// Saves an entity, assigning it an identity if it has none.
    ///
    /// # Errors
    ///
    /// See [`Repository::save_shared`].
    pub fn save(&self, entity: E) -> Result<Shared<E>> {
        self.save_shared(Arc::new(RwLock::new(entity)))
    }

    /// Saves an entity handle, assigning it an identity if it has none.
    ///
    /// An entity without an identity (or with identity 0) receives the next
    /// minted identity, written back through its identity slot. An entity
    /// with an identity reserves it in the sequencer and is stored under it,
    /// replacing any previous occupant unless the duplicate policy is
    /// `Reject`. Re-saving a handle that is already stored is idempotent.
    /// If the handle's identity was changed in place since it was stored, it
    /// moves to the new key and the old key is released.
    ///
    /// The handle must not be locked by the caller.
    ///
    /// # Errors
    ///
    /// Returns `DuplicateIdentity` when rejecting a colliding identity, and
    /// `UnsupportedIdentityType` or `WriteFailed` if a minted identity cannot
    /// be written back.
    pub fn save_shared(&self, entity: Shared<E>) -> Result<Shared<E>> {
        let _admission = self.admission.lock();
        let mut guard = entity.write();

        let id = match identity::read_identity(&self.schema, &*guard) {
            supplied @ Some(id) if is_assigned(supplied) => {
                self.check_duplicate(id, &entity)?;
                self.sequencer.reserve(id);
                debug!(repository = self.label(), id, "saving entity with supplied identity");
                id
            }
            _ => {
                let id = self.sequencer.next();
                let written = identity::write_identity(&self.schema, &mut *guard, id)
                    .map_err(|e| e.with_context(self.context("save").with_id(id)))?;
                if written {
                    debug!(repository = self.label(), id, "minted identity");
                } else {
                    debug!(repository = self.label(), id, "admitted entity without identity slot");
                }
                id
            }
        };
        drop(guard);

        let key = handle_key(&entity);
        let stale = self.keys.get(&key).map(|stored| *stored).filter(|&old| old != id);
        if let Some(old) = stale {
            if self.entries.remove_if(&old, |_, stored| Arc::ptr_eq(stored, &entity)).is_some() {
                debug!(repository = self.label(), old, id, "moved entity to new identity");
            }
        }

        if let Some(previous) = self.entries.insert(id, Arc::clone(&entity)) {
            if !Arc::ptr_eq(&previous, &entity) {
                self.keys.remove_if(&handle_key(&previous), |_, stored| *stored == id);
                debug!(repository = self.label(), id, "replaced stored entity");
            }
        }
        self.keys.insert(key, id);
        Ok(entity)
    }

    fn check_duplicate(&self, id: i64, entity: &Shared<E>) -> Result<()> {
        if self.config.duplicate_policy != DuplicatePolicy::Reject {
            return Ok(());
        }
        let collides = self
            .entries
            .get(&id)
            .is_some_and(|stored| !Arc::ptr_eq(stored.value(), entity));
        if collides {
            warn!(repository = self.label(), id, "rejected duplicate identity");
            return Err(Error::duplicate_identity(self.schema.name(), id)
                .with_context(self.context("save").with_id(id)));
        }
        Ok(())
    }

    /// Looks up an entity by identity.
    #[must_use]
    pub fn find_by_id(&self, id: i64) -> Option<Shared<E>> {
        self.entries.get(&id).map(|entry| Arc::clone(entry.value()))
    }

    /// Returns a snapshot of every stored entity, in no particular order.
    #[must_use]
    pub fn find_all(&self) -> Vec<Shared<E>> {
        self.entries
            .iter()
            .map(|entry| Arc::clone(entry.value()))
            .collect()
    }

    /// Returns the stored entities whose field `name` equals `expected`.
    ///
    /// Equality is by value and representation, so an `Int` field never
    /// matches a `Long` probe. Entities whose field cannot be read are left out
    /// of the result rather than failing the scan.
    ///
    /// # Errors
    ///
    /// Returns `InvalidArgument` if `name` is empty.
    pub fn find_by_field(&self, name: &str, expected: impl Into<Value>) -> Result<Vec<Shared<E>>> {
        if name.is_empty() {
            return Err(Error::invalid_argument("field name must not be empty")
                .with_context(self.context("find_by_field")));
        }
        let expected = expected.into();

        let matches = self
            .find_all()
            .into_iter()
            .filter(|handle| {
                let entity = handle.read();
                match field::read_field(&self.schema, &*entity, name) {
                    Ok(value) => value == expected,
                    Err(e) => {
                        trace!(repository = self.label(), field = name, error = %e, "excluded from scan");
                        false
                    }
                }
            })
            .collect();
        Ok(matches)
    }

    /// Coerces `value` into the declared type of field `name` and writes it
    /// on the entity stored under `id`.
    ///
    /// Returns `Ok(false)` if no entity has that identity.
    ///
    /// # Errors
    ///
    /// Returns `InvalidArgument` for an empty name, `NoSuchField` for an
    /// unknown one, a conversion error if `value` cannot be coerced, or
    /// `WriteFailed` if the field refuses the write.
    pub fn update_field(&self, id: i64, name: &str, value: impl Into<Value>) -> Result<bool> {
        if name.is_empty() {
            return Err(Error::invalid_argument("field name must not be empty")
                .with_context(self.context("update_field")));
        }
        let Some(handle) = self.find_by_id(id) else {
            return Ok(false);
        };

        let mut entity = handle.write();
        field::write_field(&self.schema, &mut *entity, name, value.into())
            .map_err(|e| e.with_context(self.context("update_field").with_id(id)))?;
        debug!(repository = self.label(), id, field = name, "updated field");
        Ok(true)
    }

    /// Removes the entity stored under `id`.
    ///
    /// Returns whether an entity was removed.
    pub fn delete(&self, id: i64) -> bool {
        let Some((_, handle)) = self.entries.remove(&id) else {
            return false;
        };
        self.keys.remove_if(&handle_key(&handle), |_, stored| *stored == id);
        debug!(repository = self.label(), id, "deleted entity");
        true
    }

    /// Returns true if an entity is stored under `id`.
    #[must_use]
    pub fn contains(&self, id: i64) -> bool {
        self.entries.contains_key(&id)
    }

    /// Returns the number of stored entities.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if the repository is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Returns the entity schema this repository was built with.
    #[must_use]
    pub fn schema(&self) -> &EntitySchema<E> {
        &self.schema
    }

    /// Returns the configuration.
    #[must_use]
    pub fn config(&self) -> &RepositoryConfig {
        &self.config
    }

    /// Returns the identity sequencer.
    #[must_use]
    pub fn sequencer(&self) -> &Sequencer {
        &self.sequencer
    }

    fn label(&self) -> &str {
        self.config.name.as_deref().unwrap_or(self.schema.name())
    }

    fn context(&self, operation: &str) -> ErrorContext {
        ErrorContext::new()
            .with_entity(self.schema.name())
            .with_operation(operation)
    }
}

// Stored handles are kept alive by `entries`, so an address cannot be reused
// while its key mapping is live.
fn handle_key<E>(handle: &Shared<E>) -> usize {
    Arc::as_ptr(handle) as usize
}

impl<E: Entity> fmt::Debug for Repository<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Repository")
            .field("name", &self.label())
            .field("len", &self.len())
            .field("sequence", &self.sequencer.current())
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}
