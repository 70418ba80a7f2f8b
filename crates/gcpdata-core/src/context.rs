use crate::{
    config::MappingConfig,
    error::MappingError,
    model::{classify::classify_entity, entity::PersistentEntity},
    node::EntityDecl,
    traits::Persistent,
};
use std::{
    collections::HashMap,
    sync::{Arc, OnceLock, PoisonError, RwLock},
};
use tracing::{debug, warn};

/// Cached outcome of one classification pass.
pub type Registration = Result<Arc<PersistentEntity>, MappingError>;

type Slot = Arc<OnceLock<Registration>>;

///
/// MappingContext
///
/// Registry of persistent entities keyed by type path.
///
/// Each path is classified at most once: concurrent callers for the same
/// path block on its slot until the pass completes, callers for other paths
/// only share the brief map lookup. Failures are cached like successes.
///

#[derive(Debug, Default)]
pub struct MappingContext {
    config: MappingConfig,
    slots: RwLock<HashMap<&'static str, Slot>>,
}

impl MappingContext {
    /// Create a context with the default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_config(config: MappingConfig) -> Self {
        Self {
            config,
            slots: RwLock::default(),
        }
    }

    #[must_use]
    pub const fn config(&self) -> &MappingConfig {
        &self.config
    }

    /// Return the mapping for `T`, classifying it on first use.
    pub fn persistent_entity<T: Persistent>(&self) -> Registration {
        self.register_with(T::PATH, T::entity_decl)
    }

    /// Register a declaration directly, keyed by its path.
    pub fn register(&self, decl: EntityDecl) -> Registration {
        let path = decl.path;

        self.register_with(path, move || decl)
    }

    /// Return the mapping for `path`, building its declaration lazily.
    ///
    /// The declaration closure only runs for the caller that performs the
    /// classification pass.
    pub fn register_with(
        &self,
        path: &'static str,
        decl: impl FnOnce() -> EntityDecl,
    ) -> Registration {
        let slot = self.slot(path);

        slot.get_or_init(|| self.build(&decl())).clone()
    }

    /// Look up an already classified entity by path.
    #[must_use]
    pub fn entity_by_path(&self, path: &str) -> Option<Arc<PersistentEntity>> {
        let slots = self.slots.read().unwrap_or_else(PoisonError::into_inner);

        slots
            .get(path)
            .and_then(|slot| slot.get())
            .and_then(|registration| registration.as_ref().ok())
            .cloned()
    }

    /// Look up an already classified entity by storage kind name.
    #[must_use]
    pub fn entity_by_kind(&self, kind_name: &str) -> Option<Arc<PersistentEntity>> {
        self.entities()
            .into_iter()
            .find(|entity| entity.kind_name() == kind_name)
    }

    /// Successfully classified entities, ordered by path.
    #[must_use]
    pub fn entities(&self) -> Vec<Arc<PersistentEntity>> {
        let slots = self.slots.read().unwrap_or_else(PoisonError::into_inner);

        let mut entities: Vec<_> = slots
            .values()
            .filter_map(|slot| slot.get())
            .filter_map(|registration| registration.as_ref().ok())
            .cloned()
            .collect();
        entities.sort_by_key(|entity| entity.path());

        entities
    }

    /// Whether `path` has finished a classification pass (either outcome).
    #[must_use]
    pub fn is_registered(&self, path: &str) -> bool {
        let slots = self.slots.read().unwrap_or_else(PoisonError::into_inner);

        slots.get(path).is_some_and(|slot| slot.get().is_some())
    }

    // Slots are never removed, and a poisoned map is still consistent since
    // inserts are the only writes.
    fn slot(&self, path: &'static str) -> Slot {
        {
            let slots = self.slots.read().unwrap_or_else(PoisonError::into_inner);
            if let Some(slot) = slots.get(path) {
                return Arc::clone(slot);
            }
        }

        let mut slots = self.slots.write().unwrap_or_else(PoisonError::into_inner);

        Arc::clone(slots.entry(path).or_default())
    }

    fn build(&self, decl: &EntityDecl) -> Registration {
        match classify_entity(decl, &self.config) {
            Ok(entity) => {
                debug!(
                    entity = decl.path,
                    kind = entity.kind_name(),
                    properties = entity.len(),
                    "entity mapped"
                );

                Ok(Arc::new(entity))
            }
            Err(err) => {
                warn!(
                    entity = decl.path,
                    rule = %err.rule,
                    "entity mapping rejected: {}",
                    err.message
                );

                Err(err)
            }
        }
    }
}
