//! The two registries owned by a container.
//!
//! Instances and providers are kept in separate maps keyed by
//! [`DependencyKey`]. An instance entry always wins over a provider entry
//! for the same key; the container enforces that order, the registry only
//! stores.

use std::any::Any;
use std::collections::{HashMap, HashSet};
use std::fmt;
use std::rc::Rc;
use std::sync::Arc;

use tracing::trace;

use crate::container::Container;
use crate::error::{AutowireError, Result};
use crate::key::DependencyKey;

/// A registered instance: an `Arc<T>` behind `dyn Any`, so that unsized
/// `T` can be stored too.
pub(crate) type Instance = Rc<dyn Any>;

/// A normalized provider. Receives the container that is resolving, so
/// delegating providers can construct through it.
pub(crate) type ProviderFn = Rc<dyn Fn(&mut Container) -> Result<Instance>>;

pub(crate) fn erase<T: ?Sized + 'static>(instance: Arc<T>) -> Instance {
    Rc::new(instance)
}

pub(crate) fn downcast<T: ?Sized + 'static>(key: &DependencyKey, instance: &Instance) -> Result<Arc<T>> {
    (**instance)
        .downcast_ref::<Arc<T>>()
        .cloned()
        .ok_or_else(|| AutowireError::ConstructionFailed {
            target: key.type_name(),
            reason: format!("registered value is not an Arc<{}>", key.type_name()),
        })
}

/// Instance and provider registries.
///
/// Cloning copies both maps; the instances themselves are shared.
#[derive(Clone, Default)]
pub(crate) struct Registry {
    instances: HashMap<DependencyKey, Instance>,
    providers: HashMap<DependencyKey, ProviderFn>,
}

impl Registry {
    /// Creates empty registries.
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores an instance, returning the one it replaced.
    pub fn insert_instance(&mut self, key: DependencyKey, instance: Instance) -> Option<Instance> {
        trace!(key = %key, "Storing instance");
        self.instances.insert(key, instance)
    }

    pub fn instance(&self, key: &DependencyKey) -> Option<&Instance> {
        self.instances.get(key)
    }

    pub fn remove_instance(&mut self, key: &DependencyKey) -> Option<Instance> {
        trace!(key = %key, "Removing instance");
        self.instances.remove(key)
    }

    /// Stores a provider, replacing any previous one for the key.
    pub fn insert_provider(&mut self, key: DependencyKey, provider: ProviderFn) {
        trace!(key = %key, "Storing provider");
        self.providers.insert(key, provider);
    }

    /// Returns a handle to the provider, detached from the registry so it
    /// can be invoked while the registry is borrowed mutably.
    pub fn provider(&self, key: &DependencyKey) -> Option<ProviderFn> {
        self.providers.get(key).cloned()
    }

    pub fn has_instance(&self, key: &DependencyKey) -> bool {
        self.instances.contains_key(key)
    }

    pub fn has_provider(&self, key: &DependencyKey) -> bool {
        self.providers.contains_key(key)
    }

    pub fn instance_count(&self) -> usize {
        self.instances.len()
    }

    pub fn provider_count(&self) -> usize {
        self.providers.len()
    }

    /// Every key with an instance, a provider, or both.
    pub fn registered_keys(&self) -> Vec<DependencyKey> {
        let keys: HashSet<DependencyKey> = self
            .instances
            .keys()
            .chain(self.providers.keys())
            .copied()
            .collect();
        keys.into_iter().collect()
    }
}

impl fmt::Debug for Registry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Registry")
            .field("instances", &self.instances.keys().collect::<Vec<_>>())
            .field("providers", &self.providers.keys().collect::<Vec<_>>())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Database;
    struct Cache;

    fn dummy_provider() -> ProviderFn {
        Rc::new(|_: &mut Container| Ok(erase(Arc::new(Database))))
    }

    #[test]
    fn insert_and_get_instance() {
        let mut reg = Registry::new();
        let key = DependencyKey::of::<Database>();
        let original = Arc::new(Database);

        assert!(reg.insert_instance(key, erase(original.clone())).is_none());

        let stored = downcast::<Database>(&key, reg.instance(&key).unwrap()).unwrap();
        assert!(Arc::ptr_eq(&stored, &original));
    }

    #[test]
    fn overwrite_returns_previous() {
        let mut reg = Registry::new();
        let key = DependencyKey::of::<Database>();
        reg.insert_instance(key, erase(Arc::new(Database)));
        assert!(reg.insert_instance(key, erase(Arc::new(Database))).is_some());
        assert_eq!(reg.instance_count(), 1);
    }

    #[test]
    fn downcast_to_wrong_type_fails() {
        let key = DependencyKey::of::<Cache>();
        let instance = erase(Arc::new(Database));
        assert!(downcast::<Cache>(&key, &instance).is_err());
    }

    #[test]
    fn providers_are_separate_from_instances() {
        let mut reg = Registry::new();
        let key = DependencyKey::of::<Database>();
        reg.insert_provider(key, dummy_provider());

        assert!(reg.has_provider(&key));
        assert!(!reg.has_instance(&key));
        assert!(reg.provider(&key).is_some());
    }

    #[test]
    fn registered_keys_are_deduplicated() {
        let mut reg = Registry::new();
        let db = DependencyKey::of::<Database>();
        let cache = DependencyKey::of::<Cache>();
        reg.insert_instance(db, erase(Arc::new(Database)));
        reg.insert_provider(db, dummy_provider());
        reg.insert_provider(cache, dummy_provider());

        let keys = reg.registered_keys();
        assert_eq!(keys.len(), 2);
        assert!(keys.contains(&db));
        assert!(keys.contains(&cache));
    }

    #[test]
    fn clone_shares_instances() {
        let mut reg = Registry::new();
        let key = DependencyKey::of::<Database>();
        reg.insert_instance(key, erase(Arc::new(Database)));

        let mut copy = reg.clone();
        copy.remove_instance(&key);

        assert!(reg.has_instance(&key));
        assert!(!copy.has_instance(&key));
    }
}
