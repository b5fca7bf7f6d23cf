use std::collections::HashMap;
use std::sync::RwLock;

///
/// KeyValueCache
///
/// Namespace-scoped get/set/delete of opaque byte values by string key.
/// Carries no invalidation logic of its own; callers never enumerate keys.
///
/// `add` is set-if-absent and returns the value stored after the call, so
/// racing first-writers observe a single winner.
///

pub trait KeyValueCache: Send + Sync {
    fn get(&self, namespace: &str, key: &str) -> Option<Vec<u8>>;

    fn set(&self, namespace: &str, key: &str, value: Vec<u8>);

    /// Store `value` only if the key is absent; return the winning value.
    fn add(&self, namespace: &str, key: &str, value: Vec<u8>) -> Vec<u8>;

    /// Remove a key; returns whether it existed.
    fn delete(&self, namespace: &str, key: &str) -> bool;
}

///
/// MemoryCache
///
/// Process-local [`KeyValueCache`] adapter backed by per-namespace maps.
/// Interior locking only; safe to share across request handlers.
///

#[derive(Debug, Default)]
pub struct MemoryCache {
    spaces: RwLock<HashMap<String, HashMap<String, Vec<u8>>>>,
}

impl MemoryCache {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    // A poisoned lock only means another handler panicked mid-write; cached
    // bytes are still structurally valid, so recover the guard.
    fn read(&self) -> std::sync::RwLockReadGuard<'_, HashMap<String, HashMap<String, Vec<u8>>>> {
        self.spaces.read().unwrap_or_else(|e| e.into_inner())
    }

    fn write(&self) -> std::sync::RwLockWriteGuard<'_, HashMap<String, HashMap<String, Vec<u8>>>> {
        self.spaces.write().unwrap_or_else(|e| e.into_inner())
    }
}

impl KeyValueCache for MemoryCache {
    fn get(&self, namespace: &str, key: &str) -> Option<Vec<u8>> {
        self.read().get(namespace)?.get(key).cloned()
    }

    fn set(&self, namespace: &str, key: &str, value: Vec<u8>) {
        self.write()
            .entry(namespace.to_string())
            .or_default()
            .insert(key.to_string(), value);
    }

    fn add(&self, namespace: &str, key: &str, value: Vec<u8>) -> Vec<u8> {
        let mut spaces = self.write();
        let space = spaces.entry(namespace.to_string()).or_default();

        space.entry(key.to_string()).or_insert(value).clone()
    }

    fn delete(&self, namespace: &str, key: &str) -> bool {
        let mut spaces = self.write();
        spaces
            .get_mut(namespace)
            .is_some_and(|space| space.remove(key).is_some())
    }
}

///
/// TESTS
///
