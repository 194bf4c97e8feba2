use std::collections::HashMap;
use std::sync::RwLock;

use orderdesk_core::{AppError, AppResult, Entity};

/// In-memory keyed record storage shared by the in-memory repositories.
#[derive(Debug)]
pub struct RecordStore<E: Entity> {
    inner: RwLock<HashMap<E::Id, E>>,
}

impl<E: Entity> RecordStore<E> {
    pub fn new() -> Self {
        Self {
            inner: RwLock::new(HashMap::new()),
        }
    }
}

impl<E: Entity> Default for RecordStore<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E> RecordStore<E>
where
    E: Entity + Clone,
{
    pub fn get(&self, id: E::Id) -> AppResult<Option<E>> {
        let map = self.inner.read().map_err(|_| poisoned())?;
        Ok(map.get(&id).cloned())
    }

    pub fn find(&self, predicate: impl Fn(&E) -> bool) -> AppResult<Option<E>> {
        let map = self.inner.read().map_err(|_| poisoned())?;
        Ok(map.values().find(|record| predicate(record)).cloned())
    }

    pub fn len(&self) -> AppResult<usize> {
        let map = self.inner.read().map_err(|_| poisoned())?;
        Ok(map.len())
    }

    /// Run `f` against the map while holding the write lock.
    pub fn write<T>(&self, f: impl FnOnce(&mut HashMap<E::Id, E>) -> AppResult<T>) -> AppResult<T> {
        let mut map = self.inner.write().map_err(|_| poisoned())?;
        f(&mut map)
    }
}

fn poisoned() -> AppError {
    AppError::store("lock poisoned")
}
