//! Normalized client-side cache of hub entities.
//!
//! A poll replaces a cached list wholesale; mutations apply local patches that stay in place
//! until the next poll overwrites them. There is no rollback.

use chrono::{DateTime, Utc};
use std::collections::HashMap;
use std::sync::{PoisonError, RwLock};

use crate::hub::Pid;

/// An entity the hub identifies by type name and id.
pub trait CacheEntity: Clone + Send + Sync {
    const TYPENAME: &'static str;

    fn entity_id(&self) -> &Pid;

    fn cache_key(&self) -> String {
        format!("{}:{}", Self::TYPENAME, self.entity_id())
    }
}

/// The three-way branch every list view renders from.
#[derive(Debug, Clone, PartialEq)]
pub enum QueryState<T> {
    Loading,
    Failed(String),
    Ready(T),
}

impl<T> QueryState<T> {
    pub fn is_ready(&self) -> bool {
        matches!(self, Self::Ready(_))
    }

    pub fn map<U, F>(self, f: F) -> QueryState<U>
    where
        F: FnOnce(T) -> U,
    {
        match self {
            Self::Loading => QueryState::Loading,
            Self::Failed(message) => QueryState::Failed(message),
            Self::Ready(value) => QueryState::Ready(f(value)),
        }
    }
}

#[derive(Debug)]
struct CacheInner<T> {
    order: Vec<Pid>,
    entries: HashMap<Pid, T>,
    loaded: bool,
    last_error: Option<String>,
    fetched_at: Option<DateTime<Utc>>,
}

impl<T> Default for CacheInner<T> {
    fn default() -> Self {
        Self {
            order: Vec::new(),
            entries: HashMap::new(),
            loaded: false,
            last_error: None,
            fetched_at: None,
        }
    }
}

/// Snapshot store for one entity type, in server order.
#[derive(Debug)]
pub struct EntityCache<T> {
    inner: RwLock<CacheInner<T>>,
}

impl<T: CacheEntity> Default for EntityCache<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: CacheEntity> EntityCache<T> {
    pub fn new() -> Self {
        Self {
            inner: RwLock::new(CacheInner::default()),
        }
    }

    /// Replace the whole list with a fresh server response.
    pub fn replace_all(&self, items: Vec<T>) {
        let mut inner = self.inner.write().unwrap_or_else(PoisonError::into_inner);
        inner.order.clear();
        inner.entries.clear();
        for item in items {
            let id = item.entity_id().clone();
            if inner.entries.insert(id.clone(), item).is_none() {
                inner.order.push(id);
            }
        }
        inner.loaded = true;
        inner.last_error = None;
        inner.fetched_at = Some(Utc::now());
        log::debug!("{} cache replaced with {} entries", T::TYPENAME, inner.order.len());
    }

    /// Record a failed fetch. Views show the error until the next successful poll.
    pub fn record_error(&self, message: impl Into<String>) {
        let mut inner = self.inner.write().unwrap_or_else(PoisonError::into_inner);
        inner.last_error = Some(message.into());
    }

    /// Append a new entity, or replace it in place if the id is already cached.
    pub fn insert(&self, item: T) {
        let mut inner = self.inner.write().unwrap_or_else(PoisonError::into_inner);
        let id = item.entity_id().clone();
        if inner.entries.insert(id.clone(), item).is_none() {
            inner.order.push(id);
        }
    }

    /// Apply a local patch to one entity. Returns false when the id is not cached.
    pub fn patch<F>(&self, id: &Pid, apply: F) -> bool
    where
        F: FnOnce(&mut T),
    {
        let mut inner = self.inner.write().unwrap_or_else(PoisonError::into_inner);
        match inner.entries.get_mut(id) {
            Some(entry) => {
                apply(entry);
                true
            }
            None => false,
        }
    }

    /// Remove one entity, leaving every other entry and the ordering untouched.
    pub fn remove(&self, id: &Pid) -> Option<T> {
        let mut inner = self.inner.write().unwrap_or_else(PoisonError::into_inner);
        let removed = inner.entries.remove(id);
        if removed.is_some() {
            inner.order.retain(|existing| existing != id);
        }
        removed
    }

    pub fn get(&self, id: &Pid) -> Option<T> {
        let inner = self.inner.read().unwrap_or_else(PoisonError::into_inner);
        inner.entries.get(id).cloned()
    }

    pub fn find<P>(&self, predicate: P) -> Option<T>
    where
        P: Fn(&T) -> bool,
    {
        let inner = self.inner.read().unwrap_or_else(PoisonError::into_inner);
        inner
            .order
            .iter()
            .filter_map(|id| inner.entries.get(id))
            .find(|entry| predicate(entry))
            .cloned()
    }

    pub fn list(&self) -> Vec<T> {
        let inner = self.inner.read().unwrap_or_else(PoisonError::into_inner);
        inner
            .order
            .iter()
            .filter_map(|id| inner.entries.get(id))
            .cloned()
            .collect()
    }

    pub fn len(&self) -> usize {
        let inner = self.inner.read().unwrap_or_else(PoisonError::into_inner);
        inner.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn fetched_at(&self) -> Option<DateTime<Utc>> {
        let inner = self.inner.read().unwrap_or_else(PoisonError::into_inner);
        inner.fetched_at
    }

    /// Loading until the first response, failed while the last fetch errored, else ready.
    pub fn state(&self) -> QueryState<Vec<T>> {
        let inner = self.inner.read().unwrap_or_else(PoisonError::into_inner);
        if let Some(error) = &inner.last_error {
            return QueryState::Failed(error.clone());
        }
        if !inner.loaded {
            return QueryState::Loading;
        }
        QueryState::Ready(
            inner
                .order
                .iter()
                .filter_map(|id| inner.entries.get(id))
                .cloned()
                .collect(),
        )
    }
}
