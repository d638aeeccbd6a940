//! Compilation cache
//!
//! Memoizes compiled validators per engine. Two keyspaces share one map:
//! tag compiles keyed by the re-joined tag text, and AST compiles keyed by
//! the canonical rule serialization. Entries live as long as the cache.

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

use dashmap::DashMap;

use crate::foundation::Validator;

/// A typed cache key; the two keyspaces can never collide.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum CacheKey {
    /// Tokens re-joined with `;`.
    Tag(String),
    /// Canonical serialization of a rule list.
    Ast(String),
}

impl fmt::Display for CacheKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Tag(tag) => write!(f, "tag:{tag}"),
            Self::Ast(key) => write!(f, "ast:{key}"),
        }
    }
}

/// Point-in-time cache counters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CacheStats {
    pub entries: usize,
    pub hits: u64,
    pub misses: u64,
}

impl CacheStats {
    /// Hits over total lookups, `0.0` before the first lookup.
    #[must_use]
    pub fn hit_rate(&self) -> f64 {
        let total = self.hits + self.misses;
        if total == 0 {
            0.0
        } else {
            self.hits as f64 / total as f64
        }
    }
}

/// Concurrent memo table of compiled validators.
#[derive(Default)]
pub struct CompileCache {
    entries: DashMap<CacheKey, Validator>,
    hits: AtomicU64,
    misses: AtomicU64,
}

impl CompileCache {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, key: &CacheKey) -> Option<Validator> {
        let found = self.entries.get(key).map(|entry| entry.value().clone());
        if found.is_some() {
            self.hits.fetch_add(1, Ordering::Relaxed);
            tracing::trace!(%key, "compile cache hit");
        } else {
            self.misses.fetch_add(1, Ordering::Relaxed);
            tracing::trace!(%key, "compile cache miss");
        }
        found
    }

    /// Stores `validator` unless another thread got there first, and
    /// returns whichever validator is now cached.
    pub fn insert(&self, key: CacheKey, validator: Validator) -> Validator {
        self.entries.entry(key).or_insert(validator).value().clone()
    }

    /// Returns the cached validator or compiles, stores and returns it.
    ///
    /// `compile` runs outside the map lock; a concurrent loser discards its
    /// result and returns the winner's.
    pub fn get_or_compile<F>(&self, key: CacheKey, compile: F) -> Validator
    where
        F: FnOnce() -> Validator,
    {
        if let Some(hit) = self.get(&key) {
            return hit;
        }
        self.insert(key, compile())
    }

    /// Fallible form of [`get_or_compile`](Self::get_or_compile); errors are
    /// not cached.
    pub fn get_or_try_compile<F, E>(&self, key: CacheKey, compile: F) -> Result<Validator, E>
    where
        F: FnOnce() -> Result<Validator, E>,
    {
        if let Some(hit) = self.get(&key) {
            return Ok(hit);
        }
        Ok(self.insert(key, compile()?))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    #[must_use]
    pub fn stats(&self) -> CacheStats {
        CacheStats {
            entries: self.entries.len(),
            hits: self.hits.load(Ordering::Relaxed),
            misses: self.misses.load(Ordering::Relaxed),
        }
    }

    pub fn clear(&self) {
        self.entries.clear();
    }
}

impl fmt::Debug for CompileCache {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CompileCache")
            .field("stats", &self.stats())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keyspaces_are_disjoint() {
        let cache = CompileCache::new();
        let tag = cache.insert(CacheKey::Tag("x".into()), Validator::noop());
        let ast = cache.insert(CacheKey::Ast("x".into()), Validator::noop());
        assert_eq!(cache.len(), 2);
        assert!(!Validator::ptr_eq(&tag, &ast));
        assert_eq!(CacheKey::Tag("a".into()).to_string(), "tag:a");
    }

    #[test]
    fn first_insert_wins() {
        let cache = CompileCache::new();
        let key = CacheKey::Tag("string".into());
        let first = cache.insert(key.clone(), Validator::noop());
        let second = cache.insert(key, Validator::noop());
        assert!(Validator::ptr_eq(&first, &second));
    }

    #[test]
    fn get_or_compile_counts() {
        let cache = CompileCache::new();
        let key = CacheKey::Ast("[]".into());
        let a = cache.get_or_compile(key.clone(), Validator::noop);
        let b = cache.get_or_compile(key, || unreachable!("cached"));
        assert!(Validator::ptr_eq(&a, &b));

        let stats = cache.stats();
        assert_eq!((stats.entries, stats.hits, stats.misses), (1, 1, 1));
        assert!((stats.hit_rate() - 0.5).abs() < f64::EPSILON);
    }

    #[test]
    fn errors_are_not_cached() {
        let cache = CompileCache::new();
        let key = CacheKey::Tag("bad".into());
        let result: Result<Validator, &str> = cache.get_or_try_compile(key.clone(), || Err("nope"));
        assert!(result.is_err());
        assert!(cache.is_empty());

        let ok: Result<Validator, &str> = cache.get_or_try_compile(key, || Ok(Validator::noop()));
        assert!(ok.is_ok());
        cache.clear();
        assert!(cache.is_empty());
    }
}
