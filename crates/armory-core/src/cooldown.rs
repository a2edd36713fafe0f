//! Tick-based expiring caches for behaviors.
//!
//! Behaviors keep per-actor state that should vanish on its own: the last
//! time a rescue fired, the tick a cooldown ends. [`ExpiringCache`] is a
//! write-through map whose entries expire a fixed number of ticks after their
//! last write. [`Cooldowns`] builds the usual cooldown check on top of it.
//!
//! Time is the host tick passed in by the caller; nothing here reads a clock.
//!
//! # Example
//!
//! ```
//! use armory_core::cooldown::Cooldowns;
//! use armory_core::shape::ActorId;
//!
//! let cooldowns: Cooldowns = Cooldowns::new();
//! let actor = ActorId::new(1);
//!
//! assert!(cooldowns.check_cooldown(actor, "rescue", 20, 100));
//! assert!(!cooldowns.check_cooldown(actor, "rescue", 20, 110));
//! assert!(cooldowns.check_cooldown(actor, "rescue", 20, 120));
//! ```

use std::collections::HashMap;
use std::fmt;
use std::hash::Hash;
use std::sync::atomic::{AtomicU64, Ordering};

use parking_lot::RwLock;

use crate::shape::ActorId;

#[derive(Debug, Clone)]
struct Stamped<V> {
    value: V,
    expires_at: u64,
}

impl<V> Stamped<V> {
    fn new(value: V, ttl: u64, now: u64) -> Self {
        Self {
            value,
            expires_at: now.saturating_add(ttl),
        }
    }

    fn is_expired(&self, now: u64) -> bool {
        now >= self.expires_at
    }
}

// =============================================================================
// Expiring Cache
// =============================================================================

/// Map whose entries expire `ttl` ticks after their last write.
pub struct ExpiringCache<K, V> {
    entries: RwLock<HashMap<K, Stamped<V>>>,
    ttl: u64,
}

impl<K: Eq + Hash, V: Clone> ExpiringCache<K, V> {
    /// Creates a cache with the given time-to-live in ticks.
    #[must_use]
    pub fn new(ttl: u64) -> Self {
        Self {
            entries: RwLock::new(HashMap::new()),
            ttl,
        }
    }

    /// Returns the time-to-live in ticks.
    #[must_use]
    pub fn ttl(&self) -> u64 {
        self.ttl
    }

    /// Returns the live value for `key`, dropping it if it has expired.
    pub fn get(&self, key: &K, now: u64) -> Option<V> {
        {
            let entries = self.entries.read();
            match entries.get(key) {
                None => return None,
                Some(entry) if !entry.is_expired(now) => return Some(entry.value.clone()),
                Some(_) => {}
            }
        }
        let mut entries = self.entries.write();
        if entries.get(key).is_some_and(|entry| entry.is_expired(now)) {
            entries.remove(key);
        }
        None
    }

    /// Writes `value`, restarting the expiry of `key`.
    pub fn insert(&self, key: K, value: V, now: u64) {
        self.insert_with_ttl(key, value, self.ttl, now);
    }

    /// Writes `value` with a one-off time-to-live.
    pub fn insert_with_ttl(&self, key: K, value: V, ttl: u64, now: u64) {
        self.entries
            .write()
            .insert(key, Stamped::new(value, ttl, now));
    }

    /// Writes `value` only if `key` has no live entry. Returns true if
    /// written.
    pub fn insert_if_absent(&self, key: K, value: V, ttl: u64, now: u64) -> bool {
        let mut entries = self.entries.write();
        if entries.get(&key).is_some_and(|entry| !entry.is_expired(now)) {
            return false;
        }
        entries.insert(key, Stamped::new(value, ttl, now));
        true
    }

    /// Returns the number of ticks until `key` expires, or zero if absent.
    #[must_use]
    pub fn remaining(&self, key: &K, now: u64) -> u64 {
        self.entries
            .read()
            .get(key)
            .map_or(0, |entry| entry.expires_at.saturating_sub(now))
    }

    /// Removes `key`, returning its value even if expired.
    pub fn remove(&self, key: &K) -> Option<V> {
        self.entries.write().remove(key).map(|entry| entry.value)
    }

    /// Drops every expired entry. Returns how many were dropped.
    pub fn purge(&self, now: u64) -> usize {
        let mut entries = self.entries.write();
        let before = entries.len();
        entries.retain(|_, entry| !entry.is_expired(now));
        before - entries.len()
    }

    /// Returns the number of stored entries, expired ones included.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.read().len()
    }

    /// Returns true if nothing is stored.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.read().is_empty()
    }

    /// Removes everything.
    pub fn clear(&self) {
        self.entries.write().clear();
    }
}

impl<K, V> fmt::Debug for ExpiringCache<K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ExpiringCache")
            .field("entries", &self.entries.read().len())
            .field("ttl", &self.ttl)
            .finish()
    }
}

// =============================================================================
// Cooldowns
// =============================================================================

/// Number of cooldown checks between sweeps of finished cooldowns.
pub const PURGE_INTERVAL: u64 = 256;

/// Per-actor cooldown bookkeeping, keyed by a behavior-chosen key.
///
/// Finished cooldowns are swept every [`PURGE_INTERVAL`] checks, so the
/// tracker stays bounded by the cooldowns started in the last sweep window
/// plus those still running.
pub struct Cooldowns<K = String> {
    active: ExpiringCache<(ActorId, K), ()>,
    checks: AtomicU64,
}

impl<K: Eq + Hash> Cooldowns<K> {
    /// Creates an empty tracker.
    #[must_use]
    pub fn new() -> Self {
        Self {
            active: ExpiringCache::new(0),
            checks: AtomicU64::new(0),
        }
    }

    /// Starts a cooldown of `ticks` if none is running.
    ///
    /// Returns true when the actor was ready; the cooldown is then running
    /// from `now`. Returns false, and changes nothing, while a previous
    /// cooldown is still running.
    pub fn check_cooldown(&self, actor: ActorId, key: impl Into<K>, ticks: u64, now: u64) -> bool {
        if self.checks.fetch_add(1, Ordering::Relaxed) % PURGE_INTERVAL == PURGE_INTERVAL - 1 {
            self.active.purge(now);
        }
        if ticks == 0 {
            return true;
        }
        self.active
            .insert_if_absent((actor, key.into()), (), ticks, now)
    }

    /// Returns the ticks left on a running cooldown, or zero.
    #[must_use]
    pub fn remaining(&self, actor: ActorId, key: impl Into<K>, now: u64) -> u64 {
        self.active.remaining(&(actor, key.into()), now)
    }

    /// Ends a running cooldown early.
    pub fn reset(&self, actor: ActorId, key: impl Into<K>) {
        self.active.remove(&(actor, key.into()));
    }

    /// Drops finished cooldowns. Returns how many were dropped.
    pub fn purge(&self, now: u64) -> usize {
        self.active.purge(now)
    }

    /// Returns the number of tracked cooldowns, finished ones included until
    /// the next sweep.
    #[must_use]
    pub fn len(&self) -> usize {
        self.active.len()
    }

    /// Returns true if no cooldown is tracked.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.active.is_empty()
    }
}

impl<K: Eq + Hash> Default for Cooldowns<K> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K> fmt::Debug for Cooldowns<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Cooldowns")
            .field("active", &self.active)
            .finish()
    }
}
