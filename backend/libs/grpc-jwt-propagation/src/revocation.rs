//! In-process token revocation
//!
//! Logout (and, when enabled, password change) must take effect on the very
//! next call without consulting the database. Revocations live in a TTL map
//! keyed by the SHA-256 of the token, each entry expiring together with the
//! token it blocks: once a token is past `exp` the codec rejects it anyway.
//!
//! ## Limits
//!
//! - State is per process; a restart forgets every revocation
//! - Nothing is shared between replicas

use crypto_core::hash::sha256_hex;
use dashmap::DashMap;
use std::hash::Hash;
use std::sync::Arc;
use tokio::task::JoinHandle;
use tokio::time::{Duration, Instant};
use tracing::{debug, info};
use uuid::Uuid;

struct Entry<V> {
    value: V,
    expires_at: Instant,
}

impl<V> Entry<V> {
    fn is_live(&self, now: Instant) -> bool {
        now < self.expires_at
    }
}

/// Concurrent map whose entries disappear after a per-entry TTL
///
/// Expired entries are invisible to readers immediately and physically
/// removed either on the read that notices them or by [`TtlMap::purge_expired`].
pub struct TtlMap<K, V> {
    entries: DashMap<K, Entry<V>>,
}

impl<K, V> Default for TtlMap<K, V>
where
    K: Eq + Hash,
{
    fn default() -> Self {
        Self {
            entries: DashMap::new(),
        }
    }
}

impl<K, V> TtlMap<K, V>
where
    K: Eq + Hash,
    V: Clone,
{
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace `key`, live for `ttl` from now
    pub fn insert(&self, key: K, value: V, ttl: Duration) {
        let expires_at = Instant::now() + ttl;
        self.entries.insert(key, Entry { value, expires_at });
    }

    pub fn get(&self, key: &K) -> Option<V> {
        let now = Instant::now();
        let lookup = self
            .entries
            .get(key)
            .map(|entry| entry.is_live(now).then(|| entry.value.clone()));

        match lookup {
            Some(Some(value)) => Some(value),
            Some(None) => {
                // The read guard is released above; removing here cannot deadlock
                self.entries.remove_if(key, |_, entry| !entry.is_live(now));
                None
            }
            None => None,
        }
    }

    pub fn contains_key(&self, key: &K) -> bool {
        self.get(key).is_some()
    }

    /// Drop every expired entry, returning how many were removed
    pub fn purge_expired(&self) -> usize {
        let now = Instant::now();
        let mut purged = 0;
        self.entries.retain(|_, entry| {
            let live = entry.is_live(now);
            if !live {
                purged += 1;
            }
            live
        });
        purged
    }

    /// Physically stored entries, including expired ones not yet purged
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Process-wide revocation list shared by the interceptor and the auth service
///
/// Cloning is cheap and every clone observes the same state. Construct one per
/// server and inject it; tests build as many independent instances as they need.
#[derive(Clone, Default)]
pub struct RevocationCache {
    tokens: Arc<TtlMap<String, ()>>,
    subjects: Arc<TtlMap<Uuid, i64>>,
}

impl RevocationCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Revoke a single token for `ttl`
    ///
    /// A zero `ttl` means the token has already expired and is not recorded.
    pub fn revoke(&self, token: &str, ttl: Duration) {
        if ttl.is_zero() {
            debug!("Token already expired, skipping revocation entry");
            return;
        }

        self.tokens.insert(sha256_hex(token), (), ttl);
        info!(
            ttl_secs = ttl.as_secs(),
            "Token revoked, blacklist entry will expire with the token"
        );
    }

    pub fn is_revoked(&self, token: &str) -> bool {
        self.tokens.contains_key(&sha256_hex(token))
    }

    /// Revoke every token of `user_id` issued strictly before `issued_before`
    ///
    /// `ttl` must cover the longest lifetime of a token issued before the cutoff.
    pub fn revoke_subject(&self, user_id: Uuid, issued_before: i64, ttl: Duration) {
        if ttl.is_zero() {
            return;
        }

        self.subjects.insert(user_id, issued_before, ttl);
        info!(%user_id, issued_before, "All earlier tokens revoked for user");
    }

    pub fn is_subject_revoked(&self, user_id: &Uuid, issued_at: i64) -> bool {
        self.subjects
            .get(user_id)
            .is_some_and(|issued_before| issued_at < issued_before)
    }

    /// Drop expired entries from both maps
    pub fn purge_expired(&self) -> usize {
        self.tokens.purge_expired() + self.subjects.purge_expired()
    }

    /// Physically stored entries across both maps
    pub fn len(&self) -> usize {
        self.tokens.len() + self.subjects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Run [`RevocationCache::purge_expired`] every `period` on the current runtime
    pub fn spawn_sweeper(&self, period: Duration) -> JoinHandle<()> {
        let cache = self.clone();
        tokio::spawn(async move {
            let mut ticker = tokio::time::interval(period);
            loop {
                ticker.tick().await;
                let purged = cache.purge_expired();
                if purged > 0 {
                    debug!(purged, "Swept expired revocation entries");
                }
            }
        })
    }
}
