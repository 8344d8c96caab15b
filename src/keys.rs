use chrono::{DateTime, Utc};
use parking_lot::Mutex;
use serde::Serialize;
use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};
use tracing::warn;

/// A fixed pool of interchangeable API credentials, rotated round-robin
/// across outbound calls. The pool is constructed once per process and passed
/// by reference to the invoker; there is no global counter.
///
/// Counters are relaxed atomics. Concurrent requests can interleave and pick
/// the same entry or skip one; that is accepted best-effort load spreading,
/// not a per-window usage guarantee.
pub struct KeyPool {
    entries: Vec<KeyEntry>,
    counter: AtomicUsize,
}

pub struct KeyEntry {
    name: String,
    value: Option<String>,
    uses: AtomicU64,
    errors: AtomicU64,
    last_used: Mutex<Option<DateTime<Utc>>>,
}

impl KeyEntry {
    fn new(name: String, value: Option<String>) -> Self {
        Self {
            name,
            value: value.filter(|v| !v.trim().is_empty()),
            uses: AtomicU64::new(0),
            errors: AtomicU64::new(0),
            last_used: Mutex::new(None),
        }
    }
}

/// The credential handed to one generation call. `value` is `None` only when
/// neither the selected entry nor the first entry has a configured value.
#[derive(Debug, Clone)]
pub struct SelectedKey {
    pub index: usize,
    pub name: String,
    pub value: Option<String>,
}

/// Point-in-time usage snapshot of one pool entry. Values never leave the
/// pool; only the metadata is exposed.
#[derive(Debug, Clone, Serialize)]
pub struct KeyStats {
    pub name: String,
    pub configured: bool,
    pub uses: u64,
    pub errors: u64,
    pub last_used: Option<DateTime<Utc>>,
}

impl KeyPool {
    /// Pool over named entries with explicit values. Deterministic pools for
    /// tests go through here.
    pub fn new(entries: Vec<(String, Option<String>)>) -> Self {
        assert!(!entries.is_empty(), "key pool must have at least one entry");
        Self {
            entries: entries
                .into_iter()
                .map(|(name, value)| KeyEntry::new(name, value))
                .collect(),
            counter: AtomicUsize::new(0),
        }
    }

    /// Pool over environment variables, `key1`..`key5` by default. Unset
    /// variables still occupy their slot so the cycle length stays fixed;
    /// selection falls back at call time instead.
    pub fn from_env(var_names: &[String]) -> Self {
        Self::new(
            var_names
                .iter()
                .map(|name| (name.clone(), std::env::var(name).ok()))
                .collect(),
        )
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Advance the rotation and return the credential for this call. N
    /// sequential calls visit each entry exactly once, then the cycle
    /// repeats. When the selected entry has no value, the first entry's
    /// value is returned instead while the selection (and its use count)
    /// stays attributed to the entry the rotation landed on.
    pub fn select_next(&self) -> SelectedKey {
        let index = self.counter.fetch_add(1, Ordering::Relaxed) % self.entries.len();
        let entry = &self.entries[index];
        entry.uses.fetch_add(1, Ordering::Relaxed);
        *entry.last_used.lock() = Some(Utc::now());

        let value = match &entry.value {
            Some(v) => Some(v.clone()),
            None => {
                warn!(key = %entry.name, "credential not configured, falling back to first pool entry");
                self.entries[0].value.clone()
            }
        };

        SelectedKey {
            index,
            name: entry.name.clone(),
            value,
        }
    }

    /// Forced extra rotation after a quota or credential failure, so the next
    /// request starts past the failing entry. Side effects included, result
    /// discarded.
    pub fn advance(&self) {
        let _ = self.select_next();
    }

    /// Attribute a provider failure to the entry that was selected for it.
    pub fn record_error(&self, index: usize) {
        if let Some(entry) = self.entries.get(index) {
            entry.errors.fetch_add(1, Ordering::Relaxed);
        }
    }

    pub fn stats(&self) -> Vec<KeyStats> {
        self.entries
            .iter()
            .map(|e| KeyStats {
                name: e.name.clone(),
                configured: e.value.is_some(),
                uses: e.uses.load(Ordering::Relaxed),
                errors: e.errors.load(Ordering::Relaxed),
                last_used: *e.last_used.lock(),
            })
            .collect()
    }
}

/// The original deployment's pool size and naming.
pub fn default_env_vars() -> Vec<String> {
    (1..=5).map(|i| format!("key{i}")).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pool_of(values: &[Option<&str>]) -> KeyPool {
        KeyPool::new(
            values
                .iter()
                .enumerate()
                .map(|(i, v)| (format!("key{}", i + 1), v.map(str::to_string)))
                .collect(),
        )
    }

    #[test]
    fn rotation_visits_every_entry_once_per_cycle() {
        let pool = pool_of(&[Some("a"), Some("b"), Some("c"), Some("d"), Some("e")]);
        let first_cycle: Vec<usize> = (0..5).map(|_| pool.select_next().index).collect();
        assert_eq!(first_cycle, vec![0, 1, 2, 3, 4]);
        let second_cycle: Vec<usize> = (0..5).map(|_| pool.select_next().index).collect();
        assert_eq!(second_cycle, first_cycle);
    }

    #[test]
    fn selection_resolves_the_entry_value() {
        let pool = pool_of(&[Some("alpha"), Some("beta")]);
        assert_eq!(pool.select_next().value.as_deref(), Some("alpha"));
        assert_eq!(pool.select_next().value.as_deref(), Some("beta"));
    }

    #[test]
    fn unset_entry_falls_back_to_the_first_value() {
        let pool = pool_of(&[Some("alpha"), None, Some("gamma")]);
        pool.select_next();
        let second = pool.select_next();
        // still attributed to key2, value borrowed from key1
        assert_eq!(second.index, 1);
        assert_eq!(second.name, "key2");
        assert_eq!(second.value.as_deref(), Some("alpha"));
    }

    #[test]
    fn fully_unconfigured_pool_yields_no_value() {
        let pool = pool_of(&[None, None]);
        assert!(pool.select_next().value.is_none());
    }

    #[test]
    fn blank_values_count_as_unconfigured() {
        let pool = pool_of(&[Some("real"), Some("  ")]);
        pool.select_next();
        assert_eq!(pool.select_next().value.as_deref(), Some("real"));
        assert!(!pool.stats()[1].configured);
    }

    #[test]
    fn advance_shifts_what_the_next_call_sees() {
        let pool = pool_of(&[Some("a"), Some("b"), Some("c")]);
        pool.select_next(); // entry 0
        pool.advance(); // consumes entry 1
        assert_eq!(pool.select_next().index, 2);
    }

    #[test]
    fn stats_track_uses_errors_and_recency() {
        let pool = pool_of(&[Some("a"), Some("b")]);
        let sel = pool.select_next();
        pool.record_error(sel.index);

        let stats = pool.stats();
        assert_eq!(stats[0].uses, 1);
        assert_eq!(stats[0].errors, 1);
        assert!(stats[0].last_used.is_some());
        assert_eq!(stats[1].uses, 0);
        assert!(stats[1].last_used.is_none());
    }

    #[test]
    #[should_panic(expected = "at least one entry")]
    fn empty_pool_is_a_construction_error() {
        KeyPool::new(Vec::new());
    }
}
