//! Live table of every network seen since startup.
//!
//! The scanner upserts into the registry and the presenter snapshots it. Both
//! hold an `Arc<NetworkRegistry>`; the lock is private and only held for the
//! map access itself, never across I/O.

use std::collections::BTreeMap;
use std::sync::{PoisonError, RwLock};

use crate::types::{NetworkKey, NetworkRecord};

/// Latest record per network key. Entries are never removed, so a network
/// that stops beaconing stays listed with its last timestamp.
#[derive(Debug, Default)]
pub struct NetworkRegistry {
    networks: RwLock<BTreeMap<NetworkKey, NetworkRecord>>,
}

impl NetworkRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or overwrite the record for `key`.
    pub fn upsert(&self, key: NetworkKey, record: NetworkRecord) {
        // A panic elsewhere cannot leave a half-written entry, so a poisoned
        // lock still guards a consistent map.
        let mut networks = self.networks.write().unwrap_or_else(PoisonError::into_inner);
        networks.insert(key, record);
    }

    /// Point-in-time copy of all entries, ascending by key.
    pub fn snapshot(&self) -> Vec<(NetworkKey, NetworkRecord)> {
        let networks = self.networks.read().unwrap_or_else(PoisonError::into_inner);
        networks
            .iter()
            .map(|(key, record)| (key.clone(), record.clone()))
            .collect()
    }

    pub fn len(&self) -> usize {
        self.networks
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::thread;

    use super::*;
    use crate::types::Channel;

    fn record(address: &str, signal: i32) -> NetworkRecord {
        NetworkRecord {
            address: address.to_string(),
            channel: Channel::Number(1),
            signal,
            last_seen: "01/01 00:00:00".to_string(),
        }
    }

    fn key(label: &str) -> NetworkKey {
        NetworkKey::compose(label, "1")
    }

    #[test]
    fn last_upsert_per_key_wins() {
        let registry = NetworkRegistry::new();
        registry.upsert(key("A"), record("aa", -10));
        registry.upsert(key("B"), record("bb", -20));
        registry.upsert(key("A"), record("aa2", -30));
        registry.upsert(key("B"), record("bb2", -40));
        registry.upsert(key("A"), record("aa3", -50));

        let snapshot = registry.snapshot();
        assert_eq!(snapshot.len(), 2);
        assert_eq!(snapshot[0], (key("A"), record("aa3", -50)));
        assert_eq!(snapshot[1], (key("B"), record("bb2", -40)));
    }

    #[test]
    fn snapshot_sorted_by_key() {
        let registry = NetworkRegistry::new();
        for label in ["B", "A", "C"] {
            registry.upsert(key(label), record(label, 0));
        }

        let keys: Vec<String> = registry
            .snapshot()
            .into_iter()
            .map(|(k, _)| k.to_string())
            .collect();
        assert_eq!(keys, vec!["A (1)", "B (1)", "C (1)"]);
    }

    #[test]
    fn snapshot_is_idempotent() {
        let registry = NetworkRegistry::new();
        registry.upsert(key("Home"), record("aa", -42));
        registry.upsert(key("Office"), record("bb", -70));

        assert_eq!(registry.snapshot(), registry.snapshot());
    }

    #[test]
    fn snapshot_unaffected_by_later_upserts() {
        let registry = NetworkRegistry::new();
        registry.upsert(key("Home"), record("aa", -42));
        let before = registry.snapshot();

        registry.upsert(key("Home"), record("aa", -90));
        registry.upsert(key("Other"), record("cc", -60));

        assert_eq!(before, vec![(key("Home"), record("aa", -42))]);
        assert_eq!(registry.len(), 2);
    }

    #[test]
    fn keys_are_never_dropped() {
        let registry = NetworkRegistry::new();
        registry.upsert(key("Gone"), record("aa", -80));

        // Later cycles only ever see another network.
        for signal in 0..5 {
            registry.upsert(key("Present"), record("bb", signal));
            let snapshot = registry.snapshot();
            assert!(snapshot.iter().any(|(k, _)| *k == key("Gone")));
        }
        assert_eq!(registry.len(), 2);
    }

    #[test]
    fn empty_registry() {
        let registry = NetworkRegistry::new();
        assert!(registry.is_empty());
        assert!(registry.snapshot().is_empty());
    }

    #[test]
    fn concurrent_snapshots_never_see_torn_records() {
        let registry = Arc::new(NetworkRegistry::new());

        let writer = {
            let registry = Arc::clone(&registry);
            thread::spawn(move || {
                for i in 0..2_000 {
                    // Every field derives from `i` so a mixed record is detectable.
                    registry.upsert(
                        key("Shared"),
                        NetworkRecord {
                            address: format!("addr-{i}"),
                            channel: Channel::Number(i),
                            signal: -(i as i32),
                            last_seen: format!("seen-{i}"),
                        },
                    );
                }
            })
        };

        for _ in 0..2_000 {
            for (_, rec) in registry.snapshot() {
                let Channel::Number(i) = rec.channel else {
                    panic!("unexpected channel token");
                };
                assert_eq!(rec.address, format!("addr-{i}"));
                assert_eq!(rec.signal, -(i as i32));
                assert_eq!(rec.last_seen, format!("seen-{i}"));
            }
        }

        writer.join().unwrap();
        assert_eq!(registry.len(), 1);
    }
}
