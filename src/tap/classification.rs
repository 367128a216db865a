//! Sticky per-connection "is this SSE" decisions.

use dashmap::mapref::entry::Entry;
use dashmap::DashMap;

use crate::tap::ConnectionId;

/// Result of recording a classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Classification {
    /// The decision now stored for the connection
    pub is_sse: bool,
    /// Whether this call made the decision (false if one already existed)
    pub newly_decided: bool,
}

/// Write-once map of classification decisions.
#[derive(Debug, Default)]
pub struct ClassificationCache {
    decisions: DashMap<ConnectionId, bool>,
}

impl ClassificationCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a decision unless one exists. The first writer wins.
    pub fn decide(&self, connection_id: &ConnectionId, is_sse: bool) -> Classification {
        match self.decisions.entry(connection_id.clone()) {
            Entry::Occupied(existing) => Classification {
                is_sse: *existing.get(),
                newly_decided: false,
            },
            Entry::Vacant(slot) => {
                slot.insert(is_sse);
                Classification {
                    is_sse,
                    newly_decided: true,
                }
            }
        }
    }

    /// The stored decision, or `None` if the connection is unclassified.
    pub fn get(&self, connection_id: &ConnectionId) -> Option<bool> {
        self.decisions.get(connection_id).map(|decision| *decision)
    }

    pub fn remove(&self, connection_id: &ConnectionId) -> Option<bool> {
        self.decisions.remove(connection_id).map(|(_, decision)| decision)
    }

    pub fn len(&self) -> usize {
        self.decisions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.decisions.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_writer_wins() {
        let cache = ClassificationCache::new();
        let id = ConnectionId::from(1u64);

        assert_eq!(cache.get(&id), None);
        assert_eq!(
            cache.decide(&id, true),
            Classification { is_sse: true, newly_decided: true }
        );
        assert_eq!(
            cache.decide(&id, false),
            Classification { is_sse: true, newly_decided: false }
        );
        assert_eq!(cache.get(&id), Some(true));
    }

    #[test]
    fn test_negative_decision_is_sticky() {
        let cache = ClassificationCache::new();
        let id = ConnectionId::from(2u64);

        cache.decide(&id, false);
        assert!(!cache.decide(&id, true).is_sse);
        assert_eq!(cache.get(&id), Some(false));
    }

    #[test]
    fn test_remove() {
        let cache = ClassificationCache::new();
        let id = ConnectionId::from(3u64);
        cache.decide(&id, true);

        assert_eq!(cache.len(), 1);
        assert_eq!(cache.remove(&id), Some(true));
        assert!(cache.is_empty());
        assert_eq!(cache.remove(&id), None);
    }
}
