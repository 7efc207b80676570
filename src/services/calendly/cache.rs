use std::num::NonZeroUsize;
use std::sync::Mutex;

use async_trait::async_trait;
use lru::LruCache;

use super::AvailabilityProvider;
use crate::models::{SlotQuery, TimeSlot};

/// Process-wide memo of availability answers keyed by the exact query.
///
/// Entries never expire. Lookups use `peek`, so once the cache is full the
/// entry inserted first is the one dropped. Failed lookups are not stored.
pub struct CachedAvailability {
    inner: Box<dyn AvailabilityProvider>,
    entries: Mutex<LruCache<SlotQuery, Vec<TimeSlot>>>,
}

impl CachedAvailability {
    pub fn new(inner: Box<dyn AvailabilityProvider>, capacity: usize) -> Self {
        let capacity = NonZeroUsize::new(capacity).unwrap_or(NonZeroUsize::MIN);
        Self {
            inner,
            entries: Mutex::new(LruCache::new(capacity)),
        }
    }

    pub fn len(&self) -> usize {
        self.entries.lock().map(|c| c.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn lookup(&self, query: &SlotQuery) -> Option<Vec<TimeSlot>> {
        self.entries.lock().ok()?.peek(query).cloned()
    }

    fn store(&self, query: &SlotQuery, slots: &[TimeSlot]) {
        if let Ok(mut entries) = self.entries.lock() {
            entries.put(query.clone(), slots.to_vec());
        }
    }
}

#[async_trait]
impl AvailabilityProvider for CachedAvailability {
    async fn available_slots(&self, query: &SlotQuery) -> anyhow::Result<Vec<TimeSlot>> {
        if let Some(slots) = self.lookup(query) {
            tracing::debug!(event_type = %query.event_type, "availability cache hit");
            return Ok(slots);
        }

        let slots = self.inner.available_slots(query).await?;
        self.store(query, &slots);
        Ok(slots)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    use chrono::{Duration, Utc};

    struct CountingProvider {
        calls: Arc<AtomicUsize>,
        fail: bool,
    }

    #[async_trait]
    impl AvailabilityProvider for CountingProvider {
        async fn available_slots(&self, _query: &SlotQuery) -> anyhow::Result<Vec<TimeSlot>> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if self.fail {
                anyhow::bail!("calendly unreachable");
            }
            let start = Utc::now();
            Ok(vec![TimeSlot {
                start_time: start,
                end_time: start + Duration::minutes(30),
                is_available: true,
            }])
        }
    }

    fn query(start: &str) -> SlotQuery {
        SlotQuery {
            start: start.to_string(),
            end: "2025-06-22".to_string(),
            event_type: "evt".to_string(),
        }
    }

    fn cached(capacity: usize, fail: bool) -> (CachedAvailability, Arc<AtomicUsize>) {
        let calls = Arc::new(AtomicUsize::new(0));
        let provider = CountingProvider {
            calls: Arc::clone(&calls),
            fail,
        };
        (CachedAvailability::new(Box::new(provider), capacity), calls)
    }

    #[tokio::test]
    async fn test_repeat_query_served_from_cache() {
        let (cache, calls) = cached(4, false);
        let first = cache.available_slots(&query("2025-06-16")).await.unwrap();
        let second = cache.available_slots(&query("2025-06-16")).await.unwrap();
        assert_eq!(first, second);
        assert_eq!(calls.load(Ordering::SeqCst), 1);

        cache.available_slots(&query("2025-06-17")).await.unwrap();
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_failures_not_cached() {
        let (cache, calls) = cached(4, true);
        assert!(cache.available_slots(&query("2025-06-16")).await.is_err());
        assert!(cache.available_slots(&query("2025-06-16")).await.is_err());
        assert_eq!(calls.load(Ordering::SeqCst), 2);
        assert!(cache.is_empty());
    }

    #[tokio::test]
    async fn test_oldest_entry_evicted_at_capacity() {
        let (cache, calls) = cached(2, false);
        cache.available_slots(&query("a")).await.unwrap();
        cache.available_slots(&query("b")).await.unwrap();
        // reading "a" does not refresh it
        cache.available_slots(&query("a")).await.unwrap();
        cache.available_slots(&query("c")).await.unwrap();
        assert_eq!(cache.len(), 2);
        assert_eq!(calls.load(Ordering::SeqCst), 3);

        cache.available_slots(&query("b")).await.unwrap();
        assert_eq!(calls.load(Ordering::SeqCst), 3);
        cache.available_slots(&query("a")).await.unwrap();
        assert_eq!(calls.load(Ordering::SeqCst), 4);
    }
}
