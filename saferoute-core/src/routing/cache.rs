//! Memoization of routing results shared between threads

use std::sync::Arc;

use dashmap::DashMap;

use crate::{Coordinate, SafetyLevel, SafetyZone, routing::SafeRoute};

/// Fingerprint of one zone: coordinate bits, level and name
type ZoneKey = (u64, u64, SafetyLevel, String);

/// Exact key of a routing call. Zones are kept in input order because node
/// ids depend on it.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub(crate) struct RouteKey {
    start: (u64, u64),
    end: (u64, u64),
    zones: Vec<ZoneKey>,
}

impl RouteKey {
    pub(crate) fn new(start: Coordinate, end: Coordinate, zones: &[SafetyZone]) -> Self {
        Self {
            start: start.to_bits(),
            end: end.to_bits(),
            zones: zones
                .iter()
                .map(|zone| {
                    let (lat, lng) = zone.coordinate.to_bits();
                    (lat, lng, zone.safety_level, zone.name.clone())
                })
                .collect(),
        }
    }
}

/// Thread-safe cache of computed routes.
///
/// The map is cleared once it reaches `capacity`. The length check and the
/// clear are separate steps, so concurrent writers can push it past
/// `capacity` by up to one entry each until the next insert clears it.
///
/// Entries are only valid for the scorer configuration they were computed
/// with, so a cache belongs to a single [`RouteScorer`](crate::RouteScorer).
#[derive(Debug, Clone)]
pub struct RouteCache {
    inner: Arc<DashMap<RouteKey, Option<SafeRoute>>>,
    capacity: usize,
}

impl RouteCache {
    pub fn new(capacity: usize) -> Self {
        Self {
            inner: Arc::new(DashMap::with_capacity(capacity.min(1024))),
            capacity,
        }
    }

    pub(crate) fn get(&self, key: &RouteKey) -> Option<Option<SafeRoute>> {
        self.inner.get(key).map(|entry| entry.value().clone())
    }

    pub(crate) fn insert(&self, key: RouteKey, route: Option<SafeRoute>) {
        if self.capacity == 0 {
            return;
        }
        if self.inner.len() >= self.capacity {
            log::debug!("Route cache reached {} entries, clearing", self.capacity);
            self.inner.clear();
        }
        self.inner.insert(key, route);
    }

    pub fn len(&self) -> usize {
        self.inner.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }

    pub fn clear(&self) {
        self.inner.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn coord(lat: f64, lng: f64) -> Coordinate {
        Coordinate::new(lat, lng).unwrap()
    }

    #[test]
    fn keys_distinguish_zone_sets() {
        let start = coord(28.6139, 77.2090);
        let end = coord(28.6129, 77.2295);
        let zone = coord(28.6280, 77.2137);
        let safe = [SafetyZone::new("CP", zone, SafetyLevel::Safe)];
        let danger = [SafetyZone::new("CP", zone, SafetyLevel::Danger)];

        let key = RouteKey::new(start, end, &safe);
        assert_eq!(key, RouteKey::new(start, end, &safe));
        assert_ne!(key, RouteKey::new(start, end, &danger));
        assert_ne!(key, RouteKey::new(end, start, &safe));
        assert_ne!(key, RouteKey::new(start, end, &[]));
    }

    #[test]
    fn clears_when_full() {
        let cache = RouteCache::new(2);
        let end = coord(0.0, 0.0);
        for lat in [1.0, 2.0, 3.0] {
            cache.insert(RouteKey::new(coord(lat, 0.0), end, &[]), None);
        }
        assert_eq!(cache.len(), 1);
        let last = RouteKey::new(coord(3.0, 0.0), end, &[]);
        assert!(cache.get(&last).is_some());
    }

    #[test]
    fn concurrent_inserts_stay_near_capacity() {
        let cache = RouteCache::new(8);
        let end = coord(0.0, 0.0);

        std::thread::scope(|scope| {
            for thread in 0..4 {
                let cache = &cache;
                scope.spawn(move || {
                    for i in 0..50 {
                        let lat = f64::from(thread * 50 + i) / 1000.0;
                        cache.insert(RouteKey::new(coord(lat, 0.0), end, &[]), None);
                    }
                });
            }
        });

        assert!(cache.len() <= 8 + 4, "cache holds {} entries", cache.len());
    }

    #[test]
    fn zero_capacity_disables_storage() {
        let cache = RouteCache::new(0);
        cache.insert(RouteKey::new(coord(1.0, 0.0), coord(0.0, 0.0), &[]), None);
        assert!(cache.is_empty());
    }
}
