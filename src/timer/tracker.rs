//! Per-item countdown tracking.
//!
//! Each item with `timer_minutes > 0` moves through
//! `Inactive -> Running (session start) -> Expired (remaining <= 0)`.
//! The tracker recomputes remaining time on every tick; once a timer
//! expires, claims on its tile are rejected even though the tile stays
//! visible on the board.

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use time::{Duration, OffsetDateTime};
use tracing::debug;

use crate::items::{Item, ItemId};

/// Runtime countdown state for one timed item.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemTimer {
    /// Absolute deadline.
    pub end_time: OffsetDateTime,
    /// Whole seconds left, clamped to 0.
    pub remaining_secs: i64,
    /// Set once `remaining_secs` reaches 0; never unset.
    pub expired: bool,
}

impl ItemTimer {
    fn new(start: OffsetDateTime, minutes: u32) -> Self {
        Self {
            end_time: start + Duration::minutes(i64::from(minutes)),
            remaining_secs: i64::from(minutes) * 60,
            expired: false,
        }
    }

    fn update(&mut self, now: OffsetDateTime) {
        let remaining = (self.end_time - now).whole_seconds().max(0);
        self.remaining_secs = remaining;
        if remaining <= 0 {
            self.expired = true;
        }
    }
}

/// Countdown state for all timed items in a session.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct TimerTracker {
    timers: FxHashMap<ItemId, ItemTimer>,
}

impl TimerTracker {
    /// Create an empty tracker (no timers running).
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Start countdowns for every timed item, anchored at `start`.
    ///
    /// Items with `timer_minutes == 0` are ignored. Called once, at session
    /// start.
    pub fn start<'a>(&mut self, items: impl Iterator<Item = &'a Item>, start: OffsetDateTime) {
        for item in items.filter(|i| i.has_timer()) {
            self.timers
                .insert(item.id, ItemTimer::new(start, item.timer_minutes));
        }
    }

    /// Recompute remaining time for every running timer.
    ///
    /// Returns the items that expired on this tick, in no particular order.
    pub fn tick(&mut self, now: OffsetDateTime) -> Vec<ItemId> {
        let mut newly_expired = Vec::new();

        for (&id, timer) in self.timers.iter_mut() {
            if timer.expired {
                continue;
            }
            timer.update(now);
            if timer.expired {
                debug!(item = %id, "item timer expired");
                newly_expired.push(id);
            }
        }

        newly_expired
    }

    /// Whether the item's timer has run out. Untimed items never expire.
    #[must_use]
    pub fn is_expired(&self, id: ItemId) -> bool {
        self.timers.get(&id).is_some_and(|t| t.expired)
    }

    /// Countdown state for an item, if it has a timer.
    #[must_use]
    pub fn get(&self, id: ItemId) -> Option<&ItemTimer> {
        self.timers.get(&id)
    }

    /// Number of tracked timers (running or expired).
    #[must_use]
    pub fn len(&self) -> usize {
        self.timers.len()
    }

    /// Whether no timers are tracked.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.timers.is_empty()
    }

    /// True once every tracked timer has expired (vacuously true when empty).
    #[must_use]
    pub fn all_expired(&self) -> bool {
        self.timers.values().all(|t| t.expired)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::items::ItemRegistry;
    use time::OffsetDateTime;

    fn t0() -> OffsetDateTime {
        OffsetDateTime::UNIX_EPOCH
    }

    fn registry_with_timers() -> ItemRegistry {
        let mut registry = ItemRegistry::new();
        registry.add_item("plain", &[], 0).unwrap();
        registry.add_item("one minute", &[], 1).unwrap();
        registry.add_item("five minutes", &[], 5).unwrap();
        registry
    }

    #[test]
    fn test_only_timed_items_tracked() {
        let registry = registry_with_timers();
        let mut tracker = TimerTracker::new();
        tracker.start(registry.iter(), t0());

        assert_eq!(tracker.len(), 2);
        assert!(tracker.get(ItemId::new(0)).is_none());
        assert!(tracker.get(ItemId::new(1)).is_some());
    }

    #[test]
    fn test_initial_remaining() {
        let registry = registry_with_timers();
        let mut tracker = TimerTracker::new();
        tracker.start(registry.iter(), t0());

        let timer = tracker.get(ItemId::new(1)).unwrap();
        assert_eq!(timer.remaining_secs, 60);
        assert!(!timer.expired);
        assert_eq!(timer.end_time, t0() + Duration::minutes(1));
    }

    #[test]
    fn test_tick_counts_down_and_clamps() {
        let registry = registry_with_timers();
        let mut tracker = TimerTracker::new();
        tracker.start(registry.iter(), t0());

        tracker.tick(t0() + Duration::seconds(45));
        assert_eq!(tracker.get(ItemId::new(1)).unwrap().remaining_secs, 15);
        assert!(!tracker.is_expired(ItemId::new(1)));

        // Well past the deadline: clamped to 0, expired set.
        tracker.tick(t0() + Duration::seconds(300));
        let timer = tracker.get(ItemId::new(1)).unwrap();
        assert_eq!(timer.remaining_secs, 0);
        assert!(timer.expired);
        assert!(tracker.is_expired(ItemId::new(1)));
        assert!(tracker.all_expired());
    }

    #[test]
    fn test_expiry_at_sixty_one_seconds() {
        let registry = registry_with_timers();
        let mut tracker = TimerTracker::new();
        tracker.start(registry.iter(), t0());

        let expired = tracker.tick(t0() + Duration::seconds(61));
        assert_eq!(expired, vec![ItemId::new(1)]);
        assert!(tracker.is_expired(ItemId::new(1)));
        assert!(!tracker.is_expired(ItemId::new(2)));
    }

    #[test]
    fn test_expired_reported_once() {
        let registry = registry_with_timers();
        let mut tracker = TimerTracker::new();
        tracker.start(registry.iter(), t0());

        let first = tracker.tick(t0() + Duration::seconds(61));
        assert_eq!(first.len(), 1);

        let second = tracker.tick(t0() + Duration::seconds(62));
        assert!(second.is_empty());
    }

    #[test]
    fn test_untimed_items_never_expire() {
        let registry = registry_with_timers();
        let mut tracker = TimerTracker::new();
        tracker.start(registry.iter(), t0());

        tracker.tick(t0() + Duration::hours(10));
        assert!(!tracker.is_expired(ItemId::new(0)));
    }
}
