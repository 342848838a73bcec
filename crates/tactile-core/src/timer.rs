//! One-shot timers driven by the host.
//!
//! Timers never run on their own. The host asks for [`TimerManager::next_deadline`],
//! arranges to wake up then, and pops expired timers one at a time with
//! [`TimerManager::pop_expired`]. Popping one at a time lets the consumer cancel
//! a later timer while handling an earlier one in the same turn.

use std::cmp::Ordering;
use std::collections::BinaryHeap;
use std::time::Duration;

use slotmap::{SlotMap, new_key_type};

use crate::clock::Timestamp;
use crate::error::{Result, TimerError};
use crate::logging::targets;

new_key_type! {
    /// A unique identifier for a timer.
    ///
    /// Identifiers are never reused for a later arming, so a stale handle can
    /// never cancel somebody else's timer.
    pub struct TimerId;
}

/// Internal timer data.
#[derive(Debug)]
struct TimerData<T> {
    /// Value handed back when the timer fires.
    payload: T,
}

/// An entry in the timer queue (min-heap by deadline, then arming order).
#[derive(Debug, Clone, Copy)]
struct TimerQueueEntry {
    id: TimerId,
    deadline: Timestamp,
    sequence: u64,
}

impl PartialEq for TimerQueueEntry {
    fn eq(&self, other: &Self) -> bool {
        self.deadline == other.deadline && self.sequence == other.sequence
    }
}

impl Eq for TimerQueueEntry {}

impl PartialOrd for TimerQueueEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for TimerQueueEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reverse order for min-heap (BinaryHeap is max-heap by default).
        other
            .deadline
            .cmp(&self.deadline)
            .then_with(|| other.sequence.cmp(&self.sequence))
    }
}

/// Manages pending one-shot timers, each carrying a payload of type `T`.
#[derive(Debug)]
pub struct TimerManager<T> {
    /// All pending timers.
    timers: SlotMap<TimerId, TimerData<T>>,
    /// Priority queue of deadlines. May hold entries for cancelled timers.
    queue: BinaryHeap<TimerQueueEntry>,
    /// Arming counter used to break deadline ties.
    sequence: u64,
}

impl<T> TimerManager<T> {
    /// Create a new timer manager.
    pub fn new() -> Self {
        Self {
            timers: SlotMap::with_key(),
            queue: BinaryHeap::new(),
            sequence: 0,
        }
    }

    /// Start a one-shot timer that fires `delay` after `now`.
    ///
    /// Returns the timer ID that can be used to cancel the timer.
    pub fn start_one_shot(&mut self, now: Timestamp, delay: Duration, payload: T) -> TimerId {
        let deadline = now + delay;
        let id = self.timers.insert(TimerData { payload });
        self.sequence += 1;
        self.queue.push(TimerQueueEntry {
            id,
            deadline,
            sequence: self.sequence,
        });

        tracing::trace!(target: targets::TIMER, ?id, ?deadline, "timer armed");
        id
    }

    /// Stop and remove a timer.
    ///
    /// Returns an error if the timer already fired or was already stopped.
    pub fn stop(&mut self, id: TimerId) -> Result<()> {
        match self.timers.remove(id) {
            Some(_) => {
                tracing::trace!(target: targets::TIMER, ?id, "timer cancelled");
                Ok(())
            }
            None => Err(TimerError::InvalidTimerId.into()),
        }
    }

    /// Cancel a timer, ignoring timers that already fired or were cancelled.
    ///
    /// Returns `true` if a pending firing was removed.
    pub fn cancel(&mut self, id: TimerId) -> bool {
        self.stop(id).is_ok()
    }

    /// Check if a timer is still pending.
    pub fn is_active(&self, id: TimerId) -> bool {
        self.timers.contains_key(id)
    }

    /// The earliest pending deadline, if any.
    pub fn next_deadline(&mut self) -> Option<Timestamp> {
        self.discard_stale();
        self.queue.peek().map(|entry| entry.deadline)
    }

    /// Get the duration from `now` until the next timer fires.
    ///
    /// Returns `Duration::ZERO` for overdue timers and `None` without timers.
    pub fn time_until_next(&mut self, now: Timestamp) -> Option<Duration> {
        self.next_deadline()
            .map(|deadline| deadline.saturating_sub(now))
    }

    /// Remove and return the earliest timer whose deadline is at or before `now`.
    ///
    /// Timers with equal deadlines come out in the order they were armed.
    pub fn pop_expired(&mut self, now: Timestamp) -> Option<(TimerId, T)> {
        self.discard_stale();
        let entry = *self.queue.peek()?;
        if entry.deadline > now {
            return None;
        }
        self.queue.pop();

        let data = self.timers.remove(entry.id)?;
        tracing::trace!(target: targets::TIMER, id = ?entry.id, "timer fired");
        Some((entry.id, data.payload))
    }

    /// Cancel every pending timer.
    pub fn clear(&mut self) {
        if !self.timers.is_empty() {
            crate::tactile_trace!(pending = self.timers.len(), "timers cleared");
        }
        self.timers.clear();
        self.queue.clear();
    }

    /// Get the number of pending timers.
    pub fn active_count(&self) -> usize {
        self.timers.len()
    }

    /// Drop queue entries whose timers were cancelled.
    fn discard_stale(&mut self) {
        while let Some(entry) = self.queue.peek() {
            if self.timers.contains_key(entry.id) {
                break;
            }
            self.queue.pop();
        }
    }
}

impl<T> Default for TimerManager<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ms(value: u64) -> Duration {
        Duration::from_millis(value)
    }

    #[test]
    fn test_fires_in_deadline_order() {
        let mut timers = TimerManager::new();
        let late = timers.start_one_shot(ms(0), ms(400), 'l');
        let early = timers.start_one_shot(ms(0), ms(250), 'e');

        assert_eq!(timers.pop_expired(ms(100)), None);
        assert_eq!(timers.pop_expired(ms(500)), Some((early, 'e')));
        assert_eq!(timers.pop_expired(ms(500)), Some((late, 'l')));
        assert_eq!(timers.pop_expired(ms(500)), None);
    }

    #[test]
    fn test_ties_fire_in_arming_order() {
        let mut timers = TimerManager::new();
        let first = timers.start_one_shot(ms(0), ms(100), 1);
        let second = timers.start_one_shot(ms(0), ms(100), 2);
        let third = timers.start_one_shot(ms(0), ms(100), 3);

        assert_eq!(timers.pop_expired(ms(100)), Some((first, 1)));
        assert_eq!(timers.pop_expired(ms(100)), Some((second, 2)));
        assert_eq!(timers.pop_expired(ms(100)), Some((third, 3)));
    }

    #[test]
    fn test_cancel_is_idempotent() {
        let mut timers = TimerManager::new();
        let id = timers.start_one_shot(ms(0), ms(10), ());

        assert!(timers.is_active(id));
        assert!(timers.cancel(id));
        assert!(!timers.cancel(id));
        assert!(timers.stop(id).is_err());
        assert!(!timers.is_active(id));
        assert_eq!(timers.pop_expired(ms(50)), None);
    }

    #[test]
    fn test_cancel_after_fire_is_noop() {
        let mut timers = TimerManager::new();
        let id = timers.start_one_shot(ms(0), ms(10), ());
        assert!(timers.pop_expired(ms(10)).is_some());
        assert!(!timers.cancel(id));
    }

    #[test]
    fn test_cancel_during_processing_prevents_later_fire() {
        let mut timers = TimerManager::new();
        let first = timers.start_one_shot(ms(0), ms(100), "first");
        let second = timers.start_one_shot(ms(0), ms(200), "second");

        let (id, _) = timers.pop_expired(ms(300)).unwrap();
        assert_eq!(id, first);
        timers.cancel(second);
        assert_eq!(timers.pop_expired(ms(300)), None);
    }

    #[test]
    fn test_next_deadline_skips_cancelled() {
        let mut timers = TimerManager::new();
        let early = timers.start_one_shot(ms(0), ms(50), ());
        timers.start_one_shot(ms(0), ms(80), ());
        timers.cancel(early);

        assert_eq!(timers.next_deadline(), Some(ms(80)));
        assert_eq!(timers.time_until_next(ms(30)), Some(ms(50)));
        assert_eq!(timers.time_until_next(ms(90)), Some(Duration::ZERO));
        assert_eq!(timers.active_count(), 1);
    }

    #[test]
    fn test_clear() {
        let mut timers = TimerManager::new();
        timers.start_one_shot(ms(0), ms(50), ());
        timers.start_one_shot(ms(0), ms(60), ());
        timers.clear();

        assert_eq!(timers.active_count(), 0);
        assert_eq!(timers.next_deadline(), None);
    }

    #[test]
    fn test_ids_are_not_reused() {
        let mut timers = TimerManager::new();
        let old = timers.start_one_shot(ms(0), ms(10), ());
        timers.cancel(old);
        let new = timers.start_one_shot(ms(0), ms(10), ());

        assert_ne!(old, new);
        assert!(!timers.cancel(old));
        assert!(timers.is_active(new));
    }
}
