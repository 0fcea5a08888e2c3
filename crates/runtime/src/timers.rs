use foundation::time::Time;

/// Deterministic replacement for timeout-chained stage sequencing.
///
/// Key properties:
/// - Due entries fire in `(due_time, id)` order.
/// - Every entry carries its own cancellation token ([`TimerId`]).
/// - Cancellation does not perturb the order of remaining entries.
///
/// This is intentionally simple (Vec-backed) because correctness and
/// determinism matter more here than asymptotic performance.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TimerId(pub u64);

#[derive(Debug)]
struct Entry<T> {
    id: TimerId,
    due: Time,
    payload: T,
    canceled: bool,
}

#[derive(Debug)]
pub struct TimerQueue<T> {
    next_id: u64,
    entries: Vec<Entry<T>>,
}

impl<T> Default for TimerQueue<T> {
    fn default() -> Self {
        Self {
            next_id: 0,
            entries: Vec::new(),
        }
    }
}

impl<T> TimerQueue<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.iter().filter(|e| !e.canceled).count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn schedule(&mut self, due: Time, payload: T) -> TimerId {
        let id = TimerId(self.next_id);
        self.next_id = self.next_id.wrapping_add(1);
        self.entries.push(Entry {
            id,
            due,
            payload,
            canceled: false,
        });
        id
    }

    /// Schedules `payload` to fire `delay_ms` after `now`.
    pub fn schedule_in(&mut self, now: Time, delay_ms: f64, payload: T) -> TimerId {
        self.schedule(now.offset(delay_ms), payload)
    }

    /// Returns `true` if the entry existed and had not already fired.
    pub fn cancel(&mut self, id: TimerId) -> bool {
        if let Some(entry) = self.entries.iter_mut().find(|e| e.id == id) {
            if !entry.canceled {
                entry.canceled = true;
                return true;
            }
        }
        false
    }

    pub fn cancel_all(&mut self) {
        self.entries.clear();
    }

    /// Pops the earliest entry that is due at `now`, if any.
    ///
    /// Call in a loop to fire every due entry for the frame; ties on due
    /// time resolve by scheduling order.
    pub fn pop_due(&mut self, now: Time) -> Option<(TimerId, T)> {
        let mut best_idx: Option<usize> = None;
        for (idx, entry) in self.entries.iter().enumerate() {
            if entry.canceled || entry.due > now {
                continue;
            }
            match best_idx {
                None => best_idx = Some(idx),
                Some(best) => {
                    let b = &self.entries[best];
                    if (entry.due, entry.id) < (b.due, b.id) {
                        best_idx = Some(idx);
                    }
                }
            }
        }

        let idx = best_idx?;
        let entry = self.entries.swap_remove(idx);
        Some((entry.id, entry.payload))
    }
}

#[cfg(test)]
mod tests {
    use super::TimerQueue;
    use foundation::time::Time;

    #[test]
    fn fires_in_due_order() {
        let mut q = TimerQueue::new();
        q.schedule(Time(300.0), "late");
        q.schedule(Time(100.0), "early");

        let (_, a) = q.pop_due(Time(1000.0)).unwrap();
        let (_, b) = q.pop_due(Time(1000.0)).unwrap();
        assert_eq!((a, b), ("early", "late"));
        assert!(q.pop_due(Time(1000.0)).is_none());
    }

    #[test]
    fn equal_due_times_fire_in_schedule_order() {
        let mut q = TimerQueue::new();
        q.schedule(Time(100.0), "a");
        q.schedule(Time(100.0), "b");

        let (_, a) = q.pop_due(Time(100.0)).unwrap();
        let (_, b) = q.pop_due(Time(100.0)).unwrap();
        assert_eq!((a, b), ("a", "b"));
    }

    #[test]
    fn not_yet_due_entries_stay_queued() {
        let mut q = TimerQueue::new();
        q.schedule_in(Time(0.0), 500.0, "later");
        assert!(q.pop_due(Time(499.0)).is_none());
        assert_eq!(q.len(), 1);
        assert!(q.pop_due(Time(500.0)).is_some());
    }

    #[test]
    fn cancel_retracts_a_pending_entry() {
        let mut q = TimerQueue::new();
        let a = q.schedule(Time(100.0), "a");
        q.schedule(Time(200.0), "b");

        assert!(q.cancel(a));
        assert!(!q.cancel(a));

        let (_, v) = q.pop_due(Time(1000.0)).unwrap();
        assert_eq!(v, "b");
        assert!(q.is_empty());
    }

    #[test]
    fn cancel_all_empties_the_queue() {
        let mut q = TimerQueue::new();
        q.schedule(Time(100.0), "a");
        q.schedule(Time(200.0), "b");
        q.cancel_all();
        assert!(q.is_empty());
        assert!(q.pop_due(Time(1000.0)).is_none());
    }
}
