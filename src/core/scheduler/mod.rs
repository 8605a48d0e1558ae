//=========================================================================
// Scheduler
//=========================================================================
//
// Frame clock with a deferred-call queue and delayed timers.
//
// Architecture:
//   defer(task)             → VecDeque (FIFO, fires next tick)
//   schedule_after(d, task) → BinaryHeap<Reverse<Timer>> (min-heap by expiry)
//
//   advance(dt) → [deferred in FIFO order] ++ [due timers by expiry, seq]
//
// Work deferred while a batch is being dispatched lands in the next tick.
// There is no cancel primitive: owners must make stale work a no-op.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::cmp::{Ordering, Reverse};
use std::collections::{BinaryHeap, VecDeque};
use std::time::Duration;

use log::trace;

//=== Module Declarations =================================================

mod task;

//=== Public API ==========================================================

pub use task::Task;

//=== TimerHandle =========================================================

/// Identifies one scheduled unit of work (deferred call or timer).
///
/// Handles are unique for the lifetime of a scheduler and increase
/// monotonically in scheduling order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TimerHandle(u64);

impl TimerHandle {
    /// Raw sequence number of this handle.
    pub fn id(self) -> u64 {
        self.0
    }
}

//=== Timer ===============================================================

struct Timer<T> {
    expires_at: Duration,
    handle: TimerHandle,
    task: T,
}

// Ordered by expiry, then by scheduling order.
impl<T> PartialEq for Timer<T> {
    fn eq(&self, other: &Self) -> bool {
        self.expires_at == other.expires_at && self.handle == other.handle
    }
}

impl<T> Eq for Timer<T> {}

impl<T> PartialOrd for Timer<T> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<T> Ord for Timer<T> {
    fn cmp(&self, other: &Self) -> Ordering {
        self.expires_at
            .cmp(&other.expires_at)
            .then_with(|| self.handle.cmp(&other.handle))
    }
}

//=== Scheduler ===========================================================

/// Tick-driven scheduler for deferred calls and timers.
///
/// The scheduler never runs work itself. [`Scheduler::advance`] hands the
/// due tasks back to the caller, which dispatches them while it still owns
/// every system mutably.
pub struct Scheduler<T> {
    now: Duration,
    tick: u64,
    next_handle: u64,
    deferred: VecDeque<(TimerHandle, T)>,
    timers: BinaryHeap<Reverse<Timer<T>>>,
}

impl<T> Scheduler<T> {
    //--- Construction -----------------------------------------------------

    /// Creates an empty scheduler at time zero.
    pub fn new() -> Self {
        Self {
            now: Duration::ZERO,
            tick: 0,
            next_handle: 0,
            deferred: VecDeque::new(),
            timers: BinaryHeap::new(),
        }
    }

    //--- Scheduling -------------------------------------------------------

    /// Queues a task to run on the next tick.
    pub fn defer(&mut self, task: T) -> TimerHandle {
        let handle = self.next_handle();
        self.deferred.push_back((handle, task));
        trace!("Deferred call {:?} queued (tick {})", handle, self.tick);
        handle
    }

    /// Queues a task to run once `delay` has elapsed.
    ///
    /// The timer fires on the first tick whose clock is at or past
    /// `now + delay`.
    pub fn schedule_after(&mut self, delay: Duration, task: T) -> TimerHandle {
        let handle = self.next_handle();
        let expires_at = self.now + delay;
        self.timers.push(Reverse(Timer {
            expires_at,
            handle,
            task,
        }));
        trace!("Timer {:?} armed for {:?}", handle, expires_at);
        handle
    }

    //--- Tick -------------------------------------------------------------

    /// Advances the clock by `dt` and returns every task now due.
    ///
    /// Deferred calls queued before this call come first in FIFO order,
    /// followed by timers ordered by expiry.
    pub fn advance(&mut self, dt: Duration) -> Vec<(TimerHandle, T)> {
        self.tick += 1;
        self.now += dt;

        let mut due: Vec<(TimerHandle, T)> = std::mem::take(&mut self.deferred).into();

        while let Some(Reverse(next)) = self.timers.peek() {
            if next.expires_at > self.now {
                break;
            }
            if let Some(Reverse(timer)) = self.timers.pop() {
                due.push((timer.handle, timer.task));
            }
        }

        due
    }

    //--- Queries ----------------------------------------------------------

    /// Elapsed clock time.
    pub fn now(&self) -> Duration {
        self.now
    }

    /// Number of ticks processed so far.
    pub fn tick_count(&self) -> u64 {
        self.tick
    }

    /// Number of deferred calls waiting for the next tick.
    pub fn pending_deferred(&self) -> usize {
        self.deferred.len()
    }

    /// Number of armed timers.
    pub fn pending_timers(&self) -> usize {
        self.timers.len()
    }

    /// Iterates deferred tasks in firing order.
    pub fn deferred_tasks(&self) -> impl Iterator<Item = &T> {
        self.deferred.iter().map(|(_, task)| task)
    }

    //--- Internal Helpers -------------------------------------------------

    fn next_handle(&mut self) -> TimerHandle {
        let handle = TimerHandle(self.next_handle);
        self.next_handle += 1;
        handle
    }
}

impl<T> Default for Scheduler<T> {
    fn default() -> Self {
        Self::new()
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
