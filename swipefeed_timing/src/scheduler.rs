// Copyright 2025 the Swipefeed Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use alloc::vec::Vec;
use core::cmp::Ordering;

use tracing::trace;

/// Handle for one scheduled action, used to cancel it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Token(pub u64);

/// Group key for scheduled actions.
///
/// Cancelling a scope cancels every action scheduled under it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ScopeId(pub u64);

/// When an action becomes due.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Due {
    /// Due once the frame counter reaches this tick.
    Tick(u64),
    /// Due once the host clock reaches this time, in seconds.
    Time(f64),
}

impl Due {
    fn is_due(self, tick: u64, time: f64) -> bool {
        match self {
            Self::Tick(due) => due <= tick,
            Self::Time(due) => due <= time,
        }
    }

    /// Tick-keyed entries sort before time-keyed ones; within a kind by due.
    fn order(self, other: Self) -> Ordering {
        match (self, other) {
            (Self::Tick(a), Self::Tick(b)) => a.cmp(&b),
            (Self::Time(a), Self::Time(b)) => a.total_cmp(&b),
            (Self::Tick(_), Self::Time(_)) => Ordering::Less,
            (Self::Time(_), Self::Tick(_)) => Ordering::Greater,
        }
    }
}

#[derive(Clone, Debug)]
struct Entry<A> {
    token: Token,
    scope: ScopeId,
    due: Due,
    action: A,
}

/// A queue of deferred actions, drained once per frame.
///
/// The scheduler never runs anything itself. [`drain_due`](Self::drain_due)
/// hands back the actions that have come due, ordered by due point and then
/// by scheduling order, and the host interprets them.
///
/// ```rust
/// use swipefeed_timing::{Scheduler, ScopeId};
///
/// let mut scheduler = Scheduler::new();
/// scheduler.schedule_at_tick(2, ScopeId(7), "b");
/// scheduler.schedule_at_tick(1, ScopeId(7), "a");
/// let doomed = scheduler.schedule_at_tick(1, ScopeId(8), "x");
/// scheduler.cancel(doomed);
///
/// assert!(scheduler.drain_due(0, 0.0).is_empty());
/// assert_eq!(scheduler.drain_due(2, 0.0), ["a", "b"]);
/// assert!(scheduler.is_empty());
/// ```
#[derive(Clone, Debug)]
pub struct Scheduler<A> {
    entries: Vec<Entry<A>>,
    next_token: u64,
}

impl<A> Default for Scheduler<A> {
    fn default() -> Self {
        Self::new()
    }
}

impl<A> Scheduler<A> {
    /// Creates an empty scheduler.
    #[must_use]
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
            next_token: 0,
        }
    }

    /// Number of pending actions.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if nothing is pending.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Schedules `action` for frame `due`.
    pub fn schedule_at_tick(&mut self, due: u64, scope: ScopeId, action: A) -> Token {
        self.push(Due::Tick(due), scope, action)
    }

    /// Schedules `action` for host time `due`, in seconds.
    pub fn schedule_at_time(&mut self, due: f64, scope: ScopeId, action: A) -> Token {
        self.push(Due::Time(due), scope, action)
    }

    /// Cancels one action. Returns `false` if it already ran or was cancelled.
    pub fn cancel(&mut self, token: Token) -> bool {
        let before = self.entries.len();
        self.entries.retain(|entry| entry.token != token);
        before != self.entries.len()
    }

    /// Cancels every action in `scope` and returns how many were removed.
    pub fn cancel_scope(&mut self, scope: ScopeId) -> usize {
        let before = self.entries.len();
        self.entries.retain(|entry| entry.scope != scope);
        let removed = before - self.entries.len();
        if removed > 0 {
            trace!(scope = scope.0, removed, "cancelled scheduled actions");
        }
        removed
    }

    /// Removes and returns every action due at `tick` or `time`.
    pub fn drain_due(&mut self, tick: u64, time: f64) -> Vec<A> {
        let (mut due, pending): (Vec<_>, Vec<_>) = core::mem::take(&mut self.entries)
            .into_iter()
            .partition(|entry| entry.due.is_due(tick, time));
        self.entries = pending;
        due.sort_by(|a, b| a.due.order(b.due).then(a.token.cmp(&b.token)));
        due.into_iter().map(|entry| entry.action).collect()
    }

    /// Drops everything pending.
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    fn push(&mut self, due: Due, scope: ScopeId, action: A) -> Token {
        let token = Token(self.next_token);
        self.next_token += 1;
        self.entries.push(Entry {
            token,
            scope,
            due,
            action,
        });
        token
    }
}
