//! Running-timer state for the time entries of one task.
//!
//! The server owns the truth: a task is "playing" iff one of its entries has
//! no end time. This module reconstructs the running flag and an elapsed
//! minute counter from that entry, and keeps the counter moving once per
//! minute while the view is open. The counter is display-only.

use std::time::{Duration, Instant};
use time::PrimitiveDateTime;
use timetrack_client::{TimeEntry, TimeEntryId};

pub const TICK_INTERVAL: Duration = Duration::from_secs(60);

#[derive(Debug, Clone, Default, PartialEq)]
pub struct EntryTimer {
    running: bool,
    elapsed_minutes: u64,
    playing_entry_id: Option<TimeEntryId>,
    /// Armed while running; `None` means no ticks are pending.
    next_tick: Option<Instant>,
}

impl EntryTimer {
    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn elapsed_minutes(&self) -> u64 {
        self.elapsed_minutes
    }

    pub fn playing_entry_id(&self) -> Option<TimeEntryId> {
        self.playing_entry_id
    }

    pub fn is_armed(&self) -> bool {
        self.next_tick.is_some()
    }

    /// Rebuild state from the server's playing entry (if any).
    pub fn reconcile(&mut self, playing: Option<&TimeEntry>, now: PrimitiveDateTime, at: Instant) {
        match playing {
            Some(entry) => {
                self.running = true;
                self.elapsed_minutes = elapsed_minutes_since(entry.start_time, now);
                self.playing_entry_id = entry.time_entry_id;
                self.arm(at);
            }
            None => {
                self.running = false;
                self.elapsed_minutes = 0;
                self.playing_entry_id = None;
                self.disarm();
            }
        }
    }

    /// A new entry was started on the server.
    pub fn started(&mut self, entry: &TimeEntry, at: Instant) {
        self.running = true;
        // Resets rather than reconciling from `entry.start_time`; see DESIGN.md.
        self.elapsed_minutes = 0;
        self.playing_entry_id = entry.time_entry_id;
        self.arm(at);
    }

    /// The playing entry was stopped on the server.
    pub fn stopped(&mut self) {
        self.running = false;
        self.elapsed_minutes = 0;
        self.playing_entry_id = None;
        self.disarm();
    }

    /// Advance the counter by one for every full interval passed since the
    /// last tick. Returns whether the counter changed.
    pub fn tick(&mut self, at: Instant) -> bool {
        let Some(mut next) = self.next_tick else {
            return false;
        };

        let mut changed = false;
        while at >= next {
            self.elapsed_minutes += 1;
            next += TICK_INTERVAL;
            changed = true;
        }
        self.next_tick = Some(next);
        changed
    }

    fn arm(&mut self, at: Instant) {
        self.next_tick = Some(at + TICK_INTERVAL);
    }

    /// Drop any pending ticks (view closed or timer stopped).
    pub fn disarm(&mut self) {
        self.next_tick = None;
    }
}

/// floor((now - start) / 60s), clamped at zero for starts in the future.
pub fn elapsed_minutes_since(start: PrimitiveDateTime, now: PrimitiveDateTime) -> u64 {
    let seconds = (now - start).whole_seconds();
    if seconds <= 0 {
        0
    } else {
        (seconds / 60) as u64
    }
}
