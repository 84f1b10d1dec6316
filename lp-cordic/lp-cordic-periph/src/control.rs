//! READY / BUSY / DONE sequencing.

use core::fmt;

use serde::Serialize;

use crate::regs::{STATUS_BUSY, STATUS_DONE, STATUS_READY};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub enum Status {
    #[default]
    Ready,
    Busy,
    Done,
}

impl Status {
    pub fn code(self) -> u8 {
        match self {
            Status::Ready => STATUS_READY,
            Status::Busy => STATUS_BUSY,
            Status::Done => STATUS_DONE,
        }
    }

    pub fn from_code(code: u8) -> Option<Self> {
        match code {
            STATUS_READY => Some(Status::Ready),
            STATUS_BUSY => Some(Status::Busy),
            STATUS_DONE => Some(Status::Done),
            _ => None,
        }
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Status::Ready => "READY",
            Status::Busy => "BUSY",
            Status::Done => "DONE",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StartOutcome {
    Accepted,
    /// A run is in flight; the pulse is dropped.
    IgnoredBusy,
}

/// Control state machine. Counts down a latency fixed at start.
#[derive(Debug, Clone, Default)]
pub struct Control {
    status: Status,
    remaining: usize,
}

impl Control {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn status(&self) -> Status {
        self.status
    }

    pub fn remaining(&self) -> usize {
        self.remaining
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// READY or DONE -> BUSY for `latency` ticks. Ignored while BUSY.
    pub fn start(&mut self, latency: usize) -> StartOutcome {
        if self.status == Status::Busy {
            return StartOutcome::IgnoredBusy;
        }
        self.status = Status::Busy;
        self.remaining = latency;
        StartOutcome::Accepted
    }

    /// Advance one tick. Returns true on the tick that enters DONE.
    pub fn tick(&mut self) -> bool {
        if self.status != Status::Busy {
            return false;
        }
        self.remaining = self.remaining.saturating_sub(1);
        if self.remaining == 0 {
            self.status = Status::Done;
            true
        } else {
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ready_until_started() {
        let mut control = Control::new();
        for _ in 0..10 {
            assert!(!control.tick());
        }
        assert_eq!(control.status(), Status::Ready);
    }

    #[test]
    fn test_busy_for_exactly_latency_ticks() {
        let mut control = Control::new();
        assert_eq!(control.start(3), StartOutcome::Accepted);
        assert_eq!(control.status(), Status::Busy);
        assert!(!control.tick());
        assert!(!control.tick());
        assert!(control.tick());
        assert_eq!(control.status(), Status::Done);
        assert!(!control.tick());
        assert_eq!(control.status(), Status::Done);
    }

    #[test]
    fn test_start_while_busy_is_ignored() {
        let mut control = Control::new();
        control.start(4);
        control.tick();
        assert_eq!(control.start(10), StartOutcome::IgnoredBusy);
        assert_eq!(control.remaining(), 3);
    }

    #[test]
    fn test_restart_from_done() {
        let mut control = Control::new();
        control.start(1);
        assert!(control.tick());
        assert_eq!(control.start(2), StartOutcome::Accepted);
        assert_eq!(control.status(), Status::Busy);
    }

    #[test]
    fn test_status_codes() {
        for status in [Status::Ready, Status::Busy, Status::Done] {
            assert_eq!(Status::from_code(status.code()), Some(status));
        }
        assert_eq!(Status::from_code(3), None);
    }
}
