//! Two-stage note timer
//!
//! Replaces a suspended coroutine with an explicit armed timer that the host
//! advances from its own loop. A note lingers, falls, then clears:
//!
//! ```text
//! Linger(t) --Fall--> Drop(2s) --Clear--> Idle
//! Hold ------release--^
//! ```
//!
//! Every arm hands out a new [`SequenceId`]; events carry the id of the
//! sequence that produced them so a caller can discard anything stale.

use crate::consts::DROP_DELAY_SECS;

/// Slack for deadlines reached by summing many small frame deltas
pub const TIMER_EPSILON: f32 = 1e-4;

/// Identifies one armed sequence
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SequenceId(pub u64);

/// A deadline that came due during [`NoteTimer::advance`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerEvent {
    /// Linger elapsed; start falling
    Fall(SequenceId),
    /// Drop delay elapsed; clear the note
    Clear(SequenceId),
}

/// Current stage of the timer
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Stage {
    Idle,
    /// Waiting to fall (seconds remaining)
    Linger(f32),
    /// Waiting for an explicit release
    Hold,
    /// Falling, waiting to clear (seconds remaining)
    Drop(f32),
}

/// Cancellable linger/drop timer
#[derive(Debug, Clone)]
pub struct NoteTimer {
    stage: Stage,
    current: Option<SequenceId>,
    next_id: u64,
    drop_delay: f32,
}

impl Default for NoteTimer {
    fn default() -> Self {
        Self::new(DROP_DELAY_SECS)
    }
}

impl NoteTimer {
    pub fn new(drop_delay: f32) -> Self {
        Self {
            stage: Stage::Idle,
            current: None,
            next_id: 1,
            drop_delay,
        }
    }

    pub fn stage(&self) -> Stage {
        self.stage
    }

    /// Id of the armed sequence, if any
    pub fn current(&self) -> Option<SequenceId> {
        self.current
    }

    pub fn is_armed(&self) -> bool {
        self.current.is_some()
    }

    pub fn drop_delay(&self) -> f32 {
        self.drop_delay
    }

    /// Arm a linger-then-drop sequence, replacing any armed one
    pub fn arm_linger(&mut self, linger_secs: f32) -> SequenceId {
        self.arm(Stage::Linger(linger_secs.max(0.0)))
    }

    /// Arm a sequence that waits for [`NoteTimer::release`]
    pub fn arm_hold(&mut self) -> SequenceId {
        self.arm(Stage::Hold)
    }

    fn arm(&mut self, stage: Stage) -> SequenceId {
        let id = SequenceId(self.next_id);
        self.next_id += 1;
        self.stage = stage;
        self.current = Some(id);
        id
    }

    /// Leave `Hold` and start the drop countdown
    ///
    /// Returns the held sequence's id, or `None` when nothing is held. The
    /// caller performs the fall itself; no `Fall` event is emitted.
    pub fn release(&mut self) -> Option<SequenceId> {
        match (self.stage, self.current) {
            (Stage::Hold, Some(id)) => {
                self.stage = Stage::Drop(self.drop_delay);
                Some(id)
            }
            _ => None,
        }
    }

    /// Disarm without firing anything
    pub fn cancel(&mut self) -> Option<SequenceId> {
        self.stage = Stage::Idle;
        self.current.take()
    }

    /// Advance by `dt` seconds, returning due events in order
    ///
    /// Leftover time carries into the next stage, so one long step can
    /// produce both `Fall` and `Clear`.
    pub fn advance(&mut self, dt: f32) -> Vec<TimerEvent> {
        let mut events = Vec::new();
        let Some(id) = self.current else {
            return events;
        };

        let mut left = dt.max(0.0);
        loop {
            match self.stage {
                Stage::Linger(remaining) => {
                    if left + TIMER_EPSILON >= remaining {
                        left = (left - remaining).max(0.0);
                        self.stage = Stage::Drop(self.drop_delay);
                        events.push(TimerEvent::Fall(id));
                    } else {
                        self.stage = Stage::Linger(remaining - left);
                        break;
                    }
                }
                Stage::Drop(remaining) => {
                    if left + TIMER_EPSILON >= remaining {
                        self.stage = Stage::Idle;
                        self.current = None;
                        events.push(TimerEvent::Clear(id));
                    } else {
                        self.stage = Stage::Drop(remaining - left);
                    }
                    break;
                }
                Stage::Hold | Stage::Idle => break,
            }
        }
        events
    }
}
