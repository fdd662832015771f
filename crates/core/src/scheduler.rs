//! Deferred tasks for the round timers.
//!
//! Timers are not threads: the scheduler keeps a short list of due times on
//! the game clock and hands back the tasks that came due during a `tick`.
//! Every task carries the round generation it was scheduled in so the state
//! machine can drop the ones that belong to an earlier round.

use arrayvec::ArrayVec;

/// Work the state machine defers to a later tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DeferredTask {
    /// Hide the numbers and enter the recall phase.
    EndReveal,
    /// Clear the wrong tile and return to the start button.
    ResetAfterMistake { number: u8 },
    /// Show the result screen after a finished round.
    ShowResult,
}

/// A scheduled task tagged with its round.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Scheduled {
    pub task: DeferredTask,
    pub generation: u32,
    pub due_ms: u64,
}

/// Upper bound on outstanding tasks. A round schedules at most two
/// (reveal end plus one of reset/result), and restarts can leave stale ones
/// behind until they come due.
pub const MAX_PENDING: usize = 16;

#[derive(Debug, Clone, Default)]
pub struct Scheduler {
    pending: ArrayVec<Scheduled, MAX_PENDING>,
}

impl Scheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Schedule `task` to come due at `now_ms + delay_ms`.
    ///
    /// When full, the entry with the oldest generation is evicted first;
    /// it can only belong to a round that is already over.
    pub fn schedule(&mut self, task: DeferredTask, generation: u32, now_ms: u64, delay_ms: u32) {
        if self.pending.is_full() {
            if let Some(oldest) = self
                .pending
                .iter()
                .enumerate()
                .min_by_key(|(_, s)| (s.generation, s.due_ms))
                .map(|(i, _)| i)
            {
                self.pending.remove(oldest);
            }
        }
        self.pending.push(Scheduled {
            task,
            generation,
            due_ms: now_ms + delay_ms as u64,
        });
    }

    /// Remove and return every task due at or before `now_ms`, earliest first.
    pub fn take_due(&mut self, now_ms: u64) -> ArrayVec<Scheduled, MAX_PENDING> {
        let mut due = ArrayVec::<Scheduled, MAX_PENDING>::new();
        let mut i = 0;
        while i < self.pending.len() {
            if self.pending[i].due_ms <= now_ms {
                due.push(self.pending.remove(i));
            } else {
                i += 1;
            }
        }
        due.sort_by_key(|s| s.due_ms);
        due
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    /// Whether a task of this kind is outstanding for `generation`.
    pub fn is_pending(&self, task: DeferredTask, generation: u32) -> bool {
        self.pending
            .iter()
            .any(|s| s.task == task && s.generation == generation)
    }
}
