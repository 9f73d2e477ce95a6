//! One-shot timer queue on the session's virtual clock.
//!
//! Tasks fire in `(due, insertion order)` order. Every task carries the
//! session generation it was scheduled under so a reset can invalidate
//! anything that slipped past `clear`.

use std::collections::BTreeMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Task {
    /// Player half of a combat round.
    CombatRound { generation: u64, encounter_id: u64 },
    /// Monster counter-strike within the same round.
    MonsterStrike { generation: u64, encounter_id: u64 },
    /// Apply the encounter's outcome.
    Resolve { generation: u64, encounter_id: u64 },
    /// Start the next auto-play encounter.
    AutoPlayStart { generation: u64 },
    /// Offer sect recruitment after a breakthrough.
    SectOffer { generation: u64 },
}

impl Task {
    pub fn generation(&self) -> u64 {
        match *self {
            Task::CombatRound { generation, .. }
            | Task::MonsterStrike { generation, .. }
            | Task::Resolve { generation, .. }
            | Task::AutoPlayStart { generation }
            | Task::SectOffer { generation } => generation,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct Scheduler {
    tasks: BTreeMap<(u64, u64), Task>,
    next_seq: u64,
}

impl Scheduler {
    pub fn schedule(&mut self, due: u64, task: Task) {
        let seq = self.next_seq;
        self.next_seq += 1;
        tracing::debug!(due, ?task, "scheduled");
        self.tasks.insert((due, seq), task);
    }

    /// Remove and return the earliest task due at or before `now`.
    pub fn pop_due(&mut self, now: u64) -> Option<(u64, Task)> {
        let (&(due, _), _) = self.tasks.first_key_value()?;
        if due > now {
            return None;
        }
        self.tasks.pop_first().map(|((due, _), task)| (due, task))
    }

    /// Drop every task matching `predicate`. Returns how many were removed.
    pub fn cancel_where(&mut self, predicate: impl Fn(&Task) -> bool) -> usize {
        let before = self.tasks.len();
        self.tasks.retain(|_, task| !predicate(&*task));
        before - self.tasks.len()
    }

    pub fn clear(&mut self) {
        self.tasks.clear();
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    pub fn next_due(&self) -> Option<u64> {
        self.tasks.keys().next().map(|&(due, _)| due)
    }

    pub fn contains(&self, predicate: impl Fn(&Task) -> bool) -> bool {
        self.tasks.values().any(predicate)
    }
}
