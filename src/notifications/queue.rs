//! Ordered notification queue with stacking and expiry.
//!
//! Invariant: when the queue is non-empty exactly one entry has
//! `stacked == false`, and it is the active (displayed) one.

use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Notification {
    pub id: u64,
    pub title: String,
    pub message: String,
    /// Start of the expiry window, in session milliseconds.
    pub created_at: u64,
    pub stacked: bool,
    /// Only meaningful for stacked entries.
    pub expanded: bool,
}

#[derive(Debug, Clone)]
pub struct NotificationQueue {
    entries: Vec<Notification>,
    next_id: u64,
    ttl_ms: u64,
}

impl NotificationQueue {
    pub fn new(ttl_ms: u64) -> Self {
        Self {
            entries: Vec::new(),
            next_id: 1,
            ttl_ms,
        }
    }

    pub fn ttl_ms(&self) -> u64 {
        self.ttl_ms
    }

    /// Insert a new entry as the active one; every older entry is stacked.
    pub fn push(&mut self, title: impl Into<String>, message: impl Into<String>, now: u64) -> u64 {
        for entry in &mut self.entries {
            entry.stacked = true;
        }
        let id = self.next_id;
        self.next_id += 1;
        self.entries.push(Notification {
            id,
            title: title.into(),
            message: message.into(),
            created_at: now,
            stacked: false,
            expanded: false,
        });
        id
    }

    pub fn active(&self) -> Option<&Notification> {
        self.entries.iter().find(|n| !n.stacked)
    }

    pub fn get(&self, id: u64) -> Option<&Notification> {
        self.entries.iter().find(|n| n.id == id)
    }

    /// Oldest first.
    pub fn iter(&self) -> impl Iterator<Item = &Notification> {
        self.entries.iter()
    }

    pub fn stacked(&self) -> impl Iterator<Item = &Notification> {
        self.entries.iter().filter(|n| n.stacked)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Promote the newest remaining entry if nothing is active.
    fn promote(&mut self) {
        if self.active().is_some() {
            return;
        }
        if let Some(last) = self.entries.last_mut() {
            last.stacked = false;
            last.expanded = false;
        }
    }

    /// Remove an entry. Dismissing the active entry promotes the next one.
    pub fn dismiss(&mut self, id: u64) -> bool {
        let Some(index) = self.entries.iter().position(|n| n.id == id) else {
            return false;
        };
        let removed = self.entries.remove(index);
        if !removed.stacked {
            self.promote();
        }
        true
    }

    /// Expand a stacked entry and restart its expiry window.
    /// Expanding an already expanded entry changes nothing.
    pub fn expand(&mut self, id: u64, now: u64) -> bool {
        match self.entries.iter_mut().find(|n| n.id == id && n.stacked) {
            Some(entry) => {
                if !entry.expanded {
                    entry.expanded = true;
                    entry.created_at = now;
                }
                true
            }
            None => false,
        }
    }

    pub fn collapse(&mut self, id: u64) -> bool {
        match self.entries.iter_mut().find(|n| n.id == id && n.stacked) {
            Some(entry) => {
                entry.expanded = false;
                true
            }
            None => false,
        }
    }

    /// Drop every entry whose window has elapsed. Returns the removed ids.
    pub fn expire(&mut self, now: u64) -> Vec<u64> {
        let ttl = self.ttl_ms;
        let mut removed = Vec::new();
        self.entries.retain(|n| {
            let alive = now < n.created_at.saturating_add(ttl);
            if !alive {
                removed.push(n.id);
            }
            alive
        });
        if !removed.is_empty() {
            self.promote();
        }
        removed
    }

    /// Earliest time an entry will expire.
    pub fn next_expiry(&self) -> Option<u64> {
        self.entries
            .iter()
            .map(|n| n.created_at.saturating_add(self.ttl_ms))
            .min()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn active_count(q: &NotificationQueue) -> usize {
        q.iter().filter(|n| !n.stacked).count()
    }

    #[test]
    fn test_newest_is_the_only_active_entry() {
        let mut q = NotificationQueue::new(5000);
        let mut last = 0;
        for i in 0..5 {
            last = q.push("战斗胜利", format!("第{}战", i), i * 10);
            assert_eq!(active_count(&q), 1);
        }
        assert_eq!(q.active().map(|n| n.id), Some(last));
        assert_eq!(q.stacked().count(), 4);
    }

    #[test]
    fn test_dismiss_active_promotes_next() {
        let mut q = NotificationQueue::new(5000);
        let a = q.push("a", "", 0);
        let b = q.push("b", "", 0);
        let c = q.push("c", "", 0);
        assert!(q.dismiss(c));
        assert_eq!(q.active().map(|n| n.id), Some(b));
        assert!(q.dismiss(b));
        assert_eq!(q.active().map(|n| n.id), Some(a));
        assert!(q.dismiss(a));
        assert!(q.is_empty());
        assert!(!q.dismiss(a));
    }

    #[test]
    fn test_dismiss_stacked_does_not_promote() {
        let mut q = NotificationQueue::new(5000);
        let a = q.push("a", "", 0);
        let b = q.push("b", "", 0);
        assert!(q.dismiss(a));
        assert_eq!(q.active().map(|n| n.id), Some(b));
        assert_eq!(q.len(), 1);
    }

    #[test]
    fn test_expiry_removes_old_entries() {
        let mut q = NotificationQueue::new(5000);
        let a = q.push("a", "", 0);
        let b = q.push("b", "", 3000);
        assert!(q.expire(4999).is_empty());
        assert_eq!(q.expire(5000), vec![a]);
        assert_eq!(q.active().map(|n| n.id), Some(b));
        assert_eq!(q.expire(8000), vec![b]);
        assert!(q.is_empty());
    }

    #[test]
    fn test_expired_active_promotes_survivor() {
        let mut q = NotificationQueue::new(5000);
        let a = q.push("a", "", 0);
        let b = q.push("b", "", 100);
        // restart a's window so it outlives b
        assert!(q.expand(a, 4000));
        assert_eq!(q.expire(5100), vec![b]);
        let survivor = q.active().unwrap();
        assert_eq!(survivor.id, a);
        assert!(!survivor.expanded);
    }

    #[test]
    fn test_expand_only_applies_to_stacked_entries() {
        let mut q = NotificationQueue::new(5000);
        let a = q.push("a", "", 0);
        assert!(!q.expand(a, 100));
        assert!(!q.collapse(a));
        q.push("b", "", 0);
        assert!(q.expand(a, 100));
        assert!(q.get(a).unwrap().expanded);
    }

    #[test]
    fn test_expand_and_collapse_are_idempotent() {
        let mut q = NotificationQueue::new(5000);
        let a = q.push("a", "", 0);
        q.push("b", "", 0);
        assert!(q.expand(a, 1000));
        assert!(q.expand(a, 2000));
        assert_eq!(q.get(a).unwrap().created_at, 1000);
        assert!(q.collapse(a));
        assert!(q.collapse(a));
        assert!(!q.get(a).unwrap().expanded);
    }

    #[test]
    fn test_ids_are_monotonic() {
        let mut q = NotificationQueue::new(5000);
        let a = q.push("a", "", 0);
        q.dismiss(a);
        let b = q.push("b", "", 0);
        assert!(b > a);
        assert_eq!(q.next_expiry(), Some(5000));
    }
}
