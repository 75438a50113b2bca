//! Attempt history storage
//!
//! Attempts are append-only; the dashboard reads them back per user.

use crate::error::ArenaError;
use crate::types::{AttemptRecord, UserId};
use std::collections::HashMap;
use std::sync::RwLock;

/// Trait for attempt history operations
pub trait AttemptStorage: Send + Sync {
    /// Append an attempt to the user's history
    fn record_attempt(&self, record: AttemptRecord) -> crate::error::Result<()>;

    /// All attempts of a user in the order they were recorded
    fn attempts_for_user(&self, user_id: &UserId) -> crate::error::Result<Vec<AttemptRecord>>;

    /// Total number of attempts across all users
    fn attempt_count(&self) -> crate::error::Result<usize>;
}

/// In-memory attempt storage implementation
#[derive(Debug, Default)]
pub struct InMemoryAttemptStorage {
    attempts: RwLock<HashMap<UserId, Vec<AttemptRecord>>>,
}

impl InMemoryAttemptStorage {
    pub fn new() -> Self {
        Self::default()
    }
}

fn lock_error(kind: &str) -> ArenaError {
    ArenaError::StorageError {
        message: format!("Failed to acquire attempts {} lock", kind),
    }
}

impl AttemptStorage for InMemoryAttemptStorage {
    fn record_attempt(&self, record: AttemptRecord) -> crate::error::Result<()> {
        let mut attempts = self.attempts.write().map_err(|_| lock_error("write"))?;

        attempts.entry(record.user_id).or_default().push(record);
        Ok(())
    }

    fn attempts_for_user(&self, user_id: &UserId) -> crate::error::Result<Vec<AttemptRecord>> {
        let attempts = self.attempts.read().map_err(|_| lock_error("read"))?;

        Ok(attempts.get(user_id).cloned().unwrap_or_default())
    }

    fn attempt_count(&self) -> crate::error::Result<usize> {
        let attempts = self.attempts.read().map_err(|_| lock_error("read"))?;

        Ok(attempts.values().map(Vec::len).sum())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Attempt;
    use chrono::Utc;
    use uuid::Uuid;

    fn record(user_id: UserId, topic: &str, passed: bool) -> AttemptRecord {
        AttemptRecord {
            user_id,
            problem_id: Uuid::new_v4(),
            attempt: Attempt::new(topic, if passed { 1.0 } else { 0.0 }),
            passed,
            old_rating: 1200,
            new_rating: 1200,
            problem_rating: 1250,
            recorded_at: Utc::now(),
        }
    }

    #[test]
    fn test_attempts_are_kept_in_order_per_user() {
        let storage = InMemoryAttemptStorage::new();
        let alice = Uuid::new_v4();
        let bob = Uuid::new_v4();

        storage.record_attempt(record(alice, "arrays", true)).unwrap();
        storage.record_attempt(record(bob, "graphs", false)).unwrap();
        storage.record_attempt(record(alice, "strings", false)).unwrap();

        let history = storage.attempts_for_user(&alice).unwrap();
        assert_eq!(history.len(), 2);
        assert_eq!(history[0].attempt.topic_id, "arrays");
        assert_eq!(history[1].attempt.topic_id, "strings");
        assert_eq!(storage.attempt_count().unwrap(), 3);
    }

    #[test]
    fn test_unknown_user_has_empty_history() {
        let storage = InMemoryAttemptStorage::new();
        assert!(storage.attempts_for_user(&Uuid::new_v4()).unwrap().is_empty());
    }
}
