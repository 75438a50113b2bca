//! Rating storage interface and implementations
//!
//! Users and problems are rated on the same scale but live in separate
//! populations, so entries are keyed by [`RatedEntity`].

use crate::types::{ProblemId, Rating, UserId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::RwLock;

/// Something that carries a rating
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", content = "id", rename_all = "lowercase")]
pub enum RatedEntity {
    User(UserId),
    Problem(ProblemId),
}

impl std::fmt::Display for RatedEntity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RatedEntity::User(id) => write!(f, "user:{}", id),
            RatedEntity::Problem(id) => write!(f, "problem:{}", id),
        }
    }
}

/// Storage entry for a rating with metadata
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RatingEntry {
    pub entity: RatedEntity,
    pub rating: Rating,
    pub attempts: u64,
    pub last_updated: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
}

impl RatingEntry {
    /// Create a new rating entry for an unrated entity
    pub fn new(entity: RatedEntity, initial_rating: Rating) -> Self {
        let now = Utc::now();
        Self {
            entity,
            rating: initial_rating,
            attempts: 0,
            last_updated: now,
            created_at: now,
        }
    }

    /// Record one more rated attempt
    pub fn update_rating(&mut self, new_rating: Rating) {
        self.rating = new_rating;
        self.attempts += 1;
        self.last_updated = Utc::now();
    }
}

/// Trait for rating storage operations
pub trait RatingStorage: Send + Sync {
    /// Get an entity's rating entry
    fn get_rating(&self, entity: &RatedEntity) -> crate::error::Result<Option<RatingEntry>>;

    /// Store several rating updates under a single write
    fn store_ratings(&self, entries: Vec<RatingEntry>) -> crate::error::Result<()>;

    /// Number of rated users and rated problems
    fn get_counts(&self) -> crate::error::Result<(usize, usize)>;
}

/// In-memory rating storage implementation
#[derive(Debug, Default)]
pub struct InMemoryRatingStorage {
    ratings: RwLock<HashMap<RatedEntity, RatingEntry>>,
}

impl InMemoryRatingStorage {
    pub fn new() -> Self {
        Self::default()
    }
}

fn lock_error(kind: &str) -> crate::error::ArenaError {
    crate::error::ArenaError::StorageError {
        message: format!("Failed to acquire ratings {} lock", kind),
    }
}

impl RatingStorage for InMemoryRatingStorage {
    fn get_rating(&self, entity: &RatedEntity) -> crate::error::Result<Option<RatingEntry>> {
        let ratings = self.ratings.read().map_err(|_| lock_error("read"))?;

        Ok(ratings.get(entity).cloned())
    }

    fn store_ratings(&self, entries: Vec<RatingEntry>) -> crate::error::Result<()> {
        let mut ratings = self.ratings.write().map_err(|_| lock_error("write"))?;

        for entry in entries {
            ratings.insert(entry.entity, entry);
        }

        Ok(())
    }

    fn get_counts(&self) -> crate::error::Result<(usize, usize)> {
        let ratings = self.ratings.read().map_err(|_| lock_error("read"))?;

        let users = ratings
            .keys()
            .filter(|entity| matches!(entity, RatedEntity::User(_)))
            .count();

        Ok((users, ratings.len() - users))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    #[test]
    fn test_rating_entry_creation() {
        let user = RatedEntity::User(Uuid::new_v4());
        let entry = RatingEntry::new(user, 1200.0);

        assert_eq!(entry.entity, user);
        assert_eq!(entry.rating, 1200.0);
        assert_eq!(entry.attempts, 0);
    }

    #[test]
    fn test_rating_entry_update() {
        let mut entry = RatingEntry::new(RatedEntity::Problem(Uuid::new_v4()), 1250.0);
        let original_updated_time = entry.last_updated;

        entry.update_rating(1234.0);

        assert_eq!(entry.rating, 1234.0);
        assert_eq!(entry.attempts, 1);
        assert!(entry.last_updated >= original_updated_time);
    }

    #[test]
    fn test_in_memory_storage_basic_operations() {
        let storage = InMemoryRatingStorage::new();
        let user = RatedEntity::User(Uuid::new_v4());

        assert!(storage.get_rating(&user).unwrap().is_none());

        storage
            .store_ratings(vec![RatingEntry::new(user, 1200.0)])
            .unwrap();

        let retrieved = storage.get_rating(&user).unwrap().unwrap();
        assert_eq!(retrieved.rating, 1200.0);
    }

    #[test]
    fn test_users_and_problems_do_not_collide() {
        let storage = InMemoryRatingStorage::new();
        let id = Uuid::new_v4();

        storage
            .store_ratings(vec![
                RatingEntry::new(RatedEntity::User(id), 1300.0),
                RatingEntry::new(RatedEntity::Problem(id), 1700.0),
            ])
            .unwrap();

        let user = storage.get_rating(&RatedEntity::User(id)).unwrap().unwrap();
        let problem = storage
            .get_rating(&RatedEntity::Problem(id))
            .unwrap()
            .unwrap();

        assert_eq!(user.rating, 1300.0);
        assert_eq!(problem.rating, 1700.0);
        assert_eq!(storage.get_counts().unwrap(), (1, 1));
    }

    #[test]
    fn test_storing_again_replaces_entry() {
        let storage = InMemoryRatingStorage::new();
        let user = RatedEntity::User(Uuid::new_v4());

        let mut entry = RatingEntry::new(user, 1200.0);
        storage.store_ratings(vec![entry.clone()]).unwrap();
        entry.update_rating(1216.0);
        storage.store_ratings(vec![entry]).unwrap();

        let stored = storage.get_rating(&user).unwrap().unwrap();
        assert_eq!(stored.rating, 1216.0);
        assert_eq!(stored.attempts, 1);
        assert_eq!(storage.get_counts().unwrap(), (1, 0));
    }

    #[test]
    fn test_entity_serialization() {
        let id = Uuid::nil();
        let value = serde_json::to_value(RatedEntity::Problem(id)).unwrap();

        assert_eq!(value["kind"], "problem");
        assert_eq!(value["id"], id.to_string());
    }
}
