//! User repository trait and implementation

use crate::error::Result;
use crate::models::User;
use async_trait::async_trait;
use chrono::Utc;
use sqlx::{query_as, SqlitePool};

/// User repository interface
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Insert a new user and return its id
    async fn insert(&self, username: &str, display_name: &str, password_hash: &str)
        -> Result<i64>;

    /// Find a user by username
    async fn find_by_username(&self, username: &str) -> Result<Option<User>>;

    /// List all users ordered by display name
    async fn list(&self) -> Result<Vec<User>>;

    /// List all user ids (notification broadcast source)
    async fn list_ids(&self) -> Result<Vec<i64>>;
}

/// SQLite implementation of UserRepository
pub struct SqliteUserRepository {
    pool: SqlitePool,
}

impl SqliteUserRepository {
    /// Create a new SQLite user repository
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserRepository for SqliteUserRepository {
    async fn insert(
        &self,
        username: &str,
        display_name: &str,
        password_hash: &str,
    ) -> Result<i64> {
        let result = sqlx::query(
            "INSERT INTO users (username, display_name, password_hash, created_at)
             VALUES (?, ?, ?, ?)",
        )
        .bind(username)
        .bind(display_name)
        .bind(password_hash)
        .bind(Utc::now().timestamp())
        .execute(&self.pool)
        .await?;

        Ok(result.last_insert_rowid())
    }

    async fn find_by_username(&self, username: &str) -> Result<Option<User>> {
        let user = query_as::<_, User>("SELECT * FROM users WHERE username = ?")
            .bind(username)
            .fetch_optional(&self.pool)
            .await?;

        Ok(user)
    }

    async fn list(&self) -> Result<Vec<User>> {
        let users = query_as::<_, User>("SELECT * FROM users ORDER BY display_name")
            .fetch_all(&self.pool)
            .await?;

        Ok(users)
    }

    async fn list_ids(&self) -> Result<Vec<i64>> {
        let ids: Vec<(i64,)> = sqlx::query_as("SELECT id FROM users ORDER BY id")
            .fetch_all(&self.pool)
            .await?;

        Ok(ids.into_iter().map(|(id,)| id).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::create_test_pool;

    #[tokio::test]
    async fn test_insert_and_find_user() {
        let pool = create_test_pool().await.unwrap();
        let repo = SqliteUserRepository::new(pool);

        let id = repo.insert("bob", "Bob", "hash").await.unwrap();

        let found = repo.find_by_username("bob").await.unwrap().unwrap();
        assert_eq!(found.id, id);
        assert_eq!(found.display_name, "Bob");
        assert!(repo.find_by_username("carol").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_list_ids() {
        let pool = create_test_pool().await.unwrap();
        let repo = SqliteUserRepository::new(pool);

        let a = repo.insert("a", "A", "x").await.unwrap();
        let b = repo.insert("b", "B", "x").await.unwrap();

        assert_eq!(repo.list_ids().await.unwrap(), vec![a, b]);
        assert_eq!(repo.list().await.unwrap().len(), 2);
    }
}
