use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::RwLock;
use uuid::Uuid;

use crate::db::UserStore;
use crate::error::{AppError, AppResult};
use crate::models::{SavedBook, User};

/// In-memory user store for tests and local development.
///
/// Mirrors the document semantics of the Postgres store: the saved-books
/// list is replaced as a whole, never merged.
#[derive(Clone, Default)]
pub struct MemoryUserStore {
    inner: Arc<RwLock<HashMap<Uuid, User>>>,
}

impl MemoryUserStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait::async_trait]
impl UserStore for MemoryUserStore {
    async fn insert_user(&self, user: User) -> AppResult<User> {
        let mut users = self.inner.write().await;
        if users.values().any(|u| u.email == user.email) {
            return Err(AppError::Duplicate("User already exists".to_string()));
        }
        users.insert(user.id, user.clone());
        Ok(user)
    }

    async fn find_by_email(&self, email: &str) -> AppResult<Option<User>> {
        let users = self.inner.read().await;
        Ok(users.values().find(|u| u.email == email).cloned())
    }

    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<User>> {
        let users = self.inner.read().await;
        Ok(users.get(&id).cloned())
    }

    async fn replace_saved_books(&self, user_id: Uuid, books: &[SavedBook]) -> AppResult<()> {
        let mut users = self.inner.write().await;
        if let Some(user) = users.get_mut(&user_id) {
            user.saved_books = books.to_vec();
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::NewBook;

    fn test_user() -> User {
        User::new(
            "Ada".to_string(),
            "ada@example.com".to_string(),
            "hash".to_string(),
        )
    }

    #[tokio::test]
    async fn test_insert_and_find() {
        let store = MemoryUserStore::new();
        let user = store.insert_user(test_user()).await.unwrap();

        let by_id = store.find_by_id(user.id).await.unwrap().unwrap();
        assert_eq!(by_id.email, "ada@example.com");

        let by_email = store.find_by_email("ada@example.com").await.unwrap();
        assert!(by_email.is_some());
    }

    #[tokio::test]
    async fn test_duplicate_email_rejected() {
        let store = MemoryUserStore::new();
        store.insert_user(test_user()).await.unwrap();

        let result = store.insert_user(test_user()).await;
        assert!(matches!(result, Err(AppError::Duplicate(_))));
    }

    #[tokio::test]
    async fn test_replace_saved_books_overwrites_whole_list() {
        let store = MemoryUserStore::new();
        let user = store.insert_user(test_user()).await.unwrap();

        let first = vec![SavedBook::from_new(NewBook {
            title: "Dune".to_string(),
            author: String::new(),
            description: String::new(),
            cover_image: String::new(),
            genre: String::new(),
            isbn: String::new(),
        })];
        store.replace_saved_books(user.id, &first).await.unwrap();

        let second = vec![SavedBook::from_new(NewBook {
            title: "Circe".to_string(),
            author: String::new(),
            description: String::new(),
            cover_image: String::new(),
            genre: String::new(),
            isbn: String::new(),
        })];
        store.replace_saved_books(user.id, &second).await.unwrap();

        let stored = store.find_by_id(user.id).await.unwrap().unwrap();
        assert_eq!(stored.saved_books.len(), 1);
        assert_eq!(stored.saved_books[0].title, "Circe");
    }

    #[tokio::test]
    async fn test_replace_for_unknown_user_is_noop() {
        let store = MemoryUserStore::new();
        let result = store.replace_saved_books(Uuid::new_v4(), &[]).await;
        assert!(result.is_ok());
    }
}
