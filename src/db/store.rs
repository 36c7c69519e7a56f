use uuid::Uuid;

use crate::error::AppResult;
use crate::models::{SavedBook, User};

/// Persistence seam for user documents.
///
/// One document per user; the saved-books list is embedded and always
/// replaced as a whole. There is deliberately no per-book operation and no
/// uniqueness constraint on titles: callers do a read-check-then-write, and
/// concurrent writers get last-write-wins semantics on the list.
#[async_trait::async_trait]
pub trait UserStore: Send + Sync {
    /// Inserts a new user. A duplicate email is rejected with
    /// `AppError::Duplicate`.
    async fn insert_user(&self, user: User) -> AppResult<User>;

    /// Looks up a user by email (login path)
    async fn find_by_email(&self, email: &str) -> AppResult<Option<User>>;

    /// Looks up a user by id (authenticated request path)
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<User>>;

    /// Replaces the user's entire saved-books list
    async fn replace_saved_books(&self, user_id: Uuid, books: &[SavedBook]) -> AppResult<()>;
}
