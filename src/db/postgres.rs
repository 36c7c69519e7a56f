use sqlx::postgres::PgPoolOptions;
use sqlx::types::Json;
use sqlx::PgPool;
use uuid::Uuid;

use crate::db::UserStore;
use crate::error::{AppError, AppResult};
use crate::models::{SavedBook, User};

/// Creates a PostgreSQL connection pool
///
/// Establishes a pool of database connections for efficient reuse.
/// The pool automatically manages connection lifecycle and limits.
pub async fn create_pool(database_url: &str) -> anyhow::Result<PgPool> {
    let pool = PgPoolOptions::new()
        .max_connections(5)
        .connect(database_url)
        .await?;

    Ok(pool)
}

/// Postgres-backed user store.
///
/// Each user is one row; the reading list is a single JSONB column written
/// whole on every mutation, which keeps the document-store semantics the
/// rest of the code assumes.
#[derive(Clone)]
pub struct PgUserStore {
    pool: PgPool,
}

#[derive(sqlx::FromRow)]
struct UserRow {
    id: Uuid,
    name: String,
    email: String,
    password_hash: String,
    saved_books: Json<Vec<SavedBook>>,
}

impl From<UserRow> for User {
    fn from(row: UserRow) -> Self {
        User {
            id: row.id,
            name: row.name,
            email: row.email,
            password_hash: row.password_hash,
            saved_books: row.saved_books.0,
        }
    }
}

impl PgUserStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait::async_trait]
impl UserStore for PgUserStore {
    async fn insert_user(&self, user: User) -> AppResult<User> {
        let result = sqlx::query(
            "INSERT INTO users (id, name, email, password_hash, saved_books) \
             VALUES ($1, $2, $3, $4, $5)",
        )
        .bind(user.id)
        .bind(&user.name)
        .bind(&user.email)
        .bind(&user.password_hash)
        .bind(Json(&user.saved_books))
        .execute(&self.pool)
        .await;

        match result {
            Ok(_) => Ok(user),
            Err(e) if e
                .as_database_error()
                .is_some_and(|db| db.is_unique_violation()) =>
            {
                Err(AppError::Duplicate("User already exists".to_string()))
            }
            Err(e) => Err(e.into()),
        }
    }

    async fn find_by_email(&self, email: &str) -> AppResult<Option<User>> {
        let row = sqlx::query_as::<_, UserRow>(
            "SELECT id, name, email, password_hash, saved_books FROM users WHERE email = $1",
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(User::from))
    }

    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<User>> {
        let row = sqlx::query_as::<_, UserRow>(
            "SELECT id, name, email, password_hash, saved_books FROM users WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(User::from))
    }

    async fn replace_saved_books(&self, user_id: Uuid, books: &[SavedBook]) -> AppResult<()> {
        // Whole-list write: no row-level merge, last write wins.
        sqlx::query("UPDATE users SET saved_books = $2 WHERE id = $1")
            .bind(user_id)
            .bind(Json(books))
            .execute(&self.pool)
            .await?;

        Ok(())
    }
}
