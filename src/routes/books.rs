use axum::extract::{Path, State};
use axum::Json;
use uuid::Uuid;

use crate::error::{AppError, AppResult};
use crate::middleware::AuthUser;
use crate::models::{NewBook, SavedBook};
use crate::state::AppState;

/// Handler for adding a book to the reading list.
///
/// The duplicate-title check is read-then-write against the user's document;
/// there is no storage-level constraint backing it up.
pub async fn add_book(
    State(state): State<AppState>,
    user: AuthUser,
    Json(request): Json<NewBook>,
) -> AppResult<Json<Vec<SavedBook>>> {
    if request.title.is_empty() {
        return Err(AppError::InvalidInput(
            "Book title is required".to_string(),
        ));
    }

    let mut stored = state
        .store
        .find_by_id(user.user_id)
        .await?
        .ok_or_else(|| AppError::NotFound("User not found".to_string()))?;

    if stored.saved_books.iter().any(|b| b.title == request.title) {
        return Err(AppError::Duplicate(
            "Book already in your list".to_string(),
        ));
    }

    stored.saved_books.push(SavedBook::from_new(request));
    state
        .store
        .replace_saved_books(stored.id, &stored.saved_books)
        .await?;

    tracing::info!(
        user_id = %stored.id,
        total = stored.saved_books.len(),
        "Book added to reading list"
    );

    Ok(Json(stored.saved_books))
}

/// Handler for fetching the reading list
pub async fn get_books(
    State(state): State<AppState>,
    user: AuthUser,
) -> AppResult<Json<Vec<SavedBook>>> {
    let stored = state
        .store
        .find_by_id(user.user_id)
        .await?
        .ok_or_else(|| AppError::NotFound("User not found".to_string()))?;

    Ok(Json(stored.saved_books))
}

/// Handler for removing a book from the reading list.
///
/// Removing an id that is not in the list succeeds and leaves the list
/// unchanged.
pub async fn delete_book(
    State(state): State<AppState>,
    user: AuthUser,
    Path(book_id): Path<Uuid>,
) -> AppResult<Json<Vec<SavedBook>>> {
    let mut stored = state
        .store
        .find_by_id(user.user_id)
        .await?
        .ok_or_else(|| AppError::NotFound("User not found".to_string()))?;

    stored.saved_books.retain(|b| b.id != book_id);
    state
        .store
        .replace_saved_books(stored.id, &stored.saved_books)
        .await?;

    Ok(Json(stored.saved_books))
}
