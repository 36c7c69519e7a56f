use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A registered user with their embedded reading list.
///
/// The saved-books list lives inside the user document and is always read and
/// written as a whole. There is no per-book row; concurrent writers race on
/// the full list (last write wins).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub saved_books: Vec<SavedBook>,
}

impl User {
    /// Creates a new user with an empty reading list
    pub fn new(name: String, email: String, password_hash: String) -> Self {
        Self {
            id: Uuid::new_v4(),
            name,
            email,
            password_hash,
            saved_books: Vec::new(),
        }
    }
}

/// A book entry persisted inside a user's reading list
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SavedBook {
    pub id: Uuid,
    pub title: String,
    #[serde(default)]
    pub author: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub cover_image: String,
    #[serde(default)]
    pub genre: String,
    #[serde(default)]
    pub isbn: String,
    pub added_at: DateTime<Utc>,
}

/// Payload for adding a book to the reading list.
///
/// Everything except the title is optional; candidates promoted from the
/// recommendation view arrive with whatever fields the provider filled in.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewBook {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub author: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub cover_image: String,
    #[serde(default)]
    pub genre: String,
    #[serde(default)]
    pub isbn: String,
}

impl SavedBook {
    pub fn from_new(book: NewBook) -> Self {
        Self {
            id: Uuid::new_v4(),
            title: book.title,
            author: book.author,
            description: book.description,
            cover_image: book.cover_image,
            genre: book.genre,
            isbn: book.isbn,
            added_at: Utc::now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_user_has_empty_list() {
        let user = User::new(
            "Ada".to_string(),
            "ada@example.com".to_string(),
            "$argon2id$hash".to_string(),
        );
        assert!(user.saved_books.is_empty());
        assert_eq!(user.email, "ada@example.com");
    }

    #[test]
    fn test_user_serialization_hides_password_hash() {
        let user = User::new(
            "Ada".to_string(),
            "ada@example.com".to_string(),
            "$argon2id$hash".to_string(),
        );
        let json = serde_json::to_value(&user).unwrap();
        assert!(json.get("password_hash").is_none());
    }

    #[test]
    fn test_saved_book_wire_format_is_camel_case() {
        let book = SavedBook::from_new(NewBook {
            title: "Dune".to_string(),
            author: "Frank Herbert".to_string(),
            description: String::new(),
            cover_image: "https://example.com/dune.jpg".to_string(),
            genre: "Sci-Fi".to_string(),
            isbn: "9780441013593".to_string(),
        });

        let json = serde_json::to_value(&book).unwrap();
        assert_eq!(json["coverImage"], "https://example.com/dune.jpg");
        assert_eq!(json["addedAt"], serde_json::to_value(book.added_at).unwrap());
    }

    #[test]
    fn test_new_book_defaults_optional_fields() {
        let book: NewBook = serde_json::from_str(r#"{"title": "Dune"}"#).unwrap();
        assert_eq!(book.title, "Dune");
        assert_eq!(book.author, "");
        assert_eq!(book.isbn, "");
    }
}
