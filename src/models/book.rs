use serde::{Deserialize, Serialize};

/// An unsaved book suggestion returned by the recommendation proxy.
///
/// Candidates are ephemeral: the client either promotes one to a saved book
/// or discards the whole batch.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Candidate {
    pub title: String,
    pub author: String,
    pub description: String,
    pub genre: String,
    pub isbn: String,
    pub image_id: Option<String>,
    pub olid: Option<String>,
}

/// A candidate exactly as the model emitted it, before normalization.
///
/// Every field is optional; the model is instructed to fill them all in but
/// is not trusted to.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawCandidate {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub author: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub genre: Option<String>,
    #[serde(default)]
    pub isbn: Option<String>,
    #[serde(default)]
    pub image_id: Option<String>,
    #[serde(default)]
    pub olid: Option<String>,
}

// Missing and empty are treated the same, so "" still becomes the default.
fn or_default(value: Option<String>, default: &str) -> String {
    match value {
        Some(s) if !s.is_empty() => s,
        _ => default.to_string(),
    }
}

impl From<RawCandidate> for Candidate {
    fn from(raw: RawCandidate) -> Self {
        Self {
            title: or_default(raw.title, "Unknown Title"),
            author: or_default(raw.author, "Unknown Author"),
            description: raw.description.unwrap_or_default(),
            genre: or_default(raw.genre, "General"),
            isbn: raw.isbn.unwrap_or_default(),
            image_id: raw.image_id,
            olid: raw.olid,
        }
    }
}

/// Preferences submitted with a recommendation request.
///
/// A raw free-text `message` takes precedence over the structured fields
/// when the prompt is built.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecommendRequest {
    #[serde(default)]
    pub genre: Option<String>,
    #[serde(default)]
    pub mood: Option<String>,
    #[serde(default)]
    pub preferences: Option<String>,
    #[serde(default)]
    pub existing_books: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
}
