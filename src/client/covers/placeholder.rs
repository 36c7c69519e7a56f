/// Background colors for generated placeholder cards
pub const PALETTE: [&str; 12] = [
    "#1e293b", "#334155", "#475569", "#0f172a", "#1e1b4b", "#312e81", "#4c1d95", "#581c87",
    "#701a75", "#831843", "#881337", "#7f1d1d",
];

/// Terminal-stage placeholder: a styled title card instead of an image
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Placeholder {
    pub background: &'static str,
    pub title: String,
    pub author: String,
}

/// Deterministic background color for a card.
///
/// Pure function of title length, author length, and card index, so the same
/// book in the same slot always renders the same color.
pub fn placeholder_color(title: &str, author: &str, index: usize) -> &'static str {
    let hash = title.len() + author.len() + index;
    PALETTE[hash % PALETTE.len()]
}

pub fn placeholder_card(title: &str, author: &str, index: usize) -> Placeholder {
    Placeholder {
        background: placeholder_color(title, author, index),
        title: title.to_string(),
        author: author.to_string(),
    }
}
