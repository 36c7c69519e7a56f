pub mod book;
pub mod user;

pub use book::{Candidate, RawCandidate, RecommendRequest};
pub use user::{NewBook, SavedBook, User};
