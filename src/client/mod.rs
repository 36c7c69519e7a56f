//! Client-side building blocks: backend base-URL resolution, the durable
//! session cache, the authenticated REST client, and the cover-image
//! resolution pipeline.

pub mod api;
pub mod config;
pub mod covers;
pub mod session;

pub use api::ApiClient;
pub use session::{Session, SessionStore};
