pub mod memory;
pub mod postgres;
pub mod store;

pub use memory::MemoryUserStore;
pub use postgres::{create_pool, PgUserStore};
pub use store::UserStore;
