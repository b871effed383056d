mod error;
mod handlers;
pub mod store;
pub mod types;
pub mod validation;

pub use error::*;
pub use handlers::*;
pub use store::{PgTaskStore, TaskStore};
pub use types::*;
