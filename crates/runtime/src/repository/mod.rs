//! Repository layer for combat sessions.
//!
//! Repositories hold session snapshots between actions and after an
//! encounter ends. Static content (effects, items, rosters) is loaded by
//! `combat-content`, not stored here.

mod error;
mod file;
mod memory;
mod traits;

pub use error::{RepositoryError, Result};
pub use file::{FileSessionRepository, SessionFormat};
pub use memory::InMemorySessionRepo;
pub use traits::{SessionRecord, SessionRepository};
