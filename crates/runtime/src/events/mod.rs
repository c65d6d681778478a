//! Topic-based event bus for combat events.
//!
//! Events are published to specific topics, and consumers can subscribe only
//! to the topics they need.

mod bus;
mod types;

pub use bus::EventBus;
pub use types::{Event, Topic};
