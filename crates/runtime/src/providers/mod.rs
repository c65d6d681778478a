//! Action provider implementations for different participant behaviors.

pub mod aggressive;
pub mod scripted;

pub use aggressive::AggressiveAiProvider;
pub use scripted::ScriptedActionProvider;
