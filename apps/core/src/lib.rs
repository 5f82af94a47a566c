//! Client-side learning assistant engine.
//!
//! A [`Catalog`] of learning content, a rule-based dialogue engine in
//! [`brain`], and one session actor per learner ([`AssistantHandle`]) that
//! owns the conversation and schedules replies and page navigations.

pub mod actors;
pub mod brain;
pub mod catalog;
pub mod choice;
pub mod config;
pub mod error;
pub mod models;

#[cfg(test)]
mod tests;

pub use actors::{AssistantHandle, LogNavigator, Navigator, RecordingNavigator};
pub use catalog::Catalog;
pub use choice::{ChoiceSource, RandomChoices, ScriptedChoices};
pub use config::AssistantConfig;
pub use error::AppError;
pub use models::{
    ActionKind, AssistantState, AssistantView, ChatMessage, ContentItem, LearningNote, MessageAction, Role,
    SessionContext,
};
