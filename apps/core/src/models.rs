use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use uuid::Uuid;
use validator::Validate;

/// A video-like record of the content catalog.
///
/// Items are loaded once at startup and never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
pub struct ContentItem {
    /// Stable identifier, unique within the catalog.
    #[validate(length(min = 1))]
    pub id: String,
    /// Display title.
    #[validate(length(min = 1))]
    pub title: String,
    /// Category bucket (e.g. "CyberScams", "Software").
    #[validate(length(min = 1))]
    pub category: String,
    /// Optional long description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Optional search keywords.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub keywords: Vec<String>,
    /// Optional publication year.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub year: Option<u16>,
}

/// Author of a chat message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Assistant,
}

/// Kind of side effect or context attached to an assistant reply.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActionKind {
    /// The reply scheduled a route change.
    Navigate,
    /// The reply lists search results.
    Search,
    /// The reply is resume builder guidance.
    Builder,
}

/// Structured metadata attached to an assistant message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageAction {
    pub kind: ActionKind,
    /// Path, query or builder section, depending on `kind`.
    pub target: String,
}

/// Represents a single message within the assistant conversation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatMessage {
    /// Per-session, monotonically increasing identifier.
    pub id: u64,
    /// The role of the message sender.
    pub role: Role,
    /// The text content of the message.
    pub content: String,
    /// When the message was appended to the log.
    pub created_at: DateTime<Utc>,
    /// Content suggested alongside an assistant reply (at most three).
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub suggestions: Vec<ContentItem>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub action: Option<MessageAction>,
}

impl ChatMessage {
    pub fn user(id: u64, content: String) -> Self {
        Self {
            id,
            role: Role::User,
            content,
            created_at: Utc::now(),
            suggestions: Vec::new(),
            action: None,
        }
    }

    pub fn assistant(
        id: u64,
        content: String,
        suggestions: Vec<ContentItem>,
        action: Option<MessageAction>,
    ) -> Self {
        Self {
            id,
            role: Role::Assistant,
            content,
            created_at: Utc::now(),
            suggestions,
            action,
        }
    }
}

/// A note written by the learner. Never generated by the dialogue engine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LearningNote {
    pub id: Uuid,
    pub content: String,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub tags: BTreeSet<String>,
    /// Identifier of the content item the note refers to.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content_ref: Option<String>,
}

impl LearningNote {
    /// Builds a note, or `None` when the body is empty or whitespace only.
    ///
    /// Tags are trimmed and lowercased; blank tags are dropped.
    pub fn new(content: &str, tags: &[String], content_ref: Option<String>) -> Option<Self> {
        let content = content.trim();
        if content.is_empty() {
            return None;
        }

        let tags = tags
            .iter()
            .map(|tag| tag.trim().to_lowercase())
            .filter(|tag| !tag.is_empty())
            .collect();

        Some(Self {
            id: Uuid::new_v4(),
            content: content.to_string(),
            created_at: Utc::now(),
            tags,
            content_ref: content_ref.filter(|r| !r.trim().is_empty()),
        })
    }
}

/// Navigation and viewing history of the current session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionContext {
    pub current_route: String,
    /// Append-only trail of visited routes; duplicates are kept.
    pub visited_routes: Vec<String>,
    pub watched: BTreeSet<String>,
    pub started_at: DateTime<Utc>,
}

impl SessionContext {
    pub fn new(initial_route: &str, started_at: DateTime<Utc>) -> Self {
        Self {
            current_route: initial_route.to_string(),
            visited_routes: vec![initial_route.to_string()],
            watched: BTreeSet::new(),
            started_at,
        }
    }

    pub fn record_visit(&mut self, path: &str) {
        self.current_route = path.to_string();
        self.visited_routes.push(path.to_string());
    }

    /// Whole minutes elapsed since the session started, rounded to nearest.
    pub fn elapsed_minutes(&self, now: DateTime<Utc>) -> i64 {
        let seconds = (now - self.started_at).num_seconds().max(0);
        (seconds as f64 / 60.0).round() as i64
    }
}

/// Panel shown by the assistant UI.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AssistantView {
    #[default]
    Chat,
    Builder,
    Notes,
}

/// The single mutable aggregate of one assistant session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssistantState {
    pub is_open: bool,
    pub view: AssistantView,
    pub messages: Vec<ChatMessage>,
    pub notes: Vec<LearningNote>,
    pub session: SessionContext,
    /// True while at least one reply is pending.
    pub typing: bool,
    pub voice_enabled: bool,
}

impl AssistantState {
    pub fn new(initial_route: &str, started_at: DateTime<Utc>) -> Self {
        Self {
            is_open: false,
            view: AssistantView::default(),
            messages: Vec::new(),
            notes: Vec::new(),
            session: SessionContext::new(initial_route, started_at),
            typing: false,
            voice_enabled: false,
        }
    }

    /// Formats a one-paragraph progress summary. Does not mutate anything.
    pub fn summary(&self, now: DateTime<Utc>) -> String {
        format!(
            "Session summary: {} pages visited, {} videos watched, {} notes saved, {} minutes of learning. Current page: {}.",
            self.session.visited_routes.len(),
            self.session.watched.len(),
            self.notes.len(),
            self.session.elapsed_minutes(now),
            self.session.current_route,
        )
    }
}
