use serde::Serialize;
use tokio::sync::oneshot;
use uuid::Uuid;

use crate::actors::scheduler::TaskId;
use crate::models::AssistantView;

/// Defines errors that can occur within the actor system.
#[derive(Debug, thiserror::Error, Serialize, Clone)]
pub enum ActorError {
    /// The session actor has stopped and no longer accepts commands.
    #[error("Assistant session unavailable: {0}")]
    Unavailable(String),
    /// An error indicating that an actor operation timed out.
    #[error("Operation timed out: {0}")]
    Timeout(String),
}

impl From<tokio::time::error::Elapsed> for ActorError {
    fn from(err: tokio::time::error::Elapsed) -> Self {
        ActorError::Timeout(format!("Actor operation timed out: {}", err))
    }
}

/// Messages that can be sent to the assistant session actor.
///
/// Public operations carry a `responder`; `ReplyDue` and `NavigationDue` are
/// sent by the actor's own timers.
#[derive(Debug)]
pub enum AssistantCommand {
    /// Show the assistant, optionally switching the active view.
    Open {
        view: Option<AssistantView>,
        responder: oneshot::Sender<()>,
    },
    /// Hide the assistant. Pending navigations are cancelled; history is kept.
    Close { responder: oneshot::Sender<()> },
    SetView {
        view: AssistantView,
        responder: oneshot::Sender<()>,
    },
    /// A user message. The responder receives `false` when the text was blank.
    SendMessage {
        text: String,
        responder: oneshot::Sender<bool>,
    },
    AddNote {
        content: String,
        tags: Vec<String>,
        content_ref: Option<String>,
        responder: oneshot::Sender<Option<Uuid>>,
    },
    DeleteNote {
        id: Uuid,
        responder: oneshot::Sender<bool>,
    },
    /// Empties the message log and the notes.
    ClearHistory { responder: oneshot::Sender<()> },
    GetSummary { responder: oneshot::Sender<String> },
    NavigateTo {
        path: String,
        responder: oneshot::Sender<bool>,
    },
    MarkWatched {
        content_id: String,
        responder: oneshot::Sender<bool>,
    },
    /// The responder receives the new voice flag.
    ToggleVoice { responder: oneshot::Sender<bool> },
    /// The thinking delay of a pending reply elapsed.
    ReplyDue { task: TaskId },
    /// A scheduled navigation is due.
    NavigationDue { task: TaskId, path: String },
    /// A command to stop the session and cancel its timers.
    Shutdown,
}
