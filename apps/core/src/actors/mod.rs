//! # Actors
//!
//! The session actor owns the mutable [`AssistantState`](crate::models::AssistantState);
//! everything else talks to it through an [`AssistantHandle`].
//!
//! - `assistant`: session handle and runner
//! - `scheduler`: cancellable reply and navigation timers
//! - `messages`: command enum and actor errors
//! - `traits`: the host's navigation primitive

pub mod assistant;
pub mod messages;
pub mod scheduler;
pub mod traits;

pub use assistant::AssistantHandle;
pub use messages::{ActorError, AssistantCommand};
pub use scheduler::{Scheduler, TaskId, TaskKind};
pub use traits::{LogNavigator, Navigator, RecordingNavigator};
