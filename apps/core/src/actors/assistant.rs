use crate::actors::messages::{ActorError, AssistantCommand};
use crate::actors::scheduler::{Scheduler, TaskId, TaskKind};
use crate::actors::traits::Navigator;
use crate::brain::dialogue::{DialogueController, DialogueSettings};
use crate::brain::routes::Destination;
use crate::brain::search::{self, SearchHit};
use crate::catalog::Catalog;
use crate::choice::{ChoiceSource, RandomChoices};
use crate::config::AssistantConfig;
use crate::error::AppError;
use crate::models::{AssistantState, AssistantView, ChatMessage, LearningNote};
use chrono::Utc;
use std::collections::VecDeque;
use std::ops::RangeInclusive;
use std::sync::Arc;
use tokio::sync::{mpsc, oneshot, watch};
use tokio::time::{timeout, Duration};
use tracing::{debug, info, instrument, warn};
use uuid::Uuid;

const COMMAND_TIMEOUT: Duration = Duration::from_secs(5);

/// A handle to one assistant session.
///
/// All mutations of [`AssistantState`] go through the session actor, one
/// command at a time. Reads are served from the latest published snapshot,
/// so they never wait on a pending reply.
#[derive(Clone)]
pub struct AssistantHandle {
    sender: mpsc::Sender<AssistantCommand>,
    state: watch::Receiver<AssistantState>,
    catalog: Arc<Catalog>,
}

impl AssistantHandle {
    /// Starts a session with the default configuration and a random source
    /// seeded from the OS.
    pub fn new(catalog: Arc<Catalog>, navigator: Arc<dyn Navigator>) -> Self {
        Self::with_options(
            catalog,
            navigator,
            AssistantConfig::default(),
            Box::new(RandomChoices::from_entropy()),
        )
    }

    /// Starts a session actor and returns a handle to it.
    ///
    /// # Arguments
    ///
    /// * `catalog` - The read-only content catalog shared with the caller.
    /// * `navigator` - The host's page-navigation primitive.
    /// * `config` - Delays and limits; assumed to be validated.
    /// * `choices` - Source of the thinking delay and the fallback pick.
    pub fn with_options(
        catalog: Arc<Catalog>,
        navigator: Arc<dyn Navigator>,
        config: AssistantConfig,
        choices: Box<dyn ChoiceSource>,
    ) -> Self {
        let (sender, receiver) = mpsc::channel(64);
        let initial = AssistantState::new(&config.initial_route, Utc::now());
        let (state_tx, state_rx) = watch::channel(initial.clone());

        let runner = AssistantRunner {
            receiver,
            scheduler: Scheduler::new(sender.downgrade()),
            state: initial,
            state_tx,
            pending: VecDeque::new(),
            next_message_id: 1,
            controller: DialogueController::new(DialogueSettings::from(&config)),
            thinking: config.thinking_window(),
            catalog: Arc::clone(&catalog),
            navigator,
            choices,
        };
        tokio::spawn(async move { runner.run().await });

        Self {
            sender,
            state: state_rx,
            catalog,
        }
    }

    async fn request<T>(
        &self,
        build: impl FnOnce(oneshot::Sender<T>) -> AssistantCommand,
    ) -> Result<T, AppError> {
        let (send, recv) = oneshot::channel();
        self.sender
            .send(build(send))
            .await
            .map_err(|e| ActorError::Unavailable(e.to_string()))?;
        timeout(COMMAND_TIMEOUT, recv)
            .await
            .map_err(ActorError::from)?
            .map_err(|e| AppError::from(ActorError::Unavailable(e.to_string())))
    }

    /// Shows the assistant. `None` keeps the current view.
    #[instrument(skip(self))]
    pub async fn open(&self, view: Option<AssistantView>) -> Result<(), AppError> {
        self.request(|responder| AssistantCommand::Open { view, responder })
            .await
    }

    /// Hides the assistant and cancels pending navigations. History is kept.
    #[instrument(skip(self))]
    pub async fn close(&self) -> Result<(), AppError> {
        self.request(|responder| AssistantCommand::Close { responder })
            .await
    }

    #[instrument(skip(self))]
    pub async fn set_view(&self, view: AssistantView) -> Result<(), AppError> {
        self.request(|responder| AssistantCommand::SetView { view, responder })
            .await
    }

    /// Queues a user message and returns as soon as it is in the log.
    ///
    /// The assistant's reply is committed later, after the thinking delay,
    /// and is observable through [`AssistantHandle::subscribe`]. Returns
    /// `false` (and changes nothing) for blank text.
    #[instrument(skip(self, text), fields(len = text.len()))]
    pub async fn send_message(&self, text: &str) -> Result<bool, AppError> {
        let text = text.to_string();
        self.request(|responder| AssistantCommand::SendMessage { text, responder })
            .await
    }

    /// Saves a note. Returns `None` when the body is blank.
    #[instrument(skip(self, content))]
    pub async fn add_note(
        &self,
        content: &str,
        tags: Vec<String>,
        content_ref: Option<String>,
    ) -> Result<Option<Uuid>, AppError> {
        let content = content.to_string();
        self.request(|responder| AssistantCommand::AddNote {
            content,
            tags,
            content_ref,
            responder,
        })
        .await
    }

    #[instrument(skip(self))]
    pub async fn delete_note(&self, id: Uuid) -> Result<bool, AppError> {
        self.request(|responder| AssistantCommand::DeleteNote { id, responder })
            .await
    }

    /// Empties the message log and the notes. Session history and the
    /// open/closed flag are untouched.
    #[instrument(skip(self))]
    pub async fn clear_history(&self) -> Result<(), AppError> {
        self.request(|responder| AssistantCommand::ClearHistory { responder })
            .await
    }

    #[instrument(skip(self))]
    pub async fn get_summary(&self) -> Result<String, AppError> {
        self.request(|responder| AssistantCommand::GetSummary { responder })
            .await
    }

    /// Host-initiated navigation; records the visit. Blank paths are ignored.
    #[instrument(skip(self))]
    pub async fn navigate_to(&self, path: &str) -> Result<bool, AppError> {
        let path = path.to_string();
        self.request(|responder| AssistantCommand::NavigateTo { path, responder })
            .await
    }

    /// Records that a catalog item was watched. Unknown ids are ignored.
    #[instrument(skip(self))]
    pub async fn mark_watched(&self, content_id: &str) -> Result<bool, AppError> {
        let content_id = content_id.to_string();
        self.request(|responder| AssistantCommand::MarkWatched {
            content_id,
            responder,
        })
        .await
    }

    /// Flips the voice flag and returns its new value.
    #[instrument(skip(self))]
    pub async fn toggle_voice(&self) -> Result<bool, AppError> {
        self.request(|responder| AssistantCommand::ToggleVoice { responder })
            .await
    }

    /// Ranks the catalog against `query`. Runs on the caller's task.
    pub fn search_content(&self, query: &str) -> Vec<SearchHit<'_>> {
        search::search(query, &self.catalog)
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// The latest published state.
    pub fn snapshot(&self) -> AssistantState {
        self.state.borrow().clone()
    }

    /// A receiver that observes every published state.
    pub fn subscribe(&self) -> watch::Receiver<AssistantState> {
        self.state.clone()
    }

    /// Stops the session and cancels every pending reply and navigation.
    #[instrument(skip(self))]
    pub async fn shutdown(&self) -> Result<(), AppError> {
        self.sender
            .send(AssistantCommand::Shutdown)
            .await
            .map_err(|e| ActorError::Unavailable(e.to_string()))?;
        Ok(())
    }
}

// --- Actor Runner ---

/// A user message waiting for its thinking delay to elapse.
struct PendingReply {
    task: TaskId,
    text: String,
    ready: bool,
}

struct AssistantRunner {
    receiver: mpsc::Receiver<AssistantCommand>,
    scheduler: Scheduler<AssistantCommand>,
    state: AssistantState,
    state_tx: watch::Sender<AssistantState>,
    /// Replies in send order; only the front may be committed.
    pending: VecDeque<PendingReply>,
    next_message_id: u64,
    controller: DialogueController,
    thinking: RangeInclusive<Duration>,
    catalog: Arc<Catalog>,
    navigator: Arc<dyn Navigator>,
    choices: Box<dyn ChoiceSource>,
}

impl AssistantRunner {
    async fn run(mut self) {
        info!(route = %self.state.session.current_route, "Assistant session started");
        while let Some(msg) = self.receiver.recv().await {
            if matches!(msg, AssistantCommand::Shutdown) {
                break;
            }
            self.handle_message(msg).await;
        }
        self.scheduler.cancel_all();
        info!("Assistant session stopped");
    }

    async fn handle_message(&mut self, msg: AssistantCommand) {
        match msg {
            AssistantCommand::Open { view, responder } => {
                self.state.is_open = true;
                if let Some(view) = view {
                    self.state.view = view;
                }
                self.publish();
                let _ = responder.send(());
            }
            AssistantCommand::Close { responder } => {
                self.state.is_open = false;
                let cancelled = self.scheduler.cancel_kind(TaskKind::Navigation);
                debug!(
                    cancelled,
                    replies_pending = self.scheduler.pending(TaskKind::Reply),
                    "Assistant closed"
                );
                self.publish();
                let _ = responder.send(());
            }
            AssistantCommand::SetView { view, responder } => {
                self.state.view = view;
                self.publish();
                let _ = responder.send(());
            }
            AssistantCommand::SendMessage { text, responder } => {
                let _ = responder.send(self.accept_message(text));
            }
            AssistantCommand::AddNote {
                content,
                tags,
                content_ref,
                responder,
            } => {
                let id = LearningNote::new(&content, &tags, content_ref).map(|note| {
                    let id = note.id;
                    self.state.notes.push(note);
                    id
                });
                if id.is_some() {
                    self.publish();
                }
                let _ = responder.send(id);
            }
            AssistantCommand::DeleteNote { id, responder } => {
                let before = self.state.notes.len();
                self.state.notes.retain(|note| note.id != id);
                let removed = self.state.notes.len() != before;
                if removed {
                    self.publish();
                }
                let _ = responder.send(removed);
            }
            AssistantCommand::ClearHistory { responder } => {
                self.state.messages.clear();
                self.state.notes.clear();
                self.publish();
                let _ = responder.send(());
            }
            AssistantCommand::GetSummary { responder } => {
                let _ = responder.send(self.state.summary(Utc::now()));
            }
            AssistantCommand::NavigateTo { path, responder } => {
                let path = path.trim();
                let accepted = !path.is_empty();
                if accepted {
                    match Destination::from_path(path) {
                        Some(destination) => info!(%destination, "Host navigation"),
                        None => debug!(path, "Host navigation outside the route table"),
                    }
                    self.navigator.navigate(path).await;
                    self.state.session.record_visit(path);
                    self.publish();
                }
                let _ = responder.send(accepted);
            }
            AssistantCommand::MarkWatched {
                content_id,
                responder,
            } => {
                let known = self.catalog.get(&content_id).is_some();
                if known && self.state.session.watched.insert(content_id) {
                    self.publish();
                }
                let _ = responder.send(known);
            }
            AssistantCommand::ToggleVoice { responder } => {
                self.state.voice_enabled = !self.state.voice_enabled;
                self.publish();
                let _ = responder.send(self.state.voice_enabled);
            }
            AssistantCommand::ReplyDue { task } => self.on_reply_due(task),
            AssistantCommand::NavigationDue { task, path } => {
                if self.scheduler.complete(task) {
                    info!(%path, "Navigating");
                    self.navigator.navigate(&path).await;
                    self.state.session.record_visit(&path);
                    self.publish();
                }
            }
            AssistantCommand::Shutdown => {}
        }
    }

    fn accept_message(&mut self, text: String) -> bool {
        let text = text.trim();
        if text.is_empty() {
            return false;
        }

        let id = self.next_id();
        self.state.messages.push(ChatMessage::user(id, text.to_string()));

        let delay = self.choices.pick_delay(self.thinking.clone());
        let task = self
            .scheduler
            .schedule(TaskKind::Reply, delay, |task| AssistantCommand::ReplyDue { task });
        self.pending.push_back(PendingReply {
            task,
            text: text.to_string(),
            ready: false,
        });
        debug!(%task, delay_ms = delay.as_millis() as u64, pending = self.pending.len(), "Reply scheduled");

        self.state.typing = true;
        self.publish();
        true
    }

    fn on_reply_due(&mut self, task: TaskId) {
        if !self.scheduler.complete(task) {
            return;
        }
        match self.pending.iter_mut().find(|reply| reply.task == task) {
            Some(reply) => reply.ready = true,
            None => {
                warn!(%task, "Reply timer fired for an unknown message");
                return;
            }
        }

        // A later reply whose delay was shorter waits for the ones before it.
        while self.pending.front().is_some_and(|reply| reply.ready) {
            if let Some(reply) = self.pending.pop_front() {
                self.commit_reply(&reply.text);
            }
        }

        self.state.typing = !self.pending.is_empty();
        self.publish();
    }

    fn commit_reply(&mut self, text: &str) {
        let reply = self.controller.route(
            text,
            &self.state.session,
            &self.catalog,
            Utc::now(),
            self.choices.as_mut(),
        );
        info!(intent = %reply.intent, suggestions = reply.suggestions.len(), "Reply committed");

        if let Some(navigation) = reply.navigation {
            if self.state.is_open {
                let path = navigation.destination.path().to_string();
                self.scheduler
                    .schedule(TaskKind::Navigation, navigation.delay, |task| {
                        AssistantCommand::NavigationDue { task, path }
                    });
            } else {
                debug!(destination = %navigation.destination, "Navigation dropped, assistant is closed");
            }
        }

        let id = self.next_id();
        self.state.messages.push(ChatMessage::assistant(
            id,
            reply.text,
            reply.suggestions,
            reply.action,
        ));
    }

    fn next_id(&mut self) -> u64 {
        let id = self.next_message_id;
        self.next_message_id += 1;
        id
    }

    fn publish(&self) {
        self.state_tx.send_replace(self.state.clone());
    }
}
