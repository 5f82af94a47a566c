//! Dialogue Controller - turns a classified message into a reply.
//!
//! Pure over (message, session, catalog, clock, choice source): the only
//! non-deterministic step is the fallback greeting, which is drawn from the
//! injected [`ChoiceSource`].

use std::sync::LazyLock;
use std::time::Duration;

use chrono::{DateTime, Utc};
use regex::Regex;
use tracing::debug;

use crate::catalog::Catalog;
use crate::choice::ChoiceSource;
use crate::config::AssistantConfig;
use crate::models::{ActionKind, ContentItem, MessageAction, SessionContext};

use super::intent::{Intent, IntentClassifier};
use super::routes::Destination;
use super::search::{self, SearchHit};
use super::templates;

// NOTE: expect() is acceptable here, the patterns are static.
static SEARCH_VERB_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\b(find|search(\s+for)?|show\s+me|tell\s+me\s+about|look(ing)?\s+for)\b")
        .expect("Invalid regex: search verbs")
});

static LEADING_FILLER_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^((some|any|the|a|an|me|all|videos?|courses?|tutorials?|about|on|for|with|please)\s+)+")
        .expect("Invalid regex: leading filler words")
});

/// A scheduled route change produced by a reply.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Navigation {
    pub destination: Destination,
    pub delay: Duration,
}

/// Everything the session needs to commit an assistant message.
#[derive(Debug, Clone, PartialEq)]
pub struct Reply {
    pub intent: Intent,
    pub text: String,
    /// At most `max_suggestions` items.
    pub suggestions: Vec<ContentItem>,
    pub navigation: Option<Navigation>,
    pub action: Option<MessageAction>,
}

impl Reply {
    fn text(intent: Intent, text: impl Into<String>) -> Self {
        Self {
            intent,
            text: text.into(),
            suggestions: Vec::new(),
            navigation: None,
            action: None,
        }
    }
}

/// Delays and limits used when composing replies.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DialogueSettings {
    pub topic_navigation_delay: Duration,
    pub navigation_delay: Duration,
    pub max_suggestions: usize,
    pub max_listed_results: usize,
}

impl Default for DialogueSettings {
    fn default() -> Self {
        Self::from(&AssistantConfig::default())
    }
}

impl From<&AssistantConfig> for DialogueSettings {
    fn from(config: &AssistantConfig) -> Self {
        Self {
            topic_navigation_delay: Duration::from_millis(config.topic_navigation_delay_ms),
            navigation_delay: Duration::from_millis(config.navigation_delay_ms),
            max_suggestions: config.max_suggestions,
            max_listed_results: config.max_listed_results,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct DialogueController {
    classifier: IntentClassifier,
    settings: DialogueSettings,
}

impl DialogueController {
    pub fn new(settings: DialogueSettings) -> Self {
        Self {
            classifier: IntentClassifier::new(),
            settings,
        }
    }

    pub fn classifier(&self) -> &IntentClassifier {
        &self.classifier
    }

    /// Produces the reply for one user message. Never returns empty text.
    pub fn route(
        &self,
        message: &str,
        session: &SessionContext,
        catalog: &Catalog,
        now: DateTime<Utc>,
        choices: &mut dyn ChoiceSource,
    ) -> Reply {
        let classified = self.classifier.classify(message);
        debug!(intent = %classified.intent, rule = ?classified.rule, "Message classified");

        match classified.intent {
            Intent::StructuredBuilder(section) => Reply {
                action: Some(MessageAction {
                    kind: ActionKind::Builder,
                    target: section.label().to_string(),
                }),
                ..Reply::text(classified.intent, templates::builder_guidance(section))
            },
            Intent::Topic(kind) => {
                let bundle = self.classifier.topics().bundle(kind, catalog);
                let shown: Vec<&ContentItem> = bundle
                    .items
                    .iter()
                    .copied()
                    .take(self.settings.max_suggestions)
                    .collect();
                let destination = kind.destination();
                Reply {
                    intent: classified.intent,
                    text: templates::topic_reply(kind, bundle.supplementary, &shown),
                    suggestions: shown.into_iter().cloned().collect(),
                    navigation: Some(Navigation {
                        destination,
                        delay: self.settings.topic_navigation_delay,
                    }),
                    action: Some(navigate_action(destination)),
                }
            }
            Intent::Navigation(destination) => Reply {
                navigation: Some(Navigation {
                    destination,
                    delay: self.settings.navigation_delay,
                }),
                action: Some(navigate_action(destination)),
                ..Reply::text(classified.intent, templates::navigation_reply(destination.label()))
            },
            Intent::Search => self.search_reply(message, catalog),
            Intent::BuilderGeneral => Reply {
                action: Some(MessageAction {
                    kind: ActionKind::Builder,
                    target: "general".to_string(),
                }),
                ..Reply::text(classified.intent, templates::BUILDER_GENERAL_REPLY)
            },
            Intent::SessionSummary => Reply::text(
                classified.intent,
                templates::session_summary_reply(
                    session.visited_routes.len(),
                    session.elapsed_minutes(now),
                    session.watched.len(),
                ),
            ),
            Intent::Help => Reply::text(classified.intent, templates::HELP_REPLY),
            Intent::Fallback => {
                let hits = search::best_effort(message, catalog);
                let replies = templates::FALLBACK_REPLIES;
                // Out-of-range picks from a host-supplied source wrap around.
                let index = choices.pick_index(replies.len()) % replies.len();
                Reply {
                    suggestions: self.suggestions(&hits),
                    ..Reply::text(classified.intent, replies[index])
                }
            }
        }
    }

    fn search_reply(&self, message: &str, catalog: &Catalog) -> Reply {
        let query = extract_search_query(message);
        let hits = search::best_effort(&query, catalog);

        if hits.is_empty() {
            return Reply::text(Intent::Search, templates::no_results_reply(&query));
        }

        Reply {
            intent: Intent::Search,
            text: templates::search_results_reply(&query, &hits, self.settings.max_listed_results),
            suggestions: self.suggestions(&hits),
            navigation: None,
            action: Some(MessageAction {
                kind: ActionKind::Search,
                target: query,
            }),
        }
    }

    fn suggestions(&self, hits: &[SearchHit<'_>]) -> Vec<ContentItem> {
        hits.iter()
            .take(self.settings.max_suggestions)
            .map(|hit| hit.item.clone())
            .collect()
    }
}

fn navigate_action(destination: Destination) -> MessageAction {
    MessageAction {
        kind: ActionKind::Navigate,
        target: destination.path().to_string(),
    }
}

/// Strips search verbs and leading filler words: "find me some videos about
/// phishing?" becomes "phishing".
pub fn extract_search_query(message: &str) -> String {
    let without_verbs = SEARCH_VERB_PATTERN.replace_all(message, " ");
    let collapsed = without_verbs.split_whitespace().collect::<Vec<_>>().join(" ");
    let trimmed = LEADING_FILLER_PATTERN.replace(&collapsed, "");
    trimmed
        .trim()
        .trim_end_matches(|c: char| matches!(c, '?' | '!' | '.' | ','))
        .trim()
        .to_lowercase()
}
