//! Intent Classification as an ordered decision list.
//!
//! Rules are evaluated in [`IntentRule::ORDER`]; the first rule that matches
//! decides the intent. When none matches the intent is [`Intent::Fallback`].
//! Every rule is a pure keyword check, so classification is deterministic.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::keywords::{
    NormalizedMessage, BUILDER_TERMS, EDUCATION_TERMS, EXPERIENCE_TERMS, HELP_TERMS,
    NAVIGATION_VERBS, OPTIMIZATION_TERMS, SEARCH_VERBS, SESSION_SUMMARY_TERMS, SKILL_TERMS,
    SUMMARY_HELP_TERMS,
};
use super::routes::Destination;
use super::topic::{TopicDetector, TopicKind};

/// Resume builder sub-intents, checked in declaration order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BuilderSection {
    Experience,
    Skills,
    Education,
    Summary,
    Optimization,
}

impl BuilderSection {
    pub const ALL: [BuilderSection; 5] = [
        BuilderSection::Experience,
        BuilderSection::Skills,
        BuilderSection::Education,
        BuilderSection::Summary,
        BuilderSection::Optimization,
    ];

    fn keywords(self) -> &'static [&'static str] {
        match self {
            BuilderSection::Experience => EXPERIENCE_TERMS,
            BuilderSection::Skills => SKILL_TERMS,
            BuilderSection::Education => EDUCATION_TERMS,
            BuilderSection::Summary => SUMMARY_HELP_TERMS,
            BuilderSection::Optimization => OPTIMIZATION_TERMS,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            BuilderSection::Experience => "experience",
            BuilderSection::Skills => "skills",
            BuilderSection::Education => "education",
            BuilderSection::Summary => "summary",
            BuilderSection::Optimization => "optimization",
        }
    }
}

/// Classified purpose of a user message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "kind", content = "target")]
pub enum Intent {
    StructuredBuilder(BuilderSection),
    Topic(TopicKind),
    Navigation(Destination),
    Search,
    BuilderGeneral,
    SessionSummary,
    Help,
    Fallback,
}

impl Intent {
    pub fn label(&self) -> &'static str {
        match self {
            Intent::StructuredBuilder(_) => "structured_builder",
            Intent::Topic(_) => "topic",
            Intent::Navigation(_) => "navigation",
            Intent::Search => "search",
            Intent::BuilderGeneral => "builder_general",
            Intent::SessionSummary => "session_summary",
            Intent::Help => "help",
            Intent::Fallback => "fallback",
        }
    }
}

impl fmt::Display for Intent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// One entry of the decision list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IntentRule {
    StructuredBuilder,
    Topic,
    Navigation,
    Search,
    BuilderGeneral,
    SessionSummary,
    Help,
}

impl IntentRule {
    /// Evaluation order. Changing it changes which handler answers.
    pub const ORDER: [IntentRule; 7] = [
        IntentRule::StructuredBuilder,
        IntentRule::Topic,
        IntentRule::Navigation,
        IntentRule::Search,
        IntentRule::BuilderGeneral,
        IntentRule::SessionSummary,
        IntentRule::Help,
    ];

    fn evaluate(self, msg: &NormalizedMessage, topics: &TopicDetector) -> Option<Intent> {
        match self {
            IntentRule::StructuredBuilder => {
                if !msg.contains_any(BUILDER_TERMS) {
                    return None;
                }
                BuilderSection::ALL
                    .into_iter()
                    .find(|section| msg.contains_any(section.keywords()))
                    .map(Intent::StructuredBuilder)
            }
            IntentRule::Topic => {
                // Explicit commands that merely mention a topic are handled by
                // the navigation and search rules.
                if is_navigation_command(msg).is_some() || is_search_command(msg) {
                    return None;
                }
                topics.detect_kind(msg).map(Intent::Topic)
            }
            IntentRule::Navigation => is_navigation_command(msg).map(Intent::Navigation),
            IntentRule::Search => is_search_command(msg).then_some(Intent::Search),
            IntentRule::BuilderGeneral => {
                msg.contains_any(BUILDER_TERMS).then_some(Intent::BuilderGeneral)
            }
            IntentRule::SessionSummary => msg
                .contains_any(SESSION_SUMMARY_TERMS)
                .then_some(Intent::SessionSummary),
            IntentRule::Help => msg.contains_any(HELP_TERMS).then_some(Intent::Help),
        }
    }
}

fn is_navigation_command(msg: &NormalizedMessage) -> Option<Destination> {
    if !msg.contains_any(NAVIGATION_VERBS) {
        return None;
    }
    Destination::resolve(msg)
}

fn is_search_command(msg: &NormalizedMessage) -> bool {
    msg.contains_any(SEARCH_VERBS)
}

/// Result of classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IntentMatch {
    pub intent: Intent,
    /// The rule that fired, `None` for the fallback.
    pub rule: Option<IntentRule>,
}

#[derive(Debug, Default, Clone)]
pub struct IntentClassifier {
    topics: TopicDetector,
}

impl IntentClassifier {
    pub fn new() -> Self {
        Self {
            topics: TopicDetector::new(),
        }
    }

    pub fn topics(&self) -> &TopicDetector {
        &self.topics
    }

    /// Classify the intent of a message.
    pub fn classify(&self, message: &str) -> IntentMatch {
        let msg = NormalizedMessage::new(message);
        IntentRule::ORDER
            .into_iter()
            .find_map(|rule| {
                rule.evaluate(&msg, &self.topics).map(|intent| IntentMatch {
                    intent,
                    rule: Some(rule),
                })
            })
            .unwrap_or(IntentMatch {
                intent: Intent::Fallback,
                rule: None,
            })
    }

    /// Every rule that would match on its own, in evaluation order.
    pub fn matching_rules(&self, message: &str) -> Vec<IntentRule> {
        let msg = NormalizedMessage::new(message);
        IntentRule::ORDER
            .into_iter()
            .filter(|rule| rule.evaluate(&msg, &self.topics).is_some())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn classify(text: &str) -> Intent {
        IntentClassifier::new().classify(text).intent
    }

    #[test]
    fn test_builder_sub_intents() {
        assert_eq!(
            classify("How do I add work experience to my resume?"),
            Intent::StructuredBuilder(BuilderSection::Experience)
        );
        assert_eq!(
            classify("which skills should my CV list"),
            Intent::StructuredBuilder(BuilderSection::Skills)
        );
        assert_eq!(
            classify("resume education section"),
            Intent::StructuredBuilder(BuilderSection::Education)
        );
        assert_eq!(
            classify("write a resume summary"),
            Intent::StructuredBuilder(BuilderSection::Summary)
        );
        assert_eq!(
            classify("optimize my resume for ATS"),
            Intent::StructuredBuilder(BuilderSection::Optimization)
        );
    }

    #[test]
    fn test_builder_general_when_no_sub_intent() {
        assert_eq!(classify("can you look at my resume"), Intent::BuilderGeneral);
    }

    #[test]
    fn test_topic_question() {
        assert_eq!(
            classify("I think I got scammed yesterday"),
            Intent::Topic(TopicKind::Security)
        );
        assert_eq!(
            classify("I want to get into machine learning"),
            Intent::Topic(TopicKind::ArtificialIntelligence)
        );
    }

    #[test]
    fn test_navigation_command_beats_topic() {
        let classifier = IntentClassifier::new();
        let result = classifier.classify("go to cyber scams section");

        assert_eq!(result.intent, Intent::Navigation(Destination::CyberScams));
        assert_eq!(result.rule, Some(IntentRule::Navigation));
    }

    #[test]
    fn test_search_command_beats_topic() {
        assert_eq!(classify("tell me about phishing"), Intent::Search);
        assert_eq!(classify("find python videos"), Intent::Search);
    }

    #[test]
    fn test_navigation_verb_without_destination_is_not_navigation() {
        let classifier = IntentClassifier::new();
        assert!(!classifier
            .matching_rules("open the pod bay doors")
            .contains(&IntentRule::Navigation));
    }

    #[test]
    fn test_summary_and_help() {
        assert_eq!(classify("what have I learned so far?"), Intent::SessionSummary);
        assert_eq!(classify("what can you do?"), Intent::Help);
    }

    #[test]
    fn test_fallback() {
        let result = IntentClassifier::new().classify("good morning!");
        assert_eq!(result.intent, Intent::Fallback);
        assert_eq!(result.rule, None);

        assert_eq!(classify(""), Intent::Fallback);
    }

    #[test]
    fn test_order_decides_between_matching_rules() {
        let classifier = IntentClassifier::new();
        let message = "help me improve my resume";

        assert_eq!(
            classifier.matching_rules(message),
            vec![
                IntentRule::StructuredBuilder,
                IntentRule::BuilderGeneral,
                IntentRule::Help
            ]
        );
        assert_eq!(
            classifier.classify(message).intent,
            Intent::StructuredBuilder(BuilderSection::Optimization)
        );
    }
}
