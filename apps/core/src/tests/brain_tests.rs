//! Brain Module Tests
//!
//! Tests for relevance search, topic detection, intent ordering and the
//! replies produced by the dialogue controller.

use super::builtin_catalog;
use crate::brain::search::best_effort;
use crate::brain::{
    search, BuilderSection, Destination, DialogueController, Intent, IntentClassifier, IntentRule, TopicDetector,
    TopicKind,
};
use crate::choice::ScriptedChoices;
use crate::models::{ActionKind, SessionContext};
use chrono::{Duration, Utc};

#[cfg(test)]
mod search_tests {
    use super::*;

    #[test]
    fn test_phishing_title_match_scores_three() {
        let catalog = builtin_catalog();
        let hits = search("phishing", &catalog);

        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].item.id, "cs-001");
        assert_eq!(hits[0].score, 3);
    }

    #[test]
    fn test_search_is_deterministic_and_ordered() {
        let catalog = builtin_catalog();

        for query in ["pass", "scam", "interview", "data", "web", "jobs"] {
            let first = search(query, &catalog);
            let second = search(query, &catalog);
            assert_eq!(first, second, "Search for '{}' changed between calls", query);
            assert!(
                first.windows(2).all(|w| w[0].score >= w[1].score),
                "Scores for '{}' are not non-increasing",
                query
            );
            assert!(first.iter().all(|hit| hit.score > 0));
        }
    }

    #[test]
    fn test_category_match_ranks_every_item_in_category() {
        let catalog = builtin_catalog();
        let hits = search("cyberscams", &catalog);

        assert_eq!(hits.len(), 5);
        assert!(hits.iter().all(|hit| hit.item.category == "CyberScams"));
    }

    #[test]
    fn test_blank_query_matches_nothing() {
        let catalog = builtin_catalog();
        assert!(search("", &catalog).is_empty());
        assert!(search("   ", &catalog).is_empty());
    }

    #[test]
    fn test_best_effort_falls_back_to_terms() {
        let catalog = builtin_catalog();

        assert!(search("react and python", &catalog).is_empty());
        let hits = best_effort("react and python", &catalog);
        let ids: Vec<&str> = hits.iter().map(|hit| hit.item.id.as_str()).collect();
        assert!(ids.contains(&"sw-001"));
        assert!(ids.contains(&"sw-002"));
    }
}

#[cfg(test)]
mod topic_tests {
    use super::*;

    #[test]
    fn test_topic_bundle_contains_only_its_category() {
        let catalog = builtin_catalog();
        let detector = TopicDetector::new();

        let bundle = detector.detect("how do I avoid a scam?", &catalog).unwrap();
        assert_eq!(bundle.kind, TopicKind::Security);
        assert_eq!(bundle.items.len(), 5);
        assert!(bundle.items.iter().all(|item| item.category == "CyberScams"));
        assert!(!bundle.supplementary.is_empty());
    }

    #[test]
    fn test_security_wins_over_software() {
        let catalog = builtin_catalog();
        let detector = TopicDetector::new();

        let bundle = detector.detect("can python code be used to hack me", &catalog).unwrap();
        assert_eq!(bundle.kind, TopicKind::Security);
    }

    #[test]
    fn test_no_topic_for_small_talk() {
        let catalog = builtin_catalog();
        assert!(TopicDetector::new().detect("good morning", &catalog).is_none());
    }
}

#[cfg(test)]
mod intent_rule_tests {
    use super::*;

    #[test]
    fn test_builder_section_beats_everything() {
        let classifier = IntentClassifier::new();

        let result = classifier.classify("how do I add my work experience to my resume?");
        assert_eq!(result.intent, Intent::StructuredBuilder(BuilderSection::Experience));
        assert_eq!(result.rule, Some(IntentRule::StructuredBuilder));

        // Also mentions a security keyword and a help keyword.
        let result = classifier.classify("help me improve my resume for a cyber security job");
        assert_eq!(result.intent, Intent::StructuredBuilder(BuilderSection::Optimization));
    }

    #[test]
    fn test_navigation_command_mentioning_topic() {
        let classifier = IntentClassifier::new();

        let result = classifier.classify("go to cyber scams section");
        assert_eq!(result.intent, Intent::Navigation(Destination::CyberScams));

        let rules = classifier.matching_rules("go to cyber scams section");
        assert_eq!(rules.first(), Some(&IntentRule::Navigation));
    }

    #[test]
    fn test_search_command_mentioning_topic() {
        let classifier = IntentClassifier::new();
        assert_eq!(classifier.classify("tell me about phishing").intent, Intent::Search);
    }

    #[test]
    fn test_every_message_classifies() {
        let classifier = IntentClassifier::new();
        let messages = vec![
            "",
            "   ",
            "?",
            "asdf qwerty",
            "help",
            "how am I doing",
            "open the resume builder",
            "what is machine learning",
            "🙂",
        ];
        for message in messages {
            // Must not panic, and blank input is never a command.
            let result = classifier.classify(message);
            if message.trim().is_empty() {
                assert_eq!(result.intent, Intent::Fallback, "Expected Fallback for '{}'", message);
            }
        }
    }
}

#[cfg(test)]
mod dialogue_tests {
    use super::*;

    fn route(message: &str) -> crate::brain::Reply {
        let catalog = builtin_catalog();
        let session = SessionContext::new("/", Utc::now());
        DialogueController::default().route(message, &session, &catalog, Utc::now(), &mut ScriptedChoices::new())
    }

    #[test]
    fn test_search_reply_lists_results() {
        let reply = route("tell me about phishing");

        assert_eq!(reply.intent, Intent::Search);
        assert!(reply.text.starts_with("SEARCH RESULTS for \"phishing\""));
        assert!(reply.text.contains("1. Intro to Phishing (CyberScams, 2023)"));
        assert_eq!(reply.suggestions.len(), 1);
        assert!(reply.navigation.is_none());
        let action = reply.action.unwrap();
        assert_eq!(action.kind, ActionKind::Search);
        assert_eq!(action.target, "phishing");
    }

    #[test]
    fn test_search_without_results() {
        let reply = route("search for underwater basket weaving");

        assert_eq!(reply.intent, Intent::Search);
        assert!(reply.text.contains("couldn't find"));
        assert!(reply.suggestions.is_empty());
    }

    #[test]
    fn test_topic_reply_navigates_after_topic_delay() {
        let reply = route("what is phishing?");

        assert_eq!(reply.intent, Intent::Topic(TopicKind::Security));
        assert!(reply.text.contains("Taking you to the"));
        assert_eq!(reply.suggestions.len(), 3);
        let navigation = reply.navigation.unwrap();
        assert_eq!(navigation.destination.path(), "/cyber-scams");
        assert_eq!(navigation.delay, std::time::Duration::from_millis(2000));
    }

    #[test]
    fn test_navigation_reply() {
        let reply = route("please open the video library");

        assert_eq!(reply.intent, Intent::Navigation(Destination::Videos));
        let navigation = reply.navigation.unwrap();
        assert_eq!(navigation.destination.path(), "/videos");
        assert_eq!(navigation.delay, std::time::Duration::from_millis(1000));
        let action = reply.action.unwrap();
        assert_eq!(action.kind, ActionKind::Navigate);
        assert_eq!(action.target, "/videos");
    }

    #[test]
    fn test_session_summary_reply_uses_context() {
        let catalog = builtin_catalog();
        let start = Utc::now();
        let mut session = SessionContext::new("/", start);
        session.record_visit("/software");
        session.record_visit("/videos");

        let reply = DialogueController::default().route(
            "how am I doing?",
            &session,
            &catalog,
            start + Duration::minutes(12),
            &mut ScriptedChoices::new(),
        );
        assert_eq!(reply.intent, Intent::SessionSummary);
        assert!(reply.text.contains("3 pages in the last 12 minutes"));
    }

    #[test]
    fn test_builder_replies_carry_builder_action() {
        let reply = route("I need a resume");
        assert_eq!(reply.intent, Intent::BuilderGeneral);
        assert_eq!(reply.action.unwrap().kind, ActionKind::Builder);

        let reply = route("which skills should my cv list");
        assert_eq!(reply.intent, Intent::StructuredBuilder(BuilderSection::Skills));
        assert_eq!(reply.action.unwrap().target, "skills");
    }

    #[test]
    fn test_fallback_attaches_search_suggestions() {
        let reply = route("interview tips");
        assert_eq!(reply.intent, Intent::Fallback);
        assert!(!reply.suggestions.is_empty());
        assert!(reply.suggestions.iter().any(|item| item.id == "cr-002"));
        assert!(reply.navigation.is_none());

        let reply = route("good morning");
        assert_eq!(reply.intent, Intent::Fallback);
        assert!(reply.suggestions.is_empty());
        assert!(!reply.text.is_empty());
    }

    #[test]
    fn test_reply_text_is_never_empty() {
        let messages = vec![
            "",
            "hello",
            "asdkjh",
            "help",
            "find",
            "go to",
            "tell me about react",
            "what is chatgpt",
            "my resume education section",
            "summary",
            "👋👋",
        ];
        for message in messages {
            let reply = route(message);
            assert!(!reply.text.trim().is_empty(), "Empty reply for '{}'", message);
            assert!(reply.suggestions.len() <= 3);
        }
    }
}
