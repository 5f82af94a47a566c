//! Topic Detection using keyword sets.
//!
//! A message belongs to a topic when it contains any keyword of that topic
//! (case-insensitive substring, so "attacker" matches "attack"). Topics are
//! checked in [`TopicKind::PRIORITY`] order and the first match wins.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::catalog::Catalog;
use crate::models::ContentItem;

use super::keywords::NormalizedMessage;
use super::routes::Destination;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TopicKind {
    Security,
    Software,
    ArtificialIntelligence,
}

const SECURITY_KEYWORDS: &[&str] = &[
    "scam",
    "fraud",
    "phishing",
    "hack",
    "attack",
    "malware",
    "ransomware",
    "virus",
    "identity theft",
    "cyber",
    "password",
    " otp",
    "spam",
    "suspicious",
];

const SOFTWARE_KEYWORDS: &[&str] = &[
    "programming",
    "coding",
    " code ",
    "developer",
    "software",
    "javascript",
    "python",
    "react",
    "web development",
    "algorithm",
    "debug",
];

const AI_KEYWORDS: &[&str] = &[
    "artificial intelligence",
    "machine learning",
    "deep learning",
    "neural network",
    "chatgpt",
    " llm",
    " ai ",
    "prompt engineering",
];

const SECURITY_TIPS: &[&str] = &[
    "Never share OTPs, PINs or passwords, not even with someone claiming to be your bank.",
    "Check the sender's address and hover over links before clicking them.",
    "Be wary of urgent messages promising prizes, refunds or jobs.",
    "Turn on two-factor authentication for email, banking and social media.",
    "Report suspected fraud to your bank and the national cyber crime helpline right away.",
];

const SOFTWARE_TOPICS: &[&str] = &[
    "Programming fundamentals with Python",
    "Web development with JavaScript and React",
    "Version control with Git",
    "Data structures and algorithms",
    "Backend APIs and databases",
];

const AI_TOPICS: &[&str] = &[
    "How machine learning models learn from data",
    "Neural networks and deep learning",
    "Prompt engineering for AI assistants",
    "Using AI tools responsibly",
];

impl TopicKind {
    /// Detection order. Keyword sets are not guaranteed disjoint.
    pub const PRIORITY: [TopicKind; 3] = [
        TopicKind::Security,
        TopicKind::Software,
        TopicKind::ArtificialIntelligence,
    ];

    pub fn keywords(self) -> &'static [&'static str] {
        match self {
            TopicKind::Security => SECURITY_KEYWORDS,
            TopicKind::Software => SOFTWARE_KEYWORDS,
            TopicKind::ArtificialIntelligence => AI_KEYWORDS,
        }
    }

    /// Catalog category holding this topic's content.
    pub fn category(self) -> &'static str {
        match self {
            TopicKind::Security => "CyberScams",
            TopicKind::Software => "Software",
            TopicKind::ArtificialIntelligence => "AI",
        }
    }

    /// Page dedicated to the topic.
    pub fn destination(self) -> Destination {
        match self {
            TopicKind::Security => Destination::CyberScams,
            TopicKind::Software => Destination::Software,
            TopicKind::ArtificialIntelligence => Destination::ArtificialIntelligence,
        }
    }

    pub fn label(self) -> &'static str {
        self.destination().label()
    }

    /// Canned text shown with the topic reply: safety tips or a topic list.
    pub fn supplementary(self) -> &'static [&'static str] {
        match self {
            TopicKind::Security => SECURITY_TIPS,
            TopicKind::Software => SOFTWARE_TOPICS,
            TopicKind::ArtificialIntelligence => AI_TOPICS,
        }
    }
}

impl fmt::Display for TopicKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// A detected topic with its catalog subset and canned content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TopicBundle<'a> {
    pub kind: TopicKind,
    /// Items of the topic's category, in catalog order.
    pub items: Vec<&'a ContentItem>,
    pub supplementary: &'static [&'static str],
}

#[derive(Debug, Default, Clone, Copy)]
pub struct TopicDetector;

impl TopicDetector {
    pub fn new() -> Self {
        Self
    }

    /// Classifies a message into a topic, without touching the catalog.
    pub fn detect_kind(&self, message: &NormalizedMessage) -> Option<TopicKind> {
        TopicKind::PRIORITY
            .into_iter()
            .find(|kind| message.contains_any(kind.keywords()))
    }

    /// Classifies a message and gathers the topic bundle.
    pub fn detect<'a>(&self, message: &str, catalog: &'a Catalog) -> Option<TopicBundle<'a>> {
        let normalized = NormalizedMessage::new(message);
        self.detect_kind(&normalized)
            .map(|kind| self.bundle(kind, catalog))
    }

    pub fn bundle<'a>(&self, kind: TopicKind, catalog: &'a Catalog) -> TopicBundle<'a> {
        TopicBundle {
            kind,
            items: catalog.in_category(kind.category()),
            supplementary: kind.supplementary(),
        }
    }
}
