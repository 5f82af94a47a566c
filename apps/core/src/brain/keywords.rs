//! Keyword tables and message normalization.
//!
//! All matching is case-insensitive substring containment. Messages are
//! lowercased and padded with a space on both sides, so a table entry such
//! as `" cv "` matches the whole word while `"scam"` still matches "scams".

use std::collections::HashSet;
use std::sync::LazyLock;

/// Resume builder domain (keyword group A).
pub const BUILDER_TERMS: &[&str] = &[
    "resume",
    "résumé",
    " cv ",
    "curriculum vitae",
    "builder",
];

pub const EXPERIENCE_TERMS: &[&str] = &[
    "experience",
    "work history",
    "job history",
    "employment",
    "internship",
];

pub const SKILL_TERMS: &[&str] = &["skill"];

pub const EDUCATION_TERMS: &[&str] = &[
    "education",
    "degree",
    "school",
    "college",
    "university",
    "certification",
];

pub const SUMMARY_HELP_TERMS: &[&str] = &["summary", "objective", "profile statement", "about me"];

pub const OPTIMIZATION_TERMS: &[&str] = &[
    "optimize",
    "optimise",
    "improve",
    " ats ",
    "stand out",
    "better",
];

pub const NAVIGATION_VERBS: &[&str] = &[" go to ", " open ", "navigate", " take me to ", " bring me to "];

pub const SEARCH_VERBS: &[&str] = &[
    " find ",
    "search",
    "show me",
    "tell me about",
    "look for",
    "looking for",
];

pub const SESSION_SUMMARY_TERMS: &[&str] = &[
    "progress",
    "summary",
    "learned",
    "learnt",
    "how am i doing",
    "my stats",
];

pub const HELP_TERMS: &[&str] = &[
    "help",
    "what can you do",
    "capabilities",
    "features",
    "how does this work",
];

/// Words ignored when a search phrase is split into terms.
const STOPWORDS: &[&str] = &[
    "the", "a", "an", "and", "or", "but", "for", "to", "of", "in", "on", "at", "by", "with",
    "about", "from", "me", "my", "i", "you", "your", "we", "it", "is", "are", "was", "be",
    "some", "any", "all", "this", "that", "these", "those", "please", "can", "could", "would",
    "want", "need", "like", "learn", "video", "videos", "course", "courses", "tutorial",
    "tutorials", "what", "how", "why", "who", "there", "here", "hello", "hi", "hey", "thanks",
];

static STOPWORD_SET: LazyLock<HashSet<&'static str>> =
    LazyLock::new(|| STOPWORDS.iter().copied().collect());

const MIN_TERM_LENGTH: usize = 2;

/// A user message prepared for keyword matching.
#[derive(Debug, Clone)]
pub struct NormalizedMessage {
    lower: String,
    padded: String,
}

impl NormalizedMessage {
    pub fn new(message: &str) -> Self {
        let lower = message.trim().to_lowercase();
        // Punctuation becomes whitespace so "resume?" still hits " cv "-style entries.
        let spaced: String = lower
            .chars()
            .map(|c| if c.is_alphanumeric() || c == '\'' { c } else { ' ' })
            .collect();
        let padded = format!(" {} ", spaced.split_whitespace().collect::<Vec<_>>().join(" "));
        Self { lower, padded }
    }

    /// Lowercased, trimmed message.
    pub fn as_str(&self) -> &str {
        &self.lower
    }

    pub fn is_empty(&self) -> bool {
        self.lower.is_empty()
    }

    pub fn contains(&self, keyword: &str) -> bool {
        self.padded.contains(keyword) || self.lower.contains(keyword)
    }

    pub fn contains_any(&self, keywords: &[&str]) -> bool {
        keywords.iter().any(|k| self.contains(k))
    }

    pub fn first_match<'k>(&self, keywords: &[&'k str]) -> Option<&'k str> {
        keywords.iter().copied().find(|k| self.contains(k))
    }
}

/// Splits free text into lowercase search terms, dropping stopwords,
/// duplicates and very short tokens. Order of first appearance is kept.
pub fn extract_terms(text: &str) -> Vec<String> {
    let mut seen = HashSet::new();
    text.to_lowercase()
        .split(|c: char| !c.is_alphanumeric() && c != '-' && c != '+' && c != '.')
        .map(|word| word.trim_matches(|c: char| c == '-' || c == '.'))
        .filter(|word| {
            word.chars().count() >= MIN_TERM_LENGTH
                && !STOPWORD_SET.contains(word)
                && !word.chars().all(|c| c.is_numeric())
        })
        .filter(|word| seen.insert(word.to_string()))
        .map(str::to_string)
        .collect()
}
