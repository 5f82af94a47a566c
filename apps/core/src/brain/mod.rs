//! # Brain Module
//!
//! Rule-based dialogue engine. Every function here is pure over the catalog
//! and the incoming text; session state lives in the actors.
//!
//! ## Components
//! - `keywords`: message normalization, keyword tables, term extraction
//! - `search`: weighted relevance ranking over the catalog
//! - `topic`: topic detection and content bundles
//! - `routes`: navigable pages
//! - `intent`: ordered intent rules
//! - `templates`: canned reply text
//! - `dialogue`: turns a message into a reply

pub mod dialogue;
pub mod intent;
pub mod keywords;
pub mod routes;
pub mod search;
pub mod templates;
pub mod topic;

// Re-export main types for convenience
pub use dialogue::{extract_search_query, DialogueController, DialogueSettings, Navigation, Reply};
pub use intent::{BuilderSection, Intent, IntentClassifier, IntentMatch, IntentRule};
pub use keywords::{extract_terms, NormalizedMessage};
pub use routes::Destination;
pub use search::{search, search_terms, SearchHit};
pub use topic::{TopicBundle, TopicDetector, TopicKind};
