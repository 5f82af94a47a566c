//! Static route table.
//!
//! Every destination the assistant can navigate to is a variant of
//! [`Destination`]. `path()` is an exhaustive match, so a destination
//! without a route does not compile.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::keywords::NormalizedMessage;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Destination {
    CyberScams,
    Software,
    ArtificialIntelligence,
    ResumeBuilder,
    Videos,
    About,
    Contact,
    Home,
}

impl Destination {
    /// Resolution order: the first destination whose keywords match wins.
    pub const ALL: [Destination; 8] = [
        Destination::CyberScams,
        Destination::Software,
        Destination::ArtificialIntelligence,
        Destination::ResumeBuilder,
        Destination::Videos,
        Destination::About,
        Destination::Contact,
        Destination::Home,
    ];

    pub fn path(self) -> &'static str {
        match self {
            Destination::CyberScams => "/cyber-scams",
            Destination::Software => "/software",
            Destination::ArtificialIntelligence => "/ai",
            Destination::ResumeBuilder => "/resume-builder",
            Destination::Videos => "/videos",
            Destination::About => "/about",
            Destination::Contact => "/contact",
            Destination::Home => "/",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Destination::CyberScams => "Cyber Scams",
            Destination::Software => "Software Development",
            Destination::ArtificialIntelligence => "Artificial Intelligence",
            Destination::ResumeBuilder => "Resume Builder",
            Destination::Videos => "Video Library",
            Destination::About => "About",
            Destination::Contact => "Contact",
            Destination::Home => "Home",
        }
    }

    fn keywords(self) -> &'static [&'static str] {
        match self {
            Destination::CyberScams => &["cyber", "scam", "security", "fraud"],
            Destination::Software => &["software", "programming", "coding", "developer"],
            Destination::ArtificialIntelligence => &[
                " ai ",
                "artificial intelligence",
                "machine learning",
            ],
            Destination::ResumeBuilder => &["resume", "résumé", " cv ", "builder"],
            Destination::Videos => &["video", "library", "catalog", "catalogue"],
            Destination::About => &[" about "],
            Destination::Contact => &["contact", "support"],
            Destination::Home => &["home", "main page", "start page", "dashboard"],
        }
    }

    /// Finds the destination a message names, in [`Destination::ALL`] order.
    pub fn resolve(message: &NormalizedMessage) -> Option<Destination> {
        Self::ALL
            .into_iter()
            .find(|d| message.contains_any(d.keywords()))
    }

    pub fn from_path(path: &str) -> Option<Destination> {
        Self::ALL.into_iter().find(|d| d.path() == path)
    }
}

impl fmt::Display for Destination {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}
