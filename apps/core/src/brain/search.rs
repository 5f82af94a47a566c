//! Relevance Search - weighted substring scoring over the catalog.
//!
//! No fuzzy matching, no stemming: a field either contains the query
//! (case-insensitive) or it does not. Results are ordered by score with a
//! stable sort, so equal scores keep catalog order.

use serde::Serialize;

use crate::catalog::{Catalog, ItemIndex};
use crate::models::ContentItem;

use super::keywords::extract_terms;

pub const TITLE_WEIGHT: u32 = 3;
pub const DESCRIPTION_WEIGHT: u32 = 2;
pub const CATEGORY_WEIGHT: u32 = 2;
pub const KEYWORD_WEIGHT: u32 = 1;

/// A catalog item with a positive relevance score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SearchHit<'a> {
    pub item: &'a ContentItem,
    pub score: u32,
}

fn score_item(needle: &str, idx: &ItemIndex) -> u32 {
    let mut score = 0;
    if idx.title.contains(needle) {
        score += TITLE_WEIGHT;
    }
    if idx.description.contains(needle) {
        score += DESCRIPTION_WEIGHT;
    }
    if idx.category.contains(needle) {
        score += CATEGORY_WEIGHT;
    }
    if idx.keywords.iter().any(|k| k.contains(needle)) {
        score += KEYWORD_WEIGHT;
    }
    score
}

fn rank<'a>(catalog: &'a Catalog, scorer: impl Fn(&ItemIndex) -> u32) -> Vec<SearchHit<'a>> {
    let mut hits: Vec<SearchHit<'a>> = catalog
        .indexed()
        .filter_map(|(item, idx)| {
            let score = scorer(idx);
            (score > 0).then_some(SearchHit { item, score })
        })
        .collect();
    // `sort_by` is stable: ties stay in catalog order.
    hits.sort_by(|a, b| b.score.cmp(&a.score));
    hits
}

/// Scores every item against `query` and returns the matches, best first.
///
/// A blank query matches nothing.
pub fn search<'a>(query: &str, catalog: &'a Catalog) -> Vec<SearchHit<'a>> {
    let needle = query.trim().to_lowercase();
    if needle.is_empty() {
        return Vec::new();
    }
    rank(catalog, |idx| score_item(&needle, idx))
}

/// Like [`search`], but each item's score is the sum of its per-term scores.
pub fn search_terms<'a>(terms: &[String], catalog: &'a Catalog) -> Vec<SearchHit<'a>> {
    let needles: Vec<String> = terms
        .iter()
        .map(|t| t.trim().to_lowercase())
        .filter(|t| !t.is_empty())
        .collect();
    if needles.is_empty() {
        return Vec::new();
    }
    rank(catalog, |idx| needles.iter().map(|n| score_item(n, idx)).sum())
}

/// Searches the phrase as a whole first, then falls back to its terms.
pub fn best_effort<'a>(text: &str, catalog: &'a Catalog) -> Vec<SearchHit<'a>> {
    let hits = search(text, catalog);
    if !hits.is_empty() {
        return hits;
    }
    search_terms(&extract_terms(text), catalog)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(id: &str, title: &str, category: &str, description: Option<&str>, keywords: &[&str]) -> ContentItem {
        ContentItem {
            id: id.to_string(),
            title: title.to_string(),
            category: category.to_string(),
            description: description.map(str::to_string),
            keywords: keywords.iter().map(|k| k.to_string()).collect(),
            year: None,
        }
    }

    fn two_item_catalog() -> Catalog {
        Catalog::new(vec![
            item("1", "Intro to Phishing", "CyberScams", None, &[]),
            item("2", "React Basics", "Software", None, &[]),
        ])
        .unwrap()
    }

    #[test]
    fn test_phishing_scenario() {
        let catalog = two_item_catalog();
        let hits = search("phishing", &catalog);

        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].item.title, "Intro to Phishing");
        assert_eq!(hits[0].score, 3);
    }

    #[test]
    fn test_weights_are_additive() {
        let catalog = Catalog::new(vec![item(
            "1",
            "Scam alerts",
            "CyberScams",
            Some("Latest scam patterns"),
            &["scam", "fraud"],
        )])
        .unwrap();

        let hits = search("SCAM", &catalog);
        assert_eq!(hits[0].score, TITLE_WEIGHT + DESCRIPTION_WEIGHT + CATEGORY_WEIGHT + KEYWORD_WEIGHT);
    }

    #[test]
    fn test_keyword_counts_once() {
        let catalog = Catalog::new(vec![item("1", "Other", "X", None, &["python", "python basics"])]).unwrap();
        assert_eq!(search("python", &catalog)[0].score, KEYWORD_WEIGHT);
    }

    #[test]
    fn test_ties_keep_catalog_order() {
        let catalog = Catalog::new(vec![
            item("a", "Alpha", "Software", None, &[]),
            item("b", "Beta", "Software", None, &[]),
            item("c", "Software Gamma", "Other", None, &[]),
            item("d", "Delta", "Software", None, &[]),
        ])
        .unwrap();

        let ids: Vec<&str> = search("software", &catalog).iter().map(|h| h.item.id.as_str()).collect();
        assert_eq!(ids, vec!["c", "a", "b", "d"]);
    }

    #[test]
    fn test_blank_query_matches_nothing() {
        let catalog = two_item_catalog();
        assert!(search("", &catalog).is_empty());
        assert!(search("   ", &catalog).is_empty());
    }

    #[test]
    fn test_search_terms_sums_scores() {
        let catalog = two_item_catalog();
        let hits = search_terms(&["react".to_string(), "phishing".to_string()], &catalog);

        assert_eq!(hits.len(), 2);
        assert!(hits.iter().all(|h| h.score == TITLE_WEIGHT));
        assert_eq!(hits[0].item.id, "1");
    }

    #[test]
    fn test_best_effort_falls_back_to_terms() {
        let catalog = two_item_catalog();

        assert!(search("phishing videos please", &catalog).is_empty());
        let hits = best_effort("phishing videos please", &catalog);
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].item.id, "1");
    }
}
