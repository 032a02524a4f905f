//! Data models for keyword-driven coverage scraping.
//!
//! This module defines the structures threaded through the pipeline:
//! - [`SearchTerm`]: a case-insensitive keyword matcher supplied by the caller
//! - [`KeywordHit`]: a single keyword match located on an outlet page
//! - [`ArticleMap`]: per-outlet mapping from article URL to extracted text
//! - [`CoverageMap`]: mapping from outlet root URL to its [`ArticleMap`]
//! - [`CoverageReport`] / [`ErrorReport`]: the response boundary
//!
//! `ArticleMap` and `CoverageMap` keep their keys in insertion order because
//! discovery order is meaningful downstream (article blocks are serialized
//! into the analysis prompt in the order they were found).

use regex::{Regex, RegexBuilder};
use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};

/// A case-insensitive literal or phrase to match against page text.
///
/// The pattern is the escaped literal, so regex metacharacters in user
/// input match themselves.
#[derive(Debug, Clone)]
pub struct SearchTerm {
    raw: String,
    matcher: Regex,
}

impl SearchTerm {
    pub fn new(raw: &str) -> Self {
        let raw = raw.trim().to_string();
        let matcher = RegexBuilder::new(&regex::escape(&raw))
            .case_insensitive(true)
            .build()
            .expect("escaped literal is a valid pattern");
        Self { raw, matcher }
    }

    pub fn is_match(&self, text: &str) -> bool {
        self.matcher.is_match(text)
    }

    pub fn as_str(&self) -> &str {
        &self.raw
    }
}

/// Split a comma-delimited keyword string into search terms.
///
/// Terms are trimmed; empty fragments (doubled commas, trailing commas,
/// whitespace-only input) are dropped. An empty result means the caller
/// supplied no usable keywords and must be rejected at the boundary.
pub fn parse_search_terms(raw: &str) -> Vec<SearchTerm> {
    raw.split(',')
        .map(str::trim)
        .filter(|term| !term.is_empty())
        .map(SearchTerm::new)
        .collect()
}

/// A keyword match located on an outlet page.
///
/// `link` is the absolute URL of the nearest enclosing hyperlink, when one
/// exists. Matches without a link are diagnostic-only and never contribute
/// an article fetch.
#[derive(Debug, Clone)]
pub struct KeywordHit {
    /// The search term that matched.
    pub term: String,
    /// Absolute article URL resolved from the nearest hyperlink ancestor.
    pub link: Option<String>,
    /// Raw text of the matched node, trimmed.
    pub context: String,
}

/// Insertion-ordered mapping from article URL to extracted text.
///
/// Presence of a URL as a key is the fetch memo: [`scrape_outlet`] checks
/// [`ArticleMap::contains`] before fetching, and [`ArticleMap::insert`]
/// keeps the first write for a key. Serializes as a JSON object in
/// discovery order.
///
/// [`scrape_outlet`]: crate::scrapers::outlet::scrape_outlet
#[derive(Debug, Clone, Default)]
pub struct ArticleMap {
    entries: Vec<(String, String)>,
}

impl ArticleMap {
    pub fn contains(&self, url: &str) -> bool {
        self.entries.iter().any(|(key, _)| key == url)
    }

    /// Insert an article, keeping the existing entry if the URL is already
    /// present. Returns whether the entry was added.
    pub fn insert(&mut self, url: String, content: String) -> bool {
        if self.contains(&url) {
            return false;
        }
        self.entries.push((url, content));
        true
    }

    pub fn get(&self, url: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(key, _)| key == url)
            .map(|(_, content)| content.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries
            .iter()
            .map(|(url, content)| (url.as_str(), content.as_str()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Serialize for ArticleMap {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (url, content) in &self.entries {
            map.serialize_entry(url, content)?;
        }
        map.end()
    }
}

/// Insertion-ordered mapping from outlet root URL to its [`ArticleMap`].
///
/// Built incrementally, one outlet at a time, and consumed once by the
/// analysis stage. Memoization is per outlet: the same article URL under
/// two different outlets is fetched for each.
#[derive(Debug, Clone, Default)]
pub struct CoverageMap {
    outlets: Vec<(String, ArticleMap)>,
}

impl CoverageMap {
    /// Fetch the outlet's article map, creating an empty one on first use.
    pub fn outlet_mut(&mut self, outlet_url: &str) -> &mut ArticleMap {
        let index = match self.outlets.iter().position(|(url, _)| url == outlet_url) {
            Some(index) => index,
            None => {
                self.outlets
                    .push((outlet_url.to_string(), ArticleMap::default()));
                self.outlets.len() - 1
            }
        };
        &mut self.outlets[index].1
    }

    pub fn outlet(&self, outlet_url: &str) -> Option<&ArticleMap> {
        self.outlets
            .iter()
            .find(|(url, _)| url == outlet_url)
            .map(|(_, articles)| articles)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &ArticleMap)> {
        self.outlets
            .iter()
            .map(|(url, articles)| (url.as_str(), articles))
    }

    pub fn len(&self) -> usize {
        self.outlets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.outlets.is_empty()
    }
}

impl Serialize for CoverageMap {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.outlets.len()))?;
        for (url, articles) in &self.outlets {
            map.serialize_entry(url, articles)?;
        }
        map.end()
    }
}

/// The successful response boundary: both outlets' article maps plus the
/// unwrapped analysis text.
#[derive(Debug, Serialize)]
pub struct CoverageReport {
    pub first: OutletCoverage,
    pub second: OutletCoverage,
    pub analysis: String,
}

/// One outlet's scraped articles, labeled with its root URL.
#[derive(Debug, Clone, Default, Serialize)]
pub struct OutletCoverage {
    pub outlet: String,
    pub articles: ArticleMap,
}

impl CoverageReport {
    /// Assemble the response from the populated coverage map.
    ///
    /// An outlet with no entry (never scraped, or scraped with zero
    /// discoveries) is reported with an empty article map.
    pub fn assemble(
        coverage: &CoverageMap,
        first_outlet: &str,
        second_outlet: &str,
        analysis: String,
    ) -> Self {
        let articles_for =
            |outlet: &str| -> ArticleMap { coverage.outlet(outlet).cloned().unwrap_or_default() };
        Self {
            first: OutletCoverage {
                outlet: first_outlet.to_string(),
                articles: articles_for(first_outlet),
            },
            second: OutletCoverage {
                outlet: second_outlet.to_string(),
                articles: articles_for(second_outlet),
            },
            analysis,
        }
    }
}

/// The failure response boundary: an error description and nothing else.
#[derive(Debug, Serialize)]
pub struct ErrorReport {
    pub error: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_parse_search_terms_trims_and_drops_empties() {
        let terms = parse_search_terms(" flood , , wildfire,  ,storm ");
        let raw: Vec<&str> = terms.iter().map(|t| t.as_str()).collect();
        assert_eq!(raw, vec!["flood", "wildfire", "storm"]);
    }

    #[test]
    fn test_parse_search_terms_empty_input() {
        assert!(parse_search_terms("").is_empty());
        assert!(parse_search_terms(" , ,, ").is_empty());
    }

    #[test]
    fn test_search_term_is_case_insensitive() {
        let term = SearchTerm::new("Flood");
        assert!(term.is_match("FLOOD warnings issued"));
        assert!(term.is_match("severe flooding"));
        assert!(!term.is_match("drought"));
    }

    #[test]
    fn test_search_term_escapes_metacharacters() {
        let term = SearchTerm::new("U.S. aid (update)");
        assert!(term.is_match("More U.S. aid (update) expected"));
        assert!(!term.is_match("UXSX aid update"));
    }

    #[test]
    fn test_article_map_first_write_wins() {
        let mut map = ArticleMap::default();
        assert!(map.insert("https://a.test/1".to_string(), "first".to_string()));
        assert!(!map.insert("https://a.test/1".to_string(), "second".to_string()));
        assert_eq!(map.len(), 1);
        assert_eq!(map.get("https://a.test/1"), Some("first"));
    }

    #[test]
    fn test_article_map_preserves_insertion_order() {
        let mut map = ArticleMap::default();
        map.insert("https://a.test/z".to_string(), "z".to_string());
        map.insert("https://a.test/a".to_string(), "a".to_string());
        let urls: Vec<&str> = map.iter().map(|(url, _)| url).collect();
        assert_eq!(urls, vec!["https://a.test/z", "https://a.test/a"]);

        // Serialized object keys keep discovery order, not lexical order.
        let json = serde_json::to_string(&map).unwrap();
        let z = json.find("https://a.test/z").unwrap();
        let a = json.find("https://a.test/a").unwrap();
        assert!(z < a);
    }

    #[test]
    fn test_coverage_map_outlet_mut_is_get_or_insert() {
        let mut coverage = CoverageMap::default();
        coverage
            .outlet_mut("https://a.test")
            .insert("https://a.test/1".to_string(), "one".to_string());
        coverage
            .outlet_mut("https://a.test")
            .insert("https://a.test/2".to_string(), "two".to_string());
        assert_eq!(coverage.len(), 1);
        assert_eq!(coverage.outlet("https://a.test").unwrap().len(), 2);
    }

    #[test]
    fn test_coverage_map_no_cross_outlet_sharing() {
        let mut coverage = CoverageMap::default();
        coverage
            .outlet_mut("https://a.test")
            .insert("https://shared.test/1".to_string(), "a copy".to_string());
        coverage
            .outlet_mut("https://b.test")
            .insert("https://shared.test/1".to_string(), "b copy".to_string());
        assert_eq!(
            coverage
                .outlet("https://a.test")
                .unwrap()
                .get("https://shared.test/1"),
            Some("a copy")
        );
        assert_eq!(
            coverage
                .outlet("https://b.test")
                .unwrap()
                .get("https://shared.test/1"),
            Some("b copy")
        );
    }

    #[test]
    fn test_coverage_report_assemble_missing_outlet_is_empty() {
        let mut coverage = CoverageMap::default();
        coverage
            .outlet_mut("https://a.test")
            .insert("https://a.test/1".to_string(), "text".to_string());

        let report = CoverageReport::assemble(
            &coverage,
            "https://a.test",
            "https://b.test",
            "analysis".to_string(),
        );
        assert_eq!(report.first.articles.len(), 1);
        assert!(report.second.articles.is_empty());
        assert_eq!(report.analysis, "analysis");
    }

    #[test]
    fn test_coverage_report_serialization_shape() {
        let coverage = CoverageMap::default();
        let report = CoverageReport::assemble(
            &coverage,
            "https://a.test",
            "https://b.test",
            "done".to_string(),
        );
        let value = serde_json::to_value(&report).unwrap();
        assert_eq!(value["first"]["outlet"], "https://a.test");
        assert_eq!(value["second"]["outlet"], "https://b.test");
        assert_eq!(value["analysis"], "done");
        assert!(value["first"]["articles"].as_object().unwrap().is_empty());
    }

    #[test]
    fn test_error_report_serialization() {
        let report = ErrorReport {
            error: "boom".to_string(),
        };
        assert_eq!(
            serde_json::to_string(&report).unwrap(),
            r#"{"error":"boom"}"#
        );
    }
}
