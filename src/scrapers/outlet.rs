//! Outlet page scraping: locate keyword matches, resolve them to article
//! links, and aggregate extracted article text per outlet.
//!
//! This is the discovery half of the pipeline. For each search term, every
//! text node of the outlet page is scanned in document order; a matching
//! node is resolved to the nearest enclosing hyperlink and that target is
//! fetched at most once per outlet (keyed by its absolute URL). Matches
//! with no enclosing hyperlink are logged and dropped.

use crate::models::{CoverageMap, KeywordHit, SearchTerm};
use crate::scrapers::article::extract_article_text;
use crate::scrapers::dom::nearest_link_ancestor;
use crate::scrapers::fetch::fetch_page;
use crate::utils::truncate_for_log;
use scraper::{Html, Node};
use tracing::{debug, info, instrument, warn};
use url::Url;

/// Find every keyword match on a parsed outlet page.
///
/// Terms are processed in caller order; within a term, text nodes are
/// visited in document order, so the returned hits (and therefore article
/// discovery order) are deterministic for a given page. Hyperlink targets
/// are resolved against `page_url` into absolute URLs; a target that does
/// not resolve is demoted to an unlinked hit. A term that matches nothing
/// contributes nothing.
pub fn locate_keyword_hits(
    document: &Html,
    page_url: &Url,
    terms: &[SearchTerm],
) -> Vec<KeywordHit> {
    let mut hits = Vec::new();
    for term in terms {
        let before = hits.len();
        for node in document.tree.root().descendants() {
            let Node::Text(text) = node.value() else {
                continue;
            };
            if !term.is_match(text) {
                continue;
            }
            let link = nearest_link_ancestor(&node).and_then(|href| {
                match page_url.join(&href) {
                    Ok(resolved) => Some(resolved.to_string()),
                    Err(error) => {
                        warn!(%href, %error, "Matched link target does not resolve; treating as unlinked");
                        None
                    }
                }
            });
            hits.push(KeywordHit {
                term: term.as_str().to_string(),
                link,
                context: text.trim().to_string(),
            });
        }
        if hits.len() == before {
            debug!(term = term.as_str(), page = %page_url, "Search term not found on page");
        }
    }
    hits
}

/// Scrape one outlet page into the shared coverage map.
///
/// The outlet's article map is created (empty) before anything else, so a
/// failed outlet fetch still leaves the outlet present in the response.
/// Discovered article URLs are fetched sequentially, each at most once per
/// outlet; a URL already present in this outlet's map is skipped. Never
/// fails — every failure mode degrades to a diagnostic or placeholder
/// content.
#[instrument(level = "info", skip(terms, coverage), fields(outlet = %outlet_url))]
pub async fn scrape_outlet(outlet_url: &Url, terms: &[SearchTerm], coverage: &mut CoverageMap) {
    let articles = coverage.outlet_mut(outlet_url.as_str());

    let html = match fetch_page(outlet_url.as_str()).await {
        Ok(html) => html,
        Err(error) => {
            warn!(%error, "Failed to retrieve the outlet page; leaving outlet empty");
            return;
        }
    };

    // Parse and locate synchronously; only owned hits cross the awaits below.
    let hits = {
        let document = Html::parse_document(&html);
        locate_keyword_hits(&document, outlet_url, terms)
    };
    info!(hits = hits.len(), "Located keyword matches");

    for hit in hits {
        match hit.link {
            Some(link) => {
                debug!(
                    term = %hit.term,
                    %link,
                    context = %truncate_for_log(&hit.context, 100),
                    "Search term found in link"
                );
                if articles.contains(&link) {
                    continue;
                }
                let content = extract_article_text(&link).await;
                info!(
                    %link,
                    preview = %truncate_for_log(&content, 200),
                    "Extracted article text"
                );
                articles.insert(link, content);
            }
            None => {
                info!(
                    term = %hit.term,
                    context = %truncate_for_log(&hit.context, 100),
                    "Search term found, but not in a link"
                );
            }
        }
    }
    info!(articles = articles.len(), "Outlet scrape complete");
}
