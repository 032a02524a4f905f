//! Article content extraction: reduce arbitrary HTML to a flat text blob.
//!
//! Articles are reduced to the visible text of their paragraph-level blocks
//! in document order. No structure (title, byline, date) is recovered —
//! the product is a single whitespace-normalized string per URL.

use crate::scrapers::fetch::fetch_page;
use crate::utils::collapse_whitespace;
use once_cell::sync::Lazy;
use scraper::{Html, Selector};
use tracing::{instrument, warn};

static PARAGRAPH: Lazy<Selector> = Lazy::new(|| Selector::parse("p").unwrap());

/// Fetch a discovered article URL and reduce it to plain text.
///
/// A failed fetch produces the error's display string as the "content";
/// it flows into the coverage map (and the analysis prompt) verbatim, and
/// the scrape moves on to the next URL.
#[instrument(level = "debug")]
pub async fn extract_article_text(url: &str) -> String {
    match fetch_page(url).await {
        Ok(html) => reduce_to_text(&html),
        Err(error) => {
            warn!(%url, %error, "Article fetch failed; storing error text as content");
            error.to_string()
        }
    }
}

/// Concatenate every `<p>` block's text in document order, join with blank
/// lines, then collapse all whitespace runs to single spaces and trim.
///
/// Malformed HTML is tolerated: the parser produces a best-effort tree and
/// whatever paragraphs it yields are used. A page with no paragraphs
/// reduces to the empty string.
pub fn reduce_to_text(html: &str) -> String {
    let document = Html::parse_document(html);
    let blocks = document
        .select(&PARAGRAPH)
        .map(|paragraph| {
            paragraph
                .text()
                .collect::<Vec<_>>()
                .join(" ")
                .trim()
                .to_string()
        })
        .collect::<Vec<_>>();
    collapse_whitespace(&blocks.join("\n\n"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_reduce_joins_paragraphs_in_document_order() {
        let html = "<html><body>\
            <p>First paragraph.</p>\
            <div><p>Second, nested.</p></div>\
            <p>Third.</p>\
            </body></html>";
        assert_eq!(
            reduce_to_text(html),
            "First paragraph. Second, nested. Third."
        );
    }

    #[test]
    fn test_reduce_normalizes_whitespace() {
        let html = "<p>  spaced\n\n\tout   text </p><p>and more</p>";
        let reduced = reduce_to_text(html);
        assert!(!reduced.contains('\n'));
        assert!(!reduced.contains("  "));
        assert_eq!(reduced, "spaced out text and more");
    }

    #[test]
    fn test_reduce_ignores_non_paragraph_content() {
        let html = "<h1>Headline</h1><p>Body text.</p><footer>footer junk</footer>";
        assert_eq!(reduce_to_text(html), "Body text.");
    }

    #[test]
    fn test_reduce_collects_inline_children() {
        let html = r#"<p>Aid reached <a href="/x">the <b>flooded</b> region</a> today.</p>"#;
        assert_eq!(reduce_to_text(html), "Aid reached the flooded region today.");
    }

    #[test]
    fn test_reduce_empty_and_paragraphless_pages() {
        assert_eq!(reduce_to_text(""), "");
        assert_eq!(reduce_to_text("<div>no paragraphs here</div>"), "");
    }

    #[test]
    fn test_reduce_tolerates_malformed_html() {
        let html = "<p>unclosed first<p>second</p><b>dangling";
        assert_eq!(reduce_to_text(html), "unclosed first second");
    }
}
