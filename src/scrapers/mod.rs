//! Keyword-driven scraping of outlet pages and their linked articles.
//!
//! The pipeline runs in three stages, one outlet at a time:
//!
//! 1. **Fetch** ([`fetch`]): single HTTP GET per page, failures carried as
//!    values rather than raised
//! 2. **Locate** ([`outlet`] + [`dom`]): scan text nodes for keyword
//!    matches and resolve each to the nearest enclosing hyperlink as an
//!    absolute URL
//! 3. **Aggregate** ([`outlet`] + [`article`]): fetch each discovered
//!    article URL once per outlet and reduce it to whitespace-normalized
//!    paragraph text
//!
//! Everything is sequential: one fetch in flight at a time, and the first
//! outlet finishes completely before the second begins.

pub mod article;
pub mod dom;
pub mod fetch;
pub mod outlet;
