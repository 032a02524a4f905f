//! Hyperlink-ancestor resolution over a generic DOM node.
//!
//! The keyword locator needs one tree operation: starting from a matched
//! text node, find the nearest enclosing `<a href=…>`. The walk is written
//! against the small [`DomNode`] trait rather than a concrete parser type,
//! so the algorithm is independent of the HTML library's node
//! representation. The only production implementation covers `scraper`'s
//! `ego_tree` node reference.

use ego_tree::NodeRef;
use scraper::Node;

/// Minimal view of a DOM tree node: parent access, element name, and
/// attribute lookup. Non-element nodes (text, comments) report no name and
/// no attributes.
pub trait DomNode: Sized {
    fn parent_node(&self) -> Option<Self>;
    fn tag_name(&self) -> Option<&str>;
    fn attr(&self, name: &str) -> Option<&str>;
}

/// Walk the ancestor chain upward and return the `href` of the nearest
/// enclosing hyperlink, or `None` once the root is passed.
///
/// An `<a>` without an `href` does not terminate the walk; an outer linked
/// anchor can still claim the match. The first hyperlink found wins — there
/// is no scoring across candidates.
pub fn nearest_link_ancestor<N: DomNode>(node: &N) -> Option<String> {
    let mut current = node.parent_node();
    while let Some(ancestor) = current {
        if ancestor.tag_name() == Some("a") {
            if let Some(href) = ancestor.attr("href") {
                return Some(href.to_string());
            }
        }
        current = ancestor.parent_node();
    }
    None
}

impl<'a> DomNode for NodeRef<'a, Node> {
    fn parent_node(&self) -> Option<Self> {
        self.parent()
    }

    fn tag_name(&self) -> Option<&str> {
        match self.value() {
            Node::Element(element) => Some(element.name()),
            _ => None,
        }
    }

    fn attr(&self, name: &str) -> Option<&str> {
        match self.value() {
            Node::Element(element) => element.attr(name),
            _ => None,
        }
    }
}
