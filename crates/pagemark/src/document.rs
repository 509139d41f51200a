//! A document snapshot: the node tree plus the location it was loaded from.

use url::Url;

use crate::node::Node;
use crate::tag::Tag;
use crate::Result;

/// The tree the extractor walks, together with the page location used to
/// absolutize links and pick site-specific behavior.
#[derive(Debug, Clone)]
pub struct Document {
    root: Node,
    url: Option<Url>,
}

impl Document {
    pub fn new(root: Node, url: Option<Url>) -> Self {
        Self { root, url }
    }

    /// Parse an HTML string, validating the page URL if one is given.
    #[cfg(feature = "html")]
    pub fn parse(html: &str, url: Option<&str>) -> Result<Self> {
        let url = url.map(Url::parse).transpose()?;
        Ok(Self::new(crate::html::parse_document(html), url))
    }

    pub fn root(&self) -> &Node {
        &self.root
    }

    pub fn url(&self) -> Option<&Url> {
        self.url.as_ref()
    }

    /// Host name of the page location, lowercase
    pub fn host(&self) -> Option<String> {
        self.url
            .as_ref()
            .and_then(Url::host_str)
            .map(str::to_ascii_lowercase)
    }

    /// The first `<body>` element, or the root when there is none
    pub fn body(&self) -> &Node {
        find_first(&self.root, &|n: &Node| n.tag() == Tag::Body).unwrap_or(&self.root)
    }

    /// Whether `node` is the node [`Document::body`] returns
    pub fn is_body(&self, node: &Node) -> bool {
        std::ptr::eq(self.body(), node)
    }

    /// Location used to resolve relative references.
    ///
    /// A `<base href>` element takes precedence over the page URL.
    pub fn base_url(&self) -> Option<Url> {
        let base_href = find_first(&self.root, &|n: &Node| n.tag_name() == "base" && n.has_attr("href"))
            .and_then(|n| n.attr("href"));

        match (base_href, &self.url) {
            (Some(href), Some(url)) => url.join(href).ok().or_else(|| Some(url.clone())),
            (Some(href), None) => Url::parse(href).ok(),
            (None, url) => url.clone(),
        }
    }
}

/// Depth-first, document-order search
pub(crate) fn find_first<'a>(node: &'a Node, pred: &dyn Fn(&Node) -> bool) -> Option<&'a Node> {
    if node.is_element() && pred(node) {
        return Some(node);
    }
    node.children().find_map(|child| find_first(child, pred))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn page() -> Node {
        Node::element("html")
            .with_child(
                Node::element("head")
                    .with_child(Node::element_with_attrs("base", vec![("href", "/docs/")])),
            )
            .with_child(Node::element("body").with_child(Node::text("hi")))
    }

    #[test]
    fn test_body_lookup() {
        let doc = Document::new(page(), None);
        assert_eq!(doc.body().tag(), Tag::Body);
        assert!(doc.is_body(doc.body()));
        assert!(!doc.is_body(doc.root()));

        let bare = Document::new(Node::element("div"), None);
        assert!(bare.is_body(bare.root()));
    }

    #[test]
    fn test_base_url_prefers_base_element() {
        let url = Url::parse("https://example.com/a/b.html").ok();
        let doc = Document::new(page(), url);
        assert_eq!(
            doc.base_url().map(|u| u.to_string()).as_deref(),
            Some("https://example.com/docs/")
        );
        assert_eq!(doc.host().as_deref(), Some("example.com"));
    }

    #[test]
    fn test_base_url_without_location() {
        let doc = Document::new(page(), None);
        assert!(doc.base_url().is_none());
    }
}
