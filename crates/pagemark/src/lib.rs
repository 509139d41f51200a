//! # pagemark
//!
//! Extract the main content of a web page as Markdown, with MathML and
//! LaTeX-looking text turned into LaTeX.
//!
//! ## Design
//!
//! The extractor walks a CDP-style DOM Node structure instead of an HTML
//! string. A host holding a live DOM converts it once (optionally with a
//! computed-style snapshot per element); the `html` feature builds the same
//! structure from a string with scraper.
//!
//! Extraction runs in four passes:
//!
//! - **Locate** the subtree most likely to hold the primary content
//! - **Filter** navigation, ads, widgets and hidden elements while walking
//! - **Render** every element through a rule table into Markdown fragments
//! - **Clean up** spacing and Markdown artifacts of the concatenated output
//!
//! ## Example (Node-based)
//!
//! ```rust
//! use pagemark::{Document, Extractor, Node};
//!
//! let article = Node::element("article")
//!     .with_child(Node::element("h1").with_child(Node::text("Hello World")))
//!     .with_child(Node::element("p").with_child(Node::text("Some text to keep.")));
//! let body = Node::element("body").with_child(article);
//! let document = Document::new(Node::element("html").with_child(body), None);
//!
//! let markdown = Extractor::new().extract(&document);
//! assert_eq!(markdown, "# Hello World\n\nSome text to keep.");
//! ```
//!
//! ## Example (HTML string)
//!
//! ```rust
//! use pagemark::{Document, ExtractOptions, Extractor};
//!
//! let html = r#"<main><p>See <a href="/docs">the docs</a> for details.</p></main>"#;
//! let document = Document::parse(html, Some("https://example.com/blog/")).unwrap();
//! let markdown = Extractor::with_options(ExtractOptions::default()).extract(&document);
//! assert_eq!(markdown, "See [the docs](https://example.com/docs) for details.");
//! ```

mod cleanup;
mod convert;
mod document;
mod filter;
#[cfg(feature = "html")]
pub mod html;
pub mod latex;
mod locate;
pub mod math;
pub mod node;
mod options;
pub mod protocol;
mod rules;
mod service;
mod style;
mod tag;
mod utilities;

pub use cleanup::cleanup;
pub use convert::{Context, Converter};
pub use document::Document;
pub use filter::ContentFilter;
#[cfg(feature = "html")]
pub use html::{parse_document, parse_html};
pub use latex::{looks_like_latex, repair_latex_artifacts};
pub use locate::{Locator, Selector};
pub use math::to_latex;
pub use node::{Node, NodeRef, NodeType};
pub use options::{ExtractOptions, SiteProfile, DEFAULT_NOISE_TERMS};
pub use rules::{Filter, ReplacementFn, Rule, Rules};
pub use service::Extractor;
pub use style::ComputedStyle;
pub use tag::Tag;
pub use utilities::{collapse_whitespace, is_block, resolve_url, word_count};

/// Error type for the string and message boundaries.
///
/// Extraction itself never fails; only building a document from outside
/// input and decoding trigger messages can.
#[derive(Debug, thiserror::Error)]
pub enum PagemarkError {
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Protocol error: {0}")]
    Protocol(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, PagemarkError>;
