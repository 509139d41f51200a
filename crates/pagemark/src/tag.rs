//! HTML tag kinds used for rule dispatch.

/// The element kinds the transducer and filter distinguish.
///
/// Everything else maps to [`Tag::Other`] and falls through to the
/// pass-through rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Tag {
    Heading(u8),
    P,
    Br,
    Hr,
    Strong,
    B,
    Em,
    I,
    Code,
    Pre,
    Blockquote,
    Ul,
    Ol,
    Li,
    A,
    Img,
    Math,
    Table,
    Thead,
    Tbody,
    Tfoot,
    Tr,
    Th,
    Td,
    Span,
    Div,
    Section,
    Article,
    Main,
    Aside,
    Header,
    Footer,
    Body,
    Html,
    // Non-content
    Script,
    Style,
    Meta,
    Link,
    Title,
    Head,
    Noscript,
    // Interactive chrome
    Nav,
    Menu,
    Button,
    Form,
    Input,
    Textarea,
    Select,
    Option,
    Other,
}

impl Tag {
    /// Map a tag name (any case) to its kind
    pub fn from_name(name: &str) -> Self {
        match name.to_ascii_lowercase().as_str() {
            "h1" => Tag::Heading(1),
            "h2" => Tag::Heading(2),
            "h3" => Tag::Heading(3),
            "h4" => Tag::Heading(4),
            "h5" => Tag::Heading(5),
            "h6" => Tag::Heading(6),
            "p" => Tag::P,
            "br" => Tag::Br,
            "hr" => Tag::Hr,
            "strong" => Tag::Strong,
            "b" => Tag::B,
            "em" => Tag::Em,
            "i" => Tag::I,
            "code" => Tag::Code,
            "pre" => Tag::Pre,
            "blockquote" => Tag::Blockquote,
            "ul" => Tag::Ul,
            "ol" => Tag::Ol,
            "li" => Tag::Li,
            "a" => Tag::A,
            "img" => Tag::Img,
            "math" => Tag::Math,
            "table" => Tag::Table,
            "thead" => Tag::Thead,
            "tbody" => Tag::Tbody,
            "tfoot" => Tag::Tfoot,
            "tr" => Tag::Tr,
            "th" => Tag::Th,
            "td" => Tag::Td,
            "span" => Tag::Span,
            "div" => Tag::Div,
            "section" => Tag::Section,
            "article" => Tag::Article,
            "main" => Tag::Main,
            "aside" => Tag::Aside,
            "header" => Tag::Header,
            "footer" => Tag::Footer,
            "body" => Tag::Body,
            "html" => Tag::Html,
            "script" => Tag::Script,
            "style" => Tag::Style,
            "meta" => Tag::Meta,
            "link" => Tag::Link,
            "title" => Tag::Title,
            "head" => Tag::Head,
            "noscript" => Tag::Noscript,
            "nav" => Tag::Nav,
            "menu" => Tag::Menu,
            "button" => Tag::Button,
            "form" => Tag::Form,
            "input" => Tag::Input,
            "textarea" => Tag::Textarea,
            "select" => Tag::Select,
            "option" => Tag::Option,
            _ => Tag::Other,
        }
    }

    /// Tags that never carry page content
    pub fn is_non_content(self) -> bool {
        matches!(
            self,
            Tag::Script
                | Tag::Style
                | Tag::Meta
                | Tag::Link
                | Tag::Title
                | Tag::Head
                | Tag::Noscript
        )
    }

    /// Navigation and form controls
    pub fn is_interactive_chrome(self) -> bool {
        matches!(
            self,
            Tag::Nav
                | Tag::Menu
                | Tag::Button
                | Tag::Form
                | Tag::Input
                | Tag::Textarea
                | Tag::Select
                | Tag::Option
        )
    }

    pub fn is_ignored(self) -> bool {
        self.is_non_content() || self.is_interactive_chrome()
    }

    /// Generic layout containers
    pub fn is_container(self) -> bool {
        matches!(
            self,
            Tag::Div | Tag::Section | Tag::Article | Tag::Main | Tag::Aside | Tag::Header | Tag::Footer
        )
    }

    /// Emphasis tags; the bool is true for bold
    pub fn emphasis(self) -> Option<bool> {
        match self {
            Tag::Strong | Tag::B => Some(true),
            Tag::Em | Tag::I => Some(false),
            _ => None,
        }
    }

    /// Tags whose rule builds output from the node itself, so the
    /// children never need rendering.
    pub fn renders_own_content(self) -> bool {
        matches!(self, Tag::Pre | Tag::Code | Tag::Math | Tag::Img | Tag::Br | Tag::Hr)
            || self.is_ignored()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_name() {
        assert_eq!(Tag::from_name("H3"), Tag::Heading(3));
        assert_eq!(Tag::from_name("div"), Tag::Div);
        assert_eq!(Tag::from_name("MATH"), Tag::Math);
        assert_eq!(Tag::from_name("custom-element"), Tag::Other);
    }

    #[test]
    fn test_categories() {
        assert!(Tag::Script.is_ignored());
        assert!(Tag::Button.is_interactive_chrome());
        assert!(!Tag::P.is_ignored());
        assert!(Tag::Aside.is_container());
        assert_eq!(Tag::B.emphasis(), Some(true));
        assert_eq!(Tag::I.emphasis(), Some(false));
        assert_eq!(Tag::Span.emphasis(), None);
    }
}
