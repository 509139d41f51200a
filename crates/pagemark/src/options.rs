//! Configuration options for extraction

/// Class/id fragments that mark generic page chrome (case-insensitive
/// substring match).
pub const DEFAULT_NOISE_TERMS: &[&str] = &[
    "nav",
    "header",
    "footer",
    "sidebar",
    "ads-",
    "-ads",
    "ad-slot",
    "ad-container",
    "adsbygoogle",
    "advert",
    "sponsor",
    "banner",
    "modal",
    "popup",
    "cookie",
    "newsletter",
    "subscribe",
    "social",
    "share",
    "comment-form",
    "related",
    "breadcrumb",
    "pagination",
    "toolbar",
    "menu",
    "skip-link",
];

/// Site-specific data: which hosts it applies to, the class vocabulary of
/// the site's UI chrome, and where the site keeps its main content.
#[derive(Debug, Clone)]
pub struct SiteProfile {
    /// Host names (lowercase) the locator overrides apply to
    pub hosts: Vec<String>,

    /// Class/id fragments of the site's UI chrome
    pub chrome_terms: Vec<String>,

    /// Ordered content containers (simple selectors)
    pub content_selectors: Vec<String>,

    /// Ordered list containers preferred when they wrap a content container
    pub list_container_selectors: Vec<String>,
}

impl SiteProfile {
    /// A profile with no hosts and no vocabulary
    pub fn empty() -> Self {
        Self {
            hosts: Vec::new(),
            chrome_terms: Vec::new(),
            content_selectors: Vec::new(),
            list_container_selectors: Vec::new(),
        }
    }

    /// The GitHub UI
    pub fn github() -> Self {
        Self {
            hosts: strings(&["github.com", "www.github.com", "gist.github.com"]),
            chrome_terms: strings(&[
                "appheader",
                "header-wrapper",
                "underlinenav",
                "subnav",
                "pagehead",
                "reponav",
                "file-navigation",
                "layout-sidebar",
                "bordergrid",
                "gh-header-actions",
                "timeline-comment-actions",
                "comment-reactions",
                "reactions-container",
                "js-notification-shelf",
                "flash-full",
                "octicon",
                "tooltipped",
                "btn-octicon",
                "avatar",
                "signup-prompt",
            ]),
            content_selectors: strings(&[
                "#readme",
                ".markdown-body",
                ".repository-content",
                ".js-comment-body",
                ".comment-body",
                "[data-testid=issue-body]",
            ]),
            list_container_selectors: strings(&[
                ".js-discussion",
                "[role=list]",
                ".js-timeline-items",
            ]),
        }
    }

    pub fn matches_host(&self, host: &str) -> bool {
        self.hosts.iter().any(|h| h.eq_ignore_ascii_case(host))
    }
}

impl Default for SiteProfile {
    fn default() -> Self {
        Self::github()
    }
}

/// Options for content extraction
#[derive(Debug, Clone)]
pub struct ExtractOptions {
    /// Render without LaTeX delimiters, for destinations that do not
    /// render LaTeX (the "Notion mode" of the trigger protocol)
    pub compact: bool,

    /// Below this many words the extraction is retried on the whole body
    pub min_words: usize,

    /// Generic noise vocabulary
    pub noise_terms: Vec<String>,

    /// Site-specific vocabulary and content containers
    pub site: SiteProfile,
}

impl ExtractOptions {
    /// Default options with the compact flag set as given
    pub fn compact(compact: bool) -> Self {
        Self {
            compact,
            ..Self::default()
        }
    }
}

impl Default for ExtractOptions {
    fn default() -> Self {
        Self {
            compact: false,
            min_words: 3,
            noise_terms: strings(DEFAULT_NOISE_TERMS),
            site: SiteProfile::default(),
        }
    }
}

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| (*s).to_string()).collect()
}
