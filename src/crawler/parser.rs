//! First-link extraction
//!
//! This module finds the single link a traversal follows from a page: the
//! first hyperlink in body text that is outside parentheses and outside
//! excluded page sections.

use crate::config::ParenPolicy;
use crate::url::{resolve_href, PageId, Site};
use scraper::{ElementRef, Html, Node, Selector};

/// Sections whose links never qualify: annotation boxes, thumbnails and
/// captions, and every table
const EXCLUDED_SECTIONS: &[&str] = &["div.hatnote", "div.thumb", "table"];

/// Text-flow containers scanned for links, in document order
const TEXT_CONTAINERS: &str = "p, ul, ol";

/// Extracts the first qualifying link from page markup
///
/// # Extraction Rules
///
/// 1. Containers inside an excluded section are skipped entirely
/// 2. Only `<p>`, `<ul>` and `<ol>` containers are scanned, in document order
/// 3. Only direct children of a container are inspected; a link nested in a
///    `<span>` or `<b>` is not a candidate
/// 4. Each direct text child adds its `(` count and subtracts its `)` count
///    from a parenthesis depth that runs across all containers
/// 5. A direct `<a>` child qualifies iff the depth is zero when it is reached
///    and its target resolves to a page
///
/// A depth that would go negative is clamped to zero under
/// [`ParenPolicy::Clamp`]; under [`ParenPolicy::Abort`] extraction stops and
/// no link is returned.
///
/// # Examples
///
/// ```
/// use philosophy_walker::config::ParenPolicy;
/// use philosophy_walker::crawler::first_link;
/// use philosophy_walker::url::Site;
///
/// let html = r#"<p>(see <a href="/wiki/Foo">Foo</a>) also <a href="/wiki/Bar">Bar</a></p>"#;
/// let link = first_link(html, &Site::default(), ParenPolicy::Clamp);
/// assert_eq!(link.unwrap().as_str(), "Bar");
/// ```
pub fn first_link(html: &str, site: &Site, policy: ParenPolicy) -> Option<PageId> {
    let document = Html::parse_document(html);
    let excluded = excluded_selectors();
    let containers = Selector::parse(TEXT_CONTAINERS).ok()?;

    let mut depth: i64 = 0;

    for container in document.select(&containers) {
        if in_excluded_section(container, &excluded) {
            continue;
        }

        for child in container.children() {
            match child.value() {
                Node::Text(text) => {
                    depth += count_char(text, '(');
                    depth -= count_char(text, ')');
                    if depth < 0 {
                        if policy == ParenPolicy::Abort {
                            tracing::trace!("Unmatched ')' ends extraction");
                            return None;
                        }
                        depth = 0;
                    }
                }
                Node::Element(element) if element.name() == "a" && depth == 0 => {
                    if let Some(page) = element.attr("href").and_then(|h| resolve_href(h, site)) {
                        return Some(page);
                    }
                }
                _ => {}
            }
        }
    }

    None
}

/// Extracts first links with a fixed site and parenthesis policy
#[derive(Debug, Clone)]
pub struct LinkExtractor {
    site: Site,
    policy: ParenPolicy,
}

impl LinkExtractor {
    pub fn new(site: Site, policy: ParenPolicy) -> Self {
        Self { site, policy }
    }

    pub fn site(&self) -> &Site {
        &self.site
    }

    /// See [`first_link`]
    pub fn first_link(&self, html: &str) -> Option<PageId> {
        first_link(html, &self.site, self.policy)
    }
}

fn excluded_selectors() -> Vec<Selector> {
    EXCLUDED_SECTIONS
        .iter()
        .filter_map(|s| Selector::parse(s).ok())
        .collect()
}

/// Returns true if the element or any ancestor is an excluded section
fn in_excluded_section(element: ElementRef<'_>, excluded: &[Selector]) -> bool {
    std::iter::once(element)
        .chain(element.ancestors().filter_map(ElementRef::wrap))
        .any(|el| excluded.iter().any(|selector| selector.matches(&el)))
}

fn count_char(text: &str, needle: char) -> i64 {
    text.chars().filter(|&c| c == needle).count() as i64
}
