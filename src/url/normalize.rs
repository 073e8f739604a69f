use crate::url::{PageId, Site};
use url::Url;

/// Query markers that request the markup-only rendering
const RENDER_MARKERS: &[&str] = &["&action=render", "?action=render"];

/// Link schemes that never point at an article
const SKIPPED_SCHEMES: &[&str] = &["javascript:", "mailto:", "tel:", "data:"];

/// Canonicalizes a bare page name or a full URL into a `PageId`
///
/// # Canonicalization Steps
///
/// 1. Build a URL: full http(s) URLs are parsed, anything else is taken as
///    an article name under the site's article path
/// 2. Remove the render-mode marker (`&action=render` and `?action=render`)
/// 3. Remove the article-path prefix of the site (`http://` and `https://`)
/// 4. Remove the query-string title form (`/w/index.php?title=`)
/// 5. Repeat until nothing changes
///
/// Going through `url::Url` every time gives every form the same
/// percent-encoding, so `Café`, `/wiki/Café` and `.../wiki/Caf%C3%A9` all
/// end up as `Caf%C3%A9`.
///
/// # Examples
///
/// ```
/// use philosophy_walker::url::{normalize_page_id, Site};
///
/// let site = Site::default();
/// let page = normalize_page_id("https://en.wikipedia.org/wiki/Cat?action=render", &site);
/// assert_eq!(page.as_str(), "Cat");
/// ```
pub fn normalize_page_id(raw: &str, site: &Site) -> PageId {
    let prefixes = site.strip_prefixes();
    let mut current = raw.trim().to_string();

    if current.is_empty() {
        return PageId::from(current);
    }

    loop {
        let mut next = to_url_string(&current, site);
        for marker in RENDER_MARKERS {
            next = next.replace(marker, "");
        }
        for prefix in &prefixes {
            next = next.replace(prefix.as_str(), "");
        }

        if next == current {
            return PageId::from(current);
        }
        current = next;
    }
}

/// Serializes a page name or URL through `url::Url`
///
/// Article names are appended to the article prefix rather than joined, so a
/// namespaced name like `Special:Random` is not mistaken for a URL scheme.
/// Fragments never change the page and are dropped.
fn to_url_string(raw: &str, site: &Site) -> String {
    let parsed = match Url::parse(raw) {
        Ok(url) if is_http(&url) => Ok(url),
        _ => Url::parse(&format!("{}{}", site.article_prefix(), raw)),
    };

    match parsed {
        Ok(mut url) => {
            url.set_fragment(None);
            url.to_string()
        }
        Err(_) => raw.to_string(),
    }
}

fn is_http(url: &Url) -> bool {
    matches!(url.scheme(), "http" | "https")
}

/// Resolves the `href` of a link into a `PageId`
///
/// Host-relative (`/wiki/Foo`) and protocol-relative
/// (`//en.wikipedia.org/wiki/Foo`) targets are given the site's scheme and
/// host before canonicalization.
///
/// Returns None if the link cannot lead to a page:
/// - empty or fragment-only (`#section`) targets
/// - javascript:, mailto:, tel:, data: schemes
/// - targets that do not resolve to an http(s) URL
pub fn resolve_href(href: &str, site: &Site) -> Option<PageId> {
    let href = href.trim();

    if href.is_empty() || href.starts_with('#') {
        return None;
    }

    if SKIPPED_SCHEMES.iter().any(|scheme| href.starts_with(scheme)) {
        return None;
    }

    let base = Url::parse(&site.article_prefix()).ok()?;
    let url = base.join(href).ok().filter(is_http)?;

    let page = normalize_page_id(url.as_str(), site);
    if page.is_empty() {
        None
    } else {
        Some(page)
    }
}
