//! Icon declaration scanning.
//!
//! This is a pattern scan over raw markup, not an HTML parse: it looks for
//! `<link rel="...">` tags with the exact icon `rel` values and for
//! `og:image` meta tags, in a fixed priority order.

use regex::Regex;
use url::Url;

/// `rel` values scanned, highest priority first.
pub const ICON_RELS: [&str; 4] = [
    "apple-touch-icon",
    "shortcut icon",
    "icon",
    "apple-touch-icon-precomposed",
];

/// Compiled scan patterns.
#[derive(Clone, Debug)]
pub struct IconScanner {
    link_patterns: Vec<Regex>,
    href: Regex,
    og_image: Regex,
    content: Regex,
}

impl IconScanner {
    pub fn new() -> Result<Self, regex::Error> {
        let link_patterns = ICON_RELS
            .iter()
            .map(|rel| {
                Regex::new(&format!(
                    r#"(?i)<link[^>]+rel=["']{}["'][^>]*>"#,
                    regex::escape(rel)
                ))
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            link_patterns,
            href: Regex::new(r#"(?i)href=["']([^"']+)["']"#)?,
            og_image: Regex::new(r#"(?i)<meta[^>]+property=["']og:image["'][^>]*>"#)?,
            content: Regex::new(r#"(?i)content=["']([^"']+)["']"#)?,
        })
    }

    /// Icon references declared in `html`, in priority order, unresolved.
    ///
    /// Link tags come first (grouped by `rel` priority, document order within
    /// a group), then `og:image` values.
    pub fn references(&self, html: &str) -> Vec<String> {
        let mut refs = Vec::new();
        for pattern in &self.link_patterns {
            for tag in pattern.find_iter(html) {
                if let Some(value) = capture(&self.href, tag.as_str()) {
                    refs.push(value);
                }
            }
        }
        for tag in self.og_image.find_iter(html) {
            if let Some(value) = capture(&self.content, tag.as_str()) {
                refs.push(value);
            }
        }
        refs
    }

    /// Absolute candidate URLs declared in `html`, deduplicated in order of
    /// first discovery.
    pub fn scan(&self, html: &str, origin: &str, scheme: &str) -> Vec<String> {
        let mut found: Vec<String> = Vec::new();
        for reference in self.references(html) {
            let resolved = resolve_reference(origin, scheme, &reference);
            if !found.contains(&resolved) {
                found.push(resolved);
            }
        }
        found
    }
}

fn capture(pattern: &Regex, tag: &str) -> Option<String> {
    pattern
        .captures(tag)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().trim().replace("&amp;", "&"))
        .filter(|value| !value.is_empty())
}

/// Turn a declared icon reference into an absolute URL.
///
/// - `//host/x.png` takes the page scheme
/// - `/x.png` is joined to the origin
/// - a value with its own scheme is used as-is
/// - anything else is joined to the origin with a `/` separator
pub fn resolve_reference(origin: &str, scheme: &str, reference: &str) -> String {
    if reference.starts_with("//") {
        format!("{scheme}:{reference}")
    } else if reference.starts_with('/') {
        format!("{origin}{reference}")
    } else if Url::parse(reference).is_ok() {
        reference.to_string()
    } else {
        format!("{origin}/{reference}")
    }
}
