//! OSC 8 hyperlink state.

use crate::ansi;

/// The active hyperlink: target URL plus the raw parameter list
/// (`id=...` and friends).
///
/// An empty URL and empty params means no link is open.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct Link {
    pub url: String,
    pub params: String,
}

impl Link {
    /// Create a link with no parameters.
    #[must_use]
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            params: String::new(),
        }
    }

    /// Create a link with a parameter list.
    #[must_use]
    pub fn with_params(url: impl Into<String>, params: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            params: params.into(),
        }
    }

    /// Check if no link is open.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.url.is_empty() && self.params.is_empty()
    }

    /// Close the link.
    pub fn reset(&mut self) {
        self.url.clear();
        self.params.clear();
    }

    /// OSC 8 sequence opening this link.
    #[must_use]
    pub fn sequence(&self) -> String {
        ansi::set_hyperlink(&self.url, &self.params)
    }

    /// OSC 8 sequence closing any open link.
    #[must_use]
    pub const fn close_sequence() -> &'static str {
        ansi::RESET_HYPERLINK
    }
}

/// Apply an OSC 8 payload (`8;params;url`) to a link.
///
/// The payload is split on its first two `;`, so URLs may themselves contain
/// semicolons. A payload with fewer than three fields is ignored.
pub fn read_link(data: &str, link: &mut Link) {
    let mut fields = data.splitn(3, ';');
    let (Some(_command), Some(params), Some(url)) = (fields.next(), fields.next(), fields.next())
    else {
        return;
    };
    link.params.clear();
    link.params.push_str(params);
    link.url.clear();
    link.url.push_str(url);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_link_default_is_empty() {
        let link = Link::default();
        assert!(link.is_empty());
    }

    #[test]
    fn test_read_link_open_and_close() {
        let mut link = Link::default();
        read_link("8;;https://example.com", &mut link);
        assert_eq!(link, Link::new("https://example.com"));
        assert!(!link.is_empty());

        read_link("8;;", &mut link);
        assert!(link.is_empty());
    }

    #[test]
    fn test_read_link_params() {
        let mut link = Link::default();
        read_link("8;id=1;https://example.com/", &mut link);
        assert_eq!(link.params, "id=1");
        assert_eq!(link.url, "https://example.com/");
    }

    #[test]
    fn test_read_link_url_with_semicolon() {
        let mut link = Link::default();
        read_link("8;;https://example.com/a;b", &mut link);
        assert_eq!(link.url, "https://example.com/a;b");
    }

    #[test]
    fn test_read_link_malformed_is_ignored() {
        let mut link = Link::new("https://keep.me");
        read_link("8", &mut link);
        read_link("8;only-two", &mut link);
        assert_eq!(link.url, "https://keep.me");
    }

    #[test]
    fn test_link_sequences() {
        let link = Link::with_params("https://example.com", "id=7");
        assert_eq!(link.sequence(), "\x1b]8;id=7;https://example.com\x07");
        assert_eq!(Link::close_sequence(), "\x1b]8;;\x07");
    }

    #[test]
    fn test_reset() {
        let mut link = Link::with_params("https://example.com", "id=7");
        link.reset();
        assert!(link.is_empty());
    }

    #[test]
    fn test_unicode_url() {
        let mut link = Link::default();
        read_link("8;;https://example.com/路径/文件", &mut link);
        assert_eq!(link.url, "https://example.com/路径/文件");
    }
}
