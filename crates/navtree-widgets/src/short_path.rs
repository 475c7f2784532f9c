#![forbid(unsafe_code)]

//! Short-path display text for menu URLs.

use std::borrow::Cow;

use url::Url;

/// Path shown next to a menu title.
///
/// Absolute `http`/`https` URLs show only their path component; anything
/// else (site-relative paths, anchors, unparseable input) is shown as-is.
/// Presentation only: the stored URL is never replaced by this value.
#[must_use]
pub fn short_path(url: &str) -> Cow<'_, str> {
    if !url.starts_with("http") {
        return Cow::Borrowed(url);
    }
    match Url::parse(url) {
        Ok(parsed) => Cow::Owned(parsed.path().to_owned()),
        Err(_) => Cow::Borrowed(url),
    }
}

#[cfg(test)]
mod tests {
    use super::short_path;

    #[test]
    fn absolute_urls_show_path_only() {
        assert_eq!(short_path("https://example.com/about/team"), "/about/team");
        assert_eq!(short_path("http://example.com/a?b=1#c"), "/a");
    }

    #[test]
    fn host_only_url_shows_root_path() {
        assert_eq!(short_path("https://example.com"), "/");
    }

    #[test]
    fn relative_paths_are_verbatim() {
        assert_eq!(short_path("/contact"), "/contact");
        assert_eq!(short_path("#top"), "#top");
        assert_eq!(short_path(""), "");
    }

    #[test]
    fn parse_failure_falls_back_to_raw() {
        assert_eq!(short_path("http//broken"), "http//broken");
        assert_eq!(short_path("https://"), "https://");
    }
}
