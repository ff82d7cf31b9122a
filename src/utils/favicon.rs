//! Favicon file name derivation from bookmark URLs.

use url::Url;

/// Derives the favicon file name for a bookmark URL.
///
/// The name is the URL's host with a `.png` extension, e.g.
/// `https://example.com/page` becomes `example.com.png`. Returns `None` for
/// unparseable URLs or URLs without a host.
pub fn favicon_file_name(bookmark_url: &str) -> Option<String> {
    let parsed = Url::parse(bookmark_url).ok()?;
    let host = parsed.host_str()?;

    Some(format!("{host}.png"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_derives_name_from_host() {
        assert_eq!(
            favicon_file_name("https://example.com/some/page?q=1"),
            Some("example.com.png".to_string())
        );
    }

    #[test]
    fn test_keeps_subdomain() {
        assert_eq!(
            favicon_file_name("https://docs.rs/axum"),
            Some("docs.rs.png".to_string())
        );
    }

    #[test]
    fn test_invalid_url_gives_none() {
        assert_eq!(favicon_file_name("not a url"), None);
    }

    #[test]
    fn test_hostless_url_gives_none() {
        assert_eq!(favicon_file_name("mailto:user@example.com"), None);
    }
}
