//! Input resolution for the address bar

use url::Url;

use crate::error::NavigationError;
use crate::Result;

/// Home / empty-state address
pub const HOME_URL: &str = "about:blank";

/// Result of resolving address bar input
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    /// Navigate to a URL
    Navigate(String),
    /// Perform a search via the configured engine
    Search(String),
}

impl Resolution {
    /// The URL to hand to the rendering engine either way
    pub fn url(&self) -> &str {
        match self {
            Resolution::Navigate(url) | Resolution::Search(url) => url,
        }
    }
}

pub struct InputResolver {
    /// Search engine URL template (%s replaced with the encoded query)
    search_template: String,
}

impl InputResolver {
    pub fn new() -> Self {
        Self {
            search_template: "https://duckduckgo.com/?q=%s".to_string(),
        }
    }

    pub fn with_search_engine(template: String) -> Self {
        Self {
            search_template: template,
        }
    }

    pub fn search_template(&self) -> &str {
        &self.search_template
    }

    /// Resolve user input into an action.
    ///
    /// Trimmed input that contains a `.` and no whitespace is treated as
    /// a direct address; everything else becomes a search query. Empty
    /// input goes home.
    pub fn resolve(&self, input: &str) -> Result<Resolution> {
        let input = input.trim();

        if input.is_empty() {
            return Ok(Resolution::Navigate(HOME_URL.to_string()));
        }

        if looks_like_url(input) {
            return Ok(Resolution::Navigate(normalize_url(input)?));
        }

        Ok(Resolution::Search(self.build_search_url(input)))
    }

    /// Build a search URL from a query phrase
    fn build_search_url(&self, query: &str) -> String {
        let encoded = urlencoding::encode(query);
        self.search_template.replace("%s", &encoded)
    }
}

impl Default for InputResolver {
    fn default() -> Self {
        Self::new()
    }
}

/// Heuristic check if input should be treated as a direct address
fn looks_like_url(input: &str) -> bool {
    if has_scheme(input) {
        return true;
    }

    input.contains('.') && !input.contains(char::is_whitespace)
}

fn has_scheme(input: &str) -> bool {
    input.starts_with("http://")
        || input.starts_with("https://")
        || input.starts_with("about:")
        || input.starts_with("file://")
        || input.starts_with("data:")
}

/// Normalize raw address input into a loadable URL.
///
/// Input that already carries a scheme is used as-is; anything else gets
/// the secure default scheme prefixed. The only validation is a trivial
/// well-formedness parse of the final URL.
pub fn normalize_url(input: &str) -> Result<String> {
    let input = input.trim();

    if input.is_empty() {
        return Err(NavigationError::InvalidUrl(
            "URL cannot be empty".to_string(),
        ));
    }

    let normalized = if has_scheme(input) {
        input.to_string()
    } else {
        format!("https://{input}")
    };

    Url::parse(&normalized)
        .map_err(|e| NavigationError::InvalidUrl(format!("{input}: {e}")))?;

    Ok(normalized)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_url() {
        let resolver = InputResolver::new();

        // Full URL passes through untouched
        assert_eq!(
            resolver.resolve("https://example.com").unwrap(),
            Resolution::Navigate("https://example.com".to_string())
        );

        // Domain only gets the secure default scheme
        assert_eq!(
            resolver.resolve("example.com").unwrap(),
            Resolution::Navigate("https://example.com".to_string())
        );

        // about: is a scheme, not a search
        assert_eq!(
            resolver.resolve("about:blank").unwrap(),
            Resolution::Navigate("about:blank".to_string())
        );
    }

    #[test]
    fn test_resolve_search() {
        let resolver = InputResolver::new();

        match resolver.resolve("weather today").unwrap() {
            Resolution::Search(url) => {
                assert!(url.starts_with("https://duckduckgo.com/?q="));
                assert!(url.contains("weather%20today"));
            }
            other => panic!("Expected Search, got {other:?}"),
        }

        // A dot does not rescue input with whitespace
        match resolver.resolve("rust 1.0 release").unwrap() {
            Resolution::Search(_) => {}
            other => panic!("Expected Search, got {other:?}"),
        }
    }

    #[test]
    fn test_resolve_empty_goes_home() {
        let resolver = InputResolver::new();
        assert_eq!(
            resolver.resolve("   ").unwrap(),
            Resolution::Navigate(HOME_URL.to_string())
        );
    }

    #[test]
    fn test_custom_search_engine() {
        let resolver =
            InputResolver::with_search_engine("https://example.org/search?q=%s".to_string());

        match resolver.resolve("lynx shell").unwrap() {
            Resolution::Search(url) => {
                assert_eq!(url, "https://example.org/search?q=lynx%20shell");
            }
            other => panic!("Expected Search, got {other:?}"),
        }
    }

    #[test]
    fn test_normalize_url() {
        assert_eq!(
            normalize_url("example.com/path?q=1").unwrap(),
            "https://example.com/path?q=1"
        );
        assert_eq!(
            normalize_url("http://example.com").unwrap(),
            "http://example.com"
        );
        assert!(normalize_url("").is_err());
    }
}
