use crate::constants::CSRF_COOKIE_NAME;

/// Anti-forgery token supplied by the host: an embedded form value, or a
/// cookie header carrying `csrftoken`.
#[derive(Debug, Clone, Default)]
pub struct CsrfSource {
    pub form_token: Option<String>,
    pub cookie_header: Option<String>,
}

impl CsrfSource {
    pub fn new(form_token: Option<String>, cookie_header: Option<String>) -> Self {
        Self {
            form_token,
            cookie_header,
        }
    }

    /// Form value first, then the cookie, else empty.
    pub fn token(&self) -> String {
        self.form_token
            .as_deref()
            .filter(|t| !t.is_empty())
            .map(str::to_string)
            .or_else(|| self.cookie_header.as_deref().and_then(token_from_cookie))
            .unwrap_or_default()
    }
}

fn token_from_cookie(header: &str) -> Option<String> {
    header
        .split(';')
        .map(str::trim)
        .find_map(|pair| pair.strip_prefix(CSRF_COOKIE_NAME)?.strip_prefix('='))
        .filter(|t| !t.is_empty())
        .map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_form_token_wins() {
        let source = CsrfSource::new(
            Some("from-form".to_string()),
            Some("csrftoken=from-cookie".to_string()),
        );
        assert_eq!(source.token(), "from-form");
    }

    #[test]
    fn test_cookie_fallback() {
        let source = CsrfSource::new(
            None,
            Some("sessionid=abc; csrftoken=tok123; theme=dark".to_string()),
        );
        assert_eq!(source.token(), "tok123");
    }

    #[test]
    fn test_similar_cookie_name_is_ignored() {
        let source = CsrfSource::new(None, Some("csrftokenx=nope".to_string()));
        assert_eq!(source.token(), "");
    }

    #[test]
    fn test_empty_when_missing() {
        assert_eq!(CsrfSource::default().token(), "");
        let source = CsrfSource::new(Some(String::new()), None);
        assert_eq!(source.token(), "");
    }
}
