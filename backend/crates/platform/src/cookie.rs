//! Cookie Management Infrastructure
//!
//! Set-Cookie builders and request cookie lookup.

use axum::http::{HeaderMap, header};
use chrono::{DateTime, Utc};

/// IMF-fixdate as required by RFC 6265 `Expires`
const EXPIRES_FORMAT: &str = "%a, %d %b %Y %H:%M:%S GMT";

/// `Expires` value for deletion cookies (the Unix epoch)
const EPOCH_EXPIRES: &str = "Thu, 01 Jan 1970 00:00:00 GMT";

/// SameSite policy for cookies
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SameSite {
    Strict,
    #[default]
    Lax,
    None,
}

impl SameSite {
    pub fn as_str(&self) -> &'static str {
        match self {
            SameSite::Strict => "Strict",
            SameSite::Lax => "Lax",
            SameSite::None => "None",
        }
    }
}

/// Cookie configuration
#[derive(Debug, Clone)]
pub struct CookieConfig {
    pub name: String,
    pub domain: Option<String>,
    pub secure: bool,
    pub http_only: bool,
    pub same_site: SameSite,
    pub path: String,
}

impl Default for CookieConfig {
    fn default() -> Self {
        Self {
            name: "session".to_string(),
            domain: None,
            secure: true,
            http_only: true,
            same_site: SameSite::Lax,
            path: "/".to_string(),
        }
    }
}

impl CookieConfig {
    /// Build Set-Cookie header value expiring at `expires`
    pub fn build_set_cookie(&self, value: &str, expires: DateTime<Utc>) -> String {
        self.build(value, &expires.format(EXPIRES_FORMAT).to_string(), None)
    }

    /// Build Set-Cookie header for deletion (empty value, already expired)
    pub fn build_delete_cookie(&self) -> String {
        self.build("", EPOCH_EXPIRES, Some(0))
    }

    fn build(&self, value: &str, expires: &str, max_age: Option<i64>) -> String {
        let mut cookie = format!("{}={}", self.name, value);

        cookie.push_str(&format!("; Path={}", self.path));
        if let Some(domain) = &self.domain {
            cookie.push_str(&format!("; Domain={}", domain));
        }
        cookie.push_str(&format!("; Expires={}", expires));
        if let Some(max_age) = max_age {
            cookie.push_str(&format!("; Max-Age={}", max_age));
        }
        if self.http_only {
            cookie.push_str("; HttpOnly");
        }
        if self.secure {
            cookie.push_str("; Secure");
        }
        cookie.push_str(&format!("; SameSite={}", self.same_site.as_str()));

        cookie
    }
}

/// Extract a cookie value from headers
///
/// Returns `None` when the cookie is absent. An empty value is returned as
/// `Some("")`; callers decide whether that counts as absent.
pub fn extract_cookie(headers: &HeaderMap, name: &str) -> Option<String> {
    headers
        .get_all(header::COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(|value| value.split(';'))
        .find_map(|cookie| {
            let (key, value) = cookie.trim().split_once('=')?;

            if key == name {
                Some(value.to_string())
            } else {
                None
            }
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;
    use chrono::TimeZone;

    fn config() -> CookieConfig {
        CookieConfig {
            name: "token".to_string(),
            domain: Some("api.example.com".to_string()),
            secure: true,
            http_only: true,
            same_site: SameSite::None,
            path: "/".to_string(),
        }
    }

    #[test]
    fn test_cookie_config_build() {
        let expires = Utc.with_ymd_and_hms(2025, 3, 4, 5, 6, 7).unwrap();
        let cookie = config().build_set_cookie("value123", expires);

        assert!(cookie.starts_with("token=value123; "));
        assert!(cookie.contains("Path=/"));
        assert!(cookie.contains("Domain=api.example.com"));
        assert!(cookie.contains("Expires=Tue, 04 Mar 2025 05:06:07 GMT"));
        assert!(cookie.contains("HttpOnly"));
        assert!(cookie.contains("Secure"));
        assert!(cookie.contains("SameSite=None"));
        assert!(!cookie.contains("Max-Age"));
    }

    #[test]
    fn test_cookie_without_domain_or_secure() {
        let config = CookieConfig {
            domain: None,
            secure: false,
            ..config()
        };
        let cookie = config.build_set_cookie("v", Utc::now());

        assert!(!cookie.contains("Domain="));
        assert!(!cookie.contains("Secure"));
    }

    #[test]
    fn test_delete_cookie() {
        let cookie = config().build_delete_cookie();

        assert!(cookie.starts_with("token=; "));
        assert!(cookie.contains("Expires=Thu, 01 Jan 1970 00:00:00 GMT"));
        assert!(cookie.contains("Max-Age=0"));
        assert!(cookie.contains("Domain=api.example.com"));
        assert!(cookie.contains("HttpOnly"));
    }

    #[test]
    fn test_extract_cookie() {
        let mut headers = HeaderMap::new();
        headers.insert(
            header::COOKIE,
            HeaderValue::from_static("foo=bar; token=abc123; other=xyz"),
        );

        assert_eq!(extract_cookie(&headers, "token"), Some("abc123".to_string()));
        assert_eq!(extract_cookie(&headers, "foo"), Some("bar".to_string()));
        assert_eq!(extract_cookie(&headers, "missing"), None);
    }

    #[test]
    fn test_extract_cookie_across_headers() {
        let mut headers = HeaderMap::new();
        headers.append(header::COOKIE, HeaderValue::from_static("foo=bar"));
        headers.append(header::COOKIE, HeaderValue::from_static("token="));

        assert_eq!(extract_cookie(&headers, "token"), Some(String::new()));
    }
}
