// ABOUTME: Session cookie construction and parsing
// ABOUTME: Builds HttpOnly SameSite=Strict cookies carrying the session token
//
// SPDX-License-Identifier: MIT OR Apache-2.0

use crate::constants::cookies::SESSION_COOKIE;
use http::{header, HeaderMap, HeaderValue};

/// `SameSite` attribute values
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SameSite {
    /// Sent only on same-site requests
    Strict,
}

impl SameSite {
    const fn as_str(self) -> &'static str {
        match self {
            Self::Strict => "Strict",
        }
    }
}

/// Attributes of a `Set-Cookie` header
#[derive(Debug, Clone)]
pub struct SecureCookieConfig {
    /// Cookie name
    pub name: String,
    /// Cookie value
    pub value: String,
    /// Lifetime in seconds; zero deletes the cookie
    pub max_age: i64,
    /// Hide the cookie from scripts
    pub http_only: bool,
    /// Only send over HTTPS
    pub secure: bool,
    /// Cross-site policy
    pub same_site: SameSite,
    /// Cookie path
    pub path: String,
}

impl SecureCookieConfig {
    /// New cookie with the strict defaults (`HttpOnly`, `Secure`, `SameSite=Strict`, `Path=/`)
    #[must_use]
    pub fn new(name: String, value: String, max_age: i64) -> Self {
        Self {
            name,
            value,
            max_age,
            http_only: true,
            secure: true,
            same_site: SameSite::Strict,
            path: "/".to_owned(),
        }
    }

    /// Toggle the `Secure` attribute
    #[must_use]
    pub const fn with_secure(mut self, secure: bool) -> Self {
        self.secure = secure;
        self
    }

    /// Render the `Set-Cookie` header value
    #[must_use]
    pub fn build(&self) -> String {
        let mut cookie = format!(
            "{}={}; Path={}; Max-Age={}; SameSite={}",
            self.name,
            self.value,
            self.path,
            self.max_age.max(0),
            self.same_site.as_str()
        );
        if self.http_only {
            cookie.push_str("; HttpOnly");
        }
        if self.secure {
            cookie.push_str("; Secure");
        }
        cookie
    }

    fn append_to(&self, headers: &mut HeaderMap) {
        match HeaderValue::from_str(&self.build()) {
            Ok(value) => {
                headers.append(header::SET_COOKIE, value);
            }
            Err(e) => {
                tracing::warn!(cookie = %self.name, "Cookie value is not a valid header: {}", e);
            }
        }
    }
}

/// Attach the session cookie carrying `token`
pub fn set_auth_cookie(headers: &mut HeaderMap, token: &str, max_age: i64, secure: bool) {
    SecureCookieConfig::new(SESSION_COOKIE.to_owned(), token.to_owned(), max_age)
        .with_secure(secure)
        .append_to(headers);
}

/// Attach an expired session cookie so the browser drops it
pub fn clear_auth_cookie(headers: &mut HeaderMap, secure: bool) {
    SecureCookieConfig::new(SESSION_COOKIE.to_owned(), String::new(), 0)
        .with_secure(secure)
        .append_to(headers);
}

/// Read a cookie value from the request `Cookie` headers
#[must_use]
pub fn get_cookie_value(headers: &HeaderMap, name: &str) -> Option<String> {
    headers
        .get_all(header::COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(|value| value.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(key, _)| *key == name)
        .map(|(_, value)| value.to_owned())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_development_cookie_is_not_secure() {
        let mut headers = HeaderMap::new();
        set_auth_cookie(&mut headers, "abc", 3600, false);

        let cookie = headers.get(header::SET_COOKIE).unwrap().to_str().unwrap();
        assert!(cookie.starts_with("token=abc;"));
        assert!(cookie.contains("HttpOnly"));
        assert!(!cookie.contains("Secure"));
    }

    #[test]
    fn test_negative_max_age_clamped() {
        let cookie = SecureCookieConfig::new("token".into(), "x".into(), -5).build();
        assert!(cookie.contains("Max-Age=0"));
    }

    #[test]
    fn test_cookie_lookup_across_headers() {
        let mut headers = HeaderMap::new();
        headers.append(header::COOKIE, HeaderValue::from_static("theme=dark"));
        headers.append(header::COOKIE, HeaderValue::from_static("token=jwt.value.sig"));

        assert_eq!(
            get_cookie_value(&headers, "token").as_deref(),
            Some("jwt.value.sig")
        );
    }
}
