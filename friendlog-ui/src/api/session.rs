//! Session Cookie
//!
//! The login token is kept in the `auth_token` cookie for 7 days.

use wasm_bindgen::JsCast;

/// Cookie holding the bearer token
pub const TOKEN_COOKIE: &str = "auth_token";

/// Session lifetime in seconds (7 days)
pub const TOKEN_MAX_AGE_SECS: u64 = 7 * 24 * 60 * 60;

fn html_document() -> Option<web_sys::HtmlDocument> {
    web_sys::window()?
        .document()?
        .dyn_into::<web_sys::HtmlDocument>()
        .ok()
}

/// The stored token, if any
pub fn get_token() -> Option<String> {
    let cookies = html_document()?.cookie().ok()?;
    find_cookie(&cookies, TOKEN_COOKIE)
}

pub fn has_token() -> bool {
    get_token().is_some()
}

pub fn set_token(token: &str) {
    if let Some(doc) = html_document() {
        let _ = doc.set_cookie(&token_cookie(token, TOKEN_MAX_AGE_SECS));
    }
}

pub fn clear_token() {
    if let Some(doc) = html_document() {
        let _ = doc.set_cookie(&token_cookie("", 0));
    }
}

/// Look up one cookie in a `document.cookie` string
pub fn find_cookie(cookies: &str, name: &str) -> Option<String> {
    cookies
        .split(';')
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(key, _)| *key == name)
        .map(|(_, value)| value.to_string())
        .filter(|value| !value.is_empty())
}

/// `Set-Cookie`-style string for the token; a max age of 0 deletes it
pub fn token_cookie(token: &str, max_age_secs: u64) -> String {
    format!(
        "{}={}; Max-Age={}; Path=/; SameSite=Lax",
        TOKEN_COOKIE, token, max_age_secs
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_find_cookie() {
        let cookies = "theme=dark; auth_token=abc.def.ghi; other=1";
        assert_eq!(find_cookie(cookies, "auth_token"), Some("abc.def.ghi".to_string()));
        assert_eq!(find_cookie(cookies, "missing"), None);
        assert_eq!(find_cookie("", "auth_token"), None);
        assert_eq!(find_cookie("auth_token=", "auth_token"), None);
    }

    #[test]
    fn test_token_cookie() {
        assert_eq!(
            token_cookie("abc", TOKEN_MAX_AGE_SECS),
            "auth_token=abc; Max-Age=604800; Path=/; SameSite=Lax"
        );
        assert!(token_cookie("", 0).contains("Max-Age=0"));
    }
}
