//! Signup request parsing — pulls a target website (and optionally an
//! identity name) out of phrases like "sign me up for X with Y identity".
//!
//! Purely textual. Nothing here contacts the website.

use std::sync::LazyLock;

use regex_lite::Regex;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignupRequest {
    pub website_url: String,
    pub identity_name: Option<String>,
    pub original_request: String,
}

/// Request phrasings. Group 1 is the website, group 2 the optional identity.
static PATTERNS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    [
        r"sign me up for\s+(.+?)(?:\s+with\s+(.+?))?(?:\s+identity)?\s*$",
        r"create an account on\s+(.+?)(?:\s+using\s+(.+?))?(?:\s+identity)?\s*$",
        r"register me on\s+(.+?)(?:\s+with\s+(.+?))?(?:\s+identity)?\s*$",
    ]
    .iter()
    .map(|p| Regex::new(p).expect("static signup pattern"))
    .collect()
});

static URL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"https?://[^\s]+").expect("static url pattern"));

fn trim_punctuation(s: &str) -> &str {
    s.trim()
        .trim_end_matches(|c: char| matches!(c, '.' | '!' | '?' | ','))
        .trim()
}

/// Turn the free-text website part into a URL: an explicit http(s) URL wins,
/// otherwise keep word characters and dots and add `https://` (plus `.com`
/// when there is no dot).
pub fn website_to_url(website: &str) -> Option<String> {
    if let Some(m) = URL.find(website) {
        return Some(trim_punctuation(m.as_str()).to_string());
    }
    let clean: String = website
        .chars()
        .filter(|c| c.is_alphanumeric() || *c == '_' || *c == '.')
        .collect();
    let clean = clean.trim_matches('.');
    if clean.is_empty() {
        return None;
    }
    if clean.contains('.') {
        Some(format!("https://{clean}"))
    } else {
        Some(format!("https://{clean}.com"))
    }
}

/// Parse a natural-language signup request. `None` when the message is not one.
pub fn parse_signup_request(message: &str) -> Option<SignupRequest> {
    let lower = message.trim().to_lowercase();
    PATTERNS.iter().find_map(|re| {
        let caps = re.captures(&lower)?;
        let website = trim_punctuation(caps.get(1)?.as_str());
        let website_url = website_to_url(website)?;
        let identity_name = caps
            .get(2)
            .map(|m| trim_punctuation(m.as_str()).to_string())
            .filter(|s| !s.is_empty());
        Some(SignupRequest {
            website_url,
            identity_name,
            original_request: message.to_string(),
        })
    })
}
