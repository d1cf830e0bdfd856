// Copyright 2025 Cowboy AI, LLC.

//! Engine identities shared by the classifier, resolver and compatibility oracle

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::errors::{CompatError, CompatResult};

/// A named JavaScript execution environment with its own feature history.
///
/// `Es` is the pseudo-engine whose "versions" are specification years; the
/// oracle uses it to describe what each yearly target requires.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Engine {
    /// Google Chrome and Chromium derivatives without their own profile
    Chrome,
    /// Microsoft Edge (EdgeHTML and Chromium based)
    Edge,
    /// ECMAScript specification editions
    Es,
    /// Mozilla Firefox
    Firefox,
    /// Safari on iOS (WebKit on the mobile platform)
    Ios,
    /// Node.js
    Node,
    /// Opera
    Opera,
    /// Safari on desktop
    Safari,
}

impl Engine {
    /// Every engine identity, in declaration order.
    pub const ALL: [Engine; 8] = [
        Engine::Chrome,
        Engine::Edge,
        Engine::Es,
        Engine::Firefox,
        Engine::Ios,
        Engine::Node,
        Engine::Opera,
        Engine::Safari,
    ];

    /// Engines a browser user agent may classify into.
    pub const BROWSERS: [Engine; 6] = [
        Engine::Chrome,
        Engine::Edge,
        Engine::Firefox,
        Engine::Ios,
        Engine::Opera,
        Engine::Safari,
    ];

    /// Canonical lowercase token.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Chrome => "chrome",
            Self::Edge => "edge",
            Self::Es => "es",
            Self::Firefox => "firefox",
            Self::Ios => "ios",
            Self::Node => "node",
            Self::Opera => "opera",
            Self::Safari => "safari",
        }
    }

    /// Look up a browser engine by a sniffed family name, ignoring case.
    pub fn from_browser_family(family: &str) -> Option<Self> {
        let family = family.to_ascii_lowercase();
        Self::BROWSERS
            .into_iter()
            .find(|engine| engine.as_str() == family)
    }

    /// Whether this is one of the browser engines.
    pub fn is_browser(self) -> bool {
        Self::BROWSERS.contains(&self)
    }
}

impl fmt::Display for Engine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Engine {
    type Err = CompatError;

    fn from_str(s: &str) -> CompatResult<Self> {
        Self::ALL
            .into_iter()
            .find(|engine| engine.as_str() == s)
            .ok_or_else(|| CompatError::UnknownEngine(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn browser_family_lookup_ignores_case() {
        assert_eq!(Engine::from_browser_family("Chrome"), Some(Engine::Chrome));
        assert_eq!(Engine::from_browser_family("iOS"), Some(Engine::Ios));
        assert_eq!(Engine::from_browser_family("Node"), None);
        assert_eq!(Engine::from_browser_family("Netscape"), None);
    }

    #[test]
    fn tokens_round_trip() {
        for engine in Engine::ALL {
            assert_eq!(engine.as_str().parse::<Engine>(), Ok(engine));
        }
        assert!(matches!(
            "netscape".parse::<Engine>(),
            Err(CompatError::UnknownEngine(_))
        ));
    }

    #[test]
    fn serializes_as_lowercase_token() {
        let json = serde_json::to_string(&Engine::Ios).unwrap();
        assert_eq!(json, "\"ios\"");
    }
}
