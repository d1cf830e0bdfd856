// Copyright 2025 Cowboy AI, LLC.

//! User-Agent Classifier
//!
//! Rules are tried in a fixed order because they overlap (a string may match
//! more than one prefix):
//!
//! 1. empty or command line fetch tool: `esnext`
//! 2. server runtimes: `deno` / `denonext` by threshold, `node` for Node,
//!    Bun and undici
//! 3. browsers: sniffed family and version, with headless Chrome folded into
//!    Chrome and iPhone Safari remapped to the iOS engine
//! 4. anything else: `esnext`

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::ResolverConfig;
use crate::engines::Engine;
use crate::errors::CompatResult;
use crate::targets::Target;
use crate::user_agent::{parse_browser, BrowserInfo};
use crate::version::RuntimeVersion;

/// Most permissive target, used whenever a client cannot be narrowed.
pub const FALLBACK_TARGET: Target = Target::EsNext;

const DENO_PREFIX: &str = "Deno/";
const NODE_PREFIXES: [&str; 2] = ["Node/", "Bun/"];
const UNDICI: &str = "undici";
const HEADLESS_CHROME: &str = "HeadlessChrome";
const IPHONE_MARKER: &str = "iPhone;";

/// Outcome of classifying a user agent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ClientProfile {
    /// Target known without any feature comparison
    Literal {
        /// Target to serve
        target: Target,
    },
    /// Browser engine to resolve against the ladder
    Browser {
        /// Engine identity after renames
        engine: Engine,
        /// Version exactly as reported by the user agent
        version: String,
    },
}

impl ClientProfile {
    /// Profile carrying a literal target.
    pub fn literal(target: Target) -> Self {
        ClientProfile::Literal { target }
    }

    /// The literal target, if this profile has one.
    pub fn literal_target(&self) -> Option<Target> {
        match self {
            ClientProfile::Literal { target } => Some(*target),
            ClientProfile::Browser { .. } => None,
        }
    }
}

/// Sniff a browser and apply the family renames.
///
/// Headless Chrome shares Chrome's profile; Safari on an iPhone is the iOS
/// engine even though it reports the desktop family name.
pub fn browser_family(ua: &str) -> BrowserInfo {
    let mut info = parse_browser(ua);
    if info.name == HEADLESS_CHROME {
        info.name = "Chrome".to_string();
    } else if info.name == "Safari" && ua.contains(IPHONE_MARKER) {
        info.name = "iOS".to_string();
    }
    info
}

/// Maps raw user agents to [`ClientProfile`]s.
#[derive(Debug, Clone)]
pub struct Classifier {
    deno_next_threshold: RuntimeVersion,
    cli_tool_prefixes: Vec<String>,
}

impl Classifier {
    /// Build a classifier from configuration.
    pub fn new(config: &ResolverConfig) -> CompatResult<Self> {
        config.validate()?;
        Ok(Self {
            deno_next_threshold: config.threshold()?,
            cli_tool_prefixes: config.cli_tool_prefixes.clone(),
        })
    }

    fn is_cli_tool(&self, ua: &str) -> bool {
        self.cli_tool_prefixes
            .iter()
            .any(|prefix| ua.starts_with(prefix.as_str()))
    }

    fn deno_target(&self, version: &str) -> Target {
        match RuntimeVersion::parse(version) {
            Ok(v) if v < self.deno_next_threshold => Target::Deno,
            _ => Target::DenoNext,
        }
    }

    /// Classify a raw user agent. Never fails.
    pub fn classify(&self, ua: &str) -> ClientProfile {
        if ua.is_empty() || self.is_cli_tool(ua) {
            return ClientProfile::literal(FALLBACK_TARGET);
        }
        if let Some(version) = ua.strip_prefix(DENO_PREFIX) {
            return ClientProfile::literal(self.deno_target(version));
        }
        if ua == UNDICI || NODE_PREFIXES.iter().any(|p| ua.starts_with(*p)) {
            return ClientProfile::literal(Target::Node);
        }

        let info = browser_family(ua);
        if info.is_incomplete() {
            debug!(ua, "no browser family recognised");
            return ClientProfile::literal(FALLBACK_TARGET);
        }
        match Engine::from_browser_family(&info.name) {
            Some(engine) => ClientProfile::Browser {
                engine,
                version: info.version,
            },
            None => {
                debug!(ua, family = %info.name, "untracked browser family");
                ClientProfile::literal(FALLBACK_TARGET)
            }
        }
    }
}

impl Default for Classifier {
    fn default() -> Self {
        Self {
            deno_next_threshold: RuntimeVersion::new(1, 33, 2),
            cli_tool_prefixes: ResolverConfig::default().cli_tool_prefixes,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const IPHONE_SAFARI: &str = "Mozilla/5.0 (iPhone; CPU iPhone OS 16_5 like Mac OS X) AppleWebKit/605.1.15 (KHTML, like Gecko) Version/16.5 Mobile/15E148 Safari/604.1";

    #[test]
    fn headless_chrome_is_chrome() {
        let info = browser_family(
            "Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/537.36 (KHTML, like Gecko) HeadlessChrome/91.0.4472 Safari/537.36",
        );
        assert_eq!(info.name, "Chrome");
        assert_eq!(info.version, "91.0.4472");
    }

    #[test]
    fn iphone_safari_is_ios() {
        let info = browser_family(IPHONE_SAFARI);
        assert_eq!(info.name, "iOS");
        assert_eq!(info.version, "16.5");
    }

    #[test]
    fn ipad_safari_stays_safari() {
        let info = browser_family(&IPHONE_SAFARI.replace("iPhone;", "iPad;"));
        assert_eq!(info.name, "Safari");
    }

    #[test]
    fn deno_threshold_splits_aliases() {
        let classifier = Classifier::default();
        assert_eq!(classifier.deno_target("1.33.1"), Target::Deno);
        assert_eq!(classifier.deno_target("1.33.2"), Target::DenoNext);
        assert_eq!(classifier.deno_target("1.40.0"), Target::DenoNext);
        assert_eq!(classifier.deno_target("nightly"), Target::DenoNext);
    }

    #[test]
    fn default_matches_default_config() {
        let from_config = Classifier::new(&ResolverConfig::default()).unwrap();
        let default = Classifier::default();
        assert_eq!(from_config.deno_next_threshold, default.deno_next_threshold);
        assert_eq!(from_config.cli_tool_prefixes, default.cli_tool_prefixes);
    }

    #[test]
    fn literal_profiles_expose_their_target() {
        assert_eq!(
            ClientProfile::literal(Target::Node).literal_target(),
            Some(Target::Node)
        );
        let browser = ClientProfile::Browser {
            engine: Engine::Firefox,
            version: "115.0".into(),
        };
        assert_eq!(browser.literal_target(), None);
    }
}
