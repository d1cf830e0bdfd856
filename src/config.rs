// Copyright 2025 Cowboy AI, LLC.

//! Resolver configuration

use serde::{Deserialize, Serialize};

use crate::errors::{CompatError, CompatResult};
use crate::version::RuntimeVersion;

/// Default boundary between the `deno` and `denonext` aliases.
pub const DEFAULT_DENO_NEXT_THRESHOLD: &str = "1.33.2";

/// Tunables for classification and resolution
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ResolverConfig {
    /// Deno releases strictly below this version resolve to `deno`, all
    /// others (including unparsable versions) to `denonext`
    pub deno_next_threshold: String,
    /// User agent prefixes of command line fetch tools that get `esnext`
    pub cli_tool_prefixes: Vec<String>,
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            deno_next_threshold: DEFAULT_DENO_NEXT_THRESHOLD.to_string(),
            cli_tool_prefixes: vec!["curl/".to_string(), "Wget/".to_string()],
        }
    }
}

impl ResolverConfig {
    /// Load a configuration from JSON; missing fields keep their defaults.
    pub fn from_json_str(raw: &str) -> CompatResult<Self> {
        let config: Self = serde_json::from_str(raw)?;
        config.validate()?;
        Ok(config)
    }

    /// Parsed Deno threshold.
    pub fn threshold(&self) -> CompatResult<RuntimeVersion> {
        RuntimeVersion::parse(&self.deno_next_threshold).map_err(|_| {
            CompatError::InvalidConfig(format!(
                "deno_next_threshold {:?} is not a semantic version",
                self.deno_next_threshold
            ))
        })
    }

    /// Check the configuration is usable.
    pub fn validate(&self) -> CompatResult<()> {
        self.threshold()?;
        if self.cli_tool_prefixes.iter().any(String::is_empty) {
            return Err(CompatError::InvalidConfig(
                "cli_tool_prefixes must not contain an empty prefix".into(),
            ));
        }
        Ok(())
    }
}
