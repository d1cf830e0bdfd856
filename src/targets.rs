// Copyright 2025 Cowboy AI, LLC.

//! Build targets and the Target Ladder

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::errors::{CompatError, CompatResult};
use crate::version::EngineVersion;

/// Identifier handed to the transpiler: a yearly specification level or an
/// evergreen alias.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Target {
    /// ECMAScript 2015
    Es2015,
    /// ECMAScript 2016
    Es2016,
    /// ECMAScript 2017
    Es2017,
    /// ECMAScript 2018
    Es2018,
    /// ECMAScript 2019
    Es2019,
    /// ECMAScript 2020
    Es2020,
    /// ECMAScript 2021
    Es2021,
    /// ECMAScript 2022
    Es2022,
    /// Latest syntax, no narrowing
    EsNext,
    /// Deno releases before the configured threshold
    Deno,
    /// Deno releases at or after the configured threshold
    DenoNext,
    /// Node.js, Bun and undici clients
    Node,
}

/// Candidate specification levels, newest first.
pub const TARGET_LADDER: [Target; 8] = [
    Target::Es2022,
    Target::Es2021,
    Target::Es2020,
    Target::Es2019,
    Target::Es2018,
    Target::Es2017,
    Target::Es2016,
    Target::Es2015,
];

/// Runtime aliases assumed to track the newest syntax.
pub const EVERGREEN_ALIASES: [Target; 3] = [Target::Deno, Target::DenoNext, Target::Node];

impl Target {
    /// Every target identifier.
    pub const ALL: [Target; 12] = [
        Target::Es2015,
        Target::Es2016,
        Target::Es2017,
        Target::Es2018,
        Target::Es2019,
        Target::Es2020,
        Target::Es2021,
        Target::Es2022,
        Target::EsNext,
        Target::Deno,
        Target::DenoNext,
        Target::Node,
    ];

    /// Canonical token.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Es2015 => "es2015",
            Self::Es2016 => "es2016",
            Self::Es2017 => "es2017",
            Self::Es2018 => "es2018",
            Self::Es2019 => "es2019",
            Self::Es2020 => "es2020",
            Self::Es2021 => "es2021",
            Self::Es2022 => "es2022",
            Self::EsNext => "esnext",
            Self::Deno => "deno",
            Self::DenoNext => "denonext",
            Self::Node => "node",
        }
    }

    /// Specification year constraining the oracle, for the yearly levels.
    pub fn spec_level(self) -> Option<EngineVersion> {
        let year = match self {
            Self::Es2015 => 2015,
            Self::Es2016 => 2016,
            Self::Es2017 => 2017,
            Self::Es2018 => 2018,
            Self::Es2019 => 2019,
            Self::Es2020 => 2020,
            Self::Es2021 => 2021,
            Self::Es2022 => 2022,
            Self::EsNext | Self::Deno | Self::DenoNext | Self::Node => return None,
        };
        Some(EngineVersion::major(year))
    }

    /// Syntax level the compiler applies; evergreen aliases compile as `esnext`.
    pub fn compile_level(self) -> Target {
        if self.is_evergreen() {
            Target::EsNext
        } else {
            self
        }
    }

    /// Whether this is one of the runtime evergreen aliases.
    pub fn is_evergreen(self) -> bool {
        EVERGREEN_ALIASES.contains(&self)
    }

    /// Whether this is a rung of the Target Ladder.
    pub fn is_ladder_rung(self) -> bool {
        self.spec_level().is_some()
    }
}

impl fmt::Display for Target {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Target {
    type Err = CompatError;

    fn from_str(s: &str) -> CompatResult<Self> {
        Self::ALL
            .into_iter()
            .find(|target| target.as_str() == s)
            .ok_or_else(|| CompatError::UnknownTarget(s.to_string()))
    }
}
