// Copyright 2025 Cowboy AI, LLC.

//! Version grammars.
//!
//! [`EngineVersion`] is the strict one-to-three group numeric form used for
//! engine constraints. [`RuntimeVersion`] is the semantic version embedded in
//! server runtime user agents, compared with standard semver precedence.

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;
use std::sync::OnceLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::errors::{CompatError, CompatResult};

fn engine_version_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"^(\d+)(?:\.(\d+))?(?:\.(\d+))?$").expect("engine version pattern is valid")
    })
}

fn runtime_version_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(
            r"^v?(\d+)(?:\.(\d+))?(?:\.(\d+))?(?:-([0-9A-Za-z.-]+))?(?:\+[0-9A-Za-z.-]+)?$",
        )
        .expect("runtime version pattern is valid")
    })
}

fn component(caps: &regex::Captures<'_>, index: usize, raw: &str) -> CompatResult<Option<u32>> {
    caps.get(index)
        .map(|m| {
            m.as_str()
                .parse::<u32>()
                .map_err(|_| CompatError::InvalidVersion(raw.to_string()))
        })
        .transpose()
}

/// Numeric engine version with optional trailing components.
///
/// A missing component means "unconstrained at that granularity": `14`
/// meets a requirement of `14.5`, while `14.0` does not.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EngineVersion {
    /// Major component
    pub major: u32,
    /// Minor component, if reported
    pub minor: Option<u32>,
    /// Patch component, if reported (only present with a minor)
    pub patch: Option<u32>,
}

impl EngineVersion {
    /// A bare major version.
    pub const fn major(major: u32) -> Self {
        Self {
            major,
            minor: None,
            patch: None,
        }
    }

    /// A major.minor version.
    pub const fn minor(major: u32, minor: u32) -> Self {
        Self {
            major,
            minor: Some(minor),
            patch: None,
        }
    }

    /// A full major.minor.patch version.
    pub const fn patch(major: u32, minor: u32, patch: u32) -> Self {
        Self {
            major,
            minor: Some(minor),
            patch: Some(patch),
        }
    }

    /// Parse one to three dot-separated integer groups and nothing else.
    pub fn parse(raw: &str) -> CompatResult<Self> {
        let caps = engine_version_pattern()
            .captures(raw)
            .ok_or_else(|| CompatError::InvalidVersion(raw.to_string()))?;
        let major = component(&caps, 1, raw)?
            .ok_or_else(|| CompatError::InvalidVersion(raw.to_string()))?;
        Ok(Self {
            major,
            minor: component(&caps, 2, raw)?,
            patch: component(&caps, 3, raw)?,
        })
    }

    /// Components that are present, most significant first.
    pub fn components(&self) -> Vec<u32> {
        let mut parts = vec![self.major];
        if let Some(minor) = self.minor {
            parts.push(minor);
            if let Some(patch) = self.patch {
                parts.push(patch);
            }
        }
        parts
    }

    /// Compare only the components both versions carry.
    pub fn cmp_shared(&self, other: &Self) -> Ordering {
        self.components()
            .iter()
            .zip(other.components().iter())
            .map(|(a, b)| a.cmp(b))
            .find(|ord| ord.is_ne())
            .unwrap_or(Ordering::Equal)
    }

    /// Whether this version is at least `required`, at shared precision.
    pub fn meets(&self, required: &Self) -> bool {
        self.cmp_shared(required).is_ge()
    }
}

impl fmt::Display for EngineVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.major)?;
        if let Some(minor) = self.minor {
            write!(f, ".{minor}")?;
            if let Some(patch) = self.patch {
                write!(f, ".{patch}")?;
            }
        }
        Ok(())
    }
}

impl FromStr for EngineVersion {
    type Err = CompatError;

    fn from_str(s: &str) -> CompatResult<Self> {
        Self::parse(s)
    }
}

/// Pre-release identifier, ordered per semver precedence rules.
#[derive(Debug, Clone, PartialEq, Eq)]
enum PreReleaseId {
    Numeric(u64),
    Alpha(String),
}

impl Ord for PreReleaseId {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self, other) {
            (Self::Numeric(a), Self::Numeric(b)) => a.cmp(b),
            (Self::Numeric(_), Self::Alpha(_)) => Ordering::Less,
            (Self::Alpha(_), Self::Numeric(_)) => Ordering::Greater,
            (Self::Alpha(a), Self::Alpha(b)) => a.cmp(b),
        }
    }
}

impl PartialOrd for PreReleaseId {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Semantic version of a server runtime, e.g. the `1.33.2` in `Deno/1.33.2`.
///
/// Missing minor or patch components read as zero, a leading `v` is allowed,
/// and build metadata is ignored for ordering.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuntimeVersion {
    major: u64,
    minor: u64,
    patch: u64,
    pre: Vec<PreReleaseId>,
}

impl RuntimeVersion {
    /// Construct a release version.
    pub const fn new(major: u64, minor: u64, patch: u64) -> Self {
        Self {
            major,
            minor,
            patch,
            pre: Vec::new(),
        }
    }

    /// Parse a semantic version string.
    pub fn parse(raw: &str) -> CompatResult<Self> {
        let invalid = || CompatError::InvalidVersion(raw.to_string());
        let caps = runtime_version_pattern().captures(raw).ok_or_else(invalid)?;
        let number = |index: usize| -> CompatResult<u64> {
            caps.get(index)
                .map_or(Ok(0), |m| m.as_str().parse::<u64>().map_err(|_| invalid()))
        };
        let pre = match caps.get(4) {
            Some(m) => m
                .as_str()
                .split('.')
                .map(|id| {
                    if id.is_empty() {
                        Err(invalid())
                    } else if id.bytes().all(|b| b.is_ascii_digit()) {
                        id.parse().map(PreReleaseId::Numeric).map_err(|_| invalid())
                    } else {
                        Ok(PreReleaseId::Alpha(id.to_string()))
                    }
                })
                .collect::<CompatResult<Vec<_>>>()?,
            None => Vec::new(),
        };
        Ok(Self {
            major: number(1)?,
            minor: number(2)?,
            patch: number(3)?,
            pre,
        })
    }

    /// Whether this is a pre-release.
    pub fn is_prerelease(&self) -> bool {
        !self.pre.is_empty()
    }
}

impl Ord for RuntimeVersion {
    fn cmp(&self, other: &Self) -> Ordering {
        (self.major, self.minor, self.patch)
            .cmp(&(other.major, other.minor, other.patch))
            .then_with(|| match (self.pre.is_empty(), other.pre.is_empty()) {
                (true, true) => Ordering::Equal,
                (true, false) => Ordering::Greater,
                (false, true) => Ordering::Less,
                (false, false) => self.pre.cmp(&other.pre),
            })
    }
}

impl PartialOrd for RuntimeVersion {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for RuntimeVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}", self.major, self.minor, self.patch)?;
        for (i, id) in self.pre.iter().enumerate() {
            f.write_str(if i == 0 { "-" } else { "." })?;
            match id {
                PreReleaseId::Numeric(n) => write!(f, "{n}")?,
                PreReleaseId::Alpha(s) => f.write_str(s)?,
            }
        }
        Ok(())
    }
}

impl FromStr for RuntimeVersion {
    type Err = CompatError;

    fn from_str(s: &str) -> CompatResult<Self> {
        Self::parse(s)
    }
}
