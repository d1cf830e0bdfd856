// Copyright 2025 Cowboy AI, LLC.

//! # ESM Compat
//!
//! Picks the most modern ECMAScript build target a client can run, given only
//! its user agent string, so a module-serving pipeline transpiles no further
//! than the client needs.
//!
//! The pieces, leaves first:
//! - **Feature Catalog**: the fixed list of tracked language features
//! - **Compatibility Oracle**: which engine versions support which features
//! - **Version Parser**: strict `major[.minor[.patch]]` engine versions
//! - **User-Agent Classifier**: raw user agent to a literal target or a
//!   browser engine and version
//! - **Target Ladder**: `es2022` down to `es2015`, plus evergreen aliases
//! - **Resolver**: walks the ladder comparing unsupported-feature counts
//!
//! ```
//! use esm_compat::{Resolver, Target};
//!
//! let resolver = Resolver::builtin().unwrap();
//! assert_eq!(resolver.resolve_user_agent("curl/7.64.1"), Target::EsNext);
//! assert_eq!(resolver.resolve_user_agent("Deno/1.30.0"), Target::Deno);
//! ```
//!
//! Every per-request operation is total: malformed input degrades to the most
//! permissive target instead of failing. Errors only arise from parsing
//! identifiers and from validating a resolver at startup.

#![warn(missing_docs)]

mod classifier;
mod compat_table;
mod config;
mod engines;
mod errors;
mod features;
mod resolver;
mod targets;
mod user_agent;
mod version;

pub use classifier::{browser_family, Classifier, ClientProfile, FALLBACK_TARGET};
pub use compat_table::{
    CompatTable, CompatibilityOracle, EngineConstraints, FeatureSupport, JS_TABLE,
};
pub use config::{ResolverConfig, DEFAULT_DENO_NEXT_THRESHOLD};
pub use engines::Engine;
pub use errors::{CompatError, CompatResult};
pub use features::{Feature, FeatureSet, FEATURE_CATALOG};
pub use resolver::{Resolver, TargetResolution};
pub use targets::{Target, EVERGREEN_ALIASES, TARGET_LADDER};
pub use user_agent::{parse_browser, parse_sections, BrowserInfo, Section};
pub use version::{EngineVersion, RuntimeVersion};
