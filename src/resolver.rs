// Copyright 2025 Cowboy AI, LLC.

//! Resolver: pick the most modern ladder target a client can run.
//!
//! The client's unsupported-feature count is compared against each ladder
//! rung's count, newest first, and the first rung whose count is at least the
//! client's wins. This compares cardinalities, not set containment: two sets
//! of the same size but different members are treated as equivalent.

use serde::{Deserialize, Serialize};
use tracing::{debug, info, trace, warn};

use crate::classifier::{Classifier, ClientProfile, FALLBACK_TARGET};
use crate::compat_table::{CompatTable, CompatibilityOracle, EngineConstraints};
use crate::config::ResolverConfig;
use crate::engines::Engine;
use crate::errors::{CompatError, CompatResult};
use crate::targets::{Target, TARGET_LADDER};
use crate::version::EngineVersion;

/// How a target was chosen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum TargetResolution {
    /// The classifier already named the target
    Literal {
        /// Target served
        target: Target,
    },
    /// A ladder rung satisfied the client
    Rung {
        /// Target served
        target: Target,
        /// Unsupported features of the client
        client_unsupported: usize,
        /// Unsupported features of the chosen rung
        target_unsupported: usize,
    },
    /// No rung satisfied the client
    Fallback {
        /// Unsupported features of the client
        client_unsupported: usize,
    },
}

impl TargetResolution {
    /// The target to serve.
    pub fn target(&self) -> Target {
        match self {
            TargetResolution::Literal { target } | TargetResolution::Rung { target, .. } => *target,
            TargetResolution::Fallback { .. } => FALLBACK_TARGET,
        }
    }
}

/// Stateless target resolver over a compatibility oracle.
///
/// Ladder counts are computed once at construction; afterwards the resolver
/// is read-only and may be shared across threads.
#[derive(Debug, Clone)]
pub struct Resolver<O = CompatTable> {
    oracle: O,
    classifier: Classifier,
    ladder: Vec<(Target, usize)>,
}

impl Resolver<CompatTable> {
    /// Resolver over the built-in table with default configuration.
    pub fn builtin() -> CompatResult<Self> {
        Self::new(CompatTable::builtin(), &ResolverConfig::default())
    }
}

impl<O: CompatibilityOracle> Resolver<O> {
    /// Validate the oracle against every engine and target this crate emits,
    /// then precompute the ladder counts.
    pub fn new(oracle: O, config: &ResolverConfig) -> CompatResult<Self> {
        let classifier = Classifier::new(config)?;

        for engine in Engine::BROWSERS.into_iter().chain([Engine::Node]) {
            if !oracle.knows_engine(engine) {
                return Err(CompatError::UnregisteredEngine(engine));
            }
        }
        if !oracle.knows_engine(Engine::Es) {
            return Err(CompatError::UnregisteredTarget(TARGET_LADDER[0]));
        }

        let mut ladder = Vec::with_capacity(TARGET_LADDER.len());
        for target in TARGET_LADDER {
            let level = target
                .spec_level()
                .ok_or(CompatError::UnregisteredTarget(target))?;
            let constraints = EngineConstraints::from([(Engine::Es, level)]);
            ladder.push((target, oracle.unsupported_features(&constraints).count()));
        }

        info!(
            ladder = ?ladder,
            deno_next_threshold = %config.deno_next_threshold,
            "compatibility resolver ready"
        );
        Ok(Self {
            oracle,
            classifier,
            ladder,
        })
    }

    /// The oracle backing this resolver.
    pub fn oracle(&self) -> &O {
        &self.oracle
    }

    /// Ladder rungs with their unsupported-feature counts, newest first.
    pub fn ladder(&self) -> &[(Target, usize)] {
        &self.ladder
    }

    /// Classify a user agent without resolving it.
    pub fn classify(&self, ua: &str) -> ClientProfile {
        self.classifier.classify(ua)
    }

    /// Unsupported-feature count for a target. `esnext` and the evergreen
    /// aliases constrain nothing and count zero.
    pub fn unsupported_for_target(&self, target: Target) -> usize {
        self.ladder
            .iter()
            .find(|(rung, _)| *rung == target)
            .map_or(0, |(_, count)| *count)
    }

    /// Unsupported-feature count for an engine at a reported version.
    ///
    /// An unparsable version leaves the engine unconstrained (count zero).
    pub fn unsupported_for_engine(&self, engine: Engine, version: &str) -> usize {
        let mut constraints = EngineConstraints::new();
        match EngineVersion::parse(version) {
            Ok(parsed) => {
                constraints.insert(engine, parsed);
            }
            Err(_) => warn!(
                engine = %engine,
                version,
                "unparsable engine version, treating engine as unconstrained"
            ),
        }
        self.oracle.unsupported_features(&constraints).count()
    }

    /// Walk the ladder for an engine at a reported version.
    pub fn explain_engine(&self, engine: Engine, version: &str) -> TargetResolution {
        let client_unsupported = self.unsupported_for_engine(engine, version);
        for &(target, target_unsupported) in &self.ladder {
            trace!(%target, client_unsupported, target_unsupported, "comparing ladder rung");
            if client_unsupported <= target_unsupported {
                debug!(
                    %engine,
                    version,
                    client_unsupported,
                    %target,
                    "resolved ladder target"
                );
                return TargetResolution::Rung {
                    target,
                    client_unsupported,
                    target_unsupported,
                };
            }
        }
        debug!(%engine, version, client_unsupported, "no ladder rung satisfied client");
        TargetResolution::Fallback { client_unsupported }
    }

    /// Explain how a classified profile resolves.
    pub fn explain(&self, profile: &ClientProfile) -> TargetResolution {
        match profile {
            ClientProfile::Literal { target } => TargetResolution::Literal { target: *target },
            ClientProfile::Browser { engine, version } => self.explain_engine(*engine, version),
        }
    }

    /// Resolve a classified profile to a target.
    pub fn resolve(&self, profile: &ClientProfile) -> Target {
        self.explain(profile).target()
    }

    /// Resolve an engine and reported version directly.
    pub fn resolve_engine(&self, engine: Engine, version: &str) -> Target {
        self.explain_engine(engine, version).target()
    }

    /// Classify and resolve a raw user agent.
    pub fn resolve_user_agent(&self, ua: &str) -> Target {
        self.resolve(&self.classify(ua))
    }
}
