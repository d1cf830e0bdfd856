// Copyright 2025 Cowboy AI, LLC.

//! Compatibility Oracle
//!
//! Maps a set of engine constraints to the catalog features they leave
//! unsupported. The built-in [`CompatTable`] records, per feature, the first
//! version of each engine that supports it; an engine missing from a
//! feature's row never supports that feature.

use std::collections::BTreeMap;

use crate::engines::Engine;
use crate::features::{Feature, FeatureSet};
use crate::version::EngineVersion;

/// Minimum versions per engine, e.g. `{chrome: 91}` or `{es: 2020}`.
///
/// An engine absent from the map is assumed fully modern.
pub type EngineConstraints = BTreeMap<Engine, EngineVersion>;

/// Source of truth for which engine versions support which features.
///
/// Implementations must be monotonic: raising a constraint's version never
/// grows the unsupported set for that engine.
pub trait CompatibilityOracle: Send + Sync {
    /// Catalog features unsupported under all of `constraints`.
    fn unsupported_features(&self, constraints: &EngineConstraints) -> FeatureSet;

    /// Whether the oracle has any support data for `engine`.
    fn knows_engine(&self, engine: Engine) -> bool;
}

/// One row of the compatibility table.
#[derive(Debug, Clone, Copy)]
pub struct FeatureSupport {
    /// Feature this row describes
    pub feature: Feature,
    /// First supporting version per engine
    pub since: &'static [(Engine, EngineVersion)],
}

macro_rules! ver {
    ($major:literal) => {
        EngineVersion::major($major)
    };
    ($major:literal, $minor:literal) => {
        EngineVersion::minor($major, $minor)
    };
    ($major:literal, $minor:literal, $patch:literal) => {
        EngineVersion::patch($major, $minor, $patch)
    };
}

macro_rules! row {
    ($feature:ident: $($engine:ident[$($v:literal),+]),* $(,)?) => {
        FeatureSupport {
            feature: Feature::$feature,
            since: &[$((Engine::$engine, ver!($($v),+))),*],
        }
    };
}

/// Built-in support data.
pub static JS_TABLE: &[FeatureSupport] = &[
    row!(ArbitraryModuleNamespaceNames: Chrome[90], Edge[90], Es[2022], Firefox[87], Ios[14, 5], Node[16], Opera[76], Safari[14, 1]),
    row!(ArraySpread: Chrome[46], Edge[13], Es[2015], Firefox[36], Ios[10], Node[5], Opera[33], Safari[10]),
    row!(Arrow: Chrome[49], Edge[13], Es[2015], Firefox[45], Ios[10], Node[6], Opera[36], Safari[10]),
    row!(AsyncAwait: Chrome[55], Edge[15], Es[2017], Firefox[52], Ios[11], Node[7, 6], Opera[42], Safari[11]),
    row!(AsyncGenerator: Chrome[63], Edge[79], Es[2018], Firefox[57], Ios[12], Node[10], Opera[50], Safari[12]),
    row!(Bigint: Chrome[67], Edge[79], Es[2020], Firefox[68], Ios[14], Node[10, 4], Opera[54], Safari[14]),
    row!(Class: Chrome[49], Edge[13], Es[2015], Firefox[45], Ios[10], Node[6], Opera[36], Safari[10]),
    row!(ClassField: Chrome[73], Edge[79], Es[2022], Firefox[69], Ios[14], Node[12], Opera[60], Safari[14]),
    row!(ClassPrivateAccessor: Chrome[84], Edge[84], Es[2022], Firefox[90], Ios[15], Node[14, 6], Opera[70], Safari[15]),
    row!(ClassPrivateBrandCheck: Chrome[91], Edge[91], Es[2022], Firefox[90], Ios[15], Node[16, 4], Opera[77], Safari[15]),
    row!(ClassPrivateField: Chrome[84], Edge[84], Es[2022], Firefox[90], Ios[14, 5], Node[14, 6], Opera[70], Safari[14, 1]),
    row!(ClassPrivateMethod: Chrome[84], Edge[84], Es[2022], Firefox[90], Ios[15], Node[14, 6], Opera[70], Safari[15]),
    row!(ClassPrivateStaticAccessor: Chrome[84], Edge[84], Es[2022], Firefox[90], Ios[15], Node[14, 6], Opera[70], Safari[15]),
    row!(ClassPrivateStaticField: Chrome[74], Edge[79], Es[2022], Firefox[90], Ios[14, 5], Node[12], Opera[62], Safari[14, 1]),
    row!(ClassPrivateStaticMethod: Chrome[84], Edge[84], Es[2022], Firefox[90], Ios[15], Node[14, 6], Opera[70], Safari[15]),
    row!(ClassStaticBlocks: Chrome[91], Edge[94], Es[2022], Firefox[93], Ios[16, 4], Node[16, 11], Opera[80], Safari[16, 4]),
    row!(ClassStaticField: Chrome[73], Edge[79], Es[2022], Firefox[75], Ios[14, 5], Node[12], Opera[60], Safari[14, 1]),
    row!(ConstAndLet: Chrome[49], Edge[14], Es[2015], Firefox[51], Ios[11], Node[6], Opera[36], Safari[11]),
    row!(DefaultArgument: Chrome[49], Edge[14], Es[2015], Firefox[53], Ios[10], Node[6], Opera[36], Safari[10]),
    row!(Destructuring: Chrome[51], Edge[18], Es[2015], Firefox[53], Ios[10], Node[6, 5], Opera[38], Safari[10]),
    row!(DynamicImport: Chrome[63], Edge[79], Es[2020], Firefox[67], Ios[11], Node[13, 2], Opera[50], Safari[11, 1]),
    row!(ExponentOperator: Chrome[52], Edge[14], Es[2016], Firefox[52], Ios[10, 3], Node[7], Opera[39], Safari[10, 1]),
    row!(ExportStarAs: Chrome[72], Edge[79], Es[2020], Firefox[80], Ios[14, 5], Node[13, 2], Opera[60], Safari[14, 1]),
    row!(ForAwait: Chrome[63], Edge[79], Es[2018], Firefox[57], Ios[12], Node[10], Opera[50], Safari[12]),
    row!(ForOf: Chrome[51], Edge[15], Es[2015], Firefox[53], Ios[10], Node[6, 5], Opera[38], Safari[10]),
    row!(Generator: Chrome[50], Edge[13], Es[2015], Firefox[53], Ios[10], Node[6], Opera[37], Safari[10]),
    row!(Hashbang: Chrome[74], Edge[79], Es[2023], Firefox[67], Ios[13, 4], Node[12], Opera[62], Safari[13, 1]),
    row!(ImportAssertions: Chrome[91], Edge[91], Node[16, 14], Opera[77]),
    row!(ImportMeta: Chrome[64], Edge[79], Es[2020], Firefox[62], Ios[12], Node[10, 4], Opera[51], Safari[11, 1]),
    row!(InlineScript: Chrome[0], Edge[0], Es[0], Firefox[0], Ios[0], Node[0], Opera[0], Safari[0]),
    row!(LogicalAssignment: Chrome[85], Edge[85], Es[2021], Firefox[79], Ios[14], Node[15], Opera[71], Safari[14]),
    row!(NestedRestBinding: Chrome[49], Edge[14], Es[2016], Firefox[47], Ios[10, 3], Node[6], Opera[36], Safari[10, 1]),
    row!(NewTarget: Chrome[46], Edge[14], Es[2015], Firefox[41], Ios[10], Node[5], Opera[33], Safari[10]),
    row!(NodeColonPrefixImport: Node[14, 13, 1]),
    row!(NodeColonPrefixRequire: Node[16]),
    row!(NullishCoalescing: Chrome[80], Edge[80], Es[2020], Firefox[72], Ios[13, 4], Node[14], Opera[67], Safari[13, 1]),
    row!(ObjectAccessors: Chrome[5], Edge[12], Es[5], Firefox[2], Ios[6], Node[0, 4], Opera[10, 10], Safari[3, 1]),
    row!(ObjectExtensions: Chrome[44], Edge[12], Es[2015], Firefox[34], Ios[10], Node[4], Opera[31], Safari[10]),
    row!(ObjectRestSpread: Chrome[60], Edge[79], Es[2018], Firefox[55], Ios[11, 3], Node[8, 3], Opera[47], Safari[11, 1]),
    row!(OptionalCatchBinding: Chrome[66], Edge[79], Es[2019], Firefox[58], Ios[11, 3], Node[10], Opera[53], Safari[11, 1]),
    row!(OptionalChain: Chrome[91], Edge[91], Es[2020], Firefox[74], Ios[13, 4], Node[16, 1], Opera[77], Safari[13, 1]),
    row!(RegexpDotAllFlag: Chrome[62], Edge[79], Es[2018], Firefox[78], Ios[11, 3], Node[8, 10], Opera[49], Safari[11, 1]),
    row!(RegexpLookbehindAssertions: Chrome[62], Edge[79], Es[2018], Firefox[78], Ios[16, 4], Node[8, 10], Opera[49], Safari[16, 4]),
    row!(RegexpMatchIndices: Chrome[90], Edge[90], Es[2022], Firefox[88], Ios[15], Node[16], Opera[76], Safari[15]),
    row!(RegexpNamedCaptureGroups: Chrome[64], Edge[79], Es[2018], Firefox[78], Ios[11, 3], Node[10], Opera[51], Safari[11, 1]),
    row!(RegexpSetNotation: Chrome[112], Edge[112], Firefox[116], Ios[17], Node[20], Opera[98], Safari[17]),
    row!(RegexpStickyAndUnicodeFlags: Chrome[50], Edge[13], Es[2015], Firefox[46], Ios[12], Node[6], Opera[37], Safari[12]),
    row!(RegexpUnicodePropertyEscapes: Chrome[64], Edge[79], Es[2018], Firefox[78], Ios[11, 3], Node[10], Opera[51], Safari[11, 1]),
    row!(RestArgument: Chrome[47], Edge[12], Es[2015], Firefox[43], Ios[10], Node[6], Opera[34], Safari[10]),
    row!(TemplateLiteral: Chrome[41], Edge[13], Es[2015], Firefox[34], Ios[13], Node[10], Opera[28], Safari[13]),
    row!(TopLevelAwait: Chrome[89], Edge[89], Es[2022], Firefox[89], Ios[15], Node[14, 8], Opera[75], Safari[15]),
    row!(TypeofExoticObjectIsObject: Chrome[0], Edge[0], Es[2020], Firefox[0], Ios[0], Node[0], Opera[0], Safari[0]),
    row!(UnicodeEscapes: Chrome[44], Edge[12], Es[2015], Firefox[53], Ios[9], Node[4], Opera[31], Safari[9]),
];

/// Table-backed compatibility oracle.
#[derive(Debug, Clone, Copy)]
pub struct CompatTable {
    rows: &'static [FeatureSupport],
}

impl CompatTable {
    /// Oracle over a custom table.
    pub const fn new(rows: &'static [FeatureSupport]) -> Self {
        Self { rows }
    }

    /// Oracle over the built-in table.
    pub const fn builtin() -> Self {
        Self::new(JS_TABLE)
    }

    /// First version of `engine` that supports `feature`, if any.
    pub fn supported_since(&self, feature: Feature, engine: Engine) -> Option<EngineVersion> {
        self.rows
            .iter()
            .filter(|row| row.feature == feature)
            .flat_map(|row| row.since.iter())
            .find(|(e, _)| *e == engine)
            .map(|(_, version)| *version)
    }
}

impl Default for CompatTable {
    fn default() -> Self {
        Self::builtin()
    }
}

impl CompatibilityOracle for CompatTable {
    fn unsupported_features(&self, constraints: &EngineConstraints) -> FeatureSet {
        let mut unsupported = FeatureSet::empty();
        for row in self.rows {
            // Only meaningful to the CSS pipeline; never narrows a JS target.
            if row.feature == Feature::InlineScript {
                continue;
            }
            let lacking = constraints.iter().any(|(engine, version)| {
                match row.since.iter().find(|(e, _)| e == engine) {
                    Some((_, since)) => !version.meets(since),
                    None => true,
                }
            });
            if lacking {
                unsupported.insert(row.feature);
            }
        }
        unsupported
    }

    fn knows_engine(&self, engine: Engine) -> bool {
        self.rows
            .iter()
            .any(|row| row.since.iter().any(|(e, _)| *e == engine))
    }
}
