// Copyright 2025 Cowboy AI, LLC.

//! Feature Catalog: the fixed set of language features tracked per engine.
//!
//! The same catalog counts unsupported features for both clients and ladder
//! targets; counts taken against different catalogs are not comparable.

use std::fmt;

use serde::{Deserialize, Serialize};

macro_rules! feature_catalog {
    ($($variant:ident => $token:literal,)+) => {
        /// One discrete, named language capability.
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        #[serde(rename_all = "snake_case")]
        #[allow(missing_docs)]
        pub enum Feature {
            $($variant,)+
        }

        /// Every tracked feature in catalog order.
        pub const FEATURE_CATALOG: &[Feature] = &[$(Feature::$variant,)+];

        impl Feature {
            /// Canonical snake_case token.
            pub fn as_str(self) -> &'static str {
                match self {
                    $(Self::$variant => $token,)+
                }
            }
        }
    };
}

feature_catalog! {
    ArbitraryModuleNamespaceNames => "arbitrary_module_namespace_names",
    ArraySpread => "array_spread",
    Arrow => "arrow",
    AsyncAwait => "async_await",
    AsyncGenerator => "async_generator",
    Bigint => "bigint",
    Class => "class",
    ClassField => "class_field",
    ClassPrivateAccessor => "class_private_accessor",
    ClassPrivateBrandCheck => "class_private_brand_check",
    ClassPrivateField => "class_private_field",
    ClassPrivateMethod => "class_private_method",
    ClassPrivateStaticAccessor => "class_private_static_accessor",
    ClassPrivateStaticField => "class_private_static_field",
    ClassPrivateStaticMethod => "class_private_static_method",
    ClassStaticBlocks => "class_static_blocks",
    ClassStaticField => "class_static_field",
    ConstAndLet => "const_and_let",
    DefaultArgument => "default_argument",
    Destructuring => "destructuring",
    DynamicImport => "dynamic_import",
    ExponentOperator => "exponent_operator",
    ExportStarAs => "export_star_as",
    ForAwait => "for_await",
    ForOf => "for_of",
    Generator => "generator",
    Hashbang => "hashbang",
    ImportAssertions => "import_assertions",
    ImportMeta => "import_meta",
    InlineScript => "inline_script",
    LogicalAssignment => "logical_assignment",
    NestedRestBinding => "nested_rest_binding",
    NewTarget => "new_target",
    NodeColonPrefixImport => "node_colon_prefix_import",
    NodeColonPrefixRequire => "node_colon_prefix_require",
    NullishCoalescing => "nullish_coalescing",
    ObjectAccessors => "object_accessors",
    ObjectExtensions => "object_extensions",
    ObjectRestSpread => "object_rest_spread",
    OptionalCatchBinding => "optional_catch_binding",
    OptionalChain => "optional_chain",
    RegexpDotAllFlag => "regexp_dot_all_flag",
    RegexpLookbehindAssertions => "regexp_lookbehind_assertions",
    RegexpMatchIndices => "regexp_match_indices",
    RegexpNamedCaptureGroups => "regexp_named_capture_groups",
    RegexpSetNotation => "regexp_set_notation",
    RegexpStickyAndUnicodeFlags => "regexp_sticky_and_unicode_flags",
    RegexpUnicodePropertyEscapes => "regexp_unicode_property_escapes",
    RestArgument => "rest_argument",
    TemplateLiteral => "template_literal",
    TopLevelAwait => "top_level_await",
    TypeofExoticObjectIsObject => "typeof_exotic_object_is_object",
    UnicodeEscapes => "unicode_escapes",
}

impl Feature {
    /// Position of this feature in the catalog.
    pub fn index(self) -> usize {
        self as usize
    }

    fn bit(self) -> u64 {
        1u64 << self.index()
    }
}

impl fmt::Display for Feature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A set of catalog features, stored as a bitmask over catalog positions.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct FeatureSet(u64);

impl FeatureSet {
    /// The empty set.
    pub const fn empty() -> Self {
        Self(0)
    }

    /// Add a feature.
    pub fn insert(&mut self, feature: Feature) {
        self.0 |= feature.bit();
    }

    /// Membership test.
    pub fn contains(&self, feature: Feature) -> bool {
        self.0 & feature.bit() != 0
    }

    /// Number of catalog features in the set.
    pub fn count(&self) -> usize {
        FEATURE_CATALOG.iter().filter(|f| self.contains(**f)).count()
    }

    /// Whether no feature is present.
    pub fn is_empty(&self) -> bool {
        self.0 == 0
    }

    /// Iterate members in catalog order.
    pub fn iter(&self) -> impl Iterator<Item = Feature> + '_ {
        FEATURE_CATALOG.iter().copied().filter(|f| self.contains(*f))
    }

    /// Whether every member of `self` is also in `other`.
    pub fn is_subset(&self, other: &FeatureSet) -> bool {
        self.0 & !other.0 == 0
    }
}

impl FromIterator<Feature> for FeatureSet {
    fn from_iter<I: IntoIterator<Item = Feature>>(iter: I) -> Self {
        let mut set = FeatureSet::empty();
        for feature in iter {
            set.insert(feature);
        }
        set
    }
}
