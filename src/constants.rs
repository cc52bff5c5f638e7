//! Global constants used throughout the cfnkit codebase.
//!
//! Template section names, intrinsic function names and the handful of
//! environment variables and markers shared across modules live here so the
//! parser, graph and formatter agree on spelling.

/// Prefix shared by every pseudo-parameter (`AWS::Region`, `AWS::StackName`, ...).
///
/// A reference target carrying this prefix is always valid without being
/// declared in the Parameters section.
pub const PSEUDO_PARAMETER_PREFIX: &str = "AWS::";

/// Prefix of every intrinsic function key except `Ref`.
pub const INTRINSIC_PREFIX: &str = "Fn::";

/// Short names of the recognized intrinsic functions, in YAML tag form (without `!`).
pub const INTRINSIC_FUNCTIONS: &[&str] = &[
    "And",
    "Base64",
    "Cidr",
    "Equals",
    "FindInMap",
    "GetAZs",
    "GetAtt",
    "If",
    "ImportValue",
    "Join",
    "Not",
    "Or",
    "Ref",
    "Select",
    "Split",
    "Sub",
    "Transform",
];

/// Template format version key; always written first.
pub const FORMAT_VERSION_KEY: &str = "AWSTemplateFormatVersion";
/// Free-text template description.
pub const DESCRIPTION_KEY: &str = "Description";
/// Macros applied to the template before deployment.
pub const TRANSFORM_KEY: &str = "Transform";
/// Section declaring input parameters.
pub const PARAMETERS_KEY: &str = "Parameters";
/// Section of arbitrary template metadata.
pub const METADATA_KEY: &str = "Metadata";
/// Section of static lookup tables for `Fn::FindInMap`.
pub const MAPPINGS_KEY: &str = "Mappings";
/// Section of named conditions.
pub const CONDITIONS_KEY: &str = "Conditions";
/// Section declaring resources.
pub const RESOURCES_KEY: &str = "Resources";
/// Section declaring stack outputs.
pub const OUTPUTS_KEY: &str = "Outputs";

/// Resource attribute listing explicit dependencies.
pub const DEPENDS_ON_KEY: &str = "DependsOn";

/// Template format version written by the builder.
pub const DEFAULT_FORMAT_VERSION: &str = "2010-09-09";

/// Placeholder the builder writes for string-like primitive properties.
pub const PLACEHOLDER_STRING: &str = "CHANGEME";

/// Literal the builder substitutes for a property type that appears in its own ancestry.
pub const CIRCULAR_MARKER: &str = "CIRCULAR";

/// Environment variable overriding the configuration file location.
pub const CONFIG_ENV_VAR: &str = "CFNKIT_CONFIG";

/// Maximum allowed Levenshtein distance as a percentage of the target length
/// when suggesting names for unresolved references and unknown types.
pub const SIMILARITY_THRESHOLD_PERCENT: usize = 50;
