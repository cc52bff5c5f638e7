//! Canonical key ordering by path context.
//!
//! Each known context has a prefix of keys that come first, in the listed
//! order; every other key follows in lexicographic order. The children of
//! `Resources` are ordered by dependency instead (see [`Ordering`]).

use crate::constants::{
    CONDITIONS_KEY, DESCRIPTION_KEY, FORMAT_VERSION_KEY, MAPPINGS_KEY, METADATA_KEY,
    OUTPUTS_KEY, PARAMETERS_KEY, RESOURCES_KEY, TRANSFORM_KEY,
};
use crate::template::Path;

const ROOT_KEYS: &[&str] = &[
    FORMAT_VERSION_KEY,
    DESCRIPTION_KEY,
    TRANSFORM_KEY,
    PARAMETERS_KEY,
    METADATA_KEY,
    MAPPINGS_KEY,
    CONDITIONS_KEY,
    RESOURCES_KEY,
    OUTPUTS_KEY,
];
const PARAMETER_KEYS: &[&str] = &["Type", "Default"];
const RESOURCE_KEYS: &[&str] = &["Type"];
const OUTPUT_KEYS: &[&str] = &["Description", "Value", "Export"];
const POLICY_KEYS: &[&str] = &["PolicyName", "PolicyDocument"];
const POLICY_DOCUMENT_KEYS: &[&str] = &["Version", "Id", "Statement"];
const STATEMENT_KEYS: &[&str] = &[
    "Sid",
    "Effect",
    "Principal",
    "NotPrincipal",
    "Action",
    "NotAction",
    "Resource",
    "NotResource",
    "Condition",
];

/// Ordering state shared by one formatting run.
#[derive(Debug, Clone, Default)]
pub struct Ordering {
    /// Keep source order everywhere
    pub unsorted: bool,
    /// Resource names in dependency order; `None` sorts resources by name
    pub resources: Option<Vec<String>>,
}

impl Ordering {
    /// Order `keys` of the mapping at `path`.
    pub fn keys<'k>(&self, path: &Path, keys: impl IntoIterator<Item = &'k str>) -> Vec<&'k str> {
        let mut keys: Vec<&str> = keys.into_iter().collect();
        if self.unsorted {
            return keys;
        }

        if path.len() == 1
            && path.key_at(0) == Some(RESOURCES_KEY)
            && let Some(order) = &self.resources
        {
            keys.sort_by_key(|key| {
                let rank = order.iter().position(|name| name.as_str() == *key);
                (rank.unwrap_or(usize::MAX), *key)
            });
            return keys;
        }

        let prefix = known_prefix(path);
        keys.sort_by_key(|key| {
            let rank = prefix.iter().position(|known| known == key);
            (rank.unwrap_or(usize::MAX), *key)
        });
        keys
    }
}

fn is_policy_document(key: Option<&str>) -> bool {
    matches!(key, Some("PolicyDocument" | "AssumeRolePolicyDocument"))
}

/// Keys that lead the mapping at `path`, in order.
fn known_prefix(path: &Path) -> &'static [&'static str] {
    if path.is_empty() {
        return ROOT_KEYS;
    }

    if path.len() == 2 {
        match path.key_at(0) {
            Some(PARAMETERS_KEY) => return PARAMETER_KEYS,
            Some(RESOURCES_KEY) => return RESOURCE_KEYS,
            Some(OUTPUTS_KEY) => return OUTPUT_KEYS,
            _ => {}
        }
    }

    if path.len() == 5
        && path.key_at(0) == Some(RESOURCES_KEY)
        && path.key_at(2) == Some("Properties")
        && path.key_at(3) == Some("Policies")
        && path.is_index_from_end(0)
    {
        return POLICY_KEYS;
    }

    if is_policy_document(path.key_from_end(0)) {
        return POLICY_DOCUMENT_KEYS;
    }

    if path.is_index_from_end(0)
        && path.key_from_end(1) == Some("Statement")
        && is_policy_document(path.key_from_end(2))
    {
        return STATEMENT_KEYS;
    }

    &[]
}
