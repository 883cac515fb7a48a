use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// One hierarchy entry as clients send it.
///
/// Both shapes are accepted and normalized by
/// [`HierarchyMap::from_wire`](crate::HierarchyMap::from_wire):
/// - `"<superior id>"` or `null`
/// - `{"superior": "<id>" | null, "subordinates": ["<id>", ...]}`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum HierarchyEntryDto {
    Detailed(DetailedEntryDto),
    Bare(Option<String>),
}

/// Rich entry form. Unknown keys are rejected so a misspelled
/// `subordinates` cannot silently drop reporting lines.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DetailedEntryDto {
    #[serde(default)]
    pub superior: Option<String>,
    #[serde(default)]
    pub subordinates: Vec<String>,
}

/// Wire form of a whole hierarchy, keyed by employee id string.
pub type HierarchyWire = BTreeMap<String, HierarchyEntryDto>;
