use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Position of an entity in the input; stable for the whole run.
pub type EntityId = usize;

/// Label attached to every proximity conflict in reports.
pub const CONFLICT_TYPE: &str = "TOO CLOSE";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Entity {
    pub name: String,
    pub latitude: f64,
    pub longitude: f64,
}

impl Entity {
    pub fn new(name: impl Into<String>, latitude: f64, longitude: f64) -> Self {
        Self {
            name: name.into(),
            latitude,
            longitude,
        }
    }

    pub fn has_valid_range(&self) -> bool {
        (-90.0..=90.0).contains(&self.latitude) && (-180.0..=180.0).contains(&self.longitude)
    }
}

/// Unordered pair of entities closer than the threshold. Always `a < b`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Conflict {
    pub a: EntityId,
    pub b: EntityId,
    pub distance_km: f64,
}

/// Output of conflict detection: conflicts sorted by ascending distance plus
/// every entity that appears in at least one of them.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ConflictSet {
    pub conflicts: Vec<Conflict>,
    pub conflicted: BTreeSet<EntityId>,
}

impl ConflictSet {
    pub fn len(&self) -> usize {
        self.conflicts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.conflicts.is_empty()
    }

    pub fn is_conflicted(&self, id: EntityId) -> bool {
        self.conflicted.contains(&id)
    }
}

/// Color (slot) per entity, indexed by `EntityId`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Coloring {
    pub colors: Vec<usize>,
}

impl Coloring {
    pub fn from_colors(colors: Vec<usize>) -> Self {
        Self { colors }
    }

    pub fn color_of(&self, id: EntityId) -> Option<usize> {
        self.colors.get(id).copied()
    }

    /// Number of distinct colors (max color + 1, since colors are dense from 0).
    pub fn colors_used(&self) -> usize {
        self.colors.iter().max().map(|&c| c + 1).unwrap_or(0)
    }

    pub fn len(&self) -> usize {
        self.colors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }
}

/// CSV header names holding the entity fields.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnMapping {
    pub name: String,
    pub latitude: String,
    pub longitude: String,
}

impl Default for ColumnMapping {
    fn default() -> Self {
        Self {
            name: "Team".to_string(),
            latitude: "Latitude".to_string(),
            longitude: "Longitude".to_string(),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
#[serde(rename_all = "snake_case")]
pub enum StrategyKind {
    #[default]
    #[cfg_attr(feature = "cli", value(name = "largest_first"))]
    LargestFirst,
    Dsatur,
}

impl StrategyKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            StrategyKind::LargestFirst => "largest_first",
            StrategyKind::Dsatur => "dsatur",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
#[serde(rename_all = "snake_case")]
pub enum OutputFormat {
    Text,
    Csv,
    Json,
    Dot,
}

impl OutputFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            OutputFormat::Text => "text",
            OutputFormat::Csv => "csv",
            OutputFormat::Json => "json",
            OutputFormat::Dot => "dot",
        }
    }
}
