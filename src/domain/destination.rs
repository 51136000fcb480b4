//! Destination candidates produced by the suggestion service

use serde::{Deserialize, Serialize};

/// Stay-length band recommended for a destination
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecommendedDays {
    pub min: u32,
    pub ideal: u32,
    pub max: u32,
}

/// One destination candidate
///
/// Immutable once the user selects it; only `name` is required on the wire,
/// everything else degrades to empty.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Destination {
    pub name: String,
    #[serde(default)]
    pub country: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub why_it_matches: String,
    #[serde(default)]
    pub highlights: Vec<String>,
    #[serde(default)]
    pub best_months: Vec<String>,
    #[serde(default)]
    pub recommended_days: Option<RecommendedDays>,
    #[serde(default)]
    pub avg_temp_range: Option<String>,
}

impl Destination {
    /// Minimal destination for the direct-plan path, where the user typed a
    /// name instead of picking a suggested candidate.
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            country: String::new(),
            description: String::new(),
            why_it_matches: String::new(),
            highlights: Vec::new(),
            best_months: Vec::new(),
            recommended_days: None,
            avg_temp_range: None,
        }
    }
}

/// Informational stay-length advice for a chosen destination
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DurationRecommendation {
    pub recommended_days: RecommendedDays,
    #[serde(default)]
    pub reasoning: String,
    #[serde(default)]
    pub tips: Vec<String>,
}
