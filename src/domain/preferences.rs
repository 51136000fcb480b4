//! Trip preference types accumulated across wizard steps

use serde::{Deserialize, Serialize};

/// Longest accepted vibe description
pub const MAX_VIBE_LEN: usize = 500;

/// Broad destination category
///
/// `Auto` defers category inference to the suggestion service rather than
/// guessing client-side.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DestinationType {
    #[default]
    Auto,
    Beach,
    Mountain,
    City,
    Cultural,
    Adventure,
    Nature,
    Island,
}

impl DestinationType {
    /// Wire representation used in query parameters
    pub fn as_str(&self) -> &'static str {
        match self {
            DestinationType::Auto => "auto",
            DestinationType::Beach => "beach",
            DestinationType::Mountain => "mountain",
            DestinationType::City => "city",
            DestinationType::Cultural => "cultural",
            DestinationType::Adventure => "adventure",
            DestinationType::Nature => "nature",
            DestinationType::Island => "island",
        }
    }
}

/// Daily spend bracket
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum BudgetRange {
    #[serde(rename = "budget")]
    Budget,
    #[default]
    #[serde(rename = "mid-range")]
    MidRange,
    #[serde(rename = "luxury")]
    Luxury,
}

impl BudgetRange {
    pub fn as_str(&self) -> &'static str {
        match self {
            BudgetRange::Budget => "budget",
            BudgetRange::MidRange => "mid-range",
            BudgetRange::Luxury => "luxury",
        }
    }
}

/// Pace and mood of the trip
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TravelStyle {
    #[default]
    Relaxed,
    Adventure,
    Cultural,
    Romantic,
    Party,
    Business,
    Family,
}

impl TravelStyle {
    pub fn as_str(&self) -> &'static str {
        match self {
            TravelStyle::Relaxed => "relaxed",
            TravelStyle::Adventure => "adventure",
            TravelStyle::Cultural => "cultural",
            TravelStyle::Romantic => "romantic",
            TravelStyle::Party => "party",
            TravelStyle::Business => "business",
            TravelStyle::Family => "family",
        }
    }
}

/// Everything the user has told us about the trip so far
///
/// Created empty, filled in incrementally as steps are answered, and never
/// auto-cleared except on an explicit reset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TripPreferences {
    pub destination_type: DestinationType,
    pub budget_range: BudgetRange,
    pub travel_style: TravelStyle,
    /// Free-text trip mood, up to [`MAX_VIBE_LEN`] characters
    pub vibe_text: String,
    /// Party size label ("1", "2", "3-4", "5+")
    pub travelers: String,
    pub accommodation_preference: Option<String>,
    pub transport_preference: Option<String>,
    pub special_requirements: Option<String>,
}

impl Default for TripPreferences {
    fn default() -> Self {
        Self {
            destination_type: DestinationType::default(),
            budget_range: BudgetRange::default(),
            travel_style: TravelStyle::default(),
            vibe_text: String::new(),
            travelers: "1".to_string(),
            accommodation_preference: None,
            transport_preference: None,
            special_requirements: None,
        }
    }
}
