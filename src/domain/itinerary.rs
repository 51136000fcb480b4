//! Generated itinerary payload
//!
//! The itinerary is an opaque artifact once received: the orchestrator only
//! checks for the presence of the expected top-level sections and never
//! interprets day contents.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// The synthesized trip plan returned by the suggestion service
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Itinerary {
    /// Destination blurbs, kept as raw JSON
    #[serde(default)]
    pub destination_recommendations: Vec<serde_json::Value>,
    /// Day label ("day_1") to period map ("morning"/"afternoon"/"evening")
    #[serde(default)]
    pub daily_itinerary: BTreeMap<String, serde_json::Value>,
    /// Cost category ("accommodation") to display string ("$80-120/night")
    #[serde(default)]
    pub estimated_costs: BTreeMap<String, String>,
    #[serde(default)]
    pub local_tips: Vec<String>,
    #[serde(default)]
    pub packing_suggestions: Vec<String>,
}

impl Itinerary {
    /// True when at least one day of content came back
    pub fn has_days(&self) -> bool {
        !self.daily_itinerary.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_deserialize_full_payload() {
        let itinerary: Itinerary = serde_json::from_value(json!({
            "destination_recommendations": [{"name": "Lisbon", "description": "Coastal capital"}],
            "daily_itinerary": {
                "day_1": {"morning": "Alfama walk", "afternoon": "Tram 28", "evening": "Fado dinner"}
            },
            "estimated_costs": {"accommodation": "$120-180/night", "meals": "$40/day"},
            "local_tips": ["Carry coins for trams"],
            "packing_suggestions": ["Comfortable shoes"]
        }))
        .unwrap();

        assert!(itinerary.has_days());
        assert_eq!(itinerary.estimated_costs["meals"], "$40/day");
        assert_eq!(itinerary.local_tips.len(), 1);
    }

    #[test]
    fn test_missing_sections_default_empty() {
        let itinerary: Itinerary = serde_json::from_value(json!({
            "daily_itinerary": {"day_1": {"morning": "Arrive"}}
        }))
        .unwrap();
        assert!(itinerary.has_days());
        assert!(itinerary.estimated_costs.is_empty());
        assert!(itinerary.packing_suggestions.is_empty());
    }
}
