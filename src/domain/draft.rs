//! TripDraft - the aggregate holding everything accumulated across steps
//!
//! One draft is live per session. It is owned and mutated exclusively by the
//! wizard state machine; everything else reads snapshots or requests a
//! transition.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::activity::{ActivityBuckets, ActivitySelection};
use super::dates::TravelDates;
use super::destination::{Destination, DurationRecommendation};
use super::itinerary::Itinerary;
use super::preferences::TripPreferences;

/// How the flow was entered
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PlanKind {
    /// Destination discovered from a vibe description
    VibeMatch,
    /// Destination typed directly, skipping discovery
    Direct,
}

/// Metadata from a vibe-match response, carried for display
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct VibeMatchInfo {
    pub vibe_score: f64,
    pub reasoning: String,
}

/// The single mutable aggregate for one planning flow
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TripDraft {
    pub id: String,
    pub plan_kind: Option<PlanKind>,
    pub preferences: TripPreferences,
    pub dates: TravelDates,
    /// Candidates returned by discovery, pending a user pick
    pub candidates: Vec<Destination>,
    pub vibe_match: Option<VibeMatchInfo>,
    /// Chosen destination; immutable once set
    pub destination: Option<Destination>,
    /// Suggestion buckets currently on display
    pub activity_buckets: Option<ActivityBuckets>,
    pub activities: ActivitySelection,
    /// Informational stay-length hint; absent when the call failed
    pub duration_hint: Option<DurationRecommendation>,
    pub itinerary: Option<Itinerary>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl TripDraft {
    /// Fresh empty draft
    pub fn new() -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4().to_string(),
            plan_kind: None,
            preferences: TripPreferences::default(),
            dates: TravelDates::default(),
            candidates: Vec::new(),
            vibe_match: None,
            destination: None,
            activity_buckets: None,
            activities: ActivitySelection::default(),
            duration_hint: None,
            itinerary: None,
            created_at: now,
            updated_at: now,
        }
    }

    /// Record a mutation timestamp
    pub fn touch(&mut self) {
        self.updated_at = Utc::now();
    }

    /// Name of the chosen destination, if any
    pub fn destination_name(&self) -> Option<&str> {
        self.destination.as_ref().map(|d| d.name.as_str())
    }
}

impl Default for TripDraft {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_draft_is_empty() {
        let draft = TripDraft::new();
        assert!(draft.plan_kind.is_none());
        assert!(draft.destination.is_none());
        assert!(draft.candidates.is_empty());
        assert!(draft.activities.is_empty());
        assert!(draft.itinerary.is_none());
        assert!(!draft.dates.is_complete());
    }

    #[test]
    fn test_draft_round_trips_through_json() {
        let mut draft = TripDraft::new();
        draft.destination = Some(Destination::named("Oaxaca"));
        draft.plan_kind = Some(PlanKind::Direct);

        let json = serde_json::to_string(&draft).unwrap();
        let back: TripDraft = serde_json::from_str(&json).unwrap();
        assert_eq!(back, draft);
    }
}
