//! Request and response payloads for the suggestion service
//!
//! Wire envelopes deserialize the raw JSON and are validated into domain
//! types here, so that a 2xx body missing a required section surfaces as
//! `SuggestionError::InvalidShape` instead of a silently empty result.

use serde::{Deserialize, Serialize};

use crate::domain::{
    Activity, ActivityBuckets, ActivityCategory, BudgetRange, Destination, DestinationType, DurationRecommendation,
    Itinerary, RecommendedDays, TravelStyle,
};

use super::error::SuggestionError;

/// Optional narrowing filters for vibe matching
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct VibeFilters {
    pub destination_type: Option<DestinationType>,
    pub budget: Option<BudgetRange>,
}

/// A successful vibe-match response
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VibeMatch {
    pub vibe_score: f64,
    pub reasoning: String,
    pub matched_destinations: Vec<Destination>,
}

/// Body for itinerary generation, the heaviest synthesis call
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ItineraryRequest {
    pub destination_type: DestinationType,
    pub budget_range: BudgetRange,
    pub travel_style: TravelStyle,
    pub duration: u32,
    pub activities: Vec<String>,
    pub vibe: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub travel_month: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub travelers: Option<String>,
}

/// Local currency of a destination, for display only
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct CurrencyInfo {
    pub currency: String,
}

/// One converted amount, for display only
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ConvertedAmount {
    pub converted_amount: f64,
    #[serde(default)]
    pub to_currency: String,
}

// Wire envelopes. Required sections are Options so a missing field is
// detected instead of defaulted away.

#[derive(Debug, Deserialize)]
pub(crate) struct VibeMatchEnvelope {
    results: Option<VibeMatchResults>,
}

#[derive(Debug, Deserialize)]
struct VibeMatchResults {
    #[serde(default)]
    vibe_score: f64,
    #[serde(default)]
    reasoning: String,
    matched_destinations: Option<Vec<Destination>>,
}

impl VibeMatchEnvelope {
    pub(crate) fn validate(self) -> Result<VibeMatch, SuggestionError> {
        let results = self
            .results
            .ok_or_else(|| SuggestionError::InvalidShape("results".to_string()))?;
        let matched_destinations = results
            .matched_destinations
            .ok_or_else(|| SuggestionError::InvalidShape("results.matched_destinations".to_string()))?;
        Ok(VibeMatch {
            vibe_score: results.vibe_score,
            reasoning: results.reasoning,
            matched_destinations,
        })
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct DestinationsEnvelope {
    destinations: Option<Vec<Destination>>,
}

impl DestinationsEnvelope {
    pub(crate) fn validate(self) -> Result<Vec<Destination>, SuggestionError> {
        self.destinations
            .ok_or_else(|| SuggestionError::InvalidShape("destinations".to_string()))
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct ActivitiesEnvelope {
    activities: Option<ActivityBucketsWire>,
}

#[derive(Debug, Deserialize)]
struct ActivityBucketsWire {
    #[serde(default)]
    seasonal_activities: Vec<Activity>,
    #[serde(default)]
    year_round_activities: Vec<Activity>,
}

impl ActivitiesEnvelope {
    pub(crate) fn validate(self) -> Result<ActivityBuckets, SuggestionError> {
        let wire = self
            .activities
            .ok_or_else(|| SuggestionError::InvalidShape("activities".to_string()))?;

        let tag = |mut activity: Activity, category: ActivityCategory| {
            activity.category = category;
            activity
        };
        Ok(ActivityBuckets {
            seasonal: wire
                .seasonal_activities
                .into_iter()
                .map(|a| tag(a, ActivityCategory::Seasonal))
                .collect(),
            year_round: wire
                .year_round_activities
                .into_iter()
                .map(|a| tag(a, ActivityCategory::YearRound))
                .collect(),
        })
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct DurationEnvelope {
    recommendation: Option<DurationRecommendationWire>,
}

#[derive(Debug, Deserialize)]
struct DurationRecommendationWire {
    recommended_days: Option<RecommendedDaysWire>,
    #[serde(default)]
    reasoning: String,
    #[serde(default)]
    tips: Vec<String>,
}

#[derive(Debug, Deserialize)]
struct RecommendedDaysWire {
    minimum: u32,
    ideal: u32,
    maximum: u32,
}

impl DurationEnvelope {
    pub(crate) fn validate(self) -> Result<DurationRecommendation, SuggestionError> {
        let wire = self
            .recommendation
            .ok_or_else(|| SuggestionError::InvalidShape("recommendation".to_string()))?;
        let days = wire
            .recommended_days
            .ok_or_else(|| SuggestionError::InvalidShape("recommendation.recommended_days".to_string()))?;
        Ok(DurationRecommendation {
            recommended_days: RecommendedDays {
                min: days.minimum,
                ideal: days.ideal,
                max: days.maximum,
            },
            reasoning: wire.reasoning,
            tips: wire.tips,
        })
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct ItineraryEnvelope {
    itinerary: Option<Itinerary>,
}

impl ItineraryEnvelope {
    pub(crate) fn validate(self) -> Result<Itinerary, SuggestionError> {
        self.itinerary
            .ok_or_else(|| SuggestionError::InvalidShape("itinerary".to_string()))
    }
}
