//! Typed client for the remote suggestion service
//!
//! One method per remote capability, each with its own timeout and response
//! shape validation. The client never retries; retry is an orchestrator
//! decision.

mod error;
mod http;
mod types;

use async_trait::async_trait;

use crate::domain::{ActivityBuckets, Destination, DurationRecommendation, Itinerary, TravelDates, TripPreferences};

pub use error::SuggestionError;
pub use http::HttpSuggestionClient;
pub use types::{ConvertedAmount, CurrencyInfo, ItineraryRequest, VibeFilters, VibeMatch};

/// The wizard's seam to the suggestion service
///
/// Implementations must be stateless per call; callers handle sequencing
/// and staleness.
#[async_trait]
pub trait SuggestionClient: Send + Sync {
    /// Match destinations to a free-text vibe description
    async fn match_vibe(&self, vibe_query: &str, filters: &VibeFilters) -> Result<VibeMatch, SuggestionError>;

    /// Suggest destinations from structured preferences alone
    async fn suggest_destinations(
        &self,
        prefs: &TripPreferences,
        dates: &TravelDates,
    ) -> Result<Vec<Destination>, SuggestionError>;

    /// Suggest seasonal and year-round activities for a destination
    async fn suggest_activities(
        &self,
        destination: &str,
        prefs: &TripPreferences,
        dates: &TravelDates,
        duration: u32,
    ) -> Result<ActivityBuckets, SuggestionError>;

    /// Recommend a stay length for a destination (informational)
    async fn recommend_duration(
        &self,
        destination: &str,
        prefs: &TripPreferences,
    ) -> Result<DurationRecommendation, SuggestionError>;

    /// Synthesize the full itinerary; runs under the longer timeout
    async fn generate_itinerary(&self, request: &ItineraryRequest) -> Result<Itinerary, SuggestionError>;

    /// Local currency of a destination; display only
    async fn destination_currency(&self, destination: &str) -> Result<CurrencyInfo, SuggestionError>;

    /// Convert an amount between currencies; display only
    async fn convert_currency(&self, amount: f64, from: &str, to: &str)
    -> Result<ConvertedAmount, SuggestionError>;
}
