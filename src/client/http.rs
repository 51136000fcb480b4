//! HTTP implementation of the suggestion client
//!
//! Maps each capability onto its endpoint: query-parameter POSTs for the
//! lightweight suggestion calls, a JSON body for itinerary synthesis, GETs
//! for the display-only currency helpers. Timeouts are applied per request
//! because itinerary generation gets a longer budget than the rest.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, RequestBuilder};
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::config::SuggestionConfig;
use crate::domain::{ActivityBuckets, Destination, DurationRecommendation, Itinerary, TravelDates, TripPreferences};

use super::SuggestionClient;
use super::error::SuggestionError;
use super::types::{
    ActivitiesEnvelope, ConvertedAmount, CurrencyInfo, DestinationsEnvelope, DurationEnvelope, ItineraryEnvelope,
    ItineraryRequest, VibeFilters, VibeMatch, VibeMatchEnvelope,
};

/// Suggestion service client over HTTP
pub struct HttpSuggestionClient {
    base_url: String,
    http: Client,
    request_timeout: Duration,
    itinerary_timeout: Duration,
}

impl HttpSuggestionClient {
    /// Build a client from configuration
    pub fn from_config(config: &SuggestionConfig) -> Result<Self, SuggestionError> {
        debug!(base_url = %config.base_url, "from_config: called");
        let http = Client::builder().build().map_err(SuggestionError::Network)?;

        Ok(Self {
            base_url: config.base_url.trim_end_matches('/').to_string(),
            http,
            request_timeout: Duration::from_millis(config.timeout_ms),
            itinerary_timeout: Duration::from_millis(config.itinerary_timeout_ms),
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path)
    }

    /// Send a request, enforce the timeout, check the status, and parse the
    /// body. Shape validation happens on the returned envelope.
    async fn send<E: DeserializeOwned>(&self, builder: RequestBuilder, timeout: Duration) -> Result<E, SuggestionError> {
        let response = builder.timeout(timeout).send().await.map_err(|e| {
            if e.is_timeout() {
                SuggestionError::Timeout(timeout)
            } else {
                SuggestionError::Network(e)
            }
        })?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            debug!(status = status.as_u16(), "send: non-success response");
            return Err(SuggestionError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let body = response.text().await.map_err(SuggestionError::Network)?;
        Ok(serde_json::from_str(&body)?)
    }
}

#[async_trait]
impl SuggestionClient for HttpSuggestionClient {
    async fn match_vibe(&self, vibe_query: &str, filters: &VibeFilters) -> Result<VibeMatch, SuggestionError> {
        debug!(vibe_len = vibe_query.len(), "match_vibe: called");
        let mut query: Vec<(&str, String)> = vec![("vibe_query", vibe_query.to_string())];
        if let Some(destination_type) = filters.destination_type {
            query.push(("destination_type", destination_type.as_str().to_string()));
        }
        if let Some(budget) = filters.budget {
            query.push(("budget", budget.as_str().to_string()));
        }

        let builder = self.http.post(self.url("vibe-match")).query(&query);
        let envelope: VibeMatchEnvelope = self.send(builder, self.request_timeout).await?;
        envelope.validate()
    }

    async fn suggest_destinations(
        &self,
        prefs: &TripPreferences,
        dates: &TravelDates,
    ) -> Result<Vec<Destination>, SuggestionError> {
        debug!(destination_type = prefs.destination_type.as_str(), "suggest_destinations: called");
        let mut query: Vec<(&str, String)> = vec![
            ("destination_type", prefs.destination_type.as_str().to_string()),
            ("budget_range", prefs.budget_range.as_str().to_string()),
            ("travel_style", prefs.travel_style.as_str().to_string()),
            ("vibe", prefs.vibe_text.clone()),
        ];
        if !dates.travel_month.is_empty() {
            query.push(("travel_month", dates.travel_month.clone()));
        }

        let builder = self.http.post(self.url("destination-suggestions")).query(&query);
        let envelope: DestinationsEnvelope = self.send(builder, self.request_timeout).await?;
        envelope.validate()
    }

    async fn suggest_activities(
        &self,
        destination: &str,
        prefs: &TripPreferences,
        dates: &TravelDates,
        duration: u32,
    ) -> Result<ActivityBuckets, SuggestionError> {
        debug!(%destination, duration, "suggest_activities: called");
        let query: Vec<(&str, String)> = vec![
            ("destination", destination.to_string()),
            ("travel_style", prefs.travel_style.as_str().to_string()),
            ("budget_range", prefs.budget_range.as_str().to_string()),
            ("travel_month", dates.travel_month.clone()),
            ("duration", duration.to_string()),
        ];

        let builder = self.http.post(self.url("activity-suggestions")).query(&query);
        let envelope: ActivitiesEnvelope = self.send(builder, self.request_timeout).await?;
        envelope.validate()
    }

    async fn recommend_duration(
        &self,
        destination: &str,
        prefs: &TripPreferences,
    ) -> Result<DurationRecommendation, SuggestionError> {
        debug!(%destination, "recommend_duration: called");
        let query: Vec<(&str, String)> = vec![
            ("destination", destination.to_string()),
            ("destination_type", prefs.destination_type.as_str().to_string()),
            ("travel_style", prefs.travel_style.as_str().to_string()),
            ("traveler_count", prefs.travelers.clone()),
        ];

        let builder = self.http.post(self.url("duration-recommendation")).query(&query);
        let envelope: DurationEnvelope = self.send(builder, self.request_timeout).await?;
        envelope.validate()
    }

    async fn generate_itinerary(&self, request: &ItineraryRequest) -> Result<Itinerary, SuggestionError> {
        debug!(duration = request.duration, activity_count = request.activities.len(), "generate_itinerary: called");
        let builder = self.http.post(self.url("smart-itinerary")).json(request);
        let envelope: ItineraryEnvelope = self.send(builder, self.itinerary_timeout).await?;
        envelope.validate()
    }

    async fn destination_currency(&self, destination: &str) -> Result<CurrencyInfo, SuggestionError> {
        debug!(%destination, "destination_currency: called");
        let builder = self
            .http
            .get(self.url("destination-currency"))
            .query(&[("destination", destination)]);
        self.send(builder, self.request_timeout).await
    }

    async fn convert_currency(
        &self,
        amount: f64,
        from: &str,
        to: &str,
    ) -> Result<ConvertedAmount, SuggestionError> {
        debug!(amount, %from, %to, "convert_currency: called");
        let builder = self.http.get(self.url("convert-currency")).query(&[
            ("amount", amount.to_string()),
            ("from_currency", from.to_string()),
            ("to_currency", to.to_string()),
        ]);
        self.send(builder, self.request_timeout).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SuggestionConfig;

    #[test]
    fn test_base_url_trailing_slash_normalized() {
        let config = SuggestionConfig {
            base_url: "http://localhost:8000/api/".to_string(),
            ..SuggestionConfig::default()
        };
        let client = HttpSuggestionClient::from_config(&config).unwrap();
        assert_eq!(client.url("vibe-match"), "http://localhost:8000/api/vibe-match");
    }

    #[test]
    fn test_timeouts_from_config() {
        let config = SuggestionConfig {
            timeout_ms: 5_000,
            itinerary_timeout_ms: 45_000,
            ..SuggestionConfig::default()
        };
        let client = HttpSuggestionClient::from_config(&config).unwrap();
        assert_eq!(client.request_timeout, Duration::from_secs(5));
        assert_eq!(client.itinerary_timeout, Duration::from_secs(45));
    }
}
