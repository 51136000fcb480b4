//! End-to-end flows through the wizard against a scripted client

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use chrono::NaiveDate;
use serde_json::json;

use tripwizard::client::{
    ConvertedAmount, CurrencyInfo, ItineraryRequest, SuggestionClient, SuggestionError, VibeFilters, VibeMatch,
};
use tripwizard::domain::{
    Activity, ActivityBuckets, Destination, DurationRecommendation, Itinerary, RecommendedDays, TravelDates,
    TripPreferences,
};
use tripwizard::handoff::{HandoffBridge, MemoryChannel};
use tripwizard::{TripWizard, WizardError, WizardEvent, WizardState, WizardStep};

/// Scripted suggestion client. Each method pops its next queued response and
/// the last itinerary request body is captured for assertions.
#[derive(Default)]
struct ScriptedClient {
    vibe: Mutex<VecDeque<Result<VibeMatch, SuggestionError>>>,
    activities: Mutex<VecDeque<Result<ActivityBuckets, SuggestionError>>>,
    duration: Mutex<VecDeque<Result<DurationRecommendation, SuggestionError>>>,
    itinerary: Mutex<VecDeque<Result<Itinerary, SuggestionError>>>,
    last_itinerary_request: Mutex<Option<ItineraryRequest>>,
}

impl ScriptedClient {
    fn script_vibe(&self, response: Result<VibeMatch, SuggestionError>) {
        self.vibe.lock().unwrap().push_back(response);
    }

    fn script_activities(&self, response: Result<ActivityBuckets, SuggestionError>) {
        self.activities.lock().unwrap().push_back(response);
    }

    fn script_duration(&self, response: Result<DurationRecommendation, SuggestionError>) {
        self.duration.lock().unwrap().push_back(response);
    }

    fn script_itinerary(&self, response: Result<Itinerary, SuggestionError>) {
        self.itinerary.lock().unwrap().push_back(response);
    }

    fn last_itinerary_request(&self) -> ItineraryRequest {
        self.last_itinerary_request
            .lock()
            .unwrap()
            .clone()
            .expect("no itinerary request was made")
    }
}

fn pop<T>(queue: &Mutex<VecDeque<Result<T, SuggestionError>>>, method: &str) -> Result<T, SuggestionError> {
    queue
        .lock()
        .unwrap()
        .pop_front()
        .unwrap_or_else(|| panic!("unscripted call to {method}"))
}

#[async_trait]
impl SuggestionClient for ScriptedClient {
    async fn match_vibe(&self, _vibe: &str, _filters: &VibeFilters) -> Result<VibeMatch, SuggestionError> {
        pop(&self.vibe, "match_vibe")
    }

    async fn suggest_destinations(
        &self,
        _prefs: &TripPreferences,
        _dates: &TravelDates,
    ) -> Result<Vec<Destination>, SuggestionError> {
        panic!("unscripted call to suggest_destinations")
    }

    async fn suggest_activities(
        &self,
        _destination: &str,
        _prefs: &TripPreferences,
        _dates: &TravelDates,
        _duration: u32,
    ) -> Result<ActivityBuckets, SuggestionError> {
        pop(&self.activities, "suggest_activities")
    }

    async fn recommend_duration(
        &self,
        _destination: &str,
        _prefs: &TripPreferences,
    ) -> Result<DurationRecommendation, SuggestionError> {
        pop(&self.duration, "recommend_duration")
    }

    async fn generate_itinerary(&self, request: &ItineraryRequest) -> Result<Itinerary, SuggestionError> {
        *self.last_itinerary_request.lock().unwrap() = Some(request.clone());
        pop(&self.itinerary, "generate_itinerary")
    }

    async fn destination_currency(&self, _destination: &str) -> Result<CurrencyInfo, SuggestionError> {
        panic!("unscripted call to destination_currency")
    }

    async fn convert_currency(&self, _amount: f64, _from: &str, _to: &str) -> Result<ConvertedAmount, SuggestionError> {
        panic!("unscripted call to convert_currency")
    }
}

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn vibe_match(names: &[&str]) -> VibeMatch {
    VibeMatch {
        vibe_score: 0.88,
        reasoning: "coastal and slow-paced".to_string(),
        matched_destinations: names.iter().map(|n| Destination::named(*n)).collect(),
    }
}

fn sample_buckets() -> ActivityBuckets {
    ActivityBuckets {
        seasonal: vec![Activity::general("Cherry Blossom Viewing")],
        year_round: vec![Activity::general("Temple Walks"), Activity::general("Food Markets")],
    }
}

fn sample_duration() -> DurationRecommendation {
    DurationRecommendation {
        recommended_days: RecommendedDays { min: 4, ideal: 6, max: 9 },
        reasoning: "six days covers the city and a day trip".to_string(),
        tips: vec!["Book trains early".to_string()],
    }
}

fn sample_itinerary() -> Itinerary {
    serde_json::from_value(json!({
        "daily_itinerary": {
            "day_1": {"morning": "Arrive", "afternoon": "Old town", "evening": "Dinner"}
        },
        "estimated_costs": {"accommodation": "$90-140/night"},
        "local_tips": ["Carry small change"]
    }))
    .unwrap()
}

fn drain_events(rx: &mut tokio::sync::broadcast::Receiver<WizardEvent>) -> Vec<WizardEvent> {
    let mut events = Vec::new();
    while let Ok(event) = rx.try_recv() {
        events.push(event);
    }
    events
}

#[tokio::test]
async fn full_vibe_flow_reaches_itinerary() {
    let client = Arc::new(ScriptedClient::default());
    client.script_vibe(Ok(vibe_match(&["Kyoto", "Hoi An"])));
    client.script_activities(Ok(sample_buckets()));
    client.script_duration(Ok(sample_duration()));
    client.script_itinerary(Ok(sample_itinerary()));

    let mut wizard = TripWizard::new(client.clone());

    wizard.start_vibe_search("slow mornings and old temples").await.unwrap();
    wizard.choose_destination("Kyoto").unwrap();
    wizard.set_dates(date(2025, 6, 1), date(2025, 6, 5)).unwrap();
    wizard.request_activities().await.unwrap();
    wizard.toggle_activity(Activity::general("Temple Walks")).unwrap();
    wizard.confirm_activities().unwrap();
    wizard.generate_itinerary().await.unwrap();

    assert_eq!(wizard.state(), WizardState::ItineraryReady);
    assert!(wizard.draft().itinerary.as_ref().unwrap().has_days());

    let request = client.last_itinerary_request();
    assert_eq!(request.duration, 5);
    assert_eq!(request.activities, vec!["Temple Walks"]);
    assert_eq!(request.vibe, "slow mornings and old temples - specifically for Kyoto");
    assert_eq!(request.travel_month.as_deref(), Some("June"));
}

#[tokio::test]
async fn activities_timeout_falls_forward_onto_default_trio() {
    let client = Arc::new(ScriptedClient::default());
    client.script_activities(Err(SuggestionError::Timeout(Duration::from_secs(20))));
    client.script_duration(Ok(sample_duration()));
    client.script_itinerary(Ok(sample_itinerary()));

    let mut wizard = TripWizard::new(client.clone());
    let mut events = wizard.subscribe_events();

    wizard.start_direct("Lisbon").unwrap();
    wizard.set_dates(date(2025, 9, 10), date(2025, 9, 14)).unwrap();
    wizard.request_activities().await.unwrap();

    // The failed step advances the flow instead of halting it.
    assert_eq!(wizard.state(), WizardState::ActivitiesChosen);
    assert!(wizard.draft().activity_buckets.is_none());
    assert!(wizard.draft().activities.is_empty());

    let failures: Vec<_> = drain_events(&mut events)
        .into_iter()
        .filter(|e| matches!(e, WizardEvent::StepFailed { .. }))
        .collect();
    assert_eq!(failures.len(), 1);
    assert!(matches!(
        failures[0],
        WizardEvent::StepFailed { step: WizardStep::Activities, halted: false, .. }
    ));

    wizard.generate_itinerary().await.unwrap();
    assert_eq!(wizard.state(), WizardState::ItineraryReady);

    let request = client.last_itinerary_request();
    assert_eq!(request.activities, vec!["sightseeing", "local culture", "food tours"]);
}

#[tokio::test]
async fn malformed_itinerary_halts_with_a_single_notice() {
    let client = Arc::new(ScriptedClient::default());
    client.script_activities(Ok(sample_buckets()));
    client.script_duration(Ok(sample_duration()));
    client.script_itinerary(Err(SuggestionError::InvalidShape("itinerary".to_string())));

    let mut wizard = TripWizard::new(client);
    let mut events = wizard.subscribe_events();

    wizard.start_direct("Oaxaca").unwrap();
    wizard.set_dates(date(2025, 11, 1), date(2025, 11, 6)).unwrap();
    wizard.request_activities().await.unwrap();
    wizard.confirm_activities().unwrap();

    let err = wizard.generate_itinerary().await.unwrap_err();
    assert!(matches!(
        err,
        WizardError::Suggestion(SuggestionError::InvalidShape(_))
    ));
    assert_eq!(wizard.state(), WizardState::Failed(WizardStep::Itinerary));
    assert!(wizard.draft().itinerary.is_none());

    let halting: Vec<_> = drain_events(&mut events)
        .into_iter()
        .filter(|e| matches!(e, WizardEvent::StepFailed { halted: true, .. }))
        .collect();
    assert_eq!(halting.len(), 1, "exactly one halting notice per failure");
    assert!(matches!(
        halting[0],
        WizardEvent::StepFailed { step: WizardStep::Itinerary, .. }
    ));
}

#[tokio::test]
async fn retry_after_itinerary_failure_succeeds() {
    let client = Arc::new(ScriptedClient::default());
    client.script_activities(Ok(sample_buckets()));
    client.script_duration(Ok(sample_duration()));
    client.script_itinerary(Err(SuggestionError::Api { status: 502, message: "bad gateway".to_string() }));
    client.script_itinerary(Ok(sample_itinerary()));

    let mut wizard = TripWizard::new(client);
    wizard.start_direct("Tbilisi").unwrap();
    wizard.set_dates(date(2025, 5, 2), date(2025, 5, 9)).unwrap();
    wizard.request_activities().await.unwrap();
    wizard.confirm_activities().unwrap();

    assert!(wizard.generate_itinerary().await.is_err());
    assert_eq!(wizard.state(), WizardState::Failed(WizardStep::Itinerary));

    // Retrying straight from the failed state is allowed.
    wizard.generate_itinerary().await.unwrap();
    assert_eq!(wizard.state(), WizardState::ItineraryReady);
}

#[tokio::test]
async fn abandoned_destination_picks_never_reach_the_next_itinerary() {
    let client = Arc::new(ScriptedClient::default());
    client.script_activities(Ok(sample_buckets()));
    client.script_duration(Ok(sample_duration()));
    client.script_itinerary(Err(SuggestionError::Timeout(Duration::from_secs(60))));
    // Second flow, new destination.
    client.script_activities(Ok(ActivityBuckets::default()));
    client.script_duration(Ok(sample_duration()));
    client.script_itinerary(Ok(sample_itinerary()));

    let mut wizard = TripWizard::new(client.clone());
    wizard.start_direct("Kyoto").unwrap();
    wizard.set_dates(date(2025, 4, 1), date(2025, 4, 6)).unwrap();
    wizard.request_activities().await.unwrap();
    wizard.toggle_activity(Activity::general("Kyoto Tea Ceremony")).unwrap();
    wizard.confirm_activities().unwrap();
    assert!(wizard.generate_itinerary().await.is_err());
    assert_eq!(wizard.state(), WizardState::Failed(WizardStep::Itinerary));

    // Abandon the halted flow for a different destination.
    wizard.start_direct("Lisbon").unwrap();
    assert!(wizard.draft().activities.is_empty());
    wizard.set_dates(date(2025, 5, 1), date(2025, 5, 5)).unwrap();
    wizard.request_activities().await.unwrap();
    wizard.confirm_activities().unwrap();
    wizard.generate_itinerary().await.unwrap();

    // The Lisbon request falls back to the default trio, not Kyoto's pick.
    let request = client.last_itinerary_request();
    assert_eq!(request.activities, vec!["sightseeing", "local culture", "food tours"]);
    assert_eq!(wizard.state(), WizardState::ItineraryReady);
}

#[tokio::test]
async fn activities_are_refused_until_dates_are_set() {
    let mut wizard = TripWizard::new(Arc::new(ScriptedClient::default()));
    wizard.start_direct("Tallinn").unwrap();

    let err = wizard.request_activities().await.unwrap_err();
    assert!(matches!(err, WizardError::Validation(_)));
    assert_eq!(wizard.state(), WizardState::DestinationChosen);
}

#[tokio::test]
async fn date_edit_after_activities_returns_to_destination_chosen() {
    let client = Arc::new(ScriptedClient::default());
    client.script_activities(Ok(sample_buckets()));
    client.script_duration(Ok(sample_duration()));
    client.script_activities(Ok(sample_buckets()));
    client.script_duration(Ok(sample_duration()));

    let mut wizard = TripWizard::new(client);
    wizard.start_direct("Porto").unwrap();
    wizard.set_dates(date(2025, 6, 1), date(2025, 6, 5)).unwrap();
    wizard.request_activities().await.unwrap();
    wizard.toggle_activity(Activity::general("Food Markets")).unwrap();

    // Moving the trip drops fetched suggestions but keeps the pick.
    wizard.set_dates(date(2025, 8, 1), date(2025, 8, 10)).unwrap();
    assert_eq!(wizard.state(), WizardState::DestinationChosen);
    assert!(wizard.draft().activity_buckets.is_none());
    assert!(wizard.draft().duration_hint.is_none());
    assert!(wizard.draft().activities.contains("Food Markets"));

    // The flow re-runs cleanly for the new dates.
    wizard.request_activities().await.unwrap();
    assert_eq!(wizard.state(), WizardState::AwaitingActivities);
    assert!(wizard.draft().activity_buckets.is_some());
}

#[tokio::test]
async fn finished_draft_hands_off_and_resumes_once() {
    let client = Arc::new(ScriptedClient::default());
    client.script_vibe(Ok(vibe_match(&["Hoi An"])));
    client.script_activities(Ok(sample_buckets()));
    client.script_duration(Ok(sample_duration()));
    client.script_itinerary(Ok(sample_itinerary()));

    let mut wizard = TripWizard::new(client.clone());
    wizard.start_vibe_search("lantern-lit evenings").await.unwrap();
    wizard.choose_destination("Hoi An").unwrap();
    wizard.set_dates(date(2025, 3, 3), date(2025, 3, 8)).unwrap();
    wizard.request_activities().await.unwrap();
    wizard.confirm_activities().unwrap();
    wizard.generate_itinerary().await.unwrap();

    let bridge = HandoffBridge::new(MemoryChannel::new());
    bridge.persist(wizard.draft()).unwrap();

    // A later session resumes the parked draft exactly once.
    let resumed = bridge.resume().unwrap().unwrap();
    assert_eq!(resumed.destination_name(), Some("Hoi An"));
    assert!(resumed.itinerary.as_ref().unwrap().has_days());
    assert!(bridge.resume().unwrap().is_none());

    let resumed_wizard = TripWizard::with_draft(client, resumed);
    assert_eq!(resumed_wizard.state(), WizardState::ItineraryReady);
}
