//! The wizard state machine
//!
//! Owns the live draft and the only mutable handle to it. Every step method
//! checks the current state, runs its suggestion call through the request
//! coordinator, and applies the result only when it is still the newest
//! request for that step. Soft steps fail forward with a notice; only
//! itinerary synthesis halts the flow.

use std::sync::Arc;

use chrono::NaiveDate;
use thiserror::Error;
use tokio::sync::broadcast;
use tracing::debug;

use crate::client::{ItineraryRequest, SuggestionClient, SuggestionError, VibeFilters};
use crate::coordinator::RequestCoordinator;
use crate::domain::{
    Activity, BudgetRange, Destination, DestinationType, MAX_VIBE_LEN, PlanKind, TravelStyle, TripDraft,
    VibeMatchInfo,
};

use super::events::{WizardEvent, WizardStep};

/// Minimum length of a directly typed destination name
const MIN_DIRECT_NAME_LEN: usize = 3;

/// Broadcast channel capacity for progress events
const EVENT_CAPACITY: usize = 64;

/// Where the flow currently stands
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WizardState {
    /// No flow in progress
    Idle,
    /// Discovery ran (or is running); waiting for the user to pick
    AwaitingDestination,
    /// Destination locked in; dates and preferences being gathered
    DestinationChosen,
    /// Activity suggestions requested or on display
    AwaitingActivities,
    /// Activity picks confirmed; ready for itinerary synthesis
    ActivitiesChosen,
    /// Itinerary landed; flow complete
    ItineraryReady,
    /// A hard step failed; `recover` returns to the step before it
    Failed(WizardStep),
}

/// Errors surfaced by wizard transitions
#[derive(Debug, Error)]
pub enum WizardError {
    #[error("invalid input: {0}")]
    Validation(String),

    #[error("cannot {action} in state {state:?}")]
    InvalidTransition { state: WizardState, action: &'static str },

    #[error(transparent)]
    Suggestion(#[from] SuggestionError),
}

/// The trip planning wizard
///
/// One instance per planning session. Methods take `&mut self`; concurrency
/// within a step is handled by the coordinator, not by sharing the wizard.
pub struct TripWizard {
    client: Arc<dyn SuggestionClient>,
    coordinator: RequestCoordinator,
    draft: TripDraft,
    state: WizardState,
    event_tx: broadcast::Sender<WizardEvent>,
}

impl TripWizard {
    pub fn new(client: Arc<dyn SuggestionClient>) -> Self {
        let (event_tx, _) = broadcast::channel(EVENT_CAPACITY);
        Self {
            client,
            coordinator: RequestCoordinator::new(),
            draft: TripDraft::new(),
            state: WizardState::Idle,
            event_tx,
        }
    }

    /// Resume a previously persisted draft in the chosen-destination state
    /// when it has one, otherwise at idle.
    pub fn with_draft(client: Arc<dyn SuggestionClient>, draft: TripDraft) -> Self {
        let mut wizard = Self::new(client);
        wizard.state = if draft.itinerary.is_some() {
            WizardState::ItineraryReady
        } else if draft.destination.is_some() {
            WizardState::DestinationChosen
        } else {
            WizardState::Idle
        };
        wizard.draft = draft;
        wizard
    }

    pub fn state(&self) -> WizardState {
        self.state
    }

    pub fn draft(&self) -> &TripDraft {
        &self.draft
    }

    /// Subscribe to progress events
    pub fn subscribe_events(&self) -> broadcast::Receiver<WizardEvent> {
        self.event_tx.subscribe()
    }

    fn emit(&self, event: WizardEvent) {
        // No receivers is fine; events are advisory.
        let _ = self.event_tx.send(event);
    }

    fn require(&self, action: &'static str, allowed: bool) -> Result<(), WizardError> {
        if allowed {
            Ok(())
        } else {
            Err(WizardError::InvalidTransition { state: self.state, action })
        }
    }

    fn can_start(&self) -> bool {
        matches!(
            self.state,
            WizardState::Idle | WizardState::AwaitingDestination | WizardState::Failed(_)
        )
    }

    /// Drop every step output downstream of discovery so a new flow cannot
    /// inherit the abandoned destination's candidates, picks, or itinerary.
    /// Preferences and dates survive; only an explicit reset clears those.
    fn clear_flow_output(&mut self) {
        self.draft.candidates.clear();
        self.draft.vibe_match = None;
        self.draft.destination = None;
        self.draft.activity_buckets = None;
        self.draft.activities.clear();
        self.draft.duration_hint = None;
        self.draft.itinerary = None;
        self.draft.touch();
    }

    /// Start discovery from a free-text vibe description.
    ///
    /// Soft step: on failure one notice is emitted and the error returned,
    /// but the wizard stays in `AwaitingDestination` so the user can retry
    /// or type a destination directly.
    pub async fn start_vibe_search(&mut self, vibe: &str) -> Result<(), WizardError> {
        debug!(vibe_len = vibe.len(), "start_vibe_search: called");
        self.require("start vibe search", self.can_start())?;

        let vibe = vibe.trim().to_string();
        if vibe.is_empty() {
            return Err(WizardError::Validation("vibe description is empty".to_string()));
        }
        if vibe.chars().count() > MAX_VIBE_LEN {
            return Err(WizardError::Validation(format!(
                "vibe description exceeds {MAX_VIBE_LEN} characters"
            )));
        }

        self.clear_flow_output();
        self.draft.plan_kind = Some(PlanKind::VibeMatch);
        self.draft.preferences.vibe_text = vibe.clone();
        self.state = WizardState::AwaitingDestination;

        let filters = VibeFilters {
            destination_type: (self.draft.preferences.destination_type != DestinationType::Auto)
                .then_some(self.draft.preferences.destination_type),
            budget: Some(self.draft.preferences.budget_range),
        };
        let outcome = self
            .coordinator
            .issue("vibe-match", self.client.match_vibe(&vibe, &filters))
            .await;

        match outcome {
            Some(Ok(matched)) => {
                self.draft.vibe_match = Some(VibeMatchInfo {
                    vibe_score: matched.vibe_score,
                    reasoning: matched.reasoning,
                });
                self.draft.candidates = matched.matched_destinations;
                self.draft.touch();
                self.emit(WizardEvent::StepCompleted { step: WizardStep::VibeMatch });
                Ok(())
            }
            Some(Err(e)) => {
                self.emit(WizardEvent::StepFailed {
                    step: WizardStep::VibeMatch,
                    error: e.to_string(),
                    halted: false,
                });
                Err(WizardError::Suggestion(e))
            }
            None => Ok(()),
        }
    }

    /// Start discovery from the structured preferences alone
    pub async fn start_guided_search(&mut self) -> Result<(), WizardError> {
        debug!("start_guided_search: called");
        self.require("start guided search", self.can_start())?;

        self.clear_flow_output();
        self.draft.plan_kind = Some(PlanKind::VibeMatch);
        self.state = WizardState::AwaitingDestination;

        let prefs = self.draft.preferences.clone();
        let dates = self.draft.dates.clone();
        let outcome = self
            .coordinator
            .issue("destinations", self.client.suggest_destinations(&prefs, &dates))
            .await;

        match outcome {
            Some(Ok(candidates)) => {
                self.draft.candidates = candidates;
                self.draft.touch();
                self.emit(WizardEvent::StepCompleted { step: WizardStep::Destinations });
                Ok(())
            }
            Some(Err(e)) => {
                self.emit(WizardEvent::StepFailed {
                    step: WizardStep::Destinations,
                    error: e.to_string(),
                    halted: false,
                });
                Err(WizardError::Suggestion(e))
            }
            None => Ok(()),
        }
    }

    /// Skip discovery and plan for a destination the user typed directly
    pub fn start_direct(&mut self, name: &str) -> Result<(), WizardError> {
        debug!(%name, "start_direct: called");
        self.require("start direct plan", self.can_start())?;

        let name = name.trim();
        if name.chars().count() < MIN_DIRECT_NAME_LEN {
            return Err(WizardError::Validation(format!(
                "destination name needs at least {MIN_DIRECT_NAME_LEN} characters"
            )));
        }

        self.clear_flow_output();
        self.draft.plan_kind = Some(PlanKind::Direct);
        self.draft.destination = Some(Destination::named(name));
        self.state = WizardState::DestinationChosen;
        Ok(())
    }

    /// Lock in one of the discovered candidates
    pub fn choose_destination(&mut self, name: &str) -> Result<(), WizardError> {
        debug!(%name, "choose_destination: called");
        self.require(
            "choose destination",
            self.state == WizardState::AwaitingDestination,
        )?;

        let chosen = self
            .draft
            .candidates
            .iter()
            .find(|d| d.name == name)
            .cloned()
            .ok_or_else(|| WizardError::Validation(format!("'{name}' is not among the suggested destinations")))?;

        self.draft.destination = Some(chosen);
        self.draft.touch();
        self.state = WizardState::DestinationChosen;
        Ok(())
    }

    /// Set the travel dates.
    ///
    /// Editing dates after activities were fetched invalidates the fetched
    /// suggestions and any itinerary, returning to `DestinationChosen`. The
    /// user's activity picks survive the edit.
    pub fn set_dates(&mut self, start: NaiveDate, end: NaiveDate) -> Result<(), WizardError> {
        debug!(%start, %end, "set_dates: called");
        if end < start {
            return Err(WizardError::Validation("end date is before start date".to_string()));
        }
        self.draft.dates.set_start(start);
        self.draft.dates.set_end(end);
        self.draft.touch();
        self.invalidate_suggestions();
        Ok(())
    }

    /// Change the destination category; invalidates fetched suggestions the
    /// same way a date edit does.
    pub fn set_destination_type(&mut self, destination_type: DestinationType) {
        self.draft.preferences.destination_type = destination_type;
        self.draft.touch();
        self.invalidate_suggestions();
    }

    pub fn set_budget_range(&mut self, budget_range: BudgetRange) {
        self.draft.preferences.budget_range = budget_range;
        self.draft.touch();
    }

    pub fn set_travel_style(&mut self, travel_style: TravelStyle) {
        self.draft.preferences.travel_style = travel_style;
        self.draft.touch();
    }

    pub fn set_travelers(&mut self, travelers: &str) {
        self.draft.preferences.travelers = travelers.to_string();
        self.draft.touch();
    }

    /// Drop step outputs downstream of the preference edit and re-enter
    /// `DestinationChosen`; in-flight fetches for them become stale.
    fn invalidate_suggestions(&mut self) {
        let downstream = matches!(
            self.state,
            WizardState::AwaitingActivities | WizardState::ActivitiesChosen | WizardState::ItineraryReady
        );
        if !downstream {
            return;
        }

        if let Some(destination) = self.draft.destination_name() {
            self.coordinator.supersede(&format!("activities:{destination}"));
            self.coordinator.supersede(&format!("duration:{destination}"));
        }
        self.coordinator.supersede("itinerary");
        self.draft.activity_buckets = None;
        self.draft.duration_hint = None;
        self.draft.itinerary = None;
        self.state = WizardState::DestinationChosen;
        debug!("invalidate_suggestions: returned to DestinationChosen");
    }

    /// Fetch activity suggestions and the stay-length hint together.
    ///
    /// Both are soft: a failed hint is simply absent, and failed activity
    /// suggestions advance the flow with an empty board so itinerary
    /// generation can still run on defaults.
    pub async fn request_activities(&mut self) -> Result<(), WizardError> {
        debug!("request_activities: called");
        self.require("request activities", self.state == WizardState::DestinationChosen)?;
        if !self.draft.dates.is_complete() {
            return Err(WizardError::Validation("travel dates are not set".to_string()));
        }
        let destination = self
            .draft
            .destination_name()
            .map(str::to_string)
            .ok_or_else(|| WizardError::Validation("no destination chosen".to_string()))?;

        let prefs = self.draft.preferences.clone();
        let dates = self.draft.dates.clone();
        let duration = dates.length().days;
        self.state = WizardState::AwaitingActivities;

        let activities_key = format!("activities:{destination}");
        let duration_key = format!("duration:{destination}");
        let (activities, duration_hint) = futures::join!(
            self.coordinator.issue(
                &activities_key,
                self.client.suggest_activities(&destination, &prefs, &dates, duration),
            ),
            self.coordinator
                .issue(&duration_key, self.client.recommend_duration(&destination, &prefs)),
        );

        match duration_hint {
            Some(Ok(recommendation)) => {
                self.draft.duration_hint = Some(recommendation);
                self.emit(WizardEvent::StepCompleted { step: WizardStep::DurationHint });
            }
            Some(Err(e)) => {
                self.draft.duration_hint = None;
                self.emit(WizardEvent::StepFailed {
                    step: WizardStep::DurationHint,
                    error: e.to_string(),
                    halted: false,
                });
            }
            None => {}
        }

        match activities {
            Some(Ok(buckets)) => {
                self.draft.activity_buckets = Some(buckets);
                self.draft.touch();
                self.emit(WizardEvent::StepCompleted { step: WizardStep::Activities });
            }
            Some(Err(e)) => {
                // Fail forward: no suggestions to show, but the flow can
                // finish on the default activities.
                self.draft.activity_buckets = None;
                self.draft.touch();
                self.emit(WizardEvent::StepFailed {
                    step: WizardStep::Activities,
                    error: e.to_string(),
                    halted: false,
                });
                self.state = WizardState::ActivitiesChosen;
            }
            None => {}
        }
        Ok(())
    }

    /// Toggle an activity in or out of the selection.
    ///
    /// Returns true when the activity is selected after the call.
    pub fn toggle_activity(&mut self, activity: Activity) -> Result<bool, WizardError> {
        self.require(
            "toggle activity",
            matches!(self.state, WizardState::AwaitingActivities | WizardState::ActivitiesChosen),
        )?;
        let selected = self.draft.activities.toggle(activity);
        self.draft.touch();
        Ok(selected)
    }

    /// Confirm the current picks (or an empty board) and move on
    pub fn confirm_activities(&mut self) -> Result<(), WizardError> {
        self.require(
            "confirm activities",
            matches!(self.state, WizardState::AwaitingActivities | WizardState::ActivitiesChosen),
        )?;
        self.state = WizardState::ActivitiesChosen;
        Ok(())
    }

    /// Synthesize the itinerary. Hard step: failure halts the flow in
    /// `Failed(Itinerary)` until `recover` or `reset`.
    pub async fn generate_itinerary(&mut self) -> Result<(), WizardError> {
        debug!("generate_itinerary: called");
        self.require(
            "generate itinerary",
            matches!(
                self.state,
                WizardState::ActivitiesChosen | WizardState::Failed(WizardStep::Itinerary)
            ),
        )?;
        let destination = self
            .draft
            .destination_name()
            .map(str::to_string)
            .ok_or_else(|| WizardError::Validation("no destination chosen".to_string()))?;

        self.state = WizardState::ActivitiesChosen;

        let prefs = &self.draft.preferences;
        let request = ItineraryRequest {
            destination_type: prefs.destination_type,
            budget_range: prefs.budget_range,
            travel_style: prefs.travel_style,
            duration: self.draft.dates.length().days,
            activities: self.draft.activities.names_or_default(),
            vibe: format!("{} - specifically for {}", prefs.vibe_text, destination),
            travel_month: (!self.draft.dates.travel_month.is_empty())
                .then(|| self.draft.dates.travel_month.clone()),
            travelers: Some(prefs.travelers.clone()),
        };

        let outcome = self
            .coordinator
            .issue("itinerary", self.client.generate_itinerary(&request))
            .await;

        match outcome {
            Some(Ok(itinerary)) => {
                self.draft.itinerary = Some(itinerary);
                self.draft.touch();
                self.state = WizardState::ItineraryReady;
                self.emit(WizardEvent::StepCompleted { step: WizardStep::Itinerary });
                Ok(())
            }
            Some(Err(e)) => {
                self.state = WizardState::Failed(WizardStep::Itinerary);
                self.emit(WizardEvent::StepFailed {
                    step: WizardStep::Itinerary,
                    error: e.to_string(),
                    halted: true,
                });
                Err(WizardError::Suggestion(e))
            }
            None => Ok(()),
        }
    }

    /// Leave the halted state, returning to the step before itinerary
    /// synthesis. Itinerary generation is the only hard step, so this is
    /// the only failure the machine can be parked in.
    pub fn recover(&mut self) {
        if matches!(self.state, WizardState::Failed(_)) {
            self.state = WizardState::ActivitiesChosen;
            debug!("recover: returned to ActivitiesChosen");
        }
    }

    /// Discard the draft and return to idle; in-flight requests for the old
    /// draft become stale.
    pub fn reset(&mut self) {
        debug!("reset: called");
        self.coordinator.cancel_all();
        self.draft = TripDraft::new();
        self.state = WizardState::Idle;
        self.emit(WizardEvent::DraftCleared);
    }
}
