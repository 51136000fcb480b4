//! tripwizard - trip planning wizard orchestration
//!
//! A multi-step planning flow over a remote suggestion service: discover
//! destinations from a vibe description or structured preferences, pick
//! dates and activities, and synthesize an itinerary. The wizard state
//! machine owns the draft, a request coordinator makes rapid re-requests
//! last-request-wins, and the handoff bridge parks drafts across sessions.

pub mod client;
pub mod config;
pub mod coordinator;
pub mod domain;
pub mod handoff;
pub mod wizard;

pub use client::{HttpSuggestionClient, SuggestionClient, SuggestionError};
pub use config::{SuggestionConfig, WizardConfig};
pub use coordinator::RequestCoordinator;
pub use domain::TripDraft;
pub use handoff::{FileChannel, HandoffBridge, HandoffChannel, MemoryChannel, VibeMatchHandoff};
pub use wizard::{TripWizard, WizardError, WizardEvent, WizardState, WizardStep};
