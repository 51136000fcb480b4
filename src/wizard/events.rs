//! Wizard progress events
//!
//! Broadcast to observers (UI layers, logging) as steps complete or fail.
//! Each failure produces exactly one event; staleness produces none.

use std::fmt;

use serde::{Deserialize, Serialize};

/// One suggestion step of the planning flow
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WizardStep {
    VibeMatch,
    Destinations,
    Activities,
    DurationHint,
    Itinerary,
}

impl fmt::Display for WizardStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            WizardStep::VibeMatch => "vibe-match",
            WizardStep::Destinations => "destinations",
            WizardStep::Activities => "activities",
            WizardStep::DurationHint => "duration-hint",
            WizardStep::Itinerary => "itinerary",
        };
        write!(f, "{name}")
    }
}

/// Progress notification emitted by the wizard
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum WizardEvent {
    /// A suggestion step landed and the draft was updated
    StepCompleted { step: WizardStep },
    /// A suggestion step failed; `halted` is true only when the flow cannot
    /// continue past it
    StepFailed {
        step: WizardStep,
        error: String,
        halted: bool,
    },
    /// The draft was discarded and the wizard returned to idle
    DraftCleared,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_step_display_names() {
        assert_eq!(WizardStep::VibeMatch.to_string(), "vibe-match");
        assert_eq!(WizardStep::DurationHint.to_string(), "duration-hint");
        assert_eq!(WizardStep::Itinerary.to_string(), "itinerary");
    }
}
