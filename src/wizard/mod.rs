//! Planning flow orchestration: the state machine and its progress events

mod events;
mod machine;

pub use events::{WizardEvent, WizardStep};
pub use machine::{TripWizard, WizardError, WizardState};
