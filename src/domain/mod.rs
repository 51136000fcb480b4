//! Domain types for the trip planning wizard
//!
//! Everything here is plain data: the date math is pure, the aggregate is
//! mutated only by the wizard, and the suggestion payloads deserialize
//! straight into these types.

pub mod activity;
pub mod dates;
pub mod destination;
pub mod draft;
pub mod itinerary;
pub mod preferences;

pub use activity::{Activity, ActivityBuckets, ActivityCategory, ActivitySelection, DEFAULT_ACTIVITIES};
pub use dates::{FALLBACK_DAYS, MAX_TRIP_DAYS, MIN_TRIP_DAYS, TravelDates, TripLength, compute, month_name};
pub use destination::{Destination, DurationRecommendation, RecommendedDays};
pub use draft::{PlanKind, TripDraft, VibeMatchInfo};
pub use itinerary::Itinerary;
pub use preferences::{BudgetRange, DestinationType, MAX_VIBE_LEN, TravelStyle, TripPreferences};
