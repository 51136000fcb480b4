//! Activity suggestions and the user's toggled selection

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Activities sent to itinerary generation when the user picked none
pub const DEFAULT_ACTIVITIES: [&str; 3] = ["sightseeing", "local culture", "food tours"];

/// Which suggestion bucket an activity came from
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActivityCategory {
    Seasonal,
    YearRound,
    #[default]
    General,
}

/// One suggested activity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Activity {
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub cost: String,
    #[serde(default)]
    pub duration: String,
    #[serde(default)]
    pub category: ActivityCategory,
}

impl Activity {
    pub fn general(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: String::new(),
            cost: String::new(),
            duration: String::new(),
            category: ActivityCategory::General,
        }
    }
}

/// The two suggestion buckets returned for a destination and month
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ActivityBuckets {
    pub seasonal: Vec<Activity>,
    pub year_round: Vec<Activity>,
}

/// The user's activity picks, keyed by name
///
/// Keying by name (not identity) means the same activity offered from two
/// buckets cannot be double-added, and re-toggling a name removes it.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ActivitySelection {
    selected: BTreeMap<String, Activity>,
}

impl ActivitySelection {
    /// Toggle an activity in or out of the selection.
    ///
    /// Returns true when the activity is selected after the call.
    pub fn toggle(&mut self, activity: Activity) -> bool {
        if self.selected.remove(&activity.name).is_some() {
            false
        } else {
            self.selected.insert(activity.name.clone(), activity);
            true
        }
    }

    pub fn contains(&self, name: &str) -> bool {
        self.selected.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.selected.len()
    }

    pub fn is_empty(&self) -> bool {
        self.selected.is_empty()
    }

    pub fn clear(&mut self) {
        self.selected.clear();
    }

    /// Selected activity names in stable order
    pub fn names(&self) -> Vec<String> {
        self.selected.keys().cloned().collect()
    }

    /// Names for itinerary generation: the selection, or the generic trio
    /// when nothing was picked.
    pub fn names_or_default(&self) -> Vec<String> {
        if self.selected.is_empty() {
            DEFAULT_ACTIVITIES.iter().map(|s| (*s).to_string()).collect()
        } else {
            self.names()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_toggle_is_idempotent_by_name() {
        let mut selection = ActivitySelection::default();

        assert!(selection.toggle(Activity::general("Hiking")));
        assert!(selection.contains("Hiking"));
        assert_eq!(selection.len(), 1);

        // Toggling the same name again removes it
        assert!(!selection.toggle(Activity::general("Hiking")));
        assert!(!selection.contains("Hiking"));
        assert!(selection.is_empty());
    }

    #[test]
    fn test_same_name_from_two_buckets_is_one_entry() {
        let mut selection = ActivitySelection::default();

        let mut seasonal = Activity::general("Boat Tours");
        seasonal.category = ActivityCategory::Seasonal;
        let mut year_round = Activity::general("Boat Tours");
        year_round.category = ActivityCategory::YearRound;

        assert!(selection.toggle(seasonal));
        // Second add from the other bucket toggles the entry off
        assert!(!selection.toggle(year_round));
        assert!(selection.is_empty());
    }

    #[test]
    fn test_default_trio_when_empty() {
        let selection = ActivitySelection::default();
        assert_eq!(
            selection.names_or_default(),
            vec!["sightseeing", "local culture", "food tours"]
        );

        let mut selection = ActivitySelection::default();
        selection.toggle(Activity::general("Museums"));
        assert_eq!(selection.names_or_default(), vec!["Museums"]);
    }
}
