//! Draft handoff between sessions
//!
//! A finished or in-progress draft can be parked in a channel (memory or
//! disk) and resumed later, typically across an authentication boundary.
//! Resume is read-once: a successful read clears the slot so a stale draft
//! can never be picked up twice.

use std::collections::HashMap;
use std::fs;
use std::io::ErrorKind;
use std::path::PathBuf;
use std::sync::Mutex;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, warn};

use crate::domain::{Destination, TripDraft, VibeMatchInfo};

/// Snapshot format version; bumped on incompatible draft changes
pub const HANDOFF_VERSION: u16 = 1;

/// Slot for the full draft with its itinerary
pub const ITINERARY_KEY: &str = "generatedItinerary";

/// Slot for vibe-match display metadata
pub const VIBE_MATCH_KEY: &str = "vibeMatchData";

#[derive(Debug, Error)]
pub enum HandoffError {
    #[error("handoff storage error: {0}")]
    Io(#[from] std::io::Error),

    #[error("handoff serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Keyed storage a handoff can park snapshots in
pub trait HandoffChannel: Send + Sync {
    fn get(&self, key: &str) -> Result<Option<String>, HandoffError>;
    fn put(&self, key: &str, value: &str) -> Result<(), HandoffError>;
    fn remove(&self, key: &str) -> Result<(), HandoffError>;
}

#[derive(Debug, Serialize, Deserialize)]
struct Snapshot<T> {
    version: u16,
    payload: T,
}

/// Mid-flow handoff payload: the match metadata plus the candidates the
/// user was choosing from
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct VibeMatchHandoff {
    pub info: VibeMatchInfo,
    pub candidates: Vec<Destination>,
}

/// Parks and resumes drafts through a [`HandoffChannel`]
pub struct HandoffBridge<C: HandoffChannel> {
    channel: C,
}

impl<C: HandoffChannel> HandoffBridge<C> {
    pub fn new(channel: C) -> Self {
        Self { channel }
    }

    /// Park a draft for a later session
    pub fn persist(&self, draft: &TripDraft) -> Result<(), HandoffError> {
        debug!(draft_id = %draft.id, "persist: called");
        self.put_snapshot(ITINERARY_KEY, draft)
    }

    /// Take the parked draft, if any. Read-once: the slot is cleared even
    /// when the stored version no longer matches.
    pub fn resume(&self) -> Result<Option<TripDraft>, HandoffError> {
        self.take_snapshot(ITINERARY_KEY)
    }

    /// Park mid-flow vibe-match results alongside the draft
    pub fn persist_vibe_match(&self, handoff: &VibeMatchHandoff) -> Result<(), HandoffError> {
        self.put_snapshot(VIBE_MATCH_KEY, handoff)
    }

    /// Take the parked vibe-match results, if any
    pub fn resume_vibe_match(&self) -> Result<Option<VibeMatchHandoff>, HandoffError> {
        self.take_snapshot(VIBE_MATCH_KEY)
    }

    /// Clear both slots; used on logout and on starting a new trip
    pub fn purge(&self) -> Result<(), HandoffError> {
        debug!("purge: called");
        self.channel.remove(ITINERARY_KEY)?;
        self.channel.remove(VIBE_MATCH_KEY)?;
        Ok(())
    }

    fn put_snapshot<T: Serialize>(&self, key: &str, payload: &T) -> Result<(), HandoffError> {
        let snapshot = serde_json::to_string(&Snapshot { version: HANDOFF_VERSION, payload })?;
        self.channel.put(key, &snapshot)
    }

    fn take_snapshot<T: for<'de> Deserialize<'de>>(&self, key: &str) -> Result<Option<T>, HandoffError> {
        let Some(raw) = self.channel.get(key)? else {
            return Ok(None);
        };
        self.channel.remove(key)?;

        let snapshot: Snapshot<T> = serde_json::from_str(&raw)?;
        if snapshot.version != HANDOFF_VERSION {
            warn!(key, found = snapshot.version, expected = HANDOFF_VERSION, "take_snapshot: version mismatch, dropping");
            return Ok(None);
        }
        debug!(key, "take_snapshot: resumed");
        Ok(Some(snapshot.payload))
    }
}

/// In-process channel, for tests and single-session embedding
#[derive(Default)]
pub struct MemoryChannel {
    slots: Mutex<HashMap<String, String>>,
}

impl MemoryChannel {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, HashMap<String, String>> {
        self.slots.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl HandoffChannel for MemoryChannel {
    fn get(&self, key: &str) -> Result<Option<String>, HandoffError> {
        Ok(self.lock().get(key).cloned())
    }

    fn put(&self, key: &str, value: &str) -> Result<(), HandoffError> {
        self.lock().insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), HandoffError> {
        self.lock().remove(key);
        Ok(())
    }
}

/// Directory-backed channel; one `<key>.json` file per slot
pub struct FileChannel {
    dir: PathBuf,
}

impl FileChannel {
    pub fn new(dir: impl Into<PathBuf>) -> Result<Self, HandoffError> {
        let dir = dir.into();
        fs::create_dir_all(&dir)?;
        Ok(Self { dir })
    }

    fn path(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.json"))
    }
}

impl HandoffChannel for FileChannel {
    fn get(&self, key: &str) -> Result<Option<String>, HandoffError> {
        match fs::read_to_string(self.path(key)) {
            Ok(raw) => Ok(Some(raw)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn put(&self, key: &str, value: &str) -> Result<(), HandoffError> {
        fs::write(self.path(key), value)?;
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), HandoffError> {
        match fs::remove_file(self.path(key)) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}
