use std::sync::{Arc, RwLock};
use webrtc::track::track_local::TrackLocal;

pub type LocalTrack = Arc<dyn TrackLocal + Send + Sync>;

/// Outbound tracks shared between the application and the engine.
///
/// The engine takes a snapshot when it creates a negotiation context, so
/// tracks added mid-session are sent from the next session on.
#[derive(Clone, Default)]
pub struct LocalMedia {
    tracks: Arc<RwLock<Vec<LocalTrack>>>,
}

impl LocalMedia {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_track(&self, track: LocalTrack) {
        self.tracks
            .write()
            .unwrap_or_else(|e| e.into_inner())
            .push(track);
    }

    pub fn clear(&self) {
        self.tracks.write().unwrap_or_else(|e| e.into_inner()).clear();
    }

    pub fn snapshot(&self) -> Vec<LocalTrack> {
        self.tracks.read().unwrap_or_else(|e| e.into_inner()).clone()
    }

    pub fn len(&self) -> usize {
        self.tracks.read().unwrap_or_else(|e| e.into_inner()).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
