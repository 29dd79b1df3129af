use glam::{Vec2, Vec3};

use crate::ar::tracking::{LightEstimate, TrackingState};
use crate::camera::Camera;

/// Per-frame output of the AR session.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ArFrame {
    pub camera: Camera,
    pub light_estimate: Option<LightEstimate>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionEvent {
    TrackingChanged(TrackingState),
    AnchorAdded,
    AnchorUpdated,
    AnchorRemoved,
}

impl SessionEvent {
    /// Text for the status line.
    pub fn status_message(&self) -> String {
        match self {
            SessionEvent::TrackingChanged(state) => state.to_string(),
            SessionEvent::AnchorAdded => "a new node has been mapped.".to_string(),
            SessionEvent::AnchorUpdated => "a node has been updated.".to_string(),
            SessionEvent::AnchorRemoved => "a mapped node has been removed.".to_string(),
        }
    }
}

/// The platform AR subsystem as seen by the interaction layer.
pub trait ArSession {
    /// Size of the view the session renders into, in screen points.
    fn viewport(&self) -> Vec2;

    fn current_frame(&self) -> Option<ArFrame>;

    /// World point where the ray through `location` meets a detected or
    /// estimated surface.
    fn raycast(&self, location: Vec2) -> Option<Vec3>;

    /// Events since the previous poll, oldest first.
    fn poll_events(&mut self) -> Vec<SessionEvent>;
}
