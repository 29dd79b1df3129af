use glam::{Vec2, Vec3};

use crate::ar::session::{ArFrame, ArSession, SessionEvent};
use crate::ar::tracking::{LightEstimate, LimitedReason, TrackingState};
use crate::camera::Camera;
use crate::math::plane::Plane;

/// Stand-in for a device session: a fixed camera over a set of horizontal
/// planes. Useful for headless runs and tests.
pub struct SimulatedSession {
    camera: Camera,
    viewport: Vec2,
    planes: Vec<Option<Plane>>,
    tracking: TrackingState,
    light_estimate: Option<LightEstimate>,
    events: Vec<SessionEvent>,
}

impl SimulatedSession {
    pub fn new(camera: Camera, viewport: Vec2) -> Self {
        let tracking = TrackingState::Limited(LimitedReason::Initializing);
        Self {
            camera,
            viewport,
            planes: Vec::new(),
            tracking,
            light_estimate: None,
            events: vec![SessionEvent::TrackingChanged(tracking)],
        }
    }

    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    pub fn set_camera(&mut self, camera: Camera) {
        self.camera = camera;
    }

    pub fn tracking_state(&self) -> TrackingState {
        self.tracking
    }

    pub fn set_tracking_state(&mut self, tracking: TrackingState) {
        if self.tracking != tracking {
            self.tracking = tracking;
            self.events.push(SessionEvent::TrackingChanged(tracking));
        }
    }

    pub fn set_light_estimate(&mut self, estimate: Option<LightEstimate>) {
        self.light_estimate = estimate;
    }

    /// Adds a detected horizontal plane and returns its index.
    pub fn add_plane(&mut self, height: f32) -> usize {
        self.planes.push(Some(Plane::horizontal(height)));
        self.events.push(SessionEvent::AnchorAdded);
        self.planes.len() - 1
    }

    pub fn update_plane(&mut self, index: usize, height: f32) -> bool {
        match self.planes.get_mut(index) {
            Some(Some(plane)) => {
                *plane = Plane::horizontal(height);
                self.events.push(SessionEvent::AnchorUpdated);
                true
            }
            _ => false,
        }
    }

    pub fn remove_plane(&mut self, index: usize) -> bool {
        match self.planes.get_mut(index).and_then(Option::take) {
            Some(_) => {
                self.events.push(SessionEvent::AnchorRemoved);
                true
            }
            None => false,
        }
    }
}

impl ArSession for SimulatedSession {
    fn viewport(&self) -> Vec2 {
        self.viewport
    }

    fn current_frame(&self) -> Option<ArFrame> {
        if self.tracking == TrackingState::NotAvailable {
            return None;
        }

        Some(ArFrame {
            camera: self.camera,
            light_estimate: self.light_estimate,
        })
    }

    fn raycast(&self, location: Vec2) -> Option<Vec3> {
        if self.tracking == TrackingState::NotAvailable {
            return None;
        }

        let ray = self.camera.screen_ray(location, self.viewport);
        self.planes
            .iter()
            .flatten()
            .filter_map(|plane| plane.intersect_ray(&ray))
            .min_by(|a, b| a.total_cmp(b))
            .map(|t| ray.at(t))
    }

    fn poll_events(&mut self) -> Vec<SessionEvent> {
        std::mem::take(&mut self.events)
    }
}
