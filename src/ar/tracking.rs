use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LimitedReason {
    ExcessiveMotion,
    InsufficientFeatures,
    Initializing,
    Relocalizing,
}

/// Quality of the device's world tracking.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrackingState {
    NotAvailable,
    Normal,
    Limited(LimitedReason),
}

impl fmt::Display for TrackingState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let description = match self {
            TrackingState::NotAvailable => "Tracking is not available.",
            TrackingState::Normal => "Tracking is normal.",
            TrackingState::Limited(LimitedReason::ExcessiveMotion) => {
                "Tracking is limited due to a excessive motion of the camera."
            }
            TrackingState::Limited(LimitedReason::InsufficientFeatures) => {
                "Tracking is limited due to a lack of features visible to the camera."
            }
            TrackingState::Limited(LimitedReason::Initializing) => {
                "Tracking is limited due to initialization in progress."
            }
            TrackingState::Limited(LimitedReason::Relocalizing) => {
                "Tracking is limited due to a relocalization in progress."
            }
        };
        f.write_str(description)
    }
}

/// Ambient light measured from the camera image.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LightEstimate {
    /// Lumens; 1000 is a neutral, well-lit scene.
    pub ambient_intensity: f32,
    /// Kelvin.
    pub ambient_color_temperature: f32,
}

/// Environment lighting strength for the renderer. Falls back to a fixed
/// boost when the session provides no estimate.
pub fn environment_intensity(estimate: Option<&LightEstimate>) -> f32 {
    estimate.map_or(2.0, |estimate| estimate.ambient_intensity / 400.0)
}
