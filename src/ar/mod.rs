pub mod session;
pub mod simulated;
pub mod tracking;

pub use session::{ArFrame, ArSession, SessionEvent};
pub use simulated::SimulatedSession;
pub use tracking::{environment_intensity, LightEstimate, LimitedReason, TrackingState};
