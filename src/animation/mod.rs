pub mod action;
pub mod animator;
pub mod easing;
pub mod scheduler;

pub use action::Action;
pub use animator::{ActionKey, AnimationFinished, Animator};
pub use easing::Easing;
pub use scheduler::TaskScheduler;
