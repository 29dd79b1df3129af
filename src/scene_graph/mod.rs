pub mod node;
pub mod scene;
pub mod transform;

pub use node::{NodeId, SceneNode};
pub use scene::{Hit, Scene};
pub use transform::Transform;
