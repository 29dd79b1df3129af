use glam::Vec3;
use id_arena::Id;

use crate::math::bounds::AABB;
use crate::scene_graph::transform::Transform;

pub type NodeId = Id<SceneNode>;

pub struct SceneNode {
    pub name: String,
    pub transform: Transform,
    /// Geometry bounds in the node's local space. Nodes without bounds are
    /// never returned by hit tests.
    pub bounds: Option<AABB>,
    /// Decorations such as selection markers opt out of hit testing and of
    /// subtree bounds.
    pub pickable: bool,
    pub parent_id: Option<NodeId>,
    pub child_ids: Vec<NodeId>,
    pub(crate) destroyed: bool,
}

impl SceneNode {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    pub fn with_bounds(mut self, bounds: AABB) -> Self {
        self.bounds = Some(bounds);
        self
    }

    pub fn with_translation(mut self, translation: Vec3) -> Self {
        self.transform.set_translation(translation);
        self
    }

    pub fn with_scale(mut self, scale: f32) -> Self {
        self.transform.set_scale(scale);
        self
    }

    pub fn decoration(mut self) -> Self {
        self.pickable = false;
        self
    }
}

impl Default for SceneNode {
    fn default() -> Self {
        Self {
            name: String::new(),
            transform: Transform::from_translation(Vec3::ZERO),
            bounds: None,
            pickable: true,
            parent_id: None,
            child_ids: Vec::new(),
            destroyed: false,
        }
    }
}
