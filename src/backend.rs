use glam::{Quat, Vec2, Vec3};

use crate::animation::{Action, ActionKey, AnimationFinished, Animator};
use crate::camera::Camera;
use crate::interaction::object::AnimationTag;
use crate::math::bounds::AABB;
use crate::scene_graph::{Hit, NodeId, Scene, SceneNode};

/// What the interaction layer needs from a renderer: attach and detach
/// nodes, read and write transforms, run animations, hit-test the screen.
pub trait SceneBackend {
    /// Node that placed content is parented under.
    fn anchor(&self) -> NodeId;

    fn attach_child(&mut self, parent: NodeId, node: SceneNode) -> Option<NodeId>;

    /// Removes the node and its subtree for good. Returns false if it was
    /// already gone.
    fn detach(&mut self, node: NodeId) -> bool;

    fn is_alive(&self, node: NodeId) -> bool;

    /// Moves a live node under `parent`, or out of the scene when `parent` is
    /// `None`. The node and its subtree stay alive either way.
    fn set_parent(&mut self, node: NodeId, parent: Option<NodeId>) -> bool;

    fn parent(&self, node: NodeId) -> Option<NodeId>;

    fn translation(&self, node: NodeId) -> Option<Vec3>;
    fn rotation(&self, node: NodeId) -> Option<Quat>;
    fn scale(&self, node: NodeId) -> Option<f32>;

    fn set_translation(&mut self, node: NodeId, translation: Vec3);
    fn set_rotation(&mut self, node: NodeId, rotation: Quat);
    fn set_scale(&mut self, node: NodeId, scale: f32);

    /// Rotates the node about the vertical axis.
    fn rotate_y(&mut self, node: NodeId, angle: f32) {
        if let Some(rotation) = self.rotation(node) {
            self.set_rotation(node, (Quat::from_rotation_y(angle) * rotation).normalize());
        }
    }

    /// Bounds of the node's pickable subtree in its local space.
    fn local_bounds(&self, node: NodeId) -> Option<AABB>;

    fn animate(&mut self, node: NodeId, key: ActionKey, action: Action, tag: Option<AnimationTag>);
    fn stop_animation(&mut self, node: NodeId, key: ActionKey);
    fn stop_all_animations(&mut self, node: NodeId);
    fn is_animating(&self, node: NodeId, key: ActionKey) -> bool;

    /// Pickable nodes under the screen point, nearest first.
    fn hit_test(&self, screen: Vec2) -> Vec<Hit>;

    fn set_camera(&mut self, camera: Camera);
    fn set_environment_intensity(&mut self, intensity: f32);

    /// Steps animations and refreshes world transforms.
    fn advance(&mut self, dt: f32) -> Vec<AnimationFinished<AnimationTag>>;
}

/// Scene-graph renderer state: the node tree, its animations, and the view
/// used to turn screen points into rays.
pub struct Stage {
    pub scene: Scene,
    animator: Animator<AnimationTag>,
    anchor: NodeId,
    camera: Camera,
    viewport: Vec2,
    environment_intensity: f32,
}

impl Stage {
    pub fn new(camera: Camera, viewport: Vec2) -> Self {
        let mut scene = Scene::new();
        let anchor = scene.add_node(SceneNode::new("world anchor"), scene.root());

        Self {
            scene,
            animator: Animator::new(),
            anchor,
            camera,
            viewport,
            environment_intensity: 1.0,
        }
    }

    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    pub fn viewport(&self) -> Vec2 {
        self.viewport
    }

    pub fn environment_intensity(&self) -> f32 {
        self.environment_intensity
    }

    pub fn is_attached(&self, node: NodeId) -> bool {
        self.scene.is_attached(node)
    }
}

impl SceneBackend for Stage {
    fn anchor(&self) -> NodeId {
        self.anchor
    }

    fn attach_child(&mut self, parent: NodeId, node: SceneNode) -> Option<NodeId> {
        if !self.scene.contains(parent) {
            return None;
        }
        Some(self.scene.add_node(node, parent))
    }

    fn detach(&mut self, node: NodeId) -> bool {
        self.animator.stop_all(node);
        self.scene.destroy_node(node)
    }

    fn is_alive(&self, node: NodeId) -> bool {
        self.scene.contains(node)
    }

    fn set_parent(&mut self, node: NodeId, parent: Option<NodeId>) -> bool {
        let parent_missing = parent.is_some_and(|parent| !self.scene.contains(parent));
        if node == self.scene.root() || !self.scene.contains(node) || parent_missing {
            return false;
        }

        self.scene.set_node_parent(node, parent);
        true
    }

    fn parent(&self, node: NodeId) -> Option<NodeId> {
        self.scene.get_node(node).and_then(|node| node.parent_id)
    }

    fn translation(&self, node: NodeId) -> Option<Vec3> {
        self.scene
            .get_node_transform(node)
            .map(|transform| transform.translation())
    }

    fn rotation(&self, node: NodeId) -> Option<Quat> {
        self.scene
            .get_node_transform(node)
            .map(|transform| transform.rotation())
    }

    fn scale(&self, node: NodeId) -> Option<f32> {
        self.scene
            .get_node_transform(node)
            .map(|transform| transform.scale())
    }

    fn set_translation(&mut self, node: NodeId, translation: Vec3) {
        self.scene.set_node_translation(node, translation);
    }

    fn set_rotation(&mut self, node: NodeId, rotation: Quat) {
        self.scene.set_node_rotation(node, rotation);
    }

    fn set_scale(&mut self, node: NodeId, scale: f32) {
        self.scene.set_node_scale(node, scale);
    }

    fn local_bounds(&self, node: NodeId) -> Option<AABB> {
        self.scene.subtree_bounds(node)
    }

    fn animate(&mut self, node: NodeId, key: ActionKey, action: Action, tag: Option<AnimationTag>) {
        if self.scene.contains(node) {
            self.animator.run(node, key, action, tag);
        }
    }

    fn stop_animation(&mut self, node: NodeId, key: ActionKey) {
        self.animator.stop(node, key);
    }

    fn stop_all_animations(&mut self, node: NodeId) {
        self.animator.stop_all(node);
    }

    fn is_animating(&self, node: NodeId, key: ActionKey) -> bool {
        self.animator.is_running(node, key)
    }

    fn hit_test(&self, screen: Vec2) -> Vec<Hit> {
        let ray = self.camera.screen_ray(screen, self.viewport);
        self.scene.hit_test(&ray)
    }

    fn set_camera(&mut self, camera: Camera) {
        self.camera = camera;
    }

    fn set_environment_intensity(&mut self, intensity: f32) {
        self.environment_intensity = intensity;
    }

    fn advance(&mut self, dt: f32) -> Vec<AnimationFinished<AnimationTag>> {
        let finished = self.animator.advance(dt, &mut self.scene);
        self.scene.late_update();
        finished
    }
}
