use glam::{Mat4, Quat, Vec3};
use id_arena::Arena;
use itertools::Itertools;

use crate::math::bounds::AABB;
use crate::math::ray::Ray;
use crate::scene_graph::node::{NodeId, SceneNode};
use crate::scene_graph::transform::Transform;

/// A node intersected by a hit-test ray.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Hit {
    pub node: NodeId,
    pub distance: f32,
    pub point: Vec3,
}

/// Arena-backed node tree. Ids are never reused; destroyed nodes stay in the
/// arena as tombstones so stale ids resolve to `None` instead of aliasing.
pub struct Scene {
    nodes: Arena<SceneNode>,
    root: NodeId,
}

impl Scene {
    pub fn new() -> Self {
        let mut nodes = Arena::new();
        let root = nodes.alloc(SceneNode::new("root"));
        Self { nodes, root }
    }

    pub fn root(&self) -> NodeId {
        self.root
    }

    pub fn add_node(&mut self, node: SceneNode, parent: NodeId) -> NodeId {
        let node_id = self.nodes.alloc(node);
        self.set_node_parent(node_id, Some(parent));
        node_id
    }

    pub fn get_node(&self, id: NodeId) -> Option<&SceneNode> {
        self.nodes.get(id).filter(|node| !node.destroyed)
    }

    pub fn get_node_mut(&mut self, id: NodeId) -> Option<&mut SceneNode> {
        self.nodes.get_mut(id).filter(|node| !node.destroyed)
    }

    /// Arena slots in use, tombstones included.
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn contains(&self, id: NodeId) -> bool {
        self.get_node(id).is_some()
    }

    pub fn get_node_by_name(&self, name: &str) -> Option<NodeId> {
        self.nodes
            .iter()
            .find(|(_, node)| !node.destroyed && node.name == name)
            .map(|(id, _)| id)
    }

    /// The node itself followed by each of its ancestors up to the root.
    pub fn ancestors(&self, id: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        let start = self.contains(id).then_some(id);
        std::iter::successors(start, move |id| {
            self.get_node(*id).and_then(|node| node.parent_id)
        })
    }

    /// Whether the node is reachable from the scene root.
    pub fn is_attached(&self, id: NodeId) -> bool {
        self.ancestors(id).any(|ancestor| ancestor == self.root)
    }

    /// Sets the parent of a node and updates child relationships
    pub fn set_node_parent(&mut self, child_id: NodeId, new_parent_id: Option<NodeId>) {
        // Remove from old parent's children list
        if let Some(old_parent_id) = self.get_node(child_id).and_then(|child| child.parent_id) {
            if let Some(old_parent) = self.get_node_mut(old_parent_id) {
                old_parent.child_ids.retain(|&id| id != child_id);
            }
        }

        let new_parent_id = new_parent_id.filter(|id| self.contains(*id));

        if let Some(child) = self.get_node_mut(child_id) {
            child.parent_id = new_parent_id;

            if let Some(new_parent_id) = new_parent_id {
                if let Some(new_parent) = self.get_node_mut(new_parent_id) {
                    new_parent.child_ids.push(child_id);
                }
            }
        }

        self.invalidate_node_hierarchy(child_id);
    }

    /// Detaches the node from its parent and tombstones it with its whole
    /// subtree. Returns false if the node was already gone.
    pub fn destroy_node(&mut self, id: NodeId) -> bool {
        if id == self.root || !self.contains(id) {
            return false;
        }

        self.set_node_parent(id, None);

        let mut pending = vec![id];
        while let Some(node_id) = pending.pop() {
            if let Some(node) = self.nodes.get_mut(node_id) {
                node.destroyed = true;
                node.parent_id = None;
                pending.extend(node.child_ids.drain(..));
            }
        }

        true
    }

    /// Updates all node transforms in hierarchical order
    fn update_transforms(&self) {
        let root_nodes = self.nodes.iter().filter_map(|(id, node)| {
            if node.parent_id.is_none() && !node.destroyed {
                Some(id)
            } else {
                None
            }
        });

        for root_id in root_nodes {
            self.update_node_transform_recursive(root_id, Mat4::IDENTITY);
        }
    }

    fn update_node_transform_recursive(&self, node_id: NodeId, parent_world_matrix: Mat4) {
        if let Some(node) = self.get_node(node_id) {
            if node.transform.is_world_dirty() {
                let local_matrix = node.transform.local_matrix();
                node.transform.set_world_matrix(parent_world_matrix * local_matrix);
            }

            let world_matrix = node.transform.world_matrix();
            for &child_id in &node.child_ids {
                self.update_node_transform_recursive(child_id, world_matrix);
            }
        }
    }

    /// Invalidates world transforms for a node and all its descendants
    pub fn invalidate_node_hierarchy(&self, node_id: NodeId) {
        if let Some(node) = self.get_node(node_id) {
            node.transform.invalidate_world();

            for &child_id in &node.child_ids {
                self.invalidate_node_hierarchy(child_id);
            }
        }
    }

    pub fn set_node_translation(&mut self, node_id: NodeId, translation: Vec3) {
        if let Some(node) = self.get_node_mut(node_id) {
            node.transform.set_translation(translation);
        }
        self.invalidate_node_hierarchy(node_id);
    }

    pub fn translate_node(&mut self, node_id: NodeId, delta: Vec3) {
        if let Some(node) = self.get_node_mut(node_id) {
            node.transform.translate(delta);
        }
        self.invalidate_node_hierarchy(node_id);
    }

    pub fn set_node_rotation(&mut self, node_id: NodeId, rotation: Quat) {
        if let Some(node) = self.get_node_mut(node_id) {
            node.transform.set_rotation(rotation);
        }
        self.invalidate_node_hierarchy(node_id);
    }

    pub fn set_node_scale(&mut self, node_id: NodeId, scale: f32) {
        if let Some(node) = self.get_node_mut(node_id) {
            node.transform.set_scale(scale);
        }
        self.invalidate_node_hierarchy(node_id);
    }

    pub fn get_node_transform(&self, node_id: NodeId) -> Option<&Transform> {
        self.get_node(node_id).map(|node| &node.transform)
    }

    /// World matrix as of the last transform update.
    pub fn world_matrix(&self, node_id: NodeId) -> Option<Mat4> {
        self.update_transforms();
        self.get_node(node_id)
            .map(|node| node.transform.world_matrix())
    }

    /// Bounds of the node and its pickable descendants, in the node's local space.
    pub fn subtree_bounds(&self, node_id: NodeId) -> Option<AABB> {
        let node = self.get_node(node_id)?;

        node.child_ids
            .iter()
            .filter_map(|&child_id| {
                let child = self.get_node(child_id).filter(|child| child.pickable)?;
                let bounds = self.subtree_bounds(child_id)?;
                Some(bounds.transform(&child.transform.local_matrix()))
            })
            .chain(node.bounds)
            .reduce(|a, b| a.union(&b))
    }

    /// Every attached, pickable node whose world bounds the ray crosses,
    /// nearest first.
    pub fn hit_test(&self, ray: &Ray) -> Vec<Hit> {
        self.update_transforms();

        self.nodes
            .iter()
            .filter(|(id, node)| !node.destroyed && node.pickable && self.is_attached(*id))
            .filter_map(|(id, node)| {
                let bounds = node.bounds?.transform(&node.transform.world_matrix());
                let distance = bounds.intersect_ray(ray)?;
                Some(Hit {
                    node: id,
                    distance,
                    point: ray.at(distance),
                })
            })
            .sorted_by(|a, b| a.distance.total_cmp(&b.distance))
            .collect()
    }

    pub fn late_update(&mut self) {
        self.update_transforms();
    }
}

impl Default for Scene {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    fn unit_box() -> AABB {
        AABB::new(Vec3::splat(-0.5), Vec3::splat(0.5))
    }

    #[test]
    fn parenting_updates_child_lists() {
        let mut scene = Scene::new();
        let a = scene.add_node(SceneNode::new("a"), scene.root());
        let b = scene.add_node(SceneNode::new("b"), a);

        assert_eq!(scene.get_node(a).unwrap().child_ids, vec![b]);
        assert!(scene.is_attached(b));

        scene.set_node_parent(b, Some(scene.root()));
        assert!(scene.get_node(a).unwrap().child_ids.is_empty());
        assert_eq!(scene.get_node(b).unwrap().parent_id, Some(scene.root()));
    }

    #[test]
    fn destroyed_nodes_and_descendants_become_unreachable() {
        let mut scene = Scene::new();
        let a = scene.add_node(SceneNode::new("a"), scene.root());
        let b = scene.add_node(SceneNode::new("b"), a);

        assert!(scene.destroy_node(a));
        assert!(!scene.contains(a));
        assert!(!scene.contains(b));
        assert!(scene.get_node(scene.root()).unwrap().child_ids.is_empty());
        assert!(scene.get_node_by_name("b").is_none());

        assert!(!scene.destroy_node(a));
        assert!(!scene.destroy_node(scene.root()));
    }

    #[test]
    fn world_matrix_composes_parents() {
        let mut scene = Scene::new();
        let parent = scene.add_node(
            SceneNode::new("parent").with_translation(Vec3::new(1.0, 0.0, 0.0)),
            scene.root(),
        );
        let child = scene.add_node(
            SceneNode::new("child").with_translation(Vec3::new(0.0, 2.0, 0.0)),
            parent,
        );

        let world = scene.world_matrix(child).unwrap();
        assert_eq!(world.w_axis.truncate(), Vec3::new(1.0, 2.0, 0.0));

        scene.translate_node(parent, Vec3::new(0.0, 0.0, 3.0));
        let world = scene.world_matrix(child).unwrap();
        assert_eq!(world.w_axis.truncate(), Vec3::new(1.0, 2.0, 3.0));
    }

    #[test]
    fn hit_test_ranks_nearest_first_and_skips_decorations() {
        let mut scene = Scene::new();
        let far = scene.add_node(
            SceneNode::new("far")
                .with_bounds(unit_box())
                .with_translation(Vec3::new(0.0, 0.0, -5.0)),
            scene.root(),
        );
        let near = scene.add_node(SceneNode::new("near").with_bounds(unit_box()), scene.root());
        scene.add_node(
            SceneNode::new("marker")
                .with_bounds(unit_box())
                .with_translation(Vec3::new(0.0, 0.0, 2.0))
                .decoration(),
            scene.root(),
        );

        let ray = Ray::new(Vec3::new(0.0, 0.0, 10.0), Vec3::NEG_Z);
        let hits = scene.hit_test(&ray);

        assert_eq!(hits.iter().map(|hit| hit.node).collect::<Vec<_>>(), vec![near, far]);
        assert_abs_diff_eq!(hits[0].distance, 9.5, epsilon = 1e-5);
    }

    #[test]
    fn hit_test_ignores_detached_nodes() {
        let mut scene = Scene::new();
        let node = scene.add_node(SceneNode::new("box").with_bounds(unit_box()), scene.root());
        scene.set_node_parent(node, None);

        let ray = Ray::new(Vec3::new(0.0, 0.0, 10.0), Vec3::NEG_Z);
        assert!(scene.hit_test(&ray).is_empty());
    }

    #[test]
    fn subtree_bounds_include_scaled_children() {
        let mut scene = Scene::new();
        let parent = scene.add_node(SceneNode::new("parent"), scene.root());
        scene.add_node(
            SceneNode::new("part")
                .with_bounds(unit_box())
                .with_scale(0.5)
                .with_translation(Vec3::new(0.0, 0.25, 0.0)),
            parent,
        );
        scene.add_node(
            SceneNode::new("marker").with_bounds(unit_box()).with_scale(10.0).decoration(),
            parent,
        );

        let bounds = scene.subtree_bounds(parent).unwrap();
        assert_abs_diff_eq!(bounds.min.y, 0.0, epsilon = 1e-6);
        assert_abs_diff_eq!(bounds.max.y, 0.5, epsilon = 1e-6);
        assert_abs_diff_eq!(bounds.size().x, 0.5, epsilon = 1e-6);
    }
}
