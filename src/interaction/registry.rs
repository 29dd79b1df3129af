use std::collections::HashMap;

use crate::backend::SceneBackend;
use crate::interaction::object::{ObjectHandle, PlacedObject};
use crate::scene_graph::NodeId;

/// Every object currently placed in the scene, keyed by handle.
#[derive(Debug, Default)]
pub struct ObjectRegistry {
    objects: HashMap<ObjectHandle, PlacedObject>,
}

impl ObjectRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, object: PlacedObject) -> ObjectHandle {
        let handle = object.handle();
        self.objects.insert(handle, object);
        handle
    }

    pub fn get(&self, handle: ObjectHandle) -> Option<&PlacedObject> {
        self.objects.get(&handle)
    }

    pub fn get_mut(&mut self, handle: ObjectHandle) -> Option<&mut PlacedObject> {
        self.objects.get_mut(&handle)
    }

    pub fn remove(&mut self, handle: ObjectHandle) -> Option<PlacedObject> {
        self.objects.remove(&handle)
    }

    pub fn contains(&self, handle: ObjectHandle) -> bool {
        self.objects.contains_key(&handle)
    }

    pub fn len(&self) -> usize {
        self.objects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &PlacedObject> {
        self.objects.values()
    }

    pub fn selected_count(&self) -> usize {
        self.iter().filter(|object| object.is_selected()).count()
    }

    /// Maps a rendered node to the object owning it, walking up from parts
    /// of the model to the object root.
    pub fn resolve<B: SceneBackend>(&self, backend: &B, node: NodeId) -> Option<ObjectHandle> {
        let mut current = Some(node);
        while let Some(node) = current {
            let handle = ObjectHandle::new(node);
            if self.contains(handle) {
                return Some(handle);
            }
            current = backend.parent(node);
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::interaction::object_type::ObjectType;
    use crate::interaction::testing::{place, stage};
    use glam::Vec3;

    #[test]
    fn resolve_walks_from_part_to_object() {
        let mut stage = stage();
        let object = place(&mut stage, ObjectType::Teapot, Vec3::ZERO);
        let handle = object.handle();

        let mut registry = ObjectRegistry::new();
        registry.insert(object);

        let model = stage.scene.get_node(handle.node()).unwrap().child_ids[0];
        let part = stage.scene.get_node(model).unwrap().child_ids[0];

        assert_eq!(registry.resolve(&stage, part), Some(handle));
        assert_eq!(registry.resolve(&stage, handle.node()), Some(handle));
        assert_eq!(registry.resolve(&stage, stage.anchor()), None);
    }
}
