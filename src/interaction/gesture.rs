use glam::{Vec2, Vec3};

use crate::backend::SceneBackend;
use crate::interaction::object::{ObjectHandle, PlacedObject};
use crate::interaction::registry::ObjectRegistry;

/// Raw input as delivered by the platform's gesture recognizers. Rotation
/// carries the increment since the previous event, so each value is applied
/// exactly once.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GestureEvent {
    Tap { location: Vec2 },
    PanBegan { location: Vec2 },
    PanChanged { location: Vec2 },
    PanEnded,
    PanCancelled,
    Rotate { location: Vec2, rotation: f32 },
}

/// Anchors of an in-progress drag.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DragSession {
    pub object: ObjectHandle,
    pub start_world: Vec3,
    pub start_position: Vec3,
}

impl DragSession {
    /// Object position for the drag point now at `world`. Only the horizontal
    /// offset is applied; height stays at `current.y`.
    pub fn target(&self, world: Vec3, current: Vec3) -> Vec3 {
        let moved = self.start_position + (world - self.start_world);
        Vec3::new(moved.x, current.y, moved.z)
    }
}

/// Turns screen-space gestures into objects and drag targets.
#[derive(Debug, Default)]
pub struct GestureRouter {
    drag: Option<DragSession>,
}

impl GestureRouter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Nearest interactive object under the screen point.
    pub fn pick<B: SceneBackend>(
        &self,
        backend: &B,
        registry: &ObjectRegistry,
        location: Vec2,
    ) -> Option<ObjectHandle> {
        backend
            .hit_test(location)
            .into_iter()
            .filter_map(|hit| registry.resolve(backend, hit.node))
            .find(|handle| {
                registry
                    .get(*handle)
                    .is_some_and(PlacedObject::is_interactive)
            })
    }

    pub fn begin_drag(&mut self, object: ObjectHandle, start_world: Vec3, start_position: Vec3) {
        self.drag = Some(DragSession {
            object,
            start_world,
            start_position,
        });
    }

    pub fn drag_session(&self) -> Option<&DragSession> {
        self.drag.as_ref()
    }

    pub fn end_drag(&mut self) -> Option<DragSession> {
        self.drag.take()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::interaction::object_type::ObjectType;
    use crate::interaction::testing::{place, stage};

    #[test]
    fn drag_target_moves_horizontally_only() {
        let session = DragSession {
            object: ObjectHandle::new(stage().anchor()),
            start_world: Vec3::new(0.2, 0.0, 0.1),
            start_position: Vec3::new(1.0, 0.3, -1.0),
        };

        let target = session.target(Vec3::new(0.7, 0.4, -0.4), Vec3::new(1.0, 0.35, -1.0));
        assert_eq!(target, Vec3::new(1.5, 0.35, -1.5));
    }

    #[test]
    fn pick_prefers_the_nearest_object() {
        let mut stage = stage();
        let mut registry = ObjectRegistry::new();
        // Both sit on the ray from the camera through the screen center.
        let near = place(&mut stage, ObjectType::Teapot, Vec3::new(0.0, 0.2, 0.4));
        let far = place(&mut stage, ObjectType::Teapot, Vec3::ZERO);
        let near = registry.insert(near);
        let far = registry.insert(far);

        let router = GestureRouter::new();
        let center = stage.viewport() * 0.5;
        assert_eq!(router.pick(&stage, &registry, center), Some(near));

        registry.remove(near);
        assert_eq!(router.pick(&stage, &registry, center), Some(far));
    }

    #[test]
    fn pick_misses_empty_screen_space() {
        let mut stage = stage();
        let mut registry = ObjectRegistry::new();
        registry.insert(place(&mut stage, ObjectType::Teapot, Vec3::ZERO));

        let router = GestureRouter::new();
        assert_eq!(router.pick(&stage, &registry, Vec2::new(5.0, 5.0)), None);
    }

    #[test]
    fn drag_session_is_discarded_on_end() {
        let mut router = GestureRouter::new();
        let handle = ObjectHandle::new(stage().anchor());
        router.begin_drag(handle, Vec3::ZERO, Vec3::ONE);

        assert_eq!(router.drag_session().map(|session| session.object), Some(handle));
        assert!(router.end_drag().is_some());
        assert!(router.drag_session().is_none());
    }
}
