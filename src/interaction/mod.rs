pub mod gesture;
pub mod object;
pub mod object_type;
pub mod registry;
pub mod selection;
pub mod spawn;

pub use gesture::{DragSession, GestureEvent, GestureRouter};
pub use object::{ObjectHandle, PlacedObject, SelectionState};
pub use object_type::ObjectType;
pub use registry::ObjectRegistry;
pub use selection::SelectionController;
pub use spawn::{ModelAsset, ModelLibrary, ModelPart, ProceduralLibrary, SpawnService};

#[cfg(test)]
pub(crate) mod testing {
    use glam::{Vec2, Vec3};

    use crate::backend::{SceneBackend, Stage};
    use crate::camera::Camera;
    use crate::config::InteractionConfig;
    use crate::interaction::object::{ObjectHandle, PlacedObject};
    use crate::interaction::object_type::ObjectType;
    use crate::interaction::spawn::{build_object_nodes, ModelLibrary, ProceduralLibrary};

    pub fn stage() -> Stage {
        Stage::new(
            Camera::looking_at(Vec3::new(0.0, 1.5, 2.0), Vec3::ZERO),
            Vec2::new(800.0, 600.0),
        )
    }

    /// An idle object at full scale, without any entry animation.
    pub fn place(stage: &mut Stage, kind: ObjectType, at: Vec3) -> PlacedObject {
        let asset = ProceduralLibrary.load(kind).unwrap();
        let node = build_object_nodes(stage, kind, &asset, at).unwrap();
        PlacedObject::new(kind, ObjectHandle::new(node), at.y)
    }

    /// Advances the stage and feeds the object its finished animations.
    pub fn step(stage: &mut Stage, object: &mut PlacedObject, config: &InteractionConfig, dt: f32) {
        for finished in stage.advance(dt) {
            if finished.node == object.node() {
                object.on_animation_finished(finished.tag, stage, config);
            }
        }
    }
}
