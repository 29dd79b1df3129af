use anyhow::Result;
use glam::{Vec2, Vec3};

use crate::ar::ArSession;
use crate::backend::SceneBackend;
use crate::config::InteractionConfig;
use crate::interaction::object::{ObjectHandle, PlacedObject};
use crate::interaction::object_type::ObjectType;
use crate::interaction::registry::ObjectRegistry;
use crate::math::bounds::AABB;
use crate::scene_graph::{NodeId, SceneNode};

#[derive(Debug, Clone, PartialEq)]
pub struct ModelPart {
    pub name: String,
    /// In asset units, before the display scale.
    pub bounds: AABB,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ModelAsset {
    pub parts: Vec<ModelPart>,
}

/// Looks up the geometry for a model type.
pub trait ModelLibrary {
    fn load(&self, kind: ObjectType) -> Result<ModelAsset>;
}

/// Box stand-ins with roughly the proportions of the real assets.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProceduralLibrary;

fn part(name: &str, min: [f32; 3], max: [f32; 3]) -> ModelPart {
    ModelPart {
        name: name.to_string(),
        bounds: AABB::new(Vec3::from_array(min), Vec3::from_array(max)),
    }
}

impl ModelLibrary for ProceduralLibrary {
    fn load(&self, kind: ObjectType) -> Result<ModelAsset> {
        let parts = match kind {
            ObjectType::AirForce => vec![
                part("sole", [-5.0, 0.0, -15.0], [5.0, 3.0, 15.0]),
                part("upper", [-4.5, 3.0, -12.0], [4.5, 11.0, 10.0]),
            ],
            ObjectType::ChairSwan => vec![
                part("base", [-20.0, 0.0, -20.0], [20.0, 130.0, 20.0]),
                part("seat", [-120.0, 130.0, -120.0], [120.0, 150.0, 120.0]),
                part("back", [-120.0, 150.0, 80.0], [120.0, 270.0, 120.0]),
            ],
            ObjectType::Teapot => vec![
                part("body", [-12.0, 0.0, -9.0], [12.0, 16.0, 9.0]),
                part("spout", [12.0, 4.0, -2.0], [20.0, 14.0, 2.0]),
                part("handle", [-18.0, 3.0, -1.5], [-12.0, 13.0, 1.5]),
            ],
            ObjectType::ToyBiplane => vec![
                part("fuselage", [-4.0, 0.0, -20.0], [4.0, 8.0, 20.0]),
                part("lower wing", [-25.0, 2.0, -14.0], [25.0, 3.0, -6.0]),
                part("upper wing", [-25.0, 12.0, -14.0], [25.0, 13.0, -6.0]),
                part("tail", [-8.0, 4.0, 16.0], [8.0, 5.0, 20.0]),
            ],
        };

        Ok(ModelAsset { parts })
    }
}

/// Places new objects on surfaces found by the AR session.
pub struct SpawnService {
    library: Box<dyn ModelLibrary>,
}

impl SpawnService {
    pub fn new(library: impl ModelLibrary + 'static) -> Self {
        Self {
            library: Box::new(library),
        }
    }

    /// Raycasts `location` and, on a hit, places a `kind` there and plays
    /// its entry animation. A missed raycast or a missing asset abandons the
    /// spawn without creating anything.
    pub fn spawn<B: SceneBackend, S: ArSession>(
        &self,
        kind: ObjectType,
        location: Vec2,
        session: &S,
        backend: &mut B,
        registry: &mut ObjectRegistry,
        config: &InteractionConfig,
    ) -> Option<ObjectHandle> {
        let Some(position) = session.raycast(location) else {
            log::debug!("No surface under {location}, {kind} not placed");
            return None;
        };

        let asset = match self.library.load(kind) {
            Ok(asset) => asset,
            Err(err) => {
                log::warn!("Could not load {kind}: {err:#}");
                return None;
            }
        };

        let node = build_object_nodes(backend, kind, &asset, position)?;
        let handle = ObjectHandle::new(node);

        let mut object = PlacedObject::new(kind, handle, position.y);
        object.spawn(backend, config);
        registry.insert(object);

        log::info!("Spawned {kind} at {position}");
        Some(handle)
    }
}

/// Object root under the anchor, a scaled model node below it, and one
/// pickable node per part.
pub(crate) fn build_object_nodes<B: SceneBackend>(
    backend: &mut B,
    kind: ObjectType,
    asset: &ModelAsset,
    position: Vec3,
) -> Option<NodeId> {
    let anchor = backend.anchor();
    let root = backend.attach_child(
        anchor,
        SceneNode::new(kind.label()).with_translation(position),
    )?;
    let model = backend.attach_child(
        root,
        SceneNode::new(format!("{kind} model")).with_scale(kind.display_scale()),
    )?;

    for part in &asset.parts {
        backend.attach_child(model, SceneNode::new(part.name.clone()).with_bounds(part.bounds));
    }

    Some(root)
}
