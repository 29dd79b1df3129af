use anyhow::Context;
use glam::{Vec2, Vec3};

use arplace::ar::{ArSession, SimulatedSession, TrackingState};
use arplace::backend::{SceneBackend, Stage};
use arplace::camera::Camera;
use arplace::config::InteractionConfig;
use arplace::host::HostController;
use arplace::interaction::{GestureEvent, ObjectHandle, ObjectType, ProceduralLibrary};
use arplace::ui::LogUi;

const FRAME_TIME: f32 = 1.0 / 60.0;
const VIEWPORT: Vec2 = Vec2::new(1170.0, 2532.0);

/// Headless walk through a placement session: spawn, drag, rotate,
/// release and remove.
pub struct DemoState {
    host: HostController<Stage, SimulatedSession, LogUi>,
    elapsed: f32,
}

impl DemoState {
    pub fn new(grounded: bool) -> anyhow::Result<Self> {
        let camera = Camera::looking_at(Vec3::new(0.0, 1.4, 1.6), Vec3::ZERO);

        let mut session = SimulatedSession::new(camera, VIEWPORT);
        session.add_plane(0.0);

        let config = if grounded {
            InteractionConfig::grounded()
        } else {
            InteractionConfig::default()
        };
        log::info!("Interaction style: {:?}", config.style);

        let host = HostController::new(
            Stage::new(camera, VIEWPORT),
            session,
            LogUi::new(),
            ProceduralLibrary,
            config,
        );

        Ok(Self { host, elapsed: 0.0 })
    }

    pub fn run(&mut self) -> anyhow::Result<()> {
        self.run_for(0.5);
        self.host.session_mut().set_tracking_state(TrackingState::Normal);
        self.run_for(0.5);

        let teapot = self
            .host
            .spawn(ObjectType::Teapot)
            .context("No surface under the screen center")?;
        self.run_for(1.0);
        self.log_object(teapot);

        self.drag(teapot, Vec3::new(1.0, 0.0, 0.5))?;
        self.run_for(0.5);
        self.log_object(teapot);

        for _ in 0..10 {
            self.host.handle_gesture(GestureEvent::Rotate {
                location: VIEWPORT * 0.5,
                rotation: 0.05,
            });
            self.run_for(FRAME_TIME);
        }

        self.host.handle_gesture(GestureEvent::Tap {
            location: Vec2::new(10.0, 10.0),
        });
        self.run_for(1.0);
        self.log_object(teapot);

        let chair = self
            .host
            .spawn(ObjectType::ChairSwan)
            .context("No surface under the screen center")?;
        self.run_for(1.0);

        self.host.remove_object(teapot);
        self.host.remove_selected();
        self.run_for(0.5);

        let scene = &self.host.backend().scene;
        for kind in ObjectType::ALL {
            if let Some(node) = scene.get_node_by_name(kind.label()) {
                log::info!("{kind} still in the scene (attached: {})", scene.is_attached(node));
            }
        }

        log::info!(
            "Finished after {:.2}s, {} objects left, chair alive: {}, {} node slots",
            self.elapsed,
            self.host.registry().len(),
            self.host.backend().is_alive(chair.node()),
            scene.node_count()
        );
        Ok(())
    }

    fn drag(&mut self, object: ObjectHandle, to: Vec3) -> anyhow::Result<()> {
        let camera = *self.host.backend().camera();
        let from = self
            .host
            .backend()
            .translation(object.node())
            .context("Dragged object is gone")?;
        let from = Vec3::new(from.x, 0.0, from.z);

        let screen = |point: Vec3| {
            camera
                .world_to_screen(point, VIEWPORT)
                .context("Drag point is behind the camera")
        };

        self.host.handle_gesture(GestureEvent::PanBegan {
            location: screen(from)?,
        });

        const STEPS: usize = 20;
        for i in 1..=STEPS {
            let point = from.lerp(to, i as f32 / STEPS as f32);
            self.host.handle_gesture(GestureEvent::PanChanged {
                location: screen(point)?,
            });
            self.run_for(FRAME_TIME);
        }

        self.host.handle_gesture(GestureEvent::PanEnded);
        Ok(())
    }

    fn run_for(&mut self, seconds: f32) {
        let mut remaining = seconds;
        while remaining > 1e-6 {
            let dt = remaining.min(FRAME_TIME);
            self.host.update(dt);
            self.elapsed += dt;
            remaining -= dt;
        }
    }

    fn log_object(&self, object: ObjectHandle) {
        let Some(placed) = self.host.object(object) else {
            log::info!("Object is gone");
            return;
        };
        let position = self.host.backend().translation(object.node());
        log::info!(
            "{} {:?} at {:?} (session viewport {})",
            placed.name(),
            placed.state(),
            position,
            self.host.session().viewport()
        );
    }
}
