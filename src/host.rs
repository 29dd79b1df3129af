use glam::Vec2;

use crate::animation::ActionKey;
use crate::ar::{environment_intensity, ArSession};
use crate::backend::SceneBackend;
use crate::config::InteractionConfig;
use crate::interaction::object::{ObjectScheduler, ObjectTask};
use crate::interaction::{
    GestureEvent, GestureRouter, ModelLibrary, ObjectHandle, ObjectRegistry, ObjectType,
    PlacedObject, SelectionController, SpawnService,
};
use crate::ui::UiSurface;

/// Owns the scene, the AR session and the controls, and routes everything
/// between them. All calls are expected on a single thread, one frame at a
/// time.
pub struct HostController<B: SceneBackend, S: ArSession, U: UiSurface> {
    backend: B,
    session: S,
    ui: U,
    config: InteractionConfig,
    registry: ObjectRegistry,
    selection: SelectionController,
    router: GestureRouter,
    spawner: SpawnService,
    scheduler: ObjectScheduler,
}

impl<B: SceneBackend, S: ArSession, U: UiSurface> HostController<B, S, U> {
    pub fn new(
        backend: B,
        session: S,
        ui: U,
        library: impl ModelLibrary + 'static,
        config: InteractionConfig,
    ) -> Self {
        Self {
            backend,
            session,
            ui,
            config,
            registry: ObjectRegistry::new(),
            selection: SelectionController::new(),
            router: GestureRouter::new(),
            spawner: SpawnService::new(library),
            scheduler: ObjectScheduler::new(),
        }
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn session(&self) -> &S {
        &self.session
    }

    pub fn session_mut(&mut self) -> &mut S {
        &mut self.session
    }

    pub fn ui(&self) -> &U {
        &self.ui
    }

    pub fn config(&self) -> &InteractionConfig {
        &self.config
    }

    pub fn registry(&self) -> &ObjectRegistry {
        &self.registry
    }

    pub fn object(&self, handle: ObjectHandle) -> Option<&PlacedObject> {
        self.registry.get(handle)
    }

    pub fn selected(&self) -> Option<ObjectHandle> {
        self.selection.selected()
    }

    pub fn is_dragging(&self) -> bool {
        self.router.drag_session().is_some()
    }

    /// Places an object under the center of the view.
    pub fn spawn(&mut self, kind: ObjectType) -> Option<ObjectHandle> {
        let center = self.session.viewport() * 0.5;
        self.spawn_at(kind, center)
    }

    pub fn spawn_at(&mut self, kind: ObjectType, location: Vec2) -> Option<ObjectHandle> {
        let handle = self.spawner.spawn(
            kind,
            location,
            &self.session,
            &mut self.backend,
            &mut self.registry,
            &self.config,
        )?;
        self.select_object(Some(handle));
        Some(handle)
    }

    pub fn select_object(&mut self, candidate: Option<ObjectHandle>) {
        self.selection
            .select_object(candidate, &mut self.registry, &mut self.backend, &self.config);
        self.refresh_panel();
    }

    /// The select/deselect button.
    pub fn toggle_selected(&mut self) {
        let current = self.selection.selected();
        self.select_object(current);
    }

    /// The remove button: releases the held object, then removes it.
    pub fn remove_selected(&mut self) -> bool {
        let Some(handle) = self.selection.selected() else {
            return false;
        };
        self.select_object(None);
        self.remove_object(handle)
    }

    pub fn remove_object(&mut self, handle: ObjectHandle) -> bool {
        if self.selection.selected() == Some(handle) {
            self.select_object(None);
        }
        if self.router.drag_session().is_some_and(|drag| drag.object == handle) {
            self.router.end_drag();
        }

        let Some(object) = self.registry.get_mut(handle) else {
            return false;
        };
        object.remove_object(&mut self.backend, &mut self.scheduler, &self.config)
    }

    pub fn handle_gesture(&mut self, event: GestureEvent) {
        match event {
            GestureEvent::Tap { location } => {
                let picked = self.router.pick(&self.backend, &self.registry, location);
                self.select_object(picked);
            }
            GestureEvent::PanBegan { location } => self.begin_pan(location),
            GestureEvent::PanChanged { location } => self.drag_to(location),
            GestureEvent::PanEnded | GestureEvent::PanCancelled => {
                self.router.end_drag();
            }
            GestureEvent::Rotate { location, rotation } => self.rotate(location, rotation),
        }
    }

    /// Selects the touched object without toggling it off, then anchors a
    /// drag of the held object if the touch lands on a surface.
    fn begin_pan(&mut self, location: Vec2) {
        if let Some(handle) = self.router.pick(&self.backend, &self.registry, location) {
            if self.selection.selected() != Some(handle) {
                self.select_object(Some(handle));
            }
        }

        let Some(world) = self.session.raycast(location) else {
            return;
        };
        let Some(handle) = self.selection.selected() else {
            return;
        };

        if let Some(object) = self.registry.get_mut(handle) {
            object.select(&mut self.backend, &self.config);
            if let Some(position) = self.backend.translation(handle.node()) {
                self.router.begin_drag(handle, world, position);
            }
        }
        self.refresh_panel();
    }

    fn drag_to(&mut self, location: Vec2) {
        let Some(drag) = self.router.drag_session().copied() else {
            return;
        };
        let Some(world) = self.session.raycast(location) else {
            return;
        };

        let interactive = self
            .registry
            .get(drag.object)
            .is_some_and(PlacedObject::is_interactive);
        if !interactive {
            return;
        }

        let node = drag.object.node();
        if let Some(current) = self.backend.translation(node) {
            self.backend.set_translation(node, drag.target(world, current));
        }
    }

    fn rotate(&mut self, location: Vec2, rotation: f32) {
        if let Some(handle) = self.router.pick(&self.backend, &self.registry, location) {
            if self.selection.selected() != Some(handle) {
                self.select_object(Some(handle));
            }
        }

        let Some(handle) = self.selection.selected() else {
            return;
        };
        let Some(object) = self.registry.get_mut(handle) else {
            return;
        };

        if object.select(&mut self.backend, &self.config) {
            self.refresh_panel();
        }
        self.backend.rotate_y(handle.node(), -rotation);
    }

    /// One frame: sync the camera and lighting from the session, report
    /// session events, step animations, then run whatever scheduled work
    /// came due.
    pub fn update(&mut self, dt: f32) {
        if let Some(frame) = self.session.current_frame() {
            self.backend.set_camera(frame.camera);
            self.backend
                .set_environment_intensity(environment_intensity(frame.light_estimate.as_ref()));
        }

        for event in self.session.poll_events() {
            self.ui.set_status(&event.status_message());
        }

        for finished in self.backend.advance(dt) {
            if let Some(object) = self.registry.get_mut(ObjectHandle::new(finished.node)) {
                object.on_animation_finished(finished.tag, &mut self.backend, &self.config);
            }
        }

        for (handle, task) in self.scheduler.advance(dt) {
            match task {
                ObjectTask::Detach => self.detach_object(handle),
            }
        }
    }

    fn detach_object(&mut self, handle: ObjectHandle) {
        if !self.registry.contains(handle) {
            return;
        }

        // The shrink must have played out before the object disappears.
        if self.backend.is_animating(handle.node(), ActionKey::Scale) {
            self.scheduler.schedule_after(0.0, handle, ObjectTask::Detach);
            return;
        }

        if let Some(mut object) = self.registry.remove(handle) {
            self.selection.forget(handle);
            object.destroy(&mut self.backend);
            log::info!("{} removed", object.name());
        }
    }

    fn refresh_panel(&mut self) {
        let panel = self.selection.panel(&self.registry);
        self.ui.show_selection(&panel);
    }
}
