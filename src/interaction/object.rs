use glam::Vec3;

use crate::animation::{Action, ActionKey, Easing, TaskScheduler};
use crate::backend::SceneBackend;
use crate::config::{CancelStrategy, InteractionConfig};
use crate::interaction::object_type::ObjectType;
use crate::math::bounds::AABB;
use crate::scene_graph::{NodeId, SceneNode};

/// Stable, non-owning reference to a placed object. Two handles are equal
/// exactly when they name the same instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ObjectHandle(NodeId);

impl ObjectHandle {
    pub fn new(node: NodeId) -> Self {
        Self(node)
    }

    /// Root node of the object in the scene.
    pub fn node(self) -> NodeId {
        self.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectionState {
    Idle,
    Selected,
    /// Playing the release animation; select() is ignored until it ends.
    Canceling,
}

/// Tags carried by object animations so their completion can be routed back.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AnimationTag {
    Spawned,
    Rose,
    Floated,
    Landed,
    Vanished,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ObjectTask {
    Detach,
}

pub type ObjectScheduler = TaskScheduler<ObjectHandle, ObjectTask>;

/// One placed model and its selection state machine.
#[derive(Debug)]
pub struct PlacedObject {
    kind: ObjectType,
    handle: ObjectHandle,
    state: SelectionState,
    /// Height the landing animation returns to.
    start_height: f32,
    /// Selection marker, built on first use and reattached afterwards.
    highlight: Option<NodeId>,
    highlighted: bool,
    interactive: bool,
    removing: bool,
}

impl PlacedObject {
    pub fn new(kind: ObjectType, handle: ObjectHandle, start_height: f32) -> Self {
        Self {
            kind,
            handle,
            state: SelectionState::Idle,
            start_height,
            highlight: None,
            highlighted: false,
            interactive: true,
            removing: false,
        }
    }

    pub fn kind(&self) -> ObjectType {
        self.kind
    }

    pub fn name(&self) -> &'static str {
        self.kind.label()
    }

    pub fn handle(&self) -> ObjectHandle {
        self.handle
    }

    pub fn node(&self) -> NodeId {
        self.handle.node()
    }

    pub fn state(&self) -> SelectionState {
        self.state
    }

    pub fn is_selected(&self) -> bool {
        self.state == SelectionState::Selected
    }

    /// False once removal has started; gestures skip the object from then on.
    pub fn is_interactive(&self) -> bool {
        self.interactive
    }

    pub fn is_removing(&self) -> bool {
        self.removing
    }

    /// The selection marker while it is shown.
    pub fn highlight(&self) -> Option<NodeId> {
        self.highlight.filter(|_| self.highlighted)
    }

    /// Entry animation: grow from nothing, lifted above the hit point when
    /// floating. The object comes out of it already selected.
    pub fn spawn<B: SceneBackend>(&mut self, backend: &mut B, config: &InteractionConfig) {
        let node = self.node();

        if config.floats() {
            if let Some(position) = backend.translation(node) {
                backend.set_translation(node, position + Vec3::Y * config.spawn_lift);
            }
        }

        let natural_scale = backend.scale(node).unwrap_or(1.0);
        backend.set_scale(node, 0.0);
        backend.animate(
            node,
            ActionKey::Scale,
            Action::scale_to(natural_scale, config.spawn_duration),
            Some(AnimationTag::Spawned),
        );

        self.state = SelectionState::Selected;
        self.attach_highlight(backend, config);
        log::debug!("{} spawned", self.name());
    }

    /// idle → selected. Returns whether the transition happened.
    pub fn select<B: SceneBackend>(&mut self, backend: &mut B, config: &InteractionConfig) -> bool {
        if self.state != SelectionState::Idle || self.removing {
            return false;
        }

        self.state = SelectionState::Selected;
        self.attach_highlight(backend, config);

        if config.floats() {
            let node = self.node();
            if let Some(position) = backend.translation(node) {
                self.start_height = position.y;
            }
            backend.animate(
                node,
                ActionKey::Motion,
                Action::rise(config.rise_height, config.rise_duration, Easing::EaseInEaseOut),
                Some(AnimationTag::Rose),
            );
        }

        log::debug!("{} selected", self.name());
        true
    }

    /// selected → canceling → idle, or straight to idle without a landing.
    /// Returns whether the object left the selected state.
    pub fn cancel<B: SceneBackend>(&mut self, backend: &mut B, config: &InteractionConfig) -> bool {
        if self.state != SelectionState::Selected {
            return false;
        }

        self.remove_highlight(backend);

        match config.cancel_strategy() {
            CancelStrategy::Landing => {
                let node = self.node();
                self.state = SelectionState::Canceling;
                backend.stop_animation(node, ActionKey::Motion);

                // Not clamped: canceling mid-rise may fall by a tiny or even
                // negative amount.
                let current_height = backend.translation(node).map_or(self.start_height, |p| p.y);
                let fall_distance = self.start_height - current_height;

                let landing = Action::sequence([
                    Action::rise(fall_distance, config.fall_duration, Easing::EaseIn),
                    Action::rise(config.bounce_height, config.bounce_duration, Easing::EaseOut),
                    Action::rise(-config.bounce_height, config.bounce_duration, Easing::EaseIn),
                ]);
                backend.animate(node, ActionKey::Motion, landing, Some(AnimationTag::Landed));
            }
            CancelStrategy::Immediate => {
                self.state = SelectionState::Idle;
            }
        }

        log::debug!("{} released", self.name());
        true
    }

    /// Starts the shrink-and-vanish sequence and schedules the detach for when
    /// it ends. Only the first call has any effect.
    pub fn remove_object<B: SceneBackend>(
        &mut self,
        backend: &mut B,
        scheduler: &mut ObjectScheduler,
        config: &InteractionConfig,
    ) -> bool {
        let node = self.node();
        if self.removing || !backend.is_alive(node) {
            return false;
        }

        self.removing = true;
        self.interactive = false;
        self.state = SelectionState::Idle;
        self.remove_highlight(backend);

        backend.stop_all_animations(node);
        backend.animate(
            node,
            ActionKey::Scale,
            Action::scale_to(0.0, config.remove_duration),
            Some(AnimationTag::Vanished),
        );
        scheduler.schedule_after(config.remove_duration, self.handle, ObjectTask::Detach);

        log::info!("{} removing", self.name());
        true
    }

    /// Continues animation chains once a tagged animation completes.
    pub fn on_animation_finished<B: SceneBackend>(
        &mut self,
        tag: AnimationTag,
        backend: &mut B,
        config: &InteractionConfig,
    ) {
        if self.removing {
            return;
        }

        match tag {
            AnimationTag::Spawned => {
                let idle_motion = !backend.is_animating(self.node(), ActionKey::Motion);
                if config.floats() && self.state != SelectionState::Canceling && idle_motion {
                    self.float(backend, config);
                }
            }
            AnimationTag::Rose | AnimationTag::Floated => {
                if config.floats() {
                    self.float(backend, config);
                }
            }
            AnimationTag::Landed => {
                if self.state == SelectionState::Canceling {
                    self.state = SelectionState::Idle;
                    log::debug!("{} landed", self.name());
                }
            }
            AnimationTag::Vanished => {}
        }
    }

    fn float<B: SceneBackend>(&self, backend: &mut B, config: &InteractionConfig) {
        let bob = Action::sequence([
            Action::rise(-config.float_amplitude, config.float_half_period, Easing::EaseInEaseOut),
            Action::rise(config.float_amplitude, config.float_half_period, Easing::EaseInEaseOut),
        ]);
        backend.animate(self.node(), ActionKey::Motion, bob, Some(AnimationTag::Floated));
    }

    /// Flat marker over the object's footprint, resting just above its top.
    fn attach_highlight<B: SceneBackend>(&mut self, backend: &mut B, config: &InteractionConfig) {
        if self.highlighted {
            return;
        }

        if let Some(marker) = self.highlight.filter(|marker| backend.is_alive(*marker)) {
            self.highlighted = backend.set_parent(marker, Some(self.node()));
            return;
        }

        let bounds = backend
            .local_bounds(self.node())
            .unwrap_or(AABB::new(Vec3::ZERO, Vec3::ZERO));
        let size = bounds.size();

        let marker = SceneNode::new("highlight")
            .with_bounds(AABB::from_center_size(
                Vec3::ZERO,
                Vec3::new(size.x, config.highlight_thickness, size.z),
            ))
            .with_translation(bounds.top_center() + Vec3::Y * config.highlight_gap)
            .decoration();

        self.highlight = backend.attach_child(self.node(), marker);
        self.highlighted = self.highlight.is_some();
    }

    /// Takes the marker out of the scene but keeps it for the next selection.
    fn remove_highlight<B: SceneBackend>(&mut self, backend: &mut B) {
        if !self.highlighted {
            return;
        }
        self.highlighted = false;

        if let Some(marker) = self.highlight {
            backend.set_parent(marker, None);
        }
    }

    /// Destroys the object's nodes, the stored marker included.
    pub fn destroy<B: SceneBackend>(&mut self, backend: &mut B) -> bool {
        self.highlighted = false;
        if let Some(marker) = self.highlight.take() {
            backend.detach(marker);
        }
        backend.detach(self.node())
    }
}

impl PartialEq for PlacedObject {
    fn eq(&self, other: &Self) -> bool {
        self.handle == other.handle
    }
}

impl Eq for PlacedObject {}
