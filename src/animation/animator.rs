use std::collections::VecDeque;

use crate::animation::action::Action;
use crate::scene_graph::{NodeId, Scene};

/// Slack when deciding whether a step has used up its duration, so frame
/// times that add up to a duration in theory also do in f32.
pub(crate) const TIME_EPSILON: f32 = 1e-5;

/// Channel an action runs on. Starting an action replaces whatever was running
/// on the same node and channel; the replaced action never reports completion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ActionKey {
    Motion,
    Scale,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AnimationFinished<T> {
    pub node: NodeId,
    pub key: ActionKey,
    pub tag: T,
}

struct RunningAction<T> {
    node: NodeId,
    key: ActionKey,
    tag: Option<T>,
    steps: VecDeque<Action>,
    elapsed: f32,
    applied: f32,
    start_scale: Option<f32>,
}

impl<T> RunningAction<T> {
    /// Plays up to `dt` seconds. Returns true once every step has finished.
    fn advance(&mut self, dt: f32, scene: &mut Scene) -> bool {
        let mut remaining = dt.max(0.0);

        while let Some(step) = self.steps.front().cloned() {
            let duration = step.duration();
            let left = duration - self.elapsed;

            if remaining + TIME_EPSILON >= left {
                self.elapsed = duration;
                remaining = (remaining - left).max(0.0);
            } else {
                self.elapsed += remaining;
                remaining = 0.0;
            }

            let progress = if duration > 0.0 {
                (self.elapsed / duration).min(1.0)
            } else {
                1.0
            };

            match step {
                Action::MoveBy { delta, easing, .. } => {
                    let eased = easing.ease(progress);
                    scene.translate_node(self.node, delta * (eased - self.applied));
                    self.applied = eased;
                }
                Action::ScaleTo { target, .. } => {
                    let current = scene
                        .get_node_transform(self.node)
                        .map_or(target, |transform| transform.scale());
                    let start = *self.start_scale.get_or_insert(current);
                    scene.set_node_scale(self.node, start + (target - start) * progress);
                }
                Action::Sequence(_) => {}
            }

            if self.elapsed < duration {
                return false;
            }

            self.steps.pop_front();
            self.elapsed = 0.0;
            self.applied = 0.0;
            self.start_scale = None;
        }

        true
    }
}

/// Drives every running action against the scene, one fixed step per frame.
pub struct Animator<T> {
    running: Vec<RunningAction<T>>,
}

impl<T: Copy> Animator<T> {
    pub fn new() -> Self {
        Self {
            running: Vec::new(),
        }
    }

    pub fn run(&mut self, node: NodeId, key: ActionKey, action: Action, tag: Option<T>) {
        self.stop(node, key);

        let mut steps = Vec::new();
        action.flatten(&mut steps);

        self.running.push(RunningAction {
            node,
            key,
            tag,
            steps: steps.into(),
            elapsed: 0.0,
            applied: 0.0,
            start_scale: None,
        });
    }

    pub fn stop(&mut self, node: NodeId, key: ActionKey) {
        self.running
            .retain(|action| !(action.node == node && action.key == key));
    }

    pub fn stop_all(&mut self, node: NodeId) {
        self.running.retain(|action| action.node != node);
    }

    pub fn is_running(&self, node: NodeId, key: ActionKey) -> bool {
        self.running
            .iter()
            .any(|action| action.node == node && action.key == key)
    }

    /// Advances all actions by `dt` seconds and reports the tagged ones that
    /// completed, in the order they were started. Actions on nodes that no
    /// longer exist are dropped silently.
    pub fn advance(&mut self, dt: f32, scene: &mut Scene) -> Vec<AnimationFinished<T>> {
        let mut finished = Vec::new();

        self.running.retain_mut(|action| {
            if !scene.contains(action.node) {
                return false;
            }

            if !action.advance(dt, scene) {
                return true;
            }

            if let Some(tag) = action.tag {
                finished.push(AnimationFinished {
                    node: action.node,
                    key: action.key,
                    tag,
                });
            }
            false
        });

        finished
    }
}

impl<T: Copy> Default for Animator<T> {
    fn default() -> Self {
        Self::new()
    }
}
