use glam::Vec3;

use crate::animation::easing::Easing;

/// A time-based change to a node's transform. Moves are relative so several
/// of them compose with whatever else changes the node's position.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    ScaleTo {
        target: f32,
        duration: f32,
    },
    MoveBy {
        delta: Vec3,
        duration: f32,
        easing: Easing,
    },
    Sequence(Vec<Action>),
}

impl Action {
    pub fn scale_to(target: f32, duration: f32) -> Self {
        Action::ScaleTo { target, duration }
    }

    pub fn move_by(delta: Vec3, duration: f32, easing: Easing) -> Self {
        Action::MoveBy {
            delta,
            duration,
            easing,
        }
    }

    pub fn rise(height: f32, duration: f32, easing: Easing) -> Self {
        Self::move_by(Vec3::Y * height, duration, easing)
    }

    pub fn sequence(actions: impl IntoIterator<Item = Action>) -> Self {
        Action::Sequence(actions.into_iter().collect())
    }

    pub fn duration(&self) -> f32 {
        match self {
            Action::ScaleTo { duration, .. }
            | Action::MoveBy { duration, .. } => duration.max(0.0),
            Action::Sequence(actions) => actions.iter().map(Action::duration).sum(),
        }
    }

    /// Leaf steps in playback order.
    pub(crate) fn flatten(self, steps: &mut Vec<Action>) {
        match self {
            Action::Sequence(actions) => {
                for action in actions {
                    action.flatten(steps);
                }
            }
            leaf => steps.push(leaf),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn sequence_duration_is_sum_of_steps() {
        let landing = Action::sequence([
            Action::rise(-0.1, 0.3, Easing::EaseIn),
            Action::rise(0.02, 0.1, Easing::EaseOut),
            Action::rise(-0.02, 0.1, Easing::EaseIn),
        ]);
        assert_abs_diff_eq!(landing.duration(), 0.5, epsilon = 1e-6);
    }

    #[test]
    fn nested_sequences_flatten_in_order() {
        let up = Action::rise(0.1, 1.0, Easing::Linear);
        let down = Action::rise(-0.1, 1.0, Easing::Linear);
        let action = Action::sequence([
            up.clone(),
            Action::sequence([Action::scale_to(0.0, 0.2), down.clone()]),
        ]);

        let mut steps = Vec::new();
        action.flatten(&mut steps);

        assert_eq!(steps, vec![up, Action::scale_to(0.0, 0.2), down]);
    }
}
