/// Timing curves for actions. Quadratic, matching the feel of the platform
/// defaults.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Easing {
    #[default]
    Linear,
    EaseIn,
    EaseOut,
    EaseInEaseOut,
}

impl Easing {
    /// Maps linear progress `t` in 0..=1 onto the curve.
    pub fn ease(&self, t: f32) -> f32 {
        let t = t.clamp(0.0, 1.0);

        match self {
            Easing::Linear => t,
            Easing::EaseIn => t * t,
            Easing::EaseOut => t * (2.0 - t),
            Easing::EaseInEaseOut => {
                if t < 0.5 {
                    2.0 * t * t
                } else {
                    -1.0 + (4.0 - 2.0 * t) * t
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    const ALL: [Easing; 4] = [
        Easing::Linear,
        Easing::EaseIn,
        Easing::EaseOut,
        Easing::EaseInEaseOut,
    ];

    #[test]
    fn curves_start_at_zero_and_end_at_one() {
        for easing in ALL {
            assert_abs_diff_eq!(easing.ease(0.0), 0.0);
            assert_abs_diff_eq!(easing.ease(1.0), 1.0);
        }
    }

    #[test]
    fn curves_are_monotonic() {
        for easing in ALL {
            let mut previous = 0.0;
            for step in 1..=100 {
                let value = easing.ease(step as f32 / 100.0);
                assert!(value >= previous, "{easing:?} decreased at step {step}");
                previous = value;
            }
        }
    }

    #[test]
    fn ease_in_lags_and_ease_out_leads() {
        assert!(Easing::EaseIn.ease(0.3) < 0.3);
        assert!(Easing::EaseOut.ease(0.3) > 0.3);
        assert_abs_diff_eq!(Easing::EaseInEaseOut.ease(0.5), 0.5);
    }

    #[test]
    fn progress_is_clamped() {
        assert_eq!(Easing::EaseIn.ease(-1.0), 0.0);
        assert_eq!(Easing::EaseOut.ease(2.0), 1.0);
    }
}
