/// How placed objects move when spawned, selected and released.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InteractionStyle {
    /// Objects hover above their spot, bob while floating, rise when selected
    /// and drop back with a small bounce when released.
    #[default]
    Floating,
    /// Objects sit where they were placed; selection only toggles the
    /// highlight.
    Grounded,
}

/// What `cancel` plays before the object returns to idle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CancelStrategy {
    /// Fall back to the height held when selected, then bounce once. The
    /// object stays in the canceling state until the landing finishes.
    Landing,
    /// Return to idle at once.
    Immediate,
}

#[derive(Debug, Clone)]
pub struct InteractionConfig {
    pub style: InteractionStyle,
    /// Overrides the cancel behavior implied by `style`.
    pub cancel_strategy: Option<CancelStrategy>,

    pub spawn_lift: f32,
    pub spawn_duration: f32,

    pub float_amplitude: f32,
    pub float_half_period: f32,

    pub rise_height: f32,
    pub rise_duration: f32,

    pub fall_duration: f32,
    pub bounce_height: f32,
    pub bounce_duration: f32,

    pub remove_duration: f32,

    /// Space between the top of an object and its selection highlight.
    pub highlight_gap: f32,
    pub highlight_thickness: f32,
}

impl InteractionConfig {
    pub fn grounded() -> Self {
        Self {
            style: InteractionStyle::Grounded,
            ..Default::default()
        }
    }

    pub fn cancel_strategy(&self) -> CancelStrategy {
        self.cancel_strategy.unwrap_or(match self.style {
            InteractionStyle::Floating => CancelStrategy::Landing,
            InteractionStyle::Grounded => CancelStrategy::Immediate,
        })
    }

    pub fn floats(&self) -> bool {
        self.style == InteractionStyle::Floating
    }
}

impl Default for InteractionConfig {
    fn default() -> Self {
        Self {
            style: InteractionStyle::Floating,
            cancel_strategy: None,
            spawn_lift: 0.1,
            spawn_duration: 0.2,
            float_amplitude: 0.03,
            float_half_period: 1.0,
            rise_height: 0.1,
            rise_duration: 0.5,
            fall_duration: 0.3,
            bounce_height: 0.02,
            bounce_duration: 0.1,
            remove_duration: 0.2,
            highlight_gap: 0.01,
            highlight_thickness: 0.002,
        }
    }
}
