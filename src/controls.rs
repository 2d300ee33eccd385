//! Slider controls for the edit parameters.
//!
//! Each slider keeps its committed position and, while a drag gesture is in
//! progress, a pending position. Only a settled value produces a
//! [`Commit`], so dragging never triggers a transform pass and each gesture
//! results in exactly one.

use crate::image_proc::{EditError, ImageStore};

/// The adjustable sliders of the control panel
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Slider {
    Temperature,
    Tint,
    Exposure,
    Contrast,
}

impl Slider {
    /// All sliders in panel order
    pub fn all() -> &'static [Slider] {
        &[
            Slider::Temperature,
            Slider::Tint,
            Slider::Exposure,
            Slider::Contrast,
        ]
    }

    /// Inclusive position range
    pub fn range(&self) -> (i32, i32) {
        match self {
            Slider::Temperature => (-100, 100),
            Slider::Tint => (-50, 50),
            Slider::Exposure => (-100, 100),
            Slider::Contrast => (-100, 100),
        }
    }

    /// Position at startup
    pub fn default_position(&self) -> i32 {
        match self {
            Slider::Exposure => 1,
            _ => 0,
        }
    }

    /// Label shown next to the slider
    pub fn label(&self) -> &'static str {
        match self {
            Slider::Temperature => "Temp",
            Slider::Tint => "Tint",
            Slider::Exposure => "Exposure",
            Slider::Contrast => "Contrast",
        }
    }

    fn index(&self) -> usize {
        match self {
            Slider::Temperature => 0,
            Slider::Tint => 1,
            Slider::Exposure => 2,
            Slider::Contrast => 3,
        }
    }

    fn clamp(&self, position: i32) -> i32 {
        let (min, max) = self.range();
        position.clamp(min, max)
    }
}

/// Input from a slider widget
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SliderEvent {
    /// Intermediate value while the knob is being dragged
    Drag(i32),
    /// Final value of a gesture (knob released, key press, programmatic set)
    Settle(i32),
}

/// A settled slider value, ready to be applied to the store
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Commit {
    pub slider: Slider,
    pub position: i32,
}

impl Commit {
    /// Apply this value to the matching edit parameter (one transform pass)
    ///
    /// Mapping from slider position `v`:
    /// - exposure: `1 + v / 100`
    /// - contrast: `-2v`
    /// - temperature: `v`
    /// - tint: `-v`
    pub fn apply(&self, store: &mut ImageStore) -> Result<(), EditError> {
        let v = self.position;
        match self.slider {
            Slider::Exposure => store.set_exposure((1.0 + v as f64 / 100.0) as f32),
            Slider::Contrast => store.set_contrast(v.saturating_mul(-2)),
            Slider::Temperature => store.set_temperature(v),
            Slider::Tint => store.set_tint(v.saturating_neg()),
        }
    }
}

/// Position state of a single slider
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SliderState {
    position: i32,
    pending: Option<i32>,
}

impl SliderState {
    fn new(position: i32) -> Self {
        Self {
            position,
            pending: None,
        }
    }

    /// Last committed position
    pub fn position(&self) -> i32 {
        self.position
    }

    /// Position of an in-progress drag, if any
    pub fn pending(&self) -> Option<i32> {
        self.pending
    }

    pub fn is_adjusting(&self) -> bool {
        self.pending.is_some()
    }
}

/// Debounce state of all sliders
#[derive(Debug, Clone)]
pub struct ControlPanel {
    sliders: [SliderState; 4],
}

impl Default for ControlPanel {
    fn default() -> Self {
        let mut sliders = [SliderState::new(0); 4];
        for slider in Slider::all() {
            sliders[slider.index()] = SliderState::new(slider.default_position());
        }
        Self { sliders }
    }
}

impl ControlPanel {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self, slider: Slider) -> &SliderState {
        &self.sliders[slider.index()]
    }

    /// True while any slider is mid-gesture
    pub fn is_adjusting(&self) -> bool {
        self.sliders.iter().any(SliderState::is_adjusting)
    }

    /// Feed one widget event; returns a commit only when the value settles
    pub fn handle(&mut self, slider: Slider, event: SliderEvent) -> Option<Commit> {
        let state = &mut self.sliders[slider.index()];
        match event {
            SliderEvent::Drag(position) => {
                state.pending = Some(slider.clamp(position));
                tracing::trace!("{} dragging at {:?}", slider.label(), state.pending);
                None
            }
            SliderEvent::Settle(position) => {
                let position = slider.clamp(position);
                state.pending = None;
                state.position = position;
                tracing::debug!("{} settled at {}", slider.label(), position);
                Some(Commit { slider, position })
            }
        }
    }
}
