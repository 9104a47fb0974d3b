use crate::domain::{
    chart::{ScreenPoint, Viewport},
    events::{InputEvent, Key, PointerButton},
    logging::LogComponent,
};
use crate::log_trace;
use serde::{Deserialize, Serialize};

/// Pull side of the input collaborator. Polling never blocks.
pub trait InputSource {
    fn poll_event(&mut self) -> Option<InputEvent>;

    /// Current pointer position in device pixels
    fn pointer_position(&self) -> ScreenPoint;
}

/// Two independent toggles; both start released
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct InteractionMode {
    pub zoom_modifier_held: bool,
    pub drag_active: bool,
}

/// Tunables of the reducer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InputSettings {
    pub zoom_modifier: Key,
    pub zoom_step: f64,
    pub coarse_pan_step: f64,
    pub drag_damping: f64,
}

impl Default for InputSettings {
    fn default() -> Self {
        Self {
            zoom_modifier: Key::LeftControl,
            zoom_step: 0.05,
            coarse_pan_step: 50.0,
            drag_damping: 0.4,
        }
    }
}

/// Change to apply to the viewport for one event
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ViewportDelta {
    /// Scale step around the pointer position
    Zoom { step: f64 },
    Pan { dx: f64, dy: f64 },
    CoarsePan { dx: f64 },
}

impl ViewportDelta {
    /// The pointer is only queried for zoom steps.
    pub fn apply(self, viewport: &mut Viewport, pointer: impl FnOnce() -> ScreenPoint) {
        match self {
            ViewportDelta::Zoom { step } => viewport.apply_zoom_delta(step, pointer()),
            ViewportDelta::Pan { dx, dy } => viewport.apply_pan(dx, dy),
            ViewportDelta::CoarsePan { dx } => viewport.apply_coarse_pan(dx),
        }
    }
}

/// What one event did
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEffect {
    Ignored,
    ModeChanged(InteractionMode),
    Viewport(ViewportDelta),
    Terminate,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopSignal {
    Continue,
    Terminate,
}

/// State machine over the interaction toggles. Every event kind has exactly
/// one arm; key events for keys other than the zoom modifier are ignored.
#[derive(Debug, Clone, Default)]
pub struct InputReducer {
    mode: InteractionMode,
    settings: InputSettings,
    terminated: bool,
}

impl InputReducer {
    pub fn new(settings: InputSettings) -> Self {
        Self { mode: InteractionMode::default(), settings, terminated: false }
    }

    pub fn mode(&self) -> InteractionMode {
        self.mode
    }

    pub fn settings(&self) -> &InputSettings {
        &self.settings
    }

    pub fn is_terminated(&self) -> bool {
        self.terminated
    }

    pub fn reduce(&mut self, event: &InputEvent) -> InputEffect {
        log_trace!(LogComponent::Application("InputReducer"), "event {}", event.event_type());

        match event {
            InputEvent::Quit => {
                self.terminated = true;
                InputEffect::Terminate
            }
            InputEvent::KeyDown(key) if *key == self.settings.zoom_modifier => {
                self.mode.zoom_modifier_held = true;
                InputEffect::ModeChanged(self.mode)
            }
            InputEvent::KeyUp(key) if *key == self.settings.zoom_modifier => {
                self.mode.zoom_modifier_held = false;
                InputEffect::ModeChanged(self.mode)
            }
            InputEvent::KeyDown(_) | InputEvent::KeyUp(_) => InputEffect::Ignored,
            InputEvent::PointerDown(PointerButton::Primary) => {
                self.mode.drag_active = true;
                InputEffect::ModeChanged(self.mode)
            }
            InputEvent::PointerUp(PointerButton::Primary) => {
                self.mode.drag_active = false;
                InputEffect::ModeChanged(self.mode)
            }
            InputEvent::PointerDown(_) | InputEvent::PointerUp(_) => InputEffect::Ignored,
            InputEvent::Scroll { direction, .. } => {
                let sign = direction.sign();
                let delta = if self.mode.zoom_modifier_held {
                    ViewportDelta::Zoom { step: sign * self.settings.zoom_step }
                } else {
                    ViewportDelta::CoarsePan { dx: -sign * self.settings.coarse_pan_step }
                };
                InputEffect::Viewport(delta)
            }
            InputEvent::PointerMove { dx, dy } if self.mode.drag_active => {
                let damping = self.settings.drag_damping;
                InputEffect::Viewport(ViewportDelta::Pan { dx: damping * dx, dy: damping * dy })
            }
            InputEvent::PointerMove { .. } => InputEffect::Ignored,
        }
    }

    /// Reduce one event and apply its viewport change in place
    pub fn handle(
        &mut self,
        event: &InputEvent,
        viewport: &mut Viewport,
        pointer: impl FnOnce() -> ScreenPoint,
    ) -> LoopSignal {
        match self.reduce(event) {
            InputEffect::Terminate => LoopSignal::Terminate,
            InputEffect::Viewport(delta) => {
                delta.apply(viewport, pointer);
                LoopSignal::Continue
            }
            InputEffect::Ignored | InputEffect::ModeChanged(_) => LoopSignal::Continue,
        }
    }
}
