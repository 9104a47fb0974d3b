use serde::{Deserialize, Serialize};
use strum::{AsRefStr, EnumString};

/// Keys the viewer distinguishes. Anything else arrives as `Other`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, EnumString, AsRefStr, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case")]
pub enum Key {
    LeftControl,
    RightControl,
    Shift,
    Alt,
    #[strum(default)]
    #[serde(untagged)]
    Other(String),
}

impl Key {
    /// Map a DOM `KeyboardEvent.code` value
    pub fn from_dom_code(code: &str) -> Self {
        match code {
            "ControlLeft" => Key::LeftControl,
            "ControlRight" => Key::RightControl,
            "ShiftLeft" | "ShiftRight" => Key::Shift,
            "AltLeft" | "AltRight" => Key::Alt,
            other => Key::Other(other.to_string()),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PointerButton {
    Primary,
    Middle,
    Secondary,
}

impl PointerButton {
    /// Map a DOM `MouseEvent.button` value
    pub fn from_dom_button(button: i16) -> Option<Self> {
        match button {
            0 => Some(PointerButton::Primary),
            1 => Some(PointerButton::Middle),
            2 => Some(PointerButton::Secondary),
            _ => None,
        }
    }
}

/// Wheel direction. `Up` is away from the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ScrollDirection {
    Up,
    Down,
}

impl ScrollDirection {
    /// +1 for up, -1 for down
    pub fn sign(&self) -> f64 {
        match self {
            ScrollDirection::Up => 1.0,
            ScrollDirection::Down => -1.0,
        }
    }

    /// Map a raw wheel value where positive means up. Zero counts as down.
    pub fn from_wheel(value: f64) -> Self {
        if value > 0.0 { ScrollDirection::Up } else { ScrollDirection::Down }
    }
}

/// One raw event from the input/display collaborator, in arrival order
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum InputEvent {
    Quit,
    KeyDown(Key),
    KeyUp(Key),
    Scroll { direction: ScrollDirection, delta: f64 },
    PointerDown(PointerButton),
    PointerUp(PointerButton),
    /// Relative motion since the previous move event
    PointerMove { dx: f64, dy: f64 },
}

impl InputEvent {
    pub fn event_type(&self) -> &'static str {
        match self {
            InputEvent::Quit => "Quit",
            InputEvent::KeyDown(_) => "KeyDown",
            InputEvent::KeyUp(_) => "KeyUp",
            InputEvent::Scroll { .. } => "Scroll",
            InputEvent::PointerDown(_) => "PointerDown",
            InputEvent::PointerUp(_) => "PointerUp",
            InputEvent::PointerMove { .. } => "PointerMove",
        }
    }
}
