// src/event.rs

//! Event types produced by the input pipeline.
//!
//! `MouseEvent` is the immutable value emitted once per decoded mouse
//! report; `InputEvent` is the union the downstream dispatch layer
//! consumes. Decoding holds no state, so every event is self-contained.

use bitflags::bitflags;
use serde::{Deserialize, Serialize};

bitflags! {
    /// Modifier keys held while a mouse report was generated.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
    pub struct Modifiers: u8 {
        const SHIFT = 1 << 0;
        const CONTROL = 1 << 1;
        const ALT = 1 << 2; // Also known as Option on macOS
    }
}

/// Identity of the button a mouse report refers to.
///
/// The wire protocols number these 0-11; `None` stands in both for
/// reports that carry no button (plain motion) and for releases, which
/// intentionally lose button identity (see `MouseEvent`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum MouseButton {
    #[default]
    None,
    Left,
    Middle,
    Right,
    WheelUp,
    WheelDown,
    WheelLeft,
    WheelRight,
    Back,
    Forward,
    Button10,
    Button11,
}

impl MouseButton {
    /// Returns true for the four scroll-wheel directions.
    pub fn is_wheel(self) -> bool {
        matches!(
            self,
            MouseButton::WheelUp
                | MouseButton::WheelDown
                | MouseButton::WheelLeft
                | MouseButton::WheelRight
        )
    }
}

/// What kind of transition a mouse report describes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MouseAction {
    Press,
    Release,
    Motion,
}

/// A single decoded mouse report.
///
/// Coordinates are passed through exactly as the terminal encoded them:
/// both protocols report 1-based cell positions, and this crate does not
/// renormalize to 0-based screen coordinates (a caller concern). A
/// misbehaving terminal can produce out-of-range values, including
/// negative ones on the legacy path; they pass through unaltered.
///
/// Both protocols discard button identity on release (the legacy
/// encoding cannot report it at all), so `action == Release` always
/// carries `button == MouseButton::None`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MouseEvent {
    pub x: i32,
    pub y: i32,
    pub button: MouseButton,
    pub action: MouseAction,
    pub modifiers: Modifiers,
}

/// Inputs flowing out of the decode layer toward dispatch.
///
/// This is the "instruction set" higher layers see: either a decoded
/// mouse report, or raw bytes this crate does not interpret (plain text,
/// keyboard sequences, other control sequences), forwarded untouched for
/// a different handler.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum InputEvent {
    /// A decoded mouse report.
    Mouse(MouseEvent),
    /// Bytes that did not form a recognized mouse report.
    Passthrough(Vec<u8>),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wheel_membership_covers_all_four_directions() {
        assert!(MouseButton::WheelUp.is_wheel());
        assert!(MouseButton::WheelDown.is_wheel());
        assert!(MouseButton::WheelLeft.is_wheel());
        assert!(MouseButton::WheelRight.is_wheel());

        assert!(!MouseButton::None.is_wheel());
        assert!(!MouseButton::Left.is_wheel());
        assert!(!MouseButton::Back.is_wheel());
        assert!(!MouseButton::Button11.is_wheel());
    }

    #[test]
    fn mouse_event_serde_round_trip() {
        let event = MouseEvent {
            x: 5,
            y: 10,
            button: MouseButton::Left,
            action: MouseAction::Press,
            modifiers: Modifiers::SHIFT | Modifiers::CONTROL,
        };
        let json = serde_json::to_string(&event).unwrap();
        let back: MouseEvent = serde_json::from_str(&json).unwrap();
        assert_eq!(event, back);
    }
}
