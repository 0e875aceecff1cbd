// src/classify.rs

//! Stateless predicates over pipeline events.
//!
//! These are the query surface offered to input dispatch and hit-testing
//! layers. Every predicate is total and side-effect free, and returns
//! false for any event that is not a mouse event, so callers can apply
//! them to the full event stream without matching variants first.

use crate::event::{InputEvent, MouseAction, MouseButton, MouseEvent};

fn mouse(event: &InputEvent) -> Option<&MouseEvent> {
    match event {
        InputEvent::Mouse(mouse) => Some(mouse),
        _ => None,
    }
}

/// True when the event is a decoded mouse report of any kind.
pub fn is_mouse_event(event: &InputEvent) -> bool {
    mouse(event).is_some()
}

/// True for a button press.
pub fn is_click(event: &InputEvent) -> bool {
    mouse(event).is_some_and(|m| m.action == MouseAction::Press)
}

/// True for a button release.
pub fn is_release(event: &InputEvent) -> bool {
    mouse(event).is_some_and(|m| m.action == MouseAction::Release)
}

/// True for pointer motion, with or without a held button.
pub fn is_motion(event: &InputEvent) -> bool {
    mouse(event).is_some_and(|m| m.action == MouseAction::Motion)
}

/// True when the event's button is any of the four wheel directions.
pub fn is_wheel(event: &InputEvent) -> bool {
    mouse(event).is_some_and(|m| m.button.is_wheel())
}

/// True for a left-button press.
pub fn is_left_click(event: &InputEvent) -> bool {
    is_click_with(event, MouseButton::Left)
}

/// True for a right-button press.
pub fn is_right_click(event: &InputEvent) -> bool {
    is_click_with(event, MouseButton::Right)
}

/// True for a middle-button press.
pub fn is_middle_click(event: &InputEvent) -> bool {
    is_click_with(event, MouseButton::Middle)
}

/// True for a wheel-up scroll.
pub fn is_wheel_up(event: &InputEvent) -> bool {
    is_click_with(event, MouseButton::WheelUp)
}

/// True for a wheel-down scroll.
pub fn is_wheel_down(event: &InputEvent) -> bool {
    is_click_with(event, MouseButton::WheelDown)
}

fn is_click_with(event: &InputEvent, button: MouseButton) -> bool {
    mouse(event).is_some_and(|m| m.action == MouseAction::Press && m.button == button)
}
