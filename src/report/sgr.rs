// src/report/sgr.rs

//! Decoder for the SGR extended (mode 1006) mouse report.
//!
//! Wire format: `ESC [ < Cb ; Cx ; Cy M` for press/motion and the same
//! with a trailing `m` for release. All fields are decimal text, so the
//! encoding is self-delimiting and supports the full button range and
//! coordinates beyond the legacy encoding's 223-cell cap.

use log::{debug, trace, warn};

use super::codec;
use crate::event::{MouseAction, MouseButton, MouseEvent};

const SGR_INTRODUCER: u8 = b'<';
const FIELD_SEPARATOR: u8 = b';';
const PRESS_TERMINATOR: u8 = b'M';
const RELEASE_TERMINATOR: u8 = b'm';

/// Scan a run of ASCII digits at the head of `buf` into a non-negative
/// number. Returns the value and the number of bytes consumed, or `None`
/// when the run is empty or the value overflows.
fn scan_decimal(buf: &[u8]) -> Option<(u32, usize)> {
    let mut value: u32 = 0;
    let mut len = 0;
    for &byte in buf {
        if !byte.is_ascii_digit() {
            break;
        }
        value = value
            .checked_mul(10)?
            .checked_add((byte - b'0') as u32)?;
        len += 1;
    }
    if len == 0 {
        None
    } else {
        Some((value, len))
    }
}

/// Decode one SGR mouse report anchored at the start of `buf`.
///
/// `buf` is positioned right after `ESC [`, so the first byte must be
/// the `<` sub-introducer. Returns the event plus the total number of
/// bytes the report occupies (introducer through terminator), or `None`
/// when the buffer does not hold the complete pattern. `None` is the
/// expected outcome while scanning other escape content, not an error.
pub fn decode_sgr_report(buf: &[u8]) -> Option<(MouseEvent, usize)> {
    if buf.first() != Some(&SGR_INTRODUCER) {
        return None;
    }
    let mut pos = 1;

    let (code, len) = scan_decimal(&buf[pos..])?;
    pos += len;
    if buf.get(pos) != Some(&FIELD_SEPARATOR) {
        debug!("sgr candidate lacks separator after button code");
        return None;
    }
    pos += 1;

    let (x, len) = scan_decimal(&buf[pos..])?;
    pos += len;
    if buf.get(pos) != Some(&FIELD_SEPARATOR) {
        debug!("sgr candidate lacks separator after x coordinate");
        return None;
    }
    pos += 1;

    let (y, len) = scan_decimal(&buf[pos..])?;
    pos += len;

    let release = match buf.get(pos) {
        Some(&PRESS_TERMINATOR) => false,
        Some(&RELEASE_TERMINATOR) => true,
        _ => {
            debug!("sgr candidate missing M/m terminator");
            return None;
        }
    };
    pos += 1;

    // Coordinates are reported directly, with no offset adjustment.
    let x = i32::try_from(x).ok()?;
    let y = i32::try_from(y).ok()?;

    let state = codec::decode_sgr_button(code);
    if state.button == MouseButton::None && !state.motion && !release {
        warn!("sgr report with unmapped button code {}", code);
    }

    // The terminator decides release; the motion bit only matters for
    // non-release reports.
    let (action, button) = if release {
        (MouseAction::Release, MouseButton::None)
    } else if state.motion {
        (MouseAction::Motion, state.button)
    } else {
        (MouseAction::Press, state.button)
    };

    let event = MouseEvent {
        x,
        y,
        button,
        action,
        modifiers: state.modifiers,
    };
    trace!("decoded sgr mouse report {:?} ({} bytes)", event, pos);
    Some((event, pos))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event::Modifiers;

    fn decode(buf: &[u8]) -> Option<(MouseEvent, usize)> {
        decode_sgr_report(buf)
    }

    #[test]
    fn left_press() {
        let (event, len) = decode(b"<0;5;10M").unwrap();
        assert_eq!(event.button, MouseButton::Left);
        assert_eq!(event.action, MouseAction::Press);
        assert_eq!((event.x, event.y), (5, 10));
        assert_eq!(len, 8);
    }

    #[test]
    fn release_forces_button_none() {
        let (event, _) = decode(b"<0;5;10m").unwrap();
        assert_eq!(event.action, MouseAction::Release);
        assert_eq!(event.button, MouseButton::None);
        assert_eq!((event.x, event.y), (5, 10));

        // Button identity in the code field is discarded on release,
        // whatever it was.
        let (event, _) = decode(b"<2;5;10m").unwrap();
        assert_eq!(event.button, MouseButton::None);
    }

    #[test]
    fn wheel_up_press() {
        let (event, _) = decode(b"<64;3;3M").unwrap();
        assert_eq!(event.button, MouseButton::WheelUp);
        assert_eq!(event.action, MouseAction::Press);
        assert_eq!((event.x, event.y), (3, 3));
    }

    #[test]
    fn motion_code_keeps_button_identity() {
        // 32 + 0 = left-button drag.
        let (event, _) = decode(b"<32;11;6M").unwrap();
        assert_eq!(event.action, MouseAction::Motion);
        assert_eq!(event.button, MouseButton::Left);

        // 35 = motion with no button held.
        let (event, _) = decode(b"<35;11;6M").unwrap();
        assert_eq!(event.action, MouseAction::Motion);
        assert_eq!(event.button, MouseButton::None);
    }

    #[test]
    fn modifier_bits() {
        // 0 + shift(4) + ctrl(16) = 20.
        let (event, _) = decode(b"<20;1;1M").unwrap();
        assert_eq!(event.modifiers, Modifiers::SHIFT | Modifiers::CONTROL);
        assert_eq!(event.button, MouseButton::Left);
    }

    #[test]
    fn back_and_forward_buttons() {
        let (event, _) = decode(b"<128;1;1M").unwrap();
        assert_eq!(event.button, MouseButton::Back);
        let (event, _) = decode(b"<129;1;1M").unwrap();
        assert_eq!(event.button, MouseButton::Forward);
    }

    #[test]
    fn coordinates_are_unbiased_and_uncapped() {
        let (event, _) = decode(b"<0;501;301M").unwrap();
        assert_eq!((event.x, event.y), (501, 301));

        // Far beyond the legacy encoding's range.
        let (event, _) = decode(b"<0;100000;200000M").unwrap();
        assert_eq!((event.x, event.y), (100_000, 200_000));
    }

    #[test]
    fn missing_terminator_is_no_match() {
        assert_eq!(decode(b"<0;5;10"), None);
        assert_eq!(decode(b"<0;5;10X"), None);
        assert_eq!(decode(b"<0;5;10;M"), None);
    }

    #[test]
    fn malformed_fields_are_no_match() {
        assert_eq!(decode(b"<;5;10M"), None);
        assert_eq!(decode(b"<0;;10M"), None);
        assert_eq!(decode(b"<0;5M"), None);
        assert_eq!(decode(b"<0:5:10M"), None);
        assert_eq!(decode(b"0;5;10M"), None);
        assert_eq!(decode(b""), None);
    }

    #[test]
    fn numeric_overflow_is_no_match() {
        assert_eq!(decode(b"<0;99999999999;1M"), None);
    }

    #[test]
    fn reported_length_excludes_trailing_bytes() {
        let (_, len) = decode(b"<0;5;10Mtrailing").unwrap();
        assert_eq!(len, 8);
    }
}
