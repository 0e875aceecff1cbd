// src/report/legacy.rs

//! Decoder for the legacy (X10/normal, modes 1000/1002) mouse report.
//!
//! Wire format: `ESC [ M Cb Cx Cy`, where each of the three payload
//! bytes is a value plus 32 and nothing terminates the sequence. The
//! payload bytes may fall outside printable ASCII.

use log::trace;

use super::codec;
use crate::event::{MouseAction, MouseButton, MouseEvent};

/// Byte bias applied to every field of a legacy report.
const LEGACY_BIAS: u8 = 32;

/// Decode the three payload bytes of a legacy mouse report.
///
/// The `ESC [ M` introducer has already been consumed by the detector.
/// This never fails: the encoding has no internal validity check, so any
/// three bytes decode to a structurally valid event. Garbage input (for
/// example payload bytes below 32) yields nonsensical coordinates, which
/// pass through unaltered.
///
/// Coordinates stay in the protocol's 1-based numbering; renormalizing
/// to 0-based screen cells is the caller's concern.
pub fn decode_legacy_report(payload: [u8; 3]) -> MouseEvent {
    let state = codec::decode_legacy_button(payload[0].wrapping_sub(LEGACY_BIAS));
    let x = payload[1] as i32 - LEGACY_BIAS as i32;
    let y = payload[2] as i32 - LEGACY_BIAS as i32;

    // Motion wins over the release sentinel when both are signaled;
    // base 3 with the motion bit is plain pointer movement.
    let action = if state.motion {
        MouseAction::Motion
    } else if state.release {
        MouseAction::Release
    } else {
        MouseAction::Press
    };

    // The sentinel already decoded to `None`; force it again for the
    // release action so the invariant holds for every input.
    let button = if action == MouseAction::Release {
        MouseButton::None
    } else {
        state.button
    };

    let event = MouseEvent {
        x,
        y,
        button,
        action,
        modifiers: state.modifiers,
    };
    trace!("decoded legacy mouse report {:?} from {:?}", event, payload);
    event
}
