// src/main.rs

//! Interactive mouse-report probe for the `core-input` decoder.
//!
//! Puts the controlling terminal into raw mode, enables mouse reporting
//! (modes 1000/1002/1006), and prints every decoded event until `q` or
//! Ctrl-C. With `--json`, events are printed as one JSON object per
//! line. Diagnostics go to `/tmp/core-input.log` so they don't fight
//! the raw-mode terminal for output.
//!
//! The probe plays the two collaborator roles the library leaves
//! external: the terminal-mode manager (the enable/disable writes below)
//! and the byte-stream reader (the framing loop, which buffers partial
//! sequences across reads and re-presents them to the detector).

use anyhow::{Context, Result};
use libc::STDIN_FILENO;
use log::{debug, info, trace, warn};
use std::fs::OpenOptions;
use std::io::{self, Read, Write};
use termios::{
    tcsetattr, Termios, BRKINT, ECHO, ICANON, ICRNL, ISIG, IXON, OPOST, TCSANOW, VMIN, VTIME,
};

use core_input::{detect_mouse_report, InputEvent, MouseReport};

// --- Escape code constants ---
const ESC: u8 = 0x1b;
const CSI_INTRODUCER: u8 = b'[';
/// Enable press/release (1000), button-motion (1002) and SGR (1006) reporting.
const MOUSE_MODES_ENABLE: &str = "\x1b[?1000h\x1b[?1002h\x1b[?1006h";
const MOUSE_MODES_DISABLE: &str = "\x1b[?1006l\x1b[?1002l\x1b[?1000l";

const CTRL_C: u8 = 0x03;

/// Restores the terminal on drop: original termios attributes and mouse
/// reporting off.
struct RawModeGuard {
    original: Termios,
}

impl RawModeGuard {
    fn enter() -> Result<Self> {
        let original = Termios::from_fd(STDIN_FILENO)
            .context("failed to get terminal attributes for stdin")?;

        let mut raw = original;
        raw.c_lflag &= !(ECHO | ICANON | ISIG);
        raw.c_iflag &= !(BRKINT | ICRNL | IXON);
        raw.c_oflag &= !OPOST;
        // Block until at least one byte arrives; no inter-byte timeout.
        raw.c_cc[VMIN] = 1;
        raw.c_cc[VTIME] = 0;
        tcsetattr(STDIN_FILENO, TCSANOW, &raw)
            .context("failed to set raw terminal attributes")?;

        print!("{}", MOUSE_MODES_ENABLE);
        io::stdout().flush().context("failed to enable mouse reporting")?;
        info!("entered raw mode, mouse reporting enabled");
        Ok(RawModeGuard { original })
    }
}

impl Drop for RawModeGuard {
    fn drop(&mut self) {
        let _ = write!(io::stdout(), "{}", MOUSE_MODES_DISABLE);
        let _ = io::stdout().flush();
        if let Err(e) = tcsetattr(STDIN_FILENO, TCSANOW, &self.original) {
            warn!("failed to restore terminal attributes: {}", e);
        }
        info!("left raw mode, mouse reporting disabled");
    }
}

/// True when the bytes after `ESC [` may still grow into a mouse report,
/// so the reader should wait for more input instead of discarding.
fn may_be_incomplete_report(candidate: &[u8]) -> bool {
    match candidate.first() {
        None => true,
        Some(&b'M') => candidate.len() < 4,
        Some(&b'<') => candidate[1..]
            .iter()
            .all(|b| b.is_ascii_digit() || *b == b';'),
        _ => false,
    }
}

/// Index just past the final byte of a non-mouse CSI sequence in
/// `candidate`, or `None` while the sequence is still incomplete.
fn csi_end(candidate: &[u8]) -> Option<usize> {
    candidate
        .iter()
        .position(|b| (0x40..=0x7e).contains(b))
        .map(|i| i + 1)
}

fn emit(event: &InputEvent, json: bool) -> Result<()> {
    let mut stdout = io::stdout();
    if json {
        // OPOST is off, so supply the carriage return ourselves.
        write!(stdout, "{}\r\n", serde_json::to_string(event)?)?;
    } else {
        write!(stdout, "{:?}\r\n", event)?;
    }
    stdout.flush()?;
    Ok(())
}

fn emit_report(report: &MouseReport, json: bool) -> Result<()> {
    trace!("{:?} report, {} bytes", report.encoding, report.len);
    emit(&InputEvent::Mouse(report.event), json)
}

/// Decode every complete sequence in `pending`, leaving any incomplete
/// tail in place for the next read. Returns true when the user asked to
/// quit.
fn drain_pending(pending: &mut Vec<u8>, json: bool) -> Result<bool> {
    let mut quit = false;
    let mut pos = 0;

    while pos < pending.len() {
        if pending[pos] != ESC {
            // Plain bytes up to the next escape are passthrough.
            let end = pending[pos..]
                .iter()
                .position(|b| *b == ESC)
                .map_or(pending.len(), |i| pos + i);
            let bytes = pending[pos..end].to_vec();
            if bytes.iter().any(|b| *b == b'q' || *b == CTRL_C) {
                quit = true;
            }
            debug!("passthrough: {:?}", bytes);
            emit(&InputEvent::Passthrough(bytes), json)?;
            pos = end;
            continue;
        }

        // At an ESC. A lone trailing ESC may be the start of a sequence.
        let Some(&next) = pending.get(pos + 1) else {
            break;
        };
        if next != CSI_INTRODUCER {
            // ESC + other byte (alt-modified key, other escape): not ours.
            emit(&InputEvent::Passthrough(pending[pos..pos + 2].to_vec()), json)?;
            pos += 2;
            continue;
        }

        let candidate = &pending[pos + 2..];
        if let Some(report) = detect_mouse_report(candidate) {
            emit_report(&report, json)?;
            pos += 2 + report.len;
        } else if may_be_incomplete_report(candidate) {
            break;
        } else if let Some(end) = csi_end(candidate) {
            let bytes = pending[pos..pos + 2 + end].to_vec();
            debug!("skipping non-mouse csi: {:?}", bytes);
            emit(&InputEvent::Passthrough(bytes), json)?;
            pos += 2 + end;
        } else {
            // CSI with no final byte yet; wait for more input.
            break;
        }
    }

    pending.drain(..pos);
    Ok(quit)
}

fn main() -> Result<()> {
    // Log to a file: stderr shares the raw-mode terminal with our output.
    let log_file = OpenOptions::new()
        .create(true)
        .write(true)
        .truncate(true)
        .open("/tmp/core-input.log")
        .context("failed to open log file")?;
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .target(env_logger::Target::Pipe(Box::new(log_file)))
        .init();

    let json = std::env::args().any(|arg| arg == "--json");

    let _guard = RawModeGuard::enter()?;
    let mut pending: Vec<u8> = Vec::new();
    let mut buffer = [0u8; 128];

    info!("probe running; press q or Ctrl-C to quit");
    loop {
        match io::stdin().read(&mut buffer) {
            Ok(0) => {
                info!("eof on stdin");
                break;
            }
            Ok(n) => {
                trace!("read {} bytes", n);
                pending.extend_from_slice(&buffer[..n]);
                if drain_pending(&mut pending, json)? {
                    break;
                }
            }
            Err(ref e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(e) => return Err(e).context("error reading from stdin"),
        }
    }

    Ok(())
}
