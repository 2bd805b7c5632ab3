// SPDX-License-Identifier: MPL-2.0
//! Gesture scripts.
//!
//! A script replays pointer and zoom input against the editor, one gesture per
//! line:
//!
//! ```text
//! # move the overlay onto the subject
//! press 500 320
//! move 540 300
//! release
//! zoom in
//! pan -20 0
//! drag 10 10
//! resize 900 600
//! snap
//! ```
//!
//! Blank lines and lines starting with `#` are ignored.

use crate::domain::compositing::Viewport;
use crate::error::{Error, Result};
use crate::ui::editor::{CaptureMessage, Message, StageMessage};
use crate::ui::state::ZoomDirection;
use std::path::Path;

/// One scripted input.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Gesture {
    Stage(StageMessage),
    /// Freeze or resume the webcam frame.
    Snap,
}

impl From<Gesture> for Message {
    fn from(gesture: Gesture) -> Self {
        match gesture {
            Gesture::Stage(message) => Message::Stage(message),
            Gesture::Snap => Message::Capture(CaptureMessage::SnapToggled),
        }
    }
}

/// Reads and parses a script file.
pub fn load(path: &Path) -> Result<Vec<Gesture>> {
    let text = std::fs::read_to_string(path)?;
    parse(&text)
}

/// Parses script text into gestures.
pub fn parse(text: &str) -> Result<Vec<Gesture>> {
    text.lines()
        .enumerate()
        .filter_map(|(index, line)| {
            let line = line.trim();
            (!line.is_empty() && !line.starts_with('#')).then_some((index + 1, line))
        })
        .map(|(line_number, line)| {
            parse_line(line).map_err(|message| Error::Script {
                line: line_number,
                message,
            })
        })
        .collect()
}

fn parse_line(line: &str) -> std::result::Result<Gesture, String> {
    let mut words = line.split_whitespace();
    let Some(keyword) = words.next() else {
        return Err("empty gesture".to_string());
    };
    let args: Vec<&str> = words.collect();

    let gesture = match keyword {
        "press" => {
            let (x, y) = pair(&args)?;
            Gesture::Stage(StageMessage::PointerPressed { x, y })
        }
        "move" => {
            let (x, y) = pair(&args)?;
            Gesture::Stage(StageMessage::PointerMoved { x, y })
        }
        "release" => {
            no_args(keyword, &args)?;
            Gesture::Stage(StageMessage::PointerReleased)
        }
        "pan" => {
            let (dx, dy) = pair(&args)?;
            Gesture::Stage(StageMessage::Pan { dx, dy })
        }
        "drag" => {
            let (dx, dy) = pair(&args)?;
            Gesture::Stage(StageMessage::DragOverlay { dx, dy })
        }
        "zoom" => {
            let direction = match args.as_slice() {
                ["in"] => ZoomDirection::In,
                ["out"] => ZoomDirection::Out,
                _ => return Err("zoom expects 'in' or 'out'".to_string()),
            };
            Gesture::Stage(StageMessage::Zoom(direction))
        }
        "resize" => {
            let (width, height) = pair(&args)?;
            if width <= 0.0 || height <= 0.0 {
                return Err("resize expects a positive width and height".to_string());
            }
            Gesture::Stage(StageMessage::Resized(Viewport::new(width, height)))
        }
        "snap" => {
            no_args(keyword, &args)?;
            Gesture::Snap
        }
        other => return Err(format!("unknown gesture '{other}'")),
    };
    Ok(gesture)
}

fn pair(args: &[&str]) -> std::result::Result<(f32, f32), String> {
    match args {
        [a, b] => Ok((number(a)?, number(b)?)),
        _ => Err(format!("expected 2 numbers, got {}", args.len())),
    }
}

fn number(word: &str) -> std::result::Result<f32, String> {
    word.parse::<f32>()
        .ok()
        .filter(|value| value.is_finite())
        .ok_or_else(|| format!("'{word}' is not a number"))
}

fn no_args(keyword: &str, args: &[&str]) -> std::result::Result<(), String> {
    if args.is_empty() {
        Ok(())
    } else {
        Err(format!("{keyword} takes no arguments"))
    }
}
