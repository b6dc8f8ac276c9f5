use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::error::{Result, XrandrError};
use crate::modes::Mode;
use crate::screen::is_screen_line;
use crate::size::{parse_size_with_position, Position, Size};

const MM_PER_INCH: f32 = 25.4;

lazy_static! {
    static ref MONITOR_HEADER: Regex = Regex::new(
        r"^\s*(?P<id>\S+)\s+(?P<state>connected|disconnected)(?:\s+(?P<rest>.*?))?\s*$"
    )
    .unwrap();
    static ref GEOMETRY: Regex =
        Regex::new(r"\d+(?:\.\d+)?\s*[xX]\s*\d+(?:\.\d+)?\s*\+\s*-?\d+\s*\+\s*-?\d+").unwrap();
    static ref PHYSICAL_SIZE: Regex =
        Regex::new(r"(?P<width>\d+(?:\.\d+)?)\s*mm\s*[xX]\s*(?P<height>\d+(?:\.\d+)?)\s*mm")
            .unwrap();
}

/// An output as reported by xrandr.
///
/// `resolution` and `position` stay zeroed when the output has no active
/// geometry, and `size` stays zeroed when no physical size is reported.
#[derive(Debug, Default, Clone, Serialize, Deserialize, PartialEq)]
pub struct Monitor {
    pub id: String,
    pub connected: bool,
    pub primary: bool,
    pub resolution: Size,
    pub position: Position,
    /// Physical size in millimeters.
    pub size: Size,
    pub modes: Vec<Mode>,
}

impl Monitor {
    pub fn current_mode(&self) -> Option<&Mode> {
        self.modes.iter().find(|mode| mode.is_current())
    }

    pub fn preferred_mode(&self) -> Option<&Mode> {
        self.modes.iter().find(|mode| mode.is_preferred())
    }

    /// Horizontal DPI of the current mode over the physical width.
    pub fn dpi(&self) -> Result<f32> {
        let mode = self.current_mode().ok_or(XrandrError::NoCurrentMode)?;
        if self.size.width == 0.0 {
            return Err(XrandrError::ZeroPhysicalWidth);
        }
        Ok(mode.resolution.width * MM_PER_INCH / self.size.width)
    }
}

/// Parses an output header such as
/// `HDMI-0 connected primary 5568x3132+0+0 (normal left inverted right x axis y axis) 597mm x 336mm`.
///
/// Only the identifier and connection state are mandatory.
pub fn parse_monitor_line(input: &str) -> Result<Monitor> {
    let caps = MONITOR_HEADER
        .captures(input)
        .ok_or_else(|| XrandrError::format("monitor line", input))?;
    let rest = caps.name("rest").map_or("", |m| m.as_str());

    // Geometry precedes the first parenthesis, physical size follows the last.
    let head = rest.split('(').next().unwrap_or_default();
    let tail = rest.rsplit(')').next().unwrap_or_default();

    let (resolution, position) = GEOMETRY
        .find(head)
        .and_then(|m| parse_size_with_position(m.as_str()).ok())
        .unwrap_or_default();
    let size = PHYSICAL_SIZE
        .captures(tail)
        .and_then(|c| {
            Some(Size {
                width: c["width"].parse().ok()?,
                height: c["height"].parse().ok()?,
            })
        })
        .unwrap_or_default();

    Ok(Monitor {
        id: caps["id"].to_string(),
        connected: &caps["state"] == "connected",
        primary: rest.split_whitespace().next() == Some("primary"),
        resolution,
        position,
        size,
        modes: Vec::new(),
    })
}

/// True for lines shaped like `<id> connected|disconnected ...`.
pub fn is_monitor_line(line: &str) -> bool {
    !is_screen_line(line) && MONITOR_HEADER.is_match(line)
}
