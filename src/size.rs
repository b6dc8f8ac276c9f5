use std::str::FromStr;

use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::error::{Result, XrandrError};

lazy_static! {
    static ref POSITIONED_SIZE: Regex =
        Regex::new(r"^(?P<size>[^+]+)\+\s*(?P<x>-?\d+)\s*\+\s*(?P<y>-?\d+)\s*$").unwrap();
    static ref DIMENSION: Regex = Regex::new(r"^\d+(?:\.\d+)?$").unwrap();
}

/// Float noise tolerated before a scaled dimension rounds up.
const RESCALE_EPSILON: f32 = 1e-3;

/// Width and height, in pixels for resolutions and in millimeters for
/// physical dimensions.
#[derive(Debug, Default, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct Size {
    pub width: f32,
    pub height: f32,
}

/// Offset of a monitor inside the virtual screen.
#[derive(Debug, Default, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Size {
    pub fn new(width: f32, height: f32) -> Size {
        Size { width, height }
    }

    /// Scales both dimensions by `factor`, rounding up to whole units.
    ///
    /// Any fractional product rounds up, so `3 * 0.1` becomes `1`. Products
    /// within `RESCALE_EPSILON` above a whole number (`100 * 1.1`) are taken
    /// as that number.
    pub fn rescale(&self, factor: f32) -> Size {
        let scale = |value: f32| (value * factor - RESCALE_EPSILON).ceil().max(0.0);
        Size {
            width: scale(self.width),
            height: scale(self.height),
        }
    }
}

impl FromStr for Size {
    type Err = XrandrError;

    fn from_str(s: &str) -> Result<Self> {
        parse_size(s)
    }
}

/// Parses `W x H`, where the separator is `x` or `X` and whitespace is free.
pub fn parse_size(input: &str) -> Result<Size> {
    let (width, height) = input
        .split_once(['x', 'X'])
        .ok_or_else(|| XrandrError::format("size", input))?;
    Ok(Size {
        width: parse_dimension(width, input)?,
        height: parse_dimension(height, input)?,
    })
}

fn parse_dimension(field: &str, input: &str) -> Result<f32> {
    let field = field.trim();
    if !DIMENSION.is_match(field) {
        return Err(XrandrError::format("size", input));
    }
    field
        .parse::<f32>()
        .map_err(|_| XrandrError::format("size", input))
}

/// Parses a geometry token such as `1920x1080+0+0` or `1920x1080 + -1920 + 0`.
pub fn parse_size_with_position(input: &str) -> Result<(Size, Position)> {
    let caps = POSITIONED_SIZE
        .captures(input.trim())
        .ok_or_else(|| XrandrError::format("positioned size", input))?;
    let size = parse_size(&caps["size"])?;
    let offset = |name: &str| {
        caps[name]
            .parse::<i32>()
            .map_err(|_| XrandrError::format("positioned size", input))
    };
    let position = Position {
        x: offset("x")?,
        y: offset("y")?,
    };
    Ok((size, position))
}
