use std::str::FromStr;

use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::error::{Result, XrandrError};
use crate::size::{parse_size, Size};

lazy_static! {
    static ref REFRESH_RATE: Regex =
        Regex::new(r"^(?P<value>\d+(?:\.\d+)?)(?P<flags>(?:\s*[*+])*)$").unwrap();
    static ref RATE_LIST: Regex =
        Regex::new(r"^\s*(?:\d+(?:\.\d+)?(?:\s*[*+])*(?:\s+|$))+$").unwrap();
    static ref RATE_TOKEN: Regex = Regex::new(r"\d+(?:\.\d+)?(?:\s*[*+])*").unwrap();
}

/// A refresh rate in Hz advertised for a mode.
#[derive(Debug, Default, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct RefreshRate {
    pub value: f32,
    /// Marked `*`: the rate in use.
    pub current: bool,
    /// Marked `+`: the rate recommended by the monitor.
    pub preferred: bool,
}

#[derive(Debug, Default, Clone, Serialize, Deserialize, PartialEq)]
pub struct Mode {
    pub resolution: Size,
    pub refresh_rates: Vec<RefreshRate>,
}

impl Mode {
    pub fn current_refresh_rate(&self) -> Option<&RefreshRate> {
        self.refresh_rates.iter().find(|rate| rate.current)
    }

    pub fn preferred_refresh_rate(&self) -> Option<&RefreshRate> {
        self.refresh_rates.iter().find(|rate| rate.preferred)
    }

    pub fn is_current(&self) -> bool {
        self.current_refresh_rate().is_some()
    }

    pub fn is_preferred(&self) -> bool {
        self.preferred_refresh_rate().is_some()
    }
}

impl FromStr for RefreshRate {
    type Err = XrandrError;

    fn from_str(s: &str) -> Result<Self> {
        parse_refresh_rate(s)
    }
}

impl FromStr for Mode {
    type Err = XrandrError;

    fn from_str(s: &str) -> Result<Self> {
        parse_mode_line(s)
    }
}

/// Parses a rate token like `59.94`, `60.00*+` or `30.12 + *`.
pub fn parse_refresh_rate(input: &str) -> Result<RefreshRate> {
    let caps = REFRESH_RATE
        .captures(input.trim())
        .ok_or_else(|| XrandrError::format("refresh rate", input))?;
    let value = caps["value"]
        .parse::<f32>()
        .map_err(|_| XrandrError::format("refresh rate", input))?;

    let flags = &caps["flags"];
    let count = |flag: char| flags.chars().filter(|c| *c == flag).count();
    let (current, preferred) = (count('*'), count('+'));
    if current > 1 || preferred > 1 {
        return Err(XrandrError::format("refresh rate", input));
    }

    Ok(RefreshRate {
        value,
        current: current == 1,
        preferred: preferred == 1,
    })
}

/// Parses a plain mode line: a resolution followed by its refresh rates.
///
/// Lines from the verbose dialect (`1920x1200 (0x5b) 193.250MHz ...`, or the
/// `h:`/`v:` timing rows) are rejected, which is how the assembler tells them
/// apart from real modes.
pub fn parse_mode_line(input: &str) -> Result<Mode> {
    let line = input.trim();
    let (resolution, rates) = line
        .split_once(char::is_whitespace)
        .ok_or_else(|| XrandrError::format("mode line", input))?;
    let resolution = parse_size(resolution)?;

    if !RATE_LIST.is_match(rates) {
        return Err(XrandrError::format("mode line", input));
    }
    let refresh_rates = RATE_TOKEN
        .find_iter(rates)
        .map(|token| parse_refresh_rate(token.as_str()))
        .collect::<Result<Vec<_>>>()?;

    Ok(Mode {
        resolution,
        refresh_rates,
    })
}
