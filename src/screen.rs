use std::ops::Deref;
use std::str::FromStr;

use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::error::{Result, XrandrError};
use crate::monitor::Monitor;
use crate::size::{parse_size, Size};

const SCREEN_KEYWORD: &str = "Screen";

lazy_static! {
    static ref SCREEN_HEADER: Regex = Regex::new(
        r"^\s*Screen\s+(?P<no>\d+)\s*:\s*minimum\s+(?P<min>[^,]+?)\s*,?\s*current\s+(?P<cur>[^,]+?)\s*,?\s*maximum\s+(?P<max>[^,]+?)\s*,?\s*$"
    )
    .unwrap();
}

#[derive(Debug, Default, Clone, Serialize, Deserialize, PartialEq)]
pub struct Screen {
    pub no: u32,
    pub min_resolution: Size,
    pub current_resolution: Size,
    pub max_resolution: Size,
    pub monitors: Vec<Monitor>,
}

/// Every screen found in one xrandr dump, in source order.
#[derive(Debug, Default, Clone, Serialize, Deserialize, PartialEq)]
#[serde(transparent)]
pub struct Screens(pub Vec<Screen>);

impl Screen {
    pub fn monitor_by_id(&self, id: &str) -> Option<&Monitor> {
        self.monitors.iter().find(|monitor| monitor.id == id)
    }

    pub fn primary_monitor(&self) -> Option<&Monitor> {
        self.monitors.iter().find(|monitor| monitor.primary)
    }

    pub fn connected_monitors(&self) -> impl Iterator<Item = &Monitor> {
        self.monitors.iter().filter(|monitor| monitor.connected)
    }
}

impl Screens {
    pub fn monitor_by_id(&self, id: &str) -> Option<&Monitor> {
        self.iter().find_map(|screen| screen.monitor_by_id(id))
    }

    pub fn primary_monitor(&self) -> Option<&Monitor> {
        self.iter().find_map(Screen::primary_monitor)
    }

    pub fn into_inner(self) -> Vec<Screen> {
        self.0
    }
}

impl Deref for Screens {
    type Target = [Screen];

    fn deref(&self) -> &[Screen] {
        &self.0
    }
}

impl From<Vec<Screen>> for Screens {
    fn from(screens: Vec<Screen>) -> Screens {
        Screens(screens)
    }
}

impl IntoIterator for Screens {
    type Item = Screen;
    type IntoIter = std::vec::IntoIter<Screen>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a Screens {
    type Item = &'a Screen;
    type IntoIter = std::slice::Iter<'a, Screen>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl FromStr for Screens {
    type Err = XrandrError;

    fn from_str(s: &str) -> Result<Self> {
        crate::parse_screens(s)
    }
}

/// Parses `Screen 0: minimum 8 x 8, current 9408 x 3132, maximum 32767 x 32767`.
/// The returned screen has no monitors.
pub fn parse_screen_line(input: &str) -> Result<Screen> {
    let caps = SCREEN_HEADER
        .captures(input)
        .ok_or_else(|| XrandrError::format("screen line", input))?;
    let no = caps["no"]
        .parse::<u32>()
        .map_err(|_| XrandrError::format("screen line", input))?;
    Ok(Screen {
        no,
        min_resolution: parse_size(&caps["min"])?,
        current_resolution: parse_size(&caps["cur"])?,
        max_resolution: parse_size(&caps["max"])?,
        monitors: Vec::new(),
    })
}

/// Cheap check for a screen header; does not validate the rest of the line.
pub fn is_screen_line(line: &str) -> bool {
    line.trim_start().starts_with(SCREEN_KEYWORD)
}
