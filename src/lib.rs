//! Parses the text printed by `xrandr --query` (plain or `--verbose`) into
//! screens, monitors, modes and refresh rates.

pub mod error;
pub mod modes;
pub mod monitor;
pub mod screen;
pub mod size;

use log::{debug, trace};

pub use error::{Result, XrandrError};
pub use modes::{parse_mode_line, parse_refresh_rate, Mode, RefreshRate};
pub use monitor::{is_monitor_line, parse_monitor_line, Monitor};
pub use screen::{is_screen_line, parse_screen_line, Screen, Screens};
pub use size::{parse_size, parse_size_with_position, Position, Size};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    NoScreen,
    InScreen,
    InMonitor,
}

/// Builds the screen hierarchy one line at a time.
///
/// The screen being filled is owned here and moved into `screens` once the
/// next screen header or the end of input is reached. The active monitor is
/// always the last monitor of that screen.
struct Assembler {
    state: State,
    screens: Vec<Screen>,
    current: Option<Screen>,
}

impl Assembler {
    fn new() -> Assembler {
        Assembler {
            state: State::NoScreen,
            screens: Vec::new(),
            current: None,
        }
    }

    fn feed(&mut self, number: usize, line: &str) -> Result<()> {
        if line.trim().is_empty() {
            return Ok(());
        }

        if is_screen_line(line) {
            trace!("line {number}: screen header");
            let screen = parse_screen_line(line).map_err(|e| {
                debug!("line {number}: malformed screen header: {e}");
                e
            })?;
            if let Some(done) = self.current.replace(screen) {
                self.screens.push(done);
            }
            self.state = State::InScreen;
            return Ok(());
        }

        if is_monitor_line(line) {
            trace!("line {number}: monitor header");
            let screen = self.current.as_mut().ok_or_else(|| orphan(number, line))?;
            let monitor = parse_monitor_line(line).map_err(|e| {
                debug!("line {number}: malformed monitor header: {e}");
                e
            })?;
            screen.monitors.push(monitor);
            self.state = State::InMonitor;
            return Ok(());
        }

        match (self.state, parse_mode_line(line)) {
            (State::InMonitor, Ok(mode)) => {
                trace!("line {number}: mode {:?}", mode.resolution);
                if let Some(monitor) = self.current.as_mut().and_then(|s| s.monitors.last_mut()) {
                    monitor.modes.push(mode);
                }
            }
            (State::NoScreen, Ok(_)) => return Err(orphan(number, line)),
            (_, Ok(_)) => debug!("line {number}: mode outside of a monitor, skipping"),
            (_, Err(_)) => debug!("line {number}: not a mode line, skipping"),
        }
        Ok(())
    }

    fn finish(mut self) -> Screens {
        if let Some(done) = self.current.take() {
            self.screens.push(done);
        }
        Screens(self.screens)
    }
}

fn orphan(number: usize, line: &str) -> XrandrError {
    debug!("line {number}: found outside of any screen");
    XrandrError::Orphan {
        line: number,
        input: line.to_string(),
    }
}

/// Parses a complete xrandr dump.
///
/// Malformed screen or monitor headers abort the parse. Any other line that
/// is not a plain mode line is skipped, so verbose modelines and their timing
/// rows are dropped without error.
pub fn parse_screens(input: &str) -> Result<Screens> {
    let mut assembler = Assembler::new();
    for (index, line) in input.lines().enumerate() {
        assembler.feed(index + 1, line)?;
    }
    let screens = assembler.finish();
    debug!(
        "parsed {} screen(s) with {} monitor(s)",
        screens.len(),
        screens.iter().map(|s| s.monitors.len()).sum::<usize>()
    );
    Ok(screens)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn init() {
        let _ = pretty_env_logger::try_init();
    }

    #[test]
    fn empty_input_yields_no_screens() {
        init();
        assert!(parse_screens("").unwrap().is_empty());
        assert!(parse_screens("\n   \n\t\n").unwrap().is_empty());
    }

    #[test]
    fn monitors_attach_to_the_active_screen() {
        init();
        let screens = parse_screens(
            "Screen 0: minimum 8 x 8, current 1920 x 1080, maximum 32767 x 32767\n\
             DP-0 connected 1920x1080+0+0 (normal left inverted right x axis y axis) 527mm x 296mm\n\
             \x20  1920x1080     60.00*+\n\
             Screen 1: minimum 8 x 8, current 1280 x 1024, maximum 32767 x 32767\n\
             VGA-0 connected 1280x1024+0+0 (normal left inverted right x axis y axis) 376mm x 301mm\n\
             \x20  1280x1024     75.02    60.02*\n\
             \x20  1024x768      60.00\n\
             HDMI-0 disconnected (normal left inverted right x axis y axis)\n",
        )
        .unwrap();

        assert_eq!(screens.len(), 2);
        assert_eq!(screens[0].no, 0);
        assert_eq!(screens[0].monitors.len(), 1);
        assert_eq!(screens[0].monitors[0].modes.len(), 1);

        assert_eq!(screens[1].no, 1);
        let ids: Vec<&str> = screens[1].monitors.iter().map(|m| m.id.as_str()).collect();
        assert_eq!(ids, vec!["VGA-0", "HDMI-0"]);
        assert_eq!(screens[1].monitors[0].modes.len(), 2);
        assert!(screens[1].monitors[1].modes.is_empty());
    }

    #[test]
    fn malformed_screen_header_aborts() {
        init();
        let err = parse_screens(
            "Screen 0: minimum 8 x 8, current 1920 x 1080, maximum 32767 x 32767\n\
             DP-0 connected 1920x1080+0+0 (normal) 527mm x 296mm\n\
             Screen 1: nonsense\n",
        )
        .unwrap_err();
        assert!(matches!(err, XrandrError::Format { expected: "screen line", .. }));
    }

    #[test]
    fn screen_keyword_wins_over_connection_state() {
        init();
        let err = parse_screens(
            "Screen 0: minimum 8 x 8, current 1920 x 1080, maximum 32767 x 32767\n\
             Screen connected 1920x1080+0+0 (normal) 527mm x 296mm\n",
        )
        .unwrap_err();
        assert!(matches!(err, XrandrError::Format { expected: "screen line", .. }));
    }

    #[test]
    fn monitor_without_screen_is_an_error() {
        init();
        let err = parse_screens("DP-0 connected 1920x1080+0+0 (normal) 527mm x 296mm\n").unwrap_err();
        assert_eq!(
            err,
            XrandrError::Orphan {
                line: 1,
                input: "DP-0 connected 1920x1080+0+0 (normal) 527mm x 296mm".to_string(),
            }
        );
        assert!(err.is_format());
        assert!(!XrandrError::NoCurrentMode.is_format());
    }

    #[test]
    fn mode_without_screen_is_an_error() {
        init();
        let err = parse_screens("\n   1920x1080     60.00*+\n").unwrap_err();
        assert!(matches!(err, XrandrError::Orphan { line: 2, .. }));
        assert!(err.is_format());
    }

    #[test]
    fn mode_before_any_monitor_is_skipped() {
        init();
        let screens = parse_screens(
            "Screen 0: minimum 8 x 8, current 1920 x 1080, maximum 32767 x 32767\n\
             \x20  1920x1080     60.00*+\n\
             DP-0 connected 1920x1080+0+0 (normal) 527mm x 296mm\n",
        )
        .unwrap();
        assert!(screens[0].monitors[0].modes.is_empty());
    }

    #[test]
    fn screens_from_str() {
        init();
        let screens: Screens = "Screen 0: minimum 8 x 8, current 640 x 480, maximum 640 x 480"
            .parse()
            .unwrap();
        assert_eq!(screens.len(), 1);
        assert_eq!(screens[0].current_resolution, Size::new(640.0, 480.0));
    }
}
