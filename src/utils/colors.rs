/// ANSI color helper utilities for terminal output.
pub const RESET: &str = "\x1b[0m";

pub const GREY: &str = "\x1b[90m";

pub const RED: &str = "\x1b[31m";
pub const GREEN: &str = "\x1b[32m";

pub const YELLOW: &str = "\x1b[33m";
pub const BLUE: &str = "\x1b[34m";
pub const CYAN: &str = "\x1b[36m";

use crate::models::clock_state::ClockState;
use crate::models::day_record::DayStatus;
use crate::models::summary::HoursBand;

/// complete → green, incomplete → yellow, absent → grey
pub fn color_for_status(status: DayStatus) -> &'static str {
    match status {
        DayStatus::Complete => GREEN,
        DayStatus::Incomplete => YELLOW,
        DayStatus::Absent => GREY,
    }
}

pub fn color_for_band(band: HoursBand) -> &'static str {
    match band {
        HoursBand::High => GREEN,
        HoursBand::Regular => YELLOW,
        HoursBand::Low => RED,
    }
}

pub fn color_for_clock_state(state: ClockState) -> &'static str {
    match state {
        ClockState::NotStarted => GREY,
        ClockState::Working => GREEN,
        ClockState::OnBreak => YELLOW,
        ClockState::Finished => BLUE,
    }
}

/// Grey out placeholders ("--:--", "--", "00:00"), leave anything else alone.
pub fn colorize_optional(value: &str) -> String {
    let v = value.trim();
    if v.is_empty() || v == "--:--" || v == "--" || v == "00:00" {
        format!("{GREY}{value}{RESET}")
    } else {
        value.to_string()
    }
}

pub fn colorize(value: &str, color: &str) -> String {
    format!("{color}{value}{RESET}")
}
