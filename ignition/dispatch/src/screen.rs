//! Status screen layout

use core::fmt::Write;

use heapless::String;
use ignition_core::Rpm;
use ignition_hal::{HalError, HalResult, StatusDisplay};

use crate::state::RuntimeState;

/// Page of the "Set RPM:" label
pub const SET_LABEL_PAGE: u8 = 1;
/// Page of the commanded RPM
pub const SET_VALUE_PAGE: u8 = 2;
/// Page of the "Running RPM:" label
pub const RUN_LABEL_PAGE: u8 = 3;
/// Page of the applied RPM
pub const RUN_VALUE_PAGE: u8 = 4;
/// Page of the match and run-state indicators
pub const STATUS_PAGE: u8 = 6;

pub const LABEL_X: u8 = 4;
pub const VALUE_X: u8 = 48;
pub const MATCH_X: u8 = 0;
pub const RUN_X: u8 = 76;

/// Blank run wiping a previous number before a new one is drawn
const VALUE_FIELD_WIDTH: u8 = 40;

/// Tail of "YES" left behind by "NO"
const MATCH_WIPE_X: u8 = 56;
const MATCH_WIPE_WIDTH: u8 = 16;

/// Tail of "OFF" left behind by "ON"
const RUN_WIPE_X: u8 = 117;
const RUN_WIPE_WIDTH: u8 = 10;

pub const SET_LABEL: &str = "Set RPM:";
pub const RUN_LABEL: &str = "Running RPM:";
pub const MATCH_YES: &str = "RPM match: YES";
pub const MATCH_NO: &str = "RPM match: NO";
pub const STATE_ON: &str = "State: ON";
pub const STATE_OFF: &str = "State: OFF";

const BLACK: u8 = 0x00;

/// Clear the panel and draw the fixed labels
pub fn draw_labels<D: StatusDisplay>(display: &mut D) -> HalResult<()> {
    display.clear(BLACK, BLACK)?;
    display.draw_text(SET_LABEL_PAGE, LABEL_X, SET_LABEL)?;
    display.draw_text(RUN_LABEL_PAGE, LABEL_X, RUN_LABEL)
}

/// Decimal speed on one of the value pages
pub fn draw_rpm<D: StatusDisplay>(display: &mut D, page: u8, rpm: Rpm) -> HalResult<()> {
    let mut text: String<12> = String::new();
    write!(text, "{}", rpm).map_err(|_| HalError::InvalidParameter)?;

    display.fill_rect(VALUE_X, page, VALUE_FIELD_WIDTH, 1, BLACK)?;
    display.draw_text(page, VALUE_X, &text)
}

pub fn draw_match<D: StatusDisplay>(display: &mut D, matched: bool) -> HalResult<()> {
    if matched {
        display.draw_text(STATUS_PAGE, MATCH_X, MATCH_YES)
    } else {
        display.fill_rect(MATCH_WIPE_X, STATUS_PAGE, MATCH_WIPE_WIDTH, 1, BLACK)?;
        display.draw_text(STATUS_PAGE, MATCH_X, MATCH_NO)
    }
}

pub fn draw_run_state<D: StatusDisplay>(display: &mut D, enabled: bool) -> HalResult<()> {
    if enabled {
        display.fill_rect(RUN_WIPE_X, STATUS_PAGE, RUN_WIPE_WIDTH, 1, BLACK)?;
        display.draw_text(STATUS_PAGE, RUN_X, STATE_ON)
    } else {
        display.draw_text(STATUS_PAGE, RUN_X, STATE_OFF)
    }
}

/// Full redraw from `state`
pub fn draw_all<D: StatusDisplay>(display: &mut D, state: &RuntimeState) -> HalResult<()> {
    draw_labels(display)?;
    draw_rpm(display, SET_VALUE_PAGE, state.commanded)?;
    draw_rpm(display, RUN_VALUE_PAGE, state.applied)?;
    draw_match(display, state.is_matched())?;
    draw_run_state(display, state.output_enabled)
}
