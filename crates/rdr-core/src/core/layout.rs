//! Widget auto-layout
//!
//! Dashboards are a 6-unit wide grid. Regular widgets are 3 units wide and
//! packed two per band; full-width widgets take a whole band. Every band is
//! 8 rows tall. The arithmetic assumes all existing widgets were placed by
//! this same policy.

use crate::api::models::{Widget, WidgetPosition};

pub const HALF_WIDTH: u32 = 3;
pub const FULL_WIDTH: u32 = 6;
pub const BAND_HEIGHT: u32 = 8;

pub fn is_full_width(widget: &Widget) -> bool {
    widget
        .options
        .position
        .is_some_and(|position| position.size_x == FULL_WIDTH)
}

/// Position for the next widget appended to a dashboard holding `widgets`.
pub fn next_widget_position(widgets: &[Widget], full_width: bool) -> WidgetPosition {
    let full_width_count = widgets.iter().filter(|w| is_full_width(w)).count() as u32;
    let half_width_count = widgets.len() as u32 - full_width_count;

    let (row, col) = (half_width_count / 2, half_width_count % 2);

    WidgetPosition {
        col: col * HALF_WIDTH,
        row: (row + full_width_count) * BAND_HEIGHT,
        size_x: if full_width { FULL_WIDTH } else { HALF_WIDTH },
        size_y: BAND_HEIGHT,
    }
}
