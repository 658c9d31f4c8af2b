//! Root layout: header, progress bar, the three demo panes, callout strip
//! and status bar.

use ratatui::layout::{Constraint, Layout, Rect};

/// Rows used by the title and step counter.
pub const HEADER_HEIGHT: u16 = 2;
/// Rows used by the educational callout strip.
pub const CALLOUT_HEIGHT: u16 = 4;

/// Computed layout regions for a single frame.
pub struct DemoLayout {
    pub header: Rect,
    pub progress: Rect,
    /// Legacy terminal, code transformation, modern form, in that order.
    pub panes: [Rect; 3],
    pub callout: Rect,
    /// Status bar (bottom row).
    pub status: Rect,
}

/// How the three panes share the content area.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PaneArrangement {
    /// Side by side.
    Columns,
    /// One above the other, for narrow terminals.
    Stacked,
}

impl DemoLayout {
    /// Compute layout regions from the terminal area.
    ///
    /// Panes are stacked when the terminal is narrower than `stack_below_width`.
    pub fn compute(area: Rect, stack_below_width: u16) -> (Self, PaneArrangement) {
        let arrangement = if area.width < stack_below_width {
            PaneArrangement::Stacked
        } else {
            PaneArrangement::Columns
        };

        let rows = Layout::vertical([
            Constraint::Length(HEADER_HEIGHT),
            Constraint::Length(1), // Progress
            Constraint::Min(3),    // Panes
            Constraint::Length(CALLOUT_HEIGHT),
            Constraint::Length(1), // Status bar
        ])
        .split(area);

        let split = match arrangement {
            PaneArrangement::Columns => Layout::horizontal([
                Constraint::Ratio(1, 3),
                Constraint::Ratio(1, 3),
                Constraint::Ratio(1, 3),
            ])
            .split(rows[2]),
            PaneArrangement::Stacked => Layout::vertical([
                Constraint::Ratio(1, 3),
                Constraint::Ratio(1, 3),
                Constraint::Ratio(1, 3),
            ])
            .split(rows[2]),
        };

        (
            DemoLayout {
                header: rows[0],
                progress: rows[1],
                panes: [split[0], split[1], split[2]],
                callout: rows[3],
                status: rows[4],
            },
            arrangement,
        )
    }
}
