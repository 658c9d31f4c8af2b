//! Educational callout strip under the panes.

use ratatui::{
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

use super::super::theme;
use crate::core::script::Callout;

pub fn callout_lines(callout: &Callout) -> Vec<Line<'_>> {
    let mut benefits = vec![Span::styled("Benefits: ", theme::muted())];
    for (i, benefit) in callout.benefits.iter().enumerate() {
        if i > 0 {
            benefits.push(Span::styled(" · ", theme::dim()));
        }
        benefits.push(Span::styled(
            benefit.as_str(),
            Style::default().fg(theme::SUCCESS),
        ));
    }

    vec![
        Line::from(Span::styled(
            callout.description.as_str(),
            Style::default().fg(theme::TEXT),
        )),
        Line::from(benefits),
    ]
}

/// Draw the current step's callout. Nothing is drawn without one.
pub fn render(frame: &mut Frame, area: Rect, callout: Option<&Callout>) {
    let Some(callout) = callout else {
        return;
    };

    let block = Block::default()
        .title(Span::styled(format!(" 💡 {} ", callout.title), theme::title()))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme::ACCENT));

    frame.render_widget(
        Paragraph::new(callout_lines(callout))
            .block(block)
            .wrap(Wrap { trim: true }),
        area,
    );
}
