//! Legacy terminal pane: green-screen transcript typed line by line.
//!
//! The transcript of each step extends the previous one, so moving forward
//! only types the new tail. A block cursor trails the text while typing and
//! the view keeps the last line in sight.

use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};
use tokio::sync::mpsc;

use super::super::events::{AppEvent, RevealFrame, RevealTarget};
use super::super::reveal::PaneReveal;
use super::super::theme;
use crate::core::navigator::StepNavigator;
use crate::core::reveal::RevealPacing;

const CURSOR: &str = "█";

pub struct TerminalPane {
    banner: Vec<String>,
    reveal: PaneReveal,
    has_step: bool,
}

impl TerminalPane {
    pub fn new(
        banner: Vec<String>,
        pacing: RevealPacing,
        animate: bool,
        tx: mpsc::UnboundedSender<AppEvent>,
    ) -> Self {
        Self {
            banner,
            reveal: PaneReveal::new(RevealTarget::Terminal, pacing, animate, tx),
            has_step: false,
        }
    }

    /// Follow the navigator to its current step.
    pub fn sync(&mut self, navigator: &StepNavigator) {
        let step = navigator.step();
        self.has_step = step.is_some();
        self.reveal.show(
            navigator.current_step(),
            step.map(|s| s.terminal_output.as_str()),
        );
    }

    pub fn apply_frame(&mut self, frame: &RevealFrame) -> bool {
        self.reveal.apply_frame(frame)
    }

    pub fn skip(&mut self) -> bool {
        self.reveal.skip()
    }

    pub fn displayed(&self) -> &str {
        self.reveal.displayed()
    }

    pub fn is_revealing(&self) -> bool {
        self.reveal.is_revealing()
    }

    /// Banner, transcript and (while typing) the cursor, one entry per row.
    pub fn lines(&self) -> Vec<Line<'_>> {
        let mut lines: Vec<Line> = self
            .banner
            .iter()
            .map(|l| {
                Line::from(Span::styled(
                    l.as_str(),
                    theme::terminal_text().add_modifier(Modifier::BOLD),
                ))
            })
            .collect();

        if !self.has_step {
            lines.push(Line::from(Span::styled(
                "No step selected",
                Style::default().fg(theme::TEXT_DIM),
            )));
            return lines;
        }

        let text = self.reveal.displayed();
        if !text.is_empty() {
            lines.extend(
                text.split('\n')
                    .map(|l| Line::from(Span::styled(l, theme::terminal_text()))),
            );
        }

        if self.reveal.is_revealing() {
            let cursor = Span::styled(CURSOR, theme::terminal_text());
            if text.is_empty() {
                lines.push(Line::from(cursor));
            } else if let Some(last) = lines.last_mut() {
                last.spans.push(cursor);
            }
        }
        lines
    }

    pub fn render(&self, frame: &mut Frame, area: Rect) {
        let block = Block::default()
            .title(Span::styled(" Legacy Terminal ", theme::heading()))
            .borders(Borders::ALL)
            .border_style(theme::border_default())
            .style(Style::default().bg(theme::TERMINAL_BG));

        let inner = block.inner(area);
        frame.render_widget(block, area);

        let lines = self.lines();
        let visible = inner.height as usize;
        let scroll = lines.len().saturating_sub(visible);

        frame.render_widget(
            Paragraph::new(lines)
                .style(theme::terminal_text())
                .scroll((scroll as u16, 0)),
            inner,
        );
    }
}
