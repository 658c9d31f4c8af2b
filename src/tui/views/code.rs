//! Code transformation pane: explanation banner over a before/after listing.

use ratatui::{
    layout::{Constraint, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};
use tokio::sync::mpsc;

use super::super::events::{AppEvent, RevealFrame, RevealTarget};
use super::super::reveal::PaneReveal;
use super::super::theme;
use crate::core::navigator::StepNavigator;
use crate::core::reveal::RevealPacing;

const PLACEHOLDER: &str = "Select a step to view code transformation";
const EXPLANATION_HEIGHT: u16 = 4;

pub struct CodePane {
    source_label: String,
    target_label: String,
    explanation: PaneReveal,
}

impl CodePane {
    pub fn new(
        source_label: String,
        target_label: String,
        pacing: RevealPacing,
        animate: bool,
        tx: mpsc::UnboundedSender<AppEvent>,
    ) -> Self {
        Self {
            source_label,
            target_label,
            explanation: PaneReveal::new(RevealTarget::Explanation, pacing, animate, tx),
        }
    }

    pub fn sync(&mut self, navigator: &StepNavigator) {
        self.explanation.show(
            navigator.current_step(),
            navigator.step().map(|s| s.explanation.as_str()),
        );
    }

    pub fn apply_frame(&mut self, frame: &RevealFrame) -> bool {
        self.explanation.apply_frame(frame)
    }

    pub fn skip(&mut self) -> bool {
        self.explanation.skip()
    }

    pub fn explanation(&self) -> &str {
        self.explanation.displayed()
    }

    pub fn is_revealing(&self) -> bool {
        self.explanation.is_revealing()
    }

    pub fn render(&self, frame: &mut Frame, area: Rect, navigator: &StepNavigator) {
        let block = theme::block_focused("Code Transformation");
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let Some(step) = navigator.step() else {
            frame.render_widget(
                Paragraph::new(Line::from(Span::styled(PLACEHOLDER, theme::dim())))
                    .wrap(Wrap { trim: true }),
                inner,
            );
            return;
        };

        let chunks = Layout::vertical([
            Constraint::Length(EXPLANATION_HEIGHT),
            Constraint::Percentage(50),
            Constraint::Percentage(50),
        ])
        .split(inner);

        self.render_explanation(frame, chunks[0]);
        render_listing(
            frame,
            chunks[1],
            &self.source_label,
            theme::LEGACY,
            &step.source_code,
        );
        render_listing(
            frame,
            chunks[2],
            &self.target_label,
            theme::MODERN,
            &step.target_code,
        );
    }

    fn render_explanation(&self, frame: &mut Frame, area: Rect) {
        let mut spans = vec![Span::styled(
            self.explanation.displayed(),
            Style::default().fg(theme::INFO),
        )];
        if self.explanation.is_revealing() {
            spans.push(Span::styled("▌", Style::default().fg(theme::INFO)));
        }
        frame.render_widget(
            Paragraph::new(Line::from(spans)).wrap(Wrap { trim: false }),
            area,
        );
    }
}

/// Numbered source lines, gutter dimmed.
pub fn numbered_lines(code: &str) -> Vec<Line<'_>> {
    let width = code.lines().count().max(1).to_string().len();
    code.lines()
        .enumerate()
        .map(|(i, text)| {
            Line::from(vec![
                Span::styled(format!("{:>width$} │ ", i + 1), theme::dim()),
                Span::styled(text, Style::default().fg(theme::TEXT)),
            ])
        })
        .collect()
}

fn render_listing(frame: &mut Frame, area: Rect, label: &str, color: Color, code: &str) {
    let block = Block::default()
        .title(Span::styled(format!(" {label} "), theme::code_badge(color)))
        .borders(Borders::TOP)
        .border_style(Style::default().fg(color).add_modifier(Modifier::DIM));
    frame.render_widget(Paragraph::new(numbered_lines(code)).block(block), area);
}

#[cfg(test)]
mod tests {
    use super::*;

    fn line_text(line: &Line<'_>) -> String {
        line.spans.iter().map(|s| s.content.as_ref()).collect()
    }

    #[test]
    fn test_numbered_lines() {
        let lines = numbered_lines("PROMPT \"ID\"\nINPUT ID");
        assert_eq!(lines.len(), 2);
        assert_eq!(line_text(&lines[0]), "1 │ PROMPT \"ID\"");
        assert_eq!(line_text(&lines[1]), "2 │ INPUT ID");
    }

    #[test]
    fn test_gutter_pads_to_widest_number() {
        let code = (1..=12).map(|i| format!("L{i}")).collect::<Vec<_>>().join("\n");
        let lines = numbered_lines(&code);
        assert_eq!(line_text(&lines[0]), " 1 │ L1");
        assert_eq!(line_text(&lines[11]), "12 │ L12");
    }

    #[test]
    fn test_empty_code_has_no_lines() {
        assert!(numbered_lines("").is_empty());
    }
}
