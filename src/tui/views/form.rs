//! Modern order form pane.
//!
//! Sections appear as the walkthrough reaches them: customer first, then the
//! product once a rack price is known, live calculations once tax is known,
//! then inventory (level bar and low-stock status) and any saved-record
//! statuses. The customer ID is typed into its field with a lookup dropdown
//! open until it settles.

use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{LineGauge, Paragraph},
    Frame,
};
use tokio::sync::mpsc;

use super::super::events::{AppEvent, RevealFrame, RevealTarget};
use super::super::reveal::PaneReveal;
use super::super::theme;
use crate::core::form::{format_currency, group_thousands};
use crate::core::navigator::StepNavigator;
use crate::core::reveal::RevealPacing;
use crate::core::script::CustomerSuggestion;

/// Tank capacity the inventory bar is measured against.
pub const TANK_CAPACITY_GAL: u32 = 10_000;
/// At or below this level the tank is flagged as low.
pub const LOW_INVENTORY_GAL: u32 = 5_000;

/// Fill level of the tank in `[0, 1]`.
pub fn inventory_ratio(gallons: u32) -> f64 {
    (f64::from(gallons) / f64::from(TANK_CAPACITY_GAL)).min(1.0)
}

pub struct FormPane {
    title: String,
    suggestions: Vec<CustomerSuggestion>,
    customer_id: PaneReveal,
}

impl FormPane {
    pub fn new(
        title: String,
        suggestions: Vec<CustomerSuggestion>,
        pacing: RevealPacing,
        animate: bool,
        tx: mpsc::UnboundedSender<AppEvent>,
    ) -> Self {
        Self {
            title,
            suggestions,
            customer_id: PaneReveal::new(RevealTarget::CustomerId, pacing, animate, tx),
        }
    }

    pub fn sync(&mut self, navigator: &StepNavigator) {
        let id = navigator
            .step()
            .map(|_| navigator.form_data().customer_id.as_str());
        self.customer_id.show(navigator.current_step(), id);
    }

    pub fn apply_frame(&mut self, frame: &RevealFrame) -> bool {
        self.customer_id.apply_frame(frame)
    }

    pub fn skip(&mut self) -> bool {
        self.customer_id.skip()
    }

    pub fn customer_id(&self) -> &str {
        self.customer_id.displayed()
    }

    pub fn is_revealing(&self) -> bool {
        self.customer_id.is_revealing()
    }

    /// Suggestions matching what has been typed so far.
    pub fn matching_suggestions(&self) -> Vec<&CustomerSuggestion> {
        let typed = self.customer_id.displayed().to_ascii_uppercase();
        self.suggestions
            .iter()
            .filter(|s| s.id.to_ascii_uppercase().starts_with(&typed))
            .collect()
    }

    pub fn lines(&self, navigator: &StepNavigator) -> Vec<Line<'static>> {
        self.layout(navigator).0
    }

    /// Form rows plus the row reserved for the inventory bar, if shown.
    fn layout(&self, navigator: &StepNavigator) -> (Vec<Line<'static>>, Option<usize>) {
        let form = navigator.form_data();
        let mut gauge_row = None;
        let typing = self.customer_id.is_revealing();
        let mut lines = vec![section("Customer")];

        let mut id_spans = vec![Span::styled("  ID:       ", theme::muted())];
        let typed = self.customer_id.displayed();
        if typed.is_empty() && !typing {
            id_spans.push(Span::styled("Enter customer ID…", theme::dim()));
        } else {
            id_spans.push(Span::styled(
                typed.to_string(),
                Style::default()
                    .fg(theme::TEXT)
                    .add_modifier(Modifier::BOLD),
            ));
        }
        if typing {
            id_spans.push(Span::styled("▌", Style::default().fg(theme::PRIMARY_LIGHT)));
        }
        lines.push(Line::from(id_spans));

        if typing {
            for suggestion in self.matching_suggestions() {
                lines.push(Line::from(vec![
                    Span::styled("    ▸ ", Style::default().fg(theme::PRIMARY_LIGHT)),
                    Span::styled(suggestion.id.clone(), Style::default().fg(theme::TEXT)),
                    Span::raw("  "),
                    Span::styled(suggestion.name.clone(), theme::muted()),
                ]));
            }
        } else if !form.customer_name.is_empty() {
            lines.push(Line::from(vec![
                Span::styled("  Name:     ", theme::muted()),
                Span::styled(form.customer_name.clone(), Style::default().fg(theme::TEXT)),
                Span::raw("  "),
                Span::styled("✓ verified", Style::default().fg(theme::SUCCESS)),
            ]));
        }

        if form.rack_price > 0.0 {
            lines.push(Line::raw(""));
            lines.push(section("Product"));
            lines.push(field(
                "Rack price",
                format!("{}/gal", format_currency(form.rack_price)),
            ));
            if form.gallons > 0 {
                lines.push(field("Gallons", group_thousands(u64::from(form.gallons))));
            }
        }

        if form.tax > 0.0 {
            lines.push(Line::raw(""));
            lines.push(section("Live Calculations"));
            lines.push(field("Subtotal", format_currency(form.subtotal())));
            lines.push(field("Tax", format_currency(form.tax)));
            if form.total > 0.0 {
                lines.push(Line::from(vec![
                    Span::styled(format!("  {:<10}", "Total"), theme::muted()),
                    Span::styled(
                        format_currency(form.total),
                        Style::default()
                            .fg(theme::ACCENT)
                            .add_modifier(Modifier::BOLD),
                    ),
                ]));
            } else {
                lines.push(Line::from(vec![
                    Span::styled(format!("  {:<10}", "Total"), theme::muted()),
                    Span::styled("pending", theme::dim()),
                ]));
            }
        }

        if form.inventory > 0 {
            lines.push(Line::raw(""));
            lines.push(section("Inventory"));
            lines.push(field(
                "Tank 1",
                format!("{} gal", group_thousands(u64::from(form.inventory))),
            ));
            gauge_row = Some(lines.len());
            lines.push(Line::raw(""));
            lines.push(inventory_status(form.inventory));
        }

        let statuses: Vec<&str> = navigator
            .script()
            .statuses_through(navigator.current_step())
            .collect();
        if !statuses.is_empty() {
            lines.push(Line::raw(""));
            for status in statuses {
                lines.push(Line::from(vec![
                    Span::styled("  ✓ ", Style::default().fg(theme::SUCCESS)),
                    Span::styled(status.to_string(), Style::default().fg(theme::SUCCESS)),
                ]));
            }
        }

        (lines, gauge_row)
    }

    pub fn render(&self, frame: &mut Frame, area: Rect, navigator: &StepNavigator) {
        let block = theme::block_default(&self.title);
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let (lines, gauge_row) = self.layout(navigator);
        frame.render_widget(Paragraph::new(lines), inner);

        let Some(row) = gauge_row
            .and_then(|r| u16::try_from(r).ok())
            .filter(|r| *r < inner.height)
        else {
            return;
        };
        let ratio = inventory_ratio(navigator.form_data().inventory);
        let gauge_area = Rect {
            x: inner.x + 2,
            y: inner.y + row,
            width: inner.width.saturating_sub(4),
            height: 1,
        };
        let gauge = LineGauge::default()
            .ratio(ratio)
            .label(format!("{:>3.0}%", ratio * 100.0))
            .filled_style(Style::default().fg(theme::PRIMARY))
            .unfilled_style(Style::default().fg(theme::BG_SURFACE));
        frame.render_widget(gauge, gauge_area);
    }
}

fn inventory_status(gallons: u32) -> Line<'static> {
    if gallons > LOW_INVENTORY_GAL {
        Line::from(Span::styled(
            "  ✓ Adequate inventory",
            Style::default().fg(theme::SUCCESS),
        ))
    } else {
        Line::from(Span::styled(
            "  ! Low inventory warning",
            Style::default().fg(theme::WARNING),
        ))
    }
}

fn section(title: &'static str) -> Line<'static> {
    Line::from(Span::styled(title, theme::heading()))
}

fn field(label: &'static str, value: String) -> Line<'static> {
    Line::from(vec![
        Span::styled(format!("  {label:<10}"), theme::muted()),
        Span::styled(value, Style::default().fg(theme::TEXT)),
    ])
}
