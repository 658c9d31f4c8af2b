use std::io;
use std::sync::Arc;
use std::time::Duration;

use crossterm::event::{Event, EventStream, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use futures::StreamExt;
use ratatui::{
    backend::CrosstermBackend,
    layout::{Alignment, Constraint, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, LineGauge, Paragraph},
    Frame, Terminal,
};
use tokio::sync::mpsc;

use super::events::{Action, AppEvent, Notification, NotificationLevel, RevealTarget};
use super::layout::DemoLayout;
use super::theme;
use super::views::callout;
use super::views::code::CodePane;
use super::views::form::FormPane;
use super::views::terminal::TerminalPane;
use crate::config::AppConfig;
use crate::core::navigator::StepNavigator;
use crate::core::playback::Playback;
use crate::core::script::Script;

const MAX_NOTIFICATIONS: usize = 3;

/// Central application state (Elm architecture).
pub struct AppState {
    /// Whether the app is still running.
    pub running: bool,
    navigator: StepNavigator,
    playback: Playback,
    terminal: TerminalPane,
    code: CodePane,
    form: FormPane,
    /// Active notifications (max 3 visible).
    pub notifications: Vec<Notification>,
    /// Monotonic counter for notification IDs.
    notification_counter: u64,
    /// Whether the help modal is open.
    pub show_help: bool,
    /// Receiver for reveal frames and other app events.
    event_rx: mpsc::UnboundedReceiver<AppEvent>,
    tick_rate: Duration,
    stack_below_width: u16,
}

impl AppState {
    pub fn new(
        script: Arc<Script>,
        config: &AppConfig,
        event_rx: mpsc::UnboundedReceiver<AppEvent>,
        event_tx: mpsc::UnboundedSender<AppEvent>,
    ) -> Self {
        let animate = config.reveal.animate;
        let terminal = TerminalPane::new(
            script.terminal_banner.clone(),
            config.reveal.terminal_pacing(),
            animate,
            event_tx.clone(),
        );
        let code = CodePane::new(
            script.source_label.clone(),
            script.target_label.clone(),
            config.reveal.explanation_pacing(),
            animate,
            event_tx.clone(),
        );
        let form = FormPane::new(
            script.target_label.clone(),
            script.customer_suggestions.clone(),
            config.reveal.form_pacing(),
            animate,
            event_tx,
        );

        let mut playback = Playback::new(config.playback_interval());
        if config.playback.autoplay {
            playback.toggle();
        }

        Self {
            running: true,
            navigator: StepNavigator::new(script),
            playback,
            terminal,
            code,
            form,
            notifications: Vec::new(),
            notification_counter: 0,
            show_help: false,
            event_rx,
            tick_rate: config.tick_rate(),
            stack_below_width: config.tui.stack_below_width,
        }
    }

    /// Open the demo at `step` (clamped to the script) and start the first
    /// reveals. Must be called from within the tokio runtime.
    pub fn start(&mut self, step: usize) {
        let last = self.navigator.total_steps().saturating_sub(1);
        self.navigator.go_to_step(step.min(last));
        self.sync_panes();
        log::info!(
            "Demo '{}' opened at step {} of {}",
            self.navigator.script().title,
            self.navigator.current_step() + 1,
            self.navigator.total_steps()
        );
    }

    // ── Elm event loop ──────────────────────────────────────────────────

    /// Main event loop: render → select → update → loop.
    pub async fn run(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    ) -> io::Result<()> {
        let mut tick_interval = tokio::time::interval(self.tick_rate);
        let mut event_stream = EventStream::new();

        while self.running {
            terminal.draw(|frame| self.render(frame))?;

            tokio::select! {
                _ = tick_interval.tick() => {
                    self.on_tick();
                }
                Some(event) = self.event_rx.recv() => {
                    self.handle_event(event);
                }
                Some(Ok(crossterm_event)) = event_stream.next() => {
                    self.handle_event(AppEvent::Input(crossterm_event));
                }
            }
        }

        Ok(())
    }

    // ── Event handling ──────────────────────────────────────────────────

    /// Handle every queued app event without waiting. Returns how many ran.
    pub fn drain_events(&mut self) -> usize {
        let mut handled = 0;
        while let Ok(event) = self.event_rx.try_recv() {
            self.handle_event(event);
            handled += 1;
        }
        handled
    }

    pub fn handle_event(&mut self, event: AppEvent) {
        match event {
            AppEvent::Input(crossterm_event) => {
                // Help modal swallows everything but its own keys
                if self.show_help {
                    if let Some(action) = self.map_help_input(&crossterm_event) {
                        self.handle_action(action);
                    }
                    return;
                }
                if let Some(action) = self.map_input_to_action(crossterm_event) {
                    self.handle_action(action);
                }
            }
            AppEvent::RevealFrame(frame) => {
                let applied = match frame.target {
                    RevealTarget::Terminal => self.terminal.apply_frame(&frame),
                    RevealTarget::Explanation => self.code.apply_frame(&frame),
                    RevealTarget::CustomerId => self.form.apply_frame(&frame),
                };
                if !applied {
                    log::trace!(
                        "Dropped stale {} frame (generation {})",
                        frame.target.label(),
                        frame.generation
                    );
                }
            }
            AppEvent::Action(action) => self.handle_action(action),
            AppEvent::Tick => self.on_tick(),
            AppEvent::Notification(notification) => {
                self.push_notification(notification.message, notification.level);
            }
            AppEvent::Quit => {
                self.running = false;
            }
        }
    }

    /// Map help modal input to action.
    fn map_help_input(&self, event: &Event) -> Option<Action> {
        let Event::Key(KeyEvent {
            code,
            modifiers,
            kind: KeyEventKind::Press,
            ..
        }) = event
        else {
            return None;
        };
        match (*modifiers, code) {
            (KeyModifiers::CONTROL, KeyCode::Char('c')) => Some(Action::Quit),
            (_, KeyCode::Esc | KeyCode::Char('?')) => Some(Action::CloseHelp),
            _ => None,
        }
    }

    fn map_input_to_action(&self, event: Event) -> Option<Action> {
        let Event::Key(KeyEvent {
            code,
            modifiers,
            kind: KeyEventKind::Press,
            ..
        }) = event
        else {
            return None;
        };

        match (modifiers, code) {
            // Ctrl+C → quit
            (KeyModifiers::CONTROL, KeyCode::Char('c')) => Some(Action::Quit),
            (KeyModifiers::NONE | KeyModifiers::SHIFT, _) => match code {
                KeyCode::Right | KeyCode::Char('l') | KeyCode::Char('n') => {
                    Some(Action::NextStep)
                }
                KeyCode::Left | KeyCode::Char('h') | KeyCode::Char('b') => {
                    Some(Action::PreviousStep)
                }
                // Number keys are 1-based
                KeyCode::Char(c @ '1'..='9') => c
                    .to_digit(10)
                    .map(|d| Action::GoToStep(d as usize - 1)),
                KeyCode::Home | KeyCode::Char('g') => Some(Action::FirstStep),
                KeyCode::End | KeyCode::Char('G') => Some(Action::LastStep),
                KeyCode::Char('r') => Some(Action::Reset),
                KeyCode::Char(' ') | KeyCode::Char('p') => Some(Action::TogglePlay),
                KeyCode::Char('s') => Some(Action::SkipAnimation),
                KeyCode::Char('?') => Some(Action::ShowHelp),
                KeyCode::Char('q') => Some(Action::Quit),
                _ => None,
            },
            _ => None,
        }
    }

    pub fn handle_action(&mut self, action: Action) {
        match action {
            Action::Quit => self.running = false,
            Action::NextStep => {
                if self.navigator.next() {
                    self.after_step_change();
                } else {
                    self.push_notification(
                        "Reached end of demo".to_string(),
                        NotificationLevel::Info,
                    );
                }
            }
            Action::PreviousStep => {
                if self.navigator.previous() {
                    self.after_step_change();
                }
            }
            Action::GoToStep(step) => {
                if step >= self.navigator.total_steps() {
                    self.push_notification(
                        format!("No step {}", step + 1),
                        NotificationLevel::Warning,
                    );
                } else if self.navigator.go_to_step(step) {
                    self.after_step_change();
                }
            }
            Action::FirstStep => {
                if self.navigator.go_to_step(0) {
                    self.after_step_change();
                }
            }
            Action::LastStep => {
                let last = self.navigator.total_steps().saturating_sub(1);
                if self.navigator.go_to_step(last) {
                    self.after_step_change();
                }
            }
            Action::Reset => {
                self.playback.stop();
                self.navigator.reset();
                self.after_step_change();
                self.push_notification("Demo reset".to_string(), NotificationLevel::Info);
            }
            Action::TogglePlay => {
                if !self.playback.is_playing() && !self.navigator.can_go_next() {
                    self.push_notification(
                        "Reached end of demo".to_string(),
                        NotificationLevel::Info,
                    );
                    return;
                }
                let message = if self.playback.toggle() {
                    "Playback started"
                } else {
                    "Playback paused"
                };
                log::info!("{message} at step {}", self.navigator.current_step() + 1);
                self.push_notification(message.to_string(), NotificationLevel::Info);
            }
            Action::SkipAnimation => {
                let skipped = [
                    self.terminal.skip(),
                    self.code.skip(),
                    self.form.skip(),
                ];
                log::debug!("Skipped reveals: {skipped:?}");
            }
            Action::ShowHelp => self.show_help = true,
            Action::CloseHelp => self.show_help = false,
        }
    }

    /// Manual or automatic step change: restart the playback countdown and
    /// bring every pane to the new step.
    fn after_step_change(&mut self) {
        self.playback.restart_interval();
        self.sync_panes();
        log::debug!(
            "Step {} of {}",
            self.navigator.current_step() + 1,
            self.navigator.total_steps()
        );
    }

    fn sync_panes(&mut self) {
        self.terminal.sync(&self.navigator);
        self.code.sync(&self.navigator);
        self.form.sync(&self.navigator);
    }

    // ── Notifications ───────────────────────────────────────────────────

    /// Push a notification (dedup by message, max 3).
    pub fn push_notification(&mut self, message: String, level: NotificationLevel) {
        if self.notifications.iter().any(|n| n.message == message) {
            return;
        }

        self.notification_counter += 1;
        let mut notification = Notification::new(message, level);
        notification.id = self.notification_counter;
        self.notifications.push(notification);

        while self.notifications.len() > MAX_NOTIFICATIONS {
            self.notifications.remove(0);
        }
    }

    /// Tick: decrement notification TTLs, dismiss expired, drive playback.
    fn on_tick(&mut self) {
        for n in &mut self.notifications {
            n.ttl_ticks = n.ttl_ticks.saturating_sub(1);
        }
        self.notifications.retain(|n| n.ttl_ticks > 0);

        let was_playing = self.playback.is_playing();
        if self
            .playback
            .on_tick(self.tick_rate, self.navigator.can_go_next())
        {
            if self.navigator.next() {
                self.after_step_change();
            }
        } else if was_playing && !self.playback.is_playing() {
            log::info!("Playback stopped at the last step");
            self.push_notification("Reached end of demo".to_string(), NotificationLevel::Info);
        }
    }

    // ── Accessors ───────────────────────────────────────────────────────

    pub fn navigator(&self) -> &StepNavigator {
        &self.navigator
    }

    pub fn playback(&self) -> &Playback {
        &self.playback
    }

    pub fn terminal_pane(&self) -> &TerminalPane {
        &self.terminal
    }

    pub fn code_pane(&self) -> &CodePane {
        &self.code
    }

    pub fn form_pane(&self) -> &FormPane {
        &self.form
    }

    /// Whether any pane is still typing.
    pub fn is_revealing(&self) -> bool {
        self.terminal.is_revealing() || self.code.is_revealing() || self.form.is_revealing()
    }

    // ── Rendering ───────────────────────────────────────────────────────

    pub fn render(&self, frame: &mut Frame) {
        let area = frame.area();
        let (layout, _) = DemoLayout::compute(area, self.stack_below_width);

        self.render_header(frame, layout.header);
        self.render_progress(frame, layout.progress);

        self.terminal.render(frame, layout.panes[0]);
        self.code.render(frame, layout.panes[1], &self.navigator);
        self.form.render(frame, layout.panes[2], &self.navigator);

        callout::render(
            frame,
            layout.callout,
            self.navigator.step().and_then(|s| s.callout.as_ref()),
        );

        self.render_status_bar(frame, layout.status);

        // Overlays
        self.render_notifications(frame, area);

        if self.show_help {
            self.render_help_modal(frame, area);
        }
    }

    fn render_header(&self, frame: &mut Frame, area: Rect) {
        let rows = Layout::vertical([Constraint::Length(1), Constraint::Length(1)]).split(area);
        let script = self.navigator.script();

        let title = Line::from(vec![
            Span::styled(format!(" {} ", script.title), theme::title()),
            Span::styled(script.subtitle.as_str(), theme::muted()),
        ]);
        frame.render_widget(Paragraph::new(title), rows[0]);

        let counter = Line::from(Span::styled(
            format!(
                "Step {} of {} ",
                self.navigator.current_step() + 1,
                self.navigator.total_steps()
            ),
            Style::default()
                .fg(theme::PRIMARY_LIGHT)
                .add_modifier(Modifier::BOLD),
        ));
        frame.render_widget(
            Paragraph::new(counter).alignment(Alignment::Right),
            rows[0],
        );

        let hints = Line::from(vec![
            Span::raw(" "),
            Span::styled(script.source_label.as_str(), Style::default().fg(theme::LEGACY)),
            Span::styled(" → ", theme::dim()),
            Span::styled(script.target_label.as_str(), Style::default().fg(theme::MODERN)),
        ]);
        frame.render_widget(Paragraph::new(hints), rows[1]);
    }

    fn render_progress(&self, frame: &mut Frame, area: Rect) {
        let gauge = LineGauge::default()
            .ratio(self.navigator.progress())
            .label("")
            .filled_style(Style::default().fg(theme::PRIMARY))
            .unfilled_style(Style::default().fg(theme::BG_SURFACE));
        frame.render_widget(gauge, area);
    }

    fn render_status_bar(&self, frame: &mut Frame, area: Rect) {
        let playback = if self.playback.is_playing() {
            Span::styled(" PLAYING ", theme::playing_badge())
        } else {
            Span::styled("paused", Style::default().fg(theme::TEXT_MUTED))
        };

        let status = Line::from(vec![
            Span::styled(" SHOWCASE ", theme::brand_badge()),
            Span::raw(" "),
            playback,
            Span::raw(" │ "),
            Span::styled("←/→", theme::key_hint()),
            Span::raw(":step "),
            Span::styled("1-9", theme::key_hint()),
            Span::raw(":jump "),
            Span::styled("Space", theme::key_hint()),
            Span::raw(":play "),
            Span::styled("s", theme::key_hint()),
            Span::raw(":skip "),
            Span::styled("r", theme::key_hint()),
            Span::raw(":reset "),
            Span::styled("?", theme::key_hint()),
            Span::raw(":help "),
            Span::styled("q", theme::key_hint()),
            Span::raw(":quit"),
        ]);

        frame.render_widget(Paragraph::new(status), area);
    }

    fn render_notifications(&self, frame: &mut Frame, area: Rect) {
        if self.notifications.is_empty() {
            return;
        }

        let max_width = 50.min(area.width.saturating_sub(2));
        let height = (self.notifications.len() as u16).min(area.height);
        let x = area.width.saturating_sub(max_width + 1);
        let y = 1.min(area.height.saturating_sub(height));

        let notification_area = Rect::new(x, y, max_width, height);

        let lines: Vec<Line> = self
            .notifications
            .iter()
            .map(|n| {
                let (prefix, color) = match n.level {
                    NotificationLevel::Info => ("ℹ", theme::INFO),
                    NotificationLevel::Success => ("✓", theme::SUCCESS),
                    NotificationLevel::Warning => ("⚠", theme::WARNING),
                    NotificationLevel::Error => ("✗", theme::ERROR),
                };
                Line::from(vec![
                    Span::styled(
                        format!(" {prefix} "),
                        Style::default().fg(color).add_modifier(Modifier::BOLD),
                    ),
                    Span::raw(&n.message),
                ])
            })
            .collect();

        frame.render_widget(Clear, notification_area);
        frame.render_widget(Paragraph::new(lines), notification_area);
    }

    fn render_help_modal(&self, frame: &mut Frame, area: Rect) {
        let modal = centered_rect(60, 70, area);

        let keybindings = [
            ("Navigation:", ""),
            ("→ / l / n", "Next step"),
            ("← / h / b", "Previous step"),
            ("1-9", "Jump to step"),
            ("Home / g", "First step"),
            ("End / G", "Last step"),
            ("r", "Reset demo"),
            ("", ""),
            ("Presentation:", ""),
            ("Space / p", "Play / pause auto-advance"),
            ("s", "Skip typing animation"),
            ("", ""),
            ("Global:", ""),
            ("?", "Toggle this help"),
            ("Esc", "Close help"),
            ("q / Ctrl+C", "Quit"),
        ];

        let mut lines = vec![
            Line::raw(""),
            Line::from(Span::styled(
                " Keybindings",
                Style::default()
                    .fg(theme::ACCENT)
                    .add_modifier(Modifier::BOLD),
            )),
            Line::raw(""),
        ];

        for (key, desc) in &keybindings {
            if key.is_empty() {
                lines.push(Line::raw(""));
            } else if desc.is_empty() {
                lines.push(Line::from(Span::styled(
                    format!("  {key}"),
                    Style::default()
                        .fg(theme::ACCENT)
                        .add_modifier(Modifier::BOLD),
                )));
            } else {
                lines.push(Line::from(vec![
                    Span::raw("  "),
                    Span::styled(
                        format!("{:<14}", key),
                        Style::default()
                            .fg(theme::PRIMARY_LIGHT)
                            .add_modifier(Modifier::BOLD),
                    ),
                    Span::raw(*desc),
                ]));
            }
        }

        lines.push(Line::raw(""));
        lines.push(Line::from(vec![
            Span::raw("  Press "),
            Span::styled(
                "?",
                Style::default()
                    .fg(theme::PRIMARY_LIGHT)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::raw(" or "),
            Span::styled(
                "Esc",
                Style::default()
                    .fg(theme::PRIMARY_LIGHT)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::raw(" to close"),
        ]));

        let block = Block::default()
            .title(" Help ")
            .title_alignment(Alignment::Center)
            .borders(Borders::ALL)
            .border_style(Style::default().fg(theme::ACCENT));

        frame.render_widget(Clear, modal);
        frame.render_widget(Paragraph::new(lines).block(block), modal);
    }
}

/// Calculate a centered rect using percentage of parent area.
pub(super) fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let popup_layout = Layout::vertical([
        Constraint::Percentage((100 - percent_y) / 2),
        Constraint::Percentage(percent_y),
        Constraint::Percentage((100 - percent_y) / 2),
    ])
    .split(area);

    Layout::horizontal([
        Constraint::Percentage((100 - percent_x) / 2),
        Constraint::Percentage(percent_x),
        Constraint::Percentage((100 - percent_x) / 2),
    ])
    .split(popup_layout[1])[1]
}
