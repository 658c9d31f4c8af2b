/// Events flowing through the Elm-architecture event loop.
#[derive(Debug, Clone)]
pub enum AppEvent {
    /// Periodic tick for playback, notification TTLs, etc.
    Tick,
    /// Raw terminal input (keyboard/mouse).
    Input(crossterm::event::Event),
    /// One character of a running reveal landed.
    RevealFrame(RevealFrame),
    /// A resolved action to execute.
    Action(Action),
    /// Notification to display to the user.
    Notification(Notification),
    /// Request to quit the application.
    Quit,
}

/// High-level actions dispatched by the input mapper.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    // Navigation
    NextStep,
    PreviousStep,
    GoToStep(usize),
    FirstStep,
    LastStep,
    Reset,

    // Presentation
    TogglePlay,
    SkipAnimation,

    // Modals
    ShowHelp,
    CloseHelp,

    // Application
    Quit,
}

/// Text region animated by its own revealer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RevealTarget {
    /// Transcript in the legacy terminal pane.
    Terminal,
    /// Explanation banner in the code pane.
    Explanation,
    /// Customer ID field in the modern form pane.
    CustomerId,
}

impl RevealTarget {
    pub const ALL: [RevealTarget; 3] = [
        RevealTarget::Terminal,
        RevealTarget::Explanation,
        RevealTarget::CustomerId,
    ];

    pub fn label(self) -> &'static str {
        match self {
            RevealTarget::Terminal => "terminal",
            RevealTarget::Explanation => "explanation",
            RevealTarget::CustomerId => "customer-id",
        }
    }
}

/// Text emitted by a reveal task after appending a character.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RevealFrame {
    pub target: RevealTarget,
    /// Generation of the revealer that started the task.
    pub generation: u64,
    pub text: String,
    /// Last frame of this reveal.
    pub finished: bool,
}

/// Notification level for the overlay system.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationLevel {
    Info,
    Success,
    Warning,
    Error,
}

/// A timed notification shown in the overlay.
#[derive(Debug, Clone)]
pub struct Notification {
    pub id: u64,
    pub message: String,
    pub level: NotificationLevel,
    /// Ticks remaining before auto-dismiss.
    pub ttl_ticks: u32,
}

impl Notification {
    /// Build a notification; the id is assigned by `AppState`.
    pub fn new(message: impl Into<String>, level: NotificationLevel) -> Self {
        Self {
            id: 0,
            message: message.into(),
            level,
            ttl_ticks: 60,
        }
    }
}
