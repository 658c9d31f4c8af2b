//! Incremental text reveal ("typewriter") with directional awareness.
//!
//! [`Revealer`] decides what a pane shows when the step changes:
//!
//! - **backward**: snap to the step's text at once, no animation;
//! - **forward**: if the new text extends what is already on screen, type
//!   only the new tail; otherwise clear and type the whole text;
//! - **same step**: leave everything, including an in-flight reveal, alone.
//!
//! Starting a reveal yields a [`Typewriter`], the explicit state of the
//! cooperative task that appends one character per tick. The revealer does
//! not own a timer; the caller runs the typewriter and feeds frames back via
//! [`Revealer::apply_frame`]. Every new reveal bumps a generation counter, so
//! frames from a superseded typewriter are rejected even if they were already
//! queued when it was cancelled.

use std::time::Duration;

/// Per-character timing of a reveal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RevealPacing {
    /// Delay before each character appears.
    pub char_interval: Duration,
    /// Extra delay before the first character of a new line.
    pub line_pause: Duration,
}

impl RevealPacing {
    pub const fn per_char(char_ms: u64) -> Self {
        Self {
            char_interval: Duration::from_millis(char_ms),
            line_pause: Duration::ZERO,
        }
    }

    pub const fn line_oriented(char_ms: u64, line_pause_ms: u64) -> Self {
        Self {
            char_interval: Duration::from_millis(char_ms),
            line_pause: Duration::from_millis(line_pause_ms),
        }
    }

    /// Delay before the next character, given the last character on screen.
    pub fn delay_after(&self, last: Option<char>) -> Duration {
        match last {
            Some('\n') => self.char_interval + self.line_pause,
            _ => self.char_interval,
        }
    }
}

/// State of one running reveal: `buffer` grows by one character of
/// `remaining` per [`advance`](Typewriter::advance).
#[derive(Debug, Clone, PartialEq)]
pub struct Typewriter {
    generation: u64,
    buffer: String,
    remaining: Vec<char>,
    position: usize,
    pacing: RevealPacing,
}

impl Typewriter {
    fn new(generation: u64, base: String, suffix: &str, pacing: RevealPacing) -> Self {
        Self {
            generation,
            buffer: base,
            remaining: suffix.chars().collect(),
            position: 0,
            pacing,
        }
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Text revealed so far, including the untouched prefix.
    pub fn buffer(&self) -> &str {
        &self.buffer
    }

    pub fn is_done(&self) -> bool {
        self.position >= self.remaining.len()
    }

    /// Characters still to be typed.
    pub fn remaining_chars(&self) -> usize {
        self.remaining.len() - self.position
    }

    /// How long to wait before the next character, or `None` when done.
    pub fn next_delay(&self) -> Option<Duration> {
        if self.is_done() {
            None
        } else {
            Some(self.pacing.delay_after(self.buffer.chars().next_back()))
        }
    }

    /// Append the next character. Returns it, or `None` when done.
    pub fn advance(&mut self) -> Option<char> {
        let ch = *self.remaining.get(self.position)?;
        self.buffer.push(ch);
        self.position += 1;
        Some(ch)
    }

    /// Time the rest of the reveal takes if never interrupted.
    pub fn total_duration(&self) -> Duration {
        let mut last = self.buffer.chars().next_back();
        let mut total = Duration::ZERO;
        for &ch in &self.remaining[self.position..] {
            total += self.pacing.delay_after(last);
            last = Some(ch);
        }
        total
    }

    /// Run to completion without waiting and return the final text.
    pub fn finish(mut self) -> String {
        while self.advance().is_some() {}
        self.buffer
    }
}

/// What the caller must do after [`Revealer::update`].
#[derive(Debug, Clone, PartialEq)]
pub enum RevealPlan {
    /// Same step: keep any running reveal going.
    Unchanged,
    /// The displayed text was set directly; cancel any running reveal.
    Snapped,
    /// Cancel any running reveal, then run this typewriter.
    Start(Typewriter),
}

/// Directional reveal state for one pane.
#[derive(Debug, Clone)]
pub struct Revealer {
    pacing: RevealPacing,
    displayed: String,
    target: String,
    is_revealing: bool,
    last_step: Option<usize>,
    generation: u64,
}

impl Revealer {
    pub fn new(pacing: RevealPacing) -> Self {
        Self {
            pacing,
            displayed: String::new(),
            target: String::new(),
            is_revealing: false,
            last_step: None,
            generation: 0,
        }
    }

    /// React to the navigator moving to `step`, whose text is `target`.
    ///
    /// `target` is `None` when no step record exists; the revealer then
    /// falls back to its empty "no step selected" state.
    pub fn update(&mut self, step: usize, target: Option<&str>) -> RevealPlan {
        let Some(target) = target else {
            self.generation += 1;
            self.displayed.clear();
            self.target.clear();
            self.is_revealing = false;
            self.last_step = None;
            return RevealPlan::Snapped;
        };

        match self.last_step {
            Some(prev) if step == prev => RevealPlan::Unchanged,
            Some(prev) if step < prev => {
                self.generation += 1;
                self.last_step = Some(step);
                self.target = target.to_string();
                self.displayed = target.to_string();
                self.is_revealing = false;
                RevealPlan::Snapped
            }
            _ => self.start_forward(step, target),
        }
    }

    fn start_forward(&mut self, step: usize, target: &str) -> RevealPlan {
        self.generation += 1;
        self.last_step = Some(step);
        self.target = target.to_string();

        let base = if target.starts_with(self.displayed.as_str()) {
            std::mem::take(&mut self.displayed)
        } else {
            String::new()
        };
        let suffix = &target[base.len()..];

        if suffix.is_empty() {
            self.displayed = base;
            self.is_revealing = false;
            return RevealPlan::Snapped;
        }

        self.displayed = base.clone();
        self.is_revealing = true;
        RevealPlan::Start(Typewriter::new(self.generation, base, suffix, self.pacing))
    }

    /// Apply a frame from a running typewriter.
    ///
    /// Returns `false` if the frame belongs to a superseded reveal.
    pub fn apply_frame(&mut self, generation: u64, text: &str, finished: bool) -> bool {
        if generation != self.generation || !self.is_revealing {
            return false;
        }
        debug_assert!(self.target.starts_with(text));
        self.displayed.clear();
        self.displayed.push_str(text);
        if finished {
            self.is_revealing = false;
        }
        true
    }

    /// Jump a running reveal to its end. Returns whether one was running.
    pub fn complete(&mut self) -> bool {
        if !self.is_revealing {
            return false;
        }
        self.generation += 1;
        self.displayed.clone_from(&self.target);
        self.is_revealing = false;
        true
    }

    pub fn displayed(&self) -> &str {
        &self.displayed
    }

    /// Full text of the step the revealer is on.
    pub fn target(&self) -> &str {
        &self.target
    }

    pub fn is_revealing(&self) -> bool {
        self.is_revealing
    }

    pub fn last_step(&self) -> Option<usize> {
        self.last_step
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn pacing(&self) -> RevealPacing {
        self.pacing
    }
}
