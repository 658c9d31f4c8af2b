//! Runs [`Typewriter`]s as cancellable tokio tasks.
//!
//! Each animated text region owns one [`PaneReveal`], which in turn owns at
//! most one live task. Starting a new reveal cancels the previous task before
//! the next one is spawned, and dropping the pane cancels whatever is still
//! running. Frames travel back through the app event channel tagged with
//! the revealer generation, so a frame queued just before cancellation is
//! discarded by [`Revealer::apply_frame`].

use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

use crate::core::reveal::{RevealPacing, RevealPlan, Revealer, Typewriter};

use super::events::{AppEvent, RevealFrame, RevealTarget};

/// Handle to a running reveal task. Dropping it cancels the task.
#[derive(Debug)]
pub struct RevealHandle {
    token: CancellationToken,
    join: JoinHandle<()>,
}

impl RevealHandle {
    pub fn cancel(&self) {
        self.token.cancel();
        self.join.abort();
    }

    pub fn is_finished(&self) -> bool {
        self.join.is_finished()
    }
}

impl Drop for RevealHandle {
    fn drop(&mut self) {
        self.cancel();
    }
}

/// Spawn a task that types `typewriter` out, one frame per character.
pub fn spawn_reveal(
    target: RevealTarget,
    mut typewriter: Typewriter,
    tx: mpsc::UnboundedSender<AppEvent>,
) -> RevealHandle {
    let token = CancellationToken::new();
    let cancelled = token.clone();
    let generation = typewriter.generation();

    let join = tokio::spawn(async move {
        tracing::trace!(
            pane = target.label(),
            generation,
            chars = typewriter.remaining_chars(),
            "reveal started"
        );
        while let Some(delay) = typewriter.next_delay() {
            tokio::select! {
                biased;
                _ = cancelled.cancelled() => {
                    tracing::trace!(pane = target.label(), generation, "reveal cancelled");
                    return;
                }
                _ = tokio::time::sleep(delay) => {}
            }

            typewriter.advance();
            let frame = RevealFrame {
                target,
                generation,
                text: typewriter.buffer().to_string(),
                finished: typewriter.is_done(),
            };
            if tx.send(AppEvent::RevealFrame(frame)).is_err() {
                // Receiver gone: the app is shutting down.
                return;
            }
        }
        tracing::trace!(pane = target.label(), generation, "reveal finished");
    });

    RevealHandle { token, join }
}

/// Revealer plus its (optional) running task for one text region.
pub struct PaneReveal {
    target: RevealTarget,
    revealer: Revealer,
    animate: bool,
    task: Option<RevealHandle>,
    tx: mpsc::UnboundedSender<AppEvent>,
}

impl PaneReveal {
    pub fn new(
        target: RevealTarget,
        pacing: RevealPacing,
        animate: bool,
        tx: mpsc::UnboundedSender<AppEvent>,
    ) -> Self {
        Self {
            target,
            revealer: Revealer::new(pacing),
            animate,
            task: None,
            tx,
        }
    }

    /// Move to `step`, whose text for this region is `text`.
    ///
    /// Must be called from within a tokio runtime when animation is on.
    pub fn show(&mut self, step: usize, text: Option<&str>) {
        match self.revealer.update(step, text) {
            RevealPlan::Unchanged => {}
            RevealPlan::Snapped => self.cancel_task(),
            RevealPlan::Start(typewriter) => {
                self.cancel_task();
                if self.animate {
                    self.task = Some(spawn_reveal(self.target, typewriter, self.tx.clone()));
                } else {
                    self.revealer.complete();
                }
            }
        }
    }

    /// Apply a frame addressed to this region. Returns whether it was current.
    pub fn apply_frame(&mut self, frame: &RevealFrame) -> bool {
        let applied = self
            .revealer
            .apply_frame(frame.generation, &frame.text, frame.finished);
        if applied && frame.finished {
            self.task = None;
        }
        applied
    }

    /// Finish the running reveal at once. Returns whether one was running.
    pub fn skip(&mut self) -> bool {
        let was_running = self.revealer.complete();
        self.cancel_task();
        was_running
    }

    fn cancel_task(&mut self) {
        if let Some(handle) = self.task.take() {
            handle.cancel();
        }
    }

    pub fn target(&self) -> RevealTarget {
        self.target
    }

    pub fn displayed(&self) -> &str {
        self.revealer.displayed()
    }

    pub fn is_revealing(&self) -> bool {
        self.revealer.is_revealing()
    }

    /// Whether a task is currently attached.
    pub fn has_task(&self) -> bool {
        self.task.is_some()
    }

    pub fn revealer(&self) -> &Revealer {
        &self.revealer
    }
}
