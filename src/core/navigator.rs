//! Bounded step index with a derived form snapshot.
//!
//! Every move recomputes `form` as the fold of the immutable step history
//! `steps[0..=current]`, so the snapshot depends only on the step index and
//! never on the path taken to reach it. Going backwards therefore erases
//! fields introduced by later steps. A fresh or reset navigator sits at step
//! 0 with an all-default form until the first move.
//!
//! Out-of-range requests are ignored; no operation fails, even on a script
//! without steps.

use std::sync::Arc;

use super::form::FormData;
use super::script::{Script, Step};

#[derive(Debug, Clone)]
pub struct StepNavigator {
    script: Arc<Script>,
    current: usize,
    form: FormData,
}

impl StepNavigator {
    pub fn new(script: Arc<Script>) -> Self {
        Self {
            script,
            current: 0,
            form: FormData::default(),
        }
    }

    /// Advance one step. Returns `false` (and changes nothing) at the last step.
    pub fn next(&mut self) -> bool {
        if self.current + 1 < self.total_steps() {
            self.move_to(self.current + 1);
            true
        } else {
            false
        }
    }

    /// Retreat one step. Returns `false` (and changes nothing) at step 0.
    pub fn previous(&mut self) -> bool {
        if self.current > 0 {
            self.move_to(self.current - 1);
            true
        } else {
            false
        }
    }

    /// Jump to `step` if it exists. Returns whether the index changed.
    pub fn go_to_step(&mut self, step: usize) -> bool {
        if step >= self.total_steps() {
            log::debug!(
                "Ignoring jump to step {step}; script has {} steps",
                self.total_steps()
            );
            return false;
        }
        let changed = step != self.current;
        self.move_to(step);
        changed
    }

    /// Back to step 0 with an all-default form. Returns whether the index changed.
    pub fn reset(&mut self) -> bool {
        let changed = self.current != 0;
        self.current = 0;
        self.form = FormData::default();
        changed
    }

    fn move_to(&mut self, step: usize) {
        self.current = step;
        let history = self.script.steps.get(..=step).unwrap_or_default();
        self.form = FormData::fold(history);
    }

    pub fn current_step(&self) -> usize {
        self.current
    }

    pub fn total_steps(&self) -> usize {
        self.script.len()
    }

    /// Record for the current step.
    pub fn step(&self) -> Option<&Step> {
        self.script.get(self.current)
    }

    pub fn script(&self) -> &Script {
        &self.script
    }

    pub fn form_data(&self) -> &FormData {
        &self.form
    }

    pub fn can_go_next(&self) -> bool {
        self.current + 1 < self.total_steps()
    }

    pub fn can_go_previous(&self) -> bool {
        self.current > 0
    }

    pub fn is_last(&self) -> bool {
        !self.can_go_next()
    }

    /// Fraction of the walkthrough reached, in `(0, 1]`.
    pub fn progress(&self) -> f64 {
        (self.current + 1) as f64 / self.total_steps().max(1) as f64
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::form::FormPatch;

    /// Three steps patching `rack_price` (a) and `tax` (b):
    /// `[{a:1}, {b:2}, {a:3}]`.
    fn abc_script() -> Arc<Script> {
        let patch = |a: Option<f64>, b: Option<f64>| FormPatch {
            rack_price: a,
            tax: b,
            ..FormPatch::default()
        };
        let steps = vec![
            Step {
                id: 0,
                ui_updates: patch(Some(1.0), None),
                ..Step::default()
            },
            Step {
                id: 1,
                ui_updates: patch(None, Some(2.0)),
                ..Step::default()
            },
            Step {
                id: 2,
                ui_updates: patch(Some(3.0), None),
                ..Step::default()
            },
        ];
        Arc::new(Script {
            title: "abc".into(),
            subtitle: String::new(),
            source_label: String::new(),
            target_label: String::new(),
            terminal_banner: Vec::new(),
            customer_suggestions: Vec::new(),
            steps,
        })
    }

    #[test]
    fn test_go_to_then_previous_reverts_field() {
        let mut nav = StepNavigator::new(abc_script());
        assert!(nav.go_to_step(2));
        assert_eq!(nav.form_data().rack_price, 3.0);
        assert_eq!(nav.form_data().tax, 2.0);

        assert!(nav.previous());
        assert_eq!(nav.current_step(), 1);
        assert_eq!(nav.form_data().rack_price, 1.0);
        assert_eq!(nav.form_data().tax, 2.0);
    }

    #[test]
    fn test_previous_erases_later_fields() {
        let mut nav = StepNavigator::new(abc_script());
        nav.go_to_step(1);
        nav.previous();
        assert_eq!(nav.form_data().tax, 0.0);
    }

    #[test]
    fn test_next_at_end_is_noop() {
        let mut nav = StepNavigator::new(abc_script());
        nav.go_to_step(2);
        let before = nav.form_data().clone();
        assert!(!nav.next());
        assert_eq!(nav.current_step(), 2);
        assert_eq!(nav.form_data(), &before);
    }

    #[test]
    fn test_previous_at_start_is_noop() {
        let mut nav = StepNavigator::new(abc_script());
        let before = nav.form_data().clone();
        assert!(!nav.previous());
        assert_eq!(nav.current_step(), 0);
        assert_eq!(nav.form_data(), &before);
    }

    #[test]
    fn test_out_of_range_jump_ignored() {
        let mut nav = StepNavigator::new(abc_script());
        nav.go_to_step(1);
        assert!(!nav.go_to_step(3));
        assert!(!nav.go_to_step(usize::MAX));
        assert_eq!(nav.current_step(), 1);
    }

    #[test]
    fn test_repeated_jump_is_idempotent() {
        let mut nav = StepNavigator::new(abc_script());
        assert!(nav.go_to_step(2));
        let form = nav.form_data().clone();
        assert!(!nav.go_to_step(2));
        assert_eq!(nav.current_step(), 2);
        assert_eq!(nav.form_data(), &form);
    }

    #[test]
    fn test_reset_restores_initial_state() {
        let initial = StepNavigator::new(abc_script());
        assert_eq!(initial.form_data(), &FormData::default());
        let mut nav = initial.clone();
        nav.go_to_step(2);
        assert!(nav.reset());
        assert_eq!(nav.current_step(), 0);
        assert_eq!(nav.form_data(), &FormData::default());
        assert_eq!(nav.form_data(), initial.form_data());
        assert!(!nav.reset());
    }

    #[test]
    fn test_reset_clears_first_step_fields() {
        let mut nav = StepNavigator::new(abc_script());
        nav.go_to_step(0);
        assert_eq!(nav.form_data().rack_price, 1.0);
        nav.reset();
        assert_eq!(nav.form_data().rack_price, 0.0);
    }

    #[test]
    fn test_empty_script_never_panics() {
        let mut empty = (*abc_script()).clone();
        empty.steps.clear();
        let mut nav = StepNavigator::new(Arc::new(empty));

        assert!(!nav.reset());
        assert!(!nav.next());
        assert!(!nav.previous());
        assert!(!nav.go_to_step(0));
        assert_eq!(nav.current_step(), 0);
        assert!(nav.step().is_none());
        assert_eq!(nav.form_data(), &FormData::default());
        assert!(!nav.can_go_next());
        assert!(nav.progress() > 0.0);
    }

    #[test]
    fn test_progress_and_bounds() {
        let mut nav = StepNavigator::new(abc_script());
        assert!(!nav.can_go_previous());
        assert!(nav.can_go_next());
        assert!((nav.progress() - 1.0 / 3.0).abs() < 1e-9);
        nav.go_to_step(2);
        assert!(nav.is_last());
        assert!((nav.progress() - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_step_record_follows_index() {
        let mut nav = StepNavigator::new(abc_script());
        nav.next();
        assert_eq!(nav.step().map(|s| s.id), Some(1));
    }
}
