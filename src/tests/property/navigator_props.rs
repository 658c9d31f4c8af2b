//! Property-based tests for the Step Navigator
//!
//! Tests invariants:
//! - Form data depends only on the step index (path independence)
//! - Repeated jumps are idempotent
//! - Reset restores the all-default initial state from anywhere
//! - The index stays within the script

use std::sync::Arc;

use proptest::prelude::*;

use crate::core::form::{FormData, FormPatch};
use crate::core::navigator::StepNavigator;
use crate::core::script::{Script, Step};

// ============================================================================
// Strategies for generating test inputs
// ============================================================================

fn arb_patch() -> impl Strategy<Value = FormPatch> {
    (
        prop::option::of("CUST[0-9]{3}"),
        prop::option::of("[A-Z][a-z]{2,10}"),
        prop::option::of(0.0f64..10.0),
        prop::option::of(0.0f64..1000.0),
        prop::option::of(0.0f64..10_000.0),
        prop::option::of(0u32..20_000),
        prop::option::of(0u32..5_000),
    )
        .prop_map(
            |(customer_id, customer_name, rack_price, tax, total, inventory, gallons)| FormPatch {
                customer_id,
                customer_name,
                rack_price,
                tax,
                total,
                inventory,
                gallons,
            },
        )
}

/// A script of 1..12 steps with random patches.
fn arb_script() -> impl Strategy<Value = Arc<Script>> {
    prop::collection::vec(arb_patch(), 1..12).prop_map(|patches| {
        let steps = patches
            .into_iter()
            .enumerate()
            .map(|(id, ui_updates)| Step {
                id,
                ui_updates,
                ..Step::default()
            })
            .collect();
        Arc::new(Script {
            title: "generated".into(),
            subtitle: String::new(),
            source_label: "Legacy".into(),
            target_label: "Modern".into(),
            terminal_banner: Vec::new(),
            customer_suggestions: Vec::new(),
            steps,
        })
    })
}

#[derive(Debug, Clone)]
enum Op {
    Next,
    Previous,
    GoTo(usize),
    Reset,
}

fn arb_op() -> impl Strategy<Value = Op> {
    prop_oneof![
        3 => Just(Op::Next),
        3 => Just(Op::Previous),
        3 => (0usize..16).prop_map(Op::GoTo),
        1 => Just(Op::Reset),
    ]
}

/// Apply `op`; returns whether the navigator moved to a step (and so folded
/// its history) rather than staying put or resetting.
fn apply(nav: &mut StepNavigator, op: &Op) -> bool {
    match *op {
        Op::Next => nav.next(),
        Op::Previous => nav.previous(),
        Op::GoTo(n) => {
            nav.go_to_step(n);
            n < nav.total_steps()
        }
        Op::Reset => {
            nav.reset();
            false
        }
    }
}

// ============================================================================
// Property Tests
// ============================================================================

proptest! {
    /// Property: once the navigator has moved, the form equals the fold of
    /// patches up to the current step; before that it is all-default
    #[test]
    fn prop_form_is_fold_of_history(
        script in arb_script(),
        ops in prop::collection::vec(arb_op(), 0..40)
    ) {
        let mut nav = StepNavigator::new(script.clone());
        let mut moved = false;
        for op in &ops {
            if matches!(op, Op::Reset) {
                moved = false;
            }
            moved |= apply(&mut nav, op);
            let expected = if moved {
                FormData::fold(&script.steps[..=nav.current_step()])
            } else {
                FormData::default()
            };
            prop_assert_eq!(nav.form_data(), &expected);
        }
    }

    /// Property: the index never leaves 0..total
    #[test]
    fn prop_index_in_bounds(
        script in arb_script(),
        ops in prop::collection::vec(arb_op(), 0..40)
    ) {
        let mut nav = StepNavigator::new(script);
        for op in &ops {
            apply(&mut nav, op);
            prop_assert!(nav.current_step() < nav.total_steps());
        }
    }

    /// Property: go_to_step(n) twice equals go_to_step(n) once
    #[test]
    fn prop_jump_idempotent(script in arb_script(), n in 0usize..16) {
        let mut once = StepNavigator::new(script.clone());
        once.go_to_step(n);
        let mut twice = once.clone();
        prop_assert!(!twice.go_to_step(n));
        prop_assert_eq!(once.current_step(), twice.current_step());
        prop_assert_eq!(once.form_data(), twice.form_data());
    }

    /// Property: reset restores the all-default initial state regardless of
    /// history
    #[test]
    fn prop_reset_restores_initial(
        script in arb_script(),
        ops in prop::collection::vec(arb_op(), 0..40)
    ) {
        let initial = StepNavigator::new(script.clone());
        let mut nav = StepNavigator::new(script);
        for op in &ops {
            apply(&mut nav, op);
        }
        nav.reset();
        prop_assert_eq!(nav.current_step(), 0);
        prop_assert_eq!(nav.form_data(), &FormData::default());
        prop_assert_eq!(nav.form_data(), initial.form_data());
    }

    /// Property: next at the end and previous at the start are no-ops
    #[test]
    fn prop_bounds_are_noops(script in arb_script()) {
        let mut nav = StepNavigator::new(script);
        let start = nav.form_data().clone();
        prop_assert!(!nav.previous());
        prop_assert_eq!(nav.form_data(), &start);

        let last = nav.total_steps() - 1;
        nav.go_to_step(last);
        let end = nav.form_data().clone();
        prop_assert!(!nav.next());
        prop_assert_eq!(nav.current_step(), last);
        prop_assert_eq!(nav.form_data(), &end);
    }
}
