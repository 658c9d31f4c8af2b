//! Property-based tests for the Incremental Text Revealer
//!
//! Tests invariants:
//! - Forward extensions type exactly the new tail
//! - Backward moves snap with zero frames
//! - Unrelated text is retyped from empty
//! - Frames are prefixes of the target, growing one character at a time
//! - Total duration equals the sum of per-character delays

use std::time::Duration;

use proptest::prelude::*;

use crate::core::reveal::{RevealPacing, RevealPlan, Revealer};

// ============================================================================
// Strategies for generating test inputs
// ============================================================================

/// Printable text with occasional newlines and non-ASCII characters.
fn arb_text() -> impl Strategy<Value = String> {
    "[a-zA-Z0-9 :$.,é█\n]{0,60}"
}

fn arb_pacing() -> impl Strategy<Value = RevealPacing> {
    (1u64..50, 0u64..300).prop_map(|(ms, pause)| RevealPacing::line_oriented(ms, pause))
}

/// Run a plan to completion, returning every frame.
fn drain(revealer: &mut Revealer, plan: RevealPlan) -> Vec<String> {
    let mut frames = Vec::new();
    if let RevealPlan::Start(mut tw) = plan {
        while tw.advance().is_some() {
            let finished = tw.is_done();
            revealer.apply_frame(tw.generation(), tw.buffer(), finished);
            frames.push(tw.buffer().to_string());
        }
    }
    frames
}

// ============================================================================
// Property Tests
// ============================================================================

proptest! {
    /// Property: when the new text extends the old, only the suffix is typed
    #[test]
    fn prop_forward_extension_types_suffix(
        base in arb_text(),
        tail in arb_text(),
        pacing in arb_pacing()
    ) {
        let mut r = Revealer::new(pacing);
        let plan = r.update(0, Some(&base));
        drain(&mut r, plan);

        let full = format!("{base}{tail}");
        let plan = r.update(1, Some(&full));
        let frames = drain(&mut r, plan);

        prop_assert_eq!(frames.len(), tail.chars().count());
        for frame in &frames {
            prop_assert!(frame.starts_with(&base));
        }
        prop_assert_eq!(r.displayed(), full.as_str());
        prop_assert!(!r.is_revealing());
    }

    /// Property: each frame adds exactly one character and stays a prefix
    #[test]
    fn prop_frames_grow_by_one_char(text in arb_text(), pacing in arb_pacing()) {
        let mut r = Revealer::new(pacing);
        let plan = r.update(0, Some(&text));
        let frames = drain(&mut r, plan);

        let mut previous = 0;
        for frame in &frames {
            prop_assert!(text.starts_with(frame.as_str()));
            prop_assert_eq!(frame.chars().count(), previous + 1);
            previous += 1;
        }
        prop_assert_eq!(r.displayed(), text.as_str());
    }

    /// Property: moving backward never produces frames
    #[test]
    fn prop_backward_is_instant(
        texts in prop::collection::vec(arb_text(), 2..6),
        back in 0usize..5
    ) {
        let mut r = Revealer::new(RevealPacing::per_char(30));
        for (step, text) in texts.iter().enumerate() {
            let plan = r.update(step, Some(text));
            drain(&mut r, plan);
        }
        let target = back % (texts.len() - 1);
        let plan = r.update(target, Some(&texts[target]));
        prop_assert_eq!(plan, RevealPlan::Snapped);
        prop_assert_eq!(r.displayed(), texts[target].as_str());
        prop_assert!(!r.is_revealing());
    }

    /// Property: text that does not extend the display is retyped in full
    #[test]
    fn prop_discontinuity_retypes(
        first in "[a-m]{1,20}",
        second in "[n-z]{1,20}"
    ) {
        let mut r = Revealer::new(RevealPacing::per_char(30));
        let plan = r.update(0, Some(&first));
        drain(&mut r, plan);

        let plan = r.update(1, Some(&second));
        prop_assert_eq!(r.displayed(), "");
        let frames = drain(&mut r, plan);
        prop_assert_eq!(frames.len(), second.chars().count());
        prop_assert_eq!(frames.first().map(|f| f.chars().count()), Some(1));
    }

    /// Property: the revealer never reports typing once it has settled, and
    /// when settled shows exactly its target
    #[test]
    fn prop_settled_shows_target(
        texts in prop::collection::vec(arb_text(), 1..6),
        order in prop::collection::vec(0usize..6, 1..12)
    ) {
        let mut r = Revealer::new(RevealPacing::per_char(10));
        for i in order {
            let step = i % texts.len();
            let plan = r.update(step, Some(&texts[step]));
            drain(&mut r, plan);
            prop_assert!(!r.is_revealing());
            prop_assert_eq!(r.displayed(), r.target());
        }
    }

    /// Property: total duration is the sum of the per-character delays
    #[test]
    fn prop_total_duration_is_sum_of_delays(text in arb_text(), pacing in arb_pacing()) {
        let mut r = Revealer::new(pacing);
        if let RevealPlan::Start(mut tw) = r.update(0, Some(&text)) {
            let expected = tw.total_duration();
            let mut sum = Duration::ZERO;
            while let Some(delay) = tw.next_delay() {
                sum += delay;
                tw.advance();
            }
            prop_assert_eq!(sum, expected);

            let newlines = text.chars().rev().skip(1).filter(|&c| c == '\n').count() as u32;
            let chars = text.chars().count() as u32;
            prop_assert_eq!(
                expected,
                pacing.char_interval * chars + pacing.line_pause * newlines
            );
        } else {
            prop_assert!(text.is_empty());
        }
    }
}
