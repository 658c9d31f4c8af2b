//! Property-based tests for the showcase core
//!
//! Property tests verify invariants that should hold for all inputs, rather
//! than testing specific cases.
//!
//! ## Running Property Tests
//!
//! ```sh
//! cargo test property --release
//! ```
//!
//! ## Test Modules
//!
//! - `navigator_props`: step navigation over arbitrary scripts
//!   - The form at step n is the fold of patches 0..=n, whatever the path
//!   - Repeating a jump changes nothing
//!   - Reset always returns to the initial state
//!   - The step index never leaves the script
//!
//! - `reveal_props`: the directional typewriter
//!   - Forward extensions only ever type the new tail
//!   - Going backward emits no frames
//!   - Unrelated text is retyped from empty
//!   - Every frame is a prefix of the target
//!   - Total duration is the sum of per-character delays
//!
//! ## Configuration
//!
//! By default, proptest runs 256 cases per property:
//!
//! ```sh
//! PROPTEST_CASES=1000 cargo test property --release
//! ```

mod navigator_props;
mod reveal_props;
