//! Observable properties of recorded quicksort traces.
//!
//! Each property is stated against what a renderer sees: the first and last
//! steps, the length of every snapshot, consecutive-step distinctness, swap-only movement, and
//! where the pivot marker points while a partition pass is running.

use proptest::prelude::*;
use sortscope_core::{check_trace, is_sorted, same_multiset, Step, Value};
use sortscope_trace::quicksort::{generate_trace, generate_trace_with_stats};

fn arb_input() -> impl Strategy<Value = Vec<Value>> {
    prop::collection::vec((1u32..=1000).prop_map(f64::from), 0..=32)
}

/// Inputs with many repeats exercise the `<=` branch.
fn arb_dupes() -> impl Strategy<Value = Vec<Value>> {
    prop::collection::vec((0u32..=3).prop_map(f64::from), 0..=24)
}

#[test]
fn four_element_example_endpoints() {
    let trace = generate_trace(&[5.0, 3.0, 8.0, 1.0]);
    assert_eq!(trace.first(), Some(&Step::plain(&[5.0, 3.0, 8.0, 1.0])));
    assert_eq!(trace.last(), Some(&Step::plain(&[1.0, 3.0, 5.0, 8.0])));
    assert_eq!(trace, generate_trace(&[5.0, 3.0, 8.0, 1.0]));
}

#[test]
fn fractional_and_negative_values() {
    let input = [0.5, -2.25, 3.0, -2.25, 1e-9];
    let trace = generate_trace(&input);
    check_trace(&input, &trace).unwrap();
    assert_eq!(
        trace.last().unwrap().values,
        vec![-2.25, -2.25, 1e-9, 0.5, 3.0]
    );
}

#[test]
fn degenerate_inputs_are_single_steps() {
    assert_eq!(generate_trace(&[]), vec![Step::plain(&[])]);
    assert_eq!(generate_trace(&[42.0]), vec![Step::plain(&[42.0])]);
}

#[test]
fn steps_are_independent_snapshots() {
    let mut trace = generate_trace(&[3.0, 1.0, 2.0]);
    let before = trace[0].clone();
    // Mutating a later snapshot must not leak into earlier ones.
    let last = trace.len() - 1;
    trace[last].values[0] = 99.0;
    assert_eq!(trace[0], before);
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 64,
        .. ProptestConfig::default()
    })]

    #[test]
    fn final_step_is_sorted_permutation(input in arb_input()) {
        let trace = generate_trace(&input);
        let last = trace.last().unwrap();
        prop_assert!(is_sorted(&last.values));
        prop_assert!(same_multiset(&last.values, &input));
        prop_assert!(!last.has_metadata());
    }

    #[test]
    fn first_step_is_raw_input(input in arb_input()) {
        let trace = generate_trace(&input);
        prop_assert_eq!(&trace[0], &Step::plain(&input));
    }

    #[test]
    fn no_consecutive_repeats(input in arb_dupes()) {
        let trace = generate_trace(&input);
        for pair in trace.windows(2) {
            prop_assert!(!pair[0].is_identical(&pair[1]));
        }
    }

    #[test]
    fn elements_move_only_by_swaps(input in arb_dupes()) {
        let trace = generate_trace(&input);
        for step in &trace {
            prop_assert!(same_multiset(&step.values, &input));
        }
        for pair in trace.windows(2) {
            let changed = pair[0]
                .values
                .iter()
                .zip(&pair[1].values)
                .filter(|(a, b)| a.to_bits() != b.to_bits())
                .count();
            prop_assert!(changed == 0 || changed == 2, "{} -> {}", pair[0], pair[1]);
        }
    }

    #[test]
    fn checker_accepts_every_recording(input in arb_dupes()) {
        let trace = generate_trace(&input);
        prop_assert!(check_trace(&input, &trace).is_ok());
    }

    #[test]
    fn recording_is_deterministic(input in arb_input()) {
        prop_assert_eq!(generate_trace(&input), generate_trace(&input));
    }

    #[test]
    fn every_step_keeps_input_length(input in arb_input()) {
        for step in generate_trace(&input) {
            prop_assert_eq!(step.values.len(), input.len());
        }
    }

    #[test]
    fn comparisons_cover_every_element(input in arb_input()) {
        prop_assume!(input.len() >= 2);
        let (trace, stats) = generate_trace_with_stats(&input);
        let n = input.len();
        let comparing = trace.iter().filter(|s| s.comparing_indices.is_some()).count();
        prop_assert!(comparing >= n - 1);
        prop_assert!(stats.comparisons >= (n - 1) as u64);
    }

    #[test]
    fn pivot_marker_tracks_live_pivot(input in arb_dupes()) {
        // During a comparison the pivot still sits at the marked index, so
        // its value matches the value announced at pass start.
        let trace = generate_trace(&input);
        let mut announced: Option<Value> = None;
        for step in &trace {
            match (step.pivot_index, &step.comparing_indices) {
                (Some(p), None) if announced.is_none() => announced = Some(step.values[p]),
                (Some(p), Some(c)) => {
                    prop_assert_eq!(Some(step.values[p]), announced);
                    prop_assert_eq!(c.len(), 2);
                    prop_assert_eq!(c[1], p);
                    prop_assert!(c[0] < p);
                }
                (Some(p), None) => {
                    // Partition complete: the pivot value moved to `p`.
                    prop_assert_eq!(Some(step.values[p]), announced);
                    announced = None;
                }
                (None, _) => {}
            }
        }
    }
}
