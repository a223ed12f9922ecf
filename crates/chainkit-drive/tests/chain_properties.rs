//! Property-based tests for the chain solver.
//!
//! Layouts are two open-belt sprockets at a random bearing, far enough apart
//! that every arc of contact holds at least two pitches of chain.

use chainkit_drive::{
    pitch_circumference, pitch_radius, solve, ChainDimensions, ChainError, ChainSpec, Point3,
};
use proptest::prelude::*;
use std::f64::consts::TAU;

/// Two sprockets wrapped the same way, with chain pitch
fn arb_open_pair() -> impl Strategy<Value = ChainSpec> {
    (
        9u32..=40,
        9u32..=40,
        5.0..30.0f64,
        0.05..3.0f64,
        0.0..TAU,
        prop::array::uniform3(-500.0..500.0f64),
        any::<bool>(),
    )
        .prop_map(|(teeth_a, teeth_b, pitch, spread, bearing, [x, y, z], wrap)| {
            let r_a = pitch_radius(teeth_a, pitch).unwrap();
            let r_b = pitch_radius(teeth_b, pitch).unwrap();
            let separation = (r_a + r_b) * (1.0 + spread);
            let a = Point3::new(x, y, z);
            let b = Point3::new(
                x + separation * bearing.cos(),
                y + separation * bearing.sin(),
                z,
            );
            ChainSpec::from_lists(
                &[teeth_a, teeth_b],
                &[a, b],
                &[wrap, wrap],
                ChainDimensions::with_pitch(pitch, pitch * 0.6),
            )
            .unwrap()
        })
}

proptest! {
    #[test]
    fn circumference_is_two_pi_radius(teeth in 3u32..500, pitch in 0.5..100.0f64) {
        let r = pitch_radius(teeth, pitch).unwrap();
        let c = pitch_circumference(teeth, pitch).unwrap();
        prop_assert!((c - TAU * r).abs() <= 1e-9 * c);
        // the polygon of rollers is inscribed in the pitch circle
        prop_assert!(c > teeth as f64 * pitch);
    }

    #[test]
    fn roller_count_is_whole_links(spec in arb_open_pair()) {
        let solution = solve(&spec).unwrap();
        let links = solution.total_path_length() / spec.chain_pitch();
        prop_assert_eq!(solution.roller_count(), links.floor() as usize);
        prop_assert!(solution.roller_count() >= 1);
        prop_assert_eq!(solution.roller_positions().len(), solution.roller_count());
        prop_assert_eq!(solution.sprocket_rotation_offsets().len(), 2);
    }

    #[test]
    fn rollers_are_at_most_one_pitch_apart(spec in arb_open_pair()) {
        let solution = solve(&spec).unwrap();
        let pitch = spec.chain_pitch();
        for pair in solution.roller_positions().windows(2) {
            let gap = (pair[1] - pair[0]).norm();
            prop_assert!(gap <= pitch * (1.0 + 1e-9));
        }
    }

    #[test]
    fn rollers_stay_at_first_sprocket_height(spec in arb_open_pair()) {
        let solution = solve(&spec).unwrap();
        let z = spec.sprockets()[0].center.z;
        for p in solution.roller_positions() {
            prop_assert!((p.z - z).abs() < 1e-9);
        }
    }

    #[test]
    fn solving_is_idempotent(spec in arb_open_pair()) {
        prop_assert_eq!(solve(&spec).unwrap(), solve(&spec).unwrap());
    }

    #[test]
    fn roller_must_fit_pitch(pitch in 1.0..50.0f64, excess in 0.0..10.0f64) {
        let result = ChainSpec::from_lists(
            &[12, 12],
            &[Point3::origin(), Point3::new(200.0, 0.0, 0.0)],
            &[true, true],
            ChainDimensions::with_pitch(pitch, pitch + excess),
        );
        let is_roller_error = matches!(result, Err(ChainError::RollerTooLargeForPitch { .. }));
        prop_assert!(is_roller_error);
    }
}
