//! Solve many independent chain layouts at once.
//!
//! With the `parallel` feature the layouts are spread over the rayon
//! thread pool; results keep the order of the inputs either way.

use crate::chain::{solve, ChainSolution, ChainSpec};
use chainkit_core::ChainError;
use tracing::debug;

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// Solve every spec, one result per input in the same order
#[cfg(not(feature = "parallel"))]
pub fn solve_all(specs: &[ChainSpec]) -> Vec<Result<ChainSolution, ChainError>> {
    debug!("Solving {} chain layouts", specs.len());
    specs.iter().map(solve).collect()
}

/// Solve every spec, one result per input in the same order
#[cfg(feature = "parallel")]
pub fn solve_all(specs: &[ChainSpec]) -> Vec<Result<ChainSolution, ChainError>> {
    debug!("Solving {} chain layouts in parallel", specs.len());
    specs.par_iter().map(solve).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chain::ChainDimensions;
    use nalgebra::Point3;

    fn pair(half_span: f64) -> ChainSpec {
        ChainSpec::from_lists(
            &[32, 32],
            &[
                Point3::new(-half_span, 0.0, 0.0),
                Point3::new(half_span, 0.0, 0.0),
            ],
            &[true, false],
            ChainDimensions::default(),
        )
        .unwrap()
    }

    #[test]
    fn test_results_keep_input_order() {
        let specs = vec![pair(127.0), pair(50.0), pair(200.0)];
        let results = solve_all(&specs);

        assert_eq!(results.len(), 3);
        assert!(results[0].is_ok());
        assert!(matches!(
            results[1],
            Err(ChainError::InfeasibleSprocketLayout { .. })
        ));
        let long = results[2].as_ref().unwrap();
        let short = results[0].as_ref().unwrap();
        assert!(long.roller_count() > short.roller_count());
        assert_eq!(*short, solve(&specs[0]).unwrap());
    }

    #[test]
    fn test_empty_batch() {
        assert!(solve_all(&[]).is_empty());
    }
}
