//! Is the average trade really positive, or just lucky?
//!
//! A one-sided Student's t test on per-trade returns (H0: mean = 0,
//! H1: mean > 0). The distribution itself comes from `statrs`.

use statrs::distribution::{ContinuousCDF, StudentsT};

use super::{mean_f64, std_dev, EPSILON};

/// How far the mean trade return sits above zero, in standard errors.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MeanEdge {
    pub t_statistic: f64,
    /// P(T > t) under H0.
    pub p_value: f64,
    pub degrees_of_freedom: f64,
}

/// Test the mean of `returns` against zero.
///
/// `None` for fewer than two returns or a flat sample, where the standard
/// error vanishes and `t` is undefined.
pub fn mean_edge(returns: &[f64]) -> Option<MeanEdge> {
    if returns.len() < 2 {
        return None;
    }
    let n = returns.len() as f64;
    let standard_error = std_dev(returns) / n.sqrt();
    if standard_error < EPSILON {
        return None;
    }

    let t_statistic = mean_f64(returns) / standard_error;
    let degrees_of_freedom = n - 1.0;
    let distribution = StudentsT::new(0.0, 1.0, degrees_of_freedom).ok()?;
    let p_value = (1.0 - distribution.cdf(t_statistic)).clamp(0.0, 1.0);

    Some(MeanEdge {
        t_statistic,
        p_value,
        degrees_of_freedom,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn needs_two_varying_returns() {
        assert!(mean_edge(&[]).is_none());
        assert!(mean_edge(&[0.1]).is_none());
        assert!(mean_edge(&[0.05, 0.05, 0.05]).is_none());
    }

    #[test]
    fn cauchy_case_matches_closed_form() {
        // [0, 2]: mean 1, standard error 1, so t = 1 with one degree of
        // freedom, where P(T > 1) = 0.25.
        let edge = mean_edge(&[0.0, 2.0]).unwrap();
        assert!((edge.t_statistic - 1.0).abs() < 1e-12);
        assert_eq!(edge.degrees_of_freedom, 1.0);
        assert!((edge.p_value - 0.25).abs() < 1e-9, "got {}", edge.p_value);
    }

    #[test]
    fn zero_mean_is_a_coin_flip() {
        let edge = mean_edge(&[0.01, -0.01, 0.02, -0.02]).unwrap();
        assert!(edge.t_statistic.abs() < 1e-12);
        assert!((edge.p_value - 0.5).abs() < 1e-9);
    }

    #[test]
    fn steady_winners_are_significant() {
        let returns: Vec<f64> = (0..30).map(|i| 0.01 + (i % 3) as f64 * 0.001).collect();
        let edge = mean_edge(&returns).unwrap();
        assert!(edge.t_statistic > 10.0);
        assert!(edge.p_value < 0.001);
        assert_eq!(edge.degrees_of_freedom, 29.0);
    }

    #[test]
    fn losers_push_p_towards_one() {
        let returns: Vec<f64> = (0..30).map(|i| -0.01 - (i % 3) as f64 * 0.001).collect();
        assert!(mean_edge(&returns).unwrap().p_value > 0.999);
    }
}
