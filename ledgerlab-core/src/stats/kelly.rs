//! Kelly criterion, its fractional variant, a qualitative rating and a
//! risk-of-ruin approximation.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Fraction of full Kelly most practitioners actually bet.
pub const DEFAULT_KELLY_FRACTION: f64 = 0.25;

/// Kelly fraction `f = (b·p - q) / b`.
///
/// `b` is average win over |average loss|, `p` the win probability and
/// `q = 1 - p`. Returns 0.0 when there are no wins or no losses.
pub fn kelly_criterion(win_rate_pct: f64, average_win: f64, average_loss: f64) -> f64 {
    if average_win <= 0.0 || average_loss == 0.0 {
        return 0.0;
    }
    let b = average_win / average_loss.abs();
    let p = (win_rate_pct / 100.0).clamp(0.0, 1.0);
    let q = 1.0 - p;
    (b * p - q) / b
}

pub fn fractional_kelly(kelly: f64, fraction: f64) -> f64 {
    kelly * fraction
}

/// Qualitative reading of a Kelly fraction.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum KellyRating {
    #[default]
    NoEdge,
    WeakEdge,
    ModerateEdge,
    StrongEdge,
    VeryStrongEdge,
}

impl KellyRating {
    pub fn from_kelly(kelly: f64) -> Self {
        match kelly {
            k if k <= 0.0 => Self::NoEdge,
            k if k <= 0.1 => Self::WeakEdge,
            k if k <= 0.25 => Self::ModerateEdge,
            k if k <= 0.4 => Self::StrongEdge,
            _ => Self::VeryStrongEdge,
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            Self::NoEdge => "no edge",
            Self::WeakEdge => "weak edge",
            Self::ModerateEdge => "moderate edge",
            Self::StrongEdge => "strong edge",
            Self::VeryStrongEdge => "very strong edge, potentially too aggressive",
        }
    }
}

impl fmt::Display for KellyRating {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.description())
    }
}

/// Approximate probability of ruin from win rate and best/worst trade.
///
/// Uses the classic gambler's-ruin form `((1 - e) / (1 + e))^u`, where `e` is
/// the per-trade edge normalized by the average absolute move and `u` the
/// number of worst-case losses that would exhaust the account. Returns 1.0
/// when there is no observed edge and 0.0 when no trade ever lost.
pub fn risk_of_ruin(win_rate_pct: f64, best_trade_pct: f64, worst_trade_pct: f64) -> f64 {
    let p = (win_rate_pct / 100.0).clamp(0.0, 1.0);
    let q = 1.0 - p;
    let gain = best_trade_pct.max(0.0);
    let loss = worst_trade_pct.min(0.0).abs();

    if p == 0.0 || gain == 0.0 {
        return 1.0;
    }
    if loss == 0.0 {
        return 0.0;
    }

    let edge = p * gain - q * loss;
    if edge <= 0.0 {
        return 1.0;
    }
    let normalized = edge / (p * gain + q * loss);
    let units = 100.0 / loss;
    ((1.0 - normalized) / (1.0 + normalized))
        .powf(units)
        .clamp(0.0, 1.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kelly_known_value() {
        // b = 2, p = 0.5 → (1 - 0.5) / 2 = 0.25
        assert!((kelly_criterion(50.0, 20.0, -10.0) - 0.25).abs() < 1e-12);
    }

    #[test]
    fn kelly_negative_edge() {
        assert!(kelly_criterion(30.0, 10.0, -10.0) < 0.0);
    }

    #[test]
    fn kelly_without_wins_or_losses_is_zero() {
        assert_eq!(kelly_criterion(0.0, 0.0, -10.0), 0.0);
        assert_eq!(kelly_criterion(100.0, 10.0, 0.0), 0.0);
    }

    #[test]
    fn fractional_scales() {
        assert_eq!(fractional_kelly(0.4, DEFAULT_KELLY_FRACTION), 0.1);
    }

    #[test]
    fn rating_ladder() {
        assert_eq!(KellyRating::from_kelly(-0.2), KellyRating::NoEdge);
        assert_eq!(KellyRating::from_kelly(0.0), KellyRating::NoEdge);
        assert_eq!(KellyRating::from_kelly(0.05), KellyRating::WeakEdge);
        assert_eq!(KellyRating::from_kelly(0.2), KellyRating::ModerateEdge);
        assert_eq!(KellyRating::from_kelly(0.3), KellyRating::StrongEdge);
        assert_eq!(KellyRating::from_kelly(0.55), KellyRating::VeryStrongEdge);
        assert_eq!(
            KellyRating::VeryStrongEdge.to_string(),
            "very strong edge, potentially too aggressive"
        );
    }

    #[test]
    fn ruin_is_certain_without_edge() {
        assert_eq!(risk_of_ruin(0.0, 0.0, 0.0), 1.0);
        assert_eq!(risk_of_ruin(50.0, 10.0, -10.0), 1.0);
        assert_eq!(risk_of_ruin(40.0, 10.0, -10.0), 1.0);
    }

    #[test]
    fn ruin_is_impossible_without_losses() {
        assert_eq!(risk_of_ruin(100.0, 5.0, 0.0), 0.0);
    }

    #[test]
    fn ruin_shrinks_with_edge() {
        let modest = risk_of_ruin(55.0, 10.0, -10.0);
        let strong = risk_of_ruin(70.0, 10.0, -10.0);
        assert!(modest > 0.0 && modest < 1.0);
        assert!(strong < modest);
        // e = 0.2, u = 10 → (0.8 / 1.2)^10
        let expected = (0.8_f64 / 1.2).powf(10.0);
        assert!((risk_of_ruin(60.0, 10.0, -10.0) - expected).abs() < 1e-9);
    }
}
