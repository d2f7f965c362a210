//! Report metric: named selector for ranking compiled runs.

use ledgerlab_core::{Report, TradeStats};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown report metric '{0}'")]
pub struct UnknownMetric(pub String);

/// Which `TradeStats` field to optimize or sort by.
///
/// Names are the snake-case field names, so a config file can say
/// `ranking_metric = "sortino_ratio"`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReportMetric {
    TotalProfitAndLoss,
    FinalBalance,
    TradesCount,
    WinRate,
    BestTradePercentage,
    WorstTradePercentage,
    MaxDrawDownPercentage,
    AverageDrawDownPercentage,
    MaxDrawDownDurationDays,
    TotalReturnPercentage,
    AnnualReturnPercentage,
    AnnualVolatility,
    #[default]
    SharpeRatio,
    SortinoRatio,
    CalmarRatio,
    ProfitFactor,
    Expectancy,
    ExpectancyPercentage,
    Sqn,
    ConfidenceLevel,
    KellyCriterion,
    RiskOfRuin,
    Alpha,
    InformationRatio,
}

impl ReportMetric {
    pub const ALL: [ReportMetric; 24] = [
        Self::TotalProfitAndLoss,
        Self::FinalBalance,
        Self::TradesCount,
        Self::WinRate,
        Self::BestTradePercentage,
        Self::WorstTradePercentage,
        Self::MaxDrawDownPercentage,
        Self::AverageDrawDownPercentage,
        Self::MaxDrawDownDurationDays,
        Self::TotalReturnPercentage,
        Self::AnnualReturnPercentage,
        Self::AnnualVolatility,
        Self::SharpeRatio,
        Self::SortinoRatio,
        Self::CalmarRatio,
        Self::ProfitFactor,
        Self::Expectancy,
        Self::ExpectancyPercentage,
        Self::Sqn,
        Self::ConfidenceLevel,
        Self::KellyCriterion,
        Self::RiskOfRuin,
        Self::Alpha,
        Self::InformationRatio,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Self::TotalProfitAndLoss => "total_profit_and_loss",
            Self::FinalBalance => "final_balance",
            Self::TradesCount => "trades_count",
            Self::WinRate => "win_rate",
            Self::BestTradePercentage => "best_trade_percentage",
            Self::WorstTradePercentage => "worst_trade_percentage",
            Self::MaxDrawDownPercentage => "max_draw_down_percentage",
            Self::AverageDrawDownPercentage => "average_draw_down_percentage",
            Self::MaxDrawDownDurationDays => "max_draw_down_duration_days",
            Self::TotalReturnPercentage => "total_return_percentage",
            Self::AnnualReturnPercentage => "annual_return_percentage",
            Self::AnnualVolatility => "annual_volatility",
            Self::SharpeRatio => "sharpe_ratio",
            Self::SortinoRatio => "sortino_ratio",
            Self::CalmarRatio => "calmar_ratio",
            Self::ProfitFactor => "profit_factor",
            Self::Expectancy => "expectancy",
            Self::ExpectancyPercentage => "expectancy_percentage",
            Self::Sqn => "sqn",
            Self::ConfidenceLevel => "confidence_level",
            Self::KellyCriterion => "kelly_criterion",
            Self::RiskOfRuin => "risk_of_ruin",
            Self::Alpha => "alpha",
            Self::InformationRatio => "information_ratio",
        }
    }

    /// Extract the metric value from compiled statistics.
    ///
    /// An infinite profit factor comes back as `f64::INFINITY`, which still
    /// orders above every finite value.
    pub fn extract(&self, stats: &TradeStats) -> f64 {
        match self {
            Self::TotalProfitAndLoss => stats.total_profit_and_loss,
            Self::FinalBalance => stats.final_balance,
            Self::TradesCount => stats.trades_count as f64,
            Self::WinRate => stats.win_rate,
            Self::BestTradePercentage => stats.best_trade_percentage,
            Self::WorstTradePercentage => stats.worst_trade_percentage,
            Self::MaxDrawDownPercentage => stats.max_draw_down_percentage,
            Self::AverageDrawDownPercentage => stats.average_draw_down_percentage,
            Self::MaxDrawDownDurationDays => stats.max_draw_down_duration_days as f64,
            Self::TotalReturnPercentage => stats.total_return_percentage,
            Self::AnnualReturnPercentage => stats.annual_return_percentage,
            Self::AnnualVolatility => stats.annual_volatility,
            Self::SharpeRatio => stats.sharpe_ratio,
            Self::SortinoRatio => stats.sortino_ratio,
            Self::CalmarRatio => stats.calmar_ratio,
            Self::ProfitFactor => stats.profit_factor.as_f64(),
            Self::Expectancy => stats.expectancy,
            Self::ExpectancyPercentage => stats.expectancy_percentage,
            Self::Sqn => stats.sqn,
            Self::ConfidenceLevel => stats.confidence_level,
            Self::KellyCriterion => stats.kelly_criterion,
            Self::RiskOfRuin => stats.risk_of_ruin,
            Self::Alpha => stats.alpha,
            Self::InformationRatio => stats.information_ratio,
        }
    }

    /// Whether a larger raw value is better.
    ///
    /// Drawdown percentages are stored non-positive, so closer to zero
    /// (larger) is better for them too.
    pub fn is_higher_better(&self) -> bool {
        !matches!(
            self,
            Self::MaxDrawDownDurationDays | Self::AnnualVolatility | Self::RiskOfRuin
        )
    }

    /// Returns true if `a` is strictly better than `b`.
    pub fn is_better(&self, a: f64, b: f64) -> bool {
        if self.is_higher_better() {
            a > b
        } else {
            a < b
        }
    }

    /// The best report under this metric. Ties keep the earliest report.
    pub fn best<'a>(&self, reports: &'a [Report]) -> Option<&'a Report> {
        reports.iter().fold(None, |best, candidate| match best {
            Some(current)
                if !self.is_better(
                    self.extract(candidate.stats()),
                    self.extract(current.stats()),
                ) =>
            {
                Some(current)
            }
            _ => Some(candidate),
        })
    }
}

impl fmt::Display for ReportMetric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ReportMetric {
    type Err = UnknownMetric;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        Self::ALL
            .into_iter()
            .find(|m| m.name() == wanted)
            .ok_or_else(|| UnknownMetric(s.to_string()))
    }
}
