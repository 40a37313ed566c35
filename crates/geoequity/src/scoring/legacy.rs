//! Scorecards from the earlier map front-end, kept so historical figures can be reproduced.
//!
//! They score the category as a whole: the published occupation wage and the profile's
//! average headcount, rather than a synthesized payroll.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::context::EconomicContext;
use super::living_wage::LivingWageStrategy;

/// Wage assumed when no published occupation wage exists for the category.
pub const LEGACY_DEFAULT_WAGE: f64 = 15.0;
const HOURS_PER_SHIFT: f64 = 8.0;
const RATIO_FLOOR: f64 = 0.889;
const RATIO_CEILING: f64 = 0.925;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LegacyScorecard {
    /// Wage adequacy plus daily local wealth, 50 points each.
    WageImpact,
    /// Local hiring (40), wage equity (40) and retained wealth (20).
    HiringEquity,
}

impl LegacyScorecard {
    pub fn key(self) -> &'static str {
        match self {
            LegacyScorecard::WageImpact => "wage_impact",
            LegacyScorecard::HiringEquity => "hiring_equity",
        }
    }

    pub fn living_wage_strategy(self) -> LivingWageStrategy {
        match self {
            LegacyScorecard::WageImpact => LivingWageStrategy::V1Original,
            LegacyScorecard::HiringEquity => LivingWageStrategy::V2Buffered,
        }
    }

    pub fn score(self, wage: f64, employees: u32, context: &EconomicContext) -> LegacyScore {
        let living_wage = self
            .living_wage_strategy()
            .hourly(context.median_income as f64);
        let shift_payroll = wage * HOURS_PER_SHIFT * employees as f64;

        match self {
            LegacyScorecard::WageImpact => {
                let wage_score = (wage / living_wage).min(1.2) / 1.2 * 50.0;
                let local_factor = 0.75 + context.unemployment_rate / 20.0;
                let daily_wealth = shift_payroll * local_factor;
                let impact_score = (daily_wealth / 250.0).min(1.0) * 50.0;

                LegacyScore {
                    scorecard: self,
                    wage,
                    employees,
                    living_wage,
                    local_factor,
                    daily_wealth,
                    wage_score,
                    local_hiring_score: None,
                    impact_score,
                    score: wage_score + impact_score,
                }
            }
            LegacyScorecard::HiringEquity => {
                let local_factor = 0.85 + (context.unemployment_rate / 10.0).min(1.0) * 0.15;
                let ratio = (wage / living_wage).clamp(RATIO_FLOOR, RATIO_CEILING);
                let wage_score = (ratio - RATIO_FLOOR) / (RATIO_CEILING - RATIO_FLOOR) * 40.0;
                let local_hiring_score = local_factor * 40.0;
                let daily_wealth = shift_payroll * local_factor;
                let impact_score = (daily_wealth / 300.0).min(1.0) * 20.0;

                LegacyScore {
                    scorecard: self,
                    wage,
                    employees,
                    living_wage,
                    local_factor,
                    daily_wealth,
                    wage_score,
                    local_hiring_score: Some(local_hiring_score),
                    impact_score,
                    score: local_hiring_score + wage_score + impact_score,
                }
            }
        }
    }
}

impl fmt::Display for LegacyScorecard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown scorecard '{0}', expected wage_impact or hiring_equity")]
pub struct UnknownScorecard(pub String);

impl FromStr for LegacyScorecard {
    type Err = UnknownScorecard;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "wage_impact" => Ok(LegacyScorecard::WageImpact),
            "hiring_equity" => Ok(LegacyScorecard::HiringEquity),
            _ => Err(UnknownScorecard(raw.to_string())),
        }
    }
}

/// Result of one legacy scorecard; `score` is 0–100 for both variants.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LegacyScore {
    pub scorecard: LegacyScorecard,
    pub wage: f64,
    pub employees: u32,
    pub living_wage: f64,
    pub local_factor: f64,
    pub daily_wealth: f64,
    pub wage_score: f64,
    pub local_hiring_score: Option<f64>,
    pub impact_score: f64,
    pub score: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wage_impact_saturates_for_large_payrolls() {
        let context = EconomicContext::new(4.0, 50_000);
        let result = LegacyScorecard::WageImpact.score(15.02, 45, &context);

        // living wage = 50000 * 0.7 / 2080 = 16.83
        let expected_wage = (15.02 / result.living_wage) / 1.2 * 50.0;
        assert!((result.wage_score - expected_wage).abs() < 1e-9);
        assert!((result.local_factor - 0.95).abs() < 1e-12);
        assert_eq!(result.impact_score, 50.0);
        assert_eq!(result.local_hiring_score, None);
        assert!((result.score - (expected_wage + 50.0)).abs() < 1e-9);
    }

    #[test]
    fn wage_impact_caps_the_wage_ratio() {
        let result = LegacyScorecard::WageImpact.score(60.0, 1, &EconomicContext::FALLBACK);
        assert_eq!(result.wage_score, 50.0);
        // 60 * 8 * 1 * 1.0 = 480 -> capped
        assert_eq!(result.impact_score, 50.0);
    }

    #[test]
    fn hiring_equity_clamps_the_wage_ratio() {
        let context = EconomicContext::FALLBACK;
        let low = LegacyScorecard::HiringEquity.score(5.0, 20, &context);
        let high = LegacyScorecard::HiringEquity.score(40.0, 20, &context);

        assert_eq!(low.living_wage, 25.0);
        assert_eq!(low.wage_score, 0.0);
        assert!((high.wage_score - 40.0).abs() < 1e-9);
    }

    #[test]
    fn hiring_equity_rewards_local_hiring_in_high_unemployment() {
        let calm =
            LegacyScorecard::HiringEquity.score(15.0, 20, &EconomicContext::new(0.0, 50_000));
        let stressed =
            LegacyScorecard::HiringEquity.score(15.0, 20, &EconomicContext::new(12.0, 50_000));

        assert_eq!(calm.local_hiring_score, Some(0.85 * 40.0));
        let stressed_hiring = stressed.local_hiring_score.unwrap_or_default();
        assert!((stressed_hiring - 40.0).abs() < 1e-9);
        assert!(stressed.score > calm.score);
        assert!(stressed.score <= 100.0);
    }

    #[test]
    fn parses_scorecard_keys() {
        assert_eq!("wage_impact".parse(), Ok(LegacyScorecard::WageImpact));
        assert_eq!(" Hiring_Equity ".parse(), Ok(LegacyScorecard::HiringEquity));
        assert!("v3".parse::<LegacyScorecard>().is_err());
    }
}
