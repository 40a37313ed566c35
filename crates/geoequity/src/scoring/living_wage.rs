use serde::{Deserialize, Serialize};

const ANNUAL_WORK_HOURS: f64 = 2080.0;

/// Living-wage formulas, one per scoring generation.
///
/// The generations disagree on the formula; each composite selects its own and the variants are
/// never reconciled, so historical outputs stay reproducible.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LivingWageStrategy {
    /// 70% of median income spread over a full-time year. Used by the v1 composite.
    V1Original,
    /// Hourly median income plus a 20% buffer, held to $15–$25. Used by the hiring-equity
    /// scorecard.
    V2Buffered,
    /// 35% of hourly median income. Used by the v2 and v4.2 composites.
    V2Simplified,
}

impl LivingWageStrategy {
    pub fn hourly(self, median_income: f64) -> f64 {
        match self {
            LivingWageStrategy::V1Original => (median_income * 0.7) / ANNUAL_WORK_HOURS,
            LivingWageStrategy::V2Buffered => {
                ((median_income / ANNUAL_WORK_HOURS) * 1.2).clamp(15.0, 25.0)
            }
            LivingWageStrategy::V2Simplified => (median_income / ANNUAL_WORK_HOURS) * 0.35,
        }
    }
}
