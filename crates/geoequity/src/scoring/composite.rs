//! Composite EJV formulas: v1 (0–100 score), v2 (justice-weighted dollars) and
//! v4.2 (participation-amplified dollars).
//!
//! Everything here is a pure function of an already resolved [`EconomicContext`] and
//! [`PayrollProfile`]; values keep full precision and are rounded only when presented.

use serde::Serialize;

use super::context::{EconomicContext, LocationKey};
use super::dimensions::{BaseDimensionScores, EquityDimensions};
use super::living_wage::LivingWageStrategy;
use super::need::NeedModifierSet;
use super::participation::{ParticipationAmplification, ParticipationSet};
use super::payroll::PayrollProfile;

/// Daily payroll split between the local economy and leakage.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct WealthFlows {
    pub retained: f64,
    pub leakage: f64,
}

impl WealthFlows {
    pub fn from_payroll(payroll: &PayrollProfile, local_capture: f64) -> Self {
        Self {
            retained: payroll.daily_payroll * local_capture + payroll.community_spend_today,
            leakage: payroll.daily_payroll * (1.0 - local_capture),
        }
    }
}

/// Inputs shared by every composite version.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoreBasis {
    pub identifier: String,
    pub location: LocationKey,
    pub context: EconomicContext,
    pub payroll: PayrollProfile,
}

/// EJV v1: the plain sum of the four capped sub-scores.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoreV1 {
    pub basis: ScoreBasis,
    pub living_wage: f64,
    pub scores: BaseDimensionScores,
    pub score: f64,
    pub wealth: WealthFlows,
}

/// EJV v2: purchase dollars weighted by local capture and the need-adjusted justice score.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoreV2 {
    pub basis: ScoreBasis,
    pub living_wage: f64,
    pub purchase_amount: f64,
    pub local_capture: f64,
    pub scores: BaseDimensionScores,
    /// Unmodified v1-style sum, reported alongside for comparison.
    pub comparison_score: f64,
    pub dimensions: EquityDimensions,
    pub adjusted_dimensions: EquityDimensions,
    pub modifiers: NeedModifierSet,
    pub justice_score: f64,
    pub dollar_impact: f64,
    pub wealth: WealthFlows,
}

/// EJV v4.2: the v2 dollar impact amplified by civic participation.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoreV4_2 {
    pub base: ScoreV2,
    pub participation: ParticipationAmplification,
    pub amplified_dollar_impact: f64,
}

impl ScoreV4_2 {
    pub fn base_v2_impact(&self) -> f64 {
        self.base.dollar_impact
    }

    pub fn amplification_value(&self) -> f64 {
        self.amplified_dollar_impact - self.base.dollar_impact
    }
}

/// Nine-dimension justice weighting for one store.
#[derive(Debug, Clone, PartialEq)]
pub struct JusticeWeighting {
    pub dimensions: EquityDimensions,
    pub adjusted: EquityDimensions,
    pub justice_score: f64,
}

impl JusticeWeighting {
    /// Need modifiers touch AES/ART/HWI only; each adjusted dimension is held to `[0, 1]`.
    pub fn compute(scores: &BaseDimensionScores, modifiers: &NeedModifierSet) -> Self {
        let dimensions = EquityDimensions::expand(&scores.normalized());
        let adjusted = dimensions.map(|dimension, value| match modifiers.for_dimension(dimension) {
            Some(modifier) => (value * modifier).clamp(0.0, 1.0),
            None => value,
        });
        let justice_score = adjusted.mean() * 100.0;

        Self {
            dimensions,
            adjusted,
            justice_score,
        }
    }
}

pub fn dollar_impact(purchase_amount: f64, local_capture: f64, justice_score: f64) -> f64 {
    (purchase_amount * local_capture) * (justice_score / 100.0)
}

pub fn score_v1(basis: ScoreBasis) -> ScoreV1 {
    let living_wage = LivingWageStrategy::V1Original.hourly(basis.context.median_income as f64);
    let scores = BaseDimensionScores::compute(&basis.payroll, living_wage);
    let wealth = WealthFlows::from_payroll(&basis.payroll, basis.payroll.local_hire_pct);

    ScoreV1 {
        score: scores.total(),
        basis,
        living_wage,
        scores,
        wealth,
    }
}

pub fn score_v2(basis: ScoreBasis, purchase_amount: f64) -> ScoreV2 {
    let living_wage = LivingWageStrategy::V2Simplified.hourly(basis.context.median_income as f64);
    let scores = BaseDimensionScores::compute(&basis.payroll, living_wage);
    let modifiers = NeedModifierSet::from_context(&basis.context);
    let weighting = JusticeWeighting::compute(&scores, &modifiers);
    let local_capture = basis.payroll.local_hire_pct;
    let wealth = WealthFlows::from_payroll(&basis.payroll, local_capture);

    ScoreV2 {
        living_wage,
        purchase_amount,
        local_capture,
        comparison_score: scores.normalized().total() * 25.0,
        scores,
        dimensions: weighting.dimensions,
        adjusted_dimensions: weighting.adjusted,
        modifiers,
        justice_score: weighting.justice_score,
        dollar_impact: dollar_impact(purchase_amount, local_capture, weighting.justice_score),
        wealth,
        basis,
    }
}

pub fn score_v4_2(base: ScoreV2, participation: &ParticipationSet) -> ScoreV4_2 {
    let participation = ParticipationAmplification::evaluate(participation);
    let amplified_dollar_impact = base.dollar_impact * participation.factor;

    ScoreV4_2 {
        base,
        participation,
        amplified_dollar_impact,
    }
}

/// Portfolio roll-up over independently computed v1 scores.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct AggregateSummary {
    pub count: usize,
    pub average_score: f64,
    pub total_retained: f64,
    pub total_leakage: f64,
}

impl AggregateSummary {
    /// Averages the full-precision scores; per-store rounding happens only in the views.
    pub fn from_scores<'a, I>(scores: I) -> Self
    where
        I: IntoIterator<Item = &'a ScoreV1>,
    {
        let (count, total_score, total_retained, total_leakage) = scores.into_iter().fold(
            (0usize, 0.0, 0.0, 0.0),
            |(count, score, retained, leakage), result| {
                (
                    count + 1,
                    score + result.score,
                    retained + result.wealth.retained,
                    leakage + result.wealth.leakage,
                )
            },
        );

        if count == 0 {
            return Self {
                count: 0,
                average_score: 0.0,
                total_retained: 0.0,
                total_leakage: 0.0,
            };
        }

        Self {
            count,
            average_score: total_score / count as f64,
            total_retained,
            total_leakage,
        }
    }

    /// Retained share of all wealth flows as a percentage; 0 when nothing flows.
    pub fn retention_rate(&self) -> f64 {
        let total = self.total_retained + self.total_leakage;
        if total > 0.0 {
            self.total_retained / total * 100.0
        } else {
            0.0
        }
    }
}

/// One category scored with v1 in each of several locations.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AreaComparison {
    pub category: String,
    pub areas: Vec<ScoreV1>,
    pub summary: AggregateSummary,
}

impl AreaComparison {
    pub fn new(category: impl Into<String>, areas: Vec<ScoreV1>) -> Self {
        let summary = AggregateSummary::from_scores(&areas);
        Self {
            category: category.into(),
            areas,
            summary,
        }
    }
}
