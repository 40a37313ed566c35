//! Presentation shapes for scores: money and scores at 2 dp, dimensions and capture at 3 dp.

use std::collections::BTreeMap;

use serde::Serialize;

use super::composite::{AggregateSummary, AreaComparison, ScoreV1, ScoreV2, ScoreV4_2};
use super::context::{EconomicContext, LocationKey};
use super::dimensions::{EquityDimension, EquityDimensions};
use super::legacy::{LegacyScore, LegacyScorecard};
use super::need::NeedModifierSet;
use super::participation::{ActivityType, ParticipationContribution};
use super::payroll::PayrollProfile;
use super::round_to;

fn money(value: f64) -> f64 {
    round_to(value, 2)
}

fn fraction(value: f64) -> f64 {
    round_to(value, 3)
}

fn dimension_values(dimensions: &EquityDimensions) -> BTreeMap<EquityDimension, f64> {
    dimensions
        .iter()
        .map(|(dimension, value)| (dimension, fraction(value)))
        .collect()
}

#[derive(Debug, Clone, Serialize)]
pub struct SubScoresView {
    pub wage: f64,
    pub hiring: f64,
    pub community: f64,
    pub participation: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct ScoreV1View {
    pub store_id: String,
    pub location: LocationKey,
    pub ejv_score: f64,
    pub sub_scores: SubScoresView,
    pub wealth_retained: f64,
    pub wealth_leakage: f64,
    pub living_wage: f64,
    pub context: EconomicContext,
    pub payroll: PayrollProfile,
}

impl From<&ScoreV1> for ScoreV1View {
    fn from(result: &ScoreV1) -> Self {
        Self {
            store_id: result.basis.identifier.clone(),
            location: result.basis.location.clone(),
            ejv_score: money(result.score),
            sub_scores: SubScoresView {
                wage: money(result.scores.wage),
                hiring: money(result.scores.hiring),
                community: money(result.scores.community),
                participation: money(result.scores.participation),
            },
            wealth_retained: money(result.wealth.retained),
            wealth_leakage: money(result.wealth.leakage),
            living_wage: money(result.living_wage),
            context: result.basis.context,
            payroll: result.basis.payroll.clone(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ScoreV2View {
    pub store_id: String,
    pub location: LocationKey,
    pub purchase_amount: f64,
    pub ejv_v2: f64,
    pub local_capture: f64,
    pub justice_score: f64,
    pub v1_comparison_score: f64,
    pub dimensions: BTreeMap<EquityDimension, f64>,
    pub adjusted_dimensions: BTreeMap<EquityDimension, f64>,
    pub need_modifiers: NeedModifierSet,
    pub wealth_retained: f64,
    pub wealth_leakage: f64,
    pub living_wage: f64,
    pub context: EconomicContext,
    pub payroll: PayrollProfile,
}

impl From<&ScoreV2> for ScoreV2View {
    fn from(result: &ScoreV2) -> Self {
        Self {
            store_id: result.basis.identifier.clone(),
            location: result.basis.location.clone(),
            purchase_amount: money(result.purchase_amount),
            ejv_v2: money(result.dollar_impact),
            local_capture: fraction(result.local_capture),
            justice_score: money(result.justice_score),
            v1_comparison_score: money(result.comparison_score),
            dimensions: dimension_values(&result.dimensions),
            adjusted_dimensions: dimension_values(&result.adjusted_dimensions),
            need_modifiers: result.modifiers,
            wealth_retained: money(result.wealth.retained),
            wealth_leakage: money(result.wealth.leakage),
            living_wage: money(result.living_wage),
            context: result.basis.context,
            payroll: result.basis.payroll.clone(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ContributionView {
    pub activity: ActivityType,
    pub label: &'static str,
    pub hours: f64,
    pub verified: bool,
    pub duration_months: f64,
    pub weight: f64,
    pub contribution: f64,
}

impl From<&ParticipationContribution> for ContributionView {
    fn from(entry: &ParticipationContribution) -> Self {
        Self {
            activity: entry.activity,
            label: entry.label,
            hours: entry.hours,
            verified: entry.verified,
            duration_months: entry.duration_months,
            weight: entry.weight,
            contribution: round_to(entry.contribution, 4),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ScoreV4_2View {
    pub store_id: String,
    pub location: LocationKey,
    pub ejv_v4_2: f64,
    pub base_v2_impact: f64,
    pub participation_amplification_factor: f64,
    pub amplification_value: f64,
    pub participation_breakdown: Vec<ContributionView>,
    pub v2: ScoreV2View,
}

impl From<&ScoreV4_2> for ScoreV4_2View {
    fn from(result: &ScoreV4_2) -> Self {
        let v2 = ScoreV2View::from(&result.base);
        Self {
            store_id: v2.store_id.clone(),
            location: v2.location.clone(),
            ejv_v4_2: money(result.amplified_dollar_impact),
            base_v2_impact: money(result.base_v2_impact()),
            participation_amplification_factor: result.participation.factor,
            amplification_value: money(result.amplification_value()),
            participation_breakdown: result
                .participation
                .contributions
                .iter()
                .map(ContributionView::from)
                .collect(),
            v2,
        }
    }
}

/// v1 and v2 side by side for the same store and location.
#[derive(Debug, Clone, Serialize)]
pub struct CombinedScoreView {
    pub store_id: String,
    pub v1: ScoreV1View,
    pub v2: ScoreV2View,
}

#[derive(Debug, Clone, Serialize)]
pub struct AggregateView {
    pub count: usize,
    pub average_score: f64,
    pub total_retained: f64,
    pub total_leakage: f64,
}

impl From<&AggregateSummary> for AggregateView {
    fn from(summary: &AggregateSummary) -> Self {
        Self {
            count: summary.count,
            average_score: money(summary.average_score),
            total_retained: money(summary.total_retained),
            total_leakage: money(summary.total_leakage),
        }
    }
}

/// Area roll-up; the retention rate is a percentage at 1 dp.
#[derive(Debug, Clone, Serialize)]
pub struct AreaSummaryView {
    pub count: usize,
    pub average_score: f64,
    pub total_retained: f64,
    pub total_leakage: f64,
    pub retention_rate: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct AreaComparisonView {
    pub category: String,
    pub areas: Vec<ScoreV1View>,
    pub summary: AreaSummaryView,
}

impl From<&AreaComparison> for AreaComparisonView {
    fn from(comparison: &AreaComparison) -> Self {
        let summary = &comparison.summary;
        Self {
            category: comparison.category.clone(),
            areas: comparison.areas.iter().map(ScoreV1View::from).collect(),
            summary: AreaSummaryView {
                count: summary.count,
                average_score: money(summary.average_score),
                total_retained: money(summary.total_retained),
                total_leakage: money(summary.total_leakage),
                retention_rate: round_to(summary.retention_rate(), 1),
            },
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct LegacyScoreView {
    pub store_id: String,
    pub location: LocationKey,
    pub scorecard: LegacyScorecard,
    pub score: f64,
    pub wage: f64,
    pub employees: u32,
    pub living_wage: f64,
    pub wage_score: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub local_hiring_score: Option<f64>,
    pub impact_score: f64,
    pub daily_wealth: f64,
}

impl LegacyScoreView {
    pub fn new(store_id: &str, location: &LocationKey, result: &LegacyScore) -> Self {
        Self {
            store_id: store_id.to_string(),
            location: location.clone(),
            scorecard: result.scorecard,
            score: money(result.score),
            wage: money(result.wage),
            employees: result.employees,
            living_wage: money(result.living_wage),
            wage_score: money(result.wage_score),
            local_hiring_score: result.local_hiring_score.map(money),
            impact_score: money(result.impact_score),
            daily_wealth: money(result.daily_wealth),
        }
    }
}

/// Catalogue entry describing one participation pathway.
#[derive(Debug, Clone, Serialize)]
pub struct ParticipationTypeView {
    pub key: &'static str,
    pub name: &'static str,
    pub weight: f64,
    pub description: &'static str,
    pub unit: &'static str,
}

impl From<ActivityType> for ParticipationTypeView {
    fn from(activity: ActivityType) -> Self {
        Self {
            key: activity.key(),
            name: activity.label(),
            weight: activity.weight(),
            description: activity.description(),
            unit: activity.unit(),
        }
    }
}

pub fn participation_catalogue() -> Vec<ParticipationTypeView> {
    ActivityType::ALL
        .iter()
        .copied()
        .map(ParticipationTypeView::from)
        .collect()
}
