//! Economic Justice Value (EJV) scoring.
//!
//! Store payroll is synthesized deterministically from an identifier and the local economic
//! context, then scored by three composite generations: v1 (0–100), v2 (justice-weighted dollar
//! impact) and v4.2 (v2 amplified by civic participation). Two legacy scorecards are kept for
//! historical comparison.

pub mod composite;
pub mod context;
pub mod dimensions;
pub mod draw;
pub mod engine;
pub mod industry;
pub mod legacy;
pub mod living_wage;
pub mod need;
pub mod participation;
pub mod payroll;
pub mod router;
pub mod signals;
pub mod views;

#[cfg(test)]
mod tests;

pub use composite::{
    AggregateSummary, AreaComparison, JusticeWeighting, ScoreBasis, ScoreV1, ScoreV2, ScoreV4_2,
    WealthFlows,
};
pub use context::{
    EconomicContext, EconomicContextResolver, InvalidLocation, LocationKey, StaticContextResolver,
};
pub use dimensions::{BaseDimensionScores, EquityDimension, EquityDimensions};
pub use engine::{
    default_reference_year, standard_comparison_areas, ScoringEngine, ScoringSettings,
    DEFAULT_COMPARISON_CATEGORY, STANDARD_COMPARISON_ZIPS,
};
pub use industry::{IndustryCatalog, IndustryProfile, OccupationCodes};
pub use legacy::{LegacyScore, LegacyScorecard, UnknownScorecard};
pub use living_wage::LivingWageStrategy;
pub use need::NeedModifierSet;
pub use participation::{
    amplify, ActivityCommitment, ActivityType, ParticipationAmplification, ParticipationSet,
};
pub use payroll::{PayrollProfile, PayrollSource, PayrollSynthesizer};
pub use router::{
    parse_locations, parse_participation, scoring_router, validate_identifier, validate_location,
    validate_purchase, ScoreRequestError, DEFAULT_PURCHASE_AMOUNT,
};
pub use signals::{LaborMarketSignals, NoLaborSignals, PublishedLaborData};
pub use views::{
    AggregateView, AreaComparisonView, AreaSummaryView, CombinedScoreView, LegacyScoreView,
    ScoreV1View, ScoreV2View, ScoreV4_2View,
};

pub(crate) fn round_to(value: f64, places: i32) -> f64 {
    let factor = 10f64.powi(places);
    (value * factor).round() / factor
}
