use std::sync::Arc;

use chrono::Datelike;
use tracing::{debug, info};

use super::composite::{
    self, AggregateSummary, AreaComparison, ScoreBasis, ScoreV1, ScoreV2, ScoreV4_2,
};
use super::context::{EconomicContextResolver, LocationKey};
use super::industry::IndustryCatalog;
use super::legacy::{LegacyScore, LegacyScorecard, LEGACY_DEFAULT_WAGE};
use super::participation::ParticipationSet;
use super::payroll::{PayrollSynthesizer, WAGE_BASE_YEAR};
use super::signals::LaborMarketSignals;

/// Category compared across areas when the caller does not name one.
pub const DEFAULT_COMPARISON_CATEGORY: &str = "supermarket";

/// ZIP codes spanning high-income, low-income, mixed, urban-core and tech-hub areas.
pub const STANDARD_COMPARISON_ZIPS: [&str; 5] = ["10001", "90011", "60614", "30303", "98101"];

pub fn standard_comparison_areas() -> Vec<LocationKey> {
    STANDARD_COMPARISON_ZIPS
        .iter()
        .map(|zip| LocationKey::zip(*zip))
        .collect()
}

/// Inputs that stay fixed for the lifetime of an engine.
#[derive(Debug, Clone, PartialEq)]
pub struct ScoringSettings {
    /// Year the profile-path wages are compounded to.
    pub reference_year: i32,
    /// Location scored when a caller does not name one.
    pub default_location: LocationKey,
}

impl ScoringSettings {
    pub fn new(reference_year: i32, default_location: LocationKey) -> Self {
        Self {
            reference_year,
            default_location,
        }
    }
}

/// Current calendar year, never earlier than the year the wage bands were published.
pub fn default_reference_year() -> i32 {
    chrono::Utc::now().year().max(WAGE_BASE_YEAR)
}

impl Default for ScoringSettings {
    fn default() -> Self {
        Self {
            reference_year: default_reference_year(),
            default_location: LocationKey::zip("10001"),
        }
    }
}

/// Entry point tying context resolution, payroll synthesis and the composites together.
///
/// The engine holds no mutable state of its own and is shared across requests behind an `Arc`.
/// Every method performs at most one context lookup per entity and never fails: lookup problems
/// surface as the fallback context.
pub struct ScoringEngine<R: ?Sized, L: ?Sized> {
    resolver: Arc<R>,
    signals: Arc<L>,
    catalog: IndustryCatalog,
    settings: ScoringSettings,
}

impl<R, L> ScoringEngine<R, L>
where
    R: EconomicContextResolver + ?Sized,
    L: LaborMarketSignals + ?Sized,
{
    pub fn new(resolver: Arc<R>, signals: Arc<L>, settings: ScoringSettings) -> Self {
        Self {
            resolver,
            signals,
            catalog: IndustryCatalog::standard(),
            settings,
        }
    }

    pub fn with_catalog(mut self, catalog: IndustryCatalog) -> Self {
        self.catalog = catalog;
        self
    }

    pub fn settings(&self) -> &ScoringSettings {
        &self.settings
    }

    pub fn catalog(&self) -> &IndustryCatalog {
        &self.catalog
    }

    /// Category to score an identifier under: an explicit override, else the embedded token.
    pub fn category(&self, identifier: &str, category: Option<&str>) -> &'static str {
        match category.map(str::trim).filter(|value| !value.is_empty()) {
            Some(explicit) => self.catalog.resolve_category(explicit),
            None => self.catalog.category_for(identifier),
        }
    }

    /// Resolve the context for `location` and synthesize the payroll it implies.
    pub fn basis(
        &self,
        identifier: &str,
        category: Option<&str>,
        location: &LocationKey,
    ) -> ScoreBasis {
        let context = self.resolver.resolve(location);
        let category = self.category(identifier, category);
        let payroll = PayrollSynthesizer::new(
            &self.catalog,
            self.signals.as_ref(),
            self.settings.reference_year,
        )
        .synthesize(identifier, category, &context);

        debug!(
            identifier,
            %location,
            category,
            avg_wage = payroll.avg_wage,
            employees = payroll.active_employees,
            "synthesized payroll"
        );

        ScoreBasis {
            identifier: identifier.to_string(),
            location: location.clone(),
            context,
            payroll,
        }
    }

    pub fn score_v1(
        &self,
        identifier: &str,
        category: Option<&str>,
        location: &LocationKey,
    ) -> ScoreV1 {
        let result = composite::score_v1(self.basis(identifier, category, location));
        info!(identifier, %location, score = result.score, "scored ejv v1");
        result
    }

    pub fn score_v2(
        &self,
        identifier: &str,
        category: Option<&str>,
        purchase_amount: f64,
        location: &LocationKey,
    ) -> ScoreV2 {
        let basis = self.basis(identifier, category, location);
        let result = composite::score_v2(basis, purchase_amount);
        info!(
            identifier,
            %location,
            justice_score = result.justice_score,
            dollar_impact = result.dollar_impact,
            "scored ejv v2"
        );
        result
    }

    pub fn score_v4_2(
        &self,
        identifier: &str,
        category: Option<&str>,
        purchase_amount: f64,
        location: &LocationKey,
        participation: &ParticipationSet,
    ) -> ScoreV4_2 {
        let basis = self.basis(identifier, category, location);
        let base = composite::score_v2(basis, purchase_amount);
        let result = composite::score_v4_2(base, participation);
        info!(
            identifier,
            %location,
            paf = result.participation.factor,
            amplified_dollar_impact = result.amplified_dollar_impact,
            "scored ejv v4.2"
        );
        result
    }

    /// Score each identifier with v1 independently and roll the results up.
    pub fn aggregate<I, S>(&self, identifiers: I, location: &LocationKey) -> AggregateSummary
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let scores: Vec<ScoreV1> = identifiers
            .into_iter()
            .map(|identifier| composite::score_v1(self.basis(identifier.as_ref(), None, location)))
            .collect();
        let summary = AggregateSummary::from_scores(&scores);

        info!(
            %location,
            count = summary.count,
            average_score = summary.average_score,
            "aggregated ejv v1 scores"
        );
        summary
    }

    /// Score a representative `{category}_{location}` store in each location with v1.
    pub fn compare_areas(&self, category: &str, locations: &[LocationKey]) -> AreaComparison {
        let category = self.catalog.resolve_category(category);
        let areas: Vec<ScoreV1> = locations
            .iter()
            .map(|location| {
                let identifier = format!("{category}_{location}");
                composite::score_v1(self.basis(&identifier, Some(category), location))
            })
            .collect();
        let comparison = AreaComparison::new(category, areas);

        info!(
            category,
            areas = comparison.summary.count,
            average_score = comparison.summary.average_score,
            retention_rate = comparison.summary.retention_rate(),
            "compared ejv v1 across areas"
        );
        comparison
    }

    /// Legacy scorecards ignore the synthesized payroll and score the category's published wage.
    pub fn score_legacy(
        &self,
        identifier: &str,
        category: Option<&str>,
        scorecard: LegacyScorecard,
        location: &LocationKey,
    ) -> LegacyScore {
        let context = self.resolver.resolve(location);
        let category = self.category(identifier, category);
        let wage = self
            .catalog
            .codes(category)
            .and_then(|codes| self.signals.occupation_wage(codes.soc_code))
            .unwrap_or(LEGACY_DEFAULT_WAGE);
        let employees = self.catalog.profile(category).avg_headcount;
        let result = scorecard.score(wage, employees, &context);

        info!(identifier, %location, %scorecard, score = result.score, "scored legacy scorecard");
        result
    }
}
