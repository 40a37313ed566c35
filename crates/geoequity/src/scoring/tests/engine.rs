use std::sync::Arc;

use super::common::*;
use crate::scoring::payroll::WAGE_BASE_YEAR;
use crate::scoring::{
    default_reference_year, standard_comparison_areas, ActivityCommitment, EconomicContext,
    LegacyScorecard, LocationKey, NoLaborSignals, ParticipationSet, PayrollSource,
    PublishedLaborData, ScoringEngine, ScoringSettings, StaticContextResolver,
};

#[test]
fn rescoring_a_store_is_reproducible() {
    let engine = engine();
    let first = engine.score_v1("supermarket_101", None, &manhattan());
    let second = engine.score_v1("supermarket_101", None, &manhattan());

    assert_eq!(first, second);
    assert_eq!(first.basis.payroll.category, "supermarket");
    assert_eq!(first.basis.context, manhattan_context());
}

#[test]
fn explicit_category_overrides_the_identifier_token() {
    let engine = engine();
    let detected = engine.score_v1("supermarket_101", None, &manhattan());
    let overridden = engine.score_v1("supermarket_101", Some("Pharmacy"), &manhattan());
    let unknown = engine.score_v1("supermarket_101", Some("bowling_alley"), &manhattan());

    assert_eq!(detected.basis.payroll.category, "supermarket");
    assert_eq!(overridden.basis.payroll.category, "pharmacy");
    assert_eq!(unknown.basis.payroll.category, "default");
}

#[test]
fn identifiers_without_a_category_use_the_default_profile() {
    let engine = ScoringEngine::new(
        Arc::new(StaticContextResolver::default()),
        Arc::new(NoLaborSignals),
        settings(),
    );
    let result = engine.score_v1("OSM123456", None, &LocationKey::zip("99999"));

    assert_eq!(result.basis.payroll.category, "default");
    assert_eq!(result.basis.payroll.wage_source, PayrollSource::IndustryProfile);
    assert!(result.basis.context.is_fallback());
    assert!((0.0..=100.0).contains(&result.score));
}

#[test]
fn unknown_locations_score_against_the_fallback_context() {
    let engine = engine();
    let result = engine.score_v2("cafe_7", None, 100.0, &LocationKey::tract("01", "089", "010100"));

    assert_eq!(result.basis.context, EconomicContext::FALLBACK);
    assert!((0.0..=100.0).contains(&result.justice_score));
}

#[test]
fn v4_2_without_participation_reports_the_v2_impact() {
    let engine = engine();
    let v2 = engine.score_v2("grocery_12", None, 250.0, &manhattan());
    let v4_2 = engine.score_v4_2("grocery_12", None, 250.0, &manhattan(), &ParticipationSet::new());

    assert_eq!(v4_2.participation.factor, 1.0);
    assert_eq!(v4_2.amplified_dollar_impact, v2.dollar_impact);
    assert_eq!(v4_2.base, v2);
}

#[test]
fn v4_2_participation_never_reduces_impact() {
    let engine = engine();
    let participation = ParticipationSet::new()
        .with("mentoring", ActivityCommitment::new(2.0, true, 12.0))
        .with("apprenticeship", ActivityCommitment::new(4.0, false, 6.0));
    let result = engine.score_v4_2("restaurant_3", None, 100.0, &manhattan(), &participation);

    assert!(result.participation.factor > 1.0);
    assert!(result.participation.factor <= 1.25);
    assert!(result.amplified_dollar_impact >= result.base_v2_impact());
    assert_eq!(result.participation.contributions.len(), 2);
}

#[test]
fn aggregate_of_nothing_is_all_zero() {
    let summary = engine().aggregate(Vec::<String>::new(), &manhattan());

    assert_eq!(summary.count, 0);
    assert_eq!(summary.average_score, 0.0);
    assert_eq!(summary.total_retained, 0.0);
    assert_eq!(summary.total_leakage, 0.0);
}

#[test]
fn aggregate_matches_independent_scores() {
    let engine = engine();
    let stores = ["supermarket_101", "pharmacy_22", "fuel_9"];
    let summary = engine.aggregate(stores, &manhattan());

    let individual: Vec<_> = stores
        .iter()
        .map(|store| engine.score_v1(store, None, &manhattan()))
        .collect();
    let average = individual.iter().map(|result| result.score).sum::<f64>() / 3.0;
    let retained: f64 = individual.iter().map(|result| result.wealth.retained).sum();

    assert_eq!(summary.count, 3);
    assert!((summary.average_score - average).abs() < 1e-9);
    assert!((summary.total_retained - retained).abs() < 1e-6);
}

#[test]
fn aggregate_resolves_context_once_per_store() {
    let resolver = Arc::new(CountingResolver::default());
    let engine = ScoringEngine::new(
        resolver.clone(),
        Arc::new(PublishedLaborData::standard()),
        settings(),
    );

    let summary = engine.aggregate(["a", "b", "c", "d"], &manhattan());

    assert_eq!(summary.count, 4);
    assert_eq!(resolver.calls(), 4);
}

#[test]
fn legacy_scorecards_use_the_published_category_wage() {
    let engine = engine();
    let result = engine.score_legacy(
        "supermarket_101",
        None,
        LegacyScorecard::WageImpact,
        &manhattan(),
    );

    assert_eq!(result.wage, 15.02);
    assert_eq!(result.employees, 45);
    assert!((0.0..=100.0).contains(&result.score));
}

#[test]
fn legacy_scorecards_fall_back_to_the_default_wage() {
    let engine = ScoringEngine::new(
        Arc::new(scenario_resolver()),
        Arc::new(NoLaborSignals),
        settings(),
    );
    let result = engine.score_legacy(
        "pharmacy_4",
        None,
        LegacyScorecard::HiringEquity,
        &manhattan(),
    );

    assert_eq!(result.wage, 15.0);
    assert_eq!(result.employees, 20);
    assert!(result.local_hiring_score.is_some());
}

#[test]
fn engines_accept_trait_object_resolvers() {
    let resolver: Arc<dyn crate::scoring::EconomicContextResolver> = Arc::new(scenario_resolver());
    let engine = ScoringEngine::new(resolver, Arc::new(PublishedLaborData::standard()), settings());

    let result = engine.score_v1("supermarket_101", None, &manhattan());
    assert_eq!(result.basis.context, manhattan_context());
}

#[test]
fn default_reference_year_never_precedes_the_wage_bands() {
    assert!(default_reference_year() >= WAGE_BASE_YEAR);
    assert_eq!(ScoringSettings::default().reference_year, default_reference_year());
}

#[test]
fn area_comparison_scores_one_store_per_location() {
    let resolver = scenario_resolver()
        .with_location(LocationKey::zip("90011"), EconomicContext::new(11.2, 38_000));
    let engine = ScoringEngine::new(
        Arc::new(resolver),
        Arc::new(PublishedLaborData::standard()),
        settings(),
    );
    let south_la = LocationKey::zip("90011");
    let comparison = engine.compare_areas("Supermarket", &[manhattan(), south_la.clone()]);

    assert_eq!(comparison.category, "supermarket");
    assert_eq!(comparison.areas.len(), 2);
    assert_eq!(comparison.areas[0].basis.identifier, "supermarket_10001");
    assert_eq!(comparison.areas[1].basis.context, EconomicContext::new(11.2, 38_000));

    let direct = engine.score_v1("supermarket_90011", Some("supermarket"), &south_la);
    assert_eq!(comparison.areas[1], direct);
    let rate = comparison.summary.retention_rate();
    assert!(rate > 0.0 && rate < 100.0);
}

#[test]
fn area_comparison_resolves_each_location_once() {
    let resolver = Arc::new(CountingResolver::default());
    let engine = ScoringEngine::new(
        resolver.clone(),
        Arc::new(PublishedLaborData::standard()),
        settings(),
    );
    let comparison = engine.compare_areas("pharmacy", &standard_comparison_areas());

    assert_eq!(resolver.calls(), 5);
    assert_eq!(comparison.summary.count, 5);
    assert!(comparison.areas.iter().all(|area| area.basis.context.is_fallback()));
}
