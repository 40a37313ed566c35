use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::Deserialize;
use serde_json::json;

use super::context::{EconomicContextResolver, InvalidLocation, LocationKey};
use super::engine::{standard_comparison_areas, ScoringEngine, DEFAULT_COMPARISON_CATEGORY};
use super::legacy::{LegacyScorecard, UnknownScorecard};
use super::participation::ParticipationSet;
use super::signals::LaborMarketSignals;
use super::views::{
    participation_catalogue, AggregateView, AreaComparisonView, CombinedScoreView, LegacyScoreView,
    ParticipationTypeView, ScoreV1View, ScoreV2View, ScoreV4_2View,
};

/// Purchase amount scored when the caller does not supply one.
pub const DEFAULT_PURCHASE_AMOUNT: f64 = 100.0;

/// Request problems rejected before any scoring happens.
#[derive(Debug, thiserror::Error)]
pub enum ScoreRequestError {
    #[error("store identifier must not be empty")]
    EmptyIdentifier,
    #[error("purchase amount must be a finite, non-negative number (got {0})")]
    InvalidPurchase(f64),
    #[error(transparent)]
    Location(#[from] InvalidLocation),
    #[error(transparent)]
    Scorecard(#[from] UnknownScorecard),
    #[error("participation must be a JSON object keyed by activity type: {0}")]
    Participation(#[from] serde_json::Error),
    #[error("scoring task failed: {0}")]
    Task(String),
}

impl ScoreRequestError {
    pub fn status(&self) -> StatusCode {
        match self {
            ScoreRequestError::Task(_) => StatusCode::INTERNAL_SERVER_ERROR,
            _ => StatusCode::BAD_REQUEST,
        }
    }
}

impl IntoResponse for ScoreRequestError {
    fn into_response(self) -> Response {
        let payload = json!({
            "error": self.to_string(),
        });
        (self.status(), Json(payload)).into_response()
    }
}

/// Query parameters shared by the GET score routes; `zip` also accepts a tract triple.
#[derive(Debug, Default, Deserialize)]
pub struct ScoreQuery {
    #[serde(default, alias = "location")]
    pub zip: Option<String>,
    #[serde(default)]
    pub purchase: Option<f64>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub scorecard: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct AmplifiedScoreRequest {
    #[serde(default, alias = "location")]
    pub zip: Option<String>,
    #[serde(default)]
    pub purchase: Option<f64>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub participation: ParticipationSet,
}

#[derive(Debug, Default, Deserialize)]
pub struct AggregateRequest {
    #[serde(default)]
    pub stores: Vec<String>,
    #[serde(default, alias = "location")]
    pub zip: Option<String>,
}

/// `zips` is a comma-separated list of ZIP codes or tract triples.
#[derive(Debug, Default, Deserialize)]
pub struct AreaComparisonQuery {
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default, alias = "locations")]
    pub zips: Option<String>,
}

pub fn validate_identifier(raw: &str) -> Result<String, ScoreRequestError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(ScoreRequestError::EmptyIdentifier);
    }
    Ok(trimmed.to_string())
}

pub fn validate_purchase(raw: Option<f64>) -> Result<f64, ScoreRequestError> {
    match raw {
        None => Ok(DEFAULT_PURCHASE_AMOUNT),
        Some(amount) if amount.is_finite() && amount >= 0.0 => Ok(amount),
        Some(amount) => Err(ScoreRequestError::InvalidPurchase(amount)),
    }
}

pub fn validate_location(
    raw: Option<&str>,
    default: &LocationKey,
) -> Result<LocationKey, ScoreRequestError> {
    match raw.map(str::trim).filter(|value| !value.is_empty()) {
        Some(value) => Ok(value.parse()?),
        None => Ok(default.clone()),
    }
}

/// Comma-separated locations; an absent or blank list selects the standard comparison areas.
pub fn parse_locations(raw: Option<&str>) -> Result<Vec<LocationKey>, ScoreRequestError> {
    let locations = raw
        .unwrap_or_default()
        .split(',')
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .map(|value| value.parse::<LocationKey>())
        .collect::<Result<Vec<_>, _>>()?;

    if locations.is_empty() {
        return Ok(standard_comparison_areas());
    }
    Ok(locations)
}

pub fn parse_participation(raw: &str) -> Result<ParticipationSet, ScoreRequestError> {
    Ok(serde_json::from_str(raw)?)
}

/// Scoring may block on the context lookup, so it runs off the async workers.
async fn run_blocking<T, F>(work: F) -> Result<T, ScoreRequestError>
where
    F: FnOnce() -> T + Send + 'static,
    T: Send + 'static,
{
    tokio::task::spawn_blocking(work)
        .await
        .map_err(|error| ScoreRequestError::Task(error.to_string()))
}

/// Router builder exposing the EJV scoring endpoints.
pub fn scoring_router<R, L>(engine: Arc<ScoringEngine<R, L>>) -> Router
where
    R: EconomicContextResolver + ?Sized + 'static,
    L: LaborMarketSignals + ?Sized + 'static,
{
    Router::new()
        .route("/api/v1/ejv/aggregate", post(aggregate_handler::<R, L>))
        .route("/api/v1/ejv/:store_id", get(combined_handler::<R, L>))
        .route("/api/v1/ejv-v1/:store_id", get(v1_handler::<R, L>))
        .route("/api/v1/ejv-v2/:store_id", get(v2_handler::<R, L>))
        .route("/api/v1/ejv-v4.2/:store_id", post(v4_2_handler::<R, L>))
        .route("/api/v1/ejv-legacy/:store_id", get(legacy_handler::<R, L>))
        .route("/api/v1/area-comparison", get(area_comparison_handler::<R, L>))
        .route("/api/v1/participation/types", get(participation_types_handler))
        .with_state(engine)
}

pub(crate) async fn combined_handler<R, L>(
    State(engine): State<Arc<ScoringEngine<R, L>>>,
    Path(store_id): Path<String>,
    Query(query): Query<ScoreQuery>,
) -> Result<Json<CombinedScoreView>, ScoreRequestError>
where
    R: EconomicContextResolver + ?Sized + 'static,
    L: LaborMarketSignals + ?Sized + 'static,
{
    let store_id = validate_identifier(&store_id)?;
    let purchase = validate_purchase(query.purchase)?;
    let location = validate_location(query.zip.as_deref(), &engine.settings().default_location)?;

    let view = run_blocking(move || {
        let category = query.category.as_deref();
        let v1 = engine.score_v1(&store_id, category, &location);
        let v2 = engine.score_v2(&store_id, category, purchase, &location);
        CombinedScoreView {
            store_id,
            v1: ScoreV1View::from(&v1),
            v2: ScoreV2View::from(&v2),
        }
    })
    .await?;

    Ok(Json(view))
}

pub(crate) async fn v1_handler<R, L>(
    State(engine): State<Arc<ScoringEngine<R, L>>>,
    Path(store_id): Path<String>,
    Query(query): Query<ScoreQuery>,
) -> Result<Json<ScoreV1View>, ScoreRequestError>
where
    R: EconomicContextResolver + ?Sized + 'static,
    L: LaborMarketSignals + ?Sized + 'static,
{
    let store_id = validate_identifier(&store_id)?;
    let location = validate_location(query.zip.as_deref(), &engine.settings().default_location)?;

    let view = run_blocking(move || {
        let result = engine.score_v1(&store_id, query.category.as_deref(), &location);
        ScoreV1View::from(&result)
    })
    .await?;

    Ok(Json(view))
}

pub(crate) async fn v2_handler<R, L>(
    State(engine): State<Arc<ScoringEngine<R, L>>>,
    Path(store_id): Path<String>,
    Query(query): Query<ScoreQuery>,
) -> Result<Json<ScoreV2View>, ScoreRequestError>
where
    R: EconomicContextResolver + ?Sized + 'static,
    L: LaborMarketSignals + ?Sized + 'static,
{
    let store_id = validate_identifier(&store_id)?;
    let purchase = validate_purchase(query.purchase)?;
    let location = validate_location(query.zip.as_deref(), &engine.settings().default_location)?;

    let view = run_blocking(move || {
        let result = engine.score_v2(&store_id, query.category.as_deref(), purchase, &location);
        ScoreV2View::from(&result)
    })
    .await?;

    Ok(Json(view))
}

pub(crate) async fn v4_2_handler<R, L>(
    State(engine): State<Arc<ScoringEngine<R, L>>>,
    Path(store_id): Path<String>,
    Json(request): Json<AmplifiedScoreRequest>,
) -> Result<Json<ScoreV4_2View>, ScoreRequestError>
where
    R: EconomicContextResolver + ?Sized + 'static,
    L: LaborMarketSignals + ?Sized + 'static,
{
    let store_id = validate_identifier(&store_id)?;
    let purchase = validate_purchase(request.purchase)?;
    let location =
        validate_location(request.zip.as_deref(), &engine.settings().default_location)?;

    let view = run_blocking(move || {
        let result = engine.score_v4_2(
            &store_id,
            request.category.as_deref(),
            purchase,
            &location,
            &request.participation,
        );
        ScoreV4_2View::from(&result)
    })
    .await?;

    Ok(Json(view))
}

pub(crate) async fn aggregate_handler<R, L>(
    State(engine): State<Arc<ScoringEngine<R, L>>>,
    Json(request): Json<AggregateRequest>,
) -> Result<Json<AggregateView>, ScoreRequestError>
where
    R: EconomicContextResolver + ?Sized + 'static,
    L: LaborMarketSignals + ?Sized + 'static,
{
    let stores = request
        .stores
        .iter()
        .map(|store| validate_identifier(store))
        .collect::<Result<Vec<_>, _>>()?;
    let location =
        validate_location(request.zip.as_deref(), &engine.settings().default_location)?;

    let view = run_blocking(move || {
        let summary = engine.aggregate(&stores, &location);
        AggregateView::from(&summary)
    })
    .await?;

    Ok(Json(view))
}

pub(crate) async fn legacy_handler<R, L>(
    State(engine): State<Arc<ScoringEngine<R, L>>>,
    Path(store_id): Path<String>,
    Query(query): Query<ScoreQuery>,
) -> Result<Json<LegacyScoreView>, ScoreRequestError>
where
    R: EconomicContextResolver + ?Sized + 'static,
    L: LaborMarketSignals + ?Sized + 'static,
{
    let store_id = validate_identifier(&store_id)?;
    let location = validate_location(query.zip.as_deref(), &engine.settings().default_location)?;
    let scorecard: LegacyScorecard = match query.scorecard.as_deref() {
        Some(raw) => raw.parse()?,
        None => LegacyScorecard::WageImpact,
    };

    let view = run_blocking(move || {
        let result =
            engine.score_legacy(&store_id, query.category.as_deref(), scorecard, &location);
        LegacyScoreView::new(&store_id, &location, &result)
    })
    .await?;

    Ok(Json(view))
}

pub(crate) async fn area_comparison_handler<R, L>(
    State(engine): State<Arc<ScoringEngine<R, L>>>,
    Query(query): Query<AreaComparisonQuery>,
) -> Result<Json<AreaComparisonView>, ScoreRequestError>
where
    R: EconomicContextResolver + ?Sized + 'static,
    L: LaborMarketSignals + ?Sized + 'static,
{
    let locations = parse_locations(query.zips.as_deref())?;
    let category = query
        .category
        .filter(|value| !value.trim().is_empty())
        .unwrap_or_else(|| DEFAULT_COMPARISON_CATEGORY.to_string());

    let view = run_blocking(move || {
        let comparison = engine.compare_areas(&category, &locations);
        AreaComparisonView::from(&comparison)
    })
    .await?;

    Ok(Json(view))
}

pub(crate) async fn participation_types_handler() -> Json<Vec<ParticipationTypeView>> {
    Json(participation_catalogue())
}
