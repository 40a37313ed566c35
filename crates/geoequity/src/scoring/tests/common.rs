use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use axum::http::{header, Request};
use axum::response::Response;
use serde_json::Value;

use crate::scoring::{
    scoring_router, EconomicContext, EconomicContextResolver, LocationKey, PublishedLaborData,
    ScoringEngine, ScoringSettings, StaticContextResolver,
};

pub(super) const REFERENCE_YEAR: i32 = 2025;

pub(super) fn manhattan() -> LocationKey {
    LocationKey::zip("10001")
}

pub(super) fn manhattan_context() -> EconomicContext {
    EconomicContext::new(3.1, 106_509)
}

pub(super) fn scenario_resolver() -> StaticContextResolver {
    StaticContextResolver::default().with_location(manhattan(), manhattan_context())
}

pub(super) fn settings() -> ScoringSettings {
    ScoringSettings::new(REFERENCE_YEAR, manhattan())
}

pub(super) type TestEngine = ScoringEngine<StaticContextResolver, PublishedLaborData>;

pub(super) fn engine() -> TestEngine {
    ScoringEngine::new(
        Arc::new(scenario_resolver()),
        Arc::new(PublishedLaborData::standard()),
        settings(),
    )
}

pub(super) fn router() -> axum::Router {
    scoring_router(Arc::new(engine()))
}

/// Resolver that counts lookups and answers with the fallback context.
#[derive(Debug, Default)]
pub(super) struct CountingResolver {
    calls: AtomicUsize,
}

impl CountingResolver {
    pub(super) fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl EconomicContextResolver for CountingResolver {
    fn resolve(&self, _location: &LocationKey) -> EconomicContext {
        self.calls.fetch_add(1, Ordering::SeqCst);
        EconomicContext::FALLBACK
    }
}

pub(super) fn get(uri: &str) -> Request<axum::body::Body> {
    Request::get(uri)
        .body(axum::body::Body::empty())
        .expect("request builds")
}

pub(super) fn post_json(uri: &str, payload: &Value) -> Request<axum::body::Body> {
    Request::post(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(axum::body::Body::from(
            serde_json::to_vec(payload).expect("payload serializes"),
        ))
        .expect("request builds")
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 64 * 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}
