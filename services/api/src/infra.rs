use geoequity::census::{CensusClient, CensusError};
use geoequity::config::{CensusConfig, ScoringConfig};
use geoequity::error::AppError;
use geoequity::scoring::{
    EconomicContextResolver, PublishedLaborData, ScoringEngine, StaticContextResolver,
};
use metrics_exporter_prometheus::PrometheusHandle;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;
use tracing::info;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

/// Engine type served by the binary; the resolver is chosen at startup.
pub(crate) type Engine = ScoringEngine<dyn EconomicContextResolver, PublishedLaborData>;

/// Offline mode scores every location against the fallback context.
pub(crate) fn context_resolver(
    census: &CensusConfig,
) -> Result<Arc<dyn EconomicContextResolver>, CensusError> {
    if census.offline {
        info!("census lookups disabled, scoring against the fallback context");
        return Ok(Arc::new(StaticContextResolver::default()));
    }

    info!(
        base_url = %census.base_url,
        ttl_secs = census.cache_ttl.as_secs(),
        "census lookups enabled"
    );
    Ok(Arc::new(CensusClient::from_config(census)?))
}

/// Build the engine on a blocking thread; the Census client owns a blocking HTTP client.
pub(crate) async fn build_engine(
    census: CensusConfig,
    scoring: ScoringConfig,
) -> Result<Arc<Engine>, AppError> {
    let engine = tokio::task::spawn_blocking(move || {
        let resolver = context_resolver(&census)?;
        Ok::<_, CensusError>(ScoringEngine::new(
            resolver,
            Arc::new(PublishedLaborData::standard()),
            scoring.settings(),
        ))
    })
    .await
    .map_err(|error| AppError::Io(std::io::Error::other(error)))??;

    Ok(Arc::new(engine))
}
