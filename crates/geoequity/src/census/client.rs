use reqwest::blocking::Client;
use serde_json::Value;
use tracing::{debug, warn};

use super::cache::{ContextCache, InMemoryTtlCache};
use crate::config::CensusConfig;
use crate::scoring::context::{FALLBACK_MEDIAN_INCOME, FALLBACK_UNEMPLOYMENT_RATE};
use crate::scoring::{EconomicContext, EconomicContextResolver, LocationKey};

/// ACS 5-year release queried for every location.
pub const ACS_YEAR: u16 = 2022;

const UNEMPLOYMENT_FIELD: &str = "DP03_0005PE";
const ZIP_INCOME_FIELD: &str = "DP03_0062E";
const TRACT_INCOME_FIELD: &str = "B19013_001E";

#[derive(Debug, thiserror::Error)]
pub enum CensusError {
    #[error("failed to build census http client: {0}")]
    Client(#[source] reqwest::Error),
    #[error("census request for {location} failed: {source}")]
    Request {
        location: String,
        #[source]
        source: reqwest::Error,
    },
    #[error("census response for {location} has no data rows")]
    EmptyResponse { location: String },
    #[error("census response for {location} is not a table of rows")]
    Malformed { location: String },
}

/// Economic context resolver backed by the Census ACS API.
///
/// Uses a blocking HTTP client: construct and call it from blocking threads only
/// (`tokio::task::spawn_blocking` inside the server). Failed lookups resolve to the fallback
/// context and are not cached.
pub struct CensusClient<C = InMemoryTtlCache> {
    http: Client,
    base_url: String,
    cache: C,
}

impl CensusClient<InMemoryTtlCache> {
    pub fn from_config(config: &CensusConfig) -> Result<Self, CensusError> {
        Self::new(config, InMemoryTtlCache::new(config.cache_ttl))
    }
}

impl<C> CensusClient<C>
where
    C: ContextCache,
{
    pub fn new(config: &CensusConfig, cache: C) -> Result<Self, CensusError> {
        let http = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(CensusError::Client)?;

        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            cache,
        })
    }

    pub fn cache(&self) -> &C {
        &self.cache
    }

    /// Endpoint and query parameters for a location.
    pub fn request(&self, location: &LocationKey) -> (String, Vec<(&'static str, String)>) {
        match location {
            LocationKey::Zip(_) => {
                let zip = location.padded_zip().unwrap_or_default();
                (
                    format!("{}/{ACS_YEAR}/acs/acs5/profile", self.base_url),
                    vec![
                        ("get", format!("NAME,{UNEMPLOYMENT_FIELD},{ZIP_INCOME_FIELD}")),
                        ("for", format!("zip code tabulation area:{zip}")),
                    ],
                )
            }
            LocationKey::Tract {
                state,
                county,
                tract,
            } => (
                format!("{}/{ACS_YEAR}/acs/acs5", self.base_url),
                vec![
                    ("get", format!("NAME,{TRACT_INCOME_FIELD}")),
                    ("for", format!("tract:{tract}")),
                    ("in", format!("state:{state} county:{county}")),
                ],
            ),
        }
    }

    /// One uncached request; no retries.
    pub fn fetch(&self, location: &LocationKey) -> Result<EconomicContext, CensusError> {
        let (url, query) = self.request(location);
        let body: Value = self
            .http
            .get(&url)
            .query(&query)
            .send()
            .and_then(|response| response.error_for_status())
            .and_then(|response| response.json())
            .map_err(|source| CensusError::Request {
                location: location.to_string(),
                source,
            })?;

        parse_context(&body, location)
    }
}

impl<C> EconomicContextResolver for CensusClient<C>
where
    C: ContextCache,
{
    fn resolve(&self, location: &LocationKey) -> EconomicContext {
        if let Some(context) = self.cache.get(location) {
            debug!(%location, "census context served from cache");
            return context;
        }

        match self.fetch(location) {
            Ok(context) => {
                debug!(
                    %location,
                    unemployment_rate = context.unemployment_rate,
                    median_income = context.median_income,
                    "census context resolved"
                );
                self.cache.insert(location.clone(), context);
                context
            }
            Err(error) => {
                warn!(%location, %error, "census lookup failed, using fallback context");
                EconomicContext::FALLBACK
            }
        }
    }
}

/// Parse an ACS table (header row followed by value rows) into a context.
///
/// Missing, null, unparsable or negative (Census sentinel) fields fall back one at a time. Tract
/// tables carry no unemployment figure, so tracts always use the fallback rate.
pub fn parse_context(body: &Value, location: &LocationKey) -> Result<EconomicContext, CensusError> {
    let rows = body.as_array().ok_or_else(|| CensusError::Malformed {
        location: location.to_string(),
    })?;
    let header = rows
        .first()
        .and_then(Value::as_array)
        .ok_or_else(|| CensusError::Malformed {
            location: location.to_string(),
        })?;
    let values = rows
        .get(1)
        .and_then(Value::as_array)
        .ok_or_else(|| CensusError::EmptyResponse {
            location: location.to_string(),
        })?;

    let column = |name: &str| {
        header
            .iter()
            .position(|heading| heading.as_str() == Some(name))
            .and_then(|index| values.get(index))
    };

    let (unemployment, income) = match location {
        LocationKey::Zip(_) => (
            estimate(column(UNEMPLOYMENT_FIELD)),
            estimate(column(ZIP_INCOME_FIELD)),
        ),
        LocationKey::Tract { .. } => (None, estimate(column(TRACT_INCOME_FIELD))),
    };

    let unemployment_rate = match (unemployment, location) {
        (Some(rate), _) => rate,
        (None, LocationKey::Tract { .. }) => FALLBACK_UNEMPLOYMENT_RATE,
        (None, LocationKey::Zip(_)) => {
            warn!(
                %location,
                field = UNEMPLOYMENT_FIELD,
                "unemployment rate unavailable, using fallback"
            );
            FALLBACK_UNEMPLOYMENT_RATE
        }
    };
    let median_income = match income {
        Some(income) if income <= u32::MAX as f64 => income.round() as u32,
        _ => {
            warn!(%location, "median income unavailable, using fallback");
            FALLBACK_MEDIAN_INCOME
        }
    };

    Ok(EconomicContext::new(unemployment_rate, median_income))
}

fn estimate(value: Option<&Value>) -> Option<f64> {
    let parsed = match value? {
        Value::String(raw) => raw.trim().parse::<f64>().ok()?,
        Value::Number(number) => number.as_f64()?,
        _ => return None,
    };
    (parsed.is_finite() && parsed >= 0.0).then_some(parsed)
}
