use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Unemployment rate (percent) used when no local figure is available.
pub const FALLBACK_UNEMPLOYMENT_RATE: f64 = 5.0;
/// Median household income used when no local figure is available.
pub const FALLBACK_MEDIAN_INCOME: u32 = 50_000;

/// Local macro indicators that shape hiring and need adjustments.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EconomicContext {
    pub unemployment_rate: f64,
    pub median_income: u32,
}

impl EconomicContext {
    pub const FALLBACK: Self = Self {
        unemployment_rate: FALLBACK_UNEMPLOYMENT_RATE,
        median_income: FALLBACK_MEDIAN_INCOME,
    };

    pub fn new(unemployment_rate: f64, median_income: u32) -> Self {
        Self {
            unemployment_rate,
            median_income,
        }
    }

    pub fn is_fallback(&self) -> bool {
        *self == Self::FALLBACK
    }
}

impl Default for EconomicContext {
    fn default() -> Self {
        Self::FALLBACK
    }
}

/// Location a score is computed for: a ZIP code or a Census tract triple.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum LocationKey {
    Zip(String),
    Tract {
        state: String,
        county: String,
        tract: String,
    },
}

impl LocationKey {
    pub fn zip(code: impl Into<String>) -> Self {
        Self::Zip(code.into())
    }

    pub fn tract(
        state: impl Into<String>,
        county: impl Into<String>,
        tract: impl Into<String>,
    ) -> Self {
        Self::Tract {
            state: state.into(),
            county: county.into(),
            tract: tract.into(),
        }
    }

    /// ZIP code padded to the five digits the Census ZCTA tables expect.
    pub fn padded_zip(&self) -> Option<String> {
        match self {
            LocationKey::Zip(code) => Some(format!("{:0>5}", code)),
            LocationKey::Tract { .. } => None,
        }
    }
}

impl fmt::Display for LocationKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LocationKey::Zip(code) => write!(f, "{code}"),
            LocationKey::Tract {
                state,
                county,
                tract,
            } => write!(f, "{state}-{county}-{tract}"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("location '{0}' is neither a ZIP code nor a state-county-tract triple")]
pub struct InvalidLocation(pub String);

impl FromStr for LocationKey {
    type Err = InvalidLocation;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let trimmed = raw.trim();
        let all_digits =
            |value: &str| !value.is_empty() && value.chars().all(|c| c.is_ascii_digit());

        let parts: Vec<&str> = trimmed.split('-').collect();
        match parts.as_slice() {
            [zip] if all_digits(*zip) && zip.len() <= 5 => Ok(LocationKey::zip(*zip)),
            [state, county, tract]
                if all_digits(*state) && all_digits(*county) && all_digits(*tract) =>
            {
                Ok(LocationKey::tract(*state, *county, *tract))
            }
            _ => Err(InvalidLocation(raw.to_string())),
        }
    }
}

impl Serialize for LocationKey {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for LocationKey {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

/// Source of local economic indicators.
///
/// Implementations must never fail visibly: any lookup problem resolves to
/// [`EconomicContext::FALLBACK`] (or a per-field fallback) and is logged by the implementation.
pub trait EconomicContextResolver: Send + Sync {
    fn resolve(&self, location: &LocationKey) -> EconomicContext;
}

/// Resolver backed by fixed values, used offline and in tests.
#[derive(Debug, Clone, Default)]
pub struct StaticContextResolver {
    default: EconomicContext,
    overrides: HashMap<LocationKey, EconomicContext>,
}

impl StaticContextResolver {
    pub fn new(default: EconomicContext) -> Self {
        Self {
            default,
            overrides: HashMap::new(),
        }
    }

    pub fn with_location(mut self, location: LocationKey, context: EconomicContext) -> Self {
        self.overrides.insert(location, context);
        self
    }
}

impl EconomicContextResolver for StaticContextResolver {
    fn resolve(&self, location: &LocationKey) -> EconomicContext {
        self.overrides
            .get(location)
            .copied()
            .unwrap_or(self.default)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_zip_and_tract_keys() {
        assert_eq!("10001".parse::<LocationKey>(), Ok(LocationKey::zip("10001")));
        assert_eq!(
            "36-061-010100".parse::<LocationKey>(),
            Ok(LocationKey::tract("36", "061", "010100"))
        );
        assert!("10001-x".parse::<LocationKey>().is_err());
        assert!("".parse::<LocationKey>().is_err());
    }

    #[test]
    fn pads_short_zip_codes() {
        assert_eq!(LocationKey::zip("501").padded_zip().as_deref(), Some("00501"));
        assert_eq!(LocationKey::tract("01", "089", "010100").padded_zip(), None);
    }

    #[test]
    fn static_resolver_prefers_overrides() {
        let rich = EconomicContext::new(3.1, 106_509);
        let resolver = StaticContextResolver::default()
            .with_location(LocationKey::zip("10001"), rich);

        assert_eq!(resolver.resolve(&LocationKey::zip("10001")), rich);
        assert!(resolver.resolve(&LocationKey::zip("90011")).is_fallback());
    }

    #[test]
    fn location_keys_serialize_as_strings() {
        let key = LocationKey::tract("36", "061", "010100");
        let json = serde_json::to_string(&key).expect("serialize");
        assert_eq!(json, "\"36-061-010100\"");
        let parsed: LocationKey = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(parsed, key);
    }
}
