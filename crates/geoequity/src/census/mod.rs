//! Census ACS backed economic context resolution.

pub mod cache;
pub mod client;

pub use cache::{ContextCache, InMemoryTtlCache, NoContextCache};
pub use client::{parse_context, CensusClient, CensusError, ACS_YEAR};
