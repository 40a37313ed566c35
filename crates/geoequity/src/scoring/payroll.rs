use serde::Serialize;

use super::context::EconomicContext;
use super::draw::{draw, secondary_bucket};
use super::industry::IndustryCatalog;
use super::round_to;
use super::signals::LaborMarketSignals;

/// Year the industry wage bands were published; later years compound at 3% annually.
pub const WAGE_BASE_YEAR: i32 = 2024;
const ANNUAL_WAGE_GROWTH: f64 = 1.03;
const MIN_HEADCOUNT: u32 = 3;
const HOURS_PER_SHIFT: f64 = 8.0;
const MAX_LOCAL_HIRE: f64 = 0.98;

/// Which input produced a synthesized payroll quantity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PayrollSource {
    PublishedSignal,
    IndustryProfile,
}

/// Synthetic payroll for one store on one day.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PayrollProfile {
    pub category: String,
    pub avg_wage: f64,
    pub active_employees: u32,
    pub daily_payroll: f64,
    pub local_hire_pct: f64,
    pub community_spend_today: f64,
    pub wage_source: PayrollSource,
    pub headcount_source: PayrollSource,
}

impl PayrollProfile {
    /// Build a profile from known figures, deriving the daily payroll.
    pub fn from_figures(
        category: impl Into<String>,
        avg_wage: f64,
        active_employees: u32,
        local_hire_pct: f64,
        community_spend_today: f64,
    ) -> Self {
        Self {
            category: category.into(),
            avg_wage,
            active_employees,
            daily_payroll: daily_payroll(active_employees, avg_wage),
            local_hire_pct,
            community_spend_today,
            wage_source: PayrollSource::IndustryProfile,
            headcount_source: PayrollSource::IndustryProfile,
        }
    }

    /// Replace the derived daily payroll with a reported figure.
    pub fn with_daily_payroll(mut self, daily_payroll: f64) -> Self {
        self.daily_payroll = daily_payroll;
        self
    }
}

/// Derives reproducible payroll figures from an identifier and local context.
pub struct PayrollSynthesizer<'a, L: ?Sized> {
    catalog: &'a IndustryCatalog,
    signals: &'a L,
    reference_year: i32,
}

impl<'a, L> PayrollSynthesizer<'a, L>
where
    L: LaborMarketSignals + ?Sized,
{
    pub fn new(catalog: &'a IndustryCatalog, signals: &'a L, reference_year: i32) -> Self {
        Self {
            catalog,
            signals,
            reference_year,
        }
    }

    pub fn synthesize(
        &self,
        identifier: &str,
        category: &str,
        context: &EconomicContext,
    ) -> PayrollProfile {
        let category = self.catalog.resolve_category(category);
        let profile = self.catalog.profile(category);
        let codes = self.catalog.codes(category);

        let published_wage = codes.and_then(|codes| self.signals.occupation_wage(codes.soc_code));
        let (avg_wage, wage_source) = match published_wage {
            Some(wage) => {
                let variance = (draw(identifier, "wage") - 0.5) * 0.70;
                let secondary = (secondary_bucket(identifier, 100) as f64 / 100.0 - 0.5) * 0.20;
                (
                    round_to(wage * (1.0 + variance + secondary), 2),
                    PayrollSource::PublishedSignal,
                )
            }
            None => {
                let base = profile.wage_floor
                    + (profile.wage_ceiling - profile.wage_floor) * draw(identifier, "wage");
                let growth = ANNUAL_WAGE_GROWTH.powi(self.reference_year - WAGE_BASE_YEAR);
                (round_to(base * growth, 2), PayrollSource::IndustryProfile)
            }
        };

        let published_headcount =
            codes.and_then(|codes| self.signals.industry_headcount(codes.naics_code));
        let (active_employees, headcount_source) = match published_headcount {
            Some(average) => {
                let variance = (draw(identifier, "emp") - 0.5) * 1.20;
                let secondary = (secondary_bucket(identifier, 50) as f64 / 50.0 - 0.5) * 0.30;
                let scaled = average as f64 * (1.0 + variance + secondary);
                (truncate_headcount(scaled), PayrollSource::PublishedSignal)
            }
            None => {
                let average = profile.avg_headcount as f64;
                let min = (average * 0.4).trunc();
                let max = (average * 1.6).trunc();
                let scaled = min + (max - min) * draw(identifier, "emp");
                (truncate_headcount(scaled), PayrollSource::IndustryProfile)
            }
        };

        let local_hire_pct = local_hire_pct(identifier, context);
        let daily_payroll = daily_payroll(active_employees, avg_wage);
        let community_share = 0.005 + 0.25 * draw(identifier, "community");

        PayrollProfile {
            category: category.to_string(),
            avg_wage,
            active_employees,
            daily_payroll,
            local_hire_pct,
            community_spend_today: round_to(daily_payroll * community_share, 2),
            wage_source,
            headcount_source,
        }
    }
}

/// Higher local unemployment pushes the local-hire share up, by at most 20 points.
fn local_hire_pct(identifier: &str, context: &EconomicContext) -> f64 {
    let base = 0.40 + 0.55 * draw(identifier, "local");
    let store_adjustment = secondary_bucket(identifier, 30) as f64 / 100.0;
    let unemployment_boost = (context.unemployment_rate / 10.0).min(0.20);
    let combined = (base + store_adjustment + unemployment_boost).clamp(0.0, MAX_LOCAL_HIRE);
    round_to(combined, 2)
}

fn daily_payroll(active_employees: u32, avg_wage: f64) -> f64 {
    round_to(active_employees as f64 * avg_wage * HOURS_PER_SHIFT, 2)
}

fn truncate_headcount(value: f64) -> u32 {
    if value.is_finite() && value > MIN_HEADCOUNT as f64 {
        value.trunc() as u32
    } else {
        MIN_HEADCOUNT
    }
}
