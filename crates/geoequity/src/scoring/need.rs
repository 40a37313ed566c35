use serde::Serialize;

use super::context::EconomicContext;
use super::dimensions::EquityDimension;
use super::round_to;

pub const MIN_NEED_MODIFIER: f64 = 0.80;
pub const MAX_NEED_MODIFIER: f64 = 1.10;
const INCOME_NEED_CEILING: f64 = 75_000.0;

/// Per-dimension multipliers boosting scores in higher-need locations.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct NeedModifierSet {
    #[serde(rename = "AES")]
    pub aes: f64,
    #[serde(rename = "ART")]
    pub art: f64,
    #[serde(rename = "HWI")]
    pub hwi: f64,
}

impl NeedModifierSet {
    pub fn from_context(context: &EconomicContext) -> Self {
        let unemployment_factor = (context.unemployment_rate / 10.0).min(1.0);
        let income_factor = (1.0 - context.median_income as f64 / INCOME_NEED_CEILING).max(0.0);
        let base = MIN_NEED_MODIFIER + 0.30 * ((unemployment_factor + income_factor) / 2.0);

        Self {
            aes: bounded(base * 1.05),
            art: bounded(base * 1.02),
            hwi: bounded(base * 1.03),
        }
    }

    /// Modifier for a dimension; dimensions outside AES/ART/HWI are not need-adjusted.
    pub fn for_dimension(&self, dimension: EquityDimension) -> Option<f64> {
        match dimension {
            EquityDimension::EssentialServices => Some(self.aes),
            EquityDimension::ResourcesAndTechnology => Some(self.art),
            EquityDimension::HealthWellnessInclusion => Some(self.hwi),
            _ => None,
        }
    }
}

fn bounded(modifier: f64) -> f64 {
    round_to(modifier.clamp(MIN_NEED_MODIFIER, MAX_NEED_MODIFIER), 2)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn affluent_low_unemployment_areas_sit_near_the_floor() {
        let modifiers = NeedModifierSet::from_context(&EconomicContext::new(3.1, 106_509));
        // base = 0.80 + 0.30 * (0.31 + 0) / 2 = 0.8465
        assert_eq!(modifiers.aes, 0.89);
        assert_eq!(modifiers.art, 0.86);
        assert_eq!(modifiers.hwi, 0.87);
    }

    #[test]
    fn high_need_areas_are_capped() {
        let modifiers = NeedModifierSet::from_context(&EconomicContext::new(18.0, 0));
        assert_eq!(modifiers.aes, MAX_NEED_MODIFIER);
        assert_eq!(modifiers.art, MAX_NEED_MODIFIER);
        assert_eq!(modifiers.hwi, MAX_NEED_MODIFIER);
    }

    #[test]
    fn fallback_context_modifiers() {
        let modifiers = NeedModifierSet::from_context(&EconomicContext::FALLBACK);
        // base = 0.80 + 0.30 * (0.5 + 1/3) / 2 = 0.925
        assert_eq!(modifiers.aes, 0.97);
        assert!((0.94..=0.95).contains(&modifiers.art));
        assert_eq!(modifiers.hwi, 0.95);
    }

    #[test]
    fn only_three_dimensions_are_need_adjusted() {
        let modifiers = NeedModifierSet::from_context(&EconomicContext::FALLBACK);
        let adjusted = EquityDimension::ALL
            .iter()
            .filter(|dimension| modifiers.for_dimension(**dimension).is_some())
            .count();
        assert_eq!(adjusted, 3);
    }
}
