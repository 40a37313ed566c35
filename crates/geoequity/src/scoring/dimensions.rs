use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use super::payroll::PayrollProfile;

/// Upper bound of each base dimension score.
pub const DIMENSION_CAP: f64 = 25.0;
/// Social vulnerability index placeholder applied to the hiring score.
pub const SVI_PLACEHOLDER: f64 = 0.7;
/// Headcount at which the participation score saturates.
pub const PARTICIPATION_BENCHMARK: f64 = 25.0;

/// The four base sub-scores, each in `[0, 25]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct BaseDimensionScores {
    pub wage: f64,
    pub hiring: f64,
    pub community: f64,
    pub participation: f64,
}

impl BaseDimensionScores {
    pub fn compute(payroll: &PayrollProfile, living_wage: f64) -> Self {
        Self {
            wage: capped(payroll.avg_wage / living_wage * DIMENSION_CAP),
            hiring: capped(payroll.local_hire_pct * DIMENSION_CAP * (1.0 + SVI_PLACEHOLDER)),
            community: capped(
                payroll.community_spend_today / payroll.daily_payroll * DIMENSION_CAP,
            ),
            participation: capped(
                payroll.active_employees as f64 / PARTICIPATION_BENCHMARK * DIMENSION_CAP,
            ),
        }
    }

    pub fn total(&self) -> f64 {
        self.wage + self.hiring + self.community + self.participation
    }

    /// Scores rescaled to `[0, 1]`.
    pub fn normalized(&self) -> Self {
        Self {
            wage: self.wage / DIMENSION_CAP,
            hiring: self.hiring / DIMENSION_CAP,
            community: self.community / DIMENSION_CAP,
            participation: self.participation / DIMENSION_CAP,
        }
    }
}

fn capped(value: f64) -> f64 {
    if value.is_nan() {
        0.0
    } else {
        value.clamp(0.0, DIMENSION_CAP)
    }
}

/// The nine equity dimensions reported by the justice-weighted composites.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum EquityDimension {
    #[serde(rename = "AES")]
    EssentialServices,
    #[serde(rename = "ART")]
    ResourcesAndTechnology,
    #[serde(rename = "HWI")]
    HealthWellnessInclusion,
    #[serde(rename = "PSR")]
    PublicServiceRepresentation,
    #[serde(rename = "CAI")]
    CulturalAwareness,
    #[serde(rename = "JCE")]
    JobCreation,
    #[serde(rename = "FSI")]
    FinancialSupport,
    #[serde(rename = "CED")]
    CommunityEngagement,
    #[serde(rename = "ESD")]
    EducationAndSkills,
}

impl EquityDimension {
    pub const ALL: [EquityDimension; 9] = [
        EquityDimension::EssentialServices,
        EquityDimension::ResourcesAndTechnology,
        EquityDimension::HealthWellnessInclusion,
        EquityDimension::PublicServiceRepresentation,
        EquityDimension::CulturalAwareness,
        EquityDimension::JobCreation,
        EquityDimension::FinancialSupport,
        EquityDimension::CommunityEngagement,
        EquityDimension::EducationAndSkills,
    ];

    pub fn code(self) -> &'static str {
        match self {
            EquityDimension::EssentialServices => "AES",
            EquityDimension::ResourcesAndTechnology => "ART",
            EquityDimension::HealthWellnessInclusion => "HWI",
            EquityDimension::PublicServiceRepresentation => "PSR",
            EquityDimension::CulturalAwareness => "CAI",
            EquityDimension::JobCreation => "JCE",
            EquityDimension::FinancialSupport => "FSI",
            EquityDimension::CommunityEngagement => "CED",
            EquityDimension::EducationAndSkills => "ESD",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            EquityDimension::EssentialServices => "Access to Essential Services",
            EquityDimension::ResourcesAndTechnology => "Access to Resources & Technology",
            EquityDimension::HealthWellnessInclusion => "Health, Wellness & Inclusion",
            EquityDimension::PublicServiceRepresentation => "Public Service Representation",
            EquityDimension::CulturalAwareness => "Cultural Awareness & Inclusivity",
            EquityDimension::JobCreation => "Job Creation & Economic Empowerment",
            EquityDimension::FinancialSupport => "Financial Support & Investment",
            EquityDimension::CommunityEngagement => "Community Engagement & Development",
            EquityDimension::EducationAndSkills => "Education & Skill Development",
        }
    }

    /// Fixed mapping from the normalized base scores onto this dimension.
    pub fn from_base(self, normalized: &BaseDimensionScores) -> f64 {
        match self {
            EquityDimension::EssentialServices | EquityDimension::PublicServiceRepresentation => {
                normalized.community
            }
            EquityDimension::ResourcesAndTechnology | EquityDimension::FinancialSupport => {
                normalized.wage
            }
            EquityDimension::HealthWellnessInclusion
            | EquityDimension::JobCreation
            | EquityDimension::EducationAndSkills => normalized.hiring,
            EquityDimension::CulturalAwareness => normalized.participation,
            EquityDimension::CommunityEngagement => {
                (normalized.community + normalized.participation) / 2.0
            }
        }
    }
}

impl fmt::Display for EquityDimension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// Values for all nine equity dimensions, keyed by dimension.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct EquityDimensions(BTreeMap<EquityDimension, f64>);

impl EquityDimensions {
    /// Expand normalized base scores through the fixed dimension mapping.
    pub fn expand(normalized: &BaseDimensionScores) -> Self {
        Self(
            EquityDimension::ALL
                .iter()
                .map(|dimension| (*dimension, dimension.from_base(normalized)))
                .collect(),
        )
    }

    pub fn get(&self, dimension: EquityDimension) -> f64 {
        self.0.get(&dimension).copied().unwrap_or_default()
    }

    pub fn iter(&self) -> impl Iterator<Item = (EquityDimension, f64)> + '_ {
        self.0.iter().map(|(dimension, value)| (*dimension, *value))
    }

    pub fn map<F>(&self, mut adjust: F) -> Self
    where
        F: FnMut(EquityDimension, f64) -> f64,
    {
        Self(
            self.0
                .iter()
                .map(|(dimension, value)| (*dimension, adjust(*dimension, *value)))
                .collect(),
        )
    }

    pub fn mean(&self) -> f64 {
        if self.0.is_empty() {
            return 0.0;
        }
        self.0.values().sum::<f64>() / self.0.len() as f64
    }
}
