//! Participation pathways and the amplification factor they earn.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::round_to;

/// Ceiling on the summed participation contributions.
pub const MAX_PARTICIPATION_BONUS: f64 = 0.25;
const VERIFIED_MULTIPLIER: f64 = 1.2;

/// Civic-engagement activities recognized by the amplifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActivityType {
    Mentoring,
    Volunteering,
    Sponsorship,
    Apprenticeship,
    Facilities,
}

impl ActivityType {
    pub const ALL: [ActivityType; 5] = [
        ActivityType::Mentoring,
        ActivityType::Volunteering,
        ActivityType::Sponsorship,
        ActivityType::Apprenticeship,
        ActivityType::Facilities,
    ];

    /// Exact, case-sensitive key lookup; any other spelling is an unknown activity.
    pub fn from_key(key: &str) -> Option<Self> {
        match key {
            "mentoring" => Some(Self::Mentoring),
            "volunteering" => Some(Self::Volunteering),
            "sponsorship" => Some(Self::Sponsorship),
            "apprenticeship" => Some(Self::Apprenticeship),
            "facilities" => Some(Self::Facilities),
            _ => None,
        }
    }

    pub fn key(self) -> &'static str {
        match self {
            ActivityType::Mentoring => "mentoring",
            ActivityType::Volunteering => "volunteering",
            ActivityType::Sponsorship => "sponsorship",
            ActivityType::Apprenticeship => "apprenticeship",
            ActivityType::Facilities => "facilities",
        }
    }

    pub fn weight(self) -> f64 {
        match self {
            ActivityType::Mentoring => 0.08,
            ActivityType::Volunteering => 0.06,
            ActivityType::Sponsorship => 0.05,
            ActivityType::Apprenticeship => 0.04,
            ActivityType::Facilities => 0.02,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            ActivityType::Mentoring => "Mentoring",
            ActivityType::Volunteering => "Volunteering",
            ActivityType::Sponsorship => "Community Sponsorship",
            ActivityType::Apprenticeship => "Apprenticeships & Training",
            ActivityType::Facilities => "Community Facilities Support",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            ActivityType::Mentoring => "Youth, workforce, or entrepreneurship mentoring",
            ActivityType::Volunteering => "Time, skills, or governance participation",
            ActivityType::Sponsorship => "Youth sports, community orgs, events",
            ActivityType::Apprenticeship => "Structured workforce development programs",
            ActivityType::Facilities => "Space, resources, or infrastructure support",
        }
    }

    pub fn unit(self) -> &'static str {
        match self {
            ActivityType::Mentoring | ActivityType::Volunteering => "hours/week",
            ActivityType::Sponsorship => "annual commitment",
            ActivityType::Apprenticeship => "positions offered",
            ActivityType::Facilities => "availability",
        }
    }
}

/// Commitment reported for one activity type.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ActivityCommitment {
    #[serde(default = "default_hours")]
    pub hours: f64,
    #[serde(default)]
    pub verified: bool,
    #[serde(default = "default_duration_months")]
    pub duration_months: f64,
}

fn default_hours() -> f64 {
    1.0
}

fn default_duration_months() -> f64 {
    1.0
}

impl ActivityCommitment {
    pub fn new(hours: f64, verified: bool, duration_months: f64) -> Self {
        Self {
            hours,
            verified,
            duration_months,
        }
    }

    fn contribution(&self, activity: ActivityType) -> f64 {
        let intensity = (self.hours / 10.0).min(1.0);
        let verification = if self.verified {
            VERIFIED_MULTIPLIER
        } else {
            1.0
        };
        let duration = (self.duration_months / 12.0).min(1.0);
        activity.weight() * intensity * verification * duration
    }
}

/// Participation records keyed by activity type as submitted; unknown keys are kept but ignored.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ParticipationSet(BTreeMap<String, ActivityCommitment>);

impl ParticipationSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, activity: impl Into<String>, commitment: ActivityCommitment) -> Self {
        self.0.insert(activity.into(), commitment);
        self
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    fn recognized(&self) -> impl Iterator<Item = (ActivityType, &ActivityCommitment)> + '_ {
        self.0.iter().filter_map(|(key, commitment)| {
            ActivityType::from_key(key).map(|activity| (activity, commitment))
        })
    }
}

/// Audit line for one recognized activity.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ParticipationContribution {
    pub activity: ActivityType,
    pub label: &'static str,
    pub hours: f64,
    pub verified: bool,
    pub duration_months: f64,
    pub weight: f64,
    pub contribution: f64,
}

/// Participation Amplification Factor with the contributions behind it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ParticipationAmplification {
    pub factor: f64,
    pub contributions: Vec<ParticipationContribution>,
}

impl ParticipationAmplification {
    pub fn evaluate(set: &ParticipationSet) -> Self {
        let contributions: Vec<ParticipationContribution> = set
            .recognized()
            .map(|(activity, commitment)| ParticipationContribution {
                activity,
                label: activity.label(),
                hours: commitment.hours,
                verified: commitment.verified,
                duration_months: commitment.duration_months,
                weight: activity.weight(),
                contribution: commitment.contribution(activity),
            })
            .collect();

        if set.is_empty() {
            return Self {
                factor: 1.0,
                contributions,
            };
        }

        let total: f64 = contributions.iter().map(|entry| entry.contribution).sum();
        let bonus = total.clamp(0.0, MAX_PARTICIPATION_BONUS);

        Self {
            factor: round_to(1.0 + bonus, 3),
            contributions,
        }
    }
}

/// Participation Amplification Factor in `[1.0, 1.25]`; exactly 1.0 for an empty set.
pub fn amplify(set: &ParticipationSet) -> f64 {
    ParticipationAmplification::evaluate(set).factor
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_participation_is_identity() {
        assert_eq!(amplify(&ParticipationSet::new()), 1.0);
    }

    #[test]
    fn verified_mentoring_scenario() {
        let set =
            ParticipationSet::new().with("mentoring", ActivityCommitment::new(2.0, true, 12.0));
        let amplification = ParticipationAmplification::evaluate(&set);

        assert_eq!(amplification.factor, 1.019);
        assert_eq!(amplification.contributions.len(), 1);
        assert!((amplification.contributions[0].contribution - 0.0192).abs() < 1e-12);
    }

    #[test]
    fn unknown_activities_are_ignored() {
        let set = ParticipationSet::new()
            .with("karaoke", ActivityCommitment::new(10.0, true, 12.0))
            .with("volunteering", ActivityCommitment::new(5.0, false, 6.0));
        let amplification = ParticipationAmplification::evaluate(&set);

        // 0.06 * 0.5 * 1.0 * 0.5 = 0.015
        assert_eq!(amplification.factor, 1.015);
        assert_eq!(amplification.contributions.len(), 1);
        assert_eq!(amplification.contributions[0].activity, ActivityType::Volunteering);
    }

    #[test]
    fn activity_keys_match_exactly() {
        let commitment = ActivityCommitment::new(10.0, true, 12.0);
        let single = ParticipationSet::new().with("mentoring", commitment);
        let respelled = ParticipationSet::new()
            .with("mentoring", commitment)
            .with("Mentoring", commitment)
            .with(" mentoring", commitment);

        assert_eq!(ActivityType::from_key("Mentoring"), None);
        assert_eq!(amplify(&respelled), amplify(&single));
        assert_eq!(ParticipationAmplification::evaluate(&respelled).contributions.len(), 1);
        assert_eq!(amplify(&ParticipationSet::new().with("Mentoring", commitment)), 1.0);
    }

    #[test]
    fn saturated_participation_is_capped() {
        let full = ActivityCommitment::new(40.0, true, 36.0);
        let set = ActivityType::ALL
            .iter()
            .fold(ParticipationSet::new(), |set, activity| set.with(activity.key(), full));

        // raw sum = 0.25 * 1.2 = 0.30, capped at 0.25
        assert_eq!(amplify(&set), 1.25);
    }

    #[test]
    fn omitted_fields_use_defaults() {
        let set: ParticipationSet =
            serde_json::from_str(r#"{"mentoring": {"verified": true}}"#).expect("parse");
        let amplification = ParticipationAmplification::evaluate(&set);
        let entry = &amplification.contributions[0];

        assert_eq!(entry.hours, 1.0);
        assert_eq!(entry.duration_months, 1.0);
        // 0.08 * 0.1 * 1.2 * (1/12) = 0.0008
        assert_eq!(amplification.factor, 1.001);
    }
}
