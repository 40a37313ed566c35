use serde::Serialize;

/// Category key used when an identifier carries no recognizable category token.
pub const DEFAULT_CATEGORY: &str = "default";

/// Category whose occupation codes stand in for categories without their own mapping.
const FALLBACK_CODES_CATEGORY: &str = "supermarket";

/// Hourly wage band and typical headcount for a store category.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct IndustryProfile {
    pub wage_floor: f64,
    pub wage_ceiling: f64,
    pub avg_headcount: u32,
}

/// Occupation (SOC) and industry (NAICS) codes used to look up published labor signals.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct OccupationCodes {
    pub soc_code: &'static str,
    pub naics_code: &'static str,
    pub occupation_title: &'static str,
}

/// Immutable category tables, built once at startup and shared read-only.
#[derive(Debug, Clone)]
pub struct IndustryCatalog {
    profiles: Vec<(&'static str, IndustryProfile)>,
    codes: Vec<(&'static str, OccupationCodes)>,
}

impl IndustryCatalog {
    pub fn standard() -> Self {
        let profile = |wage_floor, wage_ceiling, avg_headcount| IndustryProfile {
            wage_floor,
            wage_ceiling,
            avg_headcount,
        };
        let codes = |soc_code, naics_code, occupation_title| OccupationCodes {
            soc_code,
            naics_code,
            occupation_title,
        };

        // Order matters: category detection takes the first key found in the identifier.
        let profiles = vec![
            ("supermarket", profile(15.0, 22.0, 45)),
            ("grocery", profile(14.0, 20.0, 25)),
            ("warehouse_club", profile(17.0, 25.0, 75)),
            ("convenience", profile(12.0, 16.0, 8)),
            ("fuel", profile(13.0, 17.0, 12)),
            ("pharmacy", profile(16.0, 24.0, 20)),
            ("restaurant", profile(12.0, 18.0, 18)),
            ("fast_food", profile(11.0, 15.0, 15)),
            ("cafe", profile(12.0, 17.0, 10)),
            ("clothing", profile(13.0, 19.0, 12)),
            ("department_store", profile(14.0, 21.0, 60)),
            (DEFAULT_CATEGORY, profile(13.0, 18.0, 20)),
        ];

        let codes = vec![
            ("supermarket", codes("41-2031", "4451", "Retail Salespersons")),
            ("grocery", codes("41-2031", "4451", "Retail Salespersons")),
            ("warehouse_club", codes("53-7064", "45291", "Packers and Packagers")),
            ("convenience", codes("41-2031", "4471", "Retail Salespersons")),
            ("fuel", codes("53-6031", "4471", "Automotive Service Attendants")),
            ("pharmacy", codes("29-2052", "4461", "Pharmacy Technicians")),
            ("restaurant", codes("35-3031", "7225", "Waiters and Waitresses")),
            ("fast_food", codes("35-3023", "7225", "Fast Food Workers")),
            ("cafe", codes("35-3023", "7225", "Food Prep Workers")),
            ("clothing", codes("41-2031", "4481", "Retail Salespersons")),
            ("department_store", codes("41-2031", "4521", "Retail Salespersons")),
        ];

        Self { profiles, codes }
    }

    /// Detect the category token embedded in an identifier such as `supermarket_101`.
    pub fn category_for(&self, identifier: &str) -> &'static str {
        let lowered = identifier.to_ascii_lowercase();
        self.profiles
            .iter()
            .map(|(key, _)| *key)
            .find(|key| lowered.contains(key))
            .unwrap_or(DEFAULT_CATEGORY)
    }

    /// Normalize a caller supplied category to a known key, or the default category.
    pub fn resolve_category(&self, category: &str) -> &'static str {
        let trimmed = category.trim();
        self.profiles
            .iter()
            .map(|(key, _)| *key)
            .find(|key| key.eq_ignore_ascii_case(trimmed))
            .unwrap_or(DEFAULT_CATEGORY)
    }

    pub fn profile(&self, category: &str) -> IndustryProfile {
        self.lookup_profile(category)
            .or_else(|| self.lookup_profile(DEFAULT_CATEGORY))
            .unwrap_or(IndustryProfile {
                wage_floor: 13.0,
                wage_ceiling: 18.0,
                avg_headcount: 20,
            })
    }

    /// Occupation codes for a category; unmapped categories borrow the supermarket codes.
    pub fn codes(&self, category: &str) -> Option<OccupationCodes> {
        self.lookup_codes(category)
            .or_else(|| self.lookup_codes(FALLBACK_CODES_CATEGORY))
    }

    pub fn categories(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.profiles.iter().map(|(key, _)| *key)
    }

    fn lookup_profile(&self, category: &str) -> Option<IndustryProfile> {
        self.profiles
            .iter()
            .find(|(key, _)| *key == category)
            .map(|(_, profile)| *profile)
    }

    fn lookup_codes(&self, category: &str) -> Option<OccupationCodes> {
        self.codes
            .iter()
            .find(|(key, _)| *key == category)
            .map(|(_, codes)| *codes)
    }
}

impl Default for IndustryCatalog {
    fn default() -> Self {
        Self::standard()
    }
}
