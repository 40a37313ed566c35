use tracing::debug;

/// Optional enrichment signals for the payroll synthesizer.
///
/// `None` sends the synthesizer down the profile-based path for that quantity.
pub trait LaborMarketSignals: Send + Sync {
    fn occupation_wage(&self, soc_code: &str) -> Option<f64>;
    fn industry_headcount(&self, naics_code: &str) -> Option<u32>;
}

/// Published occupational wage estimate.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PublishedWage {
    pub soc_code: &'static str,
    pub hourly_wage: f64,
    pub title: &'static str,
}

/// Published average establishment size.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PublishedHeadcount {
    pub naics_code: &'static str,
    pub avg_employees: u32,
    pub source: &'static str,
}

/// Figures compiled from BLS OEWS (May 2024) and industry employment averages.
#[derive(Debug, Clone)]
pub struct PublishedLaborData {
    wages: Vec<PublishedWage>,
    headcounts: Vec<PublishedHeadcount>,
}

impl PublishedLaborData {
    pub fn standard() -> Self {
        let wage = |soc_code, hourly_wage, title| PublishedWage {
            soc_code,
            hourly_wage,
            title,
        };
        let headcount = |naics_code, avg_employees, source| PublishedHeadcount {
            naics_code,
            avg_employees,
            source,
        };

        Self {
            wages: vec![
                wage("41-2031", 15.02, "Retail Salespersons"),
                wage("53-7064", 17.02, "Packers and Packagers, Hand"),
                wage("53-6031", 14.75, "Automotive Service Attendants"),
                wage("29-2052", 18.79, "Pharmacy Technicians"),
                wage("35-3031", 15.15, "Waiters and Waitresses"),
                wage("35-3023", 14.33, "Fast Food Workers"),
                wage("35-3011", 14.82, "Baristas"),
            ],
            headcounts: vec![
                headcount("4451", 48, "Supermarkets & Grocery Stores"),
                headcount("45291", 72, "Warehouse Clubs & Supercenters"),
                headcount("4471", 9, "Gasoline Stations/Convenience"),
                headcount("4461", 21, "Pharmacies & Drug Stores"),
                headcount("7225", 17, "Restaurants & Food Services"),
                headcount("4481", 14, "Clothing Stores"),
                headcount("4521", 58, "Department Stores"),
            ],
        }
    }

    pub fn wage_entry(&self, soc_code: &str) -> Option<&PublishedWage> {
        self.wages.iter().find(|entry| entry.soc_code == soc_code)
    }

    pub fn headcount_entry(&self, naics_code: &str) -> Option<&PublishedHeadcount> {
        self.headcounts
            .iter()
            .find(|entry| entry.naics_code == naics_code)
    }
}

impl Default for PublishedLaborData {
    fn default() -> Self {
        Self::standard()
    }
}

impl LaborMarketSignals for PublishedLaborData {
    fn occupation_wage(&self, soc_code: &str) -> Option<f64> {
        let entry = self.wage_entry(soc_code);
        match entry {
            Some(entry) => debug!(
                soc_code,
                wage = entry.hourly_wage,
                title = entry.title,
                "published wage found"
            ),
            None => debug!(soc_code, "no published wage, using industry standard"),
        }
        entry.map(|entry| entry.hourly_wage)
    }

    fn industry_headcount(&self, naics_code: &str) -> Option<u32> {
        let entry = self.headcount_entry(naics_code);
        if let Some(entry) = entry {
            debug!(
                naics_code,
                employees = entry.avg_employees,
                source = entry.source,
                "published headcount found"
            );
        }
        entry.map(|entry| entry.avg_employees)
    }
}

/// Signal source that never answers, forcing profile-based synthesis.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoLaborSignals;

impl LaborMarketSignals for NoLaborSignals {
    fn occupation_wage(&self, _soc_code: &str) -> Option<f64> {
        None
    }

    fn industry_headcount(&self, _naics_code: &str) -> Option<u32> {
        None
    }
}
