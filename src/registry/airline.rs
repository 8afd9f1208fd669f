use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::{matches_query, Choice, Criteria};
use crate::error::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AirlineStatus {
    Active,
    Pending,
    Suspended,
    #[serde(rename = "Under Review")]
    UnderReview,
}

impl AirlineStatus {
    pub const ALL: [AirlineStatus; 4] = [
        AirlineStatus::Active,
        AirlineStatus::Pending,
        AirlineStatus::Suspended,
        AirlineStatus::UnderReview,
    ];

    pub fn label(self) -> &'static str {
        match self {
            AirlineStatus::Active => "Active",
            AirlineStatus::Pending => "Pending",
            AirlineStatus::Suspended => "Suspended",
            AirlineStatus::UnderReview => "Under Review",
        }
    }
}

impl fmt::Display for AirlineStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for AirlineStatus {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_lowercase().replace(['-', '_'], " ");
        Self::ALL
            .into_iter()
            .find(|st| st.label().to_lowercase() == wanted)
            .ok_or_else(|| Error::UnknownStatus(s.to_string()))
    }
}

/// How a single compliance sub-field reads.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ComplianceMark {
    Good,
    Pending,
    Issue,
    Unknown,
}

impl ComplianceMark {
    pub fn of(value: &str) -> Self {
        match value {
            "Verified" | "Active" | "Valid" => ComplianceMark::Good,
            v if v.contains("Grade") => ComplianceMark::Good,
            "Pending" | "Under Review" | "Submitted" => ComplianceMark::Pending,
            "Expired" | "Lapsed" | "Suspended" => ComplianceMark::Issue,
            _ => ComplianceMark::Unknown,
        }
    }
}

/// Derived compliance of a whole airline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ComplianceClass {
    Compliant,
    Pending,
    NonCompliant,
    Unknown,
}

impl ComplianceClass {
    pub const ALL: [ComplianceClass; 4] = [
        ComplianceClass::Compliant,
        ComplianceClass::Pending,
        ComplianceClass::NonCompliant,
        ComplianceClass::Unknown,
    ];

    pub fn label(self) -> &'static str {
        match self {
            ComplianceClass::Compliant => "Compliant",
            ComplianceClass::Pending => "Pending",
            ComplianceClass::NonCompliant => "Non-Compliant",
            ComplianceClass::Unknown => "Unknown",
        }
    }

    /// Precedence: any issue, then any pending, then all good, else unknown.
    pub fn reduce(marks: impl IntoIterator<Item = ComplianceMark>) -> Self {
        let marks: Vec<ComplianceMark> = marks.into_iter().collect();

        if marks.contains(&ComplianceMark::Issue) {
            ComplianceClass::NonCompliant
        } else if marks.contains(&ComplianceMark::Pending) {
            ComplianceClass::Pending
        } else if !marks.is_empty() && marks.iter().all(|m| *m == ComplianceMark::Good) {
            ComplianceClass::Compliant
        } else {
            ComplianceClass::Unknown
        }
    }
}

impl fmt::Display for ComplianceClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for ComplianceClass {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_lowercase().replace([' ', '_'], "-");
        Self::ALL
            .into_iter()
            .find(|c| c.label().to_lowercase() == wanted)
            .ok_or_else(|| Error::UnknownCompliance(s.to_string()))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Contact {
    pub email: String,
    pub phone: String,
    pub website: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Compliance {
    pub kyc: String,
    pub insurance: String,
    pub license: String,
    pub safety: String,
}

impl Compliance {
    pub fn fields(&self) -> [&str; 4] {
        [
            self.kyc.as_str(),
            self.insurance.as_str(),
            self.license.as_str(),
            self.safety.as_str(),
        ]
    }

    pub fn class(&self) -> ComplianceClass {
        ComplianceClass::reduce(self.fields().into_iter().map(ComplianceMark::of))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Business {
    pub fleet: u32,
    pub routes: u32,
    pub employees: u32,
    pub monthly_revenue: u64,
    /// Commission percentage charged on bookings
    pub commission: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Documents {
    pub license: String,
    pub insurance: String,
    pub registration: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Airline {
    pub id: String,
    pub name: String,
    pub code: String,
    pub iata_code: String,
    pub icao_code: String,
    pub status: AirlineStatus,
    pub registration_date: String,
    pub headquarters: String,
    pub contact: Contact,
    pub compliance: Compliance,
    pub business: Business,
    pub documents: Documents,
}

impl Airline {
    pub fn compliance_class(&self) -> ComplianceClass {
        self.compliance.class()
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct AirlineCriteria {
    pub query: String,
    pub status: Choice<AirlineStatus>,
    pub compliance: Choice<ComplianceClass>,
}

impl Criteria<Airline> for AirlineCriteria {
    fn admits(&self, airline: &Airline) -> bool {
        matches_query(
            &self.query,
            &[airline.name.as_str(), airline.code.as_str(), airline.headquarters.as_str()],
        )
            && self.status.admits(&airline.status)
            && self.compliance.admits(&airline.compliance_class())
    }
}

/// Headline numbers for the airline overview
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct RegistrySummary {
    pub total: usize,
    pub active: usize,
    pub pending: usize,
    pub suspended: usize,
}

/// The airline collection owned by the admin workspace.
#[derive(Debug, Clone, Default)]
pub struct AirlineRegistry {
    airlines: Vec<Airline>,
}

impl AirlineRegistry {
    pub fn new(airlines: Vec<Airline>) -> Self {
        Self { airlines }
    }

    pub fn all(&self) -> &[Airline] {
        &self.airlines
    }

    pub fn get(&self, id: &str) -> Option<&Airline> {
        self.airlines.iter().find(|a| a.id == id)
    }

    pub fn filtered(&self, criteria: &AirlineCriteria) -> Vec<&Airline> {
        super::filter(&self.airlines, criteria)
    }

    pub fn summary(&self) -> RegistrySummary {
        let count = |status| self.airlines.iter().filter(|a| a.status == status).count();
        RegistrySummary {
            total: self.airlines.len(),
            active: count(AirlineStatus::Active),
            pending: count(AirlineStatus::Pending),
            suspended: count(AirlineStatus::Suspended),
        }
    }

    fn set_status(&mut self, id: &str, status: AirlineStatus) -> bool {
        match self.airlines.iter_mut().find(|a| a.id == id) {
            Some(airline) => {
                airline.status = status;
                true
            }
            None => false,
        }
    }

    /// Mark an application Active. Returns false when no airline has `id`.
    pub fn approve(&mut self, id: &str) -> bool {
        let found = self.set_status(id, AirlineStatus::Active);
        if found {
            tracing::info!("Approved airline {}", id);
        }
        found
    }

    /// Mark an airline Suspended. Callers confirm with the user first.
    pub fn suspend(&mut self, id: &str) -> bool {
        let found = self.set_status(id, AirlineStatus::Suspended);
        if found {
            tracing::info!("Suspended airline {}", id);
        }
        found
    }

    /// Drop an application entirely. Callers confirm with the user first.
    pub fn reject(&mut self, id: &str) -> bool {
        let before = self.airlines.len();
        self.airlines.retain(|a| a.id != id);
        let removed = self.airlines.len() != before;
        if removed {
            tracing::info!("Rejected airline {}", id);
        }
        removed
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::seed;

    fn registry() -> AirlineRegistry {
        AirlineRegistry::new(seed::airlines())
    }

    #[test]
    fn test_compliance_precedence() {
        use ComplianceMark::*;
        assert_eq!(ComplianceClass::reduce([Good, Pending, Issue, Unknown]), ComplianceClass::NonCompliant);
        assert_eq!(ComplianceClass::reduce([Good, Pending, Unknown]), ComplianceClass::Pending);
        assert_eq!(ComplianceClass::reduce([Good, Good]), ComplianceClass::Compliant);
        assert_eq!(ComplianceClass::reduce([Good, Unknown]), ComplianceClass::Unknown);
        assert_eq!(ComplianceClass::reduce(Vec::new()), ComplianceClass::Unknown);
    }

    #[test]
    fn test_compliance_marks() {
        assert_eq!(ComplianceMark::of("Grade A+"), ComplianceMark::Good);
        assert_eq!(ComplianceMark::of("Under Review"), ComplianceMark::Pending);
        assert_eq!(ComplianceMark::of("Lapsed"), ComplianceMark::Issue);
        assert_eq!(ComplianceMark::of("Who knows"), ComplianceMark::Unknown);
    }

    #[test]
    fn test_seed_compliance_classes() {
        let reg = registry();
        assert_eq!(reg.get("AL001").unwrap().compliance_class(), ComplianceClass::Compliant);
        assert_eq!(reg.get("AL002").unwrap().compliance_class(), ComplianceClass::Pending);
        assert_eq!(reg.get("AL004").unwrap().compliance_class(), ComplianceClass::NonCompliant);
    }

    #[test]
    fn test_all_status_returns_everything() {
        let reg = registry();
        let result = reg.filtered(&AirlineCriteria::default());
        assert_eq!(result.len(), reg.all().len());
    }

    #[test]
    fn test_query_matches_name_code_or_headquarters() {
        let reg = registry();

        let by_name = AirlineCriteria { query: "indigo".into(), ..Default::default() };
        let ids: Vec<&str> = reg.filtered(&by_name).iter().map(|a| a.id.as_str()).collect();
        assert_eq!(ids, vec!["AL003"]);

        let by_code = AirlineCriteria { query: "9w".into(), ..Default::default() };
        assert_eq!(reg.filtered(&by_code)[0].id, "AL004");

        let by_hq = AirlineCriteria { query: "MUMBAI".into(), ..Default::default() };
        assert_eq!(reg.filtered(&by_hq).len(), 2);
    }

    #[test]
    fn test_every_result_satisfies_every_criterion() {
        let reg = registry();
        let queries = ["", "a", "india", "zzz"];
        let statuses = std::iter::once(Choice::All).chain(AirlineStatus::ALL.into_iter().map(Choice::Only));

        for status in statuses {
            for compliance in std::iter::once(Choice::All).chain(ComplianceClass::ALL.into_iter().map(Choice::Only)) {
                for query in queries {
                    let criteria = AirlineCriteria {
                        query: query.to_string(),
                        status: status.clone(),
                        compliance: compliance.clone(),
                    };
                    let result = reg.filtered(&criteria);
                    assert!(result.len() <= reg.all().len());
                    for airline in result {
                        assert!(reg.all().contains(airline));
                        assert!(status.admits(&airline.status));
                        assert!(compliance.admits(&airline.compliance_class()));
                        assert!(matches_query(
                            query,
                            &[airline.name.as_str(), airline.code.as_str(), airline.headquarters.as_str()],
                        ));
                    }
                }
            }
        }
    }

    #[test]
    fn test_approve_changes_only_status() {
        let mut reg = registry();
        let before = reg.get("AL002").unwrap().clone();
        assert_eq!(before.status, AirlineStatus::Pending);

        assert!(reg.approve("AL002"));

        let after = reg.get("AL002").unwrap();
        assert_eq!(after.status, AirlineStatus::Active);
        assert_eq!(Airline { status: before.status, ..after.clone() }, before);
    }

    #[test]
    fn test_reject_removes_exactly_one() {
        let mut reg = registry();
        let others: Vec<Airline> = reg.all().iter().filter(|a| a.id != "AL002").cloned().collect();

        assert!(reg.reject("AL002"));
        assert!(reg.get("AL002").is_none());
        assert_eq!(reg.all(), others.as_slice());
    }

    #[test]
    fn test_actions_on_missing_id() {
        let mut reg = registry();
        let before = reg.all().to_vec();
        assert!(!reg.approve("NOPE"));
        assert!(!reg.suspend("NOPE"));
        assert!(!reg.reject("NOPE"));
        assert_eq!(reg.all(), before.as_slice());
    }

    #[test]
    fn test_suspend_and_summary() {
        let mut reg = registry();
        let s = reg.summary();
        assert_eq!((s.total, s.active, s.pending, s.suspended), (4, 2, 1, 1));

        reg.suspend("AL001");
        let s = reg.summary();
        assert_eq!((s.active, s.suspended), (1, 2));
    }

    #[test]
    fn test_status_parsing() {
        assert_eq!("active".parse::<AirlineStatus>().unwrap(), AirlineStatus::Active);
        assert_eq!("under-review".parse::<AirlineStatus>().unwrap(), AirlineStatus::UnderReview);
        assert!("gone".parse::<AirlineStatus>().is_err());
        assert_eq!("non-compliant".parse::<ComplianceClass>().unwrap(), ComplianceClass::NonCompliant);
        assert_eq!("Non Compliant".parse::<ComplianceClass>().unwrap(), ComplianceClass::NonCompliant);
    }
}
