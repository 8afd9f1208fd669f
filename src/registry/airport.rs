use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::{matches_query, Choice, Criteria};
use crate::error::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AirportStatus {
    Active,
    Inactive,
}

impl AirportStatus {
    pub const ALL: [AirportStatus; 2] = [AirportStatus::Active, AirportStatus::Inactive];

    pub fn label(self) -> &'static str {
        match self {
            AirportStatus::Active => "Active",
            AirportStatus::Inactive => "Inactive",
        }
    }
}

impl fmt::Display for AirportStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for AirportStatus {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_lowercase();
        Self::ALL
            .into_iter()
            .find(|st| st.label().to_lowercase() == wanted)
            .ok_or_else(|| Error::UnknownStatus(s.to_string()))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub lat: f64,
    pub lng: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Terminal {
    pub id: String,
    pub name: String,
    /// Free text such as "Active" or "Under Construction"
    pub status: String,
    pub capacity: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Runway {
    pub id: String,
    pub name: String,
    pub length_m: u32,
    pub surface: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Airport {
    pub id: String,
    pub iata_code: String,
    pub icao_code: String,
    pub name: String,
    pub city: String,
    pub state: String,
    pub country: String,
    pub timezone: String,
    pub coordinates: Coordinates,
    pub elevation_m: i32,
    pub terminals: Vec<Terminal>,
    pub runways: Vec<Runway>,
    pub gates: u32,
    pub airlines: u32,
    pub daily_flights: u32,
    pub passenger_capacity: u64,
    pub status: AirportStatus,
    pub last_updated: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct City {
    pub id: String,
    pub name: String,
    pub state: String,
    pub country: String,
    pub timezone: String,
    /// IATA codes of airports serving the city
    pub airports: Vec<String>,
    pub population: u64,
    pub coordinates: Coordinates,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct AirportCriteria {
    pub query: String,
    /// Compared case-insensitively
    pub country: Choice<String>,
    pub status: Choice<AirportStatus>,
}

impl Criteria<Airport> for AirportCriteria {
    fn admits(&self, airport: &Airport) -> bool {
        let country_ok = match &self.country {
            Choice::All => true,
            Choice::Only(c) => airport.country.eq_ignore_ascii_case(c.trim()),
        };

        matches_query(
            &self.query,
            &[
                airport.name.as_str(),
                airport.iata_code.as_str(),
                airport.icao_code.as_str(),
                airport.city.as_str(),
            ],
        ) && country_ok
            && self.status.admits(&airport.status)
    }
}

/// Free-text search over city name, state and country
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CityCriteria {
    pub query: String,
}

impl Criteria<City> for CityCriteria {
    fn admits(&self, city: &City) -> bool {
        matches_query(
            &self.query,
            &[city.name.as_str(), city.state.as_str(), city.country.as_str()],
        )
    }
}

/// Distinct countries across `airports`, sorted, for the country selector
pub fn countries(airports: &[Airport]) -> Vec<String> {
    let mut out: Vec<String> = airports.iter().map(|a| a.country.clone()).collect();
    out.sort();
    out.dedup();
    out
}
