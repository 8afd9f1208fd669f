use chrono::{NaiveDateTime, Timelike};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::collections::BTreeSet;

use crate::registry::Criteria;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Flight {
    pub id: String,
    pub airline_code: String,
    pub airline_name: String,
    pub flight_number: String,
    pub from: String,
    pub to: String,
    pub departure: NaiveDateTime,
    pub arrival: NaiveDateTime,
    pub duration_minutes: u32,
    pub stops: u8,
    pub price: u32,
    pub refundable: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StopsFilter {
    #[default]
    Any,
    NonStop,
    OneStop,
    TwoPlus,
}

impl StopsFilter {
    pub fn admits(self, stops: u8) -> bool {
        match self {
            StopsFilter::Any => true,
            StopsFilter::NonStop => stops == 0,
            StopsFilter::OneStop => stops == 1,
            StopsFilter::TwoPlus => stops >= 2,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            StopsFilter::Any => "Any stops",
            StopsFilter::NonStop => "Non-stop",
            StopsFilter::OneStop => "1 stop",
            StopsFilter::TwoPlus => "2+ stops",
        }
    }

    pub fn next(self) -> Self {
        match self {
            StopsFilter::Any => StopsFilter::NonStop,
            StopsFilter::NonStop => StopsFilter::OneStop,
            StopsFilter::OneStop => StopsFilter::TwoPlus,
            StopsFilter::TwoPlus => StopsFilter::Any,
        }
    }
}

/// Part of the day a departure or arrival falls in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TimeWindow {
    #[default]
    Any,
    Morning,   // 06:00-11:59
    Afternoon, // 12:00-17:59
    Evening,   // 18:00-23:59
    Night,     // 00:00-05:59
}

impl TimeWindow {
    pub fn admits(self, at: NaiveDateTime) -> bool {
        let hour = at.hour();
        match self {
            TimeWindow::Any => true,
            TimeWindow::Morning => (6..12).contains(&hour),
            TimeWindow::Afternoon => (12..18).contains(&hour),
            TimeWindow::Evening => (18..24).contains(&hour),
            TimeWindow::Night => hour < 6,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            TimeWindow::Any => "Any time",
            TimeWindow::Morning => "Morning",
            TimeWindow::Afternoon => "Afternoon",
            TimeWindow::Evening => "Evening",
            TimeWindow::Night => "Night",
        }
    }

    pub fn next(self) -> Self {
        match self {
            TimeWindow::Any => TimeWindow::Morning,
            TimeWindow::Morning => TimeWindow::Afternoon,
            TimeWindow::Afternoon => TimeWindow::Evening,
            TimeWindow::Evening => TimeWindow::Night,
            TimeWindow::Night => TimeWindow::Any,
        }
    }
}

pub const DEFAULT_MAX_PRICE: u32 = 1000;
pub const DEFAULT_MAX_DURATION: u32 = 24 * 60;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FlightFilters {
    /// Airline codes to keep; empty keeps every airline
    pub airlines: BTreeSet<String>,
    pub min_price: u32,
    pub max_price: u32,
    pub stops: StopsFilter,
    pub departure: TimeWindow,
    pub arrival: TimeWindow,
    pub max_duration_minutes: u32,
    pub refundable_only: bool,
}

impl Default for FlightFilters {
    fn default() -> Self {
        Self {
            airlines: BTreeSet::new(),
            min_price: 0,
            max_price: DEFAULT_MAX_PRICE,
            stops: StopsFilter::Any,
            departure: TimeWindow::Any,
            arrival: TimeWindow::Any,
            max_duration_minutes: DEFAULT_MAX_DURATION,
            refundable_only: false,
        }
    }
}

impl FlightFilters {
    /// Reset every filter
    pub fn clear(&mut self) {
        *self = Self::default();
    }

    pub fn toggle_airline(&mut self, code: &str) {
        if !self.airlines.remove(code) {
            self.airlines.insert(code.to_string());
        }
    }
}

impl Criteria<Flight> for FlightFilters {
    fn admits(&self, flight: &Flight) -> bool {
        (self.airlines.is_empty() || self.airlines.contains(&flight.airline_code))
            && (self.min_price..=self.max_price).contains(&flight.price)
            && self.stops.admits(flight.stops)
            && self.departure.admits(flight.departure)
            && self.arrival.admits(flight.arrival)
            && flight.duration_minutes <= self.max_duration_minutes
            && (!self.refundable_only || flight.refundable)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortKey {
    #[default]
    Price,
    Duration,
    Departure,
    Arrival,
    Airline,
}

impl SortKey {
    pub fn label(self) -> &'static str {
        match self {
            SortKey::Price => "Price",
            SortKey::Duration => "Duration",
            SortKey::Departure => "Departure",
            SortKey::Arrival => "Arrival",
            SortKey::Airline => "Airline",
        }
    }

    pub fn next(self) -> Self {
        match self {
            SortKey::Price => SortKey::Duration,
            SortKey::Duration => SortKey::Departure,
            SortKey::Departure => SortKey::Arrival,
            SortKey::Arrival => SortKey::Airline,
            SortKey::Airline => SortKey::Price,
        }
    }

    fn compare(self, a: &Flight, b: &Flight) -> Ordering {
        match self {
            SortKey::Price => a.price.cmp(&b.price),
            SortKey::Duration => a.duration_minutes.cmp(&b.duration_minutes),
            SortKey::Departure => a.departure.cmp(&b.departure),
            SortKey::Arrival => a.arrival.cmp(&b.arrival),
            SortKey::Airline => a.airline_name.cmp(&b.airline_name),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortOrder {
    #[default]
    Asc,
    Desc,
}

impl SortOrder {
    pub fn flip(self) -> Self {
        match self {
            SortOrder::Asc => SortOrder::Desc,
            SortOrder::Desc => SortOrder::Asc,
        }
    }
}

/// Filter then stable-sort. Ties keep source order in both directions.
pub fn search<'a>(
    flights: &'a [Flight],
    filters: &FlightFilters,
    key: SortKey,
    order: SortOrder,
) -> Vec<&'a Flight> {
    let mut results = crate::registry::filter(flights, filters);
    results.sort_by(|a, b| {
        let ord = key.compare(a, b);
        match order {
            SortOrder::Asc => ord,
            SortOrder::Desc => ord.reverse(),
        }
    });
    results
}

/// Distinct (code, name) pairs for the airline checklist
pub fn airlines_in(flights: &[Flight]) -> Vec<(String, String)> {
    let mut seen = BTreeSet::new();
    flights
        .iter()
        .filter(|f| seen.insert(f.airline_code.clone()))
        .map(|f| (f.airline_code.clone(), f.airline_name.clone()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::seed;

    #[test]
    fn test_default_filters_keep_everything_in_range() {
        let flights = seed::flights();
        let hits = search(&flights, &FlightFilters::default(), SortKey::Price, SortOrder::Asc);
        assert_eq!(hits.len(), flights.len());
    }

    #[test]
    fn test_price_sort_both_directions() {
        let flights = seed::flights();
        let filters = FlightFilters::default();

        let asc = search(&flights, &filters, SortKey::Price, SortOrder::Asc);
        assert!(asc.windows(2).all(|w| w[0].price <= w[1].price));

        let desc = search(&flights, &filters, SortKey::Price, SortOrder::Desc);
        assert!(desc.windows(2).all(|w| w[0].price >= w[1].price));
    }

    #[test]
    fn test_sort_is_stable_on_ties() {
        let flights = seed::flights();
        let filters = FlightFilters::default();
        let hits = search(&flights, &filters, SortKey::Airline, SortOrder::Asc);

        let indigo: Vec<&str> = hits
            .iter()
            .filter(|f| f.airline_code == "6E")
            .map(|f| f.id.as_str())
            .collect();
        let source: Vec<&str> = flights
            .iter()
            .filter(|f| f.airline_code == "6E")
            .map(|f| f.id.as_str())
            .collect();
        assert_eq!(indigo, source);
    }

    #[test]
    fn test_stops_filter() {
        let flights = seed::flights();
        for stops in [StopsFilter::NonStop, StopsFilter::OneStop, StopsFilter::TwoPlus] {
            let filters = FlightFilters { stops, ..Default::default() };
            for f in search(&flights, &filters, SortKey::Price, SortOrder::Asc) {
                assert!(stops.admits(f.stops));
            }
        }
        assert!(StopsFilter::TwoPlus.admits(3));
        assert!(!StopsFilter::OneStop.admits(2));
    }

    #[test]
    fn test_time_windows() {
        let at = |h: u32| {
            chrono::NaiveDate::from_ymd_opt(2025, 3, 15)
                .unwrap()
                .and_hms_opt(h, 0, 0)
                .unwrap()
        };
        assert!(TimeWindow::Morning.admits(at(6)));
        assert!(!TimeWindow::Morning.admits(at(12)));
        assert!(TimeWindow::Afternoon.admits(at(12)));
        assert!(TimeWindow::Evening.admits(at(23)));
        assert!(TimeWindow::Night.admits(at(0)));
        assert!(!TimeWindow::Night.admits(at(6)));
    }

    #[test]
    fn test_airline_refundable_and_duration_filters() {
        let flights = seed::flights();
        let mut filters = FlightFilters {
            refundable_only: true,
            max_duration_minutes: 180,
            ..Default::default()
        };
        filters.toggle_airline("AI");

        let hits = search(&flights, &filters, SortKey::Duration, SortOrder::Asc);
        assert!(!hits.is_empty());
        for f in hits {
            assert_eq!(f.airline_code, "AI");
            assert!(f.refundable);
            assert!(f.duration_minutes <= 180);
        }

        filters.toggle_airline("AI");
        assert!(filters.airlines.is_empty());
    }

    #[test]
    fn test_clear_restores_defaults() {
        let mut filters = FlightFilters {
            max_price: 10,
            stops: StopsFilter::NonStop,
            ..Default::default()
        };
        filters.clear();
        assert_eq!(filters, FlightFilters::default());
    }

    #[test]
    fn test_airlines_in_is_distinct() {
        let airlines = airlines_in(&seed::flights());
        let mut codes: Vec<&str> = airlines.iter().map(|(c, _)| c.as_str()).collect();
        let before = codes.len();
        codes.dedup();
        assert_eq!(codes.len(), before);
        assert!(airlines.iter().any(|(c, n)| c == "6E" && n == "IndiGo"));
    }
}
