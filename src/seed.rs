//! Built-in records the console starts with. There is no backend to load
//! them from.

use chrono::{NaiveDate, NaiveDateTime};

use crate::booking::search::Flight;
use crate::registry::airline::{Airline, AirlineStatus, Business, Compliance, Contact, Documents};
use crate::registry::airport::{Airport, AirportStatus, City, Coordinates, Runway, Terminal};

fn s(v: &str) -> String {
    v.to_string()
}

pub fn airlines() -> Vec<Airline> {
    vec![
        Airline {
            id: s("AL001"),
            name: s("Air India"),
            code: s("AI"),
            iata_code: s("AI"),
            icao_code: s("AIC"),
            status: AirlineStatus::Active,
            registration_date: s("2020-01-15"),
            headquarters: s("New Delhi, India"),
            contact: Contact {
                email: s("admin@airindia.in"),
                phone: s("+91-11-2462-2220"),
                website: s("www.airindia.in"),
            },
            compliance: Compliance {
                kyc: s("Verified"),
                insurance: s("Active"),
                license: s("Valid"),
                safety: s("Grade A"),
            },
            business: Business {
                fleet: 123,
                routes: 102,
                employees: 27_000,
                monthly_revenue: 45_000_000,
                commission: 2.5,
            },
            documents: Documents {
                license: s("Valid until 2025-12-31"),
                insurance: s("Valid until 2024-06-30"),
                registration: s("Filed 2020-01-15"),
            },
        },
        Airline {
            id: s("AL002"),
            name: s("SkyWings Express"),
            code: s("SW"),
            iata_code: s("SW"),
            icao_code: s("SWE"),
            status: AirlineStatus::Pending,
            registration_date: s("2024-02-10"),
            headquarters: s("Mumbai, India"),
            contact: Contact {
                email: s("info@skywings.com"),
                phone: s("+91-22-6789-1234"),
                website: s("www.skywings.com"),
            },
            compliance: Compliance {
                kyc: s("Under Review"),
                insurance: s("Pending"),
                license: s("Submitted"),
                safety: s("Pending"),
            },
            business: Business {
                fleet: 8,
                routes: 12,
                employees: 450,
                monthly_revenue: 2_800_000,
                commission: 3.0,
            },
            documents: Documents {
                license: s("Under review"),
                insurance: s("Documents pending"),
                registration: s("Submitted 2024-02-10"),
            },
        },
        Airline {
            id: s("AL003"),
            name: s("IndiGo"),
            code: s("6E"),
            iata_code: s("6E"),
            icao_code: s("IGO"),
            status: AirlineStatus::Active,
            registration_date: s("2019-08-20"),
            headquarters: s("Gurgaon, India"),
            contact: Contact {
                email: s("corporate@goindigo.in"),
                phone: s("+91-124-4973-838"),
                website: s("www.goindigo.in"),
            },
            compliance: Compliance {
                kyc: s("Verified"),
                insurance: s("Active"),
                license: s("Valid"),
                safety: s("Grade A+"),
            },
            business: Business {
                fleet: 279,
                routes: 87,
                employees: 23_000,
                monthly_revenue: 78_000_000,
                commission: 2.0,
            },
            documents: Documents {
                license: s("Valid until 2026-08-20"),
                insurance: s("Valid until 2024-12-31"),
                registration: s("Filed 2019-08-20"),
            },
        },
        Airline {
            id: s("AL004"),
            name: s("Jet Airways Revival"),
            code: s("9W"),
            iata_code: s("9W"),
            icao_code: s("JAI"),
            status: AirlineStatus::Suspended,
            registration_date: s("2021-03-12"),
            headquarters: s("Mumbai, India"),
            contact: Contact {
                email: s("revival@jetairways.com"),
                phone: s("+91-22-1234-5678"),
                website: s("www.jetairways.com"),
            },
            compliance: Compliance {
                kyc: s("Expired"),
                insurance: s("Lapsed"),
                license: s("Suspended"),
                safety: s("Under Review"),
            },
            business: Business {
                fleet: 0,
                routes: 0,
                employees: 120,
                monthly_revenue: 0,
                commission: 0.0,
            },
            documents: Documents {
                license: s("Suspended since 2023-06-15"),
                insurance: s("Lapsed 2023-05-01"),
                registration: s("Under legal review"),
            },
        },
    ]
}

fn terminal(id: &str, status: &str, capacity: u64) -> Terminal {
    Terminal {
        id: s(id),
        name: format!("Terminal {}", id.trim_start_matches('T')),
        status: s(status),
        capacity,
    }
}

fn runway(id: &str, name: &str, length_m: u32) -> Runway {
    Runway {
        id: s(id),
        name: s(name),
        length_m,
        surface: s("Asphalt"),
    }
}

pub fn airports() -> Vec<Airport> {
    vec![
        Airport {
            id: s("AP001"),
            iata_code: s("DEL"),
            icao_code: s("VIDP"),
            name: s("Indira Gandhi International Airport"),
            city: s("New Delhi"),
            state: s("Delhi"),
            country: s("India"),
            timezone: s("Asia/Kolkata"),
            coordinates: Coordinates { lat: 28.5562, lng: 77.1000 },
            elevation_m: 237,
            terminals: vec![
                terminal("T1", "Active", 20_000_000),
                terminal("T2", "Active", 8_000_000),
                terminal("T3", "Active", 34_000_000),
            ],
            runways: vec![
                runway("RW1", "09/27", 4430),
                runway("RW2", "10/28", 4430),
                runway("RW3", "11/29", 2818),
            ],
            gates: 78,
            airlines: 65,
            daily_flights: 1300,
            passenger_capacity: 62_000_000,
            status: AirportStatus::Active,
            last_updated: s("2024-02-10"),
        },
        Airport {
            id: s("AP002"),
            iata_code: s("BOM"),
            icao_code: s("VABB"),
            name: s("Chhatrapati Shivaji Maharaj International Airport"),
            city: s("Mumbai"),
            state: s("Maharashtra"),
            country: s("India"),
            timezone: s("Asia/Kolkata"),
            coordinates: Coordinates { lat: 19.0896, lng: 72.8656 },
            elevation_m: 11,
            terminals: vec![
                terminal("T1", "Active", 20_000_000),
                terminal("T2", "Active", 40_000_000),
            ],
            runways: vec![runway("RW1", "09/27", 3445), runway("RW2", "14/32", 2925)],
            gates: 104,
            airlines: 58,
            daily_flights: 980,
            passenger_capacity: 60_000_000,
            status: AirportStatus::Active,
            last_updated: s("2024-02-08"),
        },
        Airport {
            id: s("AP003"),
            iata_code: s("BLR"),
            icao_code: s("VOBL"),
            name: s("Kempegowda International Airport"),
            city: s("Bengaluru"),
            state: s("Karnataka"),
            country: s("India"),
            timezone: s("Asia/Kolkata"),
            coordinates: Coordinates { lat: 13.1979, lng: 77.7063 },
            elevation_m: 920,
            terminals: vec![
                terminal("T1", "Active", 25_000_000),
                terminal("T2", "Under Construction", 25_000_000),
            ],
            runways: vec![runway("RW1", "09/27", 4000), runway("RW2", "14/32", 2743)],
            gates: 58,
            airlines: 42,
            daily_flights: 680,
            passenger_capacity: 25_000_000,
            status: AirportStatus::Active,
            last_updated: s("2024-02-12"),
        },
        Airport {
            id: s("AP004"),
            iata_code: s("GZB"),
            icao_code: s("VIDX"),
            name: s("Hindon Airport"),
            city: s("Ghaziabad"),
            state: s("Uttar Pradesh"),
            country: s("India"),
            timezone: s("Asia/Kolkata"),
            coordinates: Coordinates { lat: 28.7077, lng: 77.3587 },
            elevation_m: 215,
            terminals: vec![terminal("T1", "Active", 1_500_000)],
            runways: vec![runway("RW1", "09/27", 2743)],
            gates: 4,
            airlines: 3,
            daily_flights: 12,
            passenger_capacity: 1_500_000,
            status: AirportStatus::Inactive,
            last_updated: s("2024-01-30"),
        },
        Airport {
            id: s("AP005"),
            iata_code: s("DXB"),
            icao_code: s("OMDB"),
            name: s("Dubai International Airport"),
            city: s("Dubai"),
            state: s("Dubai"),
            country: s("United Arab Emirates"),
            timezone: s("Asia/Dubai"),
            coordinates: Coordinates { lat: 25.2532, lng: 55.3657 },
            elevation_m: 19,
            terminals: vec![
                terminal("T1", "Active", 18_000_000),
                terminal("T3", "Active", 60_000_000),
            ],
            runways: vec![runway("RW1", "12L/30R", 4351), runway("RW2", "12R/30L", 4447)],
            gates: 184,
            airlines: 90,
            daily_flights: 1100,
            passenger_capacity: 90_000_000,
            status: AirportStatus::Active,
            last_updated: s("2024-02-05"),
        },
    ]
}

pub fn cities() -> Vec<City> {
    vec![
        City {
            id: s("CT001"),
            name: s("New Delhi"),
            state: s("Delhi"),
            country: s("India"),
            timezone: s("Asia/Kolkata"),
            airports: vec![s("DEL")],
            population: 32_900_000,
            coordinates: Coordinates { lat: 28.7041, lng: 77.1025 },
        },
        City {
            id: s("CT002"),
            name: s("Mumbai"),
            state: s("Maharashtra"),
            country: s("India"),
            timezone: s("Asia/Kolkata"),
            airports: vec![s("BOM")],
            population: 20_400_000,
            coordinates: Coordinates { lat: 19.0760, lng: 72.8777 },
        },
        City {
            id: s("CT003"),
            name: s("Bengaluru"),
            state: s("Karnataka"),
            country: s("India"),
            timezone: s("Asia/Kolkata"),
            airports: vec![s("BLR")],
            population: 13_600_000,
            coordinates: Coordinates { lat: 12.9716, lng: 77.5946 },
        },
        City {
            id: s("CT004"),
            name: s("Dubai"),
            state: s("Dubai"),
            country: s("United Arab Emirates"),
            timezone: s("Asia/Dubai"),
            airports: vec![s("DXB")],
            population: 3_600_000,
            coordinates: Coordinates { lat: 25.2048, lng: 55.2708 },
        },
    ]
}

fn at(day: u32, hour: u32, minute: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2025, 3, day)
        .and_then(|d| d.and_hms_opt(hour, minute, 0))
        .unwrap_or_default()
}

#[allow(clippy::too_many_arguments)]
fn flight(
    id: &str,
    airline: (&str, &str),
    number: &str,
    dep: NaiveDateTime,
    duration_minutes: u32,
    stops: u8,
    price: u32,
    refundable: bool,
) -> Flight {
    Flight {
        id: s(id),
        airline_code: s(airline.0),
        airline_name: s(airline.1),
        flight_number: s(number),
        from: s("DEL"),
        to: s("BLR"),
        departure: dep,
        arrival: dep + chrono::Duration::minutes(i64::from(duration_minutes)),
        duration_minutes,
        stops,
        price,
        refundable,
    }
}

pub fn flights() -> Vec<Flight> {
    const AI: (&str, &str) = ("AI", "Air India");
    const INDIGO: (&str, &str) = ("6E", "IndiGo");
    const SW: (&str, &str) = ("SW", "SkyWings Express");

    vec![
        flight("FL001", INDIGO, "6E 2134", at(15, 6, 10), 165, 0, 89, false),
        flight("FL002", AI, "AI 503", at(15, 9, 45), 170, 0, 142, true),
        flight("FL003", INDIGO, "6E 5051", at(15, 13, 20), 290, 1, 76, false),
        flight("FL004", SW, "SW 118", at(15, 17, 55), 175, 0, 99, true),
        flight("FL005", AI, "AI 807", at(15, 20, 30), 410, 2, 121, true),
        flight("FL006", INDIGO, "6E 6789", at(15, 22, 40), 160, 0, 104, true),
        flight("FL007", AI, "AI 1401", at(15, 2, 15), 175, 0, 95, true),
    ]
}
