//! Seed dataset served by the mock backend.

use std::collections::BTreeMap;
use std::sync::OnceLock;

use crate::models::{RawBooking, Station};

/// Read-only stations and raw bookings keyed by station id.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    stations: Vec<Station>,
    bookings: BTreeMap<String, Vec<RawBooking>>,
}

impl Catalog {
    pub fn new(stations: Vec<Station>, bookings: Vec<RawBooking>) -> Self {
        let mut by_station: BTreeMap<String, Vec<RawBooking>> = BTreeMap::new();
        for booking in bookings {
            by_station
                .entry(booking.pickup_return_station_id.clone())
                .or_default()
                .push(booking);
        }
        Self {
            stations,
            bookings: by_station,
        }
    }

    /// The built-in dataset, constructed once per process.
    pub fn seed() -> &'static Catalog {
        static SEED: OnceLock<Catalog> = OnceLock::new();
        SEED.get_or_init(|| Catalog::new(seed_stations(), seed_bookings()))
    }

    pub fn stations(&self) -> &[Station] {
        &self.stations
    }

    pub fn station(&self, id: &str) -> Option<&Station> {
        self.stations.iter().find(|s| s.id == id)
    }

    /// Raw bookings of one station; empty for unknown stations.
    pub fn bookings_for(&self, station_id: &str) -> &[RawBooking] {
        self.bookings
            .get(station_id)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// First raw booking with `id`, scanning stations in key order.
    pub fn find_booking(&self, id: &str) -> Option<(&str, &RawBooking)> {
        self.bookings.iter().find_map(|(station_id, bookings)| {
            bookings
                .iter()
                .find(|b| b.id == id)
                .map(|b| (station_id.as_str(), b))
        })
    }

    pub fn booking_count(&self) -> usize {
        self.bookings.values().map(Vec::len).sum()
    }
}

fn seed_stations() -> Vec<Station> {
    vec![
        Station::new(
            "1",
            "Berlin",
            "Berlin Hauptbahnhof, Europaplatz 1, 10557 Berlin, Germany",
        ),
        Station::new(
            "2",
            "Munich",
            "München Hauptbahnhof, Bayerstraße 10A, 80335 München, Germany",
        ),
        Station::new(
            "3",
            "Frankfurt",
            "Frankfurt Hauptbahnhof, Am Hauptbahnhof, 60329 Frankfurt am Main, Germany",
        ),
        Station::new(
            "4",
            "Lisbon",
            "Gare do Oriente, Av. Dom João II, 1990-233 Lisboa, Portugal",
        ),
        Station::new(
            "5",
            "Barcelona",
            "Barcelona Sants, Plaça dels Països Catalans, s/n, 08014 Barcelona, Spain",
        ),
        Station::new(
            "6",
            "Lyon",
            "Gare de Lyon-Part-Dieu, Bd Vivier Merle, 69003 Lyon, France",
        ),
        Station::new("7", "station-name7", "Example Station Address 7"),
    ]
}

fn raw(
    id: &str,
    station_id: &str,
    customer_name: &str,
    start_date: &str,
    end_date: &str,
    stations: Option<(&str, &str)>,
) -> RawBooking {
    RawBooking {
        id: id.to_string(),
        customer_name: customer_name.to_string(),
        start_date: start_date.to_string(),
        end_date: end_date.to_string(),
        pickup_return_station_id: station_id.to_string(),
        pickup_station: stations.map(|(pickup, _)| pickup.to_string()),
        return_station: stations.map(|(_, ret)| ret.to_string()),
    }
}

fn seed_bookings() -> Vec<RawBooking> {
    const BERLIN: Option<(&str, &str)> = Some(("Berlin Hbf", "Berlin Hbf"));
    const MUNICH: Option<(&str, &str)> = Some(("Munich Hbf", "Munich Hbf"));

    vec![
        // Station 1
        raw("1", "1", "Kera", "2021-03-13T22:04:19.032Z", "2021-07-17T08:51:27.402Z", None),
        raw("7", "1", "Elmira Larkin Sr.", "2021-02-19T17:22:15.117Z", "2021-08-10T10:35:41.773Z", None),
        raw("51", "1", "Tyree O'Connell", "2025-04-16T02:28:00.000Z", "2025-04-18T01:28:00.000Z", None),
        raw("75", "1", "Yolanda Corwin", "2025-04-11T01:45:00.000Z", "2025-04-26T01:45:00.000Z", None),
        raw("87", "1", "Lance Schmeler", "2026-04-09T13:33:00.000Z", "2026-04-24T13:33:00.000Z", None),
        raw("100", "1", "john doe", "2025-08-07", "2025-08-09", Some(("Berlin Hbf", "Munich Hbf"))),
        raw("102", "1", "Alice Smith", "2025-08-08T10:00:00.000Z", "2025-08-12T18:00:00.000Z", BERLIN),
        raw("103", "1", "Bob Johnson", "2025-08-09T14:00:00.000Z", "2025-08-11T12:00:00.000Z", BERLIN),
        raw("104", "1", "Charlie Brown", "2025-08-10T09:00:00.000Z", "2025-08-17T17:00:00.000Z", BERLIN),
        raw("105", "1", "Diana Prince", "2025-08-06T08:00:00.000Z", "2025-08-13T20:00:00.000Z", BERLIN),
        // Station 2
        raw("2", "2", "Carroll Doyle", "2020-06-16T23:11:29.630Z", "2021-07-10T20:30:58.997Z", None),
        raw("8", "2", "Jimmy Bogisich", "2021-03-26T02:40:54.086Z", "2021-06-14T13:30:40.341Z", None),
        raw("106", "2", "Eva Martinez", "2025-08-09T12:00:00.000Z", "2025-08-16T15:00:00.000Z", MUNICH),
        raw("107", "2", "Frank Wilson", "2025-08-11T16:00:00.000Z", "2025-08-14T10:00:00.000Z", MUNICH),
        // Station 6
        raw("101", "6", "New Customer", "2025-08-10", "2025-08-15", Some(("Lyon", "Lyon"))),
    ]
}
