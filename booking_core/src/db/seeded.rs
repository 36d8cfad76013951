//! Deterministic pseudo-random values keyed on a string seed.
//!
//! The mock backend derives booking status, vehicle type and price from the
//! booking id so the same booking looks identical across calls and restarts.

use crate::models::BookingStatus;

/// Resolution of the seeded fraction.
const BUCKETS: u32 = 10_000;

pub const VEHICLE_TYPES: [&str; 5] = [
    "Compact Campervan",
    "Family Motorhome",
    "Luxury RV",
    "Adventure Van",
    "Eco Camper",
];

/// 32-bit string hash over UTF-16 code units (`h = h * 31 + c`, wrapping).
pub fn seed_hash(seed: &str) -> i32 {
    seed.encode_utf16().fold(0i32, |hash, unit| {
        hash.wrapping_shl(5)
            .wrapping_sub(hash)
            .wrapping_add(i32::from(unit))
    })
}

fn bucket(seed: &str) -> u32 {
    seed_hash(seed).unsigned_abs() % BUCKETS
}

/// Seeded value in `[0, 1)`.
pub fn seeded_random(seed: &str) -> f64 {
    f64::from(bucket(seed)) / f64::from(BUCKETS)
}

/// Seeded index into a collection of `len` items.
pub fn seeded_index(seed: &str, len: usize) -> usize {
    if len == 0 {
        return 0;
    }
    (bucket(seed) as usize * len) / BUCKETS as usize
}

pub fn seeded_status(booking_id: &str) -> BookingStatus {
    let statuses = BookingStatus::ALL;
    statuses[seeded_index(&format!("{}-status", booking_id), statuses.len())]
}

pub fn seeded_vehicle_type(booking_id: &str) -> &'static str {
    VEHICLE_TYPES[seeded_index(&format!("{}-vehicle", booking_id), VEHICLE_TYPES.len())]
}

/// Total price in `[200, 1200)`.
pub fn seeded_price(booking_id: &str) -> u32 {
    bucket(&format!("{}-price", booking_id)) / 10 + 200
}

/// `"Elmira Larkin Sr."` -> `"elmira.larkin.sr.@example.com"`
pub fn customer_email(customer_name: &str) -> String {
    let mut local = String::with_capacity(customer_name.len());
    let mut in_space = false;
    for c in customer_name.to_lowercase().chars() {
        if c.is_whitespace() {
            if !in_space {
                local.push('.');
            }
            in_space = true;
        } else {
            local.push(c);
            in_space = false;
        }
    }
    format!("{}@example.com", local)
}
