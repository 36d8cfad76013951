#[cfg(test)]
mod tests {
    use crate::models::{Booking, BookingStatus};
    use crate::services::calendar::*;
    use chrono::NaiveDate;

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn booking(id: &str, pickup: &str, ret: &str) -> Booking {
        Booking {
            id: id.to_string(),
            customer_name: "Test".to_string(),
            station_id: "1".to_string(),
            station_name: "Berlin".to_string(),
            pickup_date: pickup.to_string(),
            return_date: ret.to_string(),
            duration: 1,
            status: BookingStatus::Confirmed,
            vehicle_model: None,
        }
    }

    #[test]
    fn test_build_week_layout() {
        let days = build_week(day(2025, 8, 13), &[], day(2025, 8, 14));
        assert_eq!(days.len(), 7);
        assert_eq!(days[0].date, day(2025, 8, 11));
        assert_eq!(days[6].date, day(2025, 8, 17));
        assert!(days[3].is_today);
        assert_eq!(days.iter().filter(|d| d.is_today).count(), 1);
        assert!(days[5].is_weekend && days[6].is_weekend);
        assert!(!days[4].is_weekend);
    }

    #[test]
    fn test_build_week_distributes_bookings() {
        let bookings = vec![
            booking("a", "2025-08-12T10:00", "2025-08-14T10:00"),
            booking("b", "2025-08-17T09:00", "2025-08-20T09:00"),
        ];
        let days = build_week(day(2025, 8, 11), &bookings, day(2000, 1, 1));

        let counts: Vec<usize> = days.iter().map(|d| d.bookings.len()).collect();
        assert_eq!(counts, vec![0, 1, 1, 1, 0, 0, 1]);
        assert_eq!(days[6].bookings[0].id, "b");
    }

    #[test]
    fn test_week_title_single_month() {
        assert_eq!(week_title(day(2025, 8, 13)), "August 2025");
    }

    #[test]
    fn test_week_title_spanning_months() {
        assert_eq!(week_title(day(2025, 7, 30)), "July - August 2025");
        assert_eq!(week_subtitle(day(2025, 7, 30)), "28 - 3");
    }

    #[test]
    fn test_week_subtitle() {
        assert_eq!(week_subtitle(day(2025, 8, 13)), "11 - 17");
    }
}
