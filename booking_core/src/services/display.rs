//! How a booking is labeled on a given calendar day.

use chrono::NaiveDate;

use crate::models::{Booking, BookingStatus};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BookingDayKind {
    Pickup,
    Return,
    PickupAndReturn,
    Ongoing,
}

impl BookingDayKind {
    pub fn label(&self) -> &'static str {
        match self {
            BookingDayKind::Pickup => "Pickup",
            BookingDayKind::Return => "Return",
            BookingDayKind::PickupAndReturn => "Pickup & Return",
            BookingDayKind::Ongoing => "Ongoing",
        }
    }

    /// Card style; a same-day booking is styled as a pickup.
    pub fn card_type(&self) -> &'static str {
        match self {
            BookingDayKind::Pickup | BookingDayKind::PickupAndReturn => "pickup",
            BookingDayKind::Return => "return",
            BookingDayKind::Ongoing => "ongoing",
        }
    }
}

pub fn booking_day_kind(booking: &Booking, date: NaiveDate) -> BookingDayKind {
    let picks_up = booking.pickup().is_some_and(|p| p.date() == date);
    let returns = booking.return_at().is_some_and(|r| r.date() == date);
    match (picks_up, returns) {
        (true, true) => BookingDayKind::PickupAndReturn,
        (true, false) => BookingDayKind::Pickup,
        (false, true) => BookingDayKind::Return,
        (false, false) => BookingDayKind::Ongoing,
    }
}

pub fn status_css_class(status: BookingStatus) -> &'static str {
    match status {
        BookingStatus::Confirmed => "booking-status-confirmed",
        BookingStatus::InProgress => "booking-status-in-progress",
        BookingStatus::Completed => "booking-status-completed",
        BookingStatus::Cancelled => "booking-status-cancelled",
    }
}

/// CSS class for a raw status string, with a fallback for unknown values.
pub fn status_css_class_for(status: &str) -> &'static str {
    status
        .parse::<BookingStatus>()
        .map(status_css_class)
        .unwrap_or("booking-status-default")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn booking(pickup: &str, ret: &str) -> Booking {
        Booking {
            id: "1".into(),
            customer_name: "A".into(),
            station_id: "1".into(),
            station_name: "Berlin".into(),
            pickup_date: pickup.into(),
            return_date: ret.into(),
            duration: 1,
            status: BookingStatus::Confirmed,
            vehicle_model: None,
        }
    }

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 8, d).unwrap()
    }

    #[test]
    fn test_day_kinds() {
        let b = booking("2025-08-09T10:00", "2025-08-12T18:00");
        assert_eq!(booking_day_kind(&b, day(9)), BookingDayKind::Pickup);
        assert_eq!(booking_day_kind(&b, day(10)).label(), "Ongoing");
        assert_eq!(booking_day_kind(&b, day(12)).card_type(), "return");

        let same_day = booking("2025-08-09T08:00", "2025-08-09T18:00");
        let kind = booking_day_kind(&same_day, day(9));
        assert_eq!(kind.label(), "Pickup & Return");
        assert_eq!(kind.card_type(), "pickup");
    }

    #[test]
    fn test_status_classes() {
        assert_eq!(status_css_class(BookingStatus::InProgress), "booking-status-in-progress");
        assert_eq!(status_css_class_for("cancelled"), "booking-status-cancelled");
        assert_eq!(status_css_class_for("pending"), "booking-status-default");
    }
}
