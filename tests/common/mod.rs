use chrono::{NaiveDate, NaiveTime};
use peron::domain::{GroupType, ReservationForm};

/// A registration form that passes every validation rule, to be overridden
/// per test with struct update syntax.
pub fn sample_form() -> ReservationForm {
    ReservationForm {
        leader_name: "Maria Georgieva".into(),
        email: "maria@example.com".into(),
        phone: "+359 87 654 3210".into(),
        total_passengers: 15,
        children_under_7: 1,
        discount_passengers: 4,
        group_type: Some(GroupType::Students),
        from_station: "Sofia".into(),
        to_station: "Varna".into(),
        departure_date: NaiveDate::from_ymd_opt(2026, 10, 2),
        departure_time: NaiveTime::from_hms_opt(7, 15, 0),
        round_trip: false,
        return_date: None,
        return_time: None,
        notes: None,
    }
}
