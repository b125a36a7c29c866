use chrono::{NaiveDate, NaiveTime, Utc};
use rand::Rng;

use super::{
    ContactInfo, GroupReservation, GroupType, MIN_GROUP_SIZE, ReservationId, ReservationStatus,
    Route, TripSchedule,
};

const TOKEN_LEN: usize = 8;
const TOKEN_CHARSET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";

/// Generate a candidate reservation token: 8 uppercase alphanumerics.
/// Uniqueness is the registry's responsibility, not the generator's.
pub fn generate_reservation_token() -> ReservationId {
    let mut rng = rand::thread_rng();
    (0..TOKEN_LEN)
        .map(|_| TOKEN_CHARSET[rng.gen_range(0..TOKEN_CHARSET.len())] as char)
        .collect()
}

/// Raw registration input as captured at the counter, before validation.
#[derive(Debug, Clone, Default)]
pub struct ReservationForm {
    pub leader_name: String,
    pub email: String,
    pub phone: String,
    pub total_passengers: u32,
    pub children_under_7: u32,
    pub discount_passengers: u32,
    pub group_type: Option<GroupType>,
    pub from_station: String,
    pub to_station: String,
    pub departure_date: Option<NaiveDate>,
    pub departure_time: Option<NaiveTime>,
    pub round_trip: bool,
    pub return_date: Option<NaiveDate>,
    pub return_time: Option<NaiveTime>,
    pub notes: Option<String>,
}

impl ReservationForm {
    /// Check the registration rules in their fixed order and report the
    /// first one that fails:
    ///
    /// 1. all required fields present
    /// 2. departure and destination stations differ
    /// 3. at least MIN_GROUP_SIZE passengers
    /// 4. round trips carry both a return date and a return time
    pub fn validate(&self) -> Result<(), ValidationError> {
        for (name, present) in [
            ("leader_name", !self.leader_name.trim().is_empty()),
            ("email", !self.email.trim().is_empty()),
            ("phone", !self.phone.trim().is_empty()),
            ("group_type", self.group_type.is_some()),
            ("from_station", !self.from_station.trim().is_empty()),
            ("to_station", !self.to_station.trim().is_empty()),
            ("departure_date", self.departure_date.is_some()),
            ("departure_time", self.departure_time.is_some()),
        ] {
            if !present {
                return Err(ValidationError::MissingField(name));
            }
        }

        if self.from_station.trim() == self.to_station.trim() {
            return Err(ValidationError::IdenticalStations);
        }

        if self.total_passengers < MIN_GROUP_SIZE {
            return Err(ValidationError::GroupTooSmall {
                given: self.total_passengers,
            });
        }

        if self.round_trip && (self.return_date.is_none() || self.return_time.is_none()) {
            return Err(ValidationError::MissingReturnInfo);
        }

        Ok(())
    }

    /// Build the Pending reservation record for a validated form.
    /// Call only after `validate` has passed; the option fields are
    /// guaranteed present at that point.
    pub(crate) fn into_reservation(self, id: ReservationId) -> GroupReservation {
        let departure = TripSchedule {
            date: self.departure_date.unwrap_or_default(),
            time: self.departure_time.unwrap_or_default(),
        };
        let return_trip = match (self.round_trip, self.return_date, self.return_time) {
            (true, Some(date), Some(time)) => Some(TripSchedule { date, time }),
            _ => None,
        };

        GroupReservation {
            id,
            leader_name: self.leader_name,
            contact: ContactInfo {
                email: self.email,
                phone: self.phone,
            },
            total_passengers: self.total_passengers,
            children_under_7: self.children_under_7,
            discount_passengers: self.discount_passengers,
            group_type: self.group_type.unwrap_or(GroupType::Other),
            route: Route {
                from_station: self.from_station,
                to_station: self.to_station,
            },
            departure,
            return_trip,
            notes: self.notes,
            status: ReservationStatus::Pending,
            final_price: None,
            registered_at: Utc::now(),
            cancel_reason: None,
            cancelled_at: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    MissingField(&'static str),
    IdenticalStations,
    GroupTooSmall { given: u32 },
    MissingReturnInfo,
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ValidationError::MissingField(name) => write!(f, "required field missing: {}", name),
            ValidationError::IdenticalStations => {
                write!(f, "departure and destination stations must differ")
            }
            ValidationError::GroupTooSmall { given } => write!(
                f,
                "group has {} passengers, minimum is {}",
                given, MIN_GROUP_SIZE
            ),
            ValidationError::MissingReturnInfo => {
                write!(f, "round trip requires a return date and time")
            }
        }
    }
}

impl std::error::Error for ValidationError {}
