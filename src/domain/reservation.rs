use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};

use super::Cents;

/// Minimum passenger count required to register a group reservation.
pub const MIN_GROUP_SIZE: u32 = 11;

/// Reservation ids are 8-character uppercase tokens, unique per registry.
pub type ReservationId = String;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GroupType {
    Students,
    Kindergarten,
    Other,
}

impl GroupType {
    pub fn as_str(&self) -> &'static str {
        match self {
            GroupType::Students => "students",
            GroupType::Kindergarten => "kindergarten",
            GroupType::Other => "other",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "students" => Some(GroupType::Students),
            "kindergarten" => Some(GroupType::Kindergarten),
            "other" => Some(GroupType::Other),
            _ => None,
        }
    }
}

impl std::fmt::Display for GroupType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Lifecycle of a group reservation. Statuses are ordered; Cancelled is
/// terminal and reachable from every status except Pending.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReservationStatus {
    Pending,
    Confirmed,
    Paid,
    TicketIssued,
    Cancelled,
}

impl ReservationStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ReservationStatus::Pending => "pending",
            ReservationStatus::Confirmed => "confirmed",
            ReservationStatus::Paid => "paid",
            ReservationStatus::TicketIssued => "ticket_issued",
            ReservationStatus::Cancelled => "cancelled",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "pending" => Some(ReservationStatus::Pending),
            "confirmed" => Some(ReservationStatus::Confirmed),
            "paid" => Some(ReservationStatus::Paid),
            "ticket_issued" => Some(ReservationStatus::TicketIssued),
            "cancelled" => Some(ReservationStatus::Cancelled),
            _ => None,
        }
    }

    /// Cancellation is only modeled for reservations that have progressed
    /// past Pending; a Pending record has nothing reserved to release yet.
    pub fn is_cancellable(&self) -> bool {
        matches!(
            self,
            ReservationStatus::Confirmed
                | ReservationStatus::Paid
                | ReservationStatus::TicketIssued
        )
    }

    /// Whether cancelling from this status owes the group a refund.
    pub fn refund_on_cancel(&self) -> bool {
        matches!(self, ReservationStatus::Paid | ReservationStatus::TicketIssued)
    }
}

impl std::fmt::Display for ReservationStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactInfo {
    pub email: String,
    pub phone: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Route {
    pub from_station: String,
    pub to_station: String,
}

/// Date and time of one leg of the trip.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TripSchedule {
    pub date: NaiveDate,
    pub time: NaiveTime,
}

/// A provisional booking for a travel group, progressing through payment,
/// ticket issuance, or cancellation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GroupReservation {
    pub id: ReservationId,
    pub leader_name: String,
    pub contact: ContactInfo,
    pub total_passengers: u32,
    pub children_under_7: u32,
    pub discount_passengers: u32,
    pub group_type: GroupType,
    pub route: Route,
    pub departure: TripSchedule,
    /// Present iff the reservation is a round trip.
    pub return_trip: Option<TripSchedule>,
    pub notes: Option<String>,
    pub status: ReservationStatus,
    /// Recorded by the payment collaborator when the reservation is settled.
    pub final_price: Option<Cents>,
    pub registered_at: DateTime<Utc>,
    pub cancel_reason: Option<String>,
    pub cancelled_at: Option<DateTime<Utc>>,
}

impl GroupReservation {
    pub fn is_round_trip(&self) -> bool {
        self.return_trip.is_some()
    }
}
