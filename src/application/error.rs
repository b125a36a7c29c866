use thiserror::Error;

use crate::domain::{ReservationStatus, ValidationError};

#[derive(Error, Debug)]
pub enum AppError {
    // Shift ledger
    #[error("A shift is already open; close it before opening another")]
    ShiftAlreadyOpen,

    #[error("No shift is currently open")]
    NoOpenShift,

    #[error("Invalid amount: {0}")]
    InvalidAmount(String),

    // Reservation registry
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("Reservation not found: {0}")]
    ReservationNotFound(String),

    #[error("Reservation {id} cannot be confirmed while {status}")]
    NotConfirmable {
        id: String,
        status: ReservationStatus,
    },

    #[error("Reservation {id} is not awaiting payment (status: {status})")]
    NotAwaitingPayment {
        id: String,
        status: ReservationStatus,
    },

    #[error("Reservation {id} is not paid (status: {status}); ticket cannot be issued")]
    NotPayable {
        id: String,
        status: ReservationStatus,
    },

    #[error("Ticket already issued for reservation {0}")]
    AlreadyIssued(String),

    #[error("Reservation {0} is already cancelled")]
    AlreadyCancelled(String),

    #[error("Reservation {id} cannot be cancelled while {status}")]
    NotCancellable {
        id: String,
        status: ReservationStatus,
    },

    #[error("Cancellation requires a reason")]
    EmptyCancelReason,

    #[error("Storage error: {0}")]
    Storage(#[from] anyhow::Error),
}
