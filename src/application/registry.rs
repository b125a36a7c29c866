use std::collections::HashMap;
use std::sync::{Arc, Mutex, RwLock, RwLockReadGuard, RwLockWriteGuard};

use chrono::Utc;

use crate::domain::{
    Cents, GroupReservation, ReservationForm, ReservationId, ReservationStatus,
    generate_reservation_token,
};

use super::AppError;

/// Outcome of a successful cancellation. The status transition and the
/// side-effect signals are produced together, in one value, so the caller
/// observes them atomically: seats are always released, and a refund is due
/// only when the group had already paid.
#[derive(Debug, Clone)]
pub struct Cancellation {
    pub reservation: GroupReservation,
    pub seats_released: bool,
    pub refund_due: bool,
}

#[derive(Default)]
struct Inner {
    entries: HashMap<ReservationId, Arc<Mutex<GroupReservation>>>,
    /// Ids in registration order, oldest first.
    order: Vec<ReservationId>,
}

/// Shared keyed store of group reservations across cashier stations.
///
/// Every reservation lives behind its own mutex, so mutating operations on
/// the same id serialize while different ids proceed independently. All
/// operations are synchronous, validate-then-commit state transitions; a
/// rejected call never mutates, and a committed transition is final.
#[derive(Default)]
pub struct ReservationRegistry {
    inner: RwLock<Inner>,
}

impl ReservationRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuild a registry from previously exported records, preserving their
    /// registration order.
    pub fn from_records(records: Vec<GroupReservation>) -> Self {
        let mut inner = Inner::default();
        for record in records {
            inner.order.push(record.id.clone());
            inner
                .entries
                .insert(record.id.clone(), Arc::new(Mutex::new(record)));
        }
        Self {
            inner: RwLock::new(inner),
        }
    }

    fn read_inner(&self) -> RwLockReadGuard<'_, Inner> {
        self.inner.read().unwrap_or_else(|e| e.into_inner())
    }

    fn write_inner(&self) -> RwLockWriteGuard<'_, Inner> {
        self.inner.write().unwrap_or_else(|e| e.into_inner())
    }

    /// Run a mutation against one reservation under its per-id lock.
    fn with_entry<T>(
        &self,
        id: &str,
        op: impl FnOnce(&mut GroupReservation) -> Result<T, AppError>,
    ) -> Result<T, AppError> {
        let entry = self
            .read_inner()
            .entries
            .get(id)
            .cloned()
            .ok_or_else(|| AppError::ReservationNotFound(id.to_string()))?;
        let mut reservation = entry.lock().unwrap_or_else(|e| e.into_inner());
        op(&mut reservation)
    }

    /// Validate a registration form and store a new Pending reservation
    /// under a fresh unique token.
    pub fn register(&self, form: ReservationForm) -> Result<GroupReservation, AppError> {
        form.validate()?;

        let mut inner = self.write_inner();
        let id = loop {
            let candidate = generate_reservation_token();
            if !inner.entries.contains_key(&candidate) {
                break candidate;
            }
        };

        let reservation = form.into_reservation(id.clone());
        inner.order.push(id.clone());
        inner
            .entries
            .insert(id, Arc::new(Mutex::new(reservation.clone())));
        Ok(reservation)
    }

    /// Record that the group accepted the offer: Pending -> Confirmed.
    pub fn confirm(&self, id: &str) -> Result<GroupReservation, AppError> {
        self.with_entry(id, |reservation| {
            if reservation.status != ReservationStatus::Pending {
                return Err(AppError::NotConfirmable {
                    id: reservation.id.clone(),
                    status: reservation.status,
                });
            }
            reservation.status = ReservationStatus::Confirmed;
            Ok(reservation.clone())
        })
    }

    /// Record a settled payment from the payment collaborator:
    /// Confirmed -> Paid, capturing the amount as the final price.
    pub fn settle_payment(&self, id: &str, amount: Cents) -> Result<GroupReservation, AppError> {
        self.with_entry(id, |reservation| {
            if reservation.status != ReservationStatus::Confirmed {
                return Err(AppError::NotAwaitingPayment {
                    id: reservation.id.clone(),
                    status: reservation.status,
                });
            }
            reservation.status = ReservationStatus::Paid;
            reservation.final_price = Some(amount);
            Ok(reservation.clone())
        })
    }

    /// Issue the group ticket: Paid -> TicketIssued.
    pub fn issue_ticket(&self, id: &str) -> Result<GroupReservation, AppError> {
        self.with_entry(id, |reservation| {
            match reservation.status {
                ReservationStatus::TicketIssued => Err(AppError::AlreadyIssued(
                    reservation.id.clone(),
                )),
                ReservationStatus::Paid => {
                    reservation.status = ReservationStatus::TicketIssued;
                    Ok(reservation.clone())
                }
                status => Err(AppError::NotPayable {
                    id: reservation.id.clone(),
                    status,
                }),
            }
        })
    }

    /// Cancel a reservation, irreversibly. Preconditions are checked in
    /// order: blank reason, unknown id, already cancelled, not yet
    /// cancellable (Pending). On success the terminal status and the
    /// release/refund signals are committed and returned together.
    pub fn cancel(&self, id: &str, reason: &str) -> Result<Cancellation, AppError> {
        if reason.trim().is_empty() {
            return Err(AppError::EmptyCancelReason);
        }

        self.with_entry(id, |reservation| {
            if reservation.status == ReservationStatus::Cancelled {
                return Err(AppError::AlreadyCancelled(reservation.id.clone()));
            }
            if !reservation.status.is_cancellable() {
                return Err(AppError::NotCancellable {
                    id: reservation.id.clone(),
                    status: reservation.status,
                });
            }

            let prior = reservation.status;
            reservation.status = ReservationStatus::Cancelled;
            reservation.cancel_reason = Some(reason.trim().to_string());
            reservation.cancelled_at = Some(Utc::now());

            Ok(Cancellation {
                reservation: reservation.clone(),
                seats_released: true,
                refund_due: prior.refund_on_cancel(),
            })
        })
    }

    /// Look up a reservation by id.
    pub fn get(&self, id: &str) -> Result<GroupReservation, AppError> {
        self.with_entry(id, |reservation| Ok(reservation.clone()))
    }

    /// All reservations, most recently registered first.
    pub fn list(&self) -> Vec<GroupReservation> {
        let inner = self.read_inner();
        inner
            .order
            .iter()
            .rev()
            .filter_map(|id| inner.entries.get(id))
            .map(|entry| entry.lock().unwrap_or_else(|e| e.into_inner()).clone())
            .collect()
    }

    /// Snapshot of all records in registration order, for the storage
    /// collaborator.
    pub fn export(&self) -> Vec<GroupReservation> {
        let inner = self.read_inner();
        inner
            .order
            .iter()
            .filter_map(|id| inner.entries.get(id))
            .map(|entry| entry.lock().unwrap_or_else(|e| e.into_inner()).clone())
            .collect()
    }
}
