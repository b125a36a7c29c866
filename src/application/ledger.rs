use serde::{Deserialize, Serialize};

use crate::domain::{BanknoteCount, Cents, Denomination, Shift};

use super::AppError;

/// Owns the cash-drawer state of one cashier station: at most one open shift
/// at a time, plus the append-only history of closed shifts.
///
/// Each station constructs and owns its own ledger; the type is deliberately
/// not shared. All operations are synchronous state transitions with no I/O,
/// validated before any mutation.
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct ShiftLedger {
    active: Option<Shift>,
    /// Closed shifts, most recent first.
    history: Vec<Shift>,
}

impl ShiftLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Open a new shift with the given cash float.
    pub fn open_shift(
        &mut self,
        deposit: Cents,
        card_count: Option<u32>,
    ) -> Result<&Shift, AppError> {
        if self.active.is_some() {
            return Err(AppError::ShiftAlreadyOpen);
        }
        Ok(self.active.insert(Shift::open(deposit, card_count)))
    }

    /// Record banknotes entering the drawer.
    pub fn add_banknote(
        &mut self,
        denomination: Denomination,
        count: u32,
    ) -> Result<(), AppError> {
        if denomination <= 0 {
            return Err(AppError::InvalidAmount(
                "denomination must be positive".to_string(),
            ));
        }
        if count == 0 {
            return Err(AppError::InvalidAmount(
                "banknote count must be positive".to_string(),
            ));
        }
        let shift = self.active.as_mut().ok_or(AppError::NoOpenShift)?;
        shift.add_banknotes(denomination, count);
        Ok(())
    }

    /// Record banknotes leaving the drawer. Removing from an absent
    /// denomination is a no-op; over-removal clamps (see
    /// [`Shift::remove_banknotes`]).
    pub fn remove_banknote(
        &mut self,
        denomination: Denomination,
        count: u32,
    ) -> Result<(), AppError> {
        let shift = self.active.as_mut().ok_or(AppError::NoOpenShift)?;
        shift.remove_banknotes(denomination, count);
        Ok(())
    }

    /// Close the open shift against the physically counted banknotes and
    /// move it to the front of the history.
    pub fn close_shift(
        &mut self,
        final_banknotes: Vec<BanknoteCount>,
        remaining_cards: Option<u32>,
    ) -> Result<&Shift, AppError> {
        let shift = self.active.take().ok_or(AppError::NoOpenShift)?;
        self.history
            .insert(0, shift.close(final_banknotes, remaining_cards));
        Ok(&self.history[0])
    }

    pub fn current_shift(&self) -> Option<&Shift> {
        self.active.as_ref()
    }

    /// Closed shifts, most recent first.
    pub fn history(&self) -> &[Shift] {
        &self.history
    }
}
