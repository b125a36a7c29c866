use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{Cents, Denomination};

pub type ShiftId = Uuid;

/// A counted stack of banknotes of one face value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BanknoteCount {
    pub denomination: Denomination,
    pub count: u32,
}

impl BanknoteCount {
    pub fn new(denomination: Denomination, count: u32) -> Self {
        Self {
            denomination,
            count,
        }
    }

    pub fn amount(&self) -> Cents {
        self.denomination * self.count as Cents
    }
}

/// Total value of a physical banknote count.
pub fn count_cash(banknotes: &[BanknoteCount]) -> Cents {
    banknotes.iter().map(BanknoteCount::amount).sum()
}

/// A cashier's single open-to-close work session with its own cash drawer.
///
/// The drawer ledger (`drawer`) tracks what the cashier believes is in the
/// till while the shift runs. The closing total is *not* derived from it:
/// the physically counted `final_banknotes` supplied at close time are
/// authoritative, so a miscounted drawer never leaks into the books.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Shift {
    pub id: ShiftId,
    pub opened_at: DateTime<Utc>,
    pub closed_at: Option<DateTime<Utc>>,
    /// Cash float the shift started with.
    pub initial_deposit: Cents,
    /// Blank card stock handed over at open, if tracked.
    pub initial_card_count: Option<u32>,
    /// Running denomination -> count ledger. Never holds a zero count.
    pub drawer: BTreeMap<Denomination, u32>,
    /// Physically counted notes supplied at close.
    pub final_banknotes: Option<Vec<BanknoteCount>>,
    pub remaining_cards: Option<u32>,
    /// Computed at close from `final_banknotes` only.
    pub total_amount: Option<Cents>,
}

impl Shift {
    /// Open a fresh shift with an empty drawer ledger.
    pub fn open(initial_deposit: Cents, initial_card_count: Option<u32>) -> Self {
        Self {
            id: Uuid::new_v4(),
            opened_at: Utc::now(),
            closed_at: None,
            initial_deposit,
            initial_card_count,
            drawer: BTreeMap::new(),
            final_banknotes: None,
            remaining_cards: None,
            total_amount: None,
        }
    }

    pub fn is_closed(&self) -> bool {
        self.closed_at.is_some()
    }

    /// Merge banknotes into the drawer ledger. The caller guarantees the
    /// denomination and count are positive.
    pub fn add_banknotes(&mut self, denomination: Denomination, count: u32) {
        *self.drawer.entry(denomination).or_insert(0) += count;
    }

    /// Take banknotes out of the drawer ledger. An absent denomination is a
    /// no-op, and removing at least as many notes as are present deletes the
    /// entry instead of storing zero.
    ///
    /// An over-removal is clamped silently rather than rejected. This mirrors
    /// how the counters operate today; revisit before relying on the drawer
    /// ledger for anything beyond an on-screen hint.
    pub fn remove_banknotes(&mut self, denomination: Denomination, count: u32) {
        if let Some(present) = self.drawer.get(&denomination).copied() {
            if present <= count {
                self.drawer.remove(&denomination);
            } else {
                self.drawer.insert(denomination, present - count);
            }
        }
    }

    /// Running drawer value. Display-only; closing totals come from the
    /// physical count instead.
    pub fn drawer_total(&self) -> Cents {
        self.drawer
            .iter()
            .map(|(denomination, count)| denomination * *count as Cents)
            .sum()
    }

    /// Close the shift against a physical count. The supplied banknotes are
    /// authoritative for `total_amount` regardless of the drawer ledger.
    pub fn close(mut self, final_banknotes: Vec<BanknoteCount>, remaining_cards: Option<u32>) -> Self {
        self.total_amount = Some(count_cash(&final_banknotes));
        self.final_banknotes = Some(final_banknotes);
        self.remaining_cards = remaining_cards;
        self.closed_at = Some(Utc::now());
        self
    }
}
