use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::application::{ReservationRegistry, ShiftLedger};
use crate::domain::GroupReservation;

/// Durable state carried between CLI invocations: the station's shift
/// ledger and the exported reservation records.
///
/// This is the whole persistence contract of the core — collaborators load
/// a snapshot, invoke operations, and save the result. How the file is
/// stored, replicated, or migrated is their concern, not the core's.
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct Snapshot {
    pub ledger: ShiftLedger,
    /// Reservations in registration order.
    pub reservations: Vec<GroupReservation>,
}

impl Snapshot {
    /// Capture the current state of the services.
    pub fn capture(ledger: ShiftLedger, registry: &ReservationRegistry) -> Self {
        Self {
            ledger,
            reservations: registry.export(),
        }
    }

    /// Load a snapshot from disk. A missing file yields empty state, so the
    /// first invocation needs no init step.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let raw = fs::read_to_string(path)
            .with_context(|| format!("Failed to read data file {}", path.display()))?;
        serde_json::from_str(&raw)
            .with_context(|| format!("Failed to parse data file {}", path.display()))
    }

    /// Write the snapshot to disk.
    pub fn save(&self, path: &Path) -> Result<()> {
        let raw = serde_json::to_string_pretty(self).context("Failed to serialize state")?;
        fs::write(path, raw)
            .with_context(|| format!("Failed to write data file {}", path.display()))
    }

    /// Rebuild the reservation registry from the stored records.
    pub fn into_services(self) -> (ShiftLedger, ReservationRegistry) {
        (
            self.ledger,
            ReservationRegistry::from_records(self.reservations),
        )
    }
}
