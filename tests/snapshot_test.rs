mod common;

use anyhow::Result;
use common::sample_form;
use peron::application::{ReservationRegistry, ShiftLedger};
use peron::domain::BanknoteCount;
use peron::storage::Snapshot;
use tempfile::TempDir;

#[test]
fn test_snapshot_round_trip() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let path = temp_dir.path().join("peron.json");

    let mut ledger = ShiftLedger::new();
    ledger.open_shift(10000, Some(30))?;
    ledger.close_shift(vec![BanknoteCount::new(5000, 3)], Some(22))?;
    ledger.open_shift(20000, None)?;
    ledger.add_banknote(2000, 4)?;

    let registry = ReservationRegistry::new();
    let reservation_id = registry.register(sample_form())?.id;
    registry.confirm(&reservation_id)?;

    Snapshot::capture(ledger, &registry).save(&path)?;

    let (restored_ledger, restored_registry) = Snapshot::load(&path)?.into_services();

    let open = restored_ledger.current_shift().expect("open shift survives");
    assert_eq!(open.initial_deposit, 20000);
    assert_eq!(open.drawer.get(&2000), Some(&4));
    assert_eq!(restored_ledger.history().len(), 1);
    assert_eq!(restored_ledger.history()[0].total_amount, Some(15000));

    let reservation = restored_registry.get(&reservation_id)?;
    assert_eq!(reservation.status.as_str(), "confirmed");

    // Restored registry keeps serving the state machine.
    restored_registry.settle_payment(&reservation_id, 31500)?;
    let paid = restored_registry.get(&reservation_id)?;
    assert_eq!(paid.final_price, Some(31500));

    Ok(())
}

#[test]
fn test_missing_data_file_yields_empty_state() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let path = temp_dir.path().join("does-not-exist.json");

    let (ledger, registry) = Snapshot::load(&path)?.into_services();
    assert!(ledger.current_shift().is_none());
    assert!(ledger.history().is_empty());
    assert!(registry.list().is_empty());

    Ok(())
}

#[test]
fn test_corrupt_data_file_is_reported() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let path = temp_dir.path().join("peron.json");
    std::fs::write(&path, "not json at all")?;

    assert!(Snapshot::load(&path).is_err());

    Ok(())
}
