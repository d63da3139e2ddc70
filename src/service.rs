//! The engine's exposed operations.
//!
//! [`RateEngine`] ties the pure schedule algebra to the persistence
//! collaborator: it validates candidate schedule sets before any write,
//! computes fees from fresh reads, and gates vehicle entry and exit on the
//! lot's operating hours.
//!
//! Every mutating write re-validates the entire resulting set rather than
//! trusting prior validation: two schedules validated independently at
//! different times can still conflict once both exist. Mutations for one
//! lot are serialized through a per-lot lock so two writers cannot both
//! pass validation against the same stale snapshot.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Serialize;
use uuid::Uuid;

use crate::config::EngineConfig;
use crate::error::{EngineError, EngineResult};
use crate::models::{OperatingWindow, ParkingLot, RateSchedule, VehicleSession};
use crate::schedule::{compute_fee, find_coverage_gaps, find_overlaps, is_open_at};
use crate::store::LotStore;

/// The outcome of a vehicle entry registration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EntryReceipt {
    /// The session opened for the vehicle.
    pub session: VehicleSession,
    /// True when the entry pushed occupancy to the lot's notification
    /// threshold.
    pub notify_high_occupancy: bool,
}

/// The outcome of a vehicle exit registration, including the billed fee.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExitReceipt {
    /// The freed spot number.
    pub spot_number: u32,
    /// The exiting vehicle's license plate.
    pub license_plate: String,
    /// When the vehicle entered.
    pub entry_time: DateTime<Utc>,
    /// When the vehicle exited.
    pub exit_time: DateTime<Utc>,
    /// Parked duration in hours, rounded to two decimal places.
    pub hours_parked: Decimal,
    /// The total fee billed for the stay.
    pub total_fee: Decimal,
    /// True when occupancy still sits at the notification threshold after
    /// the exit.
    pub notify_high_occupancy: bool,
}

/// The rate-schedule engine's service facade.
pub struct RateEngine {
    store: Arc<dyn LotStore>,
    config: EngineConfig,
    // Per-lot mutation locks; schedule writes for one lot are serialized so
    // concurrent writers cannot validate against a stale snapshot.
    lot_locks: Mutex<HashMap<Uuid, Arc<Mutex<()>>>>,
}

impl RateEngine {
    /// Creates an engine over the given store and configuration.
    pub fn new(store: Arc<dyn LotStore>, config: EngineConfig) -> Self {
        Self {
            store,
            config,
            lot_locks: Mutex::new(HashMap::new()),
        }
    }

    fn lot_mutation_lock(&self, lot_id: Uuid) -> Arc<Mutex<()>> {
        let mut locks = self.lot_locks.lock().expect("lot lock table poisoned");
        locks
            .entry(lot_id)
            .or_insert_with(|| Arc::new(Mutex::new(())))
            .clone()
    }

    /// Persists a new lot.
    pub fn create_lot(&self, lot: ParkingLot) -> EngineResult<ParkingLot> {
        self.store.insert_lot(lot)
    }

    /// Fetches a lot by id.
    pub fn lot(&self, lot_id: Uuid) -> EngineResult<ParkingLot> {
        self.store.fetch_lot(lot_id)
    }

    /// Returns the lot's current rate schedules.
    pub fn rate_schedules(&self, lot_id: Uuid) -> EngineResult<Vec<RateSchedule>> {
        self.store.fetch_rate_schedules(lot_id)
    }

    /// Returns every spot's session slot for occupancy display.
    pub fn spot_sessions(&self, lot_id: Uuid) -> EngineResult<Vec<Option<VehicleSession>>> {
        self.store.spot_sessions(lot_id)
    }

    /// Validates a candidate rate-schedule set as the complete set for one
    /// lot.
    ///
    /// Overlap detection runs first and reports every conflicting pair;
    /// only an overlap-free set is checked for coverage, which reports
    /// every gap across all eight day labels. Both failures carry the full
    /// batch of findings.
    pub fn validate_schedule_set(&self, candidates: &[RateSchedule]) -> EngineResult<()> {
        let entries: Vec<(&str, _)> = candidates
            .iter()
            .map(|s| (s.name.as_str(), &s.window))
            .collect();
        let overlaps = find_overlaps(&entries);
        if !overlaps.is_empty() {
            return Err(EngineError::ScheduleConflict { overlaps });
        }

        let windows: Vec<_> = candidates.iter().map(|s| &s.window).collect();
        let gaps = find_coverage_gaps(&windows);
        if !gaps.is_empty() {
            return Err(EngineError::IncompleteCoverage { gaps });
        }

        Ok(())
    }

    /// Atomically replaces the lot's rate schedules with a validated set.
    ///
    /// The candidate set is validated as the complete post-mutation set; on
    /// success the store swaps it in whole, so no reader ever observes a
    /// partially-updated set.
    pub fn replace_rate_schedules(
        &self,
        lot_id: Uuid,
        schedules: Vec<RateSchedule>,
    ) -> EngineResult<Vec<RateSchedule>> {
        self.store.fetch_lot(lot_id)?;
        let lock = self.lot_mutation_lock(lot_id);
        let _guard = lock.lock().expect("lot mutation lock poisoned");

        self.validate_schedule_set(&schedules)?;
        self.store.replace_rate_schedules(lot_id, schedules)
    }

    /// Appends schedules to the lot's existing set, validating the merged
    /// result before committing it.
    pub fn create_rate_schedules(
        &self,
        lot_id: Uuid,
        new_schedules: Vec<RateSchedule>,
    ) -> EngineResult<Vec<RateSchedule>> {
        self.store.fetch_lot(lot_id)?;
        let lock = self.lot_mutation_lock(lot_id);
        let _guard = lock.lock().expect("lot mutation lock poisoned");

        let mut merged = self.store.fetch_rate_schedules(lot_id)?;
        merged.extend(new_schedules);
        self.validate_schedule_set(&merged)?;
        self.store.replace_rate_schedules(lot_id, merged)
    }

    /// Removes every rate schedule from the lot, returning how many were
    /// deleted.
    ///
    /// Clearing is the one mutation exempt from coverage validation: a lot
    /// with no schedules at all is unconfigured rather than misconfigured,
    /// and fee computation for it fails closed.
    pub fn clear_rate_schedules(&self, lot_id: Uuid) -> EngineResult<usize> {
        self.store.fetch_lot(lot_id)?;
        let lock = self.lot_mutation_lock(lot_id);
        let _guard = lock.lock().expect("lot mutation lock poisoned");

        let existing = self.store.fetch_rate_schedules(lot_id)?;
        let count = existing.len();
        self.store.replace_rate_schedules(lot_id, Vec::new())?;
        Ok(count)
    }

    /// Atomically replaces the lot's operating windows.
    ///
    /// Operating windows are validated for non-overlap only; lots may be
    /// closed part of the week, so coverage is not required.
    pub fn replace_operating_windows(
        &self,
        lot_id: Uuid,
        windows: Vec<OperatingWindow>,
    ) -> EngineResult<Vec<OperatingWindow>> {
        self.store.fetch_lot(lot_id)?;
        let lock = self.lot_mutation_lock(lot_id);
        let _guard = lock.lock().expect("lot mutation lock poisoned");

        let names: Vec<String> = (1..=windows.len())
            .map(|i| format!("operating window {}", i))
            .collect();
        let entries: Vec<(&str, _)> = names
            .iter()
            .map(String::as_str)
            .zip(windows.iter().map(|w| &w.window))
            .collect();
        let overlaps = find_overlaps(&entries);
        if !overlaps.is_empty() {
            return Err(EngineError::ScheduleConflict { overlaps });
        }

        self.store.replace_operating_windows(lot_id, windows)
    }

    /// Computes the fee for parking at the lot from `entry` until `exit`.
    ///
    /// The schedule set is fetched fresh for every computation.
    pub fn compute_fee(
        &self,
        lot_id: Uuid,
        entry: DateTime<Utc>,
        exit: DateTime<Utc>,
    ) -> EngineResult<Decimal> {
        let lot = self.store.fetch_lot(lot_id)?;
        let schedules = self.store.fetch_rate_schedules(lot_id)?;
        compute_fee(
            &schedules,
            entry,
            exit,
            lot.timezone,
            self.config.max_billable_hours,
        )
    }

    /// Returns true if the lot is open at the given instant.
    pub fn is_lot_open(&self, lot_id: Uuid, at: DateTime<Utc>) -> EngineResult<bool> {
        let lot = self.store.fetch_lot(lot_id)?;
        let windows = self.store.fetch_operating_windows(lot_id)?;
        Ok(is_open_at(&windows, at, lot.timezone))
    }

    /// Registers a vehicle entering a spot at the given instant.
    ///
    /// The operating-hours gate is consulted first; a closed lot rejects
    /// the entry before the occupancy map is touched.
    pub fn register_entry(
        &self,
        lot_id: Uuid,
        spot_number: u32,
        license_plate: &str,
        at: DateTime<Utc>,
    ) -> EngineResult<EntryReceipt> {
        let lot = self.store.fetch_lot(lot_id)?;
        self.check_gate(&lot, at)?;

        let session = self
            .store
            .occupy_spot(lot_id, spot_number, license_plate, at)?;
        let occupancy = self.store.occupancy(lot_id)?;

        Ok(EntryReceipt {
            session,
            notify_high_occupancy: occupancy.is_at_threshold(lot.notification_threshold),
        })
    }

    /// Registers a vehicle exiting a spot at the given instant, billing the
    /// stay.
    ///
    /// The fee is computed before the spot is freed: a resolution failure
    /// aborts the exit and leaves the session in place rather than waving
    /// the vehicle out unbilled.
    pub fn register_exit(
        &self,
        lot_id: Uuid,
        spot_number: u32,
        at: DateTime<Utc>,
    ) -> EngineResult<ExitReceipt> {
        let lot = self.store.fetch_lot(lot_id)?;
        self.check_gate(&lot, at)?;

        let session = self.store.fetch_vehicle_session(lot_id, spot_number)?;
        let schedules = self.store.fetch_rate_schedules(lot_id)?;
        let total_fee = compute_fee(
            &schedules,
            session.entry_time,
            at,
            lot.timezone,
            self.config.max_billable_hours,
        )?;

        let session = self.store.vacate_spot(lot_id, spot_number)?;
        let occupancy = self.store.occupancy(lot_id)?;

        Ok(ExitReceipt {
            spot_number,
            license_plate: session.license_plate.clone(),
            entry_time: session.entry_time,
            exit_time: at,
            hours_parked: session.parked_hours(at),
            total_fee,
            notify_high_occupancy: occupancy.is_at_threshold(lot.notification_threshold),
        })
    }

    fn check_gate(&self, lot: &ParkingLot, at: DateTime<Utc>) -> EngineResult<()> {
        let windows = self.store.fetch_operating_windows(lot.id)?;
        if is_open_at(&windows, at, lot.timezone) {
            return Ok(());
        }
        let local = at.with_timezone(&lot.timezone);
        Err(EngineError::Closed {
            lot_id: lot.id,
            time: local.format("%H:%M").to_string(),
        })
    }
}
