//! Persistence contract for the engine's collaborators.
//!
//! The engine owns no storage. It consumes lot records, schedule sets,
//! operating windows and vehicle sessions through the [`LotStore`] trait
//! and treats every fetched set as a value: each validation or fee
//! computation starts from a fresh read, and every mutating write replaces
//! the full set atomically so no reader observes a partially-updated,
//! invariant-violating state.

mod memory;

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::error::EngineResult;
use crate::models::{OperatingWindow, ParkingLot, RateSchedule, VehicleSession};

pub use memory::MemoryStore;

/// A lot's current occupancy counts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Occupancy {
    /// Number of occupied spots.
    pub occupied: u32,
    /// Total number of spots.
    pub total_capacity: u32,
}

impl Occupancy {
    /// Returns true once the occupancy percentage reaches the given
    /// threshold (0-100).
    pub fn is_at_threshold(&self, threshold: u32) -> bool {
        // Integer form of occupied / capacity >= threshold / 100.
        u64::from(self.occupied) * 100 >= u64::from(self.total_capacity) * u64::from(threshold)
    }
}

/// Storage collaborator contract.
///
/// Implementations must make `replace_rate_schedules` and
/// `replace_operating_windows` atomic full replaces (delete-then-insert or
/// equivalent): a failed write leaves the previous set intact, and
/// concurrent readers see either the old set or the new one, never a mix.
pub trait LotStore: Send + Sync {
    /// Persists a new lot.
    fn insert_lot(&self, lot: ParkingLot) -> EngineResult<ParkingLot>;

    /// Fetches a lot by id.
    fn fetch_lot(&self, lot_id: Uuid) -> EngineResult<ParkingLot>;

    /// Fetches the lot's current rate-schedule set.
    fn fetch_rate_schedules(&self, lot_id: Uuid) -> EngineResult<Vec<RateSchedule>>;

    /// Atomically replaces the lot's rate-schedule set, returning the
    /// committed set.
    fn replace_rate_schedules(
        &self,
        lot_id: Uuid,
        schedules: Vec<RateSchedule>,
    ) -> EngineResult<Vec<RateSchedule>>;

    /// Fetches the lot's operating windows.
    fn fetch_operating_windows(&self, lot_id: Uuid) -> EngineResult<Vec<OperatingWindow>>;

    /// Atomically replaces the lot's operating windows, returning the
    /// committed set.
    fn replace_operating_windows(
        &self,
        lot_id: Uuid,
        windows: Vec<OperatingWindow>,
    ) -> EngineResult<Vec<OperatingWindow>>;

    /// Fetches the active session at a spot. Fails if the spot is out of
    /// bounds or vacant.
    fn fetch_vehicle_session(&self, lot_id: Uuid, spot_number: u32)
    -> EngineResult<VehicleSession>;

    /// Returns every spot's session slot, indexed by spot number - 1.
    fn spot_sessions(&self, lot_id: Uuid) -> EngineResult<Vec<Option<VehicleSession>>>;

    /// Marks a spot occupied by a vehicle entering at `entry_time`.
    fn occupy_spot(
        &self,
        lot_id: Uuid,
        spot_number: u32,
        license_plate: &str,
        entry_time: DateTime<Utc>,
    ) -> EngineResult<VehicleSession>;

    /// Frees a spot, returning the session that occupied it.
    fn vacate_spot(&self, lot_id: Uuid, spot_number: u32) -> EngineResult<VehicleSession>;

    /// Returns the lot's occupancy counts.
    fn occupancy(&self, lot_id: Uuid) -> EngineResult<Occupancy>;
}
