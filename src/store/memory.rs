//! In-memory store for testing and development.

use std::collections::HashMap;
use std::sync::RwLock;

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::error::{EngineError, EngineResult};
use crate::models::{OperatingWindow, ParkingLot, RateSchedule, VehicleSession};

use super::{LotStore, Occupancy};

struct LotRecord {
    lot: ParkingLot,
    rate_schedules: Vec<RateSchedule>,
    operating_windows: Vec<OperatingWindow>,
    // Spots indexed by spot_number - 1, sized to total_capacity. Spot
    // numbers are bounds-checked against the capacity on every access.
    spots: Vec<Option<VehicleSession>>,
}

/// An in-memory [`LotStore`] behind a single reader-writer lock.
///
/// Replaces are atomic by construction: every mutation holds the write
/// lock, so readers observe either the previous set or the committed one.
#[derive(Default)]
pub struct MemoryStore {
    lots: RwLock<HashMap<Uuid, LotRecord>>,
}

impl MemoryStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }
}

fn spot_index(spot_number: u32, capacity: u32) -> EngineResult<usize> {
    if spot_number == 0 || spot_number > capacity {
        return Err(EngineError::SpotNotFound {
            spot_number,
            capacity,
        });
    }
    Ok((spot_number - 1) as usize)
}

impl LotStore for MemoryStore {
    fn insert_lot(&self, lot: ParkingLot) -> EngineResult<ParkingLot> {
        let mut lots = self.lots.write().expect("store lock poisoned");
        let record = LotRecord {
            spots: vec![None; lot.total_capacity as usize],
            lot: lot.clone(),
            rate_schedules: Vec::new(),
            operating_windows: Vec::new(),
        };
        lots.insert(lot.id, record);
        Ok(lot)
    }

    fn fetch_lot(&self, lot_id: Uuid) -> EngineResult<ParkingLot> {
        let lots = self.lots.read().expect("store lock poisoned");
        lots.get(&lot_id)
            .map(|r| r.lot.clone())
            .ok_or(EngineError::LotNotFound { lot_id })
    }

    fn fetch_rate_schedules(&self, lot_id: Uuid) -> EngineResult<Vec<RateSchedule>> {
        let lots = self.lots.read().expect("store lock poisoned");
        lots.get(&lot_id)
            .map(|r| r.rate_schedules.clone())
            .ok_or(EngineError::LotNotFound { lot_id })
    }

    fn replace_rate_schedules(
        &self,
        lot_id: Uuid,
        schedules: Vec<RateSchedule>,
    ) -> EngineResult<Vec<RateSchedule>> {
        let mut lots = self.lots.write().expect("store lock poisoned");
        let record = lots
            .get_mut(&lot_id)
            .ok_or(EngineError::LotNotFound { lot_id })?;
        record.rate_schedules = schedules;
        Ok(record.rate_schedules.clone())
    }

    fn fetch_operating_windows(&self, lot_id: Uuid) -> EngineResult<Vec<OperatingWindow>> {
        let lots = self.lots.read().expect("store lock poisoned");
        lots.get(&lot_id)
            .map(|r| r.operating_windows.clone())
            .ok_or(EngineError::LotNotFound { lot_id })
    }

    fn replace_operating_windows(
        &self,
        lot_id: Uuid,
        windows: Vec<OperatingWindow>,
    ) -> EngineResult<Vec<OperatingWindow>> {
        let mut lots = self.lots.write().expect("store lock poisoned");
        let record = lots
            .get_mut(&lot_id)
            .ok_or(EngineError::LotNotFound { lot_id })?;
        record.operating_windows = windows;
        Ok(record.operating_windows.clone())
    }

    fn fetch_vehicle_session(
        &self,
        lot_id: Uuid,
        spot_number: u32,
    ) -> EngineResult<VehicleSession> {
        let lots = self.lots.read().expect("store lock poisoned");
        let record = lots.get(&lot_id).ok_or(EngineError::LotNotFound { lot_id })?;
        let index = spot_index(spot_number, record.lot.total_capacity)?;
        record.spots[index]
            .clone()
            .ok_or(EngineError::SpotVacant { spot_number })
    }

    fn spot_sessions(&self, lot_id: Uuid) -> EngineResult<Vec<Option<VehicleSession>>> {
        let lots = self.lots.read().expect("store lock poisoned");
        lots.get(&lot_id)
            .map(|r| r.spots.clone())
            .ok_or(EngineError::LotNotFound { lot_id })
    }

    fn occupy_spot(
        &self,
        lot_id: Uuid,
        spot_number: u32,
        license_plate: &str,
        entry_time: DateTime<Utc>,
    ) -> EngineResult<VehicleSession> {
        let mut lots = self.lots.write().expect("store lock poisoned");
        let record = lots
            .get_mut(&lot_id)
            .ok_or(EngineError::LotNotFound { lot_id })?;
        let index = spot_index(spot_number, record.lot.total_capacity)?;
        if record.spots[index].is_some() {
            return Err(EngineError::SpotOccupied { spot_number });
        }
        let session = VehicleSession {
            lot_id,
            spot_number,
            license_plate: license_plate.to_string(),
            entry_time,
            exit_time: None,
        };
        record.spots[index] = Some(session.clone());
        Ok(session)
    }

    fn vacate_spot(&self, lot_id: Uuid, spot_number: u32) -> EngineResult<VehicleSession> {
        let mut lots = self.lots.write().expect("store lock poisoned");
        let record = lots
            .get_mut(&lot_id)
            .ok_or(EngineError::LotNotFound { lot_id })?;
        let index = spot_index(spot_number, record.lot.total_capacity)?;
        record.spots[index]
            .take()
            .ok_or(EngineError::SpotVacant { spot_number })
    }

    fn occupancy(&self, lot_id: Uuid) -> EngineResult<Occupancy> {
        let lots = self.lots.read().expect("store lock poisoned");
        let record = lots.get(&lot_id).ok_or(EngineError::LotNotFound { lot_id })?;
        Ok(Occupancy {
            occupied: record.spots.iter().filter(|s| s.is_some()).count() as u32,
            total_capacity: record.lot.total_capacity,
        })
    }
}
