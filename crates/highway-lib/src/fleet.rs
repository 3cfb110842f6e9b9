//! Vehicle pools attached to each station.
//!
//! A pool is an unordered, fixed-capacity bag of vehicle autonomy values. The
//! pool keeps its maximum autonomy cached: inserts update it incrementally and
//! removals rescan the remaining vehicles.

use serde::Serialize;

use crate::error::{Error, Result};
use crate::index::Marker;

/// Travel range of a single vehicle.
pub type Autonomy = u64;

/// Default number of vehicles a station can hold.
pub const DEFAULT_POOL_CAPACITY: usize = 512;

/// Fixed-capacity collection of vehicle autonomies owned by one station.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VehiclePool {
    capacity: usize,
    vehicles: Vec<Autonomy>,
    max_autonomy: Autonomy,
}

impl VehiclePool {
    /// Create an empty pool holding at most `capacity` vehicles.
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity,
            vehicles: Vec::with_capacity(capacity.min(DEFAULT_POOL_CAPACITY)),
            max_autonomy: 0,
        }
    }

    /// Create a pool pre-filled with `vehicles`.
    ///
    /// Fails with [`Error::TooManyVehicles`] when the slice does not fit.
    pub fn with_vehicles(capacity: usize, vehicles: &[Autonomy]) -> Result<Self> {
        if vehicles.len() > capacity {
            return Err(Error::TooManyVehicles {
                count: vehicles.len(),
                capacity,
            });
        }

        let mut pool = Self::new(capacity);
        for &autonomy in vehicles {
            pool.push_unchecked(autonomy);
        }
        Ok(pool)
    }

    /// Maximum number of vehicles the pool accepts.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Number of vehicles currently parked.
    pub fn len(&self) -> usize {
        self.vehicles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vehicles.is_empty()
    }

    pub fn is_full(&self) -> bool {
        self.vehicles.len() >= self.capacity
    }

    /// Largest autonomy in the pool, or 0 when empty.
    pub fn max_autonomy(&self) -> Autonomy {
        self.max_autonomy
    }

    /// Vehicles in storage order. The order is not meaningful.
    pub fn vehicles(&self) -> &[Autonomy] {
        &self.vehicles
    }

    /// Park a vehicle at the station owning this pool.
    ///
    /// `marker` only labels the error when the pool is full.
    pub fn add(&mut self, marker: Marker, autonomy: Autonomy) -> Result<()> {
        if self.is_full() {
            return Err(Error::PoolFull {
                marker,
                capacity: self.capacity,
            });
        }
        self.push_unchecked(autonomy);
        Ok(())
    }

    /// Remove one vehicle with exactly `autonomy`.
    ///
    /// The first match is dropped and the last vehicle takes its slot.
    pub fn remove(&mut self, marker: Marker, autonomy: Autonomy) -> Result<()> {
        let position = self
            .vehicles
            .iter()
            .position(|&stored| stored == autonomy)
            .ok_or(Error::VehicleNotFound { marker, autonomy })?;

        self.vehicles.swap_remove(position);
        self.max_autonomy = self.vehicles.iter().copied().max().unwrap_or(0);
        Ok(())
    }

    fn push_unchecked(&mut self, autonomy: Autonomy) {
        self.vehicles.push(autonomy);
        if autonomy > self.max_autonomy {
            self.max_autonomy = autonomy;
        }
    }
}

impl Default for VehiclePool {
    fn default() -> Self {
        Self::new(DEFAULT_POOL_CAPACITY)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_pool_has_zero_max() {
        let pool = VehiclePool::new(4);
        assert!(pool.is_empty());
        assert_eq!(pool.max_autonomy(), 0);
    }

    #[test]
    fn with_vehicles_tracks_running_max() {
        let pool = VehiclePool::with_vehicles(8, &[5, 40, 12]).expect("fits");
        assert_eq!(pool.len(), 3);
        assert_eq!(pool.max_autonomy(), 40);
    }

    #[test]
    fn with_vehicles_rejects_overflow() {
        let error = VehiclePool::with_vehicles(2, &[1, 2, 3]).expect_err("too many");
        assert!(matches!(
            error,
            Error::TooManyVehicles {
                count: 3,
                capacity: 2
            }
        ));
    }

    #[test]
    fn add_rejects_when_full() {
        let mut pool = VehiclePool::new(1);
        pool.add(7, 10).expect("first vehicle fits");
        let error = pool.add(7, 20).expect_err("pool is full");
        assert!(matches!(error, Error::PoolFull { marker: 7, .. }));
        assert_eq!(pool.max_autonomy(), 10);
    }

    #[test]
    fn remove_swaps_last_vehicle_into_slot() {
        let mut pool = VehiclePool::with_vehicles(8, &[3, 9, 4, 7]).expect("fits");
        pool.remove(0, 9).expect("present");
        assert_eq!(pool.vehicles(), &[3, 7, 4]);
        assert_eq!(pool.max_autonomy(), 7);
    }

    #[test]
    fn remove_drops_only_one_duplicate() {
        let mut pool = VehiclePool::with_vehicles(8, &[6, 6, 2]).expect("fits");
        pool.remove(0, 6).expect("present");
        assert_eq!(pool.len(), 2);
        assert_eq!(pool.max_autonomy(), 6);
    }

    #[test]
    fn remove_missing_vehicle_is_reported() {
        let mut pool = VehiclePool::with_vehicles(8, &[1]).expect("fits");
        let error = pool.remove(3, 2).expect_err("absent");
        assert!(matches!(
            error,
            Error::VehicleNotFound {
                marker: 3,
                autonomy: 2
            }
        ));
    }

    #[test]
    fn removing_last_vehicle_resets_max() {
        let mut pool = VehiclePool::with_vehicles(8, &[30]).expect("fits");
        pool.remove(20, 30).expect("present");
        assert_eq!(pool.max_autonomy(), 0);
    }
}
