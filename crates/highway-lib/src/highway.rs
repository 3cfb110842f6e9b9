//! The highway: station registry plus the operations the command stream drives.

use tracing::{debug, warn};

use crate::error::{Error, Result};
use crate::fleet::{Autonomy, VehiclePool, DEFAULT_POOL_CAPACITY};
use crate::index::{Marker, Station, StationIndex};
use crate::routing::{plan_route, RoutePlan, RouteRequest};

/// Tunables for a [`Highway`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HighwayConfig {
    /// Maximum number of vehicles per station.
    pub pool_capacity: usize,
}

impl Default for HighwayConfig {
    fn default() -> Self {
        Self {
            pool_capacity: DEFAULT_POOL_CAPACITY,
        }
    }
}

/// In-memory highway with its stations and their vehicle pools.
#[derive(Debug, Clone, Default)]
pub struct Highway {
    config: HighwayConfig,
    stations: StationIndex,
}

impl Highway {
    pub fn new(config: HighwayConfig) -> Self {
        Self {
            config,
            stations: StationIndex::new(),
        }
    }

    pub fn config(&self) -> &HighwayConfig {
        &self.config
    }

    /// Read-only view of the station index.
    pub fn stations(&self) -> &StationIndex {
        &self.stations
    }

    /// Build a station at `marker` stocked with `vehicles`.
    pub fn add_station(&mut self, marker: Marker, vehicles: &[Autonomy]) -> Result<()> {
        let pool = VehiclePool::with_vehicles(self.config.pool_capacity, vehicles)
            .inspect_err(|error| warn!(marker, %error, "station rejected"))?;
        self.stations
            .insert(Station::new(marker, pool))
            .inspect_err(|error| warn!(marker, %error, "station rejected"))?;
        Ok(())
    }

    /// Park one vehicle at an existing station.
    pub fn add_vehicle(&mut self, marker: Marker, autonomy: Autonomy) -> Result<()> {
        let station = self
            .stations
            .get_mut(marker)
            .ok_or(Error::StationNotFound { marker })?;
        station
            .pool_mut()
            .add(marker, autonomy)
            .inspect_err(|error| warn!(marker, %error, "vehicle rejected"))?;
        debug!(
            marker,
            autonomy,
            max_autonomy = station.max_autonomy(),
            "vehicle added"
        );
        Ok(())
    }

    /// Demolish the station at `marker` together with its vehicles.
    pub fn demolish_station(&mut self, marker: Marker) -> Result<Station> {
        self.stations
            .remove(marker)
            .inspect_err(|error| warn!(marker, %error, "station not demolished"))
    }

    /// Scrap one vehicle with exactly `autonomy` from the station at `marker`.
    pub fn scrap_vehicle(&mut self, marker: Marker, autonomy: Autonomy) -> Result<()> {
        let station = self
            .stations
            .get_mut(marker)
            .ok_or(Error::StationNotFound { marker })?;
        station
            .pool_mut()
            .remove(marker, autonomy)
            .inspect_err(|error| warn!(marker, %error, "vehicle not scrapped"))?;
        debug!(
            marker,
            autonomy,
            max_autonomy = station.max_autonomy(),
            "vehicle scrapped"
        );
        Ok(())
    }

    /// Plan a route between two markers.
    pub fn plan_route(&self, start: Marker, goal: Marker) -> Result<RoutePlan> {
        plan_route(&self.stations, &RouteRequest::new(start, goal))
    }
}
