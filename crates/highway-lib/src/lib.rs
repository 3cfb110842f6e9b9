//! Highway library entry points.
//!
//! This crate models a linear highway of service stations, each stocking a
//! pool of vehicles with bounded autonomy. It exposes the ordered station
//! index, vehicle pools, the autonomy-bounded route planner and the textual
//! command stream that drives them. Higher-level consumers (the CLI) should
//! only depend on the items exported here.
//!

#![deny(warnings)]

pub mod command;
pub mod error;
pub mod fleet;
pub mod heap;
pub mod highway;
pub mod index;
pub mod output;
pub mod routing;

pub use command::{Command, CommandReader, Outcome, RawAutonomy};
pub use error::{Error, Result};
pub use fleet::{Autonomy, VehiclePool, DEFAULT_POOL_CAPACITY};
pub use heap::MinHeap;
pub use highway::{Highway, HighwayConfig};
pub use index::{Marker, NodeLinks, Station, StationId, StationIndex};
pub use output::{
    render_station_summaries, station_summaries, write_outcome, OutcomeRecord, OutputFormat,
    StationSummary,
};
pub use routing::{plan_route, Direction, RouteKind, RoutePlan, RouteRequest};
