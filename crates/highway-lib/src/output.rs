use std::fmt::Write as _;
use std::io::Write;

use serde::Serialize;

use crate::command::{Command, Outcome};
use crate::error::Result;
use crate::fleet::Autonomy;
use crate::index::{Marker, StationIndex};
use crate::routing::RouteKind;

/// Presentation style for command results.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    /// One result word or marker sequence per line.
    #[default]
    Text,
    /// One JSON object per line.
    Json,
}

/// Structured form of one command result.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct OutcomeRecord<'a> {
    pub command: &'static str,
    pub outcome: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub kind: Option<RouteKind>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hops: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub route: Option<&'a [Marker]>,
}

impl<'a> OutcomeRecord<'a> {
    pub fn new(command: &Command, outcome: &'a Outcome) -> Self {
        let plan = match outcome {
            Outcome::Route(plan) => Some(plan),
            _ => None,
        };
        Self {
            command: command.keyword(),
            outcome: outcome.label(),
            kind: plan.map(|plan| plan.kind),
            hops: plan.map(|plan| plan.hop_count()),
            route: plan.map(|plan| plan.steps.as_slice()),
        }
    }
}

/// Write the result line for one executed command.
pub fn write_outcome<W: Write>(
    writer: &mut W,
    command: &Command,
    outcome: &Outcome,
    format: OutputFormat,
) -> Result<()> {
    match format {
        OutputFormat::Text => writeln!(writer, "{outcome}")?,
        OutputFormat::Json => {
            serde_json::to_writer(&mut *writer, &OutcomeRecord::new(command, outcome))?;
            writer.write_all(b"\n")?;
        }
    }
    Ok(())
}

/// Tree placement and fleet summary of one station.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct StationSummary {
    pub marker: Marker,
    pub parent: Option<Marker>,
    pub left: Option<Marker>,
    pub right: Option<Marker>,
    pub height: u32,
    pub vehicles: usize,
    pub max_autonomy: Autonomy,
}

/// Summaries for every station, in marker order.
pub fn station_summaries(index: &StationIndex) -> Vec<StationSummary> {
    index
        .ids()
        .filter_map(|id| {
            let links = index.links(id)?;
            let station = index.station(id)?;
            Some(StationSummary {
                marker: links.marker,
                parent: links.parent,
                left: links.left,
                right: links.right,
                height: links.height,
                vehicles: station.pool().len(),
                max_autonomy: station.max_autonomy(),
            })
        })
        .collect()
}

/// Render station summaries as aligned text, one station per line.
pub fn render_station_summaries(summaries: &[StationSummary]) -> String {
    fn link(marker: Option<Marker>) -> String {
        marker.map_or_else(|| "-".to_string(), |m| m.to_string())
    }

    let mut buffer = String::new();
    for summary in summaries {
        let _ = writeln!(
            buffer,
            "{:>10}  parent {:>10}  left {:>10}  right {:>10}  height {:>2}  vehicles {:>3}  max {}",
            summary.marker,
            link(summary.parent),
            link(summary.left),
            link(summary.right),
            summary.height,
            summary.vehicles,
            summary.max_autonomy
        );
    }
    buffer
}
