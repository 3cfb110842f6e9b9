use std::io::{self, Write};
use std::path::Path;

use anyhow::{Context, Result};
use highway_lib::{
    render_station_summaries, station_summaries, Highway, HighwayConfig, OutputFormat,
};
use tracing::info;

use super::open_input;
use super::run::run_script;

/// Execute a command script silently, audit the index and print every station's placement.
pub fn handle_inspect(
    input: Option<&Path>,
    config: HighwayConfig,
    format: OutputFormat,
) -> Result<()> {
    let reader = open_input(input)?;
    let mut highway = Highway::new(config);
    run_script(reader, &mut highway, &mut io::sink(), OutputFormat::Text)?;

    let stations = highway.stations();
    stations
        .audit()
        .context("station index failed its consistency audit")?;
    info!(
        stations = stations.len(),
        height = stations.height(),
        "station index audited"
    );

    let summaries = station_summaries(stations);
    let stdout = io::stdout();
    let mut out = stdout.lock();
    match format {
        OutputFormat::Text => {
            out.write_all(render_station_summaries(&summaries).as_bytes())?;
            writeln!(
                out,
                "{} station(s), tree height {}",
                stations.len(),
                stations.height()
            )?;
        }
        OutputFormat::Json => {
            serde_json::to_writer_pretty(&mut out, &summaries)
                .context("failed to serialize station summaries")?;
            writeln!(out)?;
        }
    }
    out.flush()?;
    Ok(())
}
