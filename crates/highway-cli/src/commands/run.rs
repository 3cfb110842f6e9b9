use std::io::{self, BufRead, BufWriter, Write};
use std::path::Path;

use anyhow::{Context, Result};
use highway_lib::{write_outcome, CommandReader, Highway, HighwayConfig, OutputFormat};
use tracing::{debug, info};

use super::open_input;

/// Execute a command script and print one result per command on stdout.
pub fn handle_run(input: Option<&Path>, config: HighwayConfig, format: OutputFormat) -> Result<()> {
    let reader = open_input(input)?;
    let mut highway = Highway::new(config);

    let stdout = io::stdout();
    let mut out = BufWriter::new(stdout.lock());
    let result = run_script(reader, &mut highway, &mut out, format);
    out.flush().context("failed to flush results")?;
    let executed = result?;

    info!(
        commands = executed,
        stations = highway.stations().len(),
        "command stream processed"
    );
    Ok(())
}

/// Execute every command read from `reader`, writing results to `writer`.
///
/// Stops at the first unparseable command; results already produced stay written.
pub fn run_script<R: BufRead, W: Write>(
    reader: R,
    highway: &mut Highway,
    writer: &mut W,
    format: OutputFormat,
) -> Result<usize> {
    let mut executed = 0;
    for command in CommandReader::new(reader) {
        let command = command
            .with_context(|| format!("command stream stopped after {executed} command(s)"))?;
        let outcome = command.execute(highway);
        debug!(
            command = command.keyword(),
            outcome = outcome.label(),
            "command executed"
        );
        write_outcome(writer, &command, &outcome, format).context("failed to write result")?;
        executed += 1;
    }
    Ok(executed)
}
