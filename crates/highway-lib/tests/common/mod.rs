#![allow(dead_code)]

use highway_lib::{CommandReader, Highway, HighwayConfig, Marker, Station};

/// Run a command script against a fresh highway and collect the result lines.
pub fn run_script(script: &str) -> Vec<String> {
    let mut highway = Highway::new(HighwayConfig::default());
    run_on(&mut highway, script)
}

/// Run a command script against an existing highway.
pub fn run_on(highway: &mut Highway, script: &str) -> Vec<String> {
    CommandReader::new(script.as_bytes())
        .map(|command| {
            command
                .expect("script parses")
                .execute(highway)
                .to_string()
        })
        .collect()
}

/// Build a highway where every station carries one vehicle of the given autonomy.
pub fn highway_of(stations: &[(Marker, u64)]) -> Highway {
    let mut highway = Highway::default();
    for &(marker, autonomy) in stations {
        highway
            .add_station(marker, &[autonomy])
            .expect("unique marker");
    }
    highway
}

/// Markers in index order.
pub fn markers(highway: &Highway) -> Vec<Marker> {
    highway.stations().iter().map(Station::marker).collect()
}
