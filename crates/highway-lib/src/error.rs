use thiserror::Error;

use crate::fleet::Autonomy;
use crate::index::Marker;

/// Convenient result alias for the highway library.
pub type Result<T> = std::result::Result<T, Error>;

/// Top-level library error type.
#[derive(Debug, Error)]
pub enum Error {
    /// Raised when a station already exists at the requested marker.
    #[error("station already exists at marker {marker}")]
    DuplicateStation { marker: Marker },

    /// Raised when a new station is supplied with more vehicles than a pool holds.
    #[error("{count} vehicles exceed the pool capacity of {capacity}")]
    TooManyVehicles { count: usize, capacity: usize },

    /// Raised when adding a vehicle to a station whose pool is full.
    #[error("vehicle pool at marker {marker} is full ({capacity} vehicles)")]
    PoolFull { marker: Marker, capacity: usize },

    /// Raised when no station exists at the requested marker.
    #[error("no station at marker {marker}")]
    StationNotFound { marker: Marker },

    /// Raised when a station holds no vehicle with the requested autonomy.
    #[error("no vehicle with autonomy {autonomy} at marker {marker}")]
    VehicleNotFound { marker: Marker, autonomy: Autonomy },

    /// Raised when a command names a vehicle with negative autonomy.
    #[error("autonomy {autonomy} at marker {marker} is negative")]
    NegativeAutonomy { marker: Marker, autonomy: i64 },

    /// Raised when no route could be found between two markers.
    #[error("no route found between {start} and {goal}")]
    RouteNotFound { start: Marker, goal: Marker },

    /// Raised by [`crate::StationIndex::audit`] when the tree is inconsistent.
    #[error("station index invariant violated at marker {marker}: {detail}")]
    IndexInvariant { marker: Marker, detail: String },

    /// Raised when the command stream contains an unrecognised keyword.
    #[error("unknown command: {command}{}", format_suggestions(.suggestions))]
    UnknownCommand {
        command: String,
        suggestions: Vec<String>,
    },

    /// Raised when the command stream ends before a command received all arguments.
    #[error("command {command} is missing its {argument} argument")]
    MissingArgument {
        command: &'static str,
        argument: &'static str,
    },

    /// Raised when a command argument is not a valid integer.
    #[error("command {command} expected an integer {argument}, got '{value}'")]
    InvalidNumber {
        command: &'static str,
        argument: &'static str,
        value: String,
    },

    /// Wrapper for IO errors.
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// Wrapper for JSON serialization errors.
    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

fn format_suggestions(suggestions: &[String]) -> String {
    if suggestions.is_empty() {
        String::new()
    } else if suggestions.len() == 1 {
        format!(". Did you mean '{}'?", suggestions[0])
    } else {
        format!(
            ". Did you mean one of: {}?",
            suggestions
                .iter()
                .map(|s| format!("'{}'", s))
                .collect::<Vec<_>>()
                .join(", ")
        )
    }
}
