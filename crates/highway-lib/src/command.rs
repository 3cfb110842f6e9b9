//! Textual command stream driving a [`Highway`].
//!
//! Input is a sequence of whitespace-separated tokens; line breaks carry no
//! meaning. Every command is a keyword followed by integer arguments and
//! produces exactly one [`Outcome`], whose text form is the result line
//! printed for it.

use std::collections::VecDeque;
use std::fmt;
use std::io::BufRead;
use std::str::FromStr;

use tracing::{trace, warn};

use crate::error::{Error, Result};
use crate::fleet::Autonomy;
use crate::highway::Highway;
use crate::index::Marker;
use crate::routing::RoutePlan;

/// Minimum Jaro-Winkler similarity for a keyword to be suggested.
const SUGGESTION_THRESHOLD: f64 = 0.8;

/// Maximum number of keyword suggestions attached to an unknown command.
const MAX_SUGGESTIONS: usize = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Keyword {
    AddStation,
    AddVehicle,
    RemoveStation,
    ScrapVehicle,
    PlanRoute,
}

/// Accepted spellings, canonical first, followed by the legacy Italian
/// command names.
const KEYWORDS: &[(&str, Keyword)] = &[
    ("add-station", Keyword::AddStation),
    ("add-vehicle", Keyword::AddVehicle),
    ("remove-station", Keyword::RemoveStation),
    ("scrap-vehicle", Keyword::ScrapVehicle),
    ("plan-route", Keyword::PlanRoute),
    ("aggiungi-stazione", Keyword::AddStation),
    ("aggiungi-auto", Keyword::AddVehicle),
    ("demolisci-stazione", Keyword::RemoveStation),
    ("rottama-auto", Keyword::ScrapVehicle),
    ("pianifica-percorso", Keyword::PlanRoute),
];

impl Keyword {
    fn parse(token: &str) -> Option<Self> {
        KEYWORDS
            .iter()
            .find(|(spelling, _)| *spelling == token)
            .map(|&(_, keyword)| keyword)
    }

    fn canonical(self) -> &'static str {
        KEYWORDS
            .iter()
            .find(|&&(_, keyword)| keyword == self)
            .map_or("", |&(spelling, _)| spelling)
    }
}

/// Closest known keywords to an unrecognised token, best match first.
fn suggest_keywords(token: &str) -> Vec<String> {
    let mut scored: Vec<(f64, &str)> = KEYWORDS
        .iter()
        .map(|&(spelling, _)| (strsim::jaro_winkler(token, spelling), spelling))
        .filter(|&(score, _)| score >= SUGGESTION_THRESHOLD)
        .collect();
    scored.sort_by(|a, b| b.0.total_cmp(&a.0));
    scored
        .into_iter()
        .take(MAX_SUGGESTIONS)
        .map(|(_, spelling)| spelling.to_string())
        .collect()
}

/// Autonomy as written in the command stream. Negative values parse but are
/// rejected when the command runs.
pub type RawAutonomy = i64;

/// One parsed command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    AddStation {
        marker: Marker,
        vehicles: Vec<RawAutonomy>,
    },
    AddVehicle {
        marker: Marker,
        autonomy: RawAutonomy,
    },
    RemoveStation {
        marker: Marker,
    },
    ScrapVehicle {
        marker: Marker,
        autonomy: RawAutonomy,
    },
    PlanRoute {
        start: Marker,
        goal: Marker,
    },
}

impl Command {
    /// Canonical keyword of this command.
    pub fn keyword(&self) -> &'static str {
        let keyword = match self {
            Command::AddStation { .. } => Keyword::AddStation,
            Command::AddVehicle { .. } => Keyword::AddVehicle,
            Command::RemoveStation { .. } => Keyword::RemoveStation,
            Command::ScrapVehicle { .. } => Keyword::ScrapVehicle,
            Command::PlanRoute { .. } => Keyword::PlanRoute,
        };
        keyword.canonical()
    }

    /// Apply the command, folding any rejection into its outcome.
    pub fn execute(&self, highway: &mut Highway) -> Outcome {
        match self {
            Command::AddStation { marker, vehicles } => {
                let added = vehicles
                    .iter()
                    .map(|&raw| checked_autonomy(*marker, raw))
                    .collect::<Result<Vec<_>>>()
                    .and_then(|vehicles| highway.add_station(*marker, &vehicles));
                match added {
                    Ok(()) => Outcome::Added,
                    Err(_) => Outcome::NotAdded,
                }
            }
            Command::AddVehicle { marker, autonomy } => {
                let added = checked_autonomy(*marker, *autonomy)
                    .and_then(|autonomy| highway.add_vehicle(*marker, autonomy));
                match added {
                    Ok(()) => Outcome::Added,
                    Err(_) => Outcome::NotAdded,
                }
            }
            Command::RemoveStation { marker } => match highway.demolish_station(*marker) {
                Ok(_) => Outcome::Demolished,
                Err(_) => Outcome::NotDemolished,
            },
            Command::ScrapVehicle { marker, autonomy } => {
                let scrapped = checked_autonomy(*marker, *autonomy)
                    .and_then(|autonomy| highway.scrap_vehicle(*marker, autonomy));
                match scrapped {
                    Ok(()) => Outcome::Scrapped,
                    Err(_) => Outcome::NotScrapped,
                }
            }
            Command::PlanRoute { start, goal } => match highway.plan_route(*start, *goal) {
                Ok(plan) => Outcome::Route(plan),
                Err(_) => Outcome::NoRoute,
            },
        }
    }
}

fn checked_autonomy(marker: Marker, raw: RawAutonomy) -> Result<Autonomy> {
    Autonomy::try_from(raw).map_err(|_| {
        warn!(marker, autonomy = raw, "negative autonomy rejected");
        Error::NegativeAutonomy {
            marker,
            autonomy: raw,
        }
    })
}

/// Result of executing one [`Command`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Added,
    NotAdded,
    Demolished,
    NotDemolished,
    Scrapped,
    NotScrapped,
    Route(RoutePlan),
    NoRoute,
}

impl Outcome {
    /// Short machine-friendly label for structured output.
    pub fn label(&self) -> &'static str {
        match self {
            Outcome::Added => "added",
            Outcome::NotAdded => "not_added",
            Outcome::Demolished => "demolished",
            Outcome::NotDemolished => "not_demolished",
            Outcome::Scrapped => "scrapped",
            Outcome::NotScrapped => "not_scrapped",
            Outcome::Route(_) => "route",
            Outcome::NoRoute => "no_route",
        }
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Outcome::Added => f.write_str("added"),
            Outcome::NotAdded => f.write_str("not added"),
            Outcome::Demolished => f.write_str("demolished"),
            Outcome::NotDemolished => f.write_str("not demolished"),
            Outcome::Scrapped => f.write_str("scrapped"),
            Outcome::NotScrapped => f.write_str("not scrapped"),
            Outcome::Route(plan) => write!(f, "{plan}"),
            Outcome::NoRoute => f.write_str("no route"),
        }
    }
}

/// Streaming parser turning a token stream into [`Command`]s.
pub struct CommandReader<R> {
    reader: R,
    pending: VecDeque<String>,
    exhausted: bool,
}

impl<R: BufRead> CommandReader<R> {
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            pending: VecDeque::new(),
            exhausted: false,
        }
    }

    /// Parse the next command, or `None` at a clean end of input.
    pub fn next_command(&mut self) -> Result<Option<Command>> {
        let Some(token) = self.next_token()? else {
            return Ok(None);
        };
        let Some(keyword) = Keyword::parse(&token) else {
            let suggestions = suggest_keywords(&token);
            return Err(Error::UnknownCommand {
                command: token,
                suggestions,
            });
        };

        let name = keyword.canonical();
        let command = match keyword {
            Keyword::AddStation => {
                let marker = self.integer(name, "marker")?;
                // A negative count announces no vehicles.
                let count: i64 = self.integer(name, "count")?;
                let mut vehicles = Vec::new();
                for _ in 0..count.max(0) {
                    vehicles.push(self.integer(name, "autonomy")?);
                }
                Command::AddStation { marker, vehicles }
            }
            Keyword::AddVehicle => Command::AddVehicle {
                marker: self.integer(name, "marker")?,
                autonomy: self.integer(name, "autonomy")?,
            },
            Keyword::RemoveStation => Command::RemoveStation {
                marker: self.integer(name, "marker")?,
            },
            Keyword::ScrapVehicle => Command::ScrapVehicle {
                marker: self.integer(name, "marker")?,
                autonomy: self.integer(name, "autonomy")?,
            },
            Keyword::PlanRoute => Command::PlanRoute {
                start: self.integer(name, "start")?,
                goal: self.integer(name, "goal")?,
            },
        };

        trace!(?command, "command parsed");
        Ok(Some(command))
    }

    fn integer<T: FromStr>(&mut self, command: &'static str, argument: &'static str) -> Result<T> {
        let token = self
            .next_token()?
            .ok_or(Error::MissingArgument { command, argument })?;
        token.parse().map_err(|_| Error::InvalidNumber {
            command,
            argument,
            value: token,
        })
    }

    fn next_token(&mut self) -> Result<Option<String>> {
        loop {
            if let Some(token) = self.pending.pop_front() {
                return Ok(Some(token));
            }
            if self.exhausted {
                return Ok(None);
            }

            let mut line = String::new();
            if self.reader.read_line(&mut line)? == 0 {
                self.exhausted = true;
                continue;
            }
            self.pending
                .extend(line.split_whitespace().map(str::to_owned));
        }
    }
}

impl<R: BufRead> Iterator for CommandReader<R> {
    type Item = Result<Command>;

    fn next(&mut self) -> Option<Self::Item> {
        self.next_command().transpose()
    }
}
