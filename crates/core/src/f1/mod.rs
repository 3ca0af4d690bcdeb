//! Pure transformation functions for racing-statistics API responses
//!
//! The upstream wraps every resource in the same envelope: a root `MRData`
//! object holding one `*Table` object, which in turn holds the entity list.
//! The functions here walk that envelope with explicit [`Step`]s and project
//! each entity into a flat output record. They perform no I/O.

use serde::Serialize;
use std::collections::HashSet;

pub mod envelope;
pub mod season;

pub use envelope::{Cursor, Step, TransformError};
pub use season::{Season, SeasonError};

const DRIVERS_PATH: &[Step<'static>] = &[
    Step::Key("MRData"),
    Step::Key("DriverTable"),
    Step::Key("Drivers"),
];

const STANDINGS_TABLE_PATH: &[Step<'static>] =
    &[Step::Key("MRData"), Step::Key("StandingsTable")];

const RACE_TABLE_PATH: &[Step<'static>] = &[Step::Key("MRData"), Step::Key("RaceTable")];

/// Season label used when the upstream omits one
const CURRENT_SEASON_LABEL: &str = "current";

// ============================================================================
// Output Models (Domain Model)
// ============================================================================

/// One driver as listed for a season
#[derive(Debug, Serialize, Clone, PartialEq)]
pub struct DriverRecord {
    pub driver_id: String,
    pub given_name: String,
    pub family_name: String,
    pub full_name: String,
    pub nationality: String,
    pub date_of_birth: Option<String>,
    pub permanent_number: Option<String>,
    pub code: Option<String>,
    pub url: Option<String>,
}

/// One line of the driver championship standings
#[derive(Debug, Serialize, Clone, PartialEq)]
pub struct StandingsRow {
    /// Rank as asserted by the upstream, 1-based
    pub position: u32,
    pub driver_id: String,
    pub driver_name: String,
    pub driver_code: Option<String>,
    pub nationality: Option<String>,
    pub team: Option<String>,
    pub points: f64,
    pub wins: u32,
}

/// Driver standings for a season, in upstream order
#[derive(Debug, Serialize, Clone, PartialEq)]
pub struct StandingsTable {
    pub season: String,
    pub round: Option<String>,
    pub rows: Vec<StandingsRow>,
}

/// One event of the race calendar
#[derive(Debug, Serialize, Clone, PartialEq)]
pub struct RaceRecord {
    pub round: String,
    pub race_name: String,
    pub circuit_name: String,
    pub locality: String,
    pub country: String,
    pub date: String,
    pub time: Option<String>,
    pub latitude: String,
    pub longitude: String,
}

/// Race calendar for a season
#[derive(Debug, Serialize, Clone, PartialEq)]
pub struct RaceSchedule {
    pub season: String,
    pub races: Vec<RaceRecord>,
}

// ============================================================================
// Pure Transformation Functions
// ============================================================================

/// Project the upstream driver list into [`DriverRecord`]s.
///
/// Order and cardinality follow the upstream list exactly. A response without
/// `MRData.DriverTable.Drivers` is an error, never an empty list.
pub fn to_driver_records(
    response: &serde_json::Value,
) -> Result<Vec<DriverRecord>, TransformError> {
    Cursor::root(response)
        .navigate(DRIVERS_PATH)?
        .elements()?
        .iter()
        .map(driver_record)
        .collect()
}

fn driver_record(entry: &Cursor<'_>) -> Result<DriverRecord, TransformError> {
    let given_name = entry.required_text("givenName")?;
    let family_name = entry.required_text("familyName")?;

    Ok(DriverRecord {
        driver_id: entry.required_text("driverId")?,
        full_name: format!("{given_name} {family_name}"),
        given_name,
        family_name,
        nationality: entry.required_text("nationality")?,
        date_of_birth: entry.optional_text("dateOfBirth")?,
        permanent_number: entry.optional_text("permanentNumber")?,
        code: entry.optional_text("code")?,
        url: entry.optional_text("url")?,
    })
}

/// Project the upstream driver standings into a [`StandingsTable`].
///
/// Rows keep the upstream order; positions are taken as asserted by the
/// upstream and never recomputed from points. An empty `StandingsLists`
/// (a season without results yet) yields a table with no rows.
pub fn to_standings_table(
    response: &serde_json::Value,
) -> Result<StandingsTable, TransformError> {
    let table = Cursor::root(response).navigate(STANDINGS_TABLE_PATH)?;
    let lists = table.key("StandingsLists")?.elements()?;
    let table_season = table.optional_text("season")?;

    let Some(list) = lists.first() else {
        return Ok(StandingsTable {
            season: table_season.unwrap_or_else(|| CURRENT_SEASON_LABEL.to_string()),
            round: table.optional_text("round")?,
            rows: Vec::new(),
        });
    };

    let entries = list.key("DriverStandings")?.elements()?;
    let rows = entries
        .iter()
        .enumerate()
        .map(|(index, entry)| standings_row(index, entry))
        .collect::<Result<Vec<_>, _>>()?;

    // A fallback rank may collide with one the upstream asserts further down.
    let mut seen = HashSet::with_capacity(rows.len());
    for (entry, row) in entries.iter().zip(&rows) {
        if !seen.insert(row.position) {
            let cursor = entry.optional("position").unwrap_or_else(|| entry.clone());
            return Err(cursor.invalid(&format!("position {} is not unique", row.position)));
        }
    }

    Ok(StandingsTable {
        season: list
            .optional_text("season")?
            .or(table_season)
            .unwrap_or_else(|| CURRENT_SEASON_LABEL.to_string()),
        round: list.optional_text("round")?,
        rows,
    })
}

fn standings_row(index: usize, entry: &Cursor<'_>) -> Result<StandingsRow, TransformError> {
    // Excluded drivers come without a `position`; their slot in the list is their rank.
    let position = match entry.optional("position") {
        Some(cursor) => {
            let position: u32 = cursor.number()?;
            if position == 0 {
                return Err(cursor.invalid("positions are 1-based"));
            }
            position
        }
        None => index as u32 + 1,
    };

    let points_cursor = entry.key("points")?;
    let points: f64 = points_cursor.number()?;
    if !points.is_finite() || points < 0.0 {
        return Err(points_cursor.invalid("points must be a non-negative number"));
    }

    let driver = entry.key("Driver")?;
    let driver_id = driver.required_text("driverId")?;
    let driver_name = match (
        driver.optional_text("givenName")?,
        driver.optional_text("familyName")?,
    ) {
        (Some(given), Some(family)) => format!("{given} {family}"),
        _ => driver_id.clone(),
    };

    let team = match entry.optional("Constructors") {
        Some(constructors) => constructors
            .elements()?
            .first()
            .map(|constructor| constructor.required_text("name"))
            .transpose()?,
        None => None,
    };

    Ok(StandingsRow {
        position,
        driver_name,
        driver_code: driver.optional_text("code")?,
        nationality: driver.optional_text("nationality")?,
        driver_id,
        team,
        points,
        wins: entry.key("wins")?.number()?,
    })
}

/// Project the upstream race calendar into a [`RaceSchedule`].
pub fn to_race_schedule(response: &serde_json::Value) -> Result<RaceSchedule, TransformError> {
    let table = Cursor::root(response).navigate(RACE_TABLE_PATH)?;

    let races = table
        .key("Races")?
        .elements()?
        .iter()
        .map(race_record)
        .collect::<Result<Vec<_>, _>>()?;

    Ok(RaceSchedule {
        season: table
            .optional_text("season")?
            .unwrap_or_else(|| CURRENT_SEASON_LABEL.to_string()),
        races,
    })
}

fn race_record(entry: &Cursor<'_>) -> Result<RaceRecord, TransformError> {
    let circuit = entry.key("Circuit")?;
    let location = circuit.key("Location")?;

    Ok(RaceRecord {
        round: entry.required_text("round")?,
        race_name: entry.required_text("raceName")?,
        circuit_name: circuit.required_text("circuitName")?,
        locality: location.required_text("locality")?,
        country: location.required_text("country")?,
        date: entry.required_text("date")?,
        time: entry.optional_text("time")?,
        latitude: location.required_text("lat")?,
        longitude: location.required_text("long")?,
    })
}

/// One-line description of who leads the standings
pub fn standings_summary(table: &StandingsTable) -> String {
    match table.rows.first() {
        Some(leader) => format!(
            "Championship leader: {} with {} points and {} wins.",
            leader.driver_name, leader.points, leader.wins
        ),
        None => "No standings data available.".to_string(),
    }
}

// ============================================================================
// Tests
// ============================================================================
