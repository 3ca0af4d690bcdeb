use crate::config::Config;
use crate::prelude::{println, *};
use colored::Colorize;
use paddock_core::f1::{standings_summary, DriverRecord, RaceSchedule, Season, StandingsTable};

pub mod client;
pub mod service;

pub use client::UpstreamClient;
pub use service::F1Service;

#[derive(Debug, clap::Subcommand)]
pub enum Commands {
    /// List the drivers of a season
    #[clap(name = "drivers")]
    Drivers(QueryOptions),

    /// Show the driver championship standings
    #[clap(name = "standings")]
    Standings(StandingsOptions),

    /// Show the race calendar of a season
    #[clap(name = "races")]
    Races(QueryOptions),
}

#[derive(Debug, clap::Args, Clone)]
pub struct QueryOptions {
    /// Season year (e.g., 2024) or 'current'
    #[arg(short, long, env = "F1_SEASON", default_value = "current")]
    pub season: Season,

    /// Output the processed data as JSON
    #[arg(long)]
    pub json: bool,

    /// Output the upstream JSON untouched
    #[arg(long, conflicts_with = "json")]
    pub raw: bool,
}

#[derive(Debug, clap::Args, Clone)]
pub struct StandingsOptions {
    #[command(flatten)]
    pub query: QueryOptions,

    /// Output the standings as an HTML page
    #[arg(long, conflicts_with_all = ["json", "raw"])]
    pub html: bool,
}

/// Build the service from the global options
pub fn service_from(global: &crate::Global) -> Result<F1Service> {
    let config = Config::from_global(global);
    Ok(F1Service::new(UpstreamClient::new(&config)?))
}

pub async fn run(command: Commands, global: crate::Global) -> Result<()> {
    if global.verbose {
        println!("F1 API Base: {}", global.base_url);
        println!();
    }

    let service = service_from(&global)?;

    match command {
        Commands::Drivers(options) => drivers(&service, options).await,
        Commands::Standings(options) => standings(&service, options).await,
        Commands::Races(options) => races(&service, options).await,
    }
}

async fn drivers(service: &F1Service, options: QueryOptions) -> Result<()> {
    if options.raw {
        return print_json(&service.raw_drivers(options.season).await?);
    }

    let drivers = service.processed_drivers(options.season).await?;
    if options.json {
        return print_json(&drivers);
    }

    println!("{}", format_drivers_header(options.season, drivers.len()));
    drivers_table(&drivers).printstd();
    Ok(())
}

async fn standings(service: &F1Service, options: StandingsOptions) -> Result<()> {
    let season = options.query.season;

    if options.html {
        println!("{}", service.standings_html(season).await?);
        return Ok(());
    }
    if options.query.raw {
        return print_json(&service.raw_standings(season).await?);
    }

    let table = service.processed_standings(season).await?;
    if options.query.json {
        return print_json(&table);
    }

    println!(
        "{}",
        format!("F1 {} SEASON - DRIVER STANDINGS", table.season)
            .bright_cyan()
            .bold()
    );
    println!("{}\n", standings_summary(&table));
    standings_table(&table).printstd();
    Ok(())
}

async fn races(service: &F1Service, options: QueryOptions) -> Result<()> {
    if options.raw {
        return print_json(&service.raw_races(options.season).await?);
    }

    let schedule = service.processed_races(options.season).await?;
    if options.json {
        return print_json(&schedule);
    }

    println!(
        "{}",
        format!(
            "F1 {} SEASON - RACE CALENDAR ({} races)",
            schedule.season,
            schedule.races.len()
        )
        .bright_cyan()
        .bold()
    );
    races_table(&schedule).printstd();
    Ok(())
}

fn print_json<T: serde::Serialize>(value: &T) -> Result<()> {
    let json =
        serde_json::to_string_pretty(value).map_err(|e| eyre!("JSON serialization failed: {}", e))?;
    println!("{json}");
    Ok(())
}

fn format_drivers_header(season: Season, total: usize) -> String {
    format!("F1 {} SEASON - {} DRIVERS", season.to_string().to_uppercase(), total)
        .bright_cyan()
        .bold()
        .to_string()
}

fn or_na(value: &Option<String>) -> &str {
    value.as_deref().unwrap_or("N/A")
}

fn drivers_table(drivers: &[DriverRecord]) -> prettytable::Table {
    let mut table = new_table();
    table.add_row(prettytable::row!["#", "Code", "Driver", "Nationality", "Born"]);

    for driver in drivers {
        table.add_row(prettytable::row![
            or_na(&driver.permanent_number),
            or_na(&driver.code),
            &driver.full_name,
            &driver.nationality,
            or_na(&driver.date_of_birth)
        ]);
    }

    table
}

fn standings_table(standings: &StandingsTable) -> prettytable::Table {
    let mut table = new_table();
    table.add_row(prettytable::row![
        "Pos", "Driver", "Code", "Team", "Points", "Wins"
    ]);

    for row in &standings.rows {
        table.add_row(prettytable::row![
            row.position,
            &row.driver_name,
            or_na(&row.driver_code),
            or_na(&row.team),
            row.points,
            row.wins
        ]);
    }

    table
}

fn races_table(schedule: &RaceSchedule) -> prettytable::Table {
    let mut table = new_table();
    table.add_row(prettytable::row![
        "Round", "Race", "Circuit", "Location", "Date", "Time"
    ]);

    for race in &schedule.races {
        table.add_row(prettytable::row![
            &race.round,
            &race.race_name,
            &race.circuit_name,
            format!("{}, {}", race.locality, race.country),
            &race.date,
            race.time.as_deref().unwrap_or("TBA")
        ]);
    }

    table
}

#[cfg(test)]
mod tests {
    use super::*;
    use paddock_core::f1::{RaceRecord, StandingsRow};

    #[test]
    fn test_standings_table_has_header_plus_rows() {
        let standings = StandingsTable {
            season: "2023".to_string(),
            round: None,
            rows: vec![StandingsRow {
                position: 1,
                driver_id: "max_verstappen".to_string(),
                driver_name: "Max Verstappen".to_string(),
                driver_code: Some("VER".to_string()),
                nationality: Some("Dutch".to_string()),
                team: None,
                points: 575.0,
                wins: 19,
            }],
        };

        let table = standings_table(&standings);
        assert_eq!(table.len(), 2);

        let rendered = table.to_string();
        assert!(rendered.contains("Max Verstappen"));
        assert!(rendered.contains("575"));
        assert!(rendered.contains("N/A"));
    }

    #[test]
    fn test_races_table_marks_missing_time() {
        let schedule = RaceSchedule {
            season: "2024".to_string(),
            races: vec![RaceRecord {
                round: "1".to_string(),
                race_name: "Bahrain Grand Prix".to_string(),
                circuit_name: "Bahrain International Circuit".to_string(),
                locality: "Sakhir".to_string(),
                country: "Bahrain".to_string(),
                date: "2024-03-02".to_string(),
                time: None,
                latitude: "26.0325".to_string(),
                longitude: "50.5106".to_string(),
            }],
        };

        let rendered = races_table(&schedule).to_string();
        assert!(rendered.contains("Sakhir, Bahrain"));
        assert!(rendered.contains("TBA"));
    }
}
