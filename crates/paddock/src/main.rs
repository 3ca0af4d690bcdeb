use crate::prelude::*;
use clap::Parser;

mod config;
mod error;
mod f1;
mod prelude;
mod server;

#[derive(Debug, clap::Parser)]
#[command(
    author,
    version,
    about,
    long_about = "Formula 1 data proxy: raw and processed drivers, standings and races"
)]
pub struct App {
    #[command(subcommand)]
    pub command: SubCommands,

    #[clap(flatten)]
    global: Global,
}

#[derive(Debug, Clone, clap::Args)]
pub struct Global {
    /// Base URL of the Ergast-compatible racing-statistics API
    #[clap(
        long,
        env = "F1_API_BASE_URL",
        global = true,
        default_value = config::DEFAULT_BASE_URL
    )]
    base_url: String,

    /// Timeout for each upstream request, in seconds
    #[clap(long, env = "F1_API_TIMEOUT_SECS", global = true, default_value = "10")]
    timeout: u64,

    /// Whether to display additional information.
    #[clap(long, env = "PADDOCK_VERBOSE", global = true, default_value = "false")]
    verbose: bool,
}

#[derive(Debug, clap::Parser)]
pub enum SubCommands {
    /// Serve the HTTP API
    Serve(crate::server::ServeOptions),

    #[command(flatten)]
    F1(crate::f1::Commands),
}

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::init();
    color_eyre::install()?;

    let app = App::parse();

    match app.command {
        SubCommands::Serve(options) => crate::server::run(options, app.global).await,
        SubCommands::F1(command) => crate::f1::run(command, app.global).await,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::f1::Commands;
    use paddock_core::f1::Season;

    #[test]
    fn test_data_commands_sit_at_top_level() {
        let app = App::try_parse_from(["paddock", "standings", "--season", "2023", "--html"]).unwrap();

        match app.command {
            SubCommands::F1(Commands::Standings(options)) => {
                assert_eq!(options.query.season, Season::Year(2023));
                assert!(options.html);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_serve_and_races_parse() {
        let app = App::try_parse_from(["paddock", "serve", "--port", "9000"]).unwrap();
        assert!(matches!(app.command, SubCommands::Serve(ref options) if options.port == Some(9000)));

        let app = App::try_parse_from(["paddock", "races", "--json"]).unwrap();
        assert!(matches!(app.command, SubCommands::F1(Commands::Races(ref options)) if options.json));
    }
}
