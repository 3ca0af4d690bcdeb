use super::client::UpstreamClient;
use crate::prelude::*;
use paddock_core::f1::{
    to_driver_records, to_race_schedule, to_standings_table, DriverRecord, RaceSchedule, Season,
    StandingsTable,
};
use paddock_core::html::render_standings_html;

/// The upstream pages lists at 30 entries by default, fewer than some seasons have drivers.
const PAGE_LIMIT: &str = "100";

/// Upstream resources the service knows how to fetch
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resource {
    Drivers,
    Standings,
    Races,
}

impl Resource {
    /// Path of the resource relative to the upstream base URL
    pub fn path(self, season: Season) -> String {
        match self {
            Resource::Drivers => format!("{season}/drivers.json"),
            Resource::Standings => format!("{season}/driverStandings.json"),
            Resource::Races => format!("{season}.json"),
        }
    }
}

/// Raw and processed access to Formula 1 data.
///
/// Holds no per-request state; every call re-fetches and re-transforms.
#[derive(Debug, Clone)]
pub struct F1Service {
    client: UpstreamClient,
}

impl F1Service {
    pub fn new(client: UpstreamClient) -> Self {
        Self { client }
    }

    /// Fetch a resource and hand back the upstream JSON untouched
    pub async fn raw(&self, resource: Resource, season: Season) -> ServiceResult<serde_json::Value> {
        self.client
            .fetch(&resource.path(season), &[("limit", PAGE_LIMIT)])
            .await
    }

    pub async fn raw_drivers(&self, season: Season) -> ServiceResult<serde_json::Value> {
        self.raw(Resource::Drivers, season).await
    }

    pub async fn raw_standings(&self, season: Season) -> ServiceResult<serde_json::Value> {
        self.raw(Resource::Standings, season).await
    }

    pub async fn raw_races(&self, season: Season) -> ServiceResult<serde_json::Value> {
        self.raw(Resource::Races, season).await
    }

    pub async fn processed_drivers(&self, season: Season) -> ServiceResult<Vec<DriverRecord>> {
        let response = self.raw_drivers(season).await?;
        Ok(to_driver_records(&response)?)
    }

    pub async fn processed_standings(&self, season: Season) -> ServiceResult<StandingsTable> {
        let response = self.raw_standings(season).await?;
        Ok(to_standings_table(&response)?)
    }

    pub async fn processed_races(&self, season: Season) -> ServiceResult<RaceSchedule> {
        let response = self.raw_races(season).await?;
        Ok(to_race_schedule(&response)?)
    }

    pub async fn standings_html(&self, season: Season) -> ServiceResult<String> {
        let table = self.processed_standings(season).await?;
        Ok(render_standings_html(&table))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use serde_json::json;
    use std::time::Duration;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn service_for(server: &MockServer) -> F1Service {
        let config = Config::new(&server.uri(), Duration::from_secs(5));
        F1Service::new(UpstreamClient::new(&config).unwrap())
    }

    fn scenario_standings() -> serde_json::Value {
        json!({
            "MRData": {
                "StandingsTable": {
                    "season": "2023",
                    "StandingsLists": [{
                        "season": "2023",
                        "round": "22",
                        "DriverStandings": [
                            {
                                "position": "1",
                                "points": "575",
                                "wins": "19",
                                "Driver": { "driverId": "max_verstappen" }
                            },
                            {
                                "position": "2",
                                "points": "285",
                                "wins": "2",
                                "Driver": { "driverId": "perez" }
                            }
                        ]
                    }]
                }
            }
        })
    }

    #[test]
    fn test_resource_paths() {
        assert_eq!(Resource::Drivers.path(Season::Current), "current/drivers.json");
        assert_eq!(
            Resource::Standings.path(Season::Year(2024)),
            "2024/driverStandings.json"
        );
        assert_eq!(Resource::Races.path(Season::Year(2023)), "2023.json");
    }

    #[tokio::test]
    async fn test_raw_standings_is_untouched() {
        let server = MockServer::start().await;
        let body = json!({ "MRData": { "anything": ["goes", 1, null] } });
        Mock::given(method("GET"))
            .and(path("/2023/driverStandings.json"))
            .respond_with(ResponseTemplate::new(200).set_body_json(&body))
            .mount(&server)
            .await;

        let service = service_for(&server);
        let raw = service.raw_standings(Season::Year(2023)).await.unwrap();

        assert_eq!(raw, body);
    }

    #[tokio::test]
    async fn test_processed_standings_and_html() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/2023/driverStandings.json"))
            .respond_with(ResponseTemplate::new(200).set_body_json(scenario_standings()))
            .expect(2)
            .mount(&server)
            .await;

        let service = service_for(&server);

        let table = service
            .processed_standings(Season::Year(2023))
            .await
            .unwrap();
        let ids: Vec<&str> = table.rows.iter().map(|r| r.driver_id.as_str()).collect();
        assert_eq!(ids, vec!["max_verstappen", "perez"]);

        // A second call goes back to the upstream
        let html = service.standings_html(Season::Year(2023)).await.unwrap();
        assert!(html.contains("max_verstappen"));
        assert!(html.contains("575"));
        assert!(html.contains("285"));
    }

    #[tokio::test]
    async fn test_processed_drivers_malformed() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/current/drivers.json"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "MRData": {} })))
            .mount(&server)
            .await;

        let service = service_for(&server);
        let err = service
            .processed_drivers(Season::Current)
            .await
            .unwrap_err();

        assert_eq!(err.kind(), "MalformedUpstreamData");
    }

    #[tokio::test]
    async fn test_processed_races_upstream_failure() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;

        let service = service_for(&server);
        let err = service.processed_races(Season::Current).await.unwrap_err();

        assert_eq!(err.kind(), "UpstreamUnavailable");
        assert_eq!(err.upstream_status(), Some(500));
    }
}
