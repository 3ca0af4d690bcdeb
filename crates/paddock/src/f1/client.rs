use crate::config::Config;
use crate::prelude::*;
use log::{debug, warn};

/// Thin HTTP client for the racing-statistics API.
///
/// Every call goes to the network exactly once: there is no retry and no cache.
#[derive(Debug, Clone)]
pub struct UpstreamClient {
    http: reqwest::Client,
    base_url: String,
}

impl UpstreamClient {
    pub fn new(config: &Config) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(config.timeout)
            .user_agent(concat!("paddock/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| eyre!("Failed to build HTTP client: {}", e))?;

        Ok(Self {
            http,
            base_url: config.base_url.clone(),
        })
    }

    pub fn url_for(&self, resource_path: &str) -> String {
        format!(
            "{}/{}",
            self.base_url,
            resource_path.trim_start_matches('/')
        )
    }

    /// GET `resource_path` relative to the base URL and parse the body as JSON.
    pub async fn fetch(
        &self,
        resource_path: &str,
        query: &[(&str, &str)],
    ) -> ServiceResult<serde_json::Value> {
        let url = self.url_for(resource_path);
        debug!("GET {url} {query:?}");

        let response = self
            .http
            .get(&url)
            .query(query)
            .send()
            .await
            .map_err(|e| {
                let reason = if e.is_timeout() { "timed out" } else { "failed" };
                warn!("Request to {url} {reason}: {e}");
                Error::UpstreamUnavailable {
                    status: None,
                    message: format!("Request to {url} {reason}: {e}"),
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            warn!("{url} returned HTTP {status}");
            return Err(Error::UpstreamUnavailable {
                status: Some(status.as_u16()),
                message: format!("{url} returned HTTP {status}"),
            });
        }

        let body = response.bytes().await.map_err(|e| {
            warn!("Failed to read response from {url}: {e}");
            Error::UpstreamUnavailable {
                status: None,
                message: format!("Failed to read response from {url}: {e}"),
            }
        })?;

        serde_json::from_slice(&body).map_err(|e| {
            warn!("{url} did not return valid JSON: {e}");
            Error::MalformedUpstreamData(format!("{url} did not return valid JSON: {e}"))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::time::{Duration, Instant};
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn client_for(base_url: &str, timeout: Duration) -> UpstreamClient {
        UpstreamClient::new(&Config::new(base_url, timeout)).unwrap()
    }

    #[test]
    fn test_url_for_joins_paths() {
        let client = client_for("http://localhost:1/api/f1/", Duration::from_secs(1));
        assert_eq!(
            client.url_for("2024/driverStandings.json"),
            "http://localhost:1/api/f1/2024/driverStandings.json"
        );
        assert_eq!(
            client.url_for("/current/drivers.json"),
            "http://localhost:1/api/f1/current/drivers.json"
        );
    }

    #[tokio::test]
    async fn test_fetch_returns_parsed_json() {
        let server = MockServer::start().await;
        let body = json!({ "MRData": { "DriverTable": { "Drivers": [] } } });
        Mock::given(method("GET"))
            .and(path("/current/drivers.json"))
            .and(query_param("limit", "100"))
            .respond_with(ResponseTemplate::new(200).set_body_json(&body))
            .expect(1)
            .mount(&server)
            .await;

        let client = client_for(&server.uri(), Duration::from_secs(5));
        let value = client
            .fetch("current/drivers.json", &[("limit", "100")])
            .await
            .unwrap();

        assert_eq!(value, body);
    }

    #[tokio::test]
    async fn test_fetch_non_success_status() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(503))
            .mount(&server)
            .await;

        let client = client_for(&server.uri(), Duration::from_secs(5));
        let err = client.fetch("current.json", &[]).await.unwrap_err();

        assert!(matches!(
            err,
            Error::UpstreamUnavailable {
                status: Some(503),
                ..
            }
        ));
    }

    #[tokio::test]
    async fn test_fetch_invalid_json_is_malformed() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html>maintenance</html>"))
            .mount(&server)
            .await;

        let client = client_for(&server.uri(), Duration::from_secs(5));
        let err = client.fetch("current.json", &[]).await.unwrap_err();

        assert_eq!(err.kind(), "MalformedUpstreamData");
    }

    #[tokio::test]
    async fn test_fetch_unreachable_endpoint() {
        // Bind then drop to get a port nobody listens on
        let port = {
            let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
            listener.local_addr().unwrap().port()
        };

        let client = client_for(&format!("http://127.0.0.1:{port}"), Duration::from_secs(2));
        let err = client.fetch("current.json", &[]).await.unwrap_err();

        assert!(matches!(
            err,
            Error::UpstreamUnavailable { status: None, .. }
        ));
    }

    #[tokio::test]
    async fn test_fetch_truncated_body_has_no_status() {
        use tokio::io::{AsyncReadExt, AsyncWriteExt};

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();

        // Promise 100 bytes, send one, hang up
        tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let mut request = [0u8; 1024];
            let _ = socket.read(&mut request).await;
            let _ = socket
                .write_all(
                    b"HTTP/1.1 200 OK\r\nContent-Type: application/json\r\nContent-Length: 100\r\n\r\n{",
                )
                .await;
            let _ = socket.shutdown().await;
        });

        let client = client_for(&format!("http://{addr}"), Duration::from_secs(5));
        let err = client.fetch("current.json", &[]).await.unwrap_err();

        assert!(matches!(
            err,
            Error::UpstreamUnavailable { status: None, .. }
        ));
    }

    #[tokio::test]
    async fn test_fetch_respects_timeout() {
        // Accepted by the kernel backlog but never answered
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();

        let client = client_for(&format!("http://{addr}"), Duration::from_millis(300));
        let started = Instant::now();
        let err = client.fetch("current.json", &[]).await.unwrap_err();

        assert!(started.elapsed() < Duration::from_secs(5));
        assert!(matches!(
            err,
            Error::UpstreamUnavailable { status: None, .. }
        ));
        drop(listener);
    }
}
