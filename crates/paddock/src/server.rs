use crate::config::Config;
use crate::f1::{F1Service, UpstreamClient};
use crate::prelude::{eprintln, *};
use axum::{
    extract::{rejection::QueryRejection, Query, State},
    http::StatusCode,
    response::{Html, IntoResponse, Response},
    routing::get,
    Json, Router,
};
use paddock_core::f1::{DriverRecord, RaceSchedule, Season, StandingsTable};
use paddock_core::html::render_error_html;
use serde::Deserialize;
use serde_json::{json, Value};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};

#[derive(Debug, clap::Args)]
pub struct ServeOptions {
    /// Host to bind to
    #[arg(long, env = "HOST")]
    pub host: Option<String>,

    /// Port to listen on
    #[arg(short, long, env = "PORT")]
    pub port: Option<u16>,
}

type SharedService = Arc<F1Service>;

/// Query string accepted by every data endpoint
#[derive(Debug, Default, Deserialize)]
pub struct SeasonQuery {
    season: Option<String>,
}

impl SeasonQuery {
    fn season(&self) -> ServiceResult<Season> {
        match &self.season {
            Some(season) => Ok(season.parse()?),
            None => Ok(Season::Current),
        }
    }
}

/// Query string with its rejection, so bad input is reported through [`Error`]
type SeasonParams = Result<Query<SeasonQuery>, QueryRejection>;

fn requested_season(params: SeasonParams) -> ServiceResult<Season> {
    let Query(query) = params.map_err(|rejection| Error::InvalidRequest(rejection.body_text()))?;
    query.season()
}

pub async fn run(options: ServeOptions, global: crate::Global) -> Result<()> {
    let config = Config::from_global(&global).with_bind(options.host, options.port);
    let service = F1Service::new(UpstreamClient::new(&config)?);
    let addr = config.bind_address();

    if global.verbose {
        eprintln!("Upstream API: {}", config.base_url);
        eprintln!("Upstream timeout: {:?}", config.timeout);
    }

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .wrap_err_with(|| format!("Failed to bind to {addr}"))?;

    log::info!("Listening on http://{addr}");

    axum::serve(listener, router(Arc::new(service)))
        .await
        .map_err(|e| eyre!("Server error: {e}"))?;

    Ok(())
}

/// All routes of the HTTP API
pub fn router(service: SharedService) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/", get(index))
        .route("/health", get(health))
        .route("/external/data/drivers", get(raw_drivers))
        .route("/external/data/standings", get(raw_standings))
        .route("/external/data/races", get(raw_races))
        .route("/external/processed/drivers", get(processed_drivers))
        .route("/external/processed/standings", get(processed_standings))
        .route("/external/processed/races", get(processed_races))
        .route("/external/f1/html", get(standings_html))
        .fallback(not_found)
        .layer(cors)
        .with_state(service)
}

async fn index() -> Json<Value> {
    Json(json!({
        "message": "Welcome to the paddock F1 data API",
        "version": env!("CARGO_PKG_VERSION"),
        "endpoints": {
            "health": "/health",
            "f1_raw_data": {
                "drivers": "/external/data/drivers?season=current",
                "races": "/external/data/races?season=current",
                "standings": "/external/data/standings?season=current",
            },
            "f1_processed_data": {
                "drivers": "/external/processed/drivers?season=current",
                "races": "/external/processed/races?season=current",
                "standings": "/external/processed/standings?season=current",
            },
            "f1_html_view": "/external/f1/html?season=current",
        }
    }))
}

async fn health() -> Json<Value> {
    Json(json!({ "status": "healthy", "service": "paddock" }))
}

async fn not_found() -> (StatusCode, Json<Value>) {
    (
        StatusCode::NOT_FOUND,
        Json(json!({ "error": { "kind": "NotFound", "message": "not found" } })),
    )
}

async fn raw_drivers(
    State(service): State<SharedService>,
    params: SeasonParams,
) -> ServiceResult<Json<Value>> {
    Ok(Json(service.raw_drivers(requested_season(params)?).await?))
}

async fn raw_standings(
    State(service): State<SharedService>,
    params: SeasonParams,
) -> ServiceResult<Json<Value>> {
    Ok(Json(service.raw_standings(requested_season(params)?).await?))
}

async fn raw_races(
    State(service): State<SharedService>,
    params: SeasonParams,
) -> ServiceResult<Json<Value>> {
    Ok(Json(service.raw_races(requested_season(params)?).await?))
}

async fn processed_drivers(
    State(service): State<SharedService>,
    params: SeasonParams,
) -> ServiceResult<Json<Vec<DriverRecord>>> {
    Ok(Json(service.processed_drivers(requested_season(params)?).await?))
}

async fn processed_standings(
    State(service): State<SharedService>,
    params: SeasonParams,
) -> ServiceResult<Json<StandingsTable>> {
    Ok(Json(service.processed_standings(requested_season(params)?).await?))
}

async fn processed_races(
    State(service): State<SharedService>,
    params: SeasonParams,
) -> ServiceResult<Json<RaceSchedule>> {
    Ok(Json(service.processed_races(requested_season(params)?).await?))
}

async fn standings_html(
    State(service): State<SharedService>,
    params: SeasonParams,
) -> Response {
    let page = match requested_season(params) {
        Ok(season) => service.standings_html(season).await,
        Err(err) => Err(err),
    };

    match page {
        Ok(page) => Html(page).into_response(),
        Err(err) => {
            let status = err.status_code();
            if status.is_server_error() {
                log::error!("{}: {}", err.kind(), err);
            }
            (status, Html(render_error_html(&err.to_string()))).into_response()
        }
    }
}
