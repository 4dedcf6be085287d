//! warp filters for the HTTP surface.

use std::convert::Infallible;
use std::path::PathBuf;
use std::sync::Arc;

use log::error;
use pathlab_core::Point;
use serde::Serialize;
use serde::de::DeserializeOwned;
use warp::filters::BoxedFilter;
use warp::http::{Method, StatusCode};
use warp::reply::Response;
use warp::{Filter, Rejection, Reply};

use crate::config::Config;
use crate::error::{ApiError, handle_rejection};
use crate::service::{
    CancelToken, GenerateMazeRequest, MazeService, ServiceError, Simulation, SimulationRequest,
    SimulationService,
};

/// Services shared by every request.
#[derive(Clone)]
pub struct AppState {
    pub mazes: Arc<MazeService>,
    pub simulations: Arc<SimulationService>,
    max_body_bytes: u64,
}

impl AppState {
    pub fn new(config: &Config) -> Self {
        Self {
            mazes: Arc::new(MazeService::new(config.max_maze_dimension)),
            simulations: Arc::new(SimulationService::new()),
            max_body_bytes: config.max_body_bytes,
        }
    }
}

/// Wire shape of a simulation response.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct SimulateResponse {
    found: bool,
    path: Vec<Point>,
    visited_order: Vec<Point>,
    stats: SimulateStats,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct SimulateStats {
    expanded_nodes: usize,
    path_length: usize,
    elapsed_ms: f64,
}

impl From<Simulation> for SimulateResponse {
    fn from(sim: Simulation) -> Self {
        let elapsed_ms = sim.elapsed_ms();
        let r = sim.result;
        Self {
            found: r.found,
            path: r.path,
            visited_order: r.visited_order,
            stats: SimulateStats {
                expanded_nodes: r.expanded_nodes,
                path_length: r.path_length,
                elapsed_ms,
            },
        }
    }
}

// ============= Filters =============

/// All routes, with rejection recovery, access logging and (in dev mode)
/// permissive CORS.
pub fn routes(state: AppState, config: &Config) -> BoxedFilter<(Box<dyn Reply>,)> {
    let api = health()
        .or(generate_maze(state.clone()))
        .unify()
        .or(simulate(state))
        .unify()
        .boxed();

    let app = match &config.static_dir {
        Some(dir) => api.or(static_files(dir.clone())).unify().boxed(),
        None => api,
    };

    let app = app
        .recover(handle_rejection)
        .with(warp::log("pathlab::http"));

    if config.dev {
        app.with(with_cors()).map(boxed_reply).boxed()
    } else {
        app.map(boxed_reply).boxed()
    }
}

fn boxed_reply<R: Reply + 'static>(reply: R) -> Box<dyn Reply> {
    Box::new(reply)
}

fn with_cors() -> warp::cors::Builder {
    warp::cors()
        .allow_any_origin()
        .allow_methods(vec!["GET", "POST", "OPTIONS"])
        .allow_headers(vec!["content-type"])
}

fn with_state(state: AppState) -> impl Filter<Extract = (AppState,), Error = Infallible> + Clone {
    warp::any().map(move || state.clone())
}

fn json_body<T: DeserializeOwned + Send>(
    limit: u64,
) -> impl Filter<Extract = (T,), Error = Rejection> + Clone {
    warp::body::content_length_limit(limit).and(warp::body::json())
}

fn health() -> impl Filter<Extract = (Response,), Error = Rejection> + Clone {
    warp::path("healthz")
        .and(warp::path::end())
        .and(warp::get())
        .map(|| warp::reply::json(&serde_json::json!({ "status": "ok" })).into_response())
}

fn generate_maze(state: AppState) -> impl Filter<Extract = (Response,), Error = Rejection> + Clone {
    let limit = state.max_body_bytes;
    warp::path!("maze" / "generate")
        .and(warp::post())
        .and(json_body::<GenerateMazeRequest>(limit))
        .and(with_state(state))
        .and_then(handle_generate_maze)
}

fn simulate(state: AppState) -> impl Filter<Extract = (Response,), Error = Rejection> + Clone {
    let limit = state.max_body_bytes;
    warp::path!("simulate")
        .and(warp::post())
        .and(json_body::<SimulationRequest>(limit))
        .and(with_state(state))
        .and_then(handle_simulate)
}

/// Static assets, falling back to `index.html` for client-side routes.
fn static_files(dir: PathBuf) -> impl Filter<Extract = (Response,), Error = Rejection> + Clone {
    let index = dir.join("index.html");
    get_or_head()
        .and(warp::fs::dir(dir).or(warp::fs::file(index)).unify())
        .map(|file: warp::fs::File| file.into_response())
}

/// Like `warp::get()`, but other methods fall through as not found so an
/// unknown POST still reports 404.
fn get_or_head() -> impl Filter<Extract = (), Error = Rejection> + Clone {
    warp::method()
        .and_then(|method: Method| async move {
            if method == Method::GET || method == Method::HEAD {
                Ok(())
            } else {
                Err(warp::reject::not_found())
            }
        })
        .untuple_one()
}

// ============= Handlers =============

/// Run `job` on the blocking pool. The token is tripped if this future is
/// dropped before the job gets a thread.
async fn run_blocking<T, F>(job: F) -> Result<T, ServiceError>
where
    T: Send + 'static,
    F: FnOnce(&CancelToken) -> Result<T, ServiceError> + Send + 'static,
{
    let cancel = CancelToken::new();
    let _guard = cancel.drop_guard();
    let token = cancel.clone();
    tokio::task::spawn_blocking(move || job(&token))
        .await
        .map_err(|e| {
            error!("blocking task failed: {e}");
            ServiceError::Internal("request processing failed".into())
        })?
}

async fn handle_generate_maze(
    req: GenerateMazeRequest,
    state: AppState,
) -> Result<Response, Rejection> {
    let mazes = state.mazes.clone();
    let maze = run_blocking(move |cancel| mazes.generate(&req, cancel))
        .await
        .map_err(|e| warp::reject::custom(ApiError::from(e)))?;
    Ok(warp::reply::json(&maze).into_response())
}

async fn handle_simulate(req: SimulationRequest, state: AppState) -> Result<Response, Rejection> {
    let simulations = state.simulations.clone();
    let sim = run_blocking(move |cancel| simulations.run(req, cancel))
        .await
        .map_err(|e| warp::reject::custom(ApiError::from(e)))?;
    let status = if sim.result.found {
        StatusCode::OK
    } else {
        StatusCode::UNPROCESSABLE_ENTITY
    };
    let body = SimulateResponse::from(sim);
    Ok(warp::reply::with_status(warp::reply::json(&body), status).into_response())
}
