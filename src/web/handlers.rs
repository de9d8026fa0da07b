use actix_web::{web, HttpResponse};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::analysis::{run_sweep, GrowthModel, ParameterSet, SimulationResult, SweepRow, SweepSummary};
use crate::error::SimError;
use crate::io;
use crate::models::{ModelConstants, ModelParameters, ParameterRanges};

use super::state::{AppState, ParameterUpdate};

/// Upper bound on samples a single request may ask for.
const MAX_SAMPLES: usize = 5_000;

// ---------------------------------------------------------------------------
// Error wrapper
// ---------------------------------------------------------------------------

#[derive(Debug, Serialize)]
struct ErrorBody {
    error: String,
    details: String,
}

#[derive(Debug)]
pub(crate) struct WebError(SimError);

impl From<SimError> for WebError {
    fn from(e: SimError) -> Self {
        WebError(e)
    }
}

impl std::fmt::Display for WebError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl actix_web::ResponseError for WebError {
    fn error_response(&self) -> HttpResponse {
        let (status, error_type) = match &self.0 {
            SimError::ValidationError(_) | SimError::ParseError(_) => {
                (actix_web::http::StatusCode::BAD_REQUEST, "Bad Request")
            }
            SimError::NotFound(_) => (actix_web::http::StatusCode::NOT_FOUND, "Not Found"),
            SimError::InsufficientData(_) => (
                actix_web::http::StatusCode::UNPROCESSABLE_ENTITY,
                "Unprocessable Entity",
            ),
            _ => (
                actix_web::http::StatusCode::INTERNAL_SERVER_ERROR,
                "Internal Server Error",
            ),
        };
        HttpResponse::build(status).json(ErrorBody {
            error: error_type.to_string(),
            details: self.0.to_string(),
        })
    }
}

fn session_not_found(id: &Uuid) -> WebError {
    WebError(SimError::NotFound(format!("Session {id} not found")))
}

// ---------------------------------------------------------------------------
// Request / response bodies
// ---------------------------------------------------------------------------

#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SimulateRequest {
    parameters: Option<ModelParameters>,
    samples: Option<usize>,
}

#[derive(Serialize)]
struct DefaultsResponse {
    constants: ModelConstants,
    parameters: ModelParameters,
    samples: usize,
    ranges: ParameterRanges,
}

#[derive(Serialize)]
struct SessionResponse {
    id: Uuid,
    result: SimulationResult,
}

#[derive(Serialize)]
struct SweepResponse {
    rows: Vec<SweepRow>,
    summary: Option<SweepSummary>,
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Fill in defaults from the server config and validate the request.
fn resolve_request(state: &AppState, req: &SimulateRequest) -> Result<(ModelParameters, usize), WebError> {
    let params = req.parameters.unwrap_or(state.config.parameters);
    params.validate()?;

    let samples = req.samples.unwrap_or(state.config.simulation.samples);
    if !(2..=MAX_SAMPLES).contains(&samples) {
        return Err(WebError(SimError::ValidationError(format!(
            "samples must be between 2 and {MAX_SAMPLES}, got {samples}"
        ))));
    }
    Ok((params, samples))
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

pub async fn defaults(state: web::Data<AppState>) -> HttpResponse {
    HttpResponse::Ok().json(DefaultsResponse {
        constants: state.config.constants,
        parameters: state.config.parameters,
        samples: state.config.simulation.samples,
        ranges: ParameterRanges::default(),
    })
}

pub async fn simulate(
    state: web::Data<AppState>,
    body: web::Json<SimulateRequest>,
) -> Result<HttpResponse, WebError> {
    let (params, samples) = resolve_request(&state, &body)?;
    let result = GrowthModel::new(state.config.constants).simulate(&params, samples);
    Ok(HttpResponse::Ok().json(result))
}

pub async fn create_session(
    state: web::Data<AppState>,
    body: web::Json<SimulateRequest>,
) -> Result<HttpResponse, WebError> {
    let (params, samples) = resolve_request(&state, &body)?;
    let (id, result) = state.create_session(params, samples);
    Ok(HttpResponse::Created().json(SessionResponse { id, result }))
}

pub async fn get_session(
    state: web::Data<AppState>,
    path: web::Path<Uuid>,
) -> Result<HttpResponse, WebError> {
    let id = path.into_inner();
    let result = state.session_result(&id).ok_or_else(|| session_not_found(&id))?;
    Ok(HttpResponse::Ok().json(SessionResponse { id, result }))
}

pub async fn update_session(
    state: web::Data<AppState>,
    path: web::Path<Uuid>,
    body: web::Json<ParameterUpdate>,
) -> Result<HttpResponse, WebError> {
    let id = path.into_inner();
    let result = state
        .apply_update(&id, &body)
        .ok_or_else(|| session_not_found(&id))??;
    Ok(HttpResponse::Ok().json(SessionResponse { id, result }))
}

pub async fn delete_session(
    state: web::Data<AppState>,
    path: web::Path<Uuid>,
) -> Result<HttpResponse, WebError> {
    let id = path.into_inner();
    if state.remove_session(&id) {
        Ok(HttpResponse::NoContent().finish())
    } else {
        Err(session_not_found(&id))
    }
}

pub async fn export_session(
    state: web::Data<AppState>,
    path: web::Path<Uuid>,
) -> Result<HttpResponse, WebError> {
    let id = path.into_inner();
    let result = state.session_result(&id).ok_or_else(|| session_not_found(&id))?;
    let data = io::curve_csv_bytes(&result)?;
    Ok(HttpResponse::Ok()
        .content_type("text/csv")
        .insert_header((
            "Content-Disposition",
            format!("attachment; filename=\"growth-{id}.csv\""),
        ))
        .body(data))
}

pub async fn sweep(
    state: web::Data<AppState>,
    body: web::Json<Vec<ParameterSet>>,
) -> Result<HttpResponse, WebError> {
    let rows = run_sweep(&GrowthModel::new(state.config.constants), &body)?;
    let summary = SweepSummary::compute(&rows).ok();
    Ok(HttpResponse::Ok().json(SweepResponse { rows, summary }))
}

pub async fn index_html() -> HttpResponse {
    HttpResponse::Ok()
        .content_type("text/html; charset=utf-8")
        .body(include_str!("../../static/index.html"))
}

pub async fn app_js() -> HttpResponse {
    HttpResponse::Ok()
        .content_type("application/javascript; charset=utf-8")
        .body(include_str!("../../static/app.js"))
}

pub async fn style_css() -> HttpResponse {
    HttpResponse::Ok()
        .content_type("text/css; charset=utf-8")
        .body(include_str!("../../static/style.css"))
}
