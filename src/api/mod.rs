use axum::{
    Router,
    extract::{Json, Query},
    http::{StatusCode, header},
    response::{IntoResponse, Response},
    routing::get,
};
use clap::{Parser, ValueEnum};
use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use tokio::net::TcpListener;

use crate::core::{
    Inputs, PeriodUnit, ProjectionMode, ProjectionResult, ProjectionRow, ProjectionSummary,
    RateBasis, TargetOutcome, run,
};

#[derive(Copy, Clone, Debug, Eq, PartialEq, ValueEnum)]
enum CliRateBasis {
    Monthly,
    Annual,
}

impl From<CliRateBasis> for RateBasis {
    fn from(value: CliRateBasis) -> Self {
        match value {
            CliRateBasis::Monthly => RateBasis::Monthly,
            CliRateBasis::Annual => RateBasis::Annual,
        }
    }
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, ValueEnum)]
enum CliPeriodUnit {
    Months,
    Years,
}

impl From<CliPeriodUnit> for PeriodUnit {
    fn from(value: CliPeriodUnit) -> Self {
        match value {
            CliPeriodUnit::Months => PeriodUnit::Months,
            CliPeriodUnit::Years => PeriodUnit::Years,
        }
    }
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, ValueEnum)]
enum CliProjectionMode {
    TimeToTarget,
    RequiredContribution,
}

impl From<CliProjectionMode> for ProjectionMode {
    fn from(value: CliProjectionMode) -> Self {
        match value {
            CliProjectionMode::TimeToTarget => ProjectionMode::TimeToTarget,
            CliProjectionMode::RequiredContribution => ProjectionMode::RequiredContribution,
        }
    }
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, Deserialize)]
#[serde(rename_all = "kebab-case")]
enum ApiRateBasis {
    Monthly,
    Annual,
}

impl From<ApiRateBasis> for CliRateBasis {
    fn from(value: ApiRateBasis) -> Self {
        match value {
            ApiRateBasis::Monthly => CliRateBasis::Monthly,
            ApiRateBasis::Annual => CliRateBasis::Annual,
        }
    }
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, Deserialize)]
#[serde(rename_all = "kebab-case")]
enum ApiPeriodUnit {
    Months,
    Years,
}

impl From<ApiPeriodUnit> for CliPeriodUnit {
    fn from(value: ApiPeriodUnit) -> Self {
        match value {
            ApiPeriodUnit::Months => CliPeriodUnit::Months,
            ApiPeriodUnit::Years => CliPeriodUnit::Years,
        }
    }
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case")]
enum ApiProjectionMode {
    #[serde(alias = "timeToTarget", alias = "time_to_target")]
    TimeToTarget,
    #[serde(alias = "requiredContribution", alias = "required_contribution")]
    RequiredContribution,
}

impl From<ApiProjectionMode> for CliProjectionMode {
    fn from(value: ApiProjectionMode) -> Self {
        match value {
            ApiProjectionMode::TimeToTarget => CliProjectionMode::TimeToTarget,
            ApiProjectionMode::RequiredContribution => CliProjectionMode::RequiredContribution,
        }
    }
}

impl From<ProjectionMode> for ApiProjectionMode {
    fn from(value: ProjectionMode) -> Self {
        match value {
            ProjectionMode::TimeToTarget => ApiProjectionMode::TimeToTarget,
            ProjectionMode::RequiredContribution => ApiProjectionMode::RequiredContribution,
        }
    }
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, Serialize)]
#[serde(rename_all = "kebab-case")]
enum ApiOutcome {
    AlreadyMet,
    Unreachable,
    Reached,
    HorizonExceeded,
}

impl From<TargetOutcome> for ApiOutcome {
    fn from(value: TargetOutcome) -> Self {
        match value {
            TargetOutcome::AlreadyMet => ApiOutcome::AlreadyMet,
            TargetOutcome::Unreachable => ApiOutcome::Unreachable,
            TargetOutcome::Reached(_) => ApiOutcome::Reached,
            TargetOutcome::HorizonExceeded => ApiOutcome::HorizonExceeded,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
struct SimulatePayload {
    initial_amount: Option<f64>,
    target_amount: Option<f64>,
    rate: Option<f64>,
    rate_basis: Option<ApiRateBasis>,
    contribution: Option<f64>,
    period: Option<f64>,
    period_unit: Option<ApiPeriodUnit>,
    mode: Option<ApiProjectionMode>,
}

#[derive(Parser, Debug)]
#[command(
    name = "million",
    about = "Compound-interest projector: months to a wealth target, or the monthly deposit that gets there"
)]
struct Cli {
    #[arg(long, default_value_t = 0.0, help = "Balance already saved and invested")]
    initial_amount: f64,
    #[arg(
        long,
        default_value_t = 1_000_000.0,
        help = "Wealth goal the projection aims at"
    )]
    target_amount: f64,
    #[arg(long, default_value_t = 12.0, help = "Interest rate in percent, e.g. 12")]
    rate: f64,
    #[arg(
        long,
        value_enum,
        default_value_t = CliRateBasis::Annual,
        help = "Whether --rate is a monthly or an annual percentage"
    )]
    rate_basis: CliRateBasis,
    #[arg(
        long,
        default_value_t = 1_000.0,
        help = "Fixed deposit made at the end of each month (time-to-target mode)"
    )]
    contribution: f64,
    #[arg(
        long,
        default_value_t = 5.0,
        help = "Time allowed to reach the target (required-contribution mode)"
    )]
    period: f64,
    #[arg(long, value_enum, default_value_t = CliPeriodUnit::Years)]
    period_unit: CliPeriodUnit,
    #[arg(
        long,
        value_enum,
        default_value_t = CliProjectionMode::TimeToTarget,
        help = "Solve for the time to the target or for the required monthly deposit"
    )]
    mode: CliProjectionMode,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct SimulateResponse {
    mode: ApiProjectionMode,
    target_amount: f64,
    outcome: ApiOutcome,
    summary: ProjectionSummary,
    rows: Vec<ProjectionRow>,
}

#[derive(Debug, Serialize)]
struct ErrorResponse {
    error: String,
}

fn build_inputs(cli: Cli) -> Inputs {
    Inputs {
        initial_amount: finite_or_zero(cli.initial_amount),
        target_amount: finite_or_zero(cli.target_amount),
        rate_value: finite_or_zero(cli.rate),
        rate_basis: cli.rate_basis.into(),
        contribution: finite_or_zero(cli.contribution),
        period_value: finite_or_zero(cli.period),
        period_unit: cli.period_unit.into(),
        mode: cli.mode.into(),
    }
}

// The engine assumes finite numbers; anything else degrades to zero instead
// of failing the request.
fn finite_or_zero(value: f64) -> f64 {
    if value.is_finite() { value } else { 0.0 }
}

pub async fn run_http_server(port: u16) -> std::io::Result<()> {
    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    let app = Router::new()
        .route(
            "/api/simulate",
            get(simulate_get_handler).post(simulate_post_handler),
        )
        .fallback(not_found_handler);

    let listener = TcpListener::bind(addr).await?;
    println!("Projection HTTP API listening on http://{addr}");
    println!("Local access: http://127.0.0.1:{port}/api/simulate");

    axum::serve(listener, app).await
}

async fn not_found_handler() -> Response {
    error_response(StatusCode::NOT_FOUND, "Not found")
}

async fn simulate_get_handler(Query(payload): Query<SimulatePayload>) -> Response {
    simulate_handler_impl(payload).await
}

async fn simulate_post_handler(Json(payload): Json<SimulatePayload>) -> Response {
    simulate_handler_impl(payload).await
}

async fn simulate_handler_impl(payload: SimulatePayload) -> Response {
    let inputs = inputs_from_payload(payload);
    let result = run(&inputs);
    let response = build_simulate_response(&inputs, result);
    json_response(StatusCode::OK, response)
}

fn json_response<T: Serialize>(status: StatusCode, body: T) -> Response {
    let mut response = (status, Json(body)).into_response();
    response.headers_mut().insert(
        header::CACHE_CONTROL,
        "no-store".parse().expect("valid header"),
    );
    response
}

fn error_response(status: StatusCode, msg: &str) -> Response {
    json_response(
        status,
        ErrorResponse {
            error: msg.to_string(),
        },
    )
}

#[cfg(test)]
fn inputs_from_json(json: &str) -> Result<Inputs, String> {
    let payload = serde_json::from_str::<SimulatePayload>(json)
        .map_err(|e| format!("Invalid API JSON payload: {e}"))?;
    Ok(inputs_from_payload(payload))
}

fn inputs_from_payload(payload: SimulatePayload) -> Inputs {
    let mut cli = default_cli_for_api();

    if let Some(v) = payload.initial_amount {
        cli.initial_amount = v;
    }
    if let Some(v) = payload.target_amount {
        cli.target_amount = v;
    }
    if let Some(v) = payload.rate {
        cli.rate = v;
    }
    if let Some(v) = payload.rate_basis {
        cli.rate_basis = v.into();
    }
    if let Some(v) = payload.contribution {
        cli.contribution = v;
    }
    if let Some(v) = payload.period {
        cli.period = v;
    }
    if let Some(v) = payload.period_unit {
        cli.period_unit = v.into();
    }
    if let Some(v) = payload.mode {
        cli.mode = v.into();
    }

    build_inputs(cli)
}

fn default_cli_for_api() -> Cli {
    Cli {
        initial_amount: 0.0,
        target_amount: 1_000_000.0,
        rate: 12.0,
        rate_basis: CliRateBasis::Annual,
        contribution: 1_000.0,
        period: 5.0,
        period_unit: CliPeriodUnit::Years,
        mode: CliProjectionMode::TimeToTarget,
    }
}

fn build_simulate_response(inputs: &Inputs, result: ProjectionResult) -> SimulateResponse {
    SimulateResponse {
        mode: inputs.mode.into(),
        target_amount: inputs.target_amount,
        outcome: result.outcome.into(),
        summary: result.summary,
        rows: result.rows,
    }
}
