//! Node bindings for the amortization core. Every function takes a JSON
//! string and returns the JSON-serialized computation output, so a browser
//! front end only deals with plain objects.

use napi::Result as NapiResult;
use napi_derive::napi;
use rust_decimal::Decimal;
use serde::de::DeserializeOwned;
use serde::Serialize;

use amortization_core::analysis::{comparison, series, summary};
use amortization_core::{calendar, schedule, AmortizationResult};

/// Convert any Display error into a napi::Error.
fn to_napi_error(e: impl std::fmt::Display) -> napi::Error {
    napi::Error::from_reason(e.to_string())
}

fn call<I, O>(input_json: &str, f: impl FnOnce(&I) -> AmortizationResult<O>) -> NapiResult<String>
where
    I: DeserializeOwned,
    O: Serialize,
{
    let input: I = serde_json::from_str(input_json).map_err(to_napi_error)?;
    let output = f(&input).map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}

// ---------------------------------------------------------------------------
// Schedule
// ---------------------------------------------------------------------------

#[napi]
pub fn generate_schedule(input_json: String) -> NapiResult<String> {
    call(&input_json, schedule::build_schedule)
}

#[napi(object)]
pub struct DatedScheduleRequest {
    pub schedule_json: String,
    /// ISO date (YYYY-MM-DD).
    pub start_date: String,
    pub due_day: Option<u32>,
}

#[napi]
pub fn payment_calendar(request: DatedScheduleRequest) -> NapiResult<String> {
    let input: schedule::ScheduleInput =
        serde_json::from_str(&request.schedule_json).map_err(to_napi_error)?;
    let start = request
        .start_date
        .parse()
        .map_err(|e| to_napi_error(format!("invalid start date: {e}")))?;
    let output = schedule::build_schedule(&input).map_err(to_napi_error)?;
    let rows = calendar::dated_rows(
        &output.result,
        start,
        request.due_day.unwrap_or(calendar::DEFAULT_DUE_DAY),
    )
    .map_err(to_napi_error)?;
    serde_json::to_string(&rows).map_err(to_napi_error)
}

/// Effective monthly rate for an annual percentage given as a decimal string.
#[napi]
pub fn monthly_rate(annual_rate: String) -> NapiResult<String> {
    let annual: Decimal = annual_rate.trim().parse().map_err(to_napi_error)?;
    let monthly = schedule::rate::monthly_rate(annual).map_err(to_napi_error)?;
    Ok(monthly.to_string())
}

// ---------------------------------------------------------------------------
// Analysis
// ---------------------------------------------------------------------------

#[napi]
pub fn loan_summary(input_json: String) -> NapiResult<String> {
    call(&input_json, summary::loan_summary)
}

#[napi]
pub fn prepayment_plan(input_json: String) -> NapiResult<String> {
    call(&input_json, comparison::analyze_prepayment_plan)
}

#[napi]
pub fn compare_scenarios(input_json: String) -> NapiResult<String> {
    call(&input_json, comparison::compare_scenarios)
}

/// Comparison chart data; `kind` is `balance`, `cumulative_interest` or
/// `cumulative_principal`.
#[napi]
pub fn comparison_series(input_json: String, kind: String) -> NapiResult<String> {
    let kind: series::SeriesKind =
        serde_json::from_value(serde_json::Value::String(kind)).map_err(to_napi_error)?;
    call(&input_json, |input: &comparison::ComparisonInput| {
        let output = comparison::compare_scenarios(input)?;
        Ok(series::aligned_series(
            &output.result.baseline_schedule,
            &output.result.prepayment_schedule,
            kind,
        ))
    })
}
